//! Program-level scenarios checked against the model

use model_safety::{
    state_ok, withdrawal_plan, StrategyConfig, StrategyId, StrategyParams, StrategyStatus,
    MAX_QUEUE_SLOTS, NULL_ID,
};
use strata_common::StrataError;
use strata_integration_tests::{Action, Harness};

const GOV: StrategyId = [1; 32];
const A: StrategyId = [10; 32];
const B: StrategyId = [11; 32];
const C: StrategyId = [12; 32];
const D: StrategyId = [13; 32];

fn config() -> StrategyConfig {
    StrategyConfig::new(1000, 10, 50)
}

fn admit(h: &mut Harness, strategy: StrategyId, block: u64) {
    h.step(&GOV, block, &Action::Admit { strategy, config: config() }).unwrap();
}

fn queue(h: &Harness, n: usize) -> Vec<StrategyId> {
    (0..n).map(|i| h.vault.queue_slot(i)).collect()
}

#[test]
fn test_queue_ordering_scenario() {
    let mut h = Harness::new(GOV);
    for s in [A, B, C] {
        admit(&mut h, s, 10);
    }
    assert_eq!(queue(&h, 4), vec![A, B, C, NULL_ID]);

    let mut ordering = [NULL_ID; MAX_QUEUE_SLOTS];
    ordering[..3].copy_from_slice(&[C, B, A]);
    h.step(&GOV, 11, &Action::SetQueue { ordering }).unwrap();

    admit(&mut h, D, 12);
    assert_eq!(queue(&h, 5), vec![C, B, A, D, NULL_ID]);

    h.step(&GOV, 13, &Action::Remove { strategy: B }).unwrap();
    assert_eq!(queue(&h, 4), vec![C, A, D, NULL_ID]);
    assert!(state_ok(&h.decoded()));
}

#[test]
fn test_zero_gain_report_projects_nothing() {
    let mut h = Harness::new(GOV);
    admit(&mut h, A, 5);

    h.step(&A, 40, &Action::Report { strategy: A, gain: 0 }).unwrap();
    assert_eq!(h.vault.expected_return(40, &A), Ok(0));
}

#[test]
fn test_unknown_strategy_reads() {
    let h = Harness::new(GOV);
    assert_eq!(h.vault.strategy_params(&A), StrategyParams::default());
    assert_eq!(h.vault.strategy_status(&A), StrategyStatus::Unregistered);
    assert_eq!(h.vault.queue_slot(0), NULL_ID);
    assert_eq!(h.vault.queue_position(&A), None);
}

#[test]
fn test_guards_surface_program_codes() {
    let mut h = Harness::new(GOV);
    admit(&mut h, A, 1);

    let cases = [
        (A, Action::Admit { strategy: B, config: config() }, StrataError::Unauthorized),
        (GOV, Action::Admit { strategy: A, config: config() }, StrataError::AlreadyActive),
        (GOV, Action::Update { strategy: B, config: config() }, StrataError::NotActive),
        (GOV, Action::Migrate { old: A, new: A }, StrataError::SelfMigration),
        (GOV, Action::Remove { strategy: B }, StrataError::NotQueued),
        (GOV, Action::Report { strategy: A, gain: 1 }, StrataError::Unauthorized),
        (GOV, Action::Harvest { strategy: A, gain: 1, debt_payment: 0 }, StrataError::Unauthorized),
        (A, Action::SetIdle { total_idle: 1 }, StrataError::Unauthorized),
    ];

    for (caller, action, code) in cases.iter() {
        assert_eq!(h.step(caller, 2, action), Err(*code));
    }
}

#[test]
fn test_withdrawal_plan_follows_queue() {
    let mut h = Harness::new(GOV);
    h.step(&GOV, 0, &Action::SetIdle { total_idle: 10_000 }).unwrap();
    for s in [A, B, C] {
        admit(&mut h, s, 1);
    }

    // Rate limit 10 per block since admission at block 1
    for (s, block) in [(A, 4), (B, 101), (C, 6)] {
        h.step(&s, block, &Action::Harvest { strategy: s, gain: 0, debt_payment: 0 }).unwrap();
    }
    assert_eq!(h.vault.strategy_params(&A).total_debt, 30);
    assert_eq!(h.vault.strategy_params(&B).total_debt, 1_000);
    assert_eq!(h.vault.strategy_params(&C).total_debt, 50);
    assert_eq!(h.vault.total_idle, 10_000 - 1_080);

    h.step(&GOV, 102, &Action::Remove { strategy: B }).unwrap();
    let state = h.decoded();

    let plan = withdrawal_plan(&state, 60);
    let legs: Vec<(StrategyId, u128)> = plan.legs.iter().map(|l| (l.strategy, l.amount)).collect();
    assert_eq!(legs, vec![(A, 30), (C, 30)]);
    assert_eq!(plan.shortfall, 0);

    let plan = withdrawal_plan(&state, 200);
    assert_eq!(plan.total(), 80);
    assert_eq!(plan.shortfall, 120);
}

#[test]
fn test_revoked_strategy_drains_through_harvest() {
    let mut h = Harness::new(GOV);
    h.step(&GOV, 0, &Action::SetIdle { total_idle: 10_000 }).unwrap();
    admit(&mut h, A, 1);
    h.step(&A, 50, &Action::Harvest { strategy: A, gain: 7, debt_payment: 0 }).unwrap();
    assert_eq!(h.vault.strategy_params(&A).total_debt, 490);

    h.step(&GOV, 51, &Action::Revoke { strategy: A }).unwrap();
    h.step(&A, 52, &Action::Harvest { strategy: A, gain: 0, debt_payment: 200 }).unwrap();
    assert_eq!(h.vault.strategy_params(&A).total_debt, 290);

    h.step(&A, 53, &Action::Harvest { strategy: A, gain: 0, debt_payment: u128::MAX }).unwrap();
    assert_eq!(h.vault.strategy_params(&A).total_debt, 0);
    assert_eq!(h.vault.total_idle, 10_000);
    assert_eq!(h.vault.strategy_params(&A).total_gain, 7);
}

#[test]
fn test_migration_keeps_history_through_account() {
    let mut h = Harness::new(GOV);
    admit(&mut h, A, 3);
    admit(&mut h, B, 4);
    h.step(&A, 9, &Action::Report { strategy: A, gain: 12 }).unwrap();
    h.step(&GOV, 10, &Action::Revoke { strategy: A }).unwrap();

    h.step(&GOV, 11, &Action::Migrate { old: A, new: C }).unwrap();

    let params = h.vault.strategy_params(&C);
    assert_eq!(params.activation_block, 3);
    assert_eq!(params.last_report_block, 9);
    assert_eq!(params.total_gain, 12);
    assert_eq!(h.vault.strategy_status(&C), StrategyStatus::Revoked);
    assert_eq!(queue(&h, 2), vec![C, B]);
}
