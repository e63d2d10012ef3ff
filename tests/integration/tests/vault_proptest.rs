//! Random action sequences: the account and the model never diverge

use model_safety::{state_ok, StrategyConfig, StrategyId, MAX_QUEUE_SLOTS, NULL_ID};
use proptest::prelude::*;
use strata_integration_tests::{Action, Harness};

const GOV: StrategyId = [1; 32];

fn id(n: u8) -> StrategyId {
    if n == 0 {
        return NULL_ID;
    }
    let mut out = [0u8; 32];
    out[0] = 0xB0;
    out[31] = n;
    out
}

fn config_strategy() -> impl Strategy<Value = StrategyConfig> {
    (0u64..4_000, 0u128..100, 0u64..6_000).prop_map(|(r, l, f)| StrategyConfig::new(r, l, f))
}

fn action_strategy() -> impl Strategy<Value = Action> {
    // Index 0 maps to the null identity
    let idx = 0u8..7;
    prop_oneof![
        (idx.clone(), config_strategy()).prop_map(|(i, config)| Action::Admit { strategy: id(i), config }),
        (idx.clone(), config_strategy()).prop_map(|(i, config)| Action::Update { strategy: id(i), config }),
        idx.clone().prop_map(|i| Action::Revoke { strategy: id(i) }),
        (idx.clone(), idx.clone()).prop_map(|(a, b)| Action::Migrate { old: id(a), new: id(b) }),
        idx.clone().prop_map(|i| Action::Remove { strategy: id(i) }),
        proptest::collection::vec(idx.clone(), 0..6).prop_map(|picks| {
            let mut ordering = [NULL_ID; MAX_QUEUE_SLOTS];
            for (slot, i) in ordering.iter_mut().zip(picks) {
                *slot = id(i);
            }
            Action::SetQueue { ordering }
        }),
        (idx.clone(), 0u128..1_000).prop_map(|(i, gain)| Action::Report { strategy: id(i), gain }),
        (idx, 0u128..1_000, 0u128..2_000)
            .prop_map(|(i, gain, debt_payment)| Action::Harvest { strategy: id(i), gain, debt_payment }),
        (0u128..50_000).prop_map(|total_idle| Action::SetIdle { total_idle }),
    ]
}

fn caller_for(action: &Action) -> StrategyId {
    match action {
        Action::Report { strategy, .. } | Action::Harvest { strategy, .. } => *strategy,
        _ => GOV,
    }
}

proptest! {
    #[test]
    fn prop_account_matches_model(actions in proptest::collection::vec(action_strategy(), 1..40)) {
        let mut h = Harness::new(GOV);
        for (block, action) in actions.iter().enumerate() {
            // step() asserts agreement of results and of the decoded account
            let _ = h.step(&caller_for(action), block as u64, action);
            prop_assert!(state_ok(&h.decoded()));
            prop_assert_eq!(h.vault.queue_len as usize, h.model.queue.len());
            prop_assert!(h.model.registry.total_debt() <= h.vault.total_assets());
        }
    }

    #[test]
    fn prop_stranger_never_changes_account(actions in proptest::collection::vec(action_strategy(), 1..20)) {
        let mut h = Harness::new(GOV);
        for n in 1..4u8 {
            let admit = Action::Admit { strategy: id(n), config: StrategyConfig::new(500, 1, 0) };
            prop_assert!(h.step(&GOV, 0, &admit).is_ok());
        }
        let before = h.decoded();

        let stranger = [9u8; 32];
        for action in actions.iter() {
            if matches!(action, Action::Report { .. } | Action::Harvest { .. }) {
                continue;
            }
            prop_assert!(h.step(&stranger, 1, action).is_err());
        }
        prop_assert_eq!(h.decoded(), before);
        prop_assert_eq!(h.vault.total_idle, 0);
    }
}
