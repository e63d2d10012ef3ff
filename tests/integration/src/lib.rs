//! Strata Integration Tests
//!
//! Drives the vault program's instruction processors against a host-side
//! `VaultAccount` and replays the same operations on the pure model, so the
//! account encoding and the model can be checked against each other.
//!
//! Note: pinocchio programs use their own `AccountInfo` type, which
//! solana-program-test cannot construct, so these tests call the
//! `process_*` handlers directly rather than going through a runtime.

use model_safety::{
    access::require_governance, State, StrategyConfig, StrategyId, VaultResult, MAX_QUEUE_SLOTS,
};
use strata_common::StrataError;
use strata_vault::{
    process_add_strategy, process_harvest, process_migrate_strategy, process_remove_from_queue,
    process_report, process_revoke_strategy, process_set_idle_assets,
    process_set_withdrawal_queue, process_update_strategy, vault_to_state, VaultAccount,
};

/// One governance or strategy action, as both sides understand it
#[derive(Clone, Debug)]
pub enum Action {
    Admit { strategy: StrategyId, config: StrategyConfig },
    Update { strategy: StrategyId, config: StrategyConfig },
    Revoke { strategy: StrategyId },
    Migrate { old: StrategyId, new: StrategyId },
    Remove { strategy: StrategyId },
    SetQueue { ordering: [StrategyId; MAX_QUEUE_SLOTS] },
    Report { strategy: StrategyId, gain: u128 },
    Harvest { strategy: StrategyId, gain: u128, debt_payment: u128 },
    SetIdle { total_idle: u128 },
}

/// A vault account paired with the model state it should encode
///
/// `idle` is the pool's unallocated balance, which the model leaves to
/// the ledger and the account stores itself.
pub struct Harness {
    pub vault: Box<VaultAccount>,
    pub model: State,
    pub idle: u128,
}

impl Harness {
    pub fn new(governance: StrategyId) -> Self {
        Self {
            vault: Box::new(VaultAccount::new(governance, 255)),
            model: State::new(governance),
            idle: 0,
        }
    }

    /// Run `action` on the account through the program handler
    pub fn apply_program(&mut self, caller: &StrategyId, block: u64, action: &Action) -> Result<(), StrataError> {
        let vault = &mut *self.vault;
        match action {
            Action::Admit { strategy, config } => process_add_strategy(vault, caller, block, strategy, *config),
            Action::Update { strategy, config } => process_update_strategy(vault, caller, strategy, *config),
            Action::Revoke { strategy } => process_revoke_strategy(vault, caller, strategy),
            Action::Migrate { old, new } => process_migrate_strategy(vault, caller, old, new),
            Action::Remove { strategy } => process_remove_from_queue(vault, caller, strategy),
            Action::SetQueue { ordering } => process_set_withdrawal_queue(vault, caller, ordering),
            Action::Report { strategy, gain } => process_report(vault, caller, block, strategy, *gain),
            Action::Harvest { strategy, gain, debt_payment } => {
                process_harvest(vault, caller, block, strategy, *gain, *debt_payment).map(|_| ())
            }
            Action::SetIdle { total_idle } => process_set_idle_assets(vault, caller, *total_idle),
        }
    }

    /// Run `action` on the model alone; returns the next state and idle balance
    pub fn apply_model(&self, caller: &StrategyId, block: u64, action: &Action) -> VaultResult<(State, u128)> {
        let s = &self.model;
        let idle = self.idle;
        let keep_idle = |next: State| (next, idle);
        match action {
            Action::Admit { strategy, config } => model_safety::admit(s, caller, block, *strategy, *config).map(keep_idle),
            Action::Update { strategy, config } => model_safety::update(s, caller, strategy, *config).map(keep_idle),
            Action::Revoke { strategy } => model_safety::revoke(s, caller, strategy).map(keep_idle),
            Action::Migrate { old, new } => model_safety::migrate(s, caller, old, *new).map(keep_idle),
            Action::Remove { strategy } => model_safety::remove_from_queue(s, caller, strategy).map(keep_idle),
            Action::SetQueue { ordering } => model_safety::set_queue(s, caller, ordering).map(keep_idle),
            Action::Report { strategy, gain } => model_safety::report(s, caller, block, strategy, *gain).map(keep_idle),
            Action::Harvest { strategy, gain, debt_payment } => {
                let assets = idle.saturating_add(s.registry.total_debt());
                let (next, settled) =
                    model_safety::harvest(s, &assets, caller, block, strategy, *gain, *debt_payment)?;
                Ok((next, idle.saturating_add(settled.debt_payment).saturating_sub(settled.credit)))
            }
            Action::SetIdle { total_idle } => {
                require_governance(s, caller)?;
                Ok((s.clone(), *total_idle))
            }
        }
    }

    /// Run on both sides and check they agree; returns the program result
    pub fn step(&mut self, caller: &StrategyId, block: u64, action: &Action) -> Result<(), StrataError> {
        let expected = self.apply_model(caller, block, action);
        let actual = self.apply_program(caller, block, action);

        match expected {
            Ok((next, idle)) => {
                assert_eq!(actual, Ok(()), "program rejected {:?} accepted by model", action);
                self.model = next;
                self.idle = idle;
            }
            Err(e) => assert_eq!(actual, Err(StrataError::from(e)), "error mismatch on {:?}", action),
        }

        assert_eq!(self.decoded(), self.model, "account diverged after {:?}", action);
        assert_eq!(self.vault.total_idle, self.idle, "idle balance diverged after {:?}", action);
        actual
    }

    /// Decode the account back into a model state
    pub fn decoded(&self) -> State {
        match vault_to_state(&self.vault) {
            Ok(state) => state,
            Err(e) => panic!("vault account failed to decode: {:?}", e),
        }
    }
}
