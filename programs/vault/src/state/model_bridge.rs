//! Bridge between the vault account and verified model_safety types
//!
//! The account stores the registry as a prefix of fixed slots and the queue
//! as a null-padded array. The model stores both as bounded vectors. Every
//! instruction decodes the account into a `State`, runs a model transition,
//! and writes the result back with [`apply_state_to_vault`].
//!
//! # Type Mappings
//!
//! | Account Field | Model Field | Notes |
//! |---------------|-------------|-------|
//! | VaultAccount.governance | State.governance | Direct mapping |
//! | strategies[..strategy_count] | State.registry | Slot order is record order |
//! | StrategySlot.status (u8) | StrategyRecord.status | Must decode to Active or Revoked |
//! | withdrawal_queue | State.queue | Prefix of length queue_len, rest null |

use super::{StrategySlot, VaultAccount};
use alloc::boxed::Box;
use model_safety::{State, StrategyStatus, WithdrawalQueue, MAX_STRATEGIES, NULL_ID};
use strata_common::StrataError;

/// Decode a vault account into a model `State`
///
/// Fails with `CorruptState` if the bytes break any structural rule the
/// model relies on: unknown status, duplicate or null identity, queue gap,
/// queue length mismatch or an unregistered queue entry.
pub fn vault_to_state(vault: &VaultAccount) -> Result<State, StrataError> {
    let mut state = State::new(vault.governance);
    load_state(vault, &mut state)?;
    Ok(state)
}

/// Decode into a heap-allocated `State`
///
/// A full `State` is larger than one SBF stack frame, so the program only
/// ever decodes through this.
pub fn load_boxed_state(vault: &VaultAccount) -> Result<Box<State>, StrataError> {
    let mut state = Box::new(State::new(vault.governance));
    load_state(vault, &mut state)?;
    Ok(state)
}

/// Decode a vault account into an existing `State`, replacing its contents
pub fn load_state(vault: &VaultAccount, state: &mut State) -> Result<(), StrataError> {
    let count = vault.strategy_count as usize;
    if count > MAX_STRATEGIES {
        return Err(StrataError::CorruptState);
    }

    state.governance = vault.governance;
    state.registry.clear();

    for slot in vault.strategies.iter().take(count) {
        let status =
            StrategyStatus::try_from(slot.status).map_err(|_| StrataError::CorruptState)?;
        if !status.is_registered() || slot.id == NULL_ID || state.registry.contains(&slot.id) {
            return Err(StrataError::CorruptState);
        }
        state
            .registry
            .insert(slot.id, status, slot.params())
            .map_err(|_| StrataError::CorruptState)?;
    }

    state.queue = WithdrawalQueue::from_slots(&vault.withdrawal_queue)
        .map_err(|_| StrataError::CorruptState)?;
    if state.queue.len() != vault.queue_len as usize
        || state.queue.entries().iter().any(|id| !state.registry.contains(id))
    {
        return Err(StrataError::CorruptState);
    }

    Ok(())
}

/// Write a model `State` back into the vault account
///
/// Records are packed into the leading slots and every trailing slot is
/// cleared, so no stale record survives a migration or shrink.
pub fn apply_state_to_vault(vault: &mut VaultAccount, state: &State) {
    vault.governance = state.governance;

    let mut count = 0usize;
    for (slot, record) in vault.strategies.iter_mut().zip(state.registry.iter()) {
        *slot = StrategySlot::new(record.id, record.status, &record.params);
        count += 1;
    }
    for slot in vault.strategies.iter_mut().skip(count) {
        *slot = StrategySlot::EMPTY;
    }
    vault.strategy_count = count as u16;

    vault.withdrawal_queue = state.queue.to_slots();
    vault.queue_len = state.queue.len() as u16;
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_safety::StrategyConfig;

    const GOV: [u8; 32] = [1; 32];

    fn populated_state() -> State {
        let s = State::new(GOV);
        let s = model_safety::admit(&s, &GOV, 10, [2; 32], StrategyConfig::new(3000, 50, 100)).unwrap();
        let s = model_safety::admit(&s, &GOV, 11, [3; 32], StrategyConfig::new(2000, 70, 0)).unwrap();
        model_safety::revoke(&s, &GOV, &[2; 32]).unwrap()
    }

    #[test]
    fn test_apply_then_decode_preserves_state() {
        let state = populated_state();
        let mut vault = VaultAccount::new(GOV, 255);

        apply_state_to_vault(&mut vault, &state);
        assert_eq!(vault.strategy_count, 2);
        assert_eq!(vault.queue_len, 2);
        assert_eq!(vault.strategy_status(&[2; 32]), StrategyStatus::Revoked);

        let decoded = vault_to_state(&vault).unwrap();
        assert_eq!(decoded, state);
        assert_eq!(*load_boxed_state(&vault).unwrap(), state);
    }

    #[test]
    fn test_load_state_replaces_previous_contents() {
        let mut vault = VaultAccount::new(GOV, 255);
        apply_state_to_vault(&mut vault, &populated_state());

        let mut scratch = populated_state();
        load_state(&VaultAccount::new(GOV, 255), &mut scratch).unwrap();
        assert_eq!(scratch, State::new(GOV));

        load_state(&vault, &mut scratch).unwrap();
        assert_eq!(scratch, populated_state());
    }

    #[test]
    fn test_apply_clears_stale_slots() {
        let mut vault = VaultAccount::new(GOV, 255);
        apply_state_to_vault(&mut vault, &populated_state());

        apply_state_to_vault(&mut vault, &State::new(GOV));
        assert_eq!(vault.strategy_count, 0);
        assert_eq!(vault.queue_len, 0);
        assert!(vault.strategies.iter().all(|s| s.id == NULL_ID));
        assert!(vault.withdrawal_queue.iter().all(|q| *q == NULL_ID));
    }

    #[test]
    fn test_decode_rejects_bad_status() {
        let mut vault = VaultAccount::new(GOV, 255);
        apply_state_to_vault(&mut vault, &populated_state());
        vault.strategies[0].status = 9;
        assert_eq!(vault_to_state(&vault), Err(StrataError::CorruptState));

        vault.strategies[0].status = StrategyStatus::Unregistered as u8;
        assert_eq!(vault_to_state(&vault), Err(StrataError::CorruptState));
    }

    #[test]
    fn test_decode_rejects_duplicate_ids() {
        let mut vault = VaultAccount::new(GOV, 255);
        apply_state_to_vault(&mut vault, &populated_state());
        vault.strategies[1].id = vault.strategies[0].id;
        assert_eq!(vault_to_state(&vault), Err(StrataError::CorruptState));
    }

    #[test]
    fn test_decode_rejects_queue_gap_and_length_mismatch() {
        let mut vault = VaultAccount::new(GOV, 255);
        apply_state_to_vault(&mut vault, &populated_state());

        let mut gapped = vault;
        gapped.withdrawal_queue[0] = NULL_ID;
        assert_eq!(vault_to_state(&gapped), Err(StrataError::CorruptState));

        let mut short = vault;
        short.queue_len = 1;
        assert_eq!(vault_to_state(&short), Err(StrataError::CorruptState));

        let mut oversized = vault;
        oversized.strategy_count = (MAX_STRATEGIES + 1) as u16;
        assert_eq!(vault_to_state(&oversized), Err(StrataError::CorruptState));
    }
}
