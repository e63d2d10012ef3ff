//! SetWithdrawalQueue instruction - replace the withdrawal order

use super::commit;
use crate::state::VaultAccount;
use model_safety::MAX_QUEUE_SLOTS;
use pinocchio::pubkey::Pubkey;
use pinocchio_log::log;
use strata_common::StrataError;

/// Process set withdrawal queue instruction
///
/// `ordering` is null-padded. Every non-null entry must be registered,
/// appear once, and precede every null slot.
pub fn process_set_withdrawal_queue(
    vault: &mut VaultAccount,
    caller: &Pubkey,
    ordering: &[Pubkey; MAX_QUEUE_SLOTS],
) -> Result<(), StrataError> {
    commit(vault, |s| model_safety::set_queue_in_place(s, caller, ordering))?;

    log!("Withdrawal queue set: queue_len={}", vault.queue_len);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::process_add_strategy;
    use model_safety::{StrategyConfig, NULL_ID};

    const GOV: Pubkey = [1; 32];
    const A: Pubkey = [10; 32];
    const B: Pubkey = [11; 32];

    fn vault_with_two() -> VaultAccount {
        let mut vault = VaultAccount::new(GOV, 255);
        process_add_strategy(&mut vault, &GOV, 1, &A, StrategyConfig::new(100, 1, 0)).unwrap();
        process_add_strategy(&mut vault, &GOV, 1, &B, StrategyConfig::new(100, 1, 0)).unwrap();
        vault
    }

    #[test]
    fn test_set_queue_reorders() {
        let mut vault = vault_with_two();
        let mut ordering = [NULL_ID; MAX_QUEUE_SLOTS];
        ordering[0] = B;
        ordering[1] = A;

        process_set_withdrawal_queue(&mut vault, &GOV, &ordering).unwrap();
        assert_eq!(vault.withdrawal_queue, ordering);
        assert_eq!(vault.queue_len, 2);
    }

    #[test]
    fn test_set_queue_duplicate_keeps_prior() {
        let mut vault = vault_with_two();
        let mut ordering = [NULL_ID; MAX_QUEUE_SLOTS];
        ordering[0] = A;
        ordering[1] = A;

        assert_eq!(
            process_set_withdrawal_queue(&mut vault, &GOV, &ordering),
            Err(StrataError::DuplicateEntry)
        );
        assert_eq!(vault.queue_slot(0), A);
        assert_eq!(vault.queue_slot(1), B);
    }

    #[test]
    fn test_set_queue_unknown_and_gap() {
        let mut vault = vault_with_two();

        let mut unknown = [NULL_ID; MAX_QUEUE_SLOTS];
        unknown[0] = [99; 32];
        assert_eq!(
            process_set_withdrawal_queue(&mut vault, &GOV, &unknown),
            Err(StrataError::UnknownStrategy)
        );

        let mut gapped = [NULL_ID; MAX_QUEUE_SLOTS];
        gapped[0] = A;
        gapped[2] = B;
        assert_eq!(
            process_set_withdrawal_queue(&mut vault, &GOV, &gapped),
            Err(StrataError::NonContiguous)
        );
    }

    #[test]
    fn test_set_queue_empty() {
        let mut vault = vault_with_two();
        process_set_withdrawal_queue(&mut vault, &GOV, &[NULL_ID; MAX_QUEUE_SLOTS]).unwrap();
        assert_eq!(vault.queue_len, 0);
        assert_eq!(vault.strategy_count, 2);
    }
}
