//! RevokeStrategy instruction - stop future allocation to a strategy

use super::commit;
use crate::state::VaultAccount;
use pinocchio::{msg, pubkey::Pubkey};
use strata_common::StrataError;

/// Process revoke strategy instruction
///
/// Zeroes the strategy's debt ratio and marks it Revoked. The record and
/// its queue slot stay until governance removes them.
pub fn process_revoke_strategy(
    vault: &mut VaultAccount,
    caller: &Pubkey,
    strategy: &Pubkey,
) -> Result<(), StrataError> {
    commit(vault, |s| model_safety::revoke_in_place(s, caller, strategy))?;

    msg!("Strategy revoked");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::process_add_strategy;
    use model_safety::{StrategyConfig, StrategyStatus};

    const GOV: Pubkey = [1; 32];
    const A: Pubkey = [10; 32];

    #[test]
    fn test_revoke_zeroes_ratio_keeps_slot() {
        let mut vault = VaultAccount::new(GOV, 255);
        process_add_strategy(&mut vault, &GOV, 5, &A, StrategyConfig::new(1000, 10, 50)).unwrap();
        let before = vault.strategy_params(&A);

        process_revoke_strategy(&mut vault, &GOV, &A).unwrap();

        let after = vault.strategy_params(&A);
        assert_eq!(after.debt_ratio, 0);
        assert_eq!(after.rate_limit, before.rate_limit);
        assert_eq!(after.activation_block, before.activation_block);
        assert_eq!(vault.strategy_status(&A), StrategyStatus::Revoked);
        assert_eq!(vault.queue_slot(0), A);
    }

    #[test]
    fn test_revoke_is_idempotent() {
        let mut vault = VaultAccount::new(GOV, 255);
        process_add_strategy(&mut vault, &GOV, 5, &A, StrategyConfig::new(1000, 10, 50)).unwrap();
        process_revoke_strategy(&mut vault, &GOV, &A).unwrap();
        process_revoke_strategy(&mut vault, &GOV, &A).unwrap();
        assert_eq!(vault.strategy_status(&A), StrategyStatus::Revoked);
    }

    #[test]
    fn test_revoke_unauthorized() {
        let mut vault = VaultAccount::new(GOV, 255);
        process_add_strategy(&mut vault, &GOV, 5, &A, StrategyConfig::new(1000, 10, 50)).unwrap();
        assert_eq!(
            process_revoke_strategy(&mut vault, &A, &A),
            Err(StrataError::Unauthorized)
        );
        assert_eq!(vault.strategy_params(&A).debt_ratio, 1000);
    }
}
