//! UpdateStrategy instruction - change a strategy's configuration

use super::commit;
use crate::state::VaultAccount;
use model_safety::StrategyConfig;
use pinocchio::pubkey::Pubkey;
use pinocchio_log::log;
use strata_common::StrataError;

/// Process update strategy instruction
///
/// Replaces debt ratio, rate limit and performance fee of a registered
/// strategy. Activation block, report history and queue slot are kept.
pub fn process_update_strategy(
    vault: &mut VaultAccount,
    caller: &Pubkey,
    strategy: &Pubkey,
    config: StrategyConfig,
) -> Result<(), StrataError> {
    commit(vault, |s| model_safety::update_in_place(s, caller, strategy, config))?;

    log!("Strategy updated: debt_ratio={}", config.debt_ratio);
    Ok(())
}
