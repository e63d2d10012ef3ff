//! AddStrategy instruction - admit a strategy and queue it

use super::commit;
use crate::state::VaultAccount;
use model_safety::StrategyConfig;
use pinocchio::pubkey::Pubkey;
use pinocchio_log::log;
use strata_common::StrataError;

/// Process add strategy instruction
///
/// Registers `strategy` as Active with its activation and last-report
/// blocks set to `block`, then appends it to the withdrawal queue.
///
/// # Arguments
/// * `vault` - The vault account data
/// * `caller` - Signer of the transaction (must be governance)
/// * `block` - Current slot
/// * `strategy` - Strategy identity to admit
/// * `config` - Debt ratio, rate limit and performance fee
pub fn process_add_strategy(
    vault: &mut VaultAccount,
    caller: &Pubkey,
    block: u64,
    strategy: &Pubkey,
    config: StrategyConfig,
) -> Result<(), StrataError> {
    commit(vault, |s| model_safety::admit_in_place(s, caller, block, *strategy, config))?;

    log!(
        "Strategy admitted: debt_ratio={} fee={} queue_len={}",
        config.debt_ratio,
        config.performance_fee,
        vault.queue_len
    );
    Ok(())
}
