//! Report instruction - strategy self-report of realized gain

use super::commit;
use crate::state::VaultAccount;
use pinocchio::pubkey::Pubkey;
use pinocchio_log::log;
use strata_common::StrataError;

/// Process report instruction
///
/// Only the strategy itself may report. Gain accumulates into `total_gain`
/// and the report block is stamped.
///
/// # Arguments
/// * `vault` - The vault account data
/// * `caller` - Signer of the transaction (must equal `strategy`)
/// * `block` - Current slot
/// * `strategy` - Reporting strategy
/// * `gain` - Realized gain since the previous report
pub fn process_report(
    vault: &mut VaultAccount,
    caller: &Pubkey,
    block: u64,
    strategy: &Pubkey,
    gain: u128,
) -> Result<(), StrataError> {
    commit(vault, |s| model_safety::report_in_place(s, caller, block, strategy, gain))?;

    log!("Report accepted: block={} gain={}", block, gain);
    Ok(())
}
