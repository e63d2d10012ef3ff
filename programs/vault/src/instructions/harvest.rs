//! Harvest instruction - strategy report with debt settlement

use super::commit;
use crate::state::VaultAccount;
use model_safety::Settlement;
use pinocchio::pubkey::Pubkey;
use pinocchio_log::log;
use strata_common::StrataError;

/// Process harvest instruction
///
/// The strategy repays up to what it owes, receives whatever credit the pool
/// can extend, and reports `gain`. The pool side is the account's idle
/// balance plus every strategy's debt; idle moves by `debt_payment - credit`.
///
/// # Arguments
/// * `vault` - The vault account data
/// * `caller` - Signer of the transaction (must equal `strategy`)
/// * `block` - Current slot
/// * `strategy` - Harvesting strategy
/// * `gain` - Realized gain since the previous report
/// * `debt_payment` - Capital the strategy offers back to the pool
pub fn process_harvest(
    vault: &mut VaultAccount,
    caller: &Pubkey,
    block: u64,
    strategy: &Pubkey,
    gain: u128,
    debt_payment: u128,
) -> Result<Settlement, StrataError> {
    let assets = vault.total_assets();
    let settled = commit(vault, |s| {
        model_safety::harvest_in_place(s, &assets, caller, block, strategy, gain, debt_payment)
    })?;

    vault.total_idle = vault
        .total_idle
        .saturating_add(settled.debt_payment)
        .saturating_sub(settled.credit);

    log!(
        "Harvest: credit={} debt_payment={} gain={}",
        settled.credit,
        settled.debt_payment,
        gain
    );
    Ok(settled)
}
