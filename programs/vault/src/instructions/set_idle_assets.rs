//! SetIdleAssets instruction - record the pool's unallocated balance

use super::commit;
use crate::state::VaultAccount;
use model_safety::access::require_governance;
use pinocchio::pubkey::Pubkey;
use pinocchio_log::log;
use strata_common::StrataError;

/// Process set idle assets instruction
///
/// Governance mirrors the pooled-asset ledger's idle balance into the
/// account. Harvest credit is measured against idle plus allocated debt.
pub fn process_set_idle_assets(
    vault: &mut VaultAccount,
    caller: &Pubkey,
    total_idle: u128,
) -> Result<(), StrataError> {
    commit(vault, |s| require_governance(s, caller))?;
    vault.total_idle = total_idle;

    log!("Idle assets set: total_idle={}", total_idle);
    Ok(())
}
