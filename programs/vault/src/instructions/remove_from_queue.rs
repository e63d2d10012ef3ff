//! RemoveFromQueue instruction - drop a strategy from the withdrawal order

use super::commit;
use crate::state::VaultAccount;
use pinocchio::pubkey::Pubkey;
use pinocchio_log::log;
use strata_common::StrataError;

/// Process remove from queue instruction
///
/// Later entries shift one slot earlier; the registry record is untouched.
pub fn process_remove_from_queue(
    vault: &mut VaultAccount,
    caller: &Pubkey,
    strategy: &Pubkey,
) -> Result<(), StrataError> {
    commit(vault, |s| model_safety::remove_from_queue_in_place(s, caller, strategy))?;

    log!("Removed from queue: queue_len={}", vault.queue_len);
    Ok(())
}
