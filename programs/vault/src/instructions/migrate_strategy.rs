//! MigrateStrategy instruction - re-key a strategy record

use super::commit;
use crate::state::VaultAccount;
use pinocchio::{msg, pubkey::Pubkey};
use strata_common::StrataError;

/// Process migrate strategy instruction
///
/// Moves the whole record of `old` (status, debt, gain, history) under
/// `new` and swaps the identity in its queue slot. `old` reads as
/// unregistered afterwards.
pub fn process_migrate_strategy(
    vault: &mut VaultAccount,
    caller: &Pubkey,
    old: &Pubkey,
    new: &Pubkey,
) -> Result<(), StrataError> {
    commit(vault, |s| model_safety::migrate_in_place(s, caller, old, *new))?;

    msg!("Strategy migrated");
    Ok(())
}
