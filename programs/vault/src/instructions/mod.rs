/// Vault instruction handlers

pub mod initialize;
pub mod add_strategy;
pub mod update_strategy;
pub mod revoke_strategy;
pub mod migrate_strategy;
pub mod remove_from_queue;
pub mod set_withdrawal_queue;
pub mod report;
pub mod harvest;
pub mod set_idle_assets;

pub use initialize::*;
pub use add_strategy::*;
pub use update_strategy::*;
pub use revoke_strategy::*;
pub use migrate_strategy::*;
pub use remove_from_queue::*;
pub use set_withdrawal_queue::*;
pub use report::*;
pub use harvest::*;
pub use set_idle_assets::*;

pub use strata_common::VaultInstruction;

use crate::state::{apply_state_to_vault, load_boxed_state, VaultAccount};
use model_safety::{State, VaultResult};
use pinocchio::msg;
use strata_common::StrataError;

/// Run an in-place model transition against the account and write back the
/// result
///
/// The decoded state lives on the heap. The account is only touched when the
/// transition returns `Ok`.
pub(crate) fn commit<T, F>(vault: &mut VaultAccount, transition: F) -> Result<T, StrataError>
where
    F: FnOnce(&mut State) -> VaultResult<T>,
{
    if !vault.is_initialized() {
        msg!("Error: Vault account is not initialized");
        return Err(StrataError::Uninitialized);
    }

    let mut state = load_boxed_state(vault)?;
    let out = transition(&mut state)?;
    apply_state_to_vault(vault, &state);
    Ok(out)
}

// Note: Instruction dispatching is handled in entrypoint.rs
// The functions in this module are called from the entrypoint after
// account deserialization and validation.
