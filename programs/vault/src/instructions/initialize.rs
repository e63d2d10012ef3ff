//! Initialize instruction - set up the vault account

use crate::state::VaultAccount;
use model_safety::NULL_ID;
use pinocchio::{msg, pubkey::Pubkey};
use strata_common::StrataError;

/// Process initialize instruction
///
/// Writes the magic tag, the governance key and an empty registry and
/// queue. The PDA and account size are checked by the entrypoint.
///
/// # Arguments
/// * `vault` - The vault account data
/// * `governance` - The governance authority pubkey
/// * `bump` - PDA bump seed
pub fn process_initialize(
    vault: &mut VaultAccount,
    governance: &Pubkey,
    bump: u8,
) -> Result<(), StrataError> {
    if vault.is_initialized() {
        msg!("Error: Vault account already initialized");
        return Err(StrataError::AlreadyInitialized);
    }

    if *governance == NULL_ID {
        msg!("Error: Governance key must not be null");
        return Err(StrataError::InvalidAccount);
    }

    vault.initialize_in_place(*governance, bump);

    msg!("Vault initialized successfully");
    Ok(())
}
