//! Program-derived addresses

use pinocchio::pubkey::{find_program_address, Pubkey};

/// Seed prefix of the vault account
pub const VAULT_SEED: &[u8] = b"vault";

/// Vault account PDA: ["vault", governance]
pub fn derive_vault_pda(governance: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    find_program_address(&[VAULT_SEED, governance.as_ref()], program_id)
}
