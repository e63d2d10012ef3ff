//! Strata Vault Program
//!
//! Strategy registry and withdrawal queue for a capital-allocation vault.
//!
//! ## Instructions
//!
//! - **Initialize** (0): Create the vault account with its governance key
//! - **AddStrategy** (1) / **UpdateStrategy** (2) / **RevokeStrategy** (3)
//! - **MigrateStrategy** (4): Re-key a strategy, keeping its queue slot
//! - **RemoveFromQueue** (5) / **SetWithdrawalQueue** (6)
//! - **Report** (7): Strategy self-report of realized gain
//! - **Harvest** (8): Report gain and settle debt against the pool
//! - **SetIdleAssets** (9): Record the pool's unallocated assets
//!
//! Every mutation is computed by `model_safety` on a heap copy of the
//! account's state and written back only if it succeeds.

#![cfg_attr(target_os = "solana", no_std)]

extern crate alloc;

pub mod state;
pub mod instructions;
pub mod pda;

// Always expose entrypoint for testing, but only register as entrypoint when feature enabled
pub mod entrypoint;

// Panic handler for no_std builds (only for Solana BPF)
#[cfg(all(target_os = "solana", not(test)))]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}

pub use state::*;
pub use instructions::*;

pinocchio_pubkey::declare_id!("StrataVau1tMASi45ub7Qe4ZE36UT5G6cU4ud8Fhhe4");
