//! Pure Rust model of the strategy registry and withdrawal queue
//! No Solana dependencies, no unwrap/panic, all functions total

#![cfg_attr(not(test), no_std)]

pub mod state;
pub mod math;
pub mod error;
pub mod access;
pub mod registry;
pub mod queue;
pub mod transitions;
pub mod reporter;
pub mod ledger;
pub mod helpers;

// Re-export commonly used types
pub use state::*;
pub use error::*;
pub use registry::*;
pub use queue::*;
pub use helpers::*;
pub use transitions::*;
pub use reporter::*;
pub use ledger::*;
