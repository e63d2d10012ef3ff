//! Program error codes
//!
//! Registry failures keep the model's codes (0..=12); program-level account
//! and decoding failures start at 100.

use model_safety::VaultError;
use pinocchio::program_error::ProgramError;

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrataError {
    Unauthorized = 0,
    NotActive = 1,
    AlreadyActive = 2,
    RatioExceeded = 3,
    QueueFull = 4,
    NotQueued = 5,
    DuplicateEntry = 6,
    UnknownStrategy = 7,
    SelfMigration = 8,
    FeeExceeded = 9,
    InvalidStrategy = 10,
    RegistryFull = 11,
    NonContiguous = 12,

    /// Malformed or unknown instruction data
    InvalidInstruction = 100,
    /// Wrong owner, size, PDA or writability
    InvalidAccount = 101,
    /// Vault account already carries the magic tag
    AlreadyInitialized = 102,
    /// Vault account was never initialized
    Uninitialized = 103,
    /// Account bytes do not decode into a valid vault
    CorruptState = 104,
}

impl From<VaultError> for StrataError {
    fn from(e: VaultError) -> Self {
        match e {
            VaultError::Unauthorized => StrataError::Unauthorized,
            VaultError::NotActive => StrataError::NotActive,
            VaultError::AlreadyActive => StrataError::AlreadyActive,
            VaultError::RatioExceeded => StrataError::RatioExceeded,
            VaultError::QueueFull => StrataError::QueueFull,
            VaultError::NotQueued => StrataError::NotQueued,
            VaultError::DuplicateEntry => StrataError::DuplicateEntry,
            VaultError::UnknownStrategy => StrataError::UnknownStrategy,
            VaultError::SelfMigration => StrataError::SelfMigration,
            VaultError::FeeExceeded => StrataError::FeeExceeded,
            VaultError::InvalidStrategy => StrataError::InvalidStrategy,
            VaultError::RegistryFull => StrataError::RegistryFull,
            VaultError::NonContiguous => StrataError::NonContiguous,
        }
    }
}

impl From<StrataError> for ProgramError {
    fn from(e: StrataError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
