//! Failure taxonomy of the registry state machine
//!
//! Every error aborts the whole operation; the input state is left as it was.

use core::fmt;

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VaultError {
    /// Caller lacks the required role (governance, or strategy self-identity)
    Unauthorized = 0,
    /// Target identity has no live registration
    NotActive = 1,
    /// Identity is already registered
    AlreadyActive = 2,
    /// Global debt ratio sum would exceed MAX_BPS
    RatioExceeded = 3,
    /// No empty withdrawal queue slot
    QueueFull = 4,
    /// Identity is not in the withdrawal queue
    NotQueued = 5,
    /// Replacement queue repeats an identity
    DuplicateEntry = 6,
    /// Replacement queue names an unregistered identity
    UnknownStrategy = 7,
    /// Migration source and destination are identical
    SelfMigration = 8,
    /// Performance fee above MAX_PERFORMANCE_FEE
    FeeExceeded = 9,
    /// The null identity cannot be a strategy
    InvalidStrategy = 10,
    /// Registry has no free record
    RegistryFull = 11,
    /// Replacement queue has an entry after an empty slot
    NonContiguous = 12,
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            VaultError::Unauthorized => "caller is not authorized",
            VaultError::NotActive => "strategy is not registered",
            VaultError::AlreadyActive => "strategy is already registered",
            VaultError::RatioExceeded => "total debt ratio exceeds 10000 bps",
            VaultError::QueueFull => "withdrawal queue is full",
            VaultError::NotQueued => "strategy is not in the withdrawal queue",
            VaultError::DuplicateEntry => "withdrawal queue contains a duplicate",
            VaultError::UnknownStrategy => "withdrawal queue names an unknown strategy",
            VaultError::SelfMigration => "cannot migrate a strategy to itself",
            VaultError::FeeExceeded => "performance fee too high",
            VaultError::InvalidStrategy => "null strategy identity",
            VaultError::RegistryFull => "strategy registry is full",
            VaultError::NonContiguous => "withdrawal queue has a gap",
        };
        f.write_str(msg)
    }
}

/// Model result alias
pub type VaultResult<T> = Result<T, VaultError>;
