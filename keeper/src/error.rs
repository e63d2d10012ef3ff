//! Keeper decode errors

use strata_common::StrataError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeeperError {
    #[error("vault account has {actual} bytes, expected {expected}")]
    AccountSize { expected: usize, actual: usize },

    #[error("vault account is not initialized")]
    Uninitialized,

    #[error("vault account does not decode: {0:?}")]
    Corrupt(StrataError),
}

impl From<StrataError> for KeeperError {
    fn from(e: StrataError) -> Self {
        KeeperError::Corrupt(e)
    }
}
