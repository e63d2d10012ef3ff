#![no_std]

pub mod error;
pub mod account;
pub mod instruction;

pub use error::*;
pub use account::*;
pub use instruction::*;
