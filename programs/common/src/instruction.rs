//! Instruction data deserialization helpers
//!
//! Provides utilities for safely parsing instruction data from byte slices.
//! All functions perform bounds checking and return errors on invalid input.

use crate::error::StrataError;
use pinocchio::pubkey::Pubkey;

/// Vault instruction discriminator (first byte of instruction data)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultInstruction {
    /// Initialize vault account with its governance key
    Initialize = 0,
    /// Admit a strategy (governance)
    AddStrategy = 1,
    /// Change a strategy's ratio, rate limit and fee (governance)
    UpdateStrategy = 2,
    /// Zero a strategy's debt ratio (governance)
    RevokeStrategy = 3,
    /// Move a strategy record to a new identity (governance)
    MigrateStrategy = 4,
    /// Drop a strategy from the withdrawal queue (governance)
    RemoveFromQueue = 5,
    /// Replace the withdrawal queue (governance)
    SetWithdrawalQueue = 6,
    /// Strategy self-report of realized gain
    Report = 7,
    /// Strategy report plus debt settlement against the pool
    Harvest = 8,
    /// Record the pool's unallocated assets (governance)
    SetIdleAssets = 9,
}

impl TryFrom<u8> for VaultInstruction {
    type Error = StrataError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(VaultInstruction::Initialize),
            1 => Ok(VaultInstruction::AddStrategy),
            2 => Ok(VaultInstruction::UpdateStrategy),
            3 => Ok(VaultInstruction::RevokeStrategy),
            4 => Ok(VaultInstruction::MigrateStrategy),
            5 => Ok(VaultInstruction::RemoveFromQueue),
            6 => Ok(VaultInstruction::SetWithdrawalQueue),
            7 => Ok(VaultInstruction::Report),
            8 => Ok(VaultInstruction::Harvest),
            9 => Ok(VaultInstruction::SetIdleAssets),
            _ => Err(StrataError::InvalidInstruction),
        }
    }
}

/// Read a u8 from instruction data
#[inline]
pub fn read_u8(data: &[u8], offset: usize) -> Result<u8, StrataError> {
    if offset >= data.len() {
        return Err(StrataError::InvalidInstruction);
    }
    Ok(data[offset])
}

/// Read a u64 (little-endian) from instruction data
#[inline]
pub fn read_u64(data: &[u8], offset: usize) -> Result<u64, StrataError> {
    Ok(u64::from_le_bytes(read_bytes::<8>(data, offset)?))
}

/// Read a u128 (little-endian) from instruction data
#[inline]
pub fn read_u128(data: &[u8], offset: usize) -> Result<u128, StrataError> {
    Ok(u128::from_le_bytes(read_bytes::<16>(data, offset)?))
}

/// Read a fixed-size byte array from instruction data
#[inline]
pub fn read_bytes<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], StrataError> {
    let end = offset.checked_add(N).ok_or(StrataError::InvalidInstruction)?;
    if end > data.len() {
        return Err(StrataError::InvalidInstruction);
    }
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&data[offset..end]);
    Ok(bytes)
}

/// Instruction data reader with tracked offset
///
/// Provides a convenient way to sequentially read fields from instruction data
/// while automatically tracking the current offset.
pub struct InstructionReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> InstructionReader<'a> {
    /// Create a new instruction reader
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Get the current offset
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get remaining bytes
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Read a u8 and advance offset
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, StrataError> {
        let val = read_u8(self.data, self.offset)?;
        self.offset += 1;
        Ok(val)
    }

    /// Read a u64 and advance offset
    #[inline]
    pub fn read_u64(&mut self) -> Result<u64, StrataError> {
        let val = read_u64(self.data, self.offset)?;
        self.offset += 8;
        Ok(val)
    }

    /// Read a u128 and advance offset
    #[inline]
    pub fn read_u128(&mut self) -> Result<u128, StrataError> {
        let val = read_u128(self.data, self.offset)?;
        self.offset += 16;
        Ok(val)
    }

    /// Read a fixed-size byte array and advance offset
    #[inline]
    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], StrataError> {
        let val = read_bytes(self.data, self.offset)?;
        self.offset += N;
        Ok(val)
    }

    /// Read a 32-byte public key and advance offset
    #[inline]
    pub fn read_pubkey(&mut self) -> Result<Pubkey, StrataError> {
        self.read_bytes::<32>()
    }

    /// Fail if trailing bytes are left over
    #[inline]
    pub fn finish(&self) -> Result<(), StrataError> {
        if self.remaining() != 0 {
            return Err(StrataError::InvalidInstruction);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u8() {
        let data = [42u8, 0, 0, 0];
        assert_eq!(read_u8(&data, 0).unwrap(), 42);
        assert!(read_u8(&data, 4).is_err());
    }

    #[test]
    fn test_read_u64() {
        let data = [0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01];
        assert_eq!(read_u64(&data, 0).unwrap(), 0x0102030405060708);
        assert!(read_u64(&data, 1).is_err());
    }

    #[test]
    fn test_read_u128() {
        let mut data = [0u8; 16];
        data[0] = 0x10;
        data[15] = 0x01;
        assert_eq!(read_u128(&data, 0).unwrap(), (1u128 << 120) | 0x10);
        assert!(read_u128(&data, 1).is_err());
    }

    #[test]
    fn test_read_bytes() {
        let data = [1, 2, 3, 4, 5];
        let result: [u8; 3] = read_bytes(&data, 1).unwrap();
        assert_eq!(result, [2, 3, 4]);
        assert!(read_bytes::<4>(&data, 2).is_err());
        assert!(read_bytes::<4>(&data, usize::MAX).is_err());
    }

    #[test]
    fn test_discriminators() {
        assert_eq!(VaultInstruction::try_from(1), Ok(VaultInstruction::AddStrategy));
        assert_eq!(VaultInstruction::try_from(7), Ok(VaultInstruction::Report));
        assert_eq!(VaultInstruction::try_from(8), Ok(VaultInstruction::Harvest));
        assert_eq!(VaultInstruction::try_from(9), Ok(VaultInstruction::SetIdleAssets));
        assert_eq!(VaultInstruction::try_from(10), Err(StrataError::InvalidInstruction));
        assert_eq!(VaultInstruction::SetWithdrawalQueue as u8, 6);
    }

    #[test]
    fn test_instruction_reader() {
        let mut data = [0u8; 1 + 32 + 8];
        data[0] = 3;
        data[1..33].copy_from_slice(&[9u8; 32]);
        data[33..41].copy_from_slice(&1000u64.to_le_bytes());

        let mut reader = InstructionReader::new(&data);
        assert_eq!(reader.remaining(), 41);

        assert_eq!(reader.read_u8().unwrap(), 3);
        assert_eq!(reader.read_pubkey().unwrap(), [9u8; 32]);
        assert_eq!(reader.offset(), 33);
        assert!(reader.finish().is_err());

        assert_eq!(reader.read_u64().unwrap(), 1000);
        assert_eq!(reader.remaining(), 0);
        assert!(reader.finish().is_ok());

        assert!(reader.read_u8().is_err());
    }
}
