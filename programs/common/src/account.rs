//! Account validation and zero-copy access helpers

use crate::error::StrataError;
use pinocchio::{account_info::AccountInfo, pubkey::Pubkey};

/// Account must be owned by `program_id`
#[inline]
pub fn validate_owner(account: &AccountInfo, program_id: &Pubkey) -> Result<(), StrataError> {
    if !account.is_owned_by(program_id) {
        return Err(StrataError::InvalidAccount);
    }
    Ok(())
}

/// Account must be writable
#[inline]
pub fn validate_writable(account: &AccountInfo) -> Result<(), StrataError> {
    if !account.is_writable() {
        return Err(StrataError::InvalidAccount);
    }
    Ok(())
}

/// Caller account must have signed the transaction
///
/// An unsigned caller holds no role, so this surfaces as `Unauthorized`.
#[inline]
pub fn validate_signer(account: &AccountInfo) -> Result<(), StrataError> {
    if !account.is_signer() {
        return Err(StrataError::Unauthorized);
    }
    Ok(())
}

/// Reinterpret account data as `&mut T`
///
/// # Safety
///
/// `T` must be `#[repr(C)]`, valid for any bit pattern, and no other borrow
/// of the account data may be alive for the returned lifetime.
#[inline]
pub unsafe fn borrow_account_data_mut<T>(account: &AccountInfo) -> Result<&mut T, StrataError> {
    let data = account
        .try_borrow_mut_data()
        .map_err(|_| StrataError::InvalidAccount)?;
    if data.len() < core::mem::size_of::<T>() {
        return Err(StrataError::InvalidAccount);
    }
    if (data.as_ptr() as usize) % core::mem::align_of::<T>() != 0 {
        return Err(StrataError::InvalidAccount);
    }
    let ptr = data.as_ptr() as *mut T;
    // The RefMut guard is released here; the caller upholds exclusivity
    drop(data);
    Ok(&mut *ptr)
}

/// Reinterpret account data as `&T`
///
/// # Safety
///
/// Same requirements as [`borrow_account_data_mut`], minus exclusivity.
#[inline]
pub unsafe fn borrow_account_data<T>(account: &AccountInfo) -> Result<&T, StrataError> {
    let data = account
        .try_borrow_data()
        .map_err(|_| StrataError::InvalidAccount)?;
    if data.len() < core::mem::size_of::<T>() {
        return Err(StrataError::InvalidAccount);
    }
    if (data.as_ptr() as usize) % core::mem::align_of::<T>() != 0 {
        return Err(StrataError::InvalidAccount);
    }
    let ptr = data.as_ptr() as *const T;
    drop(data);
    Ok(&*ptr)
}
