//! Safe arithmetic helpers - no unwrap, no panics

use crate::state::MAX_BPS;

/// Add u128 with saturation at MAX
pub fn add_u128(a: u128, b: u128) -> u128 {
    a.saturating_add(b)
}

/// Subtract u128 with saturation at 0
pub fn sub_u128(a: u128, b: u128) -> u128 {
    a.saturating_sub(b)
}

/// Multiply u128 with saturation
pub fn mul_u128(a: u128, b: u128) -> u128 {
    a.saturating_mul(b)
}

/// Divide u128 (returns 0 if divisor is 0)
pub fn div_u128(a: u128, b: u128) -> u128 {
    if b == 0 {
        0
    } else {
        a / b
    }
}

/// Minimum of two u128
pub fn min_u128(a: u128, b: u128) -> u128 {
    if a < b { a } else { b }
}

/// Add u64 with saturation at MAX
pub fn add_u64(a: u64, b: u64) -> u64 {
    a.saturating_add(b)
}

/// Subtract u64 with saturation at 0
pub fn sub_u64(a: u64, b: u64) -> u64 {
    a.saturating_sub(b)
}

/// Apply a basis-point ratio to an amount: `amount * bps / MAX_BPS`
///
/// Divides before multiplying when the product would saturate, so very large
/// pools lose at most one bps-unit of precision instead of clamping.
pub fn apply_bps(amount: u128, bps: u64) -> u128 {
    let bps = bps as u128;
    match amount.checked_mul(bps) {
        Some(product) => product / MAX_BPS as u128,
        None => mul_u128(amount / MAX_BPS as u128, bps),
    }
}
