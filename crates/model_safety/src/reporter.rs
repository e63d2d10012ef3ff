//! Expected-return projection from strategy reports

use crate::error::{VaultError, VaultResult};
use crate::math::{div_u128, min_u128, mul_u128, sub_u64};
use crate::state::{State, StrategyId};

/// Projected gain accrued since the last report
///
/// Extrapolates the strategy's historical average gain per block over the
/// blocks elapsed since its last report, capped at `rate_limit * elapsed`.
/// Zero when the strategy holds no debt or no block has passed.
pub fn expected_return(s: &State, block: u64, strategy: &StrategyId) -> VaultResult<u128> {
    let record = s.registry.get(strategy).ok_or(VaultError::NotActive)?;
    let p = &record.params;

    let elapsed = sub_u64(block, p.last_report_block) as u128;
    if p.total_debt == 0 || elapsed == 0 {
        return Ok(0);
    }

    // last_report_block >= activation_block, so lifetime >= elapsed > 0
    let lifetime = sub_u64(block, p.activation_block) as u128;
    let average = div_u128(mul_u128(p.total_gain, elapsed), lifetime);
    let cap = mul_u128(p.rate_limit, elapsed);

    Ok(min_u128(average, cap))
}
