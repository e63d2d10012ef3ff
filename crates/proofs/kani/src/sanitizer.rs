//! State space sanitizer - bounds values for Kani exploration

use model_safety::state::*;

/// Distinct strategy identities the proofs draw from (plus governance)
pub const N_IDS: u8 = 4;
pub const MAX_STEPS: u8 = 4;

/// Pool size the adversary harvests against
pub const POOL_ASSETS: u128 = 10_000;

/// Bounds for tractable verification
const MAX_RATE: u128 = 1_000u128;
const MAX_GAIN: u128 = 1_000u128;
const MAX_BLOCK: u64 = 64;

pub trait Sanitize {
    fn sanitize(self) -> Self;
}

impl Sanitize for StrategyConfig {
    fn sanitize(mut self) -> Self {
        // Overshoot the caps slightly so rejection paths stay reachable
        self.debt_ratio %= MAX_BPS + 2;
        self.performance_fee %= MAX_PERFORMANCE_FEE + 2;
        self.rate_limit %= MAX_RATE;
        self
    }
}

impl Sanitize for StrategyParams {
    fn sanitize(mut self) -> Self {
        self.activation_block %= MAX_BLOCK;
        // Report block never precedes activation
        self.last_report_block = self.activation_block + self.last_report_block % MAX_BLOCK;
        self.total_gain %= MAX_GAIN;
        self.total_debt %= MAX_GAIN;
        self.rate_limit %= MAX_RATE;
        self.debt_ratio %= MAX_BPS + 1;
        self.performance_fee %= MAX_PERFORMANCE_FEE + 1;
        self
    }
}

/// Map an arbitrary byte onto one of the N_IDS strategy identities or null
pub fn small_id(raw: u8) -> StrategyId {
    let n = raw % (N_IDS + 1);
    if n == 0 {
        NULL_ID
    } else {
        [n + 1; 32]
    }
}

/// Governance identity used by every generated state
pub const GOVERNANCE: StrategyId = [1; 32];
