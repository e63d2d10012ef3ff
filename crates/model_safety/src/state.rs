//! Pure state model for the strategy registry and withdrawal queue

use crate::queue::WithdrawalQueue;
use crate::registry::Registry;

/// Basis-point denominator (100%)
pub const MAX_BPS: u64 = 10_000;

/// Upper bound on a strategy's performance fee (50%)
pub const MAX_PERFORMANCE_FEE: u64 = 5_000;

/// Withdrawal queue capacity
pub const MAX_QUEUE_SLOTS: usize = 20;

/// Registry capacity (records survive revocation and queue removal)
pub const MAX_STRATEGIES: usize = 32;

/// 32-byte identity, layout-compatible with `pinocchio::pubkey::Pubkey`
pub type StrategyId = [u8; 32];

/// Empty queue slot / absent identity
pub const NULL_ID: StrategyId = [0; 32];

/// Lifecycle state of a strategy identity
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StrategyStatus {
    /// Never admitted, or migrated away
    #[default]
    Unregistered = 0,
    /// Eligible for allocation
    Active = 1,
    /// Debt ratio forced to zero; record and queue slot retained
    Revoked = 2,
}

impl StrategyStatus {
    /// Whether the identity holds a live record (Active or Revoked)
    pub fn is_registered(self) -> bool {
        match self {
            StrategyStatus::Unregistered => false,
            StrategyStatus::Active | StrategyStatus::Revoked => true,
        }
    }
}

impl TryFrom<u8> for StrategyStatus {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(StrategyStatus::Unregistered),
            1 => Ok(StrategyStatus::Active),
            2 => Ok(StrategyStatus::Revoked),
            other => Err(other),
        }
    }
}

/// Allocation parameters of one strategy
///
/// The all-zero value is what an unregistered identity reads as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct StrategyParams {
    /// Share of profit retained by the strategy (basis points)
    pub performance_fee: u64,
    /// Block at which the strategy was first admitted
    pub activation_block: u64,
    /// Fraction of the pool the strategy may hold (basis points)
    pub debt_ratio: u64,
    /// Maximum per-block change in allocated debt
    pub rate_limit: u128,
    /// Block of the most recent report (or activation)
    pub last_report_block: u64,
    /// Capital currently allocated to the strategy
    pub total_debt: u128,
    /// Cumulative realized profit reported by the strategy
    pub total_gain: u128,
}

/// Governance-supplied knobs for admit/update
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct StrategyConfig {
    pub debt_ratio: u64,
    pub rate_limit: u128,
    pub performance_fee: u64,
}

impl StrategyConfig {
    pub fn new(debt_ratio: u64, rate_limit: u128, performance_fee: u64) -> Self {
        Self {
            debt_ratio,
            rate_limit,
            performance_fee,
        }
    }
}

/// One registry record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrategyRecord {
    pub id: StrategyId,
    pub status: StrategyStatus,
    pub params: StrategyParams,
}

/// Whole vault state: authority, registry and queue
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    /// Administrative authority
    pub governance: StrategyId,
    pub registry: Registry,
    pub queue: WithdrawalQueue,
}

impl State {
    /// Create an empty vault governed by `governance`
    pub fn new(governance: StrategyId) -> Self {
        Self {
            governance,
            registry: Registry::new(),
            queue: WithdrawalQueue::new(),
        }
    }

    /// Read accessor: params of `strategy`, or the all-zero sentinel
    pub fn strategy_params(&self, strategy: &StrategyId) -> StrategyParams {
        self.registry
            .get(strategy)
            .map(|record| record.params)
            .unwrap_or_default()
    }

    /// Read accessor: lifecycle status of `strategy`
    pub fn strategy_status(&self, strategy: &StrategyId) -> StrategyStatus {
        self.registry.status(strategy)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(NULL_ID)
    }
}
