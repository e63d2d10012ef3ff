//! Allocation projections against the pooled-asset ledger
//!
//! The ledger itself (share accounting, token balances) lives outside this
//! model; it only has to report the vault's total assets.

use arrayvec::ArrayVec;

use crate::error::{VaultError, VaultResult};
use crate::math::{apply_bps, min_u128, mul_u128, sub_u128, sub_u64};
use crate::state::{State, StrategyId, StrategyStatus, MAX_QUEUE_SLOTS};

/// Pooled-asset bookkeeping collaborator
pub trait PoolLedger {
    /// Total assets under management (idle + allocated)
    fn total_assets(&self) -> u128;
}

impl PoolLedger for u128 {
    fn total_assets(&self) -> u128 {
        *self
    }
}

/// Additional capital the vault may allocate to `strategy` right now
///
/// Bounded by the strategy's own debt limit, the vault-wide limit and the
/// strategy's rate limit over blocks since its last report.
pub fn credit_available<L: PoolLedger>(
    s: &State,
    ledger: &L,
    block: u64,
    strategy: &StrategyId,
) -> u128 {
    let record = match s.registry.get(strategy) {
        Some(r) if r.status == StrategyStatus::Active => r,
        _ => return 0,
    };
    let p = &record.params;
    let assets = ledger.total_assets();

    let strategy_limit = apply_bps(assets, p.debt_ratio);
    let vault_limit = apply_bps(assets, s.registry.total_debt_ratio());

    let mut available = min_u128(
        sub_u128(strategy_limit, p.total_debt),
        sub_u128(vault_limit, s.registry.total_debt()),
    );

    if p.rate_limit > 0 {
        let elapsed = sub_u64(block, p.last_report_block) as u128;
        available = min_u128(available, mul_u128(p.rate_limit, elapsed));
    }

    available
}

/// Debt the strategy should return to the vault
///
/// A revoked strategy owes everything it holds; an active one owes whatever
/// exceeds its current debt limit.
pub fn debt_outstanding<L: PoolLedger>(s: &State, ledger: &L, strategy: &StrategyId) -> VaultResult<u128> {
    let record = s.registry.get(strategy).ok_or(VaultError::NotActive)?;
    let p = &record.params;

    match record.status {
        StrategyStatus::Unregistered => Err(VaultError::NotActive),
        StrategyStatus::Revoked => Ok(p.total_debt),
        StrategyStatus::Active => {
            let limit = apply_bps(ledger.total_assets(), p.debt_ratio);
            Ok(sub_u128(p.total_debt, limit))
        }
    }
}

/// One draw from a strategy while satisfying a withdrawal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalLeg {
    pub strategy: StrategyId,
    pub amount: u128,
}

/// Ordered draws covering a withdrawal, plus whatever the queue cannot cover
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct WithdrawalPlan {
    pub legs: ArrayVec<WithdrawalLeg, MAX_QUEUE_SLOTS>,
    pub shortfall: u128,
}

impl WithdrawalPlan {
    pub fn total(&self) -> u128 {
        self.legs.iter().fold(0u128, |acc, leg| acc.saturating_add(leg.amount))
    }
}

/// Drain strategies strictly in queue order until `amount` is covered
///
/// Strategies missing from the queue are never drawn, whatever their debt.
pub fn withdrawal_plan(s: &State, amount: u128) -> WithdrawalPlan {
    let mut plan = WithdrawalPlan::default();
    let mut remaining = amount;

    for id in s.queue.entries() {
        if remaining == 0 {
            break;
        }
        let debt = s.strategy_params(id).total_debt;
        let draw = min_u128(remaining, debt);
        if draw == 0 {
            continue;
        }
        // At most one leg per queue entry
        plan.legs.push(WithdrawalLeg { strategy: *id, amount: draw });
        remaining = sub_u128(remaining, draw);
    }

    plan.shortfall = remaining;
    plan
}
