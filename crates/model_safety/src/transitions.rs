//! State transition functions - all total, no panics
//!
//! Every transition has two forms. The `*_in_place` form validates first and
//! only then mutates the state it is handed, so an `Err` leaves it untouched.
//! The plain form borrows the current state and returns the next one.

use crate::access::{require_governance, require_strategy};
use crate::error::{VaultError, VaultResult};
use crate::ledger::{credit_available, debt_outstanding, PoolLedger};
use crate::math::{add_u128, min_u128, sub_u128};
use crate::queue::WithdrawalQueue;
use crate::state::*;

fn check_config(config: &StrategyConfig) -> VaultResult<()> {
    if config.performance_fee > MAX_PERFORMANCE_FEE {
        return Err(VaultError::FeeExceeded);
    }
    if config.debt_ratio > MAX_BPS {
        return Err(VaultError::RatioExceeded);
    }
    Ok(())
}

fn check_ratio_budget(others: u64, debt_ratio: u64) -> VaultResult<()> {
    if others.saturating_add(debt_ratio) > MAX_BPS {
        return Err(VaultError::RatioExceeded);
    }
    Ok(())
}

fn on_copy<T>(s: &State, f: impl FnOnce(&mut State) -> VaultResult<T>) -> VaultResult<(State, T)> {
    let mut next = s.clone();
    let out = f(&mut next)?;
    Ok((next, out))
}

/// Admit a new strategy and append it to the withdrawal queue
pub fn admit(
    s: &State,
    caller: &StrategyId,
    block: u64,
    strategy: StrategyId,
    config: StrategyConfig,
) -> VaultResult<State> {
    on_copy(s, |next| admit_in_place(next, caller, block, strategy, config)).map(|(next, _)| next)
}

pub fn admit_in_place(
    s: &mut State,
    caller: &StrategyId,
    block: u64,
    strategy: StrategyId,
    config: StrategyConfig,
) -> VaultResult<()> {
    require_governance(s, caller)?;

    if strategy == NULL_ID {
        return Err(VaultError::InvalidStrategy);
    }
    if s.registry.contains(&strategy) {
        return Err(VaultError::AlreadyActive);
    }
    check_config(&config)?;
    check_ratio_budget(s.registry.total_debt_ratio(), config.debt_ratio)?;
    if s.registry.is_full() {
        return Err(VaultError::RegistryFull);
    }
    if s.queue.is_full() {
        return Err(VaultError::QueueFull);
    }

    let params = StrategyParams {
        performance_fee: config.performance_fee,
        activation_block: block,
        debt_ratio: config.debt_ratio,
        rate_limit: config.rate_limit,
        last_report_block: block,
        total_debt: 0,
        total_gain: 0,
    };

    s.registry.insert(strategy, StrategyStatus::Active, params)?;
    s.queue.append(strategy)
}

/// Change debt ratio, rate limit and fee of a registered strategy
pub fn update(
    s: &State,
    caller: &StrategyId,
    strategy: &StrategyId,
    config: StrategyConfig,
) -> VaultResult<State> {
    on_copy(s, |next| update_in_place(next, caller, strategy, config)).map(|(next, _)| next)
}

pub fn update_in_place(
    s: &mut State,
    caller: &StrategyId,
    strategy: &StrategyId,
    config: StrategyConfig,
) -> VaultResult<()> {
    require_governance(s, caller)?;

    if !s.registry.contains(strategy) {
        return Err(VaultError::NotActive);
    }
    check_config(&config)?;
    check_ratio_budget(s.registry.total_debt_ratio_excluding(strategy), config.debt_ratio)?;

    let record = s.registry.get_mut(strategy).ok_or(VaultError::NotActive)?;
    record.params.debt_ratio = config.debt_ratio;
    record.params.rate_limit = config.rate_limit;
    record.params.performance_fee = config.performance_fee;
    record.status = match record.status {
        StrategyStatus::Revoked if config.debt_ratio > 0 => StrategyStatus::Active,
        status => status,
    };
    Ok(())
}

/// Stop new allocation: debt ratio to zero, everything else untouched
pub fn revoke(s: &State, caller: &StrategyId, strategy: &StrategyId) -> VaultResult<State> {
    on_copy(s, |next| revoke_in_place(next, caller, strategy)).map(|(next, _)| next)
}

pub fn revoke_in_place(s: &mut State, caller: &StrategyId, strategy: &StrategyId) -> VaultResult<()> {
    require_governance(s, caller)?;

    let record = s.registry.get_mut(strategy).ok_or(VaultError::NotActive)?;
    record.params.debt_ratio = 0;
    record.status = StrategyStatus::Revoked;
    Ok(())
}

/// Move a strategy's whole record to a new identity, keeping its queue slot
pub fn migrate(
    s: &State,
    caller: &StrategyId,
    old: &StrategyId,
    new: StrategyId,
) -> VaultResult<State> {
    on_copy(s, |next| migrate_in_place(next, caller, old, new)).map(|(next, _)| next)
}

pub fn migrate_in_place(
    s: &mut State,
    caller: &StrategyId,
    old: &StrategyId,
    new: StrategyId,
) -> VaultResult<()> {
    require_governance(s, caller)?;

    if *old == new {
        return Err(VaultError::SelfMigration);
    }
    if !s.registry.contains(old) {
        return Err(VaultError::NotActive);
    }
    if new == NULL_ID {
        return Err(VaultError::InvalidStrategy);
    }
    if s.registry.contains(&new) {
        return Err(VaultError::AlreadyActive);
    }

    s.registry.rekey(old, new)?;
    s.queue.replace(old, new);
    Ok(())
}

/// Drop a strategy from the withdrawal queue, compacting the tail
pub fn remove_from_queue(s: &State, caller: &StrategyId, strategy: &StrategyId) -> VaultResult<State> {
    on_copy(s, |next| remove_from_queue_in_place(next, caller, strategy)).map(|(next, _)| next)
}

pub fn remove_from_queue_in_place(s: &mut State, caller: &StrategyId, strategy: &StrategyId) -> VaultResult<()> {
    require_governance(s, caller)?;
    s.queue.remove(strategy)
}

/// Replace the withdrawal queue wholesale
pub fn set_queue(
    s: &State,
    caller: &StrategyId,
    slots: &[StrategyId; MAX_QUEUE_SLOTS],
) -> VaultResult<State> {
    on_copy(s, |next| set_queue_in_place(next, caller, slots)).map(|(next, _)| next)
}

pub fn set_queue_in_place(
    s: &mut State,
    caller: &StrategyId,
    slots: &[StrategyId; MAX_QUEUE_SLOTS],
) -> VaultResult<()> {
    require_governance(s, caller)?;

    let queue = WithdrawalQueue::from_slots(slots)?;
    if queue.entries().iter().any(|id| !s.registry.contains(id)) {
        return Err(VaultError::UnknownStrategy);
    }

    s.queue = queue;
    Ok(())
}

/// Strategy self-report: accumulate gain and stamp the report block
pub fn report(
    s: &State,
    caller: &StrategyId,
    block: u64,
    strategy: &StrategyId,
    gain: u128,
) -> VaultResult<State> {
    on_copy(s, |next| report_in_place(next, caller, block, strategy, gain)).map(|(next, _)| next)
}

pub fn report_in_place(
    s: &mut State,
    caller: &StrategyId,
    block: u64,
    strategy: &StrategyId,
    gain: u128,
) -> VaultResult<()> {
    require_strategy(caller, strategy)?;

    let record = s.registry.get_mut(strategy).ok_or(VaultError::NotActive)?;
    record.params.total_gain = add_u128(record.params.total_gain, gain);
    record.params.last_report_block = record.params.last_report_block.max(block);
    Ok(())
}

/// Debt moved between the pool and a strategy by one harvest
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Settlement {
    /// New capital the pool hands to the strategy
    pub credit: u128,
    /// Capital the strategy hands back to the pool
    pub debt_payment: u128,
}

/// Strategy harvest: settle debt against the pool, then report `gain`
///
/// The offered `debt_payment` is capped at what the strategy owes. Credit
/// is extended up to `credit_available`, measured against the report block
/// before this harvest stamps a new one.
pub fn harvest<L: PoolLedger>(
    s: &State,
    ledger: &L,
    caller: &StrategyId,
    block: u64,
    strategy: &StrategyId,
    gain: u128,
    debt_payment: u128,
) -> VaultResult<(State, Settlement)> {
    on_copy(s, |next| harvest_in_place(next, ledger, caller, block, strategy, gain, debt_payment))
}

pub fn harvest_in_place<L: PoolLedger>(
    s: &mut State,
    ledger: &L,
    caller: &StrategyId,
    block: u64,
    strategy: &StrategyId,
    gain: u128,
    debt_payment: u128,
) -> VaultResult<Settlement> {
    require_strategy(caller, strategy)?;

    let owed = debt_outstanding(s, ledger, strategy)?;
    let paid = min_u128(debt_payment, owed);
    {
        let record = s.registry.get_mut(strategy).ok_or(VaultError::NotActive)?;
        record.params.total_debt = sub_u128(record.params.total_debt, paid);
    }

    let credit = credit_available(s, ledger, block, strategy);
    let record = s.registry.get_mut(strategy).ok_or(VaultError::NotActive)?;
    record.params.total_debt = add_u128(record.params.total_debt, credit);
    record.params.total_gain = add_u128(record.params.total_gain, gain);
    record.params.last_report_block = record.params.last_report_block.max(block);

    Ok(Settlement {
        credit,
        debt_payment: paid,
    })
}

#[cfg(test)]
#[path = "transitions_test.rs"]
mod transitions_test;
