//! Keyed strategy registry with a fixed record budget

use arrayvec::ArrayVec;

use crate::error::{VaultError, VaultResult};
use crate::math::{add_u128, add_u64};
use crate::state::{StrategyId, StrategyParams, StrategyRecord, StrategyStatus, MAX_STRATEGIES};

/// Registry of strategy records
///
/// Only registered identities (Active or Revoked) are stored; an absent
/// identity reads as `Unregistered`. Identities are unique.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Registry {
    records: ArrayVec<StrategyRecord, MAX_STRATEGIES>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            records: ArrayVec::new(),
        }
    }

    pub fn get(&self, id: &StrategyId) -> Option<&StrategyRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn get_mut(&mut self, id: &StrategyId) -> Option<&mut StrategyRecord> {
        self.records.iter_mut().find(|r| &r.id == id)
    }

    pub fn status(&self, id: &StrategyId) -> StrategyStatus {
        self.get(id).map(|r| r.status).unwrap_or(StrategyStatus::Unregistered)
    }

    pub fn contains(&self, id: &StrategyId) -> bool {
        self.status(id).is_registered()
    }

    /// Insert a fresh record; the caller has checked the id is not registered
    pub fn insert(&mut self, id: StrategyId, status: StrategyStatus, params: StrategyParams) -> VaultResult<()> {
        self.records
            .try_push(StrategyRecord { id, status, params })
            .map_err(|_| VaultError::RegistryFull)
    }

    /// Move the record keyed by `from` under `to`, keeping its slot
    pub fn rekey(&mut self, from: &StrategyId, to: StrategyId) -> VaultResult<()> {
        let record = self.get_mut(from).ok_or(VaultError::NotActive)?;
        record.id = to;
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.records.is_full()
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StrategyRecord> {
        self.records.iter()
    }

    /// Sum of debt ratios over every record (revoked records contribute 0)
    pub fn total_debt_ratio(&self) -> u64 {
        self.records.iter().fold(0u64, |acc, r| add_u64(acc, r.params.debt_ratio))
    }

    /// Sum of debt ratios excluding `id`
    pub fn total_debt_ratio_excluding(&self, id: &StrategyId) -> u64 {
        self.records
            .iter()
            .filter(|r| &r.id != id)
            .fold(0u64, |acc, r| add_u64(acc, r.params.debt_ratio))
    }

    /// Capital allocated across all strategies
    pub fn total_debt(&self) -> u128 {
        self.records.iter().fold(0u128, |acc, r| add_u128(acc, r.params.total_debt))
    }
}
