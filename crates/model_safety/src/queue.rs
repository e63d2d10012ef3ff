//! Capacity-bounded withdrawal queue
//!
//! Entries are a gap-free ordered prefix of at most MAX_QUEUE_SLOTS non-null
//! identities. Slot reads past the prefix return NULL_ID.

use arrayvec::ArrayVec;

use crate::error::{VaultError, VaultResult};
use crate::state::{StrategyId, MAX_QUEUE_SLOTS, NULL_ID};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct WithdrawalQueue {
    entries: ArrayVec<StrategyId, MAX_QUEUE_SLOTS>,
}

impl WithdrawalQueue {
    pub fn new() -> Self {
        Self {
            entries: ArrayVec::new(),
        }
    }

    /// Append to the first empty slot
    pub fn append(&mut self, id: StrategyId) -> VaultResult<()> {
        self.entries.try_push(id).map_err(|_| VaultError::QueueFull)
    }

    /// Remove `id` and shift every later entry one slot earlier
    pub fn remove(&mut self, id: &StrategyId) -> VaultResult<()> {
        let idx = self.position(id).ok_or(VaultError::NotQueued)?;
        self.entries.remove(idx);
        Ok(())
    }

    /// Swap `from` for `to` in place; no-op if `from` is not queued
    pub fn replace(&mut self, from: &StrategyId, to: StrategyId) {
        if let Some(idx) = self.position(from) {
            self.entries[idx] = to;
        }
    }

    /// Build a queue from a full-length, null-padded ordering
    ///
    /// Only shape is validated here (no duplicates, no gaps); registry
    /// membership is the caller's concern.
    pub fn from_slots(slots: &[StrategyId; MAX_QUEUE_SLOTS]) -> VaultResult<Self> {
        let mut entries = ArrayVec::<StrategyId, MAX_QUEUE_SLOTS>::new();
        let mut seen_empty = false;

        for id in slots.iter() {
            if *id == NULL_ID {
                seen_empty = true;
                continue;
            }
            if entries.contains(id) {
                return Err(VaultError::DuplicateEntry);
            }
            if seen_empty {
                return Err(VaultError::NonContiguous);
            }
            // Cannot overflow: at most MAX_QUEUE_SLOTS inputs
            entries.push(*id);
        }

        Ok(Self { entries })
    }

    /// Identity at `index`, or NULL_ID for an empty/out-of-range slot
    pub fn slot(&self, index: usize) -> StrategyId {
        self.entries.get(index).copied().unwrap_or(NULL_ID)
    }

    pub fn position(&self, id: &StrategyId) -> Option<usize> {
        if *id == NULL_ID {
            return None;
        }
        self.entries.iter().position(|e| e == id)
    }

    pub fn contains(&self, id: &StrategyId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    /// Non-null entries in withdrawal order
    pub fn entries(&self) -> &[StrategyId] {
        &self.entries
    }

    /// Full-length, null-padded view
    pub fn to_slots(&self) -> [StrategyId; MAX_QUEUE_SLOTS] {
        let mut slots = [NULL_ID; MAX_QUEUE_SLOTS];
        for (slot, id) in slots.iter_mut().zip(self.entries.iter()) {
            *slot = *id;
        }
        slots
    }
}
