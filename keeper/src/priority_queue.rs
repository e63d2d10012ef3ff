//! Priority queue of strategies awaiting keeper attention (most stale first)

use crate::monitor::StrategyHealth;
use priority_queue::PriorityQueue;
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;

/// Staleness-ordered queue (max-heap on slots since last report)
pub struct HarvestQueue {
    queue: PriorityQueue<Pubkey, u64>,
    /// Map for O(1) lookups
    map: HashMap<Pubkey, StrategyHealth>,
}

impl HarvestQueue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self {
            queue: PriorityQueue::new(),
            map: HashMap::new(),
        }
    }

    /// Push or update a strategy snapshot
    pub fn push(&mut self, health: StrategyHealth) {
        let strategy = health.strategy;
        let priority = health.blocks_since_report;

        self.map.insert(strategy, health);
        self.queue.push(strategy, priority);
    }

    /// Replace the whole queue with a fresh poll, dropping strategies that
    /// are no longer registered
    pub fn refresh(&mut self, snapshot: Vec<StrategyHealth>) {
        self.clear();
        for health in snapshot {
            self.push(health);
        }
    }

    /// Pop the most stale strategy
    #[allow(dead_code)]
    pub fn pop(&mut self) -> Option<StrategyHealth> {
        let (strategy, _priority) = self.queue.pop()?;
        self.map.remove(&strategy)
    }

    /// Peek at the most stale strategy without removing
    pub fn peek(&self) -> Option<&StrategyHealth> {
        let (strategy, _priority) = self.queue.peek()?;
        self.map.get(strategy)
    }

    /// Remove strategy from queue
    pub fn remove(&mut self, strategy: &Pubkey) -> Option<StrategyHealth> {
        self.queue.remove(strategy);
        self.map.remove(strategy)
    }

    /// Get strategy snapshot by pubkey
    #[allow(dead_code)]
    pub fn get(&self, strategy: &Pubkey) -> Option<&StrategyHealth> {
        self.map.get(strategy)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Active strategies with no report for at least `threshold` slots,
    /// most stale first
    pub fn get_stale(&self, threshold: u64) -> Vec<StrategyHealth> {
        let mut stale: Vec<StrategyHealth> = self
            .map
            .values()
            .filter(|h| h.is_stale(threshold))
            .cloned()
            .collect();
        stale.sort_by(|a, b| b.blocks_since_report.cmp(&a.blocks_since_report));
        stale
    }

    /// Active strategies with open credit
    pub fn get_harvestable(&self) -> Vec<StrategyHealth> {
        let mut open: Vec<StrategyHealth> = self
            .map
            .values()
            .filter(|h| h.needs_harvest())
            .cloned()
            .collect();
        open.sort_by(|a, b| b.credit_available.cmp(&a.credit_available));
        open
    }

    /// Strategies owing debt back to the vault, largest debt first
    pub fn get_indebted(&self) -> Vec<StrategyHealth> {
        let mut owing: Vec<StrategyHealth> = self
            .map
            .values()
            .filter(|h| h.debt_outstanding > 0)
            .cloned()
            .collect();
        owing.sort_by(|a, b| b.debt_outstanding.cmp(&a.debt_outstanding));
        owing
    }

    /// Drained revoked strategies still holding a queue slot, in queue order
    pub fn get_evictable(&self) -> Vec<StrategyHealth> {
        let mut revoked: Vec<StrategyHealth> = self
            .map
            .values()
            .filter(|h| h.is_evictable())
            .cloned()
            .collect();
        revoked.sort_by_key(|h| h.queue_position);
        revoked
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.queue.clear();
        self.map.clear();
    }
}

impl Default for HarvestQueue {
    fn default() -> Self {
        Self::new()
    }
}
