//! Strategy monitoring over a decoded vault account

use crate::error::KeeperError;
use model_safety::{credit_available, debt_outstanding, expected_return, State, StrategyStatus};
use solana_sdk::pubkey::Pubkey;
use strata_vault::{vault_to_state, VaultAccount};

/// Decoded vault: model state plus the pool's idle balance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultSnapshot {
    pub state: State,
    pub total_idle: u128,
}

impl VaultSnapshot {
    /// Idle plus allocated assets
    pub fn total_assets(&self) -> u128 {
        self.total_idle.saturating_add(self.state.registry.total_debt())
    }
}

/// Per-strategy snapshot computed from one vault read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyHealth {
    /// Strategy pubkey
    pub strategy: Pubkey,
    pub status: StrategyStatus,
    pub debt_ratio: u64,
    /// Capital still allocated
    pub total_debt: u128,
    /// Slots since the last report
    pub blocks_since_report: u64,
    /// Projected gain if the strategy reported now
    pub expected_return: u128,
    /// Credit a harvest now would extend
    pub credit_available: u128,
    /// Debt a harvest now should repay
    pub debt_outstanding: u128,
    /// Index in the withdrawal queue, if queued
    pub queue_position: Option<usize>,
}

impl StrategyHealth {
    /// No report for at least `threshold` slots
    pub fn is_stale(&self, threshold: u64) -> bool {
        self.status == StrategyStatus::Active && self.blocks_since_report >= threshold
    }

    /// Active and owed capital it has not yet harvested
    pub fn needs_harvest(&self) -> bool {
        self.status == StrategyStatus::Active && self.credit_available > 0
    }

    /// Revoked, fully drained, but still holding a withdrawal queue slot
    pub fn is_evictable(&self) -> bool {
        self.status == StrategyStatus::Revoked
            && self.total_debt == 0
            && self.queue_position.is_some()
    }
}

/// Decode raw vault account bytes into a snapshot
pub fn decode_vault(data: &[u8]) -> Result<VaultSnapshot, KeeperError> {
    if data.len() != VaultAccount::LEN {
        return Err(KeeperError::AccountSize {
            expected: VaultAccount::LEN,
            actual: data.len(),
        });
    }

    // Every field is an integer or byte array, so any bit pattern is valid
    let vault: Box<VaultAccount> =
        Box::new(unsafe { std::ptr::read_unaligned(data.as_ptr() as *const VaultAccount) });

    if !vault.is_initialized() {
        return Err(KeeperError::Uninitialized);
    }

    Ok(VaultSnapshot {
        state: vault_to_state(&vault)?,
        total_idle: vault.total_idle,
    })
}

/// Assess every registered strategy at `slot`
pub fn assess(snapshot: &VaultSnapshot, slot: u64) -> Vec<StrategyHealth> {
    let state = &snapshot.state;
    let assets = snapshot.total_assets();
    state
        .registry
        .iter()
        .map(|record| StrategyHealth {
            strategy: Pubkey::new_from_array(record.id),
            status: record.status,
            debt_ratio: record.params.debt_ratio,
            total_debt: record.params.total_debt,
            blocks_since_report: slot.saturating_sub(record.params.last_report_block),
            expected_return: expected_return(state, slot, &record.id).unwrap_or(0),
            credit_available: credit_available(state, &assets, slot, &record.id),
            debt_outstanding: debt_outstanding(state, &assets, &record.id).unwrap_or(0),
            queue_position: state.queue.position(&record.id),
        })
        .collect()
}

/// Base58 rendering of a raw strategy id
pub fn render_id(id: &[u8; 32]) -> String {
    bs58::encode(id).into_string()
}
