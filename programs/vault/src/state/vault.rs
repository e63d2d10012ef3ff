//! Vault account: fixed-layout registry and withdrawal queue

use model_safety::{
    PoolLedger, StrategyParams, StrategyStatus, MAX_QUEUE_SLOTS, MAX_STRATEGIES, NULL_ID,
};
use pinocchio::pubkey::Pubkey;
use strata_common::StrataError;

use super::model_bridge::load_boxed_state;

/// One registry slot (128 bytes)
///
/// A slot whose `status` decodes to `Unregistered` is free.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StrategySlot {
    /// Strategy identity
    pub id: Pubkey,
    /// Maximum per-block change in allocated debt
    pub rate_limit: u128,
    /// Capital currently allocated
    pub total_debt: u128,
    /// Cumulative realized profit
    pub total_gain: u128,
    /// Performance fee (basis points)
    pub performance_fee: u64,
    /// Slot of first admission
    pub activation_block: u64,
    /// Debt ratio (basis points)
    pub debt_ratio: u64,
    /// Slot of the most recent report
    pub last_report_block: u64,
    /// `StrategyStatus` discriminant
    pub status: u8,
    /// Padding
    pub _padding: [u8; 15],
}

impl StrategySlot {
    pub const EMPTY: Self = Self {
        id: NULL_ID,
        rate_limit: 0,
        total_debt: 0,
        total_gain: 0,
        performance_fee: 0,
        activation_block: 0,
        debt_ratio: 0,
        last_report_block: 0,
        status: StrategyStatus::Unregistered as u8,
        _padding: [0; 15],
    };

    pub fn new(id: Pubkey, status: StrategyStatus, params: &StrategyParams) -> Self {
        Self {
            id,
            rate_limit: params.rate_limit,
            total_debt: params.total_debt,
            total_gain: params.total_gain,
            performance_fee: params.performance_fee,
            activation_block: params.activation_block,
            debt_ratio: params.debt_ratio,
            last_report_block: params.last_report_block,
            status: status as u8,
            _padding: [0; 15],
        }
    }

    pub fn params(&self) -> StrategyParams {
        StrategyParams {
            performance_fee: self.performance_fee,
            activation_block: self.activation_block,
            debt_ratio: self.debt_ratio,
            rate_limit: self.rate_limit,
            last_report_block: self.last_report_block,
            total_debt: self.total_debt,
            total_gain: self.total_gain,
        }
    }

    /// Decoded status; unknown discriminants read as free
    pub fn status(&self) -> StrategyStatus {
        StrategyStatus::try_from(self.status).unwrap_or(StrategyStatus::Unregistered)
    }
}

/// Vault account
/// PDA: ["vault", governance]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VaultAccount {
    /// Magic bytes for validation
    pub magic: u64,
    /// Layout version
    pub version: u8,
    /// Bump seed
    pub bump: u8,
    /// Occupied registry slots (a prefix of `strategies`)
    pub strategy_count: u16,
    /// Occupied queue slots (a prefix of `withdrawal_queue`)
    pub queue_len: u16,
    /// Padding
    pub _padding: [u8; 2],
    /// Administrative authority
    pub governance: Pubkey,
    /// Pool assets not allocated to any strategy
    pub total_idle: u128,
    /// Registry slots
    pub strategies: [StrategySlot; MAX_STRATEGIES],
    /// Withdrawal order, null-padded
    pub withdrawal_queue: [Pubkey; MAX_QUEUE_SLOTS],
}

impl VaultAccount {
    pub const LEN: usize = core::mem::size_of::<Self>();

    /// "STRATAVT"
    pub const MAGIC: &'static [u8; 8] = b"STRATAVT";

    pub const VERSION: u8 = 0;

    /// Initialize in place (avoids building the whole account on the stack)
    pub fn initialize_in_place(&mut self, governance: Pubkey, bump: u8) {
        self.magic = u64::from_le_bytes(*Self::MAGIC);
        self.version = Self::VERSION;
        self.bump = bump;
        self.strategy_count = 0;
        self.queue_len = 0;
        self._padding = [0; 2];
        self.governance = governance;
        self.total_idle = 0;
        for slot in self.strategies.iter_mut() {
            *slot = StrategySlot::EMPTY;
        }
        for entry in self.withdrawal_queue.iter_mut() {
            *entry = NULL_ID;
        }
    }

    /// Initialize new vault (for tests only - uses stack)
    #[cfg(not(target_os = "solana"))]
    pub fn new(governance: Pubkey, bump: u8) -> Self {
        let mut vault = Self {
            magic: 0,
            version: 0,
            bump: 0,
            strategy_count: 0,
            queue_len: 0,
            _padding: [0; 2],
            governance: NULL_ID,
            total_idle: 0,
            strategies: [StrategySlot::EMPTY; MAX_STRATEGIES],
            withdrawal_queue: [NULL_ID; MAX_QUEUE_SLOTS],
        };
        vault.initialize_in_place(governance, bump);
        vault
    }

    /// Validate magic and version
    pub fn is_initialized(&self) -> bool {
        self.magic == u64::from_le_bytes(*Self::MAGIC) && self.version == Self::VERSION
    }

    /// Find the slot holding a registered `strategy`
    pub fn find_strategy(&self, strategy: &Pubkey) -> Option<(usize, &StrategySlot)> {
        if *strategy == NULL_ID {
            return None;
        }
        self.strategies
            .iter()
            .enumerate()
            .take(self.strategy_count as usize)
            .find(|(_, slot)| &slot.id == strategy && slot.status().is_registered())
    }

    /// Read accessor: params of `strategy`, or the all-zero sentinel
    pub fn strategy_params(&self, strategy: &Pubkey) -> StrategyParams {
        self.find_strategy(strategy)
            .map(|(_, slot)| slot.params())
            .unwrap_or_default()
    }

    /// Read accessor: lifecycle status of `strategy`
    pub fn strategy_status(&self, strategy: &Pubkey) -> StrategyStatus {
        self.find_strategy(strategy)
            .map(|(_, slot)| slot.status())
            .unwrap_or(StrategyStatus::Unregistered)
    }

    /// Read accessor: queue entry at `index`, null when empty or out of range
    pub fn queue_slot(&self, index: usize) -> Pubkey {
        self.withdrawal_queue.get(index).copied().unwrap_or(NULL_ID)
    }

    /// Read accessor: position of `strategy` in the withdrawal queue
    pub fn queue_position(&self, strategy: &Pubkey) -> Option<usize> {
        if *strategy == NULL_ID {
            return None;
        }
        self.withdrawal_queue
            .iter()
            .take(self.queue_len as usize)
            .position(|entry| entry == strategy)
    }

    /// Idle plus allocated assets
    pub fn total_assets(&self) -> u128 {
        self.strategies
            .iter()
            .take(self.strategy_count as usize)
            .fold(self.total_idle, |acc, slot| acc.saturating_add(slot.total_debt))
    }

    /// Expected return of `strategy` at `block`, computed on the decoded model
    pub fn expected_return(&self, block: u64, strategy: &Pubkey) -> Result<u128, StrataError> {
        let state = load_boxed_state(self)?;
        Ok(model_safety::expected_return(&state, block, strategy)?)
    }
}

impl PoolLedger for VaultAccount {
    fn total_assets(&self) -> u128 {
        VaultAccount::total_assets(self)
    }
}
