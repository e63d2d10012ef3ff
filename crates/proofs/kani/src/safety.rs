//! Kani safety proofs for the registry and withdrawal queue

use kani::{any, assume};
use model_safety::{helpers::*, reporter::*, state::*, transitions::*, VaultError};
use crate::{adversary::*, generators::*, sanitizer::*};

// Unwind bound: `WithdrawalQueue::from_slots` walks all MAX_QUEUE_SLOTS
// entries, so every harness reaching set_queue needs MAX_QUEUE_SLOTS + 1.

/// Allocation cap: sum of debt ratios stays within MAX_BPS
#[kani::proof]
#[kani::unwind(21)]
fn debt_ratio_cap_holds_across_adversary_sequences() {
    let mut s = any_state_bounded();
    assume(state_ok(&s));

    let mut steps: u8 = any();
    steps = (steps % MAX_STEPS) + 1;

    for _ in 0..steps {
        s = adversary_step(s);
        kani::assert(debt_ratio_within_cap(&s), "Debt ratio sum must stay within MAX_BPS");
    }
}

/// Queue shape: no null, no duplicate, registered-only
#[kani::proof]
#[kani::unwind(21)]
fn queue_well_formed_across_adversary_sequences() {
    let mut s = any_state_bounded();
    assume(state_ok(&s));

    let mut steps: u8 = any();
    steps = (steps % MAX_STEPS) + 1;

    for _ in 0..steps {
        s = adversary_step(s);
        kani::assert(queue_well_formed(&s), "Queue must stay contiguous, unique and registered");
        kani::assert(registry_well_formed(&s), "Registry identities must stay unique and non-null");
    }
}

/// Authorization: a non-governance caller cannot change anything
#[kani::proof]
#[kani::unwind(21)]
fn non_governance_cannot_mutate() {
    let s = any_state_bounded();
    let caller = any_id();
    assume(caller != GOVERNANCE);

    let id = any_id();
    kani::assert(
        admit(&s, &caller, 1, id, any_config()) == Err(VaultError::Unauthorized),
        "admit must reject non-governance",
    );
    kani::assert(
        update(&s, &caller, &id, any_config()) == Err(VaultError::Unauthorized),
        "update must reject non-governance",
    );
    kani::assert(
        revoke(&s, &caller, &id) == Err(VaultError::Unauthorized),
        "revoke must reject non-governance",
    );
    kani::assert(
        migrate(&s, &caller, &id, any_id()) == Err(VaultError::Unauthorized),
        "migrate must reject non-governance",
    );
    kani::assert(
        remove_from_queue(&s, &caller, &id) == Err(VaultError::Unauthorized),
        "remove_from_queue must reject non-governance",
    );
    kani::assert(
        set_queue(&s, &caller, &[NULL_ID; MAX_QUEUE_SLOTS]) == Err(VaultError::Unauthorized),
        "set_queue must reject non-governance",
    );
}

/// Revoke touches only the debt ratio of its target
#[kani::proof]
#[kani::unwind(21)]
fn revoke_only_changes_debt_ratio() {
    let s = any_state_bounded();
    let id = any_id();

    if let Ok(after) = revoke(&s, &GOVERNANCE, &id) {
        kani::assert(after.strategy_params(&id).debt_ratio == 0, "Revoked ratio must be zero");
        kani::assert(only_debt_ratio_changed(&s, &after, &id), "Revoke must only zero the ratio");
        kani::assert(after.queue == s.queue, "Revoke must not move the queue");
    }
}

/// Report and history: activation never moves, reports never go backwards
#[kani::proof]
#[kani::unwind(21)]
fn history_is_monotonic() {
    let s = any_state_bounded();
    let after = adversary_step(s.clone());
    kani::assert(history_monotonic(&s, &after), "Strategy history must be monotonic");
}

/// Expected return is capped by rate_limit * elapsed
#[kani::proof]
fn expected_return_is_rate_limited() {
    let id: StrategyId = [2; 32];
    let params = any_params();
    let mut s = State::new(GOVERNANCE);
    assume(s.registry.insert(id, StrategyStatus::Active, params).is_ok());

    let block: u64 = (any::<u8>() as u64) % 128;
    if let Ok(projected) = expected_return(&s, block, &id) {
        let elapsed = block.saturating_sub(params.last_report_block) as u128;
        kani::assert(projected <= params.rate_limit * elapsed, "Expected return must respect rate limit");
    }
}

/// Harvest credit never allocates more than the pool holds
#[kani::proof]
#[kani::unwind(21)]
fn harvest_keeps_debt_within_assets() {
    let mut s = any_state_bounded();
    let assets: u128 = any::<u16>() as u128;

    let mut steps: u8 = any();
    steps = (steps % MAX_STEPS) + 1;

    for _ in 0..steps {
        let id = any_id();
        let block: u64 = (any::<u8>() as u64) % 64;
        let offered: u128 = any::<u16>() as u128;
        if let Ok((after, settled)) = harvest(&s, &assets, &id, block, &id, 0, offered) {
            kani::assert(settled.debt_payment <= offered, "Payment must not exceed the offer");
            kani::assert(debt_within_assets(&after, assets), "Debt must stay within pool assets");
            s = after;
        }
    }
}

/// Migrate keeps the queue slot index
#[kani::proof]
#[kani::unwind(21)]
fn migrate_preserves_queue_slot() {
    let s = any_state_bounded();
    let old = any_id();
    let new = any_id();

    if let Ok(after) = migrate(&s, &GOVERNANCE, &old, new) {
        kani::assert(after.queue.position(&new) == s.queue.position(&old), "Slot index must carry over");
        kani::assert(!after.registry.contains(&old), "Old identity must be unregistered");
        kani::assert(after.strategy_params(&new) == s.strategy_params(&old), "Record must carry over");
    }
}
