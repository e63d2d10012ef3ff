//! Minimal Kani proofs using concrete states
//! Start with specific cases, then the symbolic harnesses in `safety`

use model_safety::{helpers::*, state::*, transitions::*, VaultError};
use crate::generators::single_strategy_state;
use crate::sanitizer::GOVERNANCE;

const A: StrategyId = [2; 32];
const B: StrategyId = [3; 32];

/// Admitting a second strategy past the ratio budget is rejected
#[kani::proof]
#[kani::unwind(21)]
fn concrete_ratio_budget() {
    let s = single_strategy_state(A, 9_000);
    let ratio: u64 = kani::any();
    kani::assume(ratio <= MAX_BPS);

    let result = admit(&s, &GOVERNANCE, 1, B, StrategyConfig::new(ratio, 0, 0));
    if ratio > 1_000 {
        kani::assert(result == Err(VaultError::RatioExceeded), "Over-budget admit must fail");
    } else {
        kani::assert(result.is_ok(), "In-budget admit must succeed");
    }
}

/// Self-migration is always rejected (concrete case)
#[kani::proof]
#[kani::unwind(21)]
fn concrete_self_migration() {
    let s = single_strategy_state(A, 1_000);
    kani::assert(
        migrate(&s, &GOVERNANCE, &A, A) == Err(VaultError::SelfMigration),
        "Self-migration must fail",
    );
}

/// Removing the only queued strategy empties the queue but keeps the record
#[kani::proof]
#[kani::unwind(21)]
fn concrete_remove_keeps_record() {
    let s = single_strategy_state(A, 1_000);
    let after = remove_from_queue(&s, &GOVERNANCE, &A);

    kani::assert(after.is_ok(), "Queued strategy must be removable");
    if let Ok(after) = after {
        kani::assert(after.queue.is_empty(), "Queue must be empty");
        kani::assert(after.registry.contains(&A), "Record must remain");
        kani::assert(state_ok(&after), "Invariants must hold");
    }
}

/// A zero-gain report leaves nothing to project at the report block
#[kani::proof]
#[kani::unwind(21)]
fn concrete_report_then_expected_return() {
    let s = single_strategy_state(A, 1_000);
    let block: u64 = kani::any();

    if let Ok(after) = report(&s, &A, block, &A, 0) {
        let at = after.strategy_params(&A).last_report_block;
        kani::assert(
            model_safety::expected_return(&after, at, &A) == Ok(0),
            "Expected return at the report block must be zero",
        );
    }
}

/// Governance reorder through set_queue with a concrete ordering
#[kani::proof]
#[kani::unwind(21)]
fn concrete_set_queue_by_governance() {
    let s = single_strategy_state(A, 1_000);
    let s = match admit(&s, &GOVERNANCE, 1, B, StrategyConfig::new(1_000, 0, 0)) {
        Ok(next) => next,
        Err(_) => return,
    };

    let mut slots = [NULL_ID; MAX_QUEUE_SLOTS];
    slots[0] = B;
    slots[1] = A;
    let after = set_queue(&s, &GOVERNANCE, &slots);
    kani::assert(after.is_ok(), "Governance reorder must succeed");
    if let Ok(after) = after {
        kani::assert(after.queue.entries() == [B, A], "Queue must follow the new ordering");
        kani::assert(state_ok(&after), "Invariants must hold");
    }
}
