//! Generators for arbitrary state (for Kani)

#[cfg(kani)]
use kani::any;
use model_safety::state::*;
#[cfg(kani)]
use model_safety::transitions::admit;
#[cfg(kani)]
use crate::sanitizer::*;

#[cfg(kani)]
pub fn any_config() -> StrategyConfig {
    StrategyConfig {
        debt_ratio: any(),
        rate_limit: any(),
        performance_fee: any(),
    }
    .sanitize()
}

#[cfg(kani)]
pub fn any_id() -> StrategyId {
    small_id(any())
}

/// Caller drawn from governance plus the strategy identities
#[cfg(kani)]
pub fn any_caller() -> StrategyId {
    if any::<bool>() {
        GOVERNANCE
    } else {
        any_id()
    }
}

#[cfg(kani)]
pub fn any_params() -> StrategyParams {
    StrategyParams {
        performance_fee: any(),
        activation_block: any(),
        debt_ratio: any(),
        rate_limit: any(),
        last_report_block: any(),
        total_debt: any(),
        total_gain: any(),
    }
    .sanitize()
}

/// Reachable state: up to two admissions from an empty vault
///
/// Built through `admit` so every generated state is one the program can
/// actually hold.
#[cfg(kani)]
pub fn any_state_bounded() -> State {
    let mut s = State::new(GOVERNANCE);
    let admissions: u8 = any::<u8>() % 3;

    for i in 0..admissions {
        let block = (any::<u8>() as u64) % 16 + i as u64;
        if let Ok(next) = admit(&s, &GOVERNANCE, block, any_id(), any_config()) {
            s = next;
        }
    }
    s
}

/// One concrete state for the smallest harnesses
pub fn single_strategy_state(id: StrategyId, debt_ratio: u64) -> State {
    let mut s = State::new([1; 32]);
    let params = StrategyParams {
        debt_ratio,
        ..StrategyParams::default()
    };
    if let Ok(()) = s.registry.insert(id, StrategyStatus::Active, params) {
        assert!(s.queue.append(id).is_ok(), "empty queue must accept one strategy");
    }
    s
}
