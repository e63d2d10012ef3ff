//! Invariant checking helpers

use crate::state::*;

/// Global allocation cap: sum of debt ratios never exceeds MAX_BPS
pub fn debt_ratio_within_cap(s: &State) -> bool {
    s.registry.total_debt_ratio() <= MAX_BPS
}

/// Revoked strategies carry a zero debt ratio
pub fn revoked_have_zero_ratio(s: &State) -> bool {
    s.registry
        .iter()
        .all(|r| r.status != StrategyStatus::Revoked || r.params.debt_ratio == 0)
}

/// Registry holds each identity at most once, never the null identity
pub fn registry_well_formed(s: &State) -> bool {
    let records: arrayvec::ArrayVec<&StrategyRecord, MAX_STRATEGIES> = s.registry.iter().collect();
    records.iter().enumerate().all(|(i, r)| {
        r.id != NULL_ID
            && r.status.is_registered()
            && records[i + 1..].iter().all(|other| other.id != r.id)
    })
}

/// Queue has no null entry, no duplicate, and only registered identities
pub fn queue_well_formed(s: &State) -> bool {
    let entries = s.queue.entries();
    entries.iter().enumerate().all(|(i, id)| {
        *id != NULL_ID && !entries[i + 1..].contains(id) && s.registry.contains(id)
    })
}

/// All structural invariants at once
pub fn state_ok(s: &State) -> bool {
    debt_ratio_within_cap(s)
        && revoked_have_zero_ratio(s)
        && registry_well_formed(s)
        && queue_well_formed(s)
}

/// Allocated debt never exceeds the pool's assets
pub fn debt_within_assets(s: &State, total_assets: u128) -> bool {
    s.registry.total_debt() <= total_assets
}

/// Between two states, `id`'s record differs at most in its debt ratio
pub fn only_debt_ratio_changed(before: &State, after: &State, id: &StrategyId) -> bool {
    let a = before.strategy_params(id);
    let b = after.strategy_params(id);
    StrategyParams { debt_ratio: 0, ..a } == StrategyParams { debt_ratio: 0, ..b }
}

/// Activation blocks never move and report blocks never go backwards
pub fn history_monotonic(before: &State, after: &State) -> bool {
    before.registry.iter().all(|r| match after.registry.get(&r.id) {
        Some(next) => {
            next.params.activation_block == r.params.activation_block
                && next.params.last_report_block >= r.params.last_report_block
                && next.params.total_gain >= r.params.total_gain
        }
        // Migrated away
        None => true,
    })
}
