//! Caller predicates: governance role and strategy self-identity

use crate::error::{VaultError, VaultResult};
use crate::state::{State, StrategyId, NULL_ID};

/// Caller is the vault's administrative authority
pub fn is_governance(s: &State, caller: &StrategyId) -> bool {
    *caller != NULL_ID && s.governance == *caller
}

/// Caller is the strategy it claims to report for
pub fn is_strategy(caller: &StrategyId, strategy: &StrategyId) -> bool {
    *caller != NULL_ID && caller == strategy
}

pub fn require_governance(s: &State, caller: &StrategyId) -> VaultResult<()> {
    if is_governance(s, caller) {
        Ok(())
    } else {
        Err(VaultError::Unauthorized)
    }
}

pub fn require_strategy(caller: &StrategyId, strategy: &StrategyId) -> VaultResult<()> {
    if is_strategy(caller, strategy) {
        Ok(())
    } else {
        Err(VaultError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_governance_predicate() {
        let gov = [7u8; 32];
        let s = State::new(gov);
        assert!(is_governance(&s, &gov));
        assert!(!is_governance(&s, &[8u8; 32]));
        assert_eq!(require_governance(&s, &[8u8; 32]), Err(VaultError::Unauthorized));
    }

    #[test]
    fn test_null_caller_never_authorized() {
        // A vault whose governance was never set must not accept the null caller
        let s = State::default();
        assert!(!is_governance(&s, &NULL_ID));
        assert!(!is_strategy(&NULL_ID, &NULL_ID));
    }

    #[test]
    fn test_strategy_predicate() {
        let strat = [3u8; 32];
        assert!(is_strategy(&strat, &strat));
        assert_eq!(require_strategy(&[4u8; 32], &strat), Err(VaultError::Unauthorized));
    }
}
