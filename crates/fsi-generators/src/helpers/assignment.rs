//! Composite-key assignment cache.
//!
//! Junction tables (account holders, business owners) and one-to-one
//! children (escrow accounts) must never reuse a parent key combination.
//! The cache remembers every combination claimed per scope.

use std::collections::{HashMap, HashSet};

/// Claimed key combinations, grouped by scope (usually `table.column`).
///
/// Claims made while a row is being built stay pending until the driver
/// commits the row. A skipped row releases them.
#[derive(Debug, Default, Clone)]
pub struct AssignmentCache {
    used: HashMap<String, HashSet<Vec<String>>>,
    pending: Vec<(String, Vec<String>)>,
}

impl AssignmentCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key` under `scope`. Returns false if it was already taken.
    pub fn claim(&mut self, scope: &str, key: Vec<String>) -> bool {
        let inserted = self
            .used
            .entry(scope.to_string())
            .or_default()
            .insert(key.clone());
        if inserted {
            self.pending.push((scope.to_string(), key));
        }
        inserted
    }

    /// Number of combinations claimed under `scope`.
    pub fn claimed(&self, scope: &str) -> usize {
        self.used.get(scope).map_or(0, HashSet::len)
    }

    /// Keep every claim made since the last commit or release.
    pub fn commit(&mut self) {
        self.pending.clear();
    }

    /// Give back every claim made since the last commit or release.
    pub fn release(&mut self) {
        for (scope, key) in self.pending.drain(..) {
            if let Some(claimed) = self.used.get_mut(&scope) {
                claimed.remove(&key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_is_once_per_scope() {
        let mut cache = AssignmentCache::new();
        let key = vec!["ACC1".to_string(), "CUST1".to_string()];

        assert!(cache.claim("holders", key.clone()));
        assert!(!cache.claim("holders", key.clone()));
        assert!(cache.claim("owners", key.clone()));

        assert_eq!(cache.claimed("holders"), 1);
        assert_eq!(cache.claimed("missing"), 0);
    }

    #[test]
    fn test_release_returns_uncommitted_claims() {
        let mut cache = AssignmentCache::new();
        cache.claim("escrow", vec!["LN1".to_string()]);
        cache.commit();

        cache.claim("escrow", vec!["LN2".to_string()]);
        cache.claim("owners", vec!["B1".to_string(), "C1".to_string()]);
        cache.release();

        assert_eq!(cache.claimed("escrow"), 1);
        assert_eq!(cache.claimed("owners"), 0);
        assert!(!cache.claim("escrow", vec!["LN1".to_string()]));
        assert!(cache.claim("escrow", vec!["LN2".to_string()]));
    }

    #[test]
    fn test_failed_claim_is_not_released() {
        let mut cache = AssignmentCache::new();
        cache.claim("escrow", vec!["LN1".to_string()]);
        cache.commit();

        // a repeat claim does not own the key, so releasing keeps it
        assert!(!cache.claim("escrow", vec!["LN1".to_string()]));
        cache.release();
        assert_eq!(cache.claimed("escrow"), 1);
    }
}
