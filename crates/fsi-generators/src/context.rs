//! The context object handed to every generator.

use crate::helpers::assignment::AssignmentCache;
use fsi_core::{GeneratedValue, GeneratorError, KeyRegistry, Row};
use rand::rngs::StdRng;
use rand::Rng;

/// Random draws attempted by the assignment helpers before giving up.
pub const MAX_ASSIGNMENT_ATTEMPTS: usize = 32;

/// Everything a generator may consult besides the row itself.
pub struct GeneratorContext<'a> {
    table: &'a str,
    column: &'a str,
    index: u64,
    rng: &'a mut StdRng,
    keys: &'a KeyRegistry,
    assignments: &'a mut AssignmentCache,
}

impl<'a> GeneratorContext<'a> {
    /// Create a context for generating `table.column` of row `index`.
    pub fn new(
        table: &'a str,
        column: &'a str,
        index: u64,
        rng: &'a mut StdRng,
        keys: &'a KeyRegistry,
        assignments: &'a mut AssignmentCache,
    ) -> Self {
        Self {
            table,
            column,
            index,
            rng,
            keys,
            assignments,
        }
    }

    /// Table being generated.
    pub fn table(&self) -> &'a str {
        self.table
    }

    /// Column being generated.
    pub fn column(&self) -> &'a str {
        self.column
    }

    /// Row index within the table.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// The seeded RNG.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut *self.rng
    }

    /// Rows and keys inserted so far.
    ///
    /// The returned reference is not tied to the borrow of `self`, so it can
    /// be held across calls to [`GeneratorContext::rng`].
    pub fn keys(&self) -> &'a KeyRegistry {
        self.keys
    }

    /// Build a `SkipRow` error for the current table.
    pub fn skip(&self, reason: impl Into<String>) -> GeneratorError {
        GeneratorError::skip(self.table, reason)
    }

    fn missing_parent(&self, parent: &str) -> GeneratorError {
        GeneratorError::MissingParent {
            table: self.table.to_string(),
            parent: parent.to_string(),
        }
    }

    /// A uniformly chosen primary key (first key column) of `parent`.
    pub fn random_parent_key(&mut self, parent: &str) -> Result<GeneratedValue, GeneratorError> {
        let keys = self.keys.primary_keys(parent);
        if keys.is_empty() {
            return Err(self.missing_parent(parent));
        }
        let idx = self.rng.random_range(0..keys.len());
        keys[idx]
            .first()
            .cloned()
            .ok_or_else(|| self.missing_parent(parent))
    }

    /// The `parent` row whose `key_column` equals `value`.
    ///
    /// A dangling reference abandons the current row.
    pub fn parent_row(
        &self,
        parent: &str,
        key_column: &str,
        value: &GeneratedValue,
    ) -> Result<&'a Row, GeneratorError> {
        self.keys
            .find_row(parent, key_column, value)
            .ok_or_else(|| self.skip(format!("no {parent} row with {key_column} = {value}")))
    }

    /// Follow the foreign key `fk_column` of `row` to its `parent` row, where
    /// the parent's key column has the same name.
    pub fn lookup(&self, row: &Row, fk_column: &str, parent: &str) -> Result<&'a Row, GeneratorError> {
        let value = row.require(fk_column)?;
        self.parent_row(parent, fk_column, value)
    }

    /// Assign a key of `parent` that has not yet been used under `scope`.
    ///
    /// Used for one-to-one children (one escrow account per loan).
    pub fn assign_unique(
        &mut self,
        scope: &str,
        parent: &str,
    ) -> Result<GeneratedValue, GeneratorError> {
        let keys = self.keys.primary_keys(parent);
        if keys.is_empty() {
            return Err(self.missing_parent(parent));
        }
        if self.assignments.claimed(scope) >= keys.len() {
            return Err(self.skip(format!("every {parent} key is already assigned")));
        }

        for _ in 0..MAX_ASSIGNMENT_ATTEMPTS {
            let key = &keys[self.rng.random_range(0..keys.len())];
            let Some(first) = key.first() else {
                continue;
            };
            if self.assignments.claim(scope, vec![first.to_string()]) {
                return Ok(first.clone());
            }
        }
        Err(self.skip(format!("no free {parent} key after {MAX_ASSIGNMENT_ATTEMPTS} attempts")))
    }

    /// Assign a `(left, right)` key pair never used before under `scope`.
    ///
    /// Used for junction tables with composite primary keys.
    pub fn assign_unique_pair(
        &mut self,
        scope: &str,
        left: &str,
        right: &str,
    ) -> Result<(GeneratedValue, GeneratedValue), GeneratorError> {
        let left_keys = self.keys.primary_keys(left);
        let right_keys = self.keys.primary_keys(right);
        if left_keys.is_empty() {
            return Err(self.missing_parent(left));
        }
        if right_keys.is_empty() {
            return Err(self.missing_parent(right));
        }
        if self.assignments.claimed(scope) >= left_keys.len() * right_keys.len() {
            return Err(self.skip(format!("every ({left}, {right}) pair is already assigned")));
        }

        for _ in 0..MAX_ASSIGNMENT_ATTEMPTS {
            let l = &left_keys[self.rng.random_range(0..left_keys.len())];
            let r = &right_keys[self.rng.random_range(0..right_keys.len())];
            let (Some(l), Some(r)) = (l.first(), r.first()) else {
                continue;
            };
            if self
                .assignments
                .claim(scope, vec![l.to_string(), r.to_string()])
            {
                return Ok((l.clone(), r.clone()));
            }
        }
        Err(self.skip(format!(
            "no free ({left}, {right}) pair after {MAX_ASSIGNMENT_ATTEMPTS} attempts"
        )))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::ContextHarness;
    use super::*;
    use std::collections::HashSet;

    fn seed_parents(harness: &mut ContextHarness, table: &str, key: &str, count: usize) {
        for i in 0..count {
            harness.insert(Row::new(table, i as u64).with(key, format!("K{i}")), key);
        }
    }

    #[test]
    fn test_random_parent_key_missing_parent() {
        let mut harness = ContextHarness::new(1);
        let mut ctx = harness.ctx("consumer_banking.accounts", "customer_id");
        let err = ctx
            .random_parent_key("consumer_banking.customers")
            .unwrap_err();
        assert!(matches!(err, GeneratorError::MissingParent { .. }));
        assert!(err.is_skip());
    }

    #[test]
    fn test_random_parent_key_picks_inserted() {
        let mut harness = ContextHarness::new(1);
        seed_parents(&mut harness, "p", "id", 3);
        let mut ctx = harness.ctx("c", "p_id");
        for _ in 0..20 {
            let key = ctx.random_parent_key("p").unwrap();
            assert!(["K0", "K1", "K2"].contains(&key.as_str().unwrap()));
        }
    }

    #[test]
    fn test_parent_row_dangling_is_skip() {
        let mut harness = ContextHarness::new(1);
        seed_parents(&mut harness, "p", "id", 1);
        let ctx = harness.ctx("c", "x");
        assert!(ctx.parent_row("p", "id", &GeneratedValue::text("K0")).is_ok());
        let err = ctx
            .parent_row("p", "id", &GeneratedValue::text("nope"))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::SkipRow { .. }));
    }

    #[test]
    fn test_assign_unique_exhausts() {
        let mut harness = ContextHarness::new(9);
        seed_parents(&mut harness, "loans", "loan_id", 3);
        let mut ctx = harness.ctx("escrow", "loan_id");

        let mut seen = HashSet::new();
        while seen.len() < 3 {
            match ctx.assign_unique("escrow.loan_id", "loans") {
                Ok(key) => assert!(seen.insert(key.to_string()), "duplicate assignment"),
                Err(e) => assert!(e.is_skip()),
            }
        }

        let err = ctx.assign_unique("escrow.loan_id", "loans").unwrap_err();
        assert!(matches!(err, GeneratorError::SkipRow { .. }));
    }

    #[test]
    fn test_assign_unique_pair_never_repeats() {
        let mut harness = ContextHarness::new(5);
        seed_parents(&mut harness, "a", "id", 3);
        seed_parents(&mut harness, "b", "id", 2);
        let mut ctx = harness.ctx("ab", "a_id");

        let mut pairs = HashSet::new();
        while pairs.len() < 6 {
            match ctx.assign_unique_pair("ab", "a", "b") {
                Ok((l, r)) => assert!(pairs.insert((l.to_string(), r.to_string()))),
                Err(e) => assert!(e.is_skip()),
            }
        }

        let err = ctx.assign_unique_pair("ab", "a", "b").unwrap_err();
        assert!(matches!(err, GeneratorError::SkipRow { .. }));
    }
}
