//! Generator registry keyed by `(table pattern, column pattern)`.
//!
//! Entries are matched in registration order and the first entry whose
//! table and column patterns both match wins, so specific registrations
//! must come before catch-alls.

use crate::context::GeneratorContext;
use fsi_core::{GeneratedValue, GeneratorError, Row};
use regex::Regex;

/// Produces the value of a single column.
pub type FieldFn =
    fn(&Row, &mut GeneratorContext<'_>) -> Result<GeneratedValue, GeneratorError>;

/// Produces several sibling columns at once.
///
/// The returned fields must include the column that triggered the call.
pub type RecordFn = fn(
    &Row,
    &mut GeneratorContext<'_>,
) -> Result<Vec<(&'static str, GeneratedValue)>, GeneratorError>;

/// A registered generator function.
#[derive(Debug, Clone, Copy)]
pub enum Generator {
    /// Single-column generator
    Field(FieldFn),
    /// Multi-column generator
    Record(RecordFn),
}

/// One registry entry.
#[derive(Debug, Clone)]
pub struct GeneratorEntry {
    /// Human-readable generator name
    pub name: &'static str,
    table_pattern: Regex,
    column_pattern: Regex,
    table_source: String,
    column_source: String,
    /// The generator function
    pub generator: Generator,
}

impl GeneratorEntry {
    /// Whether this entry applies to `table.column`.
    pub fn matches(&self, table: &str, column: &str) -> bool {
        self.table_pattern.is_match(table) && self.column_pattern.is_match(column)
    }

    /// Whether this entry applies to any column of `table`.
    pub fn matches_table(&self, table: &str) -> bool {
        self.table_pattern.is_match(table)
    }

    /// Table pattern as registered (unanchored).
    pub fn table_pattern(&self) -> &str {
        &self.table_source
    }

    /// Column pattern as registered (unanchored).
    pub fn column_pattern(&self) -> &str {
        &self.column_source
    }

    /// Whether this is a multi-column generator.
    pub fn is_record(&self) -> bool {
        matches!(self.generator, Generator::Record(_))
    }
}

fn compile_anchored(pattern: &str) -> Result<Regex, GeneratorError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|e| GeneratorError::InvalidPattern {
        pattern: pattern.to_string(),
        source: Box::new(e),
    })
}

/// Ordered collection of generator registrations.
#[derive(Debug, Clone, Default)]
pub struct GeneratorRegistry {
    entries: Vec<GeneratorEntry>,
}

impl GeneratorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator. Both patterns must match the whole name.
    pub fn register(
        &mut self,
        table_pattern: &str,
        column_pattern: &str,
        name: &'static str,
        generator: Generator,
    ) -> Result<&mut Self, GeneratorError> {
        let entry = GeneratorEntry {
            name,
            table_pattern: compile_anchored(table_pattern)?,
            column_pattern: compile_anchored(column_pattern)?,
            table_source: table_pattern.to_string(),
            column_source: column_pattern.to_string(),
            generator,
        };
        self.entries.push(entry);
        Ok(self)
    }

    /// Register a single-column generator.
    pub fn field(
        &mut self,
        table_pattern: &str,
        column_pattern: &str,
        name: &'static str,
        f: FieldFn,
    ) -> Result<&mut Self, GeneratorError> {
        self.register(table_pattern, column_pattern, name, Generator::Field(f))
    }

    /// Register a multi-column generator.
    pub fn record(
        &mut self,
        table_pattern: &str,
        column_pattern: &str,
        name: &'static str,
        f: RecordFn,
    ) -> Result<&mut Self, GeneratorError> {
        self.register(table_pattern, column_pattern, name, Generator::Record(f))
    }

    /// First entry matching `table.column`.
    pub fn resolve(&self, table: &str, column: &str) -> Option<&GeneratorEntry> {
        self.entries.iter().find(|e| e.matches(table, column))
    }

    /// All entries whose table pattern matches `table`.
    pub fn entries_for_table<'a>(
        &'a self,
        table: &'a str,
    ) -> impl Iterator<Item = &'a GeneratorEntry> + 'a {
        self.entries.iter().filter(move |e| e.matches_table(table))
    }

    /// All entries in registration order.
    pub fn entries(&self) -> &[GeneratorEntry] {
        &self.entries
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_a(_: &Row, _: &mut GeneratorContext<'_>) -> Result<GeneratedValue, GeneratorError> {
        Ok(GeneratedValue::text("a"))
    }

    fn constant_b(_: &Row, _: &mut GeneratorContext<'_>) -> Result<GeneratedValue, GeneratorError> {
        Ok(GeneratedValue::text("b"))
    }

    #[test]
    fn test_first_match_wins() {
        let mut registry = GeneratorRegistry::new();
        registry
            .field(r"consumer_banking\.accounts", "account_type", "specific", constant_a)
            .unwrap()
            .field(r".*", r".*_type", "catch_all", constant_b)
            .unwrap();

        let entry = registry
            .resolve("consumer_banking.accounts", "account_type")
            .unwrap();
        assert_eq!(entry.name, "specific");

        let entry = registry
            .resolve("enterprise.legal_entities", "entity_type")
            .unwrap();
        assert_eq!(entry.name, "catch_all");
    }

    #[test]
    fn test_patterns_are_anchored() {
        let mut registry = GeneratorRegistry::new();
        registry
            .field(r"consumer_banking\.accounts", "status", "status", constant_a)
            .unwrap();

        assert!(registry
            .resolve("consumer_banking.accounts", "status")
            .is_some());
        assert!(registry
            .resolve("consumer_banking.accounts", "account_status")
            .is_none());
        assert!(registry
            .resolve("consumer_banking.accounts_archive", "status")
            .is_none());
    }

    #[test]
    fn test_invalid_pattern() {
        let mut registry = GeneratorRegistry::new();
        let err = registry
            .field("(unclosed", "x", "bad", constant_a)
            .unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidPattern { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_entries_for_table() {
        let mut registry = GeneratorRegistry::new();
        registry
            .field(r"enterprise\..*", "a", "a", constant_a)
            .unwrap()
            .field(r"mortgage_servicing\.loans", "b", "b", constant_b)
            .unwrap();

        let names: Vec<_> = registry
            .entries_for_table("enterprise.employees")
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a"]);
        assert_eq!(registry.entries()[1].table_pattern(), r"mortgage_servicing\.loans");
    }
}
