//! Registry of rows already inserted, keyed by table.
//!
//! Foreign-key generators pick parent keys from here, and contextual
//! generators look up the parent row itself (a loan for a payment, a
//! property for a loan) to keep derived values consistent.

use crate::error::GeneratorError;
use crate::values::{GeneratedValue, Row};
use std::collections::{HashMap, HashSet};

/// Primary-key tuple of one inserted row.
pub type PrimaryKey = Vec<GeneratedValue>;

/// Row positions keyed by column, then by the value's rendering.
type ColumnIndex = HashMap<String, HashMap<String, Vec<usize>>>;

#[derive(Debug, Default, Clone)]
struct TableEntries {
    keys: Vec<PrimaryKey>,
    rows: Vec<Row>,
    /// Rendered primary keys, for duplicate detection
    seen: HashSet<Vec<String>>,
    index: ColumnIndex,
}

impl TableEntries {
    /// Positions of rows whose `column` renders as `value`. Candidates only;
    /// callers compare the actual values.
    fn candidates(&self, column: &str, value: &GeneratedValue) -> &[usize] {
        self.index
            .get(column)
            .and_then(|by_value| by_value.get(&value.to_string()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// The "inserted primary keys" registry.
///
/// Every column of a recorded row is indexed, so [`KeyRegistry::find_row`]
/// and [`KeyRegistry::find_rows`] do not scan the table.
#[derive(Debug, Default, Clone)]
pub struct KeyRegistry {
    tables: HashMap<String, TableEntries>,
}

impl KeyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed row of `row.table` under its `primary_key` columns.
    ///
    /// Every primary-key column must be present and non-null, and the key
    /// tuple must not have been recorded before.
    pub fn record(&mut self, primary_key: &[String], row: Row) -> Result<(), GeneratorError> {
        let mut key = Vec::with_capacity(primary_key.len());
        for column in primary_key {
            match row.get(column) {
                Some(value) if !value.is_null() => key.push(value.clone()),
                _ => {
                    return Err(GeneratorError::Generator {
                        table: row.table.clone(),
                        column: column.clone(),
                        message: "primary key column is missing or null".to_string(),
                    })
                }
            }
        }

        let entries = self.tables.entry(row.table.clone()).or_default();
        let rendered: Vec<String> = key.iter().map(ToString::to_string).collect();
        if entries.seen.contains(&rendered) {
            return Err(GeneratorError::Generator {
                table: row.table.clone(),
                column: primary_key.join(", "),
                message: format!("duplicate primary key ({})", rendered.join(", ")),
            });
        }

        let position = entries.rows.len();
        for (column, value) in &row.fields {
            entries
                .index
                .entry(column.clone())
                .or_default()
                .entry(value.to_string())
                .or_default()
                .push(position);
        }
        entries.seen.insert(rendered);
        entries.keys.push(key);
        entries.rows.push(row);
        Ok(())
    }

    /// All primary keys inserted into `table`, in insertion order.
    pub fn primary_keys(&self, table: &str) -> &[PrimaryKey] {
        self.tables
            .get(table)
            .map(|e| e.keys.as_slice())
            .unwrap_or_default()
    }

    /// All rows inserted into `table`, in insertion order.
    pub fn rows(&self, table: &str) -> &[Row] {
        self.tables
            .get(table)
            .map(|e| e.rows.as_slice())
            .unwrap_or_default()
    }

    /// Number of rows inserted into `table`.
    pub fn len(&self, table: &str) -> usize {
        self.primary_keys(table).len()
    }

    /// Whether nothing has been inserted into `table`.
    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }

    /// Find the first row of `table` whose `column` equals `value`.
    pub fn find_row(&self, table: &str, column: &str, value: &GeneratedValue) -> Option<&Row> {
        let entries = self.tables.get(table)?;
        entries
            .candidates(column, value)
            .iter()
            .filter_map(|&position| entries.rows.get(position))
            .find(|row| row.get(column) == Some(value))
    }

    /// Find every row of `table` whose `column` equals `value`, in insertion
    /// order.
    pub fn find_rows<'a>(
        &'a self,
        table: &str,
        column: &'a str,
        value: &'a GeneratedValue,
    ) -> impl Iterator<Item = &'a Row> + 'a {
        let entries = self.tables.get(table);
        entries
            .map(|e| e.candidates(column, value))
            .unwrap_or_default()
            .iter()
            .filter_map(move |&position| entries.and_then(|e| e.rows.get(position)))
            .filter(move |row| row.get(column) == Some(value))
    }
}
