//! Schema definitions for the FSI data generators.
//!
//! A schema file lists the tables to generate, in generation order, with
//! their columns and primary keys. Parents must precede the tables whose
//! foreign keys refer to them.
//!
//! ```yaml
//! version: 1
//! seed: 42
//! tables:
//!   - name: consumer_banking.customers
//!     rows: 100
//!     primary_key: [customer_id]
//!     columns:
//!       - name: customer_id
//!         type: { type: char, length: 13 }
//!       - name: first_name
//!         type: { type: var_char, length: 40 }
//! ```

use crate::error::SchemaError;
use crate::types::ColumnType;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Default number of rows generated for a table that doesn't say.
pub const DEFAULT_ROW_COUNT: u64 = 100;

fn default_row_count() -> u64 {
    DEFAULT_ROW_COUNT
}

/// Column definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,

    /// Column type
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Whether this column is nullable
    #[serde(default)]
    pub nullable: bool,
}

impl ColumnDefinition {
    /// Create a new column definition.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
        }
    }

    /// Create a new nullable column definition.
    pub fn nullable(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: true,
        }
    }
}

/// Table definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Schema-qualified table name (`domain.table`)
    pub name: String,

    /// Default number of rows to generate
    #[serde(default = "default_row_count")]
    pub rows: u64,

    /// Primary key column names (more than one for composite keys)
    pub primary_key: Vec<String>,

    /// All columns in generation order, primary key columns included
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    /// Create a new table definition.
    pub fn new(
        name: impl Into<String>,
        primary_key: Vec<String>,
        columns: Vec<ColumnDefinition>,
    ) -> Self {
        Self {
            name: name.into(),
            rows: DEFAULT_ROW_COUNT,
            primary_key,
            columns,
        }
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Domain part of a qualified name (`consumer_banking` for
    /// `consumer_banking.accounts`), if any.
    pub fn domain(&self) -> Option<&str> {
        self.name.split_once('.').map(|(domain, _)| domain)
    }

    fn validate(&self) -> Result<(), SchemaError> {
        for pk in &self.primary_key {
            if self.get_column(pk).is_none() {
                return Err(SchemaError::PrimaryKeyColumnMissing {
                    table: self.name.clone(),
                    column: pk.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Full generation schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSchema {
    /// Schema format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Default random seed
    #[serde(default)]
    pub seed: Option<u64>,

    /// Table definitions in generation order
    pub tables: Vec<TableDefinition>,

    /// Cached table lookup (not serialized)
    #[serde(skip)]
    table_map: HashMap<String, usize>,
}

fn default_version() -> u32 {
    1
}

impl DatabaseSchema {
    /// Create a schema from table definitions.
    pub fn new(tables: Vec<TableDefinition>) -> Result<Self, SchemaError> {
        let mut schema = Self {
            version: default_version(),
            seed: None,
            tables,
            table_map: HashMap::new(),
        };
        schema.validate()?;
        schema.build_table_map();
        Ok(schema)
    }

    /// Load a schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a schema from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let mut schema: DatabaseSchema = serde_yaml::from_str(yaml)?;
        schema.validate()?;
        schema.build_table_map();
        Ok(schema)
    }

    fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for table in &self.tables {
            if !seen.insert(table.name.as_str()) {
                return Err(SchemaError::DuplicateTable(table.name.clone()));
            }
            table.validate()?;
        }
        Ok(())
    }

    fn build_table_map(&mut self) {
        self.table_map = self
            .tables
            .iter()
            .enumerate()
            .map(|(idx, table)| (table.name.clone(), idx))
            .collect();
    }

    /// Get a table by name.
    pub fn get_table(&self, name: &str) -> Option<&TableDefinition> {
        self.table_map
            .get(name)
            .and_then(|&idx| self.tables.get(idx))
    }

    /// Get a table by name, or an error naming it.
    pub fn table(&self, name: &str) -> Result<&TableDefinition, SchemaError> {
        self.get_table(name)
            .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))
    }

    /// Get all table names in generation order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}
