//! Error types shared by the schema loader and the generators.

use thiserror::Error;

/// Error type for schema operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Table not found in schema
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Two tables share a name
    #[error("Duplicate table: {0}")]
    DuplicateTable(String),

    /// A primary key names a column the table does not declare
    #[error("Primary key column '{column}' is not a column of table '{table}'")]
    PrimaryKeyColumnMissing { table: String, column: String },
}

/// Error type for generator operations.
///
/// `SkipRow` and `MissingParent` are control flow rather than failures: the
/// row being built is discarded and generation continues with the next one.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Abandon the current row.
    #[error("Skipping row in '{table}': {reason}")]
    SkipRow { table: String, reason: String },

    /// A foreign key could not be resolved because the parent has no rows yet.
    #[error("No inserted keys in parent table '{parent}' (needed by '{table}')")]
    MissingParent { table: String, parent: String },

    /// A generator read a sibling column that has not been generated.
    #[error("Column '{column}' of '{table}' is required but not generated yet")]
    MissingField { table: String, column: String },

    /// Table not found in schema
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// A registry pattern failed to compile
    #[error("Invalid generator pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Schema error
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Any other generator failure
    #[error("Generator failed for '{table}.{column}': {message}")]
    Generator {
        table: String,
        column: String,
        message: String,
    },
}

impl GeneratorError {
    /// Build a `SkipRow` error.
    pub fn skip(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SkipRow {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error only abandons the current row.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::SkipRow { .. } | Self::MissingParent { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_classification() {
        assert!(GeneratorError::skip("t", "exhausted").is_skip());
        assert!(GeneratorError::MissingParent {
            table: "a".into(),
            parent: "b".into()
        }
        .is_skip());
        assert!(!GeneratorError::TableNotFound("x".into()).is_skip());
        assert!(!GeneratorError::MissingField {
            table: "a".into(),
            column: "c".into()
        }
        .is_skip());
    }

    #[test]
    fn test_error_messages() {
        let err = GeneratorError::skip("mortgage_servicing.payments", "loan not found");
        assert_eq!(
            err.to_string(),
            "Skipping row in 'mortgage_servicing.payments': loan not found"
        );
    }
}
