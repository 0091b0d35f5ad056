//! Core types for the FSI synthetic data generators.
//!
//! This crate provides the foundational types shared by the generator
//! catalog and the populators:
//!
//! - [`ColumnType`] - Column types used by schema files
//! - [`GeneratedValue`] - A single generated column value
//! - [`Row`] - A row under construction, handed to every generator
//! - [`DatabaseSchema`] - Tables to generate, loaded from YAML
//! - [`KeyRegistry`] - Rows and primary keys inserted so far
//! - [`GeneratorError`] - Errors, including the skip-row control flow
//!
//! # Architecture
//!
//! ```text
//! fsi-core (this crate)
//!    │
//!    ├─── fsi-generators     (registry, context, domain catalogs, driver)
//!    │
//!    └─── fsi-populate-csv   (writes generated tables to CSV)
//! ```

pub mod error;
pub mod keys;
pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use error::{GeneratorError, SchemaError};
pub use keys::{KeyRegistry, PrimaryKey};
pub use schema::{ColumnDefinition, DatabaseSchema, TableDefinition, DEFAULT_ROW_COUNT};
pub use types::ColumnType;
pub use values::{GeneratedValue, Row};
