//! Synthetic data generators for a financial-services relational schema.
//!
//! Generators are registered against `(table pattern, column pattern)`
//! pairs and produce realistic, internally consistent values: card numbers
//! pass Luhn, routing numbers pass the ABA checksum, loan payments follow
//! the amortization schedule and every foreign key points at a row that was
//! generated earlier.
//!
//! # Architecture
//!
//! ```text
//! DatabaseSchema (YAML)        GeneratorRegistry
//!        │                     (table re, column re) -> fn
//!        ▼                            │
//! ┌──────────────────┐                │
//! │  DataGenerator   │◄───────────────┘
//! │                  │
//! │  - rng (StdRng)  │     GeneratorContext
//! │  - KeyRegistry   │ ──► { rng, keys, assignments,
//! │  - assignments   │       table, column, index }
//! └────────┬─────────┘
//!          │
//!          ▼
//!    Row { table, index, fields }
//! ```
//!
//! # Example
//!
//! ```rust
//! use fsi_generators::{default_registry, DataGenerator};
//! use fsi_core::DatabaseSchema;
//!
//! let schema = DatabaseSchema::from_yaml(r#"
//! version: 1
//! tables:
//!   - name: consumer_banking.customers
//!     primary_key: [customer_id]
//!     columns:
//!       - name: customer_id
//!         type: { type: char, length: 13 }
//!       - name: first_name
//!         type: { type: var_char, length: 50 }
//!       - name: credit_score
//!         type: int
//! "#).unwrap();
//!
//! let mut generator = DataGenerator::new(schema, default_registry().unwrap(), 42);
//! let (rows, stats) = generator.generate_table("consumer_banking.customers", 10).unwrap();
//! assert_eq!(rows.len(), 10);
//! assert_eq!(stats.skipped, 0);
//! ```
//!
//! Columns with no registered generator fall back to a value derived from
//! their declared type.

pub mod base_enum;
pub mod context;
pub mod domains;
pub mod generator;
pub mod generators;
pub mod helpers;
pub mod registry;

pub use base_enum::WeightedEnum;
pub use context::GeneratorContext;
pub use domains::default_registry;
pub use generator::{DataGenerator, TableStats, MAX_SKIP_FACTOR};
pub use generators::{generate_for_type, generate_key_for_type, generate_pattern};
pub use registry::{FieldFn, Generator, GeneratorEntry, GeneratorRegistry, RecordFn};

// Re-export the value types so `weighted_enum!` expands outside this crate.
pub use fsi_core::{GeneratedValue, GeneratorError, Row};
