//! CSV file populator for generated FSI tables.
//!
//! This crate writes the rows produced by `fsi-generators` to one CSV file
//! per table, with a header row in schema column order.
//!
//! # Example
//!
//! ```no_run
//! use fsi_core::DatabaseSchema;
//! use fsi_generators::{default_registry, DataGenerator};
//! use fsi_populate_csv::CSVPopulator;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = DatabaseSchema::from_file("schemas/fsi_schema.yaml")?;
//! let seed = schema.seed.unwrap_or(42);
//! let generator = DataGenerator::new(schema, default_registry()?, seed);
//! let mut populator = CSVPopulator::new(generator);
//!
//! // One CSV per table, parents first
//! for (table, metrics) in populator.populate_all("out", &[], None)? {
//!     println!("{table}: {} rows", metrics.rows_written);
//! }
//! # Ok(())
//! # }
//! ```

pub mod args;
mod error;
mod populator;

pub use args::CSVPopulateArgs;
pub use error::CSVPopulatorError;
pub use populator::{csv_path, CSVPopulator, PopulateMetrics, DEFAULT_BUFFER_SIZE};
