//! CLI argument definitions for the CSV populator.

use clap::Args;
use std::path::PathBuf;

/// Arguments for writing a schema's tables to CSV.
#[derive(Args, Clone, Debug)]
pub struct CSVPopulateArgs {
    /// Path to schema YAML file
    #[arg(long, short = 's', env = "FSI_SCHEMA")]
    pub schema: PathBuf,

    /// Output directory for CSV files (one file per table)
    #[arg(long, short = 'o', env = "FSI_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Random seed (overrides the schema's seed; same seed = same data)
    #[arg(long, env = "FSI_SEED")]
    pub seed: Option<u64>,

    /// Rows per table (overrides each table's `rows`)
    #[arg(long)]
    pub row_count: Option<u64>,

    /// Specific tables to generate (comma-separated, empty = all tables from schema)
    #[arg(long, value_delimiter = ',')]
    pub tables: Vec<String>,
}
