//! Command-line interface for fsi-datagen
//!
//! # Usage Examples
//!
//! ## Generate
//! ```bash
//! # Every table of the shipped schema, one CSV per table
//! fsi-datagen generate \
//!   --schema schemas/fsi_schema.yaml \
//!   --output-dir out/
//!
//! # A reproducible subset with a fixed size
//! fsi-datagen generate \
//!   --schema schemas/fsi_schema.yaml \
//!   --output-dir out/ \
//!   --seed 7 --row-count 500 \
//!   --tables consumer_banking.customers,consumer_banking.accounts
//! ```
//!
//! ## Inspect
//! ```bash
//! # Registered generators, optionally for one table
//! fsi-datagen list --table mortgage_servicing.loans
//!
//! # Which generator each schema column resolves to
//! fsi-datagen check --schema schemas/fsi_schema.yaml
//! ```
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=info`).

use anyhow::Context;
use clap::{Parser, Subcommand};
use fsi_core::DatabaseSchema;
use fsi_generators::{default_registry, DataGenerator, GeneratorRegistry};
use fsi_populate_csv::{CSVPopulateArgs, CSVPopulator};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Seed used when neither the command line nor the schema sets one.
const DEFAULT_SEED: u64 = 42;

#[derive(Parser)]
#[command(name = "fsi-datagen")]
#[command(about = "Generate realistic, referentially consistent FSI test data")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the schema's tables into CSV files
    Generate {
        #[command(flatten)]
        args: CSVPopulateArgs,
    },

    /// List registered generators
    List {
        /// Only generators that apply to this table
        #[arg(long)]
        table: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show which generator each column of a schema resolves to
    Check {
        /// Path to schema YAML file
        #[arg(long, short = 's', env = "FSI_SCHEMA")]
        schema: PathBuf,
    },
}

/// One registry entry as printed by `list`.
#[derive(Debug, Serialize)]
struct GeneratorInfo<'a> {
    name: &'a str,
    table_pattern: &'a str,
    column_pattern: &'a str,
    kind: &'a str,
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let registry = default_registry().context("Failed to build the generator registry")?;

    match cli.command {
        Commands::Generate { args } => run_generate(args, registry),
        Commands::List { table, json } => run_list(&registry, table.as_deref(), json),
        Commands::Check { schema } => run_check(&registry, &schema),
    }
}

fn load_schema(path: &Path) -> anyhow::Result<DatabaseSchema> {
    DatabaseSchema::from_file(path)
        .with_context(|| format!("Failed to load schema from {path:?}"))
}

fn run_generate(args: CSVPopulateArgs, registry: GeneratorRegistry) -> anyhow::Result<()> {
    let schema = load_schema(&args.schema)?;
    let seed = args.seed.or(schema.seed).unwrap_or(DEFAULT_SEED);

    tracing::info!(
        "Generating {} tables from {:?} into {:?} (seed={})",
        if args.tables.is_empty() {
            schema.tables.len()
        } else {
            args.tables.len()
        },
        args.schema,
        args.output_dir,
        seed
    );

    let generator = DataGenerator::new(schema, registry, seed);
    let mut populator = CSVPopulator::new(generator);
    let results = populator
        .populate_all(&args.output_dir, &args.tables, args.row_count)
        .with_context(|| format!("Failed to generate CSV files into {:?}", args.output_dir))?;

    let mut total_rows = 0;
    let mut total_skipped = 0;
    let mut total_bytes = 0;
    let mut total_duration = Duration::ZERO;
    for (table, metrics) in &results {
        total_rows += metrics.rows_written;
        total_skipped += metrics.rows_skipped;
        total_bytes += metrics.file_size_bytes;
        total_duration += metrics.total_duration;
        println!(
            "{table:<48} {:>8} rows {:>6} skipped {:>10} bytes",
            metrics.rows_written, metrics.rows_skipped, metrics.file_size_bytes
        );
    }

    tracing::info!(
        "Generation complete: {} tables, {} rows ({} skipped), {} bytes in {:?}",
        results.len(),
        total_rows,
        total_skipped,
        total_bytes,
        total_duration
    );
    Ok(())
}

fn run_list(registry: &GeneratorRegistry, table: Option<&str>, json: bool) -> anyhow::Result<()> {
    let entries: Vec<GeneratorInfo<'_>> = registry
        .entries()
        .iter()
        .filter(|e| table.is_none_or(|t| e.matches_table(t)))
        .map(|e| GeneratorInfo {
            name: e.name,
            table_pattern: e.table_pattern(),
            column_pattern: e.column_pattern(),
            kind: if e.is_record() { "record" } else { "field" },
        })
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&entries).context("Failed to serialize generators")?;
        println!("{out}");
        return Ok(());
    }

    println!("{:<32} {:<7} {:<56} COLUMN", "NAME", "KIND", "TABLE");
    for entry in &entries {
        println!(
            "{:<32} {:<7} {:<56} {}",
            entry.name, entry.kind, entry.table_pattern, entry.column_pattern
        );
    }
    println!("{} generators", entries.len());
    Ok(())
}

fn run_check(registry: &GeneratorRegistry, path: &Path) -> anyhow::Result<()> {
    let schema = load_schema(path)?;

    let mut fallbacks = 0;
    for table in &schema.tables {
        println!("{} ({} rows)", table.name, table.rows);
        for column in &table.columns {
            let resolved = match registry.resolve(&table.name, &column.name) {
                Some(entry) => entry.name,
                None => {
                    fallbacks += 1;
                    "<type fallback>"
                }
            };
            println!("  {:<32} {}", column.name, resolved);
        }
    }

    tracing::info!(
        "Checked {} tables; {} columns use the type fallback",
        schema.tables.len(),
        fallbacks
    );
    Ok(())
}
