//! CSV populator for generated FSI tables.

use crate::error::CSVPopulatorError;
use csv::Writer;
use fsi_core::{DatabaseSchema, Row, TableDefinition};
use fsi_generators::{DataGenerator, MAX_SKIP_FACTOR};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Write buffer per CSV file, in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// What one table population produced and how long it took.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Data rows in the file, header excluded.
    pub rows_written: u64,
    /// Number of rows a generator abandoned.
    pub rows_skipped: u64,
    /// Wall time for the whole table.
    pub total_duration: Duration,
    /// Time inside the generator.
    pub generation_duration: Duration,
    /// Time inside the CSV writer.
    pub write_duration: Duration,
    /// Size of the finished file.
    pub file_size_bytes: u64,
}

impl PopulateMetrics {
    /// Written rows per second of wall time.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// File bytes per second of wall time.
    pub fn bytes_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.file_size_bytes as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Writes tables produced by a [`DataGenerator`] to CSV files.
///
/// Rows written for one table stay in the generator's key registry, so
/// tables must be populated parents first (schema order).
pub struct CSVPopulator {
    generator: DataGenerator,
    include_header: bool,
}

impl CSVPopulator {
    /// Wrap a generator; headers are written by default.
    pub fn new(generator: DataGenerator) -> Self {
        Self {
            generator,
            include_header: true,
        }
    }

    /// Toggle the header line.
    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    /// Schema the generator was built from.
    pub fn schema(&self) -> &DatabaseSchema {
        self.generator.schema()
    }

    /// The wrapped generator, including its key registry.
    pub fn generator(&self) -> &DataGenerator {
        &self.generator
    }

    /// Generate up to `count` rows of `table_name` into `output_path`.
    ///
    /// Fewer rows are written when generators keep abandoning rows (for
    /// example a junction table whose key pairs run out).
    pub fn populate<P: AsRef<Path>>(
        &mut self,
        table_name: &str,
        output_path: P,
        count: u64,
    ) -> Result<PopulateMetrics, CSVPopulatorError> {
        let start_time = Instant::now();
        let mut metrics = PopulateMetrics::default();

        let table_schema = self
            .generator
            .schema()
            .get_table(table_name)
            .ok_or_else(|| CSVPopulatorError::TableNotFound(table_name.to_string()))?
            .clone();

        let output_path = output_path.as_ref();
        info!(
            "Generating CSV file '{}' with {} rows for table '{}'",
            output_path.display(),
            count,
            table_name
        );

        let file = File::create(output_path)?;
        let buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut writer = Writer::from_writer(buf_writer);

        let mut generation_time = Duration::ZERO;
        let mut write_time = Duration::ZERO;

        if self.include_header {
            let write_start = Instant::now();
            writer.write_record(table_schema.column_names())?;
            write_time += write_start.elapsed();
        }

        let max_attempts = count.saturating_mul(MAX_SKIP_FACTOR);
        let mut attempts = 0;
        while metrics.rows_written < count && attempts < max_attempts {
            attempts += 1;

            let gen_start = Instant::now();
            let row = self.generator.next_row(table_name)?;
            generation_time += gen_start.elapsed();

            let Some(row) = row else {
                metrics.rows_skipped += 1;
                continue;
            };

            let write_start = Instant::now();
            writer.write_record(row_to_csv_record(&row, &table_schema))?;
            write_time += write_start.elapsed();

            metrics.rows_written += 1;
            if metrics.rows_written % 10000 == 0 {
                debug!("Written {} rows", metrics.rows_written);
            }
        }

        writer.flush()?;
        drop(writer);

        metrics.file_size_bytes = std::fs::metadata(output_path)?.len();
        metrics.total_duration = start_time.elapsed();
        metrics.generation_duration = generation_time;
        metrics.write_duration = write_time;

        info!(
            "CSV generation complete: {} rows ({} skipped), {} bytes in {:?} ({:.2} rows/sec)",
            metrics.rows_written,
            metrics.rows_skipped,
            metrics.file_size_bytes,
            metrics.total_duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }

    /// Populate every selected table, in schema order, into
    /// `output_dir/<table>.csv`.
    ///
    /// Unselected tables are still generated in memory so the selected ones
    /// have parents to reference. An empty selection means every table.
    /// `row_count` overrides each table's configured `rows`.
    pub fn populate_all<P: AsRef<Path>>(
        &mut self,
        output_dir: P,
        tables: &[String],
        row_count: Option<u64>,
    ) -> Result<Vec<(String, PopulateMetrics)>, CSVPopulatorError> {
        let output_dir = output_dir.as_ref();
        for table in tables {
            if self.schema().get_table(table).is_none() {
                return Err(CSVPopulatorError::TableNotFound(table.clone()));
            }
        }
        std::fs::create_dir_all(output_dir)?;

        let plan: Vec<(String, u64)> = self
            .schema()
            .tables
            .iter()
            .map(|t| (t.name.clone(), row_count.unwrap_or(t.rows)))
            .collect();

        let mut results = Vec::new();
        for (table, count) in plan {
            if tables.is_empty() || tables.contains(&table) {
                let path = csv_path(output_dir, &table);
                let metrics = self.populate(&table, path, count)?;
                results.push((table, metrics));
            } else {
                debug!("Generating {} in memory only", table);
                self.generator.generate_table(&table, count)?;
            }
        }
        Ok(results)
    }
}

/// `output_dir/<table>.csv`
pub fn csv_path(output_dir: &Path, table: &str) -> PathBuf {
    output_dir.join(format!("{table}.csv"))
}

/// Convert a row to a CSV record in the table's column order.
///
/// NULL and absent values become empty fields.
fn row_to_csv_record(row: &Row, table_schema: &TableDefinition) -> Vec<String> {
    table_schema
        .columns
        .iter()
        .map(|column| {
            row.get(&column.name)
                .map(ToString::to_string)
                .unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsi_core::GeneratedValue;
    use fsi_generators::default_registry;
    use tempfile::TempDir;

    fn test_schema() -> DatabaseSchema {
        let yaml = r#"
version: 1
seed: 42
tables:
  - name: consumer_banking.customers
    rows: 8
    primary_key: [customer_id]
    columns:
      - name: customer_id
        type: { type: char, length: 13 }
      - name: first_name
        type: { type: var_char, length: 50 }
      - name: credit_score
        type: int
      - name: kyc_status
        type: { type: var_char, length: 20 }
  - name: consumer_banking.accounts
    rows: 12
    primary_key: [account_id]
    columns:
      - name: account_id
        type: { type: char, length: 13 }
      - name: customer_id
        type: { type: char, length: 13 }
      - name: account_type
        type: { type: var_char, length: 30 }
      - name: overdraft_limit
        type: { type: decimal, precision: 10, scale: 2 }
        nullable: true
"#;
        DatabaseSchema::from_yaml(yaml).unwrap()
    }

    fn populator(seed: u64) -> CSVPopulator {
        let generator = DataGenerator::new(test_schema(), default_registry().unwrap(), seed);
        CSVPopulator::new(generator)
    }

    #[test]
    fn test_metrics() {
        let metrics = PopulateMetrics {
            rows_written: 1000,
            rows_skipped: 0,
            total_duration: Duration::from_secs(10),
            generation_duration: Duration::from_secs(2),
            write_duration: Duration::from_secs(8),
            file_size_bytes: 100000,
        };

        assert_eq!(metrics.rows_per_second(), 100.0);
        assert_eq!(metrics.bytes_per_second(), 10000.0);
    }

    #[test]
    fn test_row_to_csv_record() {
        let schema = test_schema();
        let table_schema = schema.get_table("consumer_banking.accounts").unwrap();
        let row = Row::new("consumer_banking.accounts", 0)
            .with("account_id", "ACCT000000001")
            .with("customer_id", "CUST000000004")
            .with("account_type", "Savings")
            .with("overdraft_limit", GeneratedValue::Null);

        let record = row_to_csv_record(&row, table_schema);
        assert_eq!(record, vec!["ACCT000000001", "CUST000000004", "Savings", ""]);
    }

    #[test]
    fn test_populate_csv() {
        let mut populator = populator(42);
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("customers.csv");

        let metrics = populator
            .populate("consumer_banking.customers", &output_path, 10)
            .unwrap();

        assert_eq!(metrics.rows_written, 10);
        assert_eq!(metrics.rows_skipped, 0);

        let content = std::fs::read_to_string(&output_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 11); // 1 header + 10 data rows
        assert_eq!(lines[0], "customer_id,first_name,credit_score,kyc_status");
        assert!(lines[1].starts_with("CUST000000001,"));
    }

    #[test]
    fn test_populate_without_parents_writes_header_only() {
        let mut populator = populator(42).with_header(true);
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("accounts.csv");

        let metrics = populator
            .populate("consumer_banking.accounts", &output_path, 5)
            .unwrap();
        assert_eq!(metrics.rows_written, 0);
        assert_eq!(metrics.rows_skipped, 5 * MAX_SKIP_FACTOR);

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_populate_without_header() {
        let mut populator = populator(42).with_header(false);
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("customers.csv");

        populator
            .populate("consumer_banking.customers", &output_path, 10)
            .unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert_eq!(content.lines().count(), 10);
    }

    #[test]
    fn test_populate_all_selected_tables() {
        let mut populator = populator(42);
        let temp_dir = TempDir::new().unwrap();

        let results = populator
            .populate_all(
                temp_dir.path(),
                &["consumer_banking.accounts".to_string()],
                None,
            )
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, "consumer_banking.accounts");
        assert_eq!(results[0].1.rows_written, 12);
        assert!(!csv_path(temp_dir.path(), "consumer_banking.customers").exists());
        assert!(csv_path(temp_dir.path(), "consumer_banking.accounts").exists());
    }

    #[test]
    fn test_populate_all_unknown_table() {
        let mut populator = populator(42);
        let temp_dir = TempDir::new().unwrap();
        let err = populator
            .populate_all(temp_dir.path(), &["enterprise.nope".to_string()], None)
            .unwrap_err();
        assert!(matches!(err, CSVPopulatorError::TableNotFound(_)));
    }

    #[test]
    fn test_deterministic_generation() {
        let temp_dir = TempDir::new().unwrap();

        let mut pop1 = populator(42);
        let dir1 = temp_dir.path().join("a");
        pop1.populate_all(&dir1, &[], Some(6)).unwrap();

        let mut pop2 = populator(42);
        let dir2 = temp_dir.path().join("b");
        pop2.populate_all(&dir2, &[], Some(6)).unwrap();

        for table in ["consumer_banking.customers", "consumer_banking.accounts"] {
            let content1 = std::fs::read_to_string(csv_path(&dir1, table)).unwrap();
            let content2 = std::fs::read_to_string(csv_path(&dir2, table)).unwrap();
            assert_eq!(content1, content2);
        }
    }
}
