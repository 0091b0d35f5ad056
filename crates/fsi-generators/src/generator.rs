//! Row assembly driver.

use crate::context::GeneratorContext;
use crate::generators::{generate_for_type, generate_key_for_type};
use crate::helpers::AssignmentCache;
use crate::registry::{Generator, GeneratorRegistry};
use fsi_core::{DatabaseSchema, GeneratorError, KeyRegistry, Row, TableDefinition};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use tracing::{debug, info};

/// Attempts allowed per requested row before a table gives up.
pub const MAX_SKIP_FACTOR: u64 = 4;

/// Outcome counters for one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Rows completed and recorded
    pub generated: u64,
    /// Rows abandoned by a generator
    pub skipped: u64,
}

/// Data generator that assembles rows column by column.
///
/// The generator uses a seeded random number generator, so the same schema,
/// registry and seed always produce the same rows. Completed rows are
/// recorded in a [`KeyRegistry`] that later tables read their foreign keys
/// from, so tables must be generated parents first.
pub struct DataGenerator {
    schema: DatabaseSchema,
    registry: GeneratorRegistry,
    /// Seeded random number generator for reproducibility
    rng: StdRng,
    keys: KeyRegistry,
    assignments: AssignmentCache,
    /// Next row index per table
    indices: HashMap<String, u64>,
    stats: HashMap<String, TableStats>,
}

impl DataGenerator {
    /// Create a new data generator with the given schema, registry and seed.
    pub fn new(schema: DatabaseSchema, registry: GeneratorRegistry, seed: u64) -> Self {
        Self {
            schema,
            registry,
            rng: StdRng::seed_from_u64(seed),
            keys: KeyRegistry::new(),
            assignments: AssignmentCache::new(),
            indices: HashMap::new(),
            stats: HashMap::new(),
        }
    }

    /// Start from rows generated elsewhere, e.g. a previous run's parents.
    pub fn with_keys(mut self, keys: KeyRegistry) -> Self {
        self.keys = keys;
        self
    }

    /// Generate the next row for `table`.
    ///
    /// Returns `Ok(None)` when a generator abandoned the row. The row index
    /// still advances so generated identifiers never repeat.
    pub fn next_row(&mut self, table: &str) -> Result<Option<Row>, GeneratorError> {
        let table_def = self
            .schema
            .get_table(table)
            .ok_or_else(|| GeneratorError::TableNotFound(table.to_string()))?;

        let index = self.indices.entry(table.to_string()).or_insert(0);
        let row_index = *index;
        *index += 1;

        let built = build_row(
            table_def,
            &self.registry,
            &mut self.rng,
            &self.keys,
            &mut self.assignments,
            row_index,
        );
        let stats = self.stats.entry(table.to_string()).or_default();

        let recorded = built.and_then(|row| {
            self.keys.record(&table_def.primary_key, row.clone())?;
            Ok(row)
        });
        match recorded {
            Ok(row) => {
                self.assignments.commit();
                stats.generated += 1;
                Ok(Some(row))
            }
            Err(e) if e.is_skip() => {
                // keys claimed by the abandoned row go back to the pool
                self.assignments.release();
                debug!("Skipped {} row {}: {}", table, row_index, e);
                stats.skipped += 1;
                Ok(None)
            }
            Err(e) => {
                self.assignments.release();
                Err(e)
            }
        }
    }

    /// Generate up to `count` rows for `table`.
    ///
    /// Stops after `count * MAX_SKIP_FACTOR` attempts, so a table whose
    /// parents are exhausted returns fewer rows instead of spinning.
    pub fn generate_table(
        &mut self,
        table: &str,
        count: u64,
    ) -> Result<(Vec<Row>, TableStats), GeneratorError> {
        let mut rows = Vec::with_capacity(count as usize);
        let mut stats = TableStats::default();
        let max_attempts = count.saturating_mul(MAX_SKIP_FACTOR);

        let mut attempts = 0;
        while stats.generated < count && attempts < max_attempts {
            attempts += 1;
            match self.next_row(table)? {
                Some(row) => {
                    rows.push(row);
                    stats.generated += 1;
                }
                None => stats.skipped += 1,
            }
        }

        info!(
            "Generated {} rows for {} ({} skipped)",
            stats.generated, table, stats.skipped
        );
        Ok((rows, stats))
    }

    /// Counters accumulated for `table` across all calls.
    pub fn stats(&self, table: &str) -> TableStats {
        self.stats.get(table).copied().unwrap_or_default()
    }

    /// Rows recorded so far.
    pub fn keys(&self) -> &KeyRegistry {
        &self.keys
    }

    /// Consume the generator, keeping the recorded rows.
    pub fn into_keys(self) -> KeyRegistry {
        self.keys
    }

    /// Get a reference to the schema.
    pub fn schema(&self) -> &DatabaseSchema {
        &self.schema
    }

    /// Get a reference to the registry.
    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }
}

/// Fill every column of one row in declaration order.
fn build_row(
    table: &TableDefinition,
    registry: &GeneratorRegistry,
    rng: &mut StdRng,
    keys: &KeyRegistry,
    assignments: &mut AssignmentCache,
    index: u64,
) -> Result<Row, GeneratorError> {
    let mut row = Row::new(&table.name, index);

    for column in &table.columns {
        // already filled by a record generator
        if row.contains(&column.name) {
            continue;
        }

        let Some(entry) = registry.resolve(&table.name, &column.name) else {
            let value = if table.primary_key.contains(&column.name) {
                generate_key_for_type(&table.name, column, rng, index)?
            } else {
                generate_for_type(column, rng, index)
            };
            row.set(column.name.clone(), value);
            continue;
        };

        let mut ctx =
            GeneratorContext::new(&table.name, &column.name, index, rng, keys, assignments);
        match entry.generator {
            Generator::Field(f) => {
                let value = f(&row, &mut ctx)?;
                row.set(column.name.clone(), value);
            }
            Generator::Record(f) => {
                let fields = f(&row, &mut ctx)?;
                if !fields.iter().any(|(name, _)| *name == column.name) {
                    return Err(GeneratorError::Generator {
                        table: table.name.clone(),
                        column: column.name.clone(),
                        message: format!("record generator '{}' did not produce it", entry.name),
                    });
                }
                for (name, value) in fields {
                    if table.get_column(name).is_some() && !row.contains(name) {
                        row.set(name, value);
                    }
                }
            }
        }
    }

    Ok(row)
}
