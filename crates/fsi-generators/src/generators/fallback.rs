//! Type-driven values for columns no generator is registered for.

use super::{numeric, pattern, timestamp, uuid};
use chrono::{DateTime, NaiveDate, Utc};
use fsi_core::{ColumnDefinition, ColumnType, GeneratedValue, GeneratorError};
use rand::Rng;

/// Probability that an unmatched nullable column is NULL.
pub const NULL_PROBABILITY: f64 = 0.1;

/// Digits of the row number in a fallback text key.
const KEY_DIGITS: usize = 9;

/// Generate a plausible value from the column type alone.
pub fn generate_for_type<R: Rng + ?Sized>(
    column: &ColumnDefinition,
    rng: &mut R,
    index: u64,
) -> GeneratedValue {
    if column.nullable && rng.random_bool(NULL_PROBABILITY) {
        return GeneratedValue::Null;
    }

    match &column.column_type {
        ColumnType::Bool => GeneratedValue::Bool(rng.random_bool(0.5)),
        ColumnType::Int => numeric::int_range(rng, 0, 10_000),
        ColumnType::BigInt => GeneratedValue::Int64(index as i64 + 1),
        ColumnType::Float => GeneratedValue::Float64(numeric::float_range(rng, 0.0, 1_000.0)),
        ColumnType::Decimal { precision, scale } => {
            let int_digits = precision.saturating_sub(*scale).min(9) as i32;
            let max = 10f64.powi(int_digits) - 1.0;
            numeric::rate_range(rng, 0.0, max, *scale as u32)
        }
        ColumnType::Char { .. } | ColumnType::VarChar { .. } | ColumnType::Text => {
            let mut value = pattern::generate_pattern(
                &format!("{}_{{index}}", column.name),
                rng,
                index,
            );
            if let Some(max) = column.column_type.max_length() {
                value.truncate(max);
            }
            GeneratedValue::String(value)
        }
        ColumnType::Date => GeneratedValue::Date(timestamp::date_between(
            rng,
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or(NaiveDate::MIN),
            timestamp::reference_date(),
        )),
        ColumnType::Timestamp => {
            let start = DateTime::<Utc>::from_timestamp(1_420_070_400, 0).unwrap_or_default();
            let end = timestamp::reference_date()
                .and_hms_opt(23, 59, 59)
                .map(|dt| dt.and_utc())
                .unwrap_or(start);
            GeneratedValue::DateTime(timestamp::timestamp_between(rng, start, end))
        }
        ColumnType::Uuid => GeneratedValue::Uuid(uuid::generate_uuid_v4(rng)),
    }
}

/// Value for an unmatched primary-key column, unique per row index.
///
/// Numeric keys are `index + 1`. Text keys are the column name cut down to
/// leave room for a zero-padded row number, e.g. `ref_000000013` for an
/// unbounded `ref` column.
/// Other types fall back to [`generate_for_type`] without NULLs.
pub fn generate_key_for_type<R: Rng + ?Sized>(
    table: &str,
    column: &ColumnDefinition,
    rng: &mut R,
    index: u64,
) -> Result<GeneratedValue, GeneratorError> {
    let number = index + 1;
    let value = match &column.column_type {
        ColumnType::Int | ColumnType::BigInt | ColumnType::Decimal { .. } => {
            GeneratedValue::Int64(number as i64)
        }
        ColumnType::Float => GeneratedValue::Float64(number as f64),
        ColumnType::Char { .. } | ColumnType::VarChar { .. } | ColumnType::Text => {
            let max = column.column_type.max_length().unwrap_or(usize::MAX);
            let digits = KEY_DIGITS.min(max);
            if number.to_string().len() > digits {
                return Err(GeneratorError::Generator {
                    table: table.to_string(),
                    column: column.name.clone(),
                    message: format!("row {number} does not fit a key of length {max}"),
                });
            }
            let prefix: String = format!("{}_", column.name)
                .chars()
                .take(max - digits)
                .collect();
            GeneratedValue::String(format!("{prefix}{number:0digits$}"))
        }
        _ => {
            let not_null = ColumnDefinition::new(column.name.clone(), column.column_type.clone());
            generate_for_type(&not_null, rng, index)
        }
    };
    Ok(value)
}
