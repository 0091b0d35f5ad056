//! Value representations produced by the generators.
//!
//! `GeneratedValue` is what every column generator returns, and `Row` is the
//! partially built record handed to generators so they can derive a value
//! from fields already populated earlier in the same row.

use crate::error::GeneratorError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// A single generated column value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratedValue {
    /// SQL NULL
    Null,

    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int64(i64),

    /// 64-bit floating point
    Float64(f64),

    /// String value
    String(String),

    /// UUID value
    Uuid(Uuid),

    /// Calendar date
    Date(NaiveDate),

    /// Date/time in UTC
    DateTime(DateTime<Utc>),

    /// Exact decimal (money, rates)
    Decimal(Decimal),
}

impl GeneratedValue {
    /// Money amount rounded to cents.
    ///
    /// Non-finite inputs become zero.
    pub fn money(amount: f64) -> Self {
        Self::decimal(amount, 2)
    }

    /// Decimal rounded to `scale` fractional digits.
    pub fn decimal(value: f64, scale: u32) -> Self {
        let value = Decimal::from_f64(value).unwrap_or_default();
        Self::Decimal(value.round_dp(scale))
    }

    /// Build a string value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            Self::Decimal(d) if d.fract().is_zero() => d.to_i64(),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    ///
    /// Integers and decimals widen to f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float64(f) => Some(*f),
            Self::Int64(i) => Some(*i as f64),
            Self::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }

    /// Try to get this value as an exact decimal.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            Self::Int64(i) => Some(Decimal::from(*i)),
            Self::Float64(f) => Decimal::from_f64(*f),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a date. Timestamps are truncated.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::DateTime(dt) => Some(dt.date_naive()),
            _ => None,
        }
    }
}

impl fmt::Display for GeneratedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int64(i) => write!(f, "{i}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::String(s) => f.write_str(s),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%SZ")),
            Self::Decimal(d) => write!(f, "{d}"),
        }
    }
}

impl From<bool> for GeneratedValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for GeneratedValue {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<i32> for GeneratedValue {
    fn from(value: i32) -> Self {
        Self::Int64(value as i64)
    }
}

impl From<String> for GeneratedValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for GeneratedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<NaiveDate> for GeneratedValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<Decimal> for GeneratedValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<Uuid> for GeneratedValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl<T: Into<GeneratedValue>> From<Option<T>> for GeneratedValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// A row under construction (or completed) for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Table name
    pub table: String,

    /// Row index within the table (0-based attempt counter)
    pub index: u64,

    /// Field values, keyed by column name
    pub fields: HashMap<String, GeneratedValue>,
}

impl Row {
    /// Create an empty row.
    pub fn new(table: impl Into<String>, index: u64) -> Self {
        Self {
            table: table.into(),
            index,
            fields: HashMap::new(),
        }
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&GeneratedValue> {
        self.fields.get(name)
    }

    /// Check whether the field has been populated (NULL counts as populated).
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Set a field value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<GeneratedValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`Row::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<GeneratedValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Get a field that a generator depends on.
    ///
    /// Returns `MissingField` when the column has not been generated yet,
    /// which means the schema lists columns in the wrong order.
    pub fn require(&self, name: &str) -> Result<&GeneratedValue, GeneratorError> {
        self.fields
            .get(name)
            .ok_or_else(|| GeneratorError::MissingField {
                table: self.table.clone(),
                column: name.to_string(),
            })
    }

    /// Get a required field as a string slice.
    pub fn require_str(&self, name: &str) -> Result<&str, GeneratorError> {
        let value = self.require(name)?;
        value.as_str().ok_or_else(|| GeneratorError::Generator {
            table: self.table.clone(),
            column: name.to_string(),
            message: format!("expected a string, got {value:?}"),
        })
    }

    /// Get a required field as a date.
    pub fn require_date(&self, name: &str) -> Result<NaiveDate, GeneratorError> {
        let value = self.require(name)?;
        value.as_date().ok_or_else(|| GeneratorError::Generator {
            table: self.table.clone(),
            column: name.to_string(),
            message: format!("expected a date, got {value:?}"),
        })
    }

    /// Get a required field as an f64.
    pub fn require_f64(&self, name: &str) -> Result<f64, GeneratorError> {
        let value = self.require(name)?;
        value.as_f64().ok_or_else(|| GeneratorError::Generator {
            table: self.table.clone(),
            column: name.to_string(),
            message: format!("expected a number, got {value:?}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_money_rounds_to_cents() {
        let value = GeneratedValue::money(1234.5678);
        assert_eq!(
            value,
            GeneratedValue::Decimal(Decimal::from_str("1234.57").unwrap())
        );
        assert_eq!(value.to_string(), "1234.57");
    }

    #[test]
    fn test_money_non_finite_is_zero() {
        assert_eq!(
            GeneratedValue::money(f64::NAN),
            GeneratedValue::Decimal(Decimal::ZERO)
        );
    }

    #[test]
    fn test_display_for_csv() {
        assert_eq!(GeneratedValue::Null.to_string(), "");
        assert_eq!(GeneratedValue::Int64(42).to_string(), "42");
        assert_eq!(
            GeneratedValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()).to_string(),
            "2024-02-29"
        );
        assert_eq!(GeneratedValue::text("Checking").to_string(), "Checking");
    }

    #[test]
    fn test_numeric_accessors_widen() {
        assert_eq!(GeneratedValue::Int64(7).as_f64(), Some(7.0));
        assert_eq!(GeneratedValue::money(12.5).as_f64(), Some(12.5));
        assert_eq!(GeneratedValue::money(300.0).as_i64(), Some(300));
        assert_eq!(GeneratedValue::text("x").as_f64(), None);
    }

    #[test]
    fn test_option_into_value() {
        let none: Option<&str> = None;
        assert!(GeneratedValue::from(none).is_null());
        assert_eq!(GeneratedValue::from(Some("a")), GeneratedValue::text("a"));
    }

    #[test]
    fn test_row_require_missing_field() {
        let row = Row::new("consumer_banking.accounts", 0).with("account_type", "Checking");

        assert_eq!(row.require_str("account_type").unwrap(), "Checking");
        let err = row.require("open_date").unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::MissingField { ref column, .. } if column == "open_date"
        ));
    }

    #[test]
    fn test_row_require_wrong_shape() {
        let row = Row::new("t", 0).with("amount", "not a number");
        assert!(matches!(
            row.require_f64("amount"),
            Err(GeneratorError::Generator { .. })
        ));
    }
}
