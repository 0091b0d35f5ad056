//! Column types understood by the FSI data generators.
//!
//! `ColumnType` is the small type universe the schema files use. Generators
//! registered for a column decide their own value shape; the column type is
//! only consulted for columns no generator matches.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// Column data type.
///
/// # YAML Format
///
/// Simple types can be specified as strings:
/// ```yaml
/// type: uuid
/// type: int
/// type: date
/// ```
///
/// Sized types use object format:
/// ```yaml
/// type:
///   type: var_char
///   length: 40
/// type:
///   type: decimal
///   precision: 12
///   scale: 2
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
    /// Boolean value
    Bool,

    /// 32-bit signed integer
    Int,

    /// 64-bit signed integer
    BigInt,

    /// 64-bit IEEE 754 floating point
    Float,

    /// Exact decimal with specified precision and scale
    Decimal {
        /// Total number of digits
        precision: u8,
        /// Number of digits after the decimal point
        scale: u8,
    },

    /// Fixed-length character string
    Char {
        /// Length in characters
        length: u16,
    },

    /// Variable-length character string with maximum length
    VarChar {
        /// Maximum length in characters
        length: u16,
    },

    /// Unbounded text
    Text,

    /// Calendar date without time
    Date,

    /// Date and time in UTC
    Timestamp,

    /// UUID
    Uuid,
}

impl ColumnType {
    /// Create a decimal type.
    pub fn decimal(precision: u8, scale: u8) -> Self {
        Self::Decimal { precision, scale }
    }

    /// Create a varchar type.
    pub fn varchar(length: u16) -> Self {
        Self::VarChar { length }
    }

    /// Check if this is a numeric type.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Int | Self::BigInt | Self::Float | Self::Decimal { .. }
        )
    }

    /// Check if this is a string type.
    pub fn is_string(&self) -> bool {
        matches!(self, Self::Char { .. } | Self::VarChar { .. } | Self::Text)
    }

    /// Check if this is a temporal type.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Timestamp)
    }

    /// Maximum length for bounded string types.
    pub fn max_length(&self) -> Option<usize> {
        match self {
            Self::Char { length } | Self::VarChar { length } => Some(*length as usize),
            _ => None,
        }
    }
}

impl Serialize for ColumnType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Self::Bool => serializer.serialize_str("bool"),
            Self::Int => serializer.serialize_str("int"),
            Self::BigInt => serializer.serialize_str("big_int"),
            Self::Float => serializer.serialize_str("float"),
            Self::Text => serializer.serialize_str("text"),
            Self::Date => serializer.serialize_str("date"),
            Self::Timestamp => serializer.serialize_str("timestamp"),
            Self::Uuid => serializer.serialize_str("uuid"),

            Self::Decimal { precision, scale } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "decimal")?;
                map.serialize_entry("precision", precision)?;
                map.serialize_entry("scale", scale)?;
                map.end()
            }
            Self::Char { length } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "char")?;
                map.serialize_entry("length", length)?;
                map.end()
            }
            Self::VarChar { length } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "var_char")?;
                map.serialize_entry("length", length)?;
                map.end()
            }
        }
    }
}

fn simple_type(name: &str) -> Option<ColumnType> {
    match name {
        "bool" | "boolean" => Some(ColumnType::Bool),
        "int" | "integer" => Some(ColumnType::Int),
        "big_int" | "bigint" => Some(ColumnType::BigInt),
        "float" | "double" => Some(ColumnType::Float),
        "text" => Some(ColumnType::Text),
        "date" => Some(ColumnType::Date),
        "timestamp" | "date_time" | "datetime" => Some(ColumnType::Timestamp),
        "uuid" => Some(ColumnType::Uuid),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for ColumnType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct ColumnTypeVisitor;

        impl<'de> Visitor<'de> for ColumnTypeVisitor {
            type Value = ColumnType;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string or map representing a column type")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                simple_type(value).ok_or_else(|| E::custom(format!("unknown simple type: {value}")))
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut type_name: Option<String> = None;
                let mut fields: HashMap<String, serde_yaml::Value> = HashMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "type" {
                        type_name = Some(map.next_value()?);
                    } else {
                        fields.insert(key, map.next_value()?);
                    }
                }

                let type_name = type_name.ok_or_else(|| M::Error::missing_field("type"))?;

                if let Some(simple) = simple_type(&type_name) {
                    return Ok(simple);
                }

                match type_name.as_str() {
                    "decimal" | "numeric" => {
                        let precision = get_field_required(&fields, "precision")?;
                        let scale = get_field_required(&fields, "scale")?;
                        Ok(ColumnType::Decimal { precision, scale })
                    }
                    "char" => {
                        let length = get_field_required(&fields, "length")?;
                        Ok(ColumnType::Char { length })
                    }
                    "var_char" | "varchar" => {
                        let length = get_field_required(&fields, "length")?;
                        Ok(ColumnType::VarChar { length })
                    }
                    _ => Err(M::Error::custom(format!("unknown type: {type_name}"))),
                }
            }
        }

        deserializer.deserialize_any(ColumnTypeVisitor)
    }
}

fn get_field_required<T: for<'de> Deserialize<'de>, E: serde::de::Error>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &'static str,
) -> Result<T, E> {
    let value = fields.get(key).ok_or_else(|| E::missing_field(key))?;
    serde_yaml::from_value(value.clone())
        .map_err(|e| E::custom(format!("invalid field '{key}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_categories() {
        assert!(ColumnType::Int.is_numeric());
        assert!(ColumnType::decimal(12, 2).is_numeric());
        assert!(!ColumnType::Text.is_numeric());

        assert!(ColumnType::varchar(40).is_string());
        assert!(!ColumnType::Int.is_string());

        assert!(ColumnType::Date.is_temporal());
        assert!(!ColumnType::Uuid.is_temporal());
    }

    #[test]
    fn test_deserialize_simple_string() {
        let parsed: ColumnType = serde_yaml::from_str("uuid").unwrap();
        assert_eq!(parsed, ColumnType::Uuid);

        let parsed: ColumnType = serde_yaml::from_str("bigint").unwrap();
        assert_eq!(parsed, ColumnType::BigInt);

        let parsed: ColumnType = serde_yaml::from_str("datetime").unwrap();
        assert_eq!(parsed, ColumnType::Timestamp);
    }

    #[test]
    fn test_deserialize_complex_types() {
        let yaml = r#"
type: var_char
length: 40
"#;
        let parsed: ColumnType = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed, ColumnType::VarChar { length: 40 });

        let yaml = r#"
type: decimal
precision: 12
scale: 2
"#;
        let parsed: ColumnType = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed, ColumnType::decimal(12, 2));
    }

    #[test]
    fn test_deserialize_rejects_unknown() {
        assert!(serde_yaml::from_str::<ColumnType>("geometry").is_err());

        let yaml = r#"
type: decimal
precision: 12
"#;
        assert!(serde_yaml::from_str::<ColumnType>(yaml).is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let ty = ColumnType::varchar(64);
        let yaml = serde_yaml::to_string(&ty).unwrap();
        let parsed: ColumnType = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, ty);
    }
}
