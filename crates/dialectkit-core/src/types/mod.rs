//! Vendor-neutral column model

use serde::{Deserialize, Serialize};

/// Logical value type of a column, independent of any database vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalType {
    Date,
    Timestamp,
    Boolean,
    Number,
    Integer,
    #[serde(alias = "bigdecimal")]
    BigNumber,
    String,
    Binary,
    #[serde(other)]
    Unknown,
}

impl LogicalType {
    /// Whether the type belongs to the numeric family (NUMBER, INTEGER, BIGNUMBER)
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            LogicalType::Number | LogicalType::Integer | LogicalType::BigNumber
        )
    }

    /// Get a human-readable name for this type
    pub fn display_name(&self) -> &'static str {
        match self {
            LogicalType::Date => "date",
            LogicalType::Timestamp => "timestamp",
            LogicalType::Boolean => "boolean",
            LogicalType::Number => "number",
            LogicalType::Integer => "integer",
            LogicalType::BigNumber => "bignumber",
            LogicalType::String => "string",
            LogicalType::Binary => "binary",
            LogicalType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for LogicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Column descriptor consumed by every statement generator.
///
/// A `length` or `precision` of zero or less means "unspecified".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub logical_type: LogicalType,
    #[serde(default)]
    pub length: i32,
    #[serde(default)]
    pub precision: i32,
}

impl CanonicalColumn {
    pub fn new(name: impl Into<String>, logical_type: LogicalType) -> Self {
        Self {
            name: name.into(),
            logical_type,
            length: 0,
            precision: 0,
        }
    }

    pub fn with_length(mut self, length: i32) -> Self {
        self.length = length;
        self
    }

    pub fn with_precision(mut self, precision: i32) -> Self {
        self.precision = precision;
        self
    }

    /// Whether this column is the technical or primary key (case-insensitive)
    pub fn is_key(&self, keys: &KeyColumns<'_>) -> bool {
        [keys.technical_key, keys.primary_key]
            .into_iter()
            .flatten()
            .any(|key| key.eq_ignore_ascii_case(&self.name))
    }
}

/// Key-related inputs of the field definition family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyColumns<'a> {
    /// Surrogate (technical) key field name
    pub technical_key: Option<&'a str>,
    /// Natural (primary) key field name
    pub primary_key: Option<&'a str>,
    /// Append the vendor's auto-increment clause to key columns
    pub auto_increment: bool,
}

impl<'a> KeyColumns<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn technical(name: &'a str) -> Self {
        Self {
            technical_key: Some(name),
            ..Self::default()
        }
    }

    pub fn primary(name: &'a str) -> Self {
        Self {
            primary_key: Some(name),
            ..Self::default()
        }
    }

    pub fn with_auto_increment(mut self, auto_increment: bool) -> Self {
        self.auto_increment = auto_increment;
        self
    }
}
