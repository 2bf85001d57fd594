//! Logical type to column definition mapping
//!
//! One decision table is shared by every vendor. Profiles only supply the
//! literal tokens through [`TypeTokens`]; thresholds and branch order are
//! fixed here:
//!
//! ```text
//! DATE / TIMESTAMP          -> date / timestamp token
//! BOOLEAN                   -> boolean token, or the one-character flag
//! NUMBER family, key column -> key token (+ auto-increment clause)
//!               precision 0 -> DECIMAL(len,0) | wide int | int   (len > 18 | > 9 | else)
//!               precision>0 -> DECIMAL(len,prec) when len > 0, else double
//! STRING                    -> VARCHAR(len) | VARCHAR(100) | large text
//! BINARY                    -> large binary
//! UNKNOWN                   -> UNKNOWN
//! ```

use crate::dialect::DialectCapabilities;
use crate::types::{CanonicalColumn, KeyColumns, LogicalType};

/// Marker emitted for columns whose logical type cannot be mapped
pub const UNKNOWN_TYPE_MARKER: &str = "UNKNOWN";

/// VARCHAR length used when a string column has no length
pub const DEFAULT_VARCHAR_LENGTH: i32 = 100;

/// Vendor spelling of each branch of the mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeTokens {
    pub date: &'static str,
    pub timestamp: &'static str,
    pub boolean: &'static str,
    /// Used for BOOLEAN when the vendor has no boolean type
    pub boolean_flag: &'static str,
    pub key: &'static str,
    /// Appended to `key` when auto-increment is requested
    pub auto_increment: &'static str,
    /// Exact decimal; emitted as `DECIMAL(length,precision)`
    pub decimal: &'static str,
    pub big_integer: &'static str,
    pub integer: &'static str,
    pub double: &'static str,
    /// Emitted as `VARCHAR(length)`
    pub varchar: &'static str,
    pub large_text: &'static str,
    pub large_binary: &'static str,
}

/// Column type for `column` without its name
pub fn column_type(
    tokens: &TypeTokens,
    capabilities: &DialectCapabilities,
    column: &CanonicalColumn,
    keys: &KeyColumns<'_>,
) -> String {
    let length = column.length;
    let precision = column.precision;

    match column.logical_type {
        LogicalType::Date => tokens.date.to_string(),
        LogicalType::Timestamp => tokens.timestamp.to_string(),
        LogicalType::Boolean => {
            if capabilities.supports_boolean_type {
                tokens.boolean.to_string()
            } else {
                tokens.boolean_flag.to_string()
            }
        }
        LogicalType::Number | LogicalType::Integer | LogicalType::BigNumber => {
            // Key columns never fall through to the precision branches
            if column.is_key(keys) {
                if keys.auto_increment {
                    format!("{}{}", tokens.key, tokens.auto_increment)
                } else {
                    tokens.key.to_string()
                }
            } else if precision == 0 {
                if length > 18 {
                    format!("{}({},0)", tokens.decimal, length)
                } else if length > 9 {
                    tokens.big_integer.to_string()
                } else {
                    tokens.integer.to_string()
                }
            } else if precision > 0 && length > 0 {
                format!("{}({},{})", tokens.decimal, length, precision)
            } else {
                tokens.double.to_string()
            }
        }
        LogicalType::String => {
            if length > 0 && length < capabilities.max_inline_varchar_length {
                format!("{}({})", tokens.varchar, length)
            } else if length <= 0 {
                format!("{}({})", tokens.varchar, DEFAULT_VARCHAR_LENGTH)
            } else {
                tokens.large_text.to_string()
            }
        }
        LogicalType::Binary => tokens.large_binary.to_string(),
        LogicalType::Unknown => UNKNOWN_TYPE_MARKER.to_string(),
    }
}

/// Full field definition: optional name, mapped type, optional trailing line break
pub fn field_definition(
    tokens: &TypeTokens,
    capabilities: &DialectCapabilities,
    column: &CanonicalColumn,
    keys: &KeyColumns<'_>,
    include_name: bool,
    line_break: bool,
) -> String {
    let mut definition = String::new();
    if include_name {
        definition.push_str(&column.name);
        definition.push(' ');
    }
    definition.push_str(&column_type(tokens, capabilities, column, keys));
    if line_break {
        definition.push('\n');
    }
    definition
}
