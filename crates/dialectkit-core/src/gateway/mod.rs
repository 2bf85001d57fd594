//! Connection gateway interface
//!
//! The dialect layer never opens connections itself. Anything that needs a
//! live database goes through [`ConnectionGateway`], which the host engine
//! implements on top of its own driver. Calls are blocking; timeouts and
//! cancellation are the gateway's responsibility.

use std::collections::VecDeque;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by a gateway implementation
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("query failed: {0}")]
    Query(String),

    #[error("lock error: {0}")]
    Lock(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error(transparent)]
    Driver(Box<dyn std::error::Error + Send + Sync>),
}

/// Blocking access to a live connection
pub trait ConnectionGateway {
    /// Execute a query and stream its rows
    fn execute(&mut self, sql: &str) -> Result<Box<dyn RowCursor + '_>, GatewayError>;

    /// Acquire exclusive locks on the given fully-qualified tables
    fn lock_tables(&mut self, tables: &[String]) -> Result<(), GatewayError>;

    /// Release locks taken by [`ConnectionGateway::lock_tables`].
    ///
    /// Must be callable after a failed query on the same connection.
    fn unlock_tables(&mut self, tables: &[String]) -> Result<(), GatewayError>;
}

/// Forward-only cursor over query results
pub trait RowCursor {
    /// Next row, or `None` once the result set is exhausted
    fn next_row(&mut self) -> Result<Option<Row>, GatewayError>;
}

/// A single value read from a result row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Result row with named field lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    fields: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Look up a field by name; exact match first, then case-insensitive
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).or_else(|| {
            self.fields
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Integer view of a field; numeric text is parsed
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            Value::Int(value) => Some(*value),
            Value::Float(value) if value.fract() == 0.0 => Some(*value as i64),
            Value::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Cursor over rows already held in memory
#[derive(Debug, Clone, Default)]
pub struct BufferedRows {
    rows: VecDeque<Row>,
}

impl BufferedRows {
    pub fn new(rows: impl IntoIterator<Item = Row>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }
}

impl RowCursor for BufferedRows {
    fn next_row(&mut self) -> Result<Option<Row>, GatewayError> {
        Ok(self.rows.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_lookup_falls_back_to_case_insensitive() {
        let row = Row::new().with("COLUMN_NAME", "ID").with("max_value", 41i64);
        assert_eq!(row.get_str("column_name"), Some("ID"));
        assert_eq!(row.get_i64("MAX_VALUE"), Some(41));
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn test_numeric_text_parses_as_integer() {
        let row = Row::new()
            .with("a", "  17 ")
            .with("b", Value::Float(3.0))
            .with("c", Value::Float(3.5))
            .with("d", Value::Null);
        assert_eq!(row.get_i64("a"), Some(17));
        assert_eq!(row.get_i64("b"), Some(3));
        assert_eq!(row.get_i64("c"), None);
        assert_eq!(row.get_i64("d"), None);
    }

    #[test]
    fn test_buffered_rows_drain_in_order() {
        let mut cursor = BufferedRows::new(vec![
            Row::new().with("n", 1i64),
            Row::new().with("n", 2i64),
        ]);
        assert_eq!(cursor.next_row().unwrap().unwrap().get_i64("n"), Some(1));
        assert_eq!(cursor.next_row().unwrap().unwrap().get_i64("n"), Some(2));
        assert!(cursor.next_row().unwrap().is_none());
    }
}
