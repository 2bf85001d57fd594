//! Error types

use miette::Diagnostic;
use thiserror::Error;

use crate::gateway::GatewayError;

/// Result type for dialect operations
pub type Result<T> = std::result::Result<T, DialectError>;

/// Errors raised by the registry and the introspection operations.
///
/// Statement generators never fail; everything here comes from vendor lookup
/// or from talking to a live connection.
#[derive(Debug, Error, Diagnostic)]
pub enum DialectError {
    /// No profile constructor is registered under the requested tag
    #[error("unknown database vendor '{name}'")]
    #[diagnostic(
        code(dialect::unknown_vendor),
        help(
            "use one of the built-in vendors (mssql, postgresql, mysql, generic) \
             or register a constructor"
        )
    )]
    UnknownVendor { name: String },

    /// A capability-gated operation was requested from a profile without it
    #[error("{vendor} does not support {capability}")]
    #[diagnostic(code(dialect::unsupported))]
    Unsupported {
        vendor: &'static str,
        capability: &'static str,
    },

    /// The gateway failed while querying or locking a table
    #[error("unable to {action} on table [{table}]")]
    #[diagnostic(code(dialect::database_access))]
    DatabaseAccess {
        action: &'static str,
        table: String,
        #[source]
        source: GatewayError,
    },

    /// The locked operation failed and releasing the lock failed as well
    #[error("{source}; releasing the lock on [{table}] after {action} also failed: {cleanup}")]
    #[diagnostic(code(dialect::cleanup_failed))]
    CleanupFailed {
        /// Operation that ran while the lock was held
        action: &'static str,
        table: String,
        #[source]
        source: Box<DialectError>,
        cleanup: GatewayError,
    },

    /// A row came back but did not carry the expected value
    #[error("unexpected row while reading {table}: {detail}")]
    #[diagnostic(code(dialect::unexpected_row))]
    UnexpectedRow { table: String, detail: String },
}

impl DialectError {
    pub(crate) fn access(
        action: &'static str,
        table: impl Into<String>,
        source: GatewayError,
    ) -> Self {
        DialectError::DatabaseAccess {
            action,
            table: table.into(),
            source,
        }
    }

    /// Table the failing operation was working on, if any
    pub fn table(&self) -> Option<&str> {
        match self {
            DialectError::DatabaseAccess { table, .. }
            | DialectError::CleanupFailed { table, .. }
            | DialectError::UnexpectedRow { table, .. } => Some(table),
            DialectError::UnknownVendor { .. } | DialectError::Unsupported { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_error_carries_table() {
        let err = DialectError::access(
            "check index",
            "dbo.ORDERS",
            GatewayError::Query("timeout".to_string()),
        );
        assert_eq!(err.table(), Some("dbo.ORDERS"));
        assert_eq!(err.to_string(), "unable to check index on table [dbo.ORDERS]");
    }

    #[test]
    fn test_cleanup_error_mentions_both_failures() {
        let original = DialectError::access(
            "read max value",
            "T",
            GatewayError::Query("read failed".to_string()),
        );
        let err = DialectError::CleanupFailed {
            action: "read max value",
            table: "T".to_string(),
            source: Box::new(original),
            cleanup: GatewayError::Lock("unlock failed".to_string()),
        };
        let message = err.to_string();
        assert!(message.contains("unable to read max value on table [T]"));
        assert!(message.contains("unlock failed"));
        assert!(message.contains("after read max value also failed"));
        assert_eq!(err.table(), Some("T"));
    }
}
