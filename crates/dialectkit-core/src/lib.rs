//! dialectkit-core: SQL dialect abstraction library
//!
//! This library turns vendor-neutral column descriptions into vendor-specific
//! DDL, identifiers and literals, and provides the two lock-aware catalog
//! operations that need a live connection.

pub mod dialect;
pub mod error;
pub mod gateway;
pub mod introspection;
pub mod registry;
pub mod types;

pub use dialect::{AccessMode, Attributes, DialectCapabilities, DialectProfile, Vendor};
pub use error::{DialectError, Result};
pub use gateway::{ConnectionGateway, GatewayError, Row, RowCursor, Value};
pub use introspection::{index_exists, next_batch_id_with_lock};
pub use registry::DialectRegistry;
pub use types::{CanonicalColumn, KeyColumns, LogicalType};
