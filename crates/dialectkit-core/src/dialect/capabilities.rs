//! Per-vendor capability flags

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How the engine reaches the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    Native,
    Jndi,
    Odbc,
    Other,
}

/// What a vendor's SQL dialect supports.
///
/// Fixed when the profile is built; the rest of the engine consults these
/// flags instead of special-casing vendors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectCapabilities {
    pub supports_catalogs: bool,
    pub supports_schemas: bool,
    pub supports_sequences: bool,
    pub supports_sequence_no_max_value: bool,
    pub supports_bitmap_index: bool,
    pub supports_synonyms: bool,
    pub supports_boolean_type: bool,
    pub supports_error_handling_on_batch_updates: bool,
    pub supports_savepoints: bool,
    /// Strings shorter than this are emitted inline as VARCHAR
    pub max_inline_varchar_length: i32,
    /// Supported access modes and their default port (`None` = not applicable)
    pub default_ports: IndexMap<AccessMode, Option<u16>>,
}

impl DialectCapabilities {
    pub fn default_port(&self, mode: AccessMode) -> Option<u16> {
        self.default_ports.get(&mode).copied().flatten()
    }

    pub fn supports_access_mode(&self, mode: AccessMode) -> bool {
        self.default_ports.contains_key(&mode)
    }

    pub fn supported_access_modes(&self) -> impl Iterator<Item = AccessMode> + '_ {
        self.default_ports.keys().copied()
    }
}

impl Default for DialectCapabilities {
    fn default() -> Self {
        Self {
            supports_catalogs: true,
            supports_schemas: true,
            supports_sequences: false,
            supports_sequence_no_max_value: false,
            supports_bitmap_index: false,
            supports_synonyms: false,
            supports_boolean_type: false,
            supports_error_handling_on_batch_updates: true,
            supports_savepoints: true,
            max_inline_varchar_length: 9_999_999,
            default_ports: IndexMap::from([
                (AccessMode::Native, None),
                (AccessMode::Odbc, None),
                (AccessMode::Jndi, None),
            ]),
        }
    }
}
