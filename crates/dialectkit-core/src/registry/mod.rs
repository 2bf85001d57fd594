//! Vendor tag to profile lookup

use std::sync::Arc;

use indexmap::IndexMap;

use crate::dialect::{Attributes, DialectProfile, Vendor};
use crate::error::{DialectError, Result};

/// Builds a configured profile from connection attributes
pub type ProfileConstructor = fn(&Attributes) -> Arc<dyn DialectProfile>;

/// Maps vendor tags to profile constructors, in registration order
#[derive(Clone)]
pub struct DialectRegistry {
    constructors: IndexMap<String, ProfileConstructor>,
}

impl DialectRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            constructors: IndexMap::new(),
        }
    }

    /// A registry holding every built-in vendor
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Vendor::MsSql.tag(), |attrs| Vendor::MsSql.profile(attrs));
        registry.register(Vendor::PostgreSql.tag(), |attrs| {
            Vendor::PostgreSql.profile(attrs)
        });
        registry.register(Vendor::MySql.tag(), |attrs| Vendor::MySql.profile(attrs));
        registry.register(Vendor::Generic.tag(), |attrs| Vendor::Generic.profile(attrs));
        registry
    }

    /// Register (or replace) the constructor for a tag
    pub fn register(&mut self, tag: &str, constructor: ProfileConstructor) {
        self.constructors.insert(tag.to_lowercase(), constructor);
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.lookup(tag).is_some()
    }

    /// Registered tags, in registration order
    pub fn vendors(&self) -> impl Iterator<Item = &str> + '_ {
        self.constructors.keys().map(String::as_str)
    }

    /// Build the profile registered under `tag`.
    ///
    /// Tags are matched case-insensitively; built-in aliases such as
    /// `sqlserver` or `pg` resolve to their vendor's tag.
    pub fn create(&self, tag: &str, attributes: &Attributes) -> Result<Arc<dyn DialectProfile>> {
        let constructor = self
            .lookup(tag)
            .ok_or_else(|| DialectError::UnknownVendor {
                name: tag.to_string(),
            })?;
        let profile = constructor(attributes);
        tracing::debug!(tag, vendor = profile.name(), "created dialect profile");
        Ok(profile)
    }

    fn lookup(&self, tag: &str) -> Option<ProfileConstructor> {
        let key = tag.trim().to_lowercase();
        if let Some(constructor) = self.constructors.get(&key) {
            return Some(*constructor);
        }
        let vendor: Vendor = key.parse().ok()?;
        self.constructors.get(vendor.tag()).copied()
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for DialectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialectRegistry")
            .field("vendors", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}
