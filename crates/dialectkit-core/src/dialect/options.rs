//! Connection attributes and the options every profile shares

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::Serialize;

/// Raw string-keyed connection attributes, as stored with a connection
pub type Attributes = IndexMap<String, String>;

pub const SUPPORTS_BOOLEAN_DATA_TYPE: &str = "SUPPORTS_BOOLEAN_DATA_TYPE";
pub const QUOTE_ALL_FIELDS: &str = "QUOTE_ALL_FIELDS";
pub const FORCE_IDENTIFIERS_TO_LOWERCASE: &str = "FORCE_IDENTIFIERS_TO_LOWERCASE";
pub const FORCE_IDENTIFIERS_TO_UPPERCASE: &str = "FORCE_IDENTIFIERS_TO_UPPERCASE";

/// Options recognized by every vendor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommonOptions {
    /// Overrides the vendor's boolean-type capability when set
    pub supports_boolean_data_type: Option<bool>,
    pub quote_all_fields: bool,
    pub force_identifiers_to_lowercase: bool,
    pub force_identifiers_to_uppercase: bool,
}

impl CommonOptions {
    pub const KEYS: &'static [&'static str] = &[
        SUPPORTS_BOOLEAN_DATA_TYPE,
        QUOTE_ALL_FIELDS,
        FORCE_IDENTIFIERS_TO_LOWERCASE,
        FORCE_IDENTIFIERS_TO_UPPERCASE,
    ];

    pub fn from_attributes(attributes: &Attributes) -> Self {
        Self {
            supports_boolean_data_type: flag(attributes, SUPPORTS_BOOLEAN_DATA_TYPE),
            quote_all_fields: flag(attributes, QUOTE_ALL_FIELDS).unwrap_or(false),
            force_identifiers_to_lowercase: flag(attributes, FORCE_IDENTIFIERS_TO_LOWERCASE)
                .unwrap_or(false),
            force_identifiers_to_uppercase: flag(attributes, FORCE_IDENTIFIERS_TO_UPPERCASE)
                .unwrap_or(false),
        }
    }

    /// Apply the forced identifier case, lowercase taking precedence
    pub fn fold_case<'a>(&self, identifier: &'a str) -> Cow<'a, str> {
        if self.force_identifiers_to_lowercase {
            Cow::Owned(identifier.to_lowercase())
        } else if self.force_identifiers_to_uppercase {
            Cow::Owned(identifier.to_uppercase())
        } else {
            Cow::Borrowed(identifier)
        }
    }
}

/// Attribute value by key, matched case-insensitively
pub fn attribute<'a>(attributes: &'a Attributes, key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.as_str())
}

/// Boolean attribute; `None` when the key is absent
pub fn flag(attributes: &Attributes, key: &str) -> Option<bool> {
    attribute(attributes, key).map(parse_flag)
}

/// `Y`, `YES`, `TRUE` and `1` are true, case-insensitively; everything else is false
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_uppercase().as_str(),
        "Y" | "YES" | "TRUE" | "1"
    )
}

/// Log attributes a vendor does not recognize; they are otherwise ignored
pub(crate) fn trace_ignored(vendor: &str, attributes: &Attributes, recognized: &[&str]) {
    for key in attributes.keys() {
        let known = CommonOptions::KEYS
            .iter()
            .chain(recognized)
            .any(|k| k.eq_ignore_ascii_case(key));
        if !known {
            tracing::debug!(vendor, attribute = %key, "ignoring unrecognized connection attribute");
        }
    }
}
