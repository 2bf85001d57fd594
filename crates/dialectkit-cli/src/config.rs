//! Configuration file handling

use std::path::{Path, PathBuf};

use dialectkit_core::dialect::Attributes;
use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};

use crate::args::{OutputFormat, ProfileArgs};

pub const CONFIG_FILE_NAME: &str = "dialectkit.toml";

/// Configuration for dialectkit
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Database vendor tag or alias
    #[serde(default)]
    pub vendor: Option<String>,

    /// Connection attributes passed to the vendor profile
    #[serde(default)]
    pub attributes: Attributes,

    /// Technical (surrogate) key column
    #[serde(default)]
    pub technical_key: Option<String>,

    /// Primary key column
    #[serde(default)]
    pub primary_key: Option<String>,

    /// Append the auto-increment clause to key columns
    #[serde(default)]
    pub auto_increment: bool,

    /// Output format (human, json)
    #[serde(default)]
    pub format: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).into_diagnostic()?;
        let config: Config = toml::from_str(&contents).into_diagnostic()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Try to find and load dialectkit.toml in current directory or parent directories
    pub fn find_and_load() -> Result<Option<Self>> {
        let current_dir = std::env::current_dir().into_diagnostic()?;
        match Self::find_from(current_dir) {
            Some(path) => Ok(Some(Self::from_file(&path)?)),
            None => Ok(None),
        }
    }

    fn find_from(mut dir: PathBuf) -> Option<PathBuf> {
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }

            // Try parent directory
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Merge CLI arguments into configuration
    /// CLI arguments take precedence over config file values
    pub fn merge_with_args(mut self, profile: &ProfileArgs) -> Self {
        if profile.vendor.is_some() {
            self.vendor = profile.vendor.clone();
        }

        for (key, value) in &profile.attributes {
            // Replace a file entry that differs only in case
            if let Some(existing) = self
                .attributes
                .keys()
                .find(|k| k.eq_ignore_ascii_case(key))
                .cloned()
            {
                self.attributes.shift_remove(&existing);
            }
            self.attributes.insert(key.clone(), value.clone());
        }

        self
    }

    /// Merge key-column flags; `auto_increment` can only be switched on from the CLI
    pub fn merge_keys(
        mut self,
        technical_key: &Option<String>,
        primary_key: &Option<String>,
        auto_increment: bool,
    ) -> Self {
        if technical_key.is_some() {
            self.technical_key = technical_key.clone();
        }
        if primary_key.is_some() {
            self.primary_key = primary_key.clone();
        }
        self.auto_increment |= auto_increment;
        self
    }

    /// Vendor to use, falling back to SQL Server
    pub fn vendor_or_default(&self) -> &str {
        self.vendor.as_deref().unwrap_or("mssql")
    }

    /// Output format: CLI flag, then config file, then human
    pub fn output_format(&self, cli: Option<OutputFormat>) -> OutputFormat {
        if let Some(format) = cli {
            return format;
        }
        match self.format.as_deref() {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_file() {
        let config: Config = toml::from_str(
            r#"
            vendor = "postgresql"
            technical_key = "ID"
            auto_increment = true

            [attributes]
            QUOTE_ALL_FIELDS = "Y"
            "#,
        )
        .unwrap();
        assert_eq!(config.vendor_or_default(), "postgresql");
        assert_eq!(config.technical_key.as_deref(), Some("ID"));
        assert!(config.auto_increment);
        assert_eq!(
            config.attributes.get("QUOTE_ALL_FIELDS").map(String::as_str),
            Some("Y")
        );
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = Config {
            vendor: Some("mysql".to_string()),
            ..Config::default()
        };
        config
            .attributes
            .insert("double_decimal_separator".to_string(), "N".to_string());

        let args = ProfileArgs {
            vendor: Some("mssql".to_string()),
            attributes: vec![("DOUBLE_DECIMAL_SEPARATOR".to_string(), "Y".to_string())],
        };
        let config = config
            .merge_with_args(&args)
            .merge_keys(&None, &Some("CODE".to_string()), false);

        assert_eq!(config.vendor_or_default(), "mssql");
        assert_eq!(config.attributes.len(), 1);
        assert_eq!(
            config.attributes.get("DOUBLE_DECIMAL_SEPARATOR").map(String::as_str),
            Some("Y")
        );
        assert_eq!(config.primary_key.as_deref(), Some("CODE"));
        assert!(config.technical_key.is_none());
    }

    #[test]
    fn test_output_format_precedence() {
        let config = Config {
            format: Some("json".to_string()),
            ..Config::default()
        };
        assert_eq!(config.output_format(None), OutputFormat::Json);
        assert_eq!(
            config.output_format(Some(OutputFormat::Human)),
            OutputFormat::Human
        );
        assert_eq!(Config::default().output_format(None), OutputFormat::Human);
    }
}
