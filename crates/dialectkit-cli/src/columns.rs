//! Column definition files

use std::path::{Path, PathBuf};

use dialectkit_core::CanonicalColumn;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Deserialize;

/// A TOML file holding `[[columns]]` tables
#[derive(Debug, Deserialize)]
struct ColumnFile {
    #[serde(default)]
    columns: Vec<CanonicalColumn>,
}

/// Expand glob patterns; plain paths are kept as given
pub fn expand_patterns(patterns: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let pattern_str = pattern.display().to_string();
        if pattern_str.contains('*') || pattern_str.contains('?') {
            for path in glob::glob(&pattern_str).into_diagnostic()?.flatten() {
                files.push(path);
            }
        } else {
            files.push(pattern.clone());
        }
    }
    Ok(files)
}

pub fn load_columns(path: &Path) -> Result<Vec<CanonicalColumn>> {
    let contents = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    parse_columns(&contents).wrap_err_with(|| format!("invalid column file {}", path.display()))
}

fn parse_columns(contents: &str) -> Result<Vec<CanonicalColumn>> {
    let file: ColumnFile = toml::from_str(contents).into_diagnostic()?;
    Ok(file.columns)
}
