//! Output formatting

use dialectkit_core::{DialectCapabilities, DialectProfile};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::args::OutputFormat;

/// A generated statement with anything worth flagging about it
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedStatement {
    pub column: String,
    pub sql: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
struct CapabilityReport<'a> {
    vendor: &'a str,
    identifier_quotes: [&'a str; 2],
    schema_table_separator: &'a str,
    #[serde(flatten)]
    capabilities: &'a DialectCapabilities,
}

/// Output formatter for command results
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Print generated statements, warnings to stderr in human mode
    pub fn print_statements(&self, table: &str, statements: &[GeneratedStatement]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                for statement in statements {
                    for warning in &statement.warnings {
                        eprintln!("\x1b[33mwarning\x1b[0m: {}", warning);
                    }
                    println!("{};", statement.sql);
                }
                if !self.quiet {
                    let warnings: usize = statements.iter().map(|s| s.warnings.len()).sum();
                    eprintln!(
                        "Generated {} statement(s) for {} with {} warning(s)",
                        statements.len(),
                        table,
                        warnings
                    );
                }
                Ok(())
            }
            OutputFormat::Json => print_json(&serde_json::json!({
                "table": table,
                "statements": statements,
            })),
        }
    }

    pub fn print_capabilities(&self, profile: &dyn DialectProfile) -> Result<()> {
        let (open, close) = profile.identifier_quotes();
        let report = CapabilityReport {
            vendor: profile.name(),
            identifier_quotes: [open, close],
            schema_table_separator: profile.schema_table_separator(),
            capabilities: profile.capabilities(),
        };

        match self.format {
            OutputFormat::Human => {
                let caps = report.capabilities;
                println!("{}", report.vendor);
                println!("{}", "=".repeat(report.vendor.len()));
                let flags = [
                    ("catalogs", caps.supports_catalogs),
                    ("schemas", caps.supports_schemas),
                    ("sequences", caps.supports_sequences),
                    ("sequences without max value", caps.supports_sequence_no_max_value),
                    ("bitmap indexes", caps.supports_bitmap_index),
                    ("synonyms", caps.supports_synonyms),
                    ("boolean type", caps.supports_boolean_type),
                    ("batch error handling", caps.supports_error_handling_on_batch_updates),
                    ("savepoints", caps.supports_savepoints),
                ];
                for (label, supported) in flags {
                    let mark = if supported {
                        "\x1b[32myes\x1b[0m"
                    } else {
                        "\x1b[31mno\x1b[0m"
                    };
                    println!("  {:<28} {}", label, mark);
                }
                println!("  {:<28} {}", "max inline varchar", caps.max_inline_varchar_length);
                println!("  {:<28} {}{}", "identifier quotes", open, close);
                println!("  {:<28} {}", "schema separator", report.schema_table_separator);
                for mode in caps.supported_access_modes() {
                    let port = caps
                        .default_port(mode)
                        .map_or_else(|| "-".to_string(), |p| p.to_string());
                    println!("  {:<28} {}", format!("port ({:?})", mode).to_lowercase(), port);
                }
                Ok(())
            }
            OutputFormat::Json => print_json(&report),
        }
    }

    pub fn print_vendors(&self, vendors: &[(String, &'static str)]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                for (tag, name) in vendors {
                    println!("{:<12} {}", tag, name);
                }
                Ok(())
            }
            OutputFormat::Json => {
                let list: Vec<_> = vendors
                    .iter()
                    .map(|(tag, name)| serde_json::json!({ "tag": tag, "name": name }))
                    .collect();
                print_json(&list)
            }
        }
    }

    /// Print a single named result (a URL, a quoted value, a query)
    pub fn print_value(&self, label: &str, value: &str) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("{}", value);
                Ok(())
            }
            OutputFormat::Json => print_json(&serde_json::json!({ label: value })),
        }
    }

    /// Print several named results in order
    pub fn print_values(&self, values: &[(&str, String)]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                for (_, value) in values {
                    println!("{}", value);
                }
                Ok(())
            }
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = values
                    .iter()
                    .map(|(label, value)| {
                        (label.to_string(), serde_json::Value::from(value.as_str()))
                    })
                    .collect();
                print_json(&map)
            }
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}
