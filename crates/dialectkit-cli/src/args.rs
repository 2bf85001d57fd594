//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "dialectkit")]
#[command(author, version, about = "Vendor-specific SQL from canonical column definitions")]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to the nearest dialectkit.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Vendor and connection attributes shared by every profile-backed command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    /// Database vendor (mssql, postgresql, mysql, generic or an alias)
    #[arg(short = 'd', long)]
    pub vendor: Option<String>,

    /// Connection attribute, repeatable
    #[arg(short = 'a', long = "attr", value_name = "KEY=VALUE", value_parser = parse_attribute)]
    pub attributes: Vec<(String, String)>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List registered vendors
    Vendors,

    /// Show what a vendor supports
    Capabilities {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Generate ALTER TABLE statements from column definition files
    Ddl {
        /// Column definition files (supports glob patterns)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Target table
        #[arg(short, long)]
        table: String,

        /// Schema of the target table
        #[arg(short, long)]
        schema: Option<String>,

        /// Statement to generate for each column
        #[arg(long, default_value = "add", value_enum)]
        op: DdlOperation,

        /// Technical (surrogate) key column
        #[arg(long = "tk", value_name = "COLUMN")]
        technical_key: Option<String>,

        /// Primary key column
        #[arg(long = "pk", value_name = "COLUMN")]
        primary_key: Option<String>,

        /// Append the vendor's auto-increment clause to key columns
        #[arg(long)]
        auto_increment: bool,

        /// Parse every generated statement with the vendor's SQL parser
        #[arg(long)]
        verify: bool,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Quote a value as a string literal or an identifier
    Quote {
        value: String,

        /// Quote as an identifier instead of a string literal
        #[arg(short, long)]
        identifier: bool,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Build a connection URL
    Url {
        #[arg(long, default_value = "localhost")]
        host: String,

        /// Port; the vendor default is used when omitted
        #[arg(long)]
        port: Option<String>,

        #[arg(long)]
        database: String,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Generate sequence queries
    Sequence {
        #[arg(value_enum)]
        action: SequenceAction,

        /// Sequence name (not needed for `list`)
        name: Option<String>,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Generate the statements that lock and release tables
    Lock {
        #[arg(required = true)]
        tables: Vec<String>,

        #[command(flatten)]
        profile: ProfileArgs,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DdlOperation {
    Add,
    Modify,
    Drop,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SequenceAction {
    Next,
    Current,
    Exists,
    List,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable output with colors
    #[default]
    Human,
    /// JSON output
    Json,
}

/// Parse a `KEY=VALUE` attribute
fn parse_attribute(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid attribute '{}': expected KEY=VALUE", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid attribute '{}': empty key", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
