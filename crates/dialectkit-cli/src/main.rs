//! dialectkit CLI - vendor-specific SQL from canonical column definitions

mod args;
mod columns;
mod config;
mod output;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use dialectkit_core::dialect::UNKNOWN_TYPE_MARKER;
use dialectkit_core::{DialectError, DialectProfile, DialectRegistry, KeyColumns};
use miette::Result;

use crate::args::{Args, Command, DdlOperation, ProfileArgs, SequenceAction};
use crate::config::Config;
use crate::output::{GeneratedStatement, OutputFormatter};

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let level = if args.quiet {
        tracing::Level::ERROR
    } else {
        match args.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(has_warnings) => {
            if has_warnings {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<bool> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::find_and_load()?.unwrap_or_default(),
    };
    let formatter = OutputFormatter::new(config.output_format(args.format), args.quiet);
    let registry = DialectRegistry::with_builtins();

    match args.command {
        Command::Vendors => {
            let vendors = registry
                .vendors()
                .map(|tag| -> Result<(String, &'static str)> {
                    let profile = registry.create(tag, &Default::default())?;
                    Ok((tag.to_string(), profile.name()))
                })
                .collect::<Result<Vec<_>>>()?;
            formatter.print_vendors(&vendors)?;
            Ok(false)
        }

        Command::Capabilities { profile } => {
            let (_, profile) = resolve_profile(&registry, config, &profile)?;
            formatter.print_capabilities(profile.as_ref())?;
            Ok(false)
        }

        Command::Ddl {
            files,
            table,
            schema,
            op,
            technical_key,
            primary_key,
            auto_increment,
            verify,
            profile,
        } => {
            let config = config.merge_keys(&technical_key, &primary_key, auto_increment);
            let (config, profile) = resolve_profile(&registry, config, &profile)?;
            let keys = KeyColumns {
                technical_key: config.technical_key.as_deref(),
                primary_key: config.primary_key.as_deref(),
                auto_increment: config.auto_increment,
            };

            let column_files = columns::expand_patterns(&files)?;
            if column_files.is_empty() {
                miette::bail!("No column files matched {:?}", files);
            }

            let qualified = profile.quoted_schema_table(schema.as_deref(), &table);
            let mut statements = Vec::new();
            for path in &column_files {
                for column in columns::load_columns(path)? {
                    let sql = match op {
                        DdlOperation::Add => {
                            profile.add_column_statement(&qualified, &column, &keys)
                        }
                        DdlOperation::Modify => {
                            profile.modify_column_statement(&qualified, &column, &keys)
                        }
                        DdlOperation::Drop => {
                            profile.drop_column_statement(&qualified, &column, &keys)
                        }
                    };

                    let mut warnings = Vec::new();
                    if op != DdlOperation::Drop
                        && profile.field_definition(&column, &keys, false, false)
                            == UNKNOWN_TYPE_MARKER
                    {
                        warnings.push(format!(
                            "column {} has type '{}' with no SQL mapping",
                            column.name, column.logical_type
                        ));
                    }
                    if verify {
                        if let Err(e) = sqlparser::parser::Parser::parse_sql(
                            profile.parser_dialect().as_ref(),
                            &sql,
                        ) {
                            warnings.push(format!("{} does not parse: {}", profile.name(), e));
                        }
                    }

                    statements.push(GeneratedStatement {
                        column: column.name,
                        sql,
                        warnings,
                    });
                }
            }

            tracing::info!(count = statements.len(), table = %qualified, "generated statements");
            formatter.print_statements(&qualified, &statements)?;
            Ok(statements.iter().any(|s| !s.warnings.is_empty()))
        }

        Command::Quote {
            value,
            identifier,
            profile,
        } => {
            let (_, profile) = resolve_profile(&registry, config, &profile)?;
            let quoted = if identifier {
                profile.quote_field(&value)
            } else {
                profile.quote_string_literal(&value)
            };
            formatter.print_value("quoted", &quoted)?;
            Ok(false)
        }

        Command::Url {
            host,
            port,
            database,
            profile,
        } => {
            let (_, profile) = resolve_profile(&registry, config, &profile)?;
            let port = port
                .or_else(|| {
                    profile
                        .default_port(dialectkit_core::AccessMode::Native)
                        .map(|p| p.to_string())
                })
                .unwrap_or_default();
            formatter.print_value("url", &profile.connection_url(&host, &port, &database))?;
            Ok(false)
        }

        Command::Sequence {
            action,
            name,
            profile,
        } => {
            let (_, profile) = resolve_profile(&registry, config, &profile)?;
            let sql = match (action, name.as_deref()) {
                (SequenceAction::List, _) => profile.list_sequences_sql(),
                (SequenceAction::Next, Some(name)) => profile.next_sequence_value_sql(name),
                (SequenceAction::Current, Some(name)) => profile.current_sequence_value_sql(name),
                (SequenceAction::Exists, Some(name)) => profile.sequence_exists_sql(name),
                (_, None) => miette::bail!("a sequence name is required for {:?}", action),
            };
            let sql = sql.ok_or(DialectError::Unsupported {
                vendor: profile.name(),
                capability: "sequences",
            })?;
            formatter.print_value("sql", &sql)?;
            Ok(false)
        }

        Command::Lock { tables, profile } => {
            let (_, profile) = resolve_profile(&registry, config, &profile)?;
            let names: Vec<&str> = tables.iter().map(String::as_str).collect();
            let lock = profile.lock_tables_statement(&names).ok_or(DialectError::Unsupported {
                vendor: profile.name(),
                capability: "explicit table locks",
            })?;
            let mut values = vec![("lock", lock)];
            if let Some(unlock) = profile.unlock_tables_statement(&names) {
                values.push(("unlock", unlock));
            }
            formatter.print_values(&values)?;
            Ok(false)
        }
    }
}

/// Merge CLI profile arguments into the config and build the vendor profile
fn resolve_profile(
    registry: &DialectRegistry,
    config: Config,
    profile: &ProfileArgs,
) -> Result<(Config, Arc<dyn DialectProfile>)> {
    let config = config.merge_with_args(profile);
    let profile = registry.create(config.vendor_or_default(), &config.attributes)?;
    tracing::debug!(vendor = profile.name(), "using dialect profile");
    Ok((config, profile))
}
