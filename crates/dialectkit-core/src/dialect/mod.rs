//! SQL dialect profiles
//!
//! A [`DialectProfile`] turns vendor-neutral column and table descriptions
//! into vendor-specific SQL text and reports what the vendor supports. Shared
//! behavior lives in default methods that delegate to [`typemap`] and
//! [`literal`]; each vendor overrides tokens, capabilities and the few
//! statements whose syntax differs.

mod capabilities;
mod generic;
pub mod literal;
mod mssql;
mod mysql;
pub mod options;
mod postgres;
pub mod typemap;

use std::str::FromStr;
use std::sync::Arc;

use sqlparser::dialect::{Dialect, GenericDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect};

use crate::types::{CanonicalColumn, KeyColumns};

pub use capabilities::{AccessMode, DialectCapabilities};
pub use generic::{GenericConfig, GenericProfile};
pub use literal::{LineBreaks, LiteralStyle};
pub use mssql::{MsSqlConfig, MsSqlProfile};
pub use mysql::MySqlProfile;
pub use options::{Attributes, CommonOptions};
pub use postgres::PostgresProfile;
pub use typemap::{TypeTokens, UNKNOWN_TYPE_MARKER};

/// Column alias carrying indexed column names in [`DialectProfile::index_columns_sql`]
pub const INDEX_COLUMN_ALIAS: &str = "column_name";

/// Column alias carrying the current maximum in [`DialectProfile::max_value_sql`]
pub const MAX_VALUE_ALIAS: &str = "max_value";

/// Built-in database vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Vendor {
    #[default]
    MsSql,
    PostgreSql,
    MySql,
    Generic,
}

impl Vendor {
    pub const ALL: [Vendor; 4] = [
        Vendor::MsSql,
        Vendor::PostgreSql,
        Vendor::MySql,
        Vendor::Generic,
    ];

    /// Registry tag for this vendor
    pub fn tag(&self) -> &'static str {
        match self {
            Vendor::MsSql => "mssql",
            Vendor::PostgreSql => "postgresql",
            Vendor::MySql => "mysql",
            Vendor::Generic => "generic",
        }
    }

    /// Get the sqlparser dialect for parsing generated statements
    pub fn parser_dialect(&self) -> Box<dyn Dialect> {
        match self {
            Vendor::MsSql => Box::new(MsSqlDialect {}),
            Vendor::PostgreSql => Box::new(PostgreSqlDialect {}),
            Vendor::MySql => Box::new(MySqlDialect {}),
            Vendor::Generic => Box::new(GenericDialect {}),
        }
    }

    /// Build this vendor's profile from connection attributes
    pub fn profile(&self, attributes: &Attributes) -> Arc<dyn DialectProfile> {
        match self {
            Vendor::MsSql => Arc::new(MsSqlProfile::new(MsSqlConfig::from_attributes(attributes))),
            Vendor::PostgreSql => Arc::new(PostgresProfile::from_attributes(attributes)),
            Vendor::MySql => Arc::new(MySqlProfile::from_attributes(attributes)),
            Vendor::Generic => {
                Arc::new(GenericProfile::new(GenericConfig::from_attributes(attributes)))
            }
        }
    }
}

impl FromStr for Vendor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mssql" | "sqlserver" | "sql-server" | "mssqlnative" | "tsql" => Ok(Vendor::MsSql),
            "postgresql" | "postgres" | "pg" => Ok(Vendor::PostgreSql),
            "mysql" | "mysql8" | "mariadb" => Ok(Vendor::MySql),
            "generic" | "ansi" | "odbc" => Ok(Vendor::Generic),
            _ => Err(format!(
                "Unknown vendor: '{}'. Supported vendors: mssql, postgresql, mysql, generic.",
                s
            )),
        }
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Per-vendor SQL generation contract.
///
/// Every method is a pure function of its arguments and the profile's fixed
/// capabilities and options, so a configured profile can be shared freely
/// across threads. Methods returning `Option` yield `None` when the vendor
/// lacks the capability; they never emit SQL the capabilities deny.
pub trait DialectProfile: Send + Sync + std::fmt::Debug {
    /// Human-readable vendor name
    fn name(&self) -> &'static str;

    fn capabilities(&self) -> &DialectCapabilities;

    fn options(&self) -> &CommonOptions;

    fn type_tokens(&self) -> &TypeTokens;

    fn literal_style(&self) -> LiteralStyle {
        LiteralStyle::STANDARD
    }

    /// Opening and closing identifier quote
    fn identifier_quotes(&self) -> (&'static str, &'static str) {
        ("\"", "\"")
    }

    fn reserved_words(&self) -> &'static [&'static str];

    /// sqlparser dialect used to syntax-check generated statements
    fn parser_dialect(&self) -> Box<dyn Dialect> {
        Box::new(GenericDialect {})
    }

    /// Vendor connection URL; the port segment is left out when `port` is empty
    fn connection_url(&self, host: &str, port: &str, database: &str) -> String;

    fn default_port(&self, mode: AccessMode) -> Option<u16> {
        self.capabilities().default_port(mode)
    }

    fn schema_table_separator(&self) -> &'static str {
        "."
    }

    /// Join already-quoted schema and table parts
    fn combine_schema_and_table(&self, schema: &str, table: &str) -> String {
        format!("{}{}{}", schema, self.schema_table_separator(), table)
    }

    /// Unconditionally quote an identifier, doubling embedded closing quotes
    fn quote_identifier(&self, name: &str) -> String {
        let (start, end) = self.identifier_quotes();
        let doubled = format!("{end}{end}");
        format!("{}{}{}", start, name.replace(end, &doubled), end)
    }

    /// Quote an identifier only when it needs it
    fn quote_field(&self, name: &str) -> String {
        if name.is_empty() {
            return String::new();
        }
        let (start, end) = self.identifier_quotes();
        if name.len() > start.len() + end.len() && name.starts_with(start) && name.ends_with(end) {
            return name.to_string();
        }

        let name = self.options().fold_case(name);
        if self.options().quote_all_fields
            || self.is_reserved_word(&name)
            || !is_plain_identifier(&name)
        {
            self.quote_identifier(&name)
        } else {
            name.into_owned()
        }
    }

    /// Quoted `schema.table`, or just the table when no schema is given
    fn quoted_schema_table(&self, schema: Option<&str>, table: &str) -> String {
        match non_empty(schema) {
            Some(schema) => {
                self.combine_schema_and_table(&self.quote_field(schema), &self.quote_field(table))
            }
            None => self.quote_field(table),
        }
    }

    fn field_definition(
        &self,
        column: &CanonicalColumn,
        keys: &KeyColumns<'_>,
        include_name: bool,
        line_break: bool,
    ) -> String {
        typemap::field_definition(
            self.type_tokens(),
            self.capabilities(),
            column,
            keys,
            include_name,
            line_break,
        )
    }

    fn add_column_statement(
        &self,
        table: &str,
        column: &CanonicalColumn,
        keys: &KeyColumns<'_>,
    ) -> String {
        format!(
            "ALTER TABLE {} ADD {}",
            table,
            self.field_definition(column, keys, true, false)
        )
    }

    fn modify_column_statement(
        &self,
        table: &str,
        column: &CanonicalColumn,
        keys: &KeyColumns<'_>,
    ) -> String {
        format!(
            "ALTER TABLE {} MODIFY {}",
            table,
            self.field_definition(column, keys, true, false)
        )
    }

    fn drop_column_statement(
        &self,
        table: &str,
        column: &CanonicalColumn,
        _keys: &KeyColumns<'_>,
    ) -> String {
        format!("ALTER TABLE {} DROP COLUMN {}", table, column.name)
    }

    /// Query returning the table's fields and at most one row
    fn query_fields_sql(&self, table: &str) -> String {
        format!("SELECT * FROM {} LIMIT 1", table)
    }

    fn table_exists_sql(&self, table: &str) -> String {
        self.query_fields_sql(table)
    }

    fn column_exists_sql(&self, column: &str, table: &str) -> String {
        format!("SELECT {} FROM {} LIMIT 1", column, table)
    }

    /// Statement locking the tables for writing
    ///
    /// `None` when the vendor has no table locks or `tables` is empty.
    fn lock_tables_statement(&self, _tables: &[&str]) -> Option<String> {
        None
    }

    /// Statement releasing table locks
    ///
    /// `None` when locks end with the transaction or `tables` is empty.
    fn unlock_tables_statement(&self, _tables: &[&str]) -> Option<String> {
        None
    }

    fn quote_string_literal(&self, value: &str) -> String {
        literal::quote_literal(value, &self.literal_style())
    }

    fn is_reserved_word(&self, identifier: &str) -> bool {
        self.reserved_words()
            .iter()
            .any(|word| word.eq_ignore_ascii_case(identifier))
    }

    fn list_schemas_sql(&self) -> Option<String> {
        None
    }

    fn list_procedures_sql(&self, _schema: Option<&str>) -> Option<String> {
        None
    }

    fn list_sequences_sql(&self) -> Option<String> {
        None
    }

    fn next_sequence_value_sql(&self, _sequence: &str) -> Option<String> {
        None
    }

    fn current_sequence_value_sql(&self, _sequence: &str) -> Option<String> {
        None
    }

    fn sequence_exists_sql(&self, _sequence: &str) -> Option<String> {
        None
    }

    /// Insert for the "unknown member" row of a slowly changing dimension
    fn insert_unknown_dimension_row_sql(
        &self,
        schema_table: &str,
        key_field: &str,
        version_field: &str,
    ) -> String {
        format!(
            "insert into {}({}, {}) values (0, 1)",
            schema_table, key_field, version_field
        )
    }

    /// Catalog query listing indexed columns under [`INDEX_COLUMN_ALIAS`]
    fn index_columns_sql(&self, _schema: Option<&str>, _table: &str) -> Option<String> {
        None
    }

    /// Query reading `MAX(field)` under [`MAX_VALUE_ALIAS`]
    fn max_value_sql(&self, schema_table: &str, field: &str) -> String {
        format!(
            "SELECT MAX({}) AS {} FROM {}",
            field, MAX_VALUE_ALIAS, schema_table
        )
    }
}

/// Letters, digits and underscores, not starting with a digit
///
/// Letters and digits are Unicode, so `Café` stays unquoted and keeps the
/// vendor's case folding.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Drop empty schema names so callers can pass user input straight through
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_from_str_aliases() {
        assert_eq!("SQLServer".parse::<Vendor>().unwrap(), Vendor::MsSql);
        assert_eq!("pg".parse::<Vendor>().unwrap(), Vendor::PostgreSql);
        assert_eq!("mariadb".parse::<Vendor>().unwrap(), Vendor::MySql);
        assert!("oracle".parse::<Vendor>().is_err());
    }

    #[test]
    fn test_vendor_display_matches_tag() {
        for vendor in Vendor::ALL {
            assert_eq!(vendor.to_string(), vendor.tag());
            assert_eq!(vendor.tag().parse::<Vendor>().unwrap(), vendor);
        }
    }

    #[test]
    fn test_plain_identifier() {
        assert!(is_plain_identifier("customer_id"));
        assert!(is_plain_identifier("_tmp1"));
        assert!(!is_plain_identifier("1st"));
        assert!(!is_plain_identifier("order date"));
        assert!(!is_plain_identifier(""));
    }

    #[test]
    fn test_plain_identifier_accepts_unicode_letters() {
        assert!(is_plain_identifier("Café"));
        assert!(is_plain_identifier("größe_2"));
        assert!(!is_plain_identifier("Café-bar"));
    }
}
