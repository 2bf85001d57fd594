//! Generic ANSI profile for databases without a dedicated profile

use sqlparser::dialect::Dialect;

use super::options::{self, Attributes, CommonOptions};
use super::{DialectCapabilities, DialectProfile, TypeTokens, Vendor};
use crate::types::{CanonicalColumn, KeyColumns};

pub const CUSTOM_URL: &str = "CUSTOM_URL";

const TOKENS: TypeTokens = TypeTokens {
    date: "DATE",
    timestamp: "TIMESTAMP",
    boolean: "BOOLEAN",
    boolean_flag: "CHAR(1)",
    key: "BIGINT PRIMARY KEY",
    auto_increment: " GENERATED BY DEFAULT AS IDENTITY",
    decimal: "NUMERIC",
    big_integer: "BIGINT",
    integer: "INTEGER",
    double: "DOUBLE PRECISION",
    varchar: "VARCHAR",
    large_text: "CLOB",
    large_binary: "BLOB",
};

/// Recognized generic connection options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericConfig {
    pub common: CommonOptions,
    /// Full connection URL supplied by the user
    pub custom_url: Option<String>,
}

impl GenericConfig {
    pub fn from_attributes(attributes: &Attributes) -> Self {
        options::trace_ignored("generic", attributes, &[CUSTOM_URL]);
        Self {
            common: CommonOptions::from_attributes(attributes),
            custom_url: options::attribute(attributes, CUSTOM_URL)
                .filter(|url| !url.trim().is_empty())
                .map(str::to_string),
        }
    }
}

/// Generic ANSI profile
#[derive(Debug, Clone)]
pub struct GenericProfile {
    config: GenericConfig,
    capabilities: DialectCapabilities,
}

impl GenericProfile {
    pub fn new(config: GenericConfig) -> Self {
        let capabilities = DialectCapabilities {
            supports_boolean_type: config.common.supports_boolean_data_type.unwrap_or(false),
            ..DialectCapabilities::default()
        };
        Self {
            config,
            capabilities,
        }
    }
}

impl Default for GenericProfile {
    fn default() -> Self {
        Self::new(GenericConfig::default())
    }
}

impl DialectProfile for GenericProfile {
    fn name(&self) -> &'static str {
        "Generic database"
    }

    fn capabilities(&self) -> &DialectCapabilities {
        &self.capabilities
    }

    fn options(&self) -> &CommonOptions {
        &self.config.common
    }

    fn type_tokens(&self) -> &TypeTokens {
        &TOKENS
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED_WORDS
    }

    fn parser_dialect(&self) -> Box<dyn Dialect> {
        Vendor::Generic.parser_dialect()
    }

    // Host and port are meaningless without a driver-specific URL scheme
    fn connection_url(&self, _host: &str, _port: &str, database: &str) -> String {
        match &self.config.custom_url {
            Some(url) => url.clone(),
            None => format!("jdbc:odbc:{}", database),
        }
    }

    fn modify_column_statement(
        &self,
        table: &str,
        column: &CanonicalColumn,
        keys: &KeyColumns<'_>,
    ) -> String {
        format!(
            "ALTER TABLE {} ALTER COLUMN {} SET DATA TYPE {}",
            table,
            column.name,
            self.field_definition(column, keys, false, false)
        )
    }

    fn query_fields_sql(&self, table: &str) -> String {
        format!("SELECT * FROM {} WHERE 1=0", table)
    }

    fn column_exists_sql(&self, column: &str, table: &str) -> String {
        format!("SELECT {} FROM {} WHERE 1=0", column, table)
    }

    fn list_schemas_sql(&self) -> Option<String> {
        self.capabilities
            .supports_schemas
            .then(|| "SELECT SCHEMA_NAME FROM INFORMATION_SCHEMA.SCHEMATA".to_string())
    }
}

/// SQL-92 reserved words
const RESERVED_WORDS: &[&str] = &[
    "ABSOLUTE", "ACTION", "ADD", "ALL", "ALLOCATE", "ALTER", "AND", "ANY", "ARE", "AS", "ASC",
    "ASSERTION", "AT", "AUTHORIZATION", "AVG", "BEGIN", "BETWEEN", "BIT", "BIT_LENGTH", "BOTH",
    "BY", "CASCADE", "CASCADED", "CASE", "CAST", "CATALOG", "CHAR", "CHARACTER", "CHAR_LENGTH",
    "CHARACTER_LENGTH", "CHECK", "CLOSE", "COALESCE", "COLLATE", "COLLATION", "COLUMN", "COMMIT",
    "CONNECT", "CONNECTION", "CONSTRAINT", "CONSTRAINTS", "CONTINUE", "CONVERT", "CORRESPONDING",
    "COUNT", "CREATE", "CROSS", "CURRENT", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP",
    "CURRENT_USER", "CURSOR", "DATE", "DAY", "DEALLOCATE", "DEC", "DECIMAL", "DECLARE", "DEFAULT",
    "DEFERRABLE", "DEFERRED", "DELETE", "DESC", "DESCRIBE", "DESCRIPTOR", "DIAGNOSTICS",
    "DISCONNECT", "DISTINCT", "DOMAIN", "DOUBLE", "DROP", "ELSE", "END", "END-EXEC", "ESCAPE",
    "EXCEPT", "EXCEPTION", "EXEC", "EXECUTE", "EXISTS", "EXTERNAL", "EXTRACT", "FALSE", "FETCH",
    "FIRST", "FLOAT", "FOR", "FOREIGN", "FOUND", "FROM", "FULL", "GET", "GLOBAL", "GO", "GOTO",
    "GRANT", "GROUP", "HAVING", "HOUR", "IDENTITY", "IMMEDIATE", "IN", "INDICATOR", "INITIALLY",
    "INNER", "INPUT", "INSENSITIVE", "INSERT", "INT", "INTEGER", "INTERSECT", "INTERVAL", "INTO",
    "IS", "ISOLATION", "JOIN", "KEY", "LANGUAGE", "LAST", "LEADING", "LEFT", "LEVEL", "LIKE",
    "LOCAL", "LOWER", "MATCH", "MAX", "MIN", "MINUTE", "MODULE", "MONTH", "NAMES", "NATIONAL",
    "NATURAL", "NCHAR", "NEXT", "NO", "NOT", "NULL", "NULLIF", "NUMERIC", "OCTET_LENGTH", "OF",
    "ON", "ONLY", "OPEN", "OPTION", "OR", "ORDER", "OUTER", "OUTPUT", "OVERLAPS", "PAD",
    "PARTIAL", "POSITION", "PRECISION", "PREPARE", "PRESERVE", "PRIMARY", "PRIOR", "PRIVILEGES",
    "PROCEDURE", "PUBLIC", "READ", "REAL", "REFERENCES", "RELATIVE", "RESTRICT", "REVOKE",
    "RIGHT", "ROLLBACK", "ROWS", "SCHEMA", "SCROLL", "SECOND", "SECTION", "SELECT", "SESSION",
    "SESSION_USER", "SET", "SIZE", "SMALLINT", "SOME", "SPACE", "SQL", "SQLCODE", "SQLERROR",
    "SQLSTATE", "SUBSTRING", "SUM", "SYSTEM_USER", "TABLE", "TEMPORARY", "THEN", "TIME",
    "TIMESTAMP", "TIMEZONE_HOUR", "TIMEZONE_MINUTE", "TO", "TRAILING", "TRANSACTION", "TRANSLATE",
    "TRANSLATION", "TRIM", "TRUE", "UNION", "UNIQUE", "UNKNOWN", "UPDATE", "UPPER", "USAGE",
    "USER", "USING", "VALUE", "VALUES", "VARCHAR", "VARYING", "VIEW", "WHEN", "WHENEVER", "WHERE",
    "WITH", "WORK", "WRITE", "YEAR", "ZONE",
];
