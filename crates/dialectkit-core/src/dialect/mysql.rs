//! MySQL and MariaDB

use indexmap::IndexMap;
use sqlparser::dialect::Dialect;

use super::options::{self, Attributes, CommonOptions};
use super::{
    non_empty, AccessMode, DialectCapabilities, DialectProfile, LineBreaks, LiteralStyle,
    TypeTokens, Vendor, INDEX_COLUMN_ALIAS,
};
use crate::types::{CanonicalColumn, KeyColumns};

const TOKENS: TypeTokens = TypeTokens {
    date: "DATETIME",
    timestamp: "DATETIME",
    boolean: "BOOLEAN",
    boolean_flag: "CHAR(1)",
    key: "BIGINT PRIMARY KEY",
    auto_increment: " AUTO_INCREMENT",
    decimal: "DECIMAL",
    big_integer: "BIGINT",
    integer: "INT",
    double: "DOUBLE",
    varchar: "VARCHAR",
    large_text: "LONGTEXT",
    large_binary: "LONGBLOB",
};

const LITERALS: LiteralStyle = LiteralStyle {
    backslash_escapes: true,
    line_breaks: LineBreaks::Escape,
};

/// MySQL profile
#[derive(Debug, Clone)]
pub struct MySqlProfile {
    options: CommonOptions,
    capabilities: DialectCapabilities,
}

impl MySqlProfile {
    pub fn new(options: CommonOptions) -> Self {
        let capabilities = DialectCapabilities {
            supports_catalogs: true,
            supports_schemas: false,
            supports_sequences: false,
            supports_sequence_no_max_value: false,
            supports_bitmap_index: false,
            supports_synonyms: false,
            supports_boolean_type: options.supports_boolean_data_type.unwrap_or(false),
            supports_error_handling_on_batch_updates: true,
            supports_savepoints: true,
            // utf8mb4 characters in a 65535-byte row
            max_inline_varchar_length: 16_384,
            default_ports: IndexMap::from([
                (AccessMode::Native, Some(3306)),
                (AccessMode::Odbc, None),
                (AccessMode::Jndi, None),
            ]),
        };
        Self {
            options,
            capabilities,
        }
    }

    pub fn from_attributes(attributes: &Attributes) -> Self {
        options::trace_ignored("mysql", attributes, &[]);
        Self::new(CommonOptions::from_attributes(attributes))
    }
}

impl Default for MySqlProfile {
    fn default() -> Self {
        Self::new(CommonOptions::default())
    }
}

impl DialectProfile for MySqlProfile {
    fn name(&self) -> &'static str {
        "MySQL"
    }

    fn capabilities(&self) -> &DialectCapabilities {
        &self.capabilities
    }

    fn options(&self) -> &CommonOptions {
        &self.options
    }

    fn type_tokens(&self) -> &TypeTokens {
        &TOKENS
    }

    fn literal_style(&self) -> LiteralStyle {
        LITERALS
    }

    fn identifier_quotes(&self) -> (&'static str, &'static str) {
        ("`", "`")
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED_WORDS
    }

    fn parser_dialect(&self) -> Box<dyn Dialect> {
        Vendor::MySql.parser_dialect()
    }

    fn connection_url(&self, host: &str, port: &str, database: &str) -> String {
        if port.is_empty() {
            format!("jdbc:mysql://{}/{}", host, database)
        } else {
            format!("jdbc:mysql://{}:{}/{}", host, port, database)
        }
    }

    fn drop_column_statement(
        &self,
        table: &str,
        column: &CanonicalColumn,
        _keys: &KeyColumns<'_>,
    ) -> String {
        format!("ALTER TABLE {} DROP {}", table, column.name)
    }

    fn lock_tables_statement(&self, tables: &[&str]) -> Option<String> {
        if tables.is_empty() {
            return None;
        }
        let clauses: Vec<String> = tables
            .iter()
            .map(|table| format!("{} WRITE", table))
            .collect();
        Some(format!("LOCK TABLES {};", clauses.join(", ")))
    }

    // Releases every lock the session holds, whatever was named
    fn unlock_tables_statement(&self, tables: &[&str]) -> Option<String> {
        (!tables.is_empty()).then(|| "UNLOCK TABLES;".to_string())
    }

    fn list_procedures_sql(&self, schema: Option<&str>) -> Option<String> {
        let mut sql = String::from(
            "SELECT ROUTINE_NAME FROM information_schema.ROUTINES WHERE ROUTINE_TYPE = 'PROCEDURE'",
        );
        if let Some(schema) = non_empty(schema) {
            sql.push_str(" AND ROUTINE_SCHEMA = ");
            sql.push_str(&self.quote_string_literal(schema));
        }
        Some(sql)
    }

    fn index_columns_sql(&self, schema: Option<&str>, table: &str) -> Option<String> {
        let mut sql = format!(
            "SELECT COLUMN_NAME AS {} FROM information_schema.STATISTICS WHERE TABLE_NAME = {}",
            INDEX_COLUMN_ALIAS,
            self.quote_string_literal(table)
        );
        match non_empty(schema) {
            Some(schema) => {
                sql.push_str(" AND TABLE_SCHEMA = ");
                sql.push_str(&self.quote_string_literal(schema));
            }
            None => sql.push_str(" AND TABLE_SCHEMA = DATABASE()"),
        }
        Some(sql)
    }
}

/// MySQL 8 reserved words
const RESERVED_WORDS: &[&str] = &[
    "ACCESSIBLE", "ADD", "ALL", "ALTER", "ANALYZE", "AND", "AS", "ASC", "ASENSITIVE", "BEFORE",
    "BETWEEN", "BIGINT", "BINARY", "BLOB", "BOTH", "BY", "CALL", "CASCADE", "CASE", "CHANGE",
    "CHAR", "CHARACTER", "CHECK", "COLLATE", "COLUMN", "CONDITION", "CONSTRAINT", "CONTINUE",
    "CONVERT", "CREATE", "CROSS", "CUBE", "CUME_DIST", "CURRENT_DATE", "CURRENT_TIME",
    "CURRENT_TIMESTAMP", "CURRENT_USER", "CURSOR", "DATABASE", "DATABASES", "DAY_HOUR",
    "DAY_MICROSECOND", "DAY_MINUTE", "DAY_SECOND", "DEC", "DECIMAL", "DECLARE", "DEFAULT",
    "DELAYED", "DELETE", "DENSE_RANK", "DESC", "DESCRIBE", "DETERMINISTIC", "DISTINCT",
    "DISTINCTROW", "DIV", "DOUBLE", "DROP", "DUAL", "EACH", "ELSE", "ELSEIF", "EMPTY", "ENCLOSED",
    "ESCAPED", "EXCEPT", "EXISTS", "EXIT", "EXPLAIN", "FALSE", "FETCH", "FIRST_VALUE", "FLOAT",
    "FOR", "FORCE", "FOREIGN", "FROM", "FULLTEXT", "FUNCTION", "GENERATED", "GET", "GRANT",
    "GROUP", "GROUPING", "GROUPS", "HAVING", "HIGH_PRIORITY", "HOUR_MICROSECOND", "HOUR_MINUTE",
    "HOUR_SECOND", "IF", "IGNORE", "IN", "INDEX", "INFILE", "INNER", "INOUT", "INSENSITIVE",
    "INSERT", "INT", "INTEGER", "INTERVAL", "INTO", "IS", "ITERATE", "JOIN", "JSON_TABLE", "KEY",
    "KEYS", "KILL", "LAG", "LAST_VALUE", "LATERAL", "LEAD", "LEADING", "LEAVE", "LEFT", "LIKE",
    "LIMIT", "LINEAR", "LINES", "LOAD", "LOCALTIME", "LOCALTIMESTAMP", "LOCK", "LONG", "LONGBLOB",
    "LONGTEXT", "LOOP", "LOW_PRIORITY", "MATCH", "MAXVALUE", "MEDIUMBLOB", "MEDIUMINT",
    "MEDIUMTEXT", "MINUTE_SECOND", "MOD", "MODIFIES", "NATURAL", "NOT", "NULL", "NUMERIC", "OF",
    "ON", "OPTIMIZE", "OPTION", "OPTIONALLY", "OR", "ORDER", "OUT", "OUTER", "OVER", "PARTITION",
    "PRECISION", "PRIMARY", "PROCEDURE", "PURGE", "RANGE", "RANK", "READ", "READS", "REAL",
    "RECURSIVE", "REFERENCES", "REGEXP", "RELEASE", "RENAME", "REPEAT", "REPLACE", "REQUIRE",
    "RESIGNAL", "RESTRICT", "RETURN", "REVOKE", "RIGHT", "RLIKE", "ROW", "ROWS", "ROW_NUMBER",
    "SCHEMA", "SCHEMAS", "SELECT", "SENSITIVE", "SEPARATOR", "SET", "SHOW", "SIGNAL", "SMALLINT",
    "SPATIAL", "SPECIFIC", "SQL", "SQLEXCEPTION", "SQLSTATE", "SQLWARNING", "SSL", "STARTING",
    "STORED", "STRAIGHT_JOIN", "SYSTEM", "TABLE", "TERMINATED", "THEN", "TINYBLOB", "TINYINT",
    "TINYTEXT", "TO", "TRAILING", "TRIGGER", "TRUE", "UNDO", "UNION", "UNIQUE", "UNLOCK",
    "UNSIGNED", "UPDATE", "USAGE", "USE", "USING", "UTC_DATE", "UTC_TIME", "UTC_TIMESTAMP",
    "VALUES", "VARBINARY", "VARCHAR", "VARCHARACTER", "VARYING", "VIRTUAL", "WHEN", "WHERE",
    "WHILE", "WINDOW", "WITH", "WRITE", "XOR", "YEAR_MONTH", "ZEROFILL",
];
