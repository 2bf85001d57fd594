//! Microsoft SQL Server (Transact-SQL)

use indexmap::IndexMap;
use sqlparser::dialect::Dialect;

use super::options::{self, Attributes, CommonOptions};
use super::{
    AccessMode, DialectCapabilities, DialectProfile, LineBreaks, LiteralStyle, TypeTokens, Vendor,
    INDEX_COLUMN_ALIAS,
};
use crate::types::{CanonicalColumn, KeyColumns};

pub const DOUBLE_DECIMAL_SEPARATOR: &str = "MSSQL_DOUBLE_DECIMAL_SEPARATOR";
/// Short spelling of [`DOUBLE_DECIMAL_SEPARATOR`]
pub const DOUBLE_DECIMAL_SEPARATOR_SHORT: &str = "DOUBLE_DECIMAL_SEPARATOR";

const TOKENS: TypeTokens = TypeTokens {
    date: "DATETIME",
    timestamp: "DATETIME",
    boolean: "BIT",
    boolean_flag: "CHAR(1)",
    key: "BIGINT PRIMARY KEY",
    auto_increment: " IDENTITY(0,1)",
    decimal: "DECIMAL",
    big_integer: "BIGINT",
    integer: "INT",
    double: "FLOAT(53)",
    varchar: "VARCHAR",
    large_text: "TEXT",
    large_binary: "VARBINARY(MAX)",
};

const LITERALS: LiteralStyle = LiteralStyle {
    backslash_escapes: false,
    line_breaks: LineBreaks::Concat {
        operator: "+",
        function: "char",
    },
};

/// Recognized SQL Server connection options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsSqlConfig {
    pub common: CommonOptions,
    /// Join schema and table with `..` instead of `.`
    pub double_decimal_separator: bool,
}

impl MsSqlConfig {
    pub fn from_attributes(attributes: &Attributes) -> Self {
        options::trace_ignored(
            "mssql",
            attributes,
            &[DOUBLE_DECIMAL_SEPARATOR, DOUBLE_DECIMAL_SEPARATOR_SHORT],
        );
        let double_decimal_separator = options::flag(attributes, DOUBLE_DECIMAL_SEPARATOR)
            .or_else(|| options::flag(attributes, DOUBLE_DECIMAL_SEPARATOR_SHORT))
            .unwrap_or(false);
        Self {
            common: CommonOptions::from_attributes(attributes),
            double_decimal_separator,
        }
    }
}

/// SQL Server profile
#[derive(Debug, Clone)]
pub struct MsSqlProfile {
    config: MsSqlConfig,
    capabilities: DialectCapabilities,
}

impl MsSqlProfile {
    pub fn new(config: MsSqlConfig) -> Self {
        let capabilities = DialectCapabilities {
            supports_catalogs: false,
            supports_schemas: true,
            supports_sequences: true,
            supports_sequence_no_max_value: true,
            supports_bitmap_index: false,
            supports_synonyms: false,
            supports_boolean_type: config.common.supports_boolean_data_type.unwrap_or(false),
            supports_error_handling_on_batch_updates: true,
            supports_savepoints: false,
            max_inline_varchar_length: 8000,
            default_ports: IndexMap::from([
                (AccessMode::Native, Some(1433)),
                (AccessMode::Jndi, None),
            ]),
        };
        Self {
            config,
            capabilities,
        }
    }

    pub fn config(&self) -> &MsSqlConfig {
        &self.config
    }
}

impl Default for MsSqlProfile {
    fn default() -> Self {
        Self::new(MsSqlConfig::default())
    }
}

impl DialectProfile for MsSqlProfile {
    fn name(&self) -> &'static str {
        "Microsoft SQL Server"
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

    fn literal_style(&self) -> LiteralStyle {
        LITERALS
    }

    fn identifier_quotes(&self) -> (&'static str, &'static str) {
        ("[", "]")
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED_WORDS
    }

    fn parser_dialect(&self) -> Box<dyn Dialect> {
        Vendor::MsSql.parser_dialect()
    }

    fn connection_url(&self, host: &str, port: &str, database: &str) -> String {
        let mut url = format!("jdbc:jtds:sqlserver://{}", host);
        if !port.is_empty() {
            url.push(':');
            url.push_str(port);
        }
        url.push('/');
        url.push_str(database);
        url
    }

    fn schema_table_separator(&self) -> &'static str {
        if self.config.double_decimal_separator {
            ".."
        } else {
            "."
        }
    }

    fn modify_column_statement(
        &self,
        table: &str,
        column: &CanonicalColumn,
        keys: &KeyColumns<'_>,
    ) -> String {
        format!(
            "ALTER TABLE {} ALTER COLUMN {}",
            table,
            self.field_definition(column, keys, true, false)
        )
    }

    fn query_fields_sql(&self, table: &str) -> String {
        format!("SELECT TOP 1 * FROM {}", table)
    }

    fn column_exists_sql(&self, column: &str, table: &str) -> String {
        format!("SELECT TOP 1 {} FROM {}", column, table)
    }

    fn lock_tables_statement(&self, tables: &[&str]) -> Option<String> {
        if tables.is_empty() {
            return None;
        }
        let mut sql = String::with_capacity(64 * tables.len());
        for table in tables {
            sql.push_str("SELECT top 0 * FROM ");
            sql.push_str(table);
            sql.push_str(" WITH (UPDLOCK, HOLDLOCK);\n");
        }
        Some(sql)
    }

    fn list_schemas_sql(&self) -> Option<String> {
        Some("select name from sys.schemas".to_string())
    }

    // sysobjects has no schema column worth filtering on; every schema is listed
    fn list_procedures_sql(&self, _schema: Option<&str>) -> Option<String> {
        Some(
            "select o.name from sysobjects o, sysusers u \
             where xtype in ( 'FN', 'P' ) and o.uid = u.uid order by o.name"
                .to_string(),
        )
    }

    fn list_sequences_sql(&self) -> Option<String> {
        self.capabilities
            .supports_sequences
            .then(|| "SELECT name FROM sys.sequences".to_string())
    }

    fn next_sequence_value_sql(&self, sequence: &str) -> Option<String> {
        self.capabilities
            .supports_sequences
            .then(|| format!("SELECT NEXT VALUE FOR {}", sequence))
    }

    fn current_sequence_value_sql(&self, sequence: &str) -> Option<String> {
        self.capabilities.supports_sequences.then(|| {
            format!(
                "SELECT current_value FROM sys.sequences WHERE name = {}",
                self.quote_string_literal(sequence)
            )
        })
    }

    fn sequence_exists_sql(&self, sequence: &str) -> Option<String> {
        self.capabilities.supports_sequences.then(|| {
            format!(
                "SELECT 1 FROM sys.sequences WHERE name = {}",
                self.quote_string_literal(sequence)
            )
        })
    }

    // The key column is an IDENTITY, so only the version is supplied
    fn insert_unknown_dimension_row_sql(
        &self,
        schema_table: &str,
        _key_field: &str,
        version_field: &str,
    ) -> String {
        format!("insert into {}({}) values (1)", schema_table, version_field)
    }

    // TODO: join sysindexes on the table's object id so same-named tables in
    // different schemas stop matching each other.
    fn index_columns_sql(&self, schema: Option<&str>, table: &str) -> Option<String> {
        let table_name = self.quoted_schema_table(schema, table);
        Some(format!(
            "select i.name table_name, c.name {} \
             from sysindexes i, sysindexkeys k, syscolumns c \
             where i.name = {} AND i.id = k.id AND i.id = c.id AND k.colid = c.colid",
            INDEX_COLUMN_ALIAS,
            self.quote_string_literal(&table_name)
        ))
    }
}

/// Transact-SQL reserved keywords, including ODBC and future keywords
const RESERVED_WORDS: &[&str] = &[
    "ABSOLUTE", "ACTION", "ADD", "ADMIN", "AFTER", "AGGREGATE", "ALIAS", "ALL", "ALLOCATE", "ALTER",
    "AND", "ANY", "ARE", "ARRAY", "AS", "ASC", "ASSERTION", "AT", "AUTHORIZATION", "BACKUP",
    "BEFORE", "BEGIN", "BETWEEN", "BINARY", "BIT", "BLOB", "BOOLEAN", "BOTH", "BREADTH", "BREAK",
    "BROWSE", "BULK", "BY", "CALL", "CASCADE", "CASCADED", "CASE", "CAST", "CATALOG", "CHAR",
    "CHARACTER", "CHECK", "CHECKPOINT", "CLASS", "CLOB", "CLOSE", "CLUSTERED", "COALESCE",
    "COLLATE", "COLLATION", "COLUMN", "COMMIT", "COMPLETION", "COMPUTE", "CONNECT", "CONNECTION",
    "CONSTRAINT", "CONSTRAINTS", "CONSTRUCTOR", "CONTAINS", "CONTAINSTABLE", "CONTINUE",
    "CONVERT", "CORRESPONDING", "CREATE", "CROSS", "CUBE", "CURRENT", "CURRENT_DATE",
    "CURRENT_PATH", "CURRENT_ROLE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "CURRENT_USER", "CURSOR",
    "CYCLE", "DATA", "DATABASE", "DATE", "DAY", "DBCC", "DEALLOCATE", "DEC", "DECIMAL", "DECLARE",
    "DEFAULT", "DEFERRABLE", "DEFERRED", "DELETE", "DENY", "DEPTH", "DEREF", "DESC", "DESCRIBE",
    "DESCRIPTOR", "DESTROY", "DESTRUCTOR", "DETERMINISTIC", "DIAGNOSTICS", "DICTIONARY",
    "DISCONNECT", "DISK", "DISTINCT", "DISTRIBUTED", "DOMAIN", "DOUBLE", "DROP", "DUMMY", "DUMP",
    "DYNAMIC", "EACH", "ELSE", "END", "END-EXEC", "EQUALS", "ERRLVL", "ESCAPE", "EVERY", "EXCEPT",
    "EXCEPTION", "EXEC", "EXECUTE", "EXISTS", "EXIT", "EXTERNAL", "FALSE", "FETCH", "FILE",
    "FILLFACTOR", "FIRST", "FLOAT", "FOR", "FOREIGN", "FOUND", "FREE", "FREETEXT",
    "FREETEXTTABLE", "FROM", "FULL", "FUNCTION", "GENERAL", "GET", "GLOBAL", "GO", "GOTO", "GRANT",
    "GROUP", "GROUPING", "HAVING", "HOLDLOCK", "HOST", "HOUR", "IDENTITY", "IDENTITY_INSERT",
    "IDENTITYCOL", "IF", "IGNORE", "IMMEDIATE", "IN", "INDEX", "INDICATOR", "INITIALIZE",
    "INITIALLY", "INNER", "INOUT", "INPUT", "INSERT", "INT", "INTEGER", "INTERSECT", "INTERVAL",
    "INTO", "IS", "ISOLATION", "ITERATE", "JOIN", "KEY", "KILL", "LANGUAGE", "LARGE", "LAST",
    "LATERAL", "LEADING", "LEFT", "LESS", "LEVEL", "LIKE", "LIMIT", "LINENO", "LOAD", "LOCAL",
    "LOCALTIME", "LOCALTIMESTAMP", "LOCATOR", "MAP", "MATCH", "MINUTE", "MODIFIES", "MODIFY",
    "MODULE", "MONTH", "NAMES", "NATIONAL", "NATURAL", "NCHAR", "NCLOB", "NEW", "NEXT", "NO",
    "NOCHECK", "NONCLUSTERED", "NONE", "NOT", "NULL", "NULLIF", "NUMERIC", "OBJECT", "OF", "OFF",
    "OFFSETS", "OLD", "ON", "ONLY", "OPEN", "OPENDATASOURCE", "OPENQUERY", "OPENROWSET", "OPENXML",
    "OPERATION", "OPTION", "OR", "ORDER", "ORDINALITY", "OUT", "OUTER", "OUTPUT", "OVER", "PAD",
    "PARAMETER", "PARAMETERS", "PARTIAL", "PATH", "PERCENT", "PLAN", "POSTFIX", "PRECISION",
    "PREFIX", "PREORDER", "PREPARE", "PRESERVE", "PRIMARY", "PRINT", "PRIOR", "PRIVILEGES", "PROC",
    "PROCEDURE", "PUBLIC", "RAISERROR", "READ", "READS", "READTEXT", "REAL", "RECONFIGURE",
    "RECURSIVE", "REF", "REFERENCES", "REFERENCING", "RELATIVE", "REPLICATION", "RESTORE",
    "RESTRICT", "RESULT", "RETURN", "RETURNS", "REVOKE", "RIGHT", "ROLE", "ROLLBACK", "ROLLUP",
    "ROUTINE", "ROW", "ROWCOUNT", "ROWGUIDCOL", "ROWS", "RULE", "SAVE", "SAVEPOINT", "SCHEMA",
    "SCOPE", "SCROLL", "SEARCH", "SECOND", "SECTION", "SELECT", "SEQUENCE", "SESSION",
    "SESSION_USER", "SET", "SETS", "SETUSER", "SHUTDOWN", "SIZE", "SMALLINT", "SOME", "SPACE",
    "SPECIFIC", "SPECIFICTYPE", "SQL", "SQLEXCEPTION", "SQLSTATE", "SQLWARNING", "START", "STATE",
    "STATEMENT", "STATIC", "STATISTICS", "STRUCTURE", "SYSTEM_USER", "TABLE", "TEMPORARY",
    "TERMINATE", "TEXTSIZE", "THAN", "THEN", "TIME", "TIMESTAMP", "TIMEZONE_HOUR",
    "TIMEZONE_MINUTE", "TO", "TOP", "TRAILING", "TRAN", "TRANSACTION", "TRANSLATION", "TREAT",
    "TRIGGER", "TRUE", "TRUNCATE", "TSEQUAL", "UNDER", "UNION", "UNIQUE", "UNKNOWN", "UNNEST",
    "UPDATE", "UPDATETEXT", "USAGE", "USE", "USER", "USING", "VALUE", "VALUES", "VARCHAR",
    "VARIABLE", "VARYING", "VIEW", "WAITFOR", "WHEN", "WHENEVER", "WHERE", "WHILE", "WITH",
    "WITHOUT", "WORK", "WRITE", "WRITETEXT", "YEAR", "ZONE",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogicalType;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_connection_url() {
        let profile = MsSqlProfile::default();
        assert_eq!(
            profile.connection_url("db01", "1433", "sales"),
            "jdbc:jtds:sqlserver://db01:1433/sales"
        );
        assert_eq!(
            profile.connection_url("db01", "", "sales"),
            "jdbc:jtds:sqlserver://db01/sales"
        );
    }

    #[test]
    fn test_default_ports() {
        let profile = MsSqlProfile::default();
        assert_eq!(profile.default_port(AccessMode::Native), Some(1433));
        assert_eq!(profile.default_port(AccessMode::Jndi), None);
        assert_eq!(profile.default_port(AccessMode::Odbc), None);
    }

    #[test]
    fn test_double_decimal_separator_attribute() {
        let plain = MsSqlProfile::new(MsSqlConfig::from_attributes(&Attributes::new()));
        assert_eq!(plain.combine_schema_and_table("S", "T"), "S.T");

        for key in [DOUBLE_DECIMAL_SEPARATOR, DOUBLE_DECIMAL_SEPARATOR_SHORT] {
            let profile = MsSqlProfile::new(MsSqlConfig::from_attributes(&attrs(&[(key, "Y")])));
            assert_eq!(profile.combine_schema_and_table("S", "T"), "S..T");
        }
    }

    #[test]
    fn test_boolean_attribute_switches_token() {
        let column = CanonicalColumn::new("ACTIVE", LogicalType::Boolean);
        let keys = KeyColumns::none();
        assert_eq!(
            MsSqlProfile::default().field_definition(&column, &keys, true, false),
            "ACTIVE CHAR(1)"
        );
        let profile = MsSqlProfile::new(MsSqlConfig::from_attributes(&attrs(&[(
            "SUPPORTS_BOOLEAN_DATA_TYPE",
            "Y",
        )])));
        assert_eq!(
            profile.field_definition(&column, &keys, true, false),
            "ACTIVE BIT"
        );
    }

    #[test]
    fn test_quote_field_uses_brackets_for_reserved_words() {
        let profile = MsSqlProfile::default();
        assert_eq!(profile.quote_field("ORDER"), "[ORDER]");
        assert_eq!(profile.quote_field("customer"), "customer");
        assert_eq!(profile.quote_field("order date"), "[order date]");
        assert_eq!(profile.quote_field("[already]"), "[already]");
        assert_eq!(profile.quote_identifier("a]b"), "[a]]b]");
    }

    #[test]
    fn test_index_query_escapes_table_literal() {
        let profile = MsSqlProfile::default();
        let sql = profile.index_columns_sql(Some("dbo"), "O'Brien").unwrap();
        assert!(sql.contains("where i.name = 'dbo.[O''Brien]'"), "{sql}");
        assert!(sql.contains("c.name column_name"));
    }
}
