//! PostgreSQL

use indexmap::IndexMap;
use sqlparser::dialect::Dialect;

use super::options::{self, Attributes, CommonOptions};
use super::{
    non_empty, AccessMode, DialectCapabilities, DialectProfile, LineBreaks, LiteralStyle,
    TypeTokens, Vendor, INDEX_COLUMN_ALIAS,
};
use crate::types::{CanonicalColumn, KeyColumns};

const TOKENS: TypeTokens = TypeTokens {
    date: "TIMESTAMP",
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
    large_text: "TEXT",
    large_binary: "BYTEA",
};

const LITERALS: LiteralStyle = LiteralStyle {
    backslash_escapes: false,
    line_breaks: LineBreaks::Concat {
        operator: "||",
        function: "chr",
    },
};

/// PostgreSQL profile
#[derive(Debug, Clone)]
pub struct PostgresProfile {
    options: CommonOptions,
    capabilities: DialectCapabilities,
}

impl PostgresProfile {
    pub fn new(options: CommonOptions) -> Self {
        let capabilities = DialectCapabilities {
            supports_catalogs: false,
            supports_schemas: true,
            supports_sequences: true,
            supports_sequence_no_max_value: true,
            supports_bitmap_index: false,
            supports_synonyms: false,
            supports_boolean_type: options.supports_boolean_data_type.unwrap_or(true),
            // A failed statement aborts the whole batch transaction
            supports_error_handling_on_batch_updates: false,
            supports_savepoints: true,
            max_inline_varchar_length: 10_485_760,
            default_ports: IndexMap::from([
                (AccessMode::Native, Some(5432)),
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
        options::trace_ignored("postgresql", attributes, &[]);
        Self::new(CommonOptions::from_attributes(attributes))
    }
}

impl Default for PostgresProfile {
    fn default() -> Self {
        Self::new(CommonOptions::default())
    }
}

impl DialectProfile for PostgresProfile {
    fn name(&self) -> &'static str {
        "PostgreSQL"
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

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED_WORDS
    }

    fn parser_dialect(&self) -> Box<dyn Dialect> {
        Vendor::PostgreSql.parser_dialect()
    }

    fn connection_url(&self, host: &str, port: &str, database: &str) -> String {
        if port.is_empty() {
            format!("jdbc:postgresql://{}/{}", host, database)
        } else {
            format!("jdbc:postgresql://{}:{}/{}", host, port, database)
        }
    }

    fn add_column_statement(
        &self,
        table: &str,
        column: &CanonicalColumn,
        keys: &KeyColumns<'_>,
    ) -> String {
        format!(
            "ALTER TABLE {} ADD COLUMN {}",
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
            "ALTER TABLE {} ALTER COLUMN {} TYPE {}",
            table,
            column.name,
            self.field_definition(column, keys, false, false)
        )
    }

    fn lock_tables_statement(&self, tables: &[&str]) -> Option<String> {
        (!tables.is_empty()).then(|| {
            tables
                .iter()
                .map(|table| format!("LOCK TABLE {} IN ACCESS EXCLUSIVE MODE;\n", table))
                .collect()
        })
    }

    fn list_schemas_sql(&self) -> Option<String> {
        Some("SELECT nspname FROM pg_catalog.pg_namespace".to_string())
    }

    fn list_procedures_sql(&self, schema: Option<&str>) -> Option<String> {
        let mut sql = String::from(
            "SELECT p.proname FROM pg_catalog.pg_proc p \
             JOIN pg_catalog.pg_namespace n ON n.oid = p.pronamespace",
        );
        if let Some(schema) = non_empty(schema) {
            sql.push_str(" WHERE n.nspname = ");
            sql.push_str(&self.quote_string_literal(schema));
        }
        sql.push_str(" ORDER BY p.proname");
        Some(sql)
    }

    fn list_sequences_sql(&self) -> Option<String> {
        self.capabilities.supports_sequences.then(|| {
            "SELECT relname AS sequence_name FROM pg_catalog.pg_statio_all_sequences".to_string()
        })
    }

    fn next_sequence_value_sql(&self, sequence: &str) -> Option<String> {
        self.capabilities
            .supports_sequences
            .then(|| format!("SELECT nextval({})", self.quote_string_literal(sequence)))
    }

    fn current_sequence_value_sql(&self, sequence: &str) -> Option<String> {
        self.capabilities
            .supports_sequences
            .then(|| format!("SELECT currval({})", self.quote_string_literal(sequence)))
    }

    fn sequence_exists_sql(&self, sequence: &str) -> Option<String> {
        self.capabilities.supports_sequences.then(|| {
            format!(
                "SELECT relname AS sequence_name FROM pg_catalog.pg_statio_all_sequences \
                 WHERE relname = {}",
                self.quote_string_literal(sequence)
            )
        })
    }

    fn index_columns_sql(&self, schema: Option<&str>, table: &str) -> Option<String> {
        let mut sql = format!(
            "SELECT a.attname AS {} FROM pg_catalog.pg_index x \
             JOIN pg_catalog.pg_class t ON t.oid = x.indrelid \
             JOIN pg_catalog.pg_namespace n ON n.oid = t.relnamespace \
             JOIN pg_catalog.pg_attribute a ON a.attrelid = t.oid AND a.attnum = ANY(x.indkey) \
             WHERE t.relname = {}",
            INDEX_COLUMN_ALIAS,
            self.quote_string_literal(table)
        );
        if let Some(schema) = non_empty(schema) {
            sql.push_str(" AND n.nspname = ");
            sql.push_str(&self.quote_string_literal(schema));
        }
        Some(sql)
    }
}

/// Keywords PostgreSQL reserves outright (not usable as column names)
const RESERVED_WORDS: &[&str] = &[
    "ALL", "ANALYSE", "ANALYZE", "AND", "ANY", "ARRAY", "AS", "ASC", "ASYMMETRIC",
    "AUTHORIZATION", "BINARY", "BOTH", "CASE", "CAST", "CHECK", "COLLATE", "COLLATION", "COLUMN",
    "CONCURRENTLY", "CONSTRAINT", "CREATE", "CROSS", "CURRENT_CATALOG", "CURRENT_DATE",
    "CURRENT_ROLE", "CURRENT_SCHEMA", "CURRENT_TIME", "CURRENT_TIMESTAMP", "CURRENT_USER",
    "DEFAULT", "DEFERRABLE", "DESC", "DISTINCT", "DO", "ELSE", "END", "EXCEPT", "FALSE", "FETCH",
    "FOR", "FOREIGN", "FREEZE", "FROM", "FULL", "GRANT", "GROUP", "HAVING", "ILIKE", "IN",
    "INITIALLY", "INNER", "INTERSECT", "INTO", "IS", "ISNULL", "JOIN", "LATERAL", "LEADING",
    "LEFT", "LIKE", "LIMIT", "LOCALTIME", "LOCALTIMESTAMP", "NATURAL", "NOT", "NOTNULL", "NULL",
    "OFFSET", "ON", "ONLY", "OR", "ORDER", "OUTER", "OVERLAPS", "PLACING", "PRIMARY",
    "REFERENCES", "RETURNING", "RIGHT", "SELECT", "SESSION_USER", "SIMILAR", "SOME", "SYMMETRIC",
    "TABLE", "TABLESAMPLE", "THEN", "TO", "TRAILING", "TRUE", "UNION", "UNIQUE", "USER", "USING",
    "VARIADIC", "VERBOSE", "WHEN", "WHERE", "WINDOW", "WITH",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogicalType;

    #[test]
    fn test_modify_column_uses_type_clause() {
        let profile = PostgresProfile::default();
        let column = CanonicalColumn::new("name", LogicalType::String).with_length(80);
        assert_eq!(
            profile.modify_column_statement("public.customer", &column, &KeyColumns::none()),
            "ALTER TABLE public.customer ALTER COLUMN name TYPE VARCHAR(80)"
        );
    }

    #[test]
    fn test_lock_clause_per_table() {
        let profile = PostgresProfile::default();
        assert_eq!(
            profile.lock_tables_statement(&["a", "b"]).unwrap(),
            "LOCK TABLE a IN ACCESS EXCLUSIVE MODE;\nLOCK TABLE b IN ACCESS EXCLUSIVE MODE;\n"
        );
    }

    #[test]
    fn test_sequence_name_is_a_literal() {
        let profile = PostgresProfile::default();
        assert_eq!(
            profile.next_sequence_value_sql("seq_id").unwrap(),
            "SELECT nextval('seq_id')"
        );
    }

    #[test]
    fn test_line_breaks_use_chr() {
        assert_eq!(
            PostgresProfile::default().quote_string_literal("a\nb"),
            "'a'||chr(10)||'b'"
        );
    }

    #[test]
    fn test_index_query_filters_schema() {
        let sql = PostgresProfile::default()
            .index_columns_sql(Some("sales"), "orders")
            .unwrap();
        assert!(sql.contains("t.relname = 'orders'"));
        assert!(sql.ends_with("AND n.nspname = 'sales'"));
    }
}
