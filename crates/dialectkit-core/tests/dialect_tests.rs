// Integration tests for dialect profiles
use dialectkit_core::dialect::{
    Attributes, DialectProfile, GenericProfile, MsSqlProfile, MySqlProfile, PostgresProfile,
    Vendor, UNKNOWN_TYPE_MARKER,
};
use dialectkit_core::registry::DialectRegistry;
use dialectkit_core::types::{CanonicalColumn, KeyColumns, LogicalType};
use pretty_assertions::assert_eq;
use sqlparser::parser::Parser;

fn attrs(pairs: &[(&str, &str)]) -> Attributes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn all_profiles() -> Vec<std::sync::Arc<dyn DialectProfile>> {
    let registry = DialectRegistry::with_builtins();
    registry
        .vendors()
        .map(|tag| registry.create(tag, &Attributes::new()).unwrap())
        .collect()
}

#[test]
fn test_sql_server_field_definitions() {
    let profile = MsSqlProfile::default();
    let none = KeyColumns::none();

    // (column, keys, expected definition)
    let cases: Vec<(CanonicalColumn, KeyColumns<'_>, &str)> = vec![
        (CanonicalColumn::new("D", LogicalType::Date), none, "D DATETIME"),
        (CanonicalColumn::new("TS", LogicalType::Timestamp), none, "TS DATETIME"),
        (CanonicalColumn::new("FLAG", LogicalType::Boolean), none, "FLAG CHAR(1)"),
        (
            CanonicalColumn::new("ID", LogicalType::Integer),
            KeyColumns::technical("id").with_auto_increment(true),
            "ID BIGINT PRIMARY KEY IDENTITY(0,1)",
        ),
        (
            CanonicalColumn::new("ID", LogicalType::Number).with_length(10),
            KeyColumns::primary("ID").with_auto_increment(true),
            "ID BIGINT PRIMARY KEY IDENTITY(0,1)",
        ),
        (
            CanonicalColumn::new("ID", LogicalType::Number).with_length(30).with_precision(4),
            KeyColumns::primary("ID"),
            "ID BIGINT PRIMARY KEY",
        ),
        (
            CanonicalColumn::new("BIG", LogicalType::BigNumber).with_length(19),
            none,
            "BIG DECIMAL(19,0)",
        ),
        (
            CanonicalColumn::new("WIDE", LogicalType::Integer).with_length(18),
            none,
            "WIDE BIGINT",
        ),
        (
            CanonicalColumn::new("WIDE", LogicalType::Integer).with_length(10),
            none,
            "WIDE BIGINT",
        ),
        (
            CanonicalColumn::new("SMALL", LogicalType::Integer).with_length(9),
            none,
            "SMALL INT",
        ),
        (
            CanonicalColumn::new("AMOUNT", LogicalType::Number).with_length(12).with_precision(2),
            none,
            "AMOUNT DECIMAL(12,2)",
        ),
        (
            CanonicalColumn::new("RATE", LogicalType::Number).with_precision(2),
            none,
            "RATE FLOAT(53)",
        ),
        (
            CanonicalColumn::new("RATE", LogicalType::Number).with_precision(-1),
            none,
            "RATE FLOAT(53)",
        ),
        (
            CanonicalColumn::new("NAME", LogicalType::String).with_length(50),
            none,
            "NAME VARCHAR(50)",
        ),
        (CanonicalColumn::new("NAME", LogicalType::String), none, "NAME VARCHAR(100)"),
        (
            CanonicalColumn::new("NOTE", LogicalType::String).with_length(7999),
            none,
            "NOTE VARCHAR(7999)",
        ),
        (
            CanonicalColumn::new("NOTE", LogicalType::String).with_length(8000),
            none,
            "NOTE TEXT",
        ),
        (CanonicalColumn::new("BLOB", LogicalType::Binary), none, "BLOB VARBINARY(MAX)"),
        (
            CanonicalColumn::new("ODD", LogicalType::Unknown),
            none,
            "ODD UNKNOWN",
        ),
    ];

    for (column, keys, expected) in cases {
        assert_eq!(
            profile.field_definition(&column, &keys, true, false),
            expected,
            "column {:?}",
            column
        );
    }
}

#[test]
fn test_field_definition_without_name_and_with_line_break() {
    let profile = MsSqlProfile::default();
    let column = CanonicalColumn::new("NAME", LogicalType::String).with_length(50);
    assert_eq!(
        profile.field_definition(&column, &KeyColumns::none(), false, true),
        "VARCHAR(50)\n"
    );
}

#[test]
fn test_unknown_type_marker_for_every_vendor() {
    let column = CanonicalColumn::new("X", LogicalType::Unknown);
    for profile in all_profiles() {
        assert_eq!(
            profile.field_definition(&column, &KeyColumns::none(), false, false),
            UNKNOWN_TYPE_MARKER
        );
    }
}

#[test]
fn test_varchar_boundary_follows_vendor_limit() {
    for profile in all_profiles() {
        let max = profile.capabilities().max_inline_varchar_length;
        let below = CanonicalColumn::new("S", LogicalType::String).with_length(max - 1);
        let at = CanonicalColumn::new("S", LogicalType::String).with_length(max);
        let tokens = profile.type_tokens();
        assert_eq!(
            profile.field_definition(&below, &KeyColumns::none(), false, false),
            format!("{}({})", tokens.varchar, max - 1),
            "{}",
            profile.name()
        );
        assert_eq!(
            profile.field_definition(&at, &KeyColumns::none(), false, false),
            tokens.large_text,
            "{}",
            profile.name()
        );
    }
}

#[test]
fn test_sql_server_statements() {
    let profile = MsSqlProfile::default();
    let column = CanonicalColumn::new("NAME", LogicalType::String).with_length(50);
    let keys = KeyColumns::none();

    assert_eq!(
        profile.add_column_statement("dbo.customer", &column, &keys),
        "ALTER TABLE dbo.customer ADD NAME VARCHAR(50)"
    );
    assert_eq!(
        profile.modify_column_statement("dbo.customer", &column, &keys),
        "ALTER TABLE dbo.customer ALTER COLUMN NAME VARCHAR(50)"
    );
    assert_eq!(
        profile.drop_column_statement("dbo.customer", &column, &keys),
        "ALTER TABLE dbo.customer DROP COLUMN NAME"
    );
    assert_eq!(
        profile.column_exists_sql("NAME", "dbo.customer"),
        "SELECT TOP 1 NAME FROM dbo.customer"
    );
    assert_eq!(
        profile.table_exists_sql("dbo.customer"),
        "SELECT TOP 1 * FROM dbo.customer"
    );
    assert_eq!(
        profile.lock_tables_statement(&["dbo.a", "dbo.b"]).unwrap(),
        "SELECT top 0 * FROM dbo.a WITH (UPDLOCK, HOLDLOCK);\n\
         SELECT top 0 * FROM dbo.b WITH (UPDLOCK, HOLDLOCK);\n"
    );
    assert_eq!(
        profile.insert_unknown_dimension_row_sql("dbo.dim", "ID", "VERSION"),
        "insert into dbo.dim(VERSION) values (1)"
    );
}

#[test]
fn test_sql_server_sequences() {
    let profile = MsSqlProfile::default();
    assert_eq!(
        profile.next_sequence_value_sql("seq_batch").unwrap(),
        "SELECT NEXT VALUE FOR seq_batch"
    );
    assert_eq!(
        profile.sequence_exists_sql("seq_batch").unwrap(),
        "SELECT 1 FROM sys.sequences WHERE name = 'seq_batch'"
    );
    assert_eq!(
        profile.sequence_exists_sql("it's").unwrap(),
        "SELECT 1 FROM sys.sequences WHERE name = 'it''s'"
    );
}

#[test]
fn test_schema_table_separator() {
    let plain = DialectRegistry::with_builtins()
        .create("mssql", &Attributes::new())
        .unwrap();
    assert_eq!(plain.combine_schema_and_table("S", "T"), "S.T");

    let doubled = DialectRegistry::with_builtins()
        .create("mssql", &attrs(&[("DOUBLE_DECIMAL_SEPARATOR", "Y")]))
        .unwrap();
    assert_eq!(doubled.combine_schema_and_table("S", "T"), "S..T");
    assert_eq!(doubled.quoted_schema_table(Some("S"), "T"), "S..T");
    assert_eq!(doubled.quoted_schema_table(Some(""), "T"), "T");
}

#[test]
fn test_capability_gated_sql_matches_flags() {
    for profile in all_profiles() {
        let caps = profile.capabilities().clone();
        let name = profile.name();
        assert_eq!(
            profile.next_sequence_value_sql("s").is_some(),
            caps.supports_sequences,
            "{name}"
        );
        assert_eq!(
            profile.current_sequence_value_sql("s").is_some(),
            caps.supports_sequences,
            "{name}"
        );
        assert_eq!(
            profile.sequence_exists_sql("s").is_some(),
            caps.supports_sequences,
            "{name}"
        );
        assert_eq!(
            profile.list_sequences_sql().is_some(),
            caps.supports_sequences,
            "{name}"
        );
        assert_eq!(
            profile.list_schemas_sql().is_some(),
            caps.supports_schemas,
            "{name}"
        );
    }
}

#[test]
fn test_boolean_capability_from_attributes() {
    let registry = DialectRegistry::with_builtins();
    let column = CanonicalColumn::new("ACTIVE", LogicalType::Boolean);

    let off = registry.create("mssql", &Attributes::new()).unwrap();
    assert_eq!(
        off.field_definition(&column, &KeyColumns::none(), false, false),
        "CHAR(1)"
    );

    let on = registry
        .create("mssql", &attrs(&[("supports_boolean_data_type", "yes")]))
        .unwrap();
    assert_eq!(
        on.field_definition(&column, &KeyColumns::none(), false, false),
        "BIT"
    );

    let pg_off = registry
        .create("postgresql", &attrs(&[("SUPPORTS_BOOLEAN_DATA_TYPE", "N")]))
        .unwrap();
    assert_eq!(
        pg_off.field_definition(&column, &KeyColumns::none(), false, false),
        "CHAR(1)"
    );
}

#[test]
fn test_unknown_attributes_are_ignored() {
    let profile = DialectRegistry::with_builtins()
        .create("mssql", &attrs(&[("SOME_FUTURE_OPTION", "Y")]))
        .unwrap();
    assert_eq!(profile.combine_schema_and_table("S", "T"), "S.T");
}

#[test]
fn test_quote_string_literal_doubles_quotes() {
    for profile in all_profiles() {
        assert_eq!(profile.quote_string_literal("a'b"), "'a''b'", "{}", profile.name());
    }
}

/// Evaluate a `'..' op fn(n) op '..'` concatenation back into the string it denotes
fn eval_concat(expr: &str, function: &str) -> String {
    let mut out = String::new();
    let mut rest = expr;
    while !rest.is_empty() {
        if let Some(body) = rest.strip_prefix('\'') {
            let mut chars = body.char_indices().peekable();
            let mut end = body.len();
            while let Some((i, c)) = chars.next() {
                if c == '\'' {
                    if matches!(chars.peek(), Some((_, '\''))) {
                        out.push('\'');
                        chars.next();
                    } else {
                        end = i + 1;
                        break;
                    }
                } else {
                    out.push(c);
                }
            }
            rest = &body[end..];
        } else if let Some(call) = rest.strip_prefix(function).and_then(|r| r.strip_prefix('(')) {
            let close = call.find(')').unwrap();
            let code: u32 = call[..close].parse().unwrap();
            out.push(char::from_u32(code).unwrap());
            rest = &call[close + 1..];
        } else {
            // concatenation operator
            let mut chars = rest.chars();
            chars.next();
            rest = chars.as_str();
        }
    }
    out
}

#[test]
fn test_line_break_rewrite_reproduces_input() {
    let input = "first line\r\nit's second\nthird\r";

    let mssql = MsSqlProfile::default().quote_string_literal(input);
    assert_eq!(
        MsSqlProfile::default().quote_string_literal("a\r\nb"),
        "'a'+char(13)+''+char(10)+'b'"
    );
    assert_eq!(eval_concat(&mssql, "char"), input);

    let pg = PostgresProfile::default().quote_string_literal(input);
    assert_eq!(eval_concat(&pg, "chr"), input);
}

#[test]
fn test_mysql_literals_use_escapes() {
    assert_eq!(
        MySqlProfile::default().quote_string_literal("a\r\nb\\c"),
        "'a\\r\\nb\\\\c'"
    );
    assert_eq!(
        GenericProfile::default().quote_string_literal("a\nb"),
        "'a\nb'"
    );
}

#[test]
fn test_quote_field_honours_options() {
    let registry = DialectRegistry::with_builtins();

    let quote_all = registry
        .create("postgresql", &attrs(&[("QUOTE_ALL_FIELDS", "Y")]))
        .unwrap();
    assert_eq!(quote_all.quote_field("amount"), "\"amount\"");

    let lower = registry
        .create(
            "postgresql",
            &attrs(&[
                ("FORCE_IDENTIFIERS_TO_LOWERCASE", "Y"),
                ("FORCE_IDENTIFIERS_TO_UPPERCASE", "Y"),
            ]),
        )
        .unwrap();
    assert_eq!(lower.quote_field("Amount"), "amount");

    let plain = registry.create("postgresql", &Attributes::new()).unwrap();
    assert_eq!(plain.quote_field("order"), "\"order\"");
    assert_eq!(plain.quote_field("first name"), "\"first name\"");
    assert_eq!(plain.quote_field("\"already\""), "\"already\"");
    assert_eq!(plain.quote_field(""), "");
    assert_eq!(plain.quote_field("Café"), "Café");
}

#[test]
fn test_empty_lock_list_has_no_statement() {
    for profile in all_profiles() {
        assert!(
            profile.lock_tables_statement(&[]).is_none(),
            "{} locks an empty table list",
            profile.name()
        );
        assert!(
            profile.unlock_tables_statement(&[]).is_none(),
            "{} unlocks an empty table list",
            profile.name()
        );
    }
}

#[test]
fn test_generated_ddl_parses_for_every_vendor() {
    let column = CanonicalColumn::new("customer_name", LogicalType::String).with_length(50);
    let keys = KeyColumns::none();

    for vendor in Vendor::ALL {
        let profile = vendor.profile(&Attributes::new());
        let dialect = profile.parser_dialect();
        for sql in [
            profile.add_column_statement("customer", &column, &keys),
            profile.drop_column_statement("customer", &column, &keys),
        ] {
            let parsed = Parser::parse_sql(&*dialect, &sql);
            assert!(parsed.is_ok(), "{vendor}: {sql}: {parsed:?}");
        }
    }
}

#[test]
fn test_default_ports() {
    use dialectkit_core::AccessMode;

    let expected = [
        (Vendor::MsSql, Some(1433)),
        (Vendor::PostgreSql, Some(5432)),
        (Vendor::MySql, Some(3306)),
        (Vendor::Generic, None),
    ];
    for (vendor, port) in expected {
        assert_eq!(
            vendor.profile(&Attributes::new()).default_port(AccessMode::Native),
            port,
            "{vendor}"
        );
    }
}
