//! String literal quoting

/// How embedded line breaks are written inside a literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineBreaks {
    /// Close the literal, concatenate a character function call, reopen:
    /// `'a'+char(13)+'b'`
    Concat {
        operator: &'static str,
        function: &'static str,
    },
    /// Backslash escape sequences (`\r`, `\n`)
    Escape,
    /// Keep the characters as they are
    Verbatim,
}

/// Vendor lexical rules for string literals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralStyle {
    /// Backslash is an escape character and must itself be escaped
    pub backslash_escapes: bool,
    pub line_breaks: LineBreaks,
}

impl LiteralStyle {
    pub const STANDARD: LiteralStyle = LiteralStyle {
        backslash_escapes: false,
        line_breaks: LineBreaks::Verbatim,
    };
}

/// Quote `value` as a single-quoted literal.
///
/// Embedded quotes are doubled; carriage return and line feed are rewritten
/// according to `style` so the result stays one expression.
pub fn quote_literal(value: &str, style: &LiteralStyle) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        match ch {
            '\'' => quoted.push_str("''"),
            '\\' if style.backslash_escapes => quoted.push_str("\\\\"),
            '\r' | '\n' => push_line_break(&mut quoted, ch, style.line_breaks),
            _ => quoted.push(ch),
        }
    }
    quoted.push('\'');
    quoted
}

fn push_line_break(quoted: &mut String, ch: char, line_breaks: LineBreaks) {
    match line_breaks {
        LineBreaks::Concat { operator, function } => {
            quoted.push('\'');
            quoted.push_str(operator);
            quoted.push_str(function);
            quoted.push('(');
            quoted.push_str(&u32::from(ch).to_string());
            quoted.push(')');
            quoted.push_str(operator);
            quoted.push('\'');
        }
        LineBreaks::Escape => quoted.push_str(if ch == '\r' { "\\r" } else { "\\n" }),
        LineBreaks::Verbatim => quoted.push(ch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TSQL: LiteralStyle = LiteralStyle {
        backslash_escapes: false,
        line_breaks: LineBreaks::Concat {
            operator: "+",
            function: "char",
        },
    };

    #[test]
    fn test_quotes_are_doubled() {
        assert_eq!(quote_literal("a'b", &LiteralStyle::STANDARD), "'a''b'");
        assert_eq!(quote_literal("", &LiteralStyle::STANDARD), "''");
    }

    #[test]
    fn test_concat_line_breaks() {
        assert_eq!(
            quote_literal("a\r\nb", &TSQL),
            "'a'+char(13)+''+char(10)+'b'"
        );
    }

    #[test]
    fn test_escape_style() {
        let style = LiteralStyle {
            backslash_escapes: true,
            line_breaks: LineBreaks::Escape,
        };
        assert_eq!(quote_literal("c:\\tmp\n'x'", &style), "'c:\\\\tmp\\n''x'''");
    }

    #[test]
    fn test_verbatim_keeps_line_breaks() {
        assert_eq!(quote_literal("a\nb", &LiteralStyle::STANDARD), "'a\nb'");
    }
}
