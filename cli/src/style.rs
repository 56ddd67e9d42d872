//! Terminal syntax highlighting for emitted DDL.
//!
//! Statements are colored by what they do: green for creation, yellow for
//! in-place alteration, red for removal, with type names and literals in
//! their own colors.

use std::io::{self, IsTerminal, Write};

use colored::Colorize;
use spandiff_core::printer::{PrintContext, Printer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Whether highlighting should be applied for stdout.
    pub fn enabled(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => io::stdout().is_terminal(),
        }
    }
}

/// Keyword-classifying printer built on `colored`.
#[derive(Debug, Default)]
pub struct ColorPrinter;

impl Printer for ColorPrinter {
    fn print(&self, _ctx: PrintContext, out: &mut dyn Write, sql: &str) -> io::Result<()> {
        out.write_all(highlight(sql).as_bytes())
    }
}

const TYPE_KEYWORDS: &[&str] = &[
    "BOOL", "INT64", "FLOAT32", "FLOAT64", "STRING", "BYTES", "DATE", "TIMESTAMP", "NUMERIC",
    "JSON", "INTERVAL", "TOKENLIST", "ARRAY", "STRUCT",
];

const KEYWORDS: &[&str] = &[
    "TABLE", "INDEX", "SCHEMA", "VIEW", "MODEL", "SEQUENCE", "CHANGE", "STREAM", "SEARCH",
    "VECTOR", "PROPERTY", "GRAPH", "PROTO", "BUNDLE", "ROLE", "DATABASE", "COLUMN", "CONSTRAINT",
    "PRIMARY", "KEY", "FOREIGN", "REFERENCES", "CHECK", "NOT", "NULL", "DEFAULT", "OPTIONS",
    "STORING", "STORED", "ON", "TO", "FROM", "FOR", "ALL", "GRANT", "REVOKE", "SELECT", "UPDATE",
    "INSERT", "UNIQUE", "NULL_FILTERED", "INTERLEAVE", "IN", "PARENT", "ROW", "DELETION",
    "POLICY", "SYNONYM", "SET", "AS", "SQL", "SECURITY", "INVOKER", "DEFINER", "OR", "IF",
    "EXISTS", "NODE", "TABLES", "EDGE", "SOURCE", "DESTINATION", "INPUT", "OUTPUT", "REMOTE",
    "EXECUTE", "FUNCTION", "WHERE", "AND", "ASC", "DESC", "MAX",
];

fn highlight(sql: &str) -> String {
    let mut output = String::with_capacity(sql.len());
    let mut chars = sql.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if c.is_alphanumeric() || c == '_' {
            let mut end = start + c.len_utf8();
            while let Some(&(i, next)) = chars.peek() {
                if next.is_alphanumeric() || next == '_' {
                    chars.next();
                    end = i + next.len_utf8();
                } else {
                    break;
                }
            }
            output.push_str(&colorize_word(&sql[start..end]));
        } else if c == '\'' {
            let mut end = start + 1;
            for (i, next) in chars.by_ref() {
                end = i + next.len_utf8();
                if next == '\'' {
                    break;
                }
            }
            output.push_str(&sql[start..end].green().to_string());
        } else {
            output.push(c);
        }
    }
    output
}

fn colorize_word(word: &str) -> String {
    let upper = word.to_ascii_uppercase();
    match upper.as_str() {
        // Statement verbs, by effect.
        "CREATE" | "ADD" => word.green().bold().to_string(),
        "ALTER" | "REPLACE" => word.yellow().bold().to_string(),
        "DROP" | "DELETE" => word.red().bold().to_string(),
        _ if TYPE_KEYWORDS.contains(&upper.as_str()) => word.cyan().bold().to_string(),
        _ if KEYWORDS.contains(&upper.as_str()) => word.blue().bold().to_string(),
        _ if word.chars().all(|c| c.is_ascii_digit()) => word.yellow().to_string(),
        _ => word.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test: the color override is process-global.
    #[test]
    fn test_highlight_respects_color_override() {
        colored::control::set_override(false);
        let sql = "CREATE TABLE T1 (C1 INT64 NOT NULL) PRIMARY KEY (C1);";
        assert_eq!(highlight(sql), sql);

        colored::control::set_override(true);
        assert!(highlight("DROP TABLE T1;").contains("\u{1b}["));
        colored::control::unset_override();
    }
}
