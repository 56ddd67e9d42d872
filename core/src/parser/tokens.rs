//! Lexical building blocks shared by the statement parsers.

use nom::bytes::complete::take_while1;
use nom::error::{Error, ErrorKind};
use nom::{IResult, Parser};

use crate::ast::types::{ScalarTypeName, SchemaType, TypeSize};
use crate::ast::{OptionRecord, Options, Path, RawExpr};

/// Skip whitespace, `-- line` comments and `/* block */` comments.
pub fn sp(input: &str) -> IResult<&str, ()> {
    let mut rest = input;
    loop {
        let trimmed = rest.trim_start();
        if let Some(after) = trimmed.strip_prefix("--") {
            rest = after.split_once('\n').map_or("", |(_, tail)| tail);
        } else if let Some(after) = trimmed.strip_prefix("/*") {
            match after.split_once("*/") {
                Some((_, tail)) => rest = tail,
                None => return Err(nom_failure(trimmed)),
            }
        } else {
            return Ok((trimmed, ()));
        }
    }
}

fn nom_error(input: &str) -> nom::Err<Error<&str>> {
    nom::Err::Error(Error::new(input, ErrorKind::Fail))
}

fn nom_failure(input: &str) -> nom::Err<Error<&str>> {
    nom::Err::Failure(Error::new(input, ErrorKind::Fail))
}

fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_').parse(input)
}

/// Match one keyword token case-insensitively, with a word boundary.
pub fn kw<'a>(input: &'a str, keyword: &str) -> IResult<&'a str, ()> {
    let (rest, token) = word(input)?;
    if token.eq_ignore_ascii_case(keyword) {
        Ok((rest, ()))
    } else {
        Err(nom_error(input))
    }
}

/// Match a sequence of keyword tokens separated by whitespace.
pub fn kws<'a>(input: &'a str, keywords: &[&str]) -> IResult<&'a str, ()> {
    let mut rest = input;
    for keyword in keywords {
        let (r, _) = sp(rest)?;
        let (r, _) = kw(r, keyword)?;
        rest = r;
    }
    Ok((rest, ()))
}

/// Optionally match a keyword sequence; returns whether it was present.
pub fn opt_kws<'a>(input: &'a str, keywords: &[&str]) -> IResult<&'a str, bool> {
    match kws(input, keywords) {
        Ok((rest, ())) => Ok((rest, true)),
        Err(_) => Ok((input, false)),
    }
}

/// Peek a keyword sequence without consuming it.
pub fn peek_kws(input: &str, keywords: &[&str]) -> bool {
    kws(input, keywords).is_ok()
}

/// A bare or backquoted identifier.
pub fn ident(input: &str) -> IResult<&str, String> {
    if let Some(after) = input.strip_prefix('`') {
        match after.split_once('`') {
            Some((name, rest)) => return Ok((rest, name.to_string())),
            None => return Err(nom_failure(input)),
        }
    }
    let (rest, token) = word(input)?;
    if token.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return Err(nom_error(input));
    }
    Ok((rest, token.to_string()))
}

/// A dotted identifier path.
pub fn path(input: &str) -> IResult<&str, Path> {
    let (mut rest, first) = ident(input)?;
    let mut idents = vec![first];
    while let Some(after) = rest.strip_prefix('.') {
        let (r, next) = ident(after)?;
        idents.push(next);
        rest = r;
    }
    Ok((rest, Path { idents }))
}

pub fn symbol(input: &str, expected: char) -> IResult<&str, ()> {
    let (input, _) = sp(input)?;
    match input.strip_prefix(expected) {
        Some(rest) => Ok((rest, ())),
        None => Err(nom_error(input)),
    }
}

pub fn opt_symbol(input: &str, expected: char) -> IResult<&str, bool> {
    match symbol(input, expected) {
        Ok((rest, ())) => Ok((rest, true)),
        Err(_) => Ok((input, false)),
    }
}

/// A comma-separated list of identifiers.
pub fn ident_list(input: &str) -> IResult<&str, Vec<String>> {
    let (mut rest, first) = preceded_sp(input, ident)?;
    let mut idents = vec![first];
    loop {
        let (r, comma) = opt_symbol(rest, ',')?;
        if !comma {
            return Ok((rest, idents));
        }
        let (r, next) = preceded_sp(r, ident)?;
        idents.push(next);
        rest = r;
    }
}

/// A parenthesized comma-separated identifier list.
pub fn paren_ident_list(input: &str) -> IResult<&str, Vec<String>> {
    let (input, _) = symbol(input, '(')?;
    let (input, idents) = ident_list(input)?;
    let (input, _) = symbol(input, ')')?;
    Ok((input, idents))
}

pub fn preceded_sp<'a, T>(
    input: &'a str,
    parser: impl Fn(&'a str) -> IResult<&'a str, T>,
) -> IResult<&'a str, T> {
    let (input, _) = sp(input)?;
    parser(input)
}

/// Capture the raw text of a parenthesized expression, handling nested
/// parentheses and quoted literals. Returns the trimmed inner text.
pub fn paren_raw(input: &str) -> IResult<&str, RawExpr> {
    let (input, _) = symbol(input, '(')?;
    let mut depth = 0usize;
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    let inner = input[..i].trim();
                    return Ok((&input[i + 1..], RawExpr(inner.to_string())));
                }
                depth -= 1;
            }
            '\'' | '"' | '`' => {
                if !skip_quoted(&mut chars, c) {
                    return Err(nom_failure(input));
                }
            }
            _ => {}
        }
    }
    Err(nom_failure(input))
}

/// Advance past a quoted literal; returns false when it never closes.
fn skip_quoted(chars: &mut std::str::CharIndices<'_>, quote: char) -> bool {
    let mut escaped = false;
    for (_, c) in chars.by_ref() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return true;
        }
    }
    false
}

/// Capture raw text up to the next top-level `;` or end of input
/// (view queries and other statement tails).
pub fn raw_statement_tail(input: &str) -> IResult<&str, RawExpr> {
    let mut depth = 0usize;
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                return Ok((&input[i..], RawExpr(input[..i].trim().to_string())));
            }
            '\'' | '"' | '`' => {
                if !skip_quoted(&mut chars, c) {
                    return Err(nom_failure(input));
                }
            }
            _ => {}
        }
    }
    Ok(("", RawExpr(input.trim().to_string())))
}

/// Split a raw clause body on top-level commas.
fn split_top_level(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut chars = body.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            '\'' | '"' | '`' => {
                let _ = skip_quoted(&mut chars, c);
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

/// An `OPTIONS (name = value, ...)` clause.
pub fn options_clause(input: &str) -> IResult<&str, Options> {
    let (input, _) = sp(input)?;
    let (input, _) = kw(input, "OPTIONS")?;
    let (rest, body) = paren_raw(input)?;
    let mut records = Vec::new();
    for part in split_top_level(&body.0) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let Some((name, value)) = part.split_once('=') else {
            return Err(nom_failure(input));
        };
        records.push(OptionRecord {
            name: name.trim().to_string(),
            value: RawExpr(value.trim().to_string()),
        });
    }
    Ok((rest, Options { records }))
}

pub fn opt_options_clause(input: &str) -> IResult<&str, Option<Options>> {
    match options_clause(input) {
        Ok((rest, options)) => Ok((rest, Some(options))),
        Err(nom::Err::Failure(e)) => Err(nom::Err::Failure(e)),
        Err(_) => Ok((input, None)),
    }
}

pub fn number_u64(input: &str) -> IResult<&str, u64> {
    let (rest, digits) = take_while1(|c: char| c.is_ascii_digit()).parse(input)?;
    match digits.parse() {
        Ok(n) => Ok((rest, n)),
        Err(_) => Err(nom_error(input)),
    }
}

/// A column type: scalar, sized, array or a named proto/enum type.
pub fn schema_type(input: &str) -> IResult<&str, SchemaType> {
    let (input, _) = sp(input)?;
    if kw(input, "ARRAY").is_ok() {
        let (input, _) = kw(input, "ARRAY")?;
        let (input, _) = symbol(input, '<')?;
        let (input, item) = schema_type(input)?;
        let (input, _) = symbol(input, '>')?;
        return Ok((input, SchemaType::Array(Box::new(item))));
    }

    let (rest, type_path) = path(input)?;
    if type_path.idents.len() == 1 {
        let name = type_path.idents[0].to_ascii_uppercase();
        let scalar = match name.as_str() {
            "BOOL" => Some(ScalarTypeName::Bool),
            "INT64" => Some(ScalarTypeName::Int64),
            "FLOAT32" => Some(ScalarTypeName::Float32),
            "FLOAT64" => Some(ScalarTypeName::Float64),
            "NUMERIC" => Some(ScalarTypeName::Numeric),
            "DATE" => Some(ScalarTypeName::Date),
            "TIMESTAMP" => Some(ScalarTypeName::Timestamp),
            "INTERVAL" => Some(ScalarTypeName::Interval),
            "JSON" => Some(ScalarTypeName::Json),
            "TOKENLIST" => Some(ScalarTypeName::TokenList),
            "STRING" => Some(ScalarTypeName::String),
            "BYTES" => Some(ScalarTypeName::Bytes),
            _ => None,
        };
        if let Some(scalar) = scalar {
            let (rest, open) = opt_symbol(rest, '(')?;
            if !open {
                return Ok((rest, SchemaType::Scalar(scalar)));
            }
            let (rest, _) = sp(rest)?;
            let (rest, size) = if let Ok((rest, _)) = kw(rest, "MAX") {
                (rest, TypeSize::Max)
            } else {
                let (rest, n) = number_u64(rest)?;
                (rest, TypeSize::Limit(n))
            };
            let (rest, _) = symbol(rest, ')')?;
            return Ok((rest, SchemaType::Sized(scalar, size)));
        }
    }
    Ok((rest, SchemaType::Named(type_path.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sp_skips_comments() {
        let (rest, _) = sp("  -- a comment\n /* block */ CREATE").unwrap();
        assert_eq!(rest, "CREATE");
    }

    #[test]
    fn test_kw_word_boundary() {
        assert!(kw("FOR ALL", "FOR").is_ok());
        assert!(kw("FORMAT", "FOR").is_err());
    }

    #[test]
    fn test_paren_raw_nested() {
        let (rest, expr) = paren_raw("(OLDER_THAN(Ts, INTERVAL 1 DAY)) rest").unwrap();
        assert_eq!(expr.0, "OLDER_THAN(Ts, INTERVAL 1 DAY)");
        assert_eq!(rest, " rest");
    }

    #[test]
    fn test_options_clause() {
        let (_, options) = options_clause("OPTIONS (a = 1, b = 'x,y')").unwrap();
        assert_eq!(options.records.len(), 2);
        assert_eq!(options.records[0].name, "a");
        assert_eq!(options.records[1].value.0, "'x,y'");
    }

    #[test]
    fn test_schema_type_forms() {
        assert_eq!(
            schema_type("INT64").unwrap().1,
            SchemaType::Scalar(ScalarTypeName::Int64)
        );
        assert_eq!(
            schema_type("STRING(MAX)").unwrap().1,
            SchemaType::Sized(ScalarTypeName::String, TypeSize::Max)
        );
        assert_eq!(
            schema_type("ARRAY<BYTES(10)>").unwrap().1,
            SchemaType::Array(Box::new(SchemaType::Sized(
                ScalarTypeName::Bytes,
                TypeSize::Limit(10)
            )))
        );
        assert_eq!(
            schema_type("a.b.Message").unwrap().1,
            SchemaType::Named("a.b.Message".into())
        );
    }
}
