//! DDL parser built on nom.
//!
//! Covers the Cloud Spanner schema-update surface this tool consumes and
//! emits, so its own output re-parses. Expressions (defaults, checks, row
//! deletion policies, view queries) are captured as raw text with balanced
//! delimiters rather than parsed into sub-ASTs.

mod grant;
mod statements;
mod table;
mod tokens;

#[cfg(test)]
mod tests;

use nom::IResult;

use crate::ast::Ddl;
use crate::error::{SpandiffError, SpandiffResult};
use tokens::{kws, opt_kws, sp};

/// Parse a sequence of `;`-separated DDL statements. Blank input is an
/// empty schema.
pub fn parse_ddls(input: &str) -> SpandiffResult<Vec<Ddl>> {
    let mut ddls = Vec::new();
    let mut rest = input;
    loop {
        let (r, _) = sp(rest).map_err(|_| unterminated(input, rest))?;
        rest = r;
        if let Some(r) = rest.strip_prefix(';') {
            rest = r;
            continue;
        }
        if rest.is_empty() {
            return Ok(ddls);
        }
        match statement(rest) {
            Ok((r, ddl)) => {
                ddls.push(ddl);
                rest = r;
            }
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                return Err(SpandiffError::parse(
                    offset(input, e.input),
                    "expected a DDL statement",
                ));
            }
            Err(nom::Err::Incomplete(_)) => {
                return Err(SpandiffError::parse(input.len(), "unexpected end of input"));
            }
        }
    }
}

fn offset(input: &str, rest: &str) -> usize {
    input.len().saturating_sub(rest.len())
}

fn unterminated(input: &str, rest: &str) -> SpandiffError {
    SpandiffError::parse(offset(input, rest), "unterminated comment")
}

fn statement(input: &str) -> IResult<&str, Ddl> {
    if let Ok((input, _)) = kws(input, &["CREATE"]) {
        return create_statement(input);
    }
    if let Ok((input, _)) = kws(input, &["ALTER"]) {
        return alter_statement(input);
    }
    if let Ok((input, _)) = kws(input, &["DROP"]) {
        return statements::drop_statement(input);
    }
    if let Ok((input, _)) = kws(input, &["GRANT"]) {
        let (input, grant) = grant::grant(input)?;
        return Ok((input, Ddl::Grant(grant)));
    }
    let (input, _) = kws(input, &["REVOKE"])?;
    let (input, revoke) = grant::revoke(input)?;
    Ok((input, Ddl::Revoke(revoke)))
}

fn create_statement(input: &str) -> IResult<&str, Ddl> {
    let (input, or_replace) = opt_kws(input, &["OR", "REPLACE"])?;

    if let Ok((input, _)) = kws(input, &["VIEW"]) {
        let (input, view) = statements::create_view(input, or_replace)?;
        return Ok((input, Ddl::CreateView(view)));
    }
    if let Ok((input, _)) = kws(input, &["MODEL"]) {
        let (input, model) = statements::create_model(input, or_replace)?;
        return Ok((input, Ddl::CreateModel(model)));
    }
    if let Ok((input, _)) = kws(input, &["PROPERTY", "GRAPH"]) {
        let (input, graph) = statements::create_property_graph(input, or_replace)?;
        return Ok((input, Ddl::CreatePropertyGraph(graph)));
    }
    if or_replace {
        // OR REPLACE exists only for views, models and property graphs.
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Fail,
        )));
    }

    if let Ok((input, _)) = kws(input, &["SCHEMA"]) {
        let (input, schema) = statements::create_schema(input)?;
        return Ok((input, Ddl::CreateSchema(schema)));
    }
    if let Ok((input, _)) = kws(input, &["TABLE"]) {
        let (input, table) = table::create_table(input)?;
        return Ok((input, Ddl::CreateTable(table)));
    }
    if let Ok((input, _)) = kws(input, &["SEARCH", "INDEX"]) {
        let (input, index) = statements::create_search_index(input)?;
        return Ok((input, Ddl::CreateSearchIndex(index)));
    }
    if let Ok((input, _)) = kws(input, &["VECTOR", "INDEX"]) {
        let (input, index) = statements::create_vector_index(input)?;
        return Ok((input, Ddl::CreateVectorIndex(index)));
    }
    if let Ok((input, _)) = kws(input, &["CHANGE", "STREAM"]) {
        let (input, stream) = statements::create_change_stream(input)?;
        return Ok((input, Ddl::CreateChangeStream(stream)));
    }
    if let Ok((input, _)) = kws(input, &["SEQUENCE"]) {
        let (input, sequence) = statements::create_sequence(input)?;
        return Ok((input, Ddl::CreateSequence(sequence)));
    }
    if let Ok((input, _)) = kws(input, &["PROTO", "BUNDLE"]) {
        let (input, bundle) = statements::create_proto_bundle(input)?;
        return Ok((input, Ddl::CreateProtoBundle(bundle)));
    }
    if let Ok((input, _)) = kws(input, &["ROLE"]) {
        let (input, role) = statements::create_role(input)?;
        return Ok((input, Ddl::CreateRole(role)));
    }
    // CREATE [UNIQUE] [NULL_FILTERED] INDEX
    let (input, index) = statements::create_index(input)?;
    Ok((input, Ddl::CreateIndex(index)))
}

fn alter_statement(input: &str) -> IResult<&str, Ddl> {
    if let Ok((input, _)) = kws(input, &["DATABASE"]) {
        let (input, database) = statements::alter_database(input)?;
        return Ok((input, Ddl::AlterDatabase(database)));
    }
    if let Ok((input, _)) = kws(input, &["TABLE"]) {
        let (input, alter) = table::alter_table(input)?;
        return Ok((input, Ddl::AlterTable(alter)));
    }
    if let Ok((input, _)) = kws(input, &["SEARCH", "INDEX"]) {
        let (input, alter) = statements::alter_search_index(input)?;
        return Ok((input, Ddl::AlterSearchIndex(alter)));
    }
    if let Ok((input, _)) = kws(input, &["INDEX"]) {
        let (input, alter) = statements::alter_index(input)?;
        return Ok((input, Ddl::AlterIndex(alter)));
    }
    if let Ok((input, _)) = kws(input, &["CHANGE", "STREAM"]) {
        let (input, alter) = statements::alter_change_stream(input)?;
        return Ok((input, Ddl::AlterChangeStream(alter)));
    }
    if let Ok((input, _)) = kws(input, &["SEQUENCE"]) {
        let (input, alter) = statements::alter_sequence(input)?;
        return Ok((input, Ddl::AlterSequence(alter)));
    }
    if let Ok((input, _)) = kws(input, &["MODEL"]) {
        let (input, alter) = statements::alter_model(input)?;
        return Ok((input, Ddl::AlterModel(alter)));
    }
    let (input, _) = kws(input, &["PROTO", "BUNDLE"])?;
    let (input, alter) = statements::alter_proto_bundle(input)?;
    Ok((input, Ddl::AlterProtoBundle(alter)))
}
