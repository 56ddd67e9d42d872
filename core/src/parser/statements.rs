//! Parsers for every statement other than tables and grants.

use nom::IResult;
use nom::error::{Error, ErrorKind};

use super::tokens::*;
use crate::ast::*;

fn fail(input: &str) -> nom::Err<Error<&str>> {
    nom::Err::Error(Error::new(input, ErrorKind::Fail))
}

pub fn create_schema(input: &str) -> IResult<&str, CreateSchema> {
    let (input, name) = preceded_sp(input, ident)?;
    Ok((input, CreateSchema { name }))
}

/// `[UNIQUE] [NULL_FILTERED] INDEX [IF NOT EXISTS] name ON table (...) ...`
pub fn create_index(input: &str) -> IResult<&str, CreateIndex> {
    let (input, unique) = opt_kws(input, &["UNIQUE"])?;
    let (input, null_filtered) = opt_kws(input, &["NULL_FILTERED"])?;
    let (input, _) = kws(input, &["INDEX"])?;
    let (input, if_not_exists) = opt_kws(input, &["IF", "NOT", "EXISTS"])?;
    let (input, name) = preceded_sp(input, path)?;
    let (input, _) = kws(input, &["ON"])?;
    let (input, table) = preceded_sp(input, path)?;
    let (input, _) = symbol(input, '(')?;
    let (input, keys) = super::table::index_key_list(input)?;
    let (input, _) = symbol(input, ')')?;
    let (input, storing) = opt_storing(input)?;
    let (input, interleave_in) = match interleave_after_comma(input) {
        Ok((input, ())) => {
            let (input, parent) = preceded_sp(input, path)?;
            (input, Some(parent))
        }
        Err(_) => (input, None),
    };
    Ok((
        input,
        CreateIndex {
            unique,
            null_filtered,
            if_not_exists,
            name,
            table,
            keys,
            storing,
            interleave_in,
        },
    ))
}

fn interleave_after_comma(input: &str) -> IResult<&str, ()> {
    let (input, comma) = opt_symbol(input, ',')?;
    if !comma {
        return Err(fail(input));
    }
    kws(input, &["INTERLEAVE", "IN"])
}

fn opt_storing(input: &str) -> IResult<&str, Option<Storing>> {
    if let Ok((input, _)) = kws(input, &["STORING"]) {
        let (input, columns) = paren_ident_list(input)?;
        Ok((input, Some(Storing { columns })))
    } else {
        Ok((input, None))
    }
}

/// `SEARCH INDEX name ON table (cols) [STORING (...)] [OPTIONS (...)]`
pub fn create_search_index(input: &str) -> IResult<&str, CreateSearchIndex> {
    let (input, name) = preceded_sp(input, ident)?;
    let (input, _) = kws(input, &["ON"])?;
    let (input, table) = preceded_sp(input, ident)?;
    let (input, token_columns) = paren_ident_list(input)?;
    let (input, storing) = opt_storing(input)?;
    let (input, options) = opt_options_clause(input)?;
    Ok((
        input,
        CreateSearchIndex {
            name,
            table,
            token_columns,
            storing,
            options,
        },
    ))
}

/// `VECTOR INDEX [IF NOT EXISTS] name ON table (col) OPTIONS (...)`
pub fn create_vector_index(input: &str) -> IResult<&str, CreateVectorIndex> {
    let (input, if_not_exists) = opt_kws(input, &["IF", "NOT", "EXISTS"])?;
    let (input, name) = preceded_sp(input, ident)?;
    let (input, _) = kws(input, &["ON"])?;
    let (input, table) = preceded_sp(input, ident)?;
    let (input, _) = symbol(input, '(')?;
    let (input, column) = preceded_sp(input, ident)?;
    let (input, _) = symbol(input, ')')?;
    let (input, options) = options_clause(input)?;
    Ok((
        input,
        CreateVectorIndex {
            if_not_exists,
            name,
            table,
            column,
            options,
        },
    ))
}

/// `PROPERTY GRAPH name NODE TABLES (...) [EDGE TABLES (...)]`
pub fn create_property_graph(input: &str, or_replace: bool) -> IResult<&str, CreatePropertyGraph> {
    let (input, name) = preceded_sp(input, ident)?;
    let (input, _) = kws(input, &["NODE", "TABLES"])?;
    let (input, node_tables) = graph_element_list(input)?;
    let (input, edge_tables) = if let Ok((input, _)) = kws(input, &["EDGE", "TABLES"]) {
        graph_element_list(input)?
    } else {
        (input, Vec::new())
    };
    Ok((
        input,
        CreatePropertyGraph {
            or_replace,
            name,
            node_tables,
            edge_tables,
        },
    ))
}

fn graph_element_list(input: &str) -> IResult<&str, Vec<GraphElementTable>> {
    let (input, _) = symbol(input, '(')?;
    let mut elements = Vec::new();
    let (mut rest, first) = graph_element(input)?;
    elements.push(first);
    loop {
        let (r, comma) = opt_symbol(rest, ',')?;
        if !comma {
            let (r, _) = symbol(rest, ')')?;
            return Ok((r, elements));
        }
        let (r, next) = graph_element(r)?;
        elements.push(next);
        rest = r;
    }
}

fn graph_element(input: &str) -> IResult<&str, GraphElementTable> {
    let (input, name) = preceded_sp(input, ident)?;
    let (input, key) = if peek_kws(input, &["KEY"]) {
        let (input, _) = kws(input, &["KEY"])?;
        let (input, columns) = paren_ident_list(input)?;
        (input, Some(columns))
    } else {
        (input, None)
    };
    let (input, source) = opt_edge_reference(input, "SOURCE")?;
    let (input, destination) = opt_edge_reference(input, "DESTINATION")?;
    Ok((
        input,
        GraphElementTable {
            name,
            key,
            source,
            destination,
        },
    ))
}

fn opt_edge_reference<'a>(
    input: &'a str,
    keyword: &str,
) -> IResult<&'a str, Option<GraphEdgeReference>> {
    if !peek_kws(input, &[keyword]) {
        return Ok((input, None));
    }
    let (input, _) = kws(input, &[keyword, "KEY"])?;
    let (input, keys) = paren_ident_list(input)?;
    let (input, _) = kws(input, &["REFERENCES"])?;
    let (input, table) = preceded_sp(input, ident)?;
    let (input, reference_columns) = paren_ident_list(input)?;
    Ok((
        input,
        Some(GraphEdgeReference {
            keys,
            table,
            reference_columns,
        }),
    ))
}

/// `VIEW name SQL SECURITY INVOKER|DEFINER AS query`
pub fn create_view(input: &str, or_replace: bool) -> IResult<&str, CreateView> {
    let (input, name) = preceded_sp(input, path)?;
    let (input, _) = kws(input, &["SQL", "SECURITY"])?;
    let (input, security) = if let Ok((input, _)) = kws(input, &["INVOKER"]) {
        (input, SqlSecurity::Invoker)
    } else {
        let (input, _) = kws(input, &["DEFINER"])?;
        (input, SqlSecurity::Definer)
    };
    let (input, _) = kws(input, &["AS"])?;
    let (input, _) = sp(input)?;
    let (input, query) = raw_statement_tail(input)?;
    Ok((
        input,
        CreateView {
            or_replace,
            name,
            security,
            query,
        },
    ))
}

/// `CHANGE STREAM name [FOR ALL | FOR t1(c1), t2] [OPTIONS (...)]`
pub fn create_change_stream(input: &str) -> IResult<&str, CreateChangeStream> {
    let (input, name) = preceded_sp(input, ident)?;
    let (input, for_clause) = if peek_kws(input, &["FOR"]) {
        let (input, _) = kws(input, &["FOR"])?;
        let (input, for_clause) = change_stream_for(input)?;
        (input, Some(for_clause))
    } else {
        (input, None)
    };
    let (input, options) = opt_options_clause(input)?;
    Ok((
        input,
        CreateChangeStream {
            name,
            for_clause,
            options,
        },
    ))
}

fn change_stream_for(input: &str) -> IResult<&str, ChangeStreamFor> {
    if let Ok((input, _)) = kws(input, &["ALL"]) {
        return Ok((input, ChangeStreamFor::All));
    }
    let mut tables = Vec::new();
    let (mut rest, first) = change_stream_table(input)?;
    tables.push(first);
    loop {
        let (r, comma) = opt_symbol(rest, ',')?;
        if !comma {
            return Ok((rest, ChangeStreamFor::Tables(tables)));
        }
        let (r, next) = change_stream_table(r)?;
        tables.push(next);
        rest = r;
    }
}

fn change_stream_table(input: &str) -> IResult<&str, ChangeStreamTable> {
    let (input, name) = preceded_sp(input, ident)?;
    let (input, open) = opt_symbol(input, '(')?;
    if !open {
        return Ok((
            input,
            ChangeStreamTable {
                name,
                columns: Vec::new(),
            },
        ));
    }
    let (input, columns) = ident_list(input)?;
    let (input, _) = symbol(input, ')')?;
    Ok((input, ChangeStreamTable { name, columns }))
}

pub fn create_sequence(input: &str) -> IResult<&str, CreateSequence> {
    let (input, if_not_exists) = opt_kws(input, &["IF", "NOT", "EXISTS"])?;
    let (input, name) = preceded_sp(input, path)?;
    let (input, options) = opt_options_clause(input)?;
    Ok((
        input,
        CreateSequence {
            if_not_exists,
            name,
            options,
        },
    ))
}

/// `MODEL [IF NOT EXISTS] name [INPUT (...) OUTPUT (...)] [REMOTE] [OPTIONS (...)]`
pub fn create_model(input: &str, or_replace: bool) -> IResult<&str, CreateModel> {
    let (input, if_not_exists) = opt_kws(input, &["IF", "NOT", "EXISTS"])?;
    let (input, name) = preceded_sp(input, ident)?;
    let (input, input_columns) = if let Ok((input, _)) = kws(input, &["INPUT"]) {
        model_column_list(input)?
    } else {
        (input, Vec::new())
    };
    let (input, output_columns) = if let Ok((input, _)) = kws(input, &["OUTPUT"]) {
        model_column_list(input)?
    } else {
        (input, Vec::new())
    };
    let (input, remote) = opt_kws(input, &["REMOTE"])?;
    let (input, options) = opt_options_clause(input)?;
    Ok((
        input,
        CreateModel {
            or_replace,
            if_not_exists,
            name,
            input: input_columns,
            output: output_columns,
            remote,
            options,
        },
    ))
}

fn model_column_list(input: &str) -> IResult<&str, Vec<ModelColumn>> {
    let (input, _) = symbol(input, '(')?;
    let mut columns = Vec::new();
    let (mut rest, first) = model_column(input)?;
    columns.push(first);
    loop {
        let (r, comma) = opt_symbol(rest, ',')?;
        if !comma {
            let (r, _) = symbol(rest, ')')?;
            return Ok((r, columns));
        }
        let (r, next) = model_column(r)?;
        columns.push(next);
        rest = r;
    }
}

fn model_column(input: &str) -> IResult<&str, ModelColumn> {
    let (input, name) = preceded_sp(input, ident)?;
    let (input, ty) = schema_type(input)?;
    Ok((input, ModelColumn { name, ty }))
}

/// `PROTO BUNDLE (`type`, ...)`
pub fn create_proto_bundle(input: &str) -> IResult<&str, CreateProtoBundle> {
    let (input, types) = proto_type_list(input)?;
    Ok((input, CreateProtoBundle { types }))
}

fn proto_type_list(input: &str) -> IResult<&str, Vec<String>> {
    let (input, _) = symbol(input, '(')?;
    let mut types = Vec::new();
    let (mut rest, first) = proto_type_name(input)?;
    types.push(first);
    loop {
        let (r, comma) = opt_symbol(rest, ',')?;
        if !comma {
            let (r, _) = symbol(rest, ')')?;
            return Ok((r, types));
        }
        let (r, next) = proto_type_name(r)?;
        types.push(next);
        rest = r;
    }
}

fn proto_type_name(input: &str) -> IResult<&str, String> {
    let (input, _) = sp(input)?;
    if input.starts_with('`') {
        return ident(input);
    }
    let (input, type_path) = path(input)?;
    Ok((input, type_path.to_string()))
}

pub fn create_role(input: &str) -> IResult<&str, CreateRole> {
    let (input, name) = preceded_sp(input, ident)?;
    Ok((input, CreateRole { name }))
}

pub fn alter_database(input: &str) -> IResult<&str, AlterDatabase> {
    let (input, name) = preceded_sp(input, ident)?;
    let (input, _) = kws(input, &["SET"])?;
    let (input, options) = options_clause(input)?;
    Ok((input, AlterDatabase { name, options }))
}

pub fn alter_index(input: &str) -> IResult<&str, AlterIndex> {
    let (input, name) = preceded_sp(input, path)?;
    let (input, alteration) = index_alteration(input)?;
    Ok((input, AlterIndex { name, alteration }))
}

pub fn alter_search_index(input: &str) -> IResult<&str, AlterSearchIndex> {
    let (input, name) = preceded_sp(input, ident)?;
    let (input, alteration) = index_alteration(input)?;
    Ok((input, AlterSearchIndex { name, alteration }))
}

fn index_alteration(input: &str) -> IResult<&str, IndexAlteration> {
    if let Ok((input, _)) = kws(input, &["ADD", "STORED", "COLUMN"]) {
        let (input, name) = preceded_sp(input, ident)?;
        return Ok((input, IndexAlteration::AddStoredColumn(name)));
    }
    let (input, _) = kws(input, &["DROP", "STORED", "COLUMN"])?;
    let (input, name) = preceded_sp(input, ident)?;
    Ok((input, IndexAlteration::DropStoredColumn(name)))
}

pub fn alter_change_stream(input: &str) -> IResult<&str, AlterChangeStream> {
    let (input, name) = preceded_sp(input, ident)?;
    if let Ok((input, _)) = kws(input, &["DROP", "FOR", "ALL"]) {
        return Ok((
            input,
            AlterChangeStream {
                name,
                alteration: ChangeStreamAlteration::DropForAll,
            },
        ));
    }
    let (input, _) = kws(input, &["SET"])?;
    if peek_kws(input, &["OPTIONS"]) {
        let (input, options) = options_clause(input)?;
        return Ok((
            input,
            AlterChangeStream {
                name,
                alteration: ChangeStreamAlteration::SetOptions(options),
            },
        ));
    }
    let (input, _) = kws(input, &["FOR"])?;
    let (input, for_clause) = change_stream_for(input)?;
    Ok((
        input,
        AlterChangeStream {
            name,
            alteration: ChangeStreamAlteration::SetFor(for_clause),
        },
    ))
}

pub fn alter_sequence(input: &str) -> IResult<&str, AlterSequence> {
    let (input, name) = preceded_sp(input, path)?;
    let (input, _) = kws(input, &["SET"])?;
    let (input, options) = options_clause(input)?;
    Ok((input, AlterSequence { name, options }))
}

pub fn alter_model(input: &str) -> IResult<&str, AlterModel> {
    let (input, name) = preceded_sp(input, ident)?;
    let (input, _) = kws(input, &["SET"])?;
    let (input, options) = options_clause(input)?;
    Ok((input, AlterModel { name, options }))
}

/// `PROTO BUNDLE [INSERT (...)] [DELETE (...)]`
pub fn alter_proto_bundle(input: &str) -> IResult<&str, AlterProtoBundle> {
    let (input, insert) = if let Ok((input, _)) = kws(input, &["INSERT"]) {
        proto_type_list(input)?
    } else {
        (input, Vec::new())
    };
    let (input, delete) = if let Ok((input, _)) = kws(input, &["DELETE"]) {
        proto_type_list(input)?
    } else {
        (input, Vec::new())
    };
    Ok((input, AlterProtoBundle { insert, delete }))
}

pub fn drop_statement(input: &str) -> IResult<&str, Ddl> {
    if let Ok((input, _)) = kws(input, &["SCHEMA"]) {
        let (input, name) = preceded_sp(input, ident)?;
        return Ok((input, Ddl::DropSchema(DropSchema { name })));
    }
    if let Ok((input, _)) = kws(input, &["TABLE"]) {
        let (input, name) = preceded_sp(input, path)?;
        return Ok((input, Ddl::DropTable(DropTable { name })));
    }
    if let Ok((input, _)) = kws(input, &["SEARCH", "INDEX"]) {
        let (input, name) = preceded_sp(input, ident)?;
        return Ok((input, Ddl::DropSearchIndex(DropSearchIndex { name })));
    }
    if let Ok((input, _)) = kws(input, &["VECTOR", "INDEX"]) {
        let (input, name) = preceded_sp(input, ident)?;
        return Ok((input, Ddl::DropVectorIndex(DropVectorIndex { name })));
    }
    if let Ok((input, _)) = kws(input, &["INDEX"]) {
        let (input, name) = preceded_sp(input, path)?;
        return Ok((input, Ddl::DropIndex(DropIndex { name })));
    }
    if let Ok((input, _)) = kws(input, &["PROPERTY", "GRAPH"]) {
        let (input, name) = preceded_sp(input, ident)?;
        return Ok((input, Ddl::DropPropertyGraph(DropPropertyGraph { name })));
    }
    if let Ok((input, _)) = kws(input, &["VIEW"]) {
        let (input, name) = preceded_sp(input, path)?;
        return Ok((input, Ddl::DropView(DropView { name })));
    }
    if let Ok((input, _)) = kws(input, &["CHANGE", "STREAM"]) {
        let (input, name) = preceded_sp(input, ident)?;
        return Ok((input, Ddl::DropChangeStream(DropChangeStream { name })));
    }
    if let Ok((input, _)) = kws(input, &["SEQUENCE"]) {
        let (input, name) = preceded_sp(input, path)?;
        return Ok((input, Ddl::DropSequence(DropSequence { name })));
    }
    if let Ok((input, _)) = kws(input, &["MODEL"]) {
        let (input, name) = preceded_sp(input, ident)?;
        return Ok((input, Ddl::DropModel(DropModel { name })));
    }
    if let Ok((input, _)) = kws(input, &["PROTO", "BUNDLE"]) {
        return Ok((input, Ddl::DropProtoBundle));
    }
    let (input, _) = kws(input, &["ROLE"])?;
    let (input, name) = preceded_sp(input, ident)?;
    Ok((input, Ddl::DropRole(DropRole { name })))
}
