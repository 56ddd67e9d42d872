//! `CREATE TABLE` and `ALTER TABLE` parsing.

use nom::IResult;

use super::tokens::*;
use crate::ast::*;

/// Body of `CREATE TABLE`, after the keywords.
pub fn create_table(input: &str) -> IResult<&str, CreateTable> {
    let (input, if_not_exists) = opt_kws(input, &["IF", "NOT", "EXISTS"])?;
    let (input, name) = preceded_sp(input, path)?;
    let (input, _) = symbol(input, '(')?;

    let mut columns = Vec::new();
    let mut constraints = Vec::new();
    let mut synonyms = Vec::new();
    let mut rest = input;
    loop {
        let (r, done) = opt_symbol(rest, ')')?;
        if done {
            rest = r;
            break;
        }
        let (r, _) = sp(r)?;
        if peek_kws(r, &["SYNONYM"]) {
            let (r, _) = kw(r, "SYNONYM")?;
            let (r, names) = paren_ident_list(r)?;
            synonyms.extend(names);
            rest = r;
        } else if peek_kws(r, &["CONSTRAINT"])
            || peek_kws(r, &["FOREIGN", "KEY"])
            || peek_kws(r, &["CHECK"])
        {
            let (r, constraint) = table_constraint(r)?;
            constraints.push(constraint);
            rest = r;
        } else {
            let (r, column) = column_def(r)?;
            columns.push(column);
            rest = r;
        }
        let (r, _) = opt_symbol(rest, ',')?;
        rest = r;
    }

    let (input, _) = kws(rest, &["PRIMARY", "KEY"])?;
    let (input, _) = symbol(input, '(')?;
    let (input, primary_keys) = index_key_list(input)?;
    let (input, _) = symbol(input, ')')?;

    let mut table = CreateTable {
        if_not_exists,
        name,
        columns,
        constraints,
        synonyms,
        primary_keys,
        interleave: None,
        row_deletion_policy: None,
    };

    let mut rest = input;
    loop {
        let (r, comma) = opt_symbol(rest, ',')?;
        if !comma {
            break;
        }
        if let Ok((r, _)) = kws(r, &["INTERLEAVE", "IN", "PARENT"]) {
            let (r, parent) = preceded_sp(r, path)?;
            let (r, on_delete) = opt_on_delete(r)?;
            table.interleave = Some(InterleaveInParent {
                table: parent,
                on_delete,
            });
            rest = r;
        } else {
            let (r, _) = kws(r, &["ROW", "DELETION", "POLICY"])?;
            let (r, expr) = paren_raw(r)?;
            table.row_deletion_policy = Some(RowDeletionPolicy { expr });
            rest = r;
        }
    }

    Ok((rest, table))
}

fn opt_on_delete(input: &str) -> IResult<&str, Option<OnDelete>> {
    let (input, present) = opt_kws(input, &["ON", "DELETE"])?;
    if !present {
        return Ok((input, None));
    }
    if let Ok((input, _)) = kws(input, &["CASCADE"]) {
        Ok((input, Some(OnDelete::Cascade)))
    } else {
        let (input, _) = kws(input, &["NO", "ACTION"])?;
        Ok((input, Some(OnDelete::NoAction)))
    }
}

/// `name TYPE [NOT NULL] [AS (expr) [STORED]] [DEFAULT (expr)] [OPTIONS (...)]`
pub fn column_def(input: &str) -> IResult<&str, ColumnDef> {
    let (input, name) = preceded_sp(input, ident)?;
    let (input, ty) = schema_type(input)?;
    let (input, not_null) = opt_kws(input, &["NOT", "NULL"])?;

    let (input, generated) = if let Ok((input, _)) = kws(input, &["AS"]) {
        let (input, expr) = paren_raw(input)?;
        let (input, stored) = opt_kws(input, &["STORED"])?;
        (input, Some(GeneratedColumn { expr, stored }))
    } else {
        (input, None)
    };

    let (input, default_expr) = if let Ok((input, _)) = kws(input, &["DEFAULT"]) {
        let (input, expr) = paren_raw(input)?;
        (input, Some(expr))
    } else {
        (input, None)
    };

    let (input, options) = opt_options_clause(input)?;

    Ok((
        input,
        ColumnDef {
            name,
            ty,
            not_null,
            default_expr,
            generated,
            options,
        },
    ))
}

/// `[CONSTRAINT name] FOREIGN KEY ... | [CONSTRAINT name] CHECK (...)`
pub fn table_constraint(input: &str) -> IResult<&str, TableConstraint> {
    let (input, name) = if let Ok((input, _)) = kws(input, &["CONSTRAINT"]) {
        let (input, name) = preceded_sp(input, ident)?;
        (input, Some(name))
    } else {
        (input, None)
    };

    if let Ok((input, _)) = kws(input, &["FOREIGN", "KEY"]) {
        let (input, columns) = paren_ident_list(input)?;
        let (input, _) = kws(input, &["REFERENCES"])?;
        let (input, ref_table) = preceded_sp(input, path)?;
        let (input, ref_columns) = paren_ident_list(input)?;
        let (input, on_delete) = opt_on_delete(input)?;
        return Ok((
            input,
            TableConstraint {
                name,
                constraint: Constraint::ForeignKey {
                    columns,
                    ref_table,
                    ref_columns,
                    on_delete,
                },
            },
        ));
    }

    let (input, _) = kws(input, &["CHECK"])?;
    let (input, expr) = paren_raw(input)?;
    Ok((
        input,
        TableConstraint {
            name,
            constraint: Constraint::Check(expr),
        },
    ))
}

/// `col [ASC | DESC], ...`
pub fn index_key_list(input: &str) -> IResult<&str, Vec<IndexKey>> {
    let mut keys = Vec::new();
    let (mut rest, first) = index_key(input)?;
    keys.push(first);
    loop {
        let (r, comma) = opt_symbol(rest, ',')?;
        if !comma {
            return Ok((rest, keys));
        }
        let (r, next) = index_key(r)?;
        keys.push(next);
        rest = r;
    }
}

fn index_key(input: &str) -> IResult<&str, IndexKey> {
    let (input, name) = preceded_sp(input, ident)?;
    let (input, asc) = opt_kws(input, &["ASC"])?;
    if asc {
        return Ok((
            input,
            IndexKey {
                name,
                dir: Some(Direction::Asc),
            },
        ));
    }
    let (input, desc) = opt_kws(input, &["DESC"])?;
    let dir = desc.then_some(Direction::Desc);
    Ok((input, IndexKey { name, dir }))
}

/// Body of `ALTER TABLE`, after the keywords.
pub fn alter_table(input: &str) -> IResult<&str, AlterTable> {
    let (input, name) = preceded_sp(input, path)?;
    let (input, alteration) = table_alteration(input)?;
    Ok((input, AlterTable { name, alteration }))
}

fn table_alteration(input: &str) -> IResult<&str, TableAlteration> {
    if let Ok((input, _)) = kws(input, &["ADD", "COLUMN"]) {
        let (input, if_not_exists) = opt_kws(input, &["IF", "NOT", "EXISTS"])?;
        let (input, column) = column_def(input)?;
        return Ok((
            input,
            TableAlteration::AddColumn {
                if_not_exists,
                column,
            },
        ));
    }
    if let Ok((input, _)) = kws(input, &["DROP", "COLUMN"]) {
        let (input, name) = preceded_sp(input, ident)?;
        return Ok((input, TableAlteration::DropColumn { name }));
    }
    if let Ok((input, _)) = kws(input, &["ALTER", "COLUMN"]) {
        let (input, name) = preceded_sp(input, ident)?;
        let (input, alteration) = column_alteration(input)?;
        return Ok((input, TableAlteration::AlterColumn { name, alteration }));
    }
    if let Ok((input, _)) = kws(input, &["ADD", "ROW", "DELETION", "POLICY"]) {
        let (input, expr) = paren_raw(input)?;
        return Ok((
            input,
            TableAlteration::AddRowDeletionPolicy(RowDeletionPolicy { expr }),
        ));
    }
    if let Ok((input, _)) = kws(input, &["REPLACE", "ROW", "DELETION", "POLICY"]) {
        let (input, expr) = paren_raw(input)?;
        return Ok((
            input,
            TableAlteration::ReplaceRowDeletionPolicy(RowDeletionPolicy { expr }),
        ));
    }
    if let Ok((input, _)) = kws(input, &["DROP", "ROW", "DELETION", "POLICY"]) {
        return Ok((input, TableAlteration::DropRowDeletionPolicy));
    }
    if let Ok((input, _)) = kws(input, &["ADD", "SYNONYM"]) {
        let (input, name) = preceded_sp(input, ident)?;
        return Ok((input, TableAlteration::AddSynonym { name }));
    }
    if let Ok((input, _)) = kws(input, &["DROP", "SYNONYM"]) {
        let (input, name) = preceded_sp(input, ident)?;
        return Ok((input, TableAlteration::DropSynonym { name }));
    }
    if let Ok((input, _)) = kws(input, &["DROP", "CONSTRAINT"]) {
        let (input, name) = preceded_sp(input, ident)?;
        return Ok((input, TableAlteration::DropConstraint { name }));
    }
    let (input, _) = kws(input, &["ADD"])?;
    let (input, constraint) = table_constraint(input)?;
    Ok((input, TableAlteration::AddConstraint(constraint)))
}

fn column_alteration(input: &str) -> IResult<&str, ColumnAlteration> {
    if let Ok((after_set, _)) = kws(input, &["SET"]) {
        if peek_kws(after_set, &["OPTIONS"]) {
            let (input, options) = options_clause(after_set)?;
            return Ok((input, ColumnAlteration::SetOptions(options)));
        }
        let (input, _) = kws(after_set, &["DEFAULT"])?;
        let (input, expr) = paren_raw(input)?;
        return Ok((input, ColumnAlteration::SetDefault(expr)));
    }
    if let Ok((input, _)) = kws(input, &["DROP", "DEFAULT"]) {
        return Ok((input, ColumnAlteration::DropDefault));
    }
    let (input, ty) = schema_type(input)?;
    let (input, not_null) = opt_kws(input, &["NOT", "NULL"])?;
    let (input, default_expr) = if let Ok((input, _)) = kws(input, &["DEFAULT"]) {
        let (input, expr) = paren_raw(input)?;
        (input, Some(expr))
    } else {
        (input, None)
    };
    Ok((
        input,
        ColumnAlteration::Type {
            ty,
            not_null,
            default_expr,
        },
    ))
}
