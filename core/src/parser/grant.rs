//! `GRANT` and `REVOKE` parsing.

use nom::IResult;
use nom::error::{Error, ErrorKind};

use super::tokens::*;
use crate::ast::*;

fn fail(input: &str) -> nom::Err<Error<&str>> {
    nom::Err::Error(Error::new(input, ErrorKind::Fail))
}

/// `GRANT <privilege> TO ROLE r1, r2`
pub fn grant(input: &str) -> IResult<&str, Grant> {
    let (input, privilege) = privilege(input)?;
    let (input, _) = kws(input, &["TO", "ROLE"])?;
    let (input, roles) = ident_list(input)?;
    Ok((input, Grant { privilege, roles }))
}

/// `REVOKE <privilege> FROM ROLE r1, r2`
pub fn revoke(input: &str) -> IResult<&str, Revoke> {
    let (input, privilege) = privilege(input)?;
    let (input, _) = kws(input, &["FROM", "ROLE"])?;
    let (input, roles) = ident_list(input)?;
    Ok((input, Revoke { privilege, roles }))
}

fn privilege(input: &str) -> IResult<&str, Privilege> {
    if let Ok((input, _)) = kws(input, &["ROLE"]) {
        let (input, names) = ident_list(input)?;
        return Ok((input, Privilege::Role { names }));
    }
    if let Ok((input, _)) = kws(input, &["EXECUTE", "ON", "TABLE", "FUNCTION"]) {
        let (input, names) = ident_list(input)?;
        return Ok((input, Privilege::ExecuteOnTableFunction { names }));
    }

    let (input, privileges) = table_privilege_list(input)?;
    let (input, _) = kws(input, &["ON"])?;
    if let Ok((input, _)) = kws(input, &["TABLE"]) {
        let (input, names) = ident_list(input)?;
        return Ok((input, Privilege::OnTable { privileges, names }));
    }

    // VIEW and CHANGE STREAM targets take exactly a bare SELECT.
    if privileges != vec![TablePrivilege::Select(Vec::new())] {
        return Err(fail(input));
    }
    if let Ok((input, _)) = kws(input, &["VIEW"]) {
        let (input, names) = ident_list(input)?;
        return Ok((input, Privilege::SelectOnView { names }));
    }
    let (input, _) = kws(input, &["CHANGE", "STREAM"])?;
    let (input, names) = ident_list(input)?;
    Ok((input, Privilege::SelectOnChangeStream { names }))
}

fn table_privilege_list(input: &str) -> IResult<&str, Vec<TablePrivilege>> {
    let mut privileges = Vec::new();
    let (mut rest, first) = table_privilege(input)?;
    privileges.push(first);
    loop {
        let (r, comma) = opt_symbol(rest, ',')?;
        if !comma {
            return Ok((rest, privileges));
        }
        let (r, next) = table_privilege(r)?;
        privileges.push(next);
        rest = r;
    }
}

fn table_privilege(input: &str) -> IResult<&str, TablePrivilege> {
    if let Ok((input, _)) = kws(input, &["SELECT"]) {
        let (input, columns) = opt_column_list(input)?;
        return Ok((input, TablePrivilege::Select(columns)));
    }
    if let Ok((input, _)) = kws(input, &["UPDATE"]) {
        let (input, columns) = opt_column_list(input)?;
        return Ok((input, TablePrivilege::Update(columns)));
    }
    if let Ok((input, _)) = kws(input, &["INSERT"]) {
        let (input, columns) = opt_column_list(input)?;
        return Ok((input, TablePrivilege::Insert(columns)));
    }
    let (input, _) = kws(input, &["DELETE"])?;
    Ok((input, TablePrivilege::Delete))
}

fn opt_column_list(input: &str) -> IResult<&str, Vec<String>> {
    let (after, open) = opt_symbol(input, '(')?;
    if !open {
        return Ok((input, Vec::new()));
    }
    let (input, columns) = ident_list(after)?;
    let (input, _) = symbol(input, ')')?;
    Ok((input, columns))
}
