//! The top-level diff entry points.

use std::io::Write;

use crate::ast::Ddl;
use crate::definition::Definitions;
use crate::error::SpandiffResult;
use crate::migrate;
use crate::parser::parse_ddls;
use crate::printer::{PrintContext, Printer};
use crate::sql::ToSql;

#[derive(Debug, Clone, Copy, Default)]
pub struct DiffOptions {
    /// Abort on input DDL outside the supported surface instead of
    /// silently skipping it.
    pub error_on_unsupported_ddl: bool,
}

/// Compute the ordered migration statements turning `base` into `target`.
pub fn diff_ddls(base: &str, target: &str, options: &DiffOptions) -> SpandiffResult<Vec<Ddl>> {
    let base_ddls = parse_ddls(base)?;
    let target_ddls = parse_ddls(target)?;
    let base_defs = Definitions::from_ddls(&base_ddls, options.error_on_unsupported_ddl)?;
    let target_defs = Definitions::from_ddls(&target_ddls, options.error_on_unsupported_ddl)?;
    let operations = migrate::plan(&base_defs, &target_defs)?;
    Ok(operations.into_iter().map(|op| op.ddl).collect())
}

/// Like [`diff_ddls`], returning the assembled script: each statement
/// `;`-terminated, statements separated by a blank line.
pub fn diff(base: &str, target: &str, options: &DiffOptions) -> SpandiffResult<String> {
    let ddls = diff_ddls(base, target, options)?;
    let mut out = String::new();
    for (index, ddl) in ddls.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&ddl.to_sql());
        out.push_str(";\n");
    }
    Ok(out)
}

/// Stream the migration script to `out`, passing every statement through
/// `printer`. A printer error aborts the diff.
pub fn diff_to_writer(
    base: &str,
    target: &str,
    out: &mut dyn Write,
    options: &DiffOptions,
    printer: &dyn Printer,
) -> SpandiffResult<()> {
    let ddls = diff_ddls(base, target, options)?;
    let total = ddls.len();
    for (index, ddl) in ddls.iter().enumerate() {
        if index > 0 {
            out.write_all(b"\n")?;
        }
        let sql = format!("{};\n", ddl.to_sql());
        printer.print(PrintContext { index, total }, out, &sql)?;
    }
    Ok(())
}
