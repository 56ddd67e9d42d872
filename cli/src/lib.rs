pub use spandiff_core::{DiffOptions, SpandiffError, SpandiffResult, diff, diff_ddls, diff_to_writer};
pub use spandiff_core::{ast, parser, printer, sql};

pub mod style;
