//! Schema differ for Cloud Spanner DDL.
//!
//! Feed in a base schema and a target schema; get back the minimal,
//! safely ordered `CREATE` / `ALTER` / `DROP` / `GRANT` / `REVOKE`
//! script that migrates one into the other.
//!
//! ```
//! use spandiff_core::{diff, DiffOptions};
//!
//! let script = diff(
//!     "CREATE TABLE T1 (C1 INT64 NOT NULL) PRIMARY KEY (C1);",
//!     "CREATE TABLE T1 (C1 INT64 NOT NULL, C2 STRING(MAX)) PRIMARY KEY (C1);",
//!     &DiffOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(script, "ALTER TABLE T1 ADD COLUMN C2 STRING(MAX);\n");
//! ```

pub mod ast;
pub mod definition;
pub mod diff;
pub mod error;
pub mod ident;
pub mod migrate;
pub mod parser;
pub mod printer;
pub mod sql;

pub use diff::{DiffOptions, diff, diff_ddls, diff_to_writer};
pub use error::{SpandiffError, SpandiffResult};
pub use printer::{NoStylePrinter, PrintContext, Printer};
pub use sql::ToSql;
