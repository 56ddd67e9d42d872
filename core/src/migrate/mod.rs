//! Migration planning and operation ordering.

pub mod operation;
pub mod plan;

pub use operation::{Operation, OperationKind, sort_operations};
pub use plan::{Migration, MigrationKind, MigrationState, plan};
