//! Atomic operations and deterministic ordering.

use std::collections::HashMap;

use crate::ast::Ddl;
use crate::error::{SpandiffError, SpandiffResult};
use crate::ident::Identifier;

/// One emitted DDL, tagged with its owner and that owner's dependencies.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub id: Identifier,
    pub kind: OperationKind,
    pub ddl: Ddl,
    pub depends_on: Vec<Identifier>,
}

impl Operation {
    pub fn new(id: Identifier, kind: OperationKind, ddl: Ddl, depends_on: Vec<Identifier>) -> Self {
        Self {
            id,
            kind,
            ddl,
            depends_on,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Add,
    Alter,
    Drop,
}

impl OperationKind {
    fn order_key(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Alter => "alter",
            Self::Drop => "drop",
        }
    }
}

/// Order operations for emission: drops first (most-dependent to
/// least-dependent), then adds and alters (dependencies before dependents).
pub fn sort_operations(mut ops: Vec<Operation>) -> SpandiffResult<Vec<Operation>> {
    // Fix the result before the topological sort so the output is stable.
    ops.sort_by_cached_key(|op| (op.id.to_string(), op.kind.order_key()));

    let mut drop_ops = Vec::new();
    let mut add_alter_ops = Vec::new();
    for op in ops {
        match op.kind {
            OperationKind::Drop => drop_ops.push(op),
            OperationKind::Add | OperationKind::Alter => add_alter_ops.push(op),
        }
    }

    let mut sorted = topological_sort(drop_ops)?;
    sorted.reverse();
    sorted.extend(topological_sort(add_alter_ops)?);
    Ok(sorted)
}

/// Stable topological sort: dependencies first, ties broken by input
/// position. Dependencies that resolve to no operation in the slice dangle
/// and create no edge.
fn topological_sort(ops: Vec<Operation>) -> SpandiffResult<Vec<Operation>> {
    let mut by_id: HashMap<&Identifier, Vec<usize>> = HashMap::new();
    for (i, op) in ops.iter().enumerate() {
        by_id.entry(&op.id).or_default().push(i);
    }
    let edges: Vec<Vec<usize>> = ops
        .iter()
        .enumerate()
        .map(|(i, op)| {
            op.depends_on
                .iter()
                .flat_map(|dep| by_id.get(dep).into_iter().flatten().copied())
                .filter(|&j| j != i)
                .collect()
        })
        .collect();

    let mut emitted = vec![false; ops.len()];
    let mut sorted = Vec::with_capacity(ops.len());
    while sorted.len() < ops.len() {
        let ready = (0..ops.len())
            .find(|&i| !emitted[i] && edges[i].iter().all(|&j| emitted[j]))
            .ok_or(SpandiffError::DependencyCycle)?;
        emitted[ready] = true;
        sorted.push(ops[ready].clone());
    }
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CreateRole, DropRole};
    use crate::ident::{RoleId, TableId, ViewId};

    fn role_id(name: &str) -> Identifier {
        Identifier::Role(RoleId { name: name.into() })
    }

    fn op(id: Identifier, kind: OperationKind, deps: Vec<Identifier>) -> Operation {
        // Any DDL payload works for ordering tests.
        Operation::new(id, kind, Ddl::CreateRole(CreateRole { name: "X".into() }), deps)
    }

    fn drop_op(id: Identifier, deps: Vec<Identifier>) -> Operation {
        Operation::new(id, OperationKind::Drop, Ddl::DropRole(DropRole { name: "X".into() }), deps)
    }

    #[test]
    fn test_adds_follow_their_dependencies() {
        let table = Identifier::Table(TableId::from_name("T1"));
        let view = Identifier::View(ViewId::from_name("V1"));
        let ops = vec![
            op(view.clone(), OperationKind::Add, vec![table.clone()]),
            op(table.clone(), OperationKind::Add, vec![]),
        ];
        let sorted = sort_operations(ops).unwrap();
        assert_eq!(sorted[0].id, table);
        assert_eq!(sorted[1].id, view);
    }

    #[test]
    fn test_drops_run_in_reverse_dependency_order() {
        let table = Identifier::Table(TableId::from_name("T1"));
        let view = Identifier::View(ViewId::from_name("V1"));
        let ops = vec![
            drop_op(table.clone(), vec![]),
            drop_op(view.clone(), vec![table.clone()]),
        ];
        let sorted = sort_operations(ops).unwrap();
        assert_eq!(sorted[0].id, view);
        assert_eq!(sorted[1].id, table);
    }

    #[test]
    fn test_drops_precede_adds() {
        let a = role_id("A");
        let b = role_id("B");
        let ops = vec![
            op(a.clone(), OperationKind::Add, vec![]),
            drop_op(b.clone(), vec![]),
        ];
        let sorted = sort_operations(ops).unwrap();
        assert_eq!(sorted[0].kind, OperationKind::Drop);
        assert_eq!(sorted[1].kind, OperationKind::Add);
    }

    #[test]
    fn test_ties_break_by_identifier_string() {
        let ops = vec![
            op(role_id("B"), OperationKind::Add, vec![]),
            op(role_id("A"), OperationKind::Add, vec![]),
        ];
        let sorted = sort_operations(ops).unwrap();
        assert_eq!(sorted[0].id, role_id("A"));
        assert_eq!(sorted[1].id, role_id("B"));
    }

    #[test]
    fn test_dangling_dependencies_are_ignored() {
        let ops = vec![op(role_id("A"), OperationKind::Add, vec![role_id("GONE")])];
        assert_eq!(sort_operations(ops).unwrap().len(), 1);
    }

    #[test]
    fn test_cycle_is_an_error() {
        let a = role_id("A");
        let b = role_id("B");
        let ops = vec![
            op(a.clone(), OperationKind::Add, vec![b.clone()]),
            op(b.clone(), OperationKind::Add, vec![a.clone()]),
        ];
        assert!(matches!(
            sort_operations(ops),
            Err(SpandiffError::DependencyCycle)
        ));
    }
}
