use crate::ast::{self, Ddl};
use crate::ident::{ColumnId, Identifier, PropertyGraphId, TableId};
use crate::migrate::plan::{Migration, MigrationState};

use super::index::escalate_on_recreate;

/// `CREATE PROPERTY GRAPH`. Altered via `CREATE OR REPLACE`.
#[derive(Debug)]
pub struct PropertyGraph {
    pub node: ast::CreatePropertyGraph,
}

impl PropertyGraph {
    pub fn new(node: ast::CreatePropertyGraph) -> Self {
        Self { node }
    }

    pub fn id(&self) -> Identifier {
        Identifier::PropertyGraph(PropertyGraphId {
            name: self.node.name.clone(),
        })
    }

    pub fn add_ddl(&self) -> Ddl {
        Ddl::CreatePropertyGraph(self.node.clone())
    }

    pub fn drop_ddl(&self) -> Ddl {
        Ddl::DropPropertyGraph(ast::DropPropertyGraph {
            name: self.node.name.clone(),
        })
    }

    pub fn depends_on(&self) -> Vec<Identifier> {
        let mut ids = Vec::new();
        for element in self
            .node
            .node_tables
            .iter()
            .chain(&self.node.edge_tables)
        {
            let table_id = TableId::from_name(&element.name);
            ids.push(Identifier::Table(table_id.clone()));
            if let Some(key) = &element.key {
                for column in key {
                    ids.push(Identifier::Column(ColumnId::new(table_id.clone(), column)));
                }
            }
            for reference in [&element.source, &element.destination].into_iter().flatten() {
                for column in &reference.keys {
                    ids.push(Identifier::Column(ColumnId::new(table_id.clone(), column)));
                }
                let referenced = TableId::from_name(&reference.table);
                for column in &reference.reference_columns {
                    ids.push(Identifier::Column(ColumnId::new(referenced.clone(), column)));
                }
            }
        }
        ids
    }

    pub fn alter(&self, target: &PropertyGraph, m: &mut Migration) {
        let mut replace = target.node.clone();
        replace.or_replace = true;
        m.set_alter_if_undefined(&self.id(), vec![Ddl::CreatePropertyGraph(replace)]);
    }

    pub fn on_dependency_change(
        &self,
        me: &MigrationState,
        dependency: &MigrationState,
        m: &mut Migration,
    ) {
        escalate_on_recreate(me, dependency, m);
    }
}
