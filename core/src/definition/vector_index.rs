use crate::ast::{self, Ddl};
use crate::ident::{ColumnId, Identifier, TableId, VectorIndexId};
use crate::migrate::plan::{Migration, MigrationKind, MigrationState};

use super::index::escalate_on_recreate;

/// `CREATE VECTOR INDEX`. No ALTER form exists, so any change recreates.
#[derive(Debug)]
pub struct VectorIndex {
    pub node: ast::CreateVectorIndex,
}

impl VectorIndex {
    pub fn new(node: ast::CreateVectorIndex) -> Self {
        Self { node }
    }

    pub fn table_id(&self) -> TableId {
        TableId::from_name(&self.node.table)
    }

    pub fn id(&self) -> Identifier {
        Identifier::VectorIndex(VectorIndexId {
            name: self.node.name.clone(),
        })
    }

    pub fn add_ddl(&self) -> Ddl {
        Ddl::CreateVectorIndex(self.node.clone())
    }

    pub fn drop_ddl(&self) -> Ddl {
        Ddl::DropVectorIndex(ast::DropVectorIndex {
            name: self.node.name.clone(),
        })
    }

    pub fn depends_on(&self) -> Vec<Identifier> {
        let table_id = self.table_id();
        vec![
            Identifier::Column(ColumnId::new(table_id.clone(), &self.node.column)),
            Identifier::Table(table_id),
        ]
    }

    pub fn alter(&self, _target: &VectorIndex, m: &mut Migration) {
        m.set_if_undefined(&self.id(), MigrationKind::DropAndAdd);
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
