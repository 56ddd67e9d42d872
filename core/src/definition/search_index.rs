use crate::ast::{self, Ddl};
use crate::ident::{ColumnId, Identifier, SearchIndexId, TableId};
use crate::migrate::plan::{Migration, MigrationKind, MigrationState};

use super::index::{escalate_on_recreate, stored_column_diff};

/// `CREATE SEARCH INDEX`.
#[derive(Debug)]
pub struct SearchIndex {
    pub node: ast::CreateSearchIndex,
}

impl SearchIndex {
    pub fn new(node: ast::CreateSearchIndex) -> Self {
        Self { node }
    }

    pub fn table_id(&self) -> TableId {
        TableId::from_name(&self.node.table)
    }

    pub fn id(&self) -> Identifier {
        Identifier::SearchIndex(SearchIndexId {
            name: self.node.name.clone(),
        })
    }

    pub fn add_ddl(&self) -> Ddl {
        Ddl::CreateSearchIndex(self.node.clone())
    }

    pub fn drop_ddl(&self) -> Ddl {
        Ddl::DropSearchIndex(ast::DropSearchIndex {
            name: self.node.name.clone(),
        })
    }

    pub fn depends_on(&self) -> Vec<Identifier> {
        let table_id = self.table_id();
        let mut ids: Vec<Identifier> = self
            .node
            .token_columns
            .iter()
            .chain(self.node.stored_columns())
            .map(|column| Identifier::Column(ColumnId::new(table_id.clone(), column)))
            .collect();
        ids.push(Identifier::Table(table_id));
        ids
    }

    // --- not documented ---
    // Add or remove a stored column from an existing search index.
    pub fn alter(&self, target: &SearchIndex, m: &mut Migration) {
        if m.kind(&self.id()) == MigrationKind::NoOp {
            return;
        }

        if self.node.without_storing() == target.node.without_storing() {
            let ddls = stored_column_diff(
                self.node.stored_columns(),
                target.node.stored_columns(),
                |alteration| {
                    Ddl::AlterSearchIndex(ast::AlterSearchIndex {
                        name: target.node.name.clone(),
                        alteration,
                    })
                },
            );
            m.set_alter_if_undefined(&self.id(), ddls);
            return;
        }
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
