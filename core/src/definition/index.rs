use crate::ast::{self, Ddl, IndexAlteration};
use crate::ident::{ColumnId, Identifier, IndexId, TableId};
use crate::migrate::plan::{Migration, MigrationKind, MigrationState};

/// `CREATE INDEX`.
#[derive(Debug)]
pub struct Index {
    pub node: ast::CreateIndex,
}

impl Index {
    pub fn new(node: ast::CreateIndex) -> Self {
        Self { node }
    }

    pub fn index_id(&self) -> IndexId {
        IndexId::from_path(&self.node.name)
    }

    pub fn table_id(&self) -> TableId {
        TableId::from_path(&self.node.table)
    }

    pub fn id(&self) -> Identifier {
        Identifier::Index(self.index_id())
    }

    pub fn add_ddl(&self) -> Ddl {
        Ddl::CreateIndex(self.node.clone())
    }

    pub fn drop_ddl(&self) -> Ddl {
        Ddl::DropIndex(ast::DropIndex {
            name: self.node.name.clone(),
        })
    }

    pub fn depends_on(&self) -> Vec<Identifier> {
        let table_id = self.table_id();
        let mut ids: Vec<Identifier> = self
            .node
            .keys
            .iter()
            .map(|key| Identifier::Column(ColumnId::new(table_id.clone(), &key.name)))
            .collect();
        for column in self.node.stored_columns() {
            ids.push(Identifier::Column(ColumnId::new(table_id.clone(), column)));
        }
        if let Some(schema_id) = self.index_id().schema_id() {
            ids.push(Identifier::Schema(schema_id));
        }
        ids.push(Identifier::Table(table_id));
        ids
    }

    // --- not documented ---
    // Add or remove a stored column from an existing index.
    pub fn alter(&self, target: &Index, m: &mut Migration) {
        if m.kind(&self.id()) == MigrationKind::NoOp {
            // The index is part of a table recreate sequence already.
            return;
        }

        if self.node.without_storing() == target.node.without_storing() {
            let ddls = stored_column_diff(
                self.node.stored_columns(),
                target.node.stored_columns(),
                |alteration| {
                    Ddl::AlterIndex(ast::AlterIndex {
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

/// Stored-column add/drop statements shared by plain and search indexes.
pub fn stored_column_diff(
    base: &[String],
    target: &[String],
    make_ddl: impl Fn(IndexAlteration) -> Ddl,
) -> Vec<Ddl> {
    let mut ddls = Vec::new();
    for column in target {
        if !base.contains(column) {
            ddls.push(make_ddl(IndexAlteration::AddStoredColumn(column.clone())));
        }
    }
    for column in base {
        if !target.contains(column) {
            ddls.push(make_ddl(IndexAlteration::DropStoredColumn(column.clone())));
        }
    }
    ddls
}

/// The common cascade rule: recreate when a table, column or schema this
/// object sits on is recreated.
pub fn escalate_on_recreate(me: &MigrationState, dependency: &MigrationState, m: &mut Migration) {
    match dependency.id() {
        Identifier::Table(_) | Identifier::Column(_) | Identifier::Schema(_) => {
            if dependency.kind() == MigrationKind::DropAndAdd {
                m.escalate(me.id(), MigrationKind::DropAndAdd);
            }
        }
        _ => {}
    }
}
