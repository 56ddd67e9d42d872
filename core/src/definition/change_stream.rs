use crate::ast::{self, ChangeStreamAlteration, ChangeStreamFor, Ddl};
use crate::ident::{ChangeStreamId, ColumnId, Identifier, TableId};
use crate::migrate::operation::{Operation, OperationKind};
use crate::migrate::plan::{Migration, MigrationKind, MigrationState};

/// `CREATE CHANGE STREAM`.
#[derive(Debug)]
pub struct ChangeStream {
    pub node: ast::CreateChangeStream,
}

impl ChangeStream {
    pub fn new(node: ast::CreateChangeStream) -> Self {
        Self { node }
    }

    pub fn id(&self) -> Identifier {
        Identifier::ChangeStream(ChangeStreamId {
            name: self.node.name.clone(),
        })
    }

    pub fn add_ddl(&self) -> Ddl {
        Ddl::CreateChangeStream(self.node.clone())
    }

    pub fn drop_ddl(&self) -> Ddl {
        Ddl::DropChangeStream(ast::DropChangeStream {
            name: self.node.name.clone(),
        })
    }

    fn alter_ddl(&self, alteration: ChangeStreamAlteration) -> Ddl {
        Ddl::AlterChangeStream(ast::AlterChangeStream {
            name: self.node.name.clone(),
            alteration,
        })
    }

    pub fn depends_on(&self) -> Vec<Identifier> {
        let Some(ChangeStreamFor::Tables(tables)) = &self.node.for_clause else {
            // FOR ALL (or no FOR clause) names nothing in particular.
            return Vec::new();
        };
        let mut ids = Vec::new();
        for table in tables {
            let table_id = TableId::from_name(&table.name);
            ids.push(Identifier::Table(table_id.clone()));
            for column in &table.columns {
                ids.push(Identifier::Column(ColumnId::new(table_id.clone(), column)));
            }
        }
        ids
    }

    pub fn alter(&self, target: &ChangeStream, m: &mut Migration) {
        let mut ddls = Vec::new();
        if self.node.for_clause != target.node.for_clause {
            match &target.node.for_clause {
                None => ddls.push(self.alter_ddl(ChangeStreamAlteration::DropForAll)),
                Some(for_clause) => {
                    ddls.push(target.alter_ddl(ChangeStreamAlteration::SetFor(for_clause.clone())));
                }
            }
        }
        if self.node.options != target.node.options {
            ddls.push(target.alter_ddl(ChangeStreamAlteration::SetOptions(
                target.node.options.clone().unwrap_or(ast::Options {
                    records: Vec::new(),
                }),
            )));
        }
        if ddls.is_empty() {
            return;
        }
        m.set_alter_if_undefined(&self.id(), ddls);
    }

    pub fn on_dependency_change(
        &self,
        me: &MigrationState,
        dependency: &MigrationState,
        m: &mut Migration,
    ) {
        match dependency.id() {
            Identifier::Table(_) | Identifier::Column(_) => {}
            _ => return,
        }
        if dependency.kind() != MigrationKind::DropAndAdd {
            return;
        }
        let Some(for_clause) = &self.node.for_clause else {
            return;
        };
        if matches!(for_clause, ChangeStreamFor::All) {
            // A FOR ALL stream keeps covering recreated tables.
            return;
        }

        // Stop watching before the dependency drops and start again after
        // it is re-added; the operation kinds place the halves on the
        // correct sides of the recreate.
        let deps = self.depends_on();
        m.escalate_with_operations(
            me.id(),
            vec![
                Operation::new(
                    me.id().clone(),
                    OperationKind::Drop,
                    self.alter_ddl(ChangeStreamAlteration::DropForAll),
                    deps.clone(),
                ),
                Operation::new(
                    me.id().clone(),
                    OperationKind::Add,
                    self.alter_ddl(ChangeStreamAlteration::SetFor(for_clause.clone())),
                    deps,
                ),
            ],
        );
    }
}
