use std::rc::Rc;

use crate::ast::{self, ColumnAlteration, Ddl, TableAlteration, alterable_in_place};
use crate::ident::{ColumnId, Identifier};
use crate::migrate::plan::{Migration, MigrationKind, MigrationState};

use super::table::Table;

/// A column inside a `CREATE TABLE`. Owns no statement of its own; add and
/// drop render as `ALTER TABLE` on the parent.
#[derive(Debug)]
pub struct Column {
    pub table: Rc<Table>,
    pub node: ast::ColumnDef,
}

impl Column {
    pub fn from_table(table: &Rc<Table>) -> Vec<Column> {
        table
            .node
            .columns
            .iter()
            .map(|column| Column {
                table: table.clone(),
                node: column.clone(),
            })
            .collect()
    }

    pub fn column_id(&self) -> ColumnId {
        ColumnId::new(self.table.table_id(), &self.node.name)
    }

    pub fn id(&self) -> Identifier {
        Identifier::Column(self.column_id())
    }

    pub fn add_ddl(&self) -> Ddl {
        self.alter_table(TableAlteration::AddColumn {
            if_not_exists: false,
            column: self.node.clone(),
        })
    }

    pub fn drop_ddl(&self) -> Ddl {
        self.alter_table(TableAlteration::DropColumn {
            name: self.node.name.clone(),
        })
    }

    fn alter_table(&self, alteration: TableAlteration) -> Ddl {
        Ddl::AlterTable(ast::AlterTable {
            name: self.table.node.name.clone(),
            alteration,
        })
    }

    fn alter_column(&self, alteration: ColumnAlteration) -> Ddl {
        self.alter_table(TableAlteration::AlterColumn {
            name: self.node.name.clone(),
            alteration,
        })
    }

    pub fn depends_on(&self) -> Vec<Identifier> {
        vec![self.table.id()]
    }

    // https://cloud.google.com/spanner/docs/schema-updates#supported-updates
    // - Add or remove NOT NULL from a non-key column.
    // - Change between STRING and BYTES, and between PROTO/ENUM and BYTES.
    // - Change the length limit of STRING, BYTES and their ARRAY forms.
    // - Set, change or drop the default value of a column.
    // - Set column options.
    pub fn alter(&self, target: &Column, m: &mut Migration) {
        if m.kind(&self.id()) == MigrationKind::NoOp {
            // The table recreate already covers this column.
            return;
        }

        if self.node.generated != target.node.generated {
            // Generated column expressions cannot change in place.
            m.set_if_undefined(&self.id(), MigrationKind::DropAndAdd);
            return;
        }

        if self.node.ty == target.node.ty {
            self.alter_same_type(target, m);
        } else {
            self.alter_changed_type(target, m);
        }
    }

    fn alter_same_type(&self, target: &Column, m: &mut Migration) {
        let mut ddls = Vec::new();
        let mut default_set = false;

        if self.node.not_null != target.node.not_null && target.node.generated.is_none() {
            // The type statement re-states the default, so don't emit a
            // separate SET DEFAULT below.
            default_set = target.node.default_expr.is_some();
            ddls.push(target.alter_column(ColumnAlteration::Type {
                ty: target.node.ty.clone(),
                not_null: target.node.not_null,
                default_expr: target.node.default_expr.clone(),
            }));
        }

        if self.node.options != target.node.options {
            ddls.push(target.alter_column(ColumnAlteration::SetOptions(
                target.node.options.clone().unwrap_or(ast::Options {
                    records: Vec::new(),
                }),
            )));
        }

        if !default_set && self.node.default_expr != target.node.default_expr {
            match &target.node.default_expr {
                None => ddls.push(target.alter_column(ColumnAlteration::DropDefault)),
                Some(expr) => {
                    ddls.push(target.alter_column(ColumnAlteration::SetDefault(expr.clone())));
                }
            }
        }

        m.set_alter_if_undefined(&self.id(), ddls);
    }

    fn alter_changed_type(&self, target: &Column, m: &mut Migration) {
        if target.node.generated.is_some()
            || !alterable_in_place(&self.node.ty, &target.node.ty)
        {
            m.set_if_undefined(&self.id(), MigrationKind::DropAndAdd);
            return;
        }
        let ddl = target.alter_column(ColumnAlteration::Type {
            ty: target.node.ty.clone(),
            not_null: target.node.not_null,
            default_expr: target.node.default_expr.clone(),
        });
        m.set_alter_if_undefined(&self.id(), vec![ddl]);
    }

    pub fn on_dependency_change(
        &self,
        me: &MigrationState,
        dependency: &MigrationState,
        m: &mut Migration,
    ) {
        if let Identifier::Table(_) = dependency.id() {
            match dependency.kind() {
                MigrationKind::Add | MigrationKind::Drop | MigrationKind::DropAndAdd => {
                    // The table statement itself creates or removes the
                    // column; emit nothing for it.
                    m.escalate(me.id(), MigrationKind::NoOp);
                }
                _ => {}
            }
        }
    }
}
