use crate::ast::{self, Ddl, TableAlteration};
use crate::ident::{ColumnId, Identifier, TableId};
use crate::migrate::plan::{Migration, MigrationKind};

/// `CREATE TABLE`. Column definitions inside the body are modeled as
/// separate [`super::column::Column`] definitions.
#[derive(Debug)]
pub struct Table {
    pub node: ast::CreateTable,
}

impl Table {
    pub fn new(node: ast::CreateTable) -> Self {
        Self { node }
    }

    pub fn table_id(&self) -> TableId {
        TableId::from_path(&self.node.name)
    }

    pub fn id(&self) -> Identifier {
        Identifier::Table(self.table_id())
    }

    pub fn column_ids(&self) -> impl Iterator<Item = (ColumnId, &ast::ColumnDef)> {
        let table_id = self.table_id();
        self.node
            .columns
            .iter()
            .map(move |column| (ColumnId::new(table_id.clone(), &column.name), column))
    }

    pub fn add_ddl(&self) -> Ddl {
        Ddl::CreateTable(self.node.clone())
    }

    pub fn drop_ddl(&self) -> Ddl {
        Ddl::DropTable(ast::DropTable {
            name: self.node.name.clone(),
        })
    }

    pub fn depends_on(&self) -> Vec<Identifier> {
        self.table_id()
            .schema_id()
            .map(Identifier::Schema)
            .into_iter()
            .collect()
    }

    // https://cloud.google.com/spanner/docs/schema-updates#supported-updates
    // - Add or remove a foreign key from an existing table.
    // - Add or remove a check constraint from an existing table.
    // --- not documented ---
    // - Add or remove a synonym from an existing table.
    // - Add, replace or remove a row deletion policy from an existing table.
    pub fn alter(&self, target: &Table, m: &mut Migration) {
        if self.node.primary_keys != target.node.primary_keys {
            m.set_if_undefined(&self.id(), MigrationKind::DropAndAdd);
            return;
        }

        if self.node.without_columns() == target.node.without_columns() {
            // Only the columns differ; the column rules carry the change.
            return;
        }

        let mut ddls = Vec::new();
        self.diff_row_deletion_policy(target, &mut ddls);
        self.diff_synonyms(target, &mut ddls);
        self.diff_constraints(target, &mut ddls);

        if ddls.is_empty() {
            // Changed in a way no ALTER TABLE expresses.
            m.set_if_undefined(&self.id(), MigrationKind::DropAndAdd);
            return;
        }
        m.set_alter_if_undefined(&self.id(), ddls);
    }

    fn alter_ddl(&self, alteration: TableAlteration) -> Ddl {
        Ddl::AlterTable(ast::AlterTable {
            name: self.node.name.clone(),
            alteration,
        })
    }

    fn diff_row_deletion_policy(&self, target: &Table, ddls: &mut Vec<Ddl>) {
        match (
            &self.node.row_deletion_policy,
            &target.node.row_deletion_policy,
        ) {
            (None, Some(policy)) => {
                ddls.push(self.alter_ddl(TableAlteration::AddRowDeletionPolicy(policy.clone())));
            }
            (Some(_), None) => {
                ddls.push(self.alter_ddl(TableAlteration::DropRowDeletionPolicy));
            }
            (Some(base), Some(policy)) if base != policy => {
                ddls.push(self.alter_ddl(TableAlteration::ReplaceRowDeletionPolicy(policy.clone())));
            }
            _ => {}
        }
    }

    fn diff_synonyms(&self, target: &Table, ddls: &mut Vec<Ddl>) {
        for synonym in &self.node.synonyms {
            if !target.node.synonyms.contains(synonym) {
                ddls.push(self.alter_ddl(TableAlteration::DropSynonym {
                    name: synonym.clone(),
                }));
            }
        }
        for synonym in &target.node.synonyms {
            if !self.node.synonyms.contains(synonym) {
                ddls.push(self.alter_ddl(TableAlteration::AddSynonym {
                    name: synonym.clone(),
                }));
            }
        }
    }

    // Constraints are matched by name; anonymous constraints cannot be
    // altered in place, so a change to one falls through to recreate.
    fn diff_constraints(&self, target: &Table, ddls: &mut Vec<Ddl>) {
        fn named(table: &Table) -> Vec<(&String, &ast::TableConstraint)> {
            table
                .node
                .constraints
                .iter()
                .filter_map(|tc| tc.name.as_ref().map(|name| (name, tc)))
                .collect()
        }
        let base = named(self);
        let tgt = named(target);
        let base_names: Vec<&String> = base.iter().map(|(name, _)| *name).collect();
        let target_names: Vec<&String> = tgt.iter().map(|(name, _)| *name).collect();

        for (name, constraint) in &tgt {
            if !base_names.contains(name) {
                ddls.push(self.alter_ddl(TableAlteration::AddConstraint((*constraint).clone())));
            }
        }
        for (name, _) in &base {
            if !target_names.contains(name) {
                ddls.push(self.alter_ddl(TableAlteration::DropConstraint {
                    name: (*name).clone(),
                }));
            }
        }
        for (name, base_constraint) in &base {
            if let Some((_, target_constraint)) = tgt.iter().find(|(n, _)| n == name)
                && base_constraint != target_constraint
            {
                ddls.push(self.alter_ddl(TableAlteration::DropConstraint {
                    name: (*name).clone(),
                }));
                ddls.push(
                    self.alter_ddl(TableAlteration::AddConstraint((*target_constraint).clone())),
                );
            }
        }
    }
}
