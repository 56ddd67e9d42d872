use crate::ast::{self, Ddl};
use crate::ident::{Identifier, SchemaId};
use crate::migrate::plan::{Migration, MigrationKind};

/// `CREATE SCHEMA`. There is no ALTER SCHEMA, so any change recreates.
#[derive(Debug)]
pub struct Schema {
    pub node: ast::CreateSchema,
}

impl Schema {
    pub fn new(node: ast::CreateSchema) -> Self {
        Self { node }
    }

    pub fn schema_id(&self) -> SchemaId {
        SchemaId {
            name: self.node.name.clone(),
        }
    }

    pub fn id(&self) -> Identifier {
        Identifier::Schema(self.schema_id())
    }

    pub fn add_ddl(&self) -> Ddl {
        Ddl::CreateSchema(self.node.clone())
    }

    pub fn drop_ddl(&self) -> Ddl {
        Ddl::DropSchema(ast::DropSchema {
            name: self.node.name.clone(),
        })
    }

    pub fn depends_on(&self) -> Vec<Identifier> {
        Vec::new()
    }

    pub fn alter(&self, _target: &Schema, m: &mut Migration) {
        m.set_if_undefined(&self.id(), MigrationKind::DropAndAdd);
    }
}
