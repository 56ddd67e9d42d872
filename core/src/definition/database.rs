use crate::ast::{self, Ddl};
use crate::ident::{DatabaseId, Identifier};
use crate::migrate::plan::Migration;

/// `ALTER DATABASE`. Databases are never dropped: a base-side statement
/// with no target counterpart emits nothing.
#[derive(Debug)]
pub struct Database {
    pub node: ast::AlterDatabase,
}

impl Database {
    pub fn new(node: ast::AlterDatabase) -> Self {
        Self { node }
    }

    pub fn id(&self) -> Identifier {
        Identifier::Database(DatabaseId {
            name: self.node.name.clone(),
        })
    }

    pub fn add_ddl(&self) -> Ddl {
        Ddl::AlterDatabase(self.node.clone())
    }

    pub fn alter(&self, target: &Database, m: &mut Migration) {
        let ddl = Ddl::AlterDatabase(ast::AlterDatabase {
            name: target.node.name.clone(),
            options: target.node.options.clone(),
        });
        m.set_alter_if_undefined(&self.id(), vec![ddl]);
    }
}
