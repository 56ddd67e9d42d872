use crate::ast::{self, Ddl};
use crate::ident::{Identifier, RoleId};
use crate::migrate::plan::{Migration, MigrationKind};

/// `CREATE ROLE`.
#[derive(Debug)]
pub struct Role {
    pub node: ast::CreateRole,
}

impl Role {
    pub fn new(node: ast::CreateRole) -> Self {
        Self { node }
    }

    pub fn role_id(&self) -> RoleId {
        RoleId {
            name: self.node.name.clone(),
        }
    }

    pub fn id(&self) -> Identifier {
        Identifier::Role(self.role_id())
    }

    pub fn add_ddl(&self) -> Ddl {
        Ddl::CreateRole(self.node.clone())
    }

    pub fn drop_ddl(&self) -> Ddl {
        Ddl::DropRole(ast::DropRole {
            name: self.node.name.clone(),
        })
    }

    pub fn alter(&self, _target: &Role, m: &mut Migration) {
        m.set_if_undefined(&self.id(), MigrationKind::DropAndAdd);
    }
}
