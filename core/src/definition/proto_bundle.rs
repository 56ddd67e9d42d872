use crate::ast::{self, Ddl};
use crate::ident::{Identifier, ProtoBundleId};
use crate::migrate::plan::Migration;

/// `CREATE PROTO BUNDLE`. A schema holds at most one bundle, so the
/// identifier carries no name.
#[derive(Debug)]
pub struct ProtoBundle {
    pub node: ast::CreateProtoBundle,
}

impl ProtoBundle {
    pub fn new(node: ast::CreateProtoBundle) -> Self {
        Self { node }
    }

    pub fn id(&self) -> Identifier {
        Identifier::ProtoBundle(ProtoBundleId)
    }

    pub fn add_ddl(&self) -> Ddl {
        Ddl::CreateProtoBundle(self.node.clone())
    }

    pub fn drop_ddl(&self) -> Ddl {
        Ddl::DropProtoBundle
    }

    pub fn alter(&self, target: &ProtoBundle, m: &mut Migration) {
        let insert: Vec<String> = target
            .node
            .types
            .iter()
            .filter(|ty| !self.node.types.contains(ty))
            .cloned()
            .collect();
        let delete: Vec<String> = self
            .node
            .types
            .iter()
            .filter(|ty| !target.node.types.contains(ty))
            .cloned()
            .collect();
        let ddl = Ddl::AlterProtoBundle(ast::AlterProtoBundle { insert, delete });
        m.set_alter_if_undefined(&self.id(), vec![ddl]);
    }
}
