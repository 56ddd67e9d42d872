use crate::ast::{self, Ddl};
use crate::ident::{Identifier, ModelId};
use crate::migrate::plan::Migration;

/// `CREATE MODEL`. An options-only change alters in place; any other
/// change re-issues the statement as `CREATE OR REPLACE`.
#[derive(Debug)]
pub struct Model {
    pub node: ast::CreateModel,
}

impl Model {
    pub fn new(node: ast::CreateModel) -> Self {
        Self { node }
    }

    pub fn id(&self) -> Identifier {
        Identifier::Model(ModelId {
            name: self.node.name.clone(),
        })
    }

    pub fn add_ddl(&self) -> Ddl {
        Ddl::CreateModel(self.node.clone())
    }

    pub fn drop_ddl(&self) -> Ddl {
        Ddl::DropModel(ast::DropModel {
            name: self.node.name.clone(),
        })
    }

    pub fn alter(&self, target: &Model, m: &mut Migration) {
        if self.node.without_options() == target.node.without_options() {
            let ddl = Ddl::AlterModel(ast::AlterModel {
                name: target.node.name.clone(),
                options: target.node.options.clone().unwrap_or(ast::Options {
                    records: Vec::new(),
                }),
            });
            m.set_alter_if_undefined(&self.id(), vec![ddl]);
            return;
        }
        let mut replace = target.node.clone();
        replace.or_replace = true;
        m.set_alter_if_undefined(&self.id(), vec![Ddl::CreateModel(replace)]);
    }
}
