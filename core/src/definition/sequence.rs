use crate::ast::{self, Ddl};
use crate::error::{SpandiffError, SpandiffResult};
use crate::ident::{Identifier, SequenceId};
use crate::migrate::plan::Migration;
use crate::sql::ToSql;

/// `CREATE SEQUENCE`. Only the options can change in place; anything else
/// has no supported alteration.
#[derive(Debug)]
pub struct Sequence {
    pub node: ast::CreateSequence,
}

impl Sequence {
    pub fn new(node: ast::CreateSequence) -> Self {
        Self { node }
    }

    pub fn sequence_id(&self) -> SequenceId {
        SequenceId::from_path(&self.node.name)
    }

    pub fn id(&self) -> Identifier {
        Identifier::Sequence(self.sequence_id())
    }

    pub fn add_ddl(&self) -> Ddl {
        Ddl::CreateSequence(self.node.clone())
    }

    pub fn drop_ddl(&self) -> Ddl {
        Ddl::DropSequence(ast::DropSequence {
            name: self.node.name.clone(),
        })
    }

    pub fn depends_on(&self) -> Vec<Identifier> {
        self.sequence_id()
            .schema_id()
            .map(Identifier::Schema)
            .into_iter()
            .collect()
    }

    pub fn alter(&self, target: &Sequence, m: &mut Migration) -> SpandiffResult<()> {
        if self.node.options != target.node.options {
            let ddl = Ddl::AlterSequence(ast::AlterSequence {
                name: target.node.name.clone(),
                options: target.node.options.clone().unwrap_or(ast::Options {
                    records: Vec::new(),
                }),
            });
            m.set_alter_if_undefined(&self.id(), vec![ddl]);
            return Ok(());
        }
        Err(SpandiffError::UnsupportedAlteration(
            target.add_ddl().to_sql(),
        ))
    }
}
