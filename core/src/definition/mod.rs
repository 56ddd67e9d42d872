//! Schema-object definitions.
//!
//! One module per object kind. Each definition wraps the AST node that
//! created it and knows how to add, drop and alter itself, which
//! identifiers it depends on, and how to react when a dependency's
//! migration state changes.

pub mod change_stream;
pub mod column;
pub mod database;
pub mod grant;
pub mod index;
pub mod model;
pub mod property_graph;
pub mod proto_bundle;
pub mod role;
pub mod schema;
pub mod search_index;
pub mod sequence;
pub mod table;
pub mod vector_index;
pub mod view;

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::Ddl;
use crate::error::{SpandiffError, SpandiffResult};
use crate::ident::Identifier;
use crate::migrate::plan::{Migration, MigrationState};
use crate::sql::ToSql;

#[derive(Debug, Clone)]
pub enum Definition {
    Schema(Rc<schema::Schema>),
    Table(Rc<table::Table>),
    Column(Rc<column::Column>),
    Index(Rc<index::Index>),
    SearchIndex(Rc<search_index::SearchIndex>),
    VectorIndex(Rc<vector_index::VectorIndex>),
    PropertyGraph(Rc<property_graph::PropertyGraph>),
    View(Rc<view::View>),
    ChangeStream(Rc<change_stream::ChangeStream>),
    Sequence(Rc<sequence::Sequence>),
    Model(Rc<model::Model>),
    ProtoBundle(Rc<proto_bundle::ProtoBundle>),
    Role(Rc<role::Role>),
    Grant(Rc<grant::Grant>),
    Database(Rc<database::Database>),
}

impl Definition {
    pub fn id(&self) -> Identifier {
        match self {
            Self::Schema(d) => d.id(),
            Self::Table(d) => d.id(),
            Self::Column(d) => d.id(),
            Self::Index(d) => d.id(),
            Self::SearchIndex(d) => d.id(),
            Self::VectorIndex(d) => d.id(),
            Self::PropertyGraph(d) => d.id(),
            Self::View(d) => d.id(),
            Self::ChangeStream(d) => d.id(),
            Self::Sequence(d) => d.id(),
            Self::Model(d) => d.id(),
            Self::ProtoBundle(d) => d.id(),
            Self::Role(d) => d.id(),
            Self::Grant(d) => d.id(),
            Self::Database(d) => d.id(),
        }
    }

    /// Structural equality of the underlying AST nodes.
    pub fn ast_eq(&self, other: &Definition) -> bool {
        match (self, other) {
            (Self::Schema(a), Self::Schema(b)) => a.node == b.node,
            (Self::Table(a), Self::Table(b)) => a.node == b.node,
            (Self::Column(a), Self::Column(b)) => a.node == b.node,
            (Self::Index(a), Self::Index(b)) => a.node == b.node,
            (Self::SearchIndex(a), Self::SearchIndex(b)) => a.node == b.node,
            (Self::VectorIndex(a), Self::VectorIndex(b)) => a.node == b.node,
            (Self::PropertyGraph(a), Self::PropertyGraph(b)) => a.node == b.node,
            (Self::View(a), Self::View(b)) => a.node == b.node,
            (Self::ChangeStream(a), Self::ChangeStream(b)) => a.node == b.node,
            (Self::Sequence(a), Self::Sequence(b)) => a.node == b.node,
            (Self::Model(a), Self::Model(b)) => a.node == b.node,
            (Self::ProtoBundle(a), Self::ProtoBundle(b)) => a.node == b.node,
            (Self::Role(a), Self::Role(b)) => a.node == b.node,
            (Self::Grant(a), Self::Grant(b)) => a.node == b.node,
            (Self::Database(a), Self::Database(b)) => a.node == b.node,
            _ => false,
        }
    }

    /// The canonical statement creating this object from nothing.
    pub fn add_ddl(&self) -> Ddl {
        match self {
            Self::Schema(d) => d.add_ddl(),
            Self::Table(d) => d.add_ddl(),
            Self::Column(d) => d.add_ddl(),
            Self::Index(d) => d.add_ddl(),
            Self::SearchIndex(d) => d.add_ddl(),
            Self::VectorIndex(d) => d.add_ddl(),
            Self::PropertyGraph(d) => d.add_ddl(),
            Self::View(d) => d.add_ddl(),
            Self::ChangeStream(d) => d.add_ddl(),
            Self::Sequence(d) => d.add_ddl(),
            Self::Model(d) => d.add_ddl(),
            Self::ProtoBundle(d) => d.add_ddl(),
            Self::Role(d) => d.add_ddl(),
            Self::Grant(d) => d.add_ddl(),
            Self::Database(d) => d.add_ddl(),
        }
    }

    /// The canonical statement removing this object. `None` for objects
    /// with no drop counterpart (`ALTER DATABASE`).
    pub fn drop_ddl(&self) -> Option<Ddl> {
        match self {
            Self::Schema(d) => Some(d.drop_ddl()),
            Self::Table(d) => Some(d.drop_ddl()),
            Self::Column(d) => Some(d.drop_ddl()),
            Self::Index(d) => Some(d.drop_ddl()),
            Self::SearchIndex(d) => Some(d.drop_ddl()),
            Self::VectorIndex(d) => Some(d.drop_ddl()),
            Self::PropertyGraph(d) => Some(d.drop_ddl()),
            Self::View(d) => Some(d.drop_ddl()),
            Self::ChangeStream(d) => Some(d.drop_ddl()),
            Self::Sequence(d) => Some(d.drop_ddl()),
            Self::Model(d) => Some(d.drop_ddl()),
            Self::ProtoBundle(d) => Some(d.drop_ddl()),
            Self::Role(d) => Some(d.drop_ddl()),
            Self::Grant(d) => Some(d.drop_ddl()),
            Self::Database(_) => None,
        }
    }

    /// Identifiers this object references. They need not resolve.
    pub fn depends_on(&self) -> Vec<Identifier> {
        match self {
            Self::Schema(d) => d.depends_on(),
            Self::Table(d) => d.depends_on(),
            Self::Column(d) => d.depends_on(),
            Self::Index(d) => d.depends_on(),
            Self::SearchIndex(d) => d.depends_on(),
            Self::VectorIndex(d) => d.depends_on(),
            Self::PropertyGraph(d) => d.depends_on(),
            Self::View(d) => d.depends_on(),
            Self::ChangeStream(d) => d.depends_on(),
            Self::Sequence(d) => d.depends_on(),
            Self::Model(_) => Vec::new(),
            Self::ProtoBundle(_) => Vec::new(),
            Self::Role(_) => Vec::new(),
            Self::Grant(d) => d.depends_on(),
            Self::Database(_) => Vec::new(),
        }
    }

    /// Compute the least-intrusive plan when base and target differ.
    /// `self` is the base-side definition.
    pub fn alter(&self, target: &Definition, m: &mut Migration) -> SpandiffResult<()> {
        match (self, target) {
            (Self::Schema(d), Self::Schema(t)) => d.alter(t, m),
            (Self::Table(d), Self::Table(t)) => d.alter(t, m),
            (Self::Column(d), Self::Column(t)) => d.alter(t, m),
            (Self::Index(d), Self::Index(t)) => d.alter(t, m),
            (Self::SearchIndex(d), Self::SearchIndex(t)) => d.alter(t, m),
            (Self::VectorIndex(d), Self::VectorIndex(t)) => d.alter(t, m),
            (Self::PropertyGraph(d), Self::PropertyGraph(t)) => d.alter(t, m),
            (Self::View(d), Self::View(t)) => d.alter(t, m),
            (Self::ChangeStream(d), Self::ChangeStream(t)) => d.alter(t, m),
            (Self::Sequence(d), Self::Sequence(t)) => return d.alter(t, m),
            (Self::Model(d), Self::Model(t)) => d.alter(t, m),
            (Self::ProtoBundle(d), Self::ProtoBundle(t)) => d.alter(t, m),
            (Self::Role(d), Self::Role(t)) => d.alter(t, m),
            (Self::Grant(d), Self::Grant(t)) => d.alter(t, m),
            (Self::Database(d), Self::Database(t)) => d.alter(t, m),
            // Identifiers encode the kind, so both sides always match.
            _ => {}
        }
        Ok(())
    }

    /// React to a dependency's state change; may escalate `me`'s state.
    pub fn on_dependency_change(
        &self,
        me: &MigrationState,
        dependency: &MigrationState,
        m: &mut Migration,
    ) {
        match self {
            Self::Column(d) => d.on_dependency_change(me, dependency, m),
            Self::Index(d) => d.on_dependency_change(me, dependency, m),
            Self::SearchIndex(d) => d.on_dependency_change(me, dependency, m),
            Self::VectorIndex(d) => d.on_dependency_change(me, dependency, m),
            Self::PropertyGraph(d) => d.on_dependency_change(me, dependency, m),
            Self::View(d) => d.on_dependency_change(me, dependency, m),
            Self::ChangeStream(d) => d.on_dependency_change(me, dependency, m),
            Self::Grant(d) => d.on_dependency_change(me, dependency, m),
            _ => {}
        }
    }

    /// Collapse a duplicate into a merged definition, when the kind
    /// supports it (grants only).
    fn merge(&self, other: &Definition) -> Option<Definition> {
        match (self, other) {
            (Self::Grant(a), Self::Grant(b)) => {
                a.merge(b).map(|merged| Self::Grant(Rc::new(merged)))
            }
            _ => None,
        }
    }

    /// Fixed processing order for the planning passes: parents before the
    /// objects defined inside or on top of them.
    fn kind_rank(&self) -> u8 {
        match self {
            Self::Schema(_) => 0,
            Self::Table(_) => 1,
            Self::Column(_) => 2,
            Self::Index(_) => 3,
            Self::SearchIndex(_) => 4,
            Self::VectorIndex(_) => 5,
            Self::PropertyGraph(_) => 6,
            Self::View(_) => 7,
            Self::ChangeStream(_) => 8,
            Self::Sequence(_) => 9,
            Self::Model(_) => 10,
            Self::ProtoBundle(_) => 11,
            Self::Role(_) => 12,
            Self::Grant(_) => 13,
            Self::Database(_) => 14,
        }
    }
}

/// One side's definition set, keyed by identifier.
pub struct Definitions {
    all: HashMap<Identifier, Definition>,
}

impl Definitions {
    pub fn from_ddls(ddls: &[Ddl], error_on_unsupported: bool) -> SpandiffResult<Self> {
        let mut definitions = Self {
            all: HashMap::new(),
        };
        let mut duplicated = BTreeSet::new();

        for ddl in ddls {
            match ddl {
                Ddl::CreateSchema(node) => {
                    definitions.add(
                        Definition::Schema(Rc::new(schema::Schema::new(node.clone()))),
                        &mut duplicated,
                    );
                }
                Ddl::CreateTable(node) => {
                    let table = Rc::new(table::Table::new(node.clone()));
                    definitions.add(Definition::Table(table.clone()), &mut duplicated);
                    for column in column::Column::from_table(&table) {
                        definitions.add(Definition::Column(Rc::new(column)), &mut duplicated);
                    }
                }
                Ddl::CreateIndex(node) => {
                    definitions.add(
                        Definition::Index(Rc::new(index::Index::new(node.clone()))),
                        &mut duplicated,
                    );
                }
                Ddl::CreateSearchIndex(node) => {
                    definitions.add(
                        Definition::SearchIndex(Rc::new(search_index::SearchIndex::new(
                            node.clone(),
                        ))),
                        &mut duplicated,
                    );
                }
                Ddl::CreateVectorIndex(node) => {
                    definitions.add(
                        Definition::VectorIndex(Rc::new(vector_index::VectorIndex::new(
                            node.clone(),
                        ))),
                        &mut duplicated,
                    );
                }
                Ddl::CreatePropertyGraph(node) => {
                    definitions.add(
                        Definition::PropertyGraph(Rc::new(property_graph::PropertyGraph::new(
                            node.clone(),
                        ))),
                        &mut duplicated,
                    );
                }
                Ddl::CreateView(node) => {
                    definitions.add(
                        Definition::View(Rc::new(view::View::new(node.clone()))),
                        &mut duplicated,
                    );
                }
                Ddl::CreateChangeStream(node) => {
                    definitions.add(
                        Definition::ChangeStream(Rc::new(change_stream::ChangeStream::new(
                            node.clone(),
                        ))),
                        &mut duplicated,
                    );
                }
                Ddl::CreateSequence(node) => {
                    definitions.add(
                        Definition::Sequence(Rc::new(sequence::Sequence::new(node.clone()))),
                        &mut duplicated,
                    );
                }
                Ddl::CreateModel(node) => {
                    definitions.add(
                        Definition::Model(Rc::new(model::Model::new(node.clone()))),
                        &mut duplicated,
                    );
                }
                Ddl::CreateProtoBundle(node) => {
                    definitions.add(
                        Definition::ProtoBundle(Rc::new(proto_bundle::ProtoBundle::new(
                            node.clone(),
                        ))),
                        &mut duplicated,
                    );
                }
                Ddl::CreateRole(node) => {
                    definitions.add(
                        Definition::Role(Rc::new(role::Role::new(node.clone()))),
                        &mut duplicated,
                    );
                }
                Ddl::Grant(node) => {
                    for grant in grant::Grant::explode(node) {
                        definitions.add(Definition::Grant(Rc::new(grant)), &mut duplicated);
                    }
                }
                Ddl::AlterDatabase(node) => {
                    definitions.add(
                        Definition::Database(Rc::new(database::Database::new(node.clone()))),
                        &mut duplicated,
                    );
                }
                _ => {
                    if error_on_unsupported {
                        return Err(SpandiffError::UnsupportedDdl(ddl.to_sql()));
                    }
                }
            }
        }

        if !duplicated.is_empty() {
            let ids: Vec<String> = duplicated.into_iter().collect();
            return Err(SpandiffError::DuplicateIdentifier(ids.join(", ")));
        }
        Ok(definitions)
    }

    fn add(&mut self, def: Definition, duplicated: &mut BTreeSet<String>) {
        use std::collections::hash_map::Entry;
        let id = def.id();
        match self.all.entry(id.clone()) {
            Entry::Occupied(mut existing) => match existing.get().merge(&def) {
                Some(merged) => {
                    existing.insert(merged);
                }
                None => {
                    duplicated.insert(id.to_string());
                }
            },
            Entry::Vacant(slot) => {
                slot.insert(def);
            }
        }
    }

    pub fn get(&self, id: &Identifier) -> Option<&Definition> {
        self.all.get(id)
    }

    /// Definitions in deterministic processing order: kind first, then
    /// identifier string.
    pub fn sorted(&self) -> Vec<&Definition> {
        let mut defs: Vec<&Definition> = self.all.values().collect();
        defs.sort_by_cached_key(|def| (def.kind_rank(), def.id().to_string()));
        defs
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
