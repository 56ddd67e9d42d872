//! Identifier model: stable, hashable keys for schema objects.
//!
//! The `Display` form doubles as the deterministic ordering key for
//! operation output, so it encodes the kind and the full name.

use std::fmt;

use crate::ast::Path;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Schema(SchemaId),
    Table(TableId),
    Column(ColumnId),
    Index(IndexId),
    SearchIndex(SearchIndexId),
    VectorIndex(VectorIndexId),
    PropertyGraph(PropertyGraphId),
    View(ViewId),
    ChangeStream(ChangeStreamId),
    Sequence(SequenceId),
    Model(ModelId),
    ProtoBundle(ProtoBundleId),
    Role(RoleId),
    Grant(GrantId),
    TableFunction(TableFunctionId),
    Database(DatabaseId),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaId {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableId {
    pub schema: Option<String>,
    pub name: String,
}

impl TableId {
    pub fn from_path(path: &Path) -> Self {
        Self {
            schema: path.schema().map(str::to_string),
            name: path.name().to_string(),
        }
    }

    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    pub fn schema_id(&self) -> Option<SchemaId> {
        self.schema.as_ref().map(|name| SchemaId { name: name.clone() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnId {
    pub table: TableId,
    pub name: String,
}

impl ColumnId {
    pub fn new(table: TableId, name: impl Into<String>) -> Self {
        Self {
            table,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexId {
    pub schema: Option<String>,
    pub name: String,
}

impl IndexId {
    pub fn from_path(path: &Path) -> Self {
        Self {
            schema: path.schema().map(str::to_string),
            name: path.name().to_string(),
        }
    }

    pub fn schema_id(&self) -> Option<SchemaId> {
        self.schema.as_ref().map(|name| SchemaId { name: name.clone() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchIndexId {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VectorIndexId {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyGraphId {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewId {
    pub schema: Option<String>,
    pub name: String,
}

impl ViewId {
    pub fn from_path(path: &Path) -> Self {
        Self {
            schema: path.schema().map(str::to_string),
            name: path.name().to_string(),
        }
    }

    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeStreamId {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceId {
    pub schema: Option<String>,
    pub name: String,
}

impl SequenceId {
    pub fn from_path(path: &Path) -> Self {
        Self {
            schema: path.schema().map(str::to_string),
            name: path.name().to_string(),
        }
    }

    pub fn schema_id(&self) -> Option<SchemaId> {
        self.schema.as_ref().map(|name| SchemaId { name: name.clone() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelId {
    pub name: String,
}

/// At most one proto bundle exists per schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProtoBundleId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleId {
    pub name: String,
}

/// One logical grant per (role, privilege target) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrantId {
    pub role: RoleId,
    pub target: Box<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableFunctionId {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabaseId {
    pub name: String,
}

fn qualified(schema: &Option<String>, name: &str) -> String {
    match schema {
        Some(schema) => format!("{}:{}", schema, name),
        None => name.to_string(),
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(id) => write!(f, "SchemaID({})", id.name),
            Self::Table(id) => write!(f, "TableID({})", qualified(&id.schema, &id.name)),
            Self::Column(id) => write!(
                f,
                "ColumnID(TableID({}):{})",
                qualified(&id.table.schema, &id.table.name),
                id.name
            ),
            Self::Index(id) => write!(f, "IndexID({})", qualified(&id.schema, &id.name)),
            Self::SearchIndex(id) => write!(f, "SearchIndexID({})", id.name),
            Self::VectorIndex(id) => write!(f, "VectorIndexID({})", id.name),
            Self::PropertyGraph(id) => write!(f, "PropertyGraphID({})", id.name),
            Self::View(id) => write!(f, "ViewID({})", qualified(&id.schema, &id.name)),
            Self::ChangeStream(id) => write!(f, "ChangeStreamID({})", id.name),
            Self::Sequence(id) => write!(f, "SequenceID({})", qualified(&id.schema, &id.name)),
            Self::Model(id) => write!(f, "ModelID({})", id.name),
            Self::ProtoBundle(_) => write!(f, "ProtoBundleID()"),
            Self::Role(id) => write!(f, "RoleID({})", id.name),
            Self::Grant(id) => write!(f, "GrantID(RoleID({}):{})", id.role.name, id.target),
            Self::TableFunction(id) => write!(f, "TableFunctionID({})", id.name),
            Self::Database(id) => write!(f, "DatabaseID({})", id.name),
        }
    }
}
