//! DDL statement nodes for the supported Cloud Spanner schema-update surface.
//!
//! Nodes carry no source positions, so derived equality is structural by
//! construction. Two nodes get hand-written equality instead:
//! [`Options`] (records compare unordered by key) and [`IndexKey`]
//! (an absent direction equals `ASC`).

pub mod types;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub use types::{ColumnKind, ScalarTypeName, SchemaType, TypeSize, alterable_in_place};

/// A single DDL statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Ddl {
    CreateSchema(CreateSchema),
    CreateTable(CreateTable),
    CreateIndex(CreateIndex),
    CreateSearchIndex(CreateSearchIndex),
    CreateVectorIndex(CreateVectorIndex),
    CreatePropertyGraph(CreatePropertyGraph),
    CreateView(CreateView),
    CreateChangeStream(CreateChangeStream),
    CreateSequence(CreateSequence),
    CreateModel(CreateModel),
    CreateProtoBundle(CreateProtoBundle),
    CreateRole(CreateRole),
    Grant(Grant),
    Revoke(Revoke),
    AlterDatabase(AlterDatabase),
    AlterTable(AlterTable),
    AlterIndex(AlterIndex),
    AlterSearchIndex(AlterSearchIndex),
    AlterChangeStream(AlterChangeStream),
    AlterSequence(AlterSequence),
    AlterModel(AlterModel),
    AlterProtoBundle(AlterProtoBundle),
    DropSchema(DropSchema),
    DropTable(DropTable),
    DropIndex(DropIndex),
    DropSearchIndex(DropSearchIndex),
    DropVectorIndex(DropVectorIndex),
    DropPropertyGraph(DropPropertyGraph),
    DropView(DropView),
    DropChangeStream(DropChangeStream),
    DropSequence(DropSequence),
    DropModel(DropModel),
    DropProtoBundle,
    DropRole(DropRole),
}

/// A possibly schema-qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    pub idents: Vec<String>,
}

impl Path {
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            idents: vec![name.into()],
        }
    }

    /// The unqualified trailing identifier.
    pub fn name(&self) -> &str {
        self.idents.last().map(String::as_str).unwrap_or_default()
    }

    /// The leading schema identifier, when qualified.
    pub fn schema(&self) -> Option<&str> {
        match self.idents.len() {
            2 => Some(&self.idents[0]),
            _ => None,
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.idents.join("."))
    }
}

/// An expression captured as raw SQL text (defaults, checks, policies,
/// view queries). Equality is textual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawExpr(pub String);

impl fmt::Display for RawExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An `OPTIONS (name = value, ...)` clause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Options {
    pub records: Vec<OptionRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRecord {
    pub name: String,
    pub value: RawExpr,
}

impl PartialEq for Options {
    fn eq(&self, other: &Self) -> bool {
        let by_key = |opts: &Options| -> HashMap<String, RawExpr> {
            opts.records
                .iter()
                .map(|r| (r.name.clone(), r.value.clone()))
                .collect()
        };
        by_key(self) == by_key(other)
    }
}

impl Eq for Options {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSchema {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropSchema {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTable {
    pub if_not_exists: bool,
    pub name: Path,
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<TableConstraint>,
    pub synonyms: Vec<String>,
    pub primary_keys: Vec<IndexKey>,
    pub interleave: Option<InterleaveInParent>,
    pub row_deletion_policy: Option<RowDeletionPolicy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub ty: SchemaType,
    pub not_null: bool,
    /// `DEFAULT (expr)`
    pub default_expr: Option<RawExpr>,
    /// `AS (expr) STORED`
    pub generated: Option<GeneratedColumn>,
    pub options: Option<Options>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedColumn {
    pub expr: RawExpr,
    pub stored: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConstraint {
    pub name: Option<String>,
    pub constraint: Constraint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    ForeignKey {
        columns: Vec<String>,
        ref_table: Path,
        ref_columns: Vec<String>,
        on_delete: Option<OnDelete>,
    },
    Check(RawExpr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnDelete {
    Cascade,
    NoAction,
}

/// A key part of a primary key or index: column plus optional direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexKey {
    pub name: String,
    pub dir: Option<Direction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    Desc,
}

impl PartialEq for IndexKey {
    // An absent direction means ASC.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.dir.unwrap_or(Direction::Asc) == other.dir.unwrap_or(Direction::Asc)
    }
}

impl Eq for IndexKey {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterleaveInParent {
    pub table: Path,
    pub on_delete: Option<OnDelete>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowDeletionPolicy {
    pub expr: RawExpr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTable {
    pub name: Path,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIndex {
    pub unique: bool,
    pub null_filtered: bool,
    pub if_not_exists: bool,
    pub name: Path,
    pub table: Path,
    pub keys: Vec<IndexKey>,
    pub storing: Option<Storing>,
    pub interleave_in: Option<Path>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storing {
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropIndex {
    pub name: Path,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSearchIndex {
    pub name: String,
    pub table: String,
    pub token_columns: Vec<String>,
    pub storing: Option<Storing>,
    pub options: Option<Options>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropSearchIndex {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateVectorIndex {
    pub if_not_exists: bool,
    pub name: String,
    pub table: String,
    pub column: String,
    pub options: Options,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropVectorIndex {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePropertyGraph {
    pub or_replace: bool,
    pub name: String,
    pub node_tables: Vec<GraphElementTable>,
    pub edge_tables: Vec<GraphElementTable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphElementTable {
    pub name: String,
    pub key: Option<Vec<String>>,
    pub source: Option<GraphEdgeReference>,
    pub destination: Option<GraphEdgeReference>,
}

/// `SOURCE KEY (...) REFERENCES table (...)` or the DESTINATION equivalent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdgeReference {
    pub keys: Vec<String>,
    pub table: String,
    pub reference_columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropPropertyGraph {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateView {
    pub or_replace: bool,
    pub name: Path,
    pub security: SqlSecurity,
    pub query: RawExpr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlSecurity {
    Invoker,
    Definer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropView {
    pub name: Path,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateChangeStream {
    pub name: String,
    pub for_clause: Option<ChangeStreamFor>,
    pub options: Option<Options>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeStreamFor {
    All,
    Tables(Vec<ChangeStreamTable>),
}

/// One `FOR` entry: a table, optionally restricted to named columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeStreamTable {
    pub name: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropChangeStream {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterChangeStream {
    pub name: String,
    pub alteration: ChangeStreamAlteration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChangeStreamAlteration {
    SetFor(ChangeStreamFor),
    DropForAll,
    SetOptions(Options),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSequence {
    pub if_not_exists: bool,
    pub name: Path,
    pub options: Option<Options>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropSequence {
    pub name: Path,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterSequence {
    pub name: Path,
    pub options: Options,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateModel {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: String,
    pub input: Vec<ModelColumn>,
    pub output: Vec<ModelColumn>,
    pub remote: bool,
    pub options: Option<Options>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelColumn {
    pub name: String,
    pub ty: SchemaType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropModel {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterModel {
    pub name: String,
    pub options: Options,
}

/// Proto/enum type names are kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProtoBundle {
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterProtoBundle {
    pub insert: Vec<String>,
    pub delete: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRole {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRole {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub privilege: Privilege,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revoke {
    pub privilege: Privilege,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Privilege {
    OnTable {
        privileges: Vec<TablePrivilege>,
        names: Vec<String>,
    },
    SelectOnView {
        names: Vec<String>,
    },
    SelectOnChangeStream {
        names: Vec<String>,
    },
    ExecuteOnTableFunction {
        names: Vec<String>,
    },
    Role {
        names: Vec<String>,
    },
}

/// A table privilege; an empty column list means the whole table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TablePrivilege {
    Select(Vec<String>),
    Update(Vec<String>),
    Insert(Vec<String>),
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterDatabase {
    pub name: String,
    pub options: Options,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterTable {
    pub name: Path,
    pub alteration: TableAlteration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableAlteration {
    AddColumn {
        if_not_exists: bool,
        column: ColumnDef,
    },
    DropColumn {
        name: String,
    },
    AlterColumn {
        name: String,
        alteration: ColumnAlteration,
    },
    AddConstraint(TableConstraint),
    DropConstraint {
        name: String,
    },
    AddRowDeletionPolicy(RowDeletionPolicy),
    ReplaceRowDeletionPolicy(RowDeletionPolicy),
    DropRowDeletionPolicy,
    AddSynonym {
        name: String,
    },
    DropSynonym {
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnAlteration {
    /// `ALTER COLUMN c <type> [NOT NULL] [DEFAULT (expr)]`
    Type {
        ty: SchemaType,
        not_null: bool,
        default_expr: Option<RawExpr>,
    },
    SetOptions(Options),
    SetDefault(RawExpr),
    DropDefault,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterIndex {
    pub name: Path,
    pub alteration: IndexAlteration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterSearchIndex {
    pub name: String,
    pub alteration: IndexAlteration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndexAlteration {
    AddStoredColumn(String),
    DropStoredColumn(String),
}

impl CreateTable {
    /// A copy with the column list cleared, for comparing everything that
    /// column-level rules do not cover.
    pub fn without_columns(&self) -> Self {
        let mut copy = self.clone();
        copy.columns = Vec::new();
        copy
    }
}

impl CreateIndex {
    pub fn without_storing(&self) -> Self {
        let mut copy = self.clone();
        copy.storing = None;
        copy
    }

    pub fn stored_columns(&self) -> &[String] {
        self.storing.as_ref().map_or(&[], |s| &s.columns)
    }
}

impl CreateSearchIndex {
    pub fn without_storing(&self) -> Self {
        let mut copy = self.clone();
        copy.storing = None;
        copy
    }

    pub fn stored_columns(&self) -> &[String] {
        self.storing.as_ref().map_or(&[], |s| &s.columns)
    }
}

impl CreateModel {
    pub fn without_options(&self) -> Self {
        let mut copy = self.clone();
        copy.options = None;
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_equality_is_unordered() {
        let a = Options {
            records: vec![
                OptionRecord {
                    name: "x".into(),
                    value: RawExpr("1".into()),
                },
                OptionRecord {
                    name: "y".into(),
                    value: RawExpr("'v'".into()),
                },
            ],
        };
        let b = Options {
            records: vec![
                OptionRecord {
                    name: "y".into(),
                    value: RawExpr("'v'".into()),
                },
                OptionRecord {
                    name: "x".into(),
                    value: RawExpr("1".into()),
                },
            ],
        };
        assert_eq!(a, b);

        let c = Options {
            records: vec![OptionRecord {
                name: "x".into(),
                value: RawExpr("2".into()),
            }],
        };
        assert_ne!(a, c);
    }

    #[test]
    fn test_index_key_defaults_to_asc() {
        let implicit = IndexKey {
            name: "C1".into(),
            dir: None,
        };
        let explicit = IndexKey {
            name: "C1".into(),
            dir: Some(Direction::Asc),
        };
        let desc = IndexKey {
            name: "C1".into(),
            dir: Some(Direction::Desc),
        };
        assert_eq!(implicit, explicit);
        assert_ne!(implicit, desc);
    }

    #[test]
    fn test_path_schema_split() {
        let qualified = Path {
            idents: vec!["S1".into(), "T1".into()],
        };
        assert_eq!(qualified.schema(), Some("S1"));
        assert_eq!(qualified.name(), "T1");
        assert_eq!(qualified.to_string(), "S1.T1");

        let plain = Path::single("T1");
        assert_eq!(plain.schema(), None);
        assert_eq!(plain.name(), "T1");
    }
}
