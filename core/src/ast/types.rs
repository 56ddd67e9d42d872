//! Column type model.
//!
//! `SchemaType` mirrors the type syntax accepted in column definitions;
//! `ColumnKind` collapses it to the granularity at which Cloud Spanner
//! decides whether two types are convertible in place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A column type as written in DDL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaType {
    /// BOOL, INT64, FLOAT64, ...
    Scalar(ScalarTypeName),
    /// STRING(n | MAX), BYTES(n | MAX)
    Sized(ScalarTypeName, TypeSize),
    /// ARRAY<T>
    Array(Box<SchemaType>),
    /// A proto message or enum type, by dotted path.
    Named(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarTypeName {
    Bool,
    Int64,
    Float32,
    Float64,
    Numeric,
    Date,
    Timestamp,
    Interval,
    Json,
    TokenList,
    String,
    Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeSize {
    Max,
    Limit(u64),
}

impl ScalarTypeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "BOOL",
            Self::Int64 => "INT64",
            Self::Float32 => "FLOAT32",
            Self::Float64 => "FLOAT64",
            Self::Numeric => "NUMERIC",
            Self::Date => "DATE",
            Self::Timestamp => "TIMESTAMP",
            Self::Interval => "INTERVAL",
            Self::Json => "JSON",
            Self::TokenList => "TOKENLIST",
            Self::String => "STRING",
            Self::Bytes => "BYTES",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(name) => f.write_str(name.as_str()),
            Self::Sized(name, TypeSize::Max) => write!(f, "{}(MAX)", name.as_str()),
            Self::Sized(name, TypeSize::Limit(n)) => write!(f, "{}({})", name.as_str(), n),
            Self::Array(item) => write!(f, "ARRAY<{}>", item),
            Self::Named(path) => f.write_str(path),
        }
    }
}

/// Type classification for the in-place `ALTER COLUMN <type>` rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    Scalar(ScalarTypeName),
    Array(Box<ColumnKind>),
    ProtoOrEnum,
}

impl SchemaType {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Scalar(name) | Self::Sized(name, _) => ColumnKind::Scalar(*name),
            Self::Array(item) => ColumnKind::Array(Box::new(item.kind())),
            Self::Named(_) => ColumnKind::ProtoOrEnum,
        }
    }
}

/// Whether a column can change from `base` to `target` with a single
/// `ALTER TABLE ... ALTER COLUMN <type>` statement.
///
/// https://cloud.google.com/spanner/docs/schema-updates#supported-updates
pub fn alterable_in_place(base: &SchemaType, target: &SchemaType) -> bool {
    use ColumnKind::{Array, ProtoOrEnum, Scalar};
    use ScalarTypeName::{Bytes, String};

    let pair = (base.kind(), target.kind());
    matches!(
        pair,
        (Scalar(String), Scalar(Bytes))
            | (Scalar(Bytes), Scalar(String))
            | (ProtoOrEnum, Scalar(Bytes))
            | (Scalar(Bytes), ProtoOrEnum)
            | (Scalar(String), Scalar(String))
            | (Scalar(Bytes), Scalar(Bytes))
    ) || matches!(
        &pair,
        (Array(a), Array(b))
            if matches!(
                (a.as_ref(), b.as_ref()),
                (Scalar(String), Scalar(String))
                    | (Scalar(Bytes), Scalar(Bytes))
                    | (ProtoOrEnum, ProtoOrEnum)
            )
    )
}
