//! Error types for spandiff.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpandiffError {
    /// Failed to parse a DDL input.
    #[error("parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// Input DDL outside the supported schema-update surface (strict mode only).
    #[error("unsupported DDL: {0}")]
    UnsupportedDdl(String),

    /// Two definitions share one identifier on the same side.
    #[error("duplicated definition found: {0}")]
    DuplicateIdentifier(String),

    /// The operation dependency graph is cyclic.
    #[error("dependency cycle detected")]
    DependencyCycle,

    /// A schema change with no supported in-place alteration.
    #[error("unsupported alteration on: {0}")]
    UnsupportedAlteration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpandiffError {
    /// Create a parse error at the given byte offset.
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }
}

/// Result type alias for spandiff operations.
pub type SpandiffResult<T> = Result<T, SpandiffError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpandiffError::parse(5, "unexpected character");
        assert_eq!(
            err.to_string(),
            "parse error at position 5: unexpected character"
        );
    }
}
