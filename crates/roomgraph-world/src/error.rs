//! Error types for world graphs and world documents.

use std::path::PathBuf;

use roomgraph_core::IdentityIntegrityError;

/// Errors from loading, saving, or assembling a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed world document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported world format {found:?}, expected {expected:?}")]
    UnsupportedFormat { found: String, expected: String },

    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityFailed { expected: String, actual: String },

    #[error(transparent)]
    Identity(#[from] IdentityIntegrityError),
}

/// Result type for world operations.
pub type Result<T> = std::result::Result<T, WorldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = WorldError::IntegrityFailed {
            expected: "abc".into(),
            actual: "def".into(),
        };
        assert!(err.to_string().contains("expected abc"));

        let err = WorldError::UnsupportedFormat {
            found: "other/9".into(),
            expected: "roomgraph/1".into(),
        };
        assert!(err.to_string().contains("other/9"));
    }
}
