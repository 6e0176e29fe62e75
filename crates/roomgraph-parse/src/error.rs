//! Error types for transcript parsing.

use std::path::PathBuf;

/// Errors from reading a transcript.
///
/// Malformed lines are never errors; they surface as warnings on the
/// parsed transcript. Only an unreadable source stops a parse.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("cannot read transcript {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for parsing.
pub type Result<T> = std::result::Result<T, ParseError>;
