use std::io;
use std::path::PathBuf;

/// File-level failure of the reading dictionary or the record store.
///
/// Every batch tool treats these as fatal: the pass is aborted and the
/// maintainer re-runs it after fixing the input.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("source not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("dictionary key must not be empty")]
    EmptyKey,

    #[error("reading {reading:?} for {key:?} must be kana with no whitespace")]
    InvalidReading { key: String, reading: String },

    #[error("unknown dictionary format: {0} (expected .json or .tsv)")]
    UnknownFormat(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Parse(e.to_string())
    }
}
