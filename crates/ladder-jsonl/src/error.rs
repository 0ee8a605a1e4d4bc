//! Error types for ladder-jsonl.

use std::io;
use thiserror::Error;

/// Fatal failures while reading a JSONL source.
///
/// Only the strict reading path produces [`Error::InvalidRecord`]; the
/// resilient path turns bad lines into [`crate::Warning`]s instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying reader or file failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A non-blank line could not be deserialized into the requested type.
    #[error("invalid record on line {line_number}: {source}")]
    InvalidRecord {
        /// 1-based line number of the offending line
        line_number: usize,
        /// Parser error
        source: serde_json::Error,
    },
}

/// Result alias for ladder-jsonl operations.
pub type Result<T> = std::result::Result<T, Error>;
