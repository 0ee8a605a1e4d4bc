//! Error types for ladder operations.

use crate::domain::{PositionId, ViewerId};
use std::io;
use thiserror::Error;

/// The error type for ladder operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced entity does not exist in the snapshot.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The snapshot violates a data-integrity rule (e.g. a transition points
    /// at a position that does not exist).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog file could not be read.
    #[error("Catalog error: {0}")]
    Jsonl(#[from] ladder_jsonl::Error),
}

/// Lookup failures, surfaced to the caller unmodified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    /// Position id absent from the snapshot.
    #[error("Position not found: {0}")]
    Position(PositionId),

    /// Viewer id absent from the catalog.
    #[error("Viewer not found: {0}")]
    Viewer(ViewerId),

    /// Viewer exists but has no current position to expand from.
    #[error("Viewer {0} has no current position")]
    ViewerWithoutPosition(ViewerId),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `.ladder/` directory was found walking up from the working directory.
    #[error("Not a ladder repository (or any parent). Run 'ladder init' first.")]
    NotInitialized,

    /// A `.ladder/` directory already exists at the target.
    #[error("Ladder is already initialized in {0}")]
    AlreadyInitialized(String),

    /// Configuration file could not be parsed or serialized.
    #[error("Invalid configuration: {0}")]
    Parse(String),

    /// A configuration value is outside its allowed range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl Error {
    /// Returns `true` if this error is a [`NotFoundError`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns `true` if this error is a validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// A specialized Result type for ladder operations.
pub type Result<T> = std::result::Result<T, Error>;
