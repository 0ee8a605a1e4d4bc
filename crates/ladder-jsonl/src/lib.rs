//! Resilient JSON Lines reading for ladder catalog snapshots.
//!
//! Catalog files are plain JSONL: one record per line, blank lines ignored.
//! Reading is resilient by default: a malformed line becomes a [`Warning`]
//! carrying its 1-based line number and the remaining records still load.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod reader;
pub mod warning;

pub use error::{Error, Result};
pub use reader::{JsonlReader, read_jsonl_resilient};
pub use warning::Warning;
