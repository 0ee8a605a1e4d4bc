//! Read-only catalog of positions, skills, transitions and viewers.
//!
//! The catalog is the engine's only source of data. It owns every I/O
//! concern (and every integrity rule the mutation side enforces, such as
//! forbidding self-loop transitions); the engine only sees the snapshot it
//! hands out.
//!
//! Implementations:
//!
//! - [`InMemoryCatalog`]: a snapshot held in RAM, for tests and embedding
//! - [`load_catalog_from_dir`]: reads a directory of JSONL files into an
//!   [`InMemoryCatalog`], reporting skipped records as [`LoadWarning`]s
//!
//! # Example
//!
//! ```
//! use ladder::catalog::{Catalog, InMemoryCatalog};
//! use ladder::domain::{Position, ViewerId};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> ladder::error::Result<()> {
//! let catalog = InMemoryCatalog::new().with_position(Position {
//!     id: "junior".into(),
//!     title: "Junior Developer".to_string(),
//!     level: 1,
//!     department: "Engineering".to_string(),
//! });
//!
//! assert_eq!(catalog.list_positions().await?.len(), 1);
//! assert!(catalog.list_skill_ids_for_viewer(&ViewerId::new("nobody")).await?.is_empty());
//! # Ok(())
//! # }
//! ```

mod in_memory;
mod jsonl;

use crate::domain::{Position, PositionId, Skill, Transition, Viewer, ViewerId, ViewerSkillSet};
use crate::error::Result;
use async_trait::async_trait;

pub use in_memory::InMemoryCatalog;
pub use jsonl::{
    LoadWarning, POSITIONS_FILE_NAME, SKILLS_FILE_NAME, TRANSITIONS_FILE_NAME, VIEWERS_FILE_NAME,
    TransitionRecord, load_catalog_from_dir,
};

/// Read-only access to the career catalog.
///
/// Implementations must be `Send + Sync`; concurrent readers share nothing
/// mutable.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// All positions, in catalog order.
    async fn list_positions(&self) -> Result<Vec<Position>>;

    /// All transitions with their required skills resolved, in catalog order.
    async fn list_transitions(&self) -> Result<Vec<Transition>>;

    /// All skills, in catalog order.
    async fn list_skills(&self) -> Result<Vec<Skill>>;

    /// Skills held by a viewer. Unknown viewers hold no skills.
    async fn list_skill_ids_for_viewer(&self, viewer: &ViewerId) -> Result<ViewerSkillSet>;

    /// A single position.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the position does not exist.
    async fn get_position(&self, id: &PositionId) -> Result<Position>;

    /// A viewer profile, or `None` if the viewer is unknown.
    async fn get_viewer(&self, id: &ViewerId) -> Result<Option<Viewer>>;
}
