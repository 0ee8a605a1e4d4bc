//! Application context for CLI command execution.
//!
//! `App` pairs a [`Catalog`] with the repository configuration. Each call
//! fetches a fresh snapshot from the catalog and hands it to the pure
//! functions in [`crate::engine`]; nothing is cached between calls.
//!
//! # Example
//!
//! ```no_run
//! use ladder::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     let view = app.compute_graph(None).await?;
//!     println!("{} transitions", view.transitions.len());
//!     Ok(())
//! }
//! ```

use crate::catalog::{Catalog, LoadWarning, load_catalog_from_dir};
use crate::config::{CONFIG_FILE_NAME, LADDER_DIR_NAME, LadderConfig, find_ladder_root};
use crate::domain::{PositionId, ViewerId, ViewerSkillSet};
use crate::engine::{self, GraphView, PositionPaths, RenderPlan};
use crate::error::{ConfigError, NotFoundError, Result};
use crate::graph::{CareerGraph, reachable_from};
use crate::layout::Layout;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
pub struct App {
    /// The catalog backend (trait object for polymorphism)
    catalog: Box<dyn Catalog>,

    /// Repository configuration
    config: LadderConfig,

    /// Records skipped while loading the catalog
    warnings: Vec<LoadWarning>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("warnings", &self.warnings.len())
            .field("catalog", &"<dyn Catalog>")
            .finish()
    }
}

impl App {
    /// Create an App over an existing catalog.
    #[must_use]
    pub fn new(catalog: Box<dyn Catalog>, config: LadderConfig) -> Self {
        Self {
            catalog,
            config,
            warnings: Vec::new(),
        }
    }

    /// Create an App from the given working directory.
    ///
    /// Searches up the directory tree for `.ladder/`, loads its configuration
    /// and reads the catalog files from the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No ladder repository is found in the directory tree
    /// - Configuration cannot be loaded or is invalid
    /// - A catalog file cannot be read
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_ladder_root(working_dir).ok_or(ConfigError::NotInitialized)?;
        let config_path = root_dir.join(LADDER_DIR_NAME).join(CONFIG_FILE_NAME);

        let config = LadderConfig::load(&config_path).await?;
        let data_dir: PathBuf = config.data_path(&root_dir);
        let (catalog, warnings) = load_catalog_from_dir(&data_dir).await?;

        tracing::debug!(
            root = %root_dir.display(),
            data_dir = %data_dir.display(),
            warnings = warnings.len(),
            "Opened ladder repository"
        );

        Ok(Self {
            catalog: Box::new(catalog),
            config,
            warnings,
        })
    }

    /// Get an immutable reference to the catalog.
    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    /// Get the active configuration.
    #[must_use]
    pub fn config(&self) -> &LadderConfig {
        &self.config
    }

    /// Records skipped while loading the catalog.
    #[must_use]
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    async fn skills_for(&self, viewer: Option<&ViewerId>) -> Result<ViewerSkillSet> {
        match viewer {
            Some(id) => self.catalog.list_skill_ids_for_viewer(id).await,
            None => Ok(ViewerSkillSet::anonymous()),
        }
    }

    /// Classify the whole catalog for a viewer. `None` classifies with no
    /// skills held.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the catalog holds dangling transitions.
    pub async fn compute_graph(&self, viewer: Option<&ViewerId>) -> Result<GraphView> {
        let positions = self.catalog.list_positions().await?;
        let transitions = self.catalog.list_transitions().await?;
        let skills = self.skills_for(viewer).await?;
        engine::compute_graph(positions, transitions, &skills)
    }

    /// Expand one position for a viewer.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` for an unknown position and
    /// `Error::Validation` for dangling transitions.
    pub async fn compute_from_position(
        &self,
        position_id: &PositionId,
        viewer: Option<&ViewerId>,
    ) -> Result<PositionPaths> {
        let positions = self.catalog.list_positions().await?;
        let transitions = self.catalog.list_transitions().await?;
        let skills = self.skills_for(viewer).await?;
        engine::compute_from_position(positions, transitions, position_id, &skills)
    }

    /// Expand the viewer's current position with the viewer's skills.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the viewer is unknown, has no current
    /// position, or that position is missing from the catalog.
    pub async fn compute_for_viewer(&self, viewer: &ViewerId) -> Result<PositionPaths> {
        let profile = self
            .catalog
            .get_viewer(viewer)
            .await?
            .ok_or_else(|| NotFoundError::Viewer(viewer.clone()))?;
        let position_id = profile
            .position_id
            .ok_or_else(|| NotFoundError::ViewerWithoutPosition(viewer.clone()))?;

        self.compute_from_position(&position_id, Some(viewer)).await
    }

    /// Coordinates for every catalog position with the configured spacing.
    ///
    /// # Errors
    ///
    /// Returns an error only if the catalog cannot be read.
    pub async fn compute_layout(&self) -> Result<Layout> {
        let positions = self.catalog.list_positions().await?;
        Ok(engine::compute_layout(&positions, &self.config.layout))
    }

    /// Classified graph laid out with styled edges.
    ///
    /// # Errors
    ///
    /// Same as [`App::compute_graph`].
    pub async fn render_plan(&self, viewer: Option<&ViewerId>) -> Result<RenderPlan> {
        let view = self.compute_graph(viewer).await?;
        Ok(engine::render_plan(&view, &self.config.layout))
    }

    /// Ids of every position reachable from `position_id`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` for an unknown position and
    /// `Error::Validation` for dangling transitions.
    pub async fn reachable(&self, position_id: &PositionId) -> Result<HashSet<PositionId>> {
        let positions = self.catalog.list_positions().await?;
        let transitions = self.catalog.list_transitions().await?;
        let graph = CareerGraph::build(positions, transitions)?;
        reachable_from(&graph, position_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::commands::init;
    use crate::domain::{SkillId, Viewer};
    use crate::graph::fixtures::{position, skill, transition};
    use tempfile::TempDir;

    fn app(catalog: InMemoryCatalog) -> App {
        App::new(Box::new(catalog), LadderConfig::default())
    }

    fn ladder_catalog() -> InMemoryCatalog {
        InMemoryCatalog::new()
            .with_position(position("jr", 1))
            .with_position(position("mid", 2))
            .with_skill(skill("ts"))
            .with_transition(transition("t1", "jr", "mid", &["ts"]))
            .with_viewer(Viewer {
                id: ViewerId::new("u1"),
                position_id: Some("jr".into()),
                skill_ids: vec![SkillId::new("ts")],
            })
            .with_viewer(Viewer {
                id: ViewerId::new("drifter"),
                position_id: None,
                skill_ids: vec![],
            })
    }

    #[tokio::test]
    async fn no_viewer_means_no_skills() {
        let view = app(ladder_catalog()).compute_graph(None).await.unwrap();
        let t = &view.transitions[0];
        assert!(!t.is_recommended);
        assert_eq!(t.missing_skills, vec![SkillId::new("ts")]);
    }

    #[tokio::test]
    async fn viewer_skills_are_applied() {
        let view = app(ladder_catalog())
            .compute_graph(Some(&ViewerId::new("u1")))
            .await
            .unwrap();
        assert!(view.transitions[0].is_recommended);
    }

    #[tokio::test]
    async fn compute_for_viewer_starts_at_current_position() {
        let paths = app(ladder_catalog())
            .compute_for_viewer(&ViewerId::new("u1"))
            .await
            .unwrap();
        assert_eq!(paths.from_position.id.as_str(), "jr");
        assert!(paths.direct_transitions[0].classified.is_recommended);
    }

    #[tokio::test]
    async fn compute_for_viewer_requires_known_viewer_with_position() {
        let app = app(ladder_catalog());

        let unknown = app
            .compute_for_viewer(&ViewerId::new("ghost"))
            .await
            .unwrap_err();
        assert!(unknown.is_not_found());

        let drifter = app
            .compute_for_viewer(&ViewerId::new("drifter"))
            .await
            .unwrap_err();
        assert!(drifter.to_string().contains("no current position"));
    }

    #[tokio::test]
    async fn layout_uses_configured_spacing() {
        let mut config = LadderConfig::default();
        config.layout.horizontal_spacing = 10.0;
        let app = App::new(Box::new(ladder_catalog()), config);

        let layout = app.compute_layout().await.unwrap();
        let mid = layout.get(&"mid".into()).unwrap();
        assert!((mid.x - 10.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn reachable_lists_descendants() {
        let reachable = app(ladder_catalog())
            .reachable(&"jr".into())
            .await
            .unwrap();
        assert_eq!(reachable, HashSet::from([PositionId::new("mid")]));
    }

    #[tokio::test]
    async fn from_initialized_directory() {
        let temp_dir = TempDir::new().unwrap();
        init::init(temp_dir.path()).await.unwrap();

        let app = App::from_directory(temp_dir.path()).await.unwrap();
        assert!(app.warnings().is_empty());
        assert!(app.compute_graph(None).await.unwrap().positions.is_empty());
    }

    #[tokio::test]
    async fn from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        init::init(temp_dir.path()).await.unwrap();
        let sub_dir = temp_dir.path().join("src").join("lib");
        std::fs::create_dir_all(&sub_dir).unwrap();

        assert!(App::from_directory(&sub_dir).await.is_ok());
    }

    #[tokio::test]
    async fn from_uninitialized_directory() {
        let temp_dir = TempDir::new().unwrap();

        let err = App::from_directory(temp_dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("Not a ladder repository"));
    }
}
