//! In-memory catalog snapshot.

use super::Catalog;
use crate::domain::{Position, PositionId, Skill, Transition, Viewer, ViewerId, ViewerSkillSet};
use crate::error::{NotFoundError, Result};
use async_trait::async_trait;

/// A catalog held entirely in memory.
///
/// Lists keep insertion order, which is the order the engine reports
/// transitions in.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    positions: Vec<Position>,
    skills: Vec<Skill>,
    transitions: Vec<Transition>,
    viewers: Vec<Viewer>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from complete lists.
    #[must_use]
    pub fn from_parts(
        positions: Vec<Position>,
        skills: Vec<Skill>,
        transitions: Vec<Transition>,
        viewers: Vec<Viewer>,
    ) -> Self {
        Self {
            positions,
            skills,
            transitions,
            viewers,
        }
    }

    /// Add a position.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.positions.push(position);
        self
    }

    /// Add a skill.
    #[must_use]
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    /// Add a transition.
    #[must_use]
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add a viewer profile.
    #[must_use]
    pub fn with_viewer(mut self, viewer: Viewer) -> Self {
        self.viewers.push(viewer);
        self
    }

    fn viewer(&self, id: &ViewerId) -> Option<&Viewer> {
        self.viewers.iter().find(|viewer| &viewer.id == id)
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn list_positions(&self) -> Result<Vec<Position>> {
        Ok(self.positions.clone())
    }

    async fn list_transitions(&self) -> Result<Vec<Transition>> {
        Ok(self.transitions.clone())
    }

    async fn list_skills(&self) -> Result<Vec<Skill>> {
        Ok(self.skills.clone())
    }

    async fn list_skill_ids_for_viewer(&self, viewer: &ViewerId) -> Result<ViewerSkillSet> {
        Ok(self
            .viewer(viewer)
            .map(|v| v.skill_ids.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_position(&self, id: &PositionId) -> Result<Position> {
        self.positions
            .iter()
            .find(|position| &position.id == id)
            .cloned()
            .ok_or_else(|| NotFoundError::Position(id.clone()).into())
    }

    async fn get_viewer(&self, id: &ViewerId) -> Result<Option<Viewer>> {
        Ok(self.viewer(id).cloned())
    }
}
