//! In-memory career graph built on petgraph.
//!
//! # Architecture
//!
//! - `Vec<Position>` / `Vec<Transition>` hold the snapshot in input order
//! - `petgraph::DiGraph` holds the adjacency; node weights are indices into
//!   the position list, edge weights are indices into the transition list
//! - `HashMap<PositionId, NodeIndex>` gives O(1) node lookup
//!
//! ## Edge Direction
//!
//! An edge `A -> B` means "a holder of position A can move to position B".
//! Parallel edges between the same pair are kept; each transition is
//! classified on its own.
//!
//! Required skill ids are extracted from each transition once, at build
//! time, so classification never re-walks the resolved skill records.

pub mod reachability;

use crate::domain::{Position, PositionId, SkillId, Transition};
use crate::error::{Error, NotFoundError, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

pub use reachability::reachable_from;

/// A validated, immutable career graph snapshot.
#[derive(Debug, Clone)]
pub struct CareerGraph {
    positions: Vec<Position>,
    transitions: Vec<Transition>,

    /// Required skill ids per transition, aligned with `transitions`.
    required: Vec<Vec<SkillId>>,

    /// Node weight: index into `positions`. Edge weight: index into `transitions`.
    graph: DiGraph<usize, usize>,

    /// Mapping from position id to graph node.
    ///
    /// Every position in `positions` has exactly one entry.
    node_map: HashMap<PositionId, NodeIndex>,
}

impl CareerGraph {
    /// Build a graph from flat position and transition lists.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if two positions share an id, or if a
    /// transition references a position id that is not in `positions`.
    /// Malformed edges are never dropped silently.
    pub fn build(positions: Vec<Position>, transitions: Vec<Transition>) -> Result<Self> {
        let mut graph = DiGraph::with_capacity(positions.len(), transitions.len());
        let mut node_map = HashMap::with_capacity(positions.len());

        for (index, position) in positions.iter().enumerate() {
            let node = graph.add_node(index);
            if node_map.insert(position.id.clone(), node).is_some() {
                return Err(Error::Validation(format!(
                    "duplicate position id {}",
                    position.id
                )));
            }
        }

        let mut required = Vec::with_capacity(transitions.len());
        for (index, transition) in transitions.iter().enumerate() {
            let from = endpoint(&node_map, transition, &transition.from_position_id, "from")?;
            let to = endpoint(&node_map, transition, &transition.to_position_id, "to")?;
            graph.add_edge(from, to, index);
            required.push(transition.required_skill_ids().cloned().collect());
        }

        tracing::debug!(
            positions = positions.len(),
            transitions = transitions.len(),
            "Built career graph"
        );

        Ok(Self {
            positions,
            transitions,
            required,
            graph,
            node_map,
        })
    }

    /// Look up a position by id.
    #[must_use]
    pub fn position(&self, id: &PositionId) -> Option<&Position> {
        self.node_map
            .get(id)
            .map(|&node| &self.positions[self.graph[node]])
    }

    /// Look up a position by id, failing with `NotFound` when absent.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if `id` is not part of the snapshot.
    pub fn require_position(&self, id: &PositionId) -> Result<&Position> {
        self.position(id)
            .ok_or_else(|| NotFoundError::Position(id.clone()).into())
    }

    /// Whether the graph contains a position with this id.
    #[must_use]
    pub fn contains(&self, id: &PositionId) -> bool {
        self.node_map.contains_key(id)
    }

    /// All positions, in input order.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// All transitions, in input order.
    #[must_use]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Required skill ids of the transition at `index`, in catalog order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for [`transitions`](Self::transitions).
    #[must_use]
    pub fn required_skill_ids(&self, index: usize) -> &[SkillId] {
        &self.required[index]
    }

    /// Number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the graph has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Indices of the outgoing transitions of `id`, in input order.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if `id` is not part of the snapshot.
    pub fn outgoing_indices(&self, id: &PositionId) -> Result<Vec<usize>> {
        let node = self.node(id)?;
        // petgraph yields outgoing edges newest-first.
        let mut indices: Vec<usize> = self.graph.edges(node).map(|edge| *edge.weight()).collect();
        indices.sort_unstable();
        Ok(indices)
    }

    /// Outgoing transitions of `id` paired with their target positions.
    ///
    /// Returned in the input transitions' relative order. A position with no
    /// outgoing transitions yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if `id` is not part of the snapshot.
    pub fn neighbors_of(&self, id: &PositionId) -> Result<Vec<(&Transition, &Position)>> {
        Ok(self
            .outgoing_indices(id)?
            .into_iter()
            .map(|index| {
                let transition = &self.transitions[index];
                (transition, self.target_of(transition))
            })
            .collect())
    }

    /// Target position of a transition that belongs to this graph.
    pub(crate) fn target_of(&self, transition: &Transition) -> &Position {
        let node = self.node_map[&transition.to_position_id];
        &self.positions[self.graph[node]]
    }

    pub(crate) fn node(&self, id: &PositionId) -> Result<NodeIndex> {
        self.node_map
            .get(id)
            .copied()
            .ok_or_else(|| NotFoundError::Position(id.clone()).into())
    }

    pub(crate) fn inner(&self) -> &DiGraph<usize, usize> {
        &self.graph
    }

    pub(crate) fn position_at(&self, node: NodeIndex) -> &Position {
        &self.positions[self.graph[node]]
    }
}

fn endpoint(
    node_map: &HashMap<PositionId, NodeIndex>,
    transition: &Transition,
    id: &PositionId,
    side: &str,
) -> Result<NodeIndex> {
    node_map.get(id).copied().ok_or_else(|| {
        Error::Validation(format!(
            "transition {} references unknown {side} position {id}",
            transition.id
        ))
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::{Position, Skill, SkillId, Transition, TransitionId, TransitionType};

    pub(crate) fn position(id: &str, level: i32) -> Position {
        Position {
            id: id.into(),
            title: id.to_string(),
            level,
            department: "Engineering".to_string(),
        }
    }

    pub(crate) fn skill(id: &str) -> Skill {
        Skill {
            id: SkillId::new(id),
            name: id.to_uppercase(),
            category: None,
        }
    }

    pub(crate) fn transition(id: &str, from: &str, to: &str, skills: &[&str]) -> Transition {
        Transition {
            id: TransitionId::new(id),
            transition_type: TransitionType::Vertical,
            from_position_id: from.into(),
            to_position_id: to.into(),
            required_skills: skills.iter().map(|s| skill(s)).collect(),
        }
    }
}
