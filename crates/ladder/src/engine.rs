//! Derived views over a catalog snapshot.
//!
//! Every function here is synchronous and side-effect free: it takes an
//! immutable snapshot (positions, transitions, the viewer's skills) and
//! returns a value. All I/O happens in the catalog before these are called.
//! Errors are all-or-nothing; no partial view is ever returned.

use crate::classify::{ClassifiedTransition, classify_required};
use crate::domain::{Position, PositionId, Transition, TransitionId, ViewerSkillSet};
use crate::error::Result;
use crate::graph::{CareerGraph, reachable_from};
use crate::layout::style::{EdgeStyle, edge_style};
use crate::layout::{Layout, LayoutConfig, layout};
use serde::Serialize;
use std::cmp::Ordering;

/// The whole graph classified for one viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphView {
    /// Positions ordered by level, then title
    pub positions: Vec<Position>,
    /// Every transition in catalog order
    pub transitions: Vec<ClassifiedTransition>,
}

/// An outgoing transition with its target resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectTransition {
    /// Classified transition
    #[serde(flatten)]
    pub classified: ClassifiedTransition,
    /// Target position of the transition
    pub to_position: Position,
}

/// Career options from a single position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPaths {
    /// Position the expansion starts from
    pub from_position: Position,
    /// Outgoing transitions, in catalog order
    pub direct_transitions: Vec<DirectTransition>,
    /// Everything reachable through any chain of transitions, ordered by
    /// level, title, then id
    pub reachable_positions: Vec<Position>,
}

/// One edge ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedEdge {
    /// Transition id
    pub id: TransitionId,
    /// Source position
    pub source: PositionId,
    /// Target position
    pub target: PositionId,
    /// Presentation attributes
    pub style: EdgeStyle,
}

/// Node coordinates plus styled edges for a classified graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    /// Node coordinates
    pub nodes: Layout,
    /// Styled edges in catalog order
    pub edges: Vec<RenderedEdge>,
}

fn by_level_then_title(a: &Position, b: &Position) -> Ordering {
    a.level
        .cmp(&b.level)
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.id.cmp(&b.id))
}

fn classify_at(graph: &CareerGraph, index: usize, viewer: &ViewerSkillSet) -> ClassifiedTransition {
    ClassifiedTransition::new(
        graph.transitions()[index].clone(),
        classify_required(graph.required_skill_ids(index), viewer),
    )
}

/// Classify every transition of an already built graph.
#[must_use]
pub fn graph_view(graph: &CareerGraph, viewer: &ViewerSkillSet) -> GraphView {
    let mut positions = graph.positions().to_vec();
    positions.sort_by(by_level_then_title);

    let transitions = (0..graph.transitions().len())
        .map(|index| classify_at(graph, index, viewer))
        .collect();

    GraphView {
        positions,
        transitions,
    }
}

/// Expand a single position of an already built graph.
///
/// # Errors
///
/// Returns `Error::NotFound` if `position_id` is not part of the graph.
pub fn position_paths(
    graph: &CareerGraph,
    position_id: &PositionId,
    viewer: &ViewerSkillSet,
) -> Result<PositionPaths> {
    let from_position = graph.require_position(position_id)?.clone();

    let direct_transitions = graph
        .outgoing_indices(position_id)?
        .into_iter()
        .map(|index| {
            let classified = classify_at(graph, index, viewer);
            let to_position = graph.target_of(&classified.transition).clone();
            DirectTransition {
                classified,
                to_position,
            }
        })
        .collect();

    let mut reachable_positions: Vec<Position> = reachable_from(graph, position_id)?
        .iter()
        .filter_map(|id| graph.position(id).cloned())
        .collect();
    reachable_positions.sort_by(by_level_then_title);

    Ok(PositionPaths {
        from_position,
        direct_transitions,
        reachable_positions,
    })
}

/// Classify the full snapshot for a viewer.
///
/// # Errors
///
/// Returns `Error::Validation` if a transition references an unknown position.
pub fn compute_graph(
    positions: Vec<Position>,
    transitions: Vec<Transition>,
    viewer: &ViewerSkillSet,
) -> Result<GraphView> {
    let graph = CareerGraph::build(positions, transitions)?;
    Ok(graph_view(&graph, viewer))
}

/// Expand one position of the snapshot for a viewer.
///
/// # Errors
///
/// Returns `Error::Validation` for dangling transitions and `Error::NotFound`
/// if `position_id` is unknown.
pub fn compute_from_position(
    positions: Vec<Position>,
    transitions: Vec<Transition>,
    position_id: &PositionId,
    viewer: &ViewerSkillSet,
) -> Result<PositionPaths> {
    let graph = CareerGraph::build(positions, transitions)?;
    position_paths(&graph, position_id, viewer)
}

/// Coordinates for rendering `positions`.
#[must_use]
pub fn compute_layout(positions: &[Position], config: &LayoutConfig) -> Layout {
    layout(positions, config)
}

/// Lay out a classified graph and style each of its edges.
///
/// Nodes are placed in the view's position order (level, then title).
#[must_use]
pub fn render_plan(view: &GraphView, config: &LayoutConfig) -> RenderPlan {
    let edges = view
        .transitions
        .iter()
        .map(|classified| RenderedEdge {
            id: classified.transition.id.clone(),
            source: classified.transition.from_position_id.clone(),
            target: classified.transition.to_position_id.clone(),
            style: edge_style(classified),
        })
        .collect();

    RenderPlan {
        nodes: layout(&view.positions, config),
        edges,
    }
}
