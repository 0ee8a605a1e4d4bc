//! Breadth-first reachability over the career graph.

use super::CareerGraph;
use crate::domain::PositionId;
use crate::error::Result;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::{HashSet, VecDeque};

/// Every position reachable from `source` through one or more transitions.
///
/// Each node is enqueued at most once, so cycles terminate. The source is
/// part of the result only when some cycle leads back to it. Runs in
/// O(V + E) with no caching between calls.
///
/// # Errors
///
/// Returns `Error::NotFound` if `source` is not part of the graph.
pub fn reachable_from(graph: &CareerGraph, source: &PositionId) -> Result<HashSet<PositionId>> {
    let start = graph.node(source)?;
    let inner = graph.inner();

    let mut reachable = HashSet::new();
    let mut visited: HashSet<NodeIndex> = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for edge in inner.edges(current) {
            let target = edge.target();
            reachable.insert(graph.position_at(target).id.clone());
            if visited.insert(target) {
                queue.push_back(target);
            }
        }
    }

    tracing::debug!(source = %source, reachable = reachable.len(), "Computed reachability");
    Ok(reachable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures::{position, transition};

    fn set(ids: &[&str]) -> HashSet<PositionId> {
        ids.iter().map(|id| PositionId::new(*id)).collect()
    }

    #[test]
    fn cycle_terminates_and_includes_source() {
        let graph = CareerGraph::build(
            vec![position("a", 1), position("b", 2), position("c", 3)],
            vec![
                transition("ab", "a", "b", &[]),
                transition("bc", "b", "c", &[]),
                transition("ca", "c", "a", &[]),
            ],
        )
        .unwrap();

        assert_eq!(reachable_from(&graph, &"a".into()).unwrap(), set(&["a", "b", "c"]));
    }

    #[test]
    fn source_excluded_without_cycle() {
        let graph = CareerGraph::build(
            vec![position("a", 1), position("b", 2), position("c", 3)],
            vec![
                transition("ab", "a", "b", &[]),
                transition("bc", "b", "c", &[]),
            ],
        )
        .unwrap();

        assert_eq!(reachable_from(&graph, &"a".into()).unwrap(), set(&["b", "c"]));
        assert_eq!(reachable_from(&graph, &"b".into()).unwrap(), set(&["c"]));
    }

    #[test]
    fn sink_reaches_nothing() {
        let graph = CareerGraph::build(
            vec![position("a", 1), position("b", 2)],
            vec![transition("ab", "a", "b", &[])],
        )
        .unwrap();

        assert!(reachable_from(&graph, &"b".into()).unwrap().is_empty());
    }

    #[test]
    fn required_skills_do_not_gate_reachability() {
        let graph = CareerGraph::build(
            vec![position("a", 1), position("b", 2)],
            vec![transition("ab", "a", "b", &["rare"])],
        )
        .unwrap();

        assert_eq!(reachable_from(&graph, &"a".into()).unwrap(), set(&["b"]));
    }

    #[test]
    fn diamond_and_unrelated_branch() {
        let graph = CareerGraph::build(
            vec![
                position("a", 1),
                position("b", 2),
                position("c", 2),
                position("d", 3),
                position("island", 1),
            ],
            vec![
                transition("ab", "a", "b", &[]),
                transition("ac", "a", "c", &[]),
                transition("bd", "b", "d", &[]),
                transition("cd", "c", "d", &[]),
            ],
        )
        .unwrap();

        assert_eq!(
            reachable_from(&graph, &"a".into()).unwrap(),
            set(&["b", "c", "d"])
        );
    }

    #[test]
    fn unknown_source_is_not_found() {
        let graph = CareerGraph::build(vec![position("a", 1)], vec![]).unwrap();
        assert!(reachable_from(&graph, &"nope".into())
            .unwrap_err()
            .is_not_found());
    }
}
