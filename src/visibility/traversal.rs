// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::model::{Edge, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkDirection {
    /// Follow edges from target to source.
    Up,
    /// Follow edges from source to target.
    Down,
}

fn adjacency(edges: &[Edge], direction: WalkDirection) -> BTreeMap<&NodeId, Vec<&NodeId>> {
    let mut adjacency = BTreeMap::<&NodeId, Vec<&NodeId>>::new();
    for edge in edges {
        let (from, to) = match direction {
            WalkDirection::Up => (edge.target(), edge.source()),
            WalkDirection::Down => (edge.source(), edge.target()),
        };
        adjacency.entry(from).or_default().push(to);
    }
    adjacency
}

/// Breadth-first closure of `start` over `edges`, including `start` itself.
///
/// Every id is visited at most once, so cyclic edge sets terminate.
pub fn collect_reachable(
    start: &NodeId,
    edges: &[Edge],
    direction: WalkDirection,
) -> BTreeSet<NodeId> {
    let adjacency = adjacency(edges, direction);

    let mut visited = BTreeSet::<NodeId>::new();
    let mut queue = VecDeque::<&NodeId>::new();
    visited.insert(start.clone());
    queue.push_back(start);

    while let Some(node_id) = queue.pop_front() {
        for next_id in adjacency.get(node_id).into_iter().flatten() {
            if visited.insert((*next_id).clone()) {
                queue.push_back(next_id);
            }
        }
    }

    visited
}

/// `start` plus every node with a path to it.
pub fn ancestors(start: &NodeId, edges: &[Edge]) -> BTreeSet<NodeId> {
    collect_reachable(start, edges, WalkDirection::Up)
}

/// `start` plus every node reachable from it.
pub fn descendants(start: &NodeId, edges: &[Edge]) -> BTreeSet<NodeId> {
    collect_reachable(start, edges, WalkDirection::Down)
}

#[cfg(test)]
mod tests {
    use super::{ancestors, descendants};
    use crate::model::fixtures::{cyclic_graph, diamond_graph, nid};
    use crate::model::NodeId;
    use std::collections::BTreeSet;

    fn set(ids: &[&str]) -> BTreeSet<NodeId> {
        ids.iter().map(|id| nid(id)).collect()
    }

    #[test]
    fn cycles_terminate_with_every_member() {
        let graph = cyclic_graph();
        assert_eq!(descendants(&nid("a"), graph.edges()), set(&["a", "b", "c"]));
        assert_eq!(ancestors(&nid("a"), graph.edges()), set(&["a", "b", "c"]));
    }

    #[test]
    fn diamond_is_walked_once_in_both_directions() {
        let graph = diamond_graph();
        assert_eq!(ancestors(&nid("e"), graph.edges()), set(&["g", "s1", "s2", "p", "e"]));
        assert_eq!(descendants(&nid("s1"), graph.edges()), set(&["s1", "p", "e"]));
    }

    #[test]
    fn unknown_start_collects_only_itself() {
        let graph = diamond_graph();
        assert_eq!(descendants(&nid("nope"), graph.edges()), set(&["nope"]));
        assert_eq!(ancestors(&nid("g"), &[]), set(&["g"]));
    }
}
