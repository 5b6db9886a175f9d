// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::model::{Edge, Graph, Node, NodeId, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "TB")]
    TopToBottom,
    #[serde(rename = "BT")]
    BottomToTop,
    #[serde(rename = "LR")]
    LeftToRight,
    #[serde(rename = "RL")]
    RightToLeft,
}

impl Direction {
    /// Whether ranks advance along the y axis.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::TopToBottom | Self::BottomToTop)
    }

    fn is_reversed(self) -> bool {
        matches!(self, Self::BottomToTop | Self::RightToLeft)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopToBottom => "TB",
            Self::BottomToTop => "BT",
            Self::LeftToRight => "LR",
            Self::RightToLeft => "RL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError {
    value: String,
}

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown layout direction {:?} (expected TB, BT, LR or RL)",
            self.value
        )
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TB" | "TD" => Ok(Self::TopToBottom),
            "BT" => Ok(Self::BottomToTop),
            "LR" => Ok(Self::LeftToRight),
            "RL" => Ok(Self::RightToLeft),
            _ => Err(ParseDirectionError {
                value: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub direction: Direction,
    /// Gap between consecutive ranks, on top of the rank's own extent.
    pub rank_spacing: f64,
    /// Gap between neighbours within a rank, on top of their own extent.
    pub node_spacing: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    /// Barycenter sweeps (alternating down/up).
    pub ordering_passes: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: Direction::TopToBottom,
            rank_spacing: 120.0,
            node_spacing: 80.0,
            margin_x: 40.0,
            margin_y: 40.0,
            ordering_passes: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    nodes: Vec<Node>,
    ranks: BTreeMap<NodeId, usize>,
    layers: Vec<Vec<NodeId>>,
    skipped: Vec<NodeId>,
}

impl LayoutResult {
    fn passthrough(nodes: &[Node], skipped: Vec<NodeId>) -> Self {
        Self {
            nodes: nodes.to_vec(),
            ranks: BTreeMap::new(),
            layers: Vec::new(),
            skipped,
        }
    }

    /// Every input node, in input order; visible ones carry their new position.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn ranks(&self) -> &BTreeMap<NodeId, usize> {
        &self.ranks
    }

    pub fn rank(&self, node_id: &str) -> Option<usize> {
        self.ranks.get(node_id).copied()
    }

    /// Final order of node ids within each rank.
    pub fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    /// Visible ids that matched no node.
    pub fn skipped(&self) -> &[NodeId] {
        &self.skipped
    }

    pub fn position(&self, node_id: &str) -> Option<Position> {
        self.nodes
            .iter()
            .find(|node| node.id().as_str() == node_id)
            .map(Node::position)
    }
}

type Adjacency = Vec<SmallVec<[usize; 4]>>;

/// The visible part of the graph, re-indexed densely in input order.
struct InducedGraph<'a> {
    /// Index into the caller's node slice for each participant.
    source_index: Vec<usize>,
    nodes: Vec<&'a Node>,
    successors: Adjacency,
    predecessors: Adjacency,
}

impl<'a> InducedGraph<'a> {
    fn build(nodes: &'a [Node], edges: &[Edge], visible: &BTreeSet<NodeId>) -> Self {
        let mut index_of = BTreeMap::<&NodeId, usize>::new();
        let mut source_index = Vec::new();
        let mut participants = Vec::new();

        for (idx, node) in nodes.iter().enumerate() {
            if !visible.contains(node.id()) || index_of.contains_key(node.id()) {
                continue;
            }
            index_of.insert(node.id(), participants.len());
            source_index.push(idx);
            participants.push(node);
        }

        let mut successors: Adjacency = vec![SmallVec::new(); participants.len()];
        let mut predecessors: Adjacency = vec![SmallVec::new(); participants.len()];
        for edge in edges {
            if edge.is_self_loop() {
                continue;
            }
            let (Some(&from), Some(&to)) =
                (index_of.get(edge.source()), index_of.get(edge.target()))
            else {
                continue;
            };
            if successors[from].contains(&to) {
                continue;
            }
            successors[from].push(to);
            predecessors[to].push(from);
        }

        Self {
            source_index,
            nodes: participants,
            successors,
            predecessors,
        }
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Longest-path layering over a topological order.
///
/// Nodes that never become ready (they sit on or behind a cycle) keep rank 0.
fn assign_ranks(graph: &InducedGraph<'_>) -> Vec<usize> {
    let mut indegree = graph
        .predecessors
        .iter()
        .map(SmallVec::len)
        .collect::<Vec<_>>();
    let mut ranks = vec![0usize; graph.len()];

    let mut ready = (0..graph.len())
        .filter(|idx| indegree[*idx] == 0)
        .collect::<BTreeSet<_>>();

    while let Some(next) = ready.pop_first() {
        for &to in &graph.successors[next] {
            ranks[to] = ranks[to].max(ranks[next] + 1);
            indegree[to] = indegree[to].saturating_sub(1);
            if indegree[to] == 0 {
                ready.insert(to);
            }
        }
    }

    for (rank, remaining) in ranks.iter_mut().zip(&indegree) {
        if *remaining > 0 {
            *rank = 0;
        }
    }

    ranks
}

fn barycenter(neighbors: &[usize], positions: &BTreeMap<usize, usize>) -> Option<(usize, usize)> {
    let (sum, count) = neighbors
        .iter()
        .filter_map(|n| positions.get(n).copied())
        .fold((0usize, 0usize), |(sum, count), pos| (sum + pos, count + 1));
    (count > 0).then_some((sum, count))
}

fn sort_layer_by_barycenter(
    layer: &mut [usize],
    neighbor_positions: &BTreeMap<usize, usize>,
    neighbors: &Adjacency,
) {
    let current = layer
        .iter()
        .enumerate()
        .map(|(pos, idx)| (*idx, pos))
        .collect::<BTreeMap<_, _>>();

    layer.sort_by(|a, b| {
        let bary_a = barycenter(&neighbors[*a], neighbor_positions);
        let bary_b = barycenter(&neighbors[*b], neighbor_positions);
        let tie = || current[a].cmp(&current[b]);

        match (bary_a, bary_b) {
            (None, None) => tie(),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (Some((sum_a, count_a)), Some((sum_b, count_b))) => {
                // Compare sum_a/count_a vs sum_b/count_b without floats.
                let left = (sum_a as u128) * (count_b as u128);
                let right = (sum_b as u128) * (count_a as u128);
                left.cmp(&right).then_with(tie)
            }
        }
    });
}

fn positions_in(layer: &[usize]) -> BTreeMap<usize, usize> {
    layer
        .iter()
        .enumerate()
        .map(|(pos, idx)| (*idx, pos))
        .collect()
}

fn order_layers(graph: &InducedGraph<'_>, layers: &mut [Vec<usize>], passes: usize) {
    if layers.len() < 2 {
        return;
    }

    for pass in 0..passes {
        if pass % 2 == 0 {
            for layer_idx in 1..layers.len() {
                let prev = positions_in(&layers[layer_idx - 1]);
                sort_layer_by_barycenter(&mut layers[layer_idx], &prev, &graph.predecessors);
            }
        } else {
            for layer_idx in (0..layers.len() - 1).rev() {
                let next = positions_in(&layers[layer_idx + 1]);
                sort_layer_by_barycenter(&mut layers[layer_idx], &next, &graph.successors);
            }
        }
    }
}

/// Layered layout of the visible subset of a graph.
///
/// - Only nodes whose id is in `visible` participate; every other node passes through with its
///   position untouched.
/// - Ranks are longest-path depths from the in-degree-0 nodes of the induced subgraph; cyclic and
///   unreachable nodes get rank 0; self-loops are ignored.
/// - Nodes within a rank are ordered by alternating barycenter sweeps, seeded with input order.
/// - Each rank occupies the extent of its largest node plus `rank_spacing`; ranks are centered on
///   the secondary axis against the broadest rank. Positions are top-left corners.
pub fn layout_layered(
    nodes: &[Node],
    edges: &[Edge],
    visible: &BTreeSet<NodeId>,
    options: &LayoutOptions,
) -> LayoutResult {
    let skipped = visible
        .iter()
        .filter(|id| !nodes.iter().any(|node| node.id() == *id))
        .cloned()
        .collect::<Vec<_>>();
    for node_id in &skipped {
        tracing::warn!(node_id = %node_id, "visible id has no node; skipped by layout");
    }

    let graph = InducedGraph::build(nodes, edges, visible);
    if graph.len() == 0 {
        return LayoutResult::passthrough(nodes, skipped);
    }

    let ranks = assign_ranks(&graph);
    let max_rank = ranks.iter().copied().max().unwrap_or(0);
    let mut layers = vec![Vec::<usize>::new(); max_rank + 1];
    for (idx, rank) in ranks.iter().enumerate() {
        layers[*rank].push(idx);
    }
    order_layers(&graph, &mut layers, options.ordering_passes);

    let vertical = options.direction.is_vertical();
    // (along rank axis, along order axis)
    let extents = |node: &Node| {
        if vertical {
            (node.height(), node.width())
        } else {
            (node.width(), node.height())
        }
    };

    let rank_extent = layers
        .iter()
        .map(|layer| {
            layer
                .iter()
                .map(|idx| extents(graph.nodes[*idx]).0)
                .fold(0.0f64, f64::max)
        })
        .collect::<Vec<_>>();
    let breadth = layers
        .iter()
        .map(|layer| {
            let sizes = layer
                .iter()
                .map(|idx| extents(graph.nodes[*idx]).1)
                .sum::<f64>();
            sizes + layer.len().saturating_sub(1) as f64 * options.node_spacing
        })
        .collect::<Vec<_>>();
    let max_breadth = breadth.iter().copied().fold(0.0f64, f64::max);
    let total_rank_extent = rank_extent.iter().sum::<f64>()
        + max_rank as f64 * options.rank_spacing;

    let mut centers = vec![(0.0f64, 0.0f64); graph.len()];
    let mut rank_cursor = 0.0f64;
    for (rank, layer) in layers.iter().enumerate() {
        let mut rank_center = rank_cursor + rank_extent[rank] / 2.0;
        if options.direction.is_reversed() {
            rank_center = total_rank_extent - rank_center;
        }

        let mut order_cursor = (max_breadth - breadth[rank]) / 2.0;
        for idx in layer {
            let along = extents(graph.nodes[*idx]).1;
            let order_center = order_cursor + along / 2.0;
            order_cursor += along + options.node_spacing;

            centers[*idx] = if vertical {
                (options.margin_x + order_center, options.margin_y + rank_center)
            } else {
                (options.margin_x + rank_center, options.margin_y + order_center)
            };
        }

        rank_cursor += rank_extent[rank] + options.rank_spacing;
    }

    let mut out = nodes.to_vec();
    for (idx, (cx, cy)) in centers.iter().enumerate() {
        let node = &mut out[graph.source_index[idx]];
        let position = Position::new(cx - node.width() / 2.0, cy - node.height() / 2.0);
        node.set_position(position);
    }

    let rank_map = ranks
        .iter()
        .enumerate()
        .map(|(idx, rank)| (graph.nodes[idx].id().clone(), *rank))
        .collect::<BTreeMap<_, _>>();
    let layer_ids = layers
        .iter()
        .map(|layer| {
            layer
                .iter()
                .map(|idx| graph.nodes[*idx].id().clone())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        visible = graph.len(),
        ranks = layer_ids.len(),
        direction = %options.direction,
        "laid out visible subgraph"
    );

    LayoutResult {
        nodes: out,
        ranks: rank_map,
        layers: layer_ids,
        skipped,
    }
}

/// [`layout_layered`] over a whole graph.
pub fn layout_graph(
    graph: &Graph,
    visible: &BTreeSet<NodeId>,
    options: &LayoutOptions,
) -> LayoutResult {
    layout_layered(graph.nodes(), graph.edges(), visible, options)
}
