// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ids::{EdgeId, NodeId};
use super::kind::{EdgeKind, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// A positioned vertex of the argument diagram.
///
/// `position` is the top-left corner. Visibility is not stored here; it is derived from the
/// visibility map at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    #[serde(default)]
    attributes: BTreeMap<String, Value>,
    #[serde(default)]
    position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<Size>,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            attributes: BTreeMap::new(),
            position: Position::default(),
            size: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.attributes
            .insert("name".to_owned(), Value::String(name.into()));
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut BTreeMap<String, Value> {
        &mut self.attributes
    }

    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.attribute_str("name")
    }

    pub fn description(&self) -> Option<&str> {
        self.attribute_str("description")
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn size_override(&self) -> Option<Size> {
        self.size
    }

    pub fn set_size_override(&mut self, size: Option<Size>) {
        self.size = size;
    }

    pub fn width(&self) -> f64 {
        self.size
            .map(|size| size.width)
            .unwrap_or_else(|| self.kind.default_width())
    }

    pub fn height(&self) -> f64 {
        self.size
            .map(|size| size.height)
            .unwrap_or_else(|| self.kind.default_height())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    kind: EdgeKind,
    #[serde(default)]
    animated: bool,
}

impl Edge {
    /// Creates an edge whose id is derived as `<source>-<target>`.
    pub fn new(source: NodeId, target: NodeId, kind: EdgeKind) -> Self {
        let id = EdgeId::from_generated(format!("{source}-{target}"));
        Self::with_id(id, source, target, kind)
    }

    pub fn with_id(id: EdgeId, source: NodeId, target: NodeId, kind: EdgeKind) -> Self {
        Self {
            id,
            source,
            target,
            kind,
            animated: false,
        }
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn animated(&self) -> bool {
        self.animated
    }

    pub fn set_animated(&mut self, animated: bool) {
        self.animated = animated;
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Nodes and edges in insertion order.
///
/// Order is meaningful (it is the document encounter order) and duplicates are representable so
/// that integrity checks can see them; lookups return the first match.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<Node> {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut Vec<Edge> {
        &mut self.edges
    }

    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id().as_str() == node_id)
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.node(node_id).is_some()
    }

    /// Distinct node ids in first-seen order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut seen = BTreeSet::<&NodeId>::new();
        self.nodes
            .iter()
            .filter(|node| seen.insert(node.id()))
            .map(|node| node.id().clone())
            .collect()
    }

    /// Nodes that nothing points at, ignoring context decorations.
    pub fn root_ids(&self) -> Vec<NodeId> {
        let targets = self
            .edges
            .iter()
            .filter(|edge| !edge.is_self_loop())
            .map(|edge| edge.target())
            .collect::<BTreeSet<_>>();

        self.node_ids()
            .into_iter()
            .filter(|node_id| !targets.contains(node_id))
            .filter(|node_id| {
                self.node(node_id.as_str())
                    .is_some_and(|node| node.kind() != NodeKind::Context)
            })
            .collect()
    }

    /// Direct children of `node_id`, in edge order and without repeats.
    pub fn children_of(&self, node_id: &str) -> Vec<NodeId> {
        let mut seen = BTreeSet::<&NodeId>::new();
        self.edges
            .iter()
            .filter(|edge| edge.source().as_str() == node_id && !edge.is_self_loop())
            .filter(|edge| seen.insert(edge.target()))
            .map(|edge| edge.target().clone())
            .collect()
    }
}
