// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Case document to graph mapping.
//!
//! The mapping is pure and deterministic: identical documents produce identical node ids, edge
//! ids and pre-layout coordinates. Node ids follow a fixed scheme other components rely on:
//!
//! - `goal-1`
//! - `context-{n}` (document pre-order across the whole case)
//! - `strategy-{n}`
//! - `claim-{strategy}-{n}`
//! - `evidence-{strategy}-{claim}-{n}`
//!
//! All indices are 1-based.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{
    CaseDocument, ContextItem, Edge, EdgeKind, Graph, ItemText, Node, NodeId, NodeKind, Position,
};

/// Where the root goal is placed before any layout pass.
pub const GOAL_ORIGIN: Position = Position { x: 400.0, y: 0.0 };

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperOptions {
    /// Horizontal distance between sibling anchors.
    pub x_spacing: f64,
    /// Vertical distance between hierarchy levels.
    pub y_spacing: f64,
    /// Emit dashed `context` edges from owners to their context items.
    pub connect_context: bool,
    pub context_offset_x: f64,
    pub context_spacing_y: f64,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            x_spacing: 400.0,
            y_spacing: 180.0,
            connect_context: false,
            context_offset_x: 320.0,
            context_spacing_y: 80.0,
        }
    }
}

/// x of the `index`-th of `count` children centered beneath `parent_x`.
pub fn centered_child_x(parent_x: f64, count: usize, index: usize, spacing: f64) -> f64 {
    if count == 0 {
        return parent_x;
    }
    parent_x - ((count - 1) as f64 * spacing) / 2.0 + index as f64 * spacing
}

fn indexed_id(prefix: &str, indices: &[usize]) -> NodeId {
    let mut buf = itoa::Buffer::new();
    let mut out = String::with_capacity(prefix.len() + indices.len() * 3);
    out.push_str(prefix);
    for index in indices {
        out.push('-');
        out.push_str(buf.format(*index));
    }
    NodeId::from_generated(out)
}

fn item_attributes(node: &mut Node, text: &ItemText) {
    let attributes = node.attributes_mut();
    for (key, value) in &text.extra {
        attributes.insert(key.clone(), value.clone());
    }
    attributes.insert("name".to_owned(), Value::String(text.name.clone()));
    attributes.insert(
        "description".to_owned(),
        Value::String(text.description.clone()),
    );
    if let Some(short) = &text.short_description {
        attributes.insert("short_description".to_owned(), Value::String(short.clone()));
    }
    if let Some(long) = &text.long_description {
        attributes.insert("long_description".to_owned(), Value::String(long.clone()));
    }
    if let Some(source_id) = &text.id {
        attributes.insert("source_id".to_owned(), source_id.clone());
    }
}

struct GraphBuilder<'a> {
    options: &'a MapperOptions,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_context: usize,
}

impl<'a> GraphBuilder<'a> {
    fn new(options: &'a MapperOptions) -> Self {
        Self {
            options,
            nodes: Vec::new(),
            edges: Vec::new(),
            next_context: 1,
        }
    }

    fn push_node(&mut self, id: NodeId, kind: NodeKind, text: &ItemText, position: Position) {
        let mut node = Node::new(id, kind).at(position.x, position.y);
        item_attributes(&mut node, text);
        self.nodes.push(node);
    }

    fn link(&mut self, parent: &NodeId, child: &NodeId, child_kind: NodeKind) {
        self.edges.push(Edge::new(
            parent.clone(),
            child.clone(),
            EdgeKind::for_child(child_kind),
        ));
    }

    fn push_context(&mut self, owner: &NodeId, owner_position: Position, items: &[ContextItem]) {
        for (idx, item) in items.iter().enumerate() {
            let id = indexed_id(NodeKind::Context.id_prefix(), &[self.next_context]);
            self.next_context += 1;

            let position = Position::new(
                owner_position.x + self.options.context_offset_x,
                owner_position.y + idx as f64 * self.options.context_spacing_y,
            );
            self.push_node(id.clone(), NodeKind::Context, &item.text, position);
            if self.options.connect_context {
                self.link(owner, &id, NodeKind::Context);
            }
        }
    }

    fn child_position(&self, parent: Position, count: usize, index: usize) -> Position {
        Position::new(
            centered_child_x(parent.x, count, index, self.options.x_spacing),
            parent.y + self.options.y_spacing,
        )
    }

    fn finish(self) -> Graph {
        Graph::new(self.nodes, self.edges)
    }
}

/// Maps a case document onto an initial graph with deterministic pre-layout coordinates.
///
/// A document without goals maps to an empty graph. Only the first goal is mapped.
pub fn map_case(document: &CaseDocument, options: &MapperOptions) -> Graph {
    let Some(goal) = document.goals.first() else {
        return Graph::default();
    };
    if document.goals.len() > 1 {
        tracing::warn!(
            goals = document.goals.len(),
            "case has more than one goal; mapping the first only"
        );
    }

    let mut builder = GraphBuilder::new(options);

    let goal_id = indexed_id(NodeKind::Goal.id_prefix(), &[1]);
    builder.push_node(goal_id.clone(), NodeKind::Goal, &goal.text, GOAL_ORIGIN);
    builder.push_context(&goal_id, GOAL_ORIGIN, &goal.context);

    let strategy_count = goal.strategies.len();
    for (s_idx, strategy) in goal.strategies.iter().enumerate() {
        let s_no = s_idx + 1;
        let strategy_id = indexed_id(NodeKind::Strategy.id_prefix(), &[s_no]);
        let strategy_pos = builder.child_position(GOAL_ORIGIN, strategy_count, s_idx);
        builder.push_node(
            strategy_id.clone(),
            NodeKind::Strategy,
            &strategy.text,
            strategy_pos,
        );
        builder.link(&goal_id, &strategy_id, NodeKind::Strategy);
        builder.push_context(&strategy_id, strategy_pos, &strategy.context);

        let claim_count = strategy.property_claims.len();
        for (c_idx, claim) in strategy.property_claims.iter().enumerate() {
            let c_no = c_idx + 1;
            let claim_id = indexed_id(NodeKind::PropertyClaim.id_prefix(), &[s_no, c_no]);
            let claim_pos = builder.child_position(strategy_pos, claim_count, c_idx);
            builder.push_node(
                claim_id.clone(),
                NodeKind::PropertyClaim,
                &claim.text,
                claim_pos,
            );
            builder.link(&strategy_id, &claim_id, NodeKind::PropertyClaim);
            builder.push_context(&claim_id, claim_pos, &claim.context);

            let evidence_count = claim.evidence.len();
            for (e_idx, evidence) in claim.evidence.iter().enumerate() {
                let evidence_id =
                    indexed_id(NodeKind::Evidence.id_prefix(), &[s_no, c_no, e_idx + 1]);
                let evidence_pos = builder.child_position(claim_pos, evidence_count, e_idx);
                builder.push_node(
                    evidence_id.clone(),
                    NodeKind::Evidence,
                    &evidence.text,
                    evidence_pos,
                );
                builder.link(&claim_id, &evidence_id, NodeKind::Evidence);
            }
        }
    }

    let graph = builder.finish();
    tracing::debug!(
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        "mapped case document"
    );
    graph
}
