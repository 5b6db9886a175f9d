// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Gesture handling for progressive disclosure.
//!
//! The controller is the single handle a rendering surface holds: it turns pointer gestures into
//! visibility commands, re-runs layout whenever the visible set changes, and produces the frame to
//! paint next.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use serde::Serialize;

use crate::layout::{layout_graph, LayoutOptions};
use crate::model::{EdgeId, EdgeKind, Graph, NodeId, NodeKind, Position};
use crate::query::{search_nodes, SearchMode};
use crate::visibility::{ancestors, descendants, VisibilityState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// Reveal the node's direct children, or hide everything below it when they are all shown.
    Click(NodeId),
    /// Reveal the whole subtree.
    DoubleClick(NodeId),
    /// Reveal the node and every ancestor.
    RevealPath(NodeId),
    /// Show only the node, its ancestors and its direct children.
    Focus(NodeId),
    ExpandAll,
    /// Hide everything except the root(s).
    CollapseAll,
    /// Forget all state and fall back to the default view.
    Reset,
    /// Reveal the path to the best match.
    Search { needle: String, mode: SearchMode },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Position,
    pub width: f64,
    pub height: f64,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
    pub animated: bool,
    pub visible: bool,
}

/// What the rendering surface paints next.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

impl RenderFrame {
    pub fn visible_node_ids(&self) -> Vec<&NodeId> {
        self.nodes
            .iter()
            .filter(|node| node.visible)
            .map(|node| &node.id)
            .collect()
    }
}

#[derive(Debug)]
pub struct DisclosureController {
    graph: Graph,
    visibility: VisibilityState,
    layout: LayoutOptions,
    ranks: BTreeMap<NodeId, usize>,
    rendered: Option<Vec<NodeId>>,
}

impl DisclosureController {
    /// Takes ownership of a mapped graph, seeds the default view (unless `visibility` already
    /// holds a restored map) and lays out the visible part.
    pub fn new(graph: Graph, mut visibility: VisibilityState, layout: LayoutOptions) -> Self {
        visibility.seed_defaults(&graph);
        let mut controller = Self {
            graph,
            visibility,
            layout,
            ranks: BTreeMap::new(),
            rendered: None,
        };
        controller.relayout();
        controller
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn visibility(&self) -> &VisibilityState {
        &self.visibility
    }

    pub fn layout_options(&self) -> &LayoutOptions {
        &self.layout
    }

    pub fn set_layout_options(&mut self, layout: LayoutOptions) {
        self.layout = layout;
        self.relayout();
    }

    /// Rank of each visible node from the last layout pass.
    pub fn ranks(&self) -> &BTreeMap<NodeId, usize> {
        &self.ranks
    }

    pub fn visible_ids(&self) -> BTreeSet<NodeId> {
        self.visibility.visible_ids(&self.graph)
    }

    /// Records the ids the rendering surface currently shows; bulk gestures operate on these.
    pub fn sync_rendered(&mut self, node_ids: impl IntoIterator<Item = NodeId>) {
        self.rendered = Some(node_ids.into_iter().collect());
    }

    fn all_ids(&self) -> Vec<NodeId> {
        match &self.rendered {
            Some(rendered) => rendered.clone(),
            None => self.graph.node_ids(),
        }
    }

    fn focus_set(&self, node_id: &NodeId) -> Vec<NodeId> {
        let mut focus = ancestors(node_id, self.graph.edges());
        focus.extend(self.graph.children_of(node_id.as_str()));
        focus.into_iter().collect()
    }

    /// Ranked search over the graph.
    pub fn search(&self, needle: &str, mode: SearchMode) -> Result<Vec<NodeId>, regex::Error> {
        Ok(search_nodes(&self.graph, needle, mode, true)?
            .into_iter()
            .map(|node| node.id().clone())
            .collect())
    }

    /// Applies a gesture immediately. Returns whether the visible set changed (and layout ran).
    ///
    /// Gestures naming an unknown node and searches without a hit change nothing.
    pub fn apply(&mut self, gesture: Gesture) -> bool {
        let before = self.visible_ids();
        self.dispatch(gesture);
        self.finish(before)
    }

    fn dispatch(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Click(node_id) => {
                if !self.graph.contains_node(node_id.as_str()) {
                    return;
                }
                let children = self.graph.children_of(node_id.as_str());
                let all_shown = !children.is_empty()
                    && children
                        .iter()
                        .all(|child| self.visibility.is_expanded(child.as_str()));
                if all_shown {
                    let mut hidden = descendants(&node_id, self.graph.edges());
                    hidden.remove(&node_id);
                    self.visibility.collapse_many(&hidden);
                } else {
                    let mut shown = children;
                    shown.push(node_id);
                    self.visibility.expand_many(&shown);
                }
            }
            Gesture::DoubleClick(node_id) => {
                if self.graph.contains_node(node_id.as_str()) {
                    self.visibility.expand_subtree(&node_id, self.graph.edges());
                }
            }
            Gesture::RevealPath(node_id) => {
                if self.graph.contains_node(node_id.as_str()) {
                    self.visibility
                        .expand_path_to_node(&node_id, self.graph.edges());
                }
            }
            Gesture::Focus(node_id) => {
                if self.graph.contains_node(node_id.as_str()) {
                    let focus = self.focus_set(&node_id);
                    let all = self.all_ids();
                    self.visibility.focus_mode(&focus, &all);
                }
            }
            Gesture::ExpandAll => {
                let all = self.all_ids();
                self.visibility.expand_all(Some(&all));
            }
            Gesture::CollapseAll => {
                let roots = self.graph.root_ids();
                let all = self.all_ids();
                self.visibility.focus_mode(&roots, &all);
            }
            Gesture::Reset => {
                self.visibility.reset_all();
                self.visibility.seed_defaults(&self.graph);
            }
            Gesture::Search { needle, mode } => match self.search(&needle, mode) {
                Ok(hits) => {
                    if let Some(best) = hits.first() {
                        self.visibility
                            .expand_path_to_node(best, self.graph.edges());
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        needle = %needle,
                        error = %err,
                        "ignoring invalid search pattern"
                    );
                }
            },
        }
    }

    fn finish(&mut self, before: BTreeSet<NodeId>) -> bool {
        if self.visible_ids() == before {
            return false;
        }
        self.relayout();
        true
    }

    /// Queues the bulk gestures (`ExpandAll`, `CollapseAll`, `Focus`) behind the debounce window;
    /// anything else is applied right away. Returns whether the visible set changed now.
    pub fn queue(&mut self, gesture: Gesture, now: Instant) -> bool {
        match gesture {
            Gesture::ExpandAll => {
                let all = self.all_ids();
                self.visibility.expand_all_debounced(Some(all), now);
                false
            }
            Gesture::CollapseAll => {
                let roots = self.graph.root_ids();
                let all = self.all_ids();
                self.visibility.focus_mode_debounced(roots, all, now);
                false
            }
            Gesture::Focus(node_id) => {
                if self.graph.contains_node(node_id.as_str()) {
                    let focus = self.focus_set(&node_id);
                    let all = self.all_ids();
                    self.visibility.focus_mode_debounced(focus, all, now);
                }
                false
            }
            other => self.apply(other),
        }
    }

    /// Runs a queued gesture whose window has elapsed. Returns whether the visible set changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let before = self.visible_ids();
        if !self.visibility.poll_debounced(now) {
            return false;
        }
        self.finish(before)
    }

    /// When [`Self::tick`] next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.visibility.pending_deadline()
    }

    /// Lays out the currently visible nodes; hidden nodes keep their last position.
    pub fn relayout(&mut self) {
        let visible = self.visible_ids();
        let result = layout_graph(&self.graph, &visible, &self.layout);
        self.ranks = result.ranks().clone();
        *self.graph.nodes_mut() = result.into_nodes();
        tracing::debug!(visible = visible.len(), "relayout");
    }

    pub fn frame(&self) -> RenderFrame {
        let visible = self.visible_ids();
        let nodes = self
            .graph
            .nodes()
            .iter()
            .map(|node| RenderNode {
                id: node.id().clone(),
                kind: node.kind(),
                position: node.position(),
                width: node.width(),
                height: node.height(),
                visible: visible.contains(node.id()),
                name: node.name().map(ToOwned::to_owned),
            })
            .collect();
        let edges = self
            .graph
            .edges()
            .iter()
            .map(|edge| RenderEdge {
                id: edge.id().clone(),
                source: edge.source().clone(),
                target: edge.target().clone(),
                kind: edge.kind(),
                animated: edge.animated(),
                visible: visible.contains(edge.source()) && visible.contains(edge.target()),
            })
            .collect();
        RenderFrame { nodes, edges }
    }

    pub fn into_parts(self) -> (Graph, VisibilityState) {
        (self.graph, self.visibility)
    }
}

#[cfg(test)]
mod tests;
