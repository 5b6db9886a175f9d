// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structural integrity checks for graphs.
//!
//! Validation is advisory: it never mutates the graph and never fails. Callers decide whether to
//! proceed, degrade or abort based on the report.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::model::{EdgeId, Graph, NodeId, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEndpoint {
    Source,
    Target,
}

impl fmt::Display for EdgeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    DuplicateNodeId {
        node_id: NodeId,
    },
    DanglingEdge {
        edge_id: EdgeId,
        endpoint: EdgeEndpoint,
        node_id: NodeId,
    },
    MissingName {
        node_id: NodeId,
    },
    OrphanNode {
        node_id: NodeId,
        kind: NodeKind,
    },
    Cycle {
        nodes: Vec<NodeId>,
    },
    DuplicateEdgeId {
        edge_id: EdgeId,
    },
    SelfLoop {
        edge_id: EdgeId,
    },
    MultipleRoots {
        roots: Vec<NodeId>,
    },
}

impl ValidationIssue {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateNodeId { .. } | Self::DanglingEdge { .. } | Self::MissingName { .. }
        )
    }
}

fn write_id_list<T>(f: &mut fmt::Formatter<'_>, ids: &[crate::model::Id<T>]) -> fmt::Result {
    for (idx, id) in ids.iter().enumerate() {
        if idx > 0 {
            f.write_str(" -> ")?;
        }
        write!(f, "{id}")?;
    }
    Ok(())
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateNodeId { node_id } => write!(f, "duplicate node id {node_id}"),
            Self::DanglingEdge {
                edge_id,
                endpoint,
                node_id,
            } => write!(f, "edge {edge_id} references missing {endpoint} node {node_id}"),
            Self::MissingName { node_id } => write!(f, "node {node_id} has no name"),
            Self::OrphanNode { node_id, kind } => {
                write!(f, "{kind} node {node_id} has no incident edges")
            }
            Self::Cycle { nodes } => {
                f.write_str("cycle detected: ")?;
                write_id_list(f, nodes)
            }
            Self::DuplicateEdgeId { edge_id } => write!(f, "duplicate edge id {edge_id}"),
            Self::SelfLoop { edge_id } => write!(f, "edge {edge_id} is a self-loop"),
            Self::MultipleRoots { roots } => {
                f.write_str("graph has more than one root: ")?;
                for (idx, id) in roots.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{id}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn push(&mut self, issue: ValidationIssue) {
        if issue.is_error() {
            self.errors.push(issue);
        } else {
            self.warnings.push(issue);
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ValidationIssue] {
        &self.warnings
    }

    /// `(errors, warnings)` rendered as messages.
    pub fn messages(&self) -> (Vec<String>, Vec<String>) {
        (
            self.errors.iter().map(ToString::to_string).collect(),
            self.warnings.iter().map(ToString::to_string).collect(),
        )
    }
}

pub fn validate_graph(graph: &Graph) -> ValidationReport {
    let mut report = ValidationReport::default();

    let mut known = BTreeSet::<&NodeId>::new();
    for node in graph.nodes() {
        if !known.insert(node.id()) {
            report.push(ValidationIssue::DuplicateNodeId {
                node_id: node.id().clone(),
            });
        }
        if node.name().map_or(true, |name| name.trim().is_empty()) {
            report.push(ValidationIssue::MissingName {
                node_id: node.id().clone(),
            });
        }
    }

    let mut edge_ids = BTreeSet::<&EdgeId>::new();
    let mut incident = BTreeSet::<&NodeId>::new();
    for edge in graph.edges() {
        if !edge_ids.insert(edge.id()) {
            report.push(ValidationIssue::DuplicateEdgeId {
                edge_id: edge.id().clone(),
            });
        }
        for (endpoint, node_id) in [
            (EdgeEndpoint::Source, edge.source()),
            (EdgeEndpoint::Target, edge.target()),
        ] {
            if known.contains(node_id) {
                incident.insert(node_id);
            } else {
                report.push(ValidationIssue::DanglingEdge {
                    edge_id: edge.id().clone(),
                    endpoint,
                    node_id: node_id.clone(),
                });
            }
        }
        if edge.is_self_loop() {
            report.push(ValidationIssue::SelfLoop {
                edge_id: edge.id().clone(),
            });
        }
    }

    let mut reported_orphans = BTreeSet::<&NodeId>::new();
    for node in graph.nodes() {
        if node.kind().is_root_kind() || incident.contains(node.id()) {
            continue;
        }
        if reported_orphans.insert(node.id()) {
            report.push(ValidationIssue::OrphanNode {
                node_id: node.id().clone(),
                kind: node.kind(),
            });
        }
    }

    let roots = graph.root_ids();
    if roots.len() > 1 {
        report.push(ValidationIssue::MultipleRoots { roots });
    }

    for nodes in find_cycles(graph) {
        report.push(ValidationIssue::Cycle { nodes });
    }

    report
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    White,
    Gray,
    Black,
}

/// White/gray/black depth-first search over `source -> target`.
///
/// A gray node reached again closes a cycle; the path from that node to the current one is
/// reported. Self-loops are reported separately and skipped here.
fn find_cycles(graph: &Graph) -> Vec<Vec<NodeId>> {
    let mut outgoing = BTreeMap::<&NodeId, Vec<&NodeId>>::new();
    for node_id in graph.nodes().iter().map(|node| node.id()) {
        outgoing.entry(node_id).or_default();
    }
    for edge in graph.edges() {
        if edge.is_self_loop() {
            continue;
        }
        if !outgoing.contains_key(edge.source()) || !outgoing.contains_key(edge.target()) {
            continue;
        }
        outgoing.entry(edge.source()).or_default().push(edge.target());
    }

    let mut marks = outgoing
        .keys()
        .map(|node_id| (*node_id, Mark::White))
        .collect::<BTreeMap<_, _>>();
    let mut seen_cycles = BTreeSet::<Vec<NodeId>>::new();
    let mut cycles = Vec::<Vec<NodeId>>::new();

    let order = graph.node_ids();
    for start in &order {
        if marks.get(start) != Some(&Mark::White) {
            continue;
        }

        // (node, next child index) frames replace recursion.
        let mut stack: Vec<(&NodeId, usize)> = Vec::new();
        let Some((&start_key, _)) = outgoing.get_key_value(start) else {
            continue;
        };
        marks.insert(start_key, Mark::Gray);
        stack.push((start_key, 0));

        while let Some((node_id, next_idx)) = stack.last().copied() {
            let children = outgoing.get(node_id).map(Vec::as_slice).unwrap_or(&[]);
            let Some(child) = children.get(next_idx).copied() else {
                marks.insert(node_id, Mark::Black);
                stack.pop();
                continue;
            };
            if let Some(frame) = stack.last_mut() {
                frame.1 += 1;
            }

            match marks.get(child).copied().unwrap_or(Mark::Black) {
                Mark::White => {
                    marks.insert(child, Mark::Gray);
                    stack.push((child, 0));
                }
                Mark::Gray => {
                    let from = stack
                        .iter()
                        .position(|(id, _)| *id == child)
                        .unwrap_or(0);
                    let cycle = stack[from..]
                        .iter()
                        .map(|(id, _)| (*id).clone())
                        .collect::<Vec<_>>();
                    let mut key = cycle.clone();
                    key.sort();
                    if seen_cycles.insert(key) {
                        cycles.push(cycle);
                    }
                }
                Mark::Black => {}
            }
        }
    }

    cycles
}
