// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![cfg(test)]

use super::case::{
    CaseDocument, ContextItem, EvidenceItem, GoalItem, ItemText, PropertyClaimItem, StrategyItem,
};
use super::graph::{Edge, Graph, Node};
use super::ids::NodeId;
use super::kind::{EdgeKind, NodeKind};

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn claim(name: &str, evidence: &[&str]) -> PropertyClaimItem {
    PropertyClaimItem {
        text: ItemText::named(name),
        context: Vec::new(),
        evidence: evidence
            .iter()
            .map(|name| EvidenceItem {
                text: ItemText::named(*name),
            })
            .collect(),
    }
}

fn strategy(name: &str, claims: Vec<PropertyClaimItem>) -> StrategyItem {
    StrategyItem {
        text: ItemText::named(name),
        context: Vec::new(),
        property_claims: claims,
    }
}

/// One goal, two strategies, one claim each, one evidence each.
pub(crate) fn two_strategy_case() -> CaseDocument {
    CaseDocument {
        goals: vec![GoalItem {
            text: ItemText::named("System is safe"),
            context: Vec::new(),
            strategies: vec![
                strategy(
                    "Argue over hazards",
                    vec![claim("Hazard A mitigated", &["Test report A"])],
                ),
                strategy(
                    "Argue over process",
                    vec![claim("Process followed", &["Audit log"])],
                ),
            ],
        }],
    }
}

/// Context items on the goal, a strategy and a claim, plus an uneven fan-out.
pub(crate) fn case_with_context() -> CaseDocument {
    let mut claim_with_context = claim("Claim with context", &["E1", "E2", "E3"]);
    claim_with_context.context.push(ContextItem {
        text: ItemText::named("Claim context"),
    });

    let mut first = strategy(
        "S1",
        vec![claim_with_context, claim("Plain claim", &[])],
    );
    first.context.push(ContextItem {
        text: ItemText::named("Strategy context"),
    });

    CaseDocument {
        goals: vec![GoalItem {
            text: ItemText::named("Goal"),
            context: vec![
                ContextItem {
                    text: ItemText::named("Operating environment"),
                },
                ContextItem {
                    text: ItemText::named("Regulatory scope"),
                },
            ],
            strategies: vec![first, strategy("S2", Vec::new()), strategy("S3", Vec::new())],
        }],
    }
}

fn node(id: &str, kind: NodeKind) -> Node {
    Node::new(nid(id), kind).with_name(id.to_uppercase())
}

fn edge(from: &str, to: &str) -> Edge {
    Edge::new(nid(from), nid(to), EdgeKind::Decomposes)
}

/// `a -> b -> c -> a`
pub(crate) fn cyclic_graph() -> Graph {
    Graph::new(
        vec![
            node("a", NodeKind::Goal),
            node("b", NodeKind::Strategy),
            node("c", NodeKind::PropertyClaim),
        ],
        vec![edge("a", "b"), edge("b", "c"), edge("c", "a")],
    )
}

/// `g -> s1, g -> s2, s1 -> p, s2 -> p, p -> e`
pub(crate) fn diamond_graph() -> Graph {
    Graph::new(
        vec![
            node("g", NodeKind::Goal),
            node("s1", NodeKind::Strategy),
            node("s2", NodeKind::Strategy),
            node("p", NodeKind::PropertyClaim),
            node("e", NodeKind::Evidence),
        ],
        vec![
            edge("g", "s1"),
            edge("g", "s2"),
            edge("s1", "p"),
            edge("s2", "p"),
            edge("p", "e"),
        ],
    )
}
