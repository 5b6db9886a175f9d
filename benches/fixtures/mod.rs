// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use caseview::model::{
    CaseDocument, ContextItem, EvidenceItem, GoalItem, Graph, ItemText, PropertyClaimItem,
    StrategyItem,
};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("caseview_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

pub fn checksum_graph(graph: &Graph) -> u64 {
    let mut acc = 0u64;
    for node in graph.nodes() {
        let position = node.position();
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(node.id().as_str().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(position.x.to_bits());
        acc = acc.wrapping_mul(131).wrapping_add(position.y.to_bits());
    }
    acc.wrapping_add(graph.edges().len() as u64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseParams {
    pub goals: usize,
    pub strategies_per_goal: usize,
    pub claims_per_strategy: usize,
    pub evidence_per_claim: usize,
    /// Every n-th element gets a context item; 0 disables context.
    pub context_every: usize,
}

impl CaseParams {
    pub const fn new(
        goals: usize,
        strategies_per_goal: usize,
        claims_per_strategy: usize,
        evidence_per_claim: usize,
        context_every: usize,
    ) -> Self {
        Self {
            goals,
            strategies_per_goal,
            claims_per_strategy,
            evidence_per_claim,
            context_every,
        }
    }

    pub const fn node_count(self) -> usize {
        let strategies = self.goals * self.strategies_per_goal;
        let claims = strategies * self.claims_per_strategy;
        self.goals + strategies + claims + claims * self.evidence_per_claim
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    MediumWide,
    LargeDeep,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumWide => "medium_wide",
            Self::LargeDeep => "large_deep",
        }
    }

    pub const fn params(self) -> CaseParams {
        match self {
            Self::Small => CaseParams::new(1, 3, 3, 2, 0),
            Self::MediumWide => CaseParams::new(1, 12, 6, 3, 5),
            Self::LargeDeep => CaseParams::new(3, 10, 10, 4, 7),
        }
    }
}

fn context_for(counter: &mut usize, every: usize) -> Vec<ContextItem> {
    *counter += 1;
    if every == 0 || *counter % every != 0 {
        return Vec::new();
    }
    vec![ContextItem {
        text: ItemText::named(format!("Context {counter:05}")),
    }]
}

/// Deterministic case document: a regular tree with optional context sprinkled in.
pub fn case_document(params: CaseParams) -> CaseDocument {
    let mut counter = 0usize;
    let goals = (0..params.goals)
        .map(|g| GoalItem {
            text: ItemText::named(format!("Goal {g}")),
            context: context_for(&mut counter, params.context_every),
            strategies: (0..params.strategies_per_goal)
                .map(|s| StrategyItem {
                    text: ItemText::named(format!("Strategy {g}.{s}")),
                    context: context_for(&mut counter, params.context_every),
                    property_claims: (0..params.claims_per_strategy)
                        .map(|c| PropertyClaimItem {
                            text: ItemText::named(format!("Claim {g}.{s}.{c}")),
                            context: context_for(&mut counter, params.context_every),
                            evidence: (0..params.evidence_per_claim)
                                .map(|e| EvidenceItem {
                                    text: ItemText::named(format!("Evidence {g}.{s}.{c}.{e}")),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();
    CaseDocument { goals }
}

pub fn fixture(case: Case) -> CaseDocument {
    case_document(case.params())
}
