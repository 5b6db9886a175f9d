// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of argument element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[serde(alias = "TopLevelNormativeGoal")]
    Goal,
    Strategy,
    #[serde(alias = "propertyClaim", alias = "claim")]
    PropertyClaim,
    Evidence,
    Context,
}

/// Per-kind constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindSpec {
    pub width: f64,
    pub height: f64,
    pub id_prefix: &'static str,
    pub children: &'static [NodeKind],
}

const GOAL: KindSpec = KindSpec {
    width: 260.0,
    height: 110.0,
    id_prefix: "goal",
    children: &[NodeKind::Strategy, NodeKind::Context],
};

const STRATEGY: KindSpec = KindSpec {
    width: 250.0,
    height: 90.0,
    id_prefix: "strategy",
    children: &[NodeKind::PropertyClaim, NodeKind::Context],
};

const PROPERTY_CLAIM: KindSpec = KindSpec {
    width: 240.0,
    height: 80.0,
    id_prefix: "claim",
    children: &[NodeKind::Evidence, NodeKind::Context],
};

const EVIDENCE: KindSpec = KindSpec {
    width: 220.0,
    height: 70.0,
    id_prefix: "evidence",
    children: &[],
};

const CONTEXT: KindSpec = KindSpec {
    width: 200.0,
    height: 60.0,
    id_prefix: "context",
    children: &[],
};

impl NodeKind {
    pub fn spec(self) -> &'static KindSpec {
        match self {
            Self::Goal => &GOAL,
            Self::Strategy => &STRATEGY,
            Self::PropertyClaim => &PROPERTY_CLAIM,
            Self::Evidence => &EVIDENCE,
            Self::Context => &CONTEXT,
        }
    }

    pub fn default_width(self) -> f64 {
        self.spec().width
    }

    pub fn default_height(self) -> f64 {
        self.spec().height
    }

    pub fn id_prefix(self) -> &'static str {
        self.spec().id_prefix
    }

    pub fn can_parent(self, child: NodeKind) -> bool {
        self.spec().children.contains(&child)
    }

    /// Only goals may sit at the top of a case.
    pub fn is_root_kind(self) -> bool {
        self == Self::Goal
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Goal => "goal",
            Self::Strategy => "strategy",
            Self::PropertyClaim => "property_claim",
            Self::Evidence => "evidence",
            Self::Context => "context",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeKindError {
    value: String,
}

impl fmt::Display for ParseNodeKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown node kind {:?}", self.value)
    }
}

impl std::error::Error for ParseNodeKindError {}

impl FromStr for NodeKind {
    type Err = ParseNodeKindError;

    /// Accepts the spellings case data uses in the wild and folds them onto one variant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect::<String>();

        match folded.as_str() {
            "goal" | "toplevelnormativegoal" | "toplevelgoal" => Ok(Self::Goal),
            "strategy" => Ok(Self::Strategy),
            "propertyclaim" | "claim" => Ok(Self::PropertyClaim),
            "evidence" => Ok(Self::Evidence),
            "context" | "assumption" => Ok(Self::Context),
            _ => Err(ParseNodeKindError {
                value: s.to_owned(),
            }),
        }
    }
}

/// Kind of a parent/child link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// goal -> strategy, strategy -> claim
    Decomposes,
    /// claim -> evidence
    Supports,
    /// owner -> context decoration; drawn dashed.
    Context,
}

impl EdgeKind {
    /// The link kind is decided by what hangs below the parent.
    pub fn for_child(child: NodeKind) -> Self {
        match child {
            NodeKind::Context => Self::Context,
            NodeKind::Evidence => Self::Supports,
            _ => Self::Decomposes,
        }
    }

    pub fn is_dashed(self) -> bool {
        self == Self::Context
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Decomposes => "decomposes",
            Self::Supports => "supports",
            Self::Context => "context",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
