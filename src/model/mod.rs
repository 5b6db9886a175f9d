// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! The case document is the domain input; the graph (typed nodes and edges) is what the rest of
//! the crate lays out and discloses.

pub mod case;
pub(crate) mod fixtures;
pub mod graph;
pub mod ids;
pub mod kind;

pub use case::{
    case_document_schema, CaseDocument, ContextItem, EvidenceItem, GoalItem, ItemText,
    PropertyClaimItem, StrategyItem,
};
pub use graph::{Edge, Graph, Node, Position, Size};
pub use ids::{EdgeId, Id, IdError, NodeId};
pub use kind::{EdgeKind, KindSpec, NodeKind, ParseNodeKindError};
