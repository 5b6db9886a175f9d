// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout of the visible part of a case graph.
//!
//! Hidden nodes are never moved, so collapsing and re-expanding a branch keeps untouched nodes
//! where they were.

pub mod layered;

pub use layered::{
    layout_graph, layout_layered, Direction, LayoutOptions, LayoutResult, ParseDirectionError,
};
