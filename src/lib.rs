// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Caseview: graph construction, layered layout and progressive disclosure for assurance cases.
//!
//! Pipeline: [`mapper::map_case`] turns a case document into a [`model::Graph`],
//! [`validate::validate_graph`] reports structural problems, a
//! [`visibility::VisibilityState`] decides what is revealed, and
//! [`layout::layout_layered`] positions the revealed part. [`disclosure::DisclosureController`]
//! wires user gestures through all of it.

pub mod config;
pub mod disclosure;
pub mod layout;
pub mod mapper;
pub mod model;
pub mod query;
pub mod store;
pub mod validate;
pub mod visibility;
