// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Progressive disclosure state.
//!
//! The visibility map records which nodes are revealed (`true`) or hidden (`false`). Ids that are
//! not in the map resolve to [`VisibilityOptions::default_expanded`].

pub mod debounce;
pub mod state;
pub mod traversal;

pub use debounce::Debouncer;
pub use state::{BulkOp, VisibilityOptions, VisibilityState, VisibilityStats};
pub use traversal::{ancestors, collect_reachable, descendants, WalkDirection};
