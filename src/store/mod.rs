// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Durable key-value persistence for visibility maps.
//!
//! A visibility map is stored as a flat JSON object `{ "<node id>": <expanded> }` under a
//! caller-chosen key (usually a document or session identifier).

pub mod visibility_store;

pub use visibility_store::{
    FileStore, MemoryStore, StoreError, VisibilityMap, VisibilityStore, WriteDurability,
};
