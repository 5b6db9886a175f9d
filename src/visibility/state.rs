// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::debounce::Debouncer;
use super::traversal::{ancestors, descendants};
use crate::model::{Edge, Graph, NodeId};
use crate::store::{VisibilityMap, VisibilityStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityOptions {
    /// State of ids absent from the map.
    pub default_expanded: bool,
    /// Quiet window for the debounced bulk operations.
    pub debounce_ms: u64,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            default_expanded: false,
            debounce_ms: 100,
        }
    }
}

impl VisibilityOptions {
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisibilityStats {
    pub total: usize,
    pub expanded: usize,
    pub collapsed: usize,
    pub percent_expanded: f64,
}

/// A bulk operation waiting for its debounce window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOp {
    ExpandAll(Option<Vec<NodeId>>),
    CollapseAll(Option<Vec<NodeId>>),
    Focus {
        focus: Vec<NodeId>,
        all: Vec<NodeId>,
    },
}

/// Owner of the visibility map.
///
/// Every mutation is applied in full before it becomes observable and, when a store and a key
/// are bound, written through to the store. Store failures are logged and never undo the
/// in-memory change.
#[derive(Debug)]
pub struct VisibilityState {
    map: VisibilityMap,
    options: VisibilityOptions,
    store: Option<Box<dyn VisibilityStore>>,
    key: Option<String>,
    pending: Debouncer<BulkOp>,
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self::new(VisibilityOptions::default())
    }
}

impl VisibilityState {
    /// In-memory state without persistence.
    pub fn new(options: VisibilityOptions) -> Self {
        let pending = Debouncer::new(options.debounce_window());
        Self {
            map: VisibilityMap::new(),
            options,
            store: None,
            key: None,
            pending,
        }
    }

    /// State persisted under `key`; a map previously saved under the same key is restored.
    pub fn with_store(
        options: VisibilityOptions,
        store: Box<dyn VisibilityStore>,
        key: impl Into<String>,
    ) -> Self {
        let mut state = Self::new(options);
        state.store = Some(store);
        state.key = Some(key.into());
        state.restore();
        state
    }

    pub fn options(&self) -> &VisibilityOptions {
        &self.options
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn map(&self) -> &VisibilityMap {
        &self.map
    }

    /// Switches to another document: the map is cleared, any pending debounced call is dropped,
    /// and the state stored under `key` (if any) is loaded.
    pub fn rebind(&mut self, key: Option<String>) {
        self.map.clear();
        self.pending.clear();
        self.key = key;
        self.restore();
    }

    fn restore(&mut self) {
        let (Some(store), Some(key)) = (&self.store, &self.key) else {
            return;
        };
        match store.load(key) {
            Ok(Some(map)) => {
                tracing::debug!(key = %key, entries = map.len(), "restored visibility map");
                self.map = map;
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "failed to load visibility map");
            }
        }
    }

    fn persist(&self) {
        let (Some(store), Some(key)) = (&self.store, &self.key) else {
            return;
        };
        if let Err(err) = store.save(key, &self.map) {
            tracing::warn!(key = %key, error = %err, "failed to persist visibility map");
        }
    }

    /// Replaces the whole map in one step.
    fn commit(&mut self, next: VisibilityMap) {
        if next != self.map {
            self.map = next;
            self.persist();
        }
    }

    pub fn is_expanded(&self, node_id: &str) -> bool {
        self.map
            .get(node_id)
            .copied()
            .unwrap_or(self.options.default_expanded)
    }

    pub fn set_state(&mut self, node_id: &NodeId, expanded: bool) {
        if self.map.get(node_id) == Some(&expanded) {
            return;
        }
        self.map.insert(node_id.clone(), expanded);
        self.persist();
    }

    /// Flips the resolved state and returns the new one.
    pub fn toggle(&mut self, node_id: &NodeId) -> bool {
        let next = !self.is_expanded(node_id.as_str());
        self.set_state(node_id, next);
        next
    }

    pub fn expand(&mut self, node_id: &NodeId) {
        self.set_state(node_id, true);
    }

    pub fn collapse(&mut self, node_id: &NodeId) {
        self.set_state(node_id, false);
    }

    fn set_many<'a>(&mut self, node_ids: impl IntoIterator<Item = &'a NodeId>, expanded: bool) {
        let mut next = self.map.clone();
        for node_id in node_ids {
            next.insert(node_id.clone(), expanded);
        }
        self.commit(next);
    }

    pub fn expand_many<'a>(&mut self, node_ids: impl IntoIterator<Item = &'a NodeId>) {
        self.set_many(node_ids, true);
    }

    pub fn collapse_many<'a>(&mut self, node_ids: impl IntoIterator<Item = &'a NodeId>) {
        self.set_many(node_ids, false);
    }

    fn set_all(&mut self, all_ids: Option<&[NodeId]>, expanded: bool) {
        match all_ids {
            Some(all_ids) => self.set_many(all_ids, expanded),
            None => {
                let next = self
                    .map
                    .keys()
                    .map(|node_id| (node_id.clone(), expanded))
                    .collect();
                self.commit(next);
            }
        }
    }

    /// Expands `all_ids`, or every id already in the map when `None`.
    pub fn expand_all(&mut self, all_ids: Option<&[NodeId]>) {
        self.set_all(all_ids, true);
    }

    /// Collapses `all_ids`, or every id already in the map when `None`.
    pub fn collapse_all(&mut self, all_ids: Option<&[NodeId]>) {
        self.set_all(all_ids, false);
    }

    /// Shows exactly `focus_ids` among `all_ids`: all of `all_ids` collapse, then `focus_ids`
    /// expand, as a single replacement of the map.
    pub fn focus_mode(&mut self, focus_ids: &[NodeId], all_ids: &[NodeId]) {
        let mut next = self.map.clone();
        for node_id in all_ids {
            next.insert(node_id.clone(), false);
        }
        for node_id in focus_ids {
            next.insert(node_id.clone(), true);
        }
        self.commit(next);
    }

    /// Expands `node_id` and all of its ancestors; returns the expanded set.
    pub fn expand_path_to_node(&mut self, node_id: &NodeId, edges: &[Edge]) -> BTreeSet<NodeId> {
        let path = ancestors(node_id, edges);
        self.expand_many(&path);
        path
    }

    /// Expands `node_id` and all of its descendants; returns the expanded set.
    pub fn expand_subtree(&mut self, node_id: &NodeId, edges: &[Edge]) -> BTreeSet<NodeId> {
        let subtree = descendants(node_id, edges);
        self.expand_many(&subtree);
        subtree
    }

    /// Forgets every stored state, including the persisted copy and any pending debounced call.
    pub fn reset_all(&mut self) {
        self.map.clear();
        self.pending.clear();
        let (Some(store), Some(key)) = (&self.store, &self.key) else {
            return;
        };
        if let Err(err) = store.remove(key) {
            tracing::warn!(key = %key, error = %err, "failed to remove persisted visibility map");
        }
    }

    pub fn stats(&self) -> VisibilityStats {
        let total = self.map.len();
        let expanded = self.map.values().filter(|expanded| **expanded).count();
        let percent_expanded = if total == 0 {
            0.0
        } else {
            expanded as f64 * 100.0 / total as f64
        };
        VisibilityStats {
            total,
            expanded,
            collapsed: total - expanded,
            percent_expanded,
        }
    }

    /// Reveals the graph's roots when nothing is stored yet. Returns whether anything changed.
    pub fn seed_defaults(&mut self, graph: &Graph) -> bool {
        if !self.map.is_empty() {
            return false;
        }
        let roots = graph.root_ids();
        if roots.is_empty() {
            return false;
        }
        self.expand_many(&roots);
        true
    }

    /// Ids of `graph` whose state resolves to expanded.
    pub fn visible_ids(&self, graph: &Graph) -> BTreeSet<NodeId> {
        graph
            .node_ids()
            .into_iter()
            .filter(|node_id| self.is_expanded(node_id.as_str()))
            .collect()
    }

    fn schedule(&mut self, op: BulkOp, now: Instant) {
        if let Some(superseded) = self.pending.schedule(op, now) {
            tracing::debug!(?superseded, "coalesced debounced visibility operation");
        }
    }

    pub fn expand_all_debounced(&mut self, all_ids: Option<Vec<NodeId>>, now: Instant) {
        self.schedule(BulkOp::ExpandAll(all_ids), now);
    }

    pub fn collapse_all_debounced(&mut self, all_ids: Option<Vec<NodeId>>, now: Instant) {
        self.schedule(BulkOp::CollapseAll(all_ids), now);
    }

    pub fn focus_mode_debounced(&mut self, focus: Vec<NodeId>, all: Vec<NodeId>, now: Instant) {
        self.schedule(BulkOp::Focus { focus, all }, now);
    }

    /// When the pending debounced operation (if any) becomes due.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.pending.deadline()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Runs the pending debounced operation if its window has elapsed; returns whether it ran.
    pub fn poll_debounced(&mut self, now: Instant) -> bool {
        let Some(op) = self.pending.poll(now) else {
            return false;
        };
        match op {
            BulkOp::ExpandAll(all_ids) => self.expand_all(all_ids.as_deref()),
            BulkOp::CollapseAll(all_ids) => self.collapse_all(all_ids.as_deref()),
            BulkOp::Focus { focus, all } => self.focus_mode(&focus, &all),
        }
        true
    }
}
