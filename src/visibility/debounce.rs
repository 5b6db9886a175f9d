// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

/// A single last-write-wins timer slot.
///
/// `schedule` replaces whatever is pending and restarts the quiet window; `poll` hands the value
/// out once the window has elapsed. Time is always passed in, so the caller's event loop decides
/// when to poll (see [`Debouncer::deadline`]).
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Queues `value`, returning the call it superseded, if any.
    pub fn schedule(&mut self, value: T, now: Instant) -> Option<T> {
        let due = now + self.window;
        self.pending
            .replace((value, due))
            .map(|(superseded, _)| superseded)
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, due)) if *due <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the pending call without running it.
    pub(crate) fn clear(&mut self) {
        self.pending = None;
    }
}
