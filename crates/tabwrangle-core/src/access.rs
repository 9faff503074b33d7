//! Last-accessed ledger for live tabs.
//!
//! Tracks when each tab was last observed active. The external scheduler
//! asks for identifiers older than a deadline to pick wrangle candidates;
//! this ledger is the sole feed for that selection.
//!
//! One bad observation never aborts a pass: snapshots without a committed
//! identifier are logged and skipped.

use std::collections::HashMap;

use tracing::warn;

use crate::tab::{LiveTab, TabId};

/// Mapping from tab identifier to last-accessed timestamp (ms epoch).
///
/// Pure in-memory state; counter bookkeeping for removals lives in the
/// service layer, which owns the durable counter port.
#[derive(Debug, Clone, Default)]
pub struct AccessTracker {
    times: HashMap<TabId, u64>,
}

impl AccessTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `now_ms` as the last access time for a tab.
    pub fn record_access(&mut self, tab_id: TabId, now_ms: u64) {
        self.times.insert(tab_id, now_ms);
    }

    /// Record access for every tab in a snapshot sequence (startup seeding,
    /// window-focus sweeps). Element-wise [`Self::record_access`].
    pub fn record_access_all(&mut self, tabs: &[LiveTab], now_ms: u64) {
        for tab in tabs {
            match tab.id {
                Some(id) => self.record_access(id, now_ms),
                None => {
                    warn!(title = ?tab.title, "tab snapshot has no committed id, skipping access record");
                }
            }
        }
    }

    /// Identifiers whose recorded access time is strictly older than
    /// `threshold_ms`, or every tracked identifier when `None`.
    ///
    /// The result is unordered; callers sort if they need determinism.
    #[must_use]
    pub fn get_older_than(&self, threshold_ms: Option<u64>) -> Vec<TabId> {
        self.times
            .iter()
            .filter(|&(_, &at)| threshold_ms.is_none_or(|t| at < t))
            .map(|(&id, _)| id)
            .collect()
    }

    /// Drop the record for a tab. Returns whether a record existed.
    pub fn remove(&mut self, tab_id: TabId) -> bool {
        self.times.remove(&tab_id).is_some()
    }

    /// One tab superseding another (navigation-triggered replacement):
    /// drops the old record and carries access history forward to the new
    /// identifier.
    pub fn replace(&mut self, added_tab_id: TabId, removed_tab_id: TabId, now_ms: u64) {
        self.remove(removed_tab_id);
        self.record_access(added_tab_id, now_ms);
    }

    /// Last recorded access time for a tab, if tracked.
    #[must_use]
    pub fn last_access(&self, tab_id: TabId) -> Option<u64> {
        self.times.get(&tab_id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
