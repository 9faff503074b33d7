//! The wrangling service object.
//!
//! [`TabWrangler`] owns the closed-tab archive and the access ledger, and
//! coordinates them with the injected collaborators: settings, the browser
//! tab/session port, the durable counter store, and the clock. It is
//! constructed once and passed by reference to callers; there is no ambient
//! global.
//!
//! # Serialization precondition
//!
//! Every public operation assumes it runs to completion before the next one
//! begins. The extension host's event loop guarantees this (one handler at a
//! time); nothing here locks, and counter updates are plain read-modify-write
//! against the injected store. An embedding that introduces concurrency must
//! wrap the service in a single-writer queue.
//!
//! # Optimistic restore
//!
//! [`TabWrangler::unwrangle`] updates the archive immediately after issuing
//! restore requests, without waiting for host confirmation. If a restore
//! later fails, archive state and browser state diverge until the user acts
//! again; that window is accepted and not reconciled here.

use tracing::{debug, info, warn};

use crate::access::AccessTracker;
use crate::archive::{ClosedTabArchive, WrangleOutcome};
use crate::lock::{self, LockContext};
use crate::matching::session_matches_tab;
use crate::ports::{Clock, CounterStore, SettingsProvider, TabHost};
use crate::tab::{ArchivedTab, LiveTab, SessionRecord, TabId};

/// An archived tab paired with the browser session (if any) that recorded
/// its closure. Built via [`TabWrangler::find_session_for`] before calling
/// [`TabWrangler::unwrangle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnwranglePair {
    pub tab: ArchivedTab,
    pub session: Option<SessionRecord>,
}

/// Tab lifecycle service: wrangles idle tabs into the archive, restores
/// them on request, and guards protected tabs.
#[derive(Debug)]
pub struct TabWrangler<S, H, C, K> {
    settings: S,
    host: H,
    counters: C,
    clock: K,
    archive: ClosedTabArchive,
    tracker: AccessTracker,
}

impl<S, H, C, K> TabWrangler<S, H, C, K>
where
    S: SettingsProvider,
    H: TabHost,
    C: CounterStore,
    K: Clock,
{
    /// Build a service with empty archive and ledger.
    pub fn new(settings: S, host: H, counters: C, clock: K) -> Self {
        Self {
            settings,
            host,
            counters,
            clock,
            archive: ClosedTabArchive::new(),
            tracker: AccessTracker::new(),
        }
    }

    // ========================================================================
    // Access tracking
    // ========================================================================

    /// Record an access for a single tab identifier.
    pub fn record_access(&mut self, tab_id: TabId) {
        let now = self.clock.now_ms();
        self.tracker.record_access(tab_id, now);
    }

    /// Seed or refresh the ledger from a batch of tab snapshots (startup,
    /// window sweeps). Snapshots without ids are logged and skipped.
    pub fn record_access_all(&mut self, tabs: &[LiveTab]) {
        let now = self.clock.now_ms();
        self.tracker.record_access_all(tabs, now);
    }

    /// Idle-candidate feed: tab identifiers last accessed strictly before
    /// `threshold_ms`, or all tracked identifiers when `None`.
    #[must_use]
    pub fn get_older_than(&self, threshold_ms: Option<u64>) -> Vec<TabId> {
        self.tracker.get_older_than(threshold_ms)
    }

    /// A tab was closed outside of wrangling: drop its ledger record and
    /// bump the lifetime removed counter.
    pub fn remove_tab(&mut self, tab_id: TabId) {
        let total = self.counters.total_tabs_removed() + 1;
        self.counters.set_total_tabs_removed(total);
        self.tracker.remove(tab_id);
        debug!(tab_id, total, "tab removed from ledger");
    }

    /// One tab superseded another (navigation replacement): access history
    /// carries forward to the new identifier.
    pub fn replace_tab(&mut self, added_tab_id: TabId, removed_tab_id: TabId) {
        self.remove_tab(removed_tab_id);
        self.record_access(added_tab_id);
    }

    // ========================================================================
    // Lock predicate
    // ========================================================================

    /// Whether a tab is protected from wrangling.
    #[must_use]
    pub fn is_locked(&self, tab: &LiveTab) -> bool {
        let whitelist = self.settings.whitelist();
        let locked_tabs = self.settings.locked_tabs();
        lock::is_locked(
            tab,
            &LockContext {
                whitelist: &whitelist,
                locked_tabs: &locked_tabs,
                filter_audio: self.settings.filter_audio(),
            },
        )
    }

    /// Whether the manual lock toggle should be offered for a tab.
    #[must_use]
    pub fn is_manually_lockable(&self, tab: &LiveTab) -> bool {
        let whitelist = self.settings.whitelist();
        let locked_tabs = self.settings.locked_tabs();
        lock::is_manually_lockable(
            tab,
            &LockContext {
                whitelist: &whitelist,
                locked_tabs: &locked_tabs,
                filter_audio: self.settings.filter_audio(),
            },
        )
    }

    /// First whitelist entry contained in `url`, if any.
    #[must_use]
    pub fn whitelist_match(&self, url: Option<&str>) -> Option<String> {
        let whitelist = self.settings.whitelist();
        lock::whitelist_match(&whitelist, url).map(str::to_owned)
    }

    /// Append a tab snapshot to the lock list.
    pub fn lock_tab(&mut self, tab: LiveTab) {
        let mut locked = self.settings.locked_tabs();
        debug!(tab_id = ?tab.id, "locking tab");
        lock::lock(&mut locked, tab);
        self.settings.set_locked_tabs(locked);
    }

    /// Remove the first lock-list entry fuzzy-matching `tab`. Returns
    /// whether an entry was removed.
    pub fn unlock_tab(&mut self, tab: &LiveTab) -> bool {
        let mut locked = self.settings.locked_tabs();
        let removed = lock::unlock(&mut locked, tab);
        if removed {
            debug!(tab_id = ?tab.id, "unlocked tab");
            self.settings.set_locked_tabs(locked);
        }
        removed
    }

    // ========================================================================
    // Wrangle
    // ========================================================================

    /// Close a batch of eligible tabs into the archive.
    ///
    /// Issues a host close request for each tab with a committed identifier,
    /// archives the snapshots with dedup and capacity eviction, bumps the
    /// lifetime wrangled counter, and refreshes the badge.
    ///
    /// Caller is responsible for lock filtering; tabs passed here are
    /// assumed eligible.
    pub fn wrangle_tabs(&mut self, tabs: Vec<LiveTab>) -> WrangleOutcome {
        let max_tabs = self.settings.max_tabs();
        let option = self.settings.wrangle_option();
        let now = self.clock.now_ms();

        for tab in &tabs {
            if let Some(id) = tab.id {
                self.host.remove_tab(id);
            }
        }

        let outcome = self.archive.wrangle(tabs, option, max_tabs, now);

        let total = self.counters.total_tabs_wrangled() + outcome.wrangled;
        self.counters.set_total_tabs_wrangled(total);
        info!(
            wrangled = outcome.wrangled,
            evicted = outcome.evicted.len(),
            total,
            "wrangled tabs into archive"
        );

        self.update_badge_count();
        outcome
    }

    // ========================================================================
    // Unwrangle
    // ========================================================================

    /// Find the browser session matching an archived tab, if one exists.
    ///
    /// Enumerates the host's recently closed sessions and returns the first
    /// fuzzy match. The UI uses this to build [`UnwranglePair`]s.
    #[must_use]
    pub fn find_session_for(&self, archived: &ArchivedTab) -> Option<SessionRecord> {
        self.host
            .sessions()
            .into_iter()
            .find(|session| session_matches_tab(session, archived))
    }

    /// Restore a batch of archived tabs.
    ///
    /// Pairs with a restorable session go through the host's session restore
    /// (history preserved); pairs without fall back to reopening the URL in
    /// an inactive tab. Only tabs closed at or after the install date count
    /// toward the lifetime unwrangled counter. All restored entries are
    /// removed from the archive after the requests are issued.
    pub fn unwrangle(&mut self, pairs: Vec<UnwranglePair>) {
        let install_date = self.counters.install_date();
        let mut countable = 0u64;

        for pair in &pairs {
            match pair.session.as_ref().and_then(|s| s.tab.as_ref()) {
                Some(session_tab) => {
                    self.host.restore_session(&session_tab.session_id);
                }
                None => match pair.tab.tab.url.as_deref() {
                    Some(url) => self.host.create_tab(url),
                    None => {
                        warn!(
                            tab_id = ?pair.tab.tab.id,
                            "archived tab has no session and no URL, nothing to reopen"
                        );
                    }
                },
            }

            if pair.tab.closed_at >= install_date {
                countable += 1;
            }
        }

        let restored: Vec<ArchivedTab> = pairs.into_iter().map(|pair| pair.tab).collect();
        self.archive.remove(&restored);

        let total = self.counters.total_tabs_unwrangled() + countable;
        self.counters.set_total_tabs_unwrangled(total);
        info!(
            restored = restored.len(),
            countable, total, "unwrangled tabs from archive"
        );

        self.update_badge_count();
    }

    // ========================================================================
    // Archive maintenance
    // ========================================================================

    /// User-initiated "clear all": empty the archive and refresh the badge.
    pub fn clear_archive(&mut self) {
        self.archive.clear();
        self.update_badge_count();
    }

    /// Push the current archive size (or nothing) to the badge, honoring
    /// the visibility setting.
    pub fn update_badge_count(&mut self) {
        let text = if self.settings.show_badge_count() && !self.archive.is_empty() {
            self.archive.len().to_string()
        } else {
            String::new()
        };
        self.host.set_badge_text(&text);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn archive(&self) -> &ClosedTabArchive {
        &self.archive
    }

    #[must_use]
    pub fn tracker(&self) -> &AccessTracker {
        &self.tracker
    }

    #[must_use]
    pub fn settings(&self) -> &S {
        &self.settings
    }

    #[must_use]
    pub fn settings_mut(&mut self) -> &mut S {
        &mut self.settings
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub fn counters(&self) -> &C {
        &self.counters
    }
}
