//! Trait seams for the external collaborators.
//!
//! The core never talks to the browser or to durable storage directly. The
//! settings layer, the tab/session control surface, the counter store, and
//! the clock are injected through these traits when the [`crate::service::TabWrangler`]
//! is constructed.
//!
//! Host calls are fire-and-forget: the core updates its own state
//! optimistically after issuing a request and does not wait for
//! acknowledgment. A failed restore can therefore leave the archive briefly
//! ahead of actual browser state; that divergence is accepted, not
//! reconciled here.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::archive::WrangleOption;
use crate::tab::{LiveTab, SessionRecord, TabId};

/// Read/write access to user settings.
///
/// Backed by the extension's settings persistence in production and by
/// [`crate::config::WranglerSettings`] directly in tests.
pub trait SettingsProvider {
    /// Archive capacity bound.
    fn max_tabs(&self) -> usize;
    /// Dedup strategy for the archive.
    fn wrangle_option(&self) -> WrangleOption;
    /// Whether audible tabs are protected.
    fn filter_audio(&self) -> bool;
    /// Whether the badge shows the archive size.
    fn show_badge_count(&self) -> bool;
    /// URL substrings whose tabs are always protected.
    fn whitelist(&self) -> Vec<String>;
    /// Snapshots of manually locked tabs.
    fn locked_tabs(&self) -> Vec<LiveTab>;
    /// Replace the lock list.
    fn set_locked_tabs(&mut self, tabs: Vec<LiveTab>);
}

/// Tab and session control surface of the hosting browser.
pub trait TabHost {
    /// Open `url` in a new inactive tab. Navigation history is not
    /// preserved; this is the fallback restore path.
    fn create_tab(&mut self, url: &str);
    /// Close a live tab.
    fn remove_tab(&mut self, tab_id: TabId);
    /// Restore a closed tab by session identifier, preserving its history.
    /// The preferred restore path.
    fn restore_session(&mut self, session_id: &str);
    /// Enumerate the browser's recently closed sessions.
    fn sessions(&self) -> Vec<SessionRecord>;
    /// Update the badge text shown on the extension icon.
    fn set_badge_text(&mut self, text: &str);
}

/// Durable storage for the lifetime counters.
///
/// All three counters are monotonically non-decreasing within a session.
/// Updates are plain read-modify-write; the single-writer precondition on
/// the service guarantees no interleaving.
pub trait CounterStore {
    fn total_tabs_wrangled(&self) -> u64;
    fn set_total_tabs_wrangled(&mut self, value: u64);

    fn total_tabs_unwrangled(&self) -> u64;
    fn set_total_tabs_unwrangled(&mut self, value: u64);

    fn total_tabs_removed(&self) -> u64;
    fn set_total_tabs_removed(&mut self, value: u64);

    /// Millisecond epoch timestamp of installation. Restores of tabs closed
    /// before this are not counted, so post-upgrade counts stay honest.
    fn install_date(&self) -> u64;
}

/// Millisecond-epoch clock, injectable for deterministic tests.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// System clock backed by [`SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }
}
