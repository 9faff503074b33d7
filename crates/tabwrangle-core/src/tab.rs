//! Tab and session observation types.
//!
//! These are snapshots of browser state, not owned identities. The host may
//! report the same logical tab with a different identifier after a
//! close/reopen cycle, so equality between observations is heuristic — see
//! [`crate::matching`]. Field names serialize in the camelCase shape the
//! browser uses, so snapshots round-trip through the host's storage layer
//! unchanged.

use serde::{Deserialize, Serialize};

/// Browser-assigned tab identifier. Only valid within a browser session.
pub type TabId = u64;

/// A snapshot of a live browser tab as reported by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveTab {
    /// Host-assigned identifier. Absent for tabs the browser has not
    /// committed yet (e.g. pre-rendered or devtools tabs).
    #[serde(default)]
    pub id: Option<TabId>,
    /// Position of the tab within its window.
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub fav_icon_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Pinned tabs are always protected from wrangling.
    #[serde(default)]
    pub pinned: bool,
    /// Audible tabs are protected while audio filtering is enabled.
    #[serde(default)]
    pub audible: bool,
}

/// A wrangled tab: a [`LiveTab`] snapshot plus the close timestamp.
///
/// Owned exclusively by the archive from the moment of wrangling until
/// eviction or restoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedTab {
    #[serde(flatten)]
    pub tab: LiveTab,
    /// Millisecond epoch timestamp stamped when the tab was archived.
    #[serde(rename = "closedAt")]
    pub closed_at: u64,
}

/// The tab snapshot nested inside a browser session record.
///
/// Distinct from [`LiveTab`]: the browser rewrites some fields on closure
/// (a tab with no favicon comes back with an empty string, not an absent
/// value), and it carries the session identifier used for restoration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTab {
    #[serde(default)]
    pub fav_icon_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Identifier accepted by the host's restore-session call.
    pub session_id: String,
}

/// Browser-maintained closure metadata for a recently closed tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Epoch timestamp of the closure. Granularity varies by browser:
    /// seconds or milliseconds (see [`crate::matching::normalize_last_modified`]).
    pub last_modified: u64,
    /// The closed tab, when the session describes a single tab (a session
    /// can also describe a whole window, in which case this is absent).
    #[serde(default)]
    pub tab: Option<SessionTab>,
}
