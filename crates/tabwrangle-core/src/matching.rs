//! Fuzzy equality heuristics between tab observations.
//!
//! Browser tab identifiers do not survive certain operations (navigation
//! replacement, close/reopen), so two observations can only be judged "the
//! same tab" by comparing several non-unique fields. Both predicates here
//! are symmetric; neither is transitive, and callers must not treat them as
//! an equivalence relation.

use crate::tab::{ArchivedTab, LiveTab, SessionRecord};

/// Values below this are second-granularity `lastModified` timestamps and
/// get multiplied by 1000. Anything at or above is already milliseconds.
const LAST_MODIFIED_MS_THRESHOLD: u64 = 10_000_000_000;

/// Maximum distance between a session's normalized close time and an
/// archived tab's `closed_at` for the two to describe the same closure.
const CLOSE_TIME_SLOP_MS: u64 = 1000;

/// Normalize a session `lastModified` timestamp to milliseconds.
///
/// The browser's two time sources disagree in precision: session records
/// carry close times accurate to the second, while the archive stamps
/// milliseconds.
#[must_use]
pub fn normalize_last_modified(last_modified: u64) -> u64 {
    if last_modified < LAST_MODIFIED_MS_THRESHOLD {
        last_modified * 1000
    } else {
        last_modified
    }
}

/// Heuristic equality between two live-tab observations.
///
/// True when both carry the same committed identifier, or when index,
/// favicon URL, title, and URL all agree.
#[must_use]
pub fn tabs_match(a: &LiveTab, b: &LiveTab) -> bool {
    if let (Some(id_a), Some(id_b)) = (a.id, b.id) {
        if id_a == id_b {
            return true;
        }
    }
    a.index == b.index
        && a.fav_icon_url == b.fav_icon_url
        && a.title == b.title
        && a.url == b.url
}

/// Does a browser session record describe the closure of `archived`?
///
/// Requires an embedded tab snapshot, matching favicon/title/URL, and a
/// normalized `lastModified` within one second of the archive's `closed_at`.
/// A tab with no favicon comes back from the session store with an empty
/// string rather than an absent value; the two are treated as equal.
///
/// This does not reuse [`tabs_match`]: session snapshots have no index and
/// no committed identifier, and the time fence does the heavy lifting.
#[must_use]
pub fn session_matches_tab(session: &SessionRecord, archived: &ArchivedTab) -> bool {
    let Some(session_tab) = &session.tab else {
        return false;
    };

    let favicon_matches = session_tab.fav_icon_url == archived.tab.fav_icon_url
        || (session_tab.fav_icon_url.as_deref() == Some("")
            && archived.tab.fav_icon_url.is_none());

    let last_modified_ms = normalize_last_modified(session.last_modified);

    favicon_matches
        && session_tab.title == archived.tab.title
        && session_tab.url == archived.tab.url
        && last_modified_ms.abs_diff(archived.closed_at) < CLOSE_TIME_SLOP_MS
}
