//! Closure-eligibility predicate.
//!
//! A tab is protected from wrangling ("locked") when any of these hold:
//! it is pinned, its URL contains a whitelist entry, it is audible while
//! audio filtering is enabled, or it fuzzy-matches a snapshot in the user's
//! lock list. Lock-list membership is heuristic equality, never identity:
//! the list stores snapshots, and [`crate::matching::tabs_match`] decides
//! membership at check time.

use crate::matching::tabs_match;
use crate::tab::LiveTab;

/// Protection inputs, borrowed from the settings layer.
#[derive(Debug, Clone, Copy)]
pub struct LockContext<'a> {
    /// URL substrings whose tabs are always protected.
    pub whitelist: &'a [String],
    /// Snapshots of manually locked tabs.
    pub locked_tabs: &'a [LiveTab],
    /// Whether audible tabs count as protected.
    pub filter_audio: bool,
}

/// First whitelist entry contained in `url`, if any.
///
/// Substring containment, first match wins. A missing URL never matches.
#[must_use]
pub fn whitelist_match<'a>(whitelist: &'a [String], url: Option<&str>) -> Option<&'a str> {
    let url = url?;
    whitelist
        .iter()
        .find(|entry| url.contains(entry.as_str()))
        .map(String::as_str)
}

/// Whether a URL is covered by the whitelist.
#[must_use]
pub fn is_whitelisted(whitelist: &[String], url: Option<&str>) -> bool {
    whitelist_match(whitelist, url).is_some()
}

/// Whether a tab is protected from wrangling.
#[must_use]
pub fn is_locked(tab: &LiveTab, ctx: &LockContext<'_>) -> bool {
    tab.pinned
        || is_whitelisted(ctx.whitelist, tab.url.as_deref())
        || (tab.audible && ctx.filter_audio)
        || ctx.locked_tabs.iter().any(|locked| tabs_match(tab, locked))
}

/// Whether the manual lock toggle should be offered for a tab.
///
/// True iff none of the automatic protections (pinned, whitelist,
/// audible-while-filtered) apply. Deliberately independent of current
/// lock-list membership: an already-locked tab stays manually lockable so
/// the user can toggle it back off.
#[must_use]
pub fn is_manually_lockable(tab: &LiveTab, ctx: &LockContext<'_>) -> bool {
    !tab.pinned
        && !is_whitelisted(ctx.whitelist, tab.url.as_deref())
        && !(tab.audible && ctx.filter_audio)
}

/// Append a tab snapshot to the lock list.
pub fn lock(locked_tabs: &mut Vec<LiveTab>, tab: LiveTab) {
    locked_tabs.push(tab);
}

/// Remove the first lock-list entry fuzzy-matching `tab`.
///
/// Returns whether an entry was removed.
pub fn unlock(locked_tabs: &mut Vec<LiveTab>, tab: &LiveTab) -> bool {
    if let Some(pos) = locked_tabs.iter().position(|locked| tabs_match(tab, locked)) {
        locked_tabs.remove(pos);
        true
    } else {
        false
    }
}
