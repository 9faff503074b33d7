//! Bounded archive of wrangled (closed) tabs.
//!
//! An ordered sequence of [`ArchivedTab`], newest first. Wrangling
//! deduplicates against existing entries according to the configured
//! [`WrangleOption`], stamps the close time, prepends, and then truncates to
//! the capacity bound.
//!
//! Eviction is permanent: entries truncated past the capacity bound are
//! discarded with no export step. That is the product's stated data-loss
//! policy, preserved here as-is; callers who need durability must snapshot
//! via [`ClosedTabArchive::export_json`] before wrangling.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::Result;
use crate::tab::{ArchivedTab, LiveTab, TabId};

// =============================================================================
// Wrangle option
// =============================================================================

/// Dedup strategy applied when archiving a closing tab.
///
/// Serializes to the setting strings the extension has always stored
/// (`exactURLMatch`, `hostnameAndTitleMatch`, `withDuplicates`); an
/// unrecognized stored string deserializes to [`Self::WithDuplicates`]
/// rather than failing, so stale settings never break startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WrangleOption {
    /// Replace an existing entry with an identical URL.
    ExactUrlMatch,
    /// Replace an existing entry with the same URL hostname and title.
    HostnameAndTitleMatch,
    /// Keep every closure as its own entry.
    #[default]
    WithDuplicates,
}

impl WrangleOption {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExactUrlMatch => "exactURLMatch",
            Self::HostnameAndTitleMatch => "hostnameAndTitleMatch",
            Self::WithDuplicates => "withDuplicates",
        }
    }
}

impl std::fmt::Display for WrangleOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WrangleOption {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "exactURLMatch" => Self::ExactUrlMatch,
            "hostnameAndTitleMatch" => Self::HostnameAndTitleMatch,
            _ => Self::WithDuplicates,
        })
    }
}

impl Serialize for WrangleOption {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WrangleOption {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or_default())
    }
}

// =============================================================================
// Archive
// =============================================================================

/// Outcome of one wrangle pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrangleOutcome {
    /// Number of tabs stamped and archived. Dedup replacements still count;
    /// this feeds the lifetime `total_tabs_wrangled` counter.
    pub wrangled: u64,
    /// Entries permanently discarded by the capacity truncation, oldest
    /// last. Unrecoverable once returned.
    pub evicted: Vec<ArchivedTab>,
}

/// Bounded, ordered store of closed tabs, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClosedTabArchive {
    tabs: Vec<ArchivedTab>,
}

impl ClosedTabArchive {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Archive a batch of closing tabs.
    ///
    /// For each tab: look up an existing entry according to `option`, drop
    /// it if found (only the most recent occurrence of a logical tab is
    /// kept), stamp `closed_at = now_ms`, and prepend. After the whole batch
    /// is processed, truncate to `max_tabs`, permanently discarding the
    /// oldest entries.
    pub fn wrangle(
        &mut self,
        tabs: Vec<LiveTab>,
        option: WrangleOption,
        max_tabs: usize,
        now_ms: u64,
    ) -> WrangleOutcome {
        let mut outcome = WrangleOutcome::default();

        for tab in tabs {
            let existing = match option {
                WrangleOption::ExactUrlMatch => self.find_position_by_url(tab.url.as_deref()),
                WrangleOption::HostnameAndTitleMatch => {
                    self.find_position_by_hostname_and_title(tab.url.as_deref(), tab.title.as_deref())
                }
                WrangleOption::WithDuplicates => None,
            };
            if let Some(pos) = existing {
                self.tabs.remove(pos);
            }

            self.tabs.insert(
                0,
                ArchivedTab {
                    tab,
                    closed_at: now_ms,
                },
            );
            outcome.wrangled += 1;
        }

        if self.tabs.len() > max_tabs {
            outcome.evicted = self.tabs.split_off(max_tabs);
            debug!(
                evicted = outcome.evicted.len(),
                max_tabs, "archive over capacity, truncated oldest entries"
            );
        }

        outcome
    }

    /// Position of the first entry whose committed identifier equals `id`.
    #[must_use]
    pub fn find_position_by_id(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|entry| entry.tab.id == Some(id))
    }

    /// Position of the first entry with an identical URL. A missing URL
    /// never matches anything.
    #[must_use]
    pub fn find_position_by_url(&self, url: Option<&str>) -> Option<usize> {
        let url = url?;
        self.tabs
            .iter()
            .position(|entry| entry.tab.url.as_deref() == Some(url))
    }

    /// Position of the first entry whose URL hostname and title both match.
    ///
    /// Unparseable or missing URLs degrade to an empty hostname instead of
    /// aborting the pass, so two unparseable URLs with equal titles are
    /// considered the same logical tab.
    #[must_use]
    pub fn find_position_by_hostname_and_title(
        &self,
        url: Option<&str>,
        title: Option<&str>,
    ) -> Option<usize> {
        let host = hostname_of(url);
        self.tabs.iter().position(|entry| {
            hostname_of(entry.tab.url.as_deref()) == host && entry.tab.title.as_deref() == title
        })
    }

    /// Remove specific entries by exact equality (snapshot plus close time).
    /// Used by the unwrangle path after restore requests are issued.
    pub fn remove(&mut self, tabs: &[ArchivedTab]) {
        self.tabs.retain(|entry| !tabs.contains(entry));
    }

    /// Empty the archive unconditionally (user-initiated "clear all").
    pub fn clear(&mut self) {
        self.tabs.clear();
    }

    /// Entries, newest first.
    #[must_use]
    pub fn tabs(&self) -> &[ArchivedTab] {
        &self.tabs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Serialize the archive to JSON for export/backup.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.tabs)?)
    }

    /// Rebuild an archive from a previous [`Self::export_json`] snapshot.
    pub fn import_json(json: &str) -> Result<Self> {
        Ok(Self {
            tabs: serde_json::from_str(json)?,
        })
    }
}

/// Hostname of a URL, or the empty string when the URL is absent or does
/// not parse.
fn hostname_of(url: Option<&str>) -> String {
    url.and_then(|u| Url::parse(u).ok())
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_default()
}
