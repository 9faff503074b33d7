//! Settings shape, defaults, and TOML loading.
//!
//! [`WranglerSettings`] is the serde shape the host's settings layer
//! persists, and it implements [`SettingsProvider`] directly so tests and
//! simple embeddings can use it as the in-memory settings backend.
//!
//! ```toml
//! maxTabs = 100
//! wrangleOption = "exactURLMatch"
//! filterAudio = true
//! showBadgeCount = true
//! whitelist = ["mail.example.com"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::archive::WrangleOption;
use crate::error::SettingsError;
use crate::ports::SettingsProvider;
use crate::tab::LiveTab;

/// User-facing settings for the wrangling service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WranglerSettings {
    /// Maximum number of archived tabs kept before eviction.
    pub max_tabs: usize,
    /// Dedup strategy applied when archiving.
    pub wrangle_option: WrangleOption,
    /// Treat audible tabs (playing sound) as protected.
    pub filter_audio: bool,
    /// Show the archive size on the extension badge.
    pub show_badge_count: bool,
    /// URL substrings whose tabs are always protected.
    pub whitelist: Vec<String>,
    /// Snapshots of manually locked tabs. Membership is fuzzy-matched, not
    /// identity-based.
    pub locked_tabs: Vec<LiveTab>,
}

impl Default for WranglerSettings {
    fn default() -> Self {
        Self {
            max_tabs: 100,
            wrangle_option: WrangleOption::WithDuplicates,
            filter_audio: false,
            show_badge_count: true,
            whitelist: Vec::new(),
            locked_tabs: Vec::new(),
        }
    }
}

impl WranglerSettings {
    /// Parse settings from a TOML string.
    pub fn from_toml_str(input: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(input)?)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

impl SettingsProvider for WranglerSettings {
    fn max_tabs(&self) -> usize {
        self.max_tabs
    }

    fn wrangle_option(&self) -> WrangleOption {
        self.wrangle_option
    }

    fn filter_audio(&self) -> bool {
        self.filter_audio
    }

    fn show_badge_count(&self) -> bool {
        self.show_badge_count
    }

    fn whitelist(&self) -> Vec<String> {
        self.whitelist.clone()
    }

    fn locked_tabs(&self) -> Vec<LiveTab> {
        self.locked_tabs.clone()
    }

    fn set_locked_tabs(&mut self, tabs: Vec<LiveTab>) {
        self.locked_tabs = tabs;
    }
}
