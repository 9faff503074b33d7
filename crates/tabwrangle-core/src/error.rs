//! Error types for tabwrangle-core.
//!
//! The core operations themselves are best-effort and never fail the host:
//! malformed observations are logged and skipped, missing sessions fall back
//! to plain reopens, unparseable URLs degrade to empty hostnames. Errors
//! here cover the edges where the crate touches the outside world — loading
//! settings, serializing snapshots.

use thiserror::Error;

/// Result type alias using the library's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tabwrangle-core.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings loading/parsing errors
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors (archive export/import)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors loading or parsing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid settings TOML: {0}")]
    Parse(#[from] toml::de::Error),
}
