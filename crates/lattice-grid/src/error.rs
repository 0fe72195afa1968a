//! Error types for the grid header system.

use std::path::PathBuf;

/// Result type alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading grid or column configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing error.
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Reasons a configured sort cycle cannot produce the next sort state.
///
/// None of these are fatal: the sort advance that hit the error is abandoned
/// and the column keeps its current sort state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortCycleError {
    /// The configured cycle has no entries.
    #[error("sorting order must be a list with at least one element, currently it's empty")]
    Empty,

    /// The configured value is not a list at all.
    #[error("sorting order must be a list with at least one element, currently it's {0}")]
    NotASequence(String),

    /// The cycle produced a value outside ascending/descending/none.
    #[error("invalid sort type {0}")]
    InvalidSortType(String),
}
