//! Error types for configuration loading.

use std::path::PathBuf;

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Path is not a valid glob pattern
    #[error("Invalid path pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Unknown file type
    #[error("Unknown file type: {0}")]
    UnknownFileType(String),
    /// Pattern did not match any file
    #[error("No config files match: {0}")]
    NoFilesMatched(String),
}
