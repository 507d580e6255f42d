//! Error types for settings and descriptor loading

use std::path::PathBuf;

/// Error type for settings store operations
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Config folder could not be created
    #[error("Failed to create config folder {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file could not be read
    #[error("Failed to read settings file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file could not be written
    #[error("Failed to write settings file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for settings store operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Error type for plugin descriptor loading
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// Failed to read the manifest file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("Failed to parse plugin manifest: {0}")]
    ParseError(#[from] toml::de::Error),
}
