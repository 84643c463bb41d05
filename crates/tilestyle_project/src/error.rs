//! Error types for project file handling.

use std::path::PathBuf;

/// Errors that can occur while reading or writing project files.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// An I/O error occurred on a project file.
    #[error("failed to access '{path}': {source}")]
    Io {
        /// The file that could not be read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Manifest JSON could not be parsed or is missing required keys.
    #[error("failed to parse manifest: {0}")]
    ManifestParse(String),

    /// The base manifest file is not valid JSON or is missing required keys.
    #[error("invalid manifest '{path}': {message}")]
    InvalidManifest {
        /// The manifest file.
        path: PathBuf,
        /// Parser or validation detail.
        message: String,
    },

    /// The project root could not be determined.
    #[error("cannot determine project root: {0}")]
    NoRoot(String),
}
