//! Error types for the build pipeline.

use std::path::PathBuf;

use tilestyle_patch::PatchError;
use tilestyle_project::ProjectError;

/// Errors that can occur while building a theme.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The stylesheet compiler executable could not be spawned.
    #[error("stylesheet compiler '{command}' could not be run: {source}")]
    CompilerSpawn {
        /// The command that was attempted.
        command: String,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The stylesheet compiler ran but exited non-zero.
    #[error("stylesheet compiler failed on '{manifest}' ({status}){stderr}")]
    CompilerFailed {
        /// The manifest that was being compiled.
        manifest: PathBuf,
        /// The compiler's exit status.
        status: String,
        /// The compiler's stderr, prefixed with `: ` when non-empty.
        stderr: String,
    },

    /// An I/O error occurred on a build input or output.
    #[error("failed to access '{path}': {source}")]
    Io {
        /// The file that could not be read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A project file (manifest, palette) was invalid or unreadable.
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// The compiled document could not be patched.
    #[error(transparent)]
    Patch(#[from] PatchError),
}

impl BuildError {
    /// Formats compiler stderr for embedding into the error message.
    pub(crate) fn format_stderr(stderr: &[u8]) -> String {
        let text = String::from_utf8_lossy(stderr);
        let text = text.trim();
        if text.is_empty() {
            String::new()
        } else {
            format!(": {text}")
        }
    }
}
