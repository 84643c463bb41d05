//! Modification-time change detection for the rebuild loop.
//!
//! The watch set records the last-observed mtime of every watched source
//! file. A poll re-stats all of them and reports which changed, updating the
//! recorded values for those files. Equality is all that matters: a file
//! restored to an older mtime still counts as changed.

#![warn(missing_docs)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Errors that can occur while polling watched files.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// A watched file could not be stat'd (typically: it was deleted).
    #[error("cannot watch '{path}': {source}")]
    Stat {
        /// The watched file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// The set of watched files and their last-observed modification times.
///
/// Keys are kept sorted so the watched-file listing and change reports come
/// out in a stable order.
#[derive(Debug, Clone)]
pub struct WatchSet {
    stamps: BTreeMap<PathBuf, SystemTime>,
}

impl WatchSet {
    /// Builds a watch set from an initial stat of every path.
    ///
    /// Fails if any path cannot be stat'd; watching a file that does not
    /// exist yet is not supported.
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Result<Self, WatchError> {
        let mut stamps = BTreeMap::new();
        for path in paths {
            let mtime = stat_mtime(&path)?;
            stamps.insert(path, mtime);
        }
        Ok(Self { stamps })
    }

    /// The watched paths, in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.stamps.keys().map(PathBuf::as_path)
    }

    /// Number of watched files.
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    /// Whether the set watches nothing.
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Re-stats every watched file and returns the paths whose mtime differs
    /// from the recorded value.
    ///
    /// Recorded values are updated for every changed file in this cycle, so
    /// one edit triggers exactly one rebuild.
    pub fn poll(&mut self) -> Result<Vec<PathBuf>, WatchError> {
        let mut changed = Vec::new();
        for (path, recorded) in self.stamps.iter_mut() {
            let current = stat_mtime(path)?;
            if current != *recorded {
                *recorded = current;
                changed.push(path.clone());
            }
        }
        Ok(changed)
    }
}

fn stat_mtime(path: &Path) -> Result<SystemTime, WatchError> {
    let metadata = std::fs::metadata(path).map_err(|e| WatchError::Stat {
        path: path.to_path_buf(),
        source: e,
    })?;
    metadata.modified().map_err(|e| WatchError::Stat {
        path: path.to_path_buf(),
        source: e,
    })
}
