//! The theme manifest (`project.mml`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProjectError;

/// An in-memory copy of the project `.mml` manifest.
///
/// Only the `Stylesheet` list is typed; every other key is carried through
/// untouched so the compiler sees exactly what the base manifest declared.
/// The copy is rebuilt from the base file for every output variant, so a
/// build never accumulates state across variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeManifest {
    /// Stylesheet fragment filenames, in compile order.
    #[serde(rename = "Stylesheet")]
    pub stylesheets: Vec<String>,

    /// All remaining manifest keys, passed through verbatim.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl ThemeManifest {
    /// Loads the manifest from a file.
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path).map_err(|e| ProjectError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content).map_err(|e| match e {
            ProjectError::ManifestParse(message) => ProjectError::InvalidManifest {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parses the manifest from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, ProjectError> {
        serde_json::from_str(content).map_err(|e| ProjectError::ManifestParse(e.to_string()))
    }

    /// Replaces the stylesheet fragment list.
    pub fn set_stylesheets(&mut self, stylesheets: &[&str]) {
        self.stylesheets = stylesheets.iter().map(|s| s.to_string()).collect();
    }

    /// Writes the manifest as pretty-printed JSON, overwriting any existing
    /// file.
    pub fn write(&self, path: &Path) -> Result<(), ProjectError> {
        let json = self.to_json();
        std::fs::write(path, json).map_err(|e| ProjectError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Serializes the manifest as pretty-printed JSON.
    pub fn to_json(&self) -> String {
        // A Map<String, Value> with string keys cannot fail to serialize.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
