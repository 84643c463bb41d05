//! Project layout, theme manifests, and palette handling for tilestyle.
//!
//! A tilestyle project is a directory containing a `mapnik/` subdirectory
//! with the base manifest (`project.mml`), shared stylesheet fragments, and
//! one palette fragment per theme. This crate knows where everything lives
//! and how the per-variant inputs (manifest stylesheet lists, halo-forced
//! palettes) are derived from the base files.

#![warn(missing_docs)]

mod error;
mod manifest;
mod palette;
mod paths;
mod variant;

pub use error::ProjectError;
pub use manifest::ThemeManifest;
pub use palette::{rewrite_halo, HaloMode};
pub use paths::ProjectPaths;
pub use variant::{OutputVariant, PaletteChoice, SHARED_FRAGMENTS};
