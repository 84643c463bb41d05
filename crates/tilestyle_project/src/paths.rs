//! Filesystem layout of a tilestyle project.

use std::path::{Path, PathBuf};

use crate::error::ProjectError;

/// Derives every project file location from a single root directory.
///
/// All inputs live under `<root>/mapnik/`; compiled outputs go to
/// `<root>/mapnik/xml/`. Scratch files (the per-variant manifest and the
/// halo-forced palettes) carry a `~` prefix.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    /// Creates a layout rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates a layout rooted at the current working directory.
    ///
    /// Prefers the `PWD` environment value over [`std::env::current_dir`]:
    /// `current_dir` resolves symlinks, and the paths embedded into the
    /// output documents must match the shell's logical view of the tree.
    pub fn from_env() -> Result<Self, ProjectError> {
        if let Ok(pwd) = std::env::var("PWD") {
            if !pwd.is_empty() {
                return Ok(Self::new(pwd));
            }
        }
        let cwd = std::env::current_dir().map_err(|e| ProjectError::NoRoot(e.to_string()))?;
        Ok(Self::new(cwd))
    }

    /// The project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/mapnik` — fragment directory, also the map's `base`.
    pub fn mapnik_dir(&self) -> PathBuf {
        self.root.join("mapnik")
    }

    /// `<root>/mapnik/font` — embedded as the map's `font-directory`.
    pub fn font_dir(&self) -> PathBuf {
        self.mapnik_dir().join("font")
    }

    /// `<root>/mapnik/project.mml` — the base theme manifest.
    pub fn base_manifest(&self) -> PathBuf {
        self.mapnik_dir().join("project.mml")
    }

    /// `<root>/mapnik/~project.mml` — the per-variant scratch manifest.
    pub fn scratch_manifest(&self) -> PathBuf {
        self.mapnik_dir().join("~project.mml")
    }

    /// `<root>/mapnik/palette.<theme>.mss` — a theme's palette fragment.
    pub fn theme_palette(&self, theme: &str) -> PathBuf {
        self.mapnik_dir().join(format!("palette.{theme}.mss"))
    }

    /// `<root>/mapnik/~palette.mss` — scratch palette with halos forced off.
    pub fn scratch_palette(&self) -> PathBuf {
        self.mapnik_dir().join("~palette.mss")
    }

    /// `<root>/mapnik/~palette_halo.mss` — scratch palette with halos forced on.
    pub fn scratch_palette_halo(&self) -> PathBuf {
        self.mapnik_dir().join("~palette_halo.mss")
    }

    /// `<root>/mapnik/<name>` — a shared fragment by filename.
    pub fn fragment(&self, name: &str) -> PathBuf {
        self.mapnik_dir().join(name)
    }

    /// `<root>/mapnik/xml` — the compiled output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.mapnik_dir().join("xml")
    }

    /// `<root>/mapnik/xml/<theme>_<variant>.xml` — a compiled style document.
    pub fn output_file(&self, theme: &str, variant: &str) -> PathBuf {
        self.output_dir().join(format!("{theme}_{variant}.xml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_under_root() {
        let paths = ProjectPaths::new("/proj");
        assert_eq!(paths.mapnik_dir(), PathBuf::from("/proj/mapnik"));
        assert_eq!(paths.font_dir(), PathBuf::from("/proj/mapnik/font"));
        assert_eq!(
            paths.base_manifest(),
            PathBuf::from("/proj/mapnik/project.mml")
        );
        assert_eq!(
            paths.scratch_manifest(),
            PathBuf::from("/proj/mapnik/~project.mml")
        );
        assert_eq!(paths.output_dir(), PathBuf::from("/proj/mapnik/xml"));
    }

    #[test]
    fn theme_palette_name() {
        let paths = ProjectPaths::new("/proj");
        assert_eq!(
            paths.theme_palette("dark"),
            PathBuf::from("/proj/mapnik/palette.dark.mss")
        );
    }

    #[test]
    fn scratch_palettes() {
        let paths = ProjectPaths::new("/proj");
        assert_eq!(
            paths.scratch_palette(),
            PathBuf::from("/proj/mapnik/~palette.mss")
        );
        assert_eq!(
            paths.scratch_palette_halo(),
            PathBuf::from("/proj/mapnik/~palette_halo.mss")
        );
    }

    #[test]
    fn output_file_name() {
        let paths = ProjectPaths::new("/proj");
        assert_eq!(
            paths.output_file("dark", "label_halo"),
            PathBuf::from("/proj/mapnik/xml/dark_label_halo.xml")
        );
    }

    #[test]
    fn fragment_lookup() {
        let paths = ProjectPaths::new("/proj");
        assert_eq!(
            paths.fragment("base.mss"),
            PathBuf::from("/proj/mapnik/base.mss")
        );
    }
}
