//! Per-theme build orchestration.

use std::path::{Path, PathBuf};

use tilestyle_patch::{PatchReport, Patcher};
use tilestyle_project::{
    rewrite_halo, HaloMode, OutputVariant, ProjectPaths, ThemeManifest,
};

use crate::compiler::CartoCompiler;
use crate::error::BuildError;

/// The result of compiling and patching one output variant.
#[derive(Debug)]
pub struct VariantOutcome {
    /// The theme that was built.
    pub theme: String,
    /// The variant suffix (`all`, `base`, `road`, `label`, `label_halo`).
    pub suffix: &'static str,
    /// The compiled-and-patched output file.
    pub output: PathBuf,
    /// What the patcher changed.
    pub report: PatchReport,
}

/// Drives manifest-write → compile → patch for each of a theme's output
/// variants.
#[derive(Debug)]
pub struct ThemeBuilder<'a> {
    paths: &'a ProjectPaths,
    compiler: CartoCompiler,
    patcher: Patcher,
}

impl<'a> ThemeBuilder<'a> {
    /// Creates a builder for the given project layout and compiler.
    pub fn new(paths: &'a ProjectPaths, compiler: CartoCompiler) -> Self {
        let patcher = Patcher::new(paths.mapnik_dir(), paths.font_dir());
        Self {
            paths,
            compiler,
            patcher,
        }
    }

    /// Creates the compiled-output directory if it does not exist yet.
    pub fn ensure_output_dir(&self) -> Result<(), BuildError> {
        let dir = self.paths.output_dir();
        std::fs::create_dir_all(&dir).map_err(|e| BuildError::Io {
            path: dir,
            source: e,
        })
    }

    /// Derives the halo-off and halo-on scratch palettes from the theme's
    /// palette fragment.
    pub fn prepare_palettes(&self, theme: &str) -> Result<(), BuildError> {
        let palette_path = self.paths.theme_palette(theme);
        let palette = read(&palette_path)?;
        write(&self.paths.scratch_palette(), &rewrite_halo(&palette, HaloMode::Off))?;
        write(
            &self.paths.scratch_palette_halo(),
            &rewrite_halo(&palette, HaloMode::On),
        )?;
        Ok(())
    }

    /// Builds one output variant: re-reads the base manifest, swaps in the
    /// variant's stylesheet list, writes the scratch manifest, compiles it,
    /// and patches the result.
    pub fn build_variant(
        &self,
        theme: &str,
        variant: &OutputVariant,
    ) -> Result<VariantOutcome, BuildError> {
        let mut manifest = ThemeManifest::load(&self.paths.base_manifest())?;
        let stylesheets = variant.stylesheets(theme);
        let refs: Vec<&str> = stylesheets.iter().map(String::as_str).collect();
        manifest.set_stylesheets(&refs);

        let scratch = self.paths.scratch_manifest();
        manifest.write(&scratch)?;

        let output = self.paths.output_file(theme, variant.suffix);
        self.compiler.compile(&scratch, &output)?;
        let report = self.patcher.patch_file(&output)?;

        Ok(VariantOutcome {
            theme: theme.to_string(),
            suffix: variant.suffix,
            output,
            report,
        })
    }

    /// Builds every variant of a theme for the given mode.
    ///
    /// Stops at the first failing variant; earlier outputs stay on disk.
    pub fn build_theme(
        &self,
        theme: &str,
        smart: bool,
    ) -> Result<Vec<VariantOutcome>, BuildError> {
        self.prepare_palettes(theme)?;
        OutputVariant::for_mode(smart)
            .iter()
            .map(|variant| self.build_variant(theme, variant))
            .collect()
    }
}

fn read(path: &Path) -> Result<String, BuildError> {
    std::fs::read_to_string(path).map_err(|e| BuildError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write(path: &Path, content: &str) -> Result<(), BuildError> {
    std::fs::write(path, content).map_err(|e| BuildError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
