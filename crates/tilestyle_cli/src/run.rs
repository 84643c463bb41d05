//! Build orchestration: one-shot builds and the watch loop.

use std::error::Error;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use tilestyle_build::{CartoCompiler, ThemeBuilder, VariantOutcome};
use tilestyle_project::{OutputVariant, ProjectPaths, SHARED_FRAGMENTS};
use tilestyle_watch::WatchSet;

use crate::Cli;

/// Fixed poll interval for watch mode.
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Runs the CLI: one build pass, then optionally the watch loop.
pub fn run(cli: &Cli) -> Result<i32, Box<dyn Error>> {
    let paths = match &cli.root {
        Some(root) => ProjectPaths::new(root),
        None => ProjectPaths::from_env()?,
    };
    let builder = ThemeBuilder::new(&paths, CartoCompiler::new(cli.carto.as_str()));
    builder.ensure_output_dir()?;

    build_all(&builder, &cli.themes, cli.smart, cli.quiet)?;

    if !cli.watch {
        return Ok(0);
    }

    let mut watch_set = WatchSet::new(watched_paths(&paths, &cli.themes))?;
    if !cli.quiet {
        eprintln!(
            "  Watching {} files ({}s interval)",
            watch_set.len(),
            POLL_INTERVAL.as_secs()
        );
    }
    loop {
        thread::sleep(POLL_INTERVAL);
        poll_and_rebuild(&mut watch_set, &mut |changed| {
            if !cli.quiet {
                for path in changed {
                    eprintln!("   Changed {}", path.display());
                }
            }
            build_all(&builder, &cli.themes, cli.smart, cli.quiet)
        })?;
    }
}

/// Builds every requested theme once.
fn build_all(
    builder: &ThemeBuilder<'_>,
    themes: &[String],
    smart: bool,
    quiet: bool,
) -> Result<(), Box<dyn Error>> {
    for theme in themes {
        if !quiet {
            let mode = if smart { " (smart)" } else { "" };
            eprintln!("  Building theme \"{theme}\"{mode}");
        }
        builder.prepare_palettes(theme)?;
        for variant in OutputVariant::for_mode(smart) {
            let outcome = builder.build_variant(theme, variant)?;
            if !quiet {
                print_outcome(&outcome);
            }
        }
    }
    Ok(())
}

/// Renders one variant's patch report.
fn print_outcome(outcome: &VariantOutcome) {
    eprintln!("  Compiled {}", outcome.output.display());
    let report = &outcome.report;
    for (style, count) in &report.deleted_rules {
        eprintln!("    deleted {count} rule(s) in style \"{style}\"");
    }
    for layer in &report.label_cache_cleared {
        eprintln!("    set clear-label-cache for layer \"{layer}\"");
    }
    for layer in &report.feature_cached {
        eprintln!("    enabled cache-features for layer \"{layer}\"");
    }
    for layer in &report.removed_layers {
        eprintln!("    removed empty layer \"{layer}\"");
    }
}

/// The files whose changes trigger a rebuild: the shared fragments, the base
/// manifest, and each requested theme's palette.
fn watched_paths(paths: &ProjectPaths, themes: &[String]) -> Vec<PathBuf> {
    let mut watched: Vec<PathBuf> = SHARED_FRAGMENTS
        .iter()
        .map(|fragment| paths.fragment(fragment))
        .collect();
    watched.push(paths.base_manifest());
    watched.extend(themes.iter().map(|theme| paths.theme_palette(theme)));
    watched
}

/// One watch cycle: poll the set, rebuild if anything changed.
///
/// Returns whether a rebuild ran.
fn poll_and_rebuild<F>(watch_set: &mut WatchSet, rebuild: &mut F) -> Result<bool, Box<dyn Error>>
where
    F: FnMut(&[PathBuf]) -> Result<(), Box<dyn Error>>,
{
    let changed = watch_set.poll()?;
    if changed.is_empty() {
        return Ok(false);
    }
    rebuild(&changed)?;
    Ok(true)
}
