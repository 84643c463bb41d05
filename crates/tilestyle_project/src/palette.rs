//! Halo rewriting of palette fragments.
//!
//! Smart-halo rendering compiles the label stylesheet twice: once with the
//! palette's halo variables forced to `0` and once forced to `1`. The
//! palette is plain CartoCSS text; the rewrite is a textual substitution of
//! the `@smart-halo` and `@default-halo` variable assignments.

use regex::Regex;

/// Whether halo variables are forced off (`0`) or on (`1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaloMode {
    /// Force `@smart-halo` and `@default-halo` to `0`.
    Off,
    /// Force `@smart-halo` and `@default-halo` to `1`.
    On,
}

impl HaloMode {
    fn value(self) -> &'static str {
        match self {
            HaloMode::Off => "0",
            HaloMode::On => "1",
        }
    }
}

/// Returns the palette text with both halo variables forced to the mode's
/// value.
///
/// Only integer assignments are rewritten (`@smart-halo: 12`); anything else
/// on the line is left alone. A palette without halo variables passes
/// through unchanged.
pub fn rewrite_halo(palette: &str, mode: HaloMode) -> String {
    let smart = Regex::new(r"@smart-halo:\s*\d+").expect("halo pattern is valid");
    let default = Regex::new(r"@default-halo:\s*\d+").expect("halo pattern is valid");

    let out = smart.replace_all(palette, format!("@smart-halo: {}", mode.value()));
    default
        .replace_all(&out, format!("@default-halo: {}", mode.value()))
        .into_owned()
}
