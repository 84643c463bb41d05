//! Output-variant composition: which palette and fragments go into each
//! compiled document.

/// The shared stylesheet fragments every theme builds on, in compile order.
pub const SHARED_FRAGMENTS: [&str; 4] = ["base.mss", "road.mss", "boundary.mss", "label.mss"];

/// Which palette file a variant compiles against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteChoice {
    /// The theme's own palette, unmodified.
    Theme,
    /// The scratch palette with halos forced off.
    HaloOff,
    /// The scratch palette with halos forced on.
    HaloOn,
}

impl PaletteChoice {
    /// The palette filename (relative to the fragment directory) for a theme.
    pub fn filename(self, theme: &str) -> String {
        match self {
            PaletteChoice::Theme => format!("palette.{theme}.mss"),
            PaletteChoice::HaloOff => "~palette.mss".to_string(),
            PaletteChoice::HaloOn => "~palette_halo.mss".to_string(),
        }
    }
}

/// One compiled output: a name suffix, a palette, and the fragments layered
/// on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputVariant {
    /// Suffix of the output filename (`<theme>_<suffix>.xml`).
    pub suffix: &'static str,
    /// Palette this variant compiles against.
    pub palette: PaletteChoice,
    /// Shared fragments layered on top of the palette, in compile order.
    pub fragments: &'static [&'static str],
}

/// Everything in one document, against the theme's own palette.
const ALL: [OutputVariant; 1] = [OutputVariant {
    suffix: "all",
    palette: PaletteChoice::Theme,
    fragments: &["base.mss", "road.mss", "boundary.mss", "label.mss"],
}];

/// Smart-halo mode: separate documents per render pass, with the label
/// document compiled once per halo setting.
const SMART: [OutputVariant; 4] = [
    OutputVariant {
        suffix: "base",
        palette: PaletteChoice::HaloOff,
        fragments: &["base.mss"],
    },
    OutputVariant {
        suffix: "road",
        palette: PaletteChoice::HaloOff,
        fragments: &["road.mss", "boundary.mss"],
    },
    OutputVariant {
        suffix: "label",
        palette: PaletteChoice::HaloOff,
        fragments: &["label.mss"],
    },
    OutputVariant {
        suffix: "label_halo",
        palette: PaletteChoice::HaloOn,
        fragments: &["label.mss"],
    },
];

impl OutputVariant {
    /// The variants to build for the given mode.
    pub fn for_mode(smart: bool) -> &'static [OutputVariant] {
        if smart {
            &SMART
        } else {
            &ALL
        }
    }

    /// The full stylesheet list for this variant: palette first, then the
    /// fragments.
    pub fn stylesheets(&self, theme: &str) -> Vec<String> {
        let mut list = Vec::with_capacity(self.fragments.len() + 1);
        list.push(self.palette.filename(theme));
        list.extend(self.fragments.iter().map(|f| f.to_string()));
        list
    }

}
