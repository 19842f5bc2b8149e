//! Built-in color sets and palette selection.
//!
//! The free set is always available. The locked set holds extra colors
//! that a front end may unlock one by one. Both lists are kept exactly as
//! shipped, repeats included; [`Palette`] construction removes the repeats.

use std::fmt;
use std::str::FromStr;

use super::error::PaletteError;
use super::palette::{Palette, PaletteBuild};

/// The always-available colors.
pub const FREE_COLORS: [&str; 26] = [
    "#000000", "#898D90", "#D4D7D9", "#FFFFFF", "#6D001A", "#BE0039", "#FF4500", "#FFA800",
    "#FFD635", "#00A368", "#00CC78", "#7EED56", "#00756F", "#009EAA", "#2450A4", "#3690EA",
    "#51E9F4", "#493AC1", "#6A5CFF", "#811E9F", "#B44AC0", "#FF3881", "#FF99AA", "#6D482F",
    "#9C6926", "#000000",
];

/// Colors that must be unlocked before use.
pub const LOCKED_COLORS: [&str; 32] = [
    "#515252", "#94B3FF", "#004CFF", "#0E4B99", "#2E69FF", "#83B3FF", "#4E76A8", "#9E0059",
    "#DE107F", "#FF8FA3", "#FFDBF0", "#FD4659", "#DE107F", "#FFB0FF", "#FF8FA3", "#C48242",
    "#A06A42", "#81C784", "#388E3C", "#1B5E20", "#FFC947", "#FFEB3B", "#F57C00", "#E65100",
    "#8E24AA", "#3F51B5", "#2196F3", "#00BCD4", "#009688", "#4CAF50", "#8BC34A", "#CDDC39",
];

/// A named built-in color set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PalettePreset {
    /// [`FREE_COLORS`]
    #[default]
    Free,
    /// [`LOCKED_COLORS`]
    Locked,
}

impl PalettePreset {
    /// The preset's entries exactly as shipped.
    pub fn hex(self) -> &'static [&'static str] {
        match self {
            PalettePreset::Free => &FREE_COLORS,
            PalettePreset::Locked => &LOCKED_COLORS,
        }
    }

    /// The preset as a de-duplicated palette.
    pub fn palette(self) -> Palette {
        // Preset tables are non-empty and valid; the fallback is unreachable
        Palette::from_hex(self.hex()).unwrap_or_else(|_| Palette::fallback())
    }
}

impl fmt::Display for PalettePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PalettePreset::Free => f.write_str("free"),
            PalettePreset::Locked => f.write_str("locked"),
        }
    }
}

/// Error for an unknown preset name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown palette preset {0:?} (expected \"free\" or \"locked\")")]
pub struct UnknownPreset(pub String);

impl FromStr for PalettePreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(PalettePreset::Free),
            "locked" => Ok(PalettePreset::Locked),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

/// Which colors a conversion request may use.
///
/// # Example
///
/// ```
/// use palette_quant::{ColorSelection, PalettePreset};
///
/// // An empty custom selection falls back to the free preset
/// let build = ColorSelection::Custom(vec![]).resolve();
/// assert_eq!(build.palette, PalettePreset::Free.palette());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColorSelection {
    /// The free preset only
    #[default]
    Free,
    /// Exactly the given colors; the free preset when the list is empty
    Custom(Vec<String>),
    /// The free preset followed by unlocked colors, if enabled
    Unlocked {
        /// Whether unlocked colors take part at all
        include_locked: bool,
        /// Colors the user has unlocked
        selected: Vec<String>,
    },
}

impl ColorSelection {
    /// Raw entries for this selection, before validation.
    pub fn raw_colors(&self) -> Vec<String> {
        let free = || FREE_COLORS.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        match self {
            ColorSelection::Free => free(),
            ColorSelection::Custom(colors) if colors.is_empty() => free(),
            ColorSelection::Custom(colors) => colors.clone(),
            ColorSelection::Unlocked {
                include_locked,
                selected,
            } => {
                let mut colors = free();
                if *include_locked {
                    colors.extend(selected.iter().cloned());
                }
                colors
            }
        }
    }

    /// Validate the selection into a usable palette.
    ///
    /// Invalid entries are dropped and reported; see [`Palette::build`].
    pub fn resolve(&self) -> PaletteBuild {
        Palette::build(&self.raw_colors())
    }

    /// Validate strictly, failing on the first bad entry.
    pub fn resolve_strict(&self) -> Result<Palette, PaletteError> {
        let raw = self.raw_colors();
        let refs: Vec<&str> = raw.iter().map(String::as_str).collect();
        Palette::from_hex(&refs)
    }
}
