//! Post-hoc palette membership check.
//!
//! Quantization already guarantees that every opaque pixel is a palette
//! color. This check exists to report it, and to catch regressions.

use std::collections::HashSet;

use crate::color::Color;
use crate::palette::Palette;
use crate::raster::{is_transparent, Raster};

/// Summary of which colors a raster contains relative to a palette.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaletteCheck {
    /// Opaque pixels inspected
    pub checked: usize,
    /// Opaque pixels whose color is not in the palette
    pub off_palette: usize,
    /// Distinct opaque colors, in first-seen order
    pub found: Vec<Color>,
    /// Distinct colors not in the palette, in first-seen order
    pub unexpected: Vec<Color>,
}

impl PaletteCheck {
    /// Returns true if every opaque pixel is a palette color.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.off_palette == 0
    }
}

/// Check every opaque pixel of `raster` against `palette`.
///
/// Transparent pixels are skipped.
pub fn validate_palette(raster: &Raster, palette: &Palette) -> PaletteCheck {
    let mut check = PaletteCheck::default();
    let mut seen = HashSet::new();
    let mut seen_unexpected = HashSet::new();

    for px in raster.pixels().filter(|&px| !is_transparent(px)) {
        let color = Color::new(px[0], px[1], px[2]);
        check.checked += 1;

        if seen.insert(color) {
            check.found.push(color);
        }
        if !palette.contains(color) {
            check.off_palette += 1;
            if seen_unexpected.insert(color) {
                check.unexpected.push(color);
            }
        }
    }

    if check.is_clean() {
        tracing::debug!(
            checked = check.checked,
            distinct = check.found.len(),
            "All pixels within palette"
        );
    } else {
        tracing::warn!(
            off_palette = check.off_palette,
            distinct = check.unexpected.len(),
            "Raster contains colors outside the palette"
        );
    }

    check
}
