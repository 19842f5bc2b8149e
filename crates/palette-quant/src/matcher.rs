//! Nearest-color matching against a [`Palette`].
//!
//! Matching is a linear scan over the palette's precomputed Lab values.
//! Palettes hold tens of colors, so a spatial index would cost more than
//! it saves.
//!
//! # Tie-break
//!
//! The scan keeps the first entry with the smallest distance and only
//! replaces it on a strictly smaller one. When two palette colors are
//! exactly equidistant from the target, the one listed earlier wins.
//! Reordering a palette can therefore change results only where distances
//! tie exactly.

use crate::color::{Color, Lab};
use crate::palette::Palette;

/// Result of a nearest-color search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    /// Index of the chosen color in the palette
    pub index: usize,
    /// The chosen color
    pub color: Color,
    /// CIE76 distance from the target to `color`
    pub distance: f64,
}

/// Find the palette entry closest to `target`.
///
/// Returns `None` only for an empty palette.
pub fn nearest(target: Color, palette: &Palette) -> Option<Match> {
    nearest_lab(Lab::from(target), palette)
}

/// [`nearest`] for a target already converted to Lab.
pub fn nearest_lab(target: Lab, palette: &Palette) -> Option<Match> {
    let (index, distance) = first_minimum(palette.labs().iter().map(|&lab| target.distance(lab)))?;
    Some(Match {
        index,
        color: palette.colors()[index],
        distance,
    })
}

/// Index and value of the first smallest distance.
///
/// Only a strictly smaller value replaces the current best.
fn first_minimum(distances: impl Iterator<Item = f64>) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, distance) in distances.enumerate() {
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((index, distance)),
        }
    }
    best
}

/// Closest palette color to `target`.
///
/// Never fails: an empty palette yields [`Color::BLACK`].
///
/// # Example
///
/// ```
/// use palette_quant::{find_closest, Color, Palette};
///
/// let palette = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
/// assert_eq!(find_closest(Color::new(40, 40, 40), &palette), Color::BLACK);
/// assert_eq!(find_closest(Color::new(200, 210, 220), &palette), Color::WHITE);
/// ```
pub fn find_closest(target: Color, palette: &Palette) -> Color {
    nearest(target, palette).map_or(Color::BLACK, |m| m.color)
}

/// Closest palette color to a hex string.
///
/// Parsing is the validation boundary: if `target` does not parse, the
/// palette's first color is returned so one bad value cannot abort a
/// whole image. An empty palette yields [`Color::BLACK`].
pub fn find_closest_hex(target: &str, palette: &Palette) -> Color {
    match target.parse::<Color>() {
        Ok(color) => find_closest(color, palette),
        Err(error) => {
            tracing::debug!(target, %error, "Unparseable color, using first palette entry");
            palette.first().unwrap_or(Color::BLACK)
        }
    }
}
