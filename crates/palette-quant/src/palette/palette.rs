//! Palette struct with canonical storage and precomputed Lab values.
//!
//! A [`Palette`] is an ordered, de-duplicated set of [`Color`]s. Order is
//! meaningful: it breaks ties during matching and its first entry is the
//! fallback for unreadable input.

use std::collections::HashSet;

use super::error::{PaletteError, ParseColorError};
use crate::color::{Color, Lab};

/// The built-in fallback: black, white, red, green, blue.
pub const FALLBACK_COLORS: [Color; 5] = [
    Color::new(0x00, 0x00, 0x00),
    Color::new(0xFF, 0xFF, 0xFF),
    Color::new(0xFF, 0x00, 0x00),
    Color::new(0x00, 0xFF, 0x00),
    Color::new(0x00, 0x00, 0xFF),
];

/// An ordered set of unique colors with perceptual lookup data.
///
/// # Precomputation
///
/// Lab values are computed once at construction, so per-pixel matching
/// only converts the pixel being matched.
///
/// # Example
///
/// ```
/// use palette_quant::{Color, Palette};
///
/// let palette = Palette::new(&[Color::BLACK, Color::WHITE, Color::BLACK]).unwrap();
///
/// // Duplicates collapse onto their first occurrence
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.first(), Some(Color::BLACK));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
    labs: Vec<Lab>,
}

/// An input entry that [`Palette::build`] dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedColor {
    /// Position in the raw input list
    pub index: usize,
    /// The entry as supplied
    pub input: String,
    /// Why it did not parse
    pub error: ParseColorError,
}

/// Outcome of lenient palette construction.
#[derive(Debug, Clone)]
pub struct PaletteBuild {
    /// The usable palette, never empty
    pub palette: Palette,
    /// Entries that failed validation, in input order
    pub rejected: Vec<RejectedColor>,
    /// True when no entry survived and [`FALLBACK_COLORS`] was substituted
    pub used_fallback: bool,
}

impl Palette {
    /// Create a palette from colors, dropping repeats.
    ///
    /// The first occurrence of each color keeps its position.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: &[Color]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }

        let mut seen = HashSet::with_capacity(colors.len());
        let colors: Vec<Color> = colors.iter().copied().filter(|c| seen.insert(*c)).collect();
        let labs = colors.iter().map(|&c| Lab::from(c)).collect();

        Ok(Self { colors, labs })
    }

    /// Create a palette from hex strings, failing on the first bad entry.
    ///
    /// Use this for trusted input such as presets. User input goes
    /// through [`Palette::build`], which recovers instead.
    ///
    /// # Example
    ///
    /// ```
    /// use palette_quant::Palette;
    ///
    /// let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
    /// assert_eq!(palette.len(), 2);
    ///
    /// assert!(Palette::from_hex(&["#000000", "#FFF"]).is_err());
    /// ```
    pub fn from_hex(hex: &[&str]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .enumerate()
            .map(|(index, s)| {
                s.parse::<Color>()
                    .map_err(|source| PaletteError::InvalidColor {
                        index,
                        input: (*s).to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&colors)
    }

    /// Build a palette from untrusted input. Never fails.
    ///
    /// Entries that do not parse are dropped and reported. If nothing
    /// usable remains, the built-in [`FALLBACK_COLORS`] are used.
    ///
    /// # Example
    ///
    /// ```
    /// use palette_quant::Palette;
    ///
    /// let build = Palette::build(&["#ff0000", "oops", "#FF0000", "#00ff00"]);
    /// assert_eq!(build.palette.len(), 2);
    /// assert_eq!(build.rejected.len(), 1);
    /// assert_eq!(build.rejected[0].index, 1);
    /// assert!(!build.used_fallback);
    ///
    /// let empty = Palette::build::<&str>(&[]);
    /// assert!(empty.used_fallback);
    /// assert_eq!(empty.palette.len(), 5);
    /// ```
    pub fn build<S: AsRef<str>>(raw: &[S]) -> PaletteBuild {
        let mut colors = Vec::with_capacity(raw.len());
        let mut rejected = Vec::new();

        for (index, entry) in raw.iter().enumerate() {
            let input = entry.as_ref();
            match input.parse::<Color>() {
                Ok(color) => colors.push(color),
                Err(error) => {
                    tracing::warn!(index, input, %error, "Dropping invalid palette color");
                    rejected.push(RejectedColor {
                        index,
                        input: input.to_string(),
                        error,
                    });
                }
            }
        }

        match Self::new(&colors) {
            Ok(palette) => PaletteBuild {
                palette,
                rejected,
                used_fallback: false,
            },
            Err(_) => {
                tracing::warn!(
                    supplied = raw.len(),
                    "No usable palette colors, using built-in fallback"
                );
                PaletteBuild {
                    palette: Self::fallback(),
                    rejected,
                    used_fallback: true,
                }
            }
        }
    }

    /// The built-in 5-color palette.
    pub fn fallback() -> Self {
        let labs = FALLBACK_COLORS.iter().map(|&c| Lab::from(c)).collect();
        Self {
            colors: FALLBACK_COLORS.to_vec(),
            labs,
        }
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the palette has no colors.
    ///
    /// Public constructors never produce an empty palette.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All colors in insertion order.
    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color at `idx`, if any.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<Color> {
        self.colors.get(idx).copied()
    }

    /// The highest-priority color.
    #[inline]
    pub fn first(&self) -> Option<Color> {
        self.colors.first().copied()
    }

    /// Precomputed Lab value for the color at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn lab(&self, idx: usize) -> Lab {
        self.labs[idx]
    }

    /// Precomputed Lab values, aligned with [`colors`](Self::colors).
    #[inline]
    pub fn labs(&self) -> &[Lab] {
        &self.labs
    }

    /// Iterate over `(color, lab)` pairs in palette order.
    pub fn entries(&self) -> impl Iterator<Item = (Color, Lab)> + '_ {
        self.colors.iter().copied().zip(self.labs.iter().copied())
    }

    /// Exact membership test.
    #[inline]
    pub fn contains(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// Membership test for a hex string, after canonicalization.
    ///
    /// Unparseable input is never a member.
    pub fn contains_hex(&self, hex: &str) -> bool {
        hex.parse::<Color>().is_ok_and(|c| self.contains(c))
    }

    /// Canonical `#RRGGBB` strings in palette order.
    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }

    #[cfg(test)]
    pub(crate) fn empty_for_tests() -> Self {
        Self {
            colors: Vec::new(),
            labs: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Construction tests

    #[test]
    fn test_palette_basic_construction() {
        let palette = Palette::new(&[Color::BLACK, Color::WHITE]).unwrap();
        assert_eq!(palette.len(), 2);
        assert!(!palette.is_empty());
        assert_eq!(palette.get(0), Some(Color::BLACK));
        assert_eq!(palette.get(1), Some(Color::WHITE));
        assert_eq!(palette.get(2), None);
    }

    #[test]
    fn test_palette_empty_error() {
        assert_eq!(Palette::new(&[]), Err(PaletteError::EmptyPalette));
        assert_eq!(Palette::from_hex(&[]), Err(PaletteError::EmptyPalette));
    }

    #[test]
    fn test_palette_dedup_keeps_first_position() {
        let red = Color::new(255, 0, 0);
        let blue = Color::new(0, 0, 255);
        let palette = Palette::new(&[red, blue, red, Color::BLACK, blue]).unwrap();

        assert_eq!(palette.colors(), &[red, blue, Color::BLACK]);
    }

    #[test]
    fn test_palette_dedup_is_case_insensitive() {
        let palette = Palette::from_hex(&["#ff4500", "#FF4500", "ff4500"]).unwrap();
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.to_hex(), vec!["#FF4500".to_string()]);
    }

    #[test]
    fn test_from_hex_reports_first_bad_entry() {
        let err = Palette::from_hex(&["#000000", "#GGGGGG", "#12"]).unwrap_err();
        assert_eq!(
            err,
            PaletteError::InvalidColor {
                index: 1,
                input: "#GGGGGG".to_string(),
                source: ParseColorError::InvalidDigit('G'),
            }
        );
    }

    #[test]
    fn test_labs_align_with_colors() {
        let palette = Palette::from_hex(&["#FF0000", "#00FF00", "#FF0000", "#0000FF"]).unwrap();
        for (i, (color, lab)) in palette.entries().enumerate() {
            assert_eq!(palette.get(i), Some(color));
            assert_eq!(lab, Lab::from(color));
            assert_eq!(palette.lab(i), lab);
        }
    }

    // Lenient build tests

    #[test]
    fn test_build_drops_and_reports_invalid() {
        let build = Palette::build(&["#000000", "", "white", "#abcdef", "#FFF"]);

        assert!(!build.used_fallback);
        assert_eq!(build.palette.to_hex(), vec!["#000000", "#ABCDEF"]);
        let indices: Vec<usize> = build.rejected.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 4]);
        assert_eq!(build.rejected[2].input, "#FFF");
        assert_eq!(
            build.rejected[2].error,
            ParseColorError::InvalidLength { len: 3 }
        );
    }

    #[test]
    fn test_build_all_invalid_uses_fallback() {
        let build = Palette::build(&["nope", "#12345"]);
        assert!(build.used_fallback);
        assert_eq!(build.rejected.len(), 2);
        assert_eq!(build.palette, Palette::fallback());
    }

    #[test]
    fn test_build_accepts_owned_strings() {
        let raw = vec![String::from("#00CC78"), String::from("#7EED56")];
        let build = Palette::build(&raw);
        assert_eq!(build.palette.len(), 2);
        assert!(build.rejected.is_empty());
    }

    #[test]
    fn test_fallback_colors() {
        let palette = Palette::fallback();
        assert_eq!(
            palette.to_hex(),
            vec!["#000000", "#FFFFFF", "#FF0000", "#00FF00", "#0000FF"]
        );
    }

    // Membership tests

    #[test]
    fn test_contains() {
        let palette = Palette::from_hex(&["#811E9F", "#B44AC0"]).unwrap();
        assert!(palette.contains(Color::new(0x81, 0x1E, 0x9F)));
        assert!(!palette.contains(Color::new(0x81, 0x1E, 0xA0)));
        assert!(palette.contains_hex("#b44ac0"));
        assert!(palette.contains_hex(" B44AC0 "));
        assert!(!palette.contains_hex("#B4A"));
        assert!(!palette.contains_hex("#FFFFFF"));
    }
}
