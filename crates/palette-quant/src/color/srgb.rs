//! 8-bit sRGB color type
//!
//! A [`Color`] is what a palette stores and what a quantized raster
//! contains. Two colors are equal when their canonical `#RRGGBB` forms are
//! equal; alpha is a property of raster pixels, not of colors.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// An opaque color in 8-bit sRGB.
///
/// Parsing accepts exactly six hex digits with an optional leading `#`,
/// in any case, with surrounding whitespace ignored. Formatting always
/// produces the canonical upper-case `#RRGGBB` form.
///
/// # Example
///
/// ```
/// use palette_quant::Color;
///
/// let teal: Color = "  00a368 ".parse().unwrap();
/// assert_eq!(teal, Color::new(0x00, 0xA3, 0x68));
/// assert_eq!(teal.to_hex(), "#00A368");
///
/// // Shorthand is not a canonical color
/// assert!("#FFF".parse::<Color>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// `#000000`, the matcher's last-resort answer.
    pub const BLACK: Color = Color::new(0, 0, 0);

    /// `#FFFFFF`
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// Create a color from 8-bit channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Create a color from unbounded channel values.
    ///
    /// Each channel is rounded to the nearest integer (halves away from
    /// zero) and clamped to `0..=255`. Error accumulators can leave that
    /// range, so this is the only way fractional channels become a
    /// [`Color`]. NaN maps to 0.
    ///
    /// ```
    /// use palette_quant::Color;
    ///
    /// let c = Color::from_channels(-12.0, 127.5, 300.2);
    /// assert_eq!(c.to_bytes(), [0, 128, 255]);
    /// ```
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    /// Canonical upper-case `#RRGGBB` text.
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

#[inline]
fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// Format unbounded channel values as canonical `#RRGGBB`.
///
/// Shorthand for [`Color::from_channels`] followed by [`Color::to_hex`].
pub fn format_color(r: f64, g: f64, b: f64) -> String {
    Color::from_channels(r, g, b).to_hex()
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Color {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse `#RRGGBB` or `RRGGBB`, case-insensitive, whitespace trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        let len = s.chars().count();
        if len != 6 {
            return Err(ParseColorError::InvalidLength { len });
        }

        let mut nibbles = [0u8; 6];
        for (slot, ch) in nibbles.iter_mut().zip(s.chars()) {
            *slot = ch.to_digit(16).ok_or(ParseColorError::InvalidDigit(ch))? as u8;
        }

        Ok(Self::new(
            (nibbles[0] << 4) | nibbles[1],
            (nibbles[2] << 4) | nibbles[3],
            (nibbles[4] << 4) | nibbles[5],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that every canonical string survives parse then format.
    #[test]
    fn test_parse_format_round_trip() {
        for hex in ["#000000", "#FFFFFF", "#FF4500", "#00A368", "#6D482F"] {
            let color: Color = hex.parse().unwrap();
            assert_eq!(color.to_hex(), hex);
            assert_eq!(
                format_color(color.r as f64, color.g as f64, color.b as f64),
                hex
            );
        }
    }

    /// Test that input is canonicalized to upper case.
    #[test]
    fn test_parse_case_insensitive() {
        let lower: Color = "#ff99aa".parse().unwrap();
        let upper: Color = "#FF99AA".parse().unwrap();
        let mixed: Color = "Ff99Aa".parse().unwrap();

        assert_eq!(lower, upper);
        assert_eq!(lower, mixed);
        assert_eq!(lower.to_string(), "#FF99AA");
    }

    /// Test that the hash is optional and whitespace is trimmed.
    #[test]
    fn test_parse_prefix_and_whitespace() {
        let a: Color = "\t #123456 \n".parse().unwrap();
        let b: Color = "123456".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_bytes(), [0x12, 0x34, 0x56]);
    }

    /// Test rejection of shorthand and wrong lengths.
    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            "#FFF".parse::<Color>(),
            Err(ParseColorError::InvalidLength { len: 3 })
        );
        assert_eq!(
            "#FFFFFFF".parse::<Color>(),
            Err(ParseColorError::InvalidLength { len: 7 })
        );
        assert_eq!(
            "".parse::<Color>(),
            Err(ParseColorError::InvalidLength { len: 0 })
        );
        assert_eq!(
            "#".parse::<Color>(),
            Err(ParseColorError::InvalidLength { len: 0 })
        );
        // Only one leading hash is stripped
        assert_eq!(
            "##FFFFFF".parse::<Color>(),
            Err(ParseColorError::InvalidLength { len: 7 })
        );
    }

    /// Test rejection of non-hex characters.
    #[test]
    fn test_parse_rejects_bad_digits() {
        assert_eq!(
            "#GG0000".parse::<Color>(),
            Err(ParseColorError::InvalidDigit('G'))
        );
        assert_eq!(
            "+FFFFF".parse::<Color>(),
            Err(ParseColorError::InvalidDigit('+'))
        );
        // Multi-byte characters are counted as one character, not sliced
        assert_eq!(
            "#ÄBCDEF".parse::<Color>(),
            Err(ParseColorError::InvalidDigit('Ä'))
        );
    }

    /// Test channel clamping and rounding in `from_channels`.
    #[test]
    fn test_from_channels_clamps_and_rounds() {
        assert_eq!(Color::from_channels(-0.4, 0.5, 254.6).to_bytes(), [0, 1, 255]);
        assert_eq!(Color::from_channels(-300.0, 1e9, 42.49).to_bytes(), [0, 255, 42]);
        assert_eq!(Color::from_channels(f64::NAN, 10.0, 10.0).to_bytes(), [0, 10, 10]);
        assert_eq!(format_color(256.0, -1.0, 15.0), "#FF000F");
    }

    /// Test byte conversions.
    #[test]
    fn test_byte_conversions() {
        let c = Color::from([1, 2, 3]);
        assert_eq!(c, Color::new(1, 2, 3));
        assert_eq!(Color::from_bytes(c.to_bytes()), c);
        assert_eq!(Color::BLACK.to_hex(), "#000000");
        assert_eq!(Color::WHITE.to_hex(), "#FFFFFF");
    }

    #[test]
    fn test_from_channels_rounds_halves_up() {
        assert_eq!(Color::from_channels(0.5, 1.5, 2.5).to_bytes(), [1, 2, 3]);
        assert_eq!(Color::from_channels(254.5, 127.49, -0.5).to_bytes(), [255, 127, 0]);
        assert_eq!(format_color(10.5, 10.5, 10.5), "#0B0B0B");
    }
}
