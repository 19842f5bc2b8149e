//! CIE L\*a\*b\* conversion and CIE76 color difference.
//!
//! The chain is sRGB -> linear RGB -> XYZ (D65, scaled to 0..100) -> Lab.
//! Constants follow the common published form of the transform so that
//! distances agree with other implementations to the last digit: the
//! inverse-gamma threshold is 0.04045 (see build.rs) and the cube-root
//! threshold is 0.008856 with a `7.787 t + 16/116` linear segment.

use super::lut::srgb_to_linear;
use super::srgb::Color;

/// D65 reference white, X component (XYZ scaled to 0..100).
pub const WHITE_X: f64 = 95.047;
/// D65 reference white, Y component.
pub const WHITE_Y: f64 = 100.000;
/// D65 reference white, Z component.
pub const WHITE_Z: f64 = 108.883;

const CUBE_ROOT_THRESHOLD: f64 = 0.008856;
const LINEAR_SLOPE: f64 = 7.787;
const LINEAR_OFFSET: f64 = 16.0 / 116.0;

/// A color in CIE L\*a\*b\* space (D65 white point).
///
/// `Lab` is derived from a [`Color`] for distance computation only; it
/// is never written back into a raster.
///
/// # Example
///
/// ```
/// use palette_quant::{Color, Lab};
///
/// let white = Lab::from(Color::WHITE);
/// assert!((white.l - 100.0).abs() < 0.01);
///
/// let black = Lab::from(Color::BLACK);
/// assert!(black.l.abs() < 1e-9);
/// assert!((white.distance(black) - 100.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness, 0 (black) to 100 (white)
    pub l: f64,
    /// Green (negative) to red (positive)
    pub a: f64,
    /// Blue (negative) to yellow (positive)
    pub b: f64,
}

impl Lab {
    /// Create a Lab triple from components.
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// CIE76 color difference: Euclidean distance in Lab.
    #[inline]
    pub fn distance(self, other: Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

#[inline]
fn pivot(t: f64) -> f64 {
    if t > CUBE_ROOT_THRESHOLD {
        t.powf(1.0 / 3.0)
    } else {
        LINEAR_SLOPE * t + LINEAR_OFFSET
    }
}

impl From<Color> for Lab {
    fn from(color: Color) -> Self {
        let r = srgb_to_linear(color.r) * 100.0;
        let g = srgb_to_linear(color.g) * 100.0;
        let b = srgb_to_linear(color.b) * 100.0;

        let x = r * 0.4124564 + g * 0.3575761 + b * 0.1804375;
        let y = r * 0.2126729 + g * 0.7151522 + b * 0.0721750;
        let z = r * 0.0193339 + g * 0.1191920 + b * 0.9503041;

        let fx = pivot(x / WHITE_X);
        let fy = pivot(y / WHITE_Y);
        let fz = pivot(z / WHITE_Z);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

/// CIE76 distance between two colors.
///
/// ```
/// use palette_quant::{delta_e, Color};
///
/// let c = Color::new(12, 200, 99);
/// assert_eq!(delta_e(c, c), 0.0);
/// ```
pub fn delta_e(a: Color, b: Color) -> f64 {
    Lab::from(a).distance(Lab::from(b))
}

/// CIE76 distance between two hex strings.
///
/// Returns `f64::INFINITY` when either side does not parse, so an invalid
/// color always sorts last in a nearest-neighbor search.
pub fn distance_hex(a: &str, b: &str) -> f64 {
    match (a.parse::<Color>(), b.parse::<Color>()) {
        (Ok(a), Ok(b)) => delta_e(a, b),
        _ => f64::INFINITY,
    }
}
