//! Gamma lookup table access
//!
//! The table is generated at compile time by build.rs from the exact
//! IEC 61966-2-1 curve. Channels are 8-bit, so every input has an exact
//! entry and no interpolation is involved.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Convert an 8-bit sRGB channel to linear light in `0.0..=1.0`.
#[inline]
pub fn srgb_to_linear(channel: u8) -> f64 {
    SRGB_TO_LINEAR[channel as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(channel: u8) -> f64 {
        let v = channel as f64 / 255.0;
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    }

    /// Test that every table entry equals the formula bit for bit.
    #[test]
    fn test_lut_matches_formula_exactly() {
        for c in 0..=255u8 {
            assert_eq!(
                srgb_to_linear(c).to_bits(),
                exact(c).to_bits(),
                "table entry {c} differs from the formula"
            );
        }
    }

    /// Test endpoints and the linear segment.
    #[test]
    fn test_lut_endpoints() {
        assert_eq!(srgb_to_linear(0), 0.0);
        assert_eq!(srgb_to_linear(255), 1.0);
        // 10/255 = 0.0392 is below the 0.04045 threshold
        assert!((srgb_to_linear(10) - 10.0 / 255.0 / 12.92).abs() < 1e-15);
    }

    /// Test monotonicity across the whole range.
    #[test]
    fn test_lut_monotonic() {
        for c in 1..=255u8 {
            assert!(srgb_to_linear(c) > srgb_to_linear(c - 1));
        }
    }
}
