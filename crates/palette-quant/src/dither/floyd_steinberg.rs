//! Floyd-Steinberg error diffusion quantization.

use crate::palette::Palette;
use crate::raster::Raster;

use super::{diffuse_in_place, QuantizeError, QuantizeStats, FLOYD_STEINBERG};

/// Quantize `raster` in place to `palette` with Floyd-Steinberg diffusion.
///
/// For each pixel in row-major order:
///
/// 1. If alpha is below 128 it becomes `(255, 255, 255, 0)` and diffuses
///    nothing.
/// 2. Otherwise it becomes the closest palette color at full opacity, and
///    the residual `current - chosen` is added to the right (7/16),
///    bottom-left (3/16), bottom (5/16) and bottom-right (1/16) neighbors.
///    Neighbors outside the raster or with alpha below 128 receive nothing.
///
/// The raster is borrowed exclusively for the whole pass.
///
/// # Errors
///
/// [`QuantizeError::EmptyRaster`] and [`QuantizeError::EmptyPalette`] are
/// reported before any pixel is modified. Individual pixels never fail.
pub fn quantize(raster: &mut Raster, palette: &Palette) -> Result<QuantizeStats, QuantizeError> {
    let stats = diffuse_in_place(raster, palette, &FLOYD_STEINBERG)?;
    tracing::debug!(
        width = raster.width(),
        height = raster.height(),
        colors = palette.len(),
        opaque = stats.opaque,
        transparent = stats.transparent,
        "Quantized raster"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::raster::TRANSPARENT_WHITE;

    fn create_test_palette() -> Palette {
        Palette::new(&[Color::BLACK, Color::WHITE]).unwrap()
    }

    fn grey(v: u8) -> [u8; 4] {
        [v, v, v, 255]
    }

    #[test]
    fn test_floyd_steinberg_two_by_two_reference() {
        let palette = create_test_palette();
        let mut raster = Raster::new(
            2,
            2,
            [grey(10), grey(245), grey(128), [0, 0, 0, 0]].concat(),
        )
        .unwrap();

        quantize(&mut raster, &palette).unwrap();

        // (0,0): 10 -> black, residual +10
        //   (1,0) 245 + 70/16 = 249.375 -> 249
        //   (0,1) 128 + 50/16 = 131.125 -> 131
        // (1,0): 249 -> white, residual -6
        //   (0,1) 131 - 18/16 = 129.875 -> 130
        // (0,1): 130 (L* ~54) -> white
        assert_eq!(raster.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(raster.pixel(1, 0), [255, 255, 255, 255]);
        assert_eq!(raster.pixel(0, 1), [255, 255, 255, 255]);
        assert_eq!(raster.pixel(1, 1), TRANSPARENT_WHITE);
    }

    #[test]
    fn test_floyd_steinberg_mid_grey_mixes() {
        let palette = create_test_palette();
        let mut raster = Raster::filled(8, 8, grey(128)).unwrap();

        quantize(&mut raster, &palette).unwrap();

        let white = raster.pixels().filter(|px| px[0] == 255).count();
        let black = raster.pixels().filter(|px| px[0] == 0).count();
        assert_eq!(white + black, 64);
        assert!(white > 0 && black > 0, "mid grey should dither to a mix");
    }

    #[test]
    fn test_floyd_steinberg_preserves_average_tone() {
        // Residuals are 8-bit sRGB, so the white ratio tracks the sRGB value
        let palette = create_test_palette();
        let size = 32u32;
        let mut raster = Raster::filled(size, size, grey(64)).unwrap();

        quantize(&mut raster, &palette).unwrap();

        let white = raster.pixels().filter(|px| px[0] == 255).count();
        let ratio = white as f64 / (size * size) as f64;
        assert!(
            (ratio - 64.0 / 255.0).abs() < 0.08,
            "expected ~{:.3} white, got {ratio:.3}",
            64.0 / 255.0
        );
    }

    #[test]
    fn test_floyd_steinberg_exact_colors_untouched() {
        let palette = create_test_palette();
        let mut raster =
            Raster::from_fn(5, 3, |x, y| if (x + y) % 2 == 0 { grey(0) } else { grey(255) })
                .unwrap();
        let before = raster.clone();

        quantize(&mut raster, &palette).unwrap();
        assert_eq!(raster, before);
    }

    #[test]
    fn test_transparent_neighbors_receive_no_error() {
        let palette = create_test_palette();
        // Opaque dark pixel followed by a transparent mid grey
        let mut raster = Raster::new(2, 1, [grey(100), [128, 128, 128, 127]].concat()).unwrap();

        let stats = quantize(&mut raster, &palette).unwrap();

        assert_eq!(stats.opaque, 1);
        assert_eq!(stats.transparent, 1);
        assert_eq!(raster.pixel(1, 0), TRANSPARENT_WHITE);
    }

    #[test]
    fn test_alpha_128_is_opaque() {
        let palette = create_test_palette();
        let mut raster = Raster::filled(1, 1, [250, 250, 250, 128]).unwrap();

        quantize(&mut raster, &palette).unwrap();
        assert_eq!(raster.pixel(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_error_does_not_wrap_rows() {
        // The right-hand neighbor of the last column is off the raster, not
        // the first pixel of the next row.
        let palette = create_test_palette();
        let mut raster = Raster::new(
            2,
            2,
            [grey(0), grey(110), grey(80), grey(0)].concat(),
        )
        .unwrap();

        quantize(&mut raster, &palette).unwrap();

        // 110 -> black with residual +110. (0,1) gets only the 3/16 share:
        // 80 + 20.625 -> 101 -> black. Wrapping would add the 7/16 share
        // too and push it past mid grey to white.
        assert_eq!(raster.pixel(0, 1), [0, 0, 0, 255]);
    }

    #[test]
    fn test_chromatic_palette_output_in_palette() {
        let palette = Palette::fallback();
        let mut raster = Raster::from_fn(16, 16, |x, y| {
            [(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8, 255]
        })
        .unwrap();

        quantize(&mut raster, &palette).unwrap();

        for px in raster.pixels() {
            assert!(palette.contains(Color::new(px[0], px[1], px[2])));
            assert_eq!(px[3], 255);
        }
    }
}
