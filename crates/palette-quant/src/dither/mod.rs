//! Error diffusion quantization.
//!
//! The quantizer rewrites a [`Raster`](crate::Raster) in place so that
//! every opaque pixel is a palette color, pushing each pixel's residual
//! onto neighbors that have not been visited yet.
//!
//! # Scan order
//!
//! Pixels are visited strictly row by row, left to right. A pixel's final
//! value depends on residuals from `(x-1, y)` and from the row above, and
//! each neighbor update is clamped and rounded to 8 bits immediately, so
//! any other order produces different output.
//!
//! # Example
//!
//! ```
//! use palette_quant::{quantize, Palette, Raster};
//!
//! let palette = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
//! let mut raster = Raster::filled(4, 4, [128, 128, 128, 255]).unwrap();
//!
//! let stats = quantize(&mut raster, &palette).unwrap();
//! assert_eq!(stats.opaque, 16);
//! assert!(raster.pixels().all(|px| px[3] == 255));
//! ```

mod floyd_steinberg;
mod kernel;
mod validate;

pub use floyd_steinberg::quantize;
pub use kernel::*;
pub use validate::{validate_palette, PaletteCheck};

use thiserror::Error;

use crate::color::Color;
use crate::matcher::find_closest;
use crate::palette::Palette;
use crate::raster::{Raster, ALPHA_THRESHOLD, TRANSPARENT_WHITE};

/// Precondition failures detected before any pixel is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantizeError {
    /// The raster has no pixels
    #[error("cannot quantize an empty {width}x{height} raster")]
    EmptyRaster {
        /// Raster width
        width: u32,
        /// Raster height
        height: u32,
    },
    /// The palette has no colors
    #[error("cannot quantize against an empty palette")]
    EmptyPalette,
}

/// Pixel counts from a quantization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuantizeStats {
    /// Pixels mapped to a palette color
    pub opaque: usize,
    /// Pixels normalized to transparent white
    pub transparent: usize,
}

/// Add a weighted residual to an 8-bit channel.
///
/// The sum is clamped to `0..=255` and rounded to the nearest integer,
/// ties to even.
#[inline]
fn accumulate(current: u8, delta: f64) -> u8 {
    (current as f64 + delta).clamp(0.0, 255.0).round_ties_even() as u8
}

/// Quantize `raster` in place against `palette`, spreading residuals with
/// `kernel`.
pub(crate) fn diffuse_in_place(
    raster: &mut Raster,
    palette: &Palette,
    kernel: &Kernel,
) -> Result<QuantizeStats, QuantizeError> {
    let (w, h) = raster.dimensions();
    if raster.is_empty() {
        return Err(QuantizeError::EmptyRaster {
            width: w,
            height: h,
        });
    }
    if palette.is_empty() {
        return Err(QuantizeError::EmptyPalette);
    }
    debug_assert!(kernel.is_forward(), "kernel must only point forward");

    let width = w as usize;
    let height = h as usize;
    let data = raster.as_raw_mut();
    let mut stats = QuantizeStats::default();

    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) * 4;

            // Background stays background and sheds no error
            if data[idx + 3] < ALPHA_THRESHOLD {
                data[idx..idx + 4].copy_from_slice(&TRANSPARENT_WHITE);
                stats.transparent += 1;
                continue;
            }

            let current = Color::new(data[idx], data[idx + 1], data[idx + 2]);
            let chosen = find_closest(current, palette);
            data[idx..idx + 4].copy_from_slice(&[chosen.r, chosen.g, chosen.b, 255]);
            stats.opaque += 1;

            let residual = [
                current.r as f64 - chosen.r as f64,
                current.g as f64 - chosen.g as f64,
                current.b as f64 - chosen.b as f64,
            ];
            if residual == [0.0; 3] {
                continue;
            }

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as isize + dx as isize;
                let ny = y + dy as usize;
                if nx < 0 || nx as usize >= width || ny >= height {
                    continue;
                }

                let n = (ny * width + nx as usize) * 4;
                if data[n + 3] < ALPHA_THRESHOLD {
                    continue;
                }

                let fraction = kernel.fraction(weight);
                for c in 0..3 {
                    data[n + c] = accumulate(data[n + c], residual[c] * fraction);
                }
            }
        }
    }

    Ok(stats)
}
