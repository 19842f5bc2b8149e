//! Nearest-neighbor block upscaling.

use super::RenderError;
use crate::raster::{buffer_len, Raster};

/// Blow every pixel up to a `factor x factor` block.
///
/// Each output row is built once and then copied `factor - 1` times, so
/// the cost is one write per output byte.
///
/// # Errors
///
/// [`RenderError::ZeroScale`] for `factor == 0` and
/// [`RenderError::TooLarge`] when the output size overflows.
///
/// # Example
///
/// ```
/// use palette_quant::{upscale_nearest, Raster};
///
/// let raster = Raster::from_fn(2, 1, |x, _| [x as u8 * 255, 0, 0, 255]).unwrap();
/// let big = upscale_nearest(&raster, 3).unwrap();
///
/// assert_eq!(big.dimensions(), (6, 3));
/// assert_eq!(big.pixel(2, 2), [0, 0, 0, 255]);
/// assert_eq!(big.pixel(3, 0), [255, 0, 0, 255]);
/// ```
pub fn upscale_nearest(raster: &Raster, factor: u32) -> Result<Raster, RenderError> {
    if factor == 0 {
        return Err(RenderError::ZeroScale);
    }
    let (width, height) = raster.dimensions();
    let too_large = RenderError::TooLarge { width, height };
    let out_width = width.checked_mul(factor).ok_or(too_large.clone())?;
    let out_height = height.checked_mul(factor).ok_or(too_large.clone())?;
    let len = buffer_len(out_width, out_height).map_err(|_| too_large)?;

    let factor = factor as usize;
    let row_bytes = out_width as usize * 4;
    let mut data = Vec::with_capacity(len);
    let mut row = Vec::with_capacity(row_bytes);

    for src_row in raster.as_raw().chunks_exact(width.max(1) as usize * 4) {
        row.clear();
        for px in src_row.chunks_exact(4) {
            for _ in 0..factor {
                row.extend_from_slice(px);
            }
        }
        for _ in 0..factor {
            data.extend_from_slice(&row);
        }
    }

    Raster::new(out_width, out_height, data).map_err(|_| RenderError::TooLarge { width, height })
}
