//! Display, standard and high-resolution renders.

use super::grid::{draw_grid, GridStyle};
use super::upscale::upscale_nearest;
use super::RenderError;
use crate::raster::Raster;

/// Longest side, in output pixels, the display render aims for.
pub const DISPLAY_TARGET: u32 = 400;
/// Smallest display block size.
pub const MIN_BLOCK: u32 = 12;
/// Largest display block size.
pub const MAX_BLOCK: u32 = 25;
/// Scale factor of the high-resolution export.
pub const DEFAULT_EXPORT_SCALE: u32 = 100;

/// Block size for the on-screen render of a `width x height` raster.
///
/// `floor(400 / max(width, height))`, clamped to `12..=25`.
///
/// ```
/// use palette_quant::display_pixel_size;
///
/// assert_eq!(display_pixel_size(32, 24), 12);
/// assert_eq!(display_pixel_size(16, 16), 25);
/// assert_eq!(display_pixel_size(20, 10), 20);
/// ```
pub fn display_pixel_size(width: u32, height: u32) -> u32 {
    DISPLAY_TARGET
        .checked_div(width.max(height))
        .unwrap_or(MAX_BLOCK)
        .clamp(MIN_BLOCK, MAX_BLOCK)
}

/// An upscaled raster ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRender {
    /// The upscaled image
    pub raster: Raster,
    /// Side of one logical pixel in output pixels
    pub block_size: u32,
    /// Whether the grid was drawn
    pub grid: bool,
}

/// Upscale `raster` for display, with an optional grid.
pub fn render_display(raster: &Raster, with_grid: bool) -> Result<DisplayRender, RenderError> {
    let (cols, rows) = raster.dimensions();
    let block_size = display_pixel_size(cols, rows);
    let mut output = upscale_nearest(raster, block_size)?;

    if with_grid {
        draw_grid(&mut output, cols, rows, block_size, &GridStyle::display(block_size))?;
    }

    Ok(DisplayRender {
        raster: output,
        block_size,
        grid: with_grid,
    })
}

/// Re-render the quantized raster at `factor`x for export.
///
/// Every logical pixel becomes a crisp `factor x factor` block. With
/// `with_grid`, gridlines are composited with a difference blend.
///
/// # Errors
///
/// [`RenderError::ZeroScale`] for `factor == 0`,
/// [`RenderError::TooLarge`] if the output does not fit.
///
/// # Example
///
/// ```
/// use palette_quant::{render_high_res, Raster};
///
/// let raster = Raster::filled(2, 2, [0, 0, 0, 255]).unwrap();
/// let export = render_high_res(&raster, 100, false).unwrap();
/// assert_eq!(export.dimensions(), (200, 200));
/// ```
pub fn render_high_res(raster: &Raster, factor: u32, with_grid: bool) -> Result<Raster, RenderError> {
    let mut output = upscale_nearest(raster, factor)?;

    if with_grid {
        let (cols, rows) = raster.dimensions();
        draw_grid(&mut output, cols, rows, factor, &GridStyle::export(factor))?;
    }

    tracing::debug!(
        width = output.width(),
        height = output.height(),
        factor,
        with_grid,
        "Rendered high-res export"
    );
    Ok(output)
}

/// The 1:1 export, optionally with a 1px grey grid at pixel boundaries.
pub fn render_standard(raster: &Raster, with_grid: bool) -> Result<Raster, RenderError> {
    let mut output = raster.clone();
    if with_grid {
        let (cols, rows) = raster.dimensions();
        draw_grid(&mut output, cols, rows, 1, &GridStyle::standard())?;
    }
    Ok(output)
}
