//! Render/export pipeline for quantized rasters.
//!
//! Nothing here touches colors chosen by the quantizer except grid
//! strokes: upscaling is pure nearest-neighbor block replication and the
//! grid is a separate pass over the upscaled raster, so it can be toggled
//! without re-running quantization.

mod export;
mod grid;
mod upscale;

pub use export::{
    display_pixel_size, render_display, render_high_res, render_standard, DisplayRender,
    DEFAULT_EXPORT_SCALE, DISPLAY_TARGET, MAX_BLOCK, MIN_BLOCK,
};
pub use grid::{draw_grid, GridBlend, GridStyle, StrokeColor};
pub use upscale::upscale_nearest;

use thiserror::Error;

/// Error type for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Scale factor must be at least 1
    #[error("scale factor must be a positive integer")]
    ZeroScale,
    /// Output dimensions do not fit in memory addressing
    #[error("rendered image too large: {width}x{height} blocks")]
    TooLarge {
        /// Requested width before overflow
        width: u32,
        /// Requested height before overflow
        height: u32,
    },
    /// The drawing surface could not be allocated
    #[error("failed to allocate drawing surface")]
    PixmapAllocation,
}
