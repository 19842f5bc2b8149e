//! Unified error type for the conversion API.
//!
//! [`ConvertError`] wraps every engine error into a single enum for
//! convenient `?` propagation in application code. Only whole-request
//! preconditions end up here: per-pixel and per-color problems are
//! recovered where they occur.

use thiserror::Error;

use crate::dither::QuantizeError;
use crate::palette::PaletteError;
use crate::raster::RasterError;
use crate::render::RenderError;
use crate::resample::ResampleError;

/// Unified error type for the conversion API.
///
/// # Example
///
/// ```
/// use palette_quant::{convert, ConvertError, Palette, ResampleMode};
///
/// let palette = Palette::fallback();
/// let err = convert(None, 32, &palette, ResampleMode::TwoStage).unwrap_err();
/// assert!(matches!(err, ConvertError::MissingSource));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Conversion requested with no source loaded
    #[error("no source image loaded")]
    MissingSource,
    /// Target width is not a positive integer
    #[error("target width must be a positive integer, got {width}")]
    InvalidDimensions {
        /// The rejected width
        width: u32,
    },
    /// Source has no pixels
    #[error("source image is empty ({width}x{height})")]
    EmptySource {
        /// Source width
        width: u32,
        /// Source height
        height: u32,
    },
    /// Export requested before any conversion
    #[error("no conversion result to export")]
    NoResult,
    /// Intermediate or output size does not fit
    #[error("image too large: {width}x{height}")]
    TooLarge {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
    /// Palette construction failed
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
    /// Quantization refused its input
    #[error("quantize error: {0}")]
    Quantize(#[from] QuantizeError),
    /// Rendering failed
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    /// A raster buffer was malformed
    #[error("raster error: {0}")]
    Raster(#[from] RasterError),
}

impl From<ResampleError> for ConvertError {
    fn from(err: ResampleError) -> Self {
        match err {
            ResampleError::InvalidTargetWidth { width } => ConvertError::InvalidDimensions { width },
            ResampleError::EmptySource { width, height } => {
                ConvertError::EmptySource { width, height }
            }
            ResampleError::TooLarge { width, height } => ConvertError::TooLarge { width, height },
            ResampleError::Raster(err) => ConvertError::Raster(err),
        }
    }
}
