//! Resampling pipeline: brings an arbitrary source down to the target
//! resolution before quantization.
//!
//! - [`resample`]: direct or two-stage (oversample, blur, downscale)
//! - [`target_dimensions`]: aspect-preserving target size
//! - [`calculate_display_size`]: bounded preview size for the source

mod options;
mod resize;
mod size;

pub use options::{
    ResampleMode, ResampleOptions, UnknownMode, DEFAULT_BLUR_SIGMA, DEFAULT_OVERSAMPLE,
};
pub use resize::resample;
pub use size::{
    calculate_display_size, image_info, pixel_count, target_dimensions, ImageInfo, PixelCount,
    DEFAULT_PREVIEW_MAX,
};

use thiserror::Error;

use crate::raster::RasterError;

/// Error type for resampling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResampleError {
    /// Target width must be positive
    #[error("target width must be a positive integer, got {width}")]
    InvalidTargetWidth {
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
    /// An intermediate or target size does not fit
    #[error("resampled size too large: {width}x{height}")]
    TooLarge {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
    /// The resized buffer could not be wrapped
    #[error(transparent)]
    Raster(#[from] RasterError),
}
