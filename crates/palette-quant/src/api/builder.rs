//! Converter builder -- the primary entry point for the crate.
//!
//! [`Converter`] wraps the conversion pipeline (resample, quantize,
//! validate) behind a fluent builder.

use std::time::Instant;

use super::ConvertError;
use crate::dither::{quantize, validate_palette, PaletteCheck};
use crate::palette::Palette;
use crate::raster::Raster;
use crate::resample::{resample, ResampleMode, ResampleOptions};

/// Output of one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    /// The quantized low-resolution raster
    pub raster: Raster,
    /// Output width, equal to the requested target width
    pub width: u32,
    /// Output height, derived from the source aspect ratio
    pub height: u32,
    /// `width * height`
    pub total_pixels: u64,
    /// Post-hoc palette membership check of `raster`
    pub check: PaletteCheck,
}

impl ConversionResult {
    /// Returns true if every opaque pixel is a palette color.
    #[inline]
    pub fn is_within_palette(&self) -> bool {
        self.check.is_clean()
    }

    /// Number of opaque pixels outside the palette.
    #[inline]
    pub fn off_palette_pixels(&self) -> usize {
        self.check.off_palette
    }
}

/// High-level pixel-art converter.
///
/// # Design
///
/// - Constructor requires a [`Palette`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`convert()`](Self::convert) takes `&self`, so one converter can be
///   reused across images
///
/// # Example
///
/// ```
/// use palette_quant::{Converter, Palette, Raster, ResampleMode};
///
/// let palette = Palette::from_hex(&["#000000", "#FFFFFF", "#FF4500"]).unwrap();
/// let converter = Converter::new(palette).mode(ResampleMode::Direct);
///
/// let source = Raster::filled(120, 80, [250, 80, 10, 255]).unwrap();
/// let result = converter.convert(&source, 24).unwrap();
///
/// assert_eq!((result.width, result.height), (24, 16));
/// assert_eq!(result.total_pixels, 384);
/// assert!(result.is_within_palette());
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    palette: Palette,
    resample: ResampleOptions,
}

impl Converter {
    /// Create a converter for `palette` with two-stage resampling.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            resample: ResampleOptions::default(),
        }
    }

    /// Set the resampling strategy.
    #[inline]
    pub fn mode(mut self, mode: ResampleMode) -> Self {
        self.resample = self.resample.mode(mode);
        self
    }

    /// Set the two-stage oversample factor.
    #[inline]
    pub fn oversample(mut self, factor: u32) -> Self {
        self.resample = self.resample.oversample(factor);
        self
    }

    /// Set the two-stage blur sigma.
    #[inline]
    pub fn blur_sigma(mut self, sigma: f32) -> Self {
        self.resample = self.resample.blur_sigma(sigma);
        self
    }

    /// Replace all resampling options at once.
    #[inline]
    pub fn resample_options(mut self, options: ResampleOptions) -> Self {
        self.resample = options;
        self
    }

    /// The palette every conversion maps onto.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The configured resampling options.
    #[inline]
    pub fn options(&self) -> &ResampleOptions {
        &self.resample
    }

    /// Convert `source` into pixel art `target_width` columns wide.
    ///
    /// Applies the full pipeline:
    /// 1. Validate the request (positive width, non-empty source)
    /// 2. Resample to the target size
    /// 3. Quantize with Floyd-Steinberg diffusion
    /// 4. Check the output against the palette
    ///
    /// # Errors
    ///
    /// [`ConvertError::InvalidDimensions`] and [`ConvertError::EmptySource`]
    /// are raised before any processing.
    pub fn convert(&self, source: &Raster, target_width: u32) -> Result<ConversionResult, ConvertError> {
        if target_width == 0 {
            return Err(ConvertError::InvalidDimensions {
                width: target_width,
            });
        }
        if source.is_empty() {
            return Err(ConvertError::EmptySource {
                width: source.width(),
                height: source.height(),
            });
        }

        let start = Instant::now();
        let mut raster = resample(source, target_width, &self.resample)?;
        let resampled = start.elapsed();

        let stats = quantize(&mut raster, &self.palette)?;
        let check = validate_palette(&raster, &self.palette);

        let (width, height) = raster.dimensions();
        tracing::debug!(
            resample_ms = resampled.as_millis() as u64,
            total_ms = start.elapsed().as_millis() as u64,
            transparent = stats.transparent,
            "Conversion stages finished"
        );
        tracing::info!(
            width,
            height,
            colors = self.palette.len(),
            mode = %self.resample.mode,
            distinct = check.found.len(),
            "Converted image"
        );

        Ok(ConversionResult {
            raster,
            width,
            height,
            total_pixels: width as u64 * height as u64,
            check,
        })
    }
}

/// Convert `source` with a one-off [`Converter`].
///
/// # Errors
///
/// [`ConvertError::MissingSource`] when `source` is `None`, plus
/// everything [`Converter::convert`] reports.
pub fn convert(
    source: Option<&Raster>,
    target_width: u32,
    palette: &Palette,
    mode: ResampleMode,
) -> Result<ConversionResult, ConvertError> {
    let source = source.ok_or(ConvertError::MissingSource)?;
    Converter::new(palette.clone()).mode(mode).convert(source, target_width)
}
