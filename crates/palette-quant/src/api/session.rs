//! Retained conversion state for interactive front ends.
//!
//! A [`Session`] holds the loaded source image and the last conversion
//! result, so the display grid can be toggled and exports rendered
//! without re-running quantization. Callers that prefer to keep the
//! quantized raster themselves can use [`Converter`] and the render
//! functions directly.

use super::{ConversionResult, ConvertError, Converter};
use crate::palette::Palette;
use crate::raster::Raster;
use crate::render::{render_display, render_high_res, render_standard, DisplayRender};
use crate::resample::{
    calculate_display_size, image_info, pixel_count, ImageInfo, PixelCount, ResampleMode,
    DEFAULT_PREVIEW_MAX,
};

/// Loaded source plus the most recent conversion.
///
/// # Example
///
/// ```
/// use palette_quant::{Palette, Raster, ResampleMode, Session};
///
/// let mut session = Session::new();
/// session.load(Raster::filled(90, 60, [30, 60, 90, 255]).unwrap());
///
/// session.convert(30, &Palette::fallback(), ResampleMode::TwoStage).unwrap();
/// let export = session.render_high_res(10, true).unwrap();
/// assert_eq!(export.dimensions(), (300, 200));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    source: Option<Raster>,
    last: Option<ConversionResult>,
}

impl Session {
    /// An empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the source image. Any previous result is discarded.
    pub fn load(&mut self, source: Raster) {
        tracing::debug!(
            width = source.width(),
            height = source.height(),
            "Loaded source image"
        );
        self.source = Some(source);
        self.last = None;
    }

    /// The loaded source, if any.
    #[inline]
    pub fn source(&self) -> Option<&Raster> {
        self.source.as_ref()
    }

    /// Dimensions and aspect ratio of the loaded source.
    pub fn info(&self) -> Option<ImageInfo> {
        self.source
            .as_ref()
            .map(|s| image_info(s.width(), s.height()))
    }

    /// Bounded preview size of the loaded source.
    pub fn preview_size(&self) -> Option<(u32, u32)> {
        self.source
            .as_ref()
            .map(|s| calculate_display_size(s.width(), s.height(), DEFAULT_PREVIEW_MAX))
    }

    /// Output size a conversion at `target_width` would produce.
    pub fn pixel_count(&self, target_width: u32) -> Result<PixelCount, ConvertError> {
        let source = self.source.as_ref().ok_or(ConvertError::MissingSource)?;
        Ok(pixel_count(source.width(), source.height(), target_width)?)
    }

    /// Convert the loaded source and retain the result.
    pub fn convert(
        &mut self,
        target_width: u32,
        palette: &Palette,
        mode: ResampleMode,
    ) -> Result<&ConversionResult, ConvertError> {
        let converter = Converter::new(palette.clone()).mode(mode);
        self.convert_with(&converter, target_width)
    }

    /// Convert the loaded source with a configured [`Converter`].
    pub fn convert_with(
        &mut self,
        converter: &Converter,
        target_width: u32,
    ) -> Result<&ConversionResult, ConvertError> {
        let source = self.source.as_ref().ok_or(ConvertError::MissingSource)?;
        let result = converter.convert(source, target_width)?;
        Ok(self.last.insert(result))
    }

    /// The retained result of the last successful conversion.
    #[inline]
    pub fn last_result(&self) -> Option<&ConversionResult> {
        self.last.as_ref()
    }

    fn quantized(&self) -> Result<&Raster, ConvertError> {
        self.last
            .as_ref()
            .map(|r| &r.raster)
            .ok_or(ConvertError::NoResult)
    }

    /// Upscaled on-screen render of the last result.
    pub fn render_display(&self, with_grid: bool) -> Result<DisplayRender, ConvertError> {
        Ok(render_display(self.quantized()?, with_grid)?)
    }

    /// High-resolution export of the last result.
    pub fn render_high_res(&self, factor: u32, with_grid: bool) -> Result<Raster, ConvertError> {
        Ok(render_high_res(self.quantized()?, factor, with_grid)?)
    }

    /// 1:1 export of the last result.
    pub fn render_standard(&self, with_grid: bool) -> Result<Raster, ConvertError> {
        Ok(render_standard(self.quantized()?, with_grid)?)
    }
}
