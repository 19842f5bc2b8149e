//! Source-to-target resampling.

use image::imageops::{self, FilterType};
use image::{Rgba, Rgba32FImage, RgbaImage};

use super::options::{ResampleMode, ResampleOptions};
use super::size::target_dimensions;
use super::ResampleError;
use crate::raster::Raster;

/// Scale `source` to `target_width` columns, keeping its aspect ratio.
///
/// The height comes from [`target_dimensions`]. With
/// [`ResampleMode::Direct`] the source is resized once with a triangle
/// (bilinear) filter. With [`ResampleMode::TwoStage`] it is first resized
/// to `oversample` times the target, blurred with a Gaussian of
/// `blur_sigma`, and then resized down to the target.
///
/// Filtering runs on premultiplied RGBA, so the hidden color of fully
/// transparent pixels never bleeds into visible ones. The quantizer
/// thresholds the resampled alpha afterwards.
///
/// # Errors
///
/// [`ResampleError::InvalidTargetWidth`] for a zero width,
/// [`ResampleError::EmptySource`] for a source without pixels and
/// [`ResampleError::TooLarge`] when the intermediate size overflows.
///
/// # Example
///
/// ```
/// use palette_quant::{resample, Raster, ResampleOptions};
///
/// let source = Raster::filled(400, 300, [90, 140, 200, 255]).unwrap();
/// let small = resample(&source, 32, &ResampleOptions::default()).unwrap();
/// assert_eq!(small.dimensions(), (32, 24));
/// ```
pub fn resample(
    source: &Raster,
    target_width: u32,
    options: &ResampleOptions,
) -> Result<Raster, ResampleError> {
    let (width, height) = target_dimensions(source.width(), source.height(), target_width)?;
    let image = premultiplied(source);

    let resized = match options.mode {
        ResampleMode::Direct => imageops::resize(&image, width, height, FilterType::Triangle),
        ResampleMode::TwoStage => two_stage(&image, width, height, options)?,
    };

    tracing::debug!(
        src_width = source.width(),
        src_height = source.height(),
        width,
        height,
        mode = %options.mode,
        "Resampled source"
    );

    Ok(Raster::from_rgba_image(demultiplied(&resized))?)
}

fn two_stage(
    image: &Rgba32FImage,
    width: u32,
    height: u32,
    options: &ResampleOptions,
) -> Result<Rgba32FImage, ResampleError> {
    let factor = options.oversample.max(1);
    let (mid_width, mid_height) = width
        .checked_mul(factor)
        .zip(height.checked_mul(factor))
        .ok_or(ResampleError::TooLarge {
            width: width.saturating_mul(factor),
            height: height.saturating_mul(factor),
        })?;

    let mut intermediate = imageops::resize(image, mid_width, mid_height, FilterType::Triangle);
    if options.blur_sigma > 0.0 {
        intermediate = imageops::blur(&intermediate, options.blur_sigma);
    }

    Ok(imageops::resize(&intermediate, width, height, FilterType::Triangle))
}

/// Straight RGBA8 to premultiplied RGBA in `0.0..=1.0`.
fn premultiplied(source: &Raster) -> Rgba32FImage {
    Rgba32FImage::from_fn(source.width(), source.height(), |x, y| {
        let [r, g, b, a] = source.pixel(x, y);
        let alpha = a as f32 / 255.0;
        Rgba([
            r as f32 / 255.0 * alpha,
            g as f32 / 255.0 * alpha,
            b as f32 / 255.0 * alpha,
            alpha,
        ])
    })
}

/// Back to straight RGBA8. Pixels with no coverage get black RGB.
fn demultiplied(image: &Rgba32FImage) -> RgbaImage {
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let channel = |v: f32| if a > 0.0 { to_u8(v / a) } else { 0 };
        Rgba([channel(r), channel(g), channel(b), to_u8(a)])
    })
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
