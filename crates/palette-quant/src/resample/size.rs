//! Dimension arithmetic: target size, preview size and pixel counts.

use super::ResampleError;

/// Longest side of the original-image preview.
pub const DEFAULT_PREVIEW_MAX: u32 = 300;

/// Height that keeps the source aspect ratio at `target_width`.
///
/// `round(target_width * src_height / src_width)`, never less than 1.
///
/// # Errors
///
/// [`ResampleError::InvalidTargetWidth`] for a zero width and
/// [`ResampleError::EmptySource`] for a source without pixels.
///
/// # Example
///
/// ```
/// use palette_quant::target_dimensions;
///
/// assert_eq!(target_dimensions(1000, 750, 32).unwrap(), (32, 24));
/// assert_eq!(target_dimensions(640, 480, 50).unwrap(), (50, 38));
/// ```
pub fn target_dimensions(
    src_width: u32,
    src_height: u32,
    target_width: u32,
) -> Result<(u32, u32), ResampleError> {
    if target_width == 0 {
        return Err(ResampleError::InvalidTargetWidth {
            width: target_width,
        });
    }
    if src_width == 0 || src_height == 0 {
        return Err(ResampleError::EmptySource {
            width: src_width,
            height: src_height,
        });
    }

    let height = (target_width as f64 * src_height as f64 / src_width as f64).round();
    if height > u32::MAX as f64 {
        return Err(ResampleError::TooLarge {
            width: target_width,
            height: u32::MAX,
        });
    }
    Ok((target_width, (height as u32).max(1)))
}

/// Bounded preview size for showing the source image.
///
/// If the image is wider than tall, the width is capped at `max_size`;
/// otherwise the height is. The other side scales proportionally and both
/// are rounded. Images already within bounds are returned unchanged.
///
/// ```
/// use palette_quant::calculate_display_size;
///
/// assert_eq!(calculate_display_size(1000, 500, 300), (300, 150));
/// assert_eq!(calculate_display_size(500, 1000, 300), (150, 300));
/// assert_eq!(calculate_display_size(200, 100, 300), (200, 100));
/// ```
pub fn calculate_display_size(width: u32, height: u32, max_size: u32) -> (u32, u32) {
    let (mut w, mut h) = (width as f64, height as f64);
    let max = max_size as f64;

    if w > h {
        if w > max {
            h = h * max / w;
            w = max;
        }
    } else if h > max {
        w = w * max / h;
        h = max;
    }

    (w.round() as u32, h.round() as u32)
}

/// Source dimensions and aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageInfo {
    /// Source width in pixels
    pub width: u32,
    /// Source height in pixels
    pub height: u32,
    /// `width / height`
    pub aspect_ratio: f64,
}

impl ImageInfo {
    /// Describe a `width x height` image.
    pub fn new(width: u32, height: u32) -> Self {
        let aspect_ratio = if height == 0 {
            0.0
        } else {
            width as f64 / height as f64
        };
        Self {
            width,
            height,
            aspect_ratio,
        }
    }
}

/// Describe a `width x height` source image.
///
/// ```
/// use palette_quant::image_info;
///
/// let info = image_info(800, 400);
/// assert_eq!(info.aspect_ratio, 2.0);
/// ```
pub fn image_info(width: u32, height: u32) -> ImageInfo {
    ImageInfo::new(width, height)
}

/// Output size of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelCount {
    /// Output width
    pub width: u32,
    /// Output height
    pub height: u32,
    /// `width * height`
    pub total: u64,
}

/// Output dimensions and pixel total for a conversion at `target_width`.
///
/// ```
/// use palette_quant::pixel_count;
///
/// let count = pixel_count(1920, 1080, 64).unwrap();
/// assert_eq!((count.width, count.height, count.total), (64, 36, 2304));
/// ```
pub fn pixel_count(
    src_width: u32,
    src_height: u32,
    target_width: u32,
) -> Result<PixelCount, ResampleError> {
    let (width, height) = target_dimensions(src_width, src_height, target_width)?;
    Ok(PixelCount {
        width,
        height,
        total: width as u64 * height as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_dimensions_preserves_aspect() {
        assert_eq!(target_dimensions(100, 100, 32).unwrap(), (32, 32));
        assert_eq!(target_dimensions(400, 100, 32).unwrap(), (32, 8));
        assert_eq!(target_dimensions(100, 400, 32).unwrap(), (32, 128));
        // 32 * 333 / 1000 = 10.656
        assert_eq!(target_dimensions(1000, 333, 32).unwrap(), (32, 11));
    }

    #[test]
    fn test_target_dimensions_rounds_half_up() {
        // 8 * 5 / 16 = 2.5
        assert_eq!(target_dimensions(16, 5, 8).unwrap(), (8, 3));
    }

    #[test]
    fn test_target_height_at_least_one() {
        assert_eq!(target_dimensions(10_000, 10, 8).unwrap(), (8, 1));
    }

    #[test]
    fn test_target_dimensions_errors() {
        assert_eq!(
            target_dimensions(100, 100, 0),
            Err(ResampleError::InvalidTargetWidth { width: 0 })
        );
        assert_eq!(
            target_dimensions(0, 100, 32),
            Err(ResampleError::EmptySource {
                width: 0,
                height: 100
            })
        );
    }

    #[test]
    fn test_display_size_caps_longest_side() {
        assert_eq!(calculate_display_size(1000, 500, 300), (300, 150));
        assert_eq!(calculate_display_size(500, 1000, 300), (150, 300));
        assert_eq!(calculate_display_size(1000, 1000, 300), (300, 300));
        assert_eq!(calculate_display_size(1001, 333, 300), (300, 100));
    }

    #[test]
    fn test_display_size_leaves_small_images() {
        assert_eq!(calculate_display_size(300, 120, 300), (300, 120));
        assert_eq!(calculate_display_size(40, 60, 300), (40, 60));
    }

    #[test]
    fn test_image_info() {
        let info = ImageInfo::new(1920, 1080);
        assert!((info.aspect_ratio - 16.0 / 9.0).abs() < 1e-12);
        assert_eq!(ImageInfo::new(5, 0).aspect_ratio, 0.0);
    }

    #[test]
    fn test_pixel_count() {
        let count = pixel_count(300, 200, 200).unwrap();
        assert_eq!(count, PixelCount { width: 200, height: 133, total: 26_600 });
        assert!(pixel_count(300, 200, 0).is_err());
    }
}
