//! RGBA raster buffer shared by every pipeline stage.
//!
//! A [`Raster`] owns a row-major buffer of 8-bit RGBA samples. The
//! quantizer rewrites it in place; every other stage only reads it or
//! produces a new one.

use image::RgbaImage;
use thiserror::Error;

use crate::color::Color;

/// Pixels with alpha below this value are transparent.
///
/// Alpha is binary throughout the pipeline: there is no partial blending.
pub const ALPHA_THRESHOLD: u8 = 128;

/// The value every transparent pixel is normalized to.
pub const TRANSPARENT_WHITE: [u8; 4] = [255, 255, 255, 0];

/// Returns true if an RGBA sample counts as transparent.
#[inline]
pub fn is_transparent(pixel: [u8; 4]) -> bool {
    pixel[3] < ALPHA_THRESHOLD
}

/// Error type for raster construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// Buffer length is not `width * height * 4`
    #[error("raster buffer has {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    LengthMismatch {
        /// Raster width in pixels
        width: u32,
        /// Raster height in pixels
        height: u32,
        /// `width * height * 4`
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },
    /// `width * height * 4` does not fit in memory addressing
    #[error("raster dimensions too large: {width}x{height}")]
    TooLarge {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

/// Byte length of a `width x height` RGBA buffer, if addressable.
pub(crate) fn buffer_len(width: u32, height: u32) -> Result<usize, RasterError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(RasterError::TooLarge { width, height })
}

/// An owned RGBA8 image.
///
/// Invariant: `data.len() == width * height * 4`.
///
/// # Example
///
/// ```
/// use palette_quant::Raster;
///
/// let mut raster = Raster::filled(2, 1, [10, 20, 30, 255]).unwrap();
/// raster.set_pixel(1, 0, [0, 0, 0, 0]);
///
/// assert!(!raster.is_transparent_at(0, 0));
/// assert!(raster.is_transparent_at(1, 0));
/// assert_eq!(raster.as_raw().len(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap an existing RGBA buffer.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::LengthMismatch`] if the buffer length is not
    /// `width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, RasterError> {
        let expected = buffer_len(width, height)?;
        if data.len() != expected {
            return Err(RasterError::LengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A raster where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, RasterError> {
        let len = buffer_len(width, height)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A raster whose pixel at `(x, y)` is `f(x, y)`.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> [u8; 4],
    ) -> Result<Self, RasterError> {
        let mut data = Vec::with_capacity(buffer_len(width, height)?);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels, `width * height`.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    /// Returns true if the raster has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw row-major RGBA buffer.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the raw buffer. The length cannot change.
    #[inline]
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the raster, returning its buffer.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// RGBA sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Overwrite the RGBA sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// The RGB part of the pixel at `(x, y)`.
    #[inline]
    pub fn color_at(&self, x: u32, y: u32) -> Color {
        let [r, g, b, _] = self.pixel(x, y);
        Color::new(r, g, b)
    }

    /// Returns true if the pixel at `(x, y)` has alpha below 128.
    #[inline]
    pub fn is_transparent_at(&self, x: u32, y: u32) -> bool {
        is_transparent(self.pixel(x, y))
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Copy into an `image` crate buffer.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    /// Take over an `image` crate buffer.
    pub fn from_rgba_image(image: RgbaImage) -> Result<Self, RasterError> {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }
}
