//! Grid overlay drawn at block boundaries.
//!
//! Each line is filled as a thin rectangle onto a transparent layer
//! (outer pass first, then the inner pass on top) and the layer is
//! composited onto the image, a strip of rows at a time. Compositing with
//! [`GridBlend::Difference`] inverts whatever is underneath, so lines stay
//! visible on any fill.

use tiny_skia::{
    BlendMode, ColorU8, FillRule, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint,
    PremultipliedColorU8, Rect, Transform,
};

use super::RenderError;
use crate::color::Color;
use crate::raster::Raster;

/// A stroke color with fractional opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeColor {
    /// Color of the stroke
    pub color: Color,
    /// Opacity in `0.0..=1.0`
    pub alpha: f32,
}

impl StrokeColor {
    /// A color at the given opacity.
    pub const fn new(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            color: Color::new(r, g, b),
            alpha,
        }
    }

    fn paint(&self) -> Paint<'static> {
        let alpha = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        let mut paint = Paint::default();
        paint.set_color_rgba8(self.color.r, self.color.g, self.color.b, alpha);
        paint
    }
}

/// How the grid layer is combined with the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridBlend {
    /// Plain source-over compositing
    #[default]
    Normal,
    /// `|image - grid|` per channel
    Difference,
}

impl From<GridBlend> for BlendMode {
    fn from(blend: GridBlend) -> Self {
        match blend {
            GridBlend::Normal => BlendMode::SourceOver,
            GridBlend::Difference => BlendMode::Difference,
        }
    }
}

/// Stroke widths, colors and blending for a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    /// Width of the inner stroke
    pub line_width: f32,
    /// Optional wider stroke drawn first, with its extra width
    pub outer: Option<(StrokeColor, f32)>,
    /// Stroke drawn last, at `line_width`
    pub inner: StrokeColor,
    /// Compositing of the finished grid layer
    pub blend: GridBlend,
}

impl GridStyle {
    /// The on-screen grid for blocks of `cell` pixels.
    ///
    /// Inner width is `cell / 10` clamped to `1..=3`, with a dark outer
    /// stroke one unit wider under a light inner stroke.
    pub fn display(cell: u32) -> Self {
        let line_width = (cell as f32 / 10.0).clamp(1.0, 3.0);
        Self {
            line_width,
            outer: Some((StrokeColor::new(0, 0, 0, 0.6), 1.0)),
            inner: StrokeColor::new(255, 255, 255, 0.8),
            blend: GridBlend::Normal,
        }
    }

    /// The export grid at `factor`x scale, composited with difference.
    ///
    /// Inner width is `factor / 15`, at least 2, with an outer stroke two
    /// units wider.
    pub fn export(factor: u32) -> Self {
        let line_width = (factor as f32 / 15.0).max(2.0);
        Self {
            line_width,
            outer: Some((StrokeColor::new(0, 0, 0, 0.7), 2.0)),
            inner: StrokeColor::new(255, 255, 255, 0.9),
            blend: GridBlend::Difference,
        }
    }

    /// A single 1px half-transparent grey stroke.
    pub fn standard() -> Self {
        Self {
            line_width: 1.0,
            outer: None,
            inner: StrokeColor::new(128, 128, 128, 0.5),
            blend: GridBlend::Normal,
        }
    }
}

/// Rows composited per pass, bounding the temporary pixmaps.
const STRIP_ROWS: u32 = 256;

/// A line as `[left, top, right, bottom]` in raster coordinates.
type Band = [f32; 4];

/// Draw grid lines on every block boundary of `raster`.
///
/// Vertical lines sit at `x * cell` for `x` in `0..=cols` and horizontal
/// lines at `y * cell` for `y` in `0..=rows`, each spanning
/// `cols * cell` by `rows * cell`. Pixels no line reaches keep their
/// exact bytes, including the color of fully transparent pixels.
///
/// An empty raster is left as is.
pub fn draw_grid(
    raster: &mut Raster,
    cols: u32,
    rows: u32,
    cell: u32,
    style: &GridStyle,
) -> Result<(), RenderError> {
    if raster.is_empty() {
        return Ok(());
    }
    let (width, height) = raster.dimensions();

    let mut passes = Vec::with_capacity(2);
    if let Some((color, extra)) = style.outer {
        passes.push((color.paint(), line_bands(cols, rows, cell, style.line_width + extra)));
    }
    passes.push((style.inner.paint(), line_bands(cols, rows, cell, style.line_width)));

    let blend = PixmapPaint {
        blend_mode: style.blend.into(),
        ..PixmapPaint::default()
    };

    let mut top = 0;
    while top < height {
        let strip = STRIP_ROWS.min(height - top);
        composite_strip(raster, top, strip, &passes, &blend)?;
        top += strip;
    }

    tracing::debug!(width, height, cols, rows, cell, blend = ?style.blend, "Drew grid");
    Ok(())
}

/// Rectangles covering `[p - width / 2, p + width / 2]` around each line.
fn line_bands(cols: u32, rows: u32, cell: u32, width: f32) -> Vec<Band> {
    let half = width / 2.0;
    let step = cell as f32;
    let span_x = cols as f32 * step;
    let span_y = rows as f32 * step;

    let verticals = (0..=cols).map(|i| {
        let x = i as f32 * step;
        [x - half, 0.0, x + half, span_y]
    });
    let horizontals = (0..=rows).map(|i| {
        let y = i as f32 * step;
        [0.0, y - half, span_x, y + half]
    });
    verticals.chain(horizontals).collect()
}

/// Draw the grid into rows `top..top + rows` of `raster`.
fn composite_strip(
    raster: &mut Raster,
    top: u32,
    rows: u32,
    passes: &[(Paint<'static>, Vec<Band>)],
    blend: &PixmapPaint,
) -> Result<(), RenderError> {
    let width = raster.width();
    let mut layer = Pixmap::new(width, rows).ok_or(RenderError::PixmapAllocation)?;
    let (max_x, max_y) = (width as f32, rows as f32);
    let offset = top as f32;

    for (paint, bands) in passes {
        // One fill per line, so crossings pick up both lines' coverage.
        for &[left, t, right, b] in bands {
            let (left, right) = (left.max(0.0), right.min(max_x));
            let (t, b) = ((t - offset).max(0.0), (b - offset).min(max_y));
            if right <= left || b <= t {
                continue;
            }
            if let Some(rect) = Rect::from_ltrb(left, t, right, b) {
                let path = PathBuilder::from_rect(rect);
                layer.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
            }
        }
    }

    let stride = width as usize * 4;
    let start = top as usize * stride;
    let pixels = &mut raster.as_raw_mut()[start..start + rows as usize * stride];

    let mut target = to_pixmap(pixels, width, rows)?;
    target.draw_pixmap(0, 0, layer.as_ref(), blend, Transform::identity(), None);
    write_back(pixels, &target);
    Ok(())
}

fn premultiply(px: &[u8]) -> PremultipliedColorU8 {
    ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply()
}

fn to_pixmap(pixels: &[u8], width: u32, rows: u32) -> Result<Pixmap, RenderError> {
    let size = IntSize::from_wh(width, rows).ok_or(RenderError::PixmapAllocation)?;
    let mut data = Vec::with_capacity(pixels.len());
    for px in pixels.chunks_exact(4) {
        let p = premultiply(px);
        data.extend_from_slice(&[p.red(), p.green(), p.blue(), p.alpha()]);
    }
    Pixmap::from_vec(data, size).ok_or(RenderError::PixmapAllocation)
}

/// Copy drawn pixels back as straight alpha. Untouched pixels keep their
/// original bytes.
fn write_back(pixels: &mut [u8], pixmap: &Pixmap) {
    for (dst, drawn) in pixels.chunks_exact_mut(4).zip(pixmap.pixels()) {
        if *drawn == premultiply(dst) {
            continue;
        }
        let c = drawn.demultiply();
        dst.copy_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
}
