// Generated LUT literals and the palette/palette.rs layout trip these.
#![allow(clippy::excessive_precision, clippy::module_inception)]

//! palette-quant: pixel art from arbitrary images with a fixed palette
//!
//! This library scales an image down to a small grid, maps every pixel
//! onto a caller-supplied palette with Floyd-Steinberg error diffusion and
//! renders the result back up as crisp blocks for display or export.
//!
//! # Quick Start
//!
//! The [`Converter`] builder is the primary entry point:
//!
//! ```
//! use palette_quant::{render_high_res, Converter, PalettePreset, Raster};
//!
//! let source = Raster::filled(300, 200, [64, 128, 192, 255]).unwrap();
//!
//! let converter = Converter::new(PalettePreset::Free.palette());
//! let result = converter.convert(&source, 48).unwrap();
//! assert_eq!((result.width, result.height), (48, 32));
//! assert!(result.is_within_palette());
//!
//! let export = render_high_res(&result.raster, 10, true).unwrap();
//! assert_eq!(export.dimensions(), (480, 320));
//! ```
//!
//! # Palettes from user input
//!
//! Colors are `#RRGGBB` strings. [`Palette::build`] drops entries that do
//! not parse and falls back to black, white, red, green and blue if
//! nothing usable remains, so a bad palette never aborts a conversion:
//!
//! ```
//! use palette_quant::{ColorSelection, Palette};
//!
//! let build = Palette::build(&["#FF4500", "#ffa800", "not a color"]);
//! assert_eq!(build.palette.len(), 2);
//! assert_eq!(build.rejected.len(), 1);
//!
//! let selection = ColorSelection::Custom(vec!["#000000".into(), "#FFFFFF".into()]);
//! assert_eq!(selection.resolve().palette.len(), 2);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! source raster (RGBA8, any size)
//!     |
//!     v
//! resample                 direct: one triangle-filter resize
//!     |                    two-stage: 2x resize, Gaussian blur, resize
//!     v
//! low-res raster (target_width x round(target_width * h / w))
//!     |
//!     v
//! quantize (in place)      row-major Floyd-Steinberg, 8-bit sRGB
//!     |                    residuals, CIE76 nearest color in Lab
//!     v
//! quantized raster ---> validate_palette (post-hoc check)
//!     |
//!     v
//! render                   nearest-neighbor blocks + optional grid
//! ```
//!
//! # Color Matching
//!
//! Nearest-color search converts both sides to CIE L\*a\*b\* (D65 white
//! point) and compares them with CIE76, plain Euclidean distance in Lab.
//! The palette's Lab values are computed once; each pixel costs one
//! conversion and a linear scan. On exact ties the color listed first in
//! the palette wins.
//!
//! Error diffusion on the other hand works on raw 8-bit sRGB channels:
//! the residual `current - chosen` is spread to unvisited neighbors and
//! each neighbor is clamped and rounded back to 8 bits immediately.
//!
//! # Transparency
//!
//! Alpha is binary. Any pixel with alpha below 128 becomes
//! `(255, 255, 255, 0)`, sends no error to its neighbors and receives
//! none. Every other pixel comes out fully opaque.

pub mod api;
pub mod color;
pub mod dither;
pub mod matcher;
pub mod palette;
pub mod raster;
pub mod render;
pub mod resample;


pub use api::{convert, ConversionResult, ConvertError, Converter, Session};
pub use color::{delta_e, distance_hex, format_color, Color, Lab};
pub use dither::{quantize, validate_palette, PaletteCheck, QuantizeError, QuantizeStats};
pub use matcher::{find_closest, find_closest_hex, nearest, Match};
pub use palette::{
    ColorSelection, Palette, PaletteBuild, PaletteError, PalettePreset, ParseColorError,
    RejectedColor,
};
pub use raster::{Raster, RasterError, TRANSPARENT_WHITE};
pub use render::{
    display_pixel_size, render_display, render_high_res, render_standard, upscale_nearest,
    DisplayRender, RenderError, DEFAULT_EXPORT_SCALE,
};
pub use resample::{
    calculate_display_size, image_info, pixel_count, resample, target_dimensions, ImageInfo,
    PixelCount, ResampleError, ResampleMode, ResampleOptions, DEFAULT_PREVIEW_MAX,
};
