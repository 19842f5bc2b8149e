//! Color types and conversion utilities
//!
//! - [`Color`]: an opaque 8-bit sRGB triple, identified by its canonical
//!   upper-case `#RRGGBB` form. Use for I/O and palette membership.
//! - [`Lab`]: CIE L\*a\*b\* (D65), derived on demand for perceptual
//!   distance. Never stored in rasters.
//!
//! # Example
//!
//! ```
//! use palette_quant::{Color, Lab};
//!
//! let orange: Color = "#ff4500".parse().unwrap();
//! assert_eq!(orange.to_string(), "#FF4500");
//!
//! let lab = Lab::from(orange);
//! assert!(lab.l > 0.0 && lab.l < 100.0);
//! ```

mod lab;
mod lut;
mod srgb;

pub use lab::{delta_e, distance_hex, Lab, WHITE_X, WHITE_Y, WHITE_Z};
pub use srgb::{format_color, Color};
