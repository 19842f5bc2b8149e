//! Palette types and utilities
//!
//! This module provides the [`Palette`] type, the built-in presets and
//! error types for parsing and validation.

mod error;
mod palette;
mod presets;

pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, PaletteBuild, RejectedColor, FALLBACK_COLORS};
pub use presets::{ColorSelection, PalettePreset, UnknownPreset, FREE_COLORS, LOCKED_COLORS};
