//! Public conversion API.
//!
//! This module provides the high-level API: the [`Converter`] builder,
//! the one-shot [`convert`] function, the retained-state [`Session`] and
//! the unified [`ConvertError`].

mod builder;
mod error;
mod session;

pub use builder::{convert, ConversionResult, Converter};
pub use error::ConvertError;
pub use session::Session;
