//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette validation.

use thiserror::Error;

/// Error type for parsing hex color strings.
///
/// Returned when a color string is not exactly six hex digits after
/// trimming whitespace and stripping an optional leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Wrong number of characters (shorthand `#RGB` included)
    #[error("invalid hex color length: expected 6 digits, got {len}")]
    InvalidLength {
        /// Character count after trimming and stripping `#`
        len: usize,
    },
    /// Non-hexadecimal character encountered
    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
}

/// Error type for palette validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// No usable colors remain
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// An entry failed to parse during strict construction
    #[error("invalid color {input:?} at index {index}: {source}")]
    InvalidColor {
        /// Position of the entry in the input list
        index: usize,
        /// The entry as supplied
        input: String,
        /// Why it was rejected
        #[source]
        source: ParseColorError,
    },
}
