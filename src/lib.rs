//! Pixelize - palette-constrained pixel art
//!
//! Command-line front end for the `palette-quant` engine.
//! This library exposes modules for integration testing.

pub mod config;
pub mod error;
pub mod image_io;
