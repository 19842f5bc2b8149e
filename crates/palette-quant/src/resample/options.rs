//! Resampling options and configuration.
//!
//! This module provides the [`ResampleOptions`] struct and the
//! [`ResampleMode`] selector.

use std::fmt;
use std::str::FromStr;

/// Intermediate scale factor for two-stage resampling.
pub const DEFAULT_OVERSAMPLE: u32 = 2;

/// Gaussian blur sigma applied at the intermediate resolution.
pub const DEFAULT_BLUR_SIGMA: f32 = 0.5;

/// How the source is brought down to the target resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleMode {
    /// One smoothed resize straight to the target.
    Direct,
    /// Resize to an oversampled intermediate, blur, then resize to the
    /// target. Suppresses high-frequency noise that would otherwise show
    /// up as dithering artifacts.
    #[default]
    TwoStage,
}

impl fmt::Display for ResampleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResampleMode::Direct => f.write_str("direct"),
            ResampleMode::TwoStage => f.write_str("two-stage"),
        }
    }
}

/// Error for an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resample mode {0:?} (expected \"direct\" or \"two-stage\")")]
pub struct UnknownMode(pub String);

impl FromStr for ResampleMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(ResampleMode::Direct),
            "two-stage" | "two_stage" | "twostage" => Ok(ResampleMode::TwoStage),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Configuration for the resampling stage.
///
/// # Defaults
///
/// - Mode: [`ResampleMode::TwoStage`]
/// - Oversample: [`DEFAULT_OVERSAMPLE`] (2x)
/// - Blur sigma: [`DEFAULT_BLUR_SIGMA`] (0.5 px)
///
/// The oversample factor and blur strength were picked by eye. Treat them
/// as tuning knobs, not as guarantees beyond "reduces aliasing".
///
/// # Example
///
/// ```
/// use palette_quant::{ResampleMode, ResampleOptions};
///
/// let options = ResampleOptions::new()
///     .mode(ResampleMode::TwoStage)
///     .oversample(3)
///     .blur_sigma(0.8);
/// assert_eq!(options.oversample, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResampleOptions {
    /// Resampling strategy
    pub mode: ResampleMode,
    /// Intermediate scale factor for two-stage mode (values below 1 act as 1)
    pub oversample: u32,
    /// Gaussian sigma at the intermediate resolution (0 disables the blur)
    pub blur_sigma: f32,
}

impl Default for ResampleOptions {
    fn default() -> Self {
        Self {
            mode: ResampleMode::default(),
            oversample: DEFAULT_OVERSAMPLE,
            blur_sigma: DEFAULT_BLUR_SIGMA,
        }
    }
}

impl ResampleOptions {
    /// Create options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resampling strategy.
    #[inline]
    pub fn mode(mut self, mode: ResampleMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the intermediate scale factor for two-stage mode.
    #[inline]
    pub fn oversample(mut self, factor: u32) -> Self {
        self.oversample = factor;
        self
    }

    /// Set the blur sigma for two-stage mode.
    #[inline]
    pub fn blur_sigma(mut self, sigma: f32) -> Self {
        self.blur_sigma = sigma;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let opts = ResampleOptions::default();
        assert_eq!(opts.mode, ResampleMode::TwoStage);
        assert_eq!(opts.oversample, 2);
        assert!((opts.blur_sigma - 0.5).abs() < f32::EPSILON);
        assert_eq!(ResampleOptions::new(), opts);
    }

    #[test]
    fn test_builder_leaves_other_fields() {
        let opts = ResampleOptions::new().mode(ResampleMode::Direct);
        assert_eq!(opts.mode, ResampleMode::Direct);
        assert_eq!(opts.oversample, DEFAULT_OVERSAMPLE);

        let opts = ResampleOptions::new().blur_sigma(0.0).oversample(4);
        assert_eq!(opts.mode, ResampleMode::TwoStage);
        assert_eq!(opts.oversample, 4);
        assert_eq!(opts.blur_sigma, 0.0);
    }

    #[test]
    fn test_mode_parse_and_display() {
        assert_eq!("direct".parse(), Ok(ResampleMode::Direct));
        assert_eq!("Two-Stage".parse(), Ok(ResampleMode::TwoStage));
        assert_eq!("two_stage".parse(), Ok(ResampleMode::TwoStage));
        assert!("lanczos".parse::<ResampleMode>().is_err());
        for mode in [ResampleMode::Direct, ResampleMode::TwoStage] {
            assert_eq!(mode.to_string().parse(), Ok(mode));
        }
    }
}
