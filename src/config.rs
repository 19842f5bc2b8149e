use palette_quant::{ColorSelection, Converter, Palette, ResampleMode, DEFAULT_EXPORT_SCALE};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file when none is given.
pub const CONFIG_ENV: &str = "PIXELIZE_CONFIG";

/// Smallest target width offered to users.
pub const MIN_TARGET_WIDTH: u32 = 8;
/// Largest target width offered to users.
pub const MAX_TARGET_WIDTH: u32 = 200;

/// Keep a user-supplied target width within the supported range.
pub fn clamp_target_width(width: u32) -> u32 {
    width.clamp(MIN_TARGET_WIDTH, MAX_TARGET_WIDTH)
}

/// Resampling strategy as written in config.yaml
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ModeSetting {
    Direct,
    #[default]
    TwoStage,
}

impl From<ModeSetting> for ResampleMode {
    fn from(mode: ModeSetting) -> Self {
        match mode {
            ModeSetting::Direct => ResampleMode::Direct,
            ModeSetting::TwoStage => ResampleMode::TwoStage,
        }
    }
}

/// Which color set a conversion starts from
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaletteSetting {
    #[default]
    Free,
    Locked,
    Custom,
}

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Output width in logical pixels
    pub target_width: u32,

    /// Resampling strategy
    pub mode: ModeSetting,

    /// Base color set
    pub palette: PaletteSetting,

    /// Colors used when `palette: custom`
    pub custom_colors: Vec<String>,

    /// Append `locked_colors` to the free set
    pub include_locked: bool,

    /// Unlocked colors appended when `include_locked` is set
    pub locked_colors: Vec<String>,

    /// Draw the grid on previews and exports
    pub grid: bool,

    /// Scale factor of the high-resolution export
    pub export_scale: u32,

    /// Re-compress written PNGs with oxipng
    pub optimize_png: bool,

    /// Two-stage intermediate scale factor
    pub oversample: u32,

    /// Two-stage blur sigma
    pub blur_sigma: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_width: 32,
            mode: ModeSetting::TwoStage,
            palette: PaletteSetting::Free,
            custom_colors: Vec::new(),
            include_locked: false,
            locked_colors: Vec::new(),
            grid: false,
            export_scale: DEFAULT_EXPORT_SCALE,
            optimize_png: true,
            oversample: palette_quant::resample::DEFAULT_OVERSAMPLE,
            blur_sigma: palette_quant::resample::DEFAULT_BLUR_SIGMA,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from `$PIXELIZE_CONFIG`.
    ///
    /// A missing or broken file is never fatal: it is logged and the
    /// defaults are used.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(path) => PathBuf::from(path),
                None => {
                    tracing::debug!("No config file, using defaults");
                    return Self::default();
                }
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        target_width = config.target_width,
                        palette = ?config.palette,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Map the palette settings onto an engine color selection.
    pub fn color_selection(&self) -> ColorSelection {
        match self.palette {
            PaletteSetting::Custom => ColorSelection::Custom(self.custom_colors.clone()),
            PaletteSetting::Locked => ColorSelection::Custom(
                palette_quant::palette::LOCKED_COLORS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
            PaletteSetting::Free if self.include_locked => ColorSelection::Unlocked {
                include_locked: true,
                selected: self.locked_colors.clone(),
            },
            PaletteSetting::Free => ColorSelection::Free,
        }
    }

    /// Target width clamped to the supported range.
    pub fn target_width(&self) -> u32 {
        clamp_target_width(self.target_width)
    }

    /// A converter for `palette` with this config's resampling settings.
    pub fn converter(&self, palette: Palette) -> Converter {
        Converter::new(palette)
            .mode(self.mode.into())
            .oversample(self.oversample)
            .blur_sigma(self.blur_sigma)
    }
}
