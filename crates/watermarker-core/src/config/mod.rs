//! Batch configuration.
//!
//! A run is described by one immutable [`BatchConfig`]. It is built either from
//! command-line flags (by the binary) or from a TOML config file with a
//! `[WATERMARKER]` table, and is never modified after startup.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Opacity applied to watermarks when none is configured.
pub const DEFAULT_OPACITY: f32 = 0.25;

/// Text watermark rotation in degrees when none is configured.
pub const DEFAULT_ANGLE: f32 = 25.0;

/// Everything one batch run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Folder the resize pass reads from
    pub input_dir: PathBuf,

    /// Folder every pass writes to; the watermark passes also read from it
    pub output_dir: PathBuf,

    /// Target canvas for the resize pass; `None` skips resizing
    pub resolution: Option<Resolution>,

    /// Text watermark; `None` skips the text pass
    pub text: Option<String>,

    /// Watermark image; `None` skips the image pass
    pub image_watermark: Option<PathBuf>,

    /// Alpha multiplier for both watermark kinds, 0.0 to 1.0
    pub opacity: f32,

    /// Counter-clockwise rotation of the text watermark, in degrees
    pub angle: f32,

    /// Font file; `None` uses the platform lookup
    pub font: Option<PathBuf>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            resolution: None,
            text: None,
            image_watermark: None,
            opacity: DEFAULT_OPACITY,
            angle: DEFAULT_ANGLE,
            font: None,
        }
    }
}

impl BatchConfig {
    /// Load and validate the config-file variant.
    pub fn load_from(path: &Path) -> Result<(Self, LoggingConfig), ConfigError> {
        let file = ConfigFile::load_from(path)?;
        let logging = file.logging.clone();
        let config = Self::try_from(file)?;
        Ok((config, logging))
    }

    /// Whether any pass is enabled at all.
    pub fn has_work(&self) -> bool {
        self.resolution.is_some() || self.text.is_some() || self.image_watermark.is_some()
    }
}

impl ConfigFile {
    /// Read and parse a config file without converting it.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse config-file contents.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

impl TryFrom<ConfigFile> for BatchConfig {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        let section = file.watermarker;
        let config = Self {
            input_dir: expand_path(&section.inputfolder),
            output_dir: expand_path(&section.outfolder),
            resolution: Some(section.resolution.parse()?),
            text: non_empty(section.text),
            image_watermark: non_empty(section.imagewatermark).map(|p| expand_path(&p)),
            opacity: section.opacity,
            angle: section.angle,
            font: section.font.and_then(non_empty).map(|p| expand_path(&p)),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
