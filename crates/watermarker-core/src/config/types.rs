//! Configuration sub-types: resolution, the config-file layout, logging.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target canvas size for the resize pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses the config-file form `"w,h"`.
impl FromStr for Resolution {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            ConfigError::ValidationError(format!(
                "resolution must be \"<width>,<height>\", got {s:?}"
            ))
        };

        let (w, h) = s.split_once(',').ok_or_else(invalid)?;
        let width = w.trim().parse::<u32>().map_err(|_| invalid())?;
        let height = h.trim().parse::<u32>().map_err(|_| invalid())?;
        Ok(Self { width, height })
    }
}

/// On-disk layout of the config-file variant.
///
/// Every key in `[WATERMARKER]` except `font` is required; there are no
/// defaults for this front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(rename = "WATERMARKER")]
    pub watermarker: WatermarkerSection,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The `[WATERMARKER]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatermarkerSection {
    /// Folder of pictures to process
    pub inputfolder: String,

    /// Folder for saving processed pictures
    pub outfolder: String,

    /// `"<width>,<height>"`
    pub resolution: String,

    /// Watermark opacity, 0.0 to 1.0
    pub opacity: f32,

    /// Text watermark angle in degrees
    pub angle: f32,

    /// Text watermark; empty disables the pass
    pub text: String,

    /// Path to the watermark image; empty disables the pass
    pub imagewatermark: String,

    /// Font file overriding the system lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
