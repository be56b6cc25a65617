//! Error types for the watermarker pipeline.
//!
//! Errors are organized by concern so that a failed run reports which file and
//! which stage stopped it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for watermarker operations.
#[derive(Error, Debug)]
pub enum WatermarkerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

impl WatermarkerError {
    /// The stage that was running when the error occurred, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            WatermarkerError::Config(_) => None,
            WatermarkerError::Pipeline(e) => e.stage(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// None of the font locations exist
    #[error("Font not found, looked in: {}", display_paths(.candidates))]
    FontNotFound { candidates: Vec<PathBuf> },

    /// The font file exists but is not a usable TrueType font
    #[error("Invalid font {path}: {message}")]
    FontInvalid { path: PathBuf, message: String },
}

/// One pass of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Resize,
    TextWatermark,
    ImageWatermark,
}

impl Stage {
    /// Kebab-case name used in logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Resize => "resize",
            Stage::TextWatermark => "text-watermark",
            Stage::ImageWatermark => "image-watermark",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline processing errors. Each carries the offending path.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Directory listing failed
    #[error("Cannot list {dir}: {message}")]
    Discovery { dir: PathBuf, message: String },

    /// Image could not be opened or decoded
    #[error("Decode error in {stage} stage for {path}: {message}")]
    Decode {
        stage: Stage,
        path: PathBuf,
        message: String,
    },

    /// Image could not be encoded or written
    #[error("Encode error in {stage} stage for {path}: {message}")]
    Encode {
        stage: Stage,
        path: PathBuf,
        message: String,
    },
}

impl PipelineError {
    /// The stage the error belongs to, if it is tied to one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::Discovery { .. } => None,
            PipelineError::Decode { stage, .. } | PipelineError::Encode { stage, .. } => {
                Some(*stage)
            }
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience type alias for watermarker results.
pub type Result<T> = std::result::Result<T, WatermarkerError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
