//! Configuration validation with range checks.

use std::path::Path;

use crate::error::ConfigError;

use super::BatchConfig;

impl BatchConfig {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::ValidationError(format!(
                "opacity must be between 0.0 and 1.0, got {}",
                self.opacity
            )));
        }
        if !self.angle.is_finite() {
            return Err(ConfigError::ValidationError(
                "angle must be a finite number of degrees".into(),
            ));
        }
        if let Some(resolution) = self.resolution {
            if resolution.width == 0 || resolution.height == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "resolution must be positive, got {resolution}"
                )));
            }
        }
        if matches!(self.text.as_deref(), Some("")) {
            return Err(ConfigError::ValidationError(
                "text watermark must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Check the folders before anything is written.
    ///
    /// The input folder is only needed when resizing; the output folder must
    /// exist and accept writes whenever any pass runs.
    pub fn validate_paths(&self) -> Result<(), ConfigError> {
        if self.resolution.is_some() && !self.input_dir.is_dir() {
            return Err(ConfigError::ValidationError(format!(
                "input folder {} is not a directory",
                self.input_dir.display()
            )));
        }

        let meta = std::fs::metadata(&self.output_dir).map_err(|e| {
            ConfigError::ValidationError(format!(
                "output folder {}: {e}",
                self.output_dir.display()
            ))
        })?;
        if !meta.is_dir() {
            return Err(ConfigError::ValidationError(format!(
                "output folder {} is not a directory",
                self.output_dir.display()
            )));
        }
        check_writable(&self.output_dir)?;

        if let Some(watermark) = &self.image_watermark {
            if !watermark.is_file() {
                return Err(ConfigError::ValidationError(format!(
                    "watermark image {} does not exist",
                    watermark.display()
                )));
            }
        }
        Ok(())
    }
}

/// Name of the marker file used to prove the output folder accepts writes.
const WRITE_CHECK_FILE: &str = ".watermarker-write-check";

/// Create and remove a marker file. Mode bits alone do not say whether this
/// process may write, so an actual write is attempted.
fn check_writable(dir: &Path) -> Result<(), ConfigError> {
    let marker = dir.join(WRITE_CHECK_FILE);
    std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&marker)
        .and_then(|_| std::fs::remove_file(&marker))
        .map_err(|e| {
            ConfigError::ValidationError(format!(
                "output folder {} is not writable: {e}",
                dir.display()
            ))
        })
}
