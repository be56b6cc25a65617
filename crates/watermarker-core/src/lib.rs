//! Watermarker Core - batch resizing and watermarking of photo folders.
//!
//! A run resizes every `.png`/`.jpg` in an input folder onto a fixed canvas,
//! then stamps the results in the output folder with a text watermark and/or
//! an image watermark.
//!
//! # Architecture
//!
//! ```text
//! BatchConfig → BatchDriver → resize pass → text pass → image pass → BatchReport
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use watermarker_core::{BatchConfig, BatchDriver, Resolution};
//!
//! fn main() -> watermarker_core::Result<()> {
//!     let config = BatchConfig {
//!         input_dir: "./photos".into(),
//!         output_dir: "./proofs".into(),
//!         resolution: Some(Resolution::new(900, 600)),
//!         text: Some("PROOF".into()),
//!         ..BatchConfig::default()
//!     };
//!     let report = BatchDriver::new(config)?.run()?;
//!     println!("{} files written", report.files_written());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::{BatchConfig, ConfigFile, LoggingConfig, Resolution};
pub use error::{ConfigError, PipelineError, PipelineResult, Result, Stage, WatermarkerError};
pub use pipeline::{BatchDriver, BatchObserver, DiscoveredFile};
pub use types::{BatchReport, StageReport};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
