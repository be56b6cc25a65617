//! Batch driver: three ordered passes over a folder.
//!
//! ```text
//! input/  --resize-->  output/  --text-->  output/  --image-->  output/
//! ```
//!
//! Each pass lists its folder afresh, so later passes see what earlier passes
//! wrote. The first failing file aborts the run.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::{BatchConfig, Resolution};
use crate::error::{PipelineResult, Result, Stage};
use crate::types::{BatchReport, StageReport};

use super::codec;
use super::discovery::FileDiscovery;
use super::font;
use super::overlay::ImageWatermark;
use super::resize::resize;
use super::text::TextWatermark;

/// Receives progress events while a batch runs.
///
/// All methods default to no-ops; `()` ignores everything.
pub trait BatchObserver {
    fn stage_started(&mut self, _stage: Stage, _total: usize) {}
    fn file_finished(&mut self, _stage: Stage, _output: &Path) {}
    fn stage_finished(&mut self, _stage: Stage, _count: usize) {}
}

impl BatchObserver for () {}

/// Runs the configured passes for one batch.
pub struct BatchDriver {
    config: BatchConfig,
    discovery: FileDiscovery,
}

impl BatchDriver {
    /// Create a driver after checking the configuration values.
    pub fn new(config: BatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            discovery: FileDiscovery::new(),
        })
    }

    /// Get a reference to the run configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Run every configured pass without progress reporting.
    pub fn run(&self) -> Result<BatchReport> {
        self.run_with(&mut ())
    }

    /// Run every configured pass, reporting progress to `observer`.
    ///
    /// Folders, the font and the watermark image are all checked before the
    /// first file is written.
    pub fn run_with(&self, observer: &mut dyn BatchObserver) -> Result<BatchReport> {
        let start = Instant::now();
        let mut report = BatchReport::default();

        if !self.config.has_work() {
            tracing::warn!("Nothing to do: no resolution, text or watermark image configured");
            return Ok(report);
        }

        self.config.validate_paths()?;
        let text = self.prepare_text()?;
        let image = self.prepare_image()?;

        // Never resize or stamp the watermark file itself.
        let protected = self
            .config
            .image_watermark
            .as_deref()
            .and_then(|p| p.canonicalize().ok());

        if let Some(target) = self.config.resolution {
            let stage = self.run_stage(
                Stage::Resize,
                &self.config.input_dir,
                protected.as_deref(),
                observer,
                |src, dest| resize_file(src, dest, target),
            )?;
            report.stages.push(stage);
        }

        if let Some(text) = &text {
            let stage = self.run_stage(
                Stage::TextWatermark,
                &self.config.output_dir,
                protected.as_deref(),
                observer,
                |src, dest| text_file(src, dest, text),
            )?;
            report.stages.push(stage);
        }

        if let Some(image) = &image {
            let stage = self.run_stage(
                Stage::ImageWatermark,
                &self.config.output_dir,
                protected.as_deref(),
                observer,
                |src, dest| image_file(src, dest, image),
            )?;
            report.stages.push(stage);
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Batch complete: {} file(s) written in {}ms",
            report.files_written(),
            report.duration_ms
        );
        Ok(report)
    }

    fn prepare_text(&self) -> Result<Option<TextWatermark>> {
        let Some(text) = &self.config.text else {
            return Ok(None);
        };
        let font = font::load_watermark_font(self.config.font.as_deref())?;
        Ok(Some(TextWatermark::new(
            font,
            text.clone(),
            self.config.angle,
            self.config.opacity,
        )))
    }

    fn prepare_image(&self) -> Result<Option<ImageWatermark>> {
        let Some(path) = &self.config.image_watermark else {
            return Ok(None);
        };
        let watermark = codec::load(path, Stage::ImageWatermark)?;
        let prepared = ImageWatermark::new(&watermark, self.config.opacity);
        tracing::debug!(
            "Loaded watermark {:?} ({}x{})",
            path,
            prepared.dimensions().0,
            prepared.dimensions().1
        );
        Ok(Some(prepared))
    }

    /// List `source_dir`, run `process(source, destination)` on every file,
    /// and collect the destinations.
    fn run_stage<F>(
        &self,
        stage: Stage,
        source_dir: &Path,
        skip: Option<&Path>,
        observer: &mut dyn BatchObserver,
        mut process: F,
    ) -> Result<StageReport>
    where
        F: FnMut(&Path, &Path) -> PipelineResult<()>,
    {
        let mut files = self.discovery.discover(source_dir)?;
        if let Some(skip) = skip {
            files.retain(|f| f.path.canonicalize().map_or(true, |p| p != skip));
        }

        tracing::info!(
            "{} pass: {} file(s) in {}",
            stage,
            files.len(),
            source_dir.display()
        );
        observer.stage_started(stage, files.len());

        let mut written: Vec<PathBuf> = Vec::with_capacity(files.len());
        for file in &files {
            let dest = self.config.output_dir.join(file.file_name());
            process(&file.path, &dest)?;
            tracing::debug!("{}: {:?} -> {:?}", stage, file.path, dest);
            observer.file_finished(stage, &dest);
            written.push(dest);
        }

        tracing::info!("{} pass done: {} file(s) written", stage, written.len());
        observer.stage_finished(stage, written.len());
        Ok(StageReport {
            stage,
            files: written,
            input_bytes: FileDiscovery::total_size(&files),
        })
    }
}

/// Resize onto the target canvas; PNG stays PNG, JPG is written as JPEG.
fn resize_file(src: &Path, dest: &Path, target: Resolution) -> PipelineResult<()> {
    let image = codec::load(src, Stage::Resize)?;
    let canvas = resize(&image, target);
    codec::save_preserving_extension(&canvas.into(), dest, Stage::Resize)
}

/// Stamp text and always write JPEG data under the same name.
fn text_file(src: &Path, dest: &Path, text: &TextWatermark) -> PipelineResult<()> {
    let image = codec::load(src, Stage::TextWatermark)?;
    let marked = text.apply(&image);
    codec::save_jpeg(&marked.into(), dest, Stage::TextWatermark)
}

/// Stamp the watermark image, keeping the format the extension names.
fn image_file(src: &Path, dest: &Path, watermark: &ImageWatermark) -> PipelineResult<()> {
    let image = codec::load(src, Stage::ImageWatermark)?;
    let marked = watermark.apply(&image);
    codec::save_preserving_extension(&marked.into(), dest, Stage::ImageWatermark)
}
