//! Batch execution with per-stage progress bars and a closing summary.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use watermarker_core::{BatchConfig, BatchDriver, BatchObserver, BatchReport, Stage};

/// Run one batch; prints the summary to stderr and, if asked, the report to stdout.
pub fn execute(config: BatchConfig, print_report: bool) -> anyhow::Result<()> {
    let driver = BatchDriver::new(config)?;

    let mut progress = ProgressObserver::default();
    let result = driver.run_with(&mut progress);
    progress.clear();
    let report = result.inspect_err(|e| {
        if let Some(stage) = e.stage() {
            tracing::error!("Batch aborted during the {} stage", stage);
        }
    })?;

    print_summary(&report);
    if print_report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

/// Drives one progress bar per stage.
#[derive(Default)]
struct ProgressObserver {
    bar: Option<ProgressBar>,
    finished: usize,
}

impl ProgressObserver {
    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl BatchObserver for ProgressObserver {
    fn stage_started(&mut self, stage: Stage, total: usize) {
        self.clear();
        self.bar = Some(create_progress_bar(stage, total as u64));
    }

    fn file_finished(&mut self, _stage: Stage, output: &Path) {
        self.finished += 1;
        if let Some(bar) = &self.bar {
            bar.inc(1);
            if let Some(name) = output.file_name() {
                bar.set_message(name.to_string_lossy().into_owned());
            }
        }
    }

    fn stage_finished(&mut self, _stage: Stage, _count: usize) {
        self.clear();
    }
}

/// Create a progress bar for one stage.
fn create_progress_bar(stage: Stage, total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} {prefix:>15} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    pb.set_style(style);
    pb.set_prefix(stage.to_string());
    pb
}

/// Lines of the closing summary.
fn summary_lines(report: &BatchReport) -> Vec<String> {
    let mut lines = vec![
        "  ====================================".to_string(),
        "               Summary".to_string(),
        "  ====================================".to_string(),
    ];
    if report.stages.is_empty() {
        lines.push("    Nothing to do".to_string());
    }
    for stage in &report.stages {
        lines.push(format!(
            "    {:<16}{:>6} file(s) {:>8.1} MB read",
            stage.stage.as_str(),
            stage.files.len(),
            stage.input_bytes as f64 / 1_000_000.0
        ));
    }
    lines.push("  ------------------------------------".to_string());
    lines.push(format!("    Written:      {:>8}", report.files_written()));
    lines.push(format!(
        "    Duration:     {:>7.1}s",
        report.duration_ms as f64 / 1000.0
    ));
    lines.push("  ====================================".to_string());
    lines
}

/// Print the summary table to stderr.
fn print_summary(report: &BatchReport) {
    eprintln!();
    for line in summary_lines(report) {
        eprintln!("{line}");
    }
}
