//! Outcome of a batch run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Stage;

/// What a completed run wrote, pass by pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Passes in the order they ran; disabled passes are absent
    pub stages: Vec<StageReport>,

    /// Wall-clock time for the whole run
    pub duration_ms: u64,
}

impl BatchReport {
    /// Report for one pass, if it ran.
    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    /// Files written across all passes. A file touched by three passes counts
    /// three times.
    pub fn files_written(&self) -> usize {
        self.stages.iter().map(|s| s.files.len()).sum()
    }
}

/// One pass over a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: Stage,

    /// Output paths, in processing order
    pub files: Vec<PathBuf>,

    /// Size of the inputs read by this pass, in bytes
    pub input_bytes: u64,
}
