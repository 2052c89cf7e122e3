//! Types for the renamer module.

use crate::events::RunSummary;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What happened to one candidate image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenameOutcome {
    /// Renamed to `target` (planned only, in a dry run)
    Renamed { target: PathBuf },
    /// Already carries the name its barcode resolves to
    AlreadyNamed,
    /// Name starts with the reserved prefix; not decoded
    SkippedReservedPrefix,
    /// No usable barcode in the image
    SkippedNoBarcode,
    /// Decoding or renaming failed; the file keeps its original name
    Failed { reason: String },
}

impl RenameOutcome {
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            RenameOutcome::AlreadyNamed
                | RenameOutcome::SkippedReservedPrefix
                | RenameOutcome::SkippedNoBarcode
        )
    }
}

/// Outcome for one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path the file had when the run started
    pub source: PathBuf,
    #[serde(flatten)]
    pub outcome: RenameOutcome,
}

/// Result of a run over one folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameReport {
    pub root: PathBuf,
    pub dry_run: bool,
    /// One record per candidate image, in processing order
    pub records: Vec<FileRecord>,
    /// Unreadable entries met during traversal
    pub scan_errors: Vec<String>,
    pub duration_ms: u64,
}

impl RenameReport {
    /// `(source, target)` for every rename performed or planned
    pub fn renames(&self) -> impl Iterator<Item = (&PathBuf, &PathBuf)> + '_ {
        self.records.iter().filter_map(|r| match &r.outcome {
            RenameOutcome::Renamed { target } => Some((&r.source, target)),
            _ => None,
        })
    }

    pub fn renamed_count(&self) -> usize {
        self.renames().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_skip()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, RenameOutcome::Failed { .. }))
            .count()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            total_images: self.records.len(),
            renamed: self.renamed_count(),
            skipped: self.skipped_count(),
            failed: self.failed_count(),
            duration_ms: self.duration_ms,
        }
    }
}
