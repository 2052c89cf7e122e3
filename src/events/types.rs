//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted while renaming a folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Traversal events
    Scan(ScanEvent),
    /// Per-file outcome events
    Rename(RenameEvent),
    /// Run-level events
    Run(RunEvent),
}

/// Events during traversal of the target folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Traversal has started
    Started { root: PathBuf },
    /// A directory entry could not be read; traversal continues
    Error { path: PathBuf, message: String },
    /// Traversal completed
    Completed { total_images: usize },
}

/// Events describing what happened to a single image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RenameEvent {
    /// The image is about to be decoded
    Decoding { path: PathBuf, index: usize, total: usize },
    /// The image was renamed (or would be, in a dry run)
    Renamed {
        from: PathBuf,
        to: PathBuf,
        dry_run: bool,
    },
    /// The image already carries the name its barcode resolves to
    AlreadyNamed { path: PathBuf },
    /// The file name already starts with the reserved prefix
    SkippedReservedPrefix { path: PathBuf },
    /// No usable barcode was found in the image
    SkippedNoBarcode { path: PathBuf },
    /// Decoding or renaming failed; the file keeps its name
    Failed { path: PathBuf, message: String },
}

/// Run-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEvent {
    /// Run has started
    Started { dry_run: bool },
    /// Run completed
    Completed { summary: RunSummary },
}

/// Summary of a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Candidate images found by the scan
    pub total_images: usize,
    /// Images renamed (or planned, in a dry run)
    pub renamed: usize,
    /// Images left alone without error
    pub skipped: usize,
    /// Images that could not be decoded or renamed
    pub failed: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}
