//! Renamer execution implementation.

use super::types::{FileRecord, RenameOutcome, RenameReport};
use crate::core::decoder::{BarcodeDecoder, RxingDecoder};
use crate::core::naming::{
    base_filename, has_reserved_prefix, select_identifier, FilenameRegistry, RESERVED_PREFIX,
};
use crate::core::scanner::{ImageFile, ScanConfig, WalkDirScanner};
use crate::error::{BarcodeRenameError, RenameError};
use crate::events::{null_sender, Event, EventSender, RenameEvent, RunEvent};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Configuration for a rename run
#[derive(Debug, Clone)]
pub struct RenameConfig {
    /// Folder to process
    pub root: PathBuf,
    /// Scanner configuration
    pub scan_config: ScanConfig,
    /// Report what would happen without touching the filesystem
    pub dry_run: bool,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            scan_config: ScanConfig::default(),
            dry_run: false,
        }
    }
}

/// Builder for renamer configuration
pub struct RenamerBuilder {
    config: RenameConfig,
    decoder: Option<Box<dyn BarcodeDecoder>>,
}

impl RenamerBuilder {
    /// Create a new renamer builder
    pub fn new() -> Self {
        Self {
            config: RenameConfig::default(),
            decoder: None,
        }
    }

    /// Set the folder to process
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root = root.into();
        self
    }

    /// Set the barcode decoder
    pub fn decoder(mut self, decoder: Box<dyn BarcodeDecoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Descend into subdirectories
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.config.scan_config.recursive = recursive;
        self
    }

    /// Include hidden files
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.config.scan_config.include_hidden = include;
        self
    }

    /// Follow symbolic links while walking
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.config.scan_config.follow_symlinks = follow;
        self
    }

    /// Visit files sorted by name so suffixes are reproducible
    pub fn sort_entries(mut self, sort: bool) -> Self {
        self.config.scan_config.sort_entries = sort;
        self
    }

    /// Plan renames without performing them
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    /// Build the renamer
    pub fn build(self) -> Renamer {
        Renamer {
            config: self.config,
            decoder: self.decoder.unwrap_or_else(|| Box::new(RxingDecoder::new())),
        }
    }
}

impl Default for RenamerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Renames specimen images after their barcodes
pub struct Renamer {
    config: RenameConfig,
    decoder: Box<dyn BarcodeDecoder>,
}

impl Renamer {
    /// Create a new renamer builder
    pub fn builder() -> RenamerBuilder {
        RenamerBuilder::new()
    }

    /// Run without events
    pub fn run(&self) -> Result<RenameReport, BarcodeRenameError> {
        self.run_with_events(&null_sender())
    }

    /// Run with event reporting
    ///
    /// Errs only when the root folder cannot be scanned. Every per-file
    /// problem ends up as a [`RenameOutcome::Failed`] record.
    pub fn run_with_events(&self, events: &EventSender) -> Result<RenameReport, BarcodeRenameError> {
        let start_time = Instant::now();
        let root = &self.config.root;

        events.send(Event::Run(RunEvent::Started {
            dry_run: self.config.dry_run,
        }));

        let scanner = WalkDirScanner::new(self.config.scan_config.clone());
        let scan_result = scanner.scan_with_events(root, events)?;

        let scan_errors: Vec<String> = scan_result.errors.iter().map(|e| e.to_string()).collect();
        let total = scan_result.images.len();

        tracing::info!(
            root = %root.display(),
            images = total,
            dry_run = self.config.dry_run,
            "starting rename run"
        );

        // One registry per run; never shared between runs
        let mut registry = FilenameRegistry::new();
        let mut records = Vec::with_capacity(total);

        for (index, image) in scan_result.images.iter().enumerate() {
            events.send(Event::Rename(RenameEvent::Decoding {
                path: image.path.clone(),
                index,
                total,
            }));

            let outcome = self.process(image, &mut registry);
            events.send(Event::Rename(outcome_event(&image.path, &outcome, self.config.dry_run)));

            records.push(FileRecord {
                source: image.path.clone(),
                outcome,
            });
        }

        let report = RenameReport {
            root: root.clone(),
            dry_run: self.config.dry_run,
            records,
            scan_errors,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        events.send(Event::Run(RunEvent::Completed {
            summary: report.summary(),
        }));

        Ok(report)
    }

    fn process(&self, image: &ImageFile, registry: &mut FilenameRegistry) -> RenameOutcome {
        let file_name = image.file_name();

        if has_reserved_prefix(&file_name) {
            tracing::info!(
                "Skipping {} as it already starts with '{}'",
                file_name,
                RESERVED_PREFIX
            );
            return RenameOutcome::SkippedReservedPrefix;
        }

        let barcodes = match self.decoder.decode(&image.path) {
            Ok(barcodes) => barcodes,
            Err(e) => {
                tracing::warn!(path = %image.path.display(), "{}", e);
                return RenameOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let Some(base) = select_identifier(&barcodes).and_then(|s| base_filename(&s, &image.path))
        else {
            tracing::info!("Skipping {} as barcode data is empty", file_name);
            return RenameOutcome::SkippedNoBarcode;
        };

        if base.matches_file_name(&file_name) {
            tracing::debug!(path = %image.path.display(), "already named after its barcode");
            return RenameOutcome::AlreadyNamed;
        }

        // Files kept from earlier runs still hold their names on disk
        let target = loop {
            let candidate = image.path.with_file_name(registry.claim(&base));
            if !is_occupied(&candidate) {
                break candidate;
            }
            tracing::debug!(taken = %candidate.display(), "name in use, trying next suffix");
        };

        match self.rename(&image.path, &target) {
            Ok(()) => {
                tracing::info!(
                    from = %image.path.display(),
                    to = %target.display(),
                    dry_run = self.config.dry_run,
                    "renamed"
                );
                RenameOutcome::Renamed { target }
            }
            Err(e) => {
                tracing::warn!("{}", e);
                RenameOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Rename within the directory, refusing to replace an existing entry
    fn rename(&self, from: &Path, to: &Path) -> Result<(), RenameError> {
        if is_occupied(to) {
            return Err(RenameError::TargetExists {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
            });
        }

        if self.config.dry_run {
            return Ok(());
        }

        fs::rename(from, to).map_err(|source| RenameError::Io {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })
    }
}

/// Anything at `path`, a dangling symlink included
fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn outcome_event(path: &Path, outcome: &RenameOutcome, dry_run: bool) -> RenameEvent {
    let path = path.to_path_buf();
    match outcome {
        RenameOutcome::Renamed { target } => RenameEvent::Renamed {
            from: path,
            to: target.clone(),
            dry_run,
        },
        RenameOutcome::AlreadyNamed => RenameEvent::AlreadyNamed { path },
        RenameOutcome::SkippedReservedPrefix => RenameEvent::SkippedReservedPrefix { path },
        RenameOutcome::SkippedNoBarcode => RenameEvent::SkippedNoBarcode { path },
        RenameOutcome::Failed { reason } => RenameEvent::Failed {
            path,
            message: reason.clone(),
        },
    }
}
