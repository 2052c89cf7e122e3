//! Directory walking implementation using walkdir.

use super::filter::{is_hidden, ImageFilter};
use super::{ImageFile, ScanResult};
use crate::error::ScanError;
use crate::events::{null_sender, Event, EventSender, ScanEvent};
use std::path::Path;
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Descend into subdirectories
    pub recursive: bool,
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Visit entries sorted by file name instead of listing order
    pub sort_entries: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            follow_symlinks: false,
            include_hidden: true,
            sort_entries: false,
        }
    }
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let filter = ImageFilter::new().with_hidden(config.include_hidden);
        Self { config, filter }
    }

    /// Scan a folder for candidate images
    pub fn scan(&self, root: &Path) -> Result<ScanResult, ScanError> {
        self.scan_with_events(root, &null_sender())
    }

    /// Scan with per-error progress events
    ///
    /// Fails only when `root` itself is unusable; unreadable entries below it
    /// are collected in [`ScanResult::errors`].
    pub fn scan_with_events(
        &self,
        root: &Path,
        events: &EventSender,
    ) -> Result<ScanResult, ScanError> {
        if !root.exists() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        if !root.is_dir() {
            return Err(ScanError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        events.send(Event::Scan(ScanEvent::Started {
            root: root.to_path_buf(),
        }));

        let mut images = Vec::new();
        let mut errors = Vec::new();

        let mut walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);

        if !self.config.recursive {
            walker = walker.max_depth(1);
        }

        if self.config.sort_entries {
            walker = walker.sort_by_file_name();
        }

        let include_hidden = self.config.include_hidden;
        let entries = walker
            .into_iter()
            .filter_entry(move |e| include_hidden || e.depth() == 0 || !is_hidden(e.path()));

        for entry_result in entries {
            match entry_result {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if !self.filter.should_include(path) {
                        continue;
                    }

                    match entry.metadata() {
                        Ok(metadata) => images.push(ImageFile {
                            path: path.to_path_buf(),
                            size: metadata.len(),
                            format: self.filter.get_format(path),
                        }),
                        Err(e) => {
                            let error = walk_error(e);
                            report(events, &error);
                            errors.push(error);
                        }
                    }
                }
                Err(e) => {
                    let error = walk_error(e);
                    report(events, &error);
                    errors.push(error);
                }
            }
        }

        tracing::debug!(
            root = %root.display(),
            images = images.len(),
            errors = errors.len(),
            "scan finished"
        );

        events.send(Event::Scan(ScanEvent::Completed {
            total_images: images.len(),
        }));

        Ok(ScanResult { images, errors })
    }
}

fn walk_error(e: walkdir::Error) -> ScanError {
    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();

    if e.io_error().map(|io| io.kind()) == Some(std::io::ErrorKind::PermissionDenied) {
        ScanError::PermissionDenied { path }
    } else {
        let message = e.to_string();
        let source = e
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, message));
        ScanError::ReadDirectory { path, source }
    }
}

fn report(events: &EventSender, error: &ScanError) {
    let path = match error {
        ScanError::DirectoryNotFound { path }
        | ScanError::NotADirectory { path }
        | ScanError::PermissionDenied { path }
        | ScanError::ReadDirectory { path, .. } => path.clone(),
    };

    tracing::warn!(path = %path.display(), "{}", error);

    events.send(Event::Scan(ScanEvent::Error {
        path,
        message: error.to_string(),
    }));
}
