//! # Error Module
//!
//! Error types for the barcode renamer.
//!
//! Per-file problems (an unreadable image, a rename that the filesystem
//! refuses) are recorded in the run report and processing continues. Only
//! problems that make the whole run meaningless, such as a missing root
//! folder, surface as a top-level error.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum BarcodeRenameError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Failed to write report: {0}")]
    Report(String),

    #[error("{failed} file(s) could not be processed; they were left under their original names")]
    Incomplete { failed: usize },
}

/// Errors that occur while walking the target folder
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while loading an image or reading its barcodes
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to open image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {reason}")]
    Image { path: PathBuf, reason: String },

    #[error("No embedded JPEG preview found in raw file {path}")]
    NoEmbeddedPreview { path: PathBuf },

    #[error("Barcode reader failed on {path}: {reason}")]
    Barcode { path: PathBuf, reason: String },
}

/// Errors that occur while renaming a file
#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Refusing to rename {from} to {to}: target already exists")]
    TargetExists { from: PathBuf, to: PathBuf },

    #[error("Failed to rename {from} to {to}: {source}")]
    Io {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, BarcodeRenameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_includes_path() {
        let error = ScanError::DirectoryNotFound {
            path: PathBuf::from("/specimens/box12"),
        };
        assert!(error.to_string().contains("/specimens/box12"));
    }

    #[test]
    fn decode_error_includes_path_and_reason() {
        let error = DecodeError::Image {
            path: PathBuf::from("/specimens/broken.tif"),
            reason: "truncated strip".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/specimens/broken.tif"));
        assert!(message.contains("truncated strip"));
    }

    #[test]
    fn target_exists_names_both_paths() {
        let error = RenameError::TargetExists {
            from: PathBuf::from("/specimens/IMG_0001.jpg"),
            to: PathBuf::from("/specimens/NBGW5.jpg"),
        };
        let message = error.to_string();
        assert!(message.contains("IMG_0001.jpg"));
        assert!(message.contains("NBGW5.jpg"));
    }

    #[test]
    fn incomplete_reports_count() {
        let error = BarcodeRenameError::Incomplete { failed: 3 };
        assert!(error.to_string().starts_with("3 file(s)"));
    }
}
