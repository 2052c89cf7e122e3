//! # Scanner Module
//!
//! Discovers specimen images in a folder.
//!
//! ## Supported Formats
//! - JPEG (.jpg)
//! - Canon raw (.cr2)
//! - TIFF (.tif)
//!
//! Extensions are matched case-insensitively, so `IMG_0001.JPG` qualifies.
//!
//! ## Example
//! ```rust,ignore
//! use barcode_renamer::core::scanner::{ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let result = scanner.scan(Path::new("/data/specimens"))?;
//! ```

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A discovered candidate image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    /// Path to the image file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Detected image format
    pub format: ImageFormat,
}

impl ImageFile {
    /// The file name as UTF-8, lossily converted
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Image formats the renamer knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Cr2,
    Tiff,
    Unknown,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" => ImageFormat::Jpeg,
            "cr2" => ImageFormat::Cr2,
            "tif" => ImageFormat::Tiff,
            _ => ImageFormat::Unknown,
        }
    }

    /// Check if this format is supported
    pub fn is_supported(&self) -> bool {
        !matches!(self, ImageFormat::Unknown)
    }
}

/// Result of a scan operation
#[derive(Debug)]
pub struct ScanResult {
    /// Candidate images in traversal order
    pub images: Vec<ImageFile>,
    /// Errors that occurred during scanning (non-fatal)
    pub errors: Vec<ScanError>,
}
