//! File filtering logic for the scanner.

use super::ImageFormat;
use std::path::Path;

/// Decides which files are candidate specimen images
///
/// The allow-list is fixed to `.jpg`, `.cr2` and `.tif` (any case).
#[derive(Debug, Clone)]
pub struct ImageFilter {
    /// Whether to include hidden files
    include_hidden: bool,
}

impl ImageFilter {
    pub fn new() -> Self {
        Self {
            include_hidden: true,
        }
    }

    /// Include hidden files (starting with .)
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Check if a file should be included
    pub fn should_include(&self, path: &Path) -> bool {
        if !self.include_hidden && is_hidden(path) {
            return false;
        }

        self.get_format(path).is_supported()
    }

    /// Get the image format for a path
    pub fn get_format(&self, path: &Path) -> ImageFormat {
        path.extension()
            .and_then(|e| e.to_str())
            .map(ImageFormat::from_extension)
            .unwrap_or(ImageFormat::Unknown)
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the last path component starts with a dot
pub(crate) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_includes_allow_listed_extensions() {
        let filter = ImageFilter::new();
        assert!(filter.should_include(Path::new("/specimens/a.jpg")));
        assert!(filter.should_include(Path::new("/specimens/b.cr2")));
        assert!(filter.should_include(Path::new("/specimens/c.tif")));
    }

    #[test]
    fn filter_matches_case_insensitively() {
        let filter = ImageFilter::new();
        assert!(filter.should_include(Path::new("/specimens/IMG_0001.JPG")));
        assert!(filter.should_include(Path::new("/specimens/IMG_0002.Cr2")));
    }

    #[test]
    fn filter_excludes_other_files() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/specimens/notes.txt")));
        assert!(!filter.should_include(Path::new("/specimens/scan.jpeg")));
        assert!(!filter.should_include(Path::new("/specimens/no_extension")));
    }

    #[test]
    fn filter_includes_hidden_by_default() {
        let filter = ImageFilter::new();
        assert!(filter.should_include(Path::new("/specimens/.hidden.jpg")));
    }

    #[test]
    fn filter_can_exclude_hidden() {
        let filter = ImageFilter::new().with_hidden(false);
        assert!(!filter.should_include(Path::new("/specimens/.hidden.jpg")));
        assert!(filter.should_include(Path::new("/specimens/visible.jpg")));
    }

    #[test]
    fn format_follows_extension() {
        let filter = ImageFilter::new();
        assert_eq!(filter.get_format(Path::new("/specimens/a.TIF")), ImageFormat::Tiff);
        assert_eq!(filter.get_format(Path::new("/specimens/a.png")), ImageFormat::Unknown);
        assert_eq!(filter.get_format(Path::new("/specimens/a")), ImageFormat::Unknown);
    }
}
