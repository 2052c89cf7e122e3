//! # Naming Module
//!
//! Turns decoded barcode payloads into file names.
//!
//! ## Selection
//! Payloads starting with [`RESERVED_PREFIX`] are specimen identifiers and
//! always win. When a sheet carries several of them they are sorted by the
//! number after the prefix (`NBGW7` before `NBGW100`) and joined with `-`.
//! Without any specimen identifier the first payload the decoder reported
//! is used.
//!
//! ## Collisions
//! [`FilenameRegistry`] counts how often each base name was produced in a
//! run and hands out `_B`, `_C`, ... suffixes for repeats.

mod registry;
mod selection;

pub use registry::{collision_suffix, FilenameRegistry};
pub use selection::{base_filename, sanitize_identifier, select_identifier, Selection};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of the institution's specimen barcodes
pub const RESERVED_PREFIX: &str = "NBGW";

/// A file name derived from a barcode, before any collision suffix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseFilename {
    /// Identifier taken from the barcode(s)
    pub stem: String,
    /// Original extension including the dot, case preserved; empty if none
    pub extension: String,
}

impl BaseFilename {
    pub fn new(stem: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            stem: stem.into(),
            extension: extension.into(),
        }
    }

    /// File name with `_{suffix}` inserted before the extension
    pub fn with_suffix(&self, suffix: &str) -> String {
        format!("{}_{}{}", self.stem, suffix, self.extension)
    }

    /// Whether `file_name` is this name, bare or with a collision suffix
    ///
    /// Such a file was produced by an earlier run and needs no new name.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let Some(rest) = file_name.strip_suffix(self.extension.as_str()) else {
            return false;
        };
        if rest == self.stem {
            return true;
        }

        rest.strip_prefix(self.stem.as_str())
            .and_then(|tail| tail.strip_prefix('_'))
            .is_some_and(registry::is_collision_suffix)
    }
}

impl fmt::Display for BaseFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.extension)
    }
}

/// Whether a file name marks an already processed image
pub fn has_reserved_prefix(file_name: &str) -> bool {
    file_name.starts_with(RESERVED_PREFIX)
}
