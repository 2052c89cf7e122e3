//! # Core Module
//!
//! The front-end agnostic renaming engine.
//!
//! ## Modules
//! - `scanner` - Discovers candidate images in a folder
//! - `decoder` - Loads images and reads their barcodes
//! - `naming` - Selection policy and collision suffixes
//! - `renamer` - Orchestrates a run and performs the renames

pub mod decoder;
pub mod naming;
pub mod renamer;
pub mod scanner;

// Re-export commonly used types
pub use decoder::{BarcodeDecoder, DecodedBarcode, RxingDecoder};
pub use naming::{BaseFilename, FilenameRegistry, RESERVED_PREFIX};
pub use renamer::{RenameOutcome, RenameReport, Renamer};
pub use scanner::ImageFile;
