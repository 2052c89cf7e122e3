//! # Barcode Renamer
//!
//! Renames specimen photographs after the barcode(s) printed on their labels.
//!
//! ## Behaviour
//! - Every `.jpg`, `.cr2` and `.tif` under a folder is decoded for barcodes
//! - `NBGW` specimen identifiers win over any other payload on the sheet
//! - Several `NBGW` labels on one sheet are joined with `-` in numeric order
//! - Repeated names within a run get `_B`, `_C`, ... suffixes
//! - Files already starting with `NBGW` are left alone, so reruns are safe
//!
//! ## Architecture
//! - `core` - Scanning, decoding, naming and renaming
//! - `events` - Progress events for whatever front end is attached
//! - `error` - Error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{BarcodeRenameError, Result};

/// Initialize tracing for the library
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` over `warn`.
/// Logs go to stderr so that stdout carries only the progress lines.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // A subscriber may already be installed (tests, embedding apps)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
