//! # barcode-rename CLI
//!
//! Command-line interface for the barcode renamer.
//!
//! ## Usage
//! ```bash
//! barcode-rename ~/Specimens/Batch7
//! barcode-rename ~/Specimens/Batch7 --dry-run --output json
//! ```

mod cli;

use barcode_renamer::Result;

fn main() -> Result<()> {
    cli::run()
}
