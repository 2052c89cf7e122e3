//! # Renamer Module
//!
//! Walks a folder and renames each specimen image after its barcode.
//!
//! ## Per-file Steps
//! 1. **Guard** - names already starting with `NBGW` are skipped
//! 2. **Decode** - read every barcode in the image
//! 3. **Select** - pick the identifier (see [`crate::core::naming`])
//! 4. **Claim** - resolve repeats through the run's registry
//! 5. **Rename** - in place, never over an existing file
//!
//! ## Reruns
//! A file already called after its barcode, bare or with a collision
//! suffix (`XYZ123.jpg`, `XYZ123_D.jpg`), is reported as already named and
//! claims nothing. When a claimed name is taken on disk, for instance by a
//! photo kept from an earlier run, the claim moves on to the next suffix
//! until a free name turns up. A new photo of specimen `NBGW5` next to an
//! existing `NBGW5.jpg` therefore becomes `NBGW5_B.jpg`.
//!
//! Files are handled strictly one after another. A failure on one file is
//! recorded and the run moves on.
//!
//! Suffixes depend on the order files are visited. Unless
//! [`RenamerBuilder::sort_entries`] is set that order is whatever the
//! directory listing returns, so two runs over differently-listed copies
//! of a folder may hand `_B` to different files.

mod executor;
mod types;

pub use executor::{RenameConfig, Renamer, RenamerBuilder};
pub use types::{FileRecord, RenameOutcome, RenameReport};
