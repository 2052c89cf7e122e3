//! # Decoder Module
//!
//! Reads barcode payloads out of specimen images.
//!
//! The renamer only depends on the [`BarcodeDecoder`] trait. The shipped
//! implementation, [`RxingDecoder`], loads the picture as 8-bit luma through
//! [`ImageLoader`] and hands it to rxing's multi-barcode reader.

mod loader;
mod reader;

pub use reader::RxingDecoder;
pub use loader::ImageLoader;

use crate::error::DecodeError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One barcode found in an image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedBarcode {
    /// Text payload of the symbol
    pub text: String,
    /// Symbology reported by the decoder, e.g. `CODE_128`
    pub symbology: Option<String>,
}

impl DecodedBarcode {
    /// A payload with no symbology information
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            symbology: None,
        }
    }

    /// Attach the symbology name
    pub fn with_symbology(mut self, symbology: impl Into<String>) -> Self {
        self.symbology = Some(symbology.into());
        self
    }
}

/// Extracts barcode payloads from an image file
///
/// Implementations return every symbol found, in the decoder's reading
/// order. An image without barcodes is `Ok(vec![])`, not an error.
pub trait BarcodeDecoder: Send + Sync {
    /// Decode all barcodes in the image at `path`
    fn decode(&self, path: &Path) -> Result<Vec<DecodedBarcode>, DecodeError>;
}
