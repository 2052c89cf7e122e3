//! Barcode decoding backed by rxing.

use super::{BarcodeDecoder, DecodedBarcode, ImageLoader};
use crate::error::DecodeError;
use rxing::Exceptions;
use std::path::Path;

/// Multi-symbology decoder (Code 128, Code 39, QR, Data Matrix, ...)
#[derive(Debug, Clone, Copy, Default)]
pub struct RxingDecoder;

impl RxingDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl BarcodeDecoder for RxingDecoder {
    fn decode(&self, path: &Path) -> Result<Vec<DecodedBarcode>, DecodeError> {
        let luma = ImageLoader::load_luma(path)?;
        let (width, height) = luma.dimensions();

        match rxing::helpers::detect_multiple_in_luma(luma.into_raw(), width, height) {
            Ok(results) => {
                let barcodes: Vec<DecodedBarcode> = results
                    .iter()
                    .map(|r| {
                        DecodedBarcode::new(r.getText())
                            .with_symbology(format!("{:?}", r.getBarcodeFormat()))
                    })
                    .collect();
                tracing::debug!(
                    path = %path.display(),
                    count = barcodes.len(),
                    "decoded barcodes"
                );
                Ok(barcodes)
            }
            // rxing reports "nothing on this page" as an error
            Err(Exceptions::NotFoundException(_)) => Ok(Vec::new()),
            Err(e) => Err(DecodeError::Barcode {
                path: path.to_path_buf(),
                reason: format!("{:?}", e),
            }),
        }
    }
}
