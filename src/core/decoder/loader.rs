//! Image loading for barcode reading.
//!
//! JPEG and TIFF go through the image crate. Canon CR2 files are TIFF
//! containers whose first IFD points at a full-size JPEG preview; that
//! preview is what gets decoded, since label text is just as legible there
//! as in the raw sensor data.

use crate::core::scanner::ImageFormat as SourceFormat;
use crate::error::DecodeError;
use image::{GrayImage, ImageFormat, ImageReader};
use std::fs;
use std::path::Path;

const JPEG_SOI: [u8; 3] = [0xFF, 0xD8, 0xFF];
const TAG_STRIP_OFFSETS: u16 = 0x0111;
const TAG_STRIP_BYTE_COUNTS: u16 = 0x0117;
const TIFF_SHORT: u16 = 3;

/// Upper bound on embedded JPEG candidates tried in a raw file
const MAX_PREVIEW_CANDIDATES: usize = 8;

/// Loads images as 8-bit greyscale for the barcode reader
pub struct ImageLoader;

impl ImageLoader {
    /// Load the image at `path` as luma, choosing a strategy by extension
    pub fn load_luma(path: &Path) -> Result<GrayImage, DecodeError> {
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .map(SourceFormat::from_extension)
            .unwrap_or(SourceFormat::Unknown);

        match format {
            SourceFormat::Cr2 => Self::load_raw_preview(path),
            _ => Self::load_standard(path),
        }
    }

    /// Decode with the image crate, sniffing the real format from content
    fn load_standard(path: &Path) -> Result<GrayImage, DecodeError> {
        let io_error = |source| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        };

        let image = ImageReader::open(path)
            .map_err(io_error)?
            .with_guessed_format()
            .map_err(io_error)?
            .decode()
            .map_err(|e| DecodeError::Image {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(image.to_luma8())
    }

    /// Decode the embedded JPEG preview of a raw file
    fn load_raw_preview(path: &Path) -> Result<GrayImage, DecodeError> {
        let data = fs::read(path).map_err(|source| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(strip) = tiff_first_strip(&data) {
            match image::load_from_memory_with_format(strip, ImageFormat::Jpeg) {
                Ok(image) => return Ok(image.to_luma8()),
                Err(e) => tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "IFD0 preview did not decode, scanning for JPEG markers"
                ),
            }
        }

        largest_embedded_jpeg(&data).ok_or_else(|| DecodeError::NoEmbeddedPreview {
            path: path.to_path_buf(),
        })
    }
}

/// The byte range named by IFD0's StripOffsets/StripByteCounts, if any
fn tiff_first_strip(data: &[u8]) -> Option<&[u8]> {
    let little_endian = match data.get(0..2)? {
        b"II" => true,
        b"MM" => false,
        _ => return None,
    };

    let read_u16 = |at: usize| -> Option<u16> {
        let bytes: [u8; 2] = data.get(at..at + 2)?.try_into().ok()?;
        Some(if little_endian {
            u16::from_le_bytes(bytes)
        } else {
            u16::from_be_bytes(bytes)
        })
    };
    let read_u32 = |at: usize| -> Option<u32> {
        let bytes: [u8; 4] = data.get(at..at + 4)?.try_into().ok()?;
        Some(if little_endian {
            u32::from_le_bytes(bytes)
        } else {
            u32::from_be_bytes(bytes)
        })
    };

    if read_u16(2)? != 42 {
        return None;
    }

    let ifd = read_u32(4)? as usize;
    let entries = read_u16(ifd)? as usize;

    let mut offset = None;
    let mut length = None;
    for i in 0..entries {
        let entry = ifd + 2 + i * 12;
        let tag = read_u16(entry)?;
        let kind = read_u16(entry + 2)?;
        let value = if kind == TIFF_SHORT {
            read_u16(entry + 8)? as u32
        } else {
            read_u32(entry + 8)?
        };

        match tag {
            TAG_STRIP_OFFSETS => offset = Some(value as usize),
            TAG_STRIP_BYTE_COUNTS => length = Some(value as usize),
            _ => {}
        }
    }

    let start = offset?;
    let end = start.checked_add(length?)?;
    data.get(start..end)
}

/// Decode every JPEG start marker's stream and keep the biggest picture
///
/// Decoders stop at the end-of-image marker, so each candidate runs to the
/// end of the buffer rather than guessing which EOI belongs to it.
fn largest_embedded_jpeg(data: &[u8]) -> Option<GrayImage> {
    data.windows(JPEG_SOI.len())
        .enumerate()
        .filter(|(_, window)| *window == JPEG_SOI)
        .map(|(start, _)| start)
        .take(MAX_PREVIEW_CANDIDATES)
        .filter_map(|start| image::load_from_memory_with_format(&data[start..], ImageFormat::Jpeg).ok())
        .max_by_key(|image| u64::from(image.width()) * u64::from(image.height()))
        .map(|image| image.to_luma8())
}
