//! Image loading utilities
//!
//! Reads user-selected files and decodes them for display.

use anyhow::{Context, Result};
use image::DynamicImage;
use std::path::Path;

/// Read the raw bytes of a selected file
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))
}

/// Decode an image from bytes
///
/// Supports PNG, JPEG, GIF, and WebP formats.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    let img = image::load_from_memory(bytes).context("Failed to decode image from memory")?;
    Ok(img)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal valid PNG (1x1 pixel)
    pub(crate) const PNG_1X1: [u8; 69] = [
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
        0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1
        0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, // 8-bit RGB
        0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, // IDAT chunk
        0x54, 0x08, 0xD7, 0x63, 0xF8, 0xFF, 0xFF, 0xFF, // data
        0x00, 0x05, 0xFE, 0x02, 0xFE, 0xDC, 0xCC, 0x59, // checksum
        0xE7, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, // IEND chunk
        0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    #[test]
    fn test_decode_png() {
        let img = decode_image(&PNG_1X1).unwrap();
        assert_eq!((img.width(), img.height()), (1, 1));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_image(b"definitely not an image").is_err());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_file(Path::new("/nonexistent/shirt.png")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
