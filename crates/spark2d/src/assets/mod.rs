//! Asset loading
//!
//! Abstracts where game resources come from behind [`AssetSource`], so the
//! engine core never touches the filesystem directly. Ships two sources:
//! [`DirAssets`] reading from a directory tree, and [`MemoryAssets`] serving
//! embedded byte blobs, which is also handy in tests.

use std::collections::HashMap;
use std::path::PathBuf;

use log::debug;
use thiserror::Error;

/// Errors from asset loading and decoding
#[derive(Debug, Error)]
pub enum AssetError {
    /// Asset file not found
    #[error("asset not found: {0}")]
    NotFound(String),
    /// IO error while reading the asset
    #[error("asset IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Asset bytes could not be decoded
    #[error("asset decode error: {0}")]
    Decode(String),
}

/// Read-only source of named asset blobs
pub trait AssetSource {
    /// Reads the raw bytes of the named asset
    fn read(&self, name: &str) -> Result<Vec<u8>, AssetError>;
}

/// Asset source backed by a directory on disk
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    /// Creates a source rooted at `root`; asset names are resolved relative
    /// to it
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirAssets {
    fn read(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(AssetError::NotFound(name.to_string()));
        }
        debug!("Reading asset: {}", path.display());
        Ok(std::fs::read(path)?)
    }
}

/// Asset source serving blobs registered in memory
///
/// Useful for resources compiled into the binary and for tests.
#[derive(Default)]
pub struct MemoryAssets {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    /// Creates an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `bytes` under `name`, replacing any previous blob
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.blobs.insert(name.into(), bytes);
    }
}

impl AssetSource for MemoryAssets {
    fn read(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.blobs
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}

/// Decoded image pixels in RGBA8 layout
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw pixel bytes, 4 per pixel, rows top to bottom
    pub pixels: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageData {
    /// Decodes an image from encoded bytes (PNG), converting to RGBA8
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| AssetError::Decode(e.to_string()))?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        Ok(Self {
            pixels: decoded.into_raw(),
            width,
            height,
        })
    }

    /// Creates a single-color image, mostly useful for placeholders
    pub fn solid_color(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            pixels,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([1, 2, 3, 4]));
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn memory_source_round_trips() {
        let mut assets = MemoryAssets::new();
        assets.insert("a.bin", vec![1, 2, 3]);
        assert_eq!(assets.read("a.bin").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn missing_blob_is_not_found() {
        let assets = MemoryAssets::new();
        assert!(matches!(
            assets.read("nope.png"),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn decodes_png_dimensions() {
        let img = ImageData::from_bytes(&png_bytes(3, 2)).unwrap();
        assert_eq!(img.width, 3);
        assert_eq!(img.height, 2);
        assert_eq!(img.pixels.len(), 3 * 2 * 4);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(
            ImageData::from_bytes(&[0, 1, 2, 3]),
            Err(AssetError::Decode(_))
        ));
    }

    #[test]
    fn solid_color_fills_pixels() {
        let img = ImageData::solid_color(2, 2, [9, 8, 7, 6]);
        assert_eq!(img.pixels.len(), 16);
        assert_eq!(&img.pixels[0..4], &[9, 8, 7, 6]);
    }
}
