//! Generated placeholder art
//!
//! The demo ships no binary assets; textures are tiny PNGs encoded at
//! startup and served through a [`MemoryAssets`] source.

use spark2d::prelude::*;

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Result<Vec<u8>, image::ImageError> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Builds the in-memory asset pack the demo runs against
pub fn asset_pack() -> Result<MemoryAssets, image::ImageError> {
    let mut assets = MemoryAssets::new();
    // 16x16 ship, 32x32 meteor sheet (2x2 frames of 16x16), 64x64 font grid.
    assets.insert("ship.png", solid(16, 16, [200, 220, 255, 255])?);
    assets.insert("meteor.png", solid(32, 32, [150, 120, 90, 255])?);
    assets.insert("font.png", solid(64, 64, [255, 255, 255, 255])?);
    Ok(assets)
}
