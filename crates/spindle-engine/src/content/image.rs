use std::path::Path;

use anyhow::{Context, Result};

/// Decoded RGBA8 pixel data.
///
/// The pixel buffer is tightly packed (`4 × width` bytes per row) and is meant
/// to be dropped immediately after its single GPU copy.
pub struct RgbaImageData {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decodes an image file into RGBA8.
pub fn load_rgba8(path: &Path) -> Result<RgbaImageData> {
    let decoded = image::open(path)
        .with_context(|| format!("failed to decode image {}", path.display()))?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(RgbaImageData {
        pixels: rgba.into_raw(),
        width,
        height,
    })
}

/// Reads an image's dimensions without decoding its pixels.
///
/// Used to size GPU textures at startup before the upload task runs.
pub fn image_dimensions(path: &Path) -> Result<(u32, u32)> {
    image::image_dimensions(path)
        .with_context(|| format!("failed to read image header {}", path.display()))
}
