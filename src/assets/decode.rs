use std::path::Path;

use image::RgbaImage;

use crate::foundation::error::{WallgenError, WallgenResult};

/// Edge length of the stand-in used for empty source slots.
pub const PLACEHOLDER_EDGE: u32 = 50;

/// Decode an encoded image into straight-alpha RGBA8.
pub fn decode_source(bytes: &[u8]) -> WallgenResult<RgbaImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| WallgenError::source_not_found(format!("decode source image: {e}")))?;
    Ok(img.to_rgba8())
}

/// Read and decode a source image file.
///
/// Missing, unreadable and undecodable files all surface as [`WallgenError::SourceNotFound`].
#[tracing::instrument]
pub fn load_source(path: &Path) -> WallgenResult<RgbaImage> {
    let bytes = std::fs::read(path).map_err(|e| {
        WallgenError::source_not_found(format!("read '{}': {e}", path.display()))
    })?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| WallgenError::source_not_found(format!("decode '{}': {e}", path.display())))?
        .to_rgba8();
    tracing::debug!(width = img.width(), height = img.height(), "source decoded");
    Ok(img)
}

/// Fully transparent stand-in for an empty source slot.
pub fn placeholder() -> RgbaImage {
    RgbaImage::new(PLACEHOLDER_EDGE, PLACEHOLDER_EDGE)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
