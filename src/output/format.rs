use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbImage, RgbaImage};

use crate::config::manager::OutputFileType;
use crate::foundation::core::Rgb8;
use crate::foundation::error::{WallgenError, WallgenResult};

/// `{base with spaces as underscores}.{ext}` inside `dir`.
pub fn output_path(dir: &Path, base_name: &str, ext: &str) -> PathBuf {
    dir.join(format!("{}.{ext}", base_name.trim().replace(' ', "_")))
}

/// Composite `image` over an opaque `matte` and drop alpha.
pub fn flatten(image: &RgbaImage, matte: Rgb8) -> RgbImage {
    let m = [f32::from(matte.r), f32::from(matte.g), f32::from(matte.b)];
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let p = image.get_pixel(x, y);
        let a = f32::from(p[3]) / 255.0;
        let mix = |c: usize| (f32::from(p[c]) * a + m[c] * (1.0 - a)).round() as u8;
        image::Rgb([mix(0), mix(1), mix(2)])
    })
}

/// Encode `image` to `path` with the file type's encoder.
///
/// Alpha is written only when `keep_alpha` is set and the encoder supports it; otherwise the
/// image is flattened over `matte`.
#[tracing::instrument(skip(image, file_type), fields(file_type = file_type.name()))]
pub fn write_image(
    image: &RgbaImage,
    path: &Path,
    file_type: &OutputFileType,
    keep_alpha: bool,
    matte: Rgb8,
) -> WallgenResult<()> {
    let dynamic = if keep_alpha && file_type.supports_transparency() {
        DynamicImage::ImageRgba8(image.clone())
    } else {
        DynamicImage::ImageRgb8(flatten(image, matte))
    };
    dynamic
        .save_with_format(path, file_type.format())
        .map_err(|e| WallgenError::io(format!("write '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), "output written");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/output/format.rs"]
mod tests;
