use image::RgbaImage;

use crate::foundation::core::Size;
use crate::geometry::homography::QuadTransform;

/// Warp `source` into a fresh `dest`-sized raster through `transform`.
///
/// Every destination pixel is inverse-mapped and takes the nearest source pixel; pixels that map
/// outside the source stay fully transparent.
pub fn warp(source: &RgbaImage, dest: Size, transform: &QuadTransform) -> RgbaImage {
    let src_size = Size::new(source.width(), source.height());
    let mut out = RgbaImage::new(dest.width, dest.height);
    for (x, y, px) in out.enumerate_pixels_mut() {
        if let Some((sx, sy)) = transform.source_pixel(x, y, src_size) {
            *px = *source.get_pixel(sx, sy);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/ops/warp.rs"]
mod tests;
