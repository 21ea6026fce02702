use image::RgbaImage;

use crate::foundation::math::{ZERO_PERCENT_THRESHOLD, clamp_u8, premultiply, unpremultiply};

/// Soften with the 3×3 kernel `[[0,f,0],[f,1-4f,f],[0,f,0]]`.
///
/// The convolution runs on premultiplied pixels and is converted back afterwards. The outermost
/// rows and columns are copied through untouched. `None` or a factor at or below
/// [`ZERO_PERCENT_THRESHOLD`] returns the image unchanged.
pub fn soften(image: &RgbaImage, factor: Option<f32>) -> RgbaImage {
    let mut out = image.clone();
    let Some(f) = factor.filter(|f| *f > ZERO_PERCENT_THRESHOLD) else {
        return out;
    };
    let (w, h) = image.dimensions();
    if w < 3 || h < 3 {
        return out;
    }

    let premul: Vec<[u8; 4]> = image.pixels().map(|p| premultiply(p.0)).collect();
    let at = |x: u32, y: u32| premul[(y * w + x) as usize];
    let center_weight = 1.0 - 4.0 * f;

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let neighbors = [at(x, y - 1), at(x, y + 1), at(x + 1, y), at(x - 1, y)];
            let c = at(x, y);
            let mut px = [0u8; 4];
            for i in 0..4 {
                let ring: f32 = neighbors.iter().map(|n| f32::from(n[i])).sum();
                px[i] = clamp_u8(f * ring + center_weight * f32::from(c[i]));
            }
            for i in 0..3 {
                px[i] = px[i].min(px[3]);
            }
            out.put_pixel(x, y, image::Rgba(unpremultiply(px)));
        }
    }
    tracing::debug!(factor = f, "soften");
    out
}

#[cfg(test)]
#[path = "../../tests/unit/ops/soften.rs"]
mod tests;
