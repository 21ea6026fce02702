use image::RgbaImage;

use crate::foundation::core::Rgb8;
use crate::foundation::math::{ZERO_PERCENT_THRESHOLD, clamp_u8};

/// Which edge of the image receives the starting blend strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradientDirection {
    /// `start` at column 0, `end` at the right edge.
    LeftToRight,
    /// `start` at the right edge, `end` at column 0.
    RightToLeft,
}

/// Blend a per-column gradient of `blend` over `image`, keeping every pixel's alpha.
///
/// Column strength runs linearly from `start` toward `end` (`start + (end - start) / width * i`).
/// A gradient with both ends at or below [`ZERO_PERCENT_THRESHOLD`] returns the image unchanged.
pub fn darken(
    image: &RgbaImage,
    start: f32,
    end: f32,
    direction: GradientDirection,
    blend: Rgb8,
) -> RgbaImage {
    let mut out = image.clone();
    if start <= ZERO_PERCENT_THRESHOLD && end <= ZERO_PERCENT_THRESHOLD {
        return out;
    }

    let (w, _) = image.dimensions();
    if w == 0 {
        return out;
    }
    let delta = (end - start) / w as f32;
    let blend_rgb = [f32::from(blend.r), f32::from(blend.g), f32::from(blend.b)];

    for (x, _, px) in out.enumerate_pixels_mut() {
        let step = match direction {
            GradientDirection::LeftToRight => x,
            GradientDirection::RightToLeft => w - 1 - x,
        };
        let a = (start + delta * step as f32).clamp(0.0, 1.0);
        let pa = f32::from(px[3]) / 255.0;
        let ao = a + pa * (1.0 - a);
        if ao <= 0.0 {
            continue;
        }
        for c in 0..3 {
            let mixed = (blend_rgb[c] * a + f32::from(px[c]) * pa * (1.0 - a)) / ao;
            px[c] = clamp_u8(mixed);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/ops/darken.rs"]
mod tests;
