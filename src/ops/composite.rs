//! Raster drawing on straight-alpha RGBA canvases.

use image::{Rgba, RgbaImage};

use crate::foundation::core::PixelRect;
use crate::foundation::math::{mul_div255_u8, premultiply, unpremultiply};

pub(crate) type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let inv = 255u16 - u16::from(sa);
            let mut out = [0u8; 4];
            for i in 0..4 {
                out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
            }
            out
        }
    }
}

fn canvas_rect(canvas: &RgbaImage) -> PixelRect {
    PixelRect::new(0, 0, canvas.width(), canvas.height())
}

/// Draw `src` with its top-left corner at `(x, y)`, source-over, limited to `clip` when given.
///
/// Parts falling outside the canvas or the clip are dropped.
pub fn draw_image(
    canvas: &mut RgbaImage,
    src: &RgbaImage,
    x: i64,
    y: i64,
    clip: Option<PixelRect>,
) {
    let placed = PixelRect::new(x, y, src.width(), src.height());
    let Some(mut visible) = placed.intersect(canvas_rect(canvas)) else {
        return;
    };
    if let Some(clip) = clip {
        match visible.intersect(clip) {
            Some(v) => visible = v,
            None => return,
        }
    }

    for cy in visible.y..visible.bottom() {
        for cx in visible.x..visible.right() {
            let s = src.get_pixel((cx - x) as u32, (cy - y) as u32).0;
            if s[3] == 0 {
                continue;
            }
            let d = canvas.get_pixel_mut(cx as u32, cy as u32);
            let out = if s[3] == 255 {
                s
            } else {
                unpremultiply(over(premultiply(d.0), premultiply(s)))
            };
            *d = Rgba(out);
        }
    }
}

/// Overwrite every pixel of `rect` (clipped to the canvas) with `color`.
pub fn fill_rect(canvas: &mut RgbaImage, rect: PixelRect, color: Rgba<u8>) {
    let Some(r) = rect.intersect(canvas_rect(canvas)) else {
        return;
    };
    for y in r.y..r.bottom() {
        for x in r.x..r.right() {
            canvas.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Fill the whole canvas.
pub fn fill(canvas: &mut RgbaImage, color: Rgba<u8>) {
    for px in canvas.pixels_mut() {
        *px = color;
    }
}

/// One-pixel outline along the inside edge of `rect`.
pub fn stroke_rect(canvas: &mut RgbaImage, rect: PixelRect, color: Rgba<u8>) {
    if rect.is_empty() {
        return;
    }
    let (l, t, r, b) = (rect.x, rect.y, rect.right() - 1, rect.bottom() - 1);
    fill_rect(canvas, PixelRect::new(l, t, rect.width, 1), color);
    fill_rect(canvas, PixelRect::new(l, b, rect.width, 1), color);
    fill_rect(canvas, PixelRect::new(l, t, 1, rect.height), color);
    fill_rect(canvas, PixelRect::new(r, t, 1, rect.height), color);
}

/// Copy a `width`×`height` window starting at `(x, y)` out of `image`.
pub fn crop(image: &RgbaImage, x: u32, y: u32, width: u32, height: u32) -> RgbaImage {
    image::imageops::crop_imm(image, x, y, width, height).to_image()
}

#[cfg(test)]
#[path = "../../tests/unit/ops/composite.rs"]
mod tests;
