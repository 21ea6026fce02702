use image::RgbaImage;

use crate::foundation::error::{WallgenError, WallgenResult};
use crate::geometry::footprint::Footprint;

/// Lift a segment's opaque slice onto story `story` of an image `story` times as tall.
///
/// Column by column, the rows covered by `footprint` are copied into the bottom tier at their
/// single-story position, then raised by `story - 1` slice lengths so the slice sits on top of
/// the stories below it. Everything else, lower tiers included, stays transparent.
pub fn stack_stories(
    image: &RgbaImage,
    footprint: &Footprint,
    story: u32,
) -> WallgenResult<RgbaImage> {
    let (w, h) = image.dimensions();
    let fs = footprint.size();
    if (fs.width, fs.height) != (w, h) {
        return Err(WallgenError::validation(format!(
            "segment image is {w}x{h} but its footprint is {fs}"
        )));
    }
    if story <= 1 {
        return Ok(image.clone());
    }
    let total_h = h
        .checked_mul(story)
        .ok_or_else(|| WallgenError::validation("stacked image height overflows"))?;

    let mut out = RgbaImage::new(w, total_h);
    let lift = i64::from(story - 1);
    let base = lift * i64::from(h);
    for x in 0..w {
        let Some(span) = footprint.column(x) else {
            continue;
        };
        let offset = base + i64::from(span.start) - lift * i64::from(span.len());
        for (i, y) in (span.start..=span.end).enumerate() {
            let ty = offset + i as i64;
            if ty < 0 || ty >= i64::from(total_h) {
                continue;
            }
            out.put_pixel(x, ty as u32, *image.get_pixel(x, y));
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/stacking.rs"]
mod tests;
