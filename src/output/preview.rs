use image::RgbaImage;

use crate::foundation::error::{WallgenError, WallgenResult};
use crate::generate::segment::{WallSegment, WallSet};
use crate::ops::composite::draw_image;

/// Left-to-right order of the preview strip: a walk past the close wall, into the distance and
/// back out on the other side.
pub const PREVIEW_ORDER: [WallSegment; 9] = [
    WallSegment::CloseLeft,
    WallSegment::CloseFront,
    WallSegment::NearLeft,
    WallSegment::NearFront,
    WallSegment::FarLeft,
    WallSegment::FarFront,
    WallSegment::FarRight,
    WallSegment::NearRight,
    WallSegment::CloseRight,
];

/// Builds the single-raster preview of a generated story sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreviewGenerationService;

impl PreviewGenerationService {
    /// Lay out [`PREVIEW_ORDER`] side by side.
    ///
    /// The strip is as tall as the ground `CloseLeft` image; each piece is centered vertically
    /// on its ground-story image and taller upper stories grow upward from that baseline.
    /// Anything extending past the strip is clipped.
    #[tracing::instrument(skip_all, fields(stories = stories.len()))]
    pub fn generate_preview(&self, stories: &[WallSet]) -> WallgenResult<RgbaImage> {
        let ground = stories
            .first()
            .ok_or_else(|| WallgenError::validation("invalid generated images for preview"))?;

        let height = ground.require(WallSegment::CloseLeft)?.height();
        let mut width = 0u32;
        for seg in PREVIEW_ORDER {
            width = width.saturating_add(ground.require(seg)?.width());
        }

        let mut canvas = RgbaImage::new(width, height);
        let mut x = 0i64;
        for seg in PREVIEW_ORDER {
            let base = ground.require(seg)?;
            let base_h = i64::from(base.height());
            let y = (i64::from(height) - base_h) / 2;
            for set in stories {
                let img = set.require(seg)?;
                draw_image(&mut canvas, img, x, y - (i64::from(img.height()) - base_h), None);
            }
            x += i64::from(base.width());
        }
        tracing::debug!(width, height, "preview composed");
        Ok(canvas)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/preview.rs"]
mod tests;
