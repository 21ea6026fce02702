//! Single-file atlas composition.

use std::path::PathBuf;

use image::{Rgba, RgbaImage};

use crate::config::colors::OutputColors;
use crate::config::profile::AtlasLayout;
use crate::foundation::error::{WallgenError, WallgenResult};
use crate::generate::segment::WallSet;
use crate::ops::composite::{draw_image, fill, fill_rect, stroke_rect};
use crate::output::caption::draw_caption;
use crate::output::format::{output_path, write_image};
use crate::output::{OutputGenerator, OutputRequest};

/// Writes every segment of every story into one atlas image.
pub struct SingleFileOutputGenerator<'a> {
    layout: &'a AtlasLayout,
}

impl<'a> SingleFileOutputGenerator<'a> {
    /// Generator for `layout`.
    pub fn new(layout: &'a AtlasLayout) -> Self {
        Self { layout }
    }

    /// Compose the atlas in memory.
    ///
    /// Stories are drawn ground first. A taller upper-story image is shifted up by its extra
    /// height, keeping every story's bottom edge on the configured position; its lower tiers are
    /// transparent, so only its own story lands on the atlas.
    #[tracing::instrument(skip_all, fields(stories = stories.len(), transparency = use_transparency))]
    pub fn compose(
        &self,
        stories: &[WallSet],
        colors: &OutputColors,
        use_transparency: bool,
    ) -> WallgenResult<RgbaImage> {
        let ground = stories
            .first()
            .ok_or_else(|| WallgenError::validation("no stories to compose"))?;
        let layout = self.layout;

        let mut canvas = RgbaImage::new(layout.width, layout.height);
        fill(&mut canvas, colors.background.to_rgba());

        let cut_out = if use_transparency {
            Rgba([0, 0, 0, 0])
        } else {
            colors.transparency.to_rgba()
        };
        for region in &layout.transparent_regions {
            let rect = region.rect();
            fill_rect(&mut canvas, rect, cut_out);
            for ring in 1..=layout.border_thickness {
                stroke_rect(&mut canvas, rect.outset(ring), colors.border.to_rgba());
            }
        }

        for (&segment, pos) in &layout.positions {
            let clip = layout.clip_for(segment);
            let ground_h = i64::from(ground.require(segment)?.height());
            for set in stories {
                let img = set.require(segment)?;
                let y = pos.y - (i64::from(img.height()) - ground_h);
                draw_image(&mut canvas, img, pos.x, y, clip);
            }
        }

        draw_caption(&mut canvas, colors.text)?;

        if !use_transparency {
            canvas.put_pixel(0, 0, colors.transparency.to_rgba());
        }
        Ok(canvas)
    }
}

impl OutputGenerator for SingleFileOutputGenerator<'_> {
    fn generate(&self, req: &OutputRequest<'_>, stories: &[WallSet]) -> WallgenResult<Vec<PathBuf>> {
        let use_transparency = req.effective_transparency();
        let atlas = self.compose(stories, req.colors, use_transparency)?;
        let path = output_path(req.target_dir, req.base_name, &req.file_type.extension());
        tracing::info!(path = %path.display(), "writing atlas");
        write_image(
            &atlas,
            &path,
            req.file_type,
            use_transparency,
            req.colors.transparency,
        )?;
        Ok(vec![path])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/atlas.rs"]
mod tests;
