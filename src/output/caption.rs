//! Attribution caption drawn into atlases.

use std::sync::{Arc, OnceLock};

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{WallgenError, WallgenResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::ops::composite::draw_image;

/// Height of the strip the caption is rendered into.
pub const CAPTION_STRIP_HEIGHT: u32 = 47;
const FONT_SIZE: u32 = 12;
const LEFT_MARGIN: u32 = 5;
const BASELINES: [u32; 2] = [14, 28];

/// The two caption lines.
pub fn caption_lines() -> [String; 2] {
    [
        "Wallset generated using wallgen".to_owned(),
        format!("version {}", env!("CARGO_PKG_VERSION")),
    ]
}

fn fontdb() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "caption fonts loaded");
        Arc::new(db)
    })
    .clone()
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn caption_svg(width: u32, color: Rgb8) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{CAPTION_STRIP_HEIGHT}">"#
    );
    for (line, baseline) in caption_lines().iter().zip(BASELINES) {
        svg.push_str(&format!(
            r#"<text x="{LEFT_MARGIN}" y="{baseline}" font-family="sans-serif" font-size="{FONT_SIZE}" fill="{}">{}</text>"#,
            color.to_hex(),
            escape_xml(line)
        ));
    }
    svg.push_str("</svg>");
    svg
}

/// Render the caption into a transparent `width`×[`CAPTION_STRIP_HEIGHT`] strip.
///
/// Without any usable system font the strip stays empty.
pub fn render_caption(width: u32, color: Rgb8) -> WallgenResult<RgbaImage> {
    let width = width.max(1);
    let opts = usvg::Options {
        fontdb: fontdb(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&caption_svg(width, color), &opts)
        .context("parse caption svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, CAPTION_STRIP_HEIGHT)
        .ok_or_else(|| WallgenError::validation("failed to allocate caption pixmap"))?;
    resvg::render(&tree, resvg::tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    let mut data = pixmap.take();
    unpremultiply_rgba8_in_place(&mut data);
    RgbaImage::from_raw(width, CAPTION_STRIP_HEIGHT, data)
        .ok_or_else(|| WallgenError::validation("caption buffer size mismatch"))
}

/// Draw the caption along the bottom-left of `canvas`.
pub fn draw_caption(canvas: &mut RgbaImage, color: Rgb8) -> WallgenResult<()> {
    let strip = render_caption(canvas.width(), color)?;
    let y = i64::from(canvas.height()) - i64::from(CAPTION_STRIP_HEIGHT);
    draw_image(canvas, &strip, 0, y, None);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/output/caption.rs"]
mod tests;
