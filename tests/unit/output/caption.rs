use image::Rgba;

use super::*;

#[test]
fn lines_name_the_tool_and_version() {
    let [first, second] = caption_lines();
    assert!(first.contains("wallgen"));
    assert!(second.ends_with(env!("CARGO_PKG_VERSION")));
}

#[test]
fn svg_carries_color_and_escapes_text() {
    let svg = caption_svg(300, Rgb8::RED);
    assert!(svg.contains("#ff0000"));
    assert!(svg.contains(r#"width="300""#));
    assert_eq!(escape_xml("a<b&c"), "a&lt;b&amp;c");
}

#[test]
fn strip_has_expected_size_and_only_caption_color() {
    let strip = render_caption(240, Rgb8::RED).unwrap();
    assert_eq!(strip.dimensions(), (240, CAPTION_STRIP_HEIGHT));
    for px in strip.pixels().filter(|p| p[3] == 255) {
        assert_eq!(px.0, [255, 0, 0, 255]);
    }
}

#[test]
fn caption_stays_in_the_bottom_strip() {
    let mut canvas = RgbaImage::from_pixel(200, 120, Rgba([0, 0, 0, 255]));
    draw_caption(&mut canvas, Rgb8::RED).unwrap();
    let top = 120 - CAPTION_STRIP_HEIGHT;
    for y in 0..top {
        for x in 0..200 {
            assert_eq!(canvas.get_pixel(x, y).0, [0, 0, 0, 255]);
        }
    }
}
