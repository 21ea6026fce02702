use image::Rgba;

use super::*;

fn speckled() -> RgbaImage {
    RgbaImage::from_fn(8, 3, |x, y| {
        Rgba([
            (x * 30) as u8,
            (y * 80) as u8,
            200,
            [0u8, 64, 128, 255][(x as usize + y as usize) % 4],
        ])
    })
}

#[test]
fn zero_gradient_is_identity() {
    let img = speckled();
    assert_eq!(
        darken(&img, 0.0, 0.0, GradientDirection::LeftToRight, Rgb8::BLACK),
        img
    );
    assert_eq!(
        darken(&img, 0.009, 0.005, GradientDirection::RightToLeft, Rgb8::RED),
        img
    );
}

#[test]
fn alpha_is_preserved_everywhere() {
    let img = speckled();
    for dir in [GradientDirection::LeftToRight, GradientDirection::RightToLeft] {
        let out = darken(&img, 0.2, 0.9, dir, Rgb8::BLACK);
        for (a, b) in img.pixels().zip(out.pixels()) {
            assert_eq!(a[3], b[3]);
        }
    }
}

#[test]
fn uniform_half_blend_toward_black_halves_opaque_color() {
    let img = RgbaImage::from_pixel(4, 1, Rgba([200, 100, 50, 255]));
    let out = darken(&img, 0.5, 0.5, GradientDirection::LeftToRight, Rgb8::BLACK);
    for px in out.pixels() {
        assert_eq!(px.0, [100, 50, 25, 255]);
    }
}

#[test]
fn direction_selects_the_leading_edge() {
    let img = RgbaImage::from_pixel(10, 1, Rgba([255, 255, 255, 255]));

    let ltr = darken(&img, 0.0, 1.0, GradientDirection::LeftToRight, Rgb8::BLACK);
    assert_eq!(ltr.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert!(ltr.get_pixel(9, 0)[0] < 40);

    let rtl = darken(&img, 0.0, 1.0, GradientDirection::RightToLeft, Rgb8::BLACK);
    assert_eq!(rtl.get_pixel(9, 0).0, [255, 255, 255, 255]);
    assert!(rtl.get_pixel(0, 0)[0] < 40);
}

#[test]
fn transparent_pixels_take_the_blend_color() {
    let img = RgbaImage::from_pixel(2, 1, Rgba([9, 9, 9, 0]));
    let out = darken(&img, 0.5, 0.5, GradientDirection::LeftToRight, Rgb8::RED);
    assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0, 0]);
}
