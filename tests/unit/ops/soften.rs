use image::Rgba;

use super::*;

fn plus(center: [u8; 4], ring: [u8; 4]) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(3, 3, Rgba(ring));
    img.put_pixel(1, 1, Rgba(center));
    img
}

#[test]
fn disabled_or_tiny_factor_is_identity() {
    let img = plus([10, 20, 30, 255], [200, 100, 0, 128]);
    assert_eq!(soften(&img, None), img);
    assert_eq!(soften(&img, Some(0.0)), img);
    assert_eq!(soften(&img, Some(0.009)), img);
}

#[test]
fn half_factor_matches_kernel_arithmetic() {
    // 0.5 * (4 * 100) + (1 - 2) * 150 = 50
    let img = plus([150, 150, 150, 255], [100, 100, 100, 255]);
    let out = soften(&img, Some(0.5));
    assert_eq!(out.get_pixel(1, 1).0, [50, 50, 50, 255]);
}

#[test]
fn quarter_factor_averages_neighbors() {
    let img = plus([0, 0, 0, 255], [200, 40, 80, 255]);
    let out = soften(&img, Some(0.25));
    assert_eq!(out.get_pixel(1, 1).0, [200, 40, 80, 255]);
}

#[test]
fn edge_pixels_are_untouched() {
    let img = RgbaImage::from_fn(5, 4, |x, y| Rgba([(x * 50) as u8, (y * 60) as u8, 9, 200]));
    let out = soften(&img, Some(0.2));
    for (x, y, px) in out.enumerate_pixels() {
        if x == 0 || y == 0 || x == 4 || y == 3 {
            assert_eq!(px, img.get_pixel(x, y));
        }
    }
}

#[test]
fn transparent_neighbors_do_not_bleed_color() {
    // Red fringe pixels are invisible; only the opaque blue center may show.
    let img = plus([0, 0, 255, 255], [255, 0, 0, 0]);
    let out = soften(&img, Some(0.2));
    let c = out.get_pixel(1, 1).0;
    assert_eq!(c[0], 0);
    assert_eq!(c[2], 255);
    assert!(c[3] < 255);
}
