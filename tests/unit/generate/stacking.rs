use image::Rgba;

use super::*;
use crate::foundation::core::Size;

#[test]
fn single_story_is_unchanged() {
    let img = RgbaImage::from_pixel(3, 4, Rgba([1, 2, 3, 255]));
    let fp = Footprint::full(Size::new(3, 4));
    assert_eq!(stack_stories(&img, &fp, 1).unwrap(), img);
}

#[test]
fn full_footprint_fills_only_the_top_tier() {
    let img = RgbaImage::from_fn(2, 3, |_, y| Rgba([y as u8 * 50, 0, 0, 255]));
    let fp = Footprint::full(Size::new(2, 3));
    let out = stack_stories(&img, &fp, 3).unwrap();
    assert_eq!(out.dimensions(), (2, 9));
    for y in 0..3 {
        assert_eq!(out.get_pixel(1, y), img.get_pixel(1, y));
    }
    assert!((3..9).all(|y| out.get_pixel(0, y)[3] == 0 && out.get_pixel(1, y)[3] == 0));
}

#[test]
fn partial_columns_sit_one_slice_above_their_ground_position() {
    // Column 0 covers rows 2..=4 of a 6-row segment; column 1 is empty.
    let mut img = RgbaImage::new(2, 6);
    for y in 2..=4 {
        img.put_pixel(0, y, Rgba([10 * y as u8, 0, 0, 255]));
    }
    let fp = Footprint::from_alpha(&img);

    let out = stack_stories(&img, &fp, 2).unwrap();
    assert_eq!(out.dimensions(), (2, 12));

    // Ground position in the bottom tier is 6 + 2 = 8..=10; lifted by one slice to 5..=7.
    for (ty, sy) in [(5, 2), (6, 3), (7, 4)] {
        assert_eq!(out.get_pixel(0, ty), img.get_pixel(0, sy), "row {ty}");
    }
    for ty in [0, 1, 2, 3, 4, 8, 9, 10, 11] {
        assert_eq!(out.get_pixel(0, ty)[3], 0, "row {ty}");
    }
    assert!((0..12).all(|y| out.get_pixel(1, y)[3] == 0));
}

#[test]
fn mismatched_footprint_is_rejected() {
    let img = RgbaImage::new(3, 3);
    let fp = Footprint::full(Size::new(3, 4));
    assert!(stack_stories(&img, &fp, 2).is_err());
}
