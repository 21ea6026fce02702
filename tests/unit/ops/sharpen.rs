use image::Rgba;

use super::*;

fn step_edge() -> RgbaImage {
    RgbaImage::from_fn(6, 4, |x, _| {
        if x < 3 {
            Rgba([60, 60, 60, 255])
        } else {
            Rgba([180, 180, 180, 255])
        }
    })
}

#[test]
fn none_is_identity() {
    let img = step_edge();
    assert_eq!(unsharpen(&img, UnsharpenLevel::None).unwrap(), img);
}

#[test]
fn flat_image_is_unchanged_at_every_level() {
    let img = RgbaImage::from_pixel(5, 5, Rgba([90, 120, 30, 255]));
    for level in UnsharpenLevel::ALL {
        assert_eq!(unsharpen(&img, level).unwrap(), img);
    }
}

#[test]
fn edges_gain_contrast_with_strength() {
    let img = step_edge();
    let soft = unsharpen(&img, UnsharpenLevel::Soft).unwrap();
    let hard = unsharpen(&img, UnsharpenLevel::Oversharpened).unwrap();

    let dark = |i: &RgbaImage| i.get_pixel(2, 1)[0];
    let light = |i: &RgbaImage| i.get_pixel(3, 1)[0];
    assert!(dark(&soft) < 60 && light(&soft) > 180);
    assert!(dark(&hard) < dark(&soft));
    assert!(light(&hard) > light(&soft));
}

#[test]
fn alpha_channel_is_kept() {
    let img = RgbaImage::from_fn(4, 4, |x, y| Rgba([200, 10, 90, ((x + y) * 30) as u8]));
    let out = unsharpen(&img, UnsharpenLevel::VerySharp).unwrap();
    for (a, b) in img.pixels().zip(out.pixels()) {
        assert_eq!(a[3], b[3]);
    }
}

#[test]
fn amounts_are_ordered() {
    let amounts: Vec<f32> = UnsharpenLevel::ALL.iter().map(|l| l.amount()).collect();
    assert!(amounts.windows(2).all(|w| w[0] < w[1]));
}
