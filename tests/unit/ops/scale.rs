use image::Rgba;

use super::*;

fn gradient(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 7, 255]))
}

#[test]
fn same_size_returns_identical_pixels() {
    let img = gradient(13, 9);
    for m in ScalingMethod::ALL {
        assert_eq!(scale(&img, Size::new(13, 9), m).unwrap(), img);
    }
}

#[test]
fn every_method_hits_the_literal_target() {
    let img = gradient(40, 30);
    for m in ScalingMethod::ALL {
        for target in [Size::new(7, 90), Size::new(200, 5), Size::new(3, 3)] {
            let out = scale(&img, target, m).unwrap();
            assert_eq!(out.dimensions(), (target.width, target.height), "{m:?}");
        }
    }
}

#[test]
fn nearest_keeps_solid_colors_exact() {
    let img = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255]));
    let out = scale(&img, Size::new(200, 100), ScalingMethod::NearestNeighbour).unwrap();
    assert!(out.pixels().all(|p| p.0 == [0, 0, 0, 255]));
}

#[test]
fn zero_sizes_are_scaling_errors() {
    let img = gradient(4, 4);
    assert!(matches!(
        scale(&img, Size::new(0, 4), ScalingMethod::Bilinear),
        Err(WallgenError::Scaling(_))
    ));
    let empty = RgbaImage::new(0, 0);
    assert!(matches!(
        scale(&empty, Size::new(4, 4), ScalingMethod::Bilinear),
        Err(WallgenError::Scaling(_))
    ));
}

#[test]
fn resample_rejects_tiny_sources() {
    let img = gradient(2, 8);
    assert!(matches!(
        scale(&img, Size::new(10, 10), ScalingMethod::Resample),
        Err(WallgenError::Scaling(_))
    ));
    assert!(scale(&img, Size::new(10, 10), ScalingMethod::Bicubic).is_ok());
}

#[test]
fn method_names_parse() {
    assert_eq!(
        "Nearest Neighbour".parse::<ScalingMethod>().unwrap(),
        ScalingMethod::NearestNeighbour
    );
    assert_eq!("resample".parse::<ScalingMethod>().unwrap(), ScalingMethod::Resample);
    assert!("sinc".parse::<ScalingMethod>().is_err());
}
