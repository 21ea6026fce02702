use super::*;
use image::RgbaImage;

fn trapezoid() -> QuadTransform {
    QuadTransform::from_coords(&[
        0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0, //
        0.0, 0.0, 60.0, 25.0, 60.0, 75.0, 0.0, 100.0,
    ])
    .unwrap()
}

#[test]
fn full_footprint_covers_every_row() {
    let f = Footprint::full(Size::new(3, 5));
    for x in 0..3 {
        assert_eq!(f.column(x), Some(ColumnSpan { start: 0, end: 4 }));
    }
    assert_eq!(f.column(3), None);
    assert_eq!(f.covered_columns(), 3);
}

#[test]
fn warped_footprint_narrows_toward_far_edge() {
    let f = Footprint::of_warp(&trapezoid(), Size::new(100, 100), Size::new(60, 100));
    let near = f.column(1).unwrap();
    let far = f.column(58).unwrap();
    assert!(near.len() > far.len());
    assert!(far.start >= 24 && far.end <= 76);
    assert!(near.start <= 1 && near.end >= 98);
}

#[test]
fn analytic_footprint_matches_alpha_scan_of_solid_warp() {
    let t = trapezoid();
    let source = Size::new(100, 100);
    let dest = Size::new(60, 100);

    let mut img = RgbaImage::new(dest.width, dest.height);
    for y in 0..dest.height {
        for x in 0..dest.width {
            if t.source_pixel(x, y, source).is_some() {
                img.put_pixel(x, y, image::Rgba([0, 0, 0, 255]));
            }
        }
    }

    assert_eq!(Footprint::from_alpha(&img), Footprint::of_warp(&t, source, dest));
}

#[test]
fn empty_columns_read_back_as_none() {
    let mut img = RgbaImage::new(2, 4);
    img.put_pixel(1, 2, image::Rgba([9, 9, 9, 10]));
    let f = Footprint::from_alpha(&img);
    assert_eq!(f.column(0), None);
    assert_eq!(f.column(1), Some(ColumnSpan { start: 2, end: 2 }));
}
