use image::{Rgba, RgbaImage};

use super::*;
use crate::config::colors::OutputColors;
use crate::config::manager::OutputFileType;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target/wallgen-unit/individual")
        .join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn story(shade: u8) -> WallSet {
    let mut set = WallSet::new();
    set.insert(
        WallSegment::CloseFront,
        RgbaImage::from_pixel(4, 4, Rgba([shade, 0, 0, 255])),
    );
    set.insert(
        WallSegment::FarLeft,
        RgbaImage::from_pixel(2, 3, Rgba([0, shade, 0, 0])),
    );
    set
}

#[test]
fn stems_mark_upper_stories() {
    assert_eq!(segment_file_stem("wall", WallSegment::NearLeft, 1), "wall_NearLeft");
    assert_eq!(
        segment_file_stem("wall", WallSegment::FarFrontSecondary, 3),
        "wall_FarFrontSecondary_Story3"
    );
}

#[test]
fn writes_every_segment_of_every_story() {
    let dir = scratch("png");
    let png = OutputFileType::new("PNG", true).unwrap();
    let colors = OutputColors::default();
    let req = OutputRequest {
        target_dir: &dir,
        base_name: "old wall",
        file_type: &png,
        use_transparency: true,
        colors: &colors,
    };
    let written = IndividualFileOutputGenerator
        .generate(&req, &[story(10), story(20)])
        .unwrap();
    let names: Vec<_> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "old_wall_CloseFront.png",
            "old_wall_FarLeft.png",
            "old_wall_CloseFront_Story2.png",
            "old_wall_FarLeft_Story2.png",
        ]
    );
    let upper = image::open(&written[2]).unwrap().to_rgba8();
    assert_eq!(upper.get_pixel(0, 0).0, [20, 0, 0, 255]);
    let far = image::open(&written[1]).unwrap().to_rgba8();
    assert_eq!(far.get_pixel(0, 0)[3], 0);
}

#[test]
fn opaque_file_types_are_flattened_over_the_marker() {
    let dir = scratch("bmp");
    let bmp = OutputFileType::new("BMP", false).unwrap();
    let colors = OutputColors::default();
    let req = OutputRequest {
        target_dir: &dir,
        base_name: "w",
        file_type: &bmp,
        use_transparency: true,
        colors: &colors,
    };
    let written = IndividualFileOutputGenerator.generate(&req, &[story(10)]).unwrap();
    let far = image::open(&written[1]).unwrap();
    assert!(!far.color().has_alpha());
    assert_eq!(far.to_rgb8().get_pixel(1, 2).0, [0, 255, 255]);
}

#[test]
fn no_stories_is_a_validation_error() {
    let dir = scratch("none");
    let png = OutputFileType::new("PNG", true).unwrap();
    let colors = OutputColors::default();
    let req = OutputRequest {
        target_dir: &dir,
        base_name: "w",
        file_type: &png,
        use_transparency: false,
        colors: &colors,
    };
    assert!(matches!(
        IndividualFileOutputGenerator.generate(&req, &[]),
        Err(WallgenError::Validation(_))
    ));
}
