use std::collections::BTreeMap;

use image::Rgba;

use super::*;
use crate::config::manager::OutputFileType;
use crate::config::profile::{AtlasPosition, TransparentRegion};
use crate::foundation::core::{Rgb8, Size};
use crate::generate::segment::WallSegment;
use crate::generate::stacking::stack_stories;
use crate::geometry::footprint::Footprint;

const BLACK: [u8; 4] = [0, 0, 0, 255];
const CYAN: [u8; 4] = [0, 255, 255, 255];
const MAGENTA: [u8; 4] = [255, 0, 255, 255];

fn solid(w: u32, h: u32, c: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(c))
}

fn layout(
    positions: &[(WallSegment, i64, i64)],
    regions: Vec<TransparentRegion>,
) -> AtlasLayout {
    AtlasLayout {
        width: 60,
        height: 150,
        positions: positions
            .iter()
            .map(|&(s, x, y)| (s, AtlasPosition { x, y }))
            .collect::<BTreeMap<_, _>>(),
        transparent_regions: regions,
        border_thickness: 2,
    }
}

fn stacked(w: u32, h: u32, story: u32, c: [u8; 4]) -> RgbaImage {
    stack_stories(&solid(w, h, c), &Footprint::full(Size::new(w, h)), story).unwrap()
}

fn set_with(segment: WallSegment, image: RgbaImage) -> WallSet {
    let mut set = WallSet::new();
    set.insert(segment, image);
    set
}

#[test]
fn background_and_color_key_marker() {
    let layout = layout(&[], Vec::new());
    let atlas = SingleFileOutputGenerator::new(&layout)
        .compose(&[WallSet::new()], &OutputColors::default(), false)
        .unwrap();
    assert_eq!(atlas.dimensions(), (60, 150));
    assert_eq!(atlas.get_pixel(0, 0).0, CYAN);
    assert_eq!(atlas.get_pixel(1, 0).0, BLACK);
    assert_eq!(atlas.get_pixel(55, 5).0, BLACK);
}

#[test]
fn real_transparency_skips_the_marker_and_clears_regions() {
    let region = TransparentRegion {
        segment: None,
        x: 40,
        y: 10,
        width: 10,
        height: 10,
    };
    let layout = layout(&[], vec![region]);
    let atlas = SingleFileOutputGenerator::new(&layout)
        .compose(&[WallSet::new()], &OutputColors::default(), true)
        .unwrap();
    assert_eq!(atlas.get_pixel(0, 0).0, BLACK);
    assert_eq!(atlas.get_pixel(45, 15)[3], 0);
    assert_eq!(atlas.get_pixel(39, 15).0, MAGENTA);
    assert_eq!(atlas.get_pixel(38, 15).0, MAGENTA);
    assert_eq!(atlas.get_pixel(37, 15).0, BLACK);
    assert_eq!(atlas.get_pixel(50, 20).0, MAGENTA);
}

#[test]
fn color_keyed_regions_are_filled_with_the_marker() {
    let region = TransparentRegion {
        segment: None,
        x: 40,
        y: 10,
        width: 10,
        height: 10,
    };
    let layout = layout(&[], vec![region]);
    let atlas = SingleFileOutputGenerator::new(&layout)
        .compose(&[WallSet::new()], &OutputColors::default(), false)
        .unwrap();
    assert_eq!(atlas.get_pixel(45, 15).0, CYAN);
}

#[test]
fn segment_drawing_is_clipped_to_its_region() {
    let region = TransparentRegion {
        segment: Some(WallSegment::CloseFront),
        x: 10,
        y: 10,
        width: 20,
        height: 20,
    };
    let layout = layout(&[(WallSegment::CloseFront, 10, 10)], vec![region]);
    let stories = [set_with(WallSegment::CloseFront, solid(30, 30, [255, 0, 0, 255]))];
    let atlas = SingleFileOutputGenerator::new(&layout)
        .compose(&stories, &OutputColors::default(), true)
        .unwrap();
    assert_eq!(atlas.get_pixel(15, 15).0, [255, 0, 0, 255]);
    assert_eq!(atlas.get_pixel(29, 29).0, [255, 0, 0, 255]);
    assert_eq!(atlas.get_pixel(30, 15).0, MAGENTA);
    assert_eq!(atlas.get_pixel(35, 15).0, BLACK);
}

#[test]
fn taller_upper_story_grows_upward_from_the_ground_baseline() {
    let layout = layout(&[(WallSegment::CloseFront, 10, 30)], Vec::new());
    let blue = [0, 0, 255, 255];
    let green = [0, 255, 0, 255];
    let stories = [
        set_with(WallSegment::CloseFront, solid(10, 10, blue)),
        set_with(WallSegment::CloseFront, stacked(10, 10, 2, green)),
    ];
    let atlas = SingleFileOutputGenerator::new(&layout)
        .compose(&stories, &OutputColors::default(), false)
        .unwrap();
    assert_eq!(atlas.get_pixel(12, 19).0, BLACK);
    assert_eq!(atlas.get_pixel(12, 22).0, green);
    assert_eq!(atlas.get_pixel(12, 29).0, green);
    assert_eq!(atlas.get_pixel(12, 30).0, blue);
    assert_eq!(atlas.get_pixel(12, 39).0, blue);
    assert_eq!(atlas.get_pixel(12, 40).0, BLACK);
}

#[test]
fn empty_middle_story_keeps_its_tier_clear() {
    let region = TransparentRegion {
        segment: Some(WallSegment::CloseFront),
        x: 10,
        y: 10,
        width: 10,
        height: 40,
    };
    let layout = layout(&[(WallSegment::CloseFront, 10, 40)], vec![region]);
    let blue = [0, 0, 255, 255];
    let red = [255, 0, 0, 255];
    let stories = [
        set_with(WallSegment::CloseFront, solid(10, 10, blue)),
        set_with(WallSegment::CloseFront, stacked(10, 10, 2, [0, 0, 0, 0])),
        set_with(WallSegment::CloseFront, stacked(10, 10, 3, red)),
    ];
    let atlas = SingleFileOutputGenerator::new(&layout)
        .compose(&stories, &OutputColors::default(), true)
        .unwrap();
    // Tiers, top down: story 3 at rows 20..30, story 2 at 30..40, ground at 40..50.
    assert_eq!(atlas.get_pixel(15, 15)[3], 0);
    assert_eq!(atlas.get_pixel(15, 25).0, red);
    assert_eq!(atlas.get_pixel(15, 30)[3], 0);
    assert_eq!(atlas.get_pixel(15, 39)[3], 0);
    assert_eq!(atlas.get_pixel(15, 45).0, blue);
}

#[test]
fn missing_segment_or_stories_fail() {
    let layout = layout(&[(WallSegment::FarFront, 0, 0)], Vec::new());
    let writer = SingleFileOutputGenerator::new(&layout);
    let colors = OutputColors::default();
    assert!(matches!(
        writer.compose(&[], &colors, false),
        Err(WallgenError::Validation(_))
    ));
    assert!(writer.compose(&[WallSet::new()], &colors, false).is_err());
}

#[test]
fn generate_writes_one_named_file() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/wallgen-unit/atlas");
    std::fs::create_dir_all(&dir).unwrap();
    let layout = layout(&[(WallSegment::CloseFront, 10, 10)], Vec::new());
    let stories = [set_with(WallSegment::CloseFront, solid(5, 5, [9, 9, 9, 255]))];
    let png = OutputFileType::new("PNG", true).unwrap();
    let colors = OutputColors {
        transparency: Rgb8::new(1, 2, 3),
        ..OutputColors::default()
    };
    let req = OutputRequest {
        target_dir: &dir,
        base_name: "My Atlas",
        file_type: &png,
        use_transparency: false,
        colors: &colors,
    };
    let written = SingleFileOutputGenerator::new(&layout)
        .generate(&req, &stories)
        .unwrap();
    assert_eq!(written, vec![dir.join("My_Atlas.png")]);
    let back = image::open(&written[0]).unwrap().to_rgba8();
    assert_eq!(back.get_pixel(0, 0).0, [1, 2, 3, 255]);
    assert_eq!(back.get_pixel(12, 12).0, [9, 9, 9, 255]);
}
