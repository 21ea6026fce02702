use std::io::Cursor;

use super::*;

#[test]
fn png_decodes_to_straight_rgba() {
    let src = RgbaImage::from_raw(1, 1, vec![100u8, 50, 200, 128]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(src)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let img = decode_source(&buf).unwrap();
    assert_eq!(img.dimensions(), (1, 1));
    assert_eq!(img.get_pixel(0, 0).0, [100, 50, 200, 128]);
}

#[test]
fn garbage_bytes_are_source_not_found() {
    assert!(matches!(
        decode_source(b"definitely not an image"),
        Err(WallgenError::SourceNotFound(_))
    ));
}

#[test]
fn missing_file_is_source_not_found() {
    let err = load_source(Path::new("target/does-not-exist/nothing.png")).unwrap_err();
    assert!(matches!(err, WallgenError::SourceNotFound(_)));
    assert_eq!(err.user_message(), "Source image could not be found!");
}

#[test]
fn placeholder_is_transparent() {
    let p = placeholder();
    assert_eq!(p.dimensions(), (PLACEHOLDER_EDGE, PLACEHOLDER_EDGE));
    assert!(p.pixels().all(|px| px[3] == 0));
}
