use image::Rgba;

use super::*;

#[test]
fn output_path_replaces_spaces() {
    let p = output_path(Path::new("out"), "My Castle Wall", "png");
    assert_eq!(p, Path::new("out").join("My_Castle_Wall.png"));
}

#[test]
fn flatten_mixes_with_the_matte() {
    let mut img = RgbaImage::from_pixel(2, 1, Rgba([200, 0, 0, 255]));
    img.put_pixel(1, 0, Rgba([200, 0, 0, 0]));
    let flat = flatten(&img, Rgb8::CYAN);
    assert_eq!(flat.get_pixel(0, 0).0, [200, 0, 0]);
    assert_eq!(flat.get_pixel(1, 0).0, [0, 255, 255]);
}

#[test]
fn write_and_read_back_png_and_jpeg() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/wallgen-unit/format");
    std::fs::create_dir_all(&dir).unwrap();
    let img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 128]));

    let png = OutputFileType::new("PNG", true).unwrap();
    let path = output_path(&dir, "alpha kept", &png.extension());
    write_image(&img, &path, &png, true, Rgb8::CYAN).unwrap();
    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back.get_pixel(0, 0).0, [0, 0, 255, 128]);

    let jpeg = OutputFileType::new("JPEG", false).unwrap();
    let path = output_path(&dir, "flat", &jpeg.extension());
    write_image(&img, &path, &jpeg, true, Rgb8::BLACK).unwrap();
    let back = image::open(&path).unwrap();
    assert!(!back.color().has_alpha());
}

#[test]
fn unwritable_path_is_an_io_error() {
    let img = RgbaImage::new(1, 1);
    let png = OutputFileType::new("PNG", true).unwrap();
    let path = Path::new("target/wallgen-unit/no/such/dir/x.png");
    assert!(matches!(
        write_image(&img, path, &png, false, Rgb8::BLACK),
        Err(WallgenError::Io(_))
    ));
}
