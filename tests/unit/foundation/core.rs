use super::*;

#[test]
fn hex_colors_roundtrip_through_serde() {
    let c: Rgb8 = serde_json::from_value(serde_json::json!("#FF8000")).unwrap();
    assert_eq!(c, Rgb8::new(255, 128, 0));
    assert_eq!(serde_json::to_value(c).unwrap(), serde_json::json!("#ff8000"));

    let c: Rgb8 = serde_json::from_value(serde_json::json!("00ffff")).unwrap();
    assert_eq!(c, Rgb8::CYAN);
}

#[test]
fn malformed_hex_is_rejected() {
    assert!(Rgb8::parse_hex("#fff").is_err());
    assert!(Rgb8::parse_hex("#gg0000").is_err());
    assert!(serde_json::from_value::<Rgb8>(serde_json::json!("#12345")).is_err());
}

#[test]
fn rect_intersection_and_containment() {
    let a = PixelRect::new(0, 0, 10, 10);
    let b = PixelRect::new(5, -5, 10, 10);
    assert_eq!(a.intersect(b), Some(PixelRect::new(5, 0, 5, 5)));
    assert_eq!(a.intersect(PixelRect::new(10, 0, 3, 3)), None);

    assert!(a.contains(0, 0));
    assert!(a.contains(9, 9));
    assert!(!a.contains(10, 9));
    assert!(!a.contains(-1, 0));
}

#[test]
fn outset_grows_every_side() {
    let r = PixelRect::new(4, 6, 10, 2).outset(2);
    assert_eq!(r, PixelRect::new(2, 4, 14, 6));
    assert_eq!(r.right(), 16);
    assert_eq!(r.bottom(), 10);
}

#[test]
fn size_display_and_emptiness() {
    assert_eq!(Size::new(200, 100).to_string(), "200x100");
    assert!(Size::new(0, 4).is_empty());
    assert!(!Size::new(1, 1).is_empty());
}
