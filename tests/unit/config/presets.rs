use std::path::PathBuf;

use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("wallgen-unit")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn defaults_match_output_color_defaults() {
    let p = Presets::default();
    assert_eq!(p.output_colors(), OutputColors::default());
    assert_eq!(p.post_processing(), PostProcessingParameters::default());
}

#[test]
fn capture_then_restore_keeps_settings() {
    let params = PostProcessingParameters {
        near_darkening: 0.2,
        far_darkening: 0.6,
        softening: Some(0.1),
        unsharpen: UnsharpenLevel::Normal,
        filter_order: FilterOrder::SoftenThenUnsharp,
        scaling_method: ScalingMethod::Bicubic,
        blend_color: Rgb8::new(10, 20, 30),
    };
    let colors = OutputColors {
        text: Rgb8::new(1, 2, 3),
        ..OutputColors::default()
    };
    let basic = BasicOptions {
        resolution: Some("Test".into()),
        output_format: Some("Atlas".into()),
        output_file_type: Some("PNG".into()),
    };

    let presets = Presets::capture(basic.clone(), &params, &colors, true);
    assert_eq!(presets.post_processing(), params);
    assert_eq!(presets.output_colors(), colors);
    assert_eq!(presets.basic_options, basic);
    assert!(presets.color_options.use_alpha_transparency);
}

#[test]
fn saved_file_loads_back_as_default_settings() {
    let dir = scratch_dir("presets_default");
    assert!(Presets::load_default(&dir).unwrap().is_none());

    let mut presets = Presets::default();
    presets.processing_options.near_darkening = 0.4;
    presets.color_options.border_color = Rgb8::new(0, 128, 0);
    presets.to_path(dir.join(DEFAULT_PRESETS_FILE)).unwrap();

    let loaded = Presets::load_default(&dir).unwrap().unwrap();
    assert_eq!(loaded, presets);
}

#[test]
fn partial_documents_fill_defaults() {
    let json = r##"{ "colorOptions": { "textColor": "#00ff00" } }"##;
    let p = Presets::from_reader(json.as_bytes()).unwrap();
    assert_eq!(p.output_colors().text, Rgb8::new(0, 255, 0));
    assert_eq!(p.output_colors().border, Rgb8::MAGENTA);
    assert_eq!(p.processing_options.scaling_method, ScalingMethod::NearestNeighbour);
}

#[test]
fn bad_color_is_a_serde_error() {
    let json = r##"{ "colorOptions": { "textColor": "green" } }"##;
    assert!(matches!(
        Presets::from_reader(json.as_bytes()),
        Err(WallgenError::Serde(_))
    ));
}
