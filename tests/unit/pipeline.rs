use super::*;
use crate::foundation::core::{Mask, PixelBuffer};

fn opaque_subject(w: u32, h: u32, rgb: [u8; 3]) -> Subject {
    Subject::new(
        PixelBuffer::filled(w, h, rgb).unwrap(),
        Mask::filled(w, h, 255).unwrap(),
    )
    .unwrap()
}

#[test]
fn params_new_uses_documented_defaults() {
    let params = RenderParams::new(1920, 1080);
    assert_eq!(params.max_width_ratio, 0.75);
    assert_eq!(params.max_height_ratio, 0.50);
    assert_eq!(params.horizon_fraction, 0.65);
    assert_eq!(params.scene, SceneConfig::default());
    assert!(params.reflection.is_some());
    assert_eq!(params.reflection_gap_px, 0);
    assert_eq!(params.seed, 0);
}

#[test]
fn params_deserialize_with_defaults_from_minimal_json() {
    let params: RenderParams = serde_json::from_str(r#"{"width":100,"height":80}"#).unwrap();
    assert_eq!(params.width, 100);
    assert_eq!(params.height, 80);
    assert_eq!(params.horizon_fraction, 0.65);
    assert_eq!(params.shadows, ShadowParams::default());
}

#[test]
fn params_serde_roundtrip() {
    let params = RenderParams::new(640, 480);
    let json = serde_json::to_string(&params).unwrap();
    let back: RenderParams = serde_json::from_str(&json).unwrap();
    assert_eq!(params, back);
}

#[test]
fn zero_canvas_is_rejected() {
    let subject = opaque_subject(10, 10, [50, 50, 50]);
    let params = RenderParams::new(0, 100);
    assert!(matches!(
        render_scene(&subject, &params),
        Err(crate::StageError::InvalidDimensions(_))
    ));
}

#[test]
fn empty_mask_renders_background_only() {
    let subject = Subject::new(
        PixelBuffer::filled(40, 30, [90, 10, 10]).unwrap(),
        Mask::new(40, 30).unwrap(),
    )
    .unwrap();
    let params = RenderParams::new(160, 120);

    let artifacts = render_scene_with_artifacts(&subject, &params).unwrap();
    assert_eq!(artifacts.final_image.data(), artifacts.background.data());
}

#[test]
fn artifacts_expose_all_stages() {
    let subject = opaque_subject(40, 20, [180, 40, 40]);
    let params = RenderParams::new(200, 150);

    let artifacts = render_scene_with_artifacts(&subject, &params).unwrap();
    assert_eq!(artifacts.background.dimensions(), (200, 150));
    assert_eq!(artifacts.placed_mask.dimensions(), (200, 150));
    assert_eq!(artifacts.final_image.dimensions(), (200, 150));
    assert!(artifacts.reflection.is_some());

    // the placed mask carries the silhouette at the computed position
    let bbox = artifacts.placed_mask.silhouette_box().unwrap();
    assert_eq!(bbox.x_min as i32, artifacts.position.0);
    assert_eq!(bbox.y_min as i32, artifacts.position.1);
}

#[test]
fn custom_floor_line_strategy_is_honored() {
    struct FixedRow(u32);
    impl FloorLine for FixedRow {
        fn floor_y(&self, _canvas: Canvas, _subject: &Subject) -> u32 {
            self.0
        }
    }

    let subject = opaque_subject(40, 20, [180, 40, 40]);
    let params = RenderParams::new(200, 150);
    let artifacts =
        render_scene_with_floor_line(&subject, &params, &FixedRow(100)).unwrap();
    // bottom edge = floor + 5% seat sink of subject height (20 -> 1)
    assert_eq!(artifacts.position.1 + 20, 100 + 1);
}
