use super::*;

#[test]
fn known_presets_resolve() {
    for name in SceneConfig::preset_names() {
        assert!(SceneConfig::preset(name).is_some(), "missing preset {name}");
    }
}

#[test]
fn unknown_preset_is_none() {
    assert!(SceneConfig::preset("neon_disco").is_none());
}

#[test]
fn default_is_studio_white() {
    let default = SceneConfig::default();
    let preset = SceneConfig::preset("studio_white").unwrap();
    assert_eq!(default, preset);
    assert_eq!(default.top_color, [250, 250, 250]);
    assert_eq!(default.horizon_position, 0.65);
    assert_eq!(default.variant, BackgroundVariant::Flat);
}

#[test]
fn room_presets_use_room_variant() {
    for name in ["room_showroom", "room_white", "room_dark"] {
        let cfg = SceneConfig::preset(name).unwrap();
        assert_eq!(cfg.variant, BackgroundVariant::Room3d, "{name}");
    }
}

#[test]
fn serde_roundtrip_is_stable() {
    let cfg = SceneConfig::preset("cyclorama_white").unwrap();
    let json = serde_json::to_string(&cfg).unwrap();
    let back: SceneConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg, back);
}

#[test]
fn from_json_preset_with_overrides() {
    let value = serde_json::json!({
        "preset": "studio_dark",
        "vignette_strength": 0.5,
        "horizon_position": 0.7,
    });
    let cfg = SceneConfig::from_json(&value).unwrap();
    let base = SceneConfig::preset("studio_dark").unwrap();

    assert_eq!(cfg.vignette_strength, 0.5);
    assert_eq!(cfg.horizon_position, 0.7);
    assert_eq!(cfg.top_color, base.top_color);
    assert_eq!(cfg.floor_color, base.floor_color);
    assert_eq!(cfg.variant, base.variant);
}

#[test]
fn from_json_unknown_preset_fails() {
    let value = serde_json::json!({ "preset": "nope" });
    assert!(SceneConfig::from_json(&value).is_err());
}

#[test]
fn from_json_full_custom_config() {
    let value = serde_json::json!({
        "top_color": [1, 2, 3],
        "horizon_color": [4, 5, 6],
        "floor_color": [7, 8, 9],
    });
    let cfg = SceneConfig::from_json(&value).unwrap();
    assert_eq!(cfg.top_color, [1, 2, 3]);
    assert_eq!(cfg.floor_color, [7, 8, 9]);
    // omitted fields take their documented defaults
    assert_eq!(cfg.horizon_position, 0.65);
    assert!(!cfg.vignette_enabled);
    assert_eq!(cfg.dither_amplitude, 0.0);
}

#[test]
fn from_json_custom_without_colors_fails() {
    let value = serde_json::json!({ "horizon_position": 0.6 });
    assert!(SceneConfig::from_json(&value).is_err());
}
