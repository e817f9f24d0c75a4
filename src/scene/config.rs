//! Scene configuration: typed presets for the background synthesizer.
//!
//! Presets are named, fixed-value records; a caller may also supply a fully
//! custom [`SceneConfig`], either directly or as JSON with optional
//! `"preset"` base plus field overrides.

use crate::foundation::error::{StageError, StageResult};

/// Solid RGB color as three 8-bit channels.
pub type Rgb = [u8; 3];

/// Which procedural backdrop generator a scene uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BackgroundVariant {
    /// Flat wall/floor gradient split at the horizon.
    #[default]
    Flat,
    /// Curved studio cyclorama with a perspective-accelerated floor.
    Cyclorama,
    /// Paneled 3-D room with ceiling softbox and glossy floor.
    Room3d,
}

/// Immutable scene preset consumed by [`crate::synthesize_background`].
///
/// Constructed once per render call and read-only afterwards. Colors are
/// required; every effect toggle defaults to off and every strength field
/// has a conservative default, so partial JSON configs deserialize cleanly.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneConfig {
    /// Backdrop generator variant.
    #[serde(default)]
    pub variant: BackgroundVariant,
    /// Wall color at the top edge.
    pub top_color: Rgb,
    /// Color at the wall/floor seam.
    pub horizon_color: Rgb,
    /// Floor color at the bottom edge.
    pub floor_color: Rgb,
    /// Horizon row as a fraction of canvas height; values outside `(0, 1)`
    /// are clamped, never rejected.
    #[serde(default = "default_horizon_position")]
    pub horizon_position: f32,
    /// Weight pushing the floor gradient toward the horizon; 0 yields a
    /// plain smoothstep, 1 concentrates the transition at the seam.
    #[serde(default = "default_floor_gradient")]
    pub floor_gradient_intensity: f32,
    /// Height of the curved cyclorama transition band as a fraction of
    /// canvas height (Cyclorama variant only).
    #[serde(default = "default_curve_intensity")]
    pub curve_intensity: f32,
    /// Darken canvas corners with an elliptical falloff.
    #[serde(default)]
    pub vignette_enabled: bool,
    /// Vignette strength in `[0, 1]`.
    #[serde(default = "default_vignette_strength")]
    pub vignette_strength: f32,
    /// Brighten toward the top with a tinted directional light.
    #[serde(default)]
    pub ambient_enabled: bool,
    /// Ambient light intensity.
    #[serde(default = "default_ambient_intensity")]
    pub ambient_intensity: f32,
    /// Ambient light tint.
    #[serde(default = "default_ambient_color")]
    pub ambient_color: Rgb,
    /// Additive Gaussian spotlight.
    #[serde(default)]
    pub spotlight_enabled: bool,
    /// Spotlight strength.
    #[serde(default = "default_spotlight_strength")]
    pub spotlight_strength: f32,
    /// Spotlight center as canvas-relative `(x, y)` fractions.
    #[serde(default = "default_spotlight_center")]
    pub spotlight_center: [f32; 2],
    /// Center-weighted glossy-floor brightening below the horizon.
    #[serde(default)]
    pub reflection_zone_enabled: bool,
    /// Reflection zone strength.
    #[serde(default = "default_reflection_zone_strength")]
    pub reflection_zone_strength: f32,
    /// Zero-mean Gaussian dither amplitude as a fraction of full range;
    /// 0 disables the dither pass entirely.
    #[serde(default)]
    pub dither_amplitude: f32,
    /// Geometry and fixtures for the [`BackgroundVariant::Room3d`] variant.
    #[serde(default)]
    pub room: Room3dConfig,
}

/// Wall panels, ceiling softbox, and lighting for the 3-D room variant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Room3dConfig {
    /// Groove color between wall panels.
    pub wall_groove: Rgb,
    /// Ceiling base color.
    pub ceiling: Rgb,
    /// Softbox fixture color.
    pub softbox: Rgb,
    /// Number of wall panels.
    pub panel_count: u32,
    /// Groove line width in pixels.
    pub groove_width: u32,
    /// Softbox width as a fraction of canvas width.
    pub softbox_width: f32,
    /// Softbox height as a fraction of the ceiling zone height.
    pub softbox_height: f32,
    /// Vanishing point as a fraction of canvas width.
    pub vanishing_point: f32,
    /// Overall room light intensity.
    pub ambient_intensity: f32,
}

impl Default for Room3dConfig {
    fn default() -> Self {
        Self {
            wall_groove: [215, 215, 220],
            ceiling: [250, 250, 252],
            softbox: [255, 255, 255],
            panel_count: 12,
            groove_width: 3,
            softbox_width: 0.4,
            softbox_height: 0.15,
            vanishing_point: 0.5,
            ambient_intensity: 0.95,
        }
    }
}

fn default_horizon_position() -> f32 {
    0.65
}

fn default_floor_gradient() -> f32 {
    0.3
}

fn default_curve_intensity() -> f32 {
    0.08
}

fn default_vignette_strength() -> f32 {
    0.15
}

fn default_ambient_intensity() -> f32 {
    0.05
}

fn default_ambient_color() -> Rgb {
    [255, 255, 255]
}

fn default_spotlight_strength() -> f32 {
    0.03
}

fn default_spotlight_center() -> [f32; 2] {
    [0.5, 0.45]
}

fn default_reflection_zone_strength() -> f32 {
    0.03
}

impl Default for SceneConfig {
    /// The `studio_white` preset.
    fn default() -> Self {
        Self {
            variant: BackgroundVariant::Flat,
            top_color: [250, 250, 250],
            horizon_color: [240, 240, 240],
            floor_color: [215, 215, 215],
            horizon_position: 0.65,
            floor_gradient_intensity: 0.3,
            curve_intensity: default_curve_intensity(),
            vignette_enabled: true,
            vignette_strength: 0.15,
            ambient_enabled: true,
            ambient_intensity: 0.05,
            ambient_color: [255, 255, 255],
            spotlight_enabled: false,
            spotlight_strength: default_spotlight_strength(),
            spotlight_center: default_spotlight_center(),
            reflection_zone_enabled: true,
            reflection_zone_strength: 0.03,
            dither_amplitude: 0.0,
            room: Room3dConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Look up a named preset; `None` for unknown names.
    pub fn preset(name: &str) -> Option<Self> {
        let flat = |top, horizon, floor, pos, grad| Self {
            variant: BackgroundVariant::Flat,
            top_color: top,
            horizon_color: horizon,
            floor_color: floor,
            horizon_position: pos,
            floor_gradient_intensity: grad,
            curve_intensity: default_curve_intensity(),
            vignette_enabled: true,
            vignette_strength: 0.15,
            ambient_enabled: true,
            ambient_intensity: 0.05,
            ambient_color: [255, 255, 255],
            spotlight_enabled: false,
            spotlight_strength: default_spotlight_strength(),
            spotlight_center: default_spotlight_center(),
            reflection_zone_enabled: true,
            reflection_zone_strength: 0.03,
            dither_amplitude: 0.0,
            room: Room3dConfig::default(),
        };
        let cyclorama = |top, horizon, floor, pos, curve, tint, tint_i| Self {
            variant: BackgroundVariant::Cyclorama,
            top_color: top,
            horizon_color: horizon,
            floor_color: floor,
            horizon_position: pos,
            floor_gradient_intensity: default_floor_gradient(),
            curve_intensity: curve,
            vignette_enabled: true,
            vignette_strength: 0.12,
            ambient_enabled: true,
            ambient_intensity: tint_i,
            ambient_color: tint,
            spotlight_enabled: true,
            spotlight_strength: 0.03,
            spotlight_center: default_spotlight_center(),
            reflection_zone_enabled: true,
            reflection_zone_strength: 0.15,
            dither_amplitude: 0.008,
            room: Room3dConfig::default(),
        };
        let room = |top, horizon, floor, pos, room_cfg| Self {
            variant: BackgroundVariant::Room3d,
            top_color: top,
            horizon_color: horizon,
            floor_color: floor,
            horizon_position: pos,
            floor_gradient_intensity: default_floor_gradient(),
            curve_intensity: default_curve_intensity(),
            vignette_enabled: false,
            vignette_strength: default_vignette_strength(),
            ambient_enabled: false,
            ambient_intensity: default_ambient_intensity(),
            ambient_color: [255, 255, 255],
            spotlight_enabled: false,
            spotlight_strength: default_spotlight_strength(),
            spotlight_center: default_spotlight_center(),
            reflection_zone_enabled: false,
            reflection_zone_strength: default_reflection_zone_strength(),
            dither_amplitude: 0.0,
            room: room_cfg,
        };

        Some(match name {
            "studio_white" => Self::default(),
            "studio_grey" => flat(
                [235, 235, 235],
                [210, 210, 210],
                [175, 175, 175],
                0.65,
                0.35,
            ),
            "studio_dark" => flat([90, 90, 90], [60, 60, 60], [35, 35, 35], 0.65, 0.4),
            "showroom" => flat(
                [248, 248, 250],
                [230, 230, 235],
                [195, 195, 200],
                0.60,
                0.35,
            ),
            "outdoor_neutral" => flat(
                [200, 210, 220],
                [180, 185, 190],
                [160, 165, 170],
                0.55,
                0.25,
            ),
            "dealership" => flat(
                [245, 245, 247],
                [225, 225, 230],
                [185, 185, 195],
                0.62,
                0.4,
            ),
            "cyclorama_white" => cyclorama(
                [252, 252, 252],
                [242, 242, 244],
                [218, 218, 222],
                0.62,
                0.08,
                [255, 253, 250],
                0.03,
            ),
            "cyclorama_dark" => cyclorama(
                [85, 85, 90],
                [55, 55, 60],
                [28, 28, 32],
                0.60,
                0.05,
                [200, 210, 230],
                0.02,
            ),
            "room_showroom" => room(
                [235, 235, 238],
                [210, 210, 215],
                [195, 195, 200],
                0.55,
                Room3dConfig::default(),
            ),
            "room_white" => room(
                [248, 248, 250],
                [240, 240, 245],
                [225, 225, 230],
                0.52,
                Room3dConfig {
                    wall_groove: [235, 235, 240],
                    ceiling: [255, 255, 255],
                    softbox: [255, 255, 255],
                    panel_count: 10,
                    groove_width: 2,
                    softbox_width: 0.35,
                    softbox_height: 0.12,
                    vanishing_point: 0.5,
                    ambient_intensity: 1.0,
                },
            ),
            "room_dark" => room(
                [75, 75, 80],
                [60, 60, 65],
                [45, 45, 50],
                0.55,
                Room3dConfig {
                    wall_groove: [55, 55, 60],
                    ceiling: [90, 90, 95],
                    softbox: [200, 200, 210],
                    panel_count: 12,
                    groove_width: 3,
                    softbox_width: 0.4,
                    softbox_height: 0.15,
                    vanishing_point: 0.5,
                    ambient_intensity: 0.85,
                },
            ),
            _ => return None,
        })
    }

    /// Names accepted by [`SceneConfig::preset`].
    pub fn preset_names() -> &'static [&'static str] {
        &[
            "studio_white",
            "studio_grey",
            "studio_dark",
            "showroom",
            "outdoor_neutral",
            "dealership",
            "cyclorama_white",
            "cyclorama_dark",
            "room_showroom",
            "room_white",
            "room_dark",
        ]
    }

    /// Build a config from JSON.
    ///
    /// With a `"preset"` key, the named preset is the base and every other
    /// key overrides one of its fields; without one, the value must be a
    /// complete config object.
    pub fn from_json(value: &serde_json::Value) -> StageResult<Self> {
        let base = match value.get("preset") {
            Some(p) => {
                let name = p
                    .as_str()
                    .ok_or_else(|| StageError::validation("preset must be a string"))?;
                Self::preset(name)
                    .ok_or_else(|| StageError::validation(format!("unknown preset '{name}'")))?
            }
            None => {
                return serde_json::from_value(value.clone())
                    .map_err(|e| StageError::validation(format!("scene config: {e}")));
            }
        };

        let mut merged = serde_json::to_value(&base)
            .map_err(|e| StageError::validation(format!("scene config: {e}")))?;
        if let (Some(obj), Some(overrides)) = (merged.as_object_mut(), value.as_object()) {
            for (key, v) in overrides {
                if key != "preset" {
                    obj.insert(key.clone(), v.clone());
                }
            }
        }
        serde_json::from_value(merged)
            .map_err(|e| StageError::validation(format!("scene config: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
