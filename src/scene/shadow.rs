//! Silhouette-derived ground shadow synthesis.
//!
//! Three layers of increasing softness are cut from the bottom of the
//! subject silhouette: a sharp contact line, a medium ambient pool, and a
//! wide drop shadow. Each layer is an intensity map positioned under the
//! silhouette; the compositor darkens the canvas with them in
//! drop -> ambient -> contact order.

use image::imageops::FilterType;

use crate::foundation::core::{Layer, Mask, SilhouetteBox};
use crate::foundation::error::{StageError, StageResult};
use crate::foundation::math::clamp_u8;
use crate::raster::blur::{blur_mask, default_sigma};
use crate::raster::resize::resize_mask;

/// The three built-in shadow layers, sharpest to softest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ShadowKind {
    /// Sharp, thin line directly under the contact points.
    Contact,
    /// Soft pool under the whole silhouette.
    Ambient,
    /// Very soft, wide falloff furthest from the subject.
    Drop,
}

/// Tunable parameters for one shadow layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShadowSpec {
    /// Gaussian blur radius; kernel size is `2 * blur_radius + 1`.
    pub blur_radius: u32,
    /// Intensity scale in `[0, 1]`.
    pub opacity: f32,
    /// Vertical offset below the silhouette's lowest pixel.
    pub offset_y: i32,
    /// Shadow width as a fraction of the silhouette width.
    pub scale_x: f32,
    /// Shadow height as a fraction of the silhouette height.
    pub scale_y: f32,
    /// Apply the 2-D elliptical edge falloff (soft shadows only).
    pub gradient: bool,
}

impl ShadowSpec {
    /// Built-in table entry for a shadow kind.
    pub fn builtin(kind: ShadowKind) -> Self {
        match kind {
            ShadowKind::Contact => Self {
                blur_radius: 5,
                opacity: 0.45,
                offset_y: 0,
                scale_x: 0.95,
                scale_y: 0.015,
                gradient: false,
            },
            ShadowKind::Ambient => Self {
                blur_radius: 35,
                opacity: 0.25,
                offset_y: 5,
                scale_x: 1.1,
                scale_y: 0.12,
                gradient: true,
            },
            ShadowKind::Drop => Self {
                blur_radius: 80,
                opacity: 0.15,
                offset_y: 15,
                scale_x: 1.3,
                scale_y: 0.20,
                gradient: true,
            },
        }
    }

    /// Built-in table entry with JSON field overrides applied.
    ///
    /// Recognized keys: `blur_radius`, `opacity`, `offset_y`, `scale_x`,
    /// `scale_y`, `gradient`. Unknown keys are rejected.
    pub fn with_overrides(kind: ShadowKind, overrides: &serde_json::Value) -> StageResult<Self> {
        let obj = overrides
            .as_object()
            .ok_or_else(|| StageError::validation("shadow overrides must be an object"))?;
        let mut spec = Self::builtin(kind);
        for (key, value) in obj {
            match key.as_str() {
                "blur_radius" => spec.blur_radius = get_u32(value, key)?,
                "opacity" => spec.opacity = get_f32(value, key)?,
                "offset_y" => spec.offset_y = get_i32(value, key)?,
                "scale_x" => spec.scale_x = get_f32(value, key)?,
                "scale_y" => spec.scale_y = get_f32(value, key)?,
                "gradient" => {
                    spec.gradient = value.as_bool().ok_or_else(|| {
                        StageError::validation("shadow field 'gradient' must be a bool")
                    })?;
                }
                _ => {
                    return Err(StageError::validation(format!(
                        "unknown shadow spec field '{key}'"
                    )));
                }
            }
        }
        Ok(spec)
    }
}

/// Per-kind shadow specs for one render call.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShadowParams {
    /// Contact layer spec.
    #[serde(default = "builtin_contact")]
    pub contact: ShadowSpec,
    /// Ambient layer spec.
    #[serde(default = "builtin_ambient")]
    pub ambient: ShadowSpec,
    /// Drop layer spec.
    #[serde(default = "builtin_drop")]
    pub drop: ShadowSpec,
}

fn builtin_contact() -> ShadowSpec {
    ShadowSpec::builtin(ShadowKind::Contact)
}

fn builtin_ambient() -> ShadowSpec {
    ShadowSpec::builtin(ShadowKind::Ambient)
}

fn builtin_drop() -> ShadowSpec {
    ShadowSpec::builtin(ShadowKind::Drop)
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            contact: builtin_contact(),
            ambient: builtin_ambient(),
            drop: builtin_drop(),
        }
    }
}

/// The three synthesized shadow layers of one subject.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShadowSet {
    /// Sharp contact layer.
    pub contact: Layer,
    /// Soft ambient layer.
    pub ambient: Layer,
    /// Wide drop layer.
    pub drop: Layer,
}

/// Synthesize one shadow layer from a subject mask.
///
/// The returned layer's intensity buffer covers only the shadow footprint;
/// its origin centers it horizontally under the silhouette and anchors it at
/// the silhouette's lowest visible pixel plus `spec.offset_y`. An empty
/// silhouette yields an all-zero layer of mask size, never an error.
pub fn synthesize_shadow(mask: &Mask, spec: &ShadowSpec) -> StageResult<Layer> {
    let Some(bbox) = mask.silhouette_box() else {
        return Ok(Layer::shadow(
            Mask::new(mask.width(), mask.height())?,
            (0, 0),
        ));
    };

    let box_w = bbox.width();
    let box_h = bbox.height();
    let strip_h = (((box_h as f32) * spec.scale_y.max(0.0)).round() as u32)
        .clamp(1, box_h);
    let shadow_w = (((box_w as f32) * spec.scale_x.max(0.0)).round() as u32).max(1);

    let strip = extract_bottom_strip(mask, &bbox, strip_h)?;
    let mut shadow = resize_mask(&strip, shadow_w, strip_h, FilterType::Triangle)?;

    if spec.gradient {
        apply_elliptical_falloff(&mut shadow);
    }
    if spec.blur_radius > 0 {
        shadow = blur_mask(&shadow, spec.blur_radius, default_sigma(spec.blur_radius))?;
    }

    let opacity = spec.opacity.clamp(0.0, 1.0);
    for v in shadow.data_mut() {
        *v = clamp_u8(f32::from(*v) * opacity);
    }

    let origin_x = bbox.x_min as i64 + (i64::from(box_w) - i64::from(shadow_w)) / 2;
    let origin_y = i64::from(bbox.y_max) + i64::from(spec.offset_y);
    Ok(Layer::shadow(
        shadow,
        (origin_x as i32, origin_y as i32),
    ))
}

/// Synthesize all three layers with per-kind specs.
pub fn synthesize_shadows(mask: &Mask, params: &ShadowParams) -> StageResult<ShadowSet> {
    Ok(ShadowSet {
        contact: synthesize_shadow(mask, &params.contact)?,
        ambient: synthesize_shadow(mask, &params.ambient)?,
        drop: synthesize_shadow(mask, &params.drop)?,
    })
}

/// Bottom `strip_h` rows of the silhouette's bounding box.
fn extract_bottom_strip(mask: &Mask, bbox: &SilhouetteBox, strip_h: u32) -> StageResult<Mask> {
    let box_w = bbox.width();
    let y_start = bbox.y_max + 1 - strip_h;
    let mut strip = Mask::new(box_w, strip_h)?;
    for dy in 0..strip_h {
        let src_row = mask.row(y_start + dy);
        let src = &src_row[bbox.x_min as usize..=bbox.x_max as usize];
        strip.row_mut(dy).copy_from_slice(src);
    }
    Ok(strip)
}

fn get_u32(value: &serde_json::Value, key: &str) -> StageResult<u32> {
    let v = value
        .as_u64()
        .ok_or_else(|| StageError::validation(format!("shadow field '{key}' must be a u32")))?;
    u32::try_from(v)
        .map_err(|_| StageError::validation(format!("shadow field '{key}' out of range")))
}

fn get_i32(value: &serde_json::Value, key: &str) -> StageResult<i32> {
    let v = value
        .as_i64()
        .ok_or_else(|| StageError::validation(format!("shadow field '{key}' must be an i32")))?;
    i32::try_from(v)
        .map_err(|_| StageError::validation(format!("shadow field '{key}' out of range")))
}

fn get_f32(value: &serde_json::Value, key: &str) -> StageResult<f32> {
    let v = value
        .as_f64()
        .ok_or_else(|| StageError::validation(format!("shadow field '{key}' must be a number")))?;
    let v = v as f32;
    if !v.is_finite() {
        return Err(StageError::validation(format!(
            "shadow field '{key}' must be finite"
        )));
    }
    Ok(v)
}

/// Horizontal fade `1 - (|x - cx| / halfwidth)^1.5 * 0.5` times vertical
/// fade `1 - (y / h) * 0.7`, in place.
fn apply_elliptical_falloff(shadow: &mut Mask) {
    let (w, h) = shadow.dimensions();
    let cx = (w as f32) / 2.0;
    for y in 0..h {
        let y_fade = 1.0 - (y as f32 / h as f32) * 0.7;
        let row = shadow.row_mut(y);
        for (x, v) in row.iter_mut().enumerate() {
            let dist = (x as f32 - cx).abs() / cx;
            let x_fade = 1.0 - dist.powf(1.5) * 0.5;
            *v = clamp_u8(f32::from(*v) * x_fade * y_fade);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/shadow.rs"]
mod tests;
