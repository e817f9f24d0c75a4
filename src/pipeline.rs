//! One-shot render pipeline.
//!
//! [`render_scene`] is the primary API for producing a finished product
//! photograph from a [`Subject`]. Each stage is a pure function from inputs
//! to a fresh buffer; [`render_scene_with_artifacts`] keeps every
//! intermediate for diagnostic/preview surfaces (mask / background /
//! layers / final thumbnails).

use crate::compose::compositor::compose;
use crate::compose::layout::{FloorLine, HorizonFraction, auto_position_at, auto_scale};
use crate::foundation::core::{Canvas, Mask, PixelBuffer, Subject};
use crate::foundation::error::StageResult;
use crate::raster::blit::blit_mask;
use crate::scene::background::synthesize_background;
use crate::scene::config::SceneConfig;
use crate::scene::reflection::{ReflectionSpec, synthesize_reflection};
use crate::scene::shadow::{ShadowParams, ShadowSet, synthesize_shadows};

/// Caller-facing knobs for a one-shot scene render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderParams {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Scene preset or custom config.
    #[serde(default = "default_scene")]
    pub scene: SceneConfig,
    /// Maximum subject width as a fraction of canvas width.
    #[serde(default = "default_max_width_ratio")]
    pub max_width_ratio: f32,
    /// Maximum subject height as a fraction of canvas height.
    #[serde(default = "default_max_height_ratio")]
    pub max_height_ratio: f32,
    /// Floor line as a fraction of canvas height.
    #[serde(default = "default_horizon_fraction")]
    pub horizon_fraction: f32,
    /// Per-kind shadow specs.
    #[serde(default)]
    pub shadows: ShadowParams,
    /// Reflection spec; `None` disables the reflection layer.
    #[serde(default = "default_reflection")]
    pub reflection: Option<ReflectionSpec>,
    /// Vertical gap between subject bottom and reflection top, in pixels;
    /// negative values overlap.
    #[serde(default)]
    pub reflection_gap_px: i32,
    /// Seed for the background noise dither.
    #[serde(default)]
    pub seed: u64,
}

fn default_scene() -> SceneConfig {
    SceneConfig::default()
}

fn default_max_width_ratio() -> f32 {
    0.75
}

fn default_max_height_ratio() -> f32 {
    0.50
}

fn default_horizon_fraction() -> f32 {
    0.65
}

fn default_reflection() -> Option<ReflectionSpec> {
    Some(ReflectionSpec::default())
}

impl RenderParams {
    /// Defaults for a given output size: `studio_white` scene, 0.75/0.50
    /// placement ratios, horizon at 0.65, built-in shadows and reflection.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scene: default_scene(),
            max_width_ratio: default_max_width_ratio(),
            max_height_ratio: default_max_height_ratio(),
            horizon_fraction: default_horizon_fraction(),
            shadows: ShadowParams::default(),
            reflection: default_reflection(),
            reflection_gap_px: 0,
            seed: 0,
        }
    }
}

/// Every intermediate buffer of one render call, for preview surfaces.
#[derive(Clone, Debug)]
pub struct RenderArtifacts {
    /// Background alone, before any subject-derived layer.
    pub background: PixelBuffer,
    /// Scaled subject as placed.
    pub subject: Subject,
    /// Subject position (top-left) in canvas coordinates.
    pub position: (i32, i32),
    /// Canvas-size mask with the subject silhouette in place.
    pub placed_mask: Mask,
    /// The three shadow layers, origins in canvas coordinates.
    pub shadows: ShadowSet,
    /// Reflection image and alpha, when enabled.
    pub reflection: Option<(PixelBuffer, Mask)>,
    /// Final composited image.
    pub final_image: PixelBuffer,
}

/// Render a subject into a finished studio shot.
#[tracing::instrument(skip(subject, params))]
pub fn render_scene(subject: &Subject, params: &RenderParams) -> StageResult<PixelBuffer> {
    render_scene_with_artifacts(subject, params).map(|a| a.final_image)
}

/// Render and keep every intermediate stage output.
pub fn render_scene_with_artifacts(
    subject: &Subject,
    params: &RenderParams,
) -> StageResult<RenderArtifacts> {
    render_scene_with_floor_line(subject, params, &HorizonFraction(params.horizon_fraction))
}

/// Render with a caller-supplied floor-line strategy instead of the fixed
/// horizon fraction.
pub fn render_scene_with_floor_line(
    subject: &Subject,
    params: &RenderParams,
    floor_line: &dyn FloorLine,
) -> StageResult<RenderArtifacts> {
    let canvas = Canvas::new(params.width, params.height)?;
    let background =
        synthesize_background(params.width, params.height, &params.scene, params.seed)?;

    let scaled = auto_scale(
        subject,
        canvas,
        params.max_width_ratio,
        params.max_height_ratio,
    )?;
    let floor_y = floor_line.floor_y(canvas, &scaled);
    let position = auto_position_at(canvas, (scaled.width(), scaled.height()), floor_y);
    tracing::debug!(?position, floor_y, "subject placed");

    // Shadow origins are canvas coordinates, so the silhouette is placed on
    // a canvas-size mask before synthesis.
    let mut placed_mask = Mask::new(canvas.width, canvas.height)?;
    blit_mask(&mut placed_mask, &scaled.mask, position);
    let shadows = synthesize_shadows(&placed_mask, &params.shadows)?;

    let reflection = match &params.reflection {
        Some(spec) => Some(synthesize_reflection(&scaled.image, &scaled.mask, spec)?),
        None => None,
    };

    let final_image = compose(
        &background,
        &scaled,
        &shadows,
        reflection.as_ref().map(|(img, alpha)| (img, alpha)),
        position,
        params.reflection_gap_px,
    )?;

    Ok(RenderArtifacts {
        background,
        subject: scaled,
        position,
        placed_mask,
        shadows,
        reflection,
        final_image,
    })
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
