//! Stagekit is a procedural studio scene synthesis and compositing engine.
//!
//! Stagekit turns a cut-out foreground subject (an RGB image plus a per-pixel
//! opacity mask) into a studio-quality product photograph: it synthesizes a
//! procedural backdrop, derives ground-contact shadows and a floor reflection
//! from the subject's silhouette, and composites all layers in a fixed,
//! physically-motivated order.
//!
//! # Pipeline overview
//!
//! 1. **Background**: `SceneConfig -> PixelBuffer` ([`synthesize_background`])
//! 2. **Layout**: auto-scale and seat the subject on the floor line
//!    ([`auto_scale`] / [`auto_position`])
//! 3. **Shadows**: silhouette -> contact/ambient/drop intensity layers
//!    ([`synthesize_shadows`])
//! 4. **Reflection**: faded, desaturated vertical mirror of the subject
//!    ([`synthesize_reflection`])
//! 5. **Compose**: background -> reflection -> drop -> ambient -> contact ->
//!    subject ([`compose`])
//!
//! [`render_scene`] runs the whole pipeline in one shot;
//! [`render_scene_with_artifacts`] additionally returns every intermediate
//! buffer for diagnostic/preview surfaces.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: every stage is a pure function of its
//!   inputs; the one noise source (background dither) is derived from an
//!   explicit seed.
//! - **No IO**: the engine starts from in-memory buffers and ends at an
//!   in-memory buffer; decode/encode belong to the caller.
//! - **Bounds-safe blending**: every layer blend is clipped to the
//!   intersection of the positioned layer and the canvas.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compose;
mod foundation;
mod pipeline;
mod raster;
mod scene;

pub use compose::compositor::compose;
pub use compose::layout::{FloorLine, HorizonFraction, auto_position, auto_position_at, auto_scale};
pub use foundation::core::{
    Canvas, Layer, LayerContent, Mask, PixelBuffer, SilhouetteBox, Subject,
};
pub use foundation::error::{StageError, StageResult};
pub use foundation::math::Rng64;
pub use pipeline::{
    RenderArtifacts, RenderParams, render_scene, render_scene_with_artifacts,
    render_scene_with_floor_line,
};
pub use scene::background::synthesize_background;
pub use scene::config::{BackgroundVariant, Rgb, Room3dConfig, SceneConfig};
pub use scene::reflection::{ReflectionSpec, synthesize_reflection};
pub use scene::shadow::{
    ShadowKind, ShadowParams, ShadowSet, ShadowSpec, synthesize_shadow, synthesize_shadows,
};
