//! Final layer assembly.
//!
//! Blend order is fixed and physically motivated, bottom to top:
//! background -> reflection -> drop shadow -> ambient shadow -> contact
//! shadow -> subject. RGB layers use the standard "over" composite, shadow
//! layers a multiplicative darken. Every blend is clipped to the canvas.

use crate::foundation::core::{Mask, PixelBuffer, Subject};
use crate::foundation::error::{StageError, StageResult};
use crate::raster::blit::{blend_layer, blend_over};
use crate::scene::shadow::ShadowSet;

/// Composite all layers of a staged scene into a fresh buffer.
///
/// `position` is the subject's top-left corner in canvas coordinates; the
/// reflection (when present) is seated directly below the subject's bottom
/// edge plus `reflection_gap_px`. Deterministic: identical inputs produce
/// byte-identical output.
pub fn compose(
    background: &PixelBuffer,
    subject: &Subject,
    shadows: &ShadowSet,
    reflection: Option<(&PixelBuffer, &Mask)>,
    position: (i32, i32),
    reflection_gap_px: i32,
) -> StageResult<PixelBuffer> {
    let mut out = background.clone();

    if let Some((img, alpha)) = reflection {
        if img.dimensions() != alpha.dimensions() {
            return Err(StageError::dimension_mismatch(format!(
                "reflection image is {}x{} but alpha is {}x{}",
                img.width(),
                img.height(),
                alpha.width(),
                alpha.height()
            )));
        }
        let origin = (
            position.0,
            position
                .1
                .saturating_add(subject.height() as i32)
                .saturating_add(reflection_gap_px),
        );
        blend_over(&mut out, img, alpha, origin);
    }

    // Furthest/softest first, sharpest last.
    blend_layer(&mut out, &shadows.drop);
    blend_layer(&mut out, &shadows.ambient);
    blend_layer(&mut out, &shadows.contact);

    blend_over(&mut out, &subject.image, &subject.mask, position);
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
