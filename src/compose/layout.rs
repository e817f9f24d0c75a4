//! Subject placement: shrink-to-fit scaling and floor-line seating.

use image::imageops::FilterType;

use crate::foundation::core::{Canvas, Subject};
use crate::foundation::error::StageResult;
use crate::raster::resize::{resize_mask, resize_rgb};

/// Fraction of subject height sunk below the floor line so the silhouette
/// does not end in a hard cut exactly at the seam.
const SEAT_SINK_FRACTION: f32 = 0.05;

/// Strategy deciding the canvas row where the subject's bottom edge rests.
///
/// The engine ships [`HorizonFraction`]; callers owning a smarter
/// contact-point detector (wheel detection, gradient-based floor finding)
/// implement this trait and pass it to
/// [`render_scene_with_floor_line`](crate::render_scene_with_floor_line).
pub trait FloorLine {
    /// Floor row for this canvas and (already scaled) subject.
    fn floor_y(&self, canvas: Canvas, subject: &Subject) -> u32;
}

/// Fixed floor line at a fraction of canvas height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorizonFraction(pub f32);

impl FloorLine for HorizonFraction {
    fn floor_y(&self, canvas: Canvas, _subject: &Subject) -> u32 {
        ((canvas.height as f32) * self.0.clamp(0.0, 1.0)).round() as u32
    }
}

/// Uniformly shrink a subject so it fits within the given canvas ratios.
///
/// The scale factor is `min(max_w / w, max_h / h)` and is applied only when
/// it is below 1.0; a subject that already fits is returned unchanged.
pub fn auto_scale(
    subject: &Subject,
    canvas: Canvas,
    max_width_ratio: f32,
    max_height_ratio: f32,
) -> StageResult<Subject> {
    let (sw, sh) = (subject.width(), subject.height());
    let max_w = (canvas.width as f32) * max_width_ratio;
    let max_h = (canvas.height as f32) * max_height_ratio;
    let scale = (max_w / sw as f32).min(max_h / sh as f32);
    if scale >= 1.0 {
        return Ok(subject.clone());
    }

    let new_w = (((sw as f32) * scale).round() as u32).max(1);
    let new_h = (((sh as f32) * scale).round() as u32).max(1);
    Subject::new(
        resize_rgb(&subject.image, new_w, new_h, FilterType::Lanczos3)?,
        resize_mask(&subject.mask, new_w, new_h, FilterType::Lanczos3)?,
    )
}

/// Place a subject of `subject_size` on the canvas: horizontally centered,
/// seated on the floor line at `horizon_fraction * canvas.height`.
pub fn auto_position(canvas: Canvas, subject_size: (u32, u32), horizon_fraction: f32) -> (i32, i32) {
    let floor_y = ((canvas.height as f32) * horizon_fraction.clamp(0.0, 1.0)).round() as u32;
    auto_position_at(canvas, subject_size, floor_y)
}

/// Like [`auto_position`] but with an explicit floor row, as produced by a
/// [`FloorLine`] strategy.
pub fn auto_position_at(canvas: Canvas, subject_size: (u32, u32), floor_y: u32) -> (i32, i32) {
    let (sw, sh) = subject_size;
    let x = (i64::from(canvas.width) - i64::from(sw)) / 2;
    let sink = ((sh as f32) * SEAT_SINK_FRACTION).round() as i64;
    let y = i64::from(floor_y) - i64::from(sh) + sink;
    (x as i32, y as i32)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layout.rs"]
mod tests;
