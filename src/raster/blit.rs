//! Bounds-safe layer placement and blending.
//!
//! Every blend in the engine routes through [`clip_region`], the single
//! source/destination rectangle intersection. No caller does its own
//! min/max bounds arithmetic.

use crate::foundation::core::{Layer, LayerContent, Mask, PixelBuffer};
use crate::foundation::math::mul_div255_u8;

/// Overlap between a positioned layer rectangle and the canvas rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BlitRegion {
    pub dst_x: u32,
    pub dst_y: u32,
    pub src_x: u32,
    pub src_y: u32,
    pub width: u32,
    pub height: u32,
}

/// Intersect a `layer_w x layer_h` rectangle placed at `origin` with a
/// `canvas_w x canvas_h` canvas. `None` when the rectangles do not overlap.
pub(crate) fn clip_region(
    canvas_w: u32,
    canvas_h: u32,
    origin: (i32, i32),
    layer_w: u32,
    layer_h: u32,
) -> Option<BlitRegion> {
    let (ox, oy) = (i64::from(origin.0), i64::from(origin.1));
    let x0 = ox.max(0);
    let y0 = oy.max(0);
    let x1 = (ox + i64::from(layer_w)).min(i64::from(canvas_w));
    let y1 = (oy + i64::from(layer_h)).min(i64::from(canvas_h));
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(BlitRegion {
        dst_x: x0 as u32,
        dst_y: y0 as u32,
        src_x: (x0 - ox) as u32,
        src_y: (y0 - oy) as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}

/// Copy `src` mask values into `dst` at `origin`, clipped to `dst` bounds.
pub(crate) fn blit_mask(dst: &mut Mask, src: &Mask, origin: (i32, i32)) {
    let Some(r) = clip_region(dst.width(), dst.height(), origin, src.width(), src.height()) else {
        return;
    };
    for dy in 0..r.height {
        let src_row = src.row(r.src_y + dy);
        let dst_row = dst.row_mut(r.dst_y + dy);
        let s = &src_row[r.src_x as usize..(r.src_x + r.width) as usize];
        dst_row[r.dst_x as usize..(r.dst_x + r.width) as usize].copy_from_slice(s);
    }
}

/// Standard "over" alpha composite of an RGB layer onto `dst`, in place.
///
/// `out = base * (1 - a) + layer * a` with `a` from the alpha mask. Pixels
/// outside the canvas are never touched.
pub(crate) fn blend_over(dst: &mut PixelBuffer, pixels: &PixelBuffer, alpha: &Mask, origin: (i32, i32)) {
    let layer_w = pixels.width().min(alpha.width());
    let layer_h = pixels.height().min(alpha.height());
    let Some(r) = clip_region(dst.width(), dst.height(), origin, layer_w, layer_h) else {
        return;
    };
    for dy in 0..r.height {
        for dx in 0..r.width {
            let (sx, sy) = (r.src_x + dx, r.src_y + dy);
            let (cx, cy) = (r.dst_x + dx, r.dst_y + dy);
            let a = u16::from(alpha.value(sx, sy));
            if a == 0 {
                continue;
            }
            let src = pixels.pixel(sx, sy);
            if a == 255 {
                dst.set_pixel(cx, cy, src);
                continue;
            }
            let inv = 255 - a;
            let base = dst.pixel(cx, cy);
            let mut out = [0u8; 3];
            for c in 0..3 {
                out[c] = mul_div255_u8(u16::from(src[c]), a)
                    .saturating_add(mul_div255_u8(u16::from(base[c]), inv));
            }
            dst.set_pixel(cx, cy, out);
        }
    }
}

/// Multiplicative darken blend of a shadow intensity map onto `dst`, in place.
///
/// `out = base * (1 - intensity / 255)`.
pub(crate) fn blend_darken(dst: &mut PixelBuffer, intensity: &Mask, origin: (i32, i32)) {
    let Some(r) = clip_region(
        dst.width(),
        dst.height(),
        origin,
        intensity.width(),
        intensity.height(),
    ) else {
        return;
    };
    for dy in 0..r.height {
        for dx in 0..r.width {
            let i = u16::from(intensity.value(r.src_x + dx, r.src_y + dy));
            if i == 0 {
                continue;
            }
            let (cx, cy) = (r.dst_x + dx, r.dst_y + dy);
            let inv = 255 - i;
            let base = dst.pixel(cx, cy);
            let mut out = [0u8; 3];
            for c in 0..3 {
                out[c] = mul_div255_u8(u16::from(base[c]), inv);
            }
            dst.set_pixel(cx, cy, out);
        }
    }
}

/// Blend a positioned [`Layer`] onto `dst` using the blend mode implied by
/// its content.
pub(crate) fn blend_layer(dst: &mut PixelBuffer, layer: &Layer) {
    match &layer.content {
        LayerContent::Rgb(pixels) => blend_over(dst, pixels, &layer.alpha, layer.origin),
        LayerContent::Shadow => blend_darken(dst, &layer.alpha, layer.origin),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blit.rs"]
mod tests;
