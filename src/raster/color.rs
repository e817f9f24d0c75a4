//! RGB/HSV conversion used by the reflection desaturation step.

use crate::foundation::core::PixelBuffer;
use crate::foundation::math::clamp_u8;

/// RGB in `[0, 1]` to HSV with hue in `[0, 360)` and s, v in `[0, 1]`.
pub(crate) fn rgb_to_hsv(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta <= f32::EPSILON {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let s = if max <= f32::EPSILON { 0.0 } else { delta / max };
    [h, s, max]
}

/// HSV back to RGB in `[0, 1]`.
pub(crate) fn hsv_to_rgb(hsv: [f32; 3]) -> [f32; 3] {
    let [h, s, v] = hsv;
    let c = v * s;
    let hp = (h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    [r1 + m, g1 + m, b1 + m]
}

/// Scale down every pixel's saturation by `fraction` (0 = untouched,
/// 1 = fully gray), in place.
pub(crate) fn desaturate_in_place(buf: &mut PixelBuffer, fraction: f32) {
    let keep = 1.0 - fraction.clamp(0.0, 1.0);
    if keep >= 1.0 {
        return;
    }
    for px in buf.data_mut().chunks_exact_mut(3) {
        let rgb = [
            f32::from(px[0]) / 255.0,
            f32::from(px[1]) / 255.0,
            f32::from(px[2]) / 255.0,
        ];
        let mut hsv = rgb_to_hsv(rgb);
        hsv[1] *= keep;
        let out = hsv_to_rgb(hsv);
        px[0] = clamp_u8(out[0] * 255.0);
        px[1] = clamp_u8(out[1] * 255.0);
        px[2] = clamp_u8(out[2] * 255.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/color.rs"]
mod tests;
