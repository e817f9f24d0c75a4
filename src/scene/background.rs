//! Procedural studio backdrop synthesis.
//!
//! One entry point, [`synthesize_background`], dispatches over
//! [`BackgroundVariant`] and shares the gradient/vignette/ambient
//! primitives across all three variants. Post passes run in a fixed order:
//! reflection zone, ambient light, spotlight, vignette, dither.

use crate::foundation::core::{Canvas, PixelBuffer};
use crate::foundation::error::StageResult;
use crate::foundation::math::{clamp_u8, lerp, lerp_rgb, noise_gaussian, smoothstep};
use crate::scene::config::{BackgroundVariant, Rgb, SceneConfig};

/// Synthesize a studio backdrop of exactly `width x height` pixels.
///
/// Zero dimensions fail with
/// [`StageError::InvalidDimensions`](crate::StageError::InvalidDimensions);
/// a horizon position outside `(0, 1)` is clamped, never rejected. `seed`
/// drives the noise dither only; for a fixed seed the output is
/// byte-identical across calls.
#[tracing::instrument(skip(config))]
pub fn synthesize_background(
    width: u32,
    height: u32,
    config: &SceneConfig,
    seed: u64,
) -> StageResult<PixelBuffer> {
    let canvas = Canvas::new(width, height)?;
    let mut bg = match config.variant {
        BackgroundVariant::Flat => fill_flat(canvas, config),
        BackgroundVariant::Cyclorama => fill_cyclorama(canvas, config),
        BackgroundVariant::Room3d => fill_room(canvas, config),
    };

    if config.reflection_zone_enabled {
        apply_reflection_zone(&mut bg, config);
    }
    if config.ambient_enabled {
        apply_ambient_light(&mut bg, config);
    }
    if config.spotlight_enabled {
        apply_spotlight(&mut bg, config);
    }
    if config.vignette_enabled {
        apply_vignette(&mut bg, config.vignette_strength);
    }
    if config.dither_amplitude > 0.0 {
        apply_dither(&mut bg, config.dither_amplitude, seed);
    }
    Ok(bg)
}

/// Horizon row for a canvas height, with the position clamped into `[0, 1]`.
pub(crate) fn horizon_row(height: u32, position: f32) -> u32 {
    ((height as f32) * position.clamp(0.0, 1.0)).round() as u32
}

fn fill_flat(canvas: Canvas, config: &SceneConfig) -> PixelBuffer {
    let mut bg = PixelBuffer::for_canvas(canvas);
    let horizon_y = horizon_row(canvas.height, config.horizon_position).min(canvas.height);

    fill_wall_gradient(&mut bg, horizon_y, config.top_color, config.horizon_color);

    let k = config.floor_gradient_intensity.clamp(0.0, 1.0);
    let span = canvas.height - horizon_y;
    for y in horizon_y..canvas.height {
        let t = (y - horizon_y) as f32 / span as f32;
        let eased = smoothstep(t * k + (1.0 - k));
        bg.fill_row(y, lerp_rgb(config.horizon_color, config.floor_color, eased));
    }
    bg
}

fn fill_cyclorama(canvas: Canvas, config: &SceneConfig) -> PixelBuffer {
    let mut bg = PixelBuffer::for_canvas(canvas);
    let (w, h) = (canvas.width, canvas.height);
    let horizon_y = horizon_row(h, config.horizon_position).min(h);

    fill_wall_gradient(&mut bg, horizon_y, config.top_color, config.horizon_color);

    // Curved transition band below the seam, as in a real cyclorama wall.
    let band = ((h as f32) * config.curve_intensity.clamp(0.0, 1.0)).round() as u32;
    let band_end = (horizon_y + band).min(h);
    let mid = mid_color(config.horizon_color, config.floor_color);
    let cx = (w as f32) / 2.0;
    for y in horizon_y..band_end {
        let t = (y - horizon_y) as f32 / band as f32;
        let curved = (t * std::f32::consts::FRAC_PI_2).sin();
        let color = lerp_rgb(config.horizon_color, mid, curved);
        let row = bg.row_mut(y);
        for (x, px) in row.chunks_exact_mut(3).enumerate() {
            // 2% horizontal bow toward the edges
            let bow = 1.0 - ((x as f32 - cx).abs() / cx) * 0.02;
            for c in 0..3 {
                px[c] = clamp_u8(f32::from(color[c]) * bow);
            }
        }
    }

    // Perspective-accelerated falloff toward the viewer.
    let floor_start = if band > 0 { mid } else { config.horizon_color };
    let span = h - band_end;
    for y in band_end..h {
        let t = (y - band_end) as f32 / span as f32;
        bg.fill_row(y, lerp_rgb(floor_start, config.floor_color, t.powf(0.8)));
    }
    bg
}

fn fill_room(canvas: Canvas, config: &SceneConfig) -> PixelBuffer {
    let mut bg = PixelBuffer::for_canvas(canvas);
    let (w, h) = (canvas.width, canvas.height);
    let room = &config.room;
    let horizon_y = horizon_row(h, config.horizon_position).min(h);
    let vp_x = ((w as f32) * room.vanishing_point.clamp(0.0, 1.0)).round() as u32;
    let ceiling_bottom = ((horizon_y as f32) * 0.6) as u32;

    draw_ceiling(&mut bg, config, horizon_y, ceiling_bottom, vp_x);
    draw_walls(&mut bg, config, ceiling_bottom, horizon_y, vp_x);
    draw_floor(&mut bg, config, horizon_y);

    if horizon_y < h {
        bg.fill_row(horizon_y, scale_rgb(room.wall_groove, 0.95));
    }

    apply_room_lighting(&mut bg, room.ambient_intensity);
    bg
}

fn draw_ceiling(
    bg: &mut PixelBuffer,
    config: &SceneConfig,
    horizon_y: u32,
    ceiling_bottom: u32,
    vp_x: u32,
) {
    let w = bg.width();
    let room = &config.room;

    for y in 0..ceiling_bottom {
        let t = y as f32 / ceiling_bottom as f32;
        bg.fill_row(y, scale_rgb(room.ceiling, 0.95 + t * 0.05));
    }
    if ceiling_bottom == 0 {
        return;
    }

    // Softbox fixture with feathered edges.
    let sb_w = ((w as f32) * room.softbox_width.clamp(0.0, 1.0)).round() as u32;
    let sb_h = ((ceiling_bottom as f32) * room.softbox_height.clamp(0.0, 1.0)).round() as u32;
    if sb_w > 0 && sb_h > 0 {
        let sb_x = (w - sb_w.min(w)) / 2;
        let sb_y = ((ceiling_bottom as f32) * 0.3) as u32;
        for y in sb_y..(sb_y + sb_h).min(ceiling_bottom) {
            for x in sb_x..(sb_x + sb_w).min(w) {
                let dx = ((x - sb_x).min(sb_x + sb_w - 1 - x)) as f32 / (sb_w as f32 / 2.0);
                let dy = ((y - sb_y).min(sb_y + sb_h - 1 - y)) as f32 / (sb_h as f32 / 2.0);
                let edge = dx.min(dy).clamp(0.0, 1.0).powf(0.3);
                bg.set_pixel(x, y, lerp_rgb(room.ceiling, room.softbox, edge));
            }
        }
    }

    // Perspective guide lines converging on the vanishing point.
    let line_color = scale_rgb(room.wall_groove, 0.9);
    for offset in [-0.3f32, 0.3f32] {
        let x_start = (w as f32) * (0.5 + offset);
        for y in 0..ceiling_bottom {
            let t = y as f32 / horizon_y.max(1) as f32;
            let x = lerp(x_start, vp_x as f32, t).round();
            if x >= 0.0 && (x as u32) < w {
                bg.set_pixel(x as u32, y, line_color);
            }
        }
    }
}

fn draw_walls(
    bg: &mut PixelBuffer,
    config: &SceneConfig,
    wall_top: u32,
    wall_bottom: u32,
    vp_x: u32,
) {
    let w = bg.width();
    let room = &config.room;
    if wall_bottom <= wall_top {
        return;
    }
    let span = (wall_bottom - wall_top) as f32;

    for y in wall_top..wall_bottom {
        let t = (y - wall_top) as f32 / span;
        bg.fill_row(y, scale_rgb(config.top_color, 1.0 - t * 0.08));
    }

    // Vertical panel grooves, converging toward the vanishing point.
    let panel_count = room.panel_count.max(1);
    let panel_width = (w / panel_count).max(1);
    let half_groove = (room.groove_width / 2) as i64;
    for i in 0..=panel_count {
        let x_top = (i * panel_width) as f32;
        let x_at_horizon = x_top + (vp_x as f32 - x_top) * 0.15;
        for y in wall_top..wall_bottom {
            let t = (y - wall_top) as f32 / span;
            let x = lerp(x_top, x_at_horizon, t).round() as i64;
            for dx in -half_groove..=half_groove {
                let gx = x + dx;
                if gx < 0 || gx >= i64::from(w) {
                    continue;
                }
                let shade = match dx {
                    d if d < 0 => 0.85,
                    0 => 1.0,
                    _ => 1.1,
                };
                bg.set_pixel(gx as u32, y, scale_rgb(room.wall_groove, shade));
            }
        }
    }
}

fn draw_floor(bg: &mut PixelBuffer, config: &SceneConfig, horizon_y: u32) {
    let (w, h) = bg.dimensions();
    if horizon_y >= h {
        return;
    }
    let span = (h - horizon_y) as f32;
    let cx = (w as f32) / 2.0;
    for y in horizon_y..h {
        let t = (y - horizon_y) as f32 / span;
        let base = 1.0 - t * 0.15;
        let refl_strength = (1.0 - t) * (1.0 - t) * 0.3;
        let row = bg.row_mut(y);
        for (x, px) in row.chunks_exact_mut(3).enumerate() {
            let xc = (x as f32 - cx).abs() / cx;
            let boost = (1.0 - xc * xc) * refl_strength;
            for c in 0..3 {
                let floor = f32::from(config.floor_color[c]) * base;
                let refl = f32::from(config.horizon_color[c]) - f32::from(config.floor_color[c]);
                px[c] = clamp_u8(floor + refl * boost);
            }
        }
    }
}

fn apply_room_lighting(bg: &mut PixelBuffer, intensity: f32) {
    let (w, h) = bg.dimensions();
    let cx = (w as f32) / 2.0;
    let cy = (h as f32) * 0.2;
    for y in 0..h {
        let row = bg.row_mut(y);
        for (x, px) in row.chunks_exact_mut(3).enumerate() {
            let dx = (x as f32 - cx) / ((w as f32) * 0.5);
            let dy = (y as f32 - cy) / ((h as f32) * 0.8);
            let dist = (dx * dx + dy * dy).sqrt().clamp(0.0, 1.0);
            let light = 1.0 + (1.0 - dist) * 0.08 * intensity;
            for c in 0..3 {
                px[c] = clamp_u8(f32::from(px[c]) * light);
            }
        }
    }
}

/// Vertical smoothstep gradient over rows `0..horizon_y`.
fn fill_wall_gradient(bg: &mut PixelBuffer, horizon_y: u32, top: Rgb, horizon: Rgb) {
    for y in 0..horizon_y.min(bg.height()) {
        let t = y as f32 / horizon_y as f32;
        bg.fill_row(y, lerp_rgb(top, horizon, smoothstep(t)));
    }
}

fn apply_reflection_zone(bg: &mut PixelBuffer, config: &SceneConfig) {
    let (w, h) = bg.dimensions();
    let horizon_y = horizon_row(h, config.horizon_position).min(h);
    if horizon_y >= h {
        return;
    }
    let strength = config.reflection_zone_strength.max(0.0);
    let span = (h - horizon_y) as f32;
    let cx = (w as f32) / 2.0;
    for y in horizon_y..h {
        let t = (y - horizon_y) as f32 / span;
        let zone = (1.0 - t) * strength;
        let row = bg.row_mut(y);
        for (x, px) in row.chunks_exact_mut(3).enumerate() {
            let x_factor = (1.0 - (x as f32 - cx).abs() / cx).max(0.0).sqrt();
            let factor = 1.0 + zone * x_factor;
            for c in 0..3 {
                px[c] = clamp_u8(f32::from(px[c]) * factor);
            }
        }
    }
}

fn apply_ambient_light(bg: &mut PixelBuffer, config: &SceneConfig) {
    let h = bg.height();
    let intensity = config.ambient_intensity.max(0.0);
    let tint = [
        f32::from(config.ambient_color[0]) / 255.0,
        f32::from(config.ambient_color[1]) / 255.0,
        f32::from(config.ambient_color[2]) / 255.0,
    ];
    for y in 0..h {
        let light = (1.0 - y as f32 / h as f32).sqrt() * intensity;
        let row = bg.row_mut(y);
        for px in row.chunks_exact_mut(3) {
            for c in 0..3 {
                let v = f32::from(px[c]);
                px[c] = clamp_u8(v + v * light * tint[c]);
            }
        }
    }
}

fn apply_spotlight(bg: &mut PixelBuffer, config: &SceneConfig) {
    let (w, h) = bg.dimensions();
    let strength = config.spotlight_strength.max(0.0);
    let cx = (w as f32) * config.spotlight_center[0];
    let cy = (h as f32) * config.spotlight_center[1];
    let rx = (w as f32) * 0.4;
    let ry = (h as f32) * 0.35;
    for y in 0..h {
        let row = bg.row_mut(y);
        for (x, px) in row.chunks_exact_mut(3).enumerate() {
            let dx = (x as f32 - cx) / rx;
            let dy = (y as f32 - cy) / ry;
            let d2 = dx * dx + dy * dy;
            let spot = (-d2 * 2.0).exp() * strength;
            for c in 0..3 {
                let v = f32::from(px[c]);
                px[c] = clamp_u8(v + v * spot);
            }
        }
    }
}

fn apply_vignette(bg: &mut PixelBuffer, strength: f32) {
    let (w, h) = bg.dimensions();
    let strength = strength.clamp(0.0, 1.0);
    let cx = (w as f32) / 2.0;
    let cy = (h as f32) / 2.0;
    const RADIUS: f32 = 1.2;
    for y in 0..h {
        let row = bg.row_mut(y);
        for (x, px) in row.chunks_exact_mut(3).enumerate() {
            let dx = (x as f32 - cx) / cx;
            let dy = (y as f32 - cy) / cy;
            let dist = (dx * dx + dy * dy).sqrt();
            let d = (dist / RADIUS).clamp(0.0, 1.0);
            let v = 1.0 - d * d * strength;
            for c in 0..3 {
                px[c] = clamp_u8(f32::from(px[c]) * v);
            }
        }
    }
}

/// Low-amplitude zero-mean Gaussian dither against banding.
///
/// Noise is derived per channel from `(seed, byte index)`, so the pass is
/// order-independent and reproducible for a fixed seed.
fn apply_dither(bg: &mut PixelBuffer, amplitude: f32, seed: u64) {
    let amp = amplitude * 255.0;
    for (i, b) in bg.data_mut().iter_mut().enumerate() {
        let n = noise_gaussian(seed, i as u64) * amp;
        *b = clamp_u8(f32::from(*b) + n);
    }
}

fn mid_color(a: Rgb, b: Rgb) -> Rgb {
    [
        ((u16::from(a[0]) + u16::from(b[0])) / 2) as u8,
        ((u16::from(a[1]) + u16::from(b[1])) / 2) as u8,
        ((u16::from(a[2]) + u16::from(b[2])) / 2) as u8,
    ]
}

fn scale_rgb(rgb: Rgb, factor: f32) -> Rgb {
    [
        clamp_u8(f32::from(rgb[0]) * factor),
        clamp_u8(f32::from(rgb[1]) * factor),
        clamp_u8(f32::from(rgb[2]) * factor),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/scene/background.rs"]
mod tests;
