//! Separable Gaussian blur over interleaved u8 buffers.
//!
//! The kernel is quantized to Q16 fixed point and renormalized at the center
//! tap so weights always sum to exactly 1.0, keeping constant regions
//! bit-stable under blur. Rows are processed in parallel; each output row
//! depends only on the immutable source, so results are identical to the
//! serial order.

use rayon::prelude::*;

use crate::foundation::core::{Mask, PixelBuffer};
use crate::foundation::error::{StageError, StageResult};

/// Blur an RGB buffer with a `2 * radius + 1` Gaussian kernel.
pub(crate) fn blur_rgb(src: &PixelBuffer, radius: u32, sigma: f32) -> StageResult<PixelBuffer> {
    let out = blur_channels::<3>(src.data(), src.width(), src.height(), radius, sigma)?;
    PixelBuffer::from_raw(src.width(), src.height(), out)
}

/// Blur a single-channel mask with a `2 * radius + 1` Gaussian kernel.
pub(crate) fn blur_mask(src: &Mask, radius: u32, sigma: f32) -> StageResult<Mask> {
    let out = blur_channels::<1>(src.data(), src.width(), src.height(), radius, sigma)?;
    Mask::from_raw(src.width(), src.height(), out)
}

/// Default sigma for a given kernel radius.
pub(crate) fn default_sigma(radius: u32) -> f32 {
    (radius as f32) / 2.0
}

fn blur_channels<const C: usize>(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> StageResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(C))
        .ok_or_else(|| StageError::validation("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(StageError::validation(
            "blur expects src matching width*height*channels",
        ));
    }
    if radius == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass::<C>(src, &mut tmp, width, height, &kernel);
    vertical_pass::<C>(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> StageResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(StageError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(StageError::validation("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let target: i64 = 65536;
    let delta = target - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let mid_val = i64::from(weights[mid]);
        let new_mid = (mid_val + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass<const C: usize>(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let row_len = width as usize * C;
    debug_assert_eq!(src.len(), height as usize * row_len);
    dst.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let src_row = &src[y * row_len..(y + 1) * row_len];
            for x in 0..w {
                let mut acc = [0u64; C];
                for (ki, &kw) in k.iter().enumerate() {
                    let dx = ki as i32 - radius;
                    let sx = ((x + dx).clamp(0, w - 1) as usize) * C;
                    for c in 0..C {
                        acc[c] += u64::from(kw) * u64::from(src_row[sx + c]);
                    }
                }
                let out_idx = (x as usize) * C;
                for c in 0..C {
                    dst_row[out_idx + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_pass<const C: usize>(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let h = height as i32;
    let row_len = width as usize * C;
    dst.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for x in 0..width as usize {
                let mut acc = [0u64; C];
                for (ki, &kw) in k.iter().enumerate() {
                    let dy = ki as i32 - radius;
                    let sy = (y as i32 + dy).clamp(0, h - 1) as usize;
                    let idx = sy * row_len + x * C;
                    for c in 0..C {
                        acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                    }
                }
                let out_idx = x * C;
                for c in 0..C {
                    dst_row[out_idx + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blur.rs"]
mod tests;
