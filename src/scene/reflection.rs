//! Floor-mirror reflection synthesis.

use image::imageops::FilterType;

use crate::foundation::core::{Mask, PixelBuffer};
use crate::foundation::error::{StageError, StageResult};
use crate::foundation::math::clamp_u8;
use crate::raster::blur::{blur_mask, blur_rgb, default_sigma};
use crate::raster::color::desaturate_in_place;
use crate::raster::resize::{resize_mask, resize_rgb};

/// Tunable parameters for the floor reflection.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReflectionSpec {
    /// Peak reflection opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Fraction of the reflection height visible before the fade reaches
    /// zero.
    #[serde(default = "default_fade_height_fraction")]
    pub fade_height_fraction: f32,
    /// Exponent of the `1 - t^e` fade curve.
    #[serde(default = "default_fade_exponent")]
    pub fade_exponent: f32,
    /// Small Gaussian blur radius applied to image and alpha.
    #[serde(default = "default_blur_radius")]
    pub blur_radius: u32,
    /// Saturation reduction in `[0, 1]`.
    #[serde(default = "default_desaturation_fraction")]
    pub desaturation_fraction: f32,
    /// Vertical resize factor approximating perspective foreshortening;
    /// 1.0 keeps the mirrored height.
    #[serde(default = "default_vertical_compression")]
    pub vertical_compression_fraction: f32,
}

fn default_opacity() -> f32 {
    0.20
}

fn default_fade_height_fraction() -> f32 {
    0.5
}

fn default_fade_exponent() -> f32 {
    2.0
}

fn default_blur_radius() -> u32 {
    2
}

fn default_desaturation_fraction() -> f32 {
    0.2
}

fn default_vertical_compression() -> f32 {
    1.0
}

impl Default for ReflectionSpec {
    fn default() -> Self {
        Self {
            opacity: default_opacity(),
            fade_height_fraction: default_fade_height_fraction(),
            fade_exponent: default_fade_exponent(),
            blur_radius: default_blur_radius(),
            desaturation_fraction: default_desaturation_fraction(),
            vertical_compression_fraction: default_vertical_compression(),
        }
    }
}

/// Synthesize the floor reflection of a subject.
///
/// Returns a vertically mirrored, faded, softened, desaturated copy of the
/// subject plus its alpha; both share the subject's width. Positioning the
/// pair below the subject is the compositor's job. An empty mask degrades
/// to an all-zero pair; mismatched image/mask sizes fail with
/// [`StageError::DimensionMismatch`](crate::StageError::DimensionMismatch).
pub fn synthesize_reflection(
    image: &PixelBuffer,
    mask: &Mask,
    spec: &ReflectionSpec,
) -> StageResult<(PixelBuffer, Mask)> {
    if image.dimensions() != mask.dimensions() {
        return Err(StageError::dimension_mismatch(format!(
            "reflection image is {}x{} but mask is {}x{}",
            image.width(),
            image.height(),
            mask.width(),
            mask.height()
        )));
    }

    let mut img = image.flipped_vertical();
    let mut alpha = mask.flipped_vertical();
    let h = img.height();

    // Fade: 1 at the seam with the subject, 0 at fade_height_fraction * h.
    let fade_end = ((h as f32) * spec.fade_height_fraction.clamp(0.0, 1.0)).round() as u32;
    let exponent = spec.fade_exponent.max(0.0);
    let opacity = spec.opacity.clamp(0.0, 1.0);
    for y in 0..h {
        let g = if y < fade_end {
            let t = y as f32 / fade_end as f32;
            (1.0 - t.powf(exponent)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let scale = g * opacity;
        for v in alpha.row_mut(y) {
            *v = clamp_u8(f32::from(*v) * scale);
        }
    }

    if spec.blur_radius > 0 {
        let sigma = default_sigma(spec.blur_radius);
        img = blur_rgb(&img, spec.blur_radius, sigma)?;
        alpha = blur_mask(&alpha, spec.blur_radius, sigma)?;
    }

    desaturate_in_place(&mut img, spec.desaturation_fraction);

    let compression = spec.vertical_compression_fraction.clamp(0.0, 1.0);
    if compression < 1.0 {
        let new_h = (((h as f32) * compression).round() as u32).max(1);
        img = resize_rgb(&img, img.width(), new_h, FilterType::Triangle)?;
        alpha = resize_mask(&alpha, alpha.width(), new_h, FilterType::Triangle)?;
    }

    Ok((img, alpha))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/reflection.rs"]
mod tests;
