//! Resampling built on the `image` crate.

use anyhow::Context;
use image::imageops::{self, FilterType};

use crate::foundation::core::{Mask, PixelBuffer};
use crate::foundation::error::{StageError, StageResult};

/// Resample an RGB buffer to `new_width x new_height`.
pub(crate) fn resize_rgb(
    src: &PixelBuffer,
    new_width: u32,
    new_height: u32,
    filter: FilterType,
) -> StageResult<PixelBuffer> {
    if new_width == 0 || new_height == 0 {
        return Err(StageError::invalid_dimensions(
            "resize target must be non-empty",
        ));
    }
    let img = image::RgbImage::from_raw(src.width(), src.height(), src.data().to_vec())
        .context("pixel buffer to RgbImage conversion")?;
    let resized = imageops::resize(&img, new_width, new_height, filter);
    PixelBuffer::from_raw(new_width, new_height, resized.into_raw())
}

/// Resample a single-channel mask to `new_width x new_height`.
pub(crate) fn resize_mask(
    src: &Mask,
    new_width: u32,
    new_height: u32,
    filter: FilterType,
) -> StageResult<Mask> {
    if new_width == 0 || new_height == 0 {
        return Err(StageError::invalid_dimensions(
            "resize target must be non-empty",
        ));
    }
    let img = image::GrayImage::from_raw(src.width(), src.height(), src.data().to_vec())
        .context("mask buffer to GrayImage conversion")?;
    let resized = imageops::resize(&img, new_width, new_height, filter);
    Mask::from_raw(new_width, new_height, resized.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/resize.rs"]
mod tests;
