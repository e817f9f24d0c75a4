use super::*;
use crate::foundation::core::{Mask, PixelBuffer};
use image::imageops::FilterType;

#[test]
fn resize_rgb_changes_dimensions() {
    let buf = PixelBuffer::filled(8, 4, [120, 60, 30]).unwrap();
    let out = resize_rgb(&buf, 4, 2, FilterType::Triangle).unwrap();
    assert_eq!(out.dimensions(), (4, 2));
}

#[test]
fn resize_solid_color_stays_solid() {
    let buf = PixelBuffer::filled(10, 10, [200, 100, 50]).unwrap();
    let out = resize_rgb(&buf, 5, 3, FilterType::Triangle).unwrap();
    for px in out.data().chunks_exact(3) {
        assert_eq!(px, [200, 100, 50]);
    }
}

#[test]
fn resize_mask_preserves_solid_opacity() {
    let mask = Mask::filled(6, 6, 255).unwrap();
    let out = resize_mask(&mask, 3, 3, FilterType::Triangle).unwrap();
    assert!(out.data().iter().all(|&v| v == 255));
}

#[test]
fn resize_rejects_zero_target() {
    let buf = PixelBuffer::filled(4, 4, [1, 2, 3]).unwrap();
    assert!(resize_rgb(&buf, 0, 4, FilterType::Triangle).is_err());
    let mask = Mask::new(4, 4).unwrap();
    assert!(resize_mask(&mask, 4, 0, FilterType::Triangle).is_err());
}

#[test]
fn upscale_then_check_dims() {
    let mask = Mask::filled(2, 2, 128).unwrap();
    let out = resize_mask(&mask, 8, 8, FilterType::Lanczos3).unwrap();
    assert_eq!(out.dimensions(), (8, 8));
}
