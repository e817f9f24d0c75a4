use super::*;
use crate::foundation::core::{Mask, PixelBuffer};

#[test]
fn blur_radius_0_is_identity() {
    let mut mask = Mask::new(3, 2).unwrap();
    mask.set_value(1, 0, 77);
    let out = blur_mask(&mask, 0, 1.0).unwrap();
    assert_eq!(out, mask);
}

#[test]
fn blur_constant_image_is_identity() {
    let buf = PixelBuffer::filled(4, 3, [10, 20, 30]).unwrap();
    let out = blur_rgb(&buf, 3, 2.0).unwrap();
    assert_eq!(out, buf);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let mut mask = Mask::new(5, 5).unwrap();
    mask.set_value(2, 2, 255);

    let out = blur_mask(&mask, 2, 1.2).unwrap();

    let nonzero = out.data().iter().filter(|&&v| v != 0).count();
    assert!(nonzero > 1);

    let sum: u32 = out.data().iter().map(|&v| u32::from(v)).sum();
    assert!((sum as i32 - 255).abs() <= 4, "sum {sum}");
}

#[test]
fn blur_rejects_nonpositive_sigma() {
    let mask = Mask::new(4, 4).unwrap();
    assert!(blur_mask(&mask, 2, 0.0).is_err());
    assert!(blur_mask(&mask, 2, f32::NAN).is_err());
}

#[test]
fn blur_kernel_is_normalized() {
    for radius in [1u32, 3, 8, 40] {
        let k = gaussian_kernel_q16(radius, default_sigma(radius)).unwrap();
        assert_eq!(k.len(), (2 * radius + 1) as usize);
        let sum: u64 = k.iter().map(|&w| u64::from(w)).sum();
        assert_eq!(sum, 65536);
    }
}

#[test]
fn blur_is_symmetric_for_symmetric_input() {
    let mut mask = Mask::new(7, 1).unwrap();
    mask.set_value(3, 0, 255);
    let out = blur_mask(&mask, 2, 1.0).unwrap();
    for d in 0..=3u32 {
        assert_eq!(out.value(3 - d, 0), out.value(3 + d, 0));
    }
}
