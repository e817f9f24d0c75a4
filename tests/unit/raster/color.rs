use super::*;
use crate::foundation::core::PixelBuffer;

fn assert_close(a: [f32; 3], b: [f32; 3]) {
    for c in 0..3 {
        assert!((a[c] - b[c]).abs() < 1e-4, "{a:?} vs {b:?}");
    }
}

#[test]
fn hsv_roundtrip_primaries_and_gray() {
    for rgb in [
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.5, 0.5, 0.5],
        [0.8, 0.4, 0.1],
    ] {
        assert_close(hsv_to_rgb(rgb_to_hsv(rgb)), rgb);
    }
}

#[test]
fn gray_has_zero_saturation() {
    let hsv = rgb_to_hsv([0.3, 0.3, 0.3]);
    assert_eq!(hsv[1], 0.0);
}

#[test]
fn full_desaturation_yields_gray_pixels() {
    let mut buf = PixelBuffer::filled(2, 2, [200, 40, 90]).unwrap();
    desaturate_in_place(&mut buf, 1.0);
    for px in buf.data().chunks_exact(3) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }
}

#[test]
fn zero_desaturation_is_noop() {
    let mut buf = PixelBuffer::filled(2, 2, [200, 40, 90]).unwrap();
    let before = buf.clone();
    desaturate_in_place(&mut buf, 0.0);
    assert_eq!(buf, before);
}

#[test]
fn partial_desaturation_moves_toward_gray() {
    let mut buf = PixelBuffer::filled(1, 1, [255, 0, 0]).unwrap();
    desaturate_in_place(&mut buf, 0.5);
    let px = buf.pixel(0, 0);
    assert_eq!(px[0], 255);
    assert!(px[1] > 100 && px[1] < 150, "got {}", px[1]);
    assert_eq!(px[1], px[2]);
}
