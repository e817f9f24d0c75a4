use super::*;
use crate::foundation::core::Layer;

fn empty_shadows(w: u32, h: u32) -> ShadowSet {
    ShadowSet {
        contact: Layer::shadow(Mask::new(w, h).unwrap(), (0, 0)),
        ambient: Layer::shadow(Mask::new(w, h).unwrap(), (0, 0)),
        drop: Layer::shadow(Mask::new(w, h).unwrap(), (0, 0)),
    }
}

fn solid_subject(w: u32, h: u32, rgb: [u8; 3]) -> Subject {
    Subject::new(
        PixelBuffer::filled(w, h, rgb).unwrap(),
        Mask::filled(w, h, 255).unwrap(),
    )
    .unwrap()
}

#[test]
fn compose_is_deterministic_and_idempotent() {
    let background = PixelBuffer::filled(64, 48, [230, 230, 230]).unwrap();
    let subject = solid_subject(16, 8, [40, 40, 200]);
    let shadows = empty_shadows(64, 48);
    let reflection_img = PixelBuffer::filled(16, 8, [40, 40, 200]).unwrap();
    let reflection_alpha = Mask::filled(16, 8, 60).unwrap();

    let a = compose(
        &background,
        &subject,
        &shadows,
        Some((&reflection_img, &reflection_alpha)),
        (24, 20),
        0,
    )
    .unwrap();
    let b = compose(
        &background,
        &subject,
        &shadows,
        Some((&reflection_img, &reflection_alpha)),
        (24, 20),
        0,
    )
    .unwrap();
    assert_eq!(a.data(), b.data());
}

#[test]
fn opaque_subject_pixels_are_reproduced_exactly() {
    let background = PixelBuffer::filled(64, 48, [230, 230, 230]).unwrap();
    let subject = solid_subject(10, 10, [12, 34, 56]);
    let shadows = empty_shadows(64, 48);

    let out = compose(&background, &subject, &shadows, None, (5, 5), 0).unwrap();
    for y in 5..15 {
        for x in 5..15 {
            assert_eq!(out.pixel(x, y), [12, 34, 56]);
        }
    }
    assert_eq!(out.pixel(4, 4), [230, 230, 230]);
    assert_eq!(out.pixel(15, 15), [230, 230, 230]);
}

#[test]
fn zero_alpha_subject_leaves_background_untouched() {
    let background = PixelBuffer::filled(32, 32, [200, 200, 200]).unwrap();
    let subject = Subject::new(
        PixelBuffer::filled(8, 8, [1, 2, 3]).unwrap(),
        Mask::new(8, 8).unwrap(),
    )
    .unwrap();
    let shadows = empty_shadows(32, 32);

    let out = compose(&background, &subject, &shadows, None, (10, 10), 0).unwrap();
    assert_eq!(out.data(), background.data());
}

#[test]
fn shadow_layers_darken_in_place() {
    let background = PixelBuffer::filled(32, 32, [200, 200, 200]).unwrap();
    let subject = Subject::new(
        PixelBuffer::filled(8, 8, [1, 2, 3]).unwrap(),
        Mask::new(8, 8).unwrap(),
    )
    .unwrap();
    let mut shadows = empty_shadows(32, 32);
    shadows.contact = Layer::shadow(Mask::filled(4, 2, 128).unwrap(), (10, 20));

    let out = compose(&background, &subject, &shadows, None, (0, 0), 0).unwrap();
    assert!(out.pixel(11, 20)[0] < 200);
    assert_eq!(out.pixel(9, 20), [200, 200, 200]);
    assert_eq!(out.pixel(11, 23), [200, 200, 200]);
}

#[test]
fn offcanvas_layers_are_clipped_not_rejected() {
    let background = PixelBuffer::filled(20, 20, [100, 100, 100]).unwrap();
    let subject = solid_subject(10, 10, [250, 0, 0]);
    let shadows = empty_shadows(20, 20);

    // half the subject hangs off the left edge
    let out = compose(&background, &subject, &shadows, None, (-5, 5), 0).unwrap();
    assert_eq!(out.pixel(0, 5), [250, 0, 0]);
    assert_eq!(out.pixel(4, 14), [250, 0, 0]);
    assert_eq!(out.pixel(5, 5), [100, 100, 100]);

    // fully off-canvas is a no-op
    let out = compose(&background, &subject, &shadows, None, (40, 40), 0).unwrap();
    assert_eq!(out.data(), background.data());
}

#[test]
fn reflection_sits_below_subject_with_gap() {
    let background = PixelBuffer::filled(40, 40, [220, 220, 220]).unwrap();
    let subject = solid_subject(10, 10, [30, 30, 30]);
    let reflection_img = PixelBuffer::filled(10, 10, [30, 30, 30]).unwrap();
    let reflection_alpha = Mask::filled(10, 10, 255).unwrap();
    let shadows = empty_shadows(40, 40);

    let out = compose(
        &background,
        &subject,
        &shadows,
        Some((&reflection_img, &reflection_alpha)),
        (10, 5),
        2,
    )
    .unwrap();
    // subject rows 5..15, gap rows 15..17, reflection rows 17..27
    assert_eq!(out.pixel(12, 14), [30, 30, 30]);
    assert_eq!(out.pixel(12, 16), [220, 220, 220]);
    assert_eq!(out.pixel(12, 17), [30, 30, 30]);
}

#[test]
fn reflection_dimension_mismatch_is_rejected() {
    let background = PixelBuffer::filled(40, 40, [220, 220, 220]).unwrap();
    let subject = solid_subject(10, 10, [30, 30, 30]);
    let reflection_img = PixelBuffer::filled(10, 10, [30, 30, 30]).unwrap();
    let reflection_alpha = Mask::filled(10, 6, 255).unwrap();
    let shadows = empty_shadows(40, 40);

    assert!(matches!(
        compose(
            &background,
            &subject,
            &shadows,
            Some((&reflection_img, &reflection_alpha)),
            (10, 5),
            0,
        ),
        Err(StageError::DimensionMismatch(_))
    ));
}
