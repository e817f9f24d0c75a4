use super::*;

#[test]
fn helper_constructors_build_expected_variants() {
    assert!(matches!(
        StageError::invalid_dimensions("w=0"),
        StageError::InvalidDimensions(_)
    ));
    assert!(matches!(
        StageError::dimension_mismatch("4x4 vs 4x5"),
        StageError::DimensionMismatch(_)
    ));
    assert!(matches!(
        StageError::validation("bad preset"),
        StageError::Validation(_)
    ));
}

#[test]
fn display_includes_message() {
    let err = StageError::invalid_dimensions("canvas must be non-empty");
    assert_eq!(
        err.to_string(),
        "invalid dimensions: canvas must be non-empty"
    );

    let err = StageError::validation("unknown preset 'x'");
    assert_eq!(err.to_string(), "validation error: unknown preset 'x'");
}

#[test]
fn anyhow_errors_pass_through() {
    let err: StageError = anyhow::anyhow!("decode failed").into();
    assert!(matches!(err, StageError::Other(_)));
    assert_eq!(err.to_string(), "decode failed");
}

#[test]
fn result_alias_is_usable() {
    fn f(ok: bool) -> StageResult<u32> {
        if ok {
            Ok(1)
        } else {
            Err(StageError::validation("no"))
        }
    }
    assert_eq!(f(true).unwrap(), 1);
    assert!(f(false).is_err());
}
