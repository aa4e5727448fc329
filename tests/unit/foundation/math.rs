use super::*;

#[test]
fn clamp_unit_handles_nan_and_bounds() {
    assert_eq!(clamp_unit(f64::NAN), 0.0);
    assert_eq!(clamp_unit(-3.0), 0.0);
    assert_eq!(clamp_unit(3.0), 1.0);
    assert_eq!(clamp_unit(0.4), 0.4);
}

#[test]
fn progress_with_zero_duration_is_complete() {
    assert_eq!(progress(0, 0), 1.0);
    assert_eq!(progress(50, 100), 0.5);
    assert_eq!(progress(500, 100), 1.0);
}

#[test]
fn overlap_is_never_negative() {
    assert_eq!(overlap_1d(0.0, 10.0, 20.0, 30.0), 0.0);
    assert_eq!(overlap_1d(0.0, 10.0, 5.0, 30.0), 5.0);
    assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
}
