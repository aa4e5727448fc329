/// Clamp to `[0, 1]`, mapping NaN to 0.
pub(crate) fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Normalised progress of `elapsed` through `duration`; a zero duration is already complete.
pub(crate) fn progress(elapsed: u64, duration: u64) -> f64 {
    if duration == 0 {
        return 1.0;
    }
    clamp_unit((elapsed as f64) / (duration as f64))
}

/// Length of the overlap between `[a0, a1)` and `[b0, b1)`.
pub(crate) fn overlap_1d(a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    (a1.min(b1) - a0.max(b0)).max(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
