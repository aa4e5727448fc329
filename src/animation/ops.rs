use crate::{animation::tween::Timing, foundation::core::Millis};

/// Delays for `count` siblings in document order: `base`, `base + step`, `base + 2*step`, ...
pub fn stagger(base: Millis, step: Millis, count: usize) -> Vec<Millis> {
    (0..count as u64)
        .map(|i| base + Millis(step.0.saturating_mul(i)))
        .collect()
}

/// Apply [`stagger`] delays on top of a shared timing.
pub fn stagger_timings(timing: Timing, step: Millis, count: usize) -> Vec<Timing> {
    stagger(timing.delay, step, count)
        .into_iter()
        .map(|delay| timing.with_delay(delay))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
