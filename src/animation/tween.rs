use crate::{
    animation::{ease::Ease, state::Lerp},
    foundation::core::Millis,
    foundation::math::progress,
};

/// Timing of a one-shot transition.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Wait between the trigger and the first animated frame.
    pub delay: Millis,
    /// Length of the animated part.
    pub duration: Millis,
    pub ease: Ease,
}

impl Timing {
    /// Default reveal transition: 400ms with the CSS `ease` curve.
    pub const REVEAL: Self = Self {
        delay: Millis::ZERO,
        duration: Millis(400),
        ease: Ease::Css,
    };

    pub fn with_delay(mut self, delay: Millis) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::REVEAL
    }
}

/// A transition from `from` to `to` that begins at `start + timing.delay`.
///
/// Sampling before the start yields `from`; sampling after the end holds `to`. A tween never
/// replays: every sample is a pure function of `now`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub start: Millis,
    pub timing: Timing,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    pub fn new(from: T, to: T, start: Millis, timing: Timing) -> Self {
        Self {
            from,
            to,
            start,
            timing,
        }
    }

    /// First instant at which the value moves away from `from`.
    pub fn begins_at(&self) -> Millis {
        self.start + self.timing.delay
    }

    /// Instant after which the value holds at `to`.
    pub fn ends_at(&self) -> Millis {
        self.begins_at() + self.timing.duration
    }

    /// Raw (un-eased) progress in `[0, 1]`.
    pub fn progress(&self, now: Millis) -> f64 {
        let begins = self.begins_at();
        if now < begins {
            return 0.0;
        }
        progress(now.since(begins).0, self.timing.duration.0)
    }

    pub fn is_finished(&self, now: Millis) -> bool {
        now >= self.ends_at()
    }

    pub fn sample(&self, now: Millis) -> T {
        let p = self.progress(now);
        if p <= 0.0 {
            return self.from.clone();
        }
        if p >= 1.0 {
            return self.to.clone();
        }
        T::lerp(&self.from, &self.to, self.timing.ease.apply(p))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
