use crate::{
    animation::{
        ease::Ease,
        state::{Lerp, VisualState},
    },
    foundation::core::{Millis, Vec2},
};

/// One stop of a looping animation, positioned as a fraction of the period.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CycleKey {
    /// Position inside the period in `[0, 1]`.
    pub at: f64,
    pub value: VisualState,
}

/// Looping strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Wrap at the period boundary.
    #[default]
    Repeat,
    /// Bounce forward/backward across the period.
    PingPong,
}

/// An infinite, self-contained animation loop (pulse, glow, float).
///
/// A cycle has no terminal state. It is sampled from the elapsed time since it was started,
/// so two cycles never share a phase unless they were started at the same instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cycle {
    /// Stops sorted by `at`.
    pub keys: Vec<CycleKey>,
    pub period: Millis,
    /// Easing applied between adjacent stops.
    #[serde(default)]
    pub ease: Ease,
    #[serde(default)]
    pub mode: LoopMode,
}

impl Cycle {
    /// Tailwind-style `animate-pulse`: opacity `1 → 0.5 → 1` over 2s.
    pub fn pulse() -> Self {
        Self::opacity_wave(1.0, 0.5, Millis(2000), Ease::Pulse)
    }

    /// Glow: opacity `0.5 → 1 → 0.5` over 2s.
    pub fn glow() -> Self {
        Self::opacity_wave(0.5, 1.0, Millis(2000), Ease::CssInOut)
    }

    /// Float/bob: `y: 0 → -10 → 0` over 4s.
    pub fn float() -> Self {
        let rest = VisualState::VISIBLE;
        let lifted = VisualState {
            offset: Vec2::new(0.0, -10.0),
            ..rest
        };
        Self {
            keys: vec![
                CycleKey {
                    at: 0.0,
                    value: rest,
                },
                CycleKey {
                    at: 0.5,
                    value: lifted,
                },
                CycleKey {
                    at: 1.0,
                    value: rest,
                },
            ],
            period: Millis(4000),
            ease: Ease::CssInOut,
            mode: LoopMode::Repeat,
        }
    }

    fn opacity_wave(edge: f64, middle: f64, period: Millis, ease: Ease) -> Self {
        let at = |at: f64, opacity: f64| CycleKey {
            at,
            value: VisualState {
                opacity,
                ..VisualState::VISIBLE
            },
        };
        Self {
            keys: vec![at(0.0, edge), at(0.5, middle), at(1.0, edge)],
            period,
            ease,
            mode: LoopMode::Repeat,
        }
    }

    /// Normalised position inside the period after `elapsed` time.
    pub fn phase(&self, elapsed: Millis) -> f64 {
        let period = self.period.0;
        if period == 0 {
            return 0.0;
        }
        match self.mode {
            LoopMode::Repeat => ((elapsed.0 % period) as f64) / (period as f64),
            LoopMode::PingPong => {
                let pos = elapsed.0 % (2 * period);
                let pos = if pos < period { pos } else { 2 * period - pos };
                (pos as f64) / (period as f64)
            }
        }
    }

    /// Sample the loop `elapsed` after it started.
    pub fn sample(&self, elapsed: Millis) -> VisualState {
        let Some(first) = self.keys.first() else {
            return VisualState::VISIBLE;
        };
        let p = self.phase(elapsed);
        let idx = self.keys.partition_point(|k| k.at <= p);
        if idx == 0 {
            return first.value;
        }
        if idx >= self.keys.len() {
            return self.keys[self.keys.len() - 1].value;
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let span = b.at - a.at;
        if span <= 0.0 {
            return a.value;
        }
        let t = self.ease.apply((p - a.at) / span);
        VisualState::lerp(&a.value, &b.value, t)
    }
}

/// A [`Cycle`] bound to its start time.
///
/// Started when its owner mounts and dropped when the owner unmounts; there is nothing to
/// step or poll in between, sampling is driven by the caller's clock.
#[derive(Clone, Debug, PartialEq)]
pub struct RunningCycle {
    cycle: Cycle,
    started_at: Millis,
}

impl RunningCycle {
    pub fn start(cycle: Cycle, now: Millis) -> Self {
        Self {
            cycle,
            started_at: now,
        }
    }

    pub fn started_at(&self) -> Millis {
        self.started_at
    }

    pub fn cycle(&self) -> &Cycle {
        &self.cycle
    }

    pub fn sample(&self, now: Millis) -> VisualState {
        self.cycle.sample(now.since(self.started_at))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/cycle.rs"]
mod tests;
