use crate::foundation::core::Millis;

/// Lifecycle of a one-shot reveal.
///
/// Transitions only move forward: `Hidden -> Revealing -> Revealed`, or straight to
/// `Revealed` when observation is unavailable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RevealPhase {
    /// Waiting for the trigger; rendered in the hidden state.
    Hidden,
    /// Triggered at `triggered_at`; the transition runs after the element's delay.
    Revealing { triggered_at: Millis },
    /// Holding the shown state for the rest of the element's lifetime.
    Revealed,
}

impl RevealPhase {
    /// The permanent revealed flag. Once true it stays true.
    pub fn is_revealed(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    fn rank(self) -> u8 {
        match self {
            Self::Hidden => 0,
            Self::Revealing { .. } => 1,
            Self::Revealed => 2,
        }
    }

    /// Move to `next` unless that would go backwards.
    pub(crate) fn advance(&mut self, next: RevealPhase) -> bool {
        if next.rank() <= self.rank() {
            return false;
        }
        *self = next;
        true
    }
}

/// Condition that triggers a reveal. Every trigger fires at most once.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Fire once the visible fraction of the element reaches `threshold`.
    ///
    /// A threshold of 0 means "any visible pixel"; an element with no visible area never
    /// satisfies any threshold.
    InView {
        #[serde(default)]
        threshold: f64,
    },
    /// Fire as soon as the element is registered.
    Mount,
}

impl Trigger {
    pub const RATIO_TOLERANCE: f64 = 1e-9;

    pub fn in_view(threshold: f64) -> Self {
        let clamped = crate::foundation::math::clamp_unit(threshold);
        if clamped != threshold {
            tracing::warn!(threshold, clamped, "reveal threshold outside [0, 1], clamped");
        }
        Self::InView { threshold: clamped }
    }

    /// Copy with the threshold clamped into `[0, 1]`.
    pub fn normalized(self) -> Self {
        match self {
            Self::InView { threshold } => Self::in_view(threshold),
            Self::Mount => Self::Mount,
        }
    }

    /// Ratios are areas divided in floating point, so a fully covered target may report a
    /// hair under 1.0. Comparisons allow [`Trigger::RATIO_TOLERANCE`] of slack.
    pub(crate) fn is_met_by(self, ratio: f64) -> bool {
        match self {
            Self::InView { threshold } => {
                ratio > 0.0 && ratio + Self::RATIO_TOLERANCE >= threshold
            }
            Self::Mount => true,
        }
    }
}

impl Default for Trigger {
    fn default() -> Self {
        Self::InView { threshold: 0.0 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/phase.rs"]
mod tests;
