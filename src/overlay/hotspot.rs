use crate::{
    animation::{cycle::Cycle, ease::Ease, tween::Timing, tween::Tween},
    foundation::core::{Anchor, Millis, Point, Rect, Size, Vec2},
};

/// Card attached to a hotspot marker.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tooltip {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    /// Short step marker shown before the title ("01").
    #[serde(default)]
    pub badge: Option<String>,
    /// Pixel offset of the card's top-left from the resolved marker position.
    #[serde(default = "Tooltip::default_offset")]
    pub offset: Vec2,
    #[serde(default = "Tooltip::default_size")]
    pub size: Size,
}

impl Tooltip {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
            badge: None,
            offset: Self::default_offset(),
            size: Self::default_size(),
        }
    }

    /// `+32px` right and `-48px` up from the marker.
    pub fn default_offset() -> Vec2 {
        Vec2::new(32.0, -48.0)
    }

    pub fn default_size() -> Size {
        Size::new(208.0, 88.0)
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn offset(mut self, dx: f64, dy: f64) -> Self {
        self.offset = Vec2::new(dx, dy);
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width.max(0.0), height.max(0.0));
        self
    }
}

/// A bar that fills from 0 to `target` once its tooltip is revealed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressIndicator {
    /// Final fill fraction in `[0, 1]`.
    pub target: f64,
    #[serde(default = "ProgressIndicator::default_duration")]
    pub duration: Millis,
}

impl ProgressIndicator {
    pub fn new(target: f64) -> Self {
        let clamped = crate::foundation::math::clamp_unit(target);
        if clamped != target {
            tracing::warn!(target, clamped, "progress target outside [0, 1], clamped");
        }
        Self {
            target: clamped,
            duration: Self::default_duration(),
        }
    }

    pub fn default_duration() -> Millis {
        Millis(700)
    }

    pub fn duration(mut self, duration: Millis) -> Self {
        self.duration = duration;
        self
    }
}

/// Fill state of a mounted [`ProgressIndicator`].
///
/// The fill starts once and is never replayed: later start requests are ignored and the
/// value holds at the target after the fill completes.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressState {
    indicator: ProgressIndicator,
    fill: Option<Tween<f64>>,
}

impl ProgressState {
    pub fn new(indicator: ProgressIndicator) -> Self {
        Self {
            indicator: ProgressIndicator::new(indicator.target).duration(indicator.duration),
            fill: None,
        }
    }

    pub fn indicator(&self) -> ProgressIndicator {
        self.indicator
    }

    pub fn is_started(&self) -> bool {
        self.fill.is_some()
    }

    /// Begin filling at `at`. Returns `false` if the fill was already started.
    pub fn start(&mut self, at: Millis) -> bool {
        if self.fill.is_some() {
            return false;
        }
        let timing = Timing {
            delay: Millis::ZERO,
            duration: self.indicator.duration,
            ease: Ease::Linear,
        };
        self.fill = Some(Tween::new(0.0, self.indicator.target, at, timing));
        true
    }

    /// Jump straight to the target, used when content renders pre-revealed.
    pub fn finish(&mut self) -> bool {
        if self.fill.is_some() {
            return false;
        }
        let timing = Timing {
            delay: Millis::ZERO,
            duration: Millis::ZERO,
            ease: Ease::Linear,
        };
        self.fill = Some(Tween::new(
            self.indicator.target,
            self.indicator.target,
            Millis::ZERO,
            timing,
        ));
        true
    }

    /// Fill fraction at `now`, never above the target.
    pub fn fill(&self, now: Millis) -> f64 {
        match &self.fill {
            None => 0.0,
            Some(t) => t.sample(now).clamp(0.0, self.indicator.target),
        }
    }
}

/// Looping animation carried by a hotspot marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseKind {
    #[default]
    Pulse,
    Glow,
    /// Vertical bob.
    Float,
    None,
}

impl PulseKind {
    pub fn cycle(self) -> Option<Cycle> {
        match self {
            Self::Pulse => Some(Cycle::pulse()),
            Self::Glow => Some(Cycle::glow()),
            Self::Float => Some(Cycle::float()),
            Self::None => None,
        }
    }
}

/// A point annotation over a viewfinder.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hotspot {
    pub label: String,
    pub anchor: Anchor,
    pub tooltip: Tooltip,
    #[serde(default)]
    pub pulse: PulseKind,
    #[serde(default)]
    pub progress: Option<ProgressIndicator>,
    /// Marker diameter in pixels.
    #[serde(default = "Hotspot::default_marker_size")]
    pub marker_size: f64,
}

impl Hotspot {
    pub fn new(label: impl Into<String>, anchor: Anchor, tooltip: Tooltip) -> Self {
        Self {
            label: label.into(),
            anchor,
            tooltip,
            pulse: PulseKind::Pulse,
            progress: None,
            marker_size: Self::default_marker_size(),
        }
    }

    pub fn default_marker_size() -> f64 {
        24.0
    }

    pub fn pulse(mut self, pulse: PulseKind) -> Self {
        self.pulse = pulse;
        self
    }

    pub fn progress(mut self, progress: ProgressIndicator) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Resolve against the container's current size. Offsets apply after the fractional
    /// anchor is turned into pixels, so the card keeps its distance from the marker at
    /// every size.
    pub fn resolve(&self, size: Size) -> ResolvedHotspot {
        let marker = self.anchor.resolve(size);
        ResolvedHotspot {
            marker,
            tooltip: Rect::from_origin_size(marker + self.tooltip.offset, self.tooltip.size),
        }
    }
}

/// Container-local pixel placement of a hotspot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedHotspot {
    pub marker: Point,
    pub tooltip: Rect,
}

impl ResolvedHotspot {
    /// Move from container-local into document coordinates.
    pub fn translated(self, origin: Point) -> Self {
        let d = origin.to_vec2();
        Self {
            marker: self.marker + d,
            tooltip: self.tooltip + d,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/hotspot.rs"]
mod tests;
