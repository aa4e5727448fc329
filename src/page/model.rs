use std::collections::BTreeSet;

use crate::{
    animation::{
        ease::Ease,
        state::{StatePreset, VisualState},
        tween::Timing,
    },
    foundation::core::{Millis, Point, Rect, Size},
    foundation::error::{ViewfinderError, ViewfinderResult},
    overlay::{
        hotspot::Hotspot,
        viewfinder::{LaunchSlot, MediaRef, Viewfinder},
    },
    reveal::{phase::Trigger, scheduler::RevealSpec},
};

/// Declarative description of a showcase page.
///
/// Pages are plain data that can be written by hand, generated, or loaded from JSON. Layout
/// positions are document coordinates in CSS pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageSpec {
    #[serde(default)]
    pub title: String,
    pub viewport: Size,
    #[serde(default)]
    pub observer: ObserverKind,
    /// Animated elements, in document order.
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub viewfinders: Vec<ViewfinderSpec>,
}

/// Which visibility primitive the page runs with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObserverKind {
    #[default]
    Geometry,
    /// Simulate a platform without visibility observation (everything renders revealed).
    Unsupported,
}

/// Axis-aligned box as `x, y, width, height`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl From<Bounds> for Rect {
    fn from(b: Bounds) -> Self {
        Rect::new(b.x, b.y, b.x + b.width.max(0.0), b.y + b.height.max(0.0))
    }
}

/// A visual state given either by preset name or explicitly.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum StateRef {
    Preset(StatePreset),
    Custom(VisualState),
}

impl StateRef {
    pub fn resolve(self) -> VisualState {
        match self {
            Self::Preset(p) => p.state(),
            Self::Custom(s) => s.normalized(),
        }
    }
}

impl From<StatePreset> for StateRef {
    fn from(value: StatePreset) -> Self {
        Self::Preset(value)
    }
}

/// How and when an element reveals.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealOptions {
    #[serde(default = "RevealOptions::default_hidden")]
    pub hidden: StateRef,
    #[serde(default = "RevealOptions::default_shown")]
    pub shown: StateRef,
    #[serde(default)]
    pub trigger: Trigger,
    /// Only one-shot reveals are supported; `false` is normalised to `true`.
    #[serde(default = "RevealOptions::default_once")]
    pub once: bool,
    #[serde(default)]
    pub delay_ms: f64,
    #[serde(default = "RevealOptions::default_duration_ms")]
    pub duration_ms: f64,
    #[serde(default)]
    pub ease: Ease,
    /// Id of an earlier element whose reveal gates this one.
    #[serde(default)]
    pub parent: Option<String>,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            hidden: Self::default_hidden(),
            shown: Self::default_shown(),
            trigger: Trigger::default(),
            once: true,
            delay_ms: 0.0,
            duration_ms: Self::default_duration_ms(),
            ease: Ease::default(),
            parent: None,
        }
    }
}

impl RevealOptions {
    fn default_hidden() -> StateRef {
        StateRef::Preset(StatePreset::Fade)
    }

    fn default_shown() -> StateRef {
        StateRef::Preset(StatePreset::Visible)
    }

    fn default_once() -> bool {
        true
    }

    fn default_duration_ms() -> f64 {
        Timing::REVEAL.duration.0 as f64
    }

    pub fn hidden(mut self, state: impl Into<StateRef>) -> Self {
        self.hidden = state.into();
        self
    }

    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn delay_ms(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn timing(&self) -> Timing {
        Timing {
            delay: Millis::from_secs_f64(self.delay_ms / 1000.0),
            duration: Millis::from_secs_f64(self.duration_ms / 1000.0),
            ease: self.ease,
        }
    }

    /// Build a scheduler spec. `parent` must already be resolved to a target by the caller.
    pub fn to_spec(&self, label: impl Into<String>, bounds: Rect) -> RevealSpec {
        RevealSpec {
            label: label.into(),
            hidden: self.hidden.resolve(),
            shown: self.shown.resolve(),
            trigger: self.trigger.normalized(),
            timing: self.timing(),
            bounds,
            parent: None,
        }
    }

    fn normalize(&mut self, owner: &str, notes: &mut Vec<String>) {
        if !self.once {
            self.once = true;
            notes.push(format!("{owner}: once=false is unsupported, using once=true"));
        }
        if self.delay_ms.is_nan() || self.delay_ms < 0.0 {
            notes.push(format!("{owner}: delay {} ms normalised to 0", self.delay_ms));
            self.delay_ms = 0.0;
        }
        if self.duration_ms.is_nan() || self.duration_ms < 0.0 {
            notes.push(format!(
                "{owner}: duration {} ms normalised to 0",
                self.duration_ms
            ));
            self.duration_ms = 0.0;
        }
        if let Trigger::InView { threshold } = self.trigger {
            let clamped = crate::foundation::math::clamp_unit(threshold);
            if clamped != threshold {
                notes.push(format!("{owner}: threshold {threshold} clamped to {clamped}"));
                self.trigger = Trigger::InView { threshold: clamped };
            }
        }
    }
}

/// One animated element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementSpec {
    pub id: String,
    pub bounds: Bounds,
    #[serde(flatten)]
    pub reveal: RevealOptions,
}

/// One viewfinder panel with its hotspots.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewfinderSpec {
    pub id: String,
    pub origin: Point,
    pub width: f64,
    /// Width over height.
    #[serde(default = "ViewfinderSpec::default_aspect")]
    pub aspect: f64,
    #[serde(default)]
    pub media: Option<MediaRef>,
    #[serde(default = "ViewfinderSpec::default_corner_inset")]
    pub corner_inset: f64,
    /// Reveal of the panel wrapper. Tooltips wait for it when present.
    #[serde(default)]
    pub reveal: Option<RevealOptions>,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
    #[serde(default)]
    pub launch: Option<LaunchSlot>,
}

impl ViewfinderSpec {
    fn default_aspect() -> f64 {
        1.0
    }

    fn default_corner_inset() -> f64 {
        Viewfinder::DEFAULT_CORNER_INSET
    }

    /// Build the runtime viewfinder at this spec's origin and width.
    pub fn build(&self) -> ViewfinderResult<Viewfinder> {
        let mut vf = Viewfinder::new(self.id.clone(), self.width, self.aspect)?
            .at(self.origin)
            .with_corner_inset(self.corner_inset);
        if let Some(media) = &self.media {
            vf = vf.with_media(media.clone());
        }
        for h in &self.hotspots {
            vf = vf.with_hotspot(h.clone());
        }
        if let Some(launch) = &self.launch {
            vf = vf.with_launch(launch.clone());
        }
        Ok(vf)
    }
}

impl PageSpec {
    pub fn from_json_str(s: &str) -> ViewfinderResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_reader(r: impl std::io::Read) -> ViewfinderResult<Self> {
        Ok(serde_json::from_reader(r)?)
    }

    pub fn to_json_pretty(&self) -> ViewfinderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject pages that cannot be mounted: a degenerate viewport, duplicate ids, or parents
    /// that are unknown or declared after their children.
    pub fn validate(&self) -> ViewfinderResult<()> {
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0)
            || !self.viewport.is_finite()
        {
            return Err(ViewfinderError::config(format!(
                "viewport must be positive and finite, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }

        let mut seen = BTreeSet::<&str>::new();
        for el in &self.elements {
            if let Some(parent) = &el.reveal.parent
                && !seen.contains(parent.as_str())
            {
                return Err(ViewfinderError::config(format!(
                    "element '{}' references parent '{parent}' that is not declared before it",
                    el.id
                )));
            }
            if !seen.insert(el.id.as_str()) {
                return Err(ViewfinderError::config(format!(
                    "duplicate element id '{}'",
                    el.id
                )));
            }
        }

        for vf in &self.viewfinders {
            if let Some(parent) = vf.reveal.as_ref().and_then(|r| r.parent.as_ref())
                && !self.elements.iter().any(|e| &e.id == parent)
            {
                return Err(ViewfinderError::config(format!(
                    "viewfinder '{}' references unknown parent '{parent}'",
                    vf.id
                )));
            }
            if !seen.insert(vf.id.as_str()) {
                return Err(ViewfinderError::config(format!(
                    "duplicate id '{}' (viewfinder)",
                    vf.id
                )));
            }
            if !vf.aspect.is_finite() || vf.aspect <= 0.0 {
                return Err(ViewfinderError::config(format!(
                    "viewfinder '{}' aspect must be > 0",
                    vf.id
                )));
            }
        }
        Ok(())
    }

    /// Clamp and normalise recoverable configuration mistakes. Returns one note per change,
    /// each also logged as a warning.
    pub fn normalize(&mut self) -> Vec<String> {
        let mut notes = Vec::new();
        for el in &mut self.elements {
            el.reveal.normalize(&el.id, &mut notes);
            if el.bounds.width < 0.0 || el.bounds.height < 0.0 {
                notes.push(format!("{}: negative size collapsed to 0", el.id));
                el.bounds.width = el.bounds.width.max(0.0);
                el.bounds.height = el.bounds.height.max(0.0);
            }
        }
        for vf in &mut self.viewfinders {
            if let Some(reveal) = &mut vf.reveal {
                reveal.normalize(&vf.id, &mut notes);
            }
            if vf.width.is_nan() || vf.width < 0.0 {
                notes.push(format!("{}: width {} normalised to 0", vf.id, vf.width));
                vf.width = 0.0;
            }
            for h in &mut vf.hotspots {
                if let Some(progress) = &mut h.progress {
                    let clamped = crate::foundation::math::clamp_unit(progress.target);
                    if clamped != progress.target {
                        notes.push(format!(
                            "{}/{}: progress target {} clamped to {clamped}",
                            vf.id, h.label, progress.target
                        ));
                        progress.target = clamped;
                    }
                }
            }
        }
        for note in &notes {
            tracing::warn!("{note}");
        }
        notes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/model.rs"]
mod tests;
