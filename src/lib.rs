//! Scroll-triggered reveals and AR hotspot overlays for viewfinder showcase pages.
//!
//! The crate has two engines that share one caller-driven clock ([`Millis`]):
//!
//! - A [`RevealScheduler`] that watches element visibility through an [`IntersectionSource`]
//!   and plays each element's one-shot entrance transition exactly once.
//! - A [`MountedViewfinder`] overlay that places hotspot markers and tooltip cards at
//!   fractional positions of a resizable box, runs the marker loops, and fills progress bars.
//!
//! [`PageSpec`] describes a whole page as JSON; [`Showcase`] mounts it against a scrolling
//! [`GeometryObserver`].
#![forbid(unsafe_code)]

mod foundation;

/// Easing curves, tweens, loops and visual states.
pub mod animation;
/// Visibility observation.
pub mod observe;
/// Hotspot overlays over viewfinder boxes.
pub mod overlay;
/// Page descriptions and the showcase runtime.
pub mod page;
/// One-shot reveal scheduling.
pub mod reveal;

pub use crate::foundation::core::{Anchor, Edges, Millis, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{ViewfinderError, ViewfinderResult};

pub use crate::animation::cycle::{Cycle, CycleKey, LoopMode, RunningCycle};
pub use crate::animation::ease::Ease;
pub use crate::animation::ops::{stagger, stagger_timings};
pub use crate::animation::state::{Lerp, StatePreset, VisualState};
pub use crate::animation::tween::{Timing, Tween};
pub use crate::observe::{
    GeometryObserver, IntersectionRecord, IntersectionSource, ManualObserver, TargetId,
    Unsupported, visible_ratio,
};
pub use crate::overlay::engine::{HotspotFrame, MountedViewfinder, OverlayFrame};
pub use crate::overlay::hotspot::{
    Hotspot, ProgressIndicator, ProgressState, PulseKind, ResolvedHotspot, Tooltip,
};
pub use crate::overlay::viewfinder::{LaunchKind, LaunchSlot, MediaRef, Viewfinder};
pub use crate::page::model::{
    Bounds, ElementSpec, ObserverKind, PageSpec, RevealOptions, StateRef, ViewfinderSpec,
};
pub use crate::page::preset::ar_suite;
pub use crate::page::showcase::{ElementFrame, Showcase, ShowcaseFrame};
pub use crate::reveal::phase::{RevealPhase, Trigger};
pub use crate::reveal::scheduler::{RevealEvent, RevealHandle, RevealScheduler, RevealSpec};
