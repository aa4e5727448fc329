//! Visibility observation behind a small, swappable interface.
//!
//! The reveal scheduler never measures geometry itself. It registers targets with an
//! [`IntersectionSource`] and later drains the records that source queued, which mirrors how
//! browser intersection observers deliver entries asynchronously relative to scrolling.

mod geometry;
mod manual;

pub use geometry::{GeometryObserver, visible_ratio};
pub use manual::ManualObserver;

use crate::foundation::core::Rect;

/// Identity of an observed target. Keys are never reused within one scheduler.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TargetId(pub u64);

/// One visibility report for a target.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct IntersectionRecord {
    pub target: TargetId,
    /// Fraction of the target's area inside the viewport, in `[0, 1]`.
    pub ratio: f64,
}

/// Platform-specific visibility detection.
pub trait IntersectionSource {
    /// Whether this platform can observe visibility at all. When it cannot, observed
    /// content is shown immediately instead of waiting forever.
    fn is_supported(&self) -> bool {
        true
    }

    /// Start observing `target`. Sources that measure geometry themselves queue an initial
    /// record, so content that is already on screen does not wait for a scroll.
    fn observe(&mut self, target: TargetId, bounds: Rect);

    /// The target was laid out again.
    fn update_bounds(&mut self, target: TargetId, bounds: Rect);

    /// Stop observing `target` and discard any records still queued for it.
    fn unobserve(&mut self, target: TargetId);

    /// Drain records queued since the last call, in delivery order.
    fn take_records(&mut self) -> Vec<IntersectionRecord>;
}

/// A platform without any visibility primitive.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unsupported;

impl IntersectionSource for Unsupported {
    fn is_supported(&self) -> bool {
        false
    }

    fn observe(&mut self, _target: TargetId, _bounds: Rect) {}

    fn update_bounds(&mut self, _target: TargetId, _bounds: Rect) {}

    fn unobserve(&mut self, _target: TargetId) {}

    fn take_records(&mut self) -> Vec<IntersectionRecord> {
        Vec::new()
    }
}

impl<S> IntersectionSource for Box<S>
where
    S: IntersectionSource + ?Sized,
{
    fn is_supported(&self) -> bool {
        (**self).is_supported()
    }

    fn observe(&mut self, target: TargetId, bounds: Rect) {
        (**self).observe(target, bounds);
    }

    fn update_bounds(&mut self, target: TargetId, bounds: Rect) {
        (**self).update_bounds(target, bounds);
    }

    fn unobserve(&mut self, target: TargetId) {
        (**self).unobserve(target);
    }

    fn take_records(&mut self) -> Vec<IntersectionRecord> {
        (**self).take_records()
    }
}
