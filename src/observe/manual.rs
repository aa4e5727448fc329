use std::collections::BTreeSet;

use crate::{
    foundation::core::Rect,
    observe::{IntersectionRecord, IntersectionSource, TargetId},
};

/// Source fed by a host runtime that measures visibility on its own (a browser bridge, a
/// test harness). The host pushes ratios; the scheduler drains them when pumped.
#[derive(Clone, Debug, Default)]
pub struct ManualObserver {
    observed: BTreeSet<TargetId>,
    queue: Vec<IntersectionRecord>,
}

impl ManualObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a report for `target`. Reports for targets that are not observed are dropped.
    pub fn push(&mut self, target: TargetId, ratio: f64) {
        if !self.observed.contains(&target) {
            return;
        }
        self.queue.push(IntersectionRecord {
            target,
            ratio: crate::foundation::math::clamp_unit(ratio),
        });
    }

    pub fn is_observing(&self, target: TargetId) -> bool {
        self.observed.contains(&target)
    }

    pub fn observed_len(&self) -> usize {
        self.observed.len()
    }
}

impl IntersectionSource for ManualObserver {
    fn observe(&mut self, target: TargetId, _bounds: Rect) {
        self.observed.insert(target);
    }

    fn update_bounds(&mut self, _target: TargetId, _bounds: Rect) {}

    fn unobserve(&mut self, target: TargetId) {
        self.observed.remove(&target);
        self.queue.retain(|r| r.target != target);
    }

    fn take_records(&mut self) -> Vec<IntersectionRecord> {
        std::mem::take(&mut self.queue)
    }
}
