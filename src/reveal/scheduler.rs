use std::collections::BTreeMap;

use crate::{
    animation::{
        state::VisualState,
        tween::{Timing, Tween},
    },
    foundation::core::{Millis, Rect},
    observe::{IntersectionSource, TargetId},
    reveal::phase::{RevealPhase, Trigger},
};

/// Everything the scheduler needs to know about one animated element.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealSpec {
    /// Human-readable name used in logs and events.
    pub label: String,
    /// State rendered before the reveal.
    pub hidden: VisualState,
    /// State held after the reveal.
    pub shown: VisualState,
    pub trigger: Trigger,
    pub timing: Timing,
    /// Laid-out bounds in document coordinates.
    pub bounds: Rect,
    /// Element whose reveal gates this one (a wrapper around staggered siblings).
    pub parent: Option<TargetId>,
}

impl RevealSpec {
    /// Fade in once any part of `bounds` is visible.
    pub fn in_view(label: impl Into<String>, bounds: Rect) -> Self {
        Self {
            label: label.into(),
            hidden: VisualState::faded(),
            shown: VisualState::VISIBLE,
            trigger: Trigger::default(),
            timing: Timing::REVEAL,
            bounds,
            parent: None,
        }
    }

    /// Fade in as soon as the element is registered.
    pub fn on_mount(label: impl Into<String>, bounds: Rect) -> Self {
        Self {
            trigger: Trigger::Mount,
            ..Self::in_view(label, bounds)
        }
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.trigger = Trigger::in_view(threshold);
        self
    }

    pub fn hidden(mut self, state: impl Into<VisualState>) -> Self {
        self.hidden = state.into();
        self
    }

    pub fn shown(mut self, state: impl Into<VisualState>) -> Self {
        self.shown = state.into();
        self
    }

    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn delay(mut self, delay: Millis) -> Self {
        self.timing.delay = delay;
        self
    }

    pub fn parent(mut self, parent: TargetId) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Something that happened to a registered element.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RevealEvent {
    /// The trigger condition was met; the `revealed` flag is now permanently set.
    Triggered {
        target: TargetId,
        label: String,
        at: Millis,
        /// When the visual transition begins (`at` plus the element's delay).
        starts_at: Millis,
    },
    /// The visual transition began.
    Started {
        target: TargetId,
        label: String,
        at: Millis,
    },
    /// The transition finished; the element holds its shown state from here on.
    Completed {
        target: TargetId,
        label: String,
        at: Millis,
    },
}

impl RevealEvent {
    pub fn target(&self) -> TargetId {
        match self {
            Self::Triggered { target, .. }
            | Self::Started { target, .. }
            | Self::Completed { target, .. } => *target,
        }
    }
}

/// Proof of registration. Hand it back to [`RevealScheduler::unregister`] to tear down.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a RevealHandle leaves the element registered until the scheduler is dropped"]
pub struct RevealHandle {
    target: TargetId,
}

impl RevealHandle {
    pub fn target(&self) -> TargetId {
        self.target
    }
}

type CrossCallback = Box<dyn FnMut(&RevealEvent)>;

struct Entry {
    spec: RevealSpec,
    phase: RevealPhase,
    /// The element's own trigger was met, possibly while its parent was still hidden.
    latched: bool,
    started: bool,
    /// Start of the visual transition; stays set after the reveal completes.
    begins_at: Option<Millis>,
    on_cross: Option<CrossCallback>,
}

impl Entry {
    fn tween(&self) -> Option<Tween<VisualState>> {
        match self.phase {
            RevealPhase::Revealing { triggered_at } => Some(Tween::new(
                self.spec.hidden,
                self.spec.shown,
                triggered_at,
                self.spec.timing,
            )),
            _ => None,
        }
    }
}

/// Drives one-shot reveals for every animated element on a page.
///
/// The scheduler does not own the elements. It holds their reveal specs, watches their
/// visibility through `S`, and flips each element's `revealed` flag exactly once. All work
/// happens on the caller's thread when [`RevealScheduler::pump`] is called with the current
/// time; records delivered by the source are only consumed there.
pub struct RevealScheduler<S> {
    source: S,
    next_target: u64,
    entries: BTreeMap<TargetId, Entry>,
    pending: Vec<RevealEvent>,
}

impl<S> std::fmt::Debug for RevealScheduler<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealScheduler")
            .field("entries", &self.entries.len())
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl<S> RevealScheduler<S>
where
    S: IntersectionSource,
{
    pub fn new(source: S) -> Self {
        if !source.is_supported() {
            tracing::warn!("visibility observation unavailable, content will render revealed");
        }
        Self {
            source,
            next_target: 0,
            entries: BTreeMap::new(),
            pending: Vec::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Access the source, e.g. to scroll a [`crate::GeometryObserver`].
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register an element. See [`RevealScheduler::register_with`].
    pub fn register(&mut self, spec: RevealSpec, now: Millis) -> RevealHandle {
        self.insert(spec, None, now)
    }

    /// Register an element with a callback invoked when its trigger fires.
    ///
    /// The callback runs at most once, from inside [`RevealScheduler::pump`] (or from this
    /// call for mount triggers and when observation is unavailable), and never after the
    /// element is unregistered.
    pub fn register_with(
        &mut self,
        spec: RevealSpec,
        now: Millis,
        on_cross: impl FnMut(&RevealEvent) + 'static,
    ) -> RevealHandle {
        self.insert(spec, Some(Box::new(on_cross)), now)
    }

    fn insert(
        &mut self,
        mut spec: RevealSpec,
        on_cross: Option<CrossCallback>,
        now: Millis,
    ) -> RevealHandle {
        let target = TargetId(self.next_target);
        self.next_target += 1;
        spec.trigger = spec.trigger.normalized();
        spec.hidden = spec.hidden.normalized();
        spec.shown = spec.shown.normalized();

        let mut entry = Entry {
            latched: spec.trigger == Trigger::Mount,
            spec,
            phase: RevealPhase::Hidden,
            started: false,
            begins_at: None,
            on_cross,
        };

        if !self.source.is_supported() {
            // Shown without a transition, but hosts still hear about it.
            entry.phase = RevealPhase::Revealed;
            entry.started = true;
            let event = RevealEvent::Triggered {
                target,
                label: entry.spec.label.clone(),
                at: now,
                starts_at: now,
            };
            if let Some(mut cb) = entry.on_cross.take() {
                cb(&event);
            }
            self.pending.push(event);
            self.entries.insert(target, entry);
            return RevealHandle { target };
        }

        if !entry.latched {
            self.source.observe(target, entry.spec.bounds);
        }
        self.entries.insert(target, entry);
        if self.entries[&target].latched {
            self.resolve_triggers(now);
        }
        RevealHandle { target }
    }

    /// Tear an element down. Pending observation, queued events and the callback are
    /// released; nothing about this element is reported afterwards.
    pub fn unregister(&mut self, handle: RevealHandle) {
        let target = handle.target;
        if let Some(entry) = self.entries.remove(&target) {
            tracing::trace!(id = target.0, label = %entry.spec.label, "reveal unregistered");
        }
        self.source.unobserve(target);
        self.pending.retain(|e| e.target() != target);
    }

    /// Re-lay out a registered element. Ignored once it has been triggered.
    pub fn set_bounds(&mut self, target: TargetId, bounds: Rect) {
        let Some(entry) = self.entries.get_mut(&target) else {
            return;
        };
        entry.spec.bounds = bounds;
        if entry.phase == RevealPhase::Hidden && !entry.latched {
            self.source.update_bounds(target, bounds);
        }
    }

    pub fn phase(&self, target: TargetId) -> Option<RevealPhase> {
        self.entries.get(&target).map(|e| e.phase)
    }

    pub fn is_revealed(&self, target: TargetId) -> bool {
        self.phase(target).is_some_and(RevealPhase::is_revealed)
    }

    pub fn spec(&self, target: TargetId) -> Option<&RevealSpec> {
        self.entries.get(&target).map(|e| &e.spec)
    }

    /// The running transition, if the element is mid-reveal.
    pub fn transition(&self, target: TargetId) -> Option<Tween<VisualState>> {
        self.entries.get(&target).and_then(Entry::tween)
    }

    /// When the element's visual transition begins or began. `None` while hidden, and for
    /// elements that were shown without a transition because observation is unavailable.
    pub fn transition_begins_at(&self, target: TargetId) -> Option<Millis> {
        self.entries.get(&target).and_then(|e| e.begins_at)
    }

    /// Visual state to render for `target` at `now`.
    pub fn visual(&self, target: TargetId, now: Millis) -> Option<VisualState> {
        let entry = self.entries.get(&target)?;
        Some(match entry.phase {
            RevealPhase::Hidden => entry.spec.hidden,
            RevealPhase::Revealing { .. } => match entry.tween() {
                Some(t) => t.sample(now),
                None => entry.spec.shown,
            },
            RevealPhase::Revealed => entry.spec.shown,
        })
    }

    /// Consume visibility records and advance every element to `now`.
    ///
    /// Events are returned in order: triggers (by delay, then registration order), then
    /// transition starts (by start time, then delay), then completions.
    #[tracing::instrument(skip(self), fields(entries = self.entries.len()))]
    pub fn pump(&mut self, now: Millis) -> Vec<RevealEvent> {
        for record in self.source.take_records() {
            let Some(entry) = self.entries.get_mut(&record.target) else {
                tracing::trace!(id = record.target.0, "record for unregistered target");
                continue;
            };
            if entry.phase == RevealPhase::Hidden
                && !entry.latched
                && entry.spec.trigger.is_met_by(record.ratio)
            {
                entry.latched = true;
                tracing::trace!(
                    id = record.target.0,
                    ratio = record.ratio,
                    "visibility threshold reached"
                );
            }
        }

        self.resolve_triggers(now);
        let mut events = std::mem::take(&mut self.pending);
        self.advance_transitions(now, &mut events);
        events
    }

    fn parent_allows(&self, entry: &Entry) -> bool {
        match entry.spec.parent {
            None => true,
            // Orphans fall back to their own trigger.
            Some(parent) => self
                .entries
                .get(&parent)
                .is_none_or(|p| p.phase.is_revealed()),
        }
    }

    fn resolve_triggers(&mut self, now: Millis) {
        // Parents trigger children in the same pass, so iterate to a fixed point.
        loop {
            let mut ready: Vec<(Millis, TargetId)> = self
                .entries
                .iter()
                .filter(|(_, e)| e.phase == RevealPhase::Hidden && e.latched)
                .filter(|(_, e)| self.parent_allows(e))
                .map(|(id, e)| (e.spec.timing.delay, *id))
                .collect();
            if ready.is_empty() {
                return;
            }
            ready.sort();

            for (delay, target) in ready {
                self.source.unobserve(target);
                let Some(entry) = self.entries.get_mut(&target) else {
                    continue;
                };
                entry.phase.advance(RevealPhase::Revealing { triggered_at: now });
                entry.begins_at = Some(now + delay);
                let event = RevealEvent::Triggered {
                    target,
                    label: entry.spec.label.clone(),
                    at: now,
                    starts_at: now + delay,
                };
                tracing::debug!(
                    id = target.0,
                    label = %entry.spec.label,
                    at = now.0,
                    "reveal triggered"
                );
                if let Some(mut cb) = entry.on_cross.take() {
                    cb(&event);
                }
                self.pending.push(event);
            }
        }
    }

    fn advance_transitions(&mut self, now: Millis, events: &mut Vec<RevealEvent>) {
        let mut started: Vec<(Millis, Millis, TargetId)> = Vec::new();
        let mut completed: Vec<(Millis, TargetId)> = Vec::new();

        for (&target, entry) in &mut self.entries {
            let Some(tween) = entry.tween() else {
                continue;
            };
            if !entry.started && now >= tween.begins_at() {
                entry.started = true;
                started.push((tween.begins_at(), entry.spec.timing.delay, target));
            }
            if tween.is_finished(now) {
                entry.phase.advance(RevealPhase::Revealed);
                completed.push((tween.ends_at(), target));
            }
        }

        started.sort();
        completed.sort();
        for (at, _, target) in started {
            let label = self.entries[&target].spec.label.clone();
            events.push(RevealEvent::Started { target, label, at });
        }
        for (at, target) in completed {
            let label = self.entries[&target].spec.label.clone();
            tracing::debug!(id = target.0, label = %label, at = at.0, "reveal completed");
            events.push(RevealEvent::Completed { target, label, at });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/scheduler.rs"]
mod tests;
