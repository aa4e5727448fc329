use crate::{
    animation::{
        cycle::RunningCycle,
        state::{StatePreset, VisualState},
    },
    foundation::core::{Millis, Point, Rect, Size},
    observe::{IntersectionSource, TargetId},
    overlay::{
        hotspot::ProgressState,
        viewfinder::{MediaRef, Viewfinder},
    },
    reveal::scheduler::{RevealHandle, RevealScheduler, RevealSpec},
};

struct MountedHotspot {
    tooltip: RevealHandle,
    pulse: Option<RunningCycle>,
    progress: Option<ProgressState>,
}

/// A [`Viewfinder`] attached to a page: its tooltips are registered with the reveal
/// scheduler and its marker loops are running.
///
/// Hotspots live and die with the mounted viewfinder. [`MountedViewfinder::unmount`] hands
/// every registration back to the scheduler and stops the loops.
pub struct MountedViewfinder {
    viewfinder: Viewfinder,
    mounted_at: Millis,
    wrapper: Option<RevealHandle>,
    hotspots: Vec<MountedHotspot>,
}

impl std::fmt::Debug for MountedViewfinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountedViewfinder")
            .field("label", &self.viewfinder.label())
            .field("mounted_at", &self.mounted_at)
            .field("hotspots", &self.hotspots.len())
            .finish_non_exhaustive()
    }
}

/// One rendered frame of a viewfinder, in document coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverlayFrame {
    pub label: String,
    pub bounds: Rect,
    /// State of the panel wrapper, or fully visible when it has no reveal of its own.
    pub panel: VisualState,
    pub media: Option<MediaRef>,
    pub corners: [Point; 4],
    pub launch: Option<Rect>,
    pub hotspots: Vec<HotspotFrame>,
}

/// One rendered frame of a hotspot, in document coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HotspotFrame {
    pub label: String,
    pub marker: Point,
    pub marker_state: VisualState,
    pub tooltip: Rect,
    pub tooltip_state: VisualState,
    pub tooltip_revealed: bool,
    /// Progress bar fill fraction, when the tooltip carries one.
    pub progress: Option<f64>,
}

impl MountedViewfinder {
    /// Mount `viewfinder` at `now`.
    ///
    /// When `panel` is given it is registered first (with the viewfinder's bounds) and gates
    /// every tooltip reveal. Marker loops start immediately, regardless of scroll position.
    pub fn mount<S: IntersectionSource>(
        viewfinder: Viewfinder,
        panel: Option<RevealSpec>,
        scheduler: &mut RevealScheduler<S>,
        now: Millis,
    ) -> Self {
        let wrapper = panel.map(|mut spec| {
            spec.bounds = viewfinder.bounds();
            scheduler.register(spec, now)
        });
        let parent = wrapper.as_ref().map(RevealHandle::target);

        let placements = viewfinder.resolve_in_document();
        let hotspots = viewfinder
            .hotspots()
            .iter()
            .zip(placements)
            .map(|(hotspot, placed)| {
                let mut spec = RevealSpec::in_view(
                    format!("{}/{}", viewfinder.label(), hotspot.label),
                    placed.tooltip,
                )
                .hidden(StatePreset::FadeUpSmall);
                spec.parent = parent;
                MountedHotspot {
                    tooltip: scheduler.register(spec, now),
                    pulse: hotspot.pulse.cycle().map(|c| RunningCycle::start(c, now)),
                    progress: hotspot.progress.map(ProgressState::new),
                }
            })
            .collect();

        tracing::debug!(label = %viewfinder.label(), at = now.0, "viewfinder mounted");
        Self {
            viewfinder,
            mounted_at: now,
            wrapper,
            hotspots,
        }
    }

    pub fn viewfinder(&self) -> &Viewfinder {
        &self.viewfinder
    }

    pub fn mounted_at(&self) -> Millis {
        self.mounted_at
    }

    pub fn panel_target(&self) -> Option<TargetId> {
        self.wrapper.as_ref().map(RevealHandle::target)
    }

    pub fn tooltip_targets(&self) -> Vec<TargetId> {
        self.hotspots.iter().map(|h| h.tooltip.target()).collect()
    }

    /// Apply a new layout: move the box to `origin` and resize it to `width` (height follows
    /// the aspect ratio). Every placement is re-resolved from the fractional anchors and
    /// pushed to the scheduler.
    #[tracing::instrument(skip(self, scheduler), fields(label = %self.viewfinder.label()))]
    pub fn relayout<S: IntersectionSource>(
        &mut self,
        scheduler: &mut RevealScheduler<S>,
        origin: Point,
        width: f64,
    ) {
        self.viewfinder.move_to(origin);
        self.viewfinder.resize_width(width);
        self.push_bounds(scheduler);
    }

    /// Resize to an explicit size, ignoring the aspect ratio.
    pub fn resize<S: IntersectionSource>(
        &mut self,
        scheduler: &mut RevealScheduler<S>,
        size: Size,
    ) {
        self.viewfinder.resize(size);
        self.push_bounds(scheduler);
    }

    fn push_bounds<S: IntersectionSource>(&self, scheduler: &mut RevealScheduler<S>) {
        if let Some(w) = &self.wrapper {
            scheduler.set_bounds(w.target(), self.viewfinder.bounds());
        }
        for (mounted, placed) in self
            .hotspots
            .iter()
            .zip(self.viewfinder.resolve_in_document())
        {
            scheduler.set_bounds(mounted.tooltip.target(), placed.tooltip);
        }
    }

    /// Sample the overlay at `now`.
    ///
    /// Starts a progress fill the first time its tooltip is seen revealed, anchored at the
    /// tooltip's own transition start so late sampling does not shift it.
    pub fn frame<S: IntersectionSource>(
        &mut self,
        scheduler: &RevealScheduler<S>,
        now: Millis,
    ) -> OverlayFrame {
        let placements = self.viewfinder.resolve_in_document();
        let mut hotspots = Vec::with_capacity(self.hotspots.len());

        for ((mounted, hotspot), placed) in self
            .hotspots
            .iter_mut()
            .zip(self.viewfinder.hotspots())
            .zip(placements)
        {
            let target = mounted.tooltip.target();
            let revealed = scheduler.is_revealed(target);
            if revealed && let Some(progress) = &mut mounted.progress {
                match scheduler.transition_begins_at(target) {
                    Some(at) => progress.start(at),
                    None => progress.finish(),
                };
            }

            hotspots.push(HotspotFrame {
                label: hotspot.label.clone(),
                marker: placed.marker,
                marker_state: mounted
                    .pulse
                    .as_ref()
                    .map_or(VisualState::VISIBLE, |c| c.sample(now)),
                tooltip: placed.tooltip,
                tooltip_state: scheduler
                    .visual(target, now)
                    .unwrap_or(VisualState::VISIBLE),
                tooltip_revealed: revealed,
                progress: mounted.progress.as_ref().map(|p| p.fill(now)),
            });
        }

        let origin = self.viewfinder.origin().to_vec2();
        OverlayFrame {
            label: self.viewfinder.label().to_string(),
            bounds: self.viewfinder.bounds(),
            panel: self
                .panel_target()
                .and_then(|t| scheduler.visual(t, now))
                .unwrap_or(VisualState::VISIBLE),
            media: self.viewfinder.media().cloned(),
            corners: self.viewfinder.corners().map(|c| c + origin),
            launch: self.viewfinder.launch_rect().map(|r| r + origin),
            hotspots,
        }
    }

    /// Release every registration and stop the marker loops.
    pub fn unmount<S: IntersectionSource>(self, scheduler: &mut RevealScheduler<S>) -> Viewfinder {
        if let Some(w) = self.wrapper {
            scheduler.unregister(w);
        }
        for h in self.hotspots {
            scheduler.unregister(h.tooltip);
        }
        tracing::debug!(label = %self.viewfinder.label(), "viewfinder unmounted");
        self.viewfinder
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/engine.rs"]
mod tests;
