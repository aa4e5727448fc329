use std::collections::BTreeMap;

use crate::{
    animation::state::VisualState,
    foundation::core::{Millis, Point, Size},
    foundation::error::{ViewfinderError, ViewfinderResult},
    observe::{GeometryObserver, TargetId},
    overlay::engine::{MountedViewfinder, OverlayFrame},
    page::model::{ObserverKind, PageSpec},
    reveal::{
        phase::RevealPhase,
        scheduler::{RevealEvent, RevealHandle, RevealScheduler},
    },
};

/// A mounted page: every element and viewfinder registered against one scrolling document.
pub struct Showcase {
    title: String,
    scheduler: RevealScheduler<GeometryObserver>,
    elements: Vec<(String, RevealHandle)>,
    viewfinders: Vec<MountedViewfinder>,
}

impl std::fmt::Debug for Showcase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Showcase")
            .field("title", &self.title)
            .field("elements", &self.elements.len())
            .field("viewfinders", &self.viewfinders.len())
            .finish_non_exhaustive()
    }
}

/// Rendered state of the whole page at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ShowcaseFrame {
    pub at: Millis,
    pub scroll: f64,
    pub elements: Vec<ElementFrame>,
    pub viewfinders: Vec<OverlayFrame>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ElementFrame {
    pub id: String,
    #[serde(flatten)]
    pub phase: RevealPhase,
    pub revealed: bool,
    pub state: VisualState,
}

impl Showcase {
    /// Normalise, validate and mount `page` at `now` with the document scrolled to the top.
    ///
    /// Mount-triggered elements fire during this call; their events are reported by the
    /// first [`Showcase::advance`].
    #[tracing::instrument(skip(page), fields(title = %page.title))]
    pub fn mount(page: &PageSpec, now: Millis) -> ViewfinderResult<Self> {
        let mut page = page.clone();
        page.normalize();
        page.validate()?;

        let observer = match page.observer {
            ObserverKind::Geometry => GeometryObserver::new(page.viewport),
            ObserverKind::Unsupported => GeometryObserver::unsupported(page.viewport),
        };
        let mut scheduler = RevealScheduler::new(observer);

        let mut ids = BTreeMap::<String, TargetId>::new();
        let mut elements = Vec::with_capacity(page.elements.len());
        for el in &page.elements {
            let mut spec = el.reveal.to_spec(el.id.clone(), el.bounds.into());
            spec.parent = el.reveal.parent.as_ref().and_then(|p| ids.get(p).copied());
            let handle = scheduler.register(spec, now);
            ids.insert(el.id.clone(), handle.target());
            elements.push((el.id.clone(), handle));
        }

        let mut viewfinders = Vec::with_capacity(page.viewfinders.len());
        for vf in &page.viewfinders {
            let viewfinder = vf.build()?;
            let panel = vf.reveal.as_ref().map(|r| {
                let mut spec = r.to_spec(vf.id.clone(), viewfinder.bounds());
                spec.parent = r.parent.as_ref().and_then(|p| ids.get(p).copied());
                spec
            });
            viewfinders.push(MountedViewfinder::mount(
                viewfinder,
                panel,
                &mut scheduler,
                now,
            ));
        }

        tracing::info!(
            elements = elements.len(),
            viewfinders = viewfinders.len(),
            "page mounted"
        );
        Ok(Self {
            title: page.title,
            scheduler,
            elements,
            viewfinders,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn scheduler(&self) -> &RevealScheduler<GeometryObserver> {
        &self.scheduler
    }

    pub fn scroll(&self) -> f64 {
        self.scheduler.source().scroll().y
    }

    /// Target of the element with `id`.
    pub fn element(&self, id: &str) -> Option<TargetId> {
        self.elements
            .iter()
            .find(|(eid, _)| eid == id)
            .map(|(_, h)| h.target())
    }

    pub fn viewfinder(&self, id: &str) -> Option<&MountedViewfinder> {
        self.viewfinders.iter().find(|v| v.viewfinder().label() == id)
    }

    /// Scroll the document to `y` and advance to `now`.
    pub fn scroll_to(&mut self, y: f64, now: Millis) -> Vec<RevealEvent> {
        self.scheduler.source_mut().scroll_to(Point::new(0.0, y));
        self.advance(now)
    }

    /// Advance time without scrolling.
    pub fn advance(&mut self, now: Millis) -> Vec<RevealEvent> {
        self.scheduler.pump(now)
    }

    pub fn resize_viewport(&mut self, view: Size, now: Millis) -> Vec<RevealEvent> {
        self.scheduler.source_mut().resize(view);
        self.advance(now)
    }

    /// Move and resize the viewfinder `id`; hotspots follow their fractional anchors.
    pub fn relayout_viewfinder(
        &mut self,
        id: &str,
        origin: Point,
        width: f64,
    ) -> ViewfinderResult<()> {
        let Some(mounted) = self
            .viewfinders
            .iter_mut()
            .find(|v| v.viewfinder().label() == id)
        else {
            return Err(ViewfinderError::layout(format!("unknown viewfinder '{id}'")));
        };
        if !width.is_finite() || width < 0.0 {
            return Err(ViewfinderError::layout(format!(
                "viewfinder width must be finite and >= 0, got {width}"
            )));
        }
        mounted.relayout(&mut self.scheduler, origin, width);
        Ok(())
    }

    /// Sample every element and overlay at `now`.
    pub fn snapshot(&mut self, now: Millis) -> ShowcaseFrame {
        let elements = self
            .elements
            .iter()
            .filter_map(|(id, handle)| {
                let target = handle.target();
                let phase = self.scheduler.phase(target)?;
                Some(ElementFrame {
                    id: id.clone(),
                    phase,
                    revealed: phase.is_revealed(),
                    state: self.scheduler.visual(target, now)?,
                })
            })
            .collect();
        let viewfinders = self
            .viewfinders
            .iter_mut()
            .map(|v| v.frame(&self.scheduler, now))
            .collect();
        ShowcaseFrame {
            at: now,
            scroll: self.scroll(),
            elements,
            viewfinders,
        }
    }

    /// Tear the page down, releasing every registration.
    pub fn unmount(mut self) {
        for (_, handle) in self.elements.drain(..) {
            self.scheduler.unregister(handle);
        }
        for vf in self.viewfinders.drain(..) {
            vf.unmount(&mut self.scheduler);
        }
        tracing::debug!(title = %self.title, remaining = self.scheduler.len(), "page unmounted");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/showcase.rs"]
mod tests;
