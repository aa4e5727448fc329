use std::collections::BTreeMap;

use crate::{
    foundation::core::{Point, Rect, Size, Vec2},
    foundation::math::overlap_1d,
    observe::{IntersectionRecord, IntersectionSource, TargetId},
};

/// Fraction of `bounds` inside a viewport of `view` size whose top-left is at `origin`.
///
/// Targets without area (collapsed or not laid out) are never visible.
pub fn visible_ratio(bounds: Rect, view: Size, origin: Point) -> f64 {
    let area = bounds.area();
    if !(area > 0.0) {
        return 0.0;
    }
    let (ox, oy) = overlaps(bounds, view, origin);
    ((ox * oy) / area).clamp(0.0, 1.0)
}

fn overlaps(bounds: Rect, view: Size, origin: Point) -> (f64, f64) {
    (
        overlap_1d(bounds.x0, bounds.x1, origin.x, origin.x + view.width),
        overlap_1d(bounds.y0, bounds.y1, origin.y, origin.y + view.height),
    )
}

/// Highest visible ratio reached while the viewport moves linearly from `from` to `to`.
///
/// Along the path each axis overlap is piecewise linear, with breakpoints where a viewport
/// edge meets a target edge. Between breakpoints the area is a product of two linear terms,
/// so the peak is at a breakpoint or at the vertex of that product.
pub(crate) fn peak_ratio(bounds: Rect, view: Size, from: Point, to: Point) -> f64 {
    let area = bounds.area();
    if !(area > 0.0) {
        return 0.0;
    }

    let d = to - from;
    // Breakpoints sit exactly on the edge coordinate along their own axis.
    let mut cuts = vec![(0.0, from), (1.0, to)];
    for axis in [Axis::X, Axis::Y] {
        let (delta, start, lo, hi, extent) = match axis {
            Axis::X => (d.x, from.x, bounds.x0, bounds.x1, view.width),
            Axis::Y => (d.y, from.y, bounds.y0, bounds.y1, view.height),
        };
        if delta == 0.0 {
            continue;
        }
        for edge in [lo - extent, lo, hi - extent, hi] {
            let u = (edge - start) / delta;
            if u > 0.0 && u < 1.0 {
                let p = match axis {
                    Axis::X => Point::new(edge, from.y + d.y * u),
                    Axis::Y => Point::new(from.x + d.x * u, edge),
                };
                cuts.push((u, p));
            }
        }
    }
    cuts.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut peak = 0.0f64;
    for w in cuts.windows(2) {
        let (x0, y0) = overlaps(bounds, view, w[0].1);
        let (x1, y1) = overlaps(bounds, view, w[1].1);
        peak = peak.max(x0 * y0).max(x1 * y1);

        let (bx, by) = (x1 - x0, y1 - y0);
        if bx * by < 0.0 {
            let s = -(x0 * by + y0 * bx) / (2.0 * bx * by);
            if s > 0.0 && s < 1.0 {
                peak = peak.max((x0 + bx * s) * (y0 + by * s));
            }
        }
    }
    (peak / area).clamp(0.0, 1.0)
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug)]
struct Target {
    bounds: Rect,
    last_ratio: f64,
}

/// Geometry-backed source over a scrolling document.
///
/// Targets are laid out in document coordinates; the viewport is a window of `view` size
/// whose top-left sits at the scroll offset. Scrolling reports the peak ratio reached along
/// the way, so a target that enters and leaves within one step is still seen.
#[derive(Clone, Debug)]
pub struct GeometryObserver {
    view: Size,
    scroll: Point,
    supported: bool,
    targets: BTreeMap<TargetId, Target>,
    queue: Vec<IntersectionRecord>,
}

impl GeometryObserver {
    pub fn new(view: Size) -> Self {
        Self {
            view,
            scroll: Point::ORIGIN,
            supported: true,
            targets: BTreeMap::new(),
            queue: Vec::new(),
        }
    }

    /// An observer on a platform that lacks the visibility primitive. It still tracks the
    /// scroll offset but never reports.
    pub fn unsupported(view: Size) -> Self {
        Self {
            supported: false,
            ..Self::new(view)
        }
    }

    pub fn viewport(&self) -> Rect {
        Rect::from_origin_size(self.scroll, self.view)
    }

    pub fn scroll(&self) -> Point {
        self.scroll
    }

    /// Current ratio for `target`, if observed.
    pub fn ratio_of(&self, target: TargetId) -> Option<f64> {
        self.targets
            .get(&target)
            .map(|t| visible_ratio(t.bounds, self.view, self.scroll))
    }

    /// Move the viewport to `to`, reporting every target whose visibility changed on the way.
    pub fn scroll_to(&mut self, to: Point) {
        let from = self.scroll;
        self.scroll = to;
        if !self.supported {
            return;
        }
        for (&id, target) in &mut self.targets {
            let peak = peak_ratio(target.bounds, self.view, from, to);
            let end = visible_ratio(target.bounds, self.view, to);
            if peak != target.last_ratio && peak != end {
                self.queue.push(IntersectionRecord {
                    target: id,
                    ratio: peak,
                });
            }
            if end != target.last_ratio || peak != end {
                self.queue.push(IntersectionRecord {
                    target: id,
                    ratio: end,
                });
            }
            target.last_ratio = end;
        }
    }

    /// Scroll by a delta.
    pub fn scroll_by(&mut self, delta: Vec2) {
        self.scroll_to(self.scroll + delta);
    }

    /// Resize the viewport, re-reporting targets whose ratio changed.
    pub fn resize(&mut self, view: Size) {
        self.view = view;
        let ids: Vec<TargetId> = self.targets.keys().copied().collect();
        for id in ids {
            self.refresh(id);
        }
    }

    fn refresh(&mut self, id: TargetId) {
        if !self.supported {
            return;
        }
        let Some(target) = self.targets.get_mut(&id) else {
            return;
        };
        let ratio = visible_ratio(target.bounds, self.view, self.scroll);
        if ratio != target.last_ratio {
            target.last_ratio = ratio;
            self.queue.push(IntersectionRecord { target: id, ratio });
        }
    }
}

impl IntersectionSource for GeometryObserver {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn observe(&mut self, target: TargetId, bounds: Rect) {
        let ratio = visible_ratio(bounds, self.view, self.scroll);
        self.targets.insert(
            target,
            Target {
                bounds,
                last_ratio: ratio,
            },
        );
        if self.supported {
            self.queue.push(IntersectionRecord { target, ratio });
        }
    }

    fn update_bounds(&mut self, target: TargetId, bounds: Rect) {
        if let Some(t) = self.targets.get_mut(&target) {
            t.bounds = bounds;
            self.refresh(target);
        }
    }

    fn unobserve(&mut self, target: TargetId) {
        self.targets.remove(&target);
        self.queue.retain(|r| r.target != target);
    }

    fn take_records(&mut self) -> Vec<IntersectionRecord> {
        std::mem::take(&mut self.queue)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/observe/geometry.rs"]
mod tests;
