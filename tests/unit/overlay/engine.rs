use super::*;
use crate::{
    foundation::core::{Anchor, Vec2},
    observe::{GeometryObserver, Unsupported},
    overlay::hotspot::{Hotspot, ProgressIndicator, PulseKind, Tooltip},
};

fn guide_panel() -> Viewfinder {
    Viewfinder::square("guide", 400.0)
        .unwrap()
        .at(Point::new(0.0, 2000.0))
        .with_hotspot(Hotspot::new(
            "fuel",
            Anchor::new(0.25, 1.0 / 3.0),
            Tooltip::new("Check Fuel Line").badge("01"),
        ))
        .with_hotspot(
            Hotspot::new(
                "heat",
                Anchor::new(2.0 / 3.0, 0.75),
                Tooltip::new("Heat Sync Status").offset(32.0, -32.0),
            )
            .pulse(PulseKind::None)
            .progress(ProgressIndicator::new(0.8)),
        )
}

fn scheduler() -> RevealScheduler<GeometryObserver> {
    RevealScheduler::new(GeometryObserver::new(Size::new(1200.0, 800.0)))
}

#[test]
fn pulses_run_from_mount_while_offscreen() {
    let mut s = scheduler();
    let mut m = MountedViewfinder::mount(guide_panel(), None, &mut s, Millis(0));
    s.pump(Millis(0));

    let f = m.frame(&s, Millis(1000));
    assert!(!f.hotspots[0].tooltip_revealed);
    assert!((f.hotspots[0].marker_state.opacity - 0.5).abs() < 1e-9);
    assert_eq!(f.hotspots[1].marker_state, VisualState::VISIBLE);
    assert_eq!(f.hotspots[0].tooltip_state.opacity, 0.0);
}

#[test]
fn tooltips_reveal_on_scroll_and_progress_fills_once() {
    let mut s = scheduler();
    let mut m = MountedViewfinder::mount(guide_panel(), None, &mut s, Millis(0));
    s.pump(Millis(0));

    s.source_mut().scroll_to(Point::new(0.0, 1600.0));
    s.pump(Millis(500));
    let f = m.frame(&s, Millis(500));
    assert!(f.hotspots.iter().all(|h| h.tooltip_revealed));
    assert_eq!(f.hotspots[1].progress, Some(0.0));

    let mid = m.frame(&s, Millis(850)).hotspots[1].progress.unwrap();
    assert!((mid - 0.4).abs() < 1e-9);

    for t in [1200, 1300, 60_000] {
        s.pump(Millis(t));
        assert_eq!(m.frame(&s, Millis(t)).hotspots[1].progress, Some(0.8));
    }
}

#[test]
fn late_sampling_keeps_fill_anchored_to_reveal() {
    let mut s = scheduler();
    let mut m = MountedViewfinder::mount(guide_panel(), None, &mut s, Millis(0));
    s.source_mut().scroll_to(Point::new(0.0, 1600.0));
    s.pump(Millis(100));
    // First sample long after the reveal finished.
    let f = m.frame(&s, Millis(5000));
    assert_eq!(f.hotspots[1].progress, Some(0.8));
}

#[test]
fn relayout_rescales_markers_and_keeps_offsets() {
    let mut s = scheduler();
    let mut m = MountedViewfinder::mount(guide_panel(), None, &mut s, Millis(0));
    m.relayout(&mut s, Point::new(100.0, 2000.0), 800.0);
    let f = m.frame(&s, Millis(0));
    let fuel = &f.hotspots[0];
    assert!((fuel.marker.x - 300.0).abs() < 1e-9);
    assert!((fuel.marker.y - (2000.0 + 800.0 / 3.0)).abs() < 1e-9);
    assert!(((fuel.tooltip.origin() - fuel.marker) - Vec2::new(32.0, -48.0)).hypot() < 1e-9);
    assert_eq!(f.bounds, Rect::new(100.0, 2000.0, 900.0, 2800.0));
    assert_eq!(f.corners[0], Point::new(132.0, 2032.0));
}

#[test]
fn panel_gates_tooltips() {
    let mut s = scheduler();
    let panel = RevealSpec::in_view("guide-panel", Rect::ZERO)
        .threshold(0.9)
        .hidden(StatePreset::SlideRight);
    let mut m = MountedViewfinder::mount(guide_panel(), Some(panel), &mut s, Millis(0));
    let panel_id = m.panel_target().unwrap();

    // Only the top slice of the panel is on screen: tooltips are visible, the panel isn't.
    s.source_mut().scroll_to(Point::new(0.0, 1500.0));
    s.pump(Millis(100));
    assert!(!s.is_revealed(panel_id));
    let f = m.frame(&s, Millis(100));
    assert!(f.hotspots.iter().all(|h| !h.tooltip_revealed));
    assert_eq!(f.panel.offset, Vec2::new(50.0, 0.0));

    s.source_mut().scroll_to(Point::new(0.0, 1900.0));
    s.pump(Millis(200));
    assert!(s.is_revealed(panel_id));
    assert!(m.tooltip_targets().iter().all(|t| s.is_revealed(*t)));
}

#[test]
fn unmount_releases_every_registration() {
    let mut s = scheduler();
    let panel = RevealSpec::in_view("p", Rect::ZERO);
    let m = MountedViewfinder::mount(guide_panel(), Some(panel), &mut s, Millis(0));
    assert_eq!(s.len(), 3);
    let vf = m.unmount(&mut s);
    assert!(s.is_empty());
    assert_eq!(vf.hotspots().len(), 2);

    s.source_mut().scroll_to(Point::new(0.0, 1800.0));
    assert!(s.pump(Millis(10)).is_empty());
}

#[test]
fn unsupported_observation_shows_everything() {
    let mut s = RevealScheduler::new(Unsupported);
    let mut m = MountedViewfinder::mount(guide_panel(), None, &mut s, Millis(0));
    let f = m.frame(&s, Millis(0));
    assert!(f.hotspots.iter().all(|h| h.tooltip_revealed));
    assert_eq!(f.hotspots[0].tooltip_state, VisualState::VISIBLE);
    assert_eq!(f.hotspots[1].progress, Some(0.8));
}
