use super::*;
use crate::page::preset::ar_suite;

fn triggered(events: &[RevealEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| match e {
            RevealEvent::Triggered { label, .. } => Some(label.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn hero_reveals_on_mount_in_delay_order() {
    let mut show = Showcase::mount(&ar_suite(), Millis(0)).unwrap();
    let events = show.advance(Millis(0));
    assert_eq!(
        triggered(&events),
        ["hero/badge", "hero/title", "hero/subtitle", "configurator"]
    );

    let title = show.element("hero/title").unwrap();
    assert_eq!(
        show.scheduler().transition_begins_at(title),
        Some(Millis(100))
    );
    assert!(!show.scheduler().is_revealed(show.element("guides/3D Quick Start Visuals").unwrap()));
}

#[test]
fn fast_fling_reveals_everything_passed() {
    let mut show = Showcase::mount(&ar_suite(), Millis(0)).unwrap();
    show.advance(Millis(0));
    show.scroll_to(3000.0, Millis(16));

    let frame = show.snapshot(Millis(5000));
    assert!(frame.elements.iter().all(|e| e.revealed));
    assert!(frame.elements.iter().all(|e| e.state == VisualState::VISIBLE));
    for vf in &frame.viewfinders {
        assert_eq!(vf.panel, VisualState::VISIBLE);
        assert!(vf.hotspots.iter().all(|h| h.tooltip_revealed));
    }
    assert_eq!(frame.scroll, 3000.0);
}

#[test]
fn guide_panel_gates_its_tooltips() {
    let mut show = Showcase::mount(&ar_suite(), Millis(0)).unwrap();
    show.advance(Millis(0));
    let events = show.scroll_to(1600.0, Millis(100));
    let labels = triggered(&events);

    let panel = labels.iter().position(|l| *l == "guide").unwrap();
    let fuel = labels.iter().position(|l| *l == "guide/fuel-line").unwrap();
    let heat = labels.iter().position(|l| *l == "guide/heat-sync").unwrap();
    assert!(panel < fuel && panel < heat);
}

#[test]
fn heat_gauge_fills_after_reveal() {
    let mut show = Showcase::mount(&ar_suite(), Millis(0)).unwrap();
    show.advance(Millis(0));
    show.scroll_to(1600.0, Millis(100));

    let guide = |f: &ShowcaseFrame| {
        f.viewfinders
            .iter()
            .find(|v| v.label == "guide")
            .map(|v| v.hotspots[1].progress)
            .unwrap()
    };
    assert_eq!(guide(&show.snapshot(Millis(100))), Some(0.0));
    let late = guide(&show.snapshot(Millis(2000))).unwrap();
    assert!((late - 0.8).abs() < 1e-9);
}

#[test]
fn unsupported_observer_renders_revealed() {
    let mut page = ar_suite();
    page.observer = ObserverKind::Unsupported;
    let mut show = Showcase::mount(&page, Millis(0)).unwrap();
    let events = show.advance(Millis(0));
    assert_eq!(triggered(&events).len(), events.len());
    assert!(triggered(&events).contains(&"hero/title"));

    let frame = show.snapshot(Millis(0));
    assert!(frame.elements.iter().all(|e| e.revealed && e.state == VisualState::VISIBLE));
    let guide = frame.viewfinders.iter().find(|v| v.label == "guide").unwrap();
    assert_eq!(guide.hotspots[1].progress, Some(0.8));
}

#[test]
fn relayout_moves_markers_with_the_box() {
    let mut show = Showcase::mount(&ar_suite(), Millis(0)).unwrap();
    show.relayout_viewfinder("guide", Point::new(0.0, 1600.0), 272.0)
        .unwrap();
    let frame = show.snapshot(Millis(0));
    let guide = frame.viewfinders.iter().find(|v| v.label == "guide").unwrap();
    let heat = guide.hotspots[1].marker;
    assert!((heat.x - 272.0 * 2.0 / 3.0).abs() < 1e-9);
    assert!((heat.y - (1600.0 + 272.0 * 0.75)).abs() < 1e-9);

    assert!(matches!(
        show.relayout_viewfinder("missing", Point::ORIGIN, 100.0),
        Err(ViewfinderError::Layout(_))
    ));
}

#[test]
fn invalid_page_does_not_mount() {
    let mut page = ar_suite();
    page.elements.push(page.elements[0].clone());
    assert!(matches!(
        Showcase::mount(&page, Millis(0)),
        Err(ViewfinderError::Config(_))
    ));
}

#[test]
fn resize_reports_newly_visible_content() {
    let mut show = Showcase::mount(&ar_suite(), Millis(0)).unwrap();
    show.advance(Millis(0));
    let events = show.resize_viewport(Size::new(1280.0, 1000.0), Millis(50));
    assert!(triggered(&events).contains(&"configurators/Real-time Color & Spec Swaps"));
}

#[test]
fn unmount_after_partial_reveal() {
    let mut show = Showcase::mount(&ar_suite(), Millis(0)).unwrap();
    show.advance(Millis(0));
    show.scroll_to(900.0, Millis(16));
    assert_eq!(show.title(), "Namespace Systems AR Suite");
    show.unmount();
}
