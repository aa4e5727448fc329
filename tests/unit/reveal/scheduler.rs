use std::{cell::Cell, rc::Rc};

use super::*;
use crate::{
    foundation::core::{Point, Size},
    observe::{GeometryObserver, ManualObserver, Unsupported},
};

fn card(label: &str) -> RevealSpec {
    RevealSpec::in_view(label, Rect::new(0.0, 0.0, 100.0, 100.0))
}

#[test]
fn forty_percent_stays_hidden_at_half_threshold() {
    let mut s = RevealScheduler::new(ManualObserver::new());
    let h = s.register(card("a").threshold(0.5), Millis(0));
    let id = h.target();

    s.source_mut().push(id, 0.4);
    assert!(s.pump(Millis(16)).is_empty());
    assert_eq!(s.phase(id), Some(RevealPhase::Hidden));

    s.source_mut().push(id, 0.5);
    let events = s.pump(Millis(32));
    assert!(matches!(events[0], RevealEvent::Triggered { at: Millis(32), .. }));
    assert!(s.is_revealed(id));
}

#[test]
fn revealed_flag_is_monotonic() {
    let mut s = RevealScheduler::new(ManualObserver::new());
    let id = s.register(card("a"), Millis(0)).target();
    s.source_mut().push(id, 1.0);
    s.pump(Millis(0));

    for (i, ratio) in [0.0, 1.0, 0.0, 0.3, 0.0].into_iter().enumerate() {
        s.source_mut().push(id, ratio);
        s.pump(Millis(100 * i as u64));
        assert!(s.is_revealed(id));
    }
    s.pump(Millis(10_000));
    assert_eq!(s.phase(id), Some(RevealPhase::Revealed));
}

#[test]
fn already_visible_reveals_without_scrolling() {
    let mut s = RevealScheduler::new(GeometryObserver::new(Size::new(800.0, 600.0)));
    let id = s.register(card("hero").threshold(0.5), Millis(0)).target();
    assert!(!s.is_revealed(id));
    let events = s.pump(Millis(1));
    assert!(s.is_revealed(id));
    assert!(matches!(events[0], RevealEvent::Triggered { .. }));
}

#[test]
fn rapid_scroll_past_still_reveals_once() {
    let mut s = RevealScheduler::new(GeometryObserver::new(Size::new(800.0, 600.0)));
    let spec = RevealSpec::in_view("mid", Rect::new(0.0, 2000.0, 100.0, 2100.0)).threshold(1.0);
    let id = s.register(spec, Millis(0)).target();
    s.pump(Millis(0));
    assert!(!s.is_revealed(id));

    s.source_mut().scroll_to(Point::new(0.0, 6000.0));
    let events = s.pump(Millis(16));
    let triggers = events
        .iter()
        .filter(|e| matches!(e, RevealEvent::Triggered { .. }))
        .count();
    assert_eq!(triggers, 1);

    s.source_mut().scroll_to(Point::ORIGIN);
    s.source_mut().scroll_to(Point::new(0.0, 6000.0));
    let again = s.pump(Millis(32));
    assert!(!again.iter().any(|e| matches!(e, RevealEvent::Triggered { .. })));
}

#[test]
fn fling_with_uneven_distance_reveals_full_threshold() {
    let mut s = RevealScheduler::new(GeometryObserver::new(Size::new(800.0, 600.0)));
    let spec = RevealSpec::in_view("tier", Rect::new(0.0, 1777.7, 100.0, 1877.7)).threshold(1.0);
    let id = s.register(spec, Millis(0)).target();
    s.pump(Millis(0));

    s.source_mut().scroll_to(Point::new(0.0, 4694.0));
    s.pump(Millis(16));
    assert!(s.is_revealed(id));
}

#[test]
fn collapsed_element_waits_for_layout() {
    let mut s = RevealScheduler::new(GeometryObserver::new(Size::new(800.0, 600.0)));
    let id = s
        .register(
            RevealSpec::in_view("collapsed", Rect::new(0.0, 10.0, 100.0, 10.0)),
            Millis(0),
        )
        .target();
    s.pump(Millis(0));
    assert!(!s.is_revealed(id));

    s.set_bounds(id, Rect::new(0.0, 10.0, 100.0, 60.0));
    s.pump(Millis(16));
    assert!(s.is_revealed(id));
}

#[test]
fn unregister_before_crossing_fires_nothing() {
    let fired = Rc::new(Cell::new(0u32));
    let mut s = RevealScheduler::new(GeometryObserver::new(Size::new(800.0, 600.0)));
    let spec = RevealSpec::in_view("late", Rect::new(0.0, 3000.0, 100.0, 3100.0));
    let counter = fired.clone();
    let h = s.register_with(spec, Millis(0), move |_| counter.set(counter.get() + 1));
    let id = h.target();

    s.pump(Millis(10));
    s.unregister(h);
    s.source_mut().scroll_to(Point::new(0.0, 2900.0));
    let events = s.pump(Millis(20));

    assert_eq!(fired.get(), 0);
    assert!(events.is_empty());
    assert_eq!(s.phase(id), None);
    assert!(s.is_empty());
}

#[test]
fn unregister_drops_queued_mount_events() {
    let mut s = RevealScheduler::new(ManualObserver::new());
    let h = s.register(RevealSpec::on_mount("badge", Rect::ZERO), Millis(0));
    s.unregister(h);
    assert!(s.pump(Millis(5)).is_empty());
}

#[test]
fn callback_runs_exactly_once() {
    let fired = Rc::new(Cell::new(0u32));
    let mut s = RevealScheduler::new(ManualObserver::new());
    let counter = fired.clone();
    let id = s
        .register_with(card("a"), Millis(0), move |_| counter.set(counter.get() + 1))
        .target();
    for t in 0..5 {
        s.source_mut().push(id, 1.0);
        s.pump(Millis(t * 100));
    }
    assert_eq!(fired.get(), 1);
}

#[test]
fn mount_trigger_fires_at_registration() {
    let mut s = RevealScheduler::new(ManualObserver::new());
    let spec = RevealSpec::on_mount("title", Rect::ZERO)
        .hidden(crate::StatePreset::ZoomIn)
        .delay(Millis(100));
    let id = s.register(spec, Millis(50)).target();
    assert_eq!(
        s.phase(id),
        Some(RevealPhase::Revealing {
            triggered_at: Millis(50)
        })
    );
    assert_eq!(s.visual(id, Millis(100)).unwrap().opacity, 0.0);

    let events = s.pump(Millis(150));
    assert!(matches!(
        events[0],
        RevealEvent::Triggered {
            starts_at: Millis(150),
            ..
        }
    ));
    assert!(matches!(events[1], RevealEvent::Started { at: Millis(150), .. }));
}

#[test]
fn transition_interpolates_and_completes() {
    let mut s = RevealScheduler::new(ManualObserver::new());
    let timing = Timing {
        delay: Millis(0),
        duration: Millis(400),
        ease: crate::Ease::Linear,
    };
    let id = s.register(card("a").timing(timing), Millis(0)).target();
    s.source_mut().push(id, 1.0);
    s.pump(Millis(1000));

    assert_eq!(s.visual(id, Millis(1200)).unwrap().opacity, 0.5);
    let events = s.pump(Millis(1400));
    assert!(matches!(events[0], RevealEvent::Completed { at: Millis(1400), .. }));
    assert_eq!(s.phase(id), Some(RevealPhase::Revealed));
    assert_eq!(s.visual(id, Millis(9999)), Some(VisualState::VISIBLE));
}

#[test]
fn staggered_siblings_start_in_delay_order() {
    let mut s = RevealScheduler::new(ManualObserver::new());
    let parent = s.register(card("list"), Millis(0)).target();
    let mut children = Vec::new();
    for (label, delay) in [("c", 200), ("a", 0), ("b", 100)] {
        let spec = card(label).parent(parent).delay(Millis(delay));
        let id = s.register(spec, Millis(0)).target();
        s.source_mut().push(id, 1.0);
        children.push(id);
    }
    s.pump(Millis(0));
    assert!(children.iter().all(|c| !s.is_revealed(*c)), "gated by parent");

    s.source_mut().push(parent, 1.0);
    let mut starts = Vec::new();
    for t in [0, 50, 100, 150, 200, 250] {
        for e in s.pump(Millis(1000 + t)) {
            if let RevealEvent::Started { label, .. } = e {
                starts.push(label);
            }
        }
    }
    assert_eq!(starts, vec!["list", "a", "b", "c"]);
}

#[test]
fn sibling_with_own_threshold_waits_for_itself() {
    let mut s = RevealScheduler::new(ManualObserver::new());
    let parent = s.register(card("wrapper"), Millis(0)).target();
    let near = s.register(card("near").parent(parent), Millis(0)).target();
    let far = s
        .register(card("far").parent(parent).threshold(0.9), Millis(0))
        .target();

    s.source_mut().push(parent, 1.0);
    s.source_mut().push(near, 0.2);
    s.source_mut().push(far, 0.2);
    s.pump(Millis(0));
    assert!(s.is_revealed(near));
    assert!(!s.is_revealed(far));

    s.source_mut().push(far, 0.95);
    s.pump(Millis(16));
    assert!(s.is_revealed(far));
}

#[test]
fn unsupported_observation_fails_open() {
    let mut s = RevealScheduler::new(Unsupported);
    let id = s
        .register(
            RevealSpec::in_view("offscreen", Rect::new(0.0, 9000.0, 10.0, 9010.0)),
            Millis(0),
        )
        .target();
    assert_eq!(s.phase(id), Some(RevealPhase::Revealed));
    assert_eq!(s.visual(id, Millis(0)), Some(VisualState::VISIBLE));
    assert!(s.transition(id).is_none());
    let events = s.pump(Millis(10));
    assert!(matches!(
        events.as_slice(),
        [RevealEvent::Triggered { at: Millis(0), .. }]
    ));
}

#[test]
fn unsupported_observation_still_runs_callback() {
    let mut s = RevealScheduler::new(Unsupported);
    let fired = Rc::new(Cell::new(0));
    let seen = fired.clone();
    let h = s.register_with(card("x"), Millis(5), move |e| {
        assert!(matches!(
            e,
            RevealEvent::Triggered {
                at: Millis(5),
                starts_at: Millis(5),
                ..
            }
        ));
        seen.set(seen.get() + 1);
    });
    assert_eq!(fired.get(), 1);

    let events = s.pump(Millis(10));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].target(), h.target());
    assert_eq!(s.phase(h.target()), Some(RevealPhase::Revealed));
    assert!(s.pump(Millis(20)).is_empty());
    assert_eq!(fired.get(), 1);
    s.unregister(h);
}

#[test]
fn records_for_unknown_targets_are_ignored() {
    let mut s = RevealScheduler::new(ManualObserver::new());
    let h = s.register(card("a"), Millis(0));
    let id = h.target();
    s.source_mut().push(id, 1.0);
    s.unregister(h);
    s.source_mut().push(id, 1.0);
    assert!(s.pump(Millis(0)).is_empty());
}
