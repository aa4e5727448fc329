use super::*;
use crate::{
    foundation::core::{Anchor, Vec2},
    overlay::hotspot::Tooltip,
};

fn guide(width: f64) -> Viewfinder {
    Viewfinder::square("guide", width)
        .unwrap()
        .with_hotspot(Hotspot::new(
            "a",
            Anchor::new(0.25, 0.33),
            Tooltip::new("Check Fuel Line"),
        ))
}

#[test]
fn anchors_scale_with_resize() {
    let mut vf = guide(400.0);
    let before = vf.resolve()[0].marker;
    assert!((before.x - 100.0).abs() < 1e-9);
    assert!((before.y - 132.0).abs() < 1e-9);

    vf.resize(Size::new(800.0, 800.0));
    let after = vf.resolve()[0].marker;
    assert!((after.x - 200.0).abs() < 1e-9);
    assert!((after.y - 264.0).abs() < 1e-9);

    vf.resize_width(400.0);
    assert_eq!(vf.resolve()[0].marker, before);
}

#[test]
fn aspect_ratio_drives_height() {
    let mut vf = Viewfinder::new("wide", 1600.0, 16.0 / 9.0).unwrap();
    assert_eq!(vf.size(), Size::new(1600.0, 900.0));
    vf.resize_width(800.0);
    assert_eq!(vf.size(), Size::new(800.0, 450.0));
}

#[test]
fn invalid_geometry_is_rejected() {
    assert!(Viewfinder::new("x", 100.0, 0.0).is_err());
    assert!(Viewfinder::new("x", f64::NAN, 1.0).is_err());
    let mut vf = Viewfinder::square("x", 10.0).unwrap();
    vf.resize(Size::new(-5.0, f64::INFINITY));
    assert_eq!(vf.size(), Size::ZERO);
}

#[test]
fn corners_sit_inside_the_box() {
    let vf = Viewfinder::square("c", 400.0).unwrap();
    assert_eq!(
        vf.corners(),
        [
            Point::new(32.0, 32.0),
            Point::new(368.0, 32.0),
            Point::new(32.0, 368.0),
            Point::new(368.0, 368.0),
        ]
    );
    let tiny = Viewfinder::square("t", 20.0).unwrap();
    assert_eq!(tiny.corners()[0], Point::new(10.0, 10.0));
}

#[test]
fn launch_slot_is_bottom_centered() {
    let vf = Viewfinder::square("cfg", 400.0)
        .unwrap()
        .with_launch(LaunchSlot::new("Launch AR Configurator", LaunchKind::Configurator));
    let r = vf.launch_rect().unwrap();
    assert_eq!(r, Rect::new(80.0, 304.0, 320.0, 368.0));
    assert!(guide(400.0).launch_rect().is_none());
}

#[test]
fn document_resolution_follows_origin() {
    let vf = guide(400.0).at(Point::new(50.0, 2000.0));
    let local = vf.resolve()[0];
    let doc = vf.resolve_in_document()[0];
    assert!(((doc.marker - local.marker) - Vec2::new(50.0, 2000.0)).hypot() < 1e-9);
    assert_eq!(vf.bounds(), Rect::new(50.0, 2000.0, 450.0, 2400.0));
}

#[test]
fn media_is_optional() {
    let vf = guide(100.0);
    assert!(vf.media().is_none());
    let vf = vf.with_media(MediaRef("https://picsum.photos/seed/guide/800/800".into()));
    assert!(vf.media().is_some());
}
