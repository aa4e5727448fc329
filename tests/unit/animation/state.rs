use super::*;

#[test]
fn lerp_midpoint_of_fade_up() {
    let hidden = StatePreset::FadeUp.state();
    let mid = VisualState::lerp(&hidden, &VisualState::VISIBLE, 0.5);
    assert_eq!(mid.opacity, 0.5);
    assert_eq!(mid.offset, Vec2::new(0.0, 10.0));
    assert_eq!(mid.scale, 1.0);
}

#[test]
fn normalized_clamps_opacity_and_scale() {
    let s = VisualState {
        opacity: 1.7,
        offset: Vec2::new(1.0, 2.0),
        scale: f64::INFINITY,
    }
    .normalized();
    assert_eq!(s.opacity, 1.0);
    assert_eq!(s.scale, 1.0);
    assert_eq!(s.offset, Vec2::new(1.0, 2.0));
}

#[test]
fn presets_are_hidden_except_visible() {
    for p in [
        StatePreset::Fade,
        StatePreset::FadeUp,
        StatePreset::FadeUpSmall,
        StatePreset::SlideLeft,
        StatePreset::SlideRight,
        StatePreset::SlideItem,
        StatePreset::ZoomIn,
    ] {
        assert_eq!(p.state().opacity, 0.0, "{p:?}");
    }
    assert_eq!(StatePreset::Visible.state(), VisualState::VISIBLE);
}

#[test]
fn partial_json_fills_defaults() {
    let s: VisualState = serde_json::from_str(r#"{"opacity":0.0}"#).unwrap();
    assert_eq!(s.scale, 1.0);
    assert_eq!(s.offset, Vec2::ZERO);
}
