use crate::foundation::{core::Vec2, math::lerp};

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        lerp(*a, *b, t)
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
    }
}

/// Visual parameters of an animated element.
///
/// `offset` is a translation in pixels relative to the element's laid-out position; `scale`
/// is uniform around the element's center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VisualState {
    pub opacity: f64,
    pub offset: Vec2,
    pub scale: f64,
}

impl Default for VisualState {
    fn default() -> Self {
        Self::VISIBLE
    }
}

impl VisualState {
    /// Fully visible, untransformed.
    pub const VISIBLE: Self = Self {
        opacity: 1.0,
        offset: Vec2::ZERO,
        scale: 1.0,
    };

    /// Transparent at rest position.
    pub fn faded() -> Self {
        Self {
            opacity: 0.0,
            ..Self::VISIBLE
        }
    }

    /// Transparent and shifted by `(dx, dy)`.
    pub fn faded_offset(dx: f64, dy: f64) -> Self {
        Self {
            opacity: 0.0,
            offset: Vec2::new(dx, dy),
            scale: 1.0,
        }
    }

    /// Transparent and scaled by `scale`.
    pub fn faded_scaled(scale: f64) -> Self {
        Self {
            opacity: 0.0,
            offset: Vec2::ZERO,
            scale,
        }
    }

    /// Copy with opacity clamped to `[0, 1]` and a non-negative scale.
    pub fn normalized(self) -> Self {
        Self {
            opacity: crate::foundation::math::clamp_unit(self.opacity),
            offset: self.offset,
            scale: if self.scale.is_finite() {
                self.scale.max(0.0)
            } else {
                1.0
            },
        }
    }
}

impl Lerp for VisualState {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            opacity: <f64 as Lerp>::lerp(&a.opacity, &b.opacity, t),
            offset: <Vec2 as Lerp>::lerp(&a.offset, &b.offset, t),
            scale: <f64 as Lerp>::lerp(&a.scale, &b.scale, t),
        }
    }
}

/// Named hidden states used by the showcase page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatePreset {
    Visible,
    Fade,
    /// Rise 20px while fading in.
    FadeUp,
    /// Rise 10px while fading in (tooltip cards).
    FadeUpSmall,
    /// Enter from 50px to the left.
    SlideLeft,
    /// Enter from 50px to the right.
    SlideRight,
    /// Enter from 20px to the left (feature list items).
    SlideItem,
    /// Grow from 95%.
    ZoomIn,
}

impl StatePreset {
    pub fn state(self) -> VisualState {
        match self {
            Self::Visible => VisualState::VISIBLE,
            Self::Fade => VisualState::faded(),
            Self::FadeUp => VisualState::faded_offset(0.0, 20.0),
            Self::FadeUpSmall => VisualState::faded_offset(0.0, 10.0),
            Self::SlideLeft => VisualState::faded_offset(-50.0, 0.0),
            Self::SlideRight => VisualState::faded_offset(50.0, 0.0),
            Self::SlideItem => VisualState::faded_offset(-20.0, 0.0),
            Self::ZoomIn => VisualState::faded_scaled(0.95),
        }
    }
}

impl From<StatePreset> for VisualState {
    fn from(value: StatePreset) -> Self {
        value.state()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
