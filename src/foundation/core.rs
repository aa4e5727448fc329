use std::ops::{Add, Sub};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Monotonic page time in milliseconds.
///
/// All scheduling in the crate is expressed against a caller-provided clock, so reveal and
/// loop sampling stay deterministic for a given sequence of `now` values.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    /// Zero milliseconds.
    pub const ZERO: Self = Self(0);

    /// Build from seconds, rounding to the nearest millisecond and flooring negatives at 0.
    pub fn from_secs_f64(secs: f64) -> Self {
        if !secs.is_finite() || secs <= 0.0 {
            return Self::ZERO;
        }
        Self((secs * 1000.0).round() as u64)
    }

    /// Value in seconds.
    pub fn as_secs_f64(self) -> f64 {
        (self.0 as f64) / 1000.0
    }

    /// Saturating difference `self - earlier`.
    pub fn since(self, earlier: Millis) -> Millis {
        Millis(self.0.saturating_sub(earlier.0))
    }
}

impl Add for Millis {
    type Output = Millis;

    fn add(self, rhs: Millis) -> Millis {
        Millis(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Millis {
    type Output = Millis;

    fn sub(self, rhs: Millis) -> Millis {
        self.since(rhs)
    }
}

/// A point expressed as fractions of its container's width and height.
///
/// Components are kept inside `[0, 1]`; construction clamps anything outside so a marker can
/// never be placed off-canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Anchor {
    x: f64,
    y: f64,
}

impl Anchor {
    /// Top-left corner.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };
    /// Box center.
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    /// Build an anchor, clamping each component to `[0, 1]`.
    pub fn new(x: f64, y: f64) -> Self {
        let clamped = Self {
            x: crate::foundation::math::clamp_unit(x),
            y: crate::foundation::math::clamp_unit(y),
        };
        if clamped.x != x || clamped.y != y {
            tracing::warn!(x, y, "hotspot anchor outside [0, 1], clamped to box edge");
        }
        clamped
    }

    /// Build an anchor from CSS-like edge distances.
    ///
    /// `left`/`top` win over `right`/`bottom` when both are given; missing axes default to 0.
    /// `bottom-1/4 right-1/3` resolves to `(2/3, 3/4)`.
    pub fn from_edges(edges: Edges) -> Self {
        let x = match (edges.left, edges.right) {
            (Some(l), _) => l,
            (None, Some(r)) => 1.0 - r,
            (None, None) => 0.0,
        };
        let y = match (edges.top, edges.bottom) {
            (Some(t), _) => t,
            (None, Some(b)) => 1.0 - b,
            (None, None) => 0.0,
        };
        Self::new(x, y)
    }

    /// Horizontal fraction.
    pub fn x(self) -> f64 {
        self.x
    }

    /// Vertical fraction.
    pub fn y(self) -> f64 {
        self.y
    }

    /// Resolve against a container size into container-local pixels.
    pub fn resolve(self, size: Size) -> Point {
        Point::new(self.x * size.width, self.y * size.height)
    }
}

impl<'de> serde::Deserialize<'de> for Anchor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Point { x: f64, y: f64 },
            Edges(Edges),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Point { x, y } => Anchor::new(x, y),
            Repr::Edges(edges) => Anchor::from_edges(edges),
        })
    }
}

/// Fractional distances from the edges of a container.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Edges {
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub bottom: Option<f64>,
    #[serde(default)]
    pub left: Option<f64>,
    #[serde(default)]
    pub right: Option<f64>,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
