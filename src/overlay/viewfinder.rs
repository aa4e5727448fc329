use crate::{
    foundation::core::{Point, Rect, Size},
    foundation::error::{ViewfinderError, ViewfinderResult},
    overlay::hotspot::{Hotspot, ResolvedHotspot},
};

/// Opaque handle to background imagery supplied by the caller.
///
/// The overlay never fetches, validates or caches it; only presence matters.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct MediaRef(pub String);

/// Call-to-action rendered inside a viewfinder. The launch itself happens elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchKind {
    /// "Launch AR Configurator".
    Configurator,
    /// "Scan for Web AR".
    WebAr,
}

/// Placement slot for a launch control, centered horizontally above the bottom edge.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LaunchSlot {
    pub label: String,
    pub kind: LaunchKind,
    #[serde(default = "LaunchSlot::default_size")]
    pub size: Size,
    #[serde(default = "LaunchSlot::default_bottom_inset")]
    pub bottom_inset: f64,
}

impl LaunchSlot {
    pub fn new(label: impl Into<String>, kind: LaunchKind) -> Self {
        Self {
            label: label.into(),
            kind,
            size: Self::default_size(),
            bottom_inset: Self::default_bottom_inset(),
        }
    }

    pub fn default_size() -> Size {
        Size::new(240.0, 64.0)
    }

    pub fn default_bottom_inset() -> f64 {
        32.0
    }
}

/// A bounded surface simulating a camera feed, with hotspots anchored over it.
///
/// The box size is written only through [`Viewfinder::resize`] / [`Viewfinder::resize_width`]
/// and read by every hotspot at resolution time. Nothing derived from it is cached.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewfinder {
    label: String,
    origin: Point,
    size: Size,
    aspect: f64,
    media: Option<MediaRef>,
    corner_inset: f64,
    hotspots: Vec<Hotspot>,
    launch: Option<LaunchSlot>,
}

impl Viewfinder {
    /// Inset of the decorative corner marks from the box edges.
    pub const DEFAULT_CORNER_INSET: f64 = 32.0;

    /// Build a viewfinder `width` pixels wide keeping `aspect` (width / height).
    pub fn new(label: impl Into<String>, width: f64, aspect: f64) -> ViewfinderResult<Self> {
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(ViewfinderError::layout(format!(
                "viewfinder aspect must be finite and > 0, got {aspect}"
            )));
        }
        if !width.is_finite() || width < 0.0 {
            return Err(ViewfinderError::layout(format!(
                "viewfinder width must be finite and >= 0, got {width}"
            )));
        }
        Ok(Self {
            label: label.into(),
            origin: Point::ORIGIN,
            size: Size::new(width, width / aspect),
            aspect,
            media: None,
            corner_inset: Self::DEFAULT_CORNER_INSET,
            hotspots: Vec::new(),
            launch: None,
        })
    }

    pub fn square(label: impl Into<String>, width: f64) -> ViewfinderResult<Self> {
        Self::new(label, width, 1.0)
    }

    pub fn at(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_media(mut self, media: MediaRef) -> Self {
        self.media = Some(media);
        self
    }

    pub fn with_hotspot(mut self, hotspot: Hotspot) -> Self {
        self.hotspots.push(hotspot);
        self
    }

    pub fn with_launch(mut self, launch: LaunchSlot) -> Self {
        self.launch = Some(launch);
        self
    }

    pub fn with_corner_inset(mut self, inset: f64) -> Self {
        self.corner_inset = inset.max(0.0);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    /// Document-space bounds.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    pub fn media(&self) -> Option<&MediaRef> {
        self.media.as_ref()
    }

    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    pub fn launch(&self) -> Option<&LaunchSlot> {
        self.launch.as_ref()
    }

    pub fn move_to(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Set the rendered size directly. Non-finite or negative extents collapse to 0.
    pub fn resize(&mut self, size: Size) {
        let fix = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        self.size = Size::new(fix(size.width), fix(size.height));
    }

    /// Set the width, deriving the height from the aspect ratio.
    pub fn resize_width(&mut self, width: f64) {
        self.resize(Size::new(width, width / self.aspect));
    }

    /// Decorative corner marks, container-local: top-left, top-right, bottom-left,
    /// bottom-right.
    pub fn corners(&self) -> [Point; 4] {
        let i = self.corner_inset.min(self.size.width / 2.0).min(self.size.height / 2.0);
        let (w, h) = (self.size.width, self.size.height);
        [
            Point::new(i, i),
            Point::new(w - i, i),
            Point::new(i, h - i),
            Point::new(w - i, h - i),
        ]
    }

    /// Container-local rectangle of the launch slot, if any.
    pub fn launch_rect(&self) -> Option<Rect> {
        let slot = self.launch.as_ref()?;
        let x = (self.size.width - slot.size.width) / 2.0;
        let y = self.size.height - slot.bottom_inset - slot.size.height;
        Some(Rect::from_origin_size(Point::new(x, y), slot.size))
    }

    /// Container-local placement of every hotspot at the current size.
    pub fn resolve(&self) -> Vec<ResolvedHotspot> {
        self.hotspots.iter().map(|h| h.resolve(self.size)).collect()
    }

    /// Document-space placement of every hotspot at the current size and origin.
    pub fn resolve_in_document(&self) -> Vec<ResolvedHotspot> {
        self.resolve()
            .into_iter()
            .map(|r| r.translated(self.origin))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/viewfinder.rs"]
mod tests;
