//! Value types for rectangles, axes and texture dimensions.
//!
//! [`UiRect`] models a stretchable UI transform: the resolved size on each axis
//! is the parent's size scaled by the anchor span, plus a size delta.
//!
//! ```
//! use texfit::{Axis, Size, UiRect};
//!
//! let mut rect = UiRect::filling(Size::new(200.0, 100.0));
//! rect.set_size_with_current_anchors(Axis::Horizontal, 100.0);
//! assert_eq!(rect.size(), Size::new(100.0, 100.0));
//! ```

/// One of the two layout axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left-right (width).
    Horizontal,
    /// Top-bottom (height).
    Vertical,
}

/// Width × height in layout units.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Extent along `axis`.
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Copy with the extent along `axis` replaced.
    pub fn with(mut self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
        self
    }

    /// Whether both extents are strictly positive. NaN counts as degenerate.
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Height divided by width.
    pub fn aspect(&self) -> f32 {
        self.height / self.width
    }
}

/// A 2D vector used for anchors and size deltas.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.x = value,
            Axis::Vertical => self.y = value,
        }
    }
}

/// Texture dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl TextureSize {
    /// Create a new texture size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Rectangle anchored inside a parent.
///
/// Only size is modelled; position within the parent is left to the host.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UiRect {
    /// Resolved size of the parent rectangle.
    pub parent: Size,
    /// Lower anchor as a fraction of the parent (0.0–1.0 per axis).
    pub anchor_min: Vec2,
    /// Upper anchor as a fraction of the parent (0.0–1.0 per axis).
    pub anchor_max: Vec2,
    /// Size added to the anchored span.
    pub size_delta: Vec2,
}

impl UiRect {
    /// Rect with explicit anchors and size delta.
    pub const fn new(parent: Size, anchor_min: Vec2, anchor_max: Vec2, size_delta: Vec2) -> Self {
        Self {
            parent,
            anchor_min,
            anchor_max,
            size_delta,
        }
    }

    /// Rect stretched to fill `parent` exactly.
    pub const fn filling(parent: Size) -> Self {
        Self::new(parent, Vec2::ZERO, Vec2::ONE, Vec2::ZERO)
    }

    /// Rect with collapsed anchors and a fixed size.
    pub const fn fixed(parent: Size, size: Size) -> Self {
        Self::new(parent, Vec2::ZERO, Vec2::ZERO, Vec2::new(size.width, size.height))
    }

    /// Resolved size, clamped at zero on each axis.
    pub fn size(&self) -> Size {
        Size::new(self.extent(Axis::Horizontal), self.extent(Axis::Vertical))
    }

    fn extent(&self, axis: Axis) -> f32 {
        let span = self.anchor_max.along(axis) - self.anchor_min.along(axis);
        let v = self.parent.along(axis) * span + self.size_delta.along(axis);
        if v > 0.0 { v } else { 0.0 }
    }

    /// Whether the rect is anchored to fill its parent with no size delta.
    pub fn is_stretched(&self) -> bool {
        self.anchor_min == Vec2::ZERO
            && self.anchor_max == Vec2::ONE
            && self.size_delta == Vec2::ZERO
    }

    /// Anchor to the parent's corners and clear the size delta.
    pub fn stretch_to_parent(&mut self) {
        self.anchor_min = Vec2::ZERO;
        self.anchor_max = Vec2::ONE;
        self.size_delta = Vec2::ZERO;
    }

    /// Resize along one axis, keeping the current anchors.
    ///
    /// Adjusts the size delta so the resolved extent on `axis` equals `size`.
    pub fn set_size_with_current_anchors(&mut self, axis: Axis, size: f32) {
        let span = self.anchor_max.along(axis) - self.anchor_min.along(axis);
        let anchored = self.parent.along(axis) * span;
        self.size_delta.set(axis, size - anchored);
    }

    /// Let width control height: height becomes `width / aspect_ratio`,
    /// where `aspect_ratio` is width / height. Non-positive ratios are ignored.
    pub fn fit_height_to_width(&mut self, aspect_ratio: f32) {
        if !(aspect_ratio > 0.0 && aspect_ratio.is_finite()) {
            return;
        }
        let width = self.size().width;
        self.set_size_with_current_anchors(Axis::Vertical, width / aspect_ratio);
    }
}
