#![forbid(unsafe_code)]

//! Single-precision geometry structs carried by `POINT`, `SIZE` and `RECT`
//! property values.
//!
//! These are plain value types compared field by field; no normalisation
//! happens on construction, so a boxed struct always unboxes to exactly the
//! fields it was built from.

/// A point in two-dimensional space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// An axis-aligned rectangle given by its origin and extent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at `origin` with the given `size`.
    #[inline]
    #[must_use]
    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the rectangle has zero area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Containment test; edges are inclusive on all four sides.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_parts() {
        let r = Rect::new(2.0, 4.0, 6.0, 8.0);
        assert_eq!(r.origin(), Point::new(2.0, 4.0));
        assert_eq!(r.size(), Size::new(6.0, 8.0));
        assert_eq!(r.right(), 8.0);
        assert_eq!(r.bottom(), 12.0);
        assert_eq!(Rect::from_parts(r.origin(), r.size()), r);
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect::new(0.0, 0.0, 10.0, 5.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(10.5, 5.0)));
        assert!(!r.contains(Point::new(-0.1, 1.0)));
    }

    #[test]
    fn empty_detection() {
        assert!(Rect::default().is_empty());
        assert!(Size::new(0.0, 3.0).is_empty());
        assert!(!Rect::new(1.0, 1.0, 1.0, 1.0).is_empty());
    }
}
