//! Floating point 2D rectangles.
//!
//! [`Rect`] stores its four edges. Coordinates follow the screen
//! convention used by image code:
//!
//! ```text
//! (left,top) ──────► X
//!   │
//!   │   ┌──────────┐
//!   │   │   Rect   │
//!   │   └──────────┘ (right,bottom)
//!   ▼
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use vx_core::Rect;
//!
//! let a = Rect::from_size(10.0, 20.0, 100.0, 50.0);
//! assert_eq!(a.right, 110.0);
//!
//! let b = Rect::new(50.0, 40.0, 200.0, 100.0);
//! let overlap = a.intersect(&b).unwrap();
//! assert_eq!(overlap.width(), 60.0);
//! ```

/// Axis-aligned rectangle defined by its edges.
///
/// # Invariants
///
/// A normalized rectangle has `left <= right` and `top <= bottom`. Call
/// [`Rect::normalize`] after building one from unordered corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Rect {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Right edge
    pub right: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl Rect {
    /// Creates a rectangle from its edges.
    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rectangle from its top-left corner and size.
    #[inline]
    pub fn from_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Creates a rectangle centered on `(cx, cy)` with the given half sizes.
    #[inline]
    pub fn from_center(cx: f32, cy: f32, half_width: f32, half_height: f32) -> Self {
        Self::new(cx - half_width, cy - half_height, cx + half_width, cy + half_height)
    }

    /// Width (`right - left`).
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height (`bottom - top`).
    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Area.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        ((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    /// Whether the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Moves the rectangle by `(dx, dy)`.
    #[inline]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    /// Grows the rectangle by `dx` on the left and right and `dy` on the top and bottom.
    ///
    /// Negative values shrink it.
    #[inline]
    pub fn inflate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.left - dx, self.top - dy, self.right + dx, self.bottom + dy)
    }

    /// Swaps inverted edges so that `left <= right` and `top <= bottom`.
    pub fn normalize(&self) -> Self {
        Self::new(
            self.left.min(self.right),
            self.top.min(self.bottom),
            self.left.max(self.right),
            self.top.max(self.bottom),
        )
    }

    /// Smallest rectangle containing both rectangles.
    pub fn merge(&self, other: &Rect) -> Rect {
        Rect::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Overlapping region, or `None` when the rectangles do not overlap.
    ///
    /// Rectangles that only share an edge do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let r = Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        if r.is_empty() { None } else { Some(r) }
    }

    /// Whether the point lies inside (edges included).
    #[inline]
    pub fn is_inside(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Whether this rectangle lies entirely inside `other`.
    #[inline]
    pub fn is_contained(&self, other: &Rect) -> bool {
        self.left >= other.left
            && self.right <= other.right
            && self.top >= other.top
            && self.bottom <= other.bottom
    }

    /// Whether the rectangles overlap.
    #[inline]
    pub fn is_overlapping(&self, other: &Rect) -> bool {
        self.intersect(other).is_some()
    }

    /// Clamps a point to the rectangle.
    #[inline]
    pub fn clip(&self, x: f32, y: f32) -> (f32, f32) {
        (x.clamp(self.left, self.right), y.clamp(self.top, self.bottom))
    }

    /// Maps a point expressed relative to `self` into `dest`.
    ///
    /// The corners of `self` land on the corners of `dest`. Degenerate
    /// source axes map to the destination edge.
    pub fn transform_to(&self, dest: &Rect, x: f32, y: f32) -> (f32, f32) {
        let w = self.width();
        let h = self.height();
        let u = if w != 0.0 { (x - self.left) / w } else { 0.0 };
        let v = if h != 0.0 { (y - self.top) / h } else { 0.0 };
        (dest.left + u * dest.width(), dest.top + v * dest.height())
    }

    /// Maps a whole rectangle relative to `self` into `dest`.
    pub fn transform_rect(&self, dest: &Rect, r: &Rect) -> Rect {
        let (l, t) = self.transform_to(dest, r.left, r.top);
        let (rr, b) = self.transform_to(dest, r.right, r.bottom);
        Rect::new(l, t, rr, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_and_center() {
        let r = Rect::from_size(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
        assert_eq!(r.center(), (60.0, 45.0));
        assert_eq!(r.area(), 5000.0);
    }

    #[test]
    fn test_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 150.0, 150.0);
        assert_eq!(a.intersect(&b), Some(Rect::new(50.0, 50.0, 100.0, 100.0)));

        let c = Rect::new(100.0, 0.0, 200.0, 100.0);
        assert!(a.intersect(&c).is_none());
    }

    #[test]
    fn test_merge_and_contain() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, -5.0, 20.0, 5.0);
        let m = a.merge(&b);
        assert_eq!(m, Rect::new(0.0, -5.0, 20.0, 10.0));
        assert!(a.is_contained(&m));
        assert!(!m.is_contained(&a));
    }

    #[test]
    fn test_normalize() {
        let r = Rect::new(10.0, 10.0, 0.0, 0.0).normalize();
        assert_eq!(r, Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_transform_to() {
        let src = Rect::new(0.0, 0.0, 10.0, 10.0);
        let dst = Rect::new(100.0, 100.0, 120.0, 140.0);
        assert_eq!(src.transform_to(&dst, 5.0, 5.0), (110.0, 120.0));
        assert_eq!(src.transform_to(&dst, 10.0, 0.0), (120.0, 100.0));
    }

    #[test]
    fn test_inflate_and_clip() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).inflate(2.0, 1.0);
        assert_eq!(r, Rect::new(-2.0, -1.0, 12.0, 11.0));
        assert_eq!(r.clip(20.0, -5.0), (12.0, -1.0));
        assert!(r.is_inside(0.0, 0.0));
    }
}
