//! Axis-aligned bounding boxes.
//!
//! [`BBox`] stores its min and max corners. The empty box ([`BBox::EMPTY`])
//! has inverted infinite corners so that merging any point into it yields
//! a degenerate box around that point.
//!
//! Corners returned by [`BBox::vertices`] are indexed by bit: bit 0 selects
//! max X, bit 1 max Y and bit 2 max Z.
//!
//! # Usage
//!
//! ```rust
//! use vx_math::{BBox, Containment, Mat4, Vec3};
//!
//! let mut b = BBox::EMPTY;
//! b.merge_point(Vec3::new(-1.0, 0.0, 2.0));
//! b.merge_point(Vec3::new(3.0, 1.0, 0.0));
//! assert_eq!(b.size(), Vec3::new(4.0, 1.0, 2.0));
//!
//! let moved = b.transform(&Mat4::from_translation(Vec3::X));
//! assert_eq!(moved.min, Vec3::new(0.0, 0.0, 0.0));
//! assert_eq!(b.classify_box(&moved), Containment::Intersect);
//! ```

use crate::{Mat4, Vec3, Vec4};
use vx_core::Rect;

/// Relation of one volume to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Containment {
    /// No overlap
    Outside,
    /// Partial overlap
    Intersect,
    /// Fully contained
    Inside,
}

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Default for BBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Screen-space footprint of a box, see [`BBox::project_2d`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenProjection {
    /// Bounding rectangle of the projected corners in front of the eye
    pub extents: Rect,
    /// Union of the clip flags of all corners
    pub or_clip: u32,
    /// Intersection of the clip flags of all corners; non-zero means the
    /// box is entirely outside one clip plane
    pub and_clip: u32,
}

impl BBox {
    /// Point is below `min.x`.
    pub const OUT_X_MIN: u32 = 1;
    /// Point is above `max.x`.
    pub const OUT_X_MAX: u32 = 2;
    /// Point is below `min.y`.
    pub const OUT_Y_MIN: u32 = 4;
    /// Point is above `max.y`.
    pub const OUT_Y_MAX: u32 = 8;
    /// Point is below `min.z`.
    pub const OUT_Z_MIN: u32 = 16;
    /// Point is above `max.z`.
    pub const OUT_Z_MAX: u32 = 32;

    /// Box that contains nothing; the identity for [`BBox::merge`].
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Creates a box from its corners.
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tightest box around `points`; [`BBox::EMPTY`] for no points.
    pub fn from_points(points: &[Vec3]) -> Self {
        points.iter().fold(Self::EMPTY, |mut b, &p| {
            b.merge_point(p);
            b
        })
    }

    /// Box from center and half extents.
    #[inline]
    pub fn from_center_extents(center: Vec3, half: Vec3) -> Self {
        Self::new(center - half, center + half)
    }

    /// Whether `min <= max` on every axis.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Grows the box to include `p`.
    #[inline]
    pub fn merge_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Grows the box to include `other`.
    #[inline]
    pub fn merge(&mut self, other: &Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Half edge lengths.
    #[inline]
    pub fn half_size(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Whether `p` is inside or on the box.
    #[inline]
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.classify(p) == 0
    }

    /// Whether `other` lies entirely inside this box.
    #[inline]
    pub fn contains_box(&self, other: &Self) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.min.z >= self.min.z
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
            && other.max.z <= self.max.z
    }

    /// Whether the two boxes touch or overlap.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Outcode of `p`: a combination of the `OUT_*` flags, zero when inside.
    pub fn classify(&self, p: Vec3) -> u32 {
        let mut code = 0;
        if p.x < self.min.x {
            code |= Self::OUT_X_MIN;
        } else if p.x > self.max.x {
            code |= Self::OUT_X_MAX;
        }
        if p.y < self.min.y {
            code |= Self::OUT_Y_MIN;
        } else if p.y > self.max.y {
            code |= Self::OUT_Y_MAX;
        }
        if p.z < self.min.z {
            code |= Self::OUT_Z_MIN;
        } else if p.z > self.max.z {
            code |= Self::OUT_Z_MAX;
        }
        code
    }

    /// Trivial rejection of the segment `a..b`: true when both end points
    /// lie outside the same face.
    #[inline]
    pub fn segment_outside(&self, a: Vec3, b: Vec3) -> bool {
        self.classify(a) & self.classify(b) != 0
    }

    /// How `other` relates to this box.
    pub fn classify_box(&self, other: &Self) -> Containment {
        if !self.intersects(other) {
            Containment::Outside
        } else if self.contains_box(other) {
            Containment::Inside
        } else {
            Containment::Intersect
        }
    }

    /// The eight corners.
    pub fn vertices(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 != 0 { self.max.x } else { self.min.x },
                if i & 2 != 0 { self.max.y } else { self.min.y },
                if i & 4 != 0 { self.max.z } else { self.min.z },
            )
        })
    }

    /// Axis-aligned bounds of this box transformed by `m` (Arvo's method).
    pub fn transform(&self, m: &Mat4) -> Self {
        let t = m.translation();
        let mut out = Self::new(t, t);
        for col in 0..3 {
            let axis = m.axis(col);
            for row in 0..3 {
                let a = axis[row] * self.min[col];
                let b = axis[row] * self.max[col];
                out.min[row] += a.min(b);
                out.max[row] += a.max(b);
            }
        }
        out
    }

    /// Sets this box to `local` transformed by `m`.
    #[inline]
    pub fn transform_from(&mut self, local: &Self, m: &Mat4) {
        *self = local.transform(m);
    }

    /// Overlapping region, `None` when disjoint.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let b = Self::new(self.min.max(other.min), self.max.min(other.max));
        b.is_valid().then_some(b)
    }

    /// Projects the corners through `view_proj` into `viewport`.
    ///
    /// Clip flags follow [`BBox`] outcodes: X/Y against `[-w, w]`, Z against
    /// `[0, w]`. Only corners in front of the eye (`w > 0`) contribute to
    /// the extents.
    pub fn project_2d(&self, view_proj: &Mat4, viewport: &Rect) -> ScreenProjection {
        let mut or_clip = 0;
        let mut and_clip = u32::MAX;
        let mut extents: Option<Rect> = None;
        let half_w = viewport.width() * 0.5;
        let half_h = viewport.height() * 0.5;

        for v in self.vertices() {
            let c = view_proj.transform_vec4(Vec4::from_point(v));
            let flags = clip_flags(c);
            or_clip |= flags;
            and_clip &= flags;
            if c.w > 0.0 {
                let sx = viewport.left + (c.x / c.w + 1.0) * half_w;
                let sy = viewport.top + (1.0 - c.y / c.w) * half_h;
                let point = Rect::new(sx, sy, sx, sy);
                extents = Some(match extents {
                    Some(r) => r.merge(&point),
                    None => point,
                });
            }
        }

        ScreenProjection {
            extents: extents.unwrap_or_default(),
            or_clip,
            and_clip,
        }
    }
}

fn clip_flags(c: Vec4) -> u32 {
    let mut flags = 0;
    if c.x < -c.w {
        flags |= BBox::OUT_X_MIN;
    }
    if c.x > c.w {
        flags |= BBox::OUT_X_MAX;
    }
    if c.y < -c.w {
        flags |= BBox::OUT_Y_MIN;
    }
    if c.y > c.w {
        flags |= BBox::OUT_Y_MAX;
    }
    if c.z < 0.0 {
        flags |= BBox::OUT_Z_MIN;
    }
    if c.z > c.w {
        flags |= BBox::OUT_Z_MAX;
    }
    flags
}
