//! Planes in Hessian normal form.
//!
//! A [`Plane`] holds a normal `n` and offset `d` such that points on the
//! plane satisfy `n . p + d = 0`. Constructors normalize the normal, so
//! [`Plane::distance`] is a true signed distance.
//!
//! The `classify_*` methods return a signed separation: positive when the
//! whole shape is in front of the plane, negative when it is entirely
//! behind, and `0.0` when it straddles.
//!
//! # Usage
//!
//! ```rust
//! use vx_math::{Plane, Side, Vec3};
//!
//! let ground = Plane::from_point_normal(Vec3::ZERO, Vec3::Y);
//! assert_eq!(ground.classify(Vec3::new(0.0, 2.0, 0.0)), Side::Front);
//! assert_eq!(ground.distance(Vec3::new(5.0, -3.0, 1.0)), -3.0);
//! ```

use crate::interp::EPSILON;
use crate::{BBox, Obb, Vec3};

/// Position of a point relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// On the side the normal points to
    Front,
    /// Opposite to the normal
    Back,
    /// Within tolerance of the plane
    On,
}

/// Plane `normal . p + d = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// Offset
    pub d: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self::new(Vec3::Y, 0.0)
    }
}

impl Plane {
    /// Creates a plane from raw components. The normal is used as given.
    #[inline]
    pub const fn new(normal: Vec3, d: f32) -> Self {
        Self { normal, d }
    }

    /// Plane through `point` with the given normal (normalized here).
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let n = normal.normalize();
        Self::new(n, -n.dot(point))
    }

    /// Plane through three points, front side seen counter-clockwise.
    ///
    /// Returns `None` for collinear points.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Option<Self> {
        let n = (b - a).cross(c - a).try_normalize()?;
        Some(Self::new(n, -n.dot(a)))
    }

    /// Signed distance from the plane.
    #[inline]
    pub fn distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p) + self.d
    }

    /// Side of the plane `p` lies on.
    pub fn classify(&self, p: Vec3) -> Side {
        let dist = self.distance(p);
        if dist > EPSILON {
            Side::Front
        } else if dist < -EPSILON {
            Side::Back
        } else {
            Side::On
        }
    }

    /// Signed separation of an axis-aligned box.
    pub fn classify_box(&self, b: &BBox) -> f32 {
        let h = b.half_size();
        let radius = self.normal.x.abs() * h.x + self.normal.y.abs() * h.y + self.normal.z.abs() * h.z;
        separation(self.distance(b.center()), radius)
    }

    /// Signed separation of an oriented box.
    pub fn classify_obb(&self, b: &Obb) -> f32 {
        let radius = (0..3)
            .map(|i| self.normal.dot(b.axes[i]).abs() * b.extents[i])
            .sum::<f32>();
        separation(self.distance(b.center), radius)
    }

    /// Signed separation of a triangle: the distance of its closest vertex
    /// when all vertices lie on one side, else `0.0`.
    pub fn classify_face(&self, a: Vec3, b: Vec3, c: Vec3) -> f32 {
        let d = [self.distance(a), self.distance(b), self.distance(c)];
        if d.iter().all(|&v| v > 0.0) {
            d.into_iter().fold(f32::INFINITY, f32::min)
        } else if d.iter().all(|&v| v < 0.0) {
            d.into_iter().fold(f32::NEG_INFINITY, f32::max)
        } else {
            0.0
        }
    }

    /// Orthogonal projection of `p` onto the plane.
    #[inline]
    pub fn nearest_point(&self, p: Vec3) -> Vec3 {
        p - self.normal * self.distance(p)
    }

    /// Component of the direction `v` parallel to the plane.
    #[inline]
    pub fn project(&self, v: Vec3) -> Vec3 {
        v - self.normal * self.normal.dot(v)
    }

    /// Rescales so the normal has unit length.
    pub fn normalize(&self) -> Self {
        let len = self.normal.length();
        if len > 0.0 {
            Self::new(self.normal / len, self.d / len)
        } else {
            *self
        }
    }

    /// Same plane facing the other way.
    #[inline]
    pub fn flip(&self) -> Self {
        Self::new(-self.normal, -self.d)
    }
}

fn separation(dist: f32, radius: f32) -> f32 {
    if dist > radius {
        dist - radius
    } else if dist < -radius {
        dist + radius
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mat4;

    #[test]
    fn test_from_points_winding() {
        let p = Plane::from_points(Vec3::ZERO, Vec3::X, Vec3::Y).unwrap();
        assert!(p.normal.abs_diff_eq(Vec3::Z, 1e-6));
        assert!(Plane::from_points(Vec3::ZERO, Vec3::X, Vec3::X * 2.0).is_none());
    }

    #[test]
    fn test_classify_point() {
        let p = Plane::from_point_normal(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(p.d, -1.0);
        assert_eq!(p.classify(Vec3::new(0.0, 3.0, 0.0)), Side::Front);
        assert_eq!(p.classify(Vec3::new(0.0, -3.0, 0.0)), Side::Back);
        assert_eq!(p.classify(Vec3::new(7.0, 1.0, 2.0)), Side::On);
    }

    #[test]
    fn test_classify_box() {
        let p = Plane::from_point_normal(Vec3::ZERO, Vec3::Y);
        let above = BBox::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 3.0, 1.0));
        let below = BBox::new(Vec3::new(0.0, -3.0, 0.0), Vec3::new(1.0, -1.0, 1.0));
        let across = BBox::new(Vec3::splat(-1.0), Vec3::ONE);
        assert_eq!(p.classify_box(&above), 2.0);
        assert_eq!(p.classify_box(&below), -1.0);
        assert_eq!(p.classify_box(&across), 0.0);
    }

    #[test]
    fn test_classify_obb() {
        let p = Plane::from_point_normal(Vec3::ZERO, Vec3::Y);
        let m = Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)) * Mat4::from_rotation_z(std::f32::consts::FRAC_PI_4);
        let obb = Obb::from_bbox(&BBox::new(Vec3::splat(-1.0), Vec3::ONE), &m);
        // rotated unit cube reaches sqrt(2) along Y
        let sep = p.classify_obb(&obb);
        assert!((sep - (2.0 - 2f32.sqrt())).abs() < 1e-5);
    }

    #[test]
    fn test_classify_face() {
        let p = Plane::from_point_normal(Vec3::ZERO, Vec3::Z);
        let z = |v: f32| Vec3::new(0.0, 0.0, v);
        assert_eq!(p.classify_face(z(1.0), z(2.0) + Vec3::X, z(3.0)), 1.0);
        assert_eq!(p.classify_face(z(-1.0), z(-2.0), z(-0.5)), -0.5);
        assert_eq!(p.classify_face(z(-1.0), z(2.0), z(3.0)), 0.0);
    }

    #[test]
    fn test_projection_and_flip() {
        let p = Plane::from_point_normal(Vec3::new(0.0, 0.0, 2.0), Vec3::Z);
        assert_eq!(p.nearest_point(Vec3::new(1.0, 1.0, 5.0)), Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(p.project(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 0.0));
        let f = p.flip();
        assert_eq!(f.distance(Vec3::ZERO), 2.0);
        let raw = Plane::new(Vec3::new(0.0, 0.0, 2.0), -4.0).normalize();
        assert_eq!(raw, Plane::new(Vec3::Z, -2.0));
    }
}
