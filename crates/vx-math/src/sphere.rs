//! Bounding spheres.

use crate::{BBox, Vec3};

/// Sphere given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sphere {
    /// Center
    pub center: Vec3,
    /// Radius
    pub radius: f32,
}

impl Sphere {
    /// Creates a sphere.
    #[inline]
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Smallest sphere around the box (through its corners).
    pub fn from_box(b: &BBox) -> Self {
        Self::new(b.center(), b.half_size().length())
    }

    /// Whether `p` is inside or on the sphere.
    #[inline]
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.center.distance_squared(p) <= self.radius * self.radius
    }

    /// Whether `other` lies entirely inside this sphere.
    pub fn contains_sphere(&self, other: &Self) -> bool {
        let gap = self.radius - other.radius;
        gap >= 0.0 && self.center.distance_squared(other.center) <= gap * gap
    }

    /// Whether the two spheres touch or overlap.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        let r = self.radius + other.radius;
        self.center.distance_squared(other.center) <= r * r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containment() {
        let big = Sphere::new(Vec3::ZERO, 5.0);
        let small = Sphere::new(Vec3::new(3.0, 0.0, 0.0), 2.0);
        let poking = Sphere::new(Vec3::new(4.0, 0.0, 0.0), 2.0);
        assert!(big.contains_sphere(&small));
        assert!(!big.contains_sphere(&poking));
        assert!(!small.contains_sphere(&big));
        assert!(big.contains_point(Vec3::new(0.0, 5.0, 0.0)));
        assert!(!big.contains_point(Vec3::new(0.0, 5.1, 0.0)));
    }

    #[test]
    fn test_intersects() {
        let a = Sphere::new(Vec3::ZERO, 1.0);
        assert!(a.intersects(&Sphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0)));
        assert!(!a.intersects(&Sphere::new(Vec3::new(2.1, 0.0, 0.0), 1.0)));
    }

    #[test]
    fn test_from_box() {
        let s = Sphere::from_box(&BBox::new(Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0)));
        assert_eq!(s.center, Vec3::ONE);
        assert!((s.radius - 3f32.sqrt()).abs() < 1e-6);
    }
}
