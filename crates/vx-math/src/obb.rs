//! Oriented bounding boxes.

use crate::{BBox, Mat4, Vec3};

/// Box with arbitrary orientation: a center, three orthonormal axes and
/// the half extents along them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    /// Center in world space
    pub center: Vec3,
    /// Unit axes
    pub axes: [Vec3; 3],
    /// Half extents along each axis
    pub extents: Vec3,
}

impl Default for Obb {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::AXES, Vec3::ZERO)
    }
}

impl Obb {
    /// Creates an oriented box.
    #[inline]
    pub const fn new(center: Vec3, axes: [Vec3; 3], extents: Vec3) -> Self {
        Self { center, axes, extents }
    }

    /// World-space box of a local box placed by `m`.
    ///
    /// Scale in `m` is moved into the extents; shear is not supported.
    pub fn from_bbox(b: &BBox, m: &Mat4) -> Self {
        let half = b.half_size();
        let mut axes = Vec3::AXES;
        let mut extents = Vec3::ZERO;
        for i in 0..3 {
            let axis = m.axis(i);
            let len = axis.length();
            if len > 0.0 {
                axes[i] = axis / len;
            }
            extents[i] = half[i] * len;
        }
        Self::new(m.transform_point(b.center()), axes, extents)
    }

    /// The eight corners, ordered like [`BBox::vertices`].
    pub fn vertices(&self) -> [Vec3; 8] {
        let [ax, ay, az] = self.axes;
        let e = self.extents;
        std::array::from_fn(|i| {
            let sx = if i & 1 != 0 { e.x } else { -e.x };
            let sy = if i & 2 != 0 { e.y } else { -e.y };
            let sz = if i & 4 != 0 { e.z } else { -e.z };
            self.center + ax * sx + ay * sy + az * sz
        })
    }

    /// Whether `p` is inside or on the box.
    pub fn contains_point(&self, p: Vec3) -> bool {
        let d = p - self.center;
        (0..3).all(|i| d.dot(self.axes[i]).abs() <= self.extents[i])
    }

    /// Box-to-world transform (rotation and translation); the box spans
    /// `[-extents, extents]` in that frame.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_axes(self.axes[0], self.axes[1], self.axes[2], self.center)
    }

    /// The box in its own frame.
    #[inline]
    pub fn local_box(&self) -> BBox {
        BBox::from_center_extents(Vec3::ZERO, self.extents)
    }

    /// Projected radius onto a unit direction.
    #[inline]
    pub fn radius_along(&self, dir: Vec3) -> f32 {
        (0..3).map(|i| dir.dot(self.axes[i]).abs() * self.extents[i]).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bbox_moves_scale_to_extents() {
        let m = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0))
            * Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2)
            * Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let obb = Obb::from_bbox(&BBox::new(Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0)), &m);
        assert!(obb.center.abs_diff_eq(Vec3::new(4.0, 2.0, 1.0), 1e-5));
        assert!(obb.extents.abs_diff_eq(Vec3::new(2.0, 1.0, 1.0), 1e-6));
        assert!(obb.axes[0].abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn test_vertices_match_matrix() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)) * Mat4::from_euler(0.2, 0.4, 0.6);
        let local = BBox::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
        let obb = Obb::from_bbox(&local, &m);
        let expected = local.vertices().map(|v| m.transform_point(v));
        for (a, b) in obb.vertices().iter().zip(expected.iter()) {
            assert!(a.abs_diff_eq(*b, 1e-5));
        }
        assert!(obb.to_matrix().abs_diff_eq(&m, 1e-5));
    }

    #[test]
    fn test_contains_point() {
        let m = Mat4::from_rotation_y(0.7);
        let obb = Obb::from_bbox(&BBox::new(Vec3::splat(-1.0), Vec3::ONE), &m);
        assert!(obb.contains_point(m.transform_point(Vec3::new(0.9, 0.9, -0.9))));
        assert!(!obb.contains_point(m.transform_point(Vec3::new(1.1, 0.0, 0.0))));
    }
}
