//! Frustum culling tests.
//!
//! These answer "may be visible": they never reject a shape that touches
//! the frustum, but can accept shapes lying just outside a frustum edge.

use crate::{BBox, Containment, Frustum, Obb, Plane, Sphere, Vec3};

/// Whether a triangle may overlap the frustum.
///
/// Rejects when all vertices are outside one frustum plane, or when the
/// whole frustum lies on one side of the triangle's plane.
pub fn frustum_face(f: &Frustum, a: Vec3, b: Vec3, c: Vec3) -> bool {
    if f.planes.iter().any(|p| p.classify_face(a, b, c) > 0.0) {
        return false;
    }
    let Some(face_plane) = Plane::from_points(a, b, c) else {
        return true;
    };
    let d = f.vertices().map(|v| face_plane.distance(v));
    !(d.iter().all(|&x| x > 0.0) || d.iter().all(|&x| x < 0.0))
}

/// Whether an axis-aligned box may overlap the frustum.
#[inline]
pub fn frustum_box(f: &Frustum, b: &BBox) -> bool {
    f.classify_box(b) != Containment::Outside
}

/// Whether an oriented box may overlap the frustum.
#[inline]
pub fn frustum_obb(f: &Frustum, b: &Obb) -> bool {
    f.classify_obb(b) != Containment::Outside
}

/// Whether a sphere may overlap the frustum.
#[inline]
pub fn frustum_sphere(f: &Frustum, s: &Sphere) -> bool {
    f.classify_sphere(s) != Containment::Outside
}
