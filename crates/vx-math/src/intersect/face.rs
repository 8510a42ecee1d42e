//! Triangle tests.
//!
//! Triangles are passed as three vertices. Ray queries are two-sided and
//! use the Moller-Trumbore algorithm; the reported normal follows the
//! counter-clockwise winding `(b - a) x (c - a)`.

use super::{FaceHit, Hit, Range};
use crate::distance::point_face;
use crate::interp::EPSILON;
use crate::{BBox, Ray, Sphere, Vec2, Vec3};

fn hit_face(ray: &Ray, a: Vec3, b: Vec3, c: Vec3, range: Range) -> Option<FaceHit> {
    let e1 = b - a;
    let e2 = c - a;
    let p = ray.direction.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPSILON * EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    if !range.contains(t) {
        return None;
    }
    Some(FaceHit {
        hit: Hit {
            point: ray.at(t),
            t,
            normal: e1.cross(e2).normalize(),
        },
        u,
        v,
    })
}

/// Ray against triangle.
pub fn ray_face(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<FaceHit> {
    hit_face(ray, a, b, c, Range::RAY)
}

/// Segment against triangle.
pub fn segment_face(seg: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<FaceHit> {
    hit_face(seg, a, b, c, Range::SEGMENT)
}

/// Infinite line against triangle.
pub fn line_face(line: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<FaceHit> {
    hit_face(line, a, b, c, Range::LINE)
}

/// Drops the dominant axis of `normal`, returning the two kept indices.
fn projection_axes(normal: Vec3) -> (usize, usize) {
    match normal.abs().max_axis() {
        0 => (1, 2),
        1 => (2, 0),
        _ => (0, 1),
    }
}

fn project(p: Vec3, (i, j): (usize, usize)) -> Vec2 {
    Vec2::new(p[i], p[j])
}

fn point_in_triangle_2d(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d0 = (b - a).cross(p - a);
    let d1 = (c - b).cross(p - b);
    let d2 = (a - c).cross(p - c);
    let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(has_neg && has_pos)
}

/// Whether `p`, assumed to lie in the triangle's plane, is inside the
/// triangle. The test runs in 2D after dropping the dominant normal axis.
pub fn point_in_face(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> bool {
    let axes = projection_axes((b - a).cross(c - a));
    point_in_triangle_2d(project(p, axes), project(a, axes), project(b, axes), project(c, axes))
}

fn segments_cross_2d(p0: Vec2, p1: Vec2, q0: Vec2, q1: Vec2) -> bool {
    let d1 = (p1 - p0).cross(q0 - p0);
    let d2 = (p1 - p0).cross(q1 - p0);
    if d1 == 0.0 && d2 == 0.0 {
        // collinear: overlap of the bounding intervals
        let (lo_p, hi_p) = (p0.min(p1), p0.max(p1));
        let (lo_q, hi_q) = (q0.min(q1), q0.max(q1));
        return lo_p.x <= hi_q.x && lo_q.x <= hi_p.x && lo_p.y <= hi_q.y && lo_q.y <= hi_p.y;
    }
    let d3 = (q1 - q0).cross(p0 - q0);
    let d4 = (q1 - q0).cross(p1 - q0);
    d1 * d2 <= 0.0 && d3 * d4 <= 0.0
}

fn coplanar_faces(normal: Vec3, a: [Vec3; 3], b: [Vec3; 3]) -> bool {
    let axes = projection_axes(normal);
    let pa = a.map(|v| project(v, axes));
    let pb = b.map(|v| project(v, axes));
    for i in 0..3 {
        for j in 0..3 {
            if segments_cross_2d(pa[i], pa[(i + 1) % 3], pb[j], pb[(j + 1) % 3]) {
                return true;
            }
        }
    }
    point_in_triangle_2d(pa[0], pb[0], pb[1], pb[2]) || point_in_triangle_2d(pb[0], pa[0], pa[1], pa[2])
}

/// Interval where a triangle crosses the other triangle's plane, projected
/// on the intersection line. `None` when the triangle lies in the plane.
fn crossing_interval(p: [f32; 3], d: [f32; 3]) -> Option<(f32, f32)> {
    let (lone, i, j) = if d[0] * d[1] > 0.0 {
        (2, 0, 1)
    } else if d[0] * d[2] > 0.0 {
        (1, 0, 2)
    } else if d[1] * d[2] > 0.0 || d[0] != 0.0 {
        (0, 1, 2)
    } else if d[1] != 0.0 {
        (1, 0, 2)
    } else if d[2] != 0.0 {
        (2, 0, 1)
    } else {
        return None;
    };
    let t0 = p[i] + (p[lone] - p[i]) * d[i] / (d[i] - d[lone]);
    let t1 = p[j] + (p[lone] - p[j]) * d[j] / (d[j] - d[lone]);
    Some((t0.min(t1), t0.max(t1)))
}

fn plane_distances(n: Vec3, origin: Vec3, verts: &[Vec3; 3]) -> [f32; 3] {
    verts.map(|v| {
        let d = n.dot(v - origin);
        if d.abs() < EPSILON { 0.0 } else { d }
    })
}

/// Whether two triangles intersect (interval overlap on the line where
/// their planes meet; coplanar triangles are tested in 2D).
pub fn face_face(a0: Vec3, a1: Vec3, a2: Vec3, b0: Vec3, b1: Vec3, b2: Vec3) -> bool {
    let a = [a0, a1, a2];
    let b = [b0, b1, b2];

    let nb = (b1 - b0).cross(b2 - b0);
    let da = plane_distances(nb, b0, &a);
    if da.iter().all(|&d| d > 0.0) || da.iter().all(|&d| d < 0.0) {
        return false;
    }

    let na = (a1 - a0).cross(a2 - a0);
    let db = plane_distances(na, a0, &b);
    if db.iter().all(|&d| d > 0.0) || db.iter().all(|&d| d < 0.0) {
        return false;
    }

    let dir = na.cross(nb);
    let axis = dir.abs().max_axis();
    let pa = a.map(|v| v[axis]);
    let pb = b.map(|v| v[axis]);

    match (crossing_interval(pa, da), crossing_interval(pb, db)) {
        (Some((a_lo, a_hi)), Some((b_lo, b_hi))) => a_lo <= b_hi && b_lo <= a_hi,
        _ => coplanar_faces(na, a, b),
    }
}

/// Whether a triangle overlaps an axis-aligned box (13-axis separating
/// axis test: 3 box normals, the face normal and 9 edge cross products).
pub fn face_box(a: Vec3, b: Vec3, c: Vec3, bx: &BBox) -> bool {
    let center = bx.center();
    let h = bx.half_size();
    let v = [a - center, b - center, c - center];
    let edges = [v[1] - v[0], v[2] - v[1], v[0] - v[2]];

    // edge cross products with the box axes
    for e in edges {
        for axis in Vec3::AXES {
            let l = axis.cross(e);
            let p = v.map(|p| p.dot(l));
            let r = h.x * l.x.abs() + h.y * l.y.abs() + h.z * l.z.abs();
            let lo = p[0].min(p[1]).min(p[2]);
            let hi = p[0].max(p[1]).max(p[2]);
            if lo > r || hi < -r {
                return false;
            }
        }
    }

    // box face normals
    for i in 0..3 {
        let lo = v[0][i].min(v[1][i]).min(v[2][i]);
        let hi = v[0][i].max(v[1][i]).max(v[2][i]);
        if lo > h[i] || hi < -h[i] {
            return false;
        }
    }

    // triangle plane
    let n = edges[0].cross(edges[1]);
    let r = h.x * n.x.abs() + h.y * n.y.abs() + h.z * n.z.abs();
    n.dot(v[0]).abs() <= r
}

/// Whether a triangle touches a sphere.
pub fn face_sphere(a: Vec3, b: Vec3, c: Vec3, s: &Sphere) -> bool {
    let closest = point_face(s.center, a, b, c);
    closest.point.distance_squared(s.center) <= s.radius * s.radius
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    const B: Vec3 = Vec3::new(2.0, 0.0, 0.0);
    const C: Vec3 = Vec3::new(0.0, 2.0, 0.0);

    #[test]
    fn test_ray_face_barycentric() {
        let hit = ray_face(&Ray::new(Vec3::new(0.5, 0.5, 5.0), -Vec3::Z), A, B, C).unwrap();
        assert!((hit.hit.t - 5.0).abs() < 1e-6);
        assert!((hit.u - 0.25).abs() < 1e-6);
        assert!((hit.v - 0.25).abs() < 1e-6);
        assert!(hit.hit.normal.abs_diff_eq(Vec3::Z, 1e-6));
        // two-sided
        assert!(ray_face(&Ray::new(Vec3::new(0.5, 0.5, -5.0), Vec3::Z), A, B, C).is_some());
        assert!(ray_face(&Ray::new(Vec3::new(1.5, 1.5, 5.0), -Vec3::Z), A, B, C).is_none());
    }

    #[test]
    fn test_segment_and_line_face() {
        let down = Ray::from_points(Vec3::new(0.5, 0.5, 5.0), Vec3::new(0.5, 0.5, 1.0));
        assert!(segment_face(&down, A, B, C).is_none());
        assert!(ray_face(&down, A, B, C).is_some());
        let away = Ray::new(Vec3::new(0.5, 0.5, 5.0), Vec3::Z);
        assert!(ray_face(&away, A, B, C).is_none());
        assert_eq!(line_face(&away, A, B, C).unwrap().hit.t, -5.0);
    }

    #[test]
    fn test_point_in_face() {
        assert!(point_in_face(Vec3::new(0.5, 0.5, 0.0), A, B, C));
        assert!(point_in_face(Vec3::new(1.0, 1.0, 0.0), A, B, C));
        assert!(!point_in_face(Vec3::new(1.5, 1.5, 0.0), A, B, C));
        // clockwise winding works the same
        assert!(point_in_face(Vec3::new(0.5, 0.5, 0.0), A, C, B));
    }

    #[test]
    fn test_face_face_crossing() {
        let b0 = Vec3::new(0.5, 0.5, -1.0);
        let b1 = Vec3::new(0.5, 0.5, 1.0);
        let b2 = Vec3::new(0.5, -3.0, 0.0);
        assert!(face_face(A, B, C, b0, b1, b2));
        let shift = Vec3::new(5.0, 0.0, 0.0);
        assert!(!face_face(A, B, C, b0 + shift, b1 + shift, b2 + shift));
    }

    #[test]
    fn test_face_face_plane_separated() {
        let up = Vec3::new(0.0, 0.0, 1.0);
        assert!(!face_face(A, B, C, A + up, B + up, C + up));
    }

    #[test]
    fn test_face_face_coplanar() {
        let shift = Vec3::new(1.0, 0.0, 0.0);
        assert!(face_face(A, B, C, A + shift, B + shift, C + shift));
        let far = Vec3::new(10.0, 0.0, 0.0);
        assert!(!face_face(A, B, C, A + far, B + far, C + far));
    }

    #[test]
    fn test_face_box() {
        let b = BBox::new(Vec3::splat(-1.0), Vec3::ONE);
        assert!(face_box(A, B, C, &b));
        let lift = Vec3::new(0.0, 0.0, 1.5);
        assert!(!face_box(A + lift, B + lift, C + lift, &b));
        // plane cuts the box corner region but the triangle passes beside it
        let t0 = Vec3::new(2.0, -0.5, 0.0);
        let t1 = Vec3::new(3.0, 2.0, 0.0);
        let t2 = Vec3::new(0.5, 3.0, 0.0);
        assert!(!face_box(t0, t1, t2, &b));
    }

    #[test]
    fn test_face_sphere() {
        assert!(face_sphere(A, B, C, &Sphere::new(Vec3::new(0.5, 0.5, 0.9), 1.0)));
        assert!(!face_sphere(A, B, C, &Sphere::new(Vec3::new(0.5, 0.5, 1.1), 1.0)));
        assert!(face_sphere(A, B, C, &Sphere::new(Vec3::new(-0.5, -0.5, 0.0), 0.75)));
    }
}
