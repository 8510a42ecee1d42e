//! Squared distances and closest points.
//!
//! Linear primitives are all [`Ray`]s, interpreted by the function name as
//! in [`crate::intersect`]: `line` (any `t`), `ray` (`t >= 0`) and
//! `segment` (`t` in `[0, 1]`). Each query reports the squared distance
//! together with the parameters of the closest points, so callers can
//! take the square root only when they need it.
//!
//! # Usage
//!
//! ```rust
//! use vx_math::distance::{point_segment, segment_segment};
//! use vx_math::{Ray, Vec3};
//!
//! let seg = Ray::from_points(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0));
//! let d = point_segment(Vec3::new(6.0, 3.0, 0.0), &seg);
//! assert_eq!(d.t, 1.0);
//! assert_eq!(d.dist_sq, 13.0);
//!
//! let other = Ray::from_points(Vec3::new(2.0, -1.0, 1.0), Vec3::new(2.0, 1.0, 1.0));
//! let c = segment_segment(&seg, &other);
//! assert!((c.dist_sq - 1.0).abs() < 1e-6);
//! ```

use crate::intersect::Range;
use crate::{BBox, Plane, Ray, Vec3};

/// Below this squared length a direction is treated as degenerate.
const DEGENERATE: f32 = 1e-12;

/// Closest point on a linear primitive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointDistance {
    /// Squared distance
    pub dist_sq: f32,
    /// Parameter of the closest point
    pub t: f32,
    /// Closest point
    pub point: Vec3,
}

/// Closest points between two linear primitives.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Closest {
    /// Squared distance
    pub dist_sq: f32,
    /// Parameter on the first primitive
    pub s: f32,
    /// Parameter on the second primitive
    pub t: f32,
    /// Closest point on the first primitive
    pub point_a: Vec3,
    /// Closest point on the second primitive
    pub point_b: Vec3,
}

/// Closest point on a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FacePoint {
    /// Squared distance
    pub dist_sq: f32,
    /// Closest point
    pub point: Vec3,
    /// Barycentric weight of the second vertex
    pub u: f32,
    /// Barycentric weight of the third vertex
    pub v: f32,
}

fn point_to(p: Vec3, r: &Ray, range: Range) -> PointDistance {
    let len_sq = r.direction.length_squared();
    let t = if len_sq < DEGENERATE {
        0.0
    } else {
        ((p - r.origin).dot(r.direction) / len_sq).clamp(range.lo, range.hi)
    };
    let point = r.at(t);
    PointDistance {
        dist_sq: point.distance_squared(p),
        t,
        point,
    }
}

/// Point to infinite line.
pub fn point_line(p: Vec3, line: &Ray) -> PointDistance {
    point_to(p, line, Range::LINE)
}

/// Point to ray.
pub fn point_ray(p: Vec3, ray: &Ray) -> PointDistance {
    point_to(p, ray, Range::RAY)
}

/// Point to segment.
pub fn point_segment(p: Vec3, seg: &Ray) -> PointDistance {
    point_to(p, seg, Range::SEGMENT)
}

/// Minimizes `|a(s) - b(t)|` with `s` and `t` clamped to their ranges.
fn between(a: &Ray, ra: Range, b: &Ray, rb: Range) -> Closest {
    let d1 = a.direction;
    let d2 = b.direction;
    let r = a.origin - b.origin;
    let aa = d1.length_squared();
    let e = d2.length_squared();
    let f = d2.dot(r);

    let (s, t) = if aa < DEGENERATE && e < DEGENERATE {
        (0.0, 0.0)
    } else if aa < DEGENERATE {
        (0.0, (f / e).clamp(rb.lo, rb.hi))
    } else {
        let c = d1.dot(r);
        if e < DEGENERATE {
            ((-c / aa).clamp(ra.lo, ra.hi), 0.0)
        } else {
            let bb = d1.dot(d2);
            let denom = aa * e - bb * bb;
            // parallel: any s works, start from the origin
            let mut s = if denom > DEGENERATE * aa * e {
                ((bb * f - c * e) / denom).clamp(ra.lo, ra.hi)
            } else {
                0.0f32.clamp(ra.lo, ra.hi)
            };
            let mut t = (bb * s + f) / e;
            if t < rb.lo {
                t = rb.lo;
                s = ((t * bb - c) / aa).clamp(ra.lo, ra.hi);
            } else if t > rb.hi {
                t = rb.hi;
                s = ((t * bb - c) / aa).clamp(ra.lo, ra.hi);
            }
            (s, t)
        }
    };

    let point_a = a.at(s);
    let point_b = b.at(t);
    Closest {
        dist_sq: point_a.distance_squared(point_b),
        s,
        t,
        point_a,
        point_b,
    }
}

/// Line to line.
pub fn line_line(a: &Ray, b: &Ray) -> Closest {
    between(a, Range::LINE, b, Range::LINE)
}

/// Line to ray.
pub fn line_ray(line: &Ray, ray: &Ray) -> Closest {
    between(line, Range::LINE, ray, Range::RAY)
}

/// Line to segment.
pub fn line_segment(line: &Ray, seg: &Ray) -> Closest {
    between(line, Range::LINE, seg, Range::SEGMENT)
}

/// Ray to ray.
pub fn ray_ray(a: &Ray, b: &Ray) -> Closest {
    between(a, Range::RAY, b, Range::RAY)
}

/// Ray to segment.
pub fn ray_segment(ray: &Ray, seg: &Ray) -> Closest {
    between(ray, Range::RAY, seg, Range::SEGMENT)
}

/// Segment to segment.
pub fn segment_segment(a: &Ray, b: &Ray) -> Closest {
    between(a, Range::SEGMENT, b, Range::SEGMENT)
}

/// Point to box: squared distance and closest point (zero inside).
pub fn point_box(p: Vec3, b: &BBox) -> (f32, Vec3) {
    let closest = p.max(b.min).min(b.max);
    (closest.distance_squared(p), closest)
}

/// Squared distance from a point to a plane.
#[inline]
pub fn point_plane(p: Vec3, plane: &Plane) -> f32 {
    let d = plane.distance(p);
    d * d
}

/// Closest point on the triangle `abc` to `p`, by Voronoi region.
pub fn point_face(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> FacePoint {
    let result = |u: f32, v: f32| {
        let point = a + (b - a) * u + (c - a) * v;
        FacePoint {
            dist_sq: point.distance_squared(p),
            point,
            u,
            v,
        }
    };

    let ab = b - a;
    let ac = c - a;
    let ap = p - a;
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return result(0.0, 0.0);
    }

    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return result(1.0, 0.0);
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        return result(d1 / (d1 - d3), 0.0);
    }

    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return result(0.0, 1.0);
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        return result(0.0, d2 / (d2 - d6));
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && d4 - d3 >= 0.0 && d5 - d6 >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return result(1.0 - w, w);
    }

    let denom = 1.0 / (va + vb + vc);
    result(vb * denom, vc * denom)
}
