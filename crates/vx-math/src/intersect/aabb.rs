//! Axis-aligned box tests (slab method).

use super::{BoxHit, Hit, Range};
use crate::interp::EPSILON;
use crate::{BBox, Plane, Ray, Sphere, Vec3};

/// Entry/exit parameters and local normals of a ray through a box.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Slab {
    pub t_in: f32,
    pub n_in: Vec3,
    pub t_out: f32,
    pub n_out: Vec3,
    pub inside: bool,
}

/// Clips `origin + t * dir` against the box `[min, max]` over `range`.
pub(crate) fn slab(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3, range: Range) -> Option<Slab> {
    let mut t_in = f32::NEG_INFINITY;
    let mut t_out = f32::INFINITY;
    let mut n_in = Vec3::ZERO;
    let mut n_out = Vec3::ZERO;

    for axis in 0..3 {
        let (o, d) = (origin[axis], dir[axis]);
        if d.abs() < EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let (mut t0, mut t1) = ((min[axis] - o) * inv, (max[axis] - o) * inv);
        let mut normal = -Vec3::AXES[axis];
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
            normal = Vec3::AXES[axis];
        }
        if t0 > t_in {
            t_in = t0;
            n_in = normal;
        }
        if t1 < t_out {
            t_out = t1;
            n_out = -normal;
        }
        if t_in > t_out {
            return None;
        }
    }

    if t_in == f32::NEG_INFINITY {
        // zero direction: a point inside the box
        return Some(Slab {
            t_in: 0.0,
            n_in: Vec3::ZERO,
            t_out: 0.0,
            n_out: Vec3::ZERO,
            inside: true,
        });
    }
    if t_out < range.lo || t_in > range.hi {
        return None;
    }

    let mut s = Slab {
        t_in,
        n_in,
        t_out,
        n_out,
        inside: false,
    };
    if t_in < range.lo {
        s.t_in = range.lo;
        s.n_in = Vec3::ZERO;
        s.inside = true;
    }
    if t_out > range.hi {
        s.t_out = range.hi;
        s.n_out = Vec3::ZERO;
    }
    Some(s)
}

fn hit_box(ray: &Ray, b: &BBox, range: Range) -> Option<BoxHit> {
    let s = slab(ray.origin, ray.direction, b.min, b.max, range)?;
    Some(BoxHit {
        entry: Hit {
            point: ray.at(s.t_in),
            t: s.t_in,
            normal: s.n_in,
        },
        exit: Hit {
            point: ray.at(s.t_out),
            t: s.t_out,
            normal: s.n_out,
        },
        inside: s.inside,
    })
}

/// Ray against box. A ray starting inside reports `inside` with the entry
/// at its origin.
pub fn ray_box(ray: &Ray, b: &BBox) -> Option<BoxHit> {
    hit_box(ray, b, Range::RAY)
}

/// Segment against box.
pub fn segment_box(seg: &Ray, b: &BBox) -> Option<BoxHit> {
    if b.segment_outside(seg.origin, seg.end()) {
        return None;
    }
    hit_box(seg, b, Range::SEGMENT)
}

/// Infinite line against box; entry and exit are never clipped.
pub fn line_box(line: &Ray, b: &BBox) -> Option<BoxHit> {
    hit_box(line, b, Range::LINE)
}

/// Whether two boxes overlap.
#[inline]
pub fn box_box(a: &BBox, b: &BBox) -> bool {
    a.intersects(b)
}

/// Whether `inner` lies entirely inside `outer`.
#[inline]
pub fn box_contains_box(outer: &BBox, inner: &BBox) -> bool {
    outer.contains_box(inner)
}

/// Whether a sphere touches a box.
pub fn sphere_box(s: &Sphere, b: &BBox) -> bool {
    let closest = s.center.max(b.min).min(b.max);
    closest.distance_squared(s.center) <= s.radius * s.radius
}

/// Whether a plane cuts through a box.
#[inline]
pub fn plane_box(p: &Plane, b: &BBox) -> bool {
    p.classify_box(b) == 0.0
}
