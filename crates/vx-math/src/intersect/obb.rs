//! Oriented box tests.

use super::aabb::slab;
use super::{BoxHit, Hit, Range};
use crate::{BBox, Obb, Ray, Vec3};

/// Added to the absolute rotation terms so near-parallel edges do not
/// produce a zero cross-product axis.
const SAT_EPSILON: f32 = 1e-6;

fn hit_obb(ray: &Ray, b: &Obb, range: Range) -> Option<BoxHit> {
    let rel = ray.origin - b.center;
    let local_origin = Vec3::new(rel.dot(b.axes[0]), rel.dot(b.axes[1]), rel.dot(b.axes[2]));
    let local_dir = Vec3::new(
        ray.direction.dot(b.axes[0]),
        ray.direction.dot(b.axes[1]),
        ray.direction.dot(b.axes[2]),
    );
    let s = slab(local_origin, local_dir, -b.extents, b.extents, range)?;
    let to_world = |n: Vec3| b.axes[0] * n.x + b.axes[1] * n.y + b.axes[2] * n.z;
    Some(BoxHit {
        entry: Hit {
            point: ray.at(s.t_in),
            t: s.t_in,
            normal: to_world(s.n_in),
        },
        exit: Hit {
            point: ray.at(s.t_out),
            t: s.t_out,
            normal: to_world(s.n_out),
        },
        inside: s.inside,
    })
}

/// Ray against oriented box.
pub fn ray_obb(ray: &Ray, b: &Obb) -> Option<BoxHit> {
    hit_obb(ray, b, Range::RAY)
}

/// Segment against oriented box.
pub fn segment_obb(seg: &Ray, b: &Obb) -> Option<BoxHit> {
    hit_obb(seg, b, Range::SEGMENT)
}

/// Infinite line against oriented box.
pub fn line_obb(line: &Ray, b: &Obb) -> Option<BoxHit> {
    hit_obb(line, b, Range::LINE)
}

/// Whether two oriented boxes overlap (separating axis test on the 3 + 3
/// face axes and the 9 edge cross products).
pub fn obb_obb(a: &Obb, b: &Obb) -> bool {
    let mut r = [[0.0f32; 3]; 3];
    let mut abs_r = [[0.0f32; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            r[i][j] = a.axes[i].dot(b.axes[j]);
            abs_r[i][j] = r[i][j].abs() + SAT_EPSILON;
        }
    }

    let d = b.center - a.center;
    let t = [d.dot(a.axes[0]), d.dot(a.axes[1]), d.dot(a.axes[2])];
    let ea = a.extents;
    let eb = b.extents;

    // axes of a
    for i in 0..3 {
        let rb = eb.x * abs_r[i][0] + eb.y * abs_r[i][1] + eb.z * abs_r[i][2];
        if t[i].abs() > ea[i] + rb {
            return false;
        }
    }

    // axes of b
    for j in 0..3 {
        let ra = ea.x * abs_r[0][j] + ea.y * abs_r[1][j] + ea.z * abs_r[2][j];
        let tb = t[0] * r[0][j] + t[1] * r[1][j] + t[2] * r[2][j];
        if tb.abs() > ra + eb[j] {
            return false;
        }
    }

    // a[i] x b[j]
    for i in 0..3 {
        let (i1, i2) = ((i + 1) % 3, (i + 2) % 3);
        for j in 0..3 {
            let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
            let ra = ea[i1] * abs_r[i2][j] + ea[i2] * abs_r[i1][j];
            let rb = eb[j1] * abs_r[i][j2] + eb[j2] * abs_r[i][j1];
            let dist = t[i2] * r[i1][j] - t[i1] * r[i2][j];
            if dist.abs() > ra + rb {
                return false;
            }
        }
    }
    true
}

/// Whether an axis-aligned box and an oriented box overlap.
pub fn box_obb(a: &BBox, b: &Obb) -> bool {
    let aligned = Obb::new(a.center(), Vec3::AXES, a.half_size());
    obb_obb(&aligned, b)
}
