//! SIMD batch transforms for vertex arrays.
//!
//! Uses the `wide` crate for portable SIMD. The four matrix columns are
//! loaded once as `f32x4` lanes and every point becomes three multiply-adds,
//! so a whole vertex buffer is transformed without touching the matrix
//! again.
//!
//! # Features
//!
//! - Packed `Vec3` slices, in place or into a second buffer
//! - Strided `f32` buffers (interleaved vertex formats)
//! - Bounding box of a point set with lane-wise min/max
//!
//! # Example
//!
//! ```rust
//! use vx_math::batch::transform_points;
//! use vx_math::{Mat4, Vec3};
//!
//! let m = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
//! let mut pts = [Vec3::ZERO, Vec3::Y];
//! transform_points(&m, &mut pts);
//! assert_eq!(pts[1], Vec3::new(1.0, 1.0, 0.0));
//! ```
//!
//! # Performance
//!
//! Each point costs one 4-wide multiply per column plus the adds. For
//! strided buffers the gather of the three components is scalar, the
//! arithmetic is not.

use wide::f32x4;

use crate::{BBox, Mat4, Vec3};

/// Matrix columns broadcast as SIMD lanes.
struct Columns([f32x4; 4]);

impl Columns {
    #[inline]
    fn new(m: &Mat4) -> Self {
        Self(m.m.map(f32x4::from))
    }

    #[inline]
    fn point(&self, x: f32, y: f32, z: f32) -> [f32; 4] {
        let [c0, c1, c2, c3] = self.0;
        (c0 * f32x4::splat(x) + c1 * f32x4::splat(y) + c2 * f32x4::splat(z) + c3).to_array()
    }

    #[inline]
    fn vector(&self, x: f32, y: f32, z: f32) -> [f32; 4] {
        let [c0, c1, c2, _] = self.0;
        (c0 * f32x4::splat(x) + c1 * f32x4::splat(y) + c2 * f32x4::splat(z)).to_array()
    }
}

/// Transforms points in place (w = 1, no projective divide).
pub fn transform_points(m: &Mat4, points: &mut [Vec3]) {
    let cols = Columns::new(m);
    for p in points.iter_mut() {
        let r = cols.point(p.x, p.y, p.z);
        *p = Vec3::new(r[0], r[1], r[2]);
    }
}

/// Transforms `src` into `dst`.
///
/// Processes `min(src.len(), dst.len())` points and returns that count.
pub fn transform_points_into(m: &Mat4, src: &[Vec3], dst: &mut [Vec3]) -> usize {
    let cols = Columns::new(m);
    let n = src.len().min(dst.len());
    for (d, s) in dst.iter_mut().zip(src) {
        let r = cols.point(s.x, s.y, s.z);
        *d = Vec3::new(r[0], r[1], r[2]);
    }
    n
}

/// Transforms direction vectors in place, ignoring translation.
pub fn transform_vectors(m: &Mat4, vectors: &mut [Vec3]) {
    let cols = Columns::new(m);
    for v in vectors.iter_mut() {
        let r = cols.vector(v.x, v.y, v.z);
        *v = Vec3::new(r[0], r[1], r[2]);
    }
}

/// Number of whole `xyz` records a strided buffer of `len` floats holds.
#[inline]
fn record_count(len: usize, stride: usize) -> usize {
    if stride < 3 || len < 3 {
        0
    } else {
        (len - 3) / stride + 1
    }
}

/// Transforms points stored in interleaved buffers.
///
/// Every record starts with `x, y, z` and records are `stride` floats
/// apart, in both `src` and `dst`. Floats after the position are left
/// untouched in `dst`. Returns the number of points written; zero when
/// `stride < 3`.
pub fn transform_strided(m: &Mat4, src: &[f32], stride: usize, dst: &mut [f32]) -> usize {
    let n = record_count(src.len(), stride).min(record_count(dst.len(), stride));
    let cols = Columns::new(m);
    for i in 0..n {
        let o = i * stride;
        let r = cols.point(src[o], src[o + 1], src[o + 2]);
        dst[o..o + 3].copy_from_slice(&r[..3]);
    }
    n
}

/// Axis-aligned bounds of a point set. [`BBox::EMPTY`] for no points.
pub fn bounds_of(points: &[Vec3]) -> BBox {
    if points.is_empty() {
        return BBox::EMPTY;
    }
    let mut lo = f32x4::splat(f32::INFINITY);
    let mut hi = f32x4::splat(f32::NEG_INFINITY);
    for p in points {
        let v = f32x4::from([p.x, p.y, p.z, 0.0]);
        lo = lo.min(v);
        hi = hi.max(v);
    }
    let (lo, hi) = (lo.to_array(), hi.to_array());
    BBox::new(Vec3::new(lo[0], lo[1], lo[2]), Vec3::new(hi[0], hi[1], hi[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Quat;

    fn sample_matrix() -> Mat4 {
        Mat4::from_pos_quat_scale(
            Vec3::new(3.0, -2.0, 0.5),
            Quat::from_euler(0.2, -0.7, 1.1),
            Vec3::new(2.0, 1.0, 0.5),
        )
    }

    #[test]
    fn test_matches_scalar_transform() {
        let m = sample_matrix();
        let src: Vec<Vec3> = (0..17).map(|i| Vec3::new(i as f32, (i * 2) as f32 - 5.0, 1.0 - i as f32)).collect();
        let mut pts = src.clone();
        transform_points(&m, &mut pts);
        for (s, p) in src.iter().zip(&pts) {
            assert!(p.abs_diff_eq(m.transform_point(*s), 1e-4));
        }

        let mut vecs = src.clone();
        transform_vectors(&m, &mut vecs);
        for (s, v) in src.iter().zip(&vecs) {
            assert!(v.abs_diff_eq(m.transform_vector(*s), 1e-4));
        }
    }

    #[test]
    fn test_into_shorter_destination() {
        let m = Mat4::from_translation(Vec3::new(0.0, 0.0, 1.0));
        let src = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let mut dst = [Vec3::splat(9.0); 2];
        assert_eq!(transform_points_into(&m, &src, &mut dst), 2);
        assert_eq!(dst, [Vec3::Z, Vec3::new(1.0, 0.0, 1.0)]);
    }

    #[test]
    fn test_strided() {
        let m = Mat4::from_translation(Vec3::new(10.0, 20.0, 30.0));
        // position + uv, last record truncated after its position
        let src = [1.0, 2.0, 3.0, 0.5, 0.5, 4.0, 5.0, 6.0];
        let mut dst = [-1.0f32; 8];
        assert_eq!(transform_strided(&m, &src, 5, &mut dst), 2);
        assert_eq!(dst, [11.0, 22.0, 33.0, -1.0, -1.0, 14.0, 25.0, 36.0]);
        assert_eq!(transform_strided(&m, &src, 2, &mut dst), 0);
    }

    #[test]
    fn test_bounds() {
        let pts = [Vec3::new(1.0, -2.0, 3.0), Vec3::new(-4.0, 5.0, 0.0), Vec3::new(2.0, 0.0, -1.0)];
        let b = bounds_of(&pts);
        assert_eq!(b.min, Vec3::new(-4.0, -2.0, -1.0));
        assert_eq!(b.max, Vec3::new(2.0, 5.0, 3.0));
        assert!(!bounds_of(&[]).is_valid());
    }
}
