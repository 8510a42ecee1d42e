//! Best-fit oriented boxes from point clouds.
//!
//! The box axes are the eigenvectors of the point covariance matrix, so
//! the longest box side follows the direction of greatest spread. Extents
//! come from projecting every point on those axes.
//!
//! # Usage
//!
//! ```rust
//! use vx_math::{best_fit_obb, Vec3};
//!
//! let pts = [
//!     Vec3::new(-4.0, 0.0, 0.0),
//!     Vec3::new(4.0, 0.0, 0.0),
//!     Vec3::new(0.0, 1.0, 0.0),
//!     Vec3::new(0.0, -1.0, 0.0),
//! ];
//! let obb = best_fit_obb(&pts, 0.0).unwrap();
//! assert!((obb.extents.x - 4.0).abs() < 1e-5);
//! ```

use crate::{BBox, EigenSolver, Mat3, Mat4, Obb, Vec3};

/// Mean of the points, zero for none.
pub fn centroid(points: &[Vec3]) -> Vec3 {
    if points.is_empty() {
        return Vec3::ZERO;
    }
    points.iter().fold(Vec3::ZERO, |acc, &p| acc + p) / points.len() as f32
}

/// Covariance matrix of the points about their mean.
pub fn covariance(points: &[Vec3]) -> Mat3 {
    if points.is_empty() {
        return Mat3::ZERO;
    }
    let mean = centroid(points);
    let sum = points.iter().fold(Mat3::ZERO, |acc, &p| {
        let d = p - mean;
        acc + Mat3::outer(d, d)
    });
    sum * (1.0 / points.len() as f32)
}

/// Oriented box around `points`, grown by `border` on every side.
///
/// Returns `None` for an empty slice.
pub fn best_fit_obb(points: &[Vec3], border: f32) -> Option<Obb> {
    if points.is_empty() {
        return None;
    }
    let eig = EigenSolver::new(&covariance(points));
    let axes = [eig.vector(0), eig.vector(1), eig.vector(2)];

    let mut lo = Vec3::splat(f32::INFINITY);
    let mut hi = Vec3::splat(f32::NEG_INFINITY);
    for &p in points {
        let proj = Vec3::new(p.dot(axes[0]), p.dot(axes[1]), p.dot(axes[2]));
        lo = lo.min(proj);
        hi = hi.max(proj);
    }

    let mid = (lo + hi) * 0.5;
    let center = axes[0] * mid.x + axes[1] * mid.y + axes[2] * mid.z;
    let extents = (hi - lo) * 0.5 + Vec3::splat(border);
    Some(Obb::new(center, axes, extents))
}

/// Best-fit box as a box-to-world matrix and the box in that frame.
pub fn best_fit_box(points: &[Vec3], border: f32) -> Option<(Mat4, BBox)> {
    let obb = best_fit_obb(points, border)?;
    Some((obb.to_matrix(), obb.local_box()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Quat;

    #[test]
    fn test_covariance() {
        let pts = [Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)];
        let c = covariance(&pts);
        assert_eq!(c, Mat3::diagonal(1.0, 0.0, 0.0));
        assert_eq!(covariance(&[]), Mat3::ZERO);
    }

    #[test]
    fn test_recovers_rotated_box() {
        let rot = Quat::from_euler(0.3, 0.9, -0.4);
        let local = BBox::new(Vec3::new(-4.0, -2.0, -1.0), Vec3::new(4.0, 2.0, 1.0));
        let m = Mat4::from_pos_quat_scale(Vec3::new(10.0, -5.0, 3.0), rot, Vec3::ONE);
        let pts = local.vertices().map(|v| m.transform_point(v));

        let obb = best_fit_obb(&pts, 0.0).unwrap();
        assert!(obb.center.abs_diff_eq(Vec3::new(10.0, -5.0, 3.0), 1e-4));
        assert!(obb.extents.abs_diff_eq(Vec3::new(4.0, 2.0, 1.0), 1e-3));
        assert!((obb.axes[0].dot(m.axis(0)).abs() - 1.0).abs() < 1e-4);
        let grown = Obb::new(obb.center, obb.axes, obb.extents + Vec3::splat(1e-3));
        for p in pts {
            assert!(grown.contains_point(p));
        }
    }

    #[test]
    fn test_border_and_matrix() {
        let pts = [Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 1.0, 0.0)];
        let (m, b) = best_fit_box(&pts, 0.5).unwrap();
        let size = b.size();
        assert!((size.x - 3.0).abs() < 1e-5);
        assert!((size.y - 2.0).abs() < 1e-5);
        assert!((size.z - 1.0).abs() < 1e-5);
        assert!(m.translation().abs_diff_eq(Vec3::new(1.0, 0.5, 0.0), 1e-5));
    }

    #[test]
    fn test_empty_input() {
        assert!(best_fit_obb(&[], 1.0).is_none());
        assert!(best_fit_box(&[], 1.0).is_none());
    }

    #[test]
    fn test_single_point() {
        let obb = best_fit_obb(&[Vec3::new(1.0, 2.0, 3.0)], 0.0).unwrap();
        assert!(obb.center.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));
        assert_eq!(obb.extents, Vec3::ZERO);
    }
}
