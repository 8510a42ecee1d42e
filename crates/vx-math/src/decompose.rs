//! Polar and spectral decomposition of affine transforms.
//!
//! An affine matrix `M = T * F * Q * S` is split into a translation `T`, a
//! sign `F` (`-1` for mirroring matrices), a rotation `Q` and a symmetric
//! positive stretch `S`. The stretch is further diagonalized as
//! `S = U * K * U^T`, where `U` is the stretch rotation and `K` holds the
//! scale factors along its axes.
//!
//! Because `U` is only defined up to a permutation and sign of its axes,
//! [`snuggle`] picks the candidate closest to the identity. This keeps
//! interpolation between decomposed matrices well behaved.
//!
//! # Usage
//!
//! ```rust
//! use vx_math::{decompose_affine, Mat4, Quat, Vec3};
//!
//! let m = Mat4::from_pos_quat_scale(Vec3::ONE, Quat::from_euler(0.1, 0.2, 0.3), Vec3::new(1.0, 2.0, 3.0));
//! let parts = decompose_affine(&m);
//! assert!(parts.compose().abs_diff_eq(&m, 1e-4));
//! ```

use crate::{Mat3, Mat4, Quat, Vec3};

/// Iteration cap for the polar decomposition.
const POLAR_MAX_ITER: usize = 32;

/// Frobenius-norm change below which the polar iteration stops.
const POLAR_TOLERANCE: f32 = 1e-5;

/// Sweep cap for the Jacobi diagonalization.
const JACOBI_MAX_SWEEPS: usize = 24;

/// Components of a decomposed affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineParts {
    /// Translation
    pub t: Vec3,
    /// Essential rotation
    pub q: Quat,
    /// Stretch rotation
    pub u: Quat,
    /// Scale factors along the stretch axes
    pub k: Vec3,
    /// Sign of the determinant (`1.0` or `-1.0`)
    pub f: f32,
}

impl Default for AffineParts {
    fn default() -> Self {
        Self {
            t: Vec3::ZERO,
            q: Quat::IDENTITY,
            u: Quat::IDENTITY,
            k: Vec3::ONE,
            f: 1.0,
        }
    }
}

impl AffineParts {
    /// Stretch matrix `U * K * U^T`.
    pub fn stretch(&self) -> Mat3 {
        let u = self.u.to_mat3();
        u * Mat3::diagonal(self.k.x, self.k.y, self.k.z) * u.transpose()
    }

    /// Rebuilds the affine matrix.
    pub fn compose(&self) -> Mat4 {
        let linear = self.q.to_mat3() * self.stretch() * self.f;
        Mat4::from_mat3(&linear, self.t)
    }
}

/// Decomposes the affine part of `m`.
///
/// The projective row of `m` is ignored.
pub fn decompose_affine(m: &Mat4) -> AffineParts {
    let mut a = m.linear();
    let f = if a.determinant() < 0.0 { -1.0 } else { 1.0 };
    a = a * f;

    let q = polar_rotation(&a);
    let s = q.transpose() * a;
    let s = (s + s.transpose()) * 0.5;

    let (u, k) = spectral(&s);
    let (u, k) = snuggle(&u, k);

    AffineParts {
        t: m.translation(),
        q: Quat::from_mat3(&q),
        u: Quat::from_mat3(&u),
        k,
        f,
    }
}

/// Orthogonal factor of the polar decomposition `A = Q * S`.
///
/// Scaled Newton iteration `Q <- (g * Q + Q^-T / g) / 2`. Falls back to
/// Gram-Schmidt when an iterate becomes singular.
pub fn polar_rotation(a: &Mat3) -> Mat3 {
    let mut q = *a;
    for _ in 0..POLAR_MAX_ITER {
        let Some(inv) = q.inverse() else {
            return orthonormalize(a);
        };
        let det = q.determinant().abs();
        let gamma = if det > 0.0 { det.powf(-1.0 / 3.0) } else { 1.0 };
        let next = (q * gamma + inv.transpose() * (1.0 / gamma)) * 0.5;
        let change = frobenius(&(next - q));
        q = next;
        if change <= POLAR_TOLERANCE * frobenius(&q) {
            break;
        }
    }
    if q.is_finite() { q } else { orthonormalize(a) }
}

/// Eigen decomposition of a symmetric matrix by cyclic Jacobi rotations.
///
/// Returns `(V, k)` with `S = V * diag(k) * V^T` and `det(V) = +1`.
pub fn spectral(s: &Mat3) -> (Mat3, Vec3) {
    let mut a = s.m;
    let mut v = Mat3::IDENTITY.m;

    for _ in 0..JACOBI_MAX_SWEEPS {
        let off = a[0][1] * a[0][1] + a[0][2] * a[0][2] + a[1][2] * a[1][2];
        let diag = a[0][0] * a[0][0] + a[1][1] * a[1][1] + a[2][2] * a[2][2];
        if off <= 1e-14 * diag || off < 1e-30 {
            break;
        }
        for (p, q) in [(0, 1), (0, 2), (1, 2)] {
            if a[p][q].abs() < 1e-30 {
                continue;
            }
            let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
            let sgn = if theta >= 0.0 { 1.0 } else { -1.0 };
            let t = sgn / (theta.abs() + (theta * theta + 1.0).sqrt());
            let c = 1.0 / (t * t + 1.0).sqrt();
            let sn = t * c;

            for row in a.iter_mut() {
                let (kp, kq) = (row[p], row[q]);
                row[p] = c * kp - sn * kq;
                row[q] = sn * kp + c * kq;
            }
            for k in 0..3 {
                let (pk, qk) = (a[p][k], a[q][k]);
                a[p][k] = c * pk - sn * qk;
                a[q][k] = sn * pk + c * qk;
            }
            for row in v.iter_mut() {
                let (kp, kq) = (row[p], row[q]);
                row[p] = c * kp - sn * kq;
                row[q] = sn * kp + c * kq;
            }
        }
    }

    let mut vecs = Mat3::from_rows(v);
    if vecs.determinant() < 0.0 {
        vecs.set_col(2, -vecs.col(2));
    }
    (vecs, Vec3::new(a[0][0], a[1][1], a[2][2]))
}

/// Chooses, among the 24 axis permutations and sign flips of `u` that keep
/// it a proper rotation, the one closest to the identity.
///
/// Scale factors are permuted along with the axes, so `U * K * U^T` is
/// unchanged.
pub fn snuggle(u: &Mat3, k: Vec3) -> (Mat3, Vec3) {
    const PERMS: [[usize; 3]; 6] = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
    let cols = [u.col(0), u.col(1), u.col(2)];

    let mut best = (*u, k);
    let mut best_trace = f32::NEG_INFINITY;
    for perm in PERMS {
        for signs in 0..8u32 {
            let sign = |bit: u32| if signs & (1 << bit) != 0 { -1.0 } else { 1.0 };
            let cand = Mat3::from_col_vecs(
                cols[perm[0]] * sign(0),
                cols[perm[1]] * sign(1),
                cols[perm[2]] * sign(2),
            );
            if cand.determinant() < 0.0 {
                continue;
            }
            let trace = cand.trace();
            if trace > best_trace {
                best_trace = trace;
                best = (cand, Vec3::new(k[perm[0]], k[perm[1]], k[perm[2]]));
            }
        }
    }
    best
}

/// Gram-Schmidt on the columns, completing degenerate axes.
fn orthonormalize(a: &Mat3) -> Mat3 {
    let x = a.col(0).try_normalize().unwrap_or(Vec3::X);
    let y = {
        let y = a.col(1);
        (y - x * x.dot(y)).try_normalize().unwrap_or_else(|| x.any_orthonormal())
    };
    Mat3::from_col_vecs(x, y, x.cross(y))
}

fn frobenius(m: &Mat3) -> f32 {
    m.m.iter().flatten().map(|v| v * v).sum::<f32>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_only() {
        let q = Quat::from_euler(0.7, -0.3, 1.9);
        let parts = decompose_affine(&Mat4::from_quat(q));
        assert!(parts.q.same_rotation(q, 1e-5));
        assert!(parts.k.abs_diff_eq(Vec3::ONE, 1e-5));
        assert_eq!(parts.f, 1.0);
    }

    #[test]
    fn test_scale_and_translation() {
        let m = Mat4::from_translation(Vec3::new(1.0, -2.0, 3.0)) * Mat4::from_scale(Vec3::new(1.0, 2.0, 3.0));
        let parts = decompose_affine(&m);
        assert!(parts.t.abs_diff_eq(Vec3::new(1.0, -2.0, 3.0), 1e-6));
        assert!(parts.q.same_rotation(Quat::IDENTITY, 1e-5));
        assert!(parts.u.same_rotation(Quat::IDENTITY, 1e-5));
        assert!(parts.k.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));
    }

    #[test]
    fn test_shear_roundtrip() {
        let mut m = Mat4::from_euler(0.2, 0.4, -0.1);
        m.m[1][0] += 0.6; // shear Y into X
        m.set_translation(Vec3::new(5.0, 0.0, -1.0));
        let parts = decompose_affine(&m);
        assert!(parts.compose().abs_diff_eq(&m, 1e-4));
        assert!(parts.k.x > 0.0 && parts.k.y > 0.0 && parts.k.z > 0.0);
    }

    #[test]
    fn test_mirror_sign() {
        let m = Mat4::from_scale(Vec3::new(2.0, -1.0, 1.0));
        let parts = decompose_affine(&m);
        assert_eq!(parts.f, -1.0);
        assert!(parts.compose().abs_diff_eq(&m, 1e-5));
    }

    #[test]
    fn test_singular_falls_back() {
        let m = Mat4::from_scale(Vec3::new(1.0, 1.0, 0.0));
        let q = polar_rotation(&m.linear());
        assert!((q.determinant() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_spectral_reconstructs() {
        let s = Mat3::from_rows([[4.0, 1.0, 0.5], [1.0, 3.0, -0.2], [0.5, -0.2, 2.0]]);
        let (v, k) = spectral(&s);
        let back = v * Mat3::diagonal(k.x, k.y, k.z) * v.transpose();
        assert!(back.abs_diff_eq(&s, 1e-4));
        assert!((v.determinant() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_snuggle_prefers_identity() {
        // axes permuted: X->Y, Y->Z, Z->X
        let u = Mat3::from_col_vecs(Vec3::Y, Vec3::Z, Vec3::X);
        let (best, k) = snuggle(&u, Vec3::new(1.0, 2.0, 3.0));
        assert!(best.abs_diff_eq(&Mat3::IDENTITY, 1e-6));
        assert_eq!(k, Vec3::new(3.0, 1.0, 2.0));
    }
}
