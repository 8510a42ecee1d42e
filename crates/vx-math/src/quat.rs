//! Rotation quaternions.
//!
//! [`Quat`] stores `(x, y, z, w)` with `w` the scalar part. Products
//! compose like matrices: `a * b` rotates by `b` first, then by `a`.
//!
//! # Usage
//!
//! ```rust
//! use vx_math::{Quat, Vec3};
//! use std::f32::consts::FRAC_PI_2;
//!
//! let q = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2);
//! let v = q.rotate(Vec3::X);
//! assert!(v.abs_diff_eq(Vec3::Y, 1e-6));
//!
//! let half = Quat::IDENTITY.slerp(q, 0.5);
//! assert!((half.to_axis_angle().1 - FRAC_PI_2 / 2.0).abs() < 1e-5);
//! ```

use crate::{Mat3, Vec3};
use std::ops::{Add, Mul, Neg};

/// Below this sine the log/exp maps fall back to their linear limit.
const SMALL_ANGLE: f32 = 1e-6;

/// Above this cosine slerp degenerates to a normalized lerp.
const SLERP_LINEAR_THRESHOLD: f32 = 0.9995;

/// A quaternion; unit quaternions represent rotations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Quat {
    /// X component of the vector part
    pub x: f32,
    /// Y component of the vector part
    pub y: f32,
    /// Z component of the vector part
    pub z: f32,
    /// Scalar part
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a quaternion from its components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Vector part.
    #[inline]
    pub const fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Rotation of `angle` radians around `axis`.
    ///
    /// The axis is normalized; a zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let Some(axis) = axis.try_normalize() else {
            return Self::IDENTITY;
        };
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Axis and angle (radians, in `[0, 2pi]`) of this rotation.
    ///
    /// The identity reports the X axis with a zero angle.
    pub fn to_axis_angle(self) -> (Vec3, f32) {
        let q = self.normalize();
        let w = q.w.clamp(-1.0, 1.0);
        let angle = 2.0 * w.acos();
        let s = (1.0 - w * w).sqrt();
        if s < SMALL_ANGLE {
            (Vec3::X, angle)
        } else {
            (q.xyz() / s, angle)
        }
    }

    /// Extracts the rotation of an orthonormal matrix (Shepperd's method).
    ///
    /// Branches on the largest of the trace and the diagonal elements so
    /// the square root argument stays well away from zero.
    pub fn from_mat3(m: &Mat3) -> Self {
        let m = &m.m;
        let trace = m[0][0] + m[1][1] + m[2][2];
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::new(
                (m[2][1] - m[1][2]) / s,
                (m[0][2] - m[2][0]) / s,
                (m[1][0] - m[0][1]) / s,
                0.25 * s,
            )
        } else if m[0][0] > m[1][1] && m[0][0] > m[2][2] {
            let s = (1.0 + m[0][0] - m[1][1] - m[2][2]).sqrt() * 2.0;
            Self::new(
                0.25 * s,
                (m[0][1] + m[1][0]) / s,
                (m[0][2] + m[2][0]) / s,
                (m[2][1] - m[1][2]) / s,
            )
        } else if m[1][1] > m[2][2] {
            let s = (1.0 + m[1][1] - m[0][0] - m[2][2]).sqrt() * 2.0;
            Self::new(
                (m[0][1] + m[1][0]) / s,
                0.25 * s,
                (m[1][2] + m[2][1]) / s,
                (m[0][2] - m[2][0]) / s,
            )
        } else {
            let s = (1.0 + m[2][2] - m[0][0] - m[1][1]).sqrt() * 2.0;
            Self::new(
                (m[0][2] + m[2][0]) / s,
                (m[1][2] + m[2][1]) / s,
                0.25 * s,
                (m[1][0] - m[0][1]) / s,
            )
        };
        q.normalize()
    }

    /// Rotation matrix of a unit quaternion.
    pub fn to_mat3(self) -> Mat3 {
        let Self { x, y, z, w } = self;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        Mat3::from_rows([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy)],
            [2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx)],
            [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy)],
        ])
    }

    /// Rotation part of an affine matrix. Axes are normalized first so
    /// uniformly scaled matrices are accepted.
    pub fn from_matrix(m: &crate::Mat4) -> Self {
        let axis = |i: usize| m.axis(i).try_normalize().unwrap_or(Vec3::AXES[i]);
        Self::from_mat3(&Mat3::from_col_vecs(axis(0), axis(1), axis(2)))
    }

    /// Rotation matrix of a unit quaternion as a 4x4 transform.
    #[inline]
    pub fn to_mat4(self) -> crate::Mat4 {
        crate::Mat4::from_quat(self)
    }

    /// Rotation from Euler angles applied in X, Y, Z order.
    ///
    /// Matches [`crate::Mat4::from_euler`].
    pub fn from_euler(x: f32, y: f32, z: f32) -> Self {
        Self::from_axis_angle(Vec3::Z, z)
            * Self::from_axis_angle(Vec3::Y, y)
            * Self::from_axis_angle(Vec3::X, x)
    }

    /// Euler angles (X, Y, Z order) of this rotation.
    pub fn to_euler(self) -> (f32, f32, f32) {
        crate::mat4::euler_from_mat3(&self.to_mat3())
    }

    /// Dot product of the four components.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Norm of the quaternion.
    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit quaternion in the same direction; the identity for a zero quaternion.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self * (1.0 / len)
        } else {
            Self::IDENTITY
        }
    }

    /// Conjugate (inverse rotation of a unit quaternion).
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Multiplicative inverse. The identity for a zero quaternion.
    #[inline]
    pub fn inverse(self) -> Self {
        let n = self.dot(self);
        if n > 0.0 {
            self.conjugate() * (1.0 / n)
        } else {
            Self::IDENTITY
        }
    }

    /// Hamilton product `self * rhs`.
    #[inline]
    pub fn mul_quat(self, rhs: Self) -> Self {
        let a = self;
        let b = rhs;
        Self::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }

    /// Rotates a vector by a unit quaternion.
    #[inline]
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let u = self.xyz();
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }

    /// Normalized linear interpolation along the shortest arc.
    pub fn lerp_normalized(self, other: Self, t: f32) -> Self {
        let other = if self.dot(other) < 0.0 { -other } else { other };
        (self * (1.0 - t) + other * t).normalize()
    }

    /// Spherical linear interpolation along the shortest arc.
    ///
    /// Nearly parallel inputs fall back to [`Quat::lerp_normalized`].
    pub fn slerp(self, other: Self, t: f32) -> Self {
        let mut cos = self.dot(other);
        let mut other = other;
        if cos < 0.0 {
            cos = -cos;
            other = -other;
        }
        if cos > SLERP_LINEAR_THRESHOLD {
            return (self * (1.0 - t) + other * t).normalize();
        }
        self.slerp_raw(other, t, cos)
    }

    /// Slerp without flipping to the shortest arc, as required by squad.
    fn slerp_unflipped(self, other: Self, t: f32) -> Self {
        let cos = self.dot(other);
        if cos.abs() > SLERP_LINEAR_THRESHOLD {
            return (self * (1.0 - t) + other * t).normalize();
        }
        self.slerp_raw(other, t, cos)
    }

    fn slerp_raw(self, other: Self, t: f32, cos: f32) -> Self {
        let theta = cos.clamp(-1.0, 1.0).acos();
        let inv_sin = 1.0 / theta.sin();
        let a = ((1.0 - t) * theta).sin() * inv_sin;
        let b = (t * theta).sin() * inv_sin;
        self * a + other * b
    }

    /// Spherical cubic interpolation between `self` and `q2`.
    ///
    /// `a` and `b` are the inner control points, usually produced by
    /// [`Quat::squad_tangent`].
    pub fn squad(self, a: Self, b: Self, q2: Self, t: f32) -> Self {
        let outer = self.slerp_unflipped(q2, t);
        let inner = a.slerp_unflipped(b, t);
        outer.slerp_unflipped(inner, 2.0 * t * (1.0 - t))
    }

    /// Inner squad control point at `q1` for the key sequence `q0, q1, q2`.
    pub fn squad_tangent(q0: Self, q1: Self, q2: Self) -> Self {
        let inv = q1.inverse();
        let l0 = (inv * q0).ln();
        let l2 = (inv * q2).ln();
        let sum = (l0 + l2) * -0.25;
        (q1 * sum.exp()).normalize()
    }

    /// Logarithm of a unit quaternion (a pure quaternion, `w = 0`).
    pub fn ln(self) -> Self {
        let theta = self.w.clamp(-1.0, 1.0).acos();
        let s = theta.sin();
        let coef = if s.abs() > SMALL_ANGLE { theta / s } else { 1.0 };
        Self::new(self.x * coef, self.y * coef, self.z * coef, 0.0)
    }

    /// Exponential of a pure quaternion (`w` is ignored).
    pub fn exp(self) -> Self {
        let theta = self.xyz().length();
        let (s, c) = theta.sin_cos();
        let coef = if theta > SMALL_ANGLE { s / theta } else { 1.0 };
        Self::new(self.x * coef, self.y * coef, self.z * coef, c)
    }

    /// Logarithm of the rotation taking `self` to `other`: `ln(self^-1 * other)`.
    pub fn ln_dif(self, other: Self) -> Self {
        (self.inverse() * other).normalize().ln()
    }

    /// Whether every component differs from `other` by at most `eps`.
    pub fn abs_diff_eq(self, other: Self, eps: f32) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.z - other.z).abs() <= eps
            && (self.w - other.w).abs() <= eps
    }

    /// Whether both quaternions describe the same rotation (`q` and `-q` are equal).
    pub fn same_rotation(self, other: Self, eps: f32) -> bool {
        self.abs_diff_eq(other, eps) || self.abs_diff_eq(-other, eps)
    }

    /// Converts to glam Quat.
    #[inline]
    pub fn to_glam(self) -> glam::Quat {
        glam::Quat::from_xyzw(self.x, self.y, self.z, self.w)
    }

    /// Creates from glam Quat.
    #[inline]
    pub fn from_glam(q: glam::Quat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl Mul for Quat {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_quat(rhs)
    }
}

impl Mul<f32> for Quat {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.rotate(rhs)
    }
}

impl Add for Quat {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Neg for Quat {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl From<glam::Quat> for Quat {
    #[inline]
    fn from(q: glam::Quat) -> Self {
        Self::from_glam(q)
    }
}

impl From<Quat> for glam::Quat {
    #[inline]
    fn from(q: Quat) -> glam::Quat {
        q.to_glam()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_axis_angle_roundtrip() {
        let axis = Vec3::new(1.0, 2.0, -0.5).normalize();
        let q = Quat::from_axis_angle(axis, 1.2);
        let (a, angle) = q.to_axis_angle();
        assert!(a.abs_diff_eq(axis, 1e-5));
        assert!((angle - 1.2).abs() < 1e-5);
    }

    #[test]
    fn test_matrix_roundtrip_all_branches() {
        // Angles near pi exercise the diagonal branches of Shepperd's method.
        let cases = [
            (Vec3::new(0.3, 0.4, 0.5), 0.7),
            (Vec3::X, PI * 0.99),
            (Vec3::Y, PI * 0.99),
            (Vec3::Z, PI * 0.99),
        ];
        for (axis, angle) in cases {
            let q = Quat::from_axis_angle(axis, angle);
            let back = Quat::from_mat3(&q.to_mat3());
            assert!(back.same_rotation(q, 1e-4), "{axis:?} {angle}");
        }
    }

    #[test]
    fn test_from_scaled_matrix() {
        let q = Quat::from_euler(0.3, 0.2, -0.7);
        let m = crate::Mat4::from_pos_quat_scale(Vec3::ONE, q, Vec3::splat(4.0));
        assert!(Quat::from_matrix(&m).same_rotation(q, 1e-5));
        assert!(q.to_mat4().abs_diff_eq(&crate::Mat4::from_quat(q), 0.0));
    }

    #[test]
    fn test_rotate_matches_matrix() {
        let q = Quat::from_euler(0.3, -0.7, 1.1);
        let v = Vec3::new(1.0, -2.0, 0.5);
        assert!(q.rotate(v).abs_diff_eq(q.to_mat3() * v, 1e-5));
    }

    #[test]
    fn test_product_order() {
        let a = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2);
        let b = Quat::from_axis_angle(Vec3::X, FRAC_PI_2);
        // b first: Y -> Z, then a leaves Z unchanged
        assert!((a * b).rotate(Vec3::Y).abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn test_slerp_endpoints_and_shortest_arc() {
        let a = Quat::from_axis_angle(Vec3::Y, 0.2);
        let b = Quat::from_axis_angle(Vec3::Y, 1.4);
        assert!(a.slerp(b, 0.0).same_rotation(a, 1e-5));
        assert!(a.slerp(b, 1.0).same_rotation(b, 1e-5));
        let mid = a.slerp(-b, 0.5);
        assert!(mid.same_rotation(Quat::from_axis_angle(Vec3::Y, 0.8), 1e-5));
    }

    #[test]
    fn test_slerp_nearly_parallel() {
        let a = Quat::from_axis_angle(Vec3::X, 0.1);
        let b = Quat::from_axis_angle(Vec3::X, 0.1001);
        let m = a.slerp(b, 0.5);
        assert!((m.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ln_exp_inverse() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.9);
        assert!(q.ln().exp().abs_diff_eq(q, 1e-5));
        assert!(Quat::IDENTITY.ln().abs_diff_eq(Quat::new(0.0, 0.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn test_squad_endpoints() {
        let q0 = Quat::from_axis_angle(Vec3::Z, 0.0);
        let q1 = Quat::from_axis_angle(Vec3::Z, 0.5);
        let q2 = Quat::from_axis_angle(Vec3::Z, 1.0);
        let q3 = Quat::from_axis_angle(Vec3::Z, 1.5);
        let a = Quat::squad_tangent(q0, q1, q2);
        let b = Quat::squad_tangent(q1, q2, q3);
        assert!(q1.squad(a, b, q2, 0.0).same_rotation(q1, 1e-4));
        assert!(q1.squad(a, b, q2, 1.0).same_rotation(q2, 1e-4));
        // evenly spaced keys around one axis: squad follows slerp
        let mid = q1.squad(a, b, q2, 0.5);
        assert!(mid.same_rotation(Quat::from_axis_angle(Vec3::Z, 0.75), 1e-3));
    }

    #[test]
    fn test_ln_dif() {
        let a = Quat::from_axis_angle(Vec3::Y, 0.2);
        let b = Quat::from_axis_angle(Vec3::Y, 0.6);
        let d = a.ln_dif(b);
        assert!((d.y - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_glam_interop() {
        let q = Quat::from_axis_angle(Vec3::new(0.0, 1.0, 1.0), 0.4);
        let g = glam::Quat::from_axis_angle(glam::Vec3::new(0.0, 1.0, 1.0).normalize(), 0.4);
        assert!(q.abs_diff_eq(Quat::from_glam(g), 1e-6));
    }
}
