//! 4x4 affine and projective transforms.
//!
//! # Convention
//!
//! [`Mat4`] uses **column vectors** and stores its four columns:
//! `m[0]`, `m[1]`, `m[2]` are the images of the X, Y and Z axes and
//! `m[3]` holds the translation. A point transforms as
//!
//! ```text
//! p' = m[0] * p.x + m[1] * p.y + m[2] * p.z + m[3]
//! ```
//!
//! and `a * b` applies `b` first. This is the same memory layout as
//! [`glam::Mat4`], so conversions are plain copies.
//!
//! Projection matrices are left-handed with depth mapped to `[0, 1]`.
//!
//! # Usage
//!
//! ```rust
//! use vx_math::{Mat4, Vec3};
//!
//! let world = Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0))
//!     * Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
//! let p = world.transform_point(Vec3::X);
//! assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, 4.0), 1e-6));
//!
//! let inv = world.inverse().unwrap();
//! assert!(inv.transform_point(p).abs_diff_eq(Vec3::X, 1e-5));
//! ```

use crate::decompose::{decompose_affine, AffineParts};
use crate::{Mat3, Quat, Vec3, Vec4};
use std::ops::{Index, IndexMut, Mul};

/// A 4x4 matrix stored as four columns.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// Columns: X axis, Y axis, Z axis, translation
    pub m: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    /// Zero matrix.
    pub const ZERO: Self = Self { m: [[0.0; 4]; 4] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a matrix from its columns.
    #[inline]
    pub const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self { m: cols }
    }

    /// Affine matrix from three axes and a position.
    #[inline]
    pub const fn from_axes(x: Vec3, y: Vec3, z: Vec3, pos: Vec3) -> Self {
        Self::from_cols([
            [x.x, x.y, x.z, 0.0],
            [y.x, y.y, y.z, 0.0],
            [z.x, z.y, z.z, 0.0],
            [pos.x, pos.y, pos.z, 1.0],
        ])
    }

    /// Affine matrix from a linear part and a translation.
    pub fn from_mat3(linear: &Mat3, translation: Vec3) -> Self {
        Self::from_axes(linear.col(0), linear.col(1), linear.col(2), translation)
    }

    /// Translation matrix.
    #[inline]
    pub const fn from_translation(t: Vec3) -> Self {
        Self::from_axes(Vec3::X, Vec3::Y, Vec3::Z, t)
    }

    /// Non-uniform scale matrix.
    #[inline]
    pub const fn from_scale(s: Vec3) -> Self {
        Self::from_axes(
            Vec3::new(s.x, 0.0, 0.0),
            Vec3::new(0.0, s.y, 0.0),
            Vec3::new(0.0, 0.0, s.z),
            Vec3::ZERO,
        )
    }

    /// Rotation of `angle` radians around `axis` (Rodrigues' formula).
    ///
    /// ```text
    /// R = I cos(a) + (1 - cos(a)) n n^T + sin(a) [n]x
    /// ```
    ///
    /// A zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let Some(n) = axis.try_normalize() else {
            return Self::IDENTITY;
        };
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let linear = Mat3::from_rows([
            [t * n.x * n.x + c, t * n.x * n.y - s * n.z, t * n.x * n.z + s * n.y],
            [t * n.x * n.y + s * n.z, t * n.y * n.y + c, t * n.y * n.z - s * n.x],
            [t * n.x * n.z - s * n.y, t * n.y * n.z + s * n.x, t * n.z * n.z + c],
        ]);
        Self::from_mat3(&linear, Vec3::ZERO)
    }

    /// Rotation around the X axis.
    pub fn from_rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_axes(Vec3::X, Vec3::new(0.0, c, s), Vec3::new(0.0, -s, c), Vec3::ZERO)
    }

    /// Rotation around the Y axis.
    pub fn from_rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_axes(Vec3::new(c, 0.0, -s), Vec3::Y, Vec3::new(s, 0.0, c), Vec3::ZERO)
    }

    /// Rotation around the Z axis.
    pub fn from_rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_axes(Vec3::new(c, s, 0.0), Vec3::new(-s, c, 0.0), Vec3::Z, Vec3::ZERO)
    }

    /// Rotation from Euler angles, applied around X, then Y, then Z.
    pub fn from_euler(x: f32, y: f32, z: f32) -> Self {
        Self::from_rotation_z(z) * Self::from_rotation_y(y) * Self::from_rotation_x(x)
    }

    /// Euler angles `(x, y, z)` of the rotation part, inverse of [`Mat4::from_euler`].
    ///
    /// At gimbal lock (`|y| = pi/2`) the Z angle is reported as zero.
    /// The matrix must not contain scale.
    pub fn to_euler(&self) -> (f32, f32, f32) {
        euler_from_mat3(&self.linear())
    }

    /// Rotation matrix of a unit quaternion.
    pub fn from_quat(q: Quat) -> Self {
        Self::from_mat3(&q.to_mat3(), Vec3::ZERO)
    }

    /// `translation * rotation * scale`.
    pub fn from_pos_quat_scale(pos: Vec3, rot: Quat, scale: Vec3) -> Self {
        let r = rot.to_mat3();
        Self::from_axes(r.col(0) * scale.x, r.col(1) * scale.y, r.col(2) * scale.z, pos)
    }

    /// Perspective projection.
    ///
    /// `fov` is the horizontal field of view in radians and `aspect` the
    /// width / height ratio of the viewport.
    pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let (s, c) = (fov * 0.5).sin_cos();
        let sx = c / s;
        let q = far / (far - near);
        let mut m = Self::ZERO;
        m.m[0][0] = sx;
        m.m[1][1] = sx * aspect;
        m.m[2][2] = q;
        m.m[2][3] = 1.0;
        m.m[3][2] = -q * near;
        m
    }

    /// Off-center perspective projection.
    ///
    /// The window edges are given on the plane at unit distance from the eye.
    pub fn perspective_rect(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Self {
        let q = far / (far - near);
        let mut m = Self::ZERO;
        m.m[0][0] = 2.0 / (right - left);
        m.m[1][1] = 2.0 / (top - bottom);
        m.m[2][0] = -(left + right) / (right - left);
        m.m[2][1] = -(top + bottom) / (top - bottom);
        m.m[2][2] = q;
        m.m[2][3] = 1.0;
        m.m[3][2] = -q * near;
        m
    }

    /// Orthographic projection with a zoom factor.
    pub fn orthographic(zoom: f32, aspect: f32, near: f32, far: f32) -> Self {
        let inv_depth = 1.0 / (far - near);
        let mut m = Self::IDENTITY;
        m.m[0][0] = zoom;
        m.m[1][1] = zoom * aspect;
        m.m[2][2] = inv_depth;
        m.m[3][2] = -near * inv_depth;
        m
    }

    /// Off-center orthographic projection.
    pub fn orthographic_rect(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Self {
        let inv_depth = 1.0 / (far - near);
        let mut m = Self::IDENTITY;
        m.m[0][0] = 2.0 / (right - left);
        m.m[1][1] = 2.0 / (top - bottom);
        m.m[2][2] = inv_depth;
        m.m[3][0] = -(left + right) / (right - left);
        m.m[3][1] = -(top + bottom) / (top - bottom);
        m.m[3][2] = -near * inv_depth;
        m
    }

    /// Left-handed view matrix looking from `eye` towards `target`.
    ///
    /// Returns the identity when `eye == target` or `up` is parallel to the view direction.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let Some(z) = (target - eye).try_normalize() else {
            return Self::IDENTITY;
        };
        let Some(x) = up.cross(z).try_normalize() else {
            return Self::IDENTITY;
        };
        let y = z.cross(x);
        let rows = Mat3::from_rows([x.to_array(), y.to_array(), z.to_array()]);
        Self::from_mat3(&rows, Vec3::new(-x.dot(eye), -y.dot(eye), -z.dot(eye)))
    }

    /// Column `i` as a 3D vector (axis or translation).
    #[inline]
    pub fn axis(&self, i: usize) -> Vec3 {
        Vec3::new(self.m[i][0], self.m[i][1], self.m[i][2])
    }

    /// Replaces the 3D part of column `i`.
    #[inline]
    pub fn set_axis(&mut self, i: usize, v: Vec3) {
        self.m[i][0] = v.x;
        self.m[i][1] = v.y;
        self.m[i][2] = v.z;
    }

    /// Translation part.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.axis(3)
    }

    /// Replaces the translation part.
    #[inline]
    pub fn set_translation(&mut self, t: Vec3) {
        self.set_axis(3, t);
    }

    /// Upper 3x3 linear part.
    #[inline]
    pub fn linear(&self) -> Mat3 {
        Mat3::from_col_vecs(self.axis(0), self.axis(1), self.axis(2))
    }

    /// Element at `row`, `col`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.m[col][row]
    }

    /// Row `i` as a 4D vector.
    #[inline]
    pub fn row(&self, i: usize) -> Vec4 {
        Vec4::new(self.m[0][i], self.m[1][i], self.m[2][i], self.m[3][i])
    }

    /// Multiplies two matrices (`self * other`, `other` applied first).
    pub fn mul_mat(&self, other: &Self) -> Self {
        let mut r = Self::ZERO;
        for c in 0..4 {
            for row in 0..4 {
                r.m[c][row] = (0..4).map(|k| self.m[k][row] * other.m[c][k]).sum();
            }
        }
        r
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        let mut r = Self::ZERO;
        for c in 0..4 {
            for row in 0..4 {
                r.m[c][row] = self.m[row][c];
            }
        }
        r
    }

    /// Determinant of the full 4x4 matrix.
    #[inline]
    pub fn determinant(&self) -> f32 {
        self.to_glam().determinant()
    }

    /// General inverse. Returns `None` for singular matrices.
    pub fn inverse(&self) -> Option<Self> {
        let g = self.to_glam();
        let det = g.determinant();
        if det.abs() < 1e-12 || !det.is_finite() {
            return None;
        }
        Some(Self::from_glam(g.inverse()))
    }

    /// Inverse of an affine matrix (linear part plus translation).
    ///
    /// Cheaper than [`Mat4::inverse`] and exact for matrices whose last
    /// row is `(0, 0, 0, 1)`. Returns `None` when the linear part is singular.
    pub fn inverse_affine(&self) -> Option<Self> {
        let inv = self.linear().inverse()?;
        let t = -(inv * self.translation());
        Some(Self::from_mat3(&inv, t))
    }

    /// Transforms a point (applies translation).
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.axis(0) * p.x + self.axis(1) * p.y + self.axis(2) * p.z + self.axis(3)
    }

    /// Transforms a direction (ignores translation).
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.axis(0) * v.x + self.axis(1) * v.y + self.axis(2) * v.z
    }

    /// Transforms a direction by the transpose of the linear part.
    ///
    /// For a rotation this is the inverse rotation.
    #[inline]
    pub fn rotate_inverse(&self, v: Vec3) -> Vec3 {
        Vec3::new(self.axis(0).dot(v), self.axis(1).dot(v), self.axis(2).dot(v))
    }

    /// Full homogeneous transform.
    #[inline]
    pub fn transform_vec4(&self, v: Vec4) -> Vec4 {
        let mut r = Vec4::ZERO;
        for row in 0..4 {
            r[row] = self.m[0][row] * v.x + self.m[1][row] * v.y + self.m[2][row] * v.z + self.m[3][row] * v.w;
        }
        r
    }

    /// Transforms a point and divides by the resulting `w`.
    #[inline]
    pub fn project_point(&self, p: Vec3) -> Vec3 {
        self.transform_vec4(Vec4::from_point(p)).truncate()
    }

    /// Splits an affine matrix into translation, rotation and scale.
    ///
    /// Scale is the length of each axis; a negative determinant flips the
    /// sign of the X scale so the remaining rotation stays proper. Shear
    /// is not represented; use [`Mat4::decompose_total`] for that.
    pub fn decompose(&self) -> (Vec3, Quat, Vec3) {
        let mut scale = Vec3::new(self.axis(0).length(), self.axis(1).length(), self.axis(2).length());
        if self.linear().determinant() < 0.0 {
            scale.x = -scale.x;
        }
        let safe = |v: Vec3, s: f32| if s != 0.0 { v / s } else { v };
        let rot = Mat3::from_col_vecs(
            safe(self.axis(0), scale.x),
            safe(self.axis(1), scale.y),
            safe(self.axis(2), scale.z),
        );
        (self.translation(), Quat::from_mat3(&rot), scale)
    }

    /// Full polar and spectral decomposition, including stretch rotation.
    pub fn decompose_total(&self) -> AffineParts {
        decompose_affine(self)
    }

    /// Interpolates two affine matrices.
    ///
    /// Both matrices are decomposed; translations and scales are lerped,
    /// rotations slerped, and the result recomposed.
    pub fn interpolate(a: &Self, b: &Self, t: f32) -> Self {
        let pa = a.decompose_total();
        let pb = b.decompose_total();
        AffineParts {
            t: pa.t.lerp(pb.t, t),
            q: pa.q.slerp(pb.q, t),
            u: pa.u.slerp(pb.u, t),
            k: pa.k.lerp(pb.k, t),
            f: if t < 0.5 { pa.f } else { pb.f },
        }
        .compose()
    }

    /// Returns true if all elements are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|v| v.is_finite())
    }

    /// Whether every element differs from `other` by at most `eps`.
    pub fn abs_diff_eq(&self, other: &Self, eps: f32) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }

    /// Converts to glam Mat4.
    #[inline]
    pub fn to_glam(&self) -> glam::Mat4 {
        glam::Mat4::from_cols_array_2d(&self.m)
    }

    /// Creates from glam Mat4.
    #[inline]
    pub fn from_glam(m: glam::Mat4) -> Self {
        Self::from_cols(m.to_cols_array_2d())
    }
}

/// Euler angles (X, Y, Z application order) of a rotation matrix.
pub(crate) fn euler_from_mat3(r: &Mat3) -> (f32, f32, f32) {
    let m = &r.m;
    let sy = (-m[2][0]).clamp(-1.0, 1.0);
    let y = sy.asin();
    if sy.abs() < 0.99999 {
        let x = m[2][1].atan2(m[2][2]);
        let z = m[1][0].atan2(m[0][0]);
        (x, y, z)
    } else {
        let x = (-m[1][2]).atan2(m[1][1]);
        (x, y, 0.0)
    }
}

impl Mul for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform_point(rhs)
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, rhs: Vec4) -> Vec4 {
        self.transform_vec4(rhs)
    }
}

impl Index<usize> for Mat4 {
    type Output = [f32; 4];

    #[inline]
    fn index(&self, i: usize) -> &[f32; 4] {
        &self.m[i]
    }
}

impl IndexMut<usize> for Mat4 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut [f32; 4] {
        &mut self.m[i]
    }
}

impl From<glam::Mat4> for Mat4 {
    #[inline]
    fn from(m: glam::Mat4) -> Self {
        Self::from_glam(m)
    }
}

impl From<Mat4> for glam::Mat4 {
    #[inline]
    fn from(m: Mat4) -> glam::Mat4 {
        m.to_glam()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotations_match_axis_angle() {
        for angle in [0.3f32, -1.2, 2.5] {
            assert!(Mat4::from_rotation_x(angle).abs_diff_eq(&Mat4::from_axis_angle(Vec3::X, angle), 1e-6));
            assert!(Mat4::from_rotation_y(angle).abs_diff_eq(&Mat4::from_axis_angle(Vec3::Y, angle), 1e-6));
            assert!(Mat4::from_rotation_z(angle).abs_diff_eq(&Mat4::from_axis_angle(Vec3::Z, angle), 1e-6));
        }
    }

    #[test]
    fn test_axis_angle_matches_glam() {
        let axis = Vec3::new(1.0, -2.0, 0.5);
        let ours = Mat4::from_axis_angle(axis, 0.8);
        let theirs = glam::Mat4::from_axis_angle(axis.normalize().to_glam(), 0.8);
        assert!(ours.abs_diff_eq(&Mat4::from_glam(theirs), 1e-5));
    }

    #[test]
    fn test_quat_matches_matrix() {
        let q = Quat::from_axis_angle(Vec3::new(0.2, 1.0, -0.3), 1.1);
        let m = Mat4::from_axis_angle(Vec3::new(0.2, 1.0, -0.3), 1.1);
        assert!(Mat4::from_quat(q).abs_diff_eq(&m, 1e-5));
    }

    #[test]
    fn test_euler_roundtrip() {
        let (x, y, z) = (0.4, -0.9, 2.0);
        let m = Mat4::from_euler(x, y, z);
        let (ex, ey, ez) = m.to_euler();
        assert!((ex - x).abs() < 1e-5 && (ey - y).abs() < 1e-5 && (ez - z).abs() < 1e-5);
        assert!(Mat4::from_quat(Quat::from_euler(x, y, z)).abs_diff_eq(&m, 1e-5));
    }

    #[test]
    fn test_euler_gimbal_lock() {
        let m = Mat4::from_euler(0.3, FRAC_PI_2, 0.0);
        let (ex, ey, ez) = m.to_euler();
        let back = Mat4::from_euler(ex, ey, ez);
        assert!(back.abs_diff_eq(&m, 1e-3));
    }

    #[test]
    fn test_inverse() {
        let m = Mat4::from_pos_quat_scale(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_euler(0.1, 0.2, 0.3),
            Vec3::new(2.0, 0.5, 1.5),
        );
        let inv = m.inverse().unwrap();
        assert!((m * inv).abs_diff_eq(&Mat4::IDENTITY, 1e-5));
        assert!(m.inverse_affine().unwrap().abs_diff_eq(&inv, 1e-5));
        assert!(Mat4::ZERO.inverse().is_none());
        assert!(Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0)).inverse_affine().is_none());
    }

    #[test]
    fn test_composition_order() {
        let t = Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0));
        let s = Mat4::from_scale(Vec3::splat(2.0));
        // scale first, then translate
        assert_eq!((t * s).transform_point(Vec3::X), Vec3::new(12.0, 0.0, 0.0));
        assert_eq!((s * t).transform_point(Vec3::X), Vec3::new(22.0, 0.0, 0.0));
        assert_eq!((t * s).transform_vector(Vec3::X), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_perspective_depth_range() {
        let p = Mat4::perspective(FRAC_PI_2, 1.0, 1.0, 100.0);
        let near = p.project_point(Vec3::new(0.0, 0.0, 1.0));
        let far = p.project_point(Vec3::new(0.0, 0.0, 100.0));
        assert!(near.z.abs() < 1e-6);
        assert!((far.z - 1.0).abs() < 1e-5);
        // 90 degree fov: the edge of the near plane maps to x = 1
        let edge = p.project_point(Vec3::new(1.0, 0.0, 1.0));
        assert!((edge.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_perspective_rect_centered_matches() {
        let a = Mat4::perspective(FRAC_PI_2, 1.0, 0.5, 50.0);
        let b = Mat4::perspective_rect(-1.0, 1.0, 1.0, -1.0, 0.5, 50.0);
        assert!(a.abs_diff_eq(&b, 1e-5));
    }

    #[test]
    fn test_orthographic_rect() {
        let o = Mat4::orthographic_rect(0.0, 10.0, 5.0, -5.0, 1.0, 11.0);
        let p = o.project_point(Vec3::new(10.0, -5.0, 11.0));
        assert!(p.abs_diff_eq(Vec3::new(1.0, -1.0, 1.0), 1e-6));
    }

    #[test]
    fn test_look_at() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO, Vec3::Y);
        let p = view.transform_point(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), 1e-6));
        assert_eq!(Mat4::look_at(Vec3::ONE, Vec3::ONE, Vec3::Y), Mat4::IDENTITY);
    }

    #[test]
    fn test_decompose_simple() {
        let q = Quat::from_euler(0.5, -0.25, 1.0);
        let m = Mat4::from_pos_quat_scale(Vec3::new(4.0, 5.0, 6.0), q, Vec3::new(1.0, 2.0, 3.0));
        let (t, r, s) = m.decompose();
        assert!(t.abs_diff_eq(Vec3::new(4.0, 5.0, 6.0), 1e-6));
        assert!(s.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));
        assert!(r.same_rotation(q, 1e-5));
    }

    #[test]
    fn test_decompose_mirror() {
        let m = Mat4::from_scale(Vec3::new(-2.0, 1.0, 1.0));
        let (_, r, s) = m.decompose();
        assert!(s.abs_diff_eq(Vec3::new(-2.0, 1.0, 1.0), 1e-6));
        assert!(r.same_rotation(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn test_interpolate_endpoints() {
        let a = Mat4::from_pos_quat_scale(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);
        let b = Mat4::from_pos_quat_scale(
            Vec3::new(10.0, 0.0, 0.0),
            Quat::from_axis_angle(Vec3::Y, 1.0),
            Vec3::splat(3.0),
        );
        assert!(Mat4::interpolate(&a, &b, 0.0).abs_diff_eq(&a, 1e-4));
        assert!(Mat4::interpolate(&a, &b, 1.0).abs_diff_eq(&b, 1e-4));
        let mid = Mat4::interpolate(&a, &b, 0.5);
        assert!(mid.translation().abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), 1e-4));
        let (_, r, s) = mid.decompose();
        assert!(s.abs_diff_eq(Vec3::splat(2.0), 1e-3));
        assert!(r.same_rotation(Quat::from_axis_angle(Vec3::Y, 0.5), 1e-3));
    }

    #[test]
    fn test_glam_roundtrip() {
        let m = Mat4::from_euler(0.1, 0.2, 0.3) * Mat4::from_translation(Vec3::ONE);
        let p = Vec3::new(1.0, 2.0, 3.0);
        let g = m.to_glam().transform_point3(p.to_glam());
        assert!(Vec3::from_glam(g).abs_diff_eq(m.transform_point(p), 1e-5));
    }
}
