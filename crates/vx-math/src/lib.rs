//! # vx-math
//!
//! 3D math for the vx toolkit: value types, bounding volumes and the
//! geometric query kernel.
//!
//! - [`Vec2`], [`Vec3`], [`Vec4`], [`Quat`] - vectors and rotations
//! - [`Mat3`], [`Mat4`] - linear and affine transforms, projections
//! - [`decompose_affine`] - polar and spectral decomposition of a transform
//! - [`Ray`], [`Plane`], [`Sphere`], [`BBox`], [`Obb`], [`Frustum`] - primitives
//! - [`intersect`] and [`distance`] - pairwise queries between primitives
//! - [`EigenSolver`] and [`best_fit_obb`] - oriented boxes fitted to point clouds
//! - [`batch`] - SIMD transforms of vertex buffers
//!
//! # Design
//!
//! [`Mat4`] stores its four columns (X axis, Y axis, Z axis, translation)
//! with column vectors, the same memory layout as `glam::Mat4`:
//!
//! ```text
//! world = matrix * local
//! (a * b) * v == a * (b * v)
//! ```
//!
//! [`Mat3`] is row-major, also with column vectors. Projection matrices
//! are left-handed with depth mapped to `[0, 1]`.
//!
//! One [`Ray`] type (origin plus direction) describes rays, segments and
//! lines. The query function name says which: `ray_*` accepts `t >= 0`,
//! `segment_*` accepts `0 <= t <= 1`, `line_*` accepts any `t`.
//!
//! # Usage
//!
//! ```rust
//! use vx_math::{BBox, Mat4, Quat, Vec3};
//!
//! let m = Mat4::from_pos_quat_scale(Vec3::new(0.0, 2.0, 0.0), Quat::IDENTITY, Vec3::ONE);
//! let b = BBox::new(Vec3::splat(-1.0), Vec3::ONE).transform(&m);
//! assert_eq!(b.center(), Vec3::new(0.0, 2.0, 0.0));
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - conversions and the general 4x4 inverse
//! - [`wide`] - SIMD lanes for [`batch`]
//! - `vx-core` - [`vx_core::Rect`] for screen projections

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod bbox;
mod decompose;
mod eigen;
mod fit;
mod frustum;
mod interp;
mod mat3;
mod mat4;
mod obb;
mod plane;
mod quat;
mod ray;
mod sphere;
mod vec2;
mod vec3;
mod vec4;

pub mod batch;
pub mod distance;
pub mod intersect;

pub use bbox::*;
pub use decompose::*;
pub use eigen::*;
pub use fit::*;
pub use frustum::*;
pub use interp::*;
pub use mat3::*;
pub use mat4::*;
pub use obb::*;
pub use plane::*;
pub use quat::*;
pub use ray::*;
pub use sphere::*;
pub use vec2::*;
pub use vec3::*;
pub use vec4::*;

/// Re-export glam types for direct use
pub mod glam {
    pub use ::glam::{
        Mat3 as GlamMat3, Mat4 as GlamMat4, Quat as GlamQuat, Vec2 as GlamVec2, Vec3 as GlamVec3, Vec4 as GlamVec4,
    };
}

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use vx_math::prelude::*;
///
/// let r = Ray::from_points(Vec3::ZERO, Vec3::X);
/// assert!(intersect::ray_box(&r, &BBox::new(Vec3::splat(-0.5), Vec3::ONE)).is_some());
/// assert!(intersect::ray_box(&r, &BBox::new(Vec3::splat(0.5), Vec3::ONE)).is_none());
/// ```
pub mod prelude {
    pub use crate::{
        BBox, Containment, Frustum, Mat3, Mat4, Obb, Plane, Quat, Ray, Side, Sphere, Vec2, Vec3, Vec4,
    };
    pub use crate::{distance, intersect};
}
