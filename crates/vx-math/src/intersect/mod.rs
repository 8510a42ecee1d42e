//! Intersection tests between primitives.
//!
//! Queries that only need a yes/no answer return `bool`. Queries that
//! locate the contact return `Option` of a hit record:
//!
//! - [`Hit`]: point, parameter along the ray and surface normal
//! - [`BoxHit`]: entry and exit hits through a box
//! - [`FaceHit`]: a [`Hit`] plus barycentric coordinates on a triangle
//!
//! Functions taking a [`Ray`](crate::Ray) come in three flavours, following
//! the parameter range of the ray: `ray_*` (`t >= 0`), `segment_*`
//! (`t` in `[0, 1]`) and `line_*` (any `t`).
//!
//! # Usage
//!
//! ```rust
//! use vx_math::intersect::{obb_obb, ray_box};
//! use vx_math::{BBox, Mat4, Obb, Ray, Vec3};
//!
//! let b = BBox::new(Vec3::splat(-1.0), Vec3::ONE);
//! let hit = ray_box(&Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X), &b).unwrap();
//! assert_eq!(hit.entry.t, 4.0);
//! assert_eq!(hit.entry.normal, -Vec3::X);
//!
//! let a = Obb::from_bbox(&b, &Mat4::IDENTITY);
//! let c = Obb::from_bbox(&b, &Mat4::from_translation(Vec3::new(1.5, 0.0, 0.0)));
//! assert!(obb_obb(&a, &c));
//! ```

mod aabb;
mod face;
mod frustum;
mod obb;
mod plane;
mod sphere;

pub use aabb::*;
pub use face::*;
pub use frustum::*;
pub use obb::*;
pub use plane::*;
pub use sphere::*;

use crate::Vec3;

/// A contact point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hit {
    /// Contact point
    pub point: Vec3,
    /// Parameter along the ray
    pub t: f32,
    /// Surface normal at the contact, zero when undefined
    pub normal: Vec3,
}

/// Entry and exit through a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxHit {
    /// Where the ray enters; the start point when `inside`
    pub entry: Hit,
    /// Where the ray leaves; the end point when a segment ends inside
    pub exit: Hit,
    /// The ray starts inside the box
    pub inside: bool,
}

/// Contact with a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FaceHit {
    /// Contact point, parameter and face normal
    pub hit: Hit,
    /// Barycentric weight of the second vertex
    pub u: f32,
    /// Barycentric weight of the third vertex
    pub v: f32,
}

/// Parameter range of a [`Ray`](crate::Ray) query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Range {
    pub lo: f32,
    pub hi: f32,
}

impl Range {
    pub const RAY: Self = Self { lo: 0.0, hi: f32::INFINITY };
    pub const SEGMENT: Self = Self { lo: 0.0, hi: 1.0 };
    pub const LINE: Self = Self {
        lo: f32::NEG_INFINITY,
        hi: f32::INFINITY,
    };

    #[inline]
    pub fn contains(&self, t: f32) -> bool {
        t >= self.lo && t <= self.hi
    }
}
