//! View frustums.
//!
//! A [`Frustum`] is described by an eye position, an orthonormal basis
//! (`right`, `up`, `dir`), near and far distances, a horizontal field of
//! view and an aspect ratio (width / height). [`Frustum::update`] derives
//! the six bounding planes, whose normals point **outwards**: a point is
//! inside when its distance to every plane is not positive.
//!
//! The frustum agrees with [`Mat4::perspective`] and [`Mat4::look_at`]
//! built from the same parameters.
//!
//! # Usage
//!
//! ```rust
//! use vx_math::{BBox, Containment, Frustum, Vec3};
//!
//! let f = Frustum::new(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z, 1.0, 100.0, 1.2, 1.0);
//! assert!(f.is_inside(Vec3::new(0.0, 0.0, 50.0)));
//! let b = BBox::from_center_extents(Vec3::new(0.0, 0.0, -10.0), Vec3::ONE);
//! assert_eq!(f.classify_box(&b), Containment::Outside);
//! ```

use crate::intersect::planes_point;
use crate::{BBox, Containment, Mat4, Obb, Plane, Sphere, Vec3};

/// Index of each plane in [`Frustum::planes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum FrustumPlane {
    /// Near clip plane
    Near = 0,
    /// Far clip plane
    Far = 1,
    /// Left side
    Left = 2,
    /// Right side
    Right = 3,
    /// Top side
    Top = 4,
    /// Bottom side
    Bottom = 5,
}

/// Truncated view pyramid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Eye position
    pub origin: Vec3,
    /// Unit right vector
    pub right: Vec3,
    /// Unit up vector
    pub up: Vec3,
    /// Unit view direction
    pub dir: Vec3,
    /// Near distance along `dir`
    pub near: f32,
    /// Far distance along `dir`
    pub far: f32,
    /// Horizontal field of view in radians
    pub fov: f32,
    /// Width / height
    pub aspect: f32,
    /// Bounding planes, indexed by [`FrustumPlane`]
    pub planes: [Plane; 6],
}

impl Default for Frustum {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z, 1.0, 100.0, std::f32::consts::FRAC_PI_2, 1.0)
    }
}

impl Frustum {
    /// Creates a frustum and computes its planes.
    #[allow(clippy::too_many_arguments)]
    pub fn new(origin: Vec3, right: Vec3, up: Vec3, dir: Vec3, near: f32, far: f32, fov: f32, aspect: f32) -> Self {
        let mut f = Self {
            origin,
            right: right.normalize(),
            up: up.normalize(),
            dir: dir.normalize(),
            near,
            far,
            fov,
            aspect,
            planes: [Plane::default(); 6],
        };
        f.update();
        f
    }

    /// Frustum of a perspective view-projection matrix.
    ///
    /// The planes are extracted from the matrix rows; the eye, basis and
    /// view parameters are recovered from them. Returns `None` when the
    /// matrix has no perspective apex.
    pub fn from_matrix(view_proj: &Mat4) -> Option<Self> {
        let r = [view_proj.row(0), view_proj.row(1), view_proj.row(2), view_proj.row(3)];
        // inward-facing planes (x_clip in [-w, w], z_clip in [0, w]), flipped outward
        let outward = |v: crate::Vec4| Plane::new(-v.xyz(), -v.w).normalize();
        let near = outward(r[2]);
        let far = outward(r[3] - r[2]);
        let left = outward(r[3] + r[0]);
        let right = outward(r[3] - r[0]);
        let bottom = outward(r[3] + r[1]);
        let top = outward(r[3] - r[1]);

        let origin = planes_point(&left, &right, &top)?;
        let dir = -near.normal;
        let right_axis = (right.normal - left.normal).try_normalize()?;
        let up_axis = (top.normal - bottom.normal).try_normalize()?;

        // side plane normals lean back towards the eye by the half angle
        let tan_h = -right.normal.dot(dir) / right.normal.dot(right_axis);
        let tan_v = -top.normal.dot(dir) / top.normal.dot(up_axis);
        if !(tan_h > 0.0 && tan_v > 0.0) {
            return None;
        }

        Some(Self::new(
            origin,
            right_axis,
            up_axis,
            dir,
            near.distance(origin).abs(),
            far.distance(origin).abs(),
            2.0 * tan_h.atan(),
            tan_h / tan_v,
        ))
    }

    /// Half width of the near rectangle.
    #[inline]
    pub fn right_bound(&self) -> f32 {
        self.near * (self.fov * 0.5).tan()
    }

    /// Half height of the near rectangle.
    #[inline]
    pub fn up_bound(&self) -> f32 {
        self.right_bound() / self.aspect
    }

    /// Recomputes the planes from the frustum parameters.
    pub fn update(&mut self) {
        let rb = self.right_bound();
        let ub = self.up_bound();
        let near_center = self.dir * self.near;

        let mut planes = [
            Plane::from_point_normal(self.origin + near_center, -self.dir),
            Plane::from_point_normal(self.origin + self.dir * self.far, self.dir),
            Plane::from_point_normal(self.origin, (near_center - self.right * rb).cross(self.up)),
            Plane::from_point_normal(self.origin, self.up.cross(near_center + self.right * rb)),
            Plane::from_point_normal(self.origin, (near_center + self.up * ub).cross(self.right)),
            Plane::from_point_normal(self.origin, self.right.cross(near_center - self.up * ub)),
        ];

        // orient every plane away from the interior regardless of basis handedness
        let inside = self.origin + self.dir * ((self.near + self.far) * 0.5);
        for p in planes.iter_mut() {
            if p.distance(inside) > 0.0 {
                *p = p.flip();
            }
        }
        self.planes = planes;
    }

    /// Plane by name.
    #[inline]
    pub fn plane(&self, which: FrustumPlane) -> &Plane {
        &self.planes[which as usize]
    }

    /// Bit set of the planes `p` is outside of (bit `i` for plane `i`).
    pub fn classify_point(&self, p: Vec3) -> u32 {
        self.planes
            .iter()
            .enumerate()
            .filter(|(_, plane)| plane.distance(p) > 0.0)
            .fold(0, |acc, (i, _)| acc | (1 << i))
    }

    /// Whether `p` is inside or on the frustum.
    #[inline]
    pub fn is_inside(&self, p: Vec3) -> bool {
        self.classify_point(p) == 0
    }

    fn classify_by(&self, separation: impl Fn(&Plane) -> f32) -> Containment {
        let mut straddles = false;
        for plane in &self.planes {
            let s = separation(plane);
            if s > 0.0 {
                return Containment::Outside;
            }
            if s == 0.0 {
                straddles = true;
            }
        }
        if straddles { Containment::Intersect } else { Containment::Inside }
    }

    /// Conservative classification of an axis-aligned box: boxes near a
    /// frustum corner may report `Intersect` while being outside.
    pub fn classify_box(&self, b: &BBox) -> Containment {
        self.classify_by(|p| p.classify_box(b))
    }

    /// Conservative classification of an oriented box.
    pub fn classify_obb(&self, b: &Obb) -> Containment {
        self.classify_by(|p| p.classify_obb(b))
    }

    /// Conservative classification of a sphere.
    pub fn classify_sphere(&self, s: &Sphere) -> Containment {
        self.classify_by(|p| {
            let d = p.distance(s.center);
            if d > s.radius {
                d - s.radius
            } else if d < -s.radius {
                d + s.radius
            } else {
                0.0
            }
        })
    }

    /// The eight corners: near rectangle first, each rectangle ordered
    /// like [`BBox::vertices`] on (right, up).
    pub fn vertices(&self) -> [Vec3; 8] {
        let rb = self.right_bound();
        let ub = self.up_bound();
        let scale = if self.near != 0.0 { self.far / self.near } else { 0.0 };
        std::array::from_fn(|i| {
            let sx = if i & 1 != 0 { rb } else { -rb };
            let sy = if i & 2 != 0 { ub } else { -ub };
            let local = self.dir * self.near + self.right * sx + self.up * sy;
            let k = if i & 4 != 0 { scale } else { 1.0 };
            self.origin + local * k
        })
    }

    /// Frustum moved by `m`. Scale along each axis is folded into the
    /// distances, field of view and aspect ratio.
    pub fn transform(&self, m: &Mat4) -> Self {
        let right = m.transform_vector(self.right);
        let up = m.transform_vector(self.up);
        let dir = m.transform_vector(self.dir);
        let (lr, lu, ld) = (right.length(), up.length(), dir.length());
        if lr == 0.0 || lu == 0.0 || ld == 0.0 {
            return *self;
        }
        let tan_h = (self.fov * 0.5).tan() * lr / ld;
        Self::new(
            m.transform_point(self.origin),
            right,
            up,
            dir,
            self.near * ld,
            self.far * ld,
            2.0 * tan_h.atan(),
            self.aspect * lr / lu,
        )
    }
}
