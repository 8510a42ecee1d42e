//! Sphere tests, static and swept.

use super::Hit;
use crate::{Ray, Sphere, Vec3};

/// Roots of `a t^2 + b t + c = 0` in increasing order.
fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 || a == 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    // avoids cancellation when b and sq have the same magnitude
    let q = if b < 0.0 { -0.5 * (b - sq) } else { -0.5 * (b + sq) };
    let (r0, r1) = if q != 0.0 { (q / a, c / q) } else { (0.0, 0.0) };
    Some((r0.min(r1), r0.max(r1)))
}

/// Ray against sphere: the nearest intersection with `t >= 0`. A ray
/// starting inside hits the far side.
pub fn ray_sphere(ray: &Ray, s: &Sphere) -> Option<Hit> {
    let oc = ray.origin - s.center;
    let a = ray.direction.length_squared();
    let b = 2.0 * ray.direction.dot(oc);
    let c = oc.length_squared() - s.radius * s.radius;
    let (t0, t1) = solve_quadratic(a, b, c)?;
    let t = if t0 >= 0.0 {
        t0
    } else if t1 >= 0.0 {
        t1
    } else {
        return None;
    };
    let point = ray.at(t);
    let normal = if s.radius > 0.0 {
        (point - s.center) / s.radius
    } else {
        Vec3::ZERO
    };
    Some(Hit { point, t, normal })
}

/// Whether two spheres overlap.
#[inline]
pub fn sphere_sphere(a: &Sphere, b: &Sphere) -> bool {
    a.intersects(b)
}

/// First and last contact times of two spheres moving by `va` and `vb`
/// over the unit time interval.
///
/// Returns `None` when they never touch during `[0, 1]`. Spheres that
/// already overlap report a first contact of `0.0`.
pub fn sweep_sphere_sphere(a: &Sphere, va: Vec3, b: &Sphere, vb: Vec3) -> Option<(f32, f32)> {
    let rel_v = vb - va;
    let ab = b.center - a.center;
    let r = a.radius + b.radius;
    let c = ab.length_squared() - r * r;
    let qa = rel_v.length_squared();
    let qb = 2.0 * rel_v.dot(ab);

    if c <= 0.0 {
        let last = solve_quadratic(qa, qb, c).map_or(f32::INFINITY, |(_, t1)| t1);
        return Some((0.0, last));
    }
    let (t0, t1) = solve_quadratic(qa, qb, c)?;
    (t0 <= 1.0 && t1 >= 0.0).then_some((t0, t1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_sphere() {
        let s = Sphere::new(Vec3::new(0.0, 0.0, 10.0), 2.0);
        let hit = ray_sphere(&Ray::new(Vec3::ZERO, Vec3::Z), &s).unwrap();
        assert!((hit.t - 8.0).abs() < 1e-5);
        assert!(hit.normal.abs_diff_eq(-Vec3::Z, 1e-5));
        assert!(ray_sphere(&Ray::new(Vec3::ZERO, -Vec3::Z), &s).is_none());
        assert!(ray_sphere(&Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::Z), &s).is_none());
    }

    #[test]
    fn test_ray_sphere_from_inside() {
        let s = Sphere::new(Vec3::ZERO, 2.0);
        let hit = ray_sphere(&Ray::new(Vec3::ZERO, Vec3::X), &s).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-6);
        assert!(hit.normal.abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn test_sweep_head_on() {
        let a = Sphere::new(Vec3::ZERO, 1.0);
        let b = Sphere::new(Vec3::new(10.0, 0.0, 0.0), 1.0);
        let (first, last) = sweep_sphere_sphere(&a, Vec3::new(10.0, 0.0, 0.0), &b, Vec3::ZERO).unwrap();
        assert!((first - 0.8).abs() < 1e-5);
        assert!((last - 1.2).abs() < 1e-5);
    }

    #[test]
    fn test_sweep_miss_and_overlap() {
        let a = Sphere::new(Vec3::ZERO, 1.0);
        let b = Sphere::new(Vec3::new(10.0, 0.0, 0.0), 1.0);
        // too slow to reach
        assert!(sweep_sphere_sphere(&a, Vec3::new(5.0, 0.0, 0.0), &b, Vec3::ZERO).is_none());
        // passing beside
        assert!(sweep_sphere_sphere(&a, Vec3::new(10.0, 3.0, 0.0), &b, Vec3::ZERO).is_none());
        // moving apart
        assert!(sweep_sphere_sphere(&a, Vec3::new(-10.0, 0.0, 0.0), &b, Vec3::ZERO).is_none());
        // static overlap
        let c = Sphere::new(Vec3::new(1.0, 0.0, 0.0), 1.0);
        let (first, last) = sweep_sphere_sphere(&a, Vec3::ZERO, &c, Vec3::ZERO).unwrap();
        assert_eq!(first, 0.0);
        assert_eq!(last, f32::INFINITY);
        assert!(sphere_sphere(&a, &c));
    }
}
