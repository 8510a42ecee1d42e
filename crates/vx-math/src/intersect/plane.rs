//! Ray/plane tests and plane/plane intersections.

use super::{Hit, Range};
use crate::interp::EPSILON;
use crate::{Plane, Ray};

fn hit_plane(ray: &Ray, plane: &Plane, range: Range) -> Option<Hit> {
    let denom = plane.normal.dot(ray.direction);
    if denom.abs() < EPSILON {
        return None;
    }
    let t = -plane.distance(ray.origin) / denom;
    range.contains(t).then(|| Hit {
        point: ray.at(t),
        t,
        normal: plane.normal,
    })
}

/// Ray against plane. Rays parallel to the plane never hit.
pub fn ray_plane(ray: &Ray, plane: &Plane) -> Option<Hit> {
    hit_plane(ray, plane, Range::RAY)
}

/// Segment against plane.
pub fn segment_plane(seg: &Ray, plane: &Plane) -> Option<Hit> {
    hit_plane(seg, plane, Range::SEGMENT)
}

/// Infinite line against plane.
pub fn line_plane(line: &Ray, plane: &Plane) -> Option<Hit> {
    hit_plane(line, plane, Range::LINE)
}

/// Common point of three planes, `None` when two of them are parallel.
pub fn planes_point(a: &Plane, b: &Plane, c: &Plane) -> Option<crate::Vec3> {
    let bc = b.normal.cross(c.normal);
    let det = a.normal.dot(bc);
    if det.abs() < EPSILON {
        return None;
    }
    let ca = c.normal.cross(a.normal);
    let ab = a.normal.cross(b.normal);
    Some((bc * -a.d + ca * -b.d + ab * -c.d) / det)
}

/// Intersection line of two planes, `None` when they are parallel.
///
/// The returned direction is `a.normal x b.normal` and the origin is the
/// point of the line closest to the world origin.
pub fn planes_line(a: &Plane, b: &Plane) -> Option<Ray> {
    let dir = a.normal.cross(b.normal);
    let len_sq = dir.length_squared();
    if len_sq < EPSILON {
        return None;
    }
    let origin = (b.normal.cross(dir) * -a.d + dir.cross(a.normal) * -b.d) / len_sq;
    Some(Ray::new(origin, dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;

    #[test]
    fn test_ray_plane() {
        let p = Plane::from_point_normal(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        let hit = ray_plane(&Ray::new(Vec3::ZERO, Vec3::Z), &p).unwrap();
        assert_eq!(hit.t, 5.0);
        assert_eq!(hit.point, Vec3::new(0.0, 0.0, 5.0));
        assert!(ray_plane(&Ray::new(Vec3::ZERO, -Vec3::Z), &p).is_none());
        assert!(ray_plane(&Ray::new(Vec3::ZERO, Vec3::X), &p).is_none());
        assert_eq!(line_plane(&Ray::new(Vec3::ZERO, -Vec3::Z), &p).unwrap().t, -5.0);
    }

    #[test]
    fn test_segment_plane() {
        let p = Plane::from_point_normal(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(segment_plane(&Ray::from_points(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0)), &p).is_none());
        let hit = segment_plane(&Ray::from_points(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)), &p).unwrap();
        assert_eq!(hit.t, 0.5);
    }

    #[test]
    fn test_planes_point() {
        let x = Plane::from_point_normal(Vec3::new(1.0, 0.0, 0.0), Vec3::X);
        let y = Plane::from_point_normal(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
        let z = Plane::from_point_normal(Vec3::new(0.0, 0.0, 3.0), Vec3::Z);
        let p = planes_point(&x, &y, &z).unwrap();
        assert!(p.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));
        assert!(planes_point(&x, &x, &z).is_none());
    }

    #[test]
    fn test_planes_line() {
        let x = Plane::from_point_normal(Vec3::new(1.0, 0.0, 0.0), Vec3::X);
        let y = Plane::from_point_normal(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
        let line = planes_line(&x, &y).unwrap();
        assert!(line.origin.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-6));
        assert!(line.direction.abs_diff_eq(Vec3::Z, 1e-6));
        assert!(planes_line(&x, &x.flip()).is_none());
    }
}
