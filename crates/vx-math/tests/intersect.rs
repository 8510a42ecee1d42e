//! Cross-module checks of the geometric query kernel.
//!
//! Each test answers the same question two ways (world space against
//! local space, intersection against distance, fitted box against the
//! source points) and checks that the answers agree.

use std::f32::consts::FRAC_PI_2;

use vx_math::distance::{point_face, segment_segment};
use vx_math::intersect::{box_obb, face_sphere, obb_obb, ray_box, ray_obb, segment_face};
use vx_math::{best_fit_obb, decompose_affine, BBox, Containment, Frustum, Mat4, Obb, Quat, Ray, Sphere, Vec3};

fn unit_cube() -> BBox {
    BBox::new(Vec3::splat(-1.0), Vec3::ONE)
}

fn placement() -> Mat4 {
    Mat4::from_pos_quat_scale(
        Vec3::new(5.0, 1.0, -2.0),
        Quat::from_euler(0.3, 0.5, 0.2),
        Vec3::new(2.0, 1.0, 1.5),
    )
}

// ============================================================================
// Ray queries
// ============================================================================

#[test]
fn ray_obb_matches_local_ray_box() {
    let m = placement();
    let obb = Obb::from_bbox(&unit_cube(), &m);
    let ray = Ray::new(Vec3::new(5.0, 1.0, -30.0), Vec3::new(0.0, 0.0, 1.0));

    let world = ray_obb(&ray, &obb).expect("ray through the center must hit");
    let local_ray = ray.transform(&m.inverse().unwrap());
    let local = ray_box(&local_ray, &unit_cube()).expect("local ray must hit too");

    // transforming a ray keeps its parametrization
    assert!((world.entry.t - local.entry.t).abs() < 1e-3);
    assert!((world.exit.t - local.exit.t).abs() < 1e-3);
    assert!(world.entry.point.abs_diff_eq(m.transform_point(local.entry.point), 1e-3));
    assert!(!world.inside);
    // entry normal faces the incoming ray
    assert!(world.entry.normal.dot(ray.direction) < 0.0);
}

#[test]
fn ray_misses_rotated_box_beside_it() {
    let obb = Obb::from_bbox(&unit_cube(), &placement());
    let ray = Ray::new(Vec3::new(20.0, 1.0, -30.0), Vec3::Z);
    assert!(ray_obb(&ray, &obb).is_none());
}

// ============================================================================
// Intersection against distance
// ============================================================================

#[test]
fn segment_face_hit_lies_on_face() {
    let (a, b, c) = (Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 1.0), Vec3::new(0.0, 3.0, 2.0));
    let seg = Ray::from_points(Vec3::new(1.0, 1.0, 10.0), Vec3::new(1.0, 1.0, -10.0));
    let hit = segment_face(&seg, a, b, c).expect("segment crosses the face");
    assert!(point_face(hit.hit.point, a, b, c).dist_sq < 1e-8);
    assert!((0.0..=1.0).contains(&hit.hit.t));
    assert!(hit.u >= 0.0 && hit.v >= 0.0 && hit.u + hit.v <= 1.0);
}

#[test]
fn face_sphere_agrees_with_point_face() {
    let (a, b, c) = (Vec3::ZERO, Vec3::X * 2.0, Vec3::Y * 2.0);
    let center = Vec3::new(3.0, 3.0, 1.0);
    let d = point_face(center, a, b, c).dist_sq.sqrt();
    assert!(face_sphere(a, b, c, &Sphere::new(center, d + 0.01)));
    assert!(!face_sphere(a, b, c, &Sphere::new(center, d - 0.01)));
}

#[test]
fn crossing_segments_have_zero_distance() {
    let a = Ray::from_points(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
    let b = Ray::from_points(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    let c = segment_segment(&a, &b);
    assert!(c.dist_sq < 1e-10);
    assert!((c.s - 0.5).abs() < 1e-6 && (c.t - 0.5).abs() < 1e-6);
}

// ============================================================================
// Bounding volumes
// ============================================================================

#[test]
fn fitted_box_overlaps_source_box() {
    let m = placement();
    let pts = unit_cube().vertices().map(|v| m.transform_point(v));
    let fitted = best_fit_obb(&pts, 0.0).expect("eight points");
    let source = Obb::from_bbox(&unit_cube(), &m);

    assert!(obb_obb(&fitted, &source));
    assert!(fitted.center.abs_diff_eq(source.center, 1e-3));
    let far = Obb::new(fitted.center + Vec3::new(50.0, 0.0, 0.0), fitted.axes, fitted.extents);
    assert!(!obb_obb(&far, &source));

    let aabb = BBox::from_points(&pts);
    assert!(box_obb(&aabb, &fitted));
}

#[test]
fn decomposition_recomposes() {
    let m = placement();
    let parts = decompose_affine(&m);
    assert!(parts.compose().abs_diff_eq(&m, 1e-4));
    assert!(parts.k.abs_diff_eq(Vec3::new(2.0, 1.0, 1.5), 1e-4));
    assert!(parts.t.abs_diff_eq(Vec3::new(5.0, 1.0, -2.0), 1e-6));
}

// ============================================================================
// Frustum culling
// ============================================================================

#[test]
fn frustum_from_view_projection() {
    let eye = Vec3::new(0.0, 0.0, -10.0);
    let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective(FRAC_PI_2, 1.0, 1.0, 100.0);
    let f = Frustum::from_matrix(&(proj * view)).expect("perspective matrix");

    assert!(f.origin.abs_diff_eq(eye, 1e-2));
    assert_eq!(f.classify_sphere(&Sphere::new(Vec3::ZERO, 1.0)), Containment::Inside);
    assert_eq!(f.classify_sphere(&Sphere::new(Vec3::new(0.0, 0.0, -20.0), 1.0)), Containment::Outside);
    assert_ne!(f.classify_box(&BBox::new(Vec3::splat(-100.0), Vec3::splat(100.0))), Containment::Outside);
}

#[test]
fn axis_ray_hits_only_boxes_spanning_its_line() {
    let ray = Ray::from_points(Vec3::ZERO, Vec3::X);
    assert!(ray_box(&ray, &BBox::new(Vec3::splat(-0.5), Vec3::ONE)).is_some());
    // Starts above the ray's y and z, so the line passes beside it.
    assert!(ray_box(&ray, &BBox::new(Vec3::splat(0.5), Vec3::ONE)).is_none());
}
