//! Scalar helpers shared by the geometry code.
//!
//! - Interpolation ([`lerp`], [`inverse_lerp`], [`remap`])
//! - Smooth transitions ([`smoothstep`], [`smootherstep`])
//! - Tolerance checks ([`approx_eq`], [`is_zero`])
//!
//! # Usage
//!
//! ```rust
//! use vx_math::{lerp, smoothstep, approx_eq};
//!
//! assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
//! assert!(approx_eq(smoothstep(0.0, 1.0, 0.5), 0.5, 1e-6));
//! ```

/// Tolerance used by geometric predicates.
pub const EPSILON: f32 = 1e-6;

/// Half of pi.
pub const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;

/// Linear interpolation between two values.
///
/// Returns `a` when `t = 0.0`, and `b` when `t = 1.0`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Inverse linear interpolation. Returns 0 when `a == b`.
///
/// ```rust
/// use vx_math::inverse_lerp;
///
/// assert_eq!(inverse_lerp(0.0, 10.0, 5.0), 0.5);
/// ```
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() < 1e-10 {
        0.0
    } else {
        (value - a) / (b - a)
    }
}

/// Maps `value` from `[in_min, in_max]` to `[out_min, out_max]`.
#[inline]
pub fn remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    lerp(out_min, out_max, inverse_lerp(in_min, in_max, value))
}

/// Clamps a value to `[min, max]`.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Clamps a value to `[0, 1]`.
#[inline]
pub fn saturate(value: f32) -> f32 {
    clamp(value, 0.0, 1.0)
}

/// Hermite interpolation between two edges.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = saturate(inverse_lerp(edge0, edge1, x));
    t * t * (3.0 - 2.0 * t)
}

/// Quintic variant of [`smoothstep`] with zero second derivative at the edges.
#[inline]
pub fn smootherstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = saturate(inverse_lerp(edge0, edge1, x));
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Sign of `x` as -1, 0 or 1.
#[inline]
pub fn sign(x: f32) -> f32 {
    if x < 0.0 {
        -1.0
    } else if x > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Whether `a` and `b` differ by at most `eps`.
#[inline]
pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

/// Whether `x` is within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(x: f32) -> bool {
    x.abs() < EPSILON
}

/// Degrees to radians.
#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * (std::f32::consts::PI / 180.0)
}

/// Radians to degrees.
#[inline]
pub fn rad_to_deg(rad: f32) -> f32 {
    rad * (180.0 / std::f32::consts::PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
    }

    #[test]
    fn test_inverse_lerp_degenerate() {
        assert_eq!(inverse_lerp(3.0, 3.0, 7.0), 0.0);
        assert_eq!(inverse_lerp(0.0, 10.0, 10.0), 1.0);
    }

    #[test]
    fn test_remap() {
        assert_eq!(remap(0.5, 0.0, 1.0, 0.0, 100.0), 50.0);
        assert_eq!(remap(50.0, 0.0, 100.0, -1.0, 1.0), 0.0);
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert_eq!(smootherstep(0.0, 1.0, 1.0), 1.0);
    }

    #[test]
    fn test_sign_and_tolerance() {
        assert_eq!(sign(-3.0), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert!(approx_eq(1.0, 1.0 + 1e-7, EPSILON));
        assert!(is_zero(1e-7));
        assert!(!is_zero(1e-3));
    }

    #[test]
    fn test_angle_units() {
        assert!(approx_eq(deg_to_rad(180.0), std::f32::consts::PI, 1e-6));
        assert!(approx_eq(rad_to_deg(HALF_PI), 90.0, 1e-4));
    }
}
