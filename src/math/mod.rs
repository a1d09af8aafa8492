//! Small geometry helpers on top of macroquad's glam types
//!
//! Everything here is pure and window-free so it can be unit tested.

mod ray;
mod transform;

pub use ray::{ray_plane_intersection, ray_sphere_intersection, ray_triangle_intersection, screen_to_ray, Ray};
pub use transform::{euler_xyz, Transform};

use macroquad::math::Vec3;

/// Linear interpolation between two vectors; `t >= 1` lands exactly on `to`
pub fn lerp_vec3(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    if t >= 1.0 {
        return to;
    }
    from + (to - from) * t
}

/// Sign with `sign(0) == 0` (unlike `f32::signum`, which returns 1 for +0.0)
pub fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.01), -1.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec3::new(0.0, 6.0, 8.0);
        let b = Vec3::new(-2.0, 1.5, 4.0);
        assert!((lerp_vec3(a, b, 0.0) - a).length() < 1e-6);
        assert!((lerp_vec3(a, b, 1.0) - b).length() < 1e-6);
        assert!((lerp_vec3(a, b, 0.5) - Vec3::new(-1.0, 3.75, 6.0)).length() < 1e-6);
    }
}
