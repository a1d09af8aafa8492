//! Ray casting utilities for pointer picking
//!
//! Screen rays come from inverting the same view-projection matrix the camera
//! renders with, so picks line up with what is on screen at any aspect ratio.

use macroquad::math::{Mat4, Vec2, Vec3, Vec4};

/// A 3D ray with origin and direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3, // Normalized
}

impl Ray {
    /// Create a new ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Get point at distance t along ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Express the ray in another frame (e.g. world to object local)
    ///
    /// The direction is left unnormalized so that `t` keeps meaning the same
    /// point in both frames.
    pub fn transformed(&self, m: &Mat4) -> Ray {
        Ray {
            origin: m.transform_point3(self.origin),
            direction: m.transform_vector3(self.direction),
        }
    }
}

/// Generate a ray from a screen pixel through the camera.
///
/// `inverse_view_proj` is the inverse of the camera's (GL convention)
/// view-projection matrix. Returns None if the matrix is degenerate.
pub fn screen_to_ray(screen: Vec2, screen_size: Vec2, inverse_view_proj: &Mat4) -> Option<Ray> {
    if screen_size.x <= 0.0 || screen_size.y <= 0.0 {
        return None;
    }

    let ndc_x = screen.x / screen_size.x * 2.0 - 1.0;
    let ndc_y = 1.0 - screen.y / screen_size.y * 2.0;

    let unproject = |z: f32| -> Option<Vec3> {
        let p = *inverse_view_proj * Vec4::new(ndc_x, ndc_y, z, 1.0);
        if p.w.abs() < 1e-9 {
            return None;
        }
        Some(p.truncate() / p.w)
    };

    let near = unproject(-1.0)?;
    let far = unproject(1.0)?;
    let direction = far - near;
    if !direction.is_finite() || direction.length_squared() < 1e-12 {
        return None;
    }
    Some(Ray::new(near, direction))
}

/// Find the intersection of a ray with a plane.
///
/// Returns the distance along the ray to the intersection point,
/// or None if the ray is parallel to the plane or intersection is behind ray origin.
pub fn ray_plane_intersection(ray: &Ray, plane_point: Vec3, plane_normal: Vec3) -> Option<f32> {
    let denom = ray.direction.dot(plane_normal);
    if denom.abs() < 0.0001 {
        return None; // Ray parallel to plane
    }

    let t = (plane_point - ray.origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None; // Intersection behind ray origin
    }

    Some(t)
}

/// Nearest non-negative hit distance against a sphere, if any
pub fn ray_sphere_intersection(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let a = ray.direction.length_squared();
    if a < 1e-12 {
        return None;
    }
    let half_b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = (-half_b - root) / a;
    if near >= 0.0 {
        return Some(near);
    }
    // Origin inside the sphere
    let far = (-half_b + root) / a;
    (far >= 0.0).then_some(far)
}

/// Ray-triangle intersection using the Möller–Trumbore algorithm
///
/// Two-sided. Returns the distance along the ray in units of `direction`,
/// so an unnormalized (transformed) ray still yields comparable hits.
pub fn ray_triangle_intersection(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > EPSILON).then_some(t)
}
