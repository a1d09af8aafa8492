//! Placement projection
//!
//! Turns a world-space pointer hit on the island top face into island-local
//! coordinates (optionally snapped to a half-unit grid) and carries the
//! pending rotation/scale the wheel has dialled in for the next prop.

use crate::math::{ray_plane_intersection, sign, Ray};
use crate::scene::{PropKind, SceneObject, SceneRegistry};
use crate::world::{SURFACE_HEIGHT, SURFACE_RADIUS};
use macroquad::math::{Mat4, Vec3};

/// Grid cells per unit when snapping
pub const SNAP_DIVISIONS: f32 = 2.0;
pub const ROTATE_STEP: f32 = 0.2;
pub const SCALE_STEP: f32 = 0.1;
pub const MIN_SCALE: f32 = 0.2;
pub const MAX_SCALE: f32 = 3.0;

/// Round to the nearest half unit (halves round up)
pub fn snap(v: f32) -> f32 {
    (v * SNAP_DIVISIONS + 0.5).floor() / SNAP_DIVISIONS
}

/// Snap X and Z of an island-local point; Y is left alone
pub fn snap_point(p: Vec3, enabled: bool) -> Vec3 {
    if enabled {
        Vec3::new(snap(p.x), p.y, snap(p.z))
    } else {
        p
    }
}

/// Project a world-space hit into the surface frame, snapping if asked
pub fn project_world_hit(world_point: Vec3, surface_world: &Mat4, snap_enabled: bool) -> Vec3 {
    let local = surface_world.inverse().transform_point3(world_point);
    snap_point(local, snap_enabled)
}

/// World point where a world-space ray meets the top face of the surface
/// placed at `surface_world`, if it lands inside the disc
pub fn surface_hit(ray: &Ray, surface_world: &Mat4) -> Option<Vec3> {
    let center = surface_world.transform_point3(Vec3::new(0.0, SURFACE_HEIGHT, 0.0));
    let normal = surface_world.transform_vector3(Vec3::Y).normalize_or_zero();
    let t = ray_plane_intersection(ray, center, normal)?;
    let world = ray.at(t);
    let local = surface_world.inverse().transform_point3(world);
    if local.x * local.x + local.z * local.z > SURFACE_RADIUS * SURFACE_RADIUS {
        return None;
    }
    Some(world)
}

/// Yaw and scale applied to the next placed prop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPlacement {
    pub rotation: f32,
    pub scale: f32,
}

impl Default for PendingPlacement {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

impl PendingPlacement {
    /// One wheel event. `delta_y` uses scroll-down-positive; only its sign
    /// matters. With the modifier held the wheel scales instead of rotating.
    pub fn apply_wheel(&mut self, delta_y: f32, modifier: bool) {
        let delta = sign(delta_y);
        if modifier {
            self.scale = (self.scale - delta * SCALE_STEP).clamp(MIN_SCALE, MAX_SCALE);
        } else {
            self.rotation += delta * ROTATE_STEP;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Preview of the next placement, in island space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostPlacement {
    pub kind: PropKind,
    pub position: Vec3,
    pub rotation: f32,
    pub scale: f32,
}

impl GhostPlacement {
    pub fn new(kind: PropKind, position: Vec3, pending: &PendingPlacement) -> Self {
        Self {
            kind,
            position,
            rotation: pending.rotation,
            scale: pending.scale,
        }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            macroquad::math::Quat::from_rotation_y(self.rotation),
            self.position,
        )
    }
}

/// Append a prop at an island-local position and return it
pub fn place(registry: &mut SceneRegistry, kind: PropKind, position: Vec3, pending: &PendingPlacement) -> SceneObject {
    let object = SceneObject::new(registry.fresh_id(), kind, position, pending.rotation, pending.scale);
    registry.add(object.clone());
    object
}
