//! Position / Euler rotation / scale triple

use macroquad::math::{Mat4, Quat, Vec3};

/// Rotation from XYZ Euler angles: `Rx * Ry * Rz`
pub fn euler_xyz(rotation: Vec3) -> Quat {
    Quat::from_rotation_x(rotation.x)
        * Quat::from_rotation_y(rotation.y)
        * Quat::from_rotation_z(rotation.z)
}

/// Local transform of a node (part, joint, placed object)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z in the local frame
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            ..Self::IDENTITY
        }
    }

    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vec3::new(x, y, z);
        self
    }

    pub fn scaled(mut self, s: f32) -> Self {
        self.scale = Vec3::splat(s);
        self
    }

    pub fn scaled_xyz(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vec3::new(x, y, z);
        self
    }

    /// Local-to-parent matrix: translate * rotate * scale
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, euler_xyz(self.rotation), self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_identity_matrix() {
        assert_eq!(Transform::IDENTITY.to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_translate_rotate_scale_order() {
        let t = Transform::at(1.0, 2.0, 3.0).rotated(0.0, FRAC_PI_2, 0.0).scaled(2.0);
        // +X scaled to 2, yawed a quarter turn to -Z, then translated
        let p = t.to_matrix().transform_point3(Vec3::X);
        assert!(approx(p, Vec3::new(1.0, 2.0, 1.0)));
    }

    #[test]
    fn test_euler_applies_x_in_outer_frame() {
        // Rx * Rz: rotate about local Z first, then about X
        let q = euler_xyz(Vec3::new(FRAC_PI_2, 0.0, FRAC_PI_2));
        let p = q * Vec3::X;
        // Z turns +X into +Y, then X turns +Y into +Z
        assert!(approx(p, Vec3::Z));
    }
}
