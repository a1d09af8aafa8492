//! Per-vertex lighting and distance fog
//!
//! Gouraud-style: every vertex gets ambient + the sum of its light
//! contributions, tinted by the light color, then emissive on top, then fog.

use macroquad::color::Color;
use macroquad::math::Vec3;

/// Light source kinds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightType {
    /// Parallel rays travelling along `direction`
    Directional { direction: Vec3 },
    /// Omni light reaching out to `radius`
    Point { position: Vec3, radius: f32 },
    /// Cone light; `angle` is the half-angle in radians
    Spot {
        position: Vec3,
        direction: Vec3,
        angle: f32,
        radius: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub light_type: LightType,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    /// Directional light shining from `from` toward the origin
    pub fn directional_from(from: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            light_type: LightType::Directional {
                direction: (-from).normalize_or_zero(),
            },
            color,
            intensity,
        }
    }

    pub fn point(position: Vec3, radius: f32, intensity: f32, color: Color) -> Self {
        Self {
            light_type: LightType::Point { position, radius },
            color,
            intensity,
        }
    }

    /// Spot light at `position` aimed at `target`
    pub fn spot(position: Vec3, target: Vec3, angle: f32, radius: f32, intensity: f32, color: Color) -> Self {
        Self {
            light_type: LightType::Spot {
                position,
                direction: (target - position).normalize_or_zero(),
                angle,
                radius,
            },
            color,
            intensity,
        }
    }

    /// Diffuse contribution at a surface point, before light color
    fn contribution(&self, normal: Vec3, world_pos: Vec3) -> f32 {
        match self.light_type {
            LightType::Directional { direction } => {
                // Directional: same intensity everywhere
                normal.dot(-direction).max(0.0) * self.intensity
            }
            LightType::Point { position, radius } => {
                let to_light = position - world_pos;
                let dist = to_light.length();
                if dist > radius || dist < 0.001 {
                    0.0
                } else {
                    let attenuation = 1.0 - dist / radius;
                    let n_dot_l = normal.dot(to_light / dist).max(0.0);
                    n_dot_l * self.intensity * attenuation * attenuation // squared falloff
                }
            }
            LightType::Spot {
                position,
                direction,
                angle,
                radius,
            } => {
                let to_light = position - world_pos;
                let dist = to_light.length();
                if dist > radius || dist < 0.001 {
                    return 0.0;
                }
                let to_surface = -to_light / dist;
                let spot_angle = to_surface.dot(direction).clamp(-1.0, 1.0).acos();
                if spot_angle > angle {
                    0.0
                } else {
                    let attenuation = 1.0 - dist / radius;
                    let edge_falloff = 1.0 - spot_angle / angle;
                    let n_dot_l = normal.dot(to_light / dist).max(0.0);
                    n_dot_l * self.intensity * attenuation * attenuation * edge_falloff
                }
            }
        }
    }
}

/// Linear distance fog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

impl Fog {
    /// 0.0 (no fog) to 1.0 (fully fogged) for a view distance
    pub fn factor(&self, distance: f32) -> f32 {
        if distance <= self.near {
            0.0
        } else if self.far <= self.near {
            1.0
        } else {
            ((distance - self.near) / (self.far - self.near)).min(1.0)
        }
    }
}

/// Surface appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub opacity: f32,
}

impl Material {
    pub const fn solid(color: Color) -> Self {
        Self {
            color,
            emissive: Color::new(0.0, 0.0, 0.0, 1.0),
            emissive_intensity: 0.0,
            opacity: 1.0,
        }
    }

    /// Flat color that ignores lights (markers, rings, rain)
    pub const fn unlit(color: Color) -> Self {
        Self::solid(Color::new(0.0, 0.0, 0.0, 1.0)).glowing(color, 1.0)
    }

    pub const fn glowing(mut self, emissive: Color, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    pub const fn translucent(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Multiply opacity (ghost previews draw the normal material faded)
    pub fn faded(mut self, factor: f32) -> Self {
        self.opacity *= factor;
        self
    }
}

/// Everything needed to shade a vertex this frame
#[derive(Debug, Clone, Default)]
pub struct Lighting {
    pub ambient: f32,
    pub lights: Vec<Light>,
    pub fog: Option<Fog>,
    /// Camera position, for fog distance
    pub eye: Vec3,
}

impl Lighting {
    /// Final vertex color
    pub fn shade(&self, material: &Material, world_pos: Vec3, normal: Vec3) -> Color {
        let mut r = self.ambient;
        let mut g = self.ambient;
        let mut b = self.ambient;

        for light in &self.lights {
            let c = light.contribution(normal, world_pos);
            if c > 0.0 {
                r += c * light.color.r;
                g += c * light.color.g;
                b += c * light.color.b;
            }
        }

        let base = material.color;
        let glow = material.emissive;
        let k = material.emissive_intensity;
        let mut out = Color::new(
            (base.r * r.min(1.0) + glow.r * k).min(1.0),
            (base.g * g.min(1.0) + glow.g * k).min(1.0),
            (base.b * b.min(1.0) + glow.b * k).min(1.0),
            material.opacity * base.a,
        );

        if let Some(fog) = &self.fog {
            let f = fog.factor((world_pos - self.eye).length());
            out.r += (fog.color.r - out.r) * f;
            out.g += (fog.color.g - out.g) * f;
            out.b += (fog.color.b - out.b) * f;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::hex;

    const GREY: Color = hex(0x808080);

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_ambient_only() {
        let lighting = Lighting {
            ambient: 0.5,
            ..Default::default()
        };
        let c = lighting.shade(&Material::solid(GREY), Vec3::ZERO, Vec3::Y);
        assert!(approx(c.r, GREY.r * 0.5));
        assert!(approx(c.a, 1.0));
    }

    #[test]
    fn test_directional_facing_and_away() {
        let sun = Light::directional_from(Vec3::new(0.0, 10.0, 0.0), Color::new(1.0, 1.0, 1.0, 1.0), 1.0);
        let lighting = Lighting {
            ambient: 0.0,
            lights: vec![sun],
            ..Default::default()
        };
        let lit = lighting.shade(&Material::solid(GREY), Vec3::ZERO, Vec3::Y);
        let dark = lighting.shade(&Material::solid(GREY), Vec3::ZERO, Vec3::NEG_Y);
        assert!(approx(lit.r, GREY.r));
        assert!(approx(dark.r, 0.0));
    }

    #[test]
    fn test_point_light_range() {
        let lamp = Light::point(Vec3::new(0.0, 1.0, 0.0), 4.0, 2.0, hex(0xffaa00));
        assert!(lamp.contribution(Vec3::Y, Vec3::ZERO) > 0.0);
        assert_eq!(lamp.contribution(Vec3::Y, Vec3::new(0.0, -5.0, 0.0)), 0.0);
        // Closer is brighter
        let near = lamp.contribution(Vec3::Y, Vec3::new(0.0, 0.5, 0.0));
        let far = lamp.contribution(Vec3::Y, Vec3::new(0.0, -2.0, 0.0));
        assert!(near > far);
    }

    #[test]
    fn test_spot_cone() {
        let spot = Light::spot(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, 0.5, 30.0, 1.0, hex(0x4f66ff));
        assert!(spot.contribution(Vec3::Y, Vec3::ZERO) > 0.0);
        // Far outside the cone
        assert_eq!(spot.contribution(Vec3::Y, Vec3::new(10.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_emissive_ignores_darkness() {
        let lighting = Lighting::default();
        let crystal = Material::solid(hex(0x00eaff)).glowing(hex(0x0088ff), 3.0);
        let c = lighting.shade(&crystal, Vec3::ZERO, Vec3::Y);
        assert!(c.b > 0.99);
    }

    #[test]
    fn test_fog_ramp() {
        let fog = Fog {
            color: hex(0x1a1a1a),
            near: 5.0,
            far: 25.0,
        };
        assert_eq!(fog.factor(1.0), 0.0);
        assert!(approx(fog.factor(15.0), 0.5));
        assert_eq!(fog.factor(100.0), 1.0);

        let lighting = Lighting {
            ambient: 1.0,
            fog: Some(fog),
            eye: Vec3::new(0.0, 0.0, 100.0),
            ..Default::default()
        };
        let c = lighting.shade(&Material::solid(hex(0xffffff)), Vec3::ZERO, Vec3::Y);
        assert!(approx(c.r, fog.color.r));
    }

    #[test]
    fn test_faded_opacity() {
        let m = Material::solid(GREY).translucent(0.8).faded(0.5);
        assert!(approx(m.opacity, 0.4));
    }
}
