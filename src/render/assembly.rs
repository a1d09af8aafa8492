//! Assemblies: small rigid groups of mesh parts plus the lights they carry

use super::{Light, Material, MeshData};
use crate::math::{ray_triangle_intersection, Ray, Transform};
use macroquad::color::Color;
use macroquad::math::{Mat4, Vec3};

/// One mesh placed inside an assembly
#[derive(Debug, Clone)]
pub struct Part {
    pub mesh: MeshData,
    /// Part-to-assembly transform
    pub transform: Mat4,
    pub material: Material,
}

/// Point light attached to an assembly, in assembly space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalLight {
    pub offset: Vec3,
    pub radius: f32,
    pub intensity: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub parts: Vec<Part>,
    pub lights: Vec<LocalLight>,
}

impl Assembly {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn part(mut self, mesh: MeshData, transform: Transform, material: Material) -> Self {
        self.parts.push(Part {
            mesh,
            transform: transform.to_matrix(),
            material,
        });
        self
    }

    pub fn light(mut self, offset: Vec3, radius: f32, intensity: f32, color: Color) -> Self {
        self.lights.push(LocalLight {
            offset,
            radius,
            intensity,
            color,
        });
        self
    }

    /// Nest another assembly under a transform, flattening its parts and lights
    pub fn attach(mut self, other: &Assembly, transform: Transform) -> Self {
        let m = transform.to_matrix();
        self.parts.extend(other.parts.iter().map(|part| Part {
            mesh: part.mesh.clone(),
            transform: m * part.transform,
            material: part.material,
        }));
        self.lights.extend(other.lights.iter().map(|l| LocalLight {
            offset: m.transform_point3(l.offset),
            ..*l
        }));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty() && self.lights.is_empty()
    }

    /// World-space point lights when the assembly sits at `world`
    pub fn world_lights<'a>(&'a self, world: &'a Mat4) -> impl Iterator<Item = Light> + 'a {
        self.lights.iter().map(move |l| {
            Light::point(world.transform_point3(l.offset), l.radius, l.intensity, l.color)
        })
    }

    /// Nearest triangle hit for a ray in assembly space
    pub fn ray_hit(&self, ray: &Ray) -> Option<f32> {
        self.parts
            .iter()
            .filter_map(|part| {
                let local = ray.transformed(&part.transform.inverse());
                let positions = &part.mesh.positions;
                part.mesh
                    .indices
                    .chunks_exact(3)
                    .filter_map(|tri| {
                        ray_triangle_intersection(
                            &local,
                            positions[tri[0] as usize],
                            positions[tri[1] as usize],
                            positions[tri[2] as usize],
                        )
                    })
                    .min_by(f32::total_cmp)
            })
            .min_by(f32::total_cmp)
    }

    /// Center and radius of a sphere enclosing every part, in assembly space
    pub fn bounding_sphere(&self) -> (Vec3, f32) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for part in &self.parts {
            for p in &part.mesh.positions {
                let q = part.transform.transform_point3(*p);
                min = min.min(q);
                max = max.max(q);
            }
        }
        if !min.is_finite() {
            return (Vec3::ZERO, 0.0);
        }
        let center = (min + max) * 0.5;
        let radius = self
            .parts
            .iter()
            .flat_map(|part| {
                part.mesh
                    .positions
                    .iter()
                    .map(move |p| (part.transform.transform_point3(*p) - center).length())
            })
            .fold(0.0, f32::max);
        (center, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::hex;

    #[test]
    fn test_empty_assembly() {
        let a = Assembly::new();
        assert!(a.is_empty());
        assert_eq!(a.bounding_sphere(), (Vec3::ZERO, 0.0));
        assert!(a.ray_hit(&Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y)).is_none());
    }

    #[test]
    fn test_world_lights_follow_placement() {
        let a = Assembly::new().light(Vec3::new(0.35, 1.5, 0.0), 4.0, 2.0, hex(0xffaa00));
        let world = Mat4::from_translation(Vec3::new(1.0, 0.2, -1.0));
        let lights: Vec<Light> = a.world_lights(&world).collect();
        assert_eq!(lights.len(), 1);
        match lights[0].light_type {
            crate::render::LightType::Point { position, radius } => {
                assert!((position - Vec3::new(1.35, 1.7, -1.0)).length() < 1e-5);
                assert_eq!(radius, 4.0);
            }
            _ => panic!("expected a point light"),
        }
    }

    #[test]
    fn test_attach_flattens() {
        let lamp = Assembly::new()
            .part(MeshData::cuboid(0.1, 0.1, 0.1), Transform::at(0.0, 1.0, 0.0), Material::solid(hex(0x1a1a1a)))
            .light(Vec3::new(0.0, 1.0, 0.0), 4.0, 2.0, hex(0xffaa00));
        let scene = Assembly::new().attach(&lamp, Transform::at(2.0, 0.0, 0.0));
        assert_eq!(scene.parts.len(), 1);
        assert_eq!(scene.lights[0].offset, Vec3::new(2.0, 1.0, 0.0));
        let p = scene.parts[0].transform.transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(2.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_bounding_sphere_encloses_offset_part() {
        let a = Assembly::new().part(
            MeshData::cuboid(1.0, 1.0, 1.0),
            Transform::at(0.0, 2.0, 0.0),
            Material::solid(hex(0x555555)),
        );
        let (center, radius) = a.bounding_sphere();
        assert!((center - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
        assert!((radius - 0.75f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_ray_hit_uses_part_geometry() {
        let a = Assembly::new().part(
            MeshData::cuboid(1.0, 1.0, 1.0),
            Transform::at(0.0, 2.0, 0.0),
            Material::solid(hex(0x555555)),
        );
        let down = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        assert!((a.ray_hit(&down).unwrap() - 2.5).abs() < 1e-4);

        // Inside the bounding sphere but clear of the cube
        let corner = Ray::new(Vec3::new(0.6, 5.0, 0.0), Vec3::NEG_Y);
        assert!(a.ray_hit(&corner).is_none());
    }
}
