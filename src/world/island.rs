//! The floating island
//!
//! Everything here lives in island space: the top face sits at
//! `SURFACE_HEIGHT`, the underside hangs below it, and placed props share the
//! same frame. The island frame hangs under the scene group and spins about
//! Y while the simulation runs.

use super::Rng;
use crate::math::Transform;
use crate::render::mesh::catmull_rom;
use crate::render::{hex, Assembly, Lighting, Material, MeshBatch, MeshData};
use crate::scene::tree;
use macroquad::math::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

/// Scene group origin; the runner stands here
pub const SCENE_OFFSET: Vec3 = Vec3::new(0.0, -1.0, 0.0);
/// Island group origin inside the scene group
pub const ISLAND_OFFSET: Vec3 = Vec3::new(0.0, -2.0, 0.0);
/// Local height of the placement surface (top face of the terrain)
pub const SURFACE_HEIGHT: f32 = 0.2;
/// Radius of the placement surface
pub const SURFACE_RADIUS: f32 = 3.5;
/// Spin in radians per second of elapsed time
pub const SPIN_RATE: f32 = 0.08;

const GRASS_BLADES: usize = 2000;
const GRASS_RADIUS: f32 = 3.4;
const ROOT_COUNT: usize = 4;

const SOIL: Material = Material::solid(hex(0x3a2e25));
const UNDERSIDE: Material = Material::solid(hex(0x2a221b));
const MOSS: Material = Material::solid(hex(0x1a3b1a));
const GRASS: Material = Material::solid(hex(0x4f8f4f));
const ROOT: Material = Material::solid(hex(0x5c4839));
const POST: Material = Material::solid(hex(0x8b5a2b));
const BOARD: Material = Material::solid(hex(0xdddddd));

/// Hanging rocks under the terrain: (radius, position, rotation, scale)
const UNDERSIDE_ROCKS: [(f32, [f32; 3], [f32; 3], [f32; 3]); 4] = [
    (2.0, [0.2, -0.5, 0.2], [0.5, 0.2, 0.0], [1.0, 1.0, 1.0]),
    (1.5, [-1.2, -0.2, -0.5], [0.0, 1.0, 0.5], [1.0, 1.0, 1.0]),
    (1.2, [1.5, 0.0, -1.0], [1.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
    (1.3, [-0.5, -1.2, 0.5], [0.0, 0.0, 0.0], [0.6, 1.0, 0.6]),
];
const UNDERSIDE_ORIGIN: f32 = -1.0;

fn terrain() -> Assembly {
    let mut island = Assembly::new()
        .part(MeshData::cylinder(3.5, 2.0, 1.2, 7), Transform::at(0.0, -0.4, 0.0), SOIL)
        .part(MeshData::disc(3.4, 32), Transform::at(0.0, 0.01, 0.0), MOSS);

    for (radius, [x, y, z], [rx, ry, rz], [sx, sy, sz]) in UNDERSIDE_ROCKS {
        island = island.part(
            MeshData::dodecahedron(radius),
            Transform::at(x, y + UNDERSIDE_ORIGIN, z)
                .rotated(rx, ry, rz)
                .scaled_xyz(sx, sy, sz),
            UNDERSIDE,
        );
    }
    island
}

/// All grass blades baked into one mesh
fn grass(rng: &mut Rng) -> MeshData {
    let blade = MeshData::cone(0.03, 0.6, 2);
    let mut field = MeshData::new();
    for _ in 0..GRASS_BLADES {
        let angle = rng.next_f32() * TAU;
        let r = rng.next_f32().sqrt() * GRASS_RADIUS;
        let rotation = (rng.centered(0.2), rng.next_f32() * PI, rng.centered(0.2));
        let s = rng.next_f32() * 0.6 + 0.4;
        let stretch = rng.next_f32() * 0.8 + 0.6;
        let transform = Transform::at(angle.cos() * r, 0.0, angle.sin() * r)
            .rotated(rotation.0, rotation.1, rotation.2)
            .scaled_xyz(s, s * stretch, s);
        field.append(&blade, &transform.to_matrix());
    }
    field
}

/// Roots trailing from the underside toward a point below the island
fn roots(rng: &mut Rng) -> Vec<MeshData> {
    (0..ROOT_COUNT)
        .map(|i| {
            let start_x = rng.centered(2.0);
            let start_z = rng.centered(2.0);
            let length = 1.5 + rng.next_f32();
            let control = [
                Vec3::new(start_x, -1.5, start_z),
                Vec3::new(start_x * 0.8, -1.5 - length * 0.3, start_z * 0.8),
                Vec3::new(start_x * 0.5 + rng.next_f32() * 0.5, -1.5 - length * 0.7, start_z * 0.5),
                Vec3::new(0.0, -1.5 - length, 0.0),
            ];
            let path = catmull_rom(&control, 32);
            MeshData::tube(&path, 0.04 - i as f32 * 0.005, 8)
        })
        .collect()
}

fn signpost() -> Assembly {
    Assembly::new()
        .part(MeshData::cylinder(0.05, 0.05, 2.0, 8), Transform::at(0.0, 1.0, 0.0), POST)
        .part(
            MeshData::cuboid(0.8, 0.25, 0.05),
            Transform::at(0.0, 1.7, 0.0).rotated(0.0, 0.2, 0.0),
            BOARD,
        )
}

pub struct Island {
    scenery: Assembly,
    spin: f32,
}

impl Island {
    /// Build the island; `seed` drives grass and root placement
    pub fn new(seed: u32) -> Self {
        let mut rng = Rng::new(seed);
        let mut scenery = terrain()
            .part(grass(&mut rng), Transform::IDENTITY, GRASS)
            .attach(&tree(), Transform::at(-1.5, 0.0, 1.0))
            .attach(&signpost(), Transform::at(1.5, 0.0, -1.0).rotated(0.0, -0.4, 0.0));
        for root in roots(&mut rng) {
            scenery = scenery.part(root, Transform::IDENTITY, ROOT);
        }
        Self { scenery, spin: 0.0 }
    }

    /// Spin follows elapsed time while simulating and freezes otherwise
    pub fn update(&mut self, t: f32, simulating: bool) {
        if simulating {
            self.spin = t * SPIN_RATE;
        }
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    /// Scene group transform (parent of both the island and the runner)
    pub fn scene_matrix() -> Mat4 {
        Mat4::from_translation(SCENE_OFFSET)
    }

    /// Island-to-world transform
    pub fn world_matrix(&self) -> Mat4 {
        Self::scene_matrix()
            * Mat4::from_translation(ISLAND_OFFSET)
            * Mat4::from_rotation_y(self.spin)
    }

    #[cfg(test)]
    pub fn vertex_count(&self) -> usize {
        self.scenery.parts.iter().map(|p| p.mesh.vertex_count()).sum()
    }

    pub fn draw(&self, batch: &mut MeshBatch, lighting: &Lighting) {
        batch.push_assembly(&self.scenery, &self.world_matrix(), 1.0, lighting);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_top_face() {
        // Terrain cylinder is 1.2 tall, centered 0.4 below the island origin
        assert!((-0.4 + 1.2 / 2.0 - SURFACE_HEIGHT).abs() < 1e-6);
    }

    #[test]
    fn test_spin_only_while_simulating() {
        let mut island = Island::new(1);
        island.update(10.0, true);
        assert!((island.spin() - 0.8).abs() < 1e-6);
        island.update(20.0, false);
        assert!((island.spin() - 0.8).abs() < 1e-6);
        island.update(20.0, true);
        assert!((island.spin() - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_world_matrix_frame() {
        let mut island = Island::new(1);
        let origin = island.world_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, -3.0, 0.0)).length() < 1e-6);

        island.update(PI / 2.0 / SPIN_RATE, true);
        let p = island.world_matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        // Quarter turn about Y takes +X to -Z
        assert!((p - Vec3::new(0.0, -3.0, -1.0)).length() < 1e-4);
    }

    #[test]
    fn test_grass_fits_one_mesh() {
        let mut rng = Rng::new(3);
        let field = grass(&mut rng);
        assert!(field.vertex_count() <= u16::MAX as usize);
        for p in &field.positions {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!(r < GRASS_RADIUS + 0.1);
        }
    }

    #[test]
    fn test_roots_hang_below() {
        let mut rng = Rng::new(9);
        let roots = roots(&mut rng);
        assert_eq!(roots.len(), ROOT_COUNT);
        for root in &roots {
            assert!(!root.positions.is_empty());
            assert!(root.max_y() < -1.4);
        }
    }

    #[test]
    fn test_same_seed_same_island() {
        assert_eq!(Island::new(42).vertex_count(), Island::new(42).vertex_count());
        assert!(Island::new(42).vertex_count() > 0);
    }
}
