//! Prop archetypes: the geometry and lights each prop kind draws with
//!
//! Every kind is built once at startup into an [`Assembly`] in prop space
//! (origin on the ground, Y up, unit scale). Placement applies the object's
//! own yaw and scale on top.

use super::PropKind;
use crate::math::Transform;
use crate::render::{hex, Assembly, Material, MeshData};
use macroquad::color::Color;
use macroquad::math::Vec3;

const BARK: Material = Material::solid(hex(0x3e3228));
const WHITE_GLOW: Material = Material::solid(hex(0xffffff)).glowing(hex(0xffffff), 0.5);
const LAMP_METAL: Material = Material::solid(hex(0x1a1a1a));

/// Selection ring color
pub const SELECTION_COLOR: Color = hex(0xffff00);
/// Ghost ring / grid marker color while snapping
pub const SNAP_COLOR: Color = hex(0x4ade80);

/// Build the assembly for a prop kind
pub fn build_archetype(kind: PropKind) -> Assembly {
    match kind {
        PropKind::Tree => tree(),
        PropKind::Rock => Assembly::new().part(
            MeshData::dodecahedron(0.5),
            Transform::IDENTITY,
            Material::solid(hex(0x555555)),
        ),
        PropKind::Crystal => Assembly::new()
            .part(
                MeshData::octahedron(0.4),
                Transform::IDENTITY,
                Material::solid(hex(0x00eaff)).glowing(hex(0x0088ff), 3.0),
            )
            .light(Vec3::ZERO, 3.0, 2.0, hex(0x00eaff)),
        PropKind::Mushroom => Assembly::new()
            .part(
                MeshData::cylinder(0.06, 0.1, 0.8, 8),
                Transform::at(0.0, 0.4, 0.0),
                Material::solid(hex(0xeee8d5)),
            )
            .part(
                MeshData::cone(0.4, 0.3, 16),
                Transform::at(0.0, 0.8, 0.0),
                Material::solid(hex(0xff4444)).glowing(hex(0x440000), 1.0),
            )
            .part(
                MeshData::sphere(1.0, 12, 8),
                Transform::at(0.15, 0.75, 0.1).scaled(0.08),
                WHITE_GLOW,
            )
            .part(
                MeshData::sphere(1.0, 12, 8),
                Transform::at(-0.1, 0.85, -0.1).scaled(0.06),
                WHITE_GLOW,
            )
            .light(Vec3::new(0.0, 0.5, 0.0), 1.5, 0.5, hex(0xff8888)),
        PropKind::Lamp => Assembly::new()
            .part(
                MeshData::cylinder(0.03, 0.03, 2.0, 8),
                Transform::at(0.0, 1.0, 0.0),
                LAMP_METAL,
            )
            .part(
                MeshData::cuboid(0.4, 0.03, 0.03),
                Transform::at(0.2, 1.8, 0.0).rotated(0.0, 0.0, -0.2),
                LAMP_METAL,
            )
            .part(
                MeshData::cylinder(0.08, 0.12, 0.3, 5),
                Transform::at(0.35, 1.65, 0.0),
                Material::solid(hex(0xffaa00)).glowing(hex(0xffaa00), 4.0),
            )
            .light(Vec3::new(0.35, 1.5, 0.0), 4.0, 2.0, hex(0xffaa00)),
        PropKind::Bush => Assembly::new()
            .part(
                MeshData::dodecahedron(0.35),
                Transform::at(0.0, 0.3, 0.0),
                Material::solid(hex(0x2d4c1e)),
            )
            .part(
                MeshData::dodecahedron(0.25),
                Transform::at(0.3, 0.2, 0.2),
                Material::solid(hex(0x3a5e2a)),
            )
            .part(
                MeshData::dodecahedron(0.3),
                Transform::at(-0.3, 0.25, -0.1),
                Material::solid(hex(0x223b16)),
            ),
        PropKind::Fence => {
            let post = Material::solid(hex(0x5c4033));
            let rail = Material::solid(hex(0x6c5043));
            Assembly::new()
                .part(MeshData::cuboid(0.1, 1.0, 0.1), Transform::at(-0.4, 0.5, 0.0), post)
                .part(MeshData::cuboid(0.1, 1.0, 0.1), Transform::at(0.4, 0.5, 0.0), post)
                .part(MeshData::cuboid(0.9, 0.08, 0.03), Transform::at(0.0, 0.7, 0.0), rail)
                .part(MeshData::cuboid(0.9, 0.08, 0.03), Transform::at(0.0, 0.3, 0.0), rail)
        }
        PropKind::Unknown => Assembly::new(),
    }
}

/// Trunk, two branches, three foliage clumps
pub fn tree() -> Assembly {
    let foliage = MeshData::dodecahedron(0.8);
    Assembly::new()
        .part(MeshData::cylinder(0.15, 0.3, 3.0, 6), Transform::at(0.0, 1.5, 0.0), BARK)
        .part(
            MeshData::cylinder(0.1, 0.15, 1.5, 6),
            Transform::at(0.5, 2.5, 0.2).rotated(0.0, 0.0, -0.5),
            BARK,
        )
        .part(
            MeshData::cylinder(0.08, 0.12, 1.2, 6),
            Transform::at(-0.4, 2.0, -0.2).rotated(0.2, 0.0, 0.6),
            BARK,
        )
        .part(foliage.clone(), Transform::at(0.2, 3.2, 0.0), Material::solid(hex(0x4a6e3a)))
        .part(
            foliage.clone(),
            Transform::at(1.0, 3.0, 0.3).scaled(0.7),
            Material::solid(hex(0x3a5e2a)),
        )
        .part(
            foliage,
            Transform::at(-0.8, 2.5, -0.3).scaled(0.6),
            Material::solid(hex(0x5a7e4a)),
        )
}

/// Prebuilt assemblies for every kind, plus the editor overlays
pub struct PropLibrary {
    archetypes: Vec<(PropKind, Assembly)>,
    empty: Assembly,
    /// Selection ring at unit scale (inner 0.4, outer 0.5)
    pub selection_ring: MeshData,
    /// Ghost ring at unit scale (inner 0.4, outer 0.45)
    pub ghost_ring: MeshData,
    /// Grid point shown under the ghost while snapping
    pub snap_marker: MeshData,
}

impl PropLibrary {
    pub fn new() -> Self {
        Self {
            archetypes: PropKind::ALL
                .iter()
                .map(|&kind| (kind, build_archetype(kind)))
                .collect(),
            empty: Assembly::new(),
            selection_ring: MeshData::ring(0.4, 0.5, 32),
            ghost_ring: MeshData::ring(0.4, 0.45, 32),
            snap_marker: MeshData::sphere(0.05, 12, 8),
        }
    }

    /// Assembly for a kind; unknown kinds get an empty one
    pub fn get(&self, kind: PropKind) -> &Assembly {
        self.archetypes
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, a)| a)
            .unwrap_or(&self.empty)
    }

    /// Kinds whose ghost preview gets a helper light
    pub fn ghost_lit(kind: PropKind) -> bool {
        matches!(kind, PropKind::Lamp | PropKind::Crystal)
    }
}

impl Default for PropLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_geometry() {
        let lib = PropLibrary::new();
        for kind in PropKind::ALL {
            assert!(!lib.get(kind).parts.is_empty(), "{:?} has no parts", kind);
        }
    }

    #[test]
    fn test_unknown_renders_nothing() {
        let lib = PropLibrary::new();
        assert!(lib.get(PropKind::Unknown).is_empty());
        assert!(build_archetype(PropKind::Unknown).is_empty());
    }

    #[test]
    fn test_part_counts() {
        assert_eq!(build_archetype(PropKind::Tree).parts.len(), 6);
        assert_eq!(build_archetype(PropKind::Rock).parts.len(), 1);
        assert_eq!(build_archetype(PropKind::Mushroom).parts.len(), 4);
        assert_eq!(build_archetype(PropKind::Lamp).parts.len(), 3);
        assert_eq!(build_archetype(PropKind::Bush).parts.len(), 3);
        assert_eq!(build_archetype(PropKind::Fence).parts.len(), 4);
    }

    #[test]
    fn test_light_carriers() {
        let lib = PropLibrary::new();
        assert_eq!(lib.get(PropKind::Crystal).lights.len(), 1);
        assert_eq!(lib.get(PropKind::Mushroom).lights.len(), 1);
        assert_eq!(lib.get(PropKind::Lamp).lights[0].offset, Vec3::new(0.35, 1.5, 0.0));
        assert!(lib.get(PropKind::Tree).lights.is_empty());
        assert!(PropLibrary::ghost_lit(PropKind::Lamp));
        assert!(PropLibrary::ghost_lit(PropKind::Crystal));
        assert!(!PropLibrary::ghost_lit(PropKind::Mushroom));
    }

    #[test]
    fn test_tree_is_tall() {
        let (center, radius) = build_archetype(PropKind::Tree).bounding_sphere();
        assert!(center.y > 1.5);
        assert!(radius > 1.5);
    }
}
