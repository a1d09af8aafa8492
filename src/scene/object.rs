//! Placed props: kinds, identifiers and the persisted record

use crate::math::Transform;
use macroquad::color::Color;
use macroquad::math::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::SceneError;

/// The fixed set of decorative props
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropKind {
    Tree,
    Rock,
    Crystal,
    Mushroom,
    Lamp,
    Bush,
    Fence,
    /// Type tag this build does not know; renders nothing
    #[serde(other)]
    Unknown,
}

impl PropKind {
    /// Placeable kinds, in palette order
    pub const ALL: [PropKind; 7] = [
        PropKind::Tree,
        PropKind::Rock,
        PropKind::Crystal,
        PropKind::Mushroom,
        PropKind::Lamp,
        PropKind::Bush,
        PropKind::Fence,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PropKind::Tree => "Tree",
            PropKind::Rock => "Rock",
            PropKind::Crystal => "Crystal",
            PropKind::Mushroom => "Mushroom",
            PropKind::Lamp => "Lamp",
            PropKind::Bush => "Bush",
            PropKind::Fence => "Fence",
            PropKind::Unknown => "Unknown",
        }
    }

    /// Palette swatch color
    pub fn swatch(&self) -> Color {
        use crate::render::hex;
        match self {
            PropKind::Tree => hex(0x22c55e),
            PropKind::Rock => hex(0x9ca3af),
            PropKind::Crystal => hex(0x22d3ee),
            PropKind::Mushroom => hex(0xef4444),
            PropKind::Lamp => hex(0xfacc15),
            PropKind::Bush => hex(0x15803d),
            PropKind::Fence => hex(0xb45309),
            PropKind::Unknown => hex(0x444444),
        }
    }

    /// Palette slot (0-based), if placeable
    pub fn index(&self) -> Option<usize> {
        Self::ALL.iter().position(|k| k == self)
    }

    pub fn from_index(index: usize) -> Option<PropKind> {
        Self::ALL.get(index).copied()
    }
}

const ID_LEN: usize = 9;
const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque object identifier (9 lowercase base-36 characters when generated)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id; uniqueness is the registry's job
    pub fn random() -> Self {
        Self::from_digits(|| macroquad::rand::gen_range(0u32, 36))
    }

    /// Build an id from a digit source (each call yields 0..36)
    pub fn from_digits(mut next_digit: impl FnMut() -> u32) -> Self {
        let id = (0..ID_LEN)
            .map(|_| ID_ALPHABET[(next_digit() % 36) as usize] as char)
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A prop placed on the island, in island-local coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub kind: PropKind,
    pub position: [f32; 3],
    /// Euler angles; only Y is set by placement
    pub rotation: [f32; 3],
    pub scale: f32,
}

impl SceneObject {
    pub fn new(id: ObjectId, kind: PropKind, position: Vec3, yaw: f32, scale: f32) -> Self {
        Self {
            id,
            kind,
            position: position.to_array(),
            rotation: [0.0, yaw, 0.0],
            scale,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: Vec3::from_array(self.position),
            rotation: Vec3::from_array(self.rotation),
            scale: Vec3::splat(self.scale),
        }
    }

    /// Object-to-island matrix
    pub fn to_matrix(&self) -> Mat4 {
        self.transform().to_matrix()
    }

    /// Reject records that cannot be placed (non-finite numbers, bad scale, empty id)
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.id.as_str().is_empty() {
            return Err(SceneError::InvalidEntry("empty id".into()));
        }
        let finite = self
            .position
            .iter()
            .chain(self.rotation.iter())
            .all(|v| v.is_finite());
        if !finite {
            return Err(SceneError::InvalidEntry(format!(
                "object {} has non-finite coordinates",
                self.id
            )));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(SceneError::InvalidEntry(format!(
                "object {} has scale {}",
                self.id, self.scale
            )));
        }
        Ok(())
    }
}
