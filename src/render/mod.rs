//! Render core
//!
//! Geometry is generated once on the CPU, lit per vertex every frame and
//! submitted through macroquad's `draw_mesh` in batches.

mod assembly;
mod batch;
pub mod mesh;
mod shade;

pub use assembly::Assembly;
pub use batch::{MeshBatch, DRAW_CALL_INDEX_CAPACITY, DRAW_CALL_VERTEX_CAPACITY};
pub use mesh::MeshData;
pub use shade::{Fog, Light, LightType, Lighting, Material};

use macroquad::color::Color;

/// Opaque color from a `0xRRGGBB` literal
pub const fn hex(rgb: u32) -> Color {
    Color::new(
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    )
}
