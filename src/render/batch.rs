//! Vertex batching for `draw_mesh`
//!
//! macroquad meshes use 16-bit indices and every `draw_mesh` call is clipped
//! to the draw-call capacity set in `window_conf`, so the batch seals a chunk
//! whenever the next mesh would overflow either count and starts a new one.
//! Opaque and translucent geometry are kept apart so translucent chunks draw
//! last.

use super::mesh::normal_matrix;
use super::{Assembly, Lighting, Material, MeshData};
use macroquad::math::{Mat4, Vec2};
use macroquad::logging::warn;
use macroquad::models::{draw_mesh, Mesh, Vertex};

/// Vertices per chunk; every index fits in a `u16`
pub const CHUNK_VERTICES: usize = u16::MAX as usize;
pub const CHUNK_INDICES: usize = CHUNK_VERTICES * 3;
/// macroquad clips a draw call that reaches its capacity, so keep one spare
pub const DRAW_CALL_VERTEX_CAPACITY: usize = CHUNK_VERTICES + 1;
pub const DRAW_CALL_INDEX_CAPACITY: usize = CHUNK_INDICES + 1;

#[derive(Default)]
struct ChunkList {
    sealed: Vec<Mesh>,
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
}

impl ChunkList {
    fn seal(&mut self) {
        if self.vertices.is_empty() {
            return;
        }
        self.sealed.push(Mesh {
            vertices: std::mem::take(&mut self.vertices),
            indices: std::mem::take(&mut self.indices),
            texture: None,
        });
    }

    fn reserve_for(&mut self, vertices: usize, indices: usize) {
        if self.vertices.len() + vertices > CHUNK_VERTICES || self.indices.len() + indices > CHUNK_INDICES {
            self.seal();
        }
    }

    #[cfg(test)]
    fn vertex_count(&self) -> usize {
        self.sealed.iter().map(|m| m.vertices.len()).sum::<usize>() + self.vertices.len()
    }

    #[cfg(test)]
    fn chunk_count(&self) -> usize {
        self.sealed.len() + usize::from(!self.vertices.is_empty())
    }
}

/// Lit geometry collected over a frame
#[derive(Default)]
pub struct MeshBatch {
    opaque: ChunkList,
    translucent: ChunkList,
}

impl MeshBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Light and queue a mesh under a model-to-world transform
    pub fn push(&mut self, mesh: &MeshData, transform: &Mat4, material: &Material, lighting: &Lighting) {
        if mesh.positions.is_empty() || material.opacity <= 0.0 {
            return;
        }
        if mesh.vertex_count() > CHUNK_VERTICES || mesh.indices.len() > CHUNK_INDICES {
            warn!("Mesh of {} vertices exceeds a draw call, skipped", mesh.vertex_count());
            return;
        }

        let list = if material.opacity < 1.0 {
            &mut self.translucent
        } else {
            &mut self.opaque
        };
        list.reserve_for(mesh.vertex_count(), mesh.indices.len());

        let normals = normal_matrix(transform);
        let base = list.vertices.len() as u16;
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            let world_pos = transform.transform_point3(*p);
            let world_normal = (normals * *n).normalize_or_zero();
            let color = lighting.shade(material, world_pos, world_normal);
            list.vertices.push(Vertex::new2(world_pos, Vec2::ZERO, color));
        }
        list.indices.extend(mesh.indices.iter().map(|i| base + i));
    }

    /// Queue every part of an assembly placed at `world`
    ///
    /// `opacity` scales each part's own opacity (1.0 draws it as authored).
    pub fn push_assembly(&mut self, assembly: &Assembly, world: &Mat4, opacity: f32, lighting: &Lighting) {
        for part in &assembly.parts {
            let transform = *world * part.transform;
            let material = part.material.faded(opacity);
            self.push(&part.mesh, &transform, &material, lighting);
        }
    }

    #[cfg(test)]
    pub fn vertex_count(&self) -> usize {
        self.opaque.vertex_count() + self.translucent.vertex_count()
    }

    #[cfg(test)]
    pub fn chunk_count(&self) -> usize {
        self.opaque.chunk_count() + self.translucent.chunk_count()
    }

    /// Submit everything (opaque first) and reset for the next frame
    pub fn draw(&mut self) {
        self.opaque.seal();
        self.translucent.seal();
        for mesh in self.opaque.sealed.drain(..).chain(self.translucent.sealed.drain(..)) {
            draw_mesh(&mesh);
        }
    }
}
