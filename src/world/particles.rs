//! Floating debris
//!
//! A fixed set of small rocks drifting around the island underside. Each
//! mote's transform is a pure function of elapsed time, so there is no state
//! to advance beyond the clock.

use super::Rng;
use crate::math::euler_xyz;
use crate::render::{hex, Lighting, Material, MeshBatch, MeshData};
use macroquad::math::{Mat4, Vec3};
use std::f32::consts::PI;

pub const DEBRIS_COUNT: usize = 25;

const DEBRIS: Material = Material::solid(hex(0x888888)).translucent(0.8);

/// One drifting rock, in island space
#[derive(Debug, Clone, Copy)]
pub struct Mote {
    /// Drift center
    pub anchor: Vec3,
    /// Base size before pulsing
    pub scale: f32,
    /// Time multiplier for drift and tumble
    pub speed: f32,
    /// Initial Euler rotation
    pub rotation: Vec3,
    /// Phase offset so motes move out of step
    pub seed: f32,
}

impl Mote {
    fn random(rng: &mut Rng) -> Self {
        Self {
            anchor: Vec3::new(rng.centered(6.0), rng.centered(4.0) - 2.5, rng.centered(6.0)),
            scale: rng.next_f32() * 0.2 + 0.05,
            speed: rng.next_f32() * 0.3 + 0.1,
            rotation: Vec3::new(rng.next_f32() * PI, rng.next_f32() * PI, rng.next_f32() * PI),
            seed: rng.next_f32() * 1000.0,
        }
    }

    /// Offset from the anchor at time `t`; each axis stays within 0.6
    pub fn drift(&self, t: f32) -> Vec3 {
        let (s, seed) = (self.speed, self.seed);
        Vec3::new(
            (t * 0.2 * s + seed).sin() * 0.5 + (t * 0.8 * s + seed).cos() * 0.1,
            (t * 0.15 * s + seed * 0.5).cos() * 0.5 + (t * 0.5 * s + seed).sin() * 0.1,
            (t * 0.25 * s + seed * 0.2).sin() * 0.5 + (t * 0.7 * s + seed).cos() * 0.1,
        )
    }

    /// Breathing scale plus a rectified flutter
    pub fn size(&self, t: f32) -> f32 {
        let pulse = 1.0 + (t * 1.5 + self.seed).sin() * 0.15;
        let flutter = (t * 4.0 + self.seed * 2.0).sin().max(0.0) * 0.05;
        self.scale * (pulse + flutter)
    }

    pub fn matrix(&self, t: f32) -> Mat4 {
        let rotation = Vec3::new(
            self.rotation.x + t * 0.2 * self.speed,
            self.rotation.y + t * 0.1 * self.speed,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.size(t)),
            euler_xyz(rotation),
            self.anchor + self.drift(t),
        )
    }
}

pub struct DebrisField {
    motes: Vec<Mote>,
    mesh: MeshData,
    time: f32,
}

impl DebrisField {
    pub fn new(seed: u32) -> Self {
        let mut rng = Rng::new(seed);
        Self {
            motes: (0..DEBRIS_COUNT).map(|_| Mote::random(&mut rng)).collect(),
            mesh: MeshData::dodecahedron(1.0),
            time: 0.0,
        }
    }

    pub fn motes(&self) -> &[Mote] {
        &self.motes
    }

    /// Debris keeps drifting in every mode
    pub fn update(&mut self, t: f32) {
        self.time = t;
    }

    /// `island` is the island-to-world transform
    pub fn draw(&self, island: &Mat4, batch: &mut MeshBatch, lighting: &Lighting) {
        for mote in &self.motes {
            batch.push(&self.mesh, &(*island * mote.matrix(self.time)), &DEBRIS, lighting);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_ranges() {
        let field = DebrisField::new(77);
        assert_eq!(field.motes().len(), DEBRIS_COUNT);
        for m in field.motes() {
            assert!(m.anchor.x.abs() <= 3.0 && m.anchor.z.abs() <= 3.0);
            assert!((-4.5..=-0.5).contains(&m.anchor.y));
            assert!((0.05..0.25).contains(&m.scale));
            assert!((0.1..0.4).contains(&m.speed));
        }
    }

    #[test]
    fn test_drift_bounded() {
        let field = DebrisField::new(5);
        for m in field.motes() {
            let mut t = 0.0;
            while t < 120.0 {
                let d = m.drift(t);
                assert!(d.abs().max_element() <= 0.6 + 1e-5);
                t += 0.37;
            }
        }
    }

    #[test]
    fn test_size_envelope() {
        let field = DebrisField::new(5);
        for m in field.motes() {
            let mut t = 0.0;
            while t < 30.0 {
                let s = m.size(t);
                assert!(s >= m.scale * 0.85 - 1e-6);
                assert!(s <= m.scale * 1.2 + 1e-6);
                t += 0.05;
            }
        }
    }

    #[test]
    fn test_debris_is_translucent() {
        let field = DebrisField::new(5);
        let mut batch = MeshBatch::new();
        let lighting = Lighting {
            ambient: 1.0,
            ..Default::default()
        };
        field.draw(&Mat4::IDENTITY, &mut batch, &lighting);
        assert_eq!(batch.vertex_count(), DEBRIS_COUNT * field.mesh.vertex_count());
    }
}
