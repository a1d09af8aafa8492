//! The world around the placed props
//!
//! - `island`: terrain, grass, roots, static scenery and the island frame
//! - `particles`: floating debris drifting around the island
//! - `weather`: clear/rain atmosphere and the rain pool

mod island;
mod particles;
mod weather;

pub use island::{Island, SURFACE_HEIGHT, SURFACE_RADIUS};
pub use particles::DebrisField;
pub use weather::{RainPool, Weather};

/// Small deterministic PRNG for procedural placement
///
/// Xorshift32; a zero seed is bumped to 1 since zero is a fixed point.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u32,
}

impl Rng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    /// Uniform float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        // 24 high bits keep the result strictly below 1.0
        (self.state >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Random float in range [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// `(r - 0.5) * span`, i.e. centered on zero
    pub fn centered(&mut self, span: f32) -> f32 {
        (self.next_f32() - 0.5) * span
    }
}
