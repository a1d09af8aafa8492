//! Weather: clear or rain
//!
//! Weather picks the atmosphere (background, fog, light levels) and whether
//! the rain pool runs.

use super::Rng;
use crate::render::{hex, Fog, Light, Lighting};
use macroquad::color::Color;
use macroquad::math::Vec3;

pub const RAIN_DROPS: usize = 1000;

/// Rain spawns over a 20x20 area
const RAIN_SPREAD: f32 = 20.0;
const RAIN_RESPAWN_HEIGHT: f32 = 15.0;
const RAIN_FLOOR: f32 = -2.0;
const STREAK_LENGTH: f32 = 0.8;
/// Drop speeds are tuned in units per 60 Hz frame
const FRAME_RATE: f32 = 60.0;
const RAIN_COLOR: Color = Color::new(0xaa as f32 / 255.0, 0xcc as f32 / 255.0, 1.0, 0.4);

const SUN_POSITION: Vec3 = Vec3::new(5.0, 8.0, 5.0);
const RIM_POSITION: Vec3 = Vec3::new(-5.0, 5.0, -2.0);
const RIM_COLOR: Color = hex(0x4f66ff);
const RIM_ANGLE: f32 = 0.5;
const RIM_RANGE: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weather {
    #[default]
    Clear,
    Rain,
}

impl Weather {
    pub fn toggle(self) -> Self {
        match self {
            Weather::Clear => Weather::Rain,
            Weather::Rain => Weather::Clear,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Weather::Clear => "CLEAR",
            Weather::Rain => "RAIN",
        }
    }

    pub fn is_raining(&self) -> bool {
        *self == Weather::Rain
    }

    pub fn atmosphere(&self) -> Atmosphere {
        match self {
            Weather::Clear => Atmosphere {
                background: hex(0x1a1a1a),
                fog_near: 5.0,
                fog_far: 25.0,
                ambient: 0.2,
                sun: 1.5,
                rim: 2.0,
            },
            Weather::Rain => Atmosphere {
                background: hex(0x050510),
                fog_near: 2.0,
                fog_far: 15.0,
                ambient: 0.1,
                sun: 0.8,
                rim: 1.0,
            },
        }
    }
}

/// Light levels and sky color for one weather
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    /// Clear color; fog fades toward it
    pub background: Color,
    pub fog_near: f32,
    pub fog_far: f32,
    pub ambient: f32,
    /// Directional key light intensity
    pub sun: f32,
    /// Blue rim spot intensity
    pub rim: f32,
}

impl Atmosphere {
    /// Frame lighting seen from `eye`, with extra lights from the scene
    pub fn lighting(&self, eye: Vec3, extra: impl IntoIterator<Item = Light>) -> Lighting {
        let mut lights = vec![
            Light::directional_from(SUN_POSITION, Color::new(1.0, 1.0, 1.0, 1.0), self.sun),
            Light::spot(RIM_POSITION, Vec3::ZERO, RIM_ANGLE, RIM_RANGE, self.rim, RIM_COLOR),
        ];
        lights.extend(extra);
        Lighting {
            ambient: self.ambient,
            lights,
            fog: Some(Fog {
                color: self.background,
                near: self.fog_near,
                far: self.fog_far,
            }),
            eye,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RainDrop {
    position: Vec3,
    /// Units per 60 Hz frame
    speed: f32,
}

/// Falling rain streaks in world space
pub struct RainPool {
    drops: Vec<RainDrop>,
    rng: Rng,
}

impl RainPool {
    pub fn new(seed: u32) -> Self {
        let mut rng = Rng::new(seed);
        let drops = (0..RAIN_DROPS)
            .map(|_| RainDrop {
                position: Vec3::new(
                    rng.centered(RAIN_SPREAD),
                    rng.next_f32() * RAIN_SPREAD,
                    rng.centered(RAIN_SPREAD),
                ),
                speed: 0.5 + rng.next_f32() * 0.5,
            })
            .collect();
        Self { drops, rng }
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Drop positions (streak centers)
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.drops.iter().map(|d| d.position)
    }

    /// Fall and recycle drops that passed below the island
    pub fn update(&mut self, dt: f32) {
        let frames = dt * FRAME_RATE;
        for drop in &mut self.drops {
            drop.position.y -= drop.speed * frames;
            if drop.position.y < RAIN_FLOOR {
                drop.position = Vec3::new(
                    self.rng.centered(RAIN_SPREAD),
                    RAIN_RESPAWN_HEIGHT,
                    self.rng.centered(RAIN_SPREAD),
                );
            }
        }
    }

    pub fn draw(&self) {
        let half = Vec3::new(0.0, STREAK_LENGTH * 0.5, 0.0);
        for drop in &self.drops {
            macroquad::models::draw_line_3d(drop.position + half, drop.position - half, RAIN_COLOR);
        }
    }
}
