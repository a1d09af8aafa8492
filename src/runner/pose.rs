//! Procedural sprint cycle
//!
//! The pose is a pure function of elapsed time. Legs run on opposite phases;
//! each arm swings with the opposite leg.

use macroquad::math::Vec3;
use std::f32::consts::PI;

/// Gait frequency (radians of cycle per second)
pub const SPEED: f32 = 12.0;
/// Height of the body root above the figure's parent origin at rest
pub const REST_HEIGHT: f32 = 1.35;
pub const BOB_AMPLITUDE: f32 = 0.1;

pub const HIP_SWING: f32 = 1.3;
pub const KNEE_BEND: f32 = 2.0;
pub const KNEE_LAG: f32 = 0.5;
pub const KNEE_REST: f32 = -0.2;

pub const ARM_SWING: f32 = 1.1;
pub const ARM_FLARE: f32 = 0.15;
pub const ARM_INWARD: f32 = 0.3;
pub const FOREARM_PUMP_BASE: f32 = 1.6;
pub const FOREARM_PUMP: f32 = 0.4;

pub const TORSO_LEAN: f32 = 0.35;
pub const TORSO_LEAN_WOBBLE: f32 = 0.05;
pub const TORSO_TWIST: f32 = 0.3;
pub const TORSO_SWAY: f32 = 0.15;

pub const HEAD_TILT: f32 = -0.1;
pub const HEAD_NOD: f32 = 0.05;
pub const HEAD_LOOK: f32 = 0.15;
pub const HEAD_LOOK_RATE: f32 = 0.3;

/// Joint-local Euler rotations for every animated joint, plus root bob
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// Vertical offset added to `REST_HEIGHT`
    pub root_offset: f32,
    pub torso: Vec3,
    pub head: Vec3,
    pub left_thigh: Vec3,
    pub left_shin: Vec3,
    pub right_thigh: Vec3,
    pub right_shin: Vec3,
    pub left_arm: Vec3,
    pub left_forearm: Vec3,
    pub right_arm: Vec3,
    pub right_forearm: Vec3,
}

impl Pose {
    /// All joint rotations, in a fixed order
    #[cfg(test)]
    pub fn joints(&self) -> [Vec3; 10] {
        [
            self.torso,
            self.head,
            self.left_thigh,
            self.left_shin,
            self.right_thigh,
            self.right_shin,
            self.left_arm,
            self.left_forearm,
            self.right_arm,
            self.right_forearm,
        ]
    }

    /// Largest per-component difference to another pose (root included)
    #[cfg(test)]
    pub fn max_delta(&self, other: &Pose) -> f32 {
        self.joints()
            .iter()
            .zip(other.joints().iter())
            .map(|(a, b)| (*a - *b).abs().max_element())
            .fold((self.root_offset - other.root_offset).abs(), f32::max)
    }
}

/// Hip swing for a leg phase
fn thigh_angle(phase: f32) -> f32 {
    phase.sin() * HIP_SWING
}

/// Knee bend: rectified, lagging the hip; always within [-2.2, -0.2]
fn shin_angle(phase: f32) -> f32 {
    -(phase - KNEE_LAG).sin().max(0.0) * KNEE_BEND + KNEE_REST
}

/// Upper arm rotation; `side` is +1 for the right arm, -1 for the left
fn arm_rotation(phase: f32, side: f32) -> Vec3 {
    let swing = phase.sin();
    Vec3::new(
        swing * ARM_SWING,
        -side * ARM_INWARD + swing * ARM_INWARD,
        side * ARM_FLARE,
    )
}

fn forearm_rotation(phase: f32) -> Vec3 {
    Vec3::new(FOREARM_PUMP_BASE + phase.cos() * FOREARM_PUMP, 0.0, 0.0)
}

/// Pose at elapsed time `t`
///
/// While paused the previous pose is held as is.
pub fn animate(t: f32, paused: bool, previous: Pose) -> Pose {
    if paused {
        return previous;
    }

    let run_cycle = t * SPEED;
    let left_phase = run_cycle;
    let right_phase = run_cycle + PI;
    let stride = t * SPEED * 2.0;

    Pose {
        root_offset: stride.sin() * BOB_AMPLITUDE,
        torso: Vec3::new(
            TORSO_LEAN + stride.cos() * TORSO_LEAN_WOBBLE,
            run_cycle.sin() * TORSO_TWIST,
            run_cycle.cos() * TORSO_SWAY,
        ),
        head: Vec3::new(
            HEAD_TILT + stride.sin() * HEAD_NOD,
            (t * SPEED * HEAD_LOOK_RATE).sin() * HEAD_LOOK,
            0.0,
        ),
        left_thigh: Vec3::new(thigh_angle(left_phase), 0.0, 0.0),
        left_shin: Vec3::new(shin_angle(left_phase), 0.0, 0.0),
        right_thigh: Vec3::new(thigh_angle(right_phase), 0.0, 0.0),
        right_shin: Vec3::new(shin_angle(right_phase), 0.0, 0.0),
        // Arms cross-sync with the opposite leg
        right_arm: arm_rotation(left_phase, 1.0),
        right_forearm: forearm_rotation(left_phase),
        left_arm: arm_rotation(right_phase, -1.0),
        left_forearm: forearm_rotation(right_phase),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        for i in 0..50 {
            let t = i as f32 * 0.137;
            assert_eq!(animate(t, false, Pose::default()), animate(t, false, Pose::default()));
        }
    }

    #[test]
    fn test_continuity() {
        // Fastest term is the knee: d/dt = KNEE_BEND * SPEED
        let k = KNEE_BEND * SPEED * 1.05;
        let eps = 1e-3;
        let mut t = 0.0;
        while t < 3.0 {
            let a = animate(t, false, Pose::default());
            let b = animate(t + eps, false, Pose::default());
            assert!(a.max_delta(&b) <= k * eps + 1e-5, "jump at t={}", t);
            t += 0.01;
        }
    }

    #[test]
    fn test_knee_range() {
        let mut phase = -10.0;
        while phase < 10.0 {
            let knee = shin_angle(phase);
            assert!((-2.2 - 1e-6..=-0.2 + 1e-6).contains(&knee), "knee {} at {}", knee, phase);
            phase += 0.01;
        }
    }

    #[test]
    fn test_paused_holds_previous() {
        let previous = animate(1.234, false, Pose::default());
        let held = animate(99.0, true, previous);
        assert_eq!(held, previous);
    }

    #[test]
    fn test_at_time_zero() {
        let p = animate(0.0, false, Pose::default());
        assert_eq!(p.root_offset, 0.0);
        assert!((p.torso.x - (TORSO_LEAN + TORSO_LEAN_WOBBLE)).abs() < 1e-6);
        assert!((p.torso.z - TORSO_SWAY).abs() < 1e-6);
        assert!((p.head.x - HEAD_TILT).abs() < 1e-6);
        assert_eq!(p.left_thigh.x, 0.0);
        // sin(-0.5) < 0, so the knee sits at rest
        assert!((p.left_shin.x - KNEE_REST).abs() < 1e-6);
        assert!((p.right_arm.z - ARM_FLARE).abs() < 1e-6);
        assert!((p.left_arm.z + ARM_FLARE).abs() < 1e-6);
        assert!((p.right_arm.y + ARM_INWARD).abs() < 1e-6);
        assert!((p.left_arm.y - ARM_INWARD).abs() < 1e-5);
        assert!((p.right_forearm.x - (FOREARM_PUMP_BASE + FOREARM_PUMP)).abs() < 1e-6);
    }

    #[test]
    fn test_legs_and_arms_in_antiphase() {
        let t = 0.3;
        let p = animate(t, false, Pose::default());
        assert!((p.left_thigh.x + p.right_thigh.x).abs() < 1e-4);
        // Right arm follows the left leg
        assert!((p.right_arm.x - (t * SPEED).sin() * ARM_SWING).abs() < 1e-5);
        assert!((p.left_arm.x - (t * SPEED + PI).sin() * ARM_SWING).abs() < 1e-5);
    }

    #[test]
    fn test_bob_amplitude() {
        let quarter = PI / (SPEED * 2.0) / 2.0;
        let p = animate(quarter, false, Pose::default());
        assert!((p.root_offset - BOB_AMPLITUDE).abs() < 1e-5);
    }
}
