//! The runner's body: a joint hierarchy with a rigid assembly per segment

use super::pose::{Pose, REST_HEIGHT};
use crate::math::{euler_xyz, Transform};
use crate::render::{hex, Assembly, Lighting, Material, MeshBatch, MeshData};
use macroquad::math::{Mat4, Vec3};
use std::f32::consts::PI;

const BLACK: Material = Material::solid(hex(0x050505));
const WHITE: Material = Material::solid(hex(0xeeeeee));
const BLUE_GLOW: Material = Material::solid(hex(0x0088ff)).glowing(hex(0x0088ff), 2.0);
const SOLE: Material = Material::solid(hex(0x333333));

/// Animated joints of the figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Root,
    Head,
    Torso,
    RightArm,
    RightForearm,
    LeftArm,
    LeftForearm,
    RightThigh,
    RightShin,
    LeftThigh,
    LeftShin,
}

impl Segment {
    /// Joint-local rotation for this segment in a pose
    fn rotation(&self, pose: &Pose) -> Vec3 {
        match self {
            Segment::Root => Vec3::ZERO,
            Segment::Head => pose.head,
            Segment::Torso => pose.torso,
            Segment::RightArm => pose.right_arm,
            Segment::RightForearm => pose.right_forearm,
            Segment::LeftArm => pose.left_arm,
            Segment::LeftForearm => pose.left_forearm,
            Segment::RightThigh => pose.right_thigh,
            Segment::RightShin => pose.right_shin,
            Segment::LeftThigh => pose.left_thigh,
            Segment::LeftShin => pose.left_shin,
        }
    }
}

struct Joint {
    segment: Segment,
    /// Index into the joint list; parents always come first
    parent: Option<usize>,
    /// Pivot in the parent's frame
    offset: Vec3,
    body: Assembly,
}

pub struct RunnerFigure {
    joints: Vec<Joint>,
}

fn shoe() -> [(MeshData, Transform, Material); 2] {
    [
        (MeshData::cuboid(0.14, 0.12, 0.35), Transform::at(0.0, -0.5, 0.05), WHITE),
        (MeshData::cuboid(0.15, 0.04, 0.36), Transform::at(0.0, -0.57, 0.05), SOLE),
    ]
}

fn leg_joints(side: f32, thigh: Segment, shin: Segment, first_index: usize) -> [Joint; 2] {
    let mut lower = Assembly::new().part(
        MeshData::capsule(0.11, 0.5, 4, 8),
        Transform::at(0.0, -0.2, 0.0),
        BLACK,
    );
    for (mesh, transform, material) in shoe() {
        lower = lower.part(mesh, transform, material);
    }
    [
        Joint {
            segment: thigh,
            parent: Some(0),
            offset: Vec3::new(side * 0.2, 0.45, 0.0),
            body: Assembly::new().part(
                MeshData::capsule(0.15, 0.5, 4, 8),
                Transform::at(0.0, -0.3, 0.0),
                BLACK,
            ),
        },
        Joint {
            segment: shin,
            parent: Some(first_index),
            offset: Vec3::new(0.0, -0.65, 0.0),
            body: lower,
        },
    ]
}

fn arm_joints(side: f32, arm: Segment, forearm: Segment, first_index: usize) -> [Joint; 2] {
    [
        Joint {
            segment: arm,
            parent: Some(0),
            offset: Vec3::new(side * 0.35, 1.35, 0.0),
            body: Assembly::new().part(
                MeshData::capsule(0.11, 0.45, 4, 8),
                Transform::at(side * 0.05, -0.3, 0.0).rotated(0.0, 0.0, -side * 0.1),
                BLACK,
            ),
        },
        Joint {
            segment: forearm,
            parent: Some(first_index),
            offset: Vec3::new(side * 0.05, -0.6, 0.0),
            body: Assembly::new().part(
                MeshData::capsule(0.10, 0.45, 4, 8),
                Transform::at(0.0, 0.22, 0.0),
                BLACK,
            ),
        },
    ]
}

impl RunnerFigure {
    pub fn new() -> Self {
        let head = Assembly::new()
            .part(MeshData::sphere_cap(0.22, 32, 16, PI * 0.6), Transform::IDENTITY, WHITE)
            .part(
                MeshData::cuboid(0.3, 0.02, 0.25),
                Transform::at(0.0, 0.0, 0.2).rotated(0.2, 0.0, 0.0),
                WHITE,
            )
            .part(MeshData::sphere(0.03, 8, 6), Transform::at(0.0, 0.21, 0.0), WHITE);

        let torso = Assembly::new()
            .part(MeshData::capsule(0.28, 0.6, 4, 16), Transform::IDENTITY, BLACK)
            // Hood
            .part(
                MeshData::sphere(0.15, 16, 16),
                Transform::at(0.0, 0.35, -0.15).rotated(-0.5, 0.0, 0.0),
                BLACK,
            )
            .part(MeshData::cuboid(0.1, 0.2, 0.05), Transform::at(0.0, 0.2, 0.25), BLUE_GLOW)
            // Backpack
            .part(MeshData::cuboid(0.15, 0.3, 0.05), Transform::at(0.0, 0.2, -0.25), BLACK);

        let mut joints = vec![
            Joint {
                segment: Segment::Root,
                parent: None,
                offset: Vec3::new(0.0, REST_HEIGHT, 0.0),
                body: Assembly::new(),
            },
            Joint {
                segment: Segment::Head,
                parent: Some(0),
                offset: Vec3::new(0.0, 1.55, 0.0),
                body: head,
            },
            Joint {
                segment: Segment::Torso,
                parent: Some(0),
                offset: Vec3::new(0.0, 0.85, 0.0),
                body: torso,
            },
        ];
        let n = joints.len();
        joints.extend(arm_joints(1.0, Segment::RightArm, Segment::RightForearm, n));
        let n = joints.len();
        joints.extend(arm_joints(-1.0, Segment::LeftArm, Segment::LeftForearm, n));
        let n = joints.len();
        joints.extend(leg_joints(1.0, Segment::RightThigh, Segment::RightShin, n));
        let n = joints.len();
        joints.extend(leg_joints(-1.0, Segment::LeftThigh, Segment::LeftShin, n));

        Self { joints }
    }

    /// World matrix of every joint, in joint order
    pub fn joint_matrices(&self, pose: &Pose, parent: &Mat4) -> Vec<Mat4> {
        let mut out: Vec<Mat4> = Vec::with_capacity(self.joints.len());
        for joint in &self.joints {
            let base = match joint.parent {
                Some(i) => out[i],
                None => *parent,
            };
            let mut offset = joint.offset;
            if joint.segment == Segment::Root {
                offset.y += pose.root_offset;
            }
            let local = Mat4::from_rotation_translation(euler_xyz(joint.segment.rotation(pose)), offset);
            out.push(base * local);
        }
        out
    }

    /// World-space pivot of a segment
    #[cfg(test)]
    pub fn joint_position(&self, segment: Segment, pose: &Pose, parent: &Mat4) -> Option<Vec3> {
        let index = self.joints.iter().position(|j| j.segment == segment)?;
        Some(self.joint_matrices(pose, parent)[index].transform_point3(Vec3::ZERO))
    }

    pub fn draw(&self, pose: &Pose, parent: &Mat4, batch: &mut MeshBatch, lighting: &Lighting) {
        for (joint, world) in self.joints.iter().zip(self.joint_matrices(pose, parent)) {
            batch.push_assembly(&joint.body, &world, 1.0, lighting);
        }
    }
}

impl Default for RunnerFigure {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::animate;

    #[test]
    fn test_parents_precede_children() {
        let figure = RunnerFigure::new();
        for (i, joint) in figure.joints.iter().enumerate() {
            if let Some(p) = joint.parent {
                assert!(p < i);
            }
        }
        assert_eq!(figure.joints.len(), 11);
    }

    #[test]
    fn test_rest_pose_positions() {
        let figure = RunnerFigure::new();
        let rest = Pose::default();
        let head = figure.joint_position(Segment::Head, &rest, &Mat4::IDENTITY).unwrap();
        assert!((head - Vec3::new(0.0, REST_HEIGHT + 1.55, 0.0)).length() < 1e-5);

        let shin = figure.joint_position(Segment::LeftShin, &rest, &Mat4::IDENTITY).unwrap();
        assert!((shin - Vec3::new(-0.2, REST_HEIGHT + 0.45 - 0.65, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_root_bob_moves_everything() {
        let figure = RunnerFigure::new();
        let mut pose = Pose::default();
        pose.root_offset = 0.1;
        let head = figure.joint_position(Segment::Head, &pose, &Mat4::IDENTITY).unwrap();
        assert!((head.y - (REST_HEIGHT + 1.55 + 0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_hip_swing_moves_knee_forward() {
        let figure = RunnerFigure::new();
        let mut pose = Pose::default();
        // Negative X rotation lifts the knee toward +Z
        pose.right_thigh = Vec3::new(-1.0, 0.0, 0.0);
        let knee = figure.joint_position(Segment::RightShin, &pose, &Mat4::IDENTITY).unwrap();
        assert!(knee.z > 0.3);
    }

    #[test]
    fn test_parent_transform_applies() {
        let figure = RunnerFigure::new();
        let pose = animate(0.7, false, Pose::default());
        let parent = Mat4::from_translation(Vec3::new(0.0, -1.0, 0.0));
        let a = figure.joint_position(Segment::Torso, &pose, &Mat4::IDENTITY).unwrap();
        let b = figure.joint_position(Segment::Torso, &pose, &parent).unwrap();
        assert!((a - b - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-5);
    }
}
