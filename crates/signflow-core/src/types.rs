//! Fundamental value types for tracked motion data.
//!
//! Positions are in normalized camera space (0–1, y increasing downward,
//! z is relative depth); rotations are Euler radians.

use std::collections::HashMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// 3D position or Euler rotation component
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn distance_to(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn to_nalgebra(self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn from_nalgebra(v: Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Unit quaternion rotation.
///
/// Magnitude is expected to stay ≈1 but is not actively renormalized;
/// see `geometry::slerp_quat` for the interpolation contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}

// ============================================================================
// HAND TRACKING
// ============================================================================

/// Number of landmarks in a complete hand frame (MediaPipe layout)
pub const HAND_LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Landmark chains per finger: root, mid-1, mid-2, tip.
/// Curl extraction measures the angle at the first three joints of each chain.
pub const FINGER_CHAINS: [[usize; 4]; 5] = [
    [THUMB_CMC, THUMB_MCP, THUMB_IP, THUMB_TIP],
    [INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP],
    [MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP],
    [RING_MCP, RING_PIP, RING_DIP, RING_TIP],
    [PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP],
];

/// A single tracked hand landmark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandLandmark {
    pub position: Vec3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl HandLandmark {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            visibility: None,
        }
    }
}

/// One tracked hand at one instant: 21 landmarks plus overall confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandFrame {
    pub landmarks: Vec<HandLandmark>,
    pub confidence: f32,
}

impl HandFrame {
    pub fn new(landmarks: Vec<HandLandmark>, confidence: f32) -> Self {
        Self {
            landmarks,
            confidence,
        }
    }

    /// A frame with any other landmark count is treated as absent downstream.
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() == HAND_LANDMARK_COUNT
    }

    pub fn landmark(&self, index: usize) -> Option<&HandLandmark> {
        self.landmarks.get(index)
    }
}

// ============================================================================
// BODY TRACKING
// ============================================================================

/// Fixed 9-joint upper-body vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyJoint {
    Nose,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
}

impl BodyJoint {
    pub const COUNT: usize = 9;

    pub fn all() -> &'static [BodyJoint] {
        &[
            Self::Nose,
            Self::LeftShoulder,
            Self::RightShoulder,
            Self::LeftElbow,
            Self::RightElbow,
            Self::LeftWrist,
            Self::RightWrist,
            Self::LeftHip,
            Self::RightHip,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftShoulder => "leftShoulder",
            Self::RightShoulder => "rightShoulder",
            Self::LeftElbow => "leftElbow",
            Self::RightElbow => "rightElbow",
            Self::LeftWrist => "leftWrist",
            Self::RightWrist => "rightWrist",
            Self::LeftHip => "leftHip",
            Self::RightHip => "rightHip",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "nose" => Some(Self::Nose),
            "leftShoulder" => Some(Self::LeftShoulder),
            "rightShoulder" => Some(Self::RightShoulder),
            "leftElbow" => Some(Self::LeftElbow),
            "rightElbow" => Some(Self::RightElbow),
            "leftWrist" => Some(Self::LeftWrist),
            "rightWrist" => Some(Self::RightWrist),
            "leftHip" => Some(Self::LeftHip),
            "rightHip" => Some(Self::RightHip),
            _ => None,
        }
    }
}

/// One tracked body joint sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyJointSample {
    pub position: Vec3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl BodyJointSample {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: None,
            visibility: None,
        }
    }
}

/// Upper-body joints at one instant; any joint may be absent (occlusion)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyFrame {
    pub joints: HashMap<BodyJoint, BodyJointSample>,
}

impl BodyFrame {
    pub fn joint(&self, joint: BodyJoint) -> Option<&BodyJointSample> {
        self.joints.get(&joint)
    }

    pub fn joint_position(&self, joint: BodyJoint) -> Option<Vec3> {
        self.joints.get(&joint).map(|j| j.position)
    }
}

// ============================================================================
// FACE TRACKING
// ============================================================================

/// The fixed 52-name blendshape vocabulary (ARKit morph-target set)
pub const BLENDSHAPE_NAMES: [&str; 52] = [
    "eyeBlinkLeft",
    "eyeLookDownLeft",
    "eyeLookInLeft",
    "eyeLookOutLeft",
    "eyeLookUpLeft",
    "eyeSquintLeft",
    "eyeWideLeft",
    "eyeBlinkRight",
    "eyeLookDownRight",
    "eyeLookInRight",
    "eyeLookOutRight",
    "eyeLookUpRight",
    "eyeSquintRight",
    "eyeWideRight",
    "jawForward",
    "jawLeft",
    "jawRight",
    "jawOpen",
    "mouthClose",
    "mouthFunnel",
    "mouthPucker",
    "mouthLeft",
    "mouthRight",
    "mouthSmileLeft",
    "mouthSmileRight",
    "mouthFrownLeft",
    "mouthFrownRight",
    "mouthDimpleLeft",
    "mouthDimpleRight",
    "mouthStretchLeft",
    "mouthStretchRight",
    "mouthRollLower",
    "mouthRollUpper",
    "mouthShrugLower",
    "mouthShrugUpper",
    "mouthPressLeft",
    "mouthPressRight",
    "mouthLowerDownLeft",
    "mouthLowerDownRight",
    "mouthUpperUpLeft",
    "mouthUpperUpRight",
    "browDownLeft",
    "browDownRight",
    "browInnerUp",
    "browOuterUpLeft",
    "browOuterUpRight",
    "cheekPuff",
    "cheekSquintLeft",
    "cheekSquintRight",
    "noseSneerLeft",
    "noseSneerRight",
    "tongueOut",
];

/// Facial expression at one instant: sparse blendshape weights plus
/// optional head transform
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceFrame {
    pub blendshapes: HashMap<String, f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_rotation: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_position: Option<Vec3>,
}

impl FaceFrame {
    /// Weight for a blendshape name; missing names imply 0
    pub fn weight(&self, name: &str) -> f32 {
        self.blendshapes.get(name).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_frame_completeness() {
        let complete = HandFrame::new(
            vec![HandLandmark::new(Vec3::zero()); HAND_LANDMARK_COUNT],
            0.9,
        );
        assert!(complete.is_complete());

        let partial = HandFrame::new(vec![HandLandmark::new(Vec3::zero()); 7], 0.9);
        assert!(!partial.is_complete());
    }

    #[test]
    fn test_body_joint_name_roundtrip() {
        for joint in BodyJoint::all() {
            assert_eq!(BodyJoint::from_name(joint.as_str()), Some(*joint));
        }
    }

    #[test]
    fn test_blendshape_vocabulary_size() {
        assert_eq!(BLENDSHAPE_NAMES.len(), 52);
    }

    #[test]
    fn test_missing_blendshape_is_zero() {
        let face = FaceFrame::default();
        assert_eq!(face.weight("jawOpen"), 0.0);
    }

    #[test]
    fn test_body_frame_json_keys_are_camel_case() {
        let mut frame = BodyFrame::default();
        frame.joints.insert(
            BodyJoint::LeftShoulder,
            BodyJointSample::new(Vec3::new(0.4, 0.3, 0.0)),
        );
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("leftShoulder"));
    }

    #[test]
    fn test_vec3_distance() {
        let a = Vec3::zero();
        let b = Vec3::new(3.0, 4.0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-6);
    }
}
