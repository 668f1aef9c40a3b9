//! The engine's output pose.
//!
//! An `AvatarPose` is created fresh for every sample and handed to the
//! rendering host, which maps each field onto a named bone rotation or
//! morph-target weight of the target skeleton.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::Vec3;

/// Curl values for one finger: root, mid, tip joints, each in [0, 1]
/// (0 = straight, 1 = fully curled)
pub type FingerCurls = [f32; 3];

/// Curl state for all five fingers of one hand
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HandPose {
    pub thumb: FingerCurls,
    pub index: FingerCurls,
    pub middle: FingerCurls,
    pub ring: FingerCurls,
    pub pinky: FingerCurls,
}

impl HandPose {
    /// All joints straight — the substitute for a missing or incomplete hand
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn fingers(&self) -> [FingerCurls; 5] {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
    }

    pub fn from_fingers(fingers: [FingerCurls; 5]) -> Self {
        Self {
            thumb: fingers[0],
            index: fingers[1],
            middle: fingers[2],
            ring: fingers[3],
            pinky: fingers[4],
        }
    }
}

/// Euler rotations for one arm chain of the target rig
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmPose {
    pub upper_arm: Vec3,
    pub forearm: Vec3,
    pub hand: Vec3,
}

impl ArmPose {
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// Complete per-sample output: arm chains, finger curls, facial
/// blendshape weights, and head rotation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarPose {
    pub left_arm: ArmPose,
    pub right_arm: ArmPose,
    pub left_fingers: HandPose,
    pub right_fingers: HandPose,
    pub blendshapes: HashMap<String, f32>,
    pub head_rotation: Vec3,
}

impl AvatarPose {
    pub fn neutral() -> Self {
        Self::default()
    }
}
