//! Heuristic arm retargeting.
//!
//! Shoulder/elbow/wrist positions are 2.5D: depth is present in the data
//! but de-emphasized, so the heuristic classifies the arm into one of three
//! regimes from screen-space ratios and angles, then applies regime-specific
//! linear formulas. The formulas are calibrated against the target rig (see
//! [`crate::calibration`]), not derived from kinematics.

use std::f32::consts::PI;

use signflow_core::{
    angle_between_points, ArmPose, AvatarPose, BodyFrame, BodyJoint, FaceFrame, HandFrame, Vec3,
};
use tracing::trace;

use crate::calibration::RigCalibration;
use crate::fingers::extract_finger_pose;

/// Which arm of the signer is being retargeted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmSide {
    Left,
    Right,
}

impl ArmSide {
    /// Mirror factor applied to the side-symmetric bone axes
    pub fn mirror(&self) -> f32 {
        match self {
            ArmSide::Left => -1.0,
            ArmSide::Right => 1.0,
        }
    }

    fn shoulder(&self) -> BodyJoint {
        match self {
            ArmSide::Left => BodyJoint::LeftShoulder,
            ArmSide::Right => BodyJoint::RightShoulder,
        }
    }

    fn elbow(&self) -> BodyJoint {
        match self {
            ArmSide::Left => BodyJoint::LeftElbow,
            ArmSide::Right => BodyJoint::RightElbow,
        }
    }

    fn wrist(&self) -> BodyJoint {
        match self {
            ArmSide::Left => BodyJoint::LeftWrist,
            ArmSide::Right => BodyJoint::RightWrist,
        }
    }
}

/// The three pose regimes the heuristic distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmRegime {
    /// Arm straight, reaching away from the camera
    Forward,
    /// Upper arm lifted above the shoulder line
    Raised,
    /// Default: arm hanging or held low
    Down,
}

/// Classify the arm pose from shoulder/elbow/wrist screen positions.
pub fn classify_arm_regime(
    shoulder: Vec3,
    elbow: Vec3,
    wrist: Vec3,
    calib: &RigCalibration,
) -> ArmRegime {
    let dx = elbow.x - shoulder.x;
    let dy = elbow.y - shoulder.y;

    let elbow_dist = elbow.distance_to(&shoulder);
    let wrist_dist = wrist.distance_to(&shoulder);

    if dx.abs() < calib.forward_dx_threshold
        && dy.abs() < calib.forward_dy_threshold
        && wrist_dist > calib.forward_reach_ratio * elbow_dist
    {
        return ArmRegime::Forward;
    }

    // y grows downward in camera space, so a raised arm has a negative angle
    let upper_angle = dy.atan2(dx.abs());
    if upper_angle < calib.raised_angle_threshold {
        return ArmRegime::Raised;
    }

    ArmRegime::Down
}

/// Retarget one arm from a body frame to target-rig bone angles.
///
/// Returns `None` when the shoulder, elbow, or wrist is unavailable; the
/// caller substitutes the neutral pose.
pub fn retarget_arm(body: &BodyFrame, side: ArmSide, calib: &RigCalibration) -> Option<ArmPose> {
    let shoulder = body.joint_position(side.shoulder());
    let elbow = body.joint_position(side.elbow());
    let wrist = body.joint_position(side.wrist());

    let (Some(shoulder), Some(elbow), Some(wrist)) = (shoulder, elbow, wrist) else {
        trace!(?side, "arm joints unavailable, substituting neutral");
        return None;
    };

    let mirror = side.mirror();
    let regime = classify_arm_regime(shoulder, elbow, wrist, calib);

    let dx = elbow.x - shoulder.x;
    let dy = elbow.y - shoulder.y;
    let upper_angle = dy.atan2(dx.abs());

    // Elbow bend: 0 when the arm is straight
    let bend = PI - angle_between_points(shoulder, elbow, wrist);
    let scaled_bend = bend
        * match regime {
            ArmRegime::Forward => calib.bend_scale_forward,
            ArmRegime::Raised => calib.bend_scale_raised,
            ArmRegime::Down => calib.bend_scale_down,
        };

    // Upper-arm up/down axis
    let lift = match regime {
        ArmRegime::Forward => calib.lift_forward,
        ArmRegime::Raised => calib.lift_base_raised + calib.lift_gain_raised * upper_angle,
        ArmRegime::Down => calib.lift_base_down + calib.lift_gain_down * upper_angle,
    };

    // Upper-arm inward axis, in side-normalized space (positive = elbow
    // pulled toward body center)
    let toward_center = -dx * mirror;
    let mut inward = (calib.inward_gain * toward_center).clamp(-calib.inward_max, calib.inward_max);
    if regime == ArmRegime::Forward {
        inward += calib.inward_forward_bias;
    }

    // Palm-orientation axis: decision table keyed by regime, bend magnitude,
    // and whether the forearm points toward or away from body center
    let forearm_toward_center = (wrist.x - elbow.x) * mirror < 0.0;
    let palm = match regime {
        ArmRegime::Forward => calib.palm_forward,
        ArmRegime::Raised => {
            if forearm_toward_center {
                calib.palm_raised_inward
            } else {
                calib.palm_raised_outward
            }
        }
        ArmRegime::Down => {
            if bend > calib.palm_bend_threshold {
                if forearm_toward_center {
                    calib.palm_down_bent_inward
                } else {
                    calib.palm_down_bent_outward
                }
            } else {
                calib.palm_down_straight
            }
        }
    };

    let hand = body
        .joint(side.wrist())
        .and_then(|j| j.rotation)
        .unwrap_or_else(Vec3::zero);

    Some(ArmPose {
        upper_arm: Vec3::new(lift, 0.0, inward * mirror),
        forearm: Vec3::new(scaled_bend, palm * mirror, 0.0),
        hand,
    })
}

/// Assemble a full avatar pose for one frame, degrading field-by-field:
/// missing body ⇒ neutral arms, missing hand ⇒ neutral curls, missing
/// face ⇒ empty blendshapes.
pub fn retarget_frame(
    body: Option<&BodyFrame>,
    left_hand: Option<&HandFrame>,
    right_hand: Option<&HandFrame>,
    face: Option<&FaceFrame>,
    calib: &RigCalibration,
) -> AvatarPose {
    let mut pose = AvatarPose::neutral();

    if let Some(body) = body {
        if let Some(arm) = retarget_arm(body, ArmSide::Left, calib) {
            pose.left_arm = arm;
        }
        if let Some(arm) = retarget_arm(body, ArmSide::Right, calib) {
            pose.right_arm = arm;
        }
    }

    pose.left_fingers = extract_finger_pose(left_hand);
    pose.right_fingers = extract_finger_pose(right_hand);

    if let Some(face) = face {
        pose.blendshapes = face.blendshapes.clone();
        if let Some(head) = face.head_rotation {
            pose.head_rotation = head;
        }
    }

    pose
}
