//! Pose sampling.
//!
//! Discrete sampling retargets a single recorded frame; continuous sampling
//! blends the two frames bracketing an arbitrary time so sub-frame playback
//! stays smooth at any display refresh rate.

use std::collections::HashMap;

use signflow_core::{lerp, lerp_vec3, ArmPose, AvatarPose, HandPose, SignMotion};
use signflow_retarget::{retarget_frame, RigCalibration};

/// Retarget one recorded frame. `frame` clamps to `[0, frame_count − 1]`.
pub fn sample_frame(motion: &SignMotion, frame: usize, calib: &RigCalibration) -> AvatarPose {
    let frame = frame.min(motion.last_frame());

    retarget_frame(
        motion.body[frame].as_ref(),
        motion.left_hand[frame].as_ref(),
        motion.right_hand[frame].as_ref(),
        motion.face[frame].as_ref(),
        calib,
    )
}

/// Sample the motion at an arbitrary time, blending the two bracketing
/// frames. Times outside the clip clamp to its endpoints.
pub fn sample_at(motion: &SignMotion, time_ms: f32, calib: &RigCalibration) -> AvatarPose {
    let exact_frame = (time_ms / motion.frame_duration_ms()).max(0.0);
    let frame1 = (exact_frame.floor() as usize).min(motion.last_frame());
    let frame2 = (frame1 + 1).min(motion.last_frame());
    let t = exact_frame - frame1 as f32;

    if frame1 == frame2 || t == 0.0 {
        return sample_frame(motion, frame1, calib);
    }

    let a = sample_frame(motion, frame1, calib);
    let b = sample_frame(motion, frame2, calib);
    blend_avatar_pose(&a, &b, t)
}

/// Blend every numeric field of two avatar poses.
fn blend_avatar_pose(a: &AvatarPose, b: &AvatarPose, t: f32) -> AvatarPose {
    AvatarPose {
        left_arm: blend_arm(&a.left_arm, &b.left_arm, t),
        right_arm: blend_arm(&a.right_arm, &b.right_arm, t),
        left_fingers: blend_hand_pose(&a.left_fingers, &b.left_fingers, t),
        right_fingers: blend_hand_pose(&a.right_fingers, &b.right_fingers, t),
        blendshapes: blend_weights(&a.blendshapes, &b.blendshapes, t),
        head_rotation: lerp_vec3(a.head_rotation, b.head_rotation, t),
    }
}

fn blend_arm(a: &ArmPose, b: &ArmPose, t: f32) -> ArmPose {
    ArmPose {
        upper_arm: lerp_vec3(a.upper_arm, b.upper_arm, t),
        forearm: lerp_vec3(a.forearm, b.forearm, t),
        hand: lerp_vec3(a.hand, b.hand, t),
    }
}

fn blend_hand_pose(a: &HandPose, b: &HandPose, t: f32) -> HandPose {
    let av = a.fingers();
    let bv = b.fingers();
    let mut out = [[0.0f32; 3]; 5];
    for finger in 0..5 {
        for joint in 0..3 {
            out[finger][joint] = lerp(av[finger][joint], bv[finger][joint], t);
        }
    }
    HandPose::from_fingers(out)
}

/// Key-union blend: a key missing on either side contributes weight 0.
fn blend_weights(
    a: &HashMap<String, f32>,
    b: &HashMap<String, f32>,
    t: f32,
) -> HashMap<String, f32> {
    let mut out = HashMap::with_capacity(a.len().max(b.len()));
    for (name, &wa) in a {
        let wb = b.get(name).copied().unwrap_or(0.0);
        out.insert(name.clone(), lerp(wa, wb, t));
    }
    for (name, &wb) in b {
        if !a.contains_key(name) {
            out.insert(name.clone(), lerp(0.0, wb, t));
        }
    }
    out
}
