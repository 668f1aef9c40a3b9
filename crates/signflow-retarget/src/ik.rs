//! Analytic two-bone inverse kinematics.
//!
//! The alternate arm driver: instead of recorded frames, the host supplies
//! a live 3D target point per tick and the solver derives shoulder and
//! elbow rotations directly from the law of cosines.

use std::f32::consts::PI;

use signflow_core::Vec3;

use crate::arm::ArmSide;
use crate::calibration::RigCalibration;

/// Solved arm rotations for one live target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkSolution {
    pub arm_rotation: Vec3,
    pub forearm_rotation: Vec3,
}

/// Solve the shoulder–elbow–wrist chain for a target point.
///
/// The target distance is clamped to `ik_max_reach_factor × (upper + fore)`.
/// A target closer than `|upper − fore| × ik_min_reach_factor` is
/// unreachable: the solver returns `None` and the caller keeps the
/// previously applied rotation rather than snapping to a default.
pub fn solve_two_bone_ik(
    shoulder: Vec3,
    target: Vec3,
    upper_arm_len: f32,
    forearm_len: f32,
    side: ArmSide,
    calib: &RigCalibration,
) -> Option<IkSolution> {
    if upper_arm_len <= 0.0 || forearm_len <= 0.0 {
        return None;
    }

    let offset = target.to_nalgebra() - shoulder.to_nalgebra();
    let raw_distance = offset.norm();

    let min_reach = (upper_arm_len - forearm_len).abs() * calib.ik_min_reach_factor;
    let max_reach = (upper_arm_len + forearm_len) * calib.ik_max_reach_factor;

    // Unreachably close (includes a degenerate zero-length offset)
    if raw_distance < min_reach || raw_distance < 1e-6 {
        return None;
    }
    let distance = raw_distance.min(max_reach);

    // Law of cosines on the (upper, fore, distance) triangle
    let cos_elbow = (upper_arm_len * upper_arm_len + forearm_len * forearm_len
        - distance * distance)
        / (2.0 * upper_arm_len * forearm_len);
    let elbow_interior = cos_elbow.clamp(-1.0, 1.0).acos();
    let bend = (PI - elbow_interior).clamp(calib.ik_bend_min, calib.ik_bend_max);

    let cos_shoulder = (upper_arm_len * upper_arm_len + distance * distance
        - forearm_len * forearm_len)
        / (2.0 * upper_arm_len * distance);
    let shoulder_offset = cos_shoulder.clamp(-1.0, 1.0).acos();

    // Aim direction decomposed into pitch/yaw; yaw is side-normalized so
    // one clamp range serves both arms, mirrored on the way out
    let dir = offset / raw_distance;
    let mirror = side.mirror();
    let horizontal = (dir.x * dir.x + dir.z * dir.z).sqrt();
    let pitch = (-dir.y).atan2(horizontal);
    let yaw = (dir.x * mirror).atan2(-dir.z);

    let pitch = (pitch + shoulder_offset).clamp(calib.ik_pitch_min, calib.ik_pitch_max);
    let yaw = yaw.clamp(calib.ik_yaw_min, calib.ik_yaw_max);

    Some(IkSolution {
        arm_rotation: Vec3::new(pitch, yaw * mirror, 0.0),
        forearm_rotation: Vec3::new(bend, 0.0, 0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPPER: f32 = 0.25;
    const FORE: f32 = 0.22;

    fn solve(target: Vec3) -> Option<IkSolution> {
        solve_two_bone_ik(
            Vec3::zero(),
            target,
            UPPER,
            FORE,
            ArmSide::Right,
            &RigCalibration::default(),
        )
    }

    #[test]
    fn test_fully_extended_arm_is_nearly_straight() {
        // Target exactly upper + forearm away; the 0.99 reach ceiling leaves
        // a slight residual bend
        let solution = solve(Vec3::new(0.0, 0.0, -(UPPER + FORE))).unwrap();
        assert!(
            solution.forearm_rotation.x < 0.35,
            "bend {}",
            solution.forearm_rotation.x
        );
    }

    #[test]
    fn test_unreachably_close_target_is_none() {
        // Closer than |upper − forearm|
        assert!(solve(Vec3::new(0.0, 0.0, -0.02)).is_none());
        assert!(solve(Vec3::zero()).is_none());
    }

    #[test]
    fn test_half_reach_target_bends_elbow() {
        let solution = solve(Vec3::new(0.0, 0.0, -(UPPER + FORE) * 0.5)).unwrap();
        assert!(
            solution.forearm_rotation.x > 1.0,
            "bend {}",
            solution.forearm_rotation.x
        );
    }

    #[test]
    fn test_overextended_target_clamps_to_reach_ceiling() {
        let at_reach = solve(Vec3::new(0.0, 0.0, -(UPPER + FORE))).unwrap();
        let far_beyond = solve(Vec3::new(0.0, 0.0, -10.0)).unwrap();
        assert!((at_reach.forearm_rotation.x - far_beyond.forearm_rotation.x).abs() < 1e-5);
    }

    #[test]
    fn test_raised_target_pitches_up() {
        // Target above the shoulder (smaller y in camera space)
        let up = solve(Vec3::new(0.0, -0.3, -0.2)).unwrap();
        let level = solve(Vec3::new(0.0, 0.0, -0.35)).unwrap();
        assert!(up.arm_rotation.x > level.arm_rotation.x);
    }

    #[test]
    fn test_yaw_mirrors_between_sides() {
        let calib = RigCalibration::default();
        let target_right = Vec3::new(0.2, 0.0, -0.3);
        let target_left = Vec3::new(-0.2, 0.0, -0.3);
        let right = solve_two_bone_ik(
            Vec3::zero(),
            target_right,
            UPPER,
            FORE,
            ArmSide::Right,
            &calib,
        )
        .unwrap();
        let left = solve_two_bone_ik(
            Vec3::zero(),
            target_left,
            UPPER,
            FORE,
            ArmSide::Left,
            &calib,
        )
        .unwrap();
        assert!((right.arm_rotation.y + left.arm_rotation.y).abs() < 1e-5);
        assert!((right.arm_rotation.x - left.arm_rotation.x).abs() < 1e-5);
    }

    #[test]
    fn test_angles_respect_clamp_ranges() {
        let calib = RigCalibration::default();
        // Target far behind and below: raw pitch/yaw would exceed the rig's
        // safe ranges
        let solution = solve_two_bone_ik(
            Vec3::zero(),
            Vec3::new(0.4, 0.4, 0.3),
            UPPER,
            FORE,
            ArmSide::Right,
            &calib,
        )
        .unwrap();
        assert!(solution.arm_rotation.x >= calib.ik_pitch_min);
        assert!(solution.arm_rotation.x <= calib.ik_pitch_max);
        assert!(solution.arm_rotation.y.abs() <= calib.ik_yaw_max);
        assert!(solution.forearm_rotation.x >= calib.ik_bend_min);
        assert!(solution.forearm_rotation.x <= calib.ik_bend_max);
    }
}
