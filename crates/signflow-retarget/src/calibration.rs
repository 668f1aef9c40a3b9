//! Rig calibration constants.
//!
//! Every threshold and gain used by the arm heuristic and the IK solver,
//! calibrated so known reference poses reproduce known bone values on the
//! target skeleton. These are empirical, not derived from kinematics —
//! retargeting to a different rig means re-tuning this module, nothing else.

use serde::{Deserialize, Serialize};

/// Calibration for one target skeleton
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RigCalibration {
    // --- arm regime classification ---
    /// Max |Δx| between elbow and shoulder for the forward regime
    pub forward_dx_threshold: f32,
    /// Max |Δy| between elbow and shoulder for the forward regime
    pub forward_dy_threshold: f32,
    /// Wrist-to-shoulder distance must exceed this multiple of
    /// elbow-to-shoulder distance for the forward regime
    pub forward_reach_ratio: f32,
    /// Upper-arm angle below this reads as raised
    pub raised_angle_threshold: f32,

    // --- forearm bend scaling per regime ---
    pub bend_scale_forward: f32,
    pub bend_scale_raised: f32,
    pub bend_scale_down: f32,

    // --- upper-arm up/down axis ---
    pub lift_forward: f32,
    pub lift_base_raised: f32,
    pub lift_gain_raised: f32,
    pub lift_base_down: f32,
    pub lift_gain_down: f32,

    // --- upper-arm inward axis ---
    pub inward_gain: f32,
    pub inward_max: f32,
    pub inward_forward_bias: f32,

    // --- forearm palm-orientation decision table ---
    /// Bend magnitude separating the bent and straight rows of the table
    pub palm_bend_threshold: f32,
    pub palm_forward: f32,
    pub palm_raised_inward: f32,
    pub palm_raised_outward: f32,
    pub palm_down_bent_inward: f32,
    pub palm_down_bent_outward: f32,
    pub palm_down_straight: f32,

    // --- two-bone IK ---
    /// Reachability ceiling as a fraction of total arm length
    pub ik_max_reach_factor: f32,
    /// Targets closer than |upper − forearm| × this factor are unreachable
    pub ik_min_reach_factor: f32,
    pub ik_pitch_min: f32,
    pub ik_pitch_max: f32,
    /// Yaw clamp in side-normalized space; mirrored for the left arm
    pub ik_yaw_min: f32,
    pub ik_yaw_max: f32,
    pub ik_bend_min: f32,
    pub ik_bend_max: f32,
}

impl Default for RigCalibration {
    fn default() -> Self {
        Self {
            forward_dx_threshold: 0.08,
            forward_dy_threshold: 0.15,
            forward_reach_ratio: 1.5,
            raised_angle_threshold: -0.2,

            bend_scale_forward: 0.1,
            bend_scale_raised: 0.95,
            bend_scale_down: 0.55,

            lift_forward: 0.15,
            lift_base_raised: 0.4,
            lift_gain_raised: -1.2,
            lift_base_down: 1.1,
            lift_gain_down: -0.9,

            inward_gain: 2.2,
            inward_max: 0.9,
            inward_forward_bias: 0.35,

            palm_bend_threshold: 0.6,
            palm_forward: -0.2,
            palm_raised_inward: 1.3,
            palm_raised_outward: 0.5,
            palm_down_bent_inward: 0.9,
            palm_down_bent_outward: 0.4,
            palm_down_straight: 0.25,

            ik_max_reach_factor: 0.99,
            ik_min_reach_factor: 1.01,
            ik_pitch_min: -1.2,
            ik_pitch_max: 2.0,
            ik_yaw_min: -1.4,
            ik_yaw_max: 1.4,
            ik_bend_min: 0.0,
            ik_bend_max: 2.6,
        }
    }
}

impl RigCalibration {
    /// Load calibration from file, with `SIGNFLOW_`-prefixed environment
    /// variables taking precedence
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("SIGNFLOW"))
            .build()?;

        settings.try_deserialize()
    }

    /// Load calibration overrides from environment variables only
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("SIGNFLOW"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_match_reference_rig() {
        let calib = RigCalibration::default();
        assert_eq!(calib.forward_dx_threshold, 0.08);
        assert_eq!(calib.forward_reach_ratio, 1.5);
        assert_eq!(calib.bend_scale_raised, 0.95);
        assert_eq!(calib.ik_max_reach_factor, 0.99);
    }

    #[test]
    fn test_calibration_roundtrips_through_json() {
        let calib = RigCalibration::default();
        let json = serde_json::to_string(&calib).unwrap();
        let restored: RigCalibration = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.bend_scale_down, calib.bend_scale_down);
    }
}
