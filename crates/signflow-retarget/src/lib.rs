//! # SignFlow-Retarget
//!
//! Converts one frame of raw tracking landmarks into target-rig bone
//! angles: per-finger curl extraction, the heuristic arm retargeter, and
//! the analytic two-bone IK solver used by the live-target path.
//!
//! All rig-specific constants live in [`calibration`]; retargeting to a
//! different skeleton means editing that module only.

pub mod arm;
pub mod calibration;
pub mod fingers;
pub mod ik;

pub use arm::{classify_arm_regime, retarget_arm, retarget_frame, ArmRegime, ArmSide};
pub use calibration::RigCalibration;
pub use fingers::extract_finger_pose;
pub use ik::{solve_two_bone_ik, IkSolution};
