//! Finger curl extraction.
//!
//! Each finger contributes three joint angles (root relative to the wrist,
//! then the two mid joints), remapped to normalized curls. A missing or
//! incomplete hand degrades to the neutral pose instead of erroring — a
//! one-handed sign plays with the idle hand relaxed.

use signflow_core::{
    angle_between_points, angle_to_curl, FingerCurls, HandFrame, HandPose, FINGER_CHAINS, WRIST,
};

/// Extract per-finger curls from one hand frame.
///
/// Returns [`HandPose::neutral`] when the hand is absent or its landmark
/// count is wrong.
pub fn extract_finger_pose(hand: Option<&HandFrame>) -> HandPose {
    let Some(hand) = hand else {
        return HandPose::neutral();
    };
    if !hand.is_complete() {
        return HandPose::neutral();
    }

    let wrist = hand.landmarks[WRIST].position;
    let mut fingers = [[0.0f32; 3]; 5];

    for (finger, chain) in FINGER_CHAINS.iter().enumerate() {
        let root = hand.landmarks[chain[0]].position;
        let mid1 = hand.landmarks[chain[1]].position;
        let mid2 = hand.landmarks[chain[2]].position;
        let tip = hand.landmarks[chain[3]].position;

        let curls: FingerCurls = [
            angle_to_curl(angle_between_points(wrist, root, mid1)),
            angle_to_curl(angle_between_points(root, mid1, mid2)),
            angle_to_curl(angle_between_points(mid1, mid2, tip)),
        ];
        fingers[finger] = curls;
    }

    HandPose::from_fingers(fingers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use signflow_core::{HandLandmark, Vec3, HAND_LANDMARK_COUNT};

    /// A flat hand: wrist at origin, each finger straight along its own
    /// ray out of the wrist
    fn straight_hand() -> HandFrame {
        let mut landmarks = vec![HandLandmark::new(Vec3::zero()); HAND_LANDMARK_COUNT];
        for (finger, chain) in FINGER_CHAINS.iter().enumerate() {
            let dir_y = finger as f32 * 0.1 - 0.2;
            let len = (1.0 + dir_y * dir_y).sqrt();
            let (ux, uy) = (1.0 / len, dir_y / len);
            for (j, &idx) in chain.iter().enumerate() {
                let r = 0.1 + j as f32 * 0.03;
                landmarks[idx] = HandLandmark::new(Vec3::new(ux * r, uy * r, 0.0));
            }
        }
        HandFrame::new(landmarks, 0.95)
    }

    /// Index finger folded back toward the wrist at its middle joint
    fn bent_index_hand() -> HandFrame {
        let mut hand = straight_hand();
        let chain = FINGER_CHAINS[1];
        let pip = hand.landmarks[chain[1]].position;
        // Fold mid-2 and tip back at a right angle
        hand.landmarks[chain[2]] = HandLandmark::new(Vec3::new(pip.x, pip.y + 0.03, 0.0));
        hand.landmarks[chain[3]] = HandLandmark::new(Vec3::new(pip.x - 0.03, pip.y + 0.03, 0.0));
        hand
    }

    #[test]
    fn test_absent_hand_is_neutral() {
        assert_eq!(extract_finger_pose(None), HandPose::neutral());
    }

    #[test]
    fn test_incomplete_hand_is_neutral() {
        let hand = HandFrame::new(vec![HandLandmark::new(Vec3::zero()); 5], 0.9);
        assert_eq!(extract_finger_pose(Some(&hand)), HandPose::neutral());
    }

    #[test]
    fn test_straight_fingers_read_as_uncurled() {
        let pose = extract_finger_pose(Some(&straight_hand()));
        for finger in pose.fingers() {
            for curl in finger {
                assert!(curl < 0.05, "straight joint read as curled: {curl}");
            }
        }
    }

    #[test]
    fn test_bent_joint_reads_as_curled() {
        let pose = extract_finger_pose(Some(&bent_index_hand()));
        // The fold is at the index finger's first mid joint
        assert!(pose.index[1] > 0.9, "bend not detected: {:?}", pose.index);
        // Other fingers stay straight
        for curl in pose.middle {
            assert!(curl < 0.05);
        }
    }
}
