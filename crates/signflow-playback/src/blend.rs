//! Cross-sign transition blending.
//!
//! Adjacent signs are joined by blending the outgoing sign's exit pose into
//! the incoming sign's entry pose. Hands blend continuously; body and face
//! hard-switch at the transition midpoint — a deliberate simplification
//! kept for drop-in behavior, since a continuous body/face blend would
//! visibly change existing transitions.

use signflow_core::{lerp, lerp_vec3, HandFrame, HandLandmark, PoseSnapshot, SignMotion};

/// Minimum cross-sign blend duration in milliseconds
pub const MIN_TRANSITION_MS: f32 = 100.0;
/// Maximum cross-sign blend duration in milliseconds
pub const MAX_TRANSITION_MS: f32 = 300.0;
/// Fraction of the average clip duration used as the blend duration
pub const TRANSITION_FRACTION: f32 = 0.2;

/// Blend duration between two signs: shorter signs get proportionally
/// shorter transitions, bounded to stay perceptible but not sluggish.
pub fn transition_duration_ms(from: &SignMotion, to: &SignMotion) -> f32 {
    let average = (from.duration_ms + to.duration_ms) * 0.5;
    (TRANSITION_FRACTION * average).clamp(MIN_TRANSITION_MS, MAX_TRANSITION_MS)
}

/// Blend the outgoing exit snapshot into the incoming entry snapshot at
/// progress `t ∈ [0, 1]`.
pub fn blend_snapshots(exit: &PoseSnapshot, entry: &PoseSnapshot, t: f32) -> PoseSnapshot {
    PoseSnapshot {
        left_hand: blend_hands(exit.left_hand.as_ref(), entry.left_hand.as_ref(), t),
        right_hand: blend_hands(exit.right_hand.as_ref(), entry.right_hand.as_ref(), t),
        // Body and face hard-switch at the midpoint
        body: if t < 0.5 {
            exit.body.clone()
        } else {
            entry.body.clone()
        },
        face: if t < 0.5 {
            exit.face.clone()
        } else {
            entry.face.clone()
        },
    }
}

/// Continuous hand blend: landmark positions, visibility, and confidence
/// all lerp. If either hand is absent or the landmark counts disagree,
/// fall back to a midpoint hard switch.
fn blend_hands(a: Option<&HandFrame>, b: Option<&HandFrame>, t: f32) -> Option<HandFrame> {
    match (a, b) {
        (Some(a), Some(b)) if a.landmarks.len() == b.landmarks.len() => {
            let landmarks = a
                .landmarks
                .iter()
                .zip(b.landmarks.iter())
                .map(|(la, lb)| HandLandmark {
                    position: lerp_vec3(la.position, lb.position, t),
                    visibility: match (la.visibility, lb.visibility) {
                        (Some(va), Some(vb)) => Some(lerp(va, vb, t)),
                        (va, vb) => va.or(vb),
                    },
                })
                .collect();
            Some(HandFrame::new(landmarks, lerp(a.confidence, b.confidence, t)))
        }
        (a, b) => {
            if t < 0.5 {
                a.cloned()
            } else {
                b.cloned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signflow_core::{Vec3, HAND_LANDMARK_COUNT};

    fn hand_at(x: f32, confidence: f32) -> HandFrame {
        HandFrame::new(
            vec![HandLandmark::new(Vec3::new(x, 0.5, 0.0)); HAND_LANDMARK_COUNT],
            confidence,
        )
    }

    fn motion_with_duration(frames: usize, fps: f32) -> SignMotion {
        SignMotion::from_frames(
            "TEST",
            fps,
            vec![None; frames],
            vec![None; frames],
            vec![None; frames],
            vec![None; frames],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_transition_duration_scales_with_clip_length() {
        // Two 1-second clips: 0.2 × 1000 = 200 ms, inside the bounds
        let a = motion_with_duration(30, 30.0);
        let b = motion_with_duration(30, 30.0);
        assert!((transition_duration_ms(&a, &b) - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_transition_duration_clamps_short_and_long() {
        // Two 0.2-second clips: 0.2 × 200 = 40 ms → floor of 100
        let short_a = motion_with_duration(6, 30.0);
        let short_b = motion_with_duration(6, 30.0);
        assert_eq!(transition_duration_ms(&short_a, &short_b), 100.0);

        // Two 10-second clips: 0.2 × 10000 = 2000 ms → ceiling of 300
        let long_a = motion_with_duration(300, 30.0);
        let long_b = motion_with_duration(300, 30.0);
        assert_eq!(transition_duration_ms(&long_a, &long_b), 300.0);
    }

    #[test]
    fn test_hands_blend_continuously() {
        let exit = PoseSnapshot {
            right_hand: Some(hand_at(0.2, 0.8)),
            ..Default::default()
        };
        let entry = PoseSnapshot {
            right_hand: Some(hand_at(0.6, 1.0)),
            ..Default::default()
        };

        let mid = blend_snapshots(&exit, &entry, 0.25);
        let hand = mid.right_hand.unwrap();
        assert!((hand.landmarks[0].position.x - 0.3).abs() < 1e-6);
        assert!((hand.confidence - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_body_and_face_hard_switch_at_midpoint() {
        let mut exit = PoseSnapshot::default();
        exit.face = Some(signflow_core::FaceFrame::default());
        let entry = PoseSnapshot::default();

        assert!(blend_snapshots(&exit, &entry, 0.49).face.is_some());
        assert!(blend_snapshots(&exit, &entry, 0.5).face.is_none());
    }

    #[test]
    fn test_absent_hand_falls_back_to_hard_switch() {
        let exit = PoseSnapshot::default();
        let entry = PoseSnapshot {
            right_hand: Some(hand_at(0.6, 1.0)),
            ..Default::default()
        };

        assert!(blend_snapshots(&exit, &entry, 0.3).right_hand.is_none());
        assert!(blend_snapshots(&exit, &entry, 0.7).right_hand.is_some());
    }
}
