//! The recorded-motion data model.
//!
//! A `SignMotion` is the unit of captured data: parallel per-frame arrays
//! for body, both hands, and face, constructed once by the capture host and
//! consumed read-only by playback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{BodyFrame, FaceFrame, HandFrame};

/// A single-instant snapshot used as the entry/exit boundary of a sign,
/// blended against the neighboring sign during transitions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_hand: Option<HandFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_hand: Option<HandFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face: Option<FaceFrame>,
}

/// Capture provenance for a recorded sign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionMetadata {
    pub id: Uuid,
    pub captured_at: DateTime<Utc>,
    pub capture_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// A recorded sign: gloss identifier plus parallel frame arrays.
///
/// Invariants (enforced by [`SignMotion::from_frames`] and re-checkable on a
/// deserialized document via [`SignMotion::validate`]): all four arrays have
/// length `frame_count`, `frame_count > 0`, `fps > 0`. A one-handed sign
/// carries `None` entries for the idle hand, never a shorter array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignMotion {
    pub gloss: String,
    pub fps: f32,
    pub frame_count: usize,
    pub duration_ms: f32,
    pub body: Vec<Option<BodyFrame>>,
    pub left_hand: Vec<Option<HandFrame>>,
    pub right_hand: Vec<Option<HandFrame>>,
    pub face: Vec<Option<FaceFrame>>,
    pub entry_pose: PoseSnapshot,
    pub exit_pose: PoseSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MotionMetadata>,
}

impl SignMotion {
    /// Build a motion from captured frame arrays, deriving `frame_count`,
    /// `duration_ms`, and the entry/exit snapshots.
    pub fn from_frames(
        gloss: impl Into<String>,
        fps: f32,
        body: Vec<Option<BodyFrame>>,
        left_hand: Vec<Option<HandFrame>>,
        right_hand: Vec<Option<HandFrame>>,
        face: Vec<Option<FaceFrame>>,
        metadata: Option<MotionMetadata>,
    ) -> Result<Self> {
        if fps <= 0.0 {
            return Err(Error::InvalidFps(fps));
        }
        let frame_count = body.len();
        if frame_count == 0 {
            return Err(Error::EmptyMotion);
        }
        check_len("leftHand", frame_count, left_hand.len())?;
        check_len("rightHand", frame_count, right_hand.len())?;
        check_len("face", frame_count, face.len())?;

        let entry_pose = snapshot_at(&body, &left_hand, &right_hand, &face, 0);
        let exit_pose = snapshot_at(&body, &left_hand, &right_hand, &face, frame_count - 1);

        Ok(Self {
            gloss: gloss.into(),
            fps,
            frame_count,
            duration_ms: frame_count as f32 / fps * 1000.0,
            body,
            left_hand,
            right_hand,
            face,
            entry_pose,
            exit_pose,
            metadata,
        })
    }

    /// Re-check the structural invariants on a deserialized document.
    /// Loading hosts call this before handing the motion to playback.
    pub fn validate(&self) -> Result<()> {
        if self.fps <= 0.0 {
            return Err(Error::InvalidFps(self.fps));
        }
        if self.frame_count == 0 {
            return Err(Error::EmptyMotion);
        }
        check_len("body", self.frame_count, self.body.len())?;
        check_len("leftHand", self.frame_count, self.left_hand.len())?;
        check_len("rightHand", self.frame_count, self.right_hand.len())?;
        check_len("face", self.frame_count, self.face.len())?;
        Ok(())
    }

    /// Duration of a single frame in milliseconds
    pub fn frame_duration_ms(&self) -> f32 {
        1000.0 / self.fps
    }

    /// Index of the last frame
    pub fn last_frame(&self) -> usize {
        self.frame_count - 1
    }
}

fn check_len(array: &'static str, expected: usize, actual: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::FrameArrayMismatch {
            array,
            expected,
            actual,
        });
    }
    Ok(())
}

fn snapshot_at(
    body: &[Option<BodyFrame>],
    left_hand: &[Option<HandFrame>],
    right_hand: &[Option<HandFrame>],
    face: &[Option<FaceFrame>],
    index: usize,
) -> PoseSnapshot {
    PoseSnapshot {
        left_hand: left_hand[index].clone(),
        right_hand: right_hand[index].clone(),
        body: body[index].clone(),
        face: face[index].clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motion_with_frames(n: usize, fps: f32) -> Result<SignMotion> {
        SignMotion::from_frames(
            "HELLO",
            fps,
            vec![None; n],
            vec![None; n],
            vec![None; n],
            vec![None; n],
            None,
        )
    }

    #[test]
    fn test_duration_derived_from_fps() {
        let motion = motion_with_frames(90, 30.0).unwrap();
        assert_eq!(motion.frame_count, 90);
        assert!((motion.duration_ms - 3000.0).abs() < 1e-3);
        assert!((motion.frame_duration_ms() - 33.3333).abs() < 1e-3);
    }

    #[test]
    fn test_mismatched_arrays_rejected() {
        let result = SignMotion::from_frames(
            "HELLO",
            30.0,
            vec![None; 10],
            vec![None; 9],
            vec![None; 10],
            vec![None; 10],
            None,
        );
        assert!(matches!(
            result,
            Err(Error::FrameArrayMismatch {
                array: "leftHand",
                expected: 10,
                actual: 9,
            })
        ));
    }

    #[test]
    fn test_invalid_fps_rejected() {
        assert!(matches!(
            motion_with_frames(10, 0.0),
            Err(Error::InvalidFps(_))
        ));
        assert!(matches!(
            motion_with_frames(10, -24.0),
            Err(Error::InvalidFps(_))
        ));
    }

    #[test]
    fn test_empty_motion_rejected() {
        assert!(matches!(motion_with_frames(0, 30.0), Err(Error::EmptyMotion)));
    }

    #[test]
    fn test_validate_accepts_roundtripped_document() {
        let motion = motion_with_frames(5, 24.0).unwrap();
        let json = serde_json::to_string(&motion).unwrap();
        let restored: SignMotion = serde_json::from_str(&json).unwrap();
        assert!(restored.validate().is_ok());
        assert_eq!(restored.gloss, "HELLO");
    }

    #[test]
    fn test_validate_catches_tampered_frame_count() {
        let mut motion = motion_with_frames(5, 24.0).unwrap();
        motion.frame_count = 6;
        assert!(motion.validate().is_err());
    }
}
