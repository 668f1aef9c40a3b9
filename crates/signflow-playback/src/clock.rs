//! The playback clock.
//!
//! An explicitly owned state machine driven by the host's render loop:
//! `idle` (nothing loaded) → `loaded` → `playing` → back to `loaded` on
//! pause/stop, or stopped on the last frame when the clip finishes. The
//! clock is the only writer of its state; poses handed out are fresh
//! snapshots. Swapping motions must happen between ticks.

use signflow_core::{AvatarPose, Error, Result, SignMotion};
use signflow_retarget::RigCalibration;
use tracing::{debug, info};

use crate::sampler::{sample_at, sample_frame};

/// Result of one clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Frame the clock now rests on
    pub frame: usize,
    /// True when the clip just reached its last frame and stopped
    pub finished: bool,
}

/// Wall-clock-driven playback state for one loaded sign
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    motion: Option<SignMotion>,
    current_frame: usize,
    is_playing: bool,
    start_time_ms: f64,
    playback_speed: f32,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self {
            motion: None,
            current_frame: 0,
            is_playing: false,
            start_time_ms: 0.0,
            playback_speed: 1.0,
        }
    }

    /// Load a motion, validating its structural invariants, and reset to
    /// the `loaded` state. Must only be called between ticks.
    pub fn load_motion(&mut self, motion: SignMotion) -> Result<()> {
        motion.validate()?;
        info!(gloss = %motion.gloss, frames = motion.frame_count, "motion loaded");
        self.motion = Some(motion);
        self.current_frame = 0;
        self.is_playing = false;
        Ok(())
    }

    /// Unload the current motion, returning to `idle`
    pub fn unload(&mut self) {
        self.motion = None;
        self.current_frame = 0;
        self.is_playing = false;
    }

    /// Start playback from the first frame. `now_ms` is the host's
    /// wall-clock time.
    pub fn play(&mut self, now_ms: f64) -> Result<()> {
        let Some(motion) = &self.motion else {
            return Err(Error::NotLoaded);
        };
        debug!(gloss = %motion.gloss, "playback started");
        self.start_time_ms = now_ms;
        self.current_frame = 0;
        self.is_playing = true;
        Ok(())
    }

    /// Advance the clock to `now_ms`.
    ///
    /// Speed changes apply from the tick they were set on; elapsed time
    /// already consumed is not rescaled.
    pub fn tick(&mut self, now_ms: f64) -> Result<TickOutcome> {
        let Some(motion) = &self.motion else {
            return Err(Error::NotLoaded);
        };
        if !self.is_playing {
            return Err(Error::NotPlaying);
        }

        let elapsed_ms = (now_ms - self.start_time_ms) * self.playback_speed as f64;
        let frame = (elapsed_ms * motion.fps as f64 / 1000.0).floor().max(0.0) as usize;

        if frame >= motion.frame_count {
            // Finished: stay on the last frame and stop
            self.current_frame = motion.last_frame();
            self.is_playing = false;
            debug!(gloss = %motion.gloss, "playback finished");
            return Ok(TickOutcome {
                frame: self.current_frame,
                finished: true,
            });
        }

        self.current_frame = frame;
        Ok(TickOutcome {
            frame,
            finished: false,
        })
    }

    /// Jump to a frame (clamped). Valid in any loaded state; does not
    /// resume playback on its own.
    pub fn seek(&mut self, frame: usize) -> Result<()> {
        let Some(motion) = &self.motion else {
            return Err(Error::NotLoaded);
        };
        self.current_frame = frame.min(motion.last_frame());
        debug!(frame = self.current_frame, "seek");
        Ok(())
    }

    /// Change the speed multiplier; takes effect on the next tick
    pub fn set_speed(&mut self, speed: f32) {
        self.playback_speed = speed;
    }

    /// Halt playback, keeping the current frame
    pub fn pause(&mut self) {
        if self.is_playing {
            debug!(frame = self.current_frame, "playback paused");
        }
        self.is_playing = false;
    }

    /// Halt playback and rewind to the first frame
    pub fn stop(&mut self) {
        self.is_playing = false;
        self.current_frame = 0;
        debug!("playback stopped");
    }

    // --- read surface ---

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn playback_speed(&self) -> f32 {
        self.playback_speed
    }

    pub fn motion(&self) -> Option<&SignMotion> {
        self.motion.as_ref()
    }

    /// Playback progress in [0, 1]; `None` while idle
    pub fn progress(&self) -> Option<f32> {
        let motion = self.motion.as_ref()?;
        if motion.frame_count <= 1 {
            return Some(1.0);
        }
        Some(self.current_frame as f32 / motion.last_frame() as f32)
    }

    /// Retarget the current frame into a fresh output pose; `None` while idle
    pub fn current_pose(&self, calib: &RigCalibration) -> Option<AvatarPose> {
        let motion = self.motion.as_ref()?;
        Some(sample_frame(motion, self.current_frame, calib))
    }

    /// Sub-frame sample at the host's wall-clock time, blending the two
    /// bracketing frames; falls back to the current discrete frame while
    /// paused. `None` while idle.
    pub fn pose_at(&self, now_ms: f64, calib: &RigCalibration) -> Option<AvatarPose> {
        let motion = self.motion.as_ref()?;
        if !self.is_playing {
            return Some(sample_frame(motion, self.current_frame, calib));
        }
        let elapsed_ms = ((now_ms - self.start_time_ms) * self.playback_speed as f64).max(0.0);
        Some(sample_at(motion, elapsed_ms as f32, calib))
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new()
    }
}
