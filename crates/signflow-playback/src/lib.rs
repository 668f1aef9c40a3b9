//! # SignFlow-Playback
//!
//! Time-accurate playback of recorded signs: sub-frame pose sampling,
//! cross-sign transition blending, and the host-driven playback clock.
//!
//! Everything here is single-threaded and cooperative: the host render loop
//! owns a [`PlaybackClock`] and calls [`PlaybackClock::tick`] once per
//! display refresh; nothing blocks or yields mid-computation.

pub mod blend;
pub mod clock;
pub mod sampler;

pub use blend::{blend_snapshots, transition_duration_ms};
pub use clock::{PlaybackClock, TickOutcome};
pub use sampler::{sample_at, sample_frame};
