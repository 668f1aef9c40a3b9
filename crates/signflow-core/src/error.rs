//! Error types for the SignFlow engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("frame array length mismatch in `{array}`: expected {expected}, got {actual}")]
    FrameArrayMismatch {
        array: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid frame rate: {0} (must be > 0)")]
    InvalidFps(f32),

    #[error("motion contains no frames")]
    EmptyMotion,

    #[error("no motion loaded")]
    NotLoaded,

    #[error("playback is not running")]
    NotPlaying,

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
