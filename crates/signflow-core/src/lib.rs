//! # SignFlow-Core
//!
//! Core types and utilities for the SignFlow signing-avatar engine:
//! the recorded-motion data model, the avatar output pose, and the
//! geometry helpers shared by retargeting and playback.

pub mod avatar;
pub mod error;
pub mod geometry;
pub mod motion;
pub mod types;

pub use avatar::*;
pub use error::{Error, Result};
pub use geometry::*;
pub use motion::*;
pub use types::*;
