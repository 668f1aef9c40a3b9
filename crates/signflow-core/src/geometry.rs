//! Geometric utilities for pose interpolation and joint-angle extraction.
//!
//! Pure functions, no state. The angle→curl remap is empirical, calibrated
//! against the target rig's finger bones, and is preserved exactly for
//! drop-in behavior with existing recordings.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::types::{Quat, Vec3};

/// Angle at which a finger joint reads as fully straight (curl 0)
pub const CURL_STRAIGHT_ANGLE: f32 = PI;
/// Angle at which a finger joint reads as fully curled (curl 1)
pub const CURL_BENT_ANGLE: f32 = FRAC_PI_2;

/// Slerp falls back to per-component lerp above this cosine to avoid
/// dividing by a near-zero `sin`
const SLERP_LERP_THRESHOLD: f32 = 0.9995;

/// Linear interpolation, `t` unclamped
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Component-wise linear interpolation of positions or Euler rotations
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    Vec3::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t), lerp(a.z, b.z, t))
}

/// Shortest-path spherical interpolation between unit quaternions.
///
/// When the inputs are nearly parallel the spherical formula degenerates,
/// so this falls back to per-component lerp. The fallback result is not
/// renormalized; for unit inputs the drift is bounded and characterized in
/// the tests below.
pub fn slerp_quat(a: Quat, b: Quat, t: f32) -> Quat {
    let mut dot = a.dot(&b);

    // Take the short way around
    let b = if dot < 0.0 {
        dot = -dot;
        Quat::new(-b.x, -b.y, -b.z, -b.w)
    } else {
        b
    };

    if dot > SLERP_LERP_THRESHOLD {
        return Quat::new(
            lerp(a.x, b.x, t),
            lerp(a.y, b.y, t),
            lerp(a.z, b.z, t),
            lerp(a.w, b.w, t),
        );
    }

    let theta = dot.clamp(-1.0, 1.0).acos();
    let sin_theta = theta.sin();
    let wa = ((1.0 - t) * theta).sin() / sin_theta;
    let wb = (t * theta).sin() / sin_theta;

    Quat::new(
        wa * a.x + wb * b.x,
        wa * a.y + wb * b.y,
        wa * a.z + wb * b.z,
        wa * a.w + wb * b.w,
    )
}

/// Angle at vertex `b` between rays `b→a` and `b→c`, in radians.
///
/// Returns 0 for a degenerate joint (either ray has ~zero length) rather
/// than propagating a NaN into a live frame.
pub fn angle_between_points(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    let ba = a.to_nalgebra() - b.to_nalgebra();
    let bc = c.to_nalgebra() - b.to_nalgebra();

    let norms = ba.norm() * bc.norm();
    if norms < 1e-10 {
        return 0.0;
    }
    (ba.dot(&bc) / norms).clamp(-1.0, 1.0).acos()
}

/// Remap a joint angle to a normalized curl value.
///
/// `[π/2, π]` maps linearly onto `[1, 0]`; anything outside clamps.
pub fn angle_to_curl(angle: f32) -> f32 {
    ((CURL_STRAIGHT_ANGLE - angle) / (CURL_STRAIGHT_ANGLE - CURL_BENT_ANGLE)).clamp(0.0, 1.0)
}
