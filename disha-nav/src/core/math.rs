//! Angle utilities.
//!
//! Angles are counter-clockwise positive, with +Y to the left of +X
//! (standard floor-plan orientation).

use std::f32::consts::PI;

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(rad: f32) -> f32 {
    rad * 180.0 / PI
}

/// Signed heading change from `from` to `to` in degrees, in (-180, 180].
///
/// Positive means a counter-clockwise (left) turn. Both vectors must be
/// non-zero.
#[inline]
pub fn heading_change_deg(from: super::Point2D, to: super::Point2D) -> f32 {
    rad_to_deg(from.cross(&to).atan2(from.dot(&to)))
}
