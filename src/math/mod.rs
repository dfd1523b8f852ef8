//! Transform Primitives
//!
//! Small helpers on top of [`glam`] used by the bone transform code:
//!
//! - [`quat_from_pitch_yaw_roll`]: Euler construction in roll, pitch, yaw order
//! - [`rigid_transform_matrix`]: rotation about a pivot followed by a translation
//! - [`DualQuat`]: unit dual quaternion for rigid skinning
//!
//! All rotations are unit quaternions. Helpers that divide by a scale go
//! through [`checked_scale_ratio`], which rejects zero components instead of
//! producing infinities.

pub mod dual_quat;

pub use dual_quat::DualQuat;

use glam::{Mat4, Quat, Vec3};

use crate::errors::{ArmatureError, Result};

/// Scale components with an absolute value below this are treated as zero.
pub const SCALE_EPSILON: f32 = 1e-6;

/// Builds a rotation that applies `roll` about Z, then `pitch` about X,
/// then `yaw` about Y. Angles are in radians.
#[inline]
#[must_use]
pub fn quat_from_pitch_yaw_roll(pitch: f32, yaw: f32, roll: f32) -> Quat {
    Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch) * Quat::from_rotation_z(roll)
}

/// Builds the matrix that rotates points by `rotation` about `origin`,
/// then translates them by `translation`.
///
/// A point at `origin` lands on `origin + translation`.
#[inline]
#[must_use]
pub fn rigid_transform_matrix(origin: Vec3, rotation: Quat, translation: Vec3) -> Mat4 {
    Mat4::from_rotation_translation(rotation, origin + translation)
        * Mat4::from_translation(-origin)
}

/// Component-wise `numerator / denominator`, failing when any denominator
/// component is (nearly) zero.
#[inline]
pub fn checked_scale_ratio(
    numerator: Vec3,
    denominator: Vec3,
    context: &'static str,
) -> Result<Vec3> {
    if denominator.abs().min_element() < SCALE_EPSILON {
        return Err(ArmatureError::DegenerateScale { context });
    }
    Ok(numerator / denominator)
}
