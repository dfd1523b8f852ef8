use glam::{Affine3A, Mat4, Quat, Vec3};

use crate::errors::{ArmatureError, Result};
use crate::math::{self, DualQuat};

/// Per-pose transform state of one joint.
///
/// A bone carries two views of the same pose:
/// - `local_*`: relative to the parent joint's bone
/// - `global_*`: in world (armature root) space
///
/// The Y axis of the local scaling is the "length" axis: bones are modelled
/// as segments along +Y, and the stream format stores bone length there.
///
/// Bones live inside a [`Frame`](super::Frame), indexed by joint ID. The
/// `update_*` operations take the parent's bone from the same frame as
/// `reference` and must be driven in topology order (parents first).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bone {
    // === Local (parent-relative) ===
    pub local_rotation: Quat,
    pub local_scaling: Vec3,
    pub local_translation: Vec3,
    /// Magnitude of `local_translation`, before any parent scale
    pub local_length: f32,
    pub local_twist: f32,

    // === Global (world space) ===
    pub global_rotation: Quat,
    pub global_scaling: Vec3,
    pub global_translation: Vec3,
    /// Distance to the parent joint in world space
    pub global_length: f32,
    pub global_twist: f32,
}

impl Bone {
    /// Identity rotation, unit scale and length, zero translation.
    pub const IDENTITY: Self = Self {
        local_rotation: Quat::IDENTITY,
        local_scaling: Vec3::ONE,
        local_translation: Vec3::ZERO,
        local_length: 1.0,
        local_twist: 1.0,

        global_rotation: Quat::IDENTITY,
        global_scaling: Vec3::ONE,
        global_translation: Vec3::ZERO,
        global_length: 1.0,
        global_twist: 1.0,
    };

    #[must_use]
    pub fn new() -> Self {
        Self::IDENTITY
    }

    // ========================================================================
    // Hierarchy propagation
    // ========================================================================

    /// Derives the global transform from the local one and the reference's
    /// (already updated) global transform.
    ///
    /// - rotation: `reference.global_rotation * local_rotation`
    ///   (local first, then parent)
    /// - scaling: component-wise product
    /// - translation: local translation scaled by the parent's global scale,
    ///   rotated by the parent's global rotation, offset by the parent's
    ///   global translation
    pub fn update_global_data(&mut self, reference: &Bone) {
        let parent_rotation = reference.global_rotation;
        let parent_scaling = reference.global_scaling;

        self.global_rotation = (parent_rotation * self.local_rotation).normalize();
        self.global_scaling = parent_scaling * self.local_scaling;

        let mut v = self.local_translation;
        self.local_length = v.length();

        v *= parent_scaling;
        self.global_length = v.length();

        self.global_translation = parent_rotation * v + reference.global_translation;
    }

    /// Inverse of [`update_global_data`](Self::update_global_data): rebuilds
    /// the local transform from this bone's global transform and the
    /// reference's global transform.
    ///
    /// Used when global poses are authored directly (e.g. captured motion)
    /// and parent-relative values must be reconstructed.
    ///
    /// Fails with [`ArmatureError::DegenerateScale`] if the reference's
    /// global scale has a zero component.
    pub fn update_local_data(&mut self, reference: &Bone) -> Result<()> {
        let inv_parent_rotation = reference.global_rotation.inverse();
        let parent_scaling = reference.global_scaling;

        let offset = self.global_translation - reference.global_translation;
        let v = math::checked_scale_ratio(
            inv_parent_rotation * offset,
            parent_scaling,
            "Bone::update_local_data",
        )?;

        // Nothing is written until the scale has been accepted.
        self.local_rotation = (inv_parent_rotation * self.global_rotation).normalize();
        self.global_length = offset.length();
        self.local_length = v.length();
        self.local_translation = v;
        self.local_scaling = self.global_scaling / parent_scaling;
        Ok(())
    }

    /// Rebuilds the local transform when only this bone's global position is
    /// known (no orientation), e.g. a tracked point.
    ///
    /// The offset from the reference, expressed in the reference's frame,
    /// sets the length axis (`local_scaling.y`) and a two-axis rotation that
    /// carries +Y onto the offset direction: roll about Z, then pitch about
    /// X, no yaw. `global_rotation` is refreshed accordingly; translation
    /// fields are left untouched.
    ///
    /// Fails with [`ArmatureError::DegenerateOffset`] if the bone coincides
    /// with the reference.
    pub fn update_local_data_by_position_only(&mut self, reference: &Bone) -> Result<()> {
        let offset = reference.global_rotation.inverse()
            * (self.global_translation - reference.global_translation);

        let length = offset.length();
        let direction = offset
            .try_normalize()
            .ok_or(ArmatureError::DegenerateOffset)?;

        self.local_scaling = Vec3::new(1.0, length, 1.0);

        let roll = -direction.x.clamp(-1.0, 1.0).asin();
        let pitch = direction.z.atan2(direction.y);
        self.local_rotation = math::quat_from_pitch_yaw_roll(pitch, 0.0, roll);
        self.global_rotation = (reference.global_rotation * self.local_rotation).normalize();
        Ok(())
    }

    // ========================================================================
    // Matrices
    // ========================================================================

    /// Local TRS matrix (scale, then rotation, then translation).
    #[must_use]
    pub fn local_matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            self.local_scaling,
            self.local_rotation,
            self.local_translation,
        )
    }

    /// Global TRS matrix (scale, then rotation, then translation).
    #[must_use]
    pub fn global_matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            self.global_scaling,
            self.global_rotation,
            self.global_translation,
        )
    }

    // ========================================================================
    // Inter-pose transforms
    // ========================================================================

    /// Matrix mapping geometry attached to `from` onto `to`, where both are
    /// the same joint in two poses (e.g. bind pose and animated pose).
    ///
    /// Points are moved into `from`'s bone space, rescaled by the ratio
    /// `to.global_scaling / from.global_scaling`, then carried out of `to`'s
    /// bone space. `from.global_translation` maps onto `to.global_translation`.
    ///
    /// The scale ratio applies to the whole bone-space offset. This departs
    /// from the formula the format was first defined with, which scaled only
    /// the origin-offset row and so left rotated geometry unscaled.
    pub fn transform_matrix(from: &Bone, to: &Bone) -> Result<Mat4> {
        let ratio = math::checked_scale_ratio(
            to.global_scaling,
            from.global_scaling,
            "Bone::transform_matrix",
        )?;

        let into_from = Mat4::from_quat(from.global_rotation.conjugate())
            * Mat4::from_translation(-from.global_translation);
        let out_of_to = Mat4::from_rotation_translation(to.global_rotation, to.global_translation);

        Ok(out_of_to * Mat4::from_scale(ratio) * into_from)
    }

    /// Rigid (scale-free) version of [`transform_matrix`](Self::transform_matrix):
    /// rotates about `from.global_translation` by the rotation delta, then
    /// translates by the position delta.
    #[must_use]
    pub fn rigid_transform_matrix(from: &Bone, to: &Bone) -> Mat4 {
        let (rotation, translation) = Self::rigid_delta(from, to);
        math::rigid_transform_matrix(from.global_translation, rotation, translation)
    }

    /// Dual-quaternion form of [`rigid_transform_matrix`](Self::rigid_transform_matrix).
    #[must_use]
    pub fn rigid_transform_dual_quaternion(from: &Bone, to: &Bone) -> DualQuat {
        let (rotation, translation) = Self::rigid_delta(from, to);
        DualQuat::from_rigid_transform(from.global_translation, rotation, translation)
    }

    #[inline]
    fn rigid_delta(from: &Bone, to: &Bone) -> (Quat, Vec3) {
        let rotation = (to.global_rotation * from.global_rotation.inverse()).normalize();
        (rotation, to.global_translation - from.global_translation)
    }
}

impl Default for Bone {
    fn default() -> Self {
        Self::IDENTITY
    }
}
