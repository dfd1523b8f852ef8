use std::ops::{Index, IndexMut};

use glam::{Mat4, Vec3};

use super::armature::Armature;
use super::bone::Bone;
use super::joint::JointId;
use crate::errors::{ArmatureError, Result};
use crate::math::{self, DualQuat};

/// One complete pose: a [`Bone`] per joint, indexed by joint ID.
///
/// A frame does not know its armature; passes that need the hierarchy
/// (`rebuild_global`, `rebuild_local`) take it as an argument and check that
/// the bone count matches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    bones: Vec<Bone>,
}

impl Frame {
    /// A frame of `count` identity bones.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            bones: vec![Bone::IDENTITY; count],
        }
    }

    #[must_use]
    pub fn from_bones(bones: Vec<Bone>) -> Self {
        Self { bones }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    #[inline]
    pub fn bones_mut(&mut self) -> &mut [Bone] {
        &mut self.bones
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: JointId) -> Option<&Bone> {
        self.bones.get(id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: JointId) -> Option<&mut Bone> {
        self.bones.get_mut(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bone> {
        self.bones.iter()
    }

    fn check_count(&self, expected: usize, context: &'static str) -> Result<()> {
        if self.bones.len() == expected {
            Ok(())
        } else {
            Err(ArmatureError::CountMismatch {
                context,
                expected,
                actual: self.bones.len(),
            })
        }
    }

    // ========================================================================
    // Hierarchy passes
    // ========================================================================

    /// Recomputes every global transform from the local ones, walking the
    /// armature's topology order so each parent is updated before its
    /// children. The root is composed with the identity bone, so its global
    /// transform equals its local one.
    pub fn rebuild_global(&mut self, armature: &Armature) -> Result<()> {
        self.check_count(armature.size(), "Frame::rebuild_global")?;

        for &id in armature.topology_order() {
            let reference = match armature.joints[id].parent {
                Some(parent) => self.bones[parent],
                None => Bone::IDENTITY,
            };
            self.bones[id].update_global_data(&reference);
        }
        Ok(())
    }

    /// Recomputes every local transform from the global ones (the inverse of
    /// [`rebuild_global`](Self::rebuild_global)).
    ///
    /// On error the frame is left unchanged.
    pub fn rebuild_local(&mut self, armature: &Armature) -> Result<()> {
        self.check_count(armature.size(), "Frame::rebuild_local")?;

        // Reject a degenerate parent scale before any bone is rewritten.
        for joint in armature.joints() {
            if let Some(parent) = joint.parent {
                math::checked_scale_ratio(
                    Vec3::ONE,
                    self.bones[parent].global_scaling,
                    "Frame::rebuild_local",
                )?;
            }
        }

        for &id in armature.topology_order() {
            let reference = match armature.joints[id].parent {
                Some(parent) => self.bones[parent],
                None => Bone::IDENTITY,
            };
            self.bones[id].update_local_data(&reference)?;
        }
        Ok(())
    }

    // ========================================================================
    // Inter-pose transforms
    // ========================================================================

    /// Writes [`Bone::transform_matrix`] for every bone pair of `from` and
    /// `to` into `out`, reusing its allocation.
    pub fn transform_matrices_into(from: &Frame, to: &Frame, out: &mut Vec<Mat4>) -> Result<()> {
        to.check_count(from.len(), "Frame::transform_matrices")?;

        out.clear();
        out.reserve(from.len());
        for (a, b) in from.bones.iter().zip(&to.bones) {
            out.push(Bone::transform_matrix(a, b)?);
        }
        Ok(())
    }

    /// [`Bone::transform_matrix`] for every bone pair of `from` and `to`.
    pub fn transform_matrices(from: &Frame, to: &Frame) -> Result<Vec<Mat4>> {
        let mut out = Vec::new();
        Self::transform_matrices_into(from, to, &mut out)?;
        Ok(out)
    }

    /// [`Bone::rigid_transform_matrix`] for every bone pair of `from` and `to`.
    pub fn rigid_transform_matrices(from: &Frame, to: &Frame) -> Result<Vec<Mat4>> {
        to.check_count(from.len(), "Frame::rigid_transform_matrices")?;
        Ok(from
            .bones
            .iter()
            .zip(&to.bones)
            .map(|(a, b)| Bone::rigid_transform_matrix(a, b))
            .collect())
    }

    /// [`Bone::rigid_transform_dual_quaternion`] for every bone pair of `from` and `to`.
    pub fn rigid_dual_quaternions(from: &Frame, to: &Frame) -> Result<Vec<DualQuat>> {
        to.check_count(from.len(), "Frame::rigid_dual_quaternions")?;
        Ok(from
            .bones
            .iter()
            .zip(&to.bones)
            .map(|(a, b)| Bone::rigid_transform_dual_quaternion(a, b))
            .collect())
    }
}

impl Index<JointId> for Frame {
    type Output = Bone;

    #[inline]
    fn index(&self, id: JointId) -> &Bone {
        &self.bones[id]
    }
}

impl IndexMut<JointId> for Frame {
    #[inline]
    fn index_mut(&mut self, id: JointId) -> &mut Bone {
        &mut self.bones[id]
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = &'a Bone;
    type IntoIter = std::slice::Iter<'a, Bone>;

    fn into_iter(self) -> Self::IntoIter {
        self.bones.iter()
    }
}

impl From<Vec<Bone>> for Frame {
    fn from(bones: Vec<Bone>) -> Self {
        Self::from_bones(bones)
    }
}
