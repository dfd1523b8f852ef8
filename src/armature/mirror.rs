//! Mirror-joint detection.
//!
//! Sibling joints whose subtrees have the same shape (left/right limbs,
//! paired ears, wings) are linked as mutual mirrors. Shape is compared by
//! [`is_similar`]; bone lengths only take part when
//! [`MirrorSettings::length_tolerance`] is set.
//!
//! Pairing is one-to-one, so the relation is always symmetric:
//! `mirror(a) == Some(b)` iff `mirror(b) == Some(a)`. Among three or more
//! similar siblings, left/right-tagged pairs are matched first (when
//! enabled), then the rest in sibling order; an odd one out keeps no mirror.

use smallvec::SmallVec;

use super::armature::Armature;
use super::frame::Frame;
use super::joint::JointId;
use crate::errors::{ArmatureError, Result};
use crate::settings::MirrorSettings;

/// True if the subtrees rooted at `p` and `q` have the same shape: both are
/// leaves, or both have the same number of children and corresponding
/// children (in sibling order) are pairwise similar.
///
/// IDs outside the armature are never similar to anything.
#[must_use]
pub fn is_similar(armature: &Armature, p: JointId, q: JointId) -> bool {
    let joints = armature.joints();
    let (Some(pj), Some(qj)) = (joints.get(p), joints.get(q)) else {
        return false;
    };
    let mut pc = pj.first_child;
    let mut qc = qj.first_child;

    loop {
        match (pc, qc) {
            (None, None) => return true,
            (Some(a), Some(b)) => {
                if !is_similar(armature, a, b) {
                    return false;
                }
                pc = joints[a].next_sibling;
                qc = joints[b].next_sibling;
            }
            _ => return false,
        }
    }
}

/// Finds mirror pairs among the descendants of `root`, without modifying
/// the armature. Each pair is reported once, lower sibling first.
pub fn find_mirror_pairs(
    armature: &Armature,
    root: JointId,
    frame: &Frame,
    settings: &MirrorSettings,
) -> Result<Vec<(JointId, JointId)>> {
    if root >= armature.size() {
        return Err(ArmatureError::JointIndexOutOfBounds {
            index: root,
            count: armature.size(),
        });
    }
    if frame.len() != armature.size() {
        return Err(ArmatureError::CountMismatch {
            context: "find_mirror_pairs frame",
            expected: armature.size(),
            actual: frame.len(),
        });
    }

    let lengths_match = |a: JointId, b: JointId| {
        settings
            .length_tolerance
            .is_none_or(|eps| (frame[a].global_length - frame[b].global_length).abs() <= eps)
    };
    let candidates = |a: JointId, b: JointId| lengths_match(a, b) && is_similar(armature, a, b);

    let mut paired = vec![false; armature.size()];
    let mut pairs = Vec::new();

    for group in armature.nodes(root) {
        let siblings: SmallVec<[JointId; 8]> = armature.children(group).collect();
        if siblings.len() < 2 {
            continue;
        }

        let mut pass = |require_opposite: bool, pairs: &mut Vec<(JointId, JointId)>| {
            for (i, &a) in siblings.iter().enumerate() {
                for &b in &siblings[i + 1..] {
                    if paired[a] || paired[b] {
                        continue;
                    }
                    if require_opposite
                        && !armature.joints[a]
                            .semantic
                            .is_opposite_side(armature.joints[b].semantic)
                    {
                        continue;
                    }
                    if candidates(a, b) {
                        paired[a] = true;
                        paired[b] = true;
                        pairs.push((a, b));
                    }
                }
            }
        };

        if settings.pair_opposite_sides_first {
            pass(true, &mut pairs);
        }
        pass(false, &mut pairs);

        for &a in &siblings {
            if !paired[a] && siblings.iter().any(|&b| b != a && candidates(a, b)) {
                log::debug!(
                    "Joint {} '{}' matches a sibling but no partner is left",
                    a,
                    armature.joints[a].name
                );
            }
        }
    }

    Ok(pairs)
}

/// Detects mirror pairs below `root` with default settings and links them.
///
/// Returns the number of pairs found.
pub fn build_joint_mirror_relation(
    armature: &mut Armature,
    root: JointId,
    frame: &Frame,
) -> Result<usize> {
    build_joint_mirror_relation_with(armature, root, frame, &MirrorSettings::default())
}

/// Detects mirror pairs below `root` and links them.
///
/// Mirrors previously set on descendants of `root` are cleared first, so
/// running the pass again yields the same relation.
pub fn build_joint_mirror_relation_with(
    armature: &mut Armature,
    root: JointId,
    frame: &Frame,
    settings: &MirrorSettings,
) -> Result<usize> {
    let pairs = find_mirror_pairs(armature, root, frame, settings)?;
    armature.apply_mirror_pairs(root, &pairs);
    Ok(pairs.len())
}

impl Armature {
    /// Runs mirror detection over the whole armature against the default frame.
    ///
    /// Returns the number of pairs found.
    pub fn build_mirror_relation(&mut self, settings: &MirrorSettings) -> Result<usize> {
        let pairs = find_mirror_pairs(self, self.root, &self.default_frame, settings)?;
        self.apply_mirror_pairs(self.root, &pairs);
        Ok(pairs.len())
    }

    fn apply_mirror_pairs(&mut self, root: JointId, pairs: &[(JointId, JointId)]) {
        let scope: Vec<JointId> = self.descendants(root).collect();
        for id in scope {
            self.joints[id].mirror = None;
        }

        for &(a, b) in pairs {
            log::debug!(
                "Mirror joints: {} '{}' <-> {} '{}'",
                a,
                self.joints[a].name,
                b,
                self.joints[b].name
            );
            self.joints[a].mirror = Some(b);
            self.joints[b].mirror = Some(a);
        }
    }
}
