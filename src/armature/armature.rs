use smallvec::SmallVec;

use super::bone::Bone;
use super::frame::Frame;
use super::joint::{Joint, JointBasicData, JointId};
use super::semantics::SemanticTable;
use crate::errors::{ArmatureError, Result};

/// A rooted joint tree plus its default (bind) pose.
///
/// # Layout
///
/// - `joints`: contiguous joint store, `joints[i].id() == i`
/// - `root`: index of the single root joint
/// - `topology_order`: pre-order listing of all joint IDs (parents first)
/// - `default_frame`: the rest pose, one bone per joint
///
/// The topology is fixed at construction. The only later mutations are the
/// one-time setup passes (semantic tagging, mirror detection) and replacing
/// the default frame; after those, an armature can be shared read-only
/// across threads.
#[derive(Debug)]
pub struct Armature {
    pub(crate) joints: Vec<Joint>,
    pub(crate) root: JointId,
    pub(crate) topology_order: Vec<JointId>,
    pub(crate) default_frame: Frame,
}

impl Armature {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Builds an armature from per-joint name and parent index.
    ///
    /// The default frame is the identity pose.
    pub fn from_basic_data(data: &[JointBasicData]) -> Result<Self> {
        let names = data.iter().map(|d| d.name.clone()).collect();
        let parents: Vec<i32> = data.iter().map(|d| d.parent_id).collect();
        Self::build(names, &parents, Frame::new(data.len()))
    }

    /// Builds an armature from parallel parent-index and name arrays.
    ///
    /// The default frame is the identity pose; populate it with
    /// [`set_default_frame`](Self::set_default_frame) if a bind pose is needed.
    pub fn from_parents<S: AsRef<str>>(parents: &[i32], names: &[S]) -> Result<Self> {
        if parents.len() != names.len() {
            return Err(ArmatureError::CountMismatch {
                context: "Armature::from_parents names",
                expected: parents.len(),
                actual: names.len(),
            });
        }
        let names = names.iter().map(|n| n.as_ref().to_owned()).collect();
        Self::build(names, parents, Frame::new(parents.len()))
    }

    /// Links the joint tree, locates the root and computes the topology order.
    ///
    /// A joint whose parent is negative or itself is the root; exactly one
    /// is required.
    pub(crate) fn build(names: Vec<String>, parents: &[i32], default_frame: Frame) -> Result<Self> {
        let count = names.len();
        if count == 0 {
            return Err(ArmatureError::Empty);
        }

        let mut joints: Vec<Joint> = names
            .into_iter()
            .enumerate()
            .map(|(id, name)| Joint::new(id, name))
            .collect();

        let mut root = None;
        for (id, &parent) in parents.iter().enumerate() {
            if parent < 0 || parent as usize == id {
                if let Some(first) = root {
                    return Err(ArmatureError::MultipleRoots { first, second: id });
                }
                root = Some(id);
                continue;
            }

            let parent = parent as usize;
            if parent >= count {
                return Err(ArmatureError::ParentOutOfRange {
                    joint: id,
                    parent: i64::from(parents[id]),
                    count,
                });
            }
            Self::append_child(&mut joints, parent, id);
        }
        let root = root.ok_or(ArmatureError::NoRoot)?;

        let mut armature = Self {
            joints,
            root,
            topology_order: Vec::with_capacity(count),
            default_frame,
        };
        armature.calculate_topology_order();

        let reached = armature.topology_order.len();
        if reached != count {
            return Err(ArmatureError::Unreachable {
                root,
                count: count - reached,
            });
        }

        log::debug!(
            "Built armature with {} joints, root {} '{}'",
            count,
            root,
            armature.joints[root].name
        );
        Ok(armature)
    }

    fn append_child(joints: &mut [Joint], parent: JointId, child: JointId) {
        joints[child].parent = Some(parent);
        match joints[parent].last_child {
            Some(last) => joints[last].next_sibling = Some(child),
            None => joints[parent].first_child = Some(child),
        }
        joints[parent].last_child = Some(child);
    }

    fn calculate_topology_order(&mut self) {
        let order: Vec<JointId> = self.nodes(self.root).collect();
        self.topology_order = order;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Joint with the given ID, or `None` if out of range.
    #[inline]
    #[must_use]
    pub fn at(&self, index: JointId) -> Option<&Joint> {
        self.joints.get(index)
    }

    /// Mutable joint access, for the per-joint setup passes.
    #[inline]
    pub fn at_mut(&mut self, index: JointId) -> Option<&mut Joint> {
        self.joints.get_mut(index)
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Joint {
        &self.joints[self.root]
    }

    #[inline]
    #[must_use]
    pub fn root_index(&self) -> JointId {
        self.root
    }

    /// Joint count.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Pre-order joint IDs: every parent precedes its children.
    #[inline]
    #[must_use]
    pub fn topology_order(&self) -> &[JointId] {
        &self.topology_order
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Joint> {
        self.joints.iter().find(|j| j.name == name)
    }

    #[must_use]
    pub fn parent_of(&self, id: JointId) -> Option<&Joint> {
        self.at(id)?.parent.map(|p| &self.joints[p])
    }

    #[must_use]
    pub fn mirror_of(&self, id: JointId) -> Option<&Joint> {
        self.at(id)?.mirror.map(|m| &self.joints[m])
    }

    /// Direct children of `id`, in insertion order.
    #[must_use]
    pub fn children(&self, id: JointId) -> Children<'_> {
        Children {
            joints: &self.joints,
            next: self.at(id).and_then(|j| j.first_child),
        }
    }

    /// All joints below `id`, in pre-order, excluding `id` itself.
    #[must_use]
    pub fn descendants(&self, id: JointId) -> Descendants<'_> {
        let mut stack = SmallVec::new();
        if let Some(child) = self.at(id).and_then(|j| j.first_child) {
            stack.push(child);
        }
        Descendants {
            joints: &self.joints,
            stack,
        }
    }

    /// `id` followed by its descendants, in pre-order.
    pub fn nodes(&self, id: JointId) -> impl Iterator<Item = JointId> + '_ {
        self.at(id)
            .map(|j| j.id)
            .into_iter()
            .chain(self.descendants(id))
    }

    // ========================================================================
    // Default frame
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn default_frame(&self) -> &Frame {
        &self.default_frame
    }

    /// Default-pose bone of a joint, or `None` if out of range.
    #[inline]
    #[must_use]
    pub fn default_bone(&self, index: JointId) -> Option<&Bone> {
        self.default_frame.get(index)
    }

    /// Replaces the default frame. The frame must hold one bone per joint.
    pub fn set_default_frame(&mut self, frame: Frame) -> Result<()> {
        if frame.len() != self.size() {
            return Err(ArmatureError::CountMismatch {
                context: "Armature::set_default_frame",
                expected: self.size(),
                actual: frame.len(),
            });
        }
        self.default_frame = frame;
        Ok(())
    }

    /// Recomputes the default frame's global transforms from its local ones.
    pub fn rebuild_default_frame(&mut self) -> Result<()> {
        let mut frame = std::mem::take(&mut self.default_frame);
        let result = frame.rebuild_global(self);
        self.default_frame = frame;
        result
    }

    // ========================================================================
    // Setup passes
    // ========================================================================

    /// Tags every joint from its name with the built-in vocabulary.
    pub fn assign_semantics(&mut self) {
        self.assign_semantics_with(SemanticTable::global());
    }

    /// Tags every joint from its name with a caller-supplied vocabulary.
    pub fn assign_semantics_with(&mut self, table: &SemanticTable) {
        for joint in &mut self.joints {
            joint.assign_semantics_with(table);
        }
    }
}

/// Iterator over the direct children of a joint.
pub struct Children<'a> {
    joints: &'a [Joint],
    next: Option<JointId>,
}

impl Iterator for Children<'_> {
    type Item = JointId;

    fn next(&mut self) -> Option<JointId> {
        let id = self.next?;
        self.next = self.joints[id].next_sibling;
        Some(id)
    }
}

/// Pre-order iterator over the descendants of a joint.
pub struct Descendants<'a> {
    joints: &'a [Joint],
    stack: SmallVec<[JointId; 16]>,
}

impl Iterator for Descendants<'_> {
    type Item = JointId;

    fn next(&mut self) -> Option<JointId> {
        let id = self.stack.pop()?;
        let joint = &self.joints[id];
        // Sibling goes under the child so the whole child subtree comes first.
        if let Some(sibling) = joint.next_sibling {
            self.stack.push(sibling);
        }
        if let Some(child) = joint.first_child {
            self.stack.push(child);
        }
        Some(id)
    }
}
