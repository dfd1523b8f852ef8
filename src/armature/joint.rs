use super::semantics::{JointSemantic, SemanticTable};

/// Index of a joint inside its armature. Stable for the armature's lifetime.
pub type JointId = usize;

/// Identity of a joint as supplied by a hierarchy description.
///
/// `parent_id` follows the hierarchy convention: a negative value, or the
/// joint's own index, marks the root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointBasicData {
    pub name: String,
    pub parent_id: i32,
}

impl JointBasicData {
    #[must_use]
    pub fn new(name: impl Into<String>, parent_id: i32) -> Self {
        Self {
            name: name.into(),
            parent_id,
        }
    }
}

/// A node of the joint tree.
///
/// Joints are stored contiguously in their [`Armature`](super::Armature),
/// and every tree link is an index into that store: `parent`, `first_child`
/// and `next_sibling` form an intrusive tree, `mirror` an optional symmetric
/// relation to another joint of the same armature.
#[derive(Debug, Clone)]
pub struct Joint {
    // === Identity ===
    pub(crate) id: JointId,
    pub(crate) name: String,

    // === Tree links ===
    pub(crate) parent: Option<JointId>,
    pub(crate) first_child: Option<JointId>,
    pub(crate) last_child: Option<JointId>,
    pub(crate) next_sibling: Option<JointId>,

    // === Relations & tags ===
    pub(crate) mirror: Option<JointId>,
    pub(crate) semantic: JointSemantic,
}

impl Joint {
    pub(crate) fn new(id: JointId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            mirror: None,
            semantic: JointSemantic::empty(),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> JointId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent joint, `None` for the root.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<JointId> {
        self.parent
    }

    /// Parent index in the hierarchy convention (`-1` for the root).
    #[inline]
    #[must_use]
    pub fn parent_id(&self) -> i32 {
        self.parent.map_or(-1, |p| p as i32)
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[inline]
    #[must_use]
    pub fn first_child(&self) -> Option<JointId> {
        self.first_child
    }

    #[inline]
    #[must_use]
    pub fn next_sibling(&self) -> Option<JointId> {
        self.next_sibling
    }

    #[inline]
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    /// The structurally symmetric counterpart, if mirror detection found one.
    #[inline]
    #[must_use]
    pub fn mirror_joint(&self) -> Option<JointId> {
        self.mirror
    }

    #[inline]
    #[must_use]
    pub fn semantic(&self) -> JointSemantic {
        self.semantic
    }

    /// Tags the joint from the words of its name using the built-in
    /// vocabulary. Only ORs bits in, so repeated calls are idempotent.
    pub fn assign_semantics_based_on_name(&mut self) -> JointSemantic {
        self.assign_semantics_with(SemanticTable::global())
    }

    /// Same as [`assign_semantics_based_on_name`](Self::assign_semantics_based_on_name)
    /// with a caller-supplied vocabulary.
    pub fn assign_semantics_with(&mut self, table: &SemanticTable) -> JointSemantic {
        self.semantic |= table.classify(&self.name);
        log::trace!("Joint {} '{}' semantic: {:?}", self.id, self.name, self.semantic);
        self.semantic
    }

    /// Basic identity data of this joint.
    #[must_use]
    pub fn basic_data(&self) -> JointBasicData {
        JointBasicData::new(self.name.clone(), self.parent_id())
    }
}
