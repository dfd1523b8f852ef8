//! Skeletal Armature
//!
//! The joint hierarchy and its per-pose transform state:
//!
//! - [`Armature`]: rooted joint tree, topology order and default pose
//! - [`Joint`]: tree node with identity, index links, mirror relation and semantic tag
//! - [`Bone`]: local and global transform of one joint in one pose
//! - [`Frame`]: one bone per joint, indexed by joint ID
//!
//! # Update order
//!
//! Global transforms are derived top-down: every bone composes its local
//! transform with its parent's already-updated global transform. Walk
//! [`Armature::topology_order`] (or use [`Frame::rebuild_global`]) so that
//! parents always come first.
//!
//! ```rust,ignore
//! use armature::{Armature, Frame};
//!
//! let armature = Armature::from_parents(&[-1, 0, 0], &["Spine", "LeftArm", "RightArm"])?;
//! let mut pose = armature.default_frame().clone();
//! pose[1].local_translation = glam::Vec3::new(-0.2, 0.5, 0.0);
//! pose.rebuild_global(&armature)?;
//! ```

pub mod armature;
pub mod bone;
pub mod frame;
pub mod joint;
pub mod loader;
pub mod mirror;
pub mod semantics;

pub use armature::{Armature, Children, Descendants};
pub use bone::Bone;
pub use frame::Frame;
pub use joint::{Joint, JointBasicData, JointId};
pub use mirror::{build_joint_mirror_relation, build_joint_mirror_relation_with, find_mirror_pairs, is_similar};
pub use semantics::{JointSemantic, SemanticTable};
