#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod armature;
pub mod errors;
pub mod math;
pub mod settings;

pub use armature::{
    Armature, Bone, Frame, Joint, JointBasicData, JointId, JointSemantic, SemanticTable,
    build_joint_mirror_relation, build_joint_mirror_relation_with,
};
pub use errors::{ArmatureError, Result};
pub use math::DualQuat;
pub use settings::MirrorSettings;
