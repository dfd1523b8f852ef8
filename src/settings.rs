//! Configuration values for the armature setup passes.

/// Tuning for mirror-joint detection.
///
/// # Example
///
/// ```rust,ignore
/// use armature::MirrorSettings;
///
/// // Also require paired bones to have matching rest lengths.
/// let strict = MirrorSettings {
///     length_tolerance: Some(1e-3),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MirrorSettings {
    /// Maximum difference of `global_length` between two paired bones.
    ///
    /// `None` compares tree shape only.
    pub length_tolerance: Option<f32>,

    /// Pair siblings tagged left/right with each other before falling back
    /// to sibling order. Requires semantic tags to be assigned first.
    pub pair_opposite_sides_first: bool,
}

impl Default for MirrorSettings {
    fn default() -> Self {
        Self {
            length_tolerance: None,
            pair_opposite_sides_first: true,
        }
    }
}
