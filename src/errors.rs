//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`ArmatureError`] covers all failure modes including:
//! - Malformed joint hierarchies (no root, several roots, dangling parents)
//! - Parse faults in the joint-hierarchy text format
//! - Degenerate transforms (zero scale, zero-length offsets)
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ArmatureError>`.
//!
//! ```rust,ignore
//! use armature::errors::Result;
//! use armature::Armature;
//!
//! fn load(text: &str) -> Result<Armature> {
//!     Armature::from_text(text)
//! }
//! ```

use thiserror::Error;

use crate::armature::JointId;

/// The main error type for the armature crate.
///
/// Construction errors are unrecoverable: a partially built [`Armature`]
/// is never handed back to the caller.
///
/// [`Armature`]: crate::Armature
#[derive(Error, Debug)]
pub enum ArmatureError {
    // ========================================================================
    // Hierarchy Errors
    // ========================================================================
    /// The hierarchy description contains no joints.
    #[error("Armature has no joints")]
    Empty,

    /// No joint satisfies the root condition (negative or self parent).
    #[error("No root joint found (expected one joint with a negative or self-referential parent)")]
    NoRoot,

    /// More than one joint satisfies the root condition.
    #[error("Multiple root joints: {first} and {second}")]
    MultipleRoots {
        /// The first root encountered
        first: JointId,
        /// The second root encountered
        second: JointId,
    },

    /// A joint names a parent index outside the joint array.
    #[error("Joint {joint} refers to parent {parent}, but the armature has {count} joints")]
    ParentOutOfRange {
        /// The offending joint
        joint: JointId,
        /// The parent index it refers to
        parent: i64,
        /// Total joint count
        count: usize,
    },

    /// Some joints cannot be reached from the root (their parent chain loops).
    #[error("{count} joint(s) are not reachable from root {root}")]
    Unreachable {
        /// The root joint
        root: JointId,
        /// How many joints were left out of the traversal
        count: usize,
    },

    /// Two parallel inputs disagree on the joint count.
    #[error("Joint count mismatch in {context}: expected {expected}, got {actual}")]
    CountMismatch {
        /// Description of what was being compared
        context: &'static str,
        /// The expected count
        expected: usize,
        /// The actual count
        actual: usize,
    },

    /// Joint index out of bounds.
    #[error("Joint index out of bounds: {index} (joint count: {count})")]
    JointIndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Total joint count
        count: usize,
    },

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// The joint-hierarchy text stream is malformed.
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending token
        line: usize,
        /// What was expected
        message: String,
    },

    // ========================================================================
    // Transform Errors
    // ========================================================================
    /// A scale component is zero (or close enough) where it must be divided by.
    #[error("Degenerate scale in {context}")]
    DegenerateScale {
        /// The operation that rejected the scale
        context: &'static str,
    },

    /// A bone coincides with its reference, so no direction can be derived.
    #[error("Degenerate offset: bone and reference share the same position")]
    DegenerateOffset,

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// Stream I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Alias for `Result<T, ArmatureError>`.
pub type Result<T> = std::result::Result<T, ArmatureError>;
