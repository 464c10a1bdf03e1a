//! Error types for keyframe editing and position resolution

use crate::ids::AttributeId;
use crate::keyframe::KeyframeKind;

/// Failures reported by keyframe setters, copies and inverse conversions.
/// None of these invalidate the keyframe; the caller decides how to proceed.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum KeyError {
    /// No setter overload recognizes the id
    #[error("attribute {id} is not supported by {kind:?} keyframes")]
    UnsupportedAttribute { id: AttributeId, kind: KeyframeKind },

    /// Copy between keyframes of different kinds
    #[error("cannot copy a {actual:?} keyframe into a {expected:?} keyframe")]
    KindMismatch {
        expected: KeyframeKind,
        actual: KeyframeKind,
    },

    /// Inverse conversion would divide by zero along this axis
    #[error("degenerate {axis} axis: reference length is zero")]
    DegenerateAxis { axis: Axis },

    /// Value cannot be stored under the id (non-finite or out of range)
    #[error("value {value} is not valid for attribute {id}")]
    InvalidValue { id: AttributeId, value: f32 },

    /// Registry has no id for the name
    #[error("unknown attribute name: {name}")]
    UnknownAttributeName { name: String },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

pub type KeyResult<T> = Result<T, KeyError>;
