//! Error types for structural merges.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which operand of a merge an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// The first operand (lower precedence).
    First,
    /// The second operand (higher precedence).
    Second,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Second => write!(f, "second"),
        }
    }
}

/// Precondition failures of a merge.
///
/// Every variant is raised before the first field is processed, so a failed
/// merge never produces a partial result.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// An operand carries no concrete value.
    #[error("cannot merge an uninitialized value ({position} operand)")]
    InvalidValue { position: Position },

    /// The operands' declared types differ.
    #[error("operand types differ: `{first}` vs `{second}`")]
    TypeMismatch { first: String, second: String },

    /// An operand is interface-typed.
    #[error("interface type `{type_name}` is not supported")]
    UnsupportedKind { type_name: String },

    /// The resolved operand is not a record.
    #[error("cannot merge `{type_name}`: resolved kind is {kind}, not a record")]
    NotStruct { type_name: String, kind: String },
}

impl MergeError {
    /// Create an `InvalidValue` error for the given operand.
    pub fn invalid(position: Position) -> Self {
        Self::InvalidValue { position }
    }

    /// Create a `TypeMismatch` error from two type names.
    pub fn mismatch(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::TypeMismatch {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Create a `NotStruct` error from a type name and resolved kind.
    pub fn not_struct(type_name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::NotStruct {
            type_name: type_name.into(),
            kind: kind.into(),
        }
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
