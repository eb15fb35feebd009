//! Typed structural merge.
//!
//! Combines two values of the same record type field by field: the second
//! operand wins unless its field holds the zero value, sequences are
//! concatenated, and reference-like fields are swapped wholesale.
//!
//! # Key Types
//!
//! - [`record!`]: Declares a record type and derives its merge behaviour
//! - [`Record`]: A record whose fields merge one by one
//! - [`FieldMerge`]: Kind, zero value and merge rule of a field type
//! - [`Operand`]: A record behind zero or more pointer layers
//! - [`Chan`] / [`Func`]: Nullable channel and function handles
//! - [`merge`] / [`merge_with`]: The merge entry points

pub mod field;
pub mod handle;
pub mod merge;
pub mod operand;
pub mod policy;
pub mod record;

pub use field::{merge_visible, FieldMerge};
pub use handle::{Chan, Func};
pub use merge::{merge, merge_with, validate, Resolved};
pub use operand::Operand;
pub use record::Record;

// Re-export shared types so generated code and callers need one import path.
pub use structmerge_types::{
    FieldDescriptor, FieldKind, FieldRule, MergeError, MergeOptions, MergeResult, Position,
    ShapeDescriptor, Visibility, Writability,
};
