//! Reflective structural merge.
//!
//! Operands are [`Value`]s that carry their runtime [`Type`], so the full
//! precondition set is checked at runtime: uninitialized operands, type
//! mismatches, interface operands and non-record operands are all reported
//! as [`MergeError`](structmerge_types::MergeError)s before any field is
//! touched. The per-field rules are shared with the typed front end through
//! [`structmerge_core::policy`].
//!
//! # Pipeline
//!
//! - [`validate`]: Preconditions and type identity
//! - [`resolve`]: Pointer-chain resolution to the concrete record
//! - [`merge_fields`]: Per-field merge rules
//! - [`build`]: Fresh record construction and pointer re-wrapping
//!
//! [`merge`] runs all four.

pub mod build;
pub mod merge;
pub mod merger;
pub mod resolve;
pub mod ty;
pub mod validate;
pub mod value;

pub use build::{build, MergeOutcome};
pub use merge::{merge, merge_with};
pub use merger::merge_fields;
pub use resolve::{resolve, Resolution};
pub use ty::{FieldType, RecordType, RecordTypeBuilder, Type};
pub use validate::{validate, Validated};
pub use value::{Handle, RecordValue, Value};
