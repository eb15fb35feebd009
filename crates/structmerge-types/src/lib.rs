//! Foundation types for structmerge.
//!
//! This crate provides the descriptors, options, and error taxonomy shared by
//! the typed and reflective merge front ends. Every other structmerge crate
//! depends on `structmerge-types`.
//!
//! # Key Types
//!
//! - [`ShapeDescriptor`] / [`FieldDescriptor`]: Ordered field layout of a record
//! - [`FieldKind`] / [`FieldRule`]: Structural category of a field and the rule it selects
//! - [`Visibility`]: Declared visibility of a field
//! - [`MergeOptions`] / [`Writability`]: Which fields a merge may write
//! - [`MergeError`]: Precondition failures reported before any field is merged

pub mod error;
pub mod options;
pub mod shape;

pub use error::{MergeError, MergeResult, Position};
pub use options::{MergeOptions, Writability};
pub use shape::{FieldDescriptor, FieldKind, FieldRule, ShapeDescriptor, Visibility};
