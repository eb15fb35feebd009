//! Right-biased structural merge of records with zero-value fallback.
//!
//! Given two values of the same record type, `merge` builds a new value
//! field by field: the second operand wins unless its field holds the zero
//! value, sequences are concatenated, maps, channels and functions are
//! swapped wholesale when present, and pointers fall back to the first
//! operand when nil. Nested records are replaced atomically and private
//! fields are never written.
//!
//! Two front ends share one policy:
//!
//! - the typed API at the crate root, for records declared with [`record!`];
//! - the reflective API in [`dynamic`], for values that carry runtime types.
//!
//! ```
//! use structmerge::{merge, record};
//!
//! record! {
//!     #[derive(Clone, Debug, PartialEq)]
//!     pub struct Settings {
//!         pub name: String,
//!         pub retries: u32,
//!         pub tags: Vec<String>,
//!     }
//! }
//!
//! let defaults = Settings { name: "svc".into(), retries: 3, tags: vec!["base".into()] };
//! let overrides = Settings { name: String::new(), retries: 5, tags: vec!["extra".into()] };
//!
//! let merged = merge(&defaults, &overrides).unwrap();
//! assert_eq!(merged.name, "svc");
//! assert_eq!(merged.retries, 5);
//! assert_eq!(merged.tags, vec!["base", "extra"]);
//! ```

pub use structmerge_core::{
    merge, merge_by_default, merge_visible, merge_with, policy, record, validate, Chan,
    FieldMerge, Func, Operand, Record, Resolved,
};
pub use structmerge_types::{
    FieldDescriptor, FieldKind, FieldRule, MergeError, MergeOptions, MergeResult, Position,
    ShapeDescriptor, Visibility, Writability,
};

/// Reflective merge over runtime-typed values.
pub mod dynamic {
    pub use structmerge_dynamic::*;
}
