//! The reflective merge pipeline: validate, resolve, merge fields, build.

use structmerge_types::{MergeOptions, MergeResult};
use tracing::debug;

use crate::build::build;
use crate::merger::merge_fields;
use crate::validate::validate;
use crate::value::Value;

/// Merge `second` over `first` with default options.
///
/// Both operands must have the identical type, reach a record through zero
/// or more pointers, and carry no interface layer. The result has the first
/// operand's type: a record, or a pointer chain of the same depth around one.
pub fn merge(first: &Value, second: &Value) -> MergeResult<Value> {
    merge_with(first, second, &MergeOptions::default())
}

/// Merge `second` over `first` under explicit options.
pub fn merge_with(first: &Value, second: &Value, options: &MergeOptions) -> MergeResult<Value> {
    let validated = validate(first, second)?;
    debug!(
        record = %validated.shape.name,
        fields = validated.shape.len(),
        indirection = validated.indirection,
        "merging records"
    );
    let merged = merge_fields(&validated.record_type, validated.to, validated.from, options);
    Ok(build(&validated.record_type, merged, validated.indirection).into_value())
}
