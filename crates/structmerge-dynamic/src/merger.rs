//! Field-by-field merge of two resolved records.

use structmerge_core::policy;
use structmerge_types::{FieldRule, MergeOptions};
use tracing::{debug, trace};

use crate::ty::{FieldType, RecordType, Type};
use crate::value::{RecordValue, Value};

/// Merge `from` (higher precedence) over `to`, one declared field at a time.
///
/// Returns one value per field of `record_type`, in declaration order.
/// Fields that are not writable under `options`, and fields whose value is
/// missing or does not match the declared type in either record, come back
/// as the field type's zero value.
pub fn merge_fields(
    record_type: &RecordType,
    to: &RecordValue,
    from: &RecordValue,
    options: &MergeOptions,
) -> Vec<Value> {
    record_type
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            merge_field(field, to.fields().get(index), from.fields().get(index), options)
        })
        .collect()
}

fn merge_field(
    field: &FieldType,
    to: Option<&Value>,
    from: Option<&Value>,
    options: &MergeOptions,
) -> Value {
    if !field.visibility.is_writable(options.writability) {
        trace!(field = %field.name, visibility = %field.visibility, "skipping non-writable field");
        return field.ty.zero();
    }

    let (to, from) = match (to, from) {
        (Some(to), Some(from)) if to.conforms_to(&field.ty) && from.conforms_to(&field.ty) => {
            (to, from)
        }
        _ => {
            debug!(field = %field.name, expected = %field.ty, "skipping malformed field");
            return field.ty.zero();
        }
    };

    let rule = field.ty.kind().rule();
    trace!(field = %field.name, kind = %field.ty.kind(), ?rule, "merging field");

    let merged = match rule {
        FieldRule::SwapIfPresent => policy::swap_if_present(present(from)),
        FieldRule::PointerFallback => policy::pointer_fallback(present(to), present(from)),
        FieldRule::Concatenate => policy::concatenate(to.items(), from.items())
            .map(|items| sequence(&field.ty, items)),
        FieldRule::ZeroFallback => Some(policy::zero_fallback(to, from, from.is_zero())),
    };
    merged.unwrap_or_else(|| field.ty.zero())
}

fn present(value: &Value) -> Option<&Value> {
    value.is_present().then_some(value)
}

fn sequence(ty: &Type, items: Vec<Value>) -> Value {
    match ty {
        Type::Sequence(elem) => Value::sequence((**elem).clone(), items),
        other => other.zero(),
    }
}
