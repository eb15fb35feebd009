//! Result construction.

use std::sync::Arc;

use crate::ty::{RecordType, Type};
use crate::value::{RecordValue, Value};

/// A freshly built record and the pointer depth it must be returned at.
#[derive(Clone, Debug, PartialEq)]
pub struct MergeOutcome {
    /// The merged record.
    pub record: RecordValue,
    /// Pointer layers of the original first operand.
    pub indirection: usize,
}

impl MergeOutcome {
    /// Whether the result is returned behind a pointer.
    pub fn is_pointer(&self) -> bool {
        self.indirection > 0
    }

    /// The record wrapped in as many pointer layers as the first operand had.
    pub fn into_value(self) -> Value {
        let mut ty = Type::Record(Arc::clone(self.record.record_type()));
        let mut value = Value::Record(self.record);
        for _ in 0..self.indirection {
            value = Value::Pointer {
                elem: ty.clone(),
                target: Some(Box::new(value)),
            };
            ty = ty.pointer_to();
        }
        value
    }
}

/// Allocate a zero-valued record of `record_type` and write `merged` into it
/// by position.
pub fn build(
    record_type: &Arc<RecordType>,
    merged: Vec<Value>,
    indirection: usize,
) -> MergeOutcome {
    let mut record = RecordType::zero_value(record_type);
    for (index, value) in merged.into_iter().enumerate() {
        record.set(index, value);
    }
    MergeOutcome {
        record,
        indirection,
    }
}
