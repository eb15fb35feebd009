//! Precondition checks run before any field is merged.

use std::sync::Arc;

use structmerge_types::{FieldKind, MergeError, MergeResult, Position, ShapeDescriptor};

use crate::resolve::{resolve, Resolution};
use crate::ty::{RecordType, Type};
use crate::value::{RecordValue, Value};

/// Two operands that passed every precondition.
#[derive(Debug)]
pub struct Validated<'a> {
    /// Layout of the concrete record type.
    pub shape: ShapeDescriptor,
    /// The concrete record type.
    pub record_type: Arc<RecordType>,
    /// The first operand's record (lower precedence).
    pub to: &'a RecordValue,
    /// The second operand's record (higher precedence).
    pub from: &'a RecordValue,
    /// Pointer layers of the first operand.
    pub indirection: usize,
}

/// Check both operands and resolve them to their concrete records.
///
/// Checks run in order: both operands initialized, identical declared
/// types, neither interface-typed, and both resolving to a record. Type
/// identity is checked on the original values, so operands with different
/// pointer depths are a mismatch even if they reach the same record. The
/// record each pointer chain actually reaches must also match the declared
/// element type at the declared depth.
pub fn validate<'a>(first: &'a Value, second: &'a Value) -> MergeResult<Validated<'a>> {
    let first_ty = first
        .ty()
        .ok_or_else(|| MergeError::invalid(Position::First))?;
    let second_ty = second
        .ty()
        .ok_or_else(|| MergeError::invalid(Position::Second))?;

    if first_ty != second_ty {
        return Err(MergeError::mismatch(
            first_ty.to_string(),
            second_ty.to_string(),
        ));
    }

    if first_ty.kind() == FieldKind::Interface {
        return Err(MergeError::UnsupportedKind {
            type_name: first_ty.to_string(),
        });
    }

    let to = concrete_record(&first_ty, resolve(first))?;
    let from = concrete_record(&first_ty, resolve(second))?;

    Ok(Validated {
        shape: to.record_type().shape(),
        record_type: Arc::clone(to.record_type()),
        to,
        from,
        indirection: pointer_depth(&first_ty).0,
    })
}

fn concrete_record<'a>(
    declared: &Type,
    resolved: Resolution<'a>,
) -> MergeResult<&'a RecordValue> {
    let value = resolved
        .value
        .ok_or_else(|| MergeError::not_struct(declared.to_string(), "nil pointer"))?;
    let record = value.as_record().ok_or_else(|| {
        let kind = value.ty().map_or("invalid", |ty| ty.kind_name());
        MergeError::not_struct(declared.to_string(), kind)
    })?;

    let (depth, elem) = pointer_depth(declared);
    if resolved.indirection != depth || !value.conforms_to(elem) {
        let actual = format!(
            "{}{}",
            "*".repeat(resolved.indirection),
            record.record_type().name
        );
        return Err(MergeError::mismatch(declared.to_string(), actual));
    }
    Ok(record)
}

/// Number of pointer layers in `ty` and the type they point at.
fn pointer_depth(ty: &Type) -> (usize, &Type) {
    let mut current = ty;
    let mut depth = 0;
    while let Type::Pointer(elem) = current {
        current = &**elem;
        depth += 1;
    }
    (depth, current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo_type() -> Arc<RecordType> {
        RecordType::builder("Foo")
            .public("Hoge", Type::Str)
            .public("Fuga", Type::Int)
            .private("piyo", Type::Int)
            .build()
    }

    fn foo() -> Value {
        Value::record(&foo_type(), vec![Value::str(""), Value::Int(0), Value::Int(0)])
    }

    #[test]
    fn invalid() {
        let err = validate(&Value::Invalid, &foo()).unwrap_err();
        assert_eq!(err, MergeError::invalid(Position::First));

        let err = validate(&foo(), &Value::Invalid).unwrap_err();
        assert_eq!(err, MergeError::invalid(Position::Second));
    }

    #[test]
    fn not_same_types() {
        let err = validate(&Value::str("foo"), &Value::Int(0)).unwrap_err();
        assert_eq!(err, MergeError::mismatch("string", "int"));
    }

    #[test]
    fn pointer_depth_is_part_of_the_type() {
        let err = validate(&Value::pointer_to(foo()), &foo()).unwrap_err();
        assert!(matches!(err, MergeError::TypeMismatch { .. }));
    }

    #[test]
    fn interface_type() {
        let a = Value::interface("any", Value::str("foo"));
        let b = Value::interface("any", Value::str("bar"));
        let err = validate(&a, &b).unwrap_err();
        assert_eq!(
            err,
            MergeError::UnsupportedKind {
                type_name: "any".into()
            }
        );
    }

    #[test]
    fn not_struct() {
        let err = validate(&Value::str("foo"), &Value::str("bar")).unwrap_err();
        assert_eq!(err, MergeError::not_struct("string", "string"));
    }

    #[test]
    fn pointer_to_non_record() {
        let a = Value::pointer_to(Value::Int(1));
        let err = validate(&a, &a).unwrap_err();
        assert_eq!(err, MergeError::not_struct("*int", "int"));
    }

    #[test]
    fn nil_pointer_operand() {
        let nil = Value::nil_pointer(Type::Record(foo_type()));
        let err = validate(&nil, &Value::pointer_to(foo())).unwrap_err();
        assert_eq!(err, MergeError::not_struct("*Foo", "nil pointer"));
    }

    #[test]
    fn pointer_target_must_match_declared_record() {
        let bar_type = RecordType::builder("Bar").public("Name", Type::Str).build();
        let bar = Value::record(&bar_type, vec![Value::str("b")]);
        let mislabeled = Value::Pointer {
            elem: Type::Record(foo_type()),
            target: Some(Box::new(bar)),
        };

        let err = validate(&Value::pointer_to(foo()), &mislabeled).unwrap_err();
        assert_eq!(err, MergeError::mismatch("*Foo", "*Bar"));

        let err = validate(&mislabeled, &Value::pointer_to(foo())).unwrap_err();
        assert_eq!(err, MergeError::mismatch("*Foo", "*Bar"));
    }

    #[test]
    fn pointer_chain_must_match_declared_depth() {
        let mislabeled = Value::Pointer {
            elem: Type::Record(foo_type()),
            target: Some(Box::new(Value::pointer_to(foo()))),
        };
        let err = validate(&Value::pointer_to(foo()), &mislabeled).unwrap_err();
        assert_eq!(err, MergeError::mismatch("*Foo", "**Foo"));
    }

    #[test]
    fn normal() {
        let a = foo();
        let v = validate(&a, &a).unwrap();
        assert_eq!(v.shape.name, "Foo");
        assert_eq!(v.shape.len(), 3);
        assert_eq!(v.indirection, 0);
    }

    #[test]
    fn pointer_operands_report_indirection() {
        let a = Value::pointer_to(Value::pointer_to(foo()));
        let v = validate(&a, &a).unwrap();
        assert_eq!(v.indirection, 2);
        assert_eq!(*v.record_type, *foo_type());
    }
}
