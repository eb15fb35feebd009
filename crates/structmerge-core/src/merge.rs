//! The typed merge pipeline.
//!
//! `validate -> resolve -> merge fields -> wrap`. Operand types are fixed at
//! compile time, so type mismatches, interface operands and non-record
//! operands are rejected by the compiler; the only runtime precondition is
//! that every nullable layer of both operands is populated.

use structmerge_types::{MergeError, MergeOptions, MergeResult, Position, ShapeDescriptor};
use tracing::debug;

use crate::operand::Operand;
use crate::record::Record;

/// Both operands resolved to their concrete records.
#[derive(Debug)]
pub struct Resolved<'a, R> {
    /// Layout of the record type.
    pub shape: ShapeDescriptor,
    /// The first operand's record (lower precedence).
    pub to: &'a R,
    /// The second operand's record (higher precedence).
    pub from: &'a R,
    /// Pointer layers of the first operand.
    pub indirection: usize,
}

impl<R> Resolved<'_, R> {
    /// Whether the result must be wrapped in a pointer.
    pub fn wrap_as_pointer(&self) -> bool {
        self.indirection > 0
    }
}

/// Resolve both operands and check that each reaches a concrete record.
///
/// On success, returns the record's shape with both records and the
/// operand type's pointer depth.
pub fn validate<'a, V: Operand>(
    first: &'a V,
    second: &'a V,
) -> MergeResult<Resolved<'a, V::Record>> {
    let to = first
        .resolve()
        .ok_or_else(|| MergeError::invalid(Position::First))?;
    let from = second
        .resolve()
        .ok_or_else(|| MergeError::invalid(Position::Second))?;
    Ok(Resolved {
        shape: <V::Record as Record>::shape(),
        to,
        from,
        indirection: V::INDIRECTION,
    })
}

/// Merge `second` over `first` with default options.
///
/// Per field, the second operand wins unless its value is the zero value, in
/// which case the first operand's value survives. Sequences concatenate,
/// maps/channels/functions are swapped when present, pointers fall back to
/// the first operand when nil. The result is a new value of the operands'
/// type; neither input is modified.
pub fn merge<V: Operand>(first: &V, second: &V) -> MergeResult<V> {
    merge_with(first, second, &MergeOptions::default())
}

/// Merge `second` over `first` under explicit options.
pub fn merge_with<V: Operand>(first: &V, second: &V, options: &MergeOptions) -> MergeResult<V> {
    let resolved = validate(first, second)?;
    debug!(
        record = %resolved.shape.name,
        fields = resolved.shape.len(),
        indirection = resolved.indirection,
        writability = ?options.writability,
        "merging records"
    );
    let merged = <V::Record as Record>::merge_record(resolved.to, resolved.from, options);
    Ok(V::wrap(merged))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use proptest::prelude::*;
    use structmerge_types::Writability;

    use super::*;
    use crate::record;

    record! {
        #[derive(Clone, Debug, PartialEq)]
        struct Foo {
            pub hoge: String,
            pub fuga: i64,
            piyo: char,
        }
    }

    record! {
        #[derive(Clone, Debug, PartialEq)]
        struct Bar {
            pub foo: Foo,
        }
    }

    record! {
        #[derive(Clone, Debug, PartialEq)]
        struct Baz {
            pub foo: Option<Box<Foo>>,
        }
    }

    record! {
        #[derive(Clone, Debug, PartialEq)]
        struct Tagged {
            pub tags: Vec<String>,
        }
    }

    record! {
        #[derive(Clone, Debug, PartialEq)]
        struct Hidden {
            pub name: String,
            tags: Vec<u8>,
            ptr: Option<Arc<u8>>,
            map: HashMap<String, u8>,
        }
    }

    fn foo(hoge: &str) -> Foo {
        Foo {
            hoge: hoge.into(),
            fuga: 0,
            piyo: '\0',
        }
    }

    #[test]
    fn left_has_value() {
        let res = merge(&foo("HOGE"), &foo("")).unwrap();
        assert_eq!(res, foo("HOGE"));
    }

    #[test]
    fn right_has_value() {
        let res = merge(&foo(""), &foo("HOGE")).unwrap();
        assert_eq!(res, foo("HOGE"));
    }

    #[test]
    fn left_overwritten_by_right_value() {
        let res = merge(&foo("dummy"), &foo("HOGE")).unwrap();
        assert_eq!(res, foo("HOGE"));
    }

    #[test]
    fn each_field_falls_back_independently() {
        let a = Foo { hoge: "X".into(), fuga: 0, piyo: '\0' };
        let b = Foo { hoge: String::new(), fuga: 30, piyo: '\0' };
        let res = merge(&a, &b).unwrap();
        assert_eq!(res, Foo { hoge: "X".into(), fuga: 30, piyo: '\0' });
    }

    #[test]
    fn pointers_stay_pointers() {
        let res = merge(&Box::new(foo("dummy")), &Box::new(foo("HOGE"))).unwrap();
        let res: Box<Foo> = res;
        assert_eq!(*res, foo("HOGE"));
    }

    #[test]
    fn nested_pointer_chains_are_rebuilt() {
        let a: Box<Box<Foo>> = Box::new(Box::new(foo("dummy")));
        let b: Box<Box<Foo>> = Box::new(Box::new(foo("HOGE")));
        let res = merge(&a, &b).unwrap();
        assert_eq!(**res, foo("HOGE"));
    }

    #[test]
    fn nested_record_is_replaced_atomically() {
        let a = Box::new(Bar { foo: Foo { hoge: "dummy".into(), fuga: 7, piyo: '\0' } });
        let b = Box::new(Bar { foo: foo("HOGE") });
        let res = merge(&a, &b).unwrap();
        // fuga is not carried over from the base: the inner record is whole.
        assert_eq!(res.foo, foo("HOGE"));
    }

    #[test]
    fn zero_nested_record_keeps_base() {
        let a = Bar { foo: foo("dummy") };
        let b = Bar { foo: foo("") };
        assert_eq!(merge(&a, &b).unwrap(), a);
    }

    #[test]
    fn nested_pointer_field_takes_incoming_pointer() {
        let a = Box::new(Baz { foo: Some(Box::new(foo("dummy"))) });
        let b = Box::new(Baz { foo: Some(Box::new(foo("HOGE"))) });
        let res = merge(&a, &b).unwrap();
        assert_eq!(res.foo.as_deref(), Some(&foo("HOGE")));

        let b = Baz { foo: None };
        let res = merge(&*a, &b).unwrap();
        assert_eq!(res.foo.as_deref(), Some(&foo("dummy")));
    }

    #[test]
    fn sequences_concatenate() {
        let a = Tagged { tags: vec!["a".into(), "b".into()] };
        let b = Tagged { tags: vec!["c".into(), "d".into()] };
        assert_eq!(merge(&a, &b).unwrap().tags, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn internal_fields_never_populated() {
        let a = Hidden {
            name: "a".into(),
            tags: vec![1],
            ptr: Some(Arc::new(1)),
            map: [("k".to_string(), 1)].into_iter().collect(),
        };
        let b = Hidden {
            name: "b".into(),
            tags: vec![2],
            ptr: Some(Arc::new(2)),
            map: [("k".to_string(), 2)].into_iter().collect(),
        };
        let res = merge(&a, &b).unwrap();
        assert_eq!(res.name, "b");
        assert!(res.tags.is_empty());
        assert!(res.ptr.is_none());
        assert!(res.map.is_empty());
    }

    #[test]
    fn private_primitive_stays_zero() {
        let mut a = foo("a");
        a.piyo = 'x';
        let mut b = foo("b");
        b.piyo = 'y';
        assert_eq!(merge(&a, &b).unwrap().piyo, '\0');
    }

    #[test]
    fn inputs_are_not_modified() {
        let a = Tagged { tags: vec!["a".into()] };
        let b = Tagged { tags: vec!["b".into()] };
        let _ = merge(&a, &b).unwrap();
        assert_eq!(a.tags, vec!["a"]);
        assert_eq!(b.tags, vec!["b"]);
    }

    #[test]
    fn empty_option_operand_is_invalid() {
        let a: Option<Box<Foo>> = None;
        let b = Some(Box::new(foo("HOGE")));
        assert_eq!(
            merge(&a, &b).unwrap_err(),
            MergeError::invalid(Position::First)
        );
        assert_eq!(
            merge(&b, &a).unwrap_err(),
            MergeError::invalid(Position::Second)
        );
    }

    #[test]
    fn populated_option_operands_merge() {
        let a = Some(foo("dummy"));
        let b = Some(foo("HOGE"));
        assert_eq!(merge(&a, &b).unwrap(), Some(foo("HOGE")));
    }

    #[test]
    fn validate_reports_indirection() {
        let a = Box::new(foo("a"));
        let resolved = validate(&a, &a).unwrap();
        assert_eq!(resolved.indirection, 1);
        assert!(resolved.wrap_as_pointer());

        let resolved = validate(&*a, &*a).unwrap();
        assert!(!resolved.wrap_as_pointer());
    }

    #[test]
    fn validate_reports_shape() {
        let a = Some(Arc::new(foo("a")));
        let resolved = validate(&a, &a).unwrap();
        assert_eq!(resolved.shape, Foo::shape());
        assert_eq!(resolved.shape.name, "Foo");
        assert_eq!(resolved.shape.len(), 3);
        let writable: Vec<_> = resolved
            .shape
            .writable_fields(Writability::PublicOnly)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(writable, vec!["hoge", "fuga"]);
    }

    proptest! {
        #[test]
        fn right_biased_with_zero_fallback(
            a_name in "[a-z]{0,4}",
            b_name in "[a-z]{0,4}",
            a_age in any::<i64>(),
            b_age in any::<i64>(),
        ) {
            let a = Foo { hoge: a_name.clone(), fuga: a_age, piyo: '\0' };
            let b = Foo { hoge: b_name.clone(), fuga: b_age, piyo: '\0' };
            let res = merge(&a, &b).unwrap();

            let want_name = if b_name.is_empty() { a_name } else { b_name };
            let want_age = if b_age == 0 { a_age } else { b_age };
            prop_assert_eq!(res.hoge, want_name);
            prop_assert_eq!(res.fuga, want_age);
        }

        #[test]
        fn merging_with_zero_is_identity(name in "[a-z]{0,6}", age in any::<i64>()) {
            let a = Foo { hoge: name, fuga: age, piyo: '\0' };
            let zero = <Foo as crate::FieldMerge>::zero();
            prop_assert_eq!(merge(&a, &zero).unwrap(), a.clone());
            prop_assert_eq!(merge(&zero, &a).unwrap(), a);
        }
    }
}
