//! Record types and the `record!` declaration macro.

use structmerge_types::{MergeOptions, ShapeDescriptor};

use crate::field::FieldMerge;

/// A record type whose fields can be merged one by one.
///
/// Implemented by [`record!`](crate::record); hand-written impls must merge
/// every field through [`merge_visible`](crate::merge_visible) so that
/// non-writable fields stay at their zero value.
pub trait Record: FieldMerge {
    /// The record's declared fields, in order.
    fn shape() -> ShapeDescriptor;

    /// Build a fresh record from `to` and `from`, field by field.
    ///
    /// Neither input is modified.
    fn merge_record(to: &Self, from: &Self, options: &MergeOptions) -> Self;

    /// Merge `incoming` over `self` with default options.
    fn merged(&self, incoming: &Self) -> Self {
        Self::merge_record(self, incoming, &MergeOptions::default())
    }
}

/// Declare a record type and derive its merge behaviour.
///
/// The macro emits the struct unchanged and implements [`Record`],
/// [`FieldMerge`] (so the record can nest inside other records, where it is
/// replaced atomically) and [`Operand`](crate::Operand) for it. Every field
/// type must implement [`FieldMerge`] and the struct must be `Clone`.
///
/// Only `pub` fields are written by default; private fields always keep
/// their zero value in a merge result.
///
/// ```
/// use structmerge_core::{merge, record};
///
/// record! {
///     #[derive(Clone, Debug, PartialEq)]
///     pub struct Person {
///         pub name: String,
///         pub age: u32,
///     }
/// }
///
/// let base = Person { name: "X".into(), age: 0 };
/// let incoming = Person { name: String::new(), age: 30 };
/// let merged = merge(&base, &incoming).unwrap();
/// assert_eq!(merged, Person { name: "X".into(), age: 30 });
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $fty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field : $fty,
            )*
        }

        impl $crate::Record for $name {
            fn shape() -> $crate::ShapeDescriptor {
                $crate::ShapeDescriptor::new(
                    ::core::stringify!($name),
                    ::std::vec![
                        $(
                            $crate::FieldDescriptor::new(
                                ::core::stringify!($field),
                                <$fty as $crate::FieldMerge>::KIND,
                                $crate::Visibility::from_tokens(::core::stringify!($fvis)),
                                ::core::any::type_name::<$fty>(),
                            ),
                        )*
                    ],
                )
            }

            #[allow(unused_variables)]
            fn merge_record(to: &Self, from: &Self, options: &$crate::MergeOptions) -> Self {
                Self {
                    $(
                        $field: $crate::merge_visible::<$fty>(
                            ::core::stringify!($field),
                            $crate::Visibility::from_tokens(::core::stringify!($fvis)),
                            &to.$field,
                            &from.$field,
                            options,
                        ),
                    )*
                }
            }
        }

        impl $crate::FieldMerge for $name {
            const KIND: $crate::FieldKind = $crate::FieldKind::Record;

            fn zero() -> Self {
                Self {
                    $( $field: <$fty as $crate::FieldMerge>::zero(), )*
                }
            }

            fn is_zero(&self) -> bool {
                true $( && <$fty as $crate::FieldMerge>::is_zero(&self.$field) )*
            }

            fn merge_field(to: &Self, from: &Self) -> Self {
                $crate::policy::zero_fallback(to, from, $crate::FieldMerge::is_zero(from))
            }
        }

        impl $crate::Operand for $name {
            type Record = Self;

            const INDIRECTION: usize = 0;

            fn resolve(&self) -> ::core::option::Option<&Self> {
                ::core::option::Option::Some(self)
            }

            fn wrap(record: Self) -> Self {
                record
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use structmerge_types::{FieldKind, MergeOptions, Visibility};

    use crate::{FieldMerge, Record};

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
            pub labels: BTreeMap<String, String>,
            pub(crate) note: Option<String>,
        }
    }

    record! {
        #[derive(Clone, Debug, PartialEq)]
        struct Empty {}
    }

    #[test]
    fn shape_lists_fields_in_order() {
        let shape = Bar::shape();
        assert_eq!(shape.name, "Bar");
        let fields: Vec<_> = shape
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.kind, f.visibility))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("foo", FieldKind::Record, Visibility::Public),
                ("labels", FieldKind::Map, Visibility::Public),
                ("note", FieldKind::Pointer, Visibility::Restricted),
            ]
        );
        assert_eq!(Foo::shape().field("piyo").unwrap().visibility, Visibility::Private);
    }

    #[test]
    fn zero_record_is_zero() {
        let zero = Foo::zero();
        assert!(zero.is_zero());
        assert_eq!(zero.hoge, "");
        assert_eq!(zero.piyo, '\0');

        let mut set = Foo::zero();
        set.piyo = 'p';
        assert!(!set.is_zero(), "private fields take part in the zero test");
    }

    #[test]
    fn merged_uses_default_options() {
        let a = Foo { hoge: "dummy".into(), fuga: 1, piyo: 'a' };
        let b = Foo { hoge: "HOGE".into(), fuga: 0, piyo: 'b' };
        assert_eq!(
            a.merged(&b),
            Foo { hoge: "HOGE".into(), fuga: 1, piyo: '\0' }
        );
    }

    #[test]
    fn restricted_fields_follow_options() {
        let a = Bar { foo: Foo::zero(), labels: BTreeMap::new(), note: Some("a".into()) };
        let b = Bar { foo: Foo::zero(), labels: BTreeMap::new(), note: None };

        assert_eq!(Bar::merge_record(&a, &b, &MergeOptions::default()).note, None);
        assert_eq!(
            Bar::merge_record(&a, &b, &MergeOptions::permissive()).note,
            Some("a".into())
        );
    }

    #[test]
    fn empty_record_merges() {
        assert_eq!(Empty::shape().len(), 0);
        assert!(Empty::zero().is_zero());
        assert_eq!(Empty {}.merged(&Empty {}), Empty {});
    }
}
