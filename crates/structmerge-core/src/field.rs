//! Per-type field behaviour.
//!
//! [`FieldMerge`] is the trait every field type of a record implements. It
//! reports the field's [`FieldKind`], constructs and recognises the type's
//! zero value, and merges two field values under the rule the kind selects.
//!
//! Rust kinds map onto the merge kinds as follows:
//!
//! | Rust type | Kind |
//! |---|---|
//! | `bool`, integers, floats, `char`, `String`, `&'static str`, `()` | primitive |
//! | `[T; N]` | array |
//! | `Option<T>` | pointer |
//! | `Vec<T>`, `VecDeque<T>` | sequence (empty is absent) |
//! | `HashMap`, `BTreeMap`, `HashSet`, `BTreeSet` | map (empty is absent) |
//! | [`Chan<T>`](crate::Chan) | channel |
//! | [`Func<F>`](crate::Func) | function |
//! | types declared with [`record!`](crate::record) | record |

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

use structmerge_types::{FieldKind, MergeOptions, Visibility};
use tracing::trace;

use crate::policy;

/// Merge behaviour of a single field type.
pub trait FieldMerge: Clone {
    /// Structural category of this type.
    const KIND: FieldKind;

    /// The type's zero value.
    fn zero() -> Self;

    /// Whether this value equals [`zero`](Self::zero), compared structurally.
    fn is_zero(&self) -> bool;

    /// Merge `from` (higher precedence) over `to`.
    fn merge_field(to: &Self, from: &Self) -> Self;
}

/// Merge one declared field, honouring its visibility.
///
/// Fields the options do not admit as writable keep the zero value whatever
/// their kind. Generated [`Record`](crate::Record) impls call this for every
/// field.
pub fn merge_visible<T: FieldMerge>(
    name: &str,
    visibility: Visibility,
    to: &T,
    from: &T,
    options: &MergeOptions,
) -> T {
    if !visibility.is_writable(options.writability) {
        trace!(field = name, %visibility, "skipping non-writable field");
        return T::zero();
    }
    trace!(field = name, kind = %T::KIND, "merging field");
    T::merge_field(to, from)
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// Opt a `Clone + Default + PartialEq` type into the zero-fallback rule.
///
/// Use this for enums and other leaf types that should be replaced wholesale
/// when the incoming value is non-default.
///
/// ```
/// use structmerge_core::{merge_by_default, FieldMerge};
///
/// #[derive(Clone, Debug, Default, PartialEq)]
/// enum Level { #[default] Unset, Low, High }
///
/// merge_by_default!(Level);
///
/// assert_eq!(Level::merge_field(&Level::Low, &Level::Unset), Level::Low);
/// assert_eq!(Level::merge_field(&Level::Low, &Level::High), Level::High);
/// ```
#[macro_export]
macro_rules! merge_by_default {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FieldMerge for $ty {
                const KIND: $crate::FieldKind = $crate::FieldKind::Primitive;

                fn zero() -> Self {
                    <$ty as ::core::default::Default>::default()
                }

                fn is_zero(&self) -> bool {
                    *self == <$ty as ::core::default::Default>::default()
                }

                fn merge_field(to: &Self, from: &Self) -> Self {
                    $crate::policy::zero_fallback(to, from, $crate::FieldMerge::is_zero(from))
                }
            }
        )+
    };
}

merge_by_default!(
    bool, char, (), String, &'static str, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64,
    i128, isize, f32, f64,
);

impl<T: FieldMerge, const N: usize> FieldMerge for [T; N] {
    const KIND: FieldKind = FieldKind::Array;

    fn zero() -> Self {
        std::array::from_fn(|_| T::zero())
    }

    fn is_zero(&self) -> bool {
        self.iter().all(T::is_zero)
    }

    fn merge_field(to: &Self, from: &Self) -> Self {
        policy::zero_fallback(to, from, from.is_zero())
    }
}

// ---------------------------------------------------------------------------
// Pointers
// ---------------------------------------------------------------------------

impl<T: Clone> FieldMerge for Option<T> {
    const KIND: FieldKind = FieldKind::Pointer;

    fn zero() -> Self {
        None
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn merge_field(to: &Self, from: &Self) -> Self {
        policy::pointer_fallback(to.as_ref(), from.as_ref())
    }
}

// ---------------------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------------------

fn present<T>(items: &[T]) -> Option<&[T]> {
    (!items.is_empty()).then_some(items)
}

impl<T: Clone> FieldMerge for Vec<T> {
    const KIND: FieldKind = FieldKind::Sequence;

    fn zero() -> Self {
        Vec::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn merge_field(to: &Self, from: &Self) -> Self {
        policy::concatenate(present(to), present(from)).unwrap_or_default()
    }
}

impl<T: Clone> FieldMerge for VecDeque<T> {
    const KIND: FieldKind = FieldKind::Sequence;

    fn zero() -> Self {
        VecDeque::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn merge_field(to: &Self, from: &Self) -> Self {
        let to: Vec<T> = to.iter().cloned().collect();
        let from: Vec<T> = from.iter().cloned().collect();
        policy::concatenate(present(&to), present(&from))
            .map(VecDeque::from)
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Maps
// ---------------------------------------------------------------------------

macro_rules! swap_map_field {
    ($ty:ty, [$($bounds:tt)*]) => {
        impl<$($bounds)*> FieldMerge for $ty {
            const KIND: FieldKind = FieldKind::Map;

            fn zero() -> Self {
                Default::default()
            }

            fn is_zero(&self) -> bool {
                self.is_empty()
            }

            fn merge_field(_to: &Self, from: &Self) -> Self {
                policy::swap_if_present((!from.is_empty()).then_some(from)).unwrap_or_default()
            }
        }
    };
}

swap_map_field!(HashMap<K, V, S>, [K: Clone + Eq + Hash, V: Clone, S: BuildHasher + Clone + Default]);
swap_map_field!(BTreeMap<K, V>, [K: Clone + Ord, V: Clone]);
swap_map_field!(HashSet<T, S>, [T: Clone + Eq + Hash, S: BuildHasher + Clone + Default]);
swap_map_field!(BTreeSet<T>, [T: Clone + Ord]);
