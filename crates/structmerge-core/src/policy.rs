//! The four field rules.
//!
//! Both the typed front end (through [`FieldMerge`](crate::FieldMerge)
//! impls) and the reflective front end call into these functions, so the
//! precedence policy is defined once. In every function `to` is the first
//! operand's field (lower precedence) and `from` the second's. `None` stands
//! for an absent or nil reference.

/// Rule for maps, channels and functions.
///
/// An absent incoming reference yields `None` (the caller substitutes the
/// zero value); a present one is adopted wholesale.
pub fn swap_if_present<T: Clone>(from: Option<&T>) -> Option<T> {
    from.cloned()
}

/// Rule for pointers.
///
/// A nil incoming pointer keeps the base pointer, which may itself be nil.
pub fn pointer_fallback<T: Clone>(to: Option<&T>, from: Option<&T>) -> Option<T> {
    from.or(to).cloned()
}

/// Rule for sequences: base elements followed by incoming elements.
///
/// Order is preserved and duplicates are kept. The result is `None` only
/// when both sides are absent.
pub fn concatenate<T: Clone>(to: Option<&[T]>, from: Option<&[T]>) -> Option<Vec<T>> {
    match (to, from) {
        (None, from) => from.map(<[T]>::to_vec),
        (Some(to), None) => Some(to.to_vec()),
        (Some(to), Some(from)) => {
            let mut out = Vec::with_capacity(to.len() + from.len());
            out.extend_from_slice(to);
            out.extend_from_slice(from);
            Some(out)
        }
    }
}

/// Rule for primitives, records, arrays and everything else.
///
/// The incoming value wins unless it equals its type's zero value.
pub fn zero_fallback<T: Clone>(to: &T, from: &T, from_is_zero: bool) -> T {
    if from_is_zero {
        to.clone()
    } else {
        from.clone()
    }
}
