//! Indirection resolution.

use crate::value::Value;

/// The end of a pointer chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution<'a> {
    /// The first non-pointer value, or `None` if the chain hit a nil pointer.
    pub value: Option<&'a Value>,
    /// Number of pointer layers followed (including a trailing nil pointer).
    pub indirection: usize,
}

impl Resolution<'_> {
    /// Whether the original value was a pointer.
    pub fn was_pointer(&self) -> bool {
        self.indirection > 0
    }
}

/// Follow pointer layers until a non-pointer value is reached.
///
/// Iterative: the chain depth is counted, not recursed.
pub fn resolve(value: &Value) -> Resolution<'_> {
    let mut current = value;
    let mut indirection = 0;
    loop {
        match current {
            Value::Pointer {
                target: Some(next), ..
            } => {
                current = &**next;
                indirection += 1;
            }
            Value::Pointer { target: None, .. } => {
                return Resolution {
                    value: None,
                    indirection: indirection + 1,
                };
            }
            _ => {
                return Resolution {
                    value: Some(current),
                    indirection,
                };
            }
        }
    }
}
