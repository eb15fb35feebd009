//! Indirection resolution for typed operands.
//!
//! An [`Operand`] is either a record or a chain of pointer-like wrappers
//! around one. Resolution strips the wrappers to reach the record; wrapping
//! rebuilds the same chain around a freshly merged record, so the output of
//! a merge has the first operand's type.
//!
//! `Box`, `Rc` and `Arc` each add one layer of indirection. `Option` adds
//! nullability: a `None` anywhere along the chain leaves the operand without
//! a concrete value.

use std::rc::Rc;
use std::sync::Arc;

use crate::record::Record;

/// A merge input: a record behind zero or more pointer layers.
pub trait Operand: Sized {
    /// The concrete record at the end of the chain.
    type Record: Record;

    /// Number of pointer layers between the operand and its record.
    const INDIRECTION: usize;

    /// Follow the chain to the concrete record.
    ///
    /// Returns `None` when a nullable layer is empty.
    fn resolve(&self) -> Option<&Self::Record>;

    /// Wrap a record in this operand's chain of layers.
    fn wrap(record: Self::Record) -> Self;

    /// Whether the operand reaches its record through a pointer.
    fn is_pointer() -> bool {
        Self::INDIRECTION > 0
    }
}

macro_rules! pointer_operand {
    ($($ptr:ident),+) => {
        $(
            impl<P: Operand> Operand for $ptr<P> {
                type Record = P::Record;

                const INDIRECTION: usize = P::INDIRECTION + 1;

                fn resolve(&self) -> Option<&Self::Record> {
                    P::resolve(self)
                }

                fn wrap(record: Self::Record) -> Self {
                    $ptr::new(P::wrap(record))
                }
            }
        )+
    };
}

pointer_operand!(Box, Rc, Arc);

impl<P: Operand> Operand for Option<P> {
    type Record = P::Record;

    const INDIRECTION: usize = P::INDIRECTION;

    fn resolve(&self) -> Option<&Self::Record> {
        self.as_ref().and_then(P::resolve)
    }

    fn wrap(record: Self::Record) -> Self {
        Some(P::wrap(record))
    }
}
