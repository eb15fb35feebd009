//! Nullable shared handles for channel and function fields.
//!
//! Channels and callables are merged by reference: an incoming handle
//! replaces the base handle wholesale, and an absent incoming handle leaves
//! the field empty. Equality is identity, not content.

use std::fmt;
use std::sync::mpsc::{SendError, Sender};
use std::sync::Arc;

use structmerge_types::FieldKind;

use crate::field::FieldMerge;
use crate::policy;

// ---------------------------------------------------------------------------
// Chan
// ---------------------------------------------------------------------------

/// A nullable, shareable channel sender.
pub struct Chan<T> {
    sender: Option<Arc<Sender<T>>>,
}

impl<T> Chan<T> {
    /// Wrap a sender.
    pub fn new(sender: Sender<T>) -> Self {
        Self {
            sender: Some(Arc::new(sender)),
        }
    }

    /// An empty handle.
    pub fn none() -> Self {
        Self { sender: None }
    }

    /// Returns `true` if no sender is attached.
    pub fn is_none(&self) -> bool {
        self.sender.is_none()
    }

    /// The attached sender, if any.
    pub fn sender(&self) -> Option<&Sender<T>> {
        self.sender.as_deref()
    }

    /// Send a value through the attached sender.
    ///
    /// Returns the value back if no sender is attached or the receiver hung up.
    pub fn send(&self, value: T) -> Result<(), SendError<T>> {
        match &self.sender {
            Some(sender) => sender.send(value),
            None => Err(SendError(value)),
        }
    }

    /// Whether both handles refer to the same sender.
    pub fn same_channel(&self, other: &Self) -> bool {
        match (&self.sender, &other.sender) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> Clone for Chan<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T> Default for Chan<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> PartialEq for Chan<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_channel(other)
    }
}

impl<T> fmt::Debug for Chan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sender {
            Some(sender) => write!(f, "Chan({:p})", Arc::as_ptr(sender)),
            None => write!(f, "Chan(nil)"),
        }
    }
}

impl<T> FieldMerge for Chan<T> {
    const KIND: FieldKind = FieldKind::Channel;

    fn zero() -> Self {
        Self::none()
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn merge_field(_to: &Self, from: &Self) -> Self {
        Self {
            sender: policy::swap_if_present(from.sender.as_ref()),
        }
    }
}

// ---------------------------------------------------------------------------
// Func
// ---------------------------------------------------------------------------

/// A nullable, shareable callable, typically `Func<dyn Fn(..) -> ..>`.
pub struct Func<F: ?Sized> {
    callable: Option<Arc<F>>,
}

impl<F: ?Sized> Func<F> {
    /// Wrap a shared callable.
    pub fn new(callable: Arc<F>) -> Self {
        Self {
            callable: Some(callable),
        }
    }

    /// An empty handle.
    pub fn none() -> Self {
        Self { callable: None }
    }

    /// Returns `true` if no callable is attached.
    pub fn is_none(&self) -> bool {
        self.callable.is_none()
    }

    /// The attached callable, if any.
    pub fn get(&self) -> Option<&F> {
        self.callable.as_deref()
    }
}

impl<F: ?Sized> Clone for Func<F> {
    fn clone(&self) -> Self {
        Self {
            callable: self.callable.clone(),
        }
    }
}

impl<F: ?Sized> Default for Func<F> {
    fn default() -> Self {
        Self::none()
    }
}

impl<F: ?Sized> PartialEq for Func<F> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.callable, &other.callable) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<F: ?Sized> fmt::Debug for Func<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.callable {
            Some(callable) => write!(f, "Func({:p})", Arc::as_ptr(callable)),
            None => write!(f, "Func(nil)"),
        }
    }
}

impl<F: ?Sized> FieldMerge for Func<F> {
    const KIND: FieldKind = FieldKind::Function;

    fn zero() -> Self {
        Self::none()
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn merge_field(_to: &Self, from: &Self) -> Self {
        Self {
            callable: policy::swap_if_present(from.callable.as_ref()),
        }
    }
}
