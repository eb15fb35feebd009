//! Reflective values.
//!
//! A [`Value`] pairs data with enough type information to recover its
//! [`Type`]. Reference-like variants (pointer, sequence, map, channel,
//! function, interface) hold an `Option` where `None` is the nil reference.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ty::{RecordType, Type};

/// Opaque identity of a channel or function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle(pub u64);

/// A record instance: its type plus one value per declared field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordValue {
    ty: Arc<RecordType>,
    fields: Vec<Value>,
}

impl RecordValue {
    /// Create a record value. `fields` is matched to the type's fields by
    /// position; missing or surplus entries are tolerated and skipped when
    /// merging.
    pub fn new(ty: Arc<RecordType>, fields: Vec<Value>) -> Self {
        Self { ty, fields }
    }

    /// The record's type.
    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.ty
    }

    /// Field values in declaration order.
    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    /// Look up a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = self.ty.fields.iter().position(|f| f.name == name)?;
        self.fields.get(index)
    }

    /// Overwrite the field at `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: Value) {
        if let Some(slot) = self.fields.get_mut(index) {
            *slot = value;
        }
    }

    /// Whether every field holds its zero value.
    pub fn is_zero(&self) -> bool {
        self.fields.iter().all(Value::is_zero)
    }
}

/// A reflective value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// No value and no type, like an unset `any`.
    Invalid,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Record(RecordValue),
    Pointer {
        elem: Type,
        target: Option<Box<Value>>,
    },
    Sequence {
        elem: Type,
        items: Option<Vec<Value>>,
    },
    Array {
        elem: Type,
        items: Vec<Value>,
    },
    Map {
        key: Type,
        value: Type,
        entries: Option<Vec<(Value, Value)>>,
    },
    Channel {
        elem: Type,
        handle: Option<Handle>,
    },
    Function {
        signature: String,
        handle: Option<Handle>,
    },
    Interface {
        name: String,
        inner: Option<Box<Value>>,
    },
}

impl Value {
    /// A string value.
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    /// A record value.
    pub fn record(ty: &Arc<RecordType>, fields: Vec<Value>) -> Self {
        Self::Record(RecordValue::new(Arc::clone(ty), fields))
    }

    /// A non-nil pointer to `value`. A pointer to an invalid value is invalid.
    pub fn pointer_to(value: Value) -> Self {
        match value.ty() {
            Some(elem) => Self::Pointer {
                elem,
                target: Some(Box::new(value)),
            },
            None => Self::Invalid,
        }
    }

    /// A nil pointer to `elem`.
    pub fn nil_pointer(elem: Type) -> Self {
        Self::Pointer { elem, target: None }
    }

    /// A non-nil sequence.
    pub fn sequence(elem: Type, items: Vec<Value>) -> Self {
        Self::Sequence {
            elem,
            items: Some(items),
        }
    }

    /// A non-nil map.
    pub fn map(key: Type, value: Type, entries: Vec<(Value, Value)>) -> Self {
        Self::Map {
            key,
            value,
            entries: Some(entries),
        }
    }

    /// A non-nil channel.
    pub fn channel(elem: Type, handle: Handle) -> Self {
        Self::Channel {
            elem,
            handle: Some(handle),
        }
    }

    /// A non-nil function.
    pub fn function(signature: impl Into<String>, handle: Handle) -> Self {
        Self::Function {
            signature: signature.into(),
            handle: Some(handle),
        }
    }

    /// An interface value wrapping `inner`.
    pub fn interface(name: impl Into<String>, inner: Value) -> Self {
        Self::Interface {
            name: name.into(),
            inner: Some(Box::new(inner)),
        }
    }

    /// The value's runtime type, or `None` for [`Value::Invalid`].
    pub fn ty(&self) -> Option<Type> {
        let ty = match self {
            Self::Invalid => return None,
            Self::Bool(_) => Type::Bool,
            Self::Int(_) => Type::Int,
            Self::Uint(_) => Type::Uint,
            Self::Float(_) => Type::Float,
            Self::Str(_) => Type::Str,
            Self::Record(record) => Type::Record(Arc::clone(&record.ty)),
            Self::Pointer { elem, .. } => Type::Pointer(Box::new(elem.clone())),
            Self::Sequence { elem, .. } => Type::Sequence(Box::new(elem.clone())),
            Self::Array { elem, items } => Type::Array {
                elem: Box::new(elem.clone()),
                len: items.len(),
            },
            Self::Map { key, value, .. } => Type::Map {
                key: Box::new(key.clone()),
                value: Box::new(value.clone()),
            },
            Self::Channel { elem, .. } => Type::Channel(Box::new(elem.clone())),
            Self::Function { signature, .. } => Type::Function(signature.clone()),
            Self::Interface { name, .. } => Type::Interface(name.clone()),
        };
        Some(ty)
    }

    /// Whether the value has type `ty`, checked without allocating.
    pub fn conforms_to(&self, ty: &Type) -> bool {
        match (self, ty) {
            (Self::Bool(_), Type::Bool)
            | (Self::Int(_), Type::Int)
            | (Self::Uint(_), Type::Uint)
            | (Self::Float(_), Type::Float)
            | (Self::Str(_), Type::Str) => true,
            (Self::Record(record), Type::Record(want)) => {
                Arc::ptr_eq(&record.ty, want) || record.ty == *want
            }
            (Self::Pointer { elem, .. }, Type::Pointer(want))
            | (Self::Sequence { elem, .. }, Type::Sequence(want))
            | (Self::Channel { elem, .. }, Type::Channel(want)) => elem == &**want,
            (Self::Array { elem, items }, Type::Array { elem: want, len }) => {
                items.len() == *len && elem == &**want
            }
            (
                Self::Map { key, value, .. },
                Type::Map {
                    key: want_key,
                    value: want_value,
                },
            ) => key == &**want_key && value == &**want_value,
            (Self::Function { signature, .. }, Type::Function(want)) => signature == want,
            (Self::Interface { name, .. }, Type::Interface(want)) => name == want,
            _ => false,
        }
    }

    /// Whether the value equals its type's zero value, compared structurally.
    ///
    /// [`Value::Invalid`] counts as zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Invalid => true,
            Self::Bool(b) => !b,
            Self::Int(i) => *i == 0,
            Self::Uint(u) => *u == 0,
            Self::Float(x) => *x == 0.0,
            Self::Str(s) => s.is_empty(),
            Self::Record(record) => record.is_zero(),
            Self::Array { items, .. } => items.iter().all(Value::is_zero),
            Self::Pointer { .. }
            | Self::Sequence { .. }
            | Self::Map { .. }
            | Self::Channel { .. }
            | Self::Function { .. }
            | Self::Interface { .. } => !self.is_present(),
        }
    }

    /// Whether a reference-like value is non-nil. Always `true` for values
    /// that are not references.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Pointer { target, .. } => target.is_some(),
            Self::Sequence { items, .. } => items.is_some(),
            Self::Map { entries, .. } => entries.is_some(),
            Self::Channel { handle, .. } | Self::Function { handle, .. } => handle.is_some(),
            Self::Interface { inner, .. } => inner.is_some(),
            Self::Invalid => false,
            _ => true,
        }
    }

    /// Items of a non-nil sequence.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence {
                items: Some(items), ..
            } => Some(items),
            _ => None,
        }
    }

    /// The record inside a record value.
    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Self::Uint(u)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<RecordValue> for Value {
    fn from(record: RecordValue) -> Self {
        Self::Record(record)
    }
}
