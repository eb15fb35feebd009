//! Runtime type descriptions.
//!
//! A [`Type`] is what a reflective value carries so that two operands can be
//! compared for type identity and a fresh zero value can be allocated.
//! Record types are shared behind an `Arc` and compared structurally, name
//! included.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use structmerge_types::{FieldDescriptor, FieldKind, ShapeDescriptor, Visibility};

use crate::value::{RecordValue, Value};

// ---------------------------------------------------------------------------
// Type
// ---------------------------------------------------------------------------

/// A runtime type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    Bool,
    Int,
    Uint,
    Float,
    Str,
    Record(Arc<RecordType>),
    Pointer(Box<Type>),
    Sequence(Box<Type>),
    Array { elem: Box<Type>, len: usize },
    Map { key: Box<Type>, value: Box<Type> },
    Channel(Box<Type>),
    /// A callable, identified by its signature text.
    Function(String),
    /// A polymorphic container, identified by its interface name.
    Interface(String),
}

impl Type {
    /// A pointer to this type.
    pub fn pointer_to(self) -> Self {
        Self::Pointer(Box::new(self))
    }

    /// A sequence of this type.
    pub fn sequence_of(self) -> Self {
        Self::Sequence(Box::new(self))
    }

    /// A map from `key` to `value`.
    pub fn map_of(key: Type, value: Type) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Structural category used to pick a merge rule.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Bool | Self::Int | Self::Uint | Self::Float | Self::Str => FieldKind::Primitive,
            Self::Record(_) => FieldKind::Record,
            Self::Pointer(_) => FieldKind::Pointer,
            Self::Sequence(_) => FieldKind::Sequence,
            Self::Array { .. } => FieldKind::Array,
            Self::Map { .. } => FieldKind::Map,
            Self::Channel(_) => FieldKind::Channel,
            Self::Function(_) => FieldKind::Function,
            Self::Interface(_) => FieldKind::Interface,
        }
    }

    /// Short kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Str => "string",
            Self::Record(_) => "record",
            Self::Pointer(_) => "pointer",
            Self::Sequence(_) => "sequence",
            Self::Array { .. } => "array",
            Self::Map { .. } => "map",
            Self::Channel(_) => "channel",
            Self::Function(_) => "function",
            Self::Interface(_) => "interface",
        }
    }

    /// The zero value of this type.
    pub fn zero(&self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::Uint => Value::Uint(0),
            Self::Float => Value::Float(0.0),
            Self::Str => Value::Str(String::new()),
            Self::Record(record) => Value::Record(RecordType::zero_value(record)),
            Self::Pointer(elem) => Value::Pointer {
                elem: (**elem).clone(),
                target: None,
            },
            Self::Sequence(elem) => Value::Sequence {
                elem: (**elem).clone(),
                items: None,
            },
            Self::Array { elem, len } => Value::Array {
                elem: (**elem).clone(),
                items: (0..*len).map(|_| elem.zero()).collect(),
            },
            Self::Map { key, value } => Value::Map {
                key: (**key).clone(),
                value: (**value).clone(),
                entries: None,
            },
            Self::Channel(elem) => Value::Channel {
                elem: (**elem).clone(),
                handle: None,
            },
            Self::Function(signature) => Value::Function {
                signature: signature.clone(),
                handle: None,
            },
            Self::Interface(name) => Value::Interface {
                name: name.clone(),
                inner: None,
            },
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Uint => write!(f, "uint"),
            Self::Float => write!(f, "float"),
            Self::Str => write!(f, "string"),
            Self::Record(record) => write!(f, "{}", record.name),
            Self::Pointer(elem) => write!(f, "*{elem}"),
            Self::Sequence(elem) => write!(f, "[]{elem}"),
            Self::Array { elem, len } => write!(f, "[{len}]{elem}"),
            Self::Map { key, value } => write!(f, "map[{key}]{value}"),
            Self::Channel(elem) => write!(f, "chan {elem}"),
            Self::Function(signature) => write!(f, "func{signature}"),
            Self::Interface(name) => write!(f, "{name}"),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordType
// ---------------------------------------------------------------------------

/// One declared field of a record type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldType {
    pub name: String,
    pub visibility: Visibility,
    pub ty: Type,
}

/// A named record type with ordered fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordType {
    pub name: String,
    pub fields: Vec<FieldType>,
}

impl RecordType {
    /// Start declaring a record type.
    pub fn builder(name: impl Into<String>) -> RecordTypeBuilder {
        RecordTypeBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// A record value of this type with every field at its zero value.
    pub fn zero_value(this: &Arc<Self>) -> RecordValue {
        let fields = this.fields.iter().map(|f| f.ty.zero()).collect();
        RecordValue::new(Arc::clone(this), fields)
    }

    /// Describe the record's layout.
    pub fn shape(&self) -> ShapeDescriptor {
        ShapeDescriptor::new(
            self.name.clone(),
            self.fields
                .iter()
                .map(|f| {
                    FieldDescriptor::new(f.name.clone(), f.ty.kind(), f.visibility, f.ty.to_string())
                })
                .collect(),
        )
    }
}

/// Builder for [`RecordType`].
#[derive(Debug)]
pub struct RecordTypeBuilder {
    name: String,
    fields: Vec<FieldType>,
}

impl RecordTypeBuilder {
    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, visibility: Visibility, ty: Type) -> Self {
        self.fields.push(FieldType {
            name: name.into(),
            visibility,
            ty,
        });
        self
    }

    /// Append a public field.
    pub fn public(self, name: impl Into<String>, ty: Type) -> Self {
        self.field(name, Visibility::Public, ty)
    }

    /// Append a private field.
    pub fn private(self, name: impl Into<String>, ty: Type) -> Self {
        self.field(name, Visibility::Private, ty)
    }

    /// Finish the declaration.
    pub fn build(self) -> Arc<RecordType> {
        Arc::new(RecordType {
            name: self.name,
            fields: self.fields,
        })
    }
}
