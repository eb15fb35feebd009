//! Shape descriptors: the ordered field layout of a record type.
//!
//! A [`ShapeDescriptor`] is what the validator hands to the field merger. It
//! lists the record's fields in declaration order together with each field's
//! [`FieldKind`] and [`Visibility`]; the kind selects one [`FieldRule`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::options::Writability;

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// Structural category of a field's type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Scalars and strings.
    Primitive,
    /// A nested record, replaced atomically.
    Record,
    /// A nullable reference to another value.
    Pointer,
    /// A growable sequence.
    Sequence,
    /// A fixed-size array.
    Array,
    /// An associative container.
    Map,
    /// A channel endpoint.
    Channel,
    /// A callable.
    Function,
    /// A polymorphic container.
    Interface,
}

impl FieldKind {
    /// The merge rule this kind selects.
    pub fn rule(self) -> FieldRule {
        match self {
            Self::Channel | Self::Function | Self::Map => FieldRule::SwapIfPresent,
            Self::Pointer => FieldRule::PointerFallback,
            Self::Sequence => FieldRule::Concatenate,
            Self::Primitive | Self::Record | Self::Array | Self::Interface => {
                FieldRule::ZeroFallback
            }
        }
    }

    /// Returns `true` for kinds whose values are references to shared data.
    pub fn is_reference(self) -> bool {
        !matches!(self.rule(), FieldRule::ZeroFallback)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Primitive => "primitive",
            Self::Record => "record",
            Self::Pointer => "pointer",
            Self::Sequence => "sequence",
            Self::Array => "array",
            Self::Map => "map",
            Self::Channel => "channel",
            Self::Function => "function",
            Self::Interface => "interface",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// FieldRule
// ---------------------------------------------------------------------------

/// The per-field merge rules. Each [`FieldKind`] maps to exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldRule {
    /// Absent incoming value leaves the zero value; otherwise the incoming
    /// reference is adopted wholesale.
    SwapIfPresent,
    /// Nil incoming pointer keeps the base pointer; otherwise the incoming
    /// pointer wins. The pointee is never merged.
    PointerFallback,
    /// Base elements followed by incoming elements, duplicates retained.
    Concatenate,
    /// Incoming value wins unless it equals the zero value.
    ZeroFallback,
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

/// Declared visibility of a record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// `pub`
    Public,
    /// `pub(crate)`, `pub(super)`, `pub(in path)`
    Restricted,
    /// No visibility modifier.
    Private,
}

impl Visibility {
    /// Classify the source text of a visibility modifier.
    ///
    /// Accepts the output of `stringify!` on a `vis` fragment, which is empty
    /// for private fields.
    pub fn from_tokens(tokens: &str) -> Self {
        let tokens = tokens.trim();
        if tokens.is_empty() {
            Self::Private
        } else if tokens == "pub" {
            Self::Public
        } else if tokens.starts_with("pub") {
            Self::Restricted
        } else {
            Self::Private
        }
    }

    /// Whether a field with this visibility may be written under `writability`.
    pub fn is_writable(self, writability: Writability) -> bool {
        match self {
            Self::Public => true,
            Self::Restricted => writability == Writability::IncludeRestricted,
            Self::Private => false,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Restricted => write!(f, "restricted"),
            Self::Private => write!(f, "private"),
        }
    }
}

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// One declared field of a record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name as declared.
    pub name: String,
    /// Structural category of the field's type.
    pub kind: FieldKind,
    /// Declared visibility.
    pub visibility: Visibility,
    /// Human-readable name of the field's type.
    pub type_name: String,
}

impl FieldDescriptor {
    /// Create a descriptor for one field.
    pub fn new(
        name: impl Into<String>,
        kind: FieldKind,
        visibility: Visibility,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility,
            type_name: type_name.into(),
        }
    }

    /// Whether the merge may write this field under `writability`.
    pub fn is_writable(&self, writability: Writability) -> bool {
        self.visibility.is_writable(writability)
    }
}

/// Ordered field layout of a record type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    /// Record type name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl ShapeDescriptor {
    /// Create a descriptor from a name and an ordered field list.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields the merge may write under `writability`, in declaration order.
    pub fn writable_fields(
        &self,
        writability: Writability,
    ) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.fields
            .iter()
            .filter(move |f| f.is_writable(writability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_select_rules() {
        assert_eq!(FieldKind::Map.rule(), FieldRule::SwapIfPresent);
        assert_eq!(FieldKind::Channel.rule(), FieldRule::SwapIfPresent);
        assert_eq!(FieldKind::Function.rule(), FieldRule::SwapIfPresent);
        assert_eq!(FieldKind::Pointer.rule(), FieldRule::PointerFallback);
        assert_eq!(FieldKind::Sequence.rule(), FieldRule::Concatenate);
        assert_eq!(FieldKind::Record.rule(), FieldRule::ZeroFallback);
        assert_eq!(FieldKind::Array.rule(), FieldRule::ZeroFallback);
        assert!(FieldKind::Pointer.is_reference());
        assert!(!FieldKind::Primitive.is_reference());
    }

    #[test]
    fn visibility_from_stringified_tokens() {
        assert_eq!(Visibility::from_tokens(""), Visibility::Private);
        assert_eq!(Visibility::from_tokens("pub"), Visibility::Public);
        assert_eq!(Visibility::from_tokens("pub(crate)"), Visibility::Restricted);
        assert_eq!(Visibility::from_tokens("pub (super)"), Visibility::Restricted);
        assert_eq!(
            Visibility::from_tokens("pub(in crate::a)"),
            Visibility::Restricted
        );
    }

    #[test]
    fn private_fields_are_never_writable() {
        for w in [Writability::PublicOnly, Writability::IncludeRestricted] {
            assert!(!Visibility::Private.is_writable(w));
            assert!(Visibility::Public.is_writable(w));
        }
        assert!(!Visibility::Restricted.is_writable(Writability::PublicOnly));
        assert!(Visibility::Restricted.is_writable(Writability::IncludeRestricted));
    }

    #[test]
    fn shape_lookup_and_writable_fields() {
        let shape = ShapeDescriptor::new(
            "Foo",
            vec![
                FieldDescriptor::new("hoge", FieldKind::Primitive, Visibility::Public, "String"),
                FieldDescriptor::new("fuga", FieldKind::Primitive, Visibility::Public, "i64"),
                FieldDescriptor::new("piyo", FieldKind::Primitive, Visibility::Private, "char"),
            ],
        );
        assert_eq!(shape.len(), 3);
        assert_eq!(shape.field("fuga").map(|f| f.kind), Some(FieldKind::Primitive));
        assert!(shape.field("missing").is_none());

        let names: Vec<_> = shape
            .writable_fields(Writability::PublicOnly)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["hoge", "fuga"]);
    }

    #[test]
    fn shape_serializes_to_json() {
        let shape = ShapeDescriptor::new(
            "Tagged",
            vec![FieldDescriptor::new(
                "tags",
                FieldKind::Sequence,
                Visibility::Public,
                "Vec<String>",
            )],
        );
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["name"], "Tagged");
        assert_eq!(json["fields"][0]["kind"], "Sequence");

        let back: ShapeDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(back, shape);
    }
}
