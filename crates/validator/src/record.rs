//! Records: structs whose fields carry validation annotations
//!
//! A record describes its declared fields statically ([`Record::fields`]) and
//! exposes read access to them by name ([`Record::field`]). The derive macro
//! generates both from the struct definition:
//!
//! ```rust,ignore
//! use fieldcheck_validator::Record;
//!
//! #[derive(Record)]
//! struct Listener {
//!     #[tag(validate = "required")]
//!     host: String,
//!     #[tag(validate = "gte=1,lte=65535")]
//!     port: u32,
//! }
//! ```

use std::any::TypeId;
use std::fmt;

use crate::value::Value;

/// Static description of one declared field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Exposed field name.
    pub name: &'static str,
    /// Declared type, as reported by `std::any::type_name`.
    pub type_name: &'static str,
    /// Annotation key/value pairs, e.g. `("validate", "required")`.
    pub tags: &'static [(&'static str, &'static str)],
    /// Set when the field is an embedded record whose fields are promoted.
    pub embedded: Option<RecordType>,
}

impl FieldDescriptor {
    /// Describes a plain field.
    pub const fn new(
        name: &'static str,
        type_name: &'static str,
        tags: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            name,
            type_name,
            tags,
            embedded: None,
        }
    }

    /// Marks the field as an embedded record of type `ty`.
    #[must_use = "builder methods must be chained or built"]
    pub const fn embedding(mut self, ty: RecordType) -> Self {
        self.embedded = Some(ty);
        self
    }

    /// Looks up an annotation by key.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

/// Object-safe handle to a record type: identity, name and field descriptors.
#[derive(Clone, Copy)]
pub struct RecordType {
    id: fn() -> TypeId,
    name: fn() -> &'static str,
    fields: fn() -> Vec<FieldDescriptor>,
}

impl RecordType {
    /// Returns the handle for `T`.
    pub fn of<T: Record>() -> Self {
        Self {
            id: TypeId::of::<T>,
            name: std::any::type_name::<T>,
            fields: T::fields,
        }
    }

    /// Type identity, used as the metadata cache key.
    pub fn type_id(&self) -> TypeId {
        (self.id)()
    }

    /// Fully qualified type name.
    pub fn name(&self) -> &'static str {
        (self.name)()
    }

    /// Declared fields, in declaration order.
    pub fn descriptors(&self) -> Vec<FieldDescriptor> {
        (self.fields)()
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordType").field(&self.name()).finish()
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for RecordType {}

/// A struct with declared, annotated fields.
///
/// Usually implemented with `#[derive(Record)]`; hand-written impls must keep
/// [`fields`](Record::fields) and [`field`](Record::field) consistent: every
/// described name must be readable, embedded fields as [`Value::Record`].
pub trait Record: 'static {
    /// Static description of the declared fields.
    fn fields() -> Vec<FieldDescriptor>
    where
        Self: Sized;

    /// Type handle of the concrete record behind `self`.
    fn record_type(&self) -> RecordType;

    /// Reads a declared field by exposed name.
    fn field(&self, name: &str) -> Option<Value<'_>>;
}

impl<T: Record> Record for Box<T> {
    fn fields() -> Vec<FieldDescriptor> {
        T::fields()
    }

    fn record_type(&self) -> RecordType {
        (**self).record_type()
    }

    fn field(&self, name: &str) -> Option<Value<'_>> {
        (**self).field(name)
    }
}

/// Types usable as `#[record(embed)]` fields: records themselves and
/// pointer-like or optional wrappers around them.
///
/// `#[derive(Record)]` implements it for the deriving type.
pub trait Embed {
    /// Type handle of the embedded record.
    fn embedded_type() -> RecordType;
}

impl<T: Embed> Embed for Box<T> {
    fn embedded_type() -> RecordType {
        T::embedded_type()
    }
}

impl<T: Embed> Embed for std::sync::Arc<T> {
    fn embedded_type() -> RecordType {
        T::embedded_type()
    }
}

impl<T: Embed> Embed for Option<T> {
    fn embedded_type() -> RecordType {
        T::embedded_type()
    }
}

/// Reads a possibly promoted field: follows `chain` through embedded records,
/// then reads `name` on the innermost one.
///
/// Returns `None` when a link of the chain is missing or not a record.
pub fn resolve<'a>(record: &'a dyn Record, chain: &[&str], name: &str) -> Option<Value<'a>> {
    let mut current = record;
    for link in chain {
        current = current.field(link)?.as_record()?;
    }
    current.field(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Reflect;

    struct Inner {
        depth: u32,
    }

    impl Record for Inner {
        fn fields() -> Vec<FieldDescriptor> {
            vec![FieldDescriptor::new("depth", "u32", &[("validate", "gt=0")])]
        }

        fn record_type(&self) -> RecordType {
            RecordType::of::<Self>()
        }

        fn field(&self, name: &str) -> Option<Value<'_>> {
            match name {
                "depth" => Some(self.depth.reflect()),
                _ => None,
            }
        }
    }

    struct Outer {
        inner: Inner,
        label: String,
    }

    impl Record for Outer {
        fn fields() -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor::new("inner", "Inner", &[]).embedding(RecordType::of::<Inner>()),
                FieldDescriptor::new("label", "String", &[("validate", "required")]),
            ]
        }

        fn record_type(&self) -> RecordType {
            RecordType::of::<Self>()
        }

        fn field(&self, name: &str) -> Option<Value<'_>> {
            match name {
                "inner" => Some(Value::Record(&self.inner)),
                "label" => Some(self.label.reflect()),
                _ => None,
            }
        }
    }

    #[test]
    fn descriptor_tags() {
        let desc = FieldDescriptor::new("port", "u16", &[("validate", "gte=1"), ("env", "PORT")]);
        assert_eq!(desc.tag("env"), Some("PORT"));
        assert_eq!(desc.tag("default"), None);
    }

    #[test]
    fn record_type_identity() {
        assert_eq!(RecordType::of::<Inner>(), RecordType::of::<Inner>());
        assert_ne!(RecordType::of::<Inner>(), RecordType::of::<Outer>());
        assert!(RecordType::of::<Outer>().name().ends_with("Outer"));
    }

    #[test]
    fn resolve_follows_embedding_chain() {
        let outer = Outer {
            inner: Inner { depth: 4 },
            label: "x".into(),
        };

        let depth = resolve(&outer, &["inner"], "depth").unwrap();
        assert_eq!(depth.as_f64(), Some(4.0));
        assert!(resolve(&outer, &["label"], "depth").is_none());
        assert!(resolve(&outer, &[], "missing").is_none());
    }

    #[test]
    fn boxed_record_forwards() {
        let boxed = Box::new(Inner { depth: 0 });
        assert_eq!(boxed.record_type(), RecordType::of::<Inner>());
        assert!(Value::Record(&boxed).is_zero());
    }
}
