//! Per-type field metadata
//!
//! [`metadata`] flattens a record type into a map of exposed field name →
//! [`FieldMetadata`], descending depth-first into embedded records and
//! promoting their fields. The result is built once per type and cached for
//! the lifetime of the process.
//!
//! Two fields that resolve to the same exposed name, at any depth, make the
//! record ambiguous. That is a defect in the type definition, so construction
//! panics instead of silently shadowing one of them.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use indexmap::IndexMap;

use crate::instruction::Instructions;
use crate::record::{Record, RecordType};

/// Annotation key holding the validation instructions of a field.
pub const VALIDATE_TAG: &str = "validate";

static CACHE: LazyLock<DashMap<TypeId, Arc<RecordMetadata>>> = LazyLock::new(DashMap::new);

/// Metadata of one (possibly promoted) field.
#[derive(Debug, Clone)]
pub struct FieldMetadata {
    type_name: &'static str,
    tags: HashMap<&'static str, &'static str>,
    embedded_path: Vec<&'static str>,
    instructions: Instructions,
}

impl FieldMetadata {
    /// Declared type of the field.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Looks up an annotation by key.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags.get(key).copied()
    }

    /// All annotations of the field.
    pub fn tags(&self) -> &HashMap<&'static str, &'static str> {
        &self.tags
    }

    /// Names of the embedded fields traversed to reach this field, outermost
    /// first. Empty for fields declared directly on the record.
    pub fn embedded_path(&self) -> &[&'static str] {
        &self.embedded_path
    }

    /// Whether the field was promoted from an embedded record.
    pub fn is_promoted(&self) -> bool {
        !self.embedded_path.is_empty()
    }

    /// Parsed instructions of the `validate` annotation.
    pub fn instructions(&self) -> &Instructions {
        &self.instructions
    }
}

/// Flattened metadata of a record type.
#[derive(Debug)]
pub struct RecordMetadata {
    name: &'static str,
    fields: IndexMap<&'static str, FieldMetadata>,
}

impl RecordMetadata {
    /// Fully qualified name of the record type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up a field by exposed name.
    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.get(name)
    }

    /// Iterates fields in declaration order, embedded fields depth-first.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldMetadata)> {
        self.fields.iter().map(|(name, meta)| (*name, meta))
    }

    /// Number of fields, promoted ones included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Returns the cached metadata of `T`, building it on first use.
pub fn metadata<T: Record>() -> Arc<RecordMetadata> {
    metadata_for(RecordType::of::<T>())
}

/// Returns the cached metadata of the record type behind `ty`.
///
/// Concurrent first calls for the same type may each build the metadata, but
/// only the first published value is ever returned.
pub fn metadata_for(ty: RecordType) -> Arc<RecordMetadata> {
    let id = ty.type_id();
    if let Some(cached) = CACHE.get(&id) {
        return Arc::clone(cached.value());
    }

    let built = Arc::new(build(ty));
    let published = CACHE.entry(id).or_insert(built);
    Arc::clone(published.value())
}

fn build(ty: RecordType) -> RecordMetadata {
    let mut fields = IndexMap::new();
    let mut path = Vec::new();
    let mut visiting = vec![ty.type_id()];
    collect(ty, ty, &mut path, &mut visiting, &mut fields);

    tracing::debug!(record = ty.name(), fields = fields.len(), "built record metadata");

    RecordMetadata {
        name: ty.name(),
        fields,
    }
}

fn collect(
    root: RecordType,
    ty: RecordType,
    path: &mut Vec<&'static str>,
    visiting: &mut Vec<TypeId>,
    out: &mut IndexMap<&'static str, FieldMetadata>,
) {
    for desc in ty.descriptors() {
        if let Some(inner) = desc.embedded {
            assert!(
                desc.tags.is_empty(),
                "embedded field `{}` in `{}` carries annotations",
                desc.name,
                root.name()
            );
            assert!(
                !visiting.contains(&inner.type_id()),
                "record `{}` embeds `{}` recursively",
                root.name(),
                inner.name()
            );
            path.push(desc.name);
            visiting.push(inner.type_id());
            collect(root, inner, path, visiting, out);
            visiting.pop();
            path.pop();
            continue;
        }

        assert!(
            !out.contains_key(desc.name),
            "field `{}` is ambiguous in `{}`",
            desc.name,
            root.name()
        );

        let mut tags = HashMap::with_capacity(desc.tags.len());
        for (key, value) in desc.tags {
            tags.entry(*key).or_insert(*value);
        }
        let instructions = tags
            .get(VALIDATE_TAG)
            .map(|annotation| Instructions::parse(annotation))
            .unwrap_or_default();

        out.insert(
            desc.name,
            FieldMetadata {
                type_name: desc.type_name,
                tags,
                embedded_path: path.clone(),
                instructions,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldDescriptor;
    use crate::value::Value;

    macro_rules! test_record {
        ($name:ident { $($desc:expr),* $(,)? }) => {
            struct $name;

            impl Record for $name {
                fn fields() -> Vec<FieldDescriptor> {
                    vec![$($desc),*]
                }

                fn record_type(&self) -> RecordType {
                    RecordType::of::<Self>()
                }

                fn field(&self, _name: &str) -> Option<Value<'_>> {
                    None
                }
            }
        };
    }

    test_record!(Base {
        FieldDescriptor::new("id", "u64", &[("validate", "required")]),
        FieldDescriptor::new("tag", "String", &[]),
    });

    test_record!(Middle {
        FieldDescriptor::new("base", "Base", &[]).embedding(RecordType::of::<Base>()),
        FieldDescriptor::new("level", "u8", &[("validate", "lte=3"), ("env", "LEVEL")]),
    });

    test_record!(Top {
        FieldDescriptor::new("name", "String", &[("validate", "required")]),
        FieldDescriptor::new("middle", "Middle", &[]).embedding(RecordType::of::<Middle>()),
    });

    test_record!(Clash {
        FieldDescriptor::new("base", "Base", &[]).embedding(RecordType::of::<Base>()),
        FieldDescriptor::new("id", "u64", &[]),
    });

    test_record!(Looping {
        FieldDescriptor::new("me", "Looping", &[]).embedding(RecordType::of::<Looping>()),
    });

    test_record!(AnnotatedEmbed {
        FieldDescriptor::new("base", "Base", &[("validate", "required")])
            .embedding(RecordType::of::<Base>()),
    });

    test_record!(Empty {});

    #[test]
    fn flattens_embedded_fields_depth_first() {
        let meta = metadata::<Top>();
        let names: Vec<_> = meta.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["name", "id", "tag", "level"]);

        let id = meta.field("id").unwrap();
        assert_eq!(id.embedded_path(), &["middle", "base"]);
        assert!(id.is_promoted());
        assert_eq!(id.type_name(), "u64");
        assert_eq!(id.instructions().len(), 1);

        let level = meta.field("level").unwrap();
        assert_eq!(level.embedded_path(), &["middle"]);
        assert_eq!(level.tag("env"), Some("LEVEL"));

        assert!(!meta.field("name").unwrap().is_promoted());
        assert!(meta.field("tag").unwrap().instructions().is_empty());
    }

    #[test]
    fn metadata_is_cached_per_type() {
        let first = metadata::<Middle>();
        let second = metadata::<Middle>();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn empty_record_has_no_fields() {
        assert!(metadata::<Empty>().is_empty());
    }

    #[test]
    #[should_panic(expected = "field `id` is ambiguous")]
    fn ambiguous_promotion_panics() {
        let _ = metadata::<Clash>();
    }

    #[test]
    #[should_panic(expected = "embedded field `base`")]
    fn annotated_embedding_panics() {
        let _ = metadata::<AnnotatedEmbed>();
    }

    #[test]
    #[should_panic(expected = "embeds")]
    fn recursive_embedding_panics() {
        let _ = metadata::<Looping>();
    }
}
