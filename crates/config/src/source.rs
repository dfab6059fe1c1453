//! Where raw field values come from
//!
//! A [`Source`] is asked for one field at a time and answers with the raw
//! string to assign, or `None` to let the next source (and finally the
//! field's `default` tag) decide.

use std::collections::HashMap;
use std::env::{self, VarError};

use fieldcheck_validator::FieldMetadata;

use crate::error::SourceError;

/// Annotation naming the environment variable of a field.
pub const ENV_TAG: &str = "env";
/// Annotation naming the [`MapSource`] key of a field.
pub const KEY_TAG: &str = "key";
/// Annotation holding the fallback raw value of a field.
pub const DEFAULT_TAG: &str = "default";
/// Annotation marking a field whose value must never be logged.
pub const SECRET_TAG: &str = "secret";

/// The field a source is asked about.
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<'a> {
    record: &'static str,
    name: &'static str,
    meta: &'a FieldMetadata,
}

impl<'a> FieldRef<'a> {
    pub(crate) fn new(record: &'static str, name: &'static str, meta: &'a FieldMetadata) -> Self {
        Self { record, name, meta }
    }

    /// Type name of the record being bound.
    pub fn record(&self) -> &'static str {
        self.record
    }

    /// Exposed field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up an annotation of the field.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.meta.tag(key)
    }

    /// Full metadata of the field.
    pub fn metadata(&self) -> &'a FieldMetadata {
        self.meta
    }

    /// Whether the value must be redacted in logs: tagged `secret = "true"`,
    /// or named like a credential.
    pub fn is_secret(&self) -> bool {
        if self
            .tag(SECRET_TAG)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
        {
            return true;
        }
        let name = self.name.to_lowercase();
        ["password", "secret", "token", "api_key", "private", "credential"]
            .iter()
            .any(|needle| name.contains(needle))
    }
}

/// A provider of raw field values.
pub trait Source: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Returns the raw value for `field`, if this source has one.
    fn lookup(&self, field: &FieldRef<'_>) -> Result<Option<String>, SourceError>;
}

// ============================================================================
// ENVIRONMENT
// ============================================================================

/// Reads the environment variable named by the field's `env` tag.
///
/// Fields without an `env` tag are never looked up.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    prefix: Option<String>,
}

impl EnvSource {
    /// Reads variables exactly as tagged.
    pub fn new() -> Self {
        Self { prefix: None }
    }

    /// Prepends `prefix` to every tagged variable name (`APP_` + `PORT`).
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn variable(&self, tag: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{tag}"),
            None => tag.to_owned(),
        }
    }
}

impl Source for EnvSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn lookup(&self, field: &FieldRef<'_>) -> Result<Option<String>, SourceError> {
        let Some(tag) = field.tag(ENV_TAG) else {
            return Ok(None);
        };
        let key = self.variable(tag);
        match env::var(&key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(SourceError::new(format!(
                "environment variable `{key}` is not valid unicode"
            ))),
        }
    }
}

// ============================================================================
// MAP
// ============================================================================

/// In-memory values keyed by the field's `key` tag, or its exposed name.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    name: String,
    values: HashMap<String, String>,
}

impl MapSource {
    /// Creates an empty map source.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    /// Adds a value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl Source for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, field: &FieldRef<'_>) -> Result<Option<String>, SourceError> {
        let key = field.tag(KEY_TAG).unwrap_or(field.name());
        Ok(self.values.get(key).cloned())
    }
}

// ============================================================================
// FUNCTION
// ============================================================================

/// Adapts a closure into a [`Source`].
pub struct FnSource<F> {
    name: String,
    lookup: F,
}

impl<F> FnSource<F>
where
    F: Fn(&FieldRef<'_>) -> Result<Option<String>, SourceError> + Send + Sync,
{
    /// Wraps `lookup` under `name`.
    pub fn new(name: impl Into<String>, lookup: F) -> Self {
        Self {
            name: name.into(),
            lookup,
        }
    }
}

impl<F> Source for FnSource<F>
where
    F: Fn(&FieldRef<'_>) -> Result<Option<String>, SourceError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, field: &FieldRef<'_>) -> Result<Option<String>, SourceError> {
        (self.lookup)(field)
    }
}

impl<F> std::fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSource")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
