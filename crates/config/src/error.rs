//! Error types for the configuration binder

use std::borrow::Cow;

/// A raw string could not be converted into the field's type, or named no
/// bindable field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CoerceError {
    message: Cow<'static, str>,
}

impl CoerceError {
    /// Creates a coercion error with a custom message.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// `raw` is not a valid `expected`.
    pub fn invalid(raw: &str, expected: &str) -> Self {
        Self::new(format!("cannot parse `{raw}` as {expected}"))
    }

    /// The record has no bindable field called `name`.
    pub fn unknown_field(name: &str) -> Self {
        Self::new(format!("no bindable field `{name}`"))
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A source failed to produce a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SourceError {
    message: String,
}

impl SourceError {
    /// Creates a source error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Binding a record failed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A value could not be assigned to a field.
    #[error("field `{field}`: {source}")]
    Coerce {
        /// Exposed field name.
        field: String,
        /// The coercion failure.
        source: CoerceError,
    },

    /// A source failed while looking up a field.
    #[error("source `{source_name}` failed for field `{field}`: {source}")]
    Source {
        /// Name of the failing source.
        source_name: String,
        /// Exposed field name.
        field: String,
        /// The source failure.
        source: SourceError,
    },

    /// The populated record did not pass validation.
    #[error("invalid `{record}` configuration: {source}")]
    Validation {
        /// Record type name.
        record: &'static str,
        /// The validation failure.
        source: fieldcheck_validator::Error,
    },
}

impl ConfigError {
    /// The validation error, when the record was populated but invalid or
    /// its annotations are misconfigured.
    pub fn validation(&self) -> Option<&fieldcheck_validator::Error> {
        match self {
            Self::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for binder operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
