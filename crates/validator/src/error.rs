//! Error types for validation failures
//!
//! Two very different things can go wrong while validating:
//!
//! - the data is invalid: a validator rejected a value. These are collected
//!   as [`FieldError`]s into [`Violations`] and reported together, after every
//!   field has been checked.
//! - the validation itself is misconfigured: unknown validator names,
//!   malformed annotations, bad parameters. These abort the call immediately
//!   with one of the other [`Error`] variants.

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// FIELD ERROR
// ============================================================================

/// One rejected value.
///
/// `field` is the path of the value inside the record (`port`, `items[1]`,
/// `listener.host`) and is empty when a bare value was validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Path of the rejected value.
    pub field: String,
    /// Name of the validator that rejected it.
    pub validator: String,
    /// Raw parameters the validator was invoked with.
    pub params: String,
    /// Human-readable reason.
    pub cause: Cow<'static, str>,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(
        field: impl Into<String>,
        validator: impl Into<String>,
        params: impl Into<String>,
        cause: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            field: field.into(),
            validator: validator.into(),
            params: params.into(),
            cause: cause.into(),
        }
    }

    /// Prefixes the field path with `parent`, as in `parent.field`.
    #[must_use = "builder methods must be chained or built"]
    pub fn nested_under(mut self, parent: &str) -> Self {
        if parent.is_empty() {
            return self;
        }
        self.field = if self.field.is_empty() {
            parent.to_owned()
        } else {
            format!("{parent}.{}", self.field)
        };
        self
    }

    /// The instruction as written: `name` or `name=params`.
    pub fn instruction(&self) -> Cow<'_, str> {
        if self.params.is_empty() {
            Cow::Borrowed(&self.validator)
        } else {
            Cow::Owned(format!("{}={}", self.validator, self.params))
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "value failed `{}`: {}", self.instruction(), self.cause)
        } else {
            write!(
                f,
                "field `{}` failed `{}`: {}",
                self.field,
                self.instruction(),
                self.cause
            )
        }
    }
}

impl std::error::Error for FieldError {}

// ============================================================================
// VIOLATIONS
// ============================================================================

/// Ordered collection of field errors from one validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    errors: Vec<FieldError>,
}

impl Violations {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error.
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no error was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors, in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Iterates the errors.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    #[must_use = "result must be used"]
    pub fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Extend<FieldError> for Violations {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl FromIterator<FieldError> for Violations {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Violations {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.errors
            .first()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ============================================================================
// CALLBACK ERROR
// ============================================================================

/// A validator could not judge the value: wrong kind, unparsable parameters,
/// unknown sibling field. Aborts the validation call.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CallbackError {
    message: Cow<'static, str>,
    #[source]
    nested: Option<Box<Error>>,
}

impl CallbackError {
    /// Creates a callback error.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            nested: None,
        }
    }

    /// Wraps a configuration error raised while validating a nested record.
    ///
    /// The executor reports it as [`Error::Nested`], keeping `error` intact.
    pub fn nested(error: Error) -> Self {
        Self {
            message: error.to_string().into(),
            nested: Some(Box::new(error)),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped nested-record error, if any.
    pub fn nested_error(&self) -> Option<&Error> {
        self.nested.as_deref()
    }

    pub(crate) fn into_nested(self) -> Result<Box<Error>, Self> {
        match self.nested {
            Some(error) => Ok(error),
            None => Err(self),
        }
    }
}

// ============================================================================
// ERROR
// ============================================================================

/// Outcome of a failed validation call.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The data is invalid.
    #[error(transparent)]
    Violations(#[from] Violations),

    /// An annotation names a validator that was never registered.
    #[error("field `{field}` uses undefined validator `{validator}`")]
    UnknownValidator {
        /// Path of the value being validated.
        field: String,
        /// The unknown name.
        validator: String,
    },

    /// An annotation token could not be parsed.
    #[error("field `{field}` has malformed instruction `{raw}`")]
    MalformedInstruction {
        /// Path of the value being validated.
        field: String,
        /// The token as written.
        raw: String,
    },

    /// A validator asked to recurse into values but no instruction follows it.
    #[error("validator `{validator}` on field `{field}` recursed with no instructions left")]
    EmptyInstructions {
        /// Path of the value being validated.
        field: String,
        /// The recursing validator.
        validator: String,
    },

    /// A validator reported failure without any error.
    #[error("validator `{validator}` on field `{field}` failed without an error")]
    EmptyFailure {
        /// Path of the value being validated.
        field: String,
        /// The failing validator.
        validator: String,
    },

    /// A record reached through a field is misconfigured. `source` carries
    /// the error as the nested record reported it.
    #[error("nested record at field `{field}`: {source}")]
    Nested {
        /// Path of the field holding the nested record.
        field: String,
        /// The nested record's own error.
        #[source]
        source: Box<Error>,
    },

    /// A validator could not evaluate the value.
    #[error("validator `{validator}` on field `{field}`: {source}")]
    Callback {
        /// Path of the value being validated.
        field: String,
        /// The validator that raised the error.
        validator: String,
        /// What went wrong.
        #[source]
        source: CallbackError,
    },
}

impl Error {
    /// Returns true if the data was invalid, as opposed to the validation
    /// being misconfigured.
    pub fn is_violation(&self) -> bool {
        matches!(self, Self::Violations(_))
    }

    /// Returns the collected field errors, if any.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Violations(v) => Some(v),
            _ => None,
        }
    }

    /// Consumes the error, returning the collected field errors, if any.
    pub fn into_violations(self) -> Option<Violations> {
        match self {
            Self::Violations(v) => Some(v),
            _ => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::error::Error as _;

    #[test]
    fn field_error_display_names_field_and_validator() {
        let error = FieldError::new("port", "gte", "1", "value must be >= 1");
        assert_eq!(error.to_string(), "field `port` failed `gte=1`: value must be >= 1");

        let bare = FieldError::new("", "required", "", "value is zero");
        assert_eq!(bare.to_string(), "value failed `required`: value is zero");
    }

    #[test]
    fn nested_under_prefixes_path() {
        let error = FieldError::new("host", "required", "", "zero").nested_under("listener");
        assert_eq!(error.field, "listener.host");

        let bare = FieldError::new("", "required", "", "zero").nested_under("items[0]");
        assert_eq!(bare.field, "items[0]");
    }

    #[test]
    fn violations_join_messages() {
        let violations: Violations = [
            FieldError::new("a", "required", "", "zero"),
            FieldError::new("b", "lt", "3", "too big"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            violations.to_string(),
            "field `a` failed `required`: zero; field `b` failed `lt=3`: too big"
        );
        assert_eq!(violations.len(), 2);
        assert_eq!(violations.source().unwrap().to_string(), violations.errors()[0].to_string());
    }

    #[test]
    fn empty_violations_collapse_to_ok() {
        assert!(Violations::new().into_result().is_ok());

        let mut one = Violations::new();
        one.push(FieldError::new("a", "required", "", "zero"));
        assert!(one.into_result().is_err());
    }

    #[test]
    fn error_classification() {
        let data = Error::from(Violations::from_iter([FieldError::new("a", "required", "", "zero")]));
        assert!(data.is_violation());
        assert_eq!(data.violations().map(Violations::len), Some(1));

        let config = Error::UnknownValidator {
            field: "a".into(),
            validator: "nope".into(),
        };
        assert!(!config.is_violation());
        assert!(config.into_violations().is_none());
    }

    #[test]
    fn callback_error_is_source() {
        let error = Error::Callback {
            field: "port".into(),
            validator: "gte".into(),
            source: CallbackError::new("bad parameter `x`"),
        };
        assert_eq!(error.to_string(), "validator `gte` on field `port`: bad parameter `x`");
        assert_eq!(error.source().unwrap().to_string(), "bad parameter `x`");
    }
}
