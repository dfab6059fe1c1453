//! The contract between the executor and a validator callback
//!
//! A callback receives [`CallbackParameters`] describing the value under test
//! and answers with exactly one [`CallbackResult`]. Returning `Err` means the
//! callback could not judge the value at all; the executor aborts the whole
//! validation call with it.

use std::borrow::Cow;
use std::sync::Arc;

use crate::error::{CallbackError, FieldError};
use crate::metadata::metadata_for;
use crate::record::{Record, resolve};
use crate::registry::Registry;
use crate::value::Value;

/// A registered validator function.
pub type Callback = Arc<
    dyn for<'a> Fn(&CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError>
        + Send
        + Sync,
>;

/// Control-flow outcome of one validator invocation.
#[derive(Debug)]
pub enum CallbackResult<'a> {
    /// Continue with the next instruction for the same value.
    Pass,
    /// Skip the remaining instructions for this value without failing.
    Stop,
    /// Record the errors and stop checking this value.
    Fail(Vec<FieldError>),
    /// Apply the remaining instructions to each of these values instead.
    Recurse(Vec<Value<'a>>),
}

/// Everything a callback may look at.
pub struct CallbackParameters<'a> {
    pub(crate) value: Value<'a>,
    pub(crate) record: Option<&'a dyn Record>,
    pub(crate) field: &'a str,
    pub(crate) validator: &'a str,
    pub(crate) params: &'a str,
    pub(crate) path: String,
    pub(crate) registry: &'a Registry,
}

impl<'a> CallbackParameters<'a> {
    /// The value under test.
    pub fn value(&self) -> &Value<'a> {
        &self.value
    }

    /// The record owning the field, when a record is being validated.
    pub fn record(&self) -> Option<&'a dyn Record> {
        self.record
    }

    /// Declared name of the field being validated; empty for bare values.
    pub fn field(&self) -> &'a str {
        self.field
    }

    /// Whether the value belongs to a record field rather than being a bare
    /// value passed to `validate_value`.
    pub fn is_field(&self) -> bool {
        self.record.is_some()
    }

    /// Name the validator was invoked under.
    pub fn validator(&self) -> &'a str {
        self.validator
    }

    /// Raw parameter string; empty when none was given.
    pub fn params(&self) -> &'a str {
        self.params
    }

    /// Path of the current value: the field name, with `[i]` suffixes for
    /// each level of recursion into sequence elements.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The registry the executor dispatches through.
    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Reads another field of the owning record, promoted fields included.
    ///
    /// A field that exists but sits behind an absent embedding reads as
    /// [`Value::Nil`]. Bare values and unknown names are configuration errors.
    pub fn sibling(&self, name: &str) -> Result<Value<'a>, CallbackError> {
        let Some(record) = self.record else {
            return Err(CallbackError::new(format!(
                "`{}` needs an owning record to read field `{name}`",
                self.validator
            )));
        };
        let meta = metadata_for(record.record_type());
        let Some(field) = meta.field(name) else {
            return Err(CallbackError::new(format!(
                "record `{}` has no field `{name}`",
                meta.name()
            )));
        };
        Ok(resolve(record, field.embedded_path(), name).unwrap_or(Value::Nil))
    }

    /// Builds a [`FieldError`] for the current value.
    pub fn field_error(&self, cause: impl Into<Cow<'static, str>>) -> FieldError {
        FieldError::new(self.path.clone(), self.validator, self.params, cause)
    }

    /// Fails the current value with a single error.
    pub fn fail(&self, cause: impl Into<Cow<'static, str>>) -> CallbackResult<'a> {
        CallbackResult::Fail(vec![self.field_error(cause)])
    }
}

impl std::fmt::Debug for CallbackParameters<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackParameters")
            .field("value", &self.value)
            .field("field", &self.field)
            .field("validator", &self.validator)
            .field("params", &self.params)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
