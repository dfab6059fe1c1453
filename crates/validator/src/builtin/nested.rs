//! `nested`: validates a record-valued field with its own annotations.

use crate::callback::{CallbackParameters, CallbackResult};
use crate::error::{CallbackError, Error};
use crate::executor::Executor;
use crate::value::Value;

/// Runs the executor on the record behind the value and reports its field
/// errors under `field.child`. Nil stops.
///
/// Configuration errors inside the nested record abort the outer call and
/// surface as [`Error::Nested`] with the inner error as its source.
pub fn nested<'a>(p: &CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError> {
    let record = match p.value() {
        Value::Nil => return Ok(CallbackResult::Stop),
        Value::Record(record) => *record,
        other => {
            return Err(CallbackError::new(format!(
                "`nested` expects a record, got a {} value",
                other.kind()
            )));
        }
    };

    match Executor::new(p.registry()).validate_record(record) {
        Ok(()) => Ok(CallbackResult::Pass),
        Err(Error::Violations(violations)) => Ok(CallbackResult::Fail(
            violations
                .into_iter()
                .map(|e| e.nested_under(p.path()))
                .collect(),
        )),
        Err(other) => Err(CallbackError::nested(other)),
    }
}
