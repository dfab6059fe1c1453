//! `dive`: applies the remaining instructions to every element of a sequence.
//!
//! ```rust,ignore
//! #[tag(validate = "dive,required")]   // every element must be non-zero
//! ports: Vec<u16>,
//! ```

use crate::callback::{CallbackParameters, CallbackResult};
use crate::error::CallbackError;
use crate::value::Value;

/// Recurses into the elements of a sequence. Nil and empty sequences stop.
pub fn dive<'a>(p: &CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError> {
    match p.value() {
        Value::Nil => Ok(CallbackResult::Stop),
        Value::Seq(items) if items.is_empty() => Ok(CallbackResult::Stop),
        Value::Seq(items) => Ok(CallbackResult::Recurse(items.clone())),
        other => Err(CallbackError::new(format!(
            "`dive` expects a sequence, got a {} value",
            other.kind()
        ))),
    }
}
