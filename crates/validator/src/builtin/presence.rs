//! Presence validators: `required`, `required_if`, `omitempty`, `skip`

use crate::callback::{CallbackParameters, CallbackResult};
use crate::error::CallbackError;

/// Fails when the value is nil or the zero value of its type.
pub fn required<'a>(p: &CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError> {
    if p.value().is_zero() {
        Ok(p.fail("value is required but is zero or nil"))
    } else {
        Ok(CallbackResult::Pass)
    }
}

/// `required_if=Sibling value`: behaves as `required` when the string form of
/// `Sibling` equals `value`. A nil sibling never matches.
pub fn required_if<'a>(p: &CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError> {
    if !p.is_field() {
        return Err(CallbackError::new(
            "`required_if` can only be applied to a record field",
        ));
    }

    let mut tokens = p.params().split_whitespace();
    let (Some(sibling), Some(expected), None) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(CallbackError::new(format!(
            "`required_if` expects `<field> <value>`, got `{}`",
            p.params()
        )));
    };

    let actual = p.sibling(sibling)?;
    if actual.is_nil() || actual.to_string() != expected {
        return Ok(CallbackResult::Pass);
    }
    required(p)
}

/// Stops the chain for zero or nil values, passes otherwise.
pub fn omitempty<'a>(p: &CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError> {
    if p.value().is_zero() {
        Ok(CallbackResult::Stop)
    } else {
        Ok(CallbackResult::Pass)
    }
}

/// Always stops the chain.
pub fn skip<'a>(_: &CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError> {
    Ok(CallbackResult::Stop)
}
