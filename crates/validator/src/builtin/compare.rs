//! Numeric comparison validators: `gt`, `gte`, `lt`, `lte`
//!
//! Parameters are parsed as `f64` and every numeric kind is normalized to
//! `f64` before comparing. Nil fails as data; any other non-numeric kind is a
//! configuration error.

use crate::callback::{CallbackParameters, CallbackResult};
use crate::error::CallbackError;

#[derive(Clone, Copy)]
enum Bound {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Bound {
    fn holds(self, value: f64, limit: f64) -> bool {
        match self {
            Self::Gt => value > limit,
            Self::Gte => value >= limit,
            Self::Lt => value < limit,
            Self::Lte => value <= limit,
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Self::Gt => "greater than",
            Self::Gte => "greater than or equal to",
            Self::Lt => "less than",
            Self::Lte => "less than or equal to",
        }
    }
}

fn compare<'a>(
    p: &CallbackParameters<'a>,
    bound: Bound,
) -> Result<CallbackResult<'a>, CallbackError> {
    let limit: f64 = p.params().trim().parse().map_err(|_| {
        CallbackError::new(format!(
            "`{}` expects a numeric parameter, got `{}`",
            p.validator(),
            p.params()
        ))
    })?;

    let value = p.value();
    if value.is_nil() {
        return Ok(p.fail(format!("value must be {} {limit} but is nil", bound.phrase())));
    }
    let Some(number) = value.as_f64() else {
        return Err(CallbackError::new(format!(
            "`{}` cannot compare a {} value",
            p.validator(),
            value.kind()
        )));
    };

    if bound.holds(number, limit) {
        Ok(CallbackResult::Pass)
    } else {
        Ok(p.fail(format!(
            "value must be {} {limit} but is {value}",
            bound.phrase()
        )))
    }
}

/// Value must be strictly greater than the parameter.
pub fn gt<'a>(p: &CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError> {
    compare(p, Bound::Gt)
}

/// Value must be greater than or equal to the parameter.
pub fn gte<'a>(p: &CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError> {
    compare(p, Bound::Gte)
}

/// Value must be strictly less than the parameter.
pub fn lt<'a>(p: &CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError> {
    compare(p, Bound::Lt)
}

/// Value must be less than or equal to the parameter.
pub fn lte<'a>(p: &CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError> {
    compare(p, Bound::Lte)
}
