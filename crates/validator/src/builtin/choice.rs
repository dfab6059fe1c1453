//! `oneof`: the string form of the value must equal one of the
//! space-separated options.

use crate::callback::{CallbackParameters, CallbackResult};
use crate::error::CallbackError;

/// Value must render as one of the space-separated parameters.
pub fn oneof<'a>(p: &CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError> {
    let options: Vec<&str> = p.params().split_whitespace().collect();
    if options.is_empty() {
        return Err(CallbackError::new("`oneof` expects at least one option"));
    }

    let actual = p.value().to_string();
    if options.iter().any(|option| *option == actual) {
        Ok(CallbackResult::Pass)
    } else {
        Ok(p.fail(format!(
            "value `{actual}` must be one of [{}]",
            options.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use crate::executor::Executor;
    use crate::registry::Registry;

    #[test]
    fn matches_string_form() {
        let reg = Registry::with_builtins();
        let exec = Executor::new(&reg);
        assert!(exec.validate_value("debug", "oneof=debug info warn").is_ok());
        assert!(exec.validate_value(&3u8, "oneof=1 2 3").is_ok());
        assert!(exec.validate_value("trace", "oneof=debug info").is_err());
    }

    #[test]
    fn no_options_is_configuration_error() {
        let reg = Registry::with_builtins();
        let err = Executor::new(&reg).validate_value("x", "oneof").unwrap_err();
        assert!(!err.is_violation());
    }
}
