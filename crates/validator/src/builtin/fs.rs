//! Filesystem validators: `accessible`, `abspath`
//!
//! Both only read path metadata; nothing is opened or read.

use std::path::Path;

use crate::callback::{CallbackParameters, CallbackResult};
use crate::error::CallbackError;

fn path_of<'p>(p: &'p CallbackParameters<'_>) -> Result<&'p str, CallbackError> {
    p.value().as_str().ok_or_else(|| {
        CallbackError::new(format!(
            "`{}` expects a string path, got a {} value",
            p.validator(),
            p.value().kind()
        ))
    })
}

fn stat_path<'a>(p: &CallbackParameters<'a>, path: &str) -> CallbackResult<'a> {
    match std::fs::metadata(path) {
        Ok(_) => CallbackResult::Pass,
        Err(err) => p.fail(format!("path `{path}` is not accessible: {err}")),
    }
}

/// The path must exist and be statable.
pub fn accessible<'a>(p: &CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError> {
    let path = path_of(p)?;
    Ok(stat_path(p, path))
}

/// The path must be absolute, exist and be statable.
pub fn abspath<'a>(p: &CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError> {
    let path = path_of(p)?;
    if path.is_empty() || !Path::new(path).is_absolute() {
        return Ok(p.fail(format!("path `{path}` is not absolute")));
    }
    Ok(stat_path(p, path))
}
