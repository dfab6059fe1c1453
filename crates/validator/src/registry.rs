//! Registry mapping validator names to callbacks.
//!
//! Names are bound once and never removed. The process-wide registry returned
//! by [`global`] starts out with the built-in validators; modules add their own
//! with [`must_register_validator`], normally during startup.

use std::fmt;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::builtin;
use crate::callback::{Callback, CallbackParameters, CallbackResult};
use crate::error::CallbackError;

/// Misuse of the registration API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The name is already bound.
    #[error("validator `{0}` already registered")]
    AlreadyRegistered(String),
    /// No callback was supplied.
    #[error("validator `{0}` registered with a nil callback")]
    NilCallback(String),
}

/// Thread-safe, append-only registry of validators.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldcheck_validator::{CallbackResult, Registry};
///
/// let registry = Registry::with_builtins();
/// registry.register("even", |p| match p.value().as_f64() {
///     Some(n) if n % 2.0 == 0.0 => Ok(CallbackResult::Pass),
///     _ => Ok(p.fail("must be even")),
/// });
/// ```
pub struct Registry {
    validators: DashMap<String, Callback>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            validators: DashMap::new(),
        }
    }

    /// Creates a registry holding the built-in validators.
    #[must_use]
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        builtin::register_all(&registry);
        registry
    }

    /// Binds `name` to `callback`.
    ///
    /// Fails if the name is taken or the callback is missing; the existing
    /// binding is never replaced.
    pub fn try_register(
        &self,
        name: impl Into<String>,
        callback: Option<Callback>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let Some(callback) = callback else {
            return Err(RegistryError::NilCallback(name));
        };
        match self.validators.entry(name) {
            Entry::Occupied(entry) => Err(RegistryError::AlreadyRegistered(entry.key().clone())),
            Entry::Vacant(entry) => {
                tracing::info!(validator = %entry.key(), "registered validator");
                entry.insert(callback);
                Ok(())
            }
        }
    }

    /// Like [`try_register`](Self::try_register), but panics on misuse.
    pub fn must_register(&self, name: impl Into<String>, callback: Option<Callback>) {
        if let Err(err) = self.try_register(name, callback) {
            panic!("{err}");
        }
    }

    /// Registers a closure under `name`. Panics if the name is taken.
    pub fn register<F>(&self, name: impl Into<String>, callback: F)
    where
        F: for<'a> Fn(&CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError>
            + Send
            + Sync
            + 'static,
    {
        self.must_register(name, Some(Arc::new(callback)));
    }

    /// Looks up a validator by name.
    pub fn lookup(&self, name: &str) -> Option<Callback> {
        self.validators.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Whether `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Number of registered validators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.validators.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("validators", &self.names())
            .finish()
    }
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::with_builtins);

/// The process-wide registry, pre-populated with the built-in validators.
pub fn global() -> &'static Registry {
    &GLOBAL
}

/// Registers a validator on the process-wide registry.
///
/// # Panics
///
/// Panics if `name` is already registered.
pub fn must_register_validator<F>(name: impl Into<String>, callback: F)
where
    F: for<'a> Fn(&CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError>
        + Send
        + Sync
        + 'static,
{
    global().register(name, callback);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pass<'a>(_: &CallbackParameters<'a>) -> Result<CallbackResult<'a>, CallbackError> {
        Ok(CallbackResult::Pass)
    }

    #[test]
    fn register_and_lookup() {
        let reg = Registry::new();
        reg.register("test.pass", pass);

        assert!(reg.contains("test.pass"));
        assert_eq!(reg.len(), 1);
        assert!(reg.lookup("test.pass").is_some());
        assert!(reg.lookup("test.missing").is_none());
    }

    #[test]
    fn duplicate_is_rejected_and_keeps_first() {
        let reg = Registry::new();
        reg.register("dup", pass);

        let err = reg.try_register("dup", Some(Arc::new(pass))).unwrap_err();
        assert_eq!(err, RegistryError::AlreadyRegistered("dup".into()));
        assert_eq!(err.to_string(), "validator `dup` already registered");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn nil_callback_is_rejected() {
        let reg = Registry::new();
        let err = reg.try_register("nothing", None).unwrap_err();
        assert_eq!(err.to_string(), "validator `nothing` registered with a nil callback");
        assert!(reg.is_empty());
    }

    #[test]
    #[should_panic(expected = "validator `twice` already registered")]
    fn must_register_panics_on_duplicate() {
        let reg = Registry::new();
        reg.must_register("twice", Some(Arc::new(pass)));
        reg.must_register("twice", Some(Arc::new(pass)));
    }

    #[test]
    #[should_panic(expected = "registered with a nil callback")]
    fn must_register_panics_on_nil() {
        Registry::new().must_register("nil", None);
    }

    #[test]
    fn builtins_are_present() {
        let reg = Registry::with_builtins();
        for name in [
            "required",
            "required_if",
            "omitempty",
            "skip",
            "gt",
            "gte",
            "lt",
            "lte",
            "oneof",
            "dive",
            "nested",
        ] {
            assert!(reg.contains(name), "missing builtin `{name}`");
        }
        assert!(global().contains("required"));
    }

    #[test]
    fn names_are_sorted() {
        let reg = Registry::new();
        reg.register("c", pass);
        reg.register("a", pass);
        reg.register("b", pass);
        assert_eq!(reg.names(), vec!["a", "b", "c"]);
    }
}
