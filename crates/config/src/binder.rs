//! Populating records from sources
//!
//! For every field of the record, in declaration order:
//!
//! 1. ask each source in turn; the first one with a value wins,
//! 2. otherwise use the `default` tag, if any,
//! 3. otherwise leave the field untouched.
//!
//! The chosen string is coerced into the field's type. Once every field is
//! assigned, the record is validated exactly once.

use fieldcheck_validator::{Executor, Record, Registry, metadata};

use crate::error::{CoerceError, ConfigError, ConfigResult};
use crate::source::{DEFAULT_TAG, EnvSource, FieldRef, Source};

const REDACTED: &str = "[REDACTED]";

/// Records whose fields can be assigned from raw strings.
///
/// Usually implemented with `#[derive(Bind)]`.
pub trait Bind {
    /// Coerces `raw` into field `field`, reached through the embedded fields
    /// named in `chain` (outermost first).
    fn assign(&mut self, chain: &[&str], field: &str, raw: &str) -> Result<(), CoerceError>;

    /// Whether `field`, reached through `chain`, takes bound values at all.
    /// `#[bind(skip)]` fields answer `false`.
    fn binds(_chain: &[&str], _field: &str) -> bool
    where
        Self: Sized,
    {
        true
    }
}

impl<T: Bind> Bind for Box<T> {
    fn assign(&mut self, chain: &[&str], field: &str, raw: &str) -> Result<(), CoerceError> {
        (**self).assign(chain, field, raw)
    }

    fn binds(chain: &[&str], field: &str) -> bool {
        T::binds(chain, field)
    }
}

/// Assigning into an absent embedded record creates it first.
impl<T: Bind + Default> Bind for Option<T> {
    fn assign(&mut self, chain: &[&str], field: &str, raw: &str) -> Result<(), CoerceError> {
        self.get_or_insert_with(T::default).assign(chain, field, raw)
    }

    fn binds(chain: &[&str], field: &str) -> bool {
        T::binds(chain, field)
    }
}

/// Fills records from an ordered list of sources.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldcheck_config::{Binder, EnvSource, MapSource};
///
/// let config: ServerConfig = Binder::new()
///     .source(MapSource::new("overrides").with("port", "9090"))
///     .source(EnvSource::with_prefix("APP_"))
///     .bind()?;
/// ```
pub struct Binder<'r> {
    sources: Vec<Box<dyn Source>>,
    registry: &'r Registry,
}

impl Binder<'static> {
    /// Creates a binder with no sources, validating with the global registry.
    pub fn new() -> Self {
        Self::with_registry(fieldcheck_validator::registry::global())
    }
}

impl Default for Binder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Binder<'r> {
    /// Creates a binder with no sources, validating with `registry`.
    pub fn with_registry(registry: &'r Registry) -> Self {
        Self {
            sources: Vec::new(),
            registry,
        }
    }

    /// Appends a source. Earlier sources take precedence.
    #[must_use = "builder methods must be chained or built"]
    pub fn source(mut self, source: impl Source + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Number of configured sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no source is configured.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Binds and validates a fresh `T::default()`.
    pub fn bind<T: Record + Bind + Default>(&self) -> ConfigResult<T> {
        let mut record = T::default();
        self.bind_into(&mut record)?;
        Ok(record)
    }

    /// Binds into an existing record, then validates it.
    ///
    /// Fields no source or default provides keep their current value.
    pub fn bind_into<T: Record + Bind>(&self, record: &mut T) -> ConfigResult<()> {
        let meta = metadata::<T>();

        for (name, field) in meta.fields() {
            if !T::binds(field.embedded_path(), name) {
                tracing::debug!(record = meta.name(), field = name, "field not bound, skipping");
                continue;
            }

            let target = FieldRef::new(meta.name(), name, field);
            let Some((raw, origin)) = self.resolve(&target)? else {
                tracing::debug!(record = meta.name(), field = name, "no value, keeping current");
                continue;
            };

            let shown = if target.is_secret() { REDACTED } else { raw.as_str() };
            tracing::debug!(
                record = meta.name(),
                field = name,
                origin,
                value = shown,
                "assigning field"
            );

            record
                .assign(field.embedded_path(), name, &raw)
                .map_err(|source| ConfigError::Coerce {
                    field: name.to_owned(),
                    source,
                })?;
        }

        Executor::new(self.registry)
            .validate_record(&*record)
            .map_err(|source| ConfigError::Validation {
                record: meta.name(),
                source,
            })
    }

    fn resolve<'s>(&'s self, field: &FieldRef<'_>) -> ConfigResult<Option<(String, &'s str)>> {
        for source in &self.sources {
            match source.lookup(field) {
                Ok(Some(raw)) => return Ok(Some((raw, source.name()))),
                Ok(None) => {}
                Err(source_err) => {
                    return Err(ConfigError::Source {
                        source_name: source.name().to_owned(),
                        field: field.name().to_owned(),
                        source: source_err,
                    });
                }
            }
        }
        Ok(field.tag(DEFAULT_TAG).map(|raw| (raw.to_owned(), DEFAULT_TAG)))
    }
}

impl std::fmt::Debug for Binder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("Binder").field("sources", &names).finish()
    }
}

/// Binds `T` from the process environment and validates it.
pub fn load<T: Record + Bind + Default>() -> ConfigResult<T> {
    Binder::new().source(EnvSource::new()).bind()
}
