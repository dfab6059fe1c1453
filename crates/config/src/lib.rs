//! # fieldcheck-config
//!
//! Fills annotated records from string sources, then validates them.
//!
//! ```rust,ignore
//! use fieldcheck_config::{Bind, Binder, EnvSource};
//! use fieldcheck_validator::Record;
//!
//! #[derive(Record, Bind, Default)]
//! struct ServerConfig {
//!     #[tag(env = "HOST", default = "127.0.0.1", validate = "required")]
//!     host: String,
//!     #[tag(env = "PORT", default = "8080", validate = "gte=1,lte=65535")]
//!     port: u16,
//!     #[tag(env = "API_TOKEN", secret = "true", validate = "required")]
//!     token: String,
//! }
//!
//! let config: ServerConfig = Binder::new().source(EnvSource::with_prefix("APP_")).bind()?;
//! ```
//!
//! ## Field annotations
//!
//! | Tag | Meaning |
//! |-----|---------|
//! | `env` | Environment variable read by [`EnvSource`] |
//! | `key` | Lookup key for [`MapSource`] (defaults to the field name) |
//! | `default` | Raw value used when no source has one |
//! | `secret` | `"true"` redacts the value in logs |
//! | `validate` | Validation instructions, checked after binding |

extern crate self as fieldcheck_config;

pub mod binder;
pub mod coerce;
pub mod error;
pub mod source;

pub use binder::{Bind, Binder, load};
pub use coerce::Coerce;
pub use error::{CoerceError, ConfigError, ConfigResult, SourceError};
pub use source::{EnvSource, FieldRef, FnSource, MapSource, Source};

/// Derives [`Bind`] for records.
#[cfg(feature = "derive")]
pub use fieldcheck_macros::Bind;
