//! # fieldcheck-validator
//!
//! Declarative field validation driven by annotations on struct fields.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldcheck_validator::{Record, validate_record};
//!
//! #[derive(Record)]
//! struct Listener {
//!     #[tag(validate = "required")]
//!     host: String,
//!     #[tag(validate = "gte=1,lte=65535")]
//!     port: u32,
//!     #[tag(validate = "dive,required")]
//!     upstreams: Vec<String>,
//! }
//!
//! let listener = Listener { host: "".into(), port: 0, upstreams: vec![] };
//! let err = validate_record(&listener).unwrap_err();
//! assert_eq!(err.violations().unwrap().len(), 2);
//! ```
//!
//! ## How it works
//!
//! - [`metadata`] flattens a record type (embedded records included) into
//!   per-field metadata, parsing each `validate` annotation once.
//! - [`registry`] maps validator names to callbacks. The global registry
//!   holds the [`builtin`] validators; add your own with
//!   [`must_register_validator`].
//! - [`executor`] interprets the instruction lists. Callbacks steer it with
//!   [`CallbackResult`]: pass, stop, fail, or recurse into new values.
//!
//! Invalid data is reported as [`Error::Violations`], all fields at once.
//! Every other [`Error`] variant means the annotations or validators are
//! misconfigured.

extern crate self as fieldcheck_validator;

pub mod builtin;
pub mod callback;
pub mod error;
pub mod executor;
pub mod instruction;
pub mod metadata;
pub mod record;
pub mod registry;
pub mod value;

pub use callback::{Callback, CallbackParameters, CallbackResult};
pub use error::{CallbackError, Error, FieldError, Violations};
pub use executor::{Executor, validate_record, validate_value};
pub use instruction::{Instruction, Instructions};
pub use metadata::{FieldMetadata, RecordMetadata, metadata};
pub use record::{FieldDescriptor, Record, RecordType};
pub use registry::{Registry, RegistryError, must_register_validator};
pub use value::{Kind, Reflect, Value};

/// Derives [`Record`] and [`Reflect`] from `#[tag(...)]` field annotations.
#[cfg(feature = "derive")]
pub use fieldcheck_macros::Record;
