//! Built-in validators
//!
//! # Names
//!
//! - **Presence**: `required`, `required_if`, `omitempty`, `skip`
//! - **Numeric**: `gt`, `gte`, `lt`, `lte`
//! - **Choice**: `oneof`
//! - **Structure**: `dive`, `nested`
//! - **Filesystem** (feature `fs`): `accessible`, `abspath`
//!
//! # Examples
//!
//! ```rust,ignore
//! #[derive(Record)]
//! struct Job {
//!     #[tag(validate = "omitempty,gte=1,lte=64")]
//!     workers: Option<u32>,
//!     #[tag(validate = "dive,oneof=low normal high")]
//!     priorities: Vec<String>,
//! }
//! ```

pub mod choice;
pub mod compare;
pub mod dive;
#[cfg(feature = "fs")]
pub mod fs;
pub mod nested;
pub mod presence;

use crate::registry::Registry;

/// Registers every built-in validator on `registry`.
///
/// # Panics
///
/// Panics if one of the built-in names is already taken.
pub fn register_all(registry: &Registry) {
    registry.register("required", presence::required);
    registry.register("required_if", presence::required_if);
    registry.register("omitempty", presence::omitempty);
    registry.register("skip", presence::skip);

    registry.register("gt", compare::gt);
    registry.register("gte", compare::gte);
    registry.register("lt", compare::lt);
    registry.register("lte", compare::lte);

    registry.register("oneof", choice::oneof);

    registry.register("dive", dive::dive);
    registry.register("nested", nested::nested);

    #[cfg(feature = "fs")]
    {
        registry.register("accessible", fs::accessible);
        registry.register("abspath", fs::abspath);
    }
}
