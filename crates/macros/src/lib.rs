//! # fieldcheck Macros
//!
//! Proc-macros for fieldcheck records.
//!
//! ## Derive Macros
//!
//! | Macro | Description |
//! |-------|-------------|
//! | [`Record`](derive@Record) | Implements `Record`, `Reflect` and `Embed` from field annotations |
//! | [`Bind`](derive@Bind) | Implements the config binder's `Bind` trait |
//!
//! ## Examples
//!
//! ```ignore
//! use fieldcheck_validator::Record;
//! use fieldcheck_config::Bind;
//!
//! #[derive(Record, Bind, Default)]
//! pub struct ServerConfig {
//!     #[tag(env = "HOST", default = "127.0.0.1", validate = "required")]
//!     host: String,
//!
//!     #[tag(env = "PORT", default = "8080", validate = "gte=1,lte=65535")]
//!     port: u16,
//!
//!     #[record(embed)]
//!     tls: TlsConfig,
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate proc_macro;

use proc_macro::TokenStream;

mod bind;
mod record;
mod support;

/// Derive macro for the `Record` trait.
///
/// Also implements `Reflect` (the record reflects as itself) and `Embed`
/// (the record can be embedded in other records).
///
/// # Attributes
///
/// ## Field attributes
///
/// - `#[tag(key = "value", ...)]` - Free-form annotations. `validate` holds
///   the validation instructions; other keys (`env`, `default`, `key`,
///   `secret`) are read by the config binder.
/// - `#[record(embed)]` - Promotes the fields of an embedded record. The
///   field type must implement `Embed` (records, `Box`, `Arc`, `Option` of
///   records). Embedded fields cannot carry `#[tag]` themselves.
/// - `#[record(rename = "...")]` - Exposes the field under another name
/// - `#[record(skip)]` - Hides the field. Hidden fields are invisible to
///   validation, including the zero check `required` applies to records.
///
/// # Example
///
/// ```ignore
/// #[derive(Record)]
/// pub struct Upstream {
///     #[tag(validate = "required")]
///     host: String,
///
///     #[tag(validate = "dive,gte=1")]
///     ports: Vec<u16>,
///
///     #[record(rename = "Mode")]
///     mode: Option<String>,
///
///     #[record(skip)]
///     cache: Cache,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record, tag))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive(input)
}

/// Derive macro for the config binder's `Bind` trait.
///
/// Assigns coerced string values to fields by exposed name; embedded fields
/// forward to their own `Bind` impl. Every bound field type must implement
/// `Coerce`.
///
/// # Attributes
///
/// - `#[bind(skip)]` - The binder never resolves or assigns this field
/// - `#[record(...)]` - Read as for [`Record`](derive@Record)
///
/// # Example
///
/// ```ignore
/// #[derive(Record, Bind, Default)]
/// pub struct Limits {
///     #[tag(env = "MAX_CONN", default = "64")]
///     max_connections: u32,
///
///     #[bind(skip)]
///     #[tag(validate = "dive,required")]
///     computed: Vec<String>,
/// }
/// ```
#[proc_macro_derive(Bind, attributes(record, tag, bind))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    bind::derive(input)
}
