use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields};

use crate::support::attrs::{self, AttrArgs};

/// Ensure input is a struct and return its fields.
pub fn require_struct_fields(input: &DeriveInput) -> syn::Result<&Fields> {
    match &input.data {
        Data::Struct(s) => Ok(&s.fields),
        _ => Err(syn::Error::new(
            input.ident.span(),
            "records can only be derived for structs",
        )),
    }
}

/// Return named fields if struct has them; otherwise error.
pub fn require_named_fields(input: &DeriveInput) -> syn::Result<&syn::FieldsNamed> {
    let fields = require_struct_fields(input)?;
    match fields {
        Fields::Named(n) => Ok(n),
        Fields::Unnamed(_) => Err(syn::Error::new(
            fields.span(),
            "records require a struct with named fields (e.g. `struct X { ... }`)",
        )),
        Fields::Unit => Err(syn::Error::new(
            fields.span(),
            "records require a non-unit struct with fields",
        )),
    }
}

/// A named field together with its parsed `#[record(...)]` options.
pub struct RecordField<'a> {
    pub ident: &'a syn::Ident,
    pub ty: &'a syn::Type,
    pub attrs: &'a [syn::Attribute],
    /// Name the field is exposed under.
    pub name: String,
    pub embed: bool,
}

/// Collects the fields that take part in the record, skipping
/// `#[record(skip)]`.
pub fn record_fields(fields: &syn::FieldsNamed) -> syn::Result<Vec<RecordField<'_>>> {
    let mut out = Vec::with_capacity(fields.named.len());
    for field in &fields.named {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let options: AttrArgs = attrs::parse_attrs(&field.attrs, "record")?;
        options.only(&["embed", "skip", "rename"], "record")?;
        if options.has_flag("skip") {
            continue;
        }

        let name = options.get_string("rename")?.unwrap_or_else(|| {
            let raw = ident.to_string();
            raw.strip_prefix("r#").map_or(raw.clone(), str::to_owned)
        });
        out.push(RecordField {
            ident,
            ty: &field.ty,
            attrs: &field.attrs,
            name,
            embed: options.has_flag("embed"),
        });
    }
    Ok(out)
}
