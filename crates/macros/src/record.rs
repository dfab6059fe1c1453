use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use crate::support::{attrs, diag, utils};

pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(input) {
        Ok(ts) => ts.into(),
        Err(e) => diag::to_compile_error(e),
    }
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let named = utils::require_named_fields(&input)?;
    let fields = utils::record_fields(named)?;

    let mut descriptors = Vec::with_capacity(fields.len());
    let mut readers = Vec::with_capacity(fields.len());

    for field in &fields {
        let name = &field.name;
        let ident = field.ident;
        let ty = field.ty;

        if field.embed
            && let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("tag"))
        {
            return Err(diag::error_spanned(
                attr,
                "`#[tag]` is not allowed on embedded fields; annotate the fields of the embedded record instead",
            ));
        }

        let tags = attrs::parse_attrs(field.attrs, "tag")?.string_pairs("tag")?;
        let tag_pairs = tags.iter().map(|(key, value)| quote!((#key, #value)));

        let mut descriptor = quote! {
            ::fieldcheck_validator::FieldDescriptor::new(
                #name,
                ::std::any::type_name::<#ty>(),
                &[#(#tag_pairs),*],
            )
        };
        if field.embed {
            descriptor = quote! {
                #descriptor.embedding(
                    <#ty as ::fieldcheck_validator::record::Embed>::embedded_type()
                )
            };
        }
        descriptors.push(descriptor);

        readers.push(quote! {
            #name => ::std::option::Option::Some(
                ::fieldcheck_validator::Reflect::reflect(&self.#ident)
            ),
        });
    }

    Ok(quote! {
        impl #impl_generics ::fieldcheck_validator::Record for #struct_name #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<::fieldcheck_validator::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }

            fn record_type(&self) -> ::fieldcheck_validator::RecordType {
                ::fieldcheck_validator::RecordType::of::<Self>()
            }

            fn field(&self, name: &str) -> ::std::option::Option<::fieldcheck_validator::Value<'_>> {
                match name {
                    #(#readers)*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl #impl_generics ::fieldcheck_validator::Reflect for #struct_name #ty_generics #where_clause {
            fn reflect(&self) -> ::fieldcheck_validator::Value<'_> {
                ::fieldcheck_validator::Value::Record(self)
            }
        }

        impl #impl_generics ::fieldcheck_validator::record::Embed for #struct_name #ty_generics #where_clause {
            fn embedded_type() -> ::fieldcheck_validator::RecordType {
                ::fieldcheck_validator::RecordType::of::<Self>()
            }
        }
    })
}
