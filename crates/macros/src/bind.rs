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

    let mut embedded = Vec::new();
    let mut assigned = Vec::new();
    let mut embedded_binds = Vec::new();
    let mut skipped = Vec::new();

    for field in &fields {
        let options = attrs::parse_attrs(field.attrs, "bind")?;
        options.only(&["skip"], "bind")?;

        let name = &field.name;
        let ident = field.ident;
        let ty = field.ty;

        if options.has_flag("skip") {
            let ignore = quote! { #name => ::std::result::Result::Ok(()), };
            if field.embed {
                embedded.push(ignore);
                embedded_binds.push(quote! { #name => false, });
            } else {
                assigned.push(ignore);
                skipped.push(quote! { #name });
            }
        } else if field.embed {
            embedded.push(quote! {
                #name => ::fieldcheck_config::Bind::assign(&mut self.#ident, rest, field, raw),
            });
            embedded_binds.push(quote! {
                #name => <#ty as ::fieldcheck_config::Bind>::binds(rest, field),
            });
        } else {
            assigned.push(quote! {
                #name => {
                    self.#ident = <#ty as ::fieldcheck_config::Coerce>::coerce(raw)?;
                    ::std::result::Result::Ok(())
                }
            });
        }
    }

    Ok(quote! {
        impl #impl_generics ::fieldcheck_config::Bind for #struct_name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn assign(
                &mut self,
                chain: &[&str],
                field: &str,
                raw: &str,
            ) -> ::std::result::Result<(), ::fieldcheck_config::CoerceError> {
                match chain.split_first() {
                    ::std::option::Option::Some((head, rest)) => match *head {
                        #(#embedded)*
                        other => ::std::result::Result::Err(
                            ::fieldcheck_config::CoerceError::unknown_field(other),
                        ),
                    },
                    ::std::option::Option::None => match field {
                        #(#assigned)*
                        other => ::std::result::Result::Err(
                            ::fieldcheck_config::CoerceError::unknown_field(other),
                        ),
                    },
                }
            }

            #[allow(unused_variables)]
            fn binds(chain: &[&str], field: &str) -> bool {
                match chain.split_first() {
                    ::std::option::Option::Some((head, rest)) => match *head {
                        #(#embedded_binds)*
                        _ => true,
                    },
                    ::std::option::Option::None => match field {
                        #(#skipped => false,)*
                        _ => true,
                    },
                }
            }
        }
    })
}
