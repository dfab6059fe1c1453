use proc_macro::TokenStream;

/// Renders a `syn::Error` as `compile_error!` invocations at its spans.
pub fn to_compile_error(err: syn::Error) -> TokenStream {
    err.to_compile_error().into()
}

/// Error pointing at `tokens`.
pub fn error_spanned<T: quote::ToTokens>(tokens: &T, msg: impl Into<String>) -> syn::Error {
    syn::Error::new_spanned(tokens, msg.into())
}
