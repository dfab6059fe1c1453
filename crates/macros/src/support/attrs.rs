use syn::{
    Attribute, Ident, Lit, LitStr, Meta, Result, Token,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

use crate::support::diag;

/// Parsed attribute arguments container.
#[derive(Debug, Clone, Default)]
pub struct AttrArgs {
    pub items: Vec<AttrItem>,
}

/// A single attribute item.
#[derive(Debug, Clone)]
pub enum AttrItem {
    /// A flag like `embed` or `skip`
    Flag(Ident),
    /// Key-value pair like `validate = "required"`
    KeyValue { key: Ident, value: Lit },
}

impl AttrItem {
    fn key(&self) -> &Ident {
        match self {
            Self::Flag(key) | Self::KeyValue { key, .. } => key,
        }
    }
}

impl AttrArgs {
    /// Find a key-value pair by key name.
    pub fn get_value(&self, key: &str) -> Option<&Lit> {
        self.items.iter().find_map(|item| match item {
            AttrItem::KeyValue { key: k, value } if k == key => Some(value),
            _ => None,
        })
    }

    /// Get a string value by key.
    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        match self.get_value(key) {
            None => Ok(None),
            Some(Lit::Str(s)) => Ok(Some(s.value())),
            Some(other) => Err(diag::error_spanned(
                other,
                format!("`{key}` expects a string literal"),
            )),
        }
    }

    /// Check if a flag is present.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, AttrItem::Flag(f) if f == flag))
    }

    /// Reject any key outside `allowed`.
    pub fn only(&self, allowed: &[&str], attr: &str) -> Result<()> {
        for item in &self.items {
            let key = item.key();
            if !allowed.iter().any(|a| key == a) {
                return Err(diag::error_spanned(
                    key,
                    format!(
                        "unknown `#[{attr}]` argument `{key}`; expected one of: {}",
                        allowed.join(", ")
                    ),
                ));
            }
        }
        Ok(())
    }

    /// All items as `(key, string value)` pairs, in the order written.
    ///
    /// Every item must be a `key = "value"` pair; duplicate keys are rejected.
    pub fn string_pairs(&self, attr: &str) -> Result<Vec<(String, LitStr)>> {
        let mut pairs: Vec<(String, LitStr)> = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let (key, value) = match item {
                AttrItem::KeyValue {
                    key,
                    value: Lit::Str(value),
                } => (key, value),
                AttrItem::KeyValue { value, .. } => {
                    return Err(diag::error_spanned(
                        value,
                        format!("`#[{attr}]` values must be string literals"),
                    ));
                }
                AttrItem::Flag(key) => {
                    return Err(diag::error_spanned(
                        key,
                        format!("`#[{attr}]` expects `{key} = \"...\"`"),
                    ));
                }
            };
            let name = key.to_string();
            if pairs.iter().any(|(k, _)| *k == name) {
                return Err(diag::error_spanned(
                    key,
                    format!("duplicate `#[{attr}]` key `{name}`"),
                ));
            }
            pairs.push((name, value.clone()));
        }
        Ok(pairs)
    }
}

/// Parse attribute like `#[tag(...)]` (the whole Attribute, not only args).
pub fn parse_attr(attr: &Attribute, expected: &str) -> Result<Option<AttrArgs>> {
    if !attr.path().is_ident(expected) {
        return Ok(None);
    }

    match &attr.meta {
        Meta::Path(_) => Ok(Some(AttrArgs::default())),
        Meta::List(list) => {
            let args = syn::parse2::<AttrArgsParser>(list.tokens.clone())?;
            Ok(Some(args.0))
        }
        Meta::NameValue(nv) => Err(diag::error_spanned(
            nv,
            format!("#[{expected}] must be #[{expected}(...)] or #[{expected}] (not name-value)"),
        )),
    }
}

/// Parse all attributes of a given type and merge them.
pub fn parse_attrs(attrs: &[Attribute], name: &str) -> Result<AttrArgs> {
    let mut result = AttrArgs::default();

    for attr in attrs {
        if let Some(args) = parse_attr(attr, name)? {
            result.items.extend(args.items);
        }
    }

    Ok(result)
}

struct AttrArgsParser(AttrArgs);

impl Parse for AttrArgsParser {
    fn parse(input: ParseStream) -> Result<Self> {
        let items = if input.is_empty() {
            vec![]
        } else {
            Punctuated::<AttrItemParser, Token![,]>::parse_terminated(input)?
                .into_iter()
                .map(|x| x.0)
                .collect()
        };
        Ok(Self(AttrArgs { items }))
    }
}

struct AttrItemParser(AttrItem);

impl Parse for AttrItemParser {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: Ident = input.parse()?;

        if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            let value: Lit = input.parse()?;
            return Ok(Self(AttrItem::KeyValue { key, value }));
        }

        Ok(Self(AttrItem::Flag(key)))
    }
}
