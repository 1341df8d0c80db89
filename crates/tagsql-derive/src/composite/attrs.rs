//! Attribute parsing for the Composite derive macro.
//!
//! Handles field-level `#[tag(...)]` attributes:
//!
//! - `#[tag(sql = "id,pk", json = "ID")]` - tag key/value pairs
//! - `#[tag(embed)]` - embedded sub-composite
//! - `#[tag(skip)]` - leave the field undeclared

use syn::{LitStr, Result};

/// Parsed contents of one `#[tag(...)]` attribute.
#[derive(Default)]
pub(super) struct FieldAttr {
    pub embed: bool,
    pub skip: bool,
    pub tags: Vec<(String, LitStr)>,
}

impl syn::parse::Parse for FieldAttr {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.call(syn::ext::IdentExt::parse_any)?;
            if input.peek(syn::Token![=]) {
                let _: syn::Token![=] = input.parse()?;
                let value: LitStr = input.parse()?;
                attr.tags.push((ident.to_string(), value));
            } else if ident == "embed" {
                attr.embed = true;
            } else if ident == "skip" {
                attr.skip = true;
            } else {
                return Err(syn::Error::new_spanned(
                    &ident,
                    format!("unknown tag flag `{ident}`; expected `embed`, `skip` or `key = \"value\"`"),
                ));
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attr)
    }
}

/// Merge every `#[tag(...)]` attribute on a field.
pub(super) fn get_field_attr(field: &syn::Field) -> Result<FieldAttr> {
    let mut merged = FieldAttr::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("tag") {
            continue;
        }
        let parsed: FieldAttr = attr.parse_args()?;
        merged.embed |= parsed.embed;
        merged.skip |= parsed.skip;
        for (key, value) in parsed.tags {
            if merged.tags.iter().any(|(k, _)| *k == key) {
                return Err(syn::Error::new_spanned(
                    &value,
                    format!("duplicate tag key `{key}`"),
                ));
            }
            merged.tags.push((key, value));
        }
    }

    if merged.skip && (merged.embed || !merged.tags.is_empty()) {
        return Err(syn::Error::new_spanned(
            field,
            "`skip` cannot be combined with other tag attributes",
        ));
    }

    Ok(merged)
}
