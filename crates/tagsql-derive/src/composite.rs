//! Composite derive macro implementation

mod attrs;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

use crate::common::syn_types::pointer_inner;
use attrs::get_field_attr;

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Composite requires 'static field types (slots are identified through `std::any::Any`); \
             structs with lifetime parameters cannot derive it",
        ));
    }

    // Every type parameter may end up behind a slot, which needs `Any`.
    let mut generics = input.generics.clone();
    let params: Vec<_> = input.generics.type_params().map(|p| p.ident.clone()).collect();
    let predicates = &mut generics.make_where_clause().predicates;
    for ident in params {
        predicates.push(syn::parse_quote!(#ident: 'static));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Composite can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Composite can only be derived for structs",
            ));
        }
    };

    let mut decls = Vec::new();
    let mut entries = Vec::new();

    for field in fields {
        let attr = get_field_attr(field)?;
        if attr.skip {
            continue;
        }

        let field_name = field.ident.as_ref().expect("named field");
        let ident = field_name.to_string();
        let keys = attr.tags.iter().map(|(k, _)| k);
        let values = attr.tags.iter().map(|(_, v)| v);
        let tags = quote! { &[#((#keys, #values)),*] };
        let idx = decls.len();

        if !attr.embed {
            decls.push(quote! { ::tagsql::FieldDecl::column(#ident, #tags) });
            entries.push(quote! {
                ::tagsql::DeclaredField::column(&FIELDS[#idx], &self.#field_name)
            });
        } else if pointer_inner(&field.ty).is_some() {
            decls.push(quote! { ::tagsql::FieldDecl::embedded_ref(#ident, #tags) });
            entries.push(quote! {
                ::tagsql::DeclaredField::embedded(&FIELDS[#idx], &self.#field_name, &*self.#field_name)
            });
        } else {
            decls.push(quote! { ::tagsql::FieldDecl::embedded(#ident, #tags) });
            entries.push(quote! {
                ::tagsql::DeclaredField::embedded(&FIELDS[#idx], &self.#field_name, &self.#field_name)
            });
        }
    }

    Ok(quote! {
        impl #impl_generics ::tagsql::Composite for #name #ty_generics #where_clause {
            fn declared_fields(&self) -> ::std::vec::Vec<::tagsql::DeclaredField<'_>> {
                static FIELDS: &[::tagsql::FieldDecl] = &[#(#decls),*];
                ::std::vec![#(#entries),*]
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetime_parameter_is_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Borrowed<'a> {
                #[tag(sql = "name")]
                name: &'a str,
            }
        };
        let err = expand(input).unwrap_err();
        assert!(err.to_string().contains("'static"), "{err}");
    }

    #[test]
    fn type_parameters_get_static_bound() {
        let input: DeriveInput = syn::parse_quote! {
            struct Keyed<K: Clone> {
                #[tag(sql = "key")]
                key: K,
            }
        };
        let out = expand(input).unwrap().to_string();
        assert!(out.contains("K : 'static"), "{out}");
    }

    #[test]
    fn tuple_struct_is_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Pair(i64, i64);
        };
        assert!(expand(input).is_err());
    }
}
