//! Derive macros for tagsql
//!
//! Provides `#[derive(Composite)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod common;
mod composite;

/// Derive the `Composite` trait for a struct.
///
/// Registers every field's declaration (its tags) so that slot references
/// into a value can be resolved back to column names.
///
/// # Example
///
/// ```ignore
/// use tagsql::Composite;
///
/// #[derive(Composite)]
/// struct Audit {
///     #[tag(sql = "created_by")]
///     created_by: i64,
/// }
///
/// #[derive(Composite)]
/// struct Post {
///     #[tag(sql = "id,pk", json = "ID")]
///     id: i64,
///     #[tag(sql = "title")]
///     title: String,
///     #[tag(embed)]
///     audit: Audit,
/// }
/// ```
///
/// # Attributes
///
/// - `#[tag(key = "value", ...)]` - Attach tags; the column name is the value up to the first comma
/// - `#[tag(embed)]` - Search this field's own fields too (by value, or through `Box`/`Rc`/`Arc`)
/// - `#[tag(skip)]` - Leave the field undeclared
///
/// Fields without any `#[tag]` attribute are still declared, with no tags.
///
/// # Requirements
///
/// Field types must be `'static`: slots are identified by address and
/// `TypeId`. Structs with lifetime parameters are rejected with a compile
/// error; type parameters receive a `'static` bound on the generated impl.
#[proc_macro_derive(Composite, attributes(tag))]
pub fn derive_composite(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    composite::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
