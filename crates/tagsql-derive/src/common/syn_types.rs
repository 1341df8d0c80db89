//! Type helper utilities for syn type analysis.

/// Extract the inner type T from `Box<T>`, `Rc<T>` or `Arc<T>`, or return None
/// if the type is not one of these smart pointers.
///
/// Matches on the last path segment, so `std::boxed::Box<T>` and
/// `std::sync::Arc<T>` are recognized as well.
pub fn pointer_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != "Box" && seg.ident != "Rc" && seg.ident != "Arc" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    let syn::GenericArgument::Type(inner) = args.args.first()? else {
        return None;
    };
    Some(inner)
}
