//! Type introspection helpers.
//!
//! These utilities perform shallow inspection of `syn::Type` values to
//! recognise the wrappers and scalar types the binder understands.

use syn::{GenericArgument, Path, PathArguments, Type};

/// Final path segments of the primitive and `String` scalars.
const PRIMITIVE_SCALARS: &[&str] = &["i32", "i64", "f64", "String", "bool"];

/// Extract the first type argument from a `PathArguments` container.
fn extract_first_type_argument(args: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(angle_args) = args else {
        return None;
    };
    let GenericArgument::Type(inner) = angle_args.args.first()? else {
        return None;
    };
    Some(inner)
}

/// Returns the generic parameter if `ty` is the provided wrapper.
///
/// Only the final path segment is compared, so `std::option::Option<T>` and
/// `Option<T>` both match. The check is not recursive.
fn type_inner<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(p) = ty else {
        return None;
    };
    let last = p.path.segments.last()?;
    if last.ident != wrapper {
        return None;
    }
    extract_first_type_argument(&last.arguments)
}

/// Returns the inner type if `ty` is `Option<T>`.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    type_inner(ty, "Option")
}

/// Returns the inner type if `ty` is `Box<T>`.
pub(crate) fn box_inner(ty: &Type) -> Option<&Type> {
    type_inner(ty, "Box")
}

/// Returns `true` for the signed duration type: `TimeDelta` under any path,
/// or chrono's `Duration` alias spelled `chrono::Duration`.
///
/// A bare `Duration` is not matched because it usually names
/// `std::time::Duration`, which has no sign.
fn is_time_delta(path: &Path) -> bool {
    let names: Vec<String> = path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect();
    match names.as_slice() {
        [.., last] if last == "TimeDelta" => true,
        [krate, last] => krate == "chrono" && last == "Duration",
        _ => false,
    }
}

/// Returns `true` when `ty` is one of the bindable scalar types without
/// generic arguments.
pub(crate) fn is_scalar(ty: &Type) -> bool {
    let Type::Path(p) = ty else {
        return false;
    };
    if p.qself.is_some() {
        return false;
    }
    let Some(last) = p.path.segments.last() else {
        return false;
    };
    if !p.path.segments.iter().all(|segment| segment.arguments.is_none()) {
        return false;
    }
    PRIMITIVE_SCALARS.iter().any(|name| last.ident == *name) || is_time_delta(&p.path)
}

/// Strips any mix of `Option` and `Box` wrappers, returning the innermost
/// type and whether anything was stripped.
pub(crate) fn pointee(ty: &Type) -> (&Type, bool) {
    let mut current = ty;
    let mut wrapped = false;
    while let Some(inner) = option_inner(current).or_else(|| box_inner(current)) {
        current = inner;
        wrapped = true;
    }
    (current, wrapped)
}

/// Renders `ty` compactly for diagnostics, e.g. `Vec<String>` rather than
/// `Vec < String >`.
pub(crate) fn type_name(ty: &Type) -> String {
    let rendered = quote::quote!(#ty).to_string();
    rendered
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" < ", "<")
        .replace(" <", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace("& ", "&")
}
