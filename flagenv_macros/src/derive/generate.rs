//! Token generation for the `FlagEnv` descriptor table.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, Type};

use super::crate_path::CratePath;
use super::parse::{FieldAttrs, box_inner, is_scalar, option_inner, pointee, type_name};

/// Storage shape of a field as seen by the derive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Shape {
    /// One of the bindable scalar types.
    Scalar,
    /// A sub-structure, possibly boxed.
    Nested { boxed: bool },
    /// An optional sub-structure, possibly boxed.
    OptionalNested { boxed: bool },
    /// A scalar behind `Option` or `Box`, which is omitted.
    Absent,
    /// Anything else, carrying the rendered type name.
    Unsupported(String),
}

/// Classifies `ty` according to the field's `nested` marker.
///
/// # Errors
///
/// Rejects `nested` on a scalar type, where it would hide a binding.
pub(crate) fn classify(ty: &Type, nested: bool) -> syn::Result<Shape> {
    if nested {
        let (target, optional) = option_inner(ty).map_or((ty, false), |inner| (inner, true));
        let unboxed = box_inner(target);
        if is_scalar(unboxed.unwrap_or(target)) {
            return Err(syn::Error::new_spanned(
                ty,
                "`nested` requires a struct type that implements FlagEnv",
            ));
        }
        let boxed = unboxed.is_some();
        return Ok(if optional {
            Shape::OptionalNested { boxed }
        } else {
            Shape::Nested { boxed }
        });
    }
    if is_scalar(ty) {
        return Ok(Shape::Scalar);
    }
    let (target, wrapped) = pointee(ty);
    if wrapped && is_scalar(target) {
        return Ok(Shape::Absent);
    }
    Ok(Shape::Unsupported(type_name(ty)))
}

/// Builds the descriptor expression for one public field, or `None` when the
/// field is omitted from the table.
pub(crate) fn field_descriptor(
    field: &syn::Field,
    attrs: &FieldAttrs,
    krate: &CratePath,
) -> syn::Result<Option<TokenStream>> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "FlagEnv requires named fields"));
    };
    if attrs.skip && attrs.flag.is_some() {
        return Err(syn::Error::new_spanned(
            ident,
            "`skip` cannot be combined with `flag`",
        ));
    }
    if let Some(lit) = &attrs.flag {
        let name = lit.value();
        if name.len() > 1 && name.starts_with('-') {
            return Err(syn::Error::new_spanned(
                lit,
                "flag names must not start with `-`; use `flag = \"-\"` to ignore the field",
            ));
        }
    }

    let shape = classify(&field.ty, attrs.nested)?;
    let member = quote! { self.#ident };
    let value = match shape {
        Shape::Absent => return Ok(None),
        Shape::Scalar => {
            quote! { #krate::FieldValue::Scalar(#krate::ScalarRef::from(&mut #member)) }
        }
        Shape::Nested { boxed: false } => quote! { #krate::FieldValue::Nested(&mut #member) },
        Shape::Nested { boxed: true } => quote! { #krate::FieldValue::Nested(&mut *#member) },
        Shape::OptionalNested { boxed } => {
            let borrow = if boxed {
                quote! { as_deref_mut() }
            } else {
                quote! { as_mut() }
            };
            quote! {
                #krate::FieldValue::OptionalNested(
                    #member.#borrow.map(|value| value as &mut dyn #krate::FlagEnv)
                )
            }
        }
        Shape::Unsupported(name) => quote! { #krate::FieldValue::Unsupported(#name) },
    };

    let name = ident.unraw().to_string();
    let flag = if attrs.skip {
        quote! { #krate::FlagName::Ignore }
    } else {
        attrs.flag.as_ref().map_or_else(
            || quote! { #krate::FlagName::Derived },
            |lit| quote! { #krate::FlagName::from_annotation(#lit) },
        )
    };
    let env = attrs.env.as_ref().map_or_else(
        || quote! { #krate::EnvName::Derived },
        |lit| quote! { #krate::EnvName::from_annotation(#lit) },
    );
    let usage = attrs.usage.as_deref().unwrap_or_default();

    Ok(Some(quote! {
        #krate::Field {
            ident: #name,
            flag: #flag,
            env: #env,
            usage: #usage,
            value: #value,
        }
    }))
}

/// Wraps the descriptors in the `FlagEnv` implementation.
pub(crate) fn flag_env_impl(
    input: &DeriveInput,
    krate: &CratePath,
    descriptors: &[TokenStream],
) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::FlagEnv for #ident #ty_generics #where_clause {
            fn fields(&mut self) -> ::std::vec::Vec<#krate::Field<'_>> {
                ::std::vec![#(#descriptors),*]
            }
        }
    }
}
