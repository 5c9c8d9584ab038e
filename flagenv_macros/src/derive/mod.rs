//! Expansion of `#[derive(FlagEnv)]`.

use proc_macro2::TokenStream;
use syn::{Data, DeriveInput, Fields, Visibility};

use crate_path::CratePath;

mod crate_path;
mod generate;
mod parse;

/// Expands the derive for `input`.
///
/// Field attributes are validated on every field, including private ones,
/// so misspelt keys fail even where the field is not bound.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let struct_attrs = parse::parse_struct_attrs(&input.attrs)?;
    let krate = CratePath::new(struct_attrs.crate_path);

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unit => {
                return Ok(generate::flag_env_impl(input, &krate, &[]));
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "FlagEnv requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "FlagEnv can only be derived for structs",
            ));
        }
    };

    let mut descriptors = Vec::new();
    for field in fields {
        let attrs = parse::parse_field_attrs(&field.attrs)?;
        if matches!(field.vis, Visibility::Inherited) {
            continue;
        }
        if let Some(tokens) = generate::field_descriptor(field, &attrs, &krate)? {
            descriptors.push(tokens);
        }
    }
    Ok(generate::flag_env_impl(input, &krate, &descriptors))
}
