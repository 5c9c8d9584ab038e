//! Literal parsing helpers for derive attributes.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitStr};

/// Parses a string literal from an attribute key.
///
/// # Examples
///
/// ```rust,ignore
/// use syn::Attribute;
/// let attr: Attribute = syn::parse_quote!(#[flagenv(flag = "name")]);
/// attr.parse_nested_meta(|meta| {
///     let s = lit_str(&meta, "flag")?;
///     assert_eq!(s.value(), "name");
///     Ok(())
/// })?;
/// ```
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> Result<LitStr, syn::Error> {
    let literal = meta.value()?.parse::<Lit>()?;
    match literal {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(
            other.span(),
            format!("{key} must be a string"),
        )),
    }
}
