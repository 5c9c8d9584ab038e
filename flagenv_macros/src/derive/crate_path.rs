//! The path generated code uses to reach the runtime crate.
//!
//! `#[flagenv(crate = "my_flags")]` replaces the default `flagenv` so that
//! crates depending on a renamed copy of the runtime still expand correctly.

use proc_macro2::TokenStream;
use quote::ToTokens;

/// Runtime crate path, interpolated as `#krate::Field` in generated code.
#[derive(Clone)]
pub(crate) struct CratePath(syn::Path);

impl CratePath {
    /// Uses `alias` when the struct names one, `flagenv` otherwise.
    pub(crate) fn new(alias: Option<syn::Path>) -> Self {
        Self(alias.unwrap_or_else(|| syn::parse_quote!(flagenv)))
    }
}

impl Default for CratePath {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ToTokens for CratePath {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.0.to_tokens(tokens);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;
    use rstest::rstest;
    use syn::parse_quote;

    #[rstest]
    #[case::default(None, "flagenv :: Field")]
    #[case::alias(Some(parse_quote!(my_flags)), "my_flags :: Field")]
    #[case::qualified(Some(parse_quote!(::deps::flagenv)), ":: deps :: flagenv :: Field")]
    fn prefixes_generated_paths(#[case] alias: Option<syn::Path>, #[case] expected: &str) {
        let krate = CratePath::new(alias);
        assert_eq!(quote!(#krate::Field).to_string(), expected);
    }
}
