//! Procedural macros for `flagenv`.
//!
//! The `FlagEnv` derive generates the field descriptor table that the
//! runtime walks to register flags and consult environment variables. Each
//! public field contributes one descriptor; private fields are invisible to
//! the binder.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for the `flagenv::FlagEnv` trait.
///
/// Recognised field attributes, all under `#[flagenv(...)]`:
///
/// - `flag = "name"` replaces the derived flag name. `"-"` ignores the field
///   and `""` flattens a nested structure into its parent's namespace.
/// - `env = "NAME"` replaces the derived environment variable. `"-"` keeps
///   the flag but never consults the environment.
/// - `usage = "text"` sets the help text; the first paragraph of the field's
///   doc comment is used otherwise.
/// - `nested` binds a struct, `Box`, or `Option` field recursively.
/// - `skip` is shorthand for `flag = "-"`.
///
/// The struct attribute `#[flagenv(crate = "path")]` points the generated
/// code at a renamed dependency.
#[proc_macro_derive(FlagEnv, attributes(flagenv))]
pub fn derive_flag_env(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
