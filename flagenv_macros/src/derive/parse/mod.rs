//! Attribute parsing for the `FlagEnv` derive macro.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, ExprLit, Lit, LitStr, Meta};

mod literals;
#[cfg(test)]
mod tests;
mod type_utils;

use literals::lit_str;
pub(crate) use type_utils::{box_inner, is_scalar, option_inner, pointee, type_name};

/// Struct-level attributes recognised by `#[derive(FlagEnv)]`.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[flagenv(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `flagenv::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(FlagEnv)]`.
///
/// - `flag` and `env` carry the raw annotation; the runtime interprets the
///   `"-"` and `""` sentinels.
/// - `usage` is the explicit help text, falling back to the doc comment.
/// - `nested` marks a sub-structure to walk recursively.
/// - `skip` ignores the field entirely.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub flag: Option<LitStr>,
    pub env: Option<LitStr>,
    pub usage: Option<String>,
    pub nested: bool,
    pub skip: bool,
}

/// Iterate all `#[flagenv(...)]` attributes once and apply a callback.
fn parse_flagenv<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("flagenv")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Extracts `#[flagenv(...)]` metadata applied to a struct.
///
/// Only `crate` is recognised; any other key is rejected.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> Result<StructAttrs, syn::Error> {
    let mut out = StructAttrs::default();
    parse_flagenv(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path =
                syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            Ok(())
        } else {
            Err(meta.error("unknown flagenv struct attribute; expected `crate`"))
        }
    })?;
    Ok(out)
}

/// Parses field-level `#[flagenv(...)]` attributes and the doc comment.
///
/// Recognised keys are `flag`, `env`, `usage`, `nested`, and `skip`.
/// Unknown keys are rejected so misspellings fail at compile time.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs, syn::Error> {
    let mut out = FieldAttrs::default();
    parse_flagenv(attrs, |meta| {
        let Some(ident) = meta.path.get_ident() else {
            return Err(meta.error("expected a flagenv field attribute"));
        };
        match ident.to_string().as_str() {
            "flag" => out.flag = Some(lit_str(meta, "flag")?),
            "env" => out.env = Some(lit_str(meta, "env")?),
            "usage" => out.usage = Some(lit_str(meta, "usage")?.value()),
            "nested" => out.nested = true,
            "skip" => out.skip = true,
            other => {
                return Err(meta.error(format!(
                    "unknown flagenv field attribute `{other}`; expected one of \
                     `flag`, `env`, `usage`, `nested`, or `skip`"
                )));
            }
        }
        Ok(())
    })?;
    if out.usage.is_none() {
        out.usage = doc_summary(attrs);
    }
    Ok(out)
}

/// Returns the first paragraph of the doc comment, joined onto one line.
fn doc_summary(attrs: &[Attribute]) -> Option<String> {
    let lines = attrs.iter().filter_map(|attr| match &attr.meta {
        Meta::NameValue(nv) if nv.path.is_ident("doc") => match &nv.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) => Some(s.value()),
            _ => None,
        },
        _ => None,
    });

    let mut summary: Vec<String> = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            if summary.is_empty() {
                continue;
            }
            break;
        }
        summary.push(line.to_owned());
    }
    (!summary.is_empty()).then(|| summary.join(" "))
}
