//! Tests for type introspection helpers.

use super::super::*;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{Type, parse_quote};

#[rstest]
#[case(parse_quote!(Option<Address>))]
#[case(parse_quote!(std::option::Option<Address>))]
#[case(parse_quote!(core::option::Option<Address>))]
fn option_inner_matches_various_prefixes(#[case] ty: Type) -> Result<()> {
    let expected: Type = parse_quote!(Address);
    let inner = option_inner(&ty).ok_or_else(|| anyhow!("expected Option"))?;
    ensure!(inner == &expected, "expected {expected:?}, got {inner:?}");
    Ok(())
}

#[rstest]
#[case(parse_quote!(Box<Address>))]
#[case(parse_quote!(std::boxed::Box<Address>))]
fn box_inner_matches_various_prefixes(#[case] ty: Type) -> Result<()> {
    let expected: Type = parse_quote!(Address);
    let inner = box_inner(&ty).ok_or_else(|| anyhow!("expected Box"))?;
    ensure!(inner == &expected, "expected {expected:?}, got {inner:?}");
    Ok(())
}

#[rstest]
#[case::int(parse_quote!(i32), true)]
#[case::int64(parse_quote!(i64), true)]
#[case::float(parse_quote!(f64), true)]
#[case::string(parse_quote!(String), true)]
#[case::qualified_string(parse_quote!(std::string::String), true)]
#[case::boolean(parse_quote!(bool), true)]
#[case::time_delta(parse_quote!(TimeDelta), true)]
#[case::qualified_time_delta(parse_quote!(chrono::TimeDelta), true)]
#[case::reexported_time_delta(parse_quote!(flagenv::TimeDelta), true)]
#[case::chrono_duration(parse_quote!(chrono::Duration), true)]
#[case::std_duration(parse_quote!(std::time::Duration), false)]
#[case::core_duration(parse_quote!(core::time::Duration), false)]
#[case::bare_duration(parse_quote!(Duration), false)]
#[case::other_duration(parse_quote!(humantime::Duration), false)]
#[case::unsigned(parse_quote!(u32), false)]
#[case::float32(parse_quote!(f32), false)]
#[case::generic(parse_quote!(Vec<String>), false)]
#[case::reference(parse_quote!(&'static str), false)]
#[case::struct_type(parse_quote!(Address), false)]
fn is_scalar_recognises_bindable_types(#[case] ty: Type, #[case] expected: bool) {
    assert_eq!(is_scalar(&ty), expected);
}

#[rstest]
#[case::plain(parse_quote!(i32), "i32", false)]
#[case::boxed(parse_quote!(Box<i32>), "i32", true)]
#[case::optional_boxed(parse_quote!(Option<Box<i32>>), "i32", true)]
#[case::boxed_optional(parse_quote!(Box<Option<Address>>), "Address", true)]
fn pointee_strips_option_and_box(
    #[case] ty: Type,
    #[case] expected: &str,
    #[case] expected_wrapped: bool,
) {
    let (target, wrapped) = pointee(&ty);
    assert_eq!(type_name(target), expected);
    assert_eq!(wrapped, expected_wrapped);
}

#[rstest]
#[case(parse_quote!(Vec<String>), "Vec<String>")]
#[case(parse_quote!(reqwest::Client), "reqwest::Client")]
#[case(parse_quote!(HashMap<String, i32>), "HashMap<String, i32>")]
#[case(parse_quote!(&'static str), "&'static str")]
fn type_name_renders_compactly(#[case] ty: Type, #[case] expected: &str) {
    assert_eq!(type_name(&ty), expected);
}
