//! Unit tests for error decoration helpers.

use super::*;
use crate::scalar::ScalarKind;
use clap::error::ErrorKind;
use rstest::rstest;

fn parse_error() -> FlagEnvError {
    FlagEnvError::Parse {
        name: "ADDR_ZIP".to_owned(),
        value: "abc".to_owned(),
        kind: ScalarKind::Int,
        reason: "invalid digit found in string".to_owned(),
    }
}

#[rstest]
fn field_layers_render_as_a_path() {
    let err = parse_error().in_field("zip").in_field("addr");
    assert_eq!(
        err.to_string(),
        "field addr: field zip: environment variable ADDR_ZIP has invalid int value \"abc\": \
         invalid digit found in string"
    );
    assert_eq!(err.field_path(), vec!["addr", "zip"]);
    assert!(matches!(err.root_cause(), FlagEnvError::Parse { name, .. } if name == "ADDR_ZIP"));
}

#[rstest]
fn unwrapped_error_has_empty_path() {
    let err = FlagEnvError::UnsupportedType {
        type_name: "Client".to_owned(),
    };
    assert!(err.field_path().is_empty());
    assert!(matches!(err.root_cause(), FlagEnvError::UnsupportedType { .. }));
}

#[rstest]
#[case(ErrorKind::DisplayHelp, true)]
#[case(ErrorKind::DisplayVersion, true)]
#[case(ErrorKind::UnknownArgument, false)]
fn classifies_display_requests(#[case] kind: ErrorKind, #[case] expected: bool) {
    let err = FlagEnvError::from(clap::Error::new(kind));
    assert_eq!(err.is_display_request(), expected);
}
