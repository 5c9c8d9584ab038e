//! The closed set of scalar kinds a configuration field can bind to.

use std::fmt;

use chrono::TimeDelta;

use crate::duration;

/// Kinds of scalar a flag can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `i32`.
    Int,
    /// `i64`.
    Int64,
    /// `f64`.
    Float,
    /// `String`.
    String,
    /// `bool`.
    Bool,
    /// [`TimeDelta`], a signed span written as a duration literal.
    Duration,
}

impl ScalarKind {
    /// Short lowercase label used in diagnostics and help output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Int64 => "int64",
            Self::Float => "float",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Duration => "duration",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mutable reference to a scalar field, tagged with its kind.
#[derive(Debug)]
pub enum ScalarRef<'a> {
    /// An `i32` field.
    Int(&'a mut i32),
    /// An `i64` field.
    Int64(&'a mut i64),
    /// An `f64` field.
    Float(&'a mut f64),
    /// A `String` field.
    Str(&'a mut String),
    /// A `bool` field.
    Bool(&'a mut bool),
    /// A [`TimeDelta`] field.
    Duration(&'a mut TimeDelta),
}

impl ScalarRef<'_> {
    /// Kind of the referenced field.
    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Self::Int(_) => ScalarKind::Int,
            Self::Int64(_) => ScalarKind::Int64,
            Self::Float(_) => ScalarKind::Float,
            Self::Str(_) => ScalarKind::String,
            Self::Bool(_) => ScalarKind::Bool,
            Self::Duration(_) => ScalarKind::Duration,
        }
    }

    /// Renders the field's current value in its flag syntax.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Int(slot) => slot.render(),
            Self::Int64(slot) => slot.render(),
            Self::Float(slot) => slot.render(),
            Self::Str(slot) => slot.render(),
            Self::Bool(slot) => slot.render(),
            Self::Duration(slot) => slot.render(),
        }
    }
}

impl<'a, T: Scalar> From<&'a mut T> for ScalarRef<'a> {
    fn from(slot: &'a mut T) -> Self {
        T::bind(slot)
    }
}

mod private {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
    impl Sealed for String {}
    impl Sealed for bool {}
    impl Sealed for chrono::TimeDelta {}
}

/// A value type that can back a flag.
///
/// Sealed: only `i32`, `i64`, `f64`, `String`, `bool` and
/// [`TimeDelta`] implement it.
pub trait Scalar: Clone + Send + Sync + 'static + private::Sealed {
    /// The kind tag for this type.
    const KIND: ScalarKind;

    /// Parses a raw environment value.
    ///
    /// # Errors
    ///
    /// Returns the parser's diagnostic when `raw` does not match the type's
    /// grammar.
    fn parse_env(raw: &str) -> Result<Self, String>;

    /// Renders the value in the syntax accepted on the command line.
    fn render(&self) -> String;

    /// Tags a mutable reference with this type's kind.
    fn bind(slot: &mut Self) -> ScalarRef<'_>;
}

impl Scalar for i32 {
    const KIND: ScalarKind = ScalarKind::Int;

    fn parse_env(raw: &str) -> Result<Self, String> {
        raw.parse().map_err(|err: std::num::ParseIntError| err.to_string())
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn bind(slot: &mut Self) -> ScalarRef<'_> {
        ScalarRef::Int(slot)
    }
}

impl Scalar for i64 {
    const KIND: ScalarKind = ScalarKind::Int64;

    fn parse_env(raw: &str) -> Result<Self, String> {
        raw.parse().map_err(|err: std::num::ParseIntError| err.to_string())
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn bind(slot: &mut Self) -> ScalarRef<'_> {
        ScalarRef::Int64(slot)
    }
}

impl Scalar for f64 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn parse_env(raw: &str) -> Result<Self, String> {
        raw.parse()
            .map_err(|err: std::num::ParseFloatError| err.to_string())
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn bind(slot: &mut Self) -> ScalarRef<'_> {
        ScalarRef::Float(slot)
    }
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn parse_env(raw: &str) -> Result<Self, String> {
        Ok(raw.to_owned())
    }

    fn render(&self) -> String {
        self.clone()
    }

    fn bind(slot: &mut Self) -> ScalarRef<'_> {
        ScalarRef::Str(slot)
    }
}

impl Scalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    /// `true` and `1` (any case) are true; everything else is false.
    fn parse_env(raw: &str) -> Result<Self, String> {
        Ok(raw.eq_ignore_ascii_case("true") || raw == "1")
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn bind(slot: &mut Self) -> ScalarRef<'_> {
        ScalarRef::Bool(slot)
    }
}

impl Scalar for TimeDelta {
    const KIND: ScalarKind = ScalarKind::Duration;

    fn parse_env(raw: &str) -> Result<Self, String> {
        duration::parse(raw).map_err(|err| err.to_string())
    }

    fn render(&self) -> String {
        duration::format(*self)
    }

    fn bind(slot: &mut Self) -> ScalarRef<'_> {
        ScalarRef::Duration(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("True", true)]
    #[case("1", true)]
    #[case("false", false)]
    #[case("yes", false)]
    #[case("", false)]
    fn bool_environment_values_never_fail(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(bool::parse_env(raw), Ok(expected));
    }

    #[rstest]
    fn integers_parse_base_ten() {
        assert_eq!(i32::parse_env("-42"), Ok(-42));
        assert_eq!(i64::parse_env("+123456789012"), Ok(123_456_789_012));
        assert!(i32::parse_env("0x10").is_err());
        assert!(i64::parse_env("seven").is_err());
    }

    #[rstest]
    fn references_report_their_kind() {
        let mut age = 7_i32;
        let mut name = String::from("John");
        let mut timeout = TimeDelta::seconds(90);
        assert_eq!(ScalarRef::from(&mut age).kind(), ScalarKind::Int);
        assert_eq!(ScalarRef::from(&mut name).render(), "John");
        let timeout_ref = ScalarRef::from(&mut timeout);
        assert_eq!(timeout_ref.kind(), ScalarKind::Duration);
        assert_eq!(timeout_ref.render(), "1m30s");
    }

    #[rstest]
    fn durations_keep_their_sign() {
        assert_eq!(TimeDelta::parse_env("-5s"), Ok(TimeDelta::seconds(-5)));
        assert_eq!(TimeDelta::seconds(-90).render(), "-1m30s");
    }
}
