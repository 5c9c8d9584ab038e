//! Field descriptors produced by [`FlagEnv`] implementations.
//!
//! A descriptor pairs a field's identifier and annotations with a mutable
//! reference to its storage. `#[derive(FlagEnv)]` generates the descriptor
//! table; hand-written implementations build the same [`Field`] values
//! directly.

use std::fmt;

use crate::error::FlagEnvError;
use crate::scalar::ScalarRef;

/// Annotation value that disables a binding.
pub const IGNORE: &str = "-";

/// Types whose fields can be bound to flags and environment variables.
///
/// # Examples
///
/// ```
/// use flagenv::{Field, FieldValue, FlagEnv, ScalarRef};
///
/// struct Server {
///     port: i32,
/// }
///
/// impl FlagEnv for Server {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![Field::new("port", FieldValue::Scalar(ScalarRef::from(&mut self.port)))]
///     }
/// }
/// ```
pub trait FlagEnv {
    /// Describes every accessible field in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;

    /// Binds `self` to the process environment and arguments, returning the
    /// arguments left after the flags.
    ///
    /// # Errors
    ///
    /// See [`crate::load`].
    fn load(&mut self) -> Result<Vec<std::ffi::OsString>, FlagEnvError>
    where
        Self: Sized,
    {
        crate::load(self)
    }
}

/// How a field's flag name is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagName {
    /// Derive the name from the field identifier.
    #[default]
    Derived,
    /// Use this suffix verbatim after the parent prefix.
    Renamed(&'static str),
    /// An explicit empty name: descendants of a nested field get no prefix.
    /// Scalars fall back to the derived name.
    Flatten,
    /// Skip the field for both flags and environment lookup.
    Ignore,
}

impl FlagName {
    /// Interprets a `flag` annotation: `"-"` ignores, `""` flattens, anything
    /// else renames.
    #[must_use]
    pub fn from_annotation(annotation: &'static str) -> Self {
        match annotation {
            IGNORE => Self::Ignore,
            "" => Self::Flatten,
            name => Self::Renamed(name),
        }
    }
}

/// How a field's environment variable name is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvName {
    /// Derive the name from the flag name.
    #[default]
    Derived,
    /// Consult this variable instead.
    Renamed(&'static str),
    /// Never consult the environment for this field.
    Ignore,
}

impl EnvName {
    /// Interprets an `env` annotation: `"-"` and `""` disable lookup,
    /// anything else renames.
    #[must_use]
    pub fn from_annotation(annotation: &'static str) -> Self {
        match annotation {
            IGNORE | "" => Self::Ignore,
            name => Self::Renamed(name),
        }
    }
}

/// Storage shape of a field.
pub enum FieldValue<'a> {
    /// A scalar leaf.
    Scalar(ScalarRef<'a>),
    /// An inline or boxed sub-structure.
    Nested(&'a mut dyn FlagEnv),
    /// An optional sub-structure; `None` is skipped.
    OptionalNested(Option<&'a mut dyn FlagEnv>),
    /// A field whose type cannot be bound, carrying the type's name.
    Unsupported(&'static str),
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(slot) => f.debug_tuple("Scalar").field(slot).finish(),
            Self::Nested(_) => f.write_str("Nested(..)"),
            Self::OptionalNested(None) => f.write_str("OptionalNested(None)"),
            Self::OptionalNested(Some(_)) => f.write_str("OptionalNested(Some(..))"),
            Self::Unsupported(type_name) => f.debug_tuple("Unsupported").field(type_name).finish(),
        }
    }
}

/// Descriptor for one field of a [`FlagEnv`] type.
#[derive(Debug)]
pub struct Field<'a> {
    /// Field identifier as declared.
    pub ident: &'static str,
    /// Flag name override.
    pub flag: FlagName,
    /// Environment variable override.
    pub env: EnvName,
    /// Help text shown for the flag.
    pub usage: &'static str,
    /// Reference to the field's storage.
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    /// Creates a descriptor with derived names and no usage text.
    #[must_use]
    pub const fn new(ident: &'static str, value: FieldValue<'a>) -> Self {
        Self {
            ident,
            flag: FlagName::Derived,
            env: EnvName::Derived,
            usage: "",
            value,
        }
    }

    /// Sets the flag name override.
    #[must_use]
    pub fn flag(self, flag: FlagName) -> Self {
        Self { flag, ..self }
    }

    /// Sets the environment variable override.
    #[must_use]
    pub fn env(self, env: EnvName) -> Self {
        Self { env, ..self }
    }

    /// Sets the help text.
    #[must_use]
    pub fn usage(self, usage: &'static str) -> Self {
        Self { usage, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("-", FlagName::Ignore)]
    #[case("", FlagName::Flatten)]
    #[case("postcode", FlagName::Renamed("postcode"))]
    fn interprets_flag_annotations(#[case] annotation: &'static str, #[case] expected: FlagName) {
        assert_eq!(FlagName::from_annotation(annotation), expected);
    }

    #[rstest]
    #[case("-", EnvName::Ignore)]
    #[case("", EnvName::Ignore)]
    #[case("APP_PORT", EnvName::Renamed("APP_PORT"))]
    fn interprets_env_annotations(#[case] annotation: &'static str, #[case] expected: EnvName) {
        assert_eq!(EnvName::from_annotation(annotation), expected);
    }

    #[rstest]
    fn builder_sets_annotations() {
        let mut port = 8080;
        let field = Field::new("port", FieldValue::Scalar(ScalarRef::from(&mut port)))
            .flag(FlagName::Renamed("listen-port"))
            .env(EnvName::Ignore)
            .usage("port to listen on");
        assert_eq!(field.flag, FlagName::Renamed("listen-port"));
        assert_eq!(field.env, EnvName::Ignore);
        assert_eq!(field.usage, "port to listen on");
    }
}
