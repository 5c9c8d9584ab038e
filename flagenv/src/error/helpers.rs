//! Helpers for inspecting and decorating [`FlagEnvError`] values.

use clap::{Error as ClapError, error::ErrorKind};

use super::FlagEnvError;

/// Returns `true` when a [`clap::Error`] corresponds to `--help` or
/// `--version`.
///
/// Entry points can delegate to [`clap::Error::exit`] for these requests to
/// print the text and keep the expected zero exit status.
#[must_use]
pub fn is_display_request(err: &ClapError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

impl FlagEnvError {
    /// Wraps `self` in a context layer naming `field`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagenv::FlagEnvError;
    ///
    /// let err = FlagEnvError::DuplicateFlag { name: "street".into() }
    ///     .in_field("street")
    ///     .in_field("addr");
    /// assert_eq!(err.to_string(), "field addr: field street: flag redefined: street");
    /// ```
    #[must_use]
    pub fn in_field(self, field: &'static str) -> Self {
        Self::Field {
            field,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error beneath any field context layers.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::Field { source, .. } = current {
            current = source;
        }
        current
    }

    /// Returns the field identifiers leading to the failure, outermost first.
    #[must_use]
    pub fn field_path(&self) -> Vec<&'static str> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::Field { field, source } = current {
            path.push(*field);
            current = source;
        }
        path
    }

    /// Returns `true` when the error is a help or version request rather
    /// than a failure.
    #[must_use]
    pub fn is_display_request(&self) -> bool {
        matches!(self.root_cause(), Self::CliParsing(err) if is_display_request(err))
    }
}
