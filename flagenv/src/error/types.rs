//! Primary error enum for configuration binding.

use clap::parser::MatchesError;
use thiserror::Error;

use crate::scalar::ScalarKind;

/// Errors that can occur while binding configuration.
///
/// Failures inside nested structures arrive wrapped in [`FlagEnvError::Field`]
/// layers, one per level, so the rendered message reads as a path such as
/// `field addr: field street: ...`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagEnvError {
    /// An environment variable did not match the grammar of its field's type.
    #[error("environment variable {name} has invalid {kind} value {value:?}: {reason}")]
    Parse {
        /// Environment variable consulted.
        name: String,
        /// Raw value found in the environment.
        value: String,
        /// Kind the value was parsed as.
        kind: ScalarKind,
        /// Parser diagnostic.
        reason: String,
    },

    /// A field's type has no registration path.
    #[error("unsupported field type {type_name}")]
    UnsupportedType {
        /// Name of the offending type as written in the struct.
        type_name: String,
    },

    /// A flag name that cannot be spelled on the command line, such as one
    /// starting with `-`.
    #[error("invalid flag name {name:?}")]
    InvalidFlagName {
        /// The rejected name.
        name: String,
    },

    /// Two fields resolved to the same flag name.
    #[error("flag redefined: {name}")]
    DuplicateFlag {
        /// The contested flag name.
        name: String,
    },

    /// Error parsing command-line arguments, including help requests.
    #[error("failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// A parsed flag value could not be read back from the matches.
    #[error("failed to read parsed value for flag {name}: {source}")]
    Matches {
        /// Flag whose value was requested.
        name: String,
        /// Underlying lookup failure.
        #[source]
        source: MatchesError,
    },

    /// Context layer naming the field whose processing failed.
    #[error("field {field}: {source}")]
    Field {
        /// Identifier of the failing field.
        field: &'static str,
        /// Failure inside the field.
        #[source]
        source: Box<FlagEnvError>,
    },
}

impl From<clap::Error> for FlagEnvError {
    fn from(err: clap::Error) -> Self {
        Self::CliParsing(Box::new(err))
    }
}
