//! Bind configuration structs to command-line flags and environment
//! variables.
//!
//! Every scalar field of a configuration struct becomes a flag named after the
//! field in kebab-case, with nested structures contributing prefixed names.
//! The value each field ends up with follows a fixed precedence:
//!
//! 1. the flag, when given on the command line;
//! 2. otherwise the environment variable named after the flag in
//!    `SCREAMING_SNAKE_CASE`, when set;
//! 3. otherwise the value the field held before loading.
//!
//! ```rust,no_run
//! use flagenv::{FlagEnv, TimeDelta};
//!
//! #[derive(FlagEnv)]
//! struct Config {
//!     /// Where the local web server listens.
//!     pub web_server_addr: String,
//!     #[flagenv(env = "-", usage = "turn on debug logging")]
//!     pub debug: bool,
//!     pub timeout: TimeDelta,
//! }
//!
//! let mut config = Config {
//!     web_server_addr: "127.0.0.1:8080".into(),
//!     debug: false,
//!     timeout: TimeDelta::seconds(30),
//! };
//! // `--web-server-addr` > `WEB_SERVER_ADDR` > "127.0.0.1:8080"
//! match flagenv::load(&mut config) {
//!     Ok(files) => println!("{} operands", files.len()),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

extern crate self as flagenv;

use std::ffi::OsString;
use std::path::Path;

pub use chrono::TimeDelta;
pub use flagenv_macros::FlagEnv;

pub mod duration;
pub mod env;
mod error;
mod field;
pub mod naming;
mod registrar;
mod scalar;
mod walker;

pub use env::{EnvSource, ProcessEnv};
pub use error::{FlagEnvError, is_display_request};
pub use field::{EnvName, Field, FieldValue, FlagEnv, FlagName, IGNORE};
pub use registrar::{FlagInfo, Registrar};
pub use scalar::{Scalar, ScalarKind, ScalarRef};
pub use walker::walk;

/// Program name used when the argument vector is empty.
const FALLBACK_PROGRAM: &str = "app";

/// Binds `config` to the process environment and command line, returning
/// the arguments left after the flags.
///
/// # Errors
///
/// Returns the first error raised while walking `config` or parsing the
/// process arguments. A `--help` request is reported as an error for which
/// [`FlagEnvError::is_display_request`] returns `true`.
pub fn load<T: FlagEnv>(config: &mut T) -> Result<Vec<OsString>, FlagEnvError> {
    load_from(config, &ProcessEnv, std::env::args_os())
}

/// Binds `config` to the given environment and argument vector.
///
/// `args` starts with the program name, as `std::env::args_os` does. Flag
/// parsing stops at the first argument that is not a flag or after a `--`
/// terminator, and the arguments from there on are returned.
///
/// # Errors
///
/// Returns the first error raised while walking `config` or parsing `args`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use flagenv::FlagEnv;
///
/// #[derive(FlagEnv, Default)]
/// struct Swimmer {
///     pub age: i32,
///     pub swimmer: bool,
/// }
///
/// let env = HashMap::from([("SWIMMER".to_owned(), "true".to_owned())]);
/// let mut config = Swimmer::default();
/// let rest = flagenv::load_from(&mut config, &env, ["cmd", "-age", "7", "lanes.txt"])?;
/// assert_eq!(config.age, 7);
/// assert!(config.swimmer);
/// assert_eq!(rest, ["lanes.txt"]);
/// # Ok::<(), flagenv::FlagEnvError>(())
/// ```
pub fn load_from<T, I, A>(
    config: &mut T,
    env: &dyn EnvSource,
    args: I,
) -> Result<Vec<OsString>, FlagEnvError>
where
    T: FlagEnv,
    I: IntoIterator<Item = A>,
    A: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = args
        .first()
        .and_then(|arg| Path::new(arg).file_name())
        .map_or_else(
            || FALLBACK_PROGRAM.to_owned(),
            |name| name.to_string_lossy().into_owned(),
        );
    let mut registrar = Registrar::new(program);
    walk(config, "", env, &mut registrar)?;
    registrar.parse_all(args)?;
    Ok(registrar.into_args())
}
