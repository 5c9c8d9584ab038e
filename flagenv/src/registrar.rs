//! Flag registration and command-line parsing.
//!
//! A [`Registrar`] owns one binding per flag: the flag's metadata plus a
//! mutable reference to the field that stores its value. Registering a flag
//! writes its default into the field straight away; [`Registrar::parse_all`]
//! later overwrites only the fields whose flags appear on the command line.
//! Parsing is delegated to `clap`. It stops at the first argument that is not
//! a flag or at a `--` terminator; everything from there on is kept as the
//! remaining arguments.

use std::ffi::{OsStr, OsString};

use chrono::TimeDelta;
use clap::builder::BoolishValueParser;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

use crate::duration;
use crate::error::FlagEnvError;
use crate::scalar::{Scalar, ScalarKind, ScalarRef};

/// Id of the catch-all positional argument. The `=` keeps it apart from every
/// valid flag name.
const REMAINING: &str = "=remaining";

/// Metadata describing a registered flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagInfo {
    /// Flag name, used as `--name` on the command line.
    pub name: String,
    /// Help text.
    pub usage: String,
    /// Kind of value the flag carries.
    pub kind: ScalarKind,
    /// Default value rendered in flag syntax.
    pub default: String,
}

#[derive(Debug)]
struct Binding<'a> {
    info: FlagInfo,
    slot: ScalarRef<'a>,
}

/// A set of flags bound to configuration fields.
///
/// The registrar borrows every bound field for `'a`; drop it to regain
/// access to the configuration value.
///
/// # Examples
///
/// ```
/// use flagenv::Registrar;
///
/// let mut age = 0;
/// let mut registrar = Registrar::new("app");
/// registrar.register_int(&mut age, "age", 18, "age in years")?;
/// registrar.parse_all(["app", "--age", "7", "input.txt"])?;
/// assert_eq!(registrar.args(), ["input.txt"]);
/// drop(registrar);
/// assert_eq!(age, 7);
/// # Ok::<(), flagenv::FlagEnvError>(())
/// ```
#[derive(Debug)]
pub struct Registrar<'a> {
    name: String,
    bindings: Vec<Binding<'a>>,
    remaining: Vec<OsString>,
}

impl<'a> Registrar<'a> {
    /// Creates an empty registrar for a program called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: Vec::new(),
            remaining: Vec::new(),
        }
    }

    /// Program name shown in help output.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binds `slot` to the flag `name`, storing `default` in it.
    ///
    /// # Errors
    ///
    /// Returns [`FlagEnvError::InvalidFlagName`] if `name` is empty, starts
    /// with `-`, or contains `=` or whitespace, and
    /// [`FlagEnvError::DuplicateFlag`] if `name` is already bound.
    pub fn register<T: Scalar>(
        &mut self,
        slot: &'a mut T,
        name: &str,
        default: T,
        usage: &str,
    ) -> Result<(), FlagEnvError> {
        if !is_valid_name(name) {
            return Err(FlagEnvError::InvalidFlagName {
                name: name.to_owned(),
            });
        }
        if self.flag(name).is_some() {
            return Err(FlagEnvError::DuplicateFlag {
                name: name.to_owned(),
            });
        }
        let info = FlagInfo {
            name: name.to_owned(),
            usage: usage.to_owned(),
            kind: T::KIND,
            default: default.render(),
        };
        *slot = default;
        tracing::debug!(flag = name, kind = %T::KIND, default = %info.default, "registered flag");
        self.bindings.push(Binding {
            info,
            slot: T::bind(slot),
        });
        Ok(())
    }

    /// Binds an `i32` field.
    ///
    /// # Errors
    ///
    /// Returns [`FlagEnvError::DuplicateFlag`] if `name` is already bound.
    pub fn register_int(
        &mut self,
        slot: &'a mut i32,
        name: &str,
        default: i32,
        usage: &str,
    ) -> Result<(), FlagEnvError> {
        self.register(slot, name, default, usage)
    }

    /// Binds an `i64` field.
    ///
    /// # Errors
    ///
    /// Returns [`FlagEnvError::DuplicateFlag`] if `name` is already bound.
    pub fn register_int64(
        &mut self,
        slot: &'a mut i64,
        name: &str,
        default: i64,
        usage: &str,
    ) -> Result<(), FlagEnvError> {
        self.register(slot, name, default, usage)
    }

    /// Binds an `f64` field.
    ///
    /// # Errors
    ///
    /// Returns [`FlagEnvError::DuplicateFlag`] if `name` is already bound.
    pub fn register_float(
        &mut self,
        slot: &'a mut f64,
        name: &str,
        default: f64,
        usage: &str,
    ) -> Result<(), FlagEnvError> {
        self.register(slot, name, default, usage)
    }

    /// Binds a `String` field.
    ///
    /// # Errors
    ///
    /// Returns [`FlagEnvError::DuplicateFlag`] if `name` is already bound.
    pub fn register_string(
        &mut self,
        slot: &'a mut String,
        name: &str,
        default: String,
        usage: &str,
    ) -> Result<(), FlagEnvError> {
        self.register(slot, name, default, usage)
    }

    /// Binds a `bool` field.
    ///
    /// # Errors
    ///
    /// Returns [`FlagEnvError::DuplicateFlag`] if `name` is already bound.
    pub fn register_bool(
        &mut self,
        slot: &'a mut bool,
        name: &str,
        default: bool,
        usage: &str,
    ) -> Result<(), FlagEnvError> {
        self.register(slot, name, default, usage)
    }

    /// Binds a [`TimeDelta`] field.
    ///
    /// # Errors
    ///
    /// Returns [`FlagEnvError::DuplicateFlag`] if `name` is already bound.
    pub fn register_duration(
        &mut self,
        slot: &'a mut TimeDelta,
        name: &str,
        default: TimeDelta,
        usage: &str,
    ) -> Result<(), FlagEnvError> {
        self.register(slot, name, default, usage)
    }

    /// Registered flags in registration order.
    pub fn flags(&self) -> impl Iterator<Item = &FlagInfo> {
        self.bindings.iter().map(|binding| &binding.info)
    }

    /// Looks up a registered flag by name.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<&FlagInfo> {
        self.flags().find(|info| info.name == name)
    }

    /// Number of registered flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` when no flags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Arguments left over by the last [`Registrar::parse_all`]: everything
    /// from the first non-flag argument, or after a `--` terminator.
    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.remaining
    }

    /// Consumes the registrar, releasing its borrows, and returns the
    /// remaining arguments.
    #[must_use]
    pub fn into_args(self) -> Vec<OsString> {
        self.remaining
    }

    /// Builds the `clap` command describing every registered flag.
    #[must_use]
    pub fn command(&self) -> Command {
        let mut command = Command::new(self.name.clone())
            .disable_help_flag(true)
            .args_override_self(true);
        for binding in &self.bindings {
            command = command.arg(flag_arg(&binding.info));
        }
        if self.flag("help").is_none() {
            let mut help = Arg::new("help")
                .long("help")
                .action(ArgAction::Help)
                .help("Print help");
            if self.flag("h").is_none() {
                help = help.short('h');
            }
            command = command.arg(help);
        }
        command.arg(
            Arg::new(REMAINING)
                .value_name("ARGS")
                .value_parser(value_parser!(OsString))
                .num_args(0..)
                .action(ArgAction::Append)
                .trailing_var_arg(true),
        )
    }

    /// Renders the help text for the registered flags.
    #[must_use]
    pub fn render_help(&self) -> String {
        self.command().render_help().to_string()
    }

    /// Parses `args` and stores every flag given on the command line in its
    /// field. `args` starts with the program name.
    ///
    /// Single-dash spellings of registered flags (`-age 7`) are accepted
    /// alongside the double-dash form. Flag parsing stops at the first
    /// argument that is not a flag; it and everything after it are kept
    /// verbatim in [`Registrar::args`]. A `--` terminator is dropped and the
    /// arguments after it are kept the same way.
    ///
    /// # Errors
    ///
    /// Returns [`FlagEnvError::CliParsing`] when `clap` rejects the arguments
    /// or a help request is encountered.
    pub fn parse_all<I, T>(&mut self, args: I) -> Result<(), FlagEnvError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = self.normalise(args.into_iter().map(Into::into));
        let mut matches = self.command().try_get_matches_from(args)?;
        let mut overrides = 0_usize;
        for binding in &mut self.bindings {
            let name = binding.info.name.as_str();
            let applied = match &mut binding.slot {
                ScalarRef::Int(slot) => take(&mut matches, name, &mut **slot)?,
                ScalarRef::Int64(slot) => take(&mut matches, name, &mut **slot)?,
                ScalarRef::Float(slot) => take(&mut matches, name, &mut **slot)?,
                ScalarRef::Str(slot) => take(&mut matches, name, &mut **slot)?,
                ScalarRef::Bool(slot) => take(&mut matches, name, &mut **slot)?,
                ScalarRef::Duration(slot) => take(&mut matches, name, &mut **slot)?,
            };
            if applied {
                overrides += 1;
            }
        }
        self.remaining = matches
            .try_remove_many::<OsString>(REMAINING)
            .map_err(|source| FlagEnvError::Matches {
                name: REMAINING.to_owned(),
                source,
            })?
            .map(Iterator::collect)
            .unwrap_or_default();
        tracing::debug!(
            overrides,
            remaining = self.remaining.len(),
            "parsed command-line arguments"
        );
        Ok(())
    }

    fn normalise(&self, mut args: impl Iterator<Item = OsString>) -> Vec<OsString> {
        let mut out = Vec::new();
        if let Some(program) = args.next() {
            out.push(program);
        }
        let mut expect_value = false;
        let mut passthrough = false;
        for arg in args {
            if passthrough || expect_value {
                expect_value = false;
                out.push(arg);
                continue;
            }
            if arg == "--" || !is_flag_like(&arg) {
                passthrough = true;
                out.push(arg);
                continue;
            }
            let (rewritten, takes_value) = self.long_form(arg);
            expect_value = takes_value;
            out.push(rewritten);
        }
        out
    }

    /// Rewrites a registered flag token into its `--name` form and reports
    /// whether the next token is its value.
    fn long_form(&self, arg: OsString) -> (OsString, bool) {
        let Some(text) = arg.to_str() else {
            return (arg, false);
        };
        let Some(body) = text
            .strip_prefix("--")
            .or_else(|| text.strip_prefix('-'))
        else {
            return (arg, false);
        };
        let (name, inline_value) = match body.split_once('=') {
            Some((name, _)) => (name, true),
            None => (body, false),
        };
        let Some(info) = self.flag(name) else {
            return (arg, false);
        };
        let takes_value = !inline_value && info.kind != ScalarKind::Bool;
        (OsString::from(format!("--{body}")), takes_value)
    }
}

/// `true` for tokens that start with `-` and are longer than the bare `-`.
fn is_flag_like(arg: &OsStr) -> bool {
    let bytes = arg.as_encoded_bytes();
    bytes.len() > 1 && bytes.first() == Some(&b'-')
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.contains(|c: char| c == '=' || c.is_whitespace())
}

fn flag_arg(info: &FlagInfo) -> Arg {
    let help = match (info.usage.is_empty(), info.default.is_empty()) {
        (_, true) => info.usage.clone(),
        (true, false) => format!("[default: {}]", info.default),
        (false, false) => format!("{} [default: {}]", info.usage, info.default),
    };
    let arg = Arg::new(info.name.clone())
        .long(info.name.clone())
        .help(help)
        .value_name(info.kind.label().to_uppercase())
        .action(ArgAction::Set);
    match info.kind {
        ScalarKind::Int => arg
            .value_parser(value_parser!(i32))
            .allow_negative_numbers(true),
        ScalarKind::Int64 => arg
            .value_parser(value_parser!(i64))
            .allow_negative_numbers(true),
        ScalarKind::Float => arg
            .value_parser(value_parser!(f64))
            .allow_negative_numbers(true),
        ScalarKind::String => arg
            .value_parser(value_parser!(String))
            .allow_hyphen_values(true),
        ScalarKind::Bool => arg
            .value_parser(BoolishValueParser::new())
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true"),
        ScalarKind::Duration => arg
            .value_parser(duration::parse)
            .allow_hyphen_values(true),
    }
}

/// Moves the parsed value for `name`, if any, into `slot`.
fn take<T>(matches: &mut ArgMatches, name: &str, slot: &mut T) -> Result<bool, FlagEnvError>
where
    T: Clone + Send + Sync + 'static,
{
    let value = matches
        .try_remove_one::<T>(name)
        .map_err(|source| FlagEnvError::Matches {
            name: name.to_owned(),
            source,
        })?;
    Ok(value.map(|parsed| *slot = parsed).is_some())
}
