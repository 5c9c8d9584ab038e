//! Recursive traversal binding every field of a configuration value.

use crate::env::{self, EnvSource};
use crate::error::FlagEnvError;
use crate::field::{EnvName, Field, FieldValue, FlagEnv, FlagName};
use crate::naming::{to_env_style, to_flag_style};
use crate::registrar::Registrar;
use crate::scalar::{Scalar, ScalarRef};

/// Registers a flag for every scalar field reachable from `config`.
///
/// `prefix` namespaces the generated flag names; pass `""` for none. Each
/// field's default is its current value, replaced by its environment variable
/// when that is set. Sub-structures contribute flags prefixed with the
/// parent's flag name in kebab-case unless they are flattened. A renamed
/// scalar keeps its name as written.
///
/// # Errors
///
/// Stops at the first failure, leaving already-registered flags in place.
/// The error is wrapped in one [`FlagEnvError::Field`] layer per level,
/// naming the fields on the path to the failure.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use flagenv::{FlagEnv, Registrar, walk};
///
/// #[derive(FlagEnv, Default)]
/// struct Server {
///     pub port: i32,
/// }
///
/// let env = HashMap::from([("SERVER_PORT".to_owned(), "8080".to_owned())]);
/// let mut server = Server::default();
/// let mut registrar = Registrar::new("app");
/// walk(&mut server, "Server", &env, &mut registrar)?;
/// assert!(registrar.flag("server-port").is_some());
/// drop(registrar);
/// assert_eq!(server.port, 8080);
/// # Ok::<(), flagenv::FlagEnvError>(())
/// ```
pub fn walk<'a>(
    config: &'a mut dyn FlagEnv,
    prefix: &str,
    env: &dyn EnvSource,
    registrar: &mut Registrar<'a>,
) -> Result<(), FlagEnvError> {
    let prefix = if prefix.is_empty() {
        String::new()
    } else {
        format!("{}-", to_flag_style(prefix))
    };
    walk_struct(config, &prefix, env, registrar)
}

fn walk_struct<'a>(
    config: &'a mut dyn FlagEnv,
    prefix: &str,
    env: &dyn EnvSource,
    registrar: &mut Registrar<'a>,
) -> Result<(), FlagEnvError> {
    for field in config.fields() {
        let ident = field.ident;
        walk_field(field, prefix, env, registrar).map_err(|err| err.in_field(ident))?;
    }
    Ok(())
}

fn walk_field<'a>(
    field: Field<'a>,
    prefix: &str,
    env: &dyn EnvSource,
    registrar: &mut Registrar<'a>,
) -> Result<(), FlagEnvError> {
    let flag_name = match field.flag {
        FlagName::Ignore => {
            tracing::trace!(field = field.ident, "skipping ignored field");
            return Ok(());
        }
        FlagName::Renamed(name) => format!("{prefix}{name}"),
        FlagName::Derived | FlagName::Flatten => {
            format!("{prefix}{}", to_flag_style(field.ident))
        }
    };

    match field.value {
        FieldValue::Nested(child) | FieldValue::OptionalNested(Some(child)) => {
            let child_prefix = if field.flag == FlagName::Flatten {
                String::new()
            } else {
                format!("{}-", to_flag_style(&flag_name))
            };
            walk_struct(child, &child_prefix, env, registrar)
        }
        FieldValue::OptionalNested(None) => {
            tracing::trace!(field = field.ident, "skipping absent sub-structure");
            Ok(())
        }
        FieldValue::Scalar(slot) => {
            let env_name = match field.env {
                EnvName::Derived => Some(to_env_style(&flag_name)),
                EnvName::Renamed(name) => Some(name.to_owned()),
                EnvName::Ignore => None,
            };
            tracing::debug!(
                field = field.ident,
                flag = %flag_name,
                env = ?env_name,
                "binding field"
            );
            bind_scalar(slot, &flag_name, env_name.as_deref(), field.usage, env, registrar)
        }
        FieldValue::Unsupported(type_name) => Err(FlagEnvError::UnsupportedType {
            type_name: type_name.to_owned(),
        }),
    }
}

/// Resolves the field's default and hands it to the registration call for
/// its kind.
fn bind_scalar<'a>(
    slot: ScalarRef<'a>,
    flag_name: &str,
    env_name: Option<&str>,
    usage: &str,
    env: &dyn EnvSource,
    registrar: &mut Registrar<'a>,
) -> Result<(), FlagEnvError> {
    match slot {
        ScalarRef::Int(slot) => {
            let default = resolve_default(env, env_name, *slot)?;
            registrar.register_int(slot, flag_name, default, usage)
        }
        ScalarRef::Int64(slot) => {
            let default = resolve_default(env, env_name, *slot)?;
            registrar.register_int64(slot, flag_name, default, usage)
        }
        ScalarRef::Float(slot) => {
            let default = resolve_default(env, env_name, *slot)?;
            registrar.register_float(slot, flag_name, default, usage)
        }
        ScalarRef::Str(slot) => {
            let default = resolve_default(env, env_name, slot.clone())?;
            registrar.register_string(slot, flag_name, default, usage)
        }
        ScalarRef::Bool(slot) => {
            let default = resolve_default(env, env_name, *slot)?;
            registrar.register_bool(slot, flag_name, default, usage)
        }
        ScalarRef::Duration(slot) => {
            let default = resolve_default(env, env_name, *slot)?;
            registrar.register_duration(slot, flag_name, default, usage)
        }
    }
}

fn resolve_default<T: Scalar>(
    env: &dyn EnvSource,
    env_name: Option<&str>,
    current: T,
) -> Result<T, FlagEnvError> {
    match env_name {
        Some(name) => env::resolve(env, name, current),
        None => Ok(current),
    }
}
