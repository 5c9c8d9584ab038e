//! Environment variable lookup and coercion.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::error::FlagEnvError;
use crate::scalar::Scalar;

/// A table of environment variables.
pub trait EnvSource {
    /// Returns the value of `name`, or `None` when it is not set.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// The process environment.
///
/// Lookups are case-sensitive. Variables whose value is not valid UTF-8 are
/// treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

/// Returns the value of `name` parsed as `T`, or `default` when `name` is
/// unset.
///
/// # Errors
///
/// Returns [`FlagEnvError::Parse`] when the variable is set but does not
/// match `T`'s grammar. Booleans and strings never fail.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use flagenv::env::resolve;
///
/// let env = HashMap::from([("AGE".to_owned(), "7".to_owned())]);
/// assert_eq!(resolve(&env, "AGE", 0_i32).ok(), Some(7));
/// assert_eq!(resolve(&env, "HEIGHT", 180_i32).ok(), Some(180));
/// ```
pub fn resolve<T: Scalar>(env: &dyn EnvSource, name: &str, default: T) -> Result<T, FlagEnvError> {
    let Some(raw) = env.lookup(name) else {
        return Ok(default);
    };
    match T::parse_env(&raw) {
        Ok(value) => {
            tracing::debug!(env = name, kind = %T::KIND, "environment overrides default");
            Ok(value)
        }
        Err(reason) => Err(FlagEnvError::Parse {
            name: name.to_owned(),
            value: raw,
            kind: T::KIND,
            reason,
        }),
    }
}
