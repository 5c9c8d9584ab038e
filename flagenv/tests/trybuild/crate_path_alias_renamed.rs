//! Trybuild fixture verifying `#[flagenv(crate = "...")]` works with a
//! dependency rename via `use ... as`.

use flagenv as my_flags;
use my_flags::FlagEnv;

/// Verifies that `#[flagenv(crate = "my_flags")]` generates code that
/// references types through the aliased name rather than `flagenv`.
#[derive(Debug, Default, FlagEnv)]
#[flagenv(crate = "my_flags")]
struct AliasedConfig {
    pub value: String,
    #[flagenv(nested)]
    pub inner: Inner,
}

#[derive(Debug, Default, FlagEnv)]
#[flagenv(crate = "my_flags")]
struct Inner {
    pub count: i32,
}

fn main() {
    let mut config = AliasedConfig::default();
    let env = std::collections::BTreeMap::<String, String>::new();
    let result = my_flags::load_from(&mut config, &env, ["prog"]);
    let _: Result<Vec<std::ffi::OsString>, my_flags::FlagEnvError> = result;
}
