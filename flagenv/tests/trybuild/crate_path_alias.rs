use flagenv::FlagEnv;

/// Verifies that `#[flagenv(crate = "flagenv")]` is accepted and the
/// generated code compiles. Uses the real crate name as a self-referential
/// alias so no workspace reconfiguration is needed.
#[derive(Debug, Default, FlagEnv)]
#[flagenv(crate = "flagenv")]
struct CratePathConfig {
    pub value: String,
    pub count: i32,
}

fn main() {
    let mut config = CratePathConfig::default();
    let env = std::collections::HashMap::<String, String>::new();
    let result = flagenv::load_from(&mut config, &env, ["prog", "--count", "1"]);
    let _: Result<Vec<std::ffi::OsString>, flagenv::FlagEnvError> = result;
}
