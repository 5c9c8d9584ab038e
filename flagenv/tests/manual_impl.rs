//! Hand-written `FlagEnv` implementations.
//!
//! Types that cannot use the derive, such as those with private storage,
//! describe their fields directly.

use anyhow::{Result, anyhow, ensure};
use flagenv::{EnvName, Field, FieldValue, FlagEnv, FlagEnvError, FlagName, ScalarRef, TimeDelta};
use rstest::rstest;
use test_helpers::table::{argv, env_table};

#[derive(Debug, Default)]
struct Limits {
    burst: i64,
    window: TimeDelta,
}

impl FlagEnv for Limits {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("burst", FieldValue::Scalar(ScalarRef::from(&mut self.burst)))
                .usage("requests allowed in one window"),
            Field::new("window", FieldValue::Scalar(ScalarRef::from(&mut self.window)))
                .env(EnvName::Renamed("RATE_WINDOW")),
        ]
    }
}

#[derive(Debug, Default)]
struct Service {
    host: String,
    limits: Limits,
    fallback: Option<Limits>,
}

impl FlagEnv for Service {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("host", FieldValue::Scalar(ScalarRef::from(&mut self.host)))
                .flag(FlagName::Renamed("hostname")),
            Field::new("limits", FieldValue::Nested(&mut self.limits)),
            Field::new(
                "fallback",
                FieldValue::OptionalNested(self.fallback.as_mut().map(|v| v as &mut dyn FlagEnv)),
            ),
        ]
    }
}

#[rstest]
fn manual_descriptors_bind_like_derived_ones() -> Result<()> {
    let mut service = Service {
        fallback: Some(Limits::default()),
        ..Service::default()
    };
    let env = env_table([
        ("HOSTNAME", "example.org"),
        ("RATE_WINDOW", "90s"),
        ("FALLBACK_BURST", "5"),
    ]);
    flagenv::load_from(&mut service, &env, argv(["--limits-burst", "100"]))?;
    ensure!(service.host == "example.org");
    ensure!(service.limits.burst == 100);
    ensure!(service.limits.window == TimeDelta::seconds(90));
    let fallback = service.fallback.as_ref();
    ensure!(fallback.is_some_and(|limits| limits.burst == 5), "{fallback:?}");
    ensure!(
        fallback.is_some_and(|limits| limits.window == TimeDelta::seconds(90)),
        "renamed variables are shared: {fallback:?}"
    );
    Ok(())
}

#[rstest]
fn descriptors_follow_declaration_order() {
    let mut service = Service::default();
    let described: Vec<(&'static str, FlagName)> = service
        .fields()
        .iter()
        .map(|field| (field.ident, field.flag))
        .collect();
    assert_eq!(
        described,
        [
            ("host", FlagName::Renamed("hostname")),
            ("limits", FlagName::Derived),
            ("fallback", FlagName::Derived),
        ]
    );
}

struct DashedName {
    verbose: bool,
}

impl FlagEnv for DashedName {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("verbose", FieldValue::Scalar(ScalarRef::from(&mut self.verbose)))
                .flag(FlagName::from_annotation("-v")),
        ]
    }
}

#[rstest]
fn dash_prefixed_names_fail_instead_of_reaching_clap() -> Result<()> {
    let mut config = DashedName { verbose: false };
    let Err(err) = flagenv::load_from(&mut config, &env_table([]), argv(["-v"])) else {
        return Err(anyhow!("expected an invalid flag name error"));
    };
    ensure!(err.field_path() == ["verbose"], "{err}");
    ensure!(
        matches!(err.root_cause(), FlagEnvError::InvalidFlagName { name } if name == "-v"),
        "{err:?}"
    );
    Ok(())
}
