//! Case conversion for flag and environment variable names.
//!
//! Both conversions split an identifier on the same word boundaries: explicit
//! delimiters (`_`, `-`, spaces), lower-to-upper transitions, and the end of
//! an acronym run, so `FieldAPIKey` yields the words `Field`, `API`, `Key`.
//! The environment style is therefore always the flag style with its case
//! raised and hyphens replaced by underscores.

use heck::{ToKebabCase, ToShoutySnakeCase};

/// Converts an identifier into a command-line flag name.
///
/// # Examples
///
/// ```
/// use flagenv::naming::to_flag_style;
///
/// assert_eq!(to_flag_style("FieldAPIKey"), "field-api-key");
/// assert_eq!(to_flag_style("first_name"), "first-name");
/// ```
#[must_use]
pub fn to_flag_style(identifier: &str) -> String {
    identifier.to_kebab_case()
}

/// Converts an identifier into an environment variable name.
///
/// # Examples
///
/// ```
/// use flagenv::naming::to_env_style;
///
/// assert_eq!(to_env_style("FieldURLAddr"), "FIELD_URL_ADDR");
/// assert_eq!(to_env_style("addr-street"), "ADDR_STREET");
/// ```
#[must_use]
pub fn to_env_style(identifier: &str) -> String {
    identifier.to_shouty_snake_case()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::snake("SnakeCase", "snake-case", "SNAKE_CASE")]
    #[case::hyphen("Hyphen-Case", "hyphen-case", "HYPHEN_CASE")]
    #[case::underscore("Underscore_Case", "underscore-case", "UNDERSCORE_CASE")]
    #[case::api_key("FieldAPIKey", "field-api-key", "FIELD_API_KEY")]
    #[case::url_addr("FieldURLAddr", "field-url-addr", "FIELD_URL_ADDR")]
    #[case::http_server("FieldHTTPServer", "field-http-server", "FIELD_HTTP_SERVER")]
    #[case::rust_field("first_name", "first-name", "FIRST_NAME")]
    #[case::single_word("age", "age", "AGE")]
    #[case::prefixed("addr-street", "addr-street", "ADDR_STREET")]
    fn converts_identifiers(#[case] input: &str, #[case] flag: &str, #[case] env: &str) {
        assert_eq!(to_flag_style(input), flag);
        assert_eq!(to_env_style(input), env);
    }

    #[rstest]
    #[case("FieldAPIKey")]
    #[case("web_server_addr")]
    #[case("SNSTopicARN")]
    #[case("Hyphen-Case")]
    fn env_style_derives_from_flag_style(#[case] input: &str) {
        let derived = to_flag_style(input).to_uppercase().replace('-', "_");
        assert_eq!(to_env_style(input), derived);
    }

    #[rstest]
    #[case("FieldHTTPServer")]
    #[case("debug")]
    #[case("Underscore_Case")]
    fn conversions_are_idempotent(#[case] input: &str) {
        let flag = to_flag_style(input);
        assert_eq!(to_flag_style(&flag), flag);
        let env = to_env_style(input);
        assert_eq!(to_env_style(&env), env);
    }
}
