//! In-memory environment tables.

use std::collections::HashMap;

/// Builds an environment table from `(name, value)` pairs.
///
/// # Examples
/// ```
/// use test_helpers::table;
///
/// let vars = table::env_table([("SWIMMER", "true")]);
/// assert_eq!(vars.get("SWIMMER").map(String::as_str), Some("true"));
/// ```
#[must_use]
pub fn env_table<'a, I>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .collect()
}

/// Builds an argument vector with a fixed program name in front.
///
/// # Examples
/// ```
/// use test_helpers::table;
///
/// assert_eq!(table::argv(["--age", "7"]), vec!["cmd", "--age", "7"]);
/// ```
#[must_use]
pub fn argv<'a, I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    std::iter::once("cmd")
        .chain(args)
        .map(str::to_owned)
        .collect()
}
