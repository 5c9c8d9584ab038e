//! Duration literals such as `1h30m`, `1.5s` and `300ms`.
//!
//! A literal is an optional sign followed by one or more decimal numbers, each
//! with a unit suffix: `ns`, `us` (or `µs`), `ms`, `s`, `m` or `h`. The bare
//! literal `0` needs no unit. Values are signed spans stored as
//! [`TimeDelta`] and limited to the `i64` nanosecond range.

use chrono::TimeDelta;
use thiserror::Error;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// Fraction digits beyond this many cannot change a nanosecond total.
const MAX_FRACTION_DIGITS: usize = 20;

/// Reasons a duration literal was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DurationError {
    /// The literal was empty.
    #[error("empty duration")]
    Empty,
    /// The literal did not follow the number-and-unit grammar.
    #[error("invalid duration {0:?}")]
    Invalid(String),
    /// A number was not followed by a unit.
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),
    /// A number was followed by an unrecognised unit.
    #[error("unknown unit {unit:?} in duration {text:?}")]
    UnknownUnit {
        /// The unrecognised unit.
        unit: String,
        /// The complete literal.
        text: String,
    },
    /// The literal exceeded the representable range.
    #[error("duration {0:?} overflows")]
    Overflow(String),
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

fn split_digits(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(end)
}

/// Scales `whole.fraction` by `scale` nanoseconds, truncating sub-nanosecond
/// remainders.
fn component(whole: &str, fraction: &str, scale: u128) -> Option<u128> {
    let whole_value = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().ok()?
    };
    let mut numerator: u128 = 0;
    let mut denominator: u128 = 1;
    for digit in fraction.bytes().take(MAX_FRACTION_DIGITS) {
        numerator = numerator * 10 + u128::from(digit - b'0');
        denominator *= 10;
    }
    whole_value
        .checked_mul(scale)?
        .checked_add(numerator.checked_mul(scale)? / denominator)
}

/// Parses a duration literal.
///
/// # Errors
///
/// Returns a [`DurationError`] when `text` is empty, malformed, uses an
/// unknown unit, or falls outside the `i64` nanosecond range.
///
/// # Examples
///
/// ```
/// use flagenv::TimeDelta;
/// use flagenv::duration::parse;
///
/// assert_eq!(parse("1h30m").ok(), Some(TimeDelta::seconds(5400)));
/// assert_eq!(parse("1.5s").ok(), Some(TimeDelta::milliseconds(1500)));
/// assert_eq!(parse("-5s").ok(), Some(TimeDelta::seconds(-5)));
/// assert!(parse("30").is_err());
/// ```
pub fn parse(text: &str) -> Result<TimeDelta, DurationError> {
    if text.is_empty() {
        return Err(DurationError::Empty);
    }
    let (negative, body) = match text.strip_prefix('-') {
        Some(unsigned) => (true, unsigned),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if body == "0" {
        return Ok(TimeDelta::zero());
    }
    if body.is_empty() {
        return Err(DurationError::Invalid(text.to_owned()));
    }

    let overflow = || DurationError::Overflow(text.to_owned());
    let mut total: u128 = 0;
    let mut rest = body;
    while !rest.is_empty() {
        let (whole, after_whole) = split_digits(rest);
        let (fraction, after_number) = match after_whole.strip_prefix('.') {
            Some(tail) => split_digits(tail),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(DurationError::Invalid(text.to_owned()));
        }
        let unit_end = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, tail) = after_number.split_at(unit_end);
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(text.to_owned()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_owned(),
            text: text.to_owned(),
        })?;
        let nanos = component(whole, fraction, scale).ok_or_else(overflow)?;
        total = total.checked_add(nanos).ok_or_else(overflow)?;
        rest = tail;
    }

    let magnitude = i128::try_from(total).map_err(|_| overflow())?;
    let signed = if negative { -magnitude } else { magnitude };
    let nanos = i64::try_from(signed).map_err(|_| overflow())?;
    Ok(TimeDelta::nanoseconds(nanos))
}

/// Renders `value / unit` as a decimal without trailing fraction zeros.
fn decimal(value: u128, unit: u128, width: usize) -> String {
    let whole = value / unit;
    let remainder = value % unit;
    if remainder == 0 {
        return whole.to_string();
    }
    let digits = format!("{remainder:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// Formats a duration using the literal grammar accepted by [`parse`].
///
/// # Examples
///
/// ```
/// use flagenv::TimeDelta;
/// use flagenv::duration::format;
///
/// assert_eq!(format(TimeDelta::seconds(5400)), "1h30m0s");
/// assert_eq!(format(TimeDelta::milliseconds(1500)), "1.5s");
/// assert_eq!(format(TimeDelta::seconds(-90)), "-1m30s");
/// assert_eq!(format(TimeDelta::zero()), "0s");
/// ```
#[must_use]
pub fn format(value: TimeDelta) -> String {
    // `subsec_nanos` carries the sign of the whole span.
    let total = i128::from(value.num_seconds()) * 1_000_000_000
        + i128::from(value.subsec_nanos());
    if total == 0 {
        return "0s".to_owned();
    }
    let sign = if total < 0 { "-" } else { "" };
    let nanos = total.unsigned_abs();
    if nanos < NANOS_PER_MICRO {
        return format!("{sign}{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{sign}{}µs", decimal(nanos, NANOS_PER_MICRO, 3));
    }
    if nanos < NANOS_PER_SECOND {
        return format!("{sign}{}ms", decimal(nanos, NANOS_PER_MILLI, 6));
    }

    let hours = nanos / NANOS_PER_HOUR;
    let minutes = (nanos % NANOS_PER_HOUR) / NANOS_PER_MINUTE;
    let seconds = nanos % NANOS_PER_MINUTE;
    let mut out = sign.to_owned();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&decimal(seconds, NANOS_PER_SECOND, 9));
    out.push('s');
    out
}
