//! Reusable field validators
//!
//! Each validator receives the raw submitted value (`None` when the field was
//! not submitted at all) and returns the configured message on failure.

use regex::Regex;
use std::sync::LazyLock;

/// Amounts with at most two fractional digits, e.g. `10`, `10.5`, `10.50`
static CURRENCY_PRECISION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").expect("valid currency regex"));

/// Parse a submitted amount the way a browser number coercion would
///
/// Surrounding whitespace is ignored and an empty string counts as absent.
/// Only decimal notation is accepted: hex literals such as `0x10` and
/// non-finite values (`Infinity`, `NaN`) are not amounts.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Validator: field is present and non-empty
pub fn required(
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |value: Option<&str>| match value {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(message.to_string()),
    }
}

/// Validator: field parses as a number strictly greater than zero
pub fn positive_amount(
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |value: Option<&str>| match value.and_then(parse_amount) {
        Some(n) if n > 0.0 => Ok(()),
        _ => Err(message.to_string()),
    }
}

/// Validator: at most two fractional digits
///
/// Absent values pass; pair with [`required`] or [`positive_amount`].
pub fn currency_precision(
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |value: Option<&str>| match value {
        Some(v) if !CURRENCY_PRECISION.is_match(v.trim()) => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: value is one of the allowed strings
///
/// Absent values pass; pair with [`required`].
pub fn one_of(
    allowed: &'static [&'static str],
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |value: Option<&str>| match value {
        Some(v) if !allowed.contains(&v) => Err(message.to_string()),
        _ => Ok(()),
    }
}
