//! Numeric validation functions
//!
//! Submitted values are strings; every check here coerces both the value and
//! the rule bound before comparing. A value or bound that is not numeric
//! fails the check.

use once_cell::sync::Lazy;
use regex::Regex;

// Decimal number with optional sign, fraction and exponent. Surrounding
// whitespace is tolerated.
static NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?\s*$").unwrap()
});

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());

/// True if the value reads as a number in any decimal form.
pub fn is_numeric(value: &str) -> bool {
    NUMERIC_REGEX.is_match(value)
}

/// Parse a numeric string into `f64`, `None` if it is not numeric.
pub fn to_number(value: &str) -> Option<f64> {
    if !is_numeric(value) {
        return None;
    }
    value.trim().parse::<f64>().ok()
}

/// Integer: optional sign followed by ASCII digits that fit in an `i64`.
///
/// Leading zeros are accepted (`"007"`); fractions and exponents are not,
/// even when they denote a whole number (`"12.0"`, `"1e3"`).
pub fn is_integer(value: &str) -> bool {
    let value = value.trim();
    INTEGER_REGEX.is_match(value) && value.parse::<i64>().is_ok()
}

/// Float: any numeric form that yields a finite `f64`.
pub fn is_float(value: &str) -> bool {
    to_number(value).is_some_and(f64::is_finite)
}

/// Validates minimum value
pub fn min(value: &str, min: &str) -> bool {
    match (to_number(value), to_number(min)) {
        (Some(value), Some(min)) => value >= min,
        _ => false,
    }
}

/// Validates maximum value
pub fn max(value: &str, max: &str) -> bool {
    match (to_number(value), to_number(max)) {
        (Some(value), Some(max)) => value <= max,
        _ => false,
    }
}

/// Validates value is within an inclusive range
pub fn between(value: &str, min: &str, max: &str) -> bool {
    match (to_number(value), to_number(min), to_number(max)) {
        (Some(value), Some(min), Some(max)) => value >= min && value <= max,
        _ => false,
    }
}
