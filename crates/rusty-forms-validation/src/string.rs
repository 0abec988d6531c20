//! String validation functions
//!
//! Lengths are counted in Unicode scalar values, not bytes.

use once_cell::sync::Lazy;
use regex::Regex;

// Latin letters plus the Latin-1 supplement block
static ALPHA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-ZÀ-ÿ]+$").unwrap());

static ALPHA_NUM_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-ZÀ-ÿ0-9]+$").unwrap());

fn bound(length: &str) -> Option<usize> {
    length.trim().parse().ok()
}

pub fn char_length(value: &str) -> usize {
    value.chars().count()
}

/// Validates string length
pub fn min_length(value: &str, min: &str) -> bool {
    bound(min).is_some_and(|min| char_length(value) >= min)
}

pub fn max_length(value: &str, max: &str) -> bool {
    bound(max).is_some_and(|max| char_length(value) <= max)
}

/// Exact length
pub fn length(value: &str, length: &str) -> bool {
    bound(length).is_some_and(|length| char_length(value) == length)
}

pub fn is_alpha(value: &str) -> bool {
    ALPHA_REGEX.is_match(value)
}

pub fn is_alpha_num(value: &str) -> bool {
    ALPHA_NUM_REGEX.is_match(value)
}

/// Strict equality, no trimming or case folding
pub fn equals(value: &str, expected: &str) -> bool {
    value == expected
}
