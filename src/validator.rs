//! Numeric input validation
//!
//! Converts untrusted query-string tokens into finite, in-range numbers,
//! or explains precisely why the conversion failed. Pure and deterministic:
//! no I/O, same input always yields the same outcome.

use crate::error::ApiError;
use crate::Result;
use serde::Serialize;
use std::fmt;

/// Default cap on accepted magnitude.
pub const MAX_NUMBER_MAGNITUDE: f64 = 1e100;

/// A validated number that remembers whether the caller wrote it in integer
/// or decimal form, so responses echo integers back as integers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidatedNumber {
    Int(i64),
    Float(f64),
}

impl ValidatedNumber {
    /// The value as a double, regardless of lexical form.
    pub fn value(&self) -> f64 {
        match self {
            ValidatedNumber::Int(i) => *i as f64,
            ValidatedNumber::Float(f) => *f,
        }
    }
}

impl fmt::Display for ValidatedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatedNumber::Int(i) => write!(f, "{}", i),
            ValidatedNumber::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Validate and convert a raw query parameter into a number.
///
/// Rules apply in order and short-circuit on the first failure:
/// present and non-empty, parses as a decimal literal, not NaN, not
/// infinite, magnitude within `max_magnitude`.
pub fn validate_number(raw: Option<&str>, max_magnitude: f64) -> Result<ValidatedNumber> {
    let raw = raw.unwrap_or("");
    if raw.is_empty() {
        return Err(ApiError::EmptyValue);
    }

    // Integer lexical form keeps its type for echoing; anything it cannot
    // represent (overflowing digits included) falls through to float parsing.
    if is_integer_literal(raw) {
        if let Ok(i) = raw.parse::<i64>() {
            if (i as f64).abs() > max_magnitude {
                return Err(ApiError::OutOfRange(max_magnitude));
            }
            return Ok(ValidatedNumber::Int(i));
        }
    }

    let num: f64 = raw
        .parse()
        .map_err(|_| ApiError::InvalidNumberFormat)?;

    if num.is_nan() {
        return Err(ApiError::NonFiniteValue(
            "Value is not a number (NaN)".to_string(),
        ));
    }

    if num.is_infinite() {
        return Err(ApiError::NonFiniteValue(
            "Value cannot be infinity".to_string(),
        ));
    }

    if num.abs() > max_magnitude {
        return Err(ApiError::OutOfRange(max_magnitude));
    }

    Ok(ValidatedNumber::Float(num))
}

/// Optional sign followed by digits only.
fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
