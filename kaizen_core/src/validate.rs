//! Shared parsing and range checks for user-supplied values.
//!
//! The low-level parsers return a [`ParseError`] describing what was wrong
//! with the text. The field helpers wrap that into the [`Error`] kind the
//! owning component reports, so a shell can parse a text box and surface the
//! same error the engine would.

use crate::{Error, Result};

/// Why a piece of user text was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("value is empty")]
    Empty,
    #[error("not a number")]
    NotANumber,
    #[error("not a whole number")]
    NotAnInteger,
    #[error("not a finite number")]
    NotFinite,
    #[error("must not be negative")]
    Negative,
    #[error("must be greater than zero")]
    NotPositive,
}

/// Parse a finite decimal number, ignoring surrounding whitespace
pub fn parse_number(raw: &str) -> std::result::Result<f64, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    let value: f64 = trimmed.parse().map_err(|_| ParseError::NotANumber)?;
    if !value.is_finite() {
        return Err(ParseError::NotFinite);
    }
    Ok(value)
}

/// Parse a signed whole number, ignoring surrounding whitespace
pub fn parse_integer(raw: &str) -> std::result::Result<i64, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    trimmed.parse().map_err(|_| ParseError::NotAnInteger)
}

/// Accept zero or any positive finite value
pub fn non_negative(value: f64) -> std::result::Result<f64, ParseError> {
    if !value.is_finite() {
        Err(ParseError::NotFinite)
    } else if value < 0.0 {
        Err(ParseError::Negative)
    } else {
        Ok(value)
    }
}

/// Accept only strictly positive finite values
pub fn positive(value: f64) -> std::result::Result<f64, ParseError> {
    if !value.is_finite() {
        Err(ParseError::NotFinite)
    } else if value <= 0.0 {
        Err(ParseError::NotPositive)
    } else {
        Ok(value)
    }
}

// ============================================================================
// Field helpers
// ============================================================================

/// Calorie quantity: a non-negative number
pub fn quantity(raw: &str) -> Result<f64> {
    parse_number(raw)
        .and_then(non_negative)
        .map_err(Error::InvalidQuantity)
}

/// Measurement such as weight, height or age: a positive number
pub fn measure(field: &str, raw: &str) -> Result<f64> {
    parse_number(raw)
        .and_then(positive)
        .map_err(|e| Error::InvalidInput(format!("{}: {}", field, e)))
}

/// Hours or liters already accumulated: zero or more
pub fn level(field: &str, raw: &str) -> Result<f64> {
    parse_number(raw)
        .and_then(non_negative)
        .map_err(|e| Error::InvalidInput(format!("{}: {}", field, e)))
}

/// Sleep or water increment: a positive number
pub fn amount(raw: &str) -> Result<f64> {
    parse_number(raw)
        .and_then(positive)
        .map_err(|e| Error::InvalidAmount(e.to_string()))
}

/// Largest session either brain game accepts
pub const MAX_COUNT: u32 = 1_000;

/// Game round count: a whole number in 1..=MAX_COUNT
pub fn count(raw: &str) -> Result<u32> {
    let value = parse_integer(raw).map_err(|e| Error::InvalidCount(e.to_string()))?;
    check_count(value)
}

/// Reminder period: a positive whole number of seconds
pub fn interval_seconds(raw: &str) -> Result<u64> {
    let value = parse_integer(raw).map_err(|e| Error::InvalidInterval(e.to_string()))?;
    check_interval(value)
}

/// Game answer: any whole number
pub fn answer(raw: &str) -> Result<i64> {
    parse_integer(raw).map_err(Error::InvalidAnswer)
}

pub(crate) fn check_count(value: i64) -> Result<u32> {
    if value <= 0 {
        return Err(Error::InvalidCount(ParseError::NotPositive.to_string()));
    }
    match u32::try_from(value) {
        Ok(count) if count <= MAX_COUNT => Ok(count),
        _ => Err(Error::InvalidCount(format!(
            "{} is more than the limit of {}",
            value, MAX_COUNT
        ))),
    }
}

pub(crate) fn check_interval(value: i64) -> Result<u64> {
    if value <= 0 {
        return Err(Error::InvalidInterval(ParseError::NotPositive.to_string()));
    }
    Ok(value as u64)
}

pub(crate) fn check_amount(value: f64) -> Result<f64> {
    positive(value).map_err(|e| Error::InvalidAmount(e.to_string()))
}
