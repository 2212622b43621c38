//! Conversion of decimal strings to `i64` without the standard library's
//! parser.
//!
//! This module is a standalone utility: nothing in [`crate::tree`]
//! depends on it, and it depends on nothing there — the two simply share
//! a crate. The conversion examines the string backwards, turning each
//! character into a digit and scaling it by a growing power of ten, and
//! reports malformed input and overflow as typed errors rather than
//! panicking.
//!
//! # Examples
//!
//! ```
//! use trinary::parse::{parse_long, ParseLongError};
//!
//! assert_eq!(parse_long("123"), Ok(123));
//! assert_eq!(parse_long("-123"), Ok(-123));
//! assert_eq!(parse_long("12a"), Err(ParseLongError::InvalidFormat));
//! assert_eq!(
//!     parse_long("9999999999999999999"),
//!     Err(ParseLongError::Overflow)
//! );
//! ```

use thiserror::Error;

/// The ways converting a string to an `i64` can fail.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseLongError {
    /// The input was empty, a bare sign, or contained a non-digit
    /// character.
    #[error("invalid digit found in string")]
    InvalidFormat,
    /// The accumulated magnitude does not fit in an `i64`.
    #[error("number too large to fit in target type")]
    Overflow,
}

/// Converts the given decimal string to an `i64`.
///
/// Accepts an optional leading `-` followed by one or more ASCII digits.
/// The magnitude is accumulated as a positive value and negated at the
/// end, so `i64::MIN` written out in full reports [`Overflow`] even
/// though the value itself is representable.
///
/// [`Overflow`]: ParseLongError::Overflow
///
/// # Examples
///
/// ```
/// use trinary::parse::parse_long;
///
/// assert_eq!(parse_long("0042"), Ok(42));
/// assert!(parse_long("").is_err());
/// ```
pub fn parse_long(text: &str) -> Result<i64, ParseLongError> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) if !rest.is_empty() => (true, rest),
        _ => (false, text),
    };
    if digits.is_empty() {
        return Err(ParseLongError::InvalidFormat);
    }

    let mut value: i64 = 0;
    let mut factor: i64 = 1;
    for byte in digits.bytes().rev() {
        if !byte.is_ascii_digit() {
            return Err(ParseLongError::InvalidFormat);
        }
        let digit = i64::from(byte - b'0');
        let term = factor.checked_mul(digit).ok_or(ParseLongError::Overflow)?;
        value = value.checked_add(term).ok_or(ParseLongError::Overflow)?;
        // A saturated factor still overflows the checked multiply above
        // for any non-zero digit, and zero digits contribute nothing, so
        // leading zeros of arbitrary length stay valid.
        factor = factor.saturating_mul(10);
    }

    Ok(if negative { -value } else { value })
}
