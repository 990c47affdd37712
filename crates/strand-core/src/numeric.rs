//! # Numeric Text Scanners
//!
//! Integer and real parsers for values typed at configuration prompts
//! or carried in telemetry parameters. Constrained builds of the agent
//! cannot assume a full numeric-parsing runtime, so both scanners walk
//! the input a byte at a time and allocate nothing.
//!
//! ## Scanning Rules
//!
//! - [`parse_integer`] scans digits from the least-significant end with
//!   place-value accumulation. A single leading `+` or `-` is accepted;
//!   any other non-digit byte is an error. Arithmetic is checked, so
//!   values outside `i64` report [`NumericError::OutOfRange`] instead
//!   of wrapping.
//! - [`parse_real`] accepts an optional leading sign, an integer part,
//!   a fractional part accumulated against a running denominator, and
//!   an `e`/`E` exponent with its own optional sign. The exponent is
//!   applied by repeated multiplication or division by 10. When the
//!   exponent magnitude is at least the number of fractional digits the
//!   mathematical value is a whole number, so the result is rounded to
//!   the nearest integer to cancel the drift the repeated
//!   multiplication introduces.

use thiserror::Error;

/// Exponents past this magnitude are saturated before the scaling loop
/// runs; the result has already collapsed to zero or infinity.
const EXPONENT_LIMIT: i32 = 350;

/// Error from the numeric scanners.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// The text is empty or contains a byte with no numeric meaning in
    /// its position.
    #[error("invalid number")]
    Malformed,

    /// The value does not fit in a 64-bit signed integer.
    #[error("number out of range")]
    OutOfRange,
}

/// Parse a decimal integer from text.
///
/// Digits are consumed from the least-significant end, each multiplied
/// by its place value. The first byte may be `+` or `-`.
///
/// # Errors
///
/// [`NumericError::Malformed`] for empty input, a sign with no digits,
/// or any byte that is neither a digit nor a leading sign.
/// [`NumericError::OutOfRange`] when the magnitude exceeds `i64`.
pub fn parse_integer(text: &str) -> Result<i64, NumericError> {
    let bytes = text.as_bytes();
    let mut value: i64 = 0;
    let mut place: i64 = 1;
    let mut place_overflow = false;
    let mut negative = false;
    let mut digits = 0usize;

    for idx in (0..bytes.len()).rev() {
        match bytes[idx] {
            b @ b'0'..=b'9' => {
                let digit = i64::from(b - b'0');
                if digit != 0 {
                    if place_overflow {
                        return Err(NumericError::OutOfRange);
                    }
                    value = place
                        .checked_mul(digit)
                        .and_then(|v| value.checked_add(v))
                        .ok_or(NumericError::OutOfRange)?;
                }
                match place.checked_mul(10) {
                    Some(next) => place = next,
                    None => place_overflow = true,
                }
                digits += 1;
            }
            b @ (b'+' | b'-') if idx == 0 => negative = b == b'-',
            _ => return Err(NumericError::Malformed),
        }
    }

    if digits == 0 {
        return Err(NumericError::Malformed);
    }
    if negative {
        value = -value;
    }
    Ok(value)
}

/// Parse a decimal real from text, scientific notation included.
///
/// # Errors
///
/// [`NumericError::Malformed`] when the text is empty, has no mantissa
/// digits, or contains a byte that is invalid in its position (a second
/// decimal point, a sign away from the start or the exponent marker, a
/// stray letter).
pub fn parse_real(text: &str) -> Result<f64, NumericError> {
    let bytes = text.as_bytes();
    let mut value = 0.0f64;
    let mut negative = false;
    // 0 until the decimal point is seen, then 10, 100, ...
    let mut denominator = 0u64;
    let mut fraction_digits = 0i32;
    let mut mantissa_digits = 0usize;
    let mut exponent = 0i32;
    let mut exponent_negative = false;
    let mut exponent_index: Option<usize> = None;

    for (idx, &b) in bytes.iter().enumerate() {
        match b {
            b'0'..=b'9' => {
                let digit = i32::from(b - b'0');
                if exponent_index.is_some() {
                    exponent = exponent.saturating_mul(10).saturating_add(digit);
                } else if denominator >= 10 {
                    value += f64::from(digit) / denominator as f64;
                    denominator = denominator.saturating_mul(10);
                    fraction_digits += 1;
                    mantissa_digits += 1;
                } else {
                    value = value * 10.0 + f64::from(digit);
                    mantissa_digits += 1;
                }
            }
            b'-' if idx == 0 => negative = true,
            b'+' if idx == 0 => {}
            b'.' if idx != 0 && denominator == 0 && exponent_index.is_none() => {
                denominator = 10;
            }
            b'e' | b'E' if mantissa_digits > 0 && exponent_index.is_none() => {
                exponent_index = Some(idx);
            }
            b'-' if exponent_index.is_some_and(|e| e + 1 == idx) => {
                exponent_negative = true;
            }
            b'+' if exponent_index.is_some_and(|e| e + 1 == idx) => {}
            _ => return Err(NumericError::Malformed),
        }
    }

    if mantissa_digits == 0 {
        return Err(NumericError::Malformed);
    }

    if exponent_negative {
        exponent = -exponent;
    }
    exponent = exponent.clamp(-EXPONENT_LIMIT, EXPONENT_LIMIT);

    if exponent < 0 {
        for _ in exponent..0 {
            value /= 10.0;
        }
    } else if exponent > 0 {
        for _ in 0..exponent {
            value *= 10.0;
        }
        // The true value is a whole number; snap to it before the
        // accumulated scaling error becomes observable.
        if fraction_digits <= exponent && value < i64::MAX as f64 {
            value = (value + 0.5) as i64 as f64;
        }
    }

    if negative {
        value = -value;
    }
    Ok(value)
}
