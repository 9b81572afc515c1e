//! Order-preserving encodings shared by the numeric mappers.
//!
//! Every function here upholds the same contract: for any two values `a`
//! and `b` of the same domain, the lexicographic order of the encodings
//! equals the natural order of the values.

use num_bigint::BigInt;
use num_traits::Signed;

use crate::column::pow10;
use crate::errors::{ErrorKind, LexError, LexResult};

/// Big-endian byte key for a signed 64-bit integer.
///
/// Flipping the sign bit shifts the domain into unsigned space, where
/// byte-wise comparison equals numeric comparison.
pub fn long_key(value: i64) -> [u8; 8] {
    ((value as u64) ^ (1u64 << 63)).to_be_bytes()
}

/// Big-endian byte key for a 64-bit float.
///
/// The classic monotone bit transform: positive values get the sign bit
/// set, negative values are bitwise inverted. Produces a total order
/// (-0.0 sorts just below +0.0, NaN above every finite value).
pub fn double_key(value: f64) -> [u8; 8] {
    let bits = value.to_bits();
    let key = if bits & (1u64 << 63) != 0 {
        !bits
    } else {
        bits | (1u64 << 63)
    };
    key.to_be_bytes()
}

/// Big-endian byte key for a 32-bit float.
pub fn float_key(value: f32) -> [u8; 4] {
    let bits = value.to_bits();
    let key = if bits & (1u32 << 31) != 0 {
        !bits
    } else {
        bits | (1u32 << 31)
    };
    key.to_be_bytes()
}

/// Fixed width, in radix-36 digits, of the encoding domain for a given
/// decimal digit budget. Computed once per mapper at build time.
pub fn bigint_width(digits: u32) -> usize {
    // largest encodable offset value: 2 * 10^digits - 1
    (pow10(digits) * BigInt::from(2) - BigInt::from(1))
        .to_str_radix(36)
        .len()
}

/// Encodes an arbitrary-precision integer into a fixed-width radix-36
/// string whose lexicographic order equals numeric order.
///
/// The value is shifted by `10^digits` into the positive range and
/// rendered in radix 36 ('0'..'9','a'..'z' are in ASCII order), left
/// padded with '0' to `width`. Magnitudes of `10^digits` or more are a
/// [ErrorKind::RangeError], never truncated.
pub fn bigint_sortable(value: &BigInt, digits: u32, width: usize) -> LexResult<String> {
    let limit = pow10(digits);
    if value.abs() >= limit {
        return Err(LexError::new(
            &format!(
                "Value `{}` has more than {} digits",
                value, digits
            ),
            ErrorKind::RangeError,
        ));
    }
    let shifted = value + &limit;
    let encoded = shifted.to_str_radix(36);
    Ok(format!("{}{}", "0".repeat(width - encoded.len()), encoded))
}
