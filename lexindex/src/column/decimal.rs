use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::errors::{ErrorKind, LexError, LexResult};

/// Returns `10^exp` as a [BigInt].
pub(crate) fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

/// Arbitrary-precision decimal number.
///
/// Represented as an unscaled [BigInt] plus a non-negative decimal scale,
/// so the numeric value is `unscaled * 10^(-scale)`. Digit budgets in the
/// big-decimal encoder are unbounded, which rules out fixed-width decimal
/// representations; this type grows with the configured budget.
///
/// # Characteristics
/// - **Exact**: no floating-point rounding on parse or arithmetic
/// - **Comparable**: `Ord` aligns scales before comparing
/// - **Immutable**: all operations return new values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigDecimal {
    unscaled: BigInt,
    scale: u32,
}

impl BigDecimal {
    /// Creates a decimal from an unscaled value and a scale.
    pub fn new(unscaled: BigInt, scale: u32) -> Self {
        BigDecimal { unscaled, scale }
    }

    /// Creates a decimal from a signed 64-bit integer.
    pub fn from_i64(value: i64) -> Self {
        BigDecimal {
            unscaled: BigInt::from(value),
            scale: 0,
        }
    }

    /// Creates a decimal from a finite 64-bit float.
    ///
    /// NaN and infinities are format errors; the float is rendered through
    /// its shortest decimal representation before parsing, so the result is
    /// the decimal the float prints as.
    pub fn from_f64(value: f64) -> LexResult<Self> {
        if !value.is_finite() {
            return Err(LexError::new(
                &format!("Cannot build a decimal from non-finite float `{}`", value),
                ErrorKind::FormatError,
            ));
        }
        Self::parse(&format!("{}", value))
    }

    /// Parses a decimal from its textual form.
    ///
    /// Accepts an optional sign, an integer part, an optional fractional
    /// part and an optional exponent (`1.5e3`). Anything else is a
    /// [ErrorKind::FormatError].
    pub fn parse(text: &str) -> LexResult<Self> {
        let bad = || {
            LexError::new(
                &format!("`{}` is not a valid decimal number", text),
                ErrorKind::FormatError,
            )
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(bad());
        }

        // split off an exponent part, if any
        let (mantissa, exponent) = match trimmed.find(['e', 'E']) {
            Some(pos) => {
                let exp: i64 = trimmed[pos + 1..].parse().map_err(|_| bad())?;
                (&trimmed[..pos], exp)
            }
            None => (trimmed, 0i64),
        };

        let (sign, digits) = match mantissa.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", mantissa.strip_prefix('+').unwrap_or(mantissa)),
        };

        let (int_part, frac_part) = match digits.find('.') {
            Some(pos) => (&digits[..pos], &digits[pos + 1..]),
            None => (digits, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(bad());
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(bad());
        }

        let unscaled =
            BigInt::from_str(&format!("{}{}{}", sign, int_part, frac_part)).map_err(|_| bad())?;
        let mut scale = frac_part.len() as i64 - exponent;
        let mut unscaled = unscaled;
        if scale < 0 {
            unscaled *= pow10((-scale) as u32);
            scale = 0;
        }
        Ok(BigDecimal {
            unscaled,
            scale: scale as u32,
        })
    }

    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_negative(&self) -> bool {
        self.unscaled.is_negative()
    }

    /// Returns an equal decimal with trailing fractional zeros removed.
    pub fn trimmed(&self) -> Self {
        let mut unscaled = self.unscaled.clone();
        let mut scale = self.scale;
        let ten = BigInt::from(10u32);
        while scale > 0 && !unscaled.is_zero() && (&unscaled % &ten).is_zero() {
            unscaled /= &ten;
            scale -= 1;
        }
        if unscaled.is_zero() {
            scale = 0;
        }
        BigDecimal { unscaled, scale }
    }

    /// Returns an equal decimal with exactly `scale` fractional digits.
    ///
    /// Scaling up pads with zeros; scaling below the trimmed scale would
    /// lose digits and is a [ErrorKind::RangeError].
    pub fn with_scale(&self, scale: u32) -> LexResult<Self> {
        let trimmed = self.trimmed();
        if trimmed.scale > scale {
            return Err(LexError::new(
                &format!(
                    "Decimal `{}` has more than {} decimal digits",
                    self, scale
                ),
                ErrorKind::RangeError,
            ));
        }
        let unscaled = &trimmed.unscaled * pow10(scale - trimmed.scale);
        Ok(BigDecimal { unscaled, scale })
    }

    /// Number of digits in the integer part of the absolute value.
    pub fn integer_digits(&self) -> u32 {
        let abs = self.unscaled.abs();
        let digits = abs.to_string().len() as u32;
        digits.saturating_sub(self.scale).max(1)
    }

    /// Adds two decimals, aligning scales.
    pub fn add(&self, other: &BigDecimal) -> BigDecimal {
        let scale = self.scale.max(other.scale);
        let a = &self.unscaled * pow10(scale - self.scale);
        let b = &other.unscaled * pow10(scale - other.scale);
        BigDecimal {
            unscaled: a + b,
            scale,
        }
    }

    /// Absolute value.
    pub fn abs(&self) -> BigDecimal {
        BigDecimal {
            unscaled: self.unscaled.abs(),
            scale: self.scale,
        }
    }
}

impl PartialOrd for BigDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.scale.max(other.scale);
        let a = &self.unscaled * pow10(scale - self.scale);
        let b = &other.unscaled * pow10(scale - other.scale);
        a.cmp(&b)
    }
}

impl Display for BigDecimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.unscaled);
        }
        let abs = self.unscaled.abs().to_string();
        let sign = if self.unscaled.is_negative() { "-" } else { "" };
        let scale = self.scale as usize;
        if abs.len() > scale {
            let (int_part, frac_part) = abs.split_at(abs.len() - scale);
            write!(f, "{}{}.{}", sign, int_part, frac_part)
        } else {
            write!(f, "{}0.{}{}", sign, "0".repeat(scale - abs.len()), abs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        let d = BigDecimal::parse("42").unwrap();
        assert_eq!(d.unscaled(), &BigInt::from(42));
        assert_eq!(d.scale(), 0);
    }

    #[test]
    fn test_parse_fractional() {
        let d = BigDecimal::parse("-9999.9999").unwrap();
        assert_eq!(d.scale(), 4);
        assert_eq!(d.to_string(), "-9999.9999");
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(BigDecimal::parse("1.5e3").unwrap().to_string(), "1500");
        assert_eq!(BigDecimal::parse("15e-2").unwrap().to_string(), "0.15");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", ".", "abc", "1.2.3", "--1", "0x10"] {
            assert!(BigDecimal::parse(input).is_err(), "accepted `{}`", input);
        }
    }

    #[test]
    fn test_ordering_aligns_scales() {
        let a = BigDecimal::parse("1.5").unwrap();
        let b = BigDecimal::parse("1.25").unwrap();
        assert!(a > b);
        let c = BigDecimal::parse("1.50").unwrap();
        assert_eq!(a.cmp(&c), Ordering::Equal);
    }

    #[test]
    fn test_with_scale_pads() {
        let d = BigDecimal::parse("1").unwrap().with_scale(4).unwrap();
        assert_eq!(d.to_string(), "1.0000");
    }

    #[test]
    fn test_with_scale_rejects_excess_digits() {
        let d = BigDecimal::parse("1.23456").unwrap();
        assert!(d.with_scale(4).is_err());
        // trailing zeros do not count against the budget
        let d = BigDecimal::parse("1.23450000").unwrap();
        assert!(d.with_scale(4).is_ok());
    }

    #[test]
    fn test_add() {
        let a = BigDecimal::parse("-9999.9999").unwrap();
        let b = BigDecimal::parse("9999.9999").unwrap();
        assert_eq!(a.add(&b).to_string(), "0.0000");
    }

    #[test]
    fn test_integer_digits() {
        assert_eq!(BigDecimal::parse("9999.9999").unwrap().integer_digits(), 4);
        assert_eq!(BigDecimal::parse("0.5").unwrap().integer_digits(), 1);
        assert_eq!(BigDecimal::parse("-123").unwrap().integer_digits(), 3);
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(BigDecimal::from_f64(3.25).unwrap().to_string(), "3.25");
        assert!(BigDecimal::from_f64(f64::NAN).is_err());
        assert!(BigDecimal::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn test_display_small_fraction() {
        let d = BigDecimal::new(BigInt::from(5), 3);
        assert_eq!(d.to_string(), "0.005");
    }
}
