use num_bigint::BigInt;
use std::str::FromStr;

use crate::column::{pow10, BigDecimal, HostType, RawValue};
use crate::errors::{ErrorKind, LexError, LexResult};
use crate::field::FieldValue;
use crate::mapper::sortable::{bigint_sortable, bigint_width};
use crate::mapper::{format_error, unsupported_kind};

/// Default digit budget for the big-integer mapper.
pub const DEFAULT_BIGINT_DIGITS: u32 = 32;

/// Default integer/decimal digit budgets for the big-decimal mapper.
pub const DEFAULT_BIGDEC_INTEGER_DIGITS: u32 = 32;
pub const DEFAULT_BIGDEC_DECIMAL_DIGITS: u32 = 32;

pub(crate) const BIG_INTEGER_SUPPORTED: &[HostType] = &[
    HostType::TinyInt,
    HostType::SmallInt,
    HostType::Int,
    HostType::BigInt,
    HostType::VarInt,
    HostType::Ascii,
    HostType::Text,
];

pub(crate) const BIG_DECIMAL_SUPPORTED: &[HostType] = &[
    HostType::TinyInt,
    HostType::SmallInt,
    HostType::Int,
    HostType::BigInt,
    HostType::Float,
    HostType::Double,
    HostType::VarInt,
    HostType::Decimal,
    HostType::Ascii,
    HostType::Text,
];

/// Maps arbitrary-precision integers to a fixed-width radix-36 sortable
/// string.
///
/// The digit budget bounds the magnitude of accepted values; the radix-36
/// rendering shortens the fixed width while keeping lexicographic order
/// equal to numeric order over the whole budget.
#[derive(Debug, Clone, PartialEq)]
pub struct BigIntegerMapper {
    pub(crate) indexed: bool,
    pub(crate) sorted: bool,
    pub(crate) digits: u32,
    width: usize,
}

impl BigIntegerMapper {
    /// Creates the mapper; a digit budget of zero is a configuration error.
    pub fn new(indexed: bool, sorted: bool, digits: u32) -> LexResult<Self> {
        if digits == 0 {
            return Err(LexError::new(
                "big_integer digit budget must be positive",
                ErrorKind::ConfigError,
            ));
        }
        Ok(BigIntegerMapper {
            indexed,
            sorted,
            digits,
            width: bigint_width(digits),
        })
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub(crate) fn base(&self, field: &str, value: &RawValue) -> LexResult<FieldValue> {
        let parsed = match value {
            RawValue::VarInt(v) => v.clone(),
            RawValue::Int(v) => BigInt::from(*v),
            RawValue::Long(v) => BigInt::from(*v),
            RawValue::Text(s) => BigInt::from_str(s.trim()).map_err(|_| {
                format_error(field, "big_integer", &format!("`{}` is not an integer", s))
            })?,
            other => Err(unsupported_kind(field, "big_integer", other))?,
        };
        let encoded = bigint_sortable(&parsed, self.digits, self.width).map_err(|e| {
            LexError::new_with_cause(
                &format!("Field `{}`: value out of digit budget", field),
                ErrorKind::RangeError,
                e,
            )
        })?;
        Ok(FieldValue::Str(encoded))
    }
}

/// Maps arbitrary-precision decimals to a fixed-format sortable string.
///
/// Every value is shifted by `10^integer_digits - 10^-decimal_digits` into
/// the non-negative range and rendered with a fixed number of integer and
/// fractional digits, so all encodings share one width and lexicographic
/// order equals numeric order. Overflowing either digit budget is a hard
/// error, never a truncation.
#[derive(Debug, Clone, PartialEq)]
pub struct BigDecimalMapper {
    pub(crate) indexed: bool,
    pub(crate) sorted: bool,
    pub(crate) integer_digits: u32,
    pub(crate) decimal_digits: u32,
    offset: BigDecimal,
}

impl BigDecimalMapper {
    /// Creates the mapper; either digit budget at zero is a configuration
    /// error.
    pub fn new(
        indexed: bool,
        sorted: bool,
        integer_digits: u32,
        decimal_digits: u32,
    ) -> LexResult<Self> {
        if integer_digits == 0 || decimal_digits == 0 {
            return Err(LexError::new(
                "big_decimal digit budgets must be positive",
                ErrorKind::ConfigError,
            ));
        }
        // 10^integer_digits - 10^-decimal_digits
        let offset = BigDecimal::new(
            pow10(integer_digits + decimal_digits) - BigInt::from(1),
            decimal_digits,
        );
        Ok(BigDecimalMapper {
            indexed,
            sorted,
            integer_digits,
            decimal_digits,
            offset,
        })
    }

    pub fn integer_digits(&self) -> u32 {
        self.integer_digits
    }

    pub fn decimal_digits(&self) -> u32 {
        self.decimal_digits
    }

    pub(crate) fn base(&self, field: &str, value: &RawValue) -> LexResult<FieldValue> {
        let parsed = match value {
            RawValue::Decimal(d) => d.clone(),
            RawValue::VarInt(v) => BigDecimal::new(v.clone(), 0),
            RawValue::Int(v) => BigDecimal::from_i64(*v as i64),
            RawValue::Long(v) => BigDecimal::from_i64(*v),
            RawValue::Float(v) => BigDecimal::from_f64(*v as f64)
                .map_err(|e| self.reformat(field, e))?,
            RawValue::Double(v) => {
                BigDecimal::from_f64(*v).map_err(|e| self.reformat(field, e))?
            }
            RawValue::Text(s) => {
                BigDecimal::parse(s.trim()).map_err(|e| self.reformat(field, e))?
            }
            other => Err(unsupported_kind(field, "big_decimal", other))?,
        };

        if parsed.abs() > self.offset {
            return Err(LexError::new(
                &format!(
                    "Field `{}`: `{}` exceeds the {} integer digit budget",
                    field, parsed, self.integer_digits
                ),
                ErrorKind::RangeError,
            ));
        }
        let shifted = parsed.add(&self.offset);
        let scaled = shifted.with_scale(self.decimal_digits).map_err(|e| {
            LexError::new_with_cause(
                &format!(
                    "Field `{}`: `{}` exceeds the {} decimal digit budget",
                    field, parsed, self.decimal_digits
                ),
                ErrorKind::RangeError,
                e,
            )
        })?;

        // zero-pad the integer part to a fixed width of integer_digits + 1
        let plain = scaled.to_string();
        let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), ""));
        let width = (self.integer_digits + 1) as usize;
        Ok(FieldValue::Str(format!(
            "{}{}.{}",
            "0".repeat(width.saturating_sub(int_part.len())),
            int_part,
            frac_part
        )))
    }

    fn reformat(&self, field: &str, cause: LexError) -> LexError {
        LexError::new_with_cause(
            &format!("Field `{}`: not a valid decimal", field),
            ErrorKind::FormatError,
            cause,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bigdec(i: u32, d: u32) -> BigDecimalMapper {
        BigDecimalMapper::new(true, true, i, d).unwrap()
    }

    #[test]
    fn test_bigdec_reference_values() {
        let mapper = bigdec(4, 4);
        assert_eq!(
            mapper.base("t", &RawValue::Text("1".into())).unwrap(),
            FieldValue::Str("10000.9999".into())
        );
        assert_eq!(
            mapper
                .base("t", &RawValue::Text("-9999.9999".into()))
                .unwrap(),
            FieldValue::Str("00000.0000".into())
        );
        assert_eq!(
            mapper
                .base("t", &RawValue::Text("9999.9999".into()))
                .unwrap(),
            FieldValue::Str("19999.9998".into())
        );
    }

    #[test]
    fn test_bigdec_order_preservation() {
        let mapper = bigdec(4, 4);
        let inputs = [
            "-9999.9999",
            "-1000",
            "-0.0001",
            "0",
            "0.0001",
            "1",
            "42.5",
            "9999.9999",
        ];
        let encoded: Vec<String> = inputs
            .iter()
            .map(|v| {
                mapper
                    .base("t", &RawValue::Text((*v).into()))
                    .unwrap()
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect();
        for pair in encoded.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
        // fixed total width
        assert!(encoded.iter().all(|e| e.len() == encoded[0].len()));
    }

    #[test]
    fn test_bigdec_zero_budget_is_config_error() {
        assert_eq!(
            BigDecimalMapper::new(true, true, 0, 4).unwrap_err().kind(),
            &ErrorKind::ConfigError
        );
        assert_eq!(
            BigDecimalMapper::new(true, true, 4, 0).unwrap_err().kind(),
            &ErrorKind::ConfigError
        );
        assert_eq!(
            BigIntegerMapper::new(true, true, 0).unwrap_err().kind(),
            &ErrorKind::ConfigError
        );
    }

    #[test]
    fn test_bigdec_magnitude_overflow() {
        let mapper = bigdec(4, 4);
        let err = mapper
            .base("t", &RawValue::Text("10000".into()))
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RangeError);
    }

    #[test]
    fn test_bigdec_decimal_overflow() {
        let mapper = bigdec(4, 4);
        let err = mapper
            .base("t", &RawValue::Text("1.00001".into()))
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RangeError);
        // trailing zeros are not significant
        assert!(mapper.base("t", &RawValue::Text("1.00010".into())).is_ok());
    }

    #[test]
    fn test_bigdec_accepts_numeric_kinds() {
        let mapper = bigdec(6, 2);
        assert_eq!(
            mapper.base("t", &RawValue::Int(1)).unwrap(),
            FieldValue::Str("1000000.99".into())
        );
        assert!(mapper.base("t", &RawValue::Double(0.25)).is_ok());
        assert!(mapper.base("t", &RawValue::Bool(true)).is_err());
        assert!(mapper.base("t", &RawValue::Uuid(uuid::Uuid::nil())).is_err());
    }

    #[test]
    fn test_bigint_reference_behavior() {
        let mapper = BigIntegerMapper::new(true, true, 8).unwrap();
        let small = mapper.base("t", &RawValue::Text("-99999999".into())).unwrap();
        let zero = mapper.base("t", &RawValue::Int(0)).unwrap();
        let big = mapper.base("t", &RawValue::Text("99999999".into())).unwrap();
        let (s, z, b) = (
            small.as_str().unwrap(),
            zero.as_str().unwrap(),
            big.as_str().unwrap(),
        );
        assert!(s < z && z < b);
        assert_eq!(s.len(), b.len());
    }

    #[test]
    fn test_bigint_rejects_floats_and_overflow() {
        let mapper = BigIntegerMapper::new(true, true, 4).unwrap();
        assert_eq!(
            mapper.base("t", &RawValue::Double(1.5)).unwrap_err().kind(),
            &ErrorKind::UnsupportedType
        );
        assert_eq!(
            mapper
                .base("t", &RawValue::Text("10000".into()))
                .unwrap_err()
                .kind(),
            &ErrorKind::RangeError
        );
        assert_eq!(
            mapper
                .base("t", &RawValue::Text("1.5".into()))
                .unwrap_err()
                .kind(),
            &ErrorKind::FormatError
        );
    }
}
