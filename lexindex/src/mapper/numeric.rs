use num_traits::ToPrimitive;

use crate::column::{pow10, HostType, RawValue};
use crate::errors::{ErrorKind, LexError, LexResult};
use crate::field::FieldValue;
use crate::mapper::{format_error, unsupported_kind};

pub(crate) const INTEGER_SUPPORTED: &[HostType] = &[
    HostType::TinyInt,
    HostType::SmallInt,
    HostType::Int,
    HostType::Ascii,
    HostType::Text,
];

pub(crate) const LONG_SUPPORTED: &[HostType] = &[
    HostType::TinyInt,
    HostType::SmallInt,
    HostType::Int,
    HostType::BigInt,
    HostType::Timestamp,
    HostType::Ascii,
    HostType::Text,
];

pub(crate) const FLOAT_SUPPORTED: &[HostType] = &[
    HostType::Float,
    HostType::TinyInt,
    HostType::SmallInt,
    HostType::Int,
    HostType::Ascii,
    HostType::Text,
];

pub(crate) const DOUBLE_SUPPORTED: &[HostType] = &[
    HostType::Float,
    HostType::Double,
    HostType::TinyInt,
    HostType::SmallInt,
    HostType::Int,
    HostType::BigInt,
    HostType::Ascii,
    HostType::Text,
];

/// Normalizes a raw value to a signed 64-bit integer.
///
/// Accepts integral kinds, floats (truncating toward zero, never rounding)
/// and numeric strings. Booleans, dates, UUIDs and byte sequences are
/// rejected with a typed error, as are magnitudes outside the i64 range.
pub(crate) fn parse_long(field: &str, mapper: &str, value: &RawValue) -> LexResult<i64> {
    match value {
        RawValue::Int(v) => Ok(*v as i64),
        RawValue::Long(v) => Ok(*v),
        RawValue::Float(v) => float_to_long(field, mapper, *v as f64),
        RawValue::Double(v) => float_to_long(field, mapper, *v),
        RawValue::VarInt(v) => v.to_i64().ok_or_else(|| {
            LexError::new(
                &format!("Field `{}`: varint `{}` does not fit in 64 bits", field, v),
                ErrorKind::RangeError,
            )
        }),
        RawValue::Decimal(d) => {
            // truncate toward zero
            let truncated = d.unscaled() / pow10(d.scale());
            truncated.to_i64().ok_or_else(|| {
                LexError::new(
                    &format!("Field `{}`: decimal `{}` does not fit in 64 bits", field, d),
                    ErrorKind::RangeError,
                )
            })
        }
        RawValue::Text(s) => {
            let trimmed = s.trim();
            if let Ok(v) = trimmed.parse::<i64>() {
                return Ok(v);
            }
            let parsed: f64 = trimmed.parse().map_err(|_| {
                format_error(field, mapper, &format!("`{}` is not a number", s))
            })?;
            float_to_long(field, mapper, parsed)
        }
        other => Err(unsupported_kind(field, mapper, other)),
    }
}

fn float_to_long(field: &str, mapper: &str, value: f64) -> LexResult<i64> {
    if !value.is_finite() {
        return Err(format_error(
            field,
            mapper,
            &format!("`{}` is not a finite number", value),
        ));
    }
    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return Err(LexError::new(
            &format!("Field `{}`: `{}` does not fit in 64 bits", field, value),
            ErrorKind::RangeError,
        ));
    }
    Ok(truncated as i64)
}

/// Normalizes a raw value to a 64-bit float. Same acceptance rules as
/// [parse_long], without truncation.
pub(crate) fn parse_double(field: &str, mapper: &str, value: &RawValue) -> LexResult<f64> {
    match value {
        RawValue::Int(v) => Ok(*v as f64),
        RawValue::Long(v) => Ok(*v as f64),
        RawValue::Float(v) => Ok(*v as f64),
        RawValue::Double(v) => Ok(*v),
        RawValue::VarInt(v) => v.to_f64().ok_or_else(|| {
            format_error(field, mapper, &format!("`{}` is not representable", v))
        }),
        RawValue::Decimal(d) => d.to_string().parse().map_err(|_| {
            format_error(field, mapper, &format!("`{}` is not representable", d))
        }),
        RawValue::Text(s) => s.trim().parse().map_err(|_| {
            format_error(field, mapper, &format!("`{}` is not a number", s))
        }),
        other => Err(unsupported_kind(field, mapper, other)),
    }
}

/// Maps 32-bit integer columns to numeric doc-values.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerMapper {
    pub(crate) indexed: bool,
    pub(crate) sorted: bool,
}

impl IntegerMapper {
    pub fn new(indexed: bool, sorted: bool) -> Self {
        IntegerMapper { indexed, sorted }
    }

    pub(crate) fn base(&self, field: &str, value: &RawValue) -> LexResult<FieldValue> {
        let v = parse_long(field, "integer", value)?;
        if v < i32::MIN as i64 || v > i32::MAX as i64 {
            return Err(LexError::new(
                &format!("Field `{}`: `{}` does not fit in 32 bits", field, v),
                ErrorKind::RangeError,
            ));
        }
        Ok(FieldValue::Long(v))
    }
}

/// Maps 64-bit integer columns to numeric doc-values.
#[derive(Debug, Clone, PartialEq)]
pub struct LongMapper {
    pub(crate) indexed: bool,
    pub(crate) sorted: bool,
}

impl LongMapper {
    pub fn new(indexed: bool, sorted: bool) -> Self {
        LongMapper { indexed, sorted }
    }

    pub(crate) fn base(&self, field: &str, value: &RawValue) -> LexResult<FieldValue> {
        Ok(FieldValue::Long(parse_long(field, "long", value)?))
    }
}

/// Maps 32-bit float columns to numeric doc-values.
///
/// The base value is widened to f64 (exact) so all float-domain fields
/// share the same sortable representation.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatMapper {
    pub(crate) indexed: bool,
    pub(crate) sorted: bool,
}

impl FloatMapper {
    pub fn new(indexed: bool, sorted: bool) -> Self {
        FloatMapper { indexed, sorted }
    }

    pub(crate) fn base(&self, field: &str, value: &RawValue) -> LexResult<FieldValue> {
        let v = parse_double(field, "float", value)?;
        Ok(FieldValue::Double(v as f32 as f64))
    }
}

/// Maps 64-bit float columns to numeric doc-values.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleMapper {
    pub(crate) indexed: bool,
    pub(crate) sorted: bool,
}

impl DoubleMapper {
    pub fn new(indexed: bool, sorted: bool) -> Self {
        DoubleMapper { indexed, sorted }
    }

    pub(crate) fn base(&self, field: &str, value: &RawValue) -> LexResult<FieldValue> {
        Ok(FieldValue::Double(parse_double(field, "double", value)?))
    }
}
