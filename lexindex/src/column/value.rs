use num_bigint::BigInt;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

use crate::column::decimal::BigDecimal;
use crate::errors::{ErrorKind, LexError, LexResult};

/// A raw column value as handed over by the host database.
///
/// This is the closed set of value kinds the encoders accept. Every encoder
/// pattern-matches exhaustively over it and rejects the kinds outside its
/// declared accepted set with an [ErrorKind::UnsupportedType] error, so
/// cross-type coercions that would be lossy or ambiguous never happen
/// silently.
///
/// # Variants
/// - Bool: native boolean
/// - Int/Long: 32/64-bit signed integers
/// - Float/Double: 32/64-bit floats
/// - VarInt: arbitrary-precision integer
/// - Decimal: arbitrary-precision decimal
/// - Text: UTF-8 string
/// - Bytes: raw byte sequence
/// - Uuid: universally unique identifier
/// - Timestamp: epoch milliseconds
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Native boolean value.
    Bool(bool),
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Arbitrary-precision integer.
    VarInt(BigInt),
    /// Arbitrary-precision decimal.
    Decimal(BigDecimal),
    /// UTF-8 text.
    Text(String),
    /// Raw byte sequence.
    Bytes(Vec<u8>),
    /// UUID value.
    Uuid(Uuid),
    /// Epoch milliseconds.
    Timestamp(i64),
}

impl RawValue {
    /// Human-readable kind name, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RawValue::Bool(_) => "boolean",
            RawValue::Int(_) => "integer",
            RawValue::Long(_) => "long",
            RawValue::Float(_) => "float",
            RawValue::Double(_) => "double",
            RawValue::VarInt(_) => "varint",
            RawValue::Decimal(_) => "decimal",
            RawValue::Text(_) => "text",
            RawValue::Bytes(_) => "bytes",
            RawValue::Uuid(_) => "uuid",
            RawValue::Timestamp(_) => "timestamp",
        }
    }

    /// Converts a JSON value into a raw value.
    ///
    /// Used at condition-compile time so that query values travel through
    /// the same encoder as indexed values. Integers become [RawValue::Long],
    /// other numbers [RawValue::Double]; JSON nulls, arrays and objects are
    /// rejected.
    pub fn from_json(value: &serde_json::Value) -> LexResult<RawValue> {
        match value {
            serde_json::Value::Bool(b) => Ok(RawValue::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(RawValue::Long(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(RawValue::Double(f))
                } else {
                    Err(LexError::new(
                        &format!("JSON number `{}` is out of range", n),
                        ErrorKind::FormatError,
                    ))
                }
            }
            serde_json::Value::String(s) => Ok(RawValue::Text(s.clone())),
            other => Err(LexError::new(
                &format!("JSON value `{}` is not a usable column value", other),
                ErrorKind::UnsupportedType,
            )),
        }
    }
}

impl Display for RawValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Bool(v) => write!(f, "{}", v),
            RawValue::Int(v) => write!(f, "{}", v),
            RawValue::Long(v) => write!(f, "{}", v),
            RawValue::Float(v) => write!(f, "{}", v),
            RawValue::Double(v) => write!(f, "{}", v),
            RawValue::VarInt(v) => write!(f, "{}", v),
            RawValue::Decimal(v) => write!(f, "{}", v),
            RawValue::Text(v) => write!(f, "\"{}\"", v),
            RawValue::Bytes(v) => {
                write!(f, "0x")?;
                for b in v {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
            RawValue::Uuid(v) => write!(f, "{}", v),
            RawValue::Timestamp(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Bool(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Int(v)
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Long(v)
    }
}

impl From<f32> for RawValue {
    fn from(v: f32) -> Self {
        RawValue::Float(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Double(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(v: Vec<u8>) -> Self {
        RawValue::Bytes(v)
    }
}

impl From<Uuid> for RawValue {
    fn from(v: Uuid) -> Self {
        RawValue::Uuid(v)
    }
}

impl From<BigInt> for RawValue {
    fn from(v: BigInt) -> Self {
        RawValue::VarInt(v)
    }
}

impl From<BigDecimal> for RawValue {
    fn from(v: BigDecimal) -> Self {
        RawValue::Decimal(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(RawValue::Bool(true).kind_name(), "boolean");
        assert_eq!(RawValue::Text("x".into()).kind_name(), "text");
        assert_eq!(RawValue::Uuid(Uuid::nil()).kind_name(), "uuid");
    }

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(
            RawValue::from_json(&serde_json::json!(true)).unwrap(),
            RawValue::Bool(true)
        );
        assert_eq!(
            RawValue::from_json(&serde_json::json!(7)).unwrap(),
            RawValue::Long(7)
        );
        assert_eq!(
            RawValue::from_json(&serde_json::json!(2.5)).unwrap(),
            RawValue::Double(2.5)
        );
        assert_eq!(
            RawValue::from_json(&serde_json::json!("abc")).unwrap(),
            RawValue::Text("abc".into())
        );
    }

    #[test]
    fn test_from_json_rejects_composites() {
        assert!(RawValue::from_json(&serde_json::json!(null)).is_err());
        assert!(RawValue::from_json(&serde_json::json!([1, 2])).is_err());
        assert!(RawValue::from_json(&serde_json::json!({"a": 1})).is_err());
    }

    #[test]
    fn test_display_bytes() {
        let v = RawValue::Bytes(vec![0xf1, 0xa2, 0xb3]);
        assert_eq!(v.to_string(), "0xf1a2b3");
    }
}
