use std::net::IpAddr;
use std::str::FromStr;

use crate::column::{HostType, RawValue};
use crate::errors::LexResult;
use crate::field::FieldValue;
use crate::mapper::{format_error, unsupported_kind};

/// Maps boolean columns to the literal strings `"true"` / `"false"`.
///
/// Accepts native booleans and the strings "true"/"false" case-insensitively;
/// every other input is rejected. No numeric coercion (0/1) is performed.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanMapper {
    pub(crate) indexed: bool,
    pub(crate) sorted: bool,
}

pub(crate) const BOOLEAN_SUPPORTED: &[HostType] =
    &[HostType::Boolean, HostType::Ascii, HostType::Text];

impl BooleanMapper {
    pub fn new(indexed: bool, sorted: bool) -> Self {
        BooleanMapper { indexed, sorted }
    }

    pub(crate) fn base(&self, field: &str, value: &RawValue) -> LexResult<FieldValue> {
        match value {
            RawValue::Bool(b) => Ok(FieldValue::Str(b.to_string())),
            RawValue::Text(s) => {
                if s.eq_ignore_ascii_case("true") {
                    Ok(FieldValue::Str("true".to_string()))
                } else if s.eq_ignore_ascii_case("false") {
                    Ok(FieldValue::Str("false".to_string()))
                } else {
                    Err(format_error(field, "boolean", &format!("`{}` is neither \"true\" nor \"false\"", s)))
                }
            }
            other => Err(unsupported_kind(field, "boolean", other)),
        }
    }
}

/// Maps values to their plain textual form, untokenized.
///
/// Numerics, UUIDs and byte sequences are stringified; the
/// `case_sensitive` option (default true) lower-cases the base value for
/// both indexing and sorting when disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct StringMapper {
    pub(crate) indexed: bool,
    pub(crate) sorted: bool,
    pub(crate) case_sensitive: bool,
}

pub(crate) const STRING_SUPPORTED: &[HostType] = &[
    HostType::Ascii,
    HostType::Text,
    HostType::Boolean,
    HostType::TinyInt,
    HostType::SmallInt,
    HostType::Int,
    HostType::BigInt,
    HostType::Float,
    HostType::Double,
    HostType::VarInt,
    HostType::Decimal,
    HostType::Uuid,
    HostType::TimeUuid,
    HostType::Timestamp,
    HostType::Inet,
    HostType::Blob,
];

impl StringMapper {
    pub fn new(indexed: bool, sorted: bool, case_sensitive: bool) -> Self {
        StringMapper {
            indexed,
            sorted,
            case_sensitive,
        }
    }

    pub(crate) fn base(&self, _field: &str, value: &RawValue) -> LexResult<FieldValue> {
        let text = match value {
            RawValue::Text(s) => s.clone(),
            RawValue::Bool(b) => b.to_string(),
            RawValue::Int(v) => v.to_string(),
            RawValue::Long(v) => v.to_string(),
            RawValue::Float(v) => v.to_string(),
            RawValue::Double(v) => v.to_string(),
            RawValue::VarInt(v) => v.to_string(),
            RawValue::Decimal(v) => v.to_string(),
            RawValue::Uuid(v) => v.to_string(),
            RawValue::Timestamp(v) => v.to_string(),
            RawValue::Bytes(bytes) => to_hex(bytes),
        };
        if self.case_sensitive {
            Ok(FieldValue::Str(text))
        } else {
            Ok(FieldValue::Str(text.to_lowercase()))
        }
    }
}

/// Maps byte sequences and hex strings to lower-case unprefixed hex.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobMapper {
    pub(crate) indexed: bool,
    pub(crate) sorted: bool,
}

pub(crate) const BLOB_SUPPORTED: &[HostType] =
    &[HostType::Blob, HostType::Ascii, HostType::Text];

impl BlobMapper {
    pub fn new(indexed: bool, sorted: bool) -> Self {
        BlobMapper { indexed, sorted }
    }

    pub(crate) fn base(&self, field: &str, value: &RawValue) -> LexResult<FieldValue> {
        match value {
            RawValue::Bytes(bytes) => Ok(FieldValue::Str(to_hex(bytes))),
            RawValue::Text(s) => Ok(FieldValue::Str(normalize_hex(field, s)?)),
            other => Err(unsupported_kind(field, "blob", other)),
        }
    }
}

/// Maps IP addresses (textual or 4/16-byte binary) to their normalized
/// textual form via [std::net::IpAddr].
#[derive(Debug, Clone, PartialEq)]
pub struct InetMapper {
    pub(crate) indexed: bool,
    pub(crate) sorted: bool,
}

pub(crate) const INET_SUPPORTED: &[HostType] =
    &[HostType::Inet, HostType::Ascii, HostType::Text];

impl InetMapper {
    pub fn new(indexed: bool, sorted: bool) -> Self {
        InetMapper { indexed, sorted }
    }

    pub(crate) fn base(&self, field: &str, value: &RawValue) -> LexResult<FieldValue> {
        match value {
            RawValue::Text(s) => {
                let addr = IpAddr::from_str(s.trim()).map_err(|e| {
                    format_error(field, "inet", &format!("`{}` is not an IP address: {}", s, e))
                })?;
                Ok(FieldValue::Str(addr.to_string()))
            }
            RawValue::Bytes(bytes) => match bytes.len() {
                4 => {
                    let mut octets = [0u8; 4];
                    octets.copy_from_slice(bytes);
                    Ok(FieldValue::Str(IpAddr::from(octets).to_string()))
                }
                16 => {
                    let mut octets = [0u8; 16];
                    octets.copy_from_slice(bytes);
                    Ok(FieldValue::Str(IpAddr::from(octets).to_string()))
                }
                n => Err(format_error(
                    field,
                    "inet",
                    &format!("{} bytes is not a valid IP address length", n),
                )),
            },
            other => Err(unsupported_kind(field, "inet", other)),
        }
    }
}

/// Lower-case hex rendering of a byte slice.
pub(crate) fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

/// Normalizes a hex string: strips an optional "0x"/"0X" prefix, validates
/// the digits, rejects odd lengths, lower-cases.
pub(crate) fn normalize_hex(field: &str, input: &str) -> LexResult<String> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format_error(
            field,
            "blob",
            &format!("`{}` is not a hex string", input),
        ));
    }
    if digits.len() % 2 != 0 {
        return Err(format_error(
            field,
            "blob",
            &format!("hex string `{}` has odd length", input),
        ));
    }
    Ok(digits.to_lowercase())
}
