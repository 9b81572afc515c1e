use crate::column::{HostType, RawValue};
use crate::errors::LexResult;
use crate::field::FieldValue;
use crate::mapper::unsupported_kind;

pub(crate) const TEXT_SUPPORTED: &[HostType] = &[
    HostType::Ascii,
    HostType::BigInt,
    HostType::Boolean,
    HostType::Decimal,
    HostType::Double,
    HostType::Float,
    HostType::Inet,
    HostType::Int,
    HostType::SmallInt,
    HostType::Text,
    HostType::Timestamp,
    HostType::TimeUuid,
    HostType::TinyInt,
    HostType::Uuid,
    HostType::VarInt,
];

/// Maps values to analyzed full-text fields.
///
/// Unlike [`StringMapper`](crate::mapper::StringMapper) the stored value is
/// tokenized by the engine, so text fields never support sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMapper {
    pub(crate) indexed: bool,
    pub(crate) analyzer: Option<String>,
}

impl TextMapper {
    pub fn new(indexed: bool, analyzer: Option<String>) -> Self {
        TextMapper { indexed, analyzer }
    }

    /// Name of the analyzer this field was declared with, if any. Falls back
    /// to the schema default when unset.
    pub fn analyzer(&self) -> Option<&str> {
        self.analyzer.as_deref()
    }

    pub(crate) fn base(&self, field: &str, value: &RawValue) -> LexResult<FieldValue> {
        let text = match value {
            RawValue::Text(s) => s.clone(),
            RawValue::Bool(v) => v.to_string(),
            RawValue::Int(v) => v.to_string(),
            RawValue::Long(v) => v.to_string(),
            RawValue::Float(v) => v.to_string(),
            RawValue::Double(v) => v.to_string(),
            RawValue::VarInt(v) => v.to_string(),
            RawValue::Decimal(v) => v.to_string(),
            RawValue::Uuid(v) => v.to_string(),
            RawValue::Timestamp(v) => v.to_string(),
            RawValue::Bytes(_) => return Err(unsupported_kind(field, "text", value)),
        };
        Ok(FieldValue::Str(text))
    }
}
