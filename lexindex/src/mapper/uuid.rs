use uuid::Uuid;

use crate::column::{HostType, RawValue};
use crate::errors::LexResult;
use crate::field::FieldValue;
use crate::mapper::{format_error, unsupported_kind};

pub(crate) const UUID_SUPPORTED: &[HostType] = &[
    HostType::Uuid,
    HostType::TimeUuid,
    HostType::Ascii,
    HostType::Text,
];

/// Serializes a UUID into a string whose lexicographic order matches the
/// host's native UUID comparator.
///
/// The version digit leads. For time-based (v1) UUIDs the 60-bit timestamp
/// follows, re-assembled from its little-endian-ordered wire fields so the
/// string sorts chronologically, then the clock-seq/node bytes break ties.
/// All other versions keep their plain hex, giving a stable byte order.
pub fn serialize_uuid(uuid: &Uuid) -> String {
    let version = uuid.get_version_num();
    if version == 1 {
        let (time_low, time_mid, time_hi_and_version, tail) = uuid.as_fields();
        let timestamp: u64 = ((time_hi_and_version as u64 & 0x0fff) << 48)
            | ((time_mid as u64) << 32)
            | time_low as u64;
        let mut out = format!("{:01x}{:015x}", version, timestamp);
        for byte in tail {
            out.push_str(&format!("{:02x}", byte));
        }
        out
    } else {
        format!("{:01x}{}", version, uuid.simple())
    }
}

/// Maps UUID columns to the comparator-compatible sortable string.
#[derive(Debug, Clone, PartialEq)]
pub struct UuidMapper {
    pub(crate) indexed: bool,
    pub(crate) sorted: bool,
}

impl UuidMapper {
    pub fn new(indexed: bool, sorted: bool) -> Self {
        UuidMapper { indexed, sorted }
    }

    pub(crate) fn base(&self, field: &str, value: &RawValue) -> LexResult<FieldValue> {
        match value {
            RawValue::Uuid(u) => Ok(FieldValue::Str(serialize_uuid(u))),
            RawValue::Text(s) => {
                let parsed = Uuid::parse_str(s.trim()).map_err(|e| {
                    format_error(field, "uuid", &format!("`{}` is not a UUID: {}", s, e))
                })?;
                Ok(FieldValue::Str(serialize_uuid(&parsed)))
            }
            other => Err(unsupported_kind(field, "uuid", other)),
        }
    }
}
