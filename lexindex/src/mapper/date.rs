use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::column::{HostType, RawValue};
use crate::errors::{ErrorKind, LexError, LexResult};
use crate::field::FieldValue;
use crate::mapper::numeric::parse_long;
use crate::mapper::{format_error, unsupported_kind};

/// Default datetime pattern for date-domain mappers.
pub const DEFAULT_DATE_PATTERN: &str = "%Y/%m/%d %H:%M:%S%.3f";

pub(crate) const DATE_SUPPORTED: &[HostType] = &[
    HostType::Timestamp,
    HostType::TimeUuid,
    HostType::TinyInt,
    HostType::SmallInt,
    HostType::Int,
    HostType::BigInt,
    HostType::VarInt,
    HostType::Ascii,
    HostType::Text,
];

/// Pattern-driven parser turning raw values into epoch milliseconds.
///
/// Shared by the date and bitemporal mappers. Numeric input is taken as
/// epoch milliseconds directly (fractional input truncates toward zero);
/// strings go through the configured chrono pattern; time-based UUIDs
/// contribute their embedded timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct DateParser {
    pattern: String,
}

impl DateParser {
    /// Builds a parser, validating the pattern up front so a bad pattern is
    /// a configuration error at schema-build time, not a per-value failure.
    pub fn new(pattern: &str) -> LexResult<Self> {
        let invalid = StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
        if invalid || pattern.is_empty() {
            return Err(LexError::new(
                &format!("`{}` is not a valid date pattern", pattern),
                ErrorKind::ConfigError,
            ));
        }
        Ok(DateParser {
            pattern: pattern.to_string(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Parses one raw value into epoch milliseconds.
    pub fn parse(&self, field: &str, value: &RawValue) -> LexResult<i64> {
        match value {
            RawValue::Timestamp(ms) => Ok(*ms),
            RawValue::Int(_)
            | RawValue::Long(_)
            | RawValue::Float(_)
            | RawValue::Double(_)
            | RawValue::VarInt(_) => parse_long(field, "date", value),
            RawValue::Text(s) => self.parse_text(field, s),
            RawValue::Uuid(u) => {
                let ts = u.get_timestamp().ok_or_else(|| {
                    format_error(
                        field,
                        "date",
                        &format!("UUID `{}` carries no timestamp", u),
                    )
                })?;
                let (secs, nanos) = ts.to_unix();
                Ok(secs as i64 * 1000 + nanos as i64 / 1_000_000)
            }
            other => Err(unsupported_kind(field, "date", other)),
        }
    }

    fn parse_text(&self, field: &str, text: &str) -> LexResult<i64> {
        let trimmed = text.trim();
        // try a zoned datetime first, then a naive one (taken as UTC),
        // then a bare date at midnight
        if let Ok(dt) = DateTime::parse_from_str(trimmed, &self.pattern) {
            return Ok(dt.timestamp_millis());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, &self.pattern) {
            return Ok(dt.and_utc().timestamp_millis());
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, &self.pattern) {
            let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
                LexError::new("invalid midnight", ErrorKind::InternalError)
            })?;
            return Ok(midnight.and_utc().timestamp_millis());
        }
        Err(format_error(
            field,
            "date",
            &format!(
                "`{}` cannot be parsed with pattern `{}`",
                text, self.pattern
            ),
        ))
    }
}

/// Maps date columns to a 64-bit epoch-millisecond timestamp.
///
/// The sorted representation is the numeric value itself; no string
/// transform is needed for fixed-width numeric doc-values.
#[derive(Debug, Clone, PartialEq)]
pub struct DateMapper {
    pub(crate) indexed: bool,
    pub(crate) sorted: bool,
    pub(crate) parser: DateParser,
}

impl DateMapper {
    pub fn new(indexed: bool, sorted: bool, pattern: &str) -> LexResult<Self> {
        Ok(DateMapper {
            indexed,
            sorted,
            parser: DateParser::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.parser.pattern()
    }

    pub(crate) fn base(&self, field: &str, value: &RawValue) -> LexResult<FieldValue> {
        Ok(FieldValue::Long(self.parser.parse(field, value)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> DateMapper {
        DateMapper::new(true, true, DEFAULT_DATE_PATTERN).unwrap()
    }

    #[test]
    fn test_default_pattern_parse() {
        let base = mapper()
            .base("f", &RawValue::Text("2014/01/01 00:00:00.000".into()))
            .unwrap();
        assert_eq!(base, FieldValue::Long(1388534400000));
    }

    #[test]
    fn test_numeric_epoch_millis() {
        assert_eq!(
            mapper().base("f", &RawValue::Long(1388534400000)).unwrap(),
            FieldValue::Long(1388534400000)
        );
        assert_eq!(
            mapper().base("f", &RawValue::Timestamp(42)).unwrap(),
            FieldValue::Long(42)
        );
    }

    #[test]
    fn test_fractional_millis_truncate() {
        assert_eq!(
            mapper().base("f", &RawValue::Double(1000.9)).unwrap(),
            FieldValue::Long(1000)
        );
        assert_eq!(
            mapper().base("f", &RawValue::Double(-1000.9)).unwrap(),
            FieldValue::Long(-1000)
        );
    }

    #[test]
    fn test_date_only_pattern_midnight() {
        let m = DateMapper::new(true, true, "%Y-%m-%d").unwrap();
        assert_eq!(
            m.base("f", &RawValue::Text("1970-01-02".into())).unwrap(),
            FieldValue::Long(86_400_000)
        );
    }

    #[test]
    fn test_bad_pattern_is_config_error() {
        let err = DateMapper::new(true, true, "%Q bogus").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ConfigError);
    }

    #[test]
    fn test_unparseable_text_is_format_error() {
        let err = mapper()
            .base("f", &RawValue::Text("tomorrow".into()))
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::FormatError);
    }

    #[test]
    fn test_rejects_non_date_kinds() {
        let err = mapper().base("f", &RawValue::Bool(true)).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnsupportedType);
        assert!(mapper().base("f", &RawValue::Bytes(vec![1])).is_err());
    }

    #[test]
    fn test_order_matches_chronology() {
        let m = mapper();
        let a = m
            .base("f", &RawValue::Text("2014/01/01 00:00:00.000".into()))
            .unwrap();
        let b = m
            .base("f", &RawValue::Text("2014/01/01 00:00:00.001".into()))
            .unwrap();
        assert!(a.as_long().unwrap() < b.as_long().unwrap());
    }
}
