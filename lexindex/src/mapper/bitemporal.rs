use crate::column::{Columns, HostType, RawValue};
use crate::errors::{ErrorKind, LexError, LexResult};
use crate::field::{Field, FieldValue};
use crate::mapper::date::DateParser;
use crate::mapper::format_error;

pub(crate) const BITEMPORAL_SUPPORTED: &[HostType] = &[
    HostType::Ascii,
    HostType::BigInt,
    HostType::Int,
    HostType::SmallInt,
    HostType::Text,
    HostType::Timestamp,
    HostType::TimeUuid,
    HostType::TinyInt,
    HostType::Uuid,
];

/// Maps the four endpoints of a bitemporal record (valid time and
/// transaction time) to `<name>.vt_from|vt_to|tt_from|tt_to` long fields.
///
/// A column equal to the configured `now_value` sentinel marks an open
/// interval end and encodes as `i64::MAX`, so still-current rows sort and
/// range after every closed one.
#[derive(Debug, Clone, PartialEq)]
pub struct BitemporalMapper {
    pub(crate) vt_from: String,
    pub(crate) vt_to: String,
    pub(crate) tt_from: String,
    pub(crate) tt_to: String,
    pub(crate) parser: DateParser,
    pub(crate) now_value: Option<String>,
    pub(crate) validated: bool,
}

impl BitemporalMapper {
    pub fn new(
        vt_from: &str,
        vt_to: &str,
        tt_from: &str,
        tt_to: &str,
        pattern: &str,
        now_value: Option<String>,
        validated: bool,
    ) -> LexResult<Self> {
        for (option, value) in [
            ("vt_from", vt_from),
            ("vt_to", vt_to),
            ("tt_from", tt_from),
            ("tt_to", tt_to),
        ] {
            if value.is_empty() {
                return Err(LexError::new(
                    &format!("bitemporal mapper requires the `{}` column name", option),
                    ErrorKind::ConfigError,
                ));
            }
        }
        Ok(BitemporalMapper {
            vt_from: vt_from.to_string(),
            vt_to: vt_to.to_string(),
            tt_from: tt_from.to_string(),
            tt_to: tt_to.to_string(),
            parser: DateParser::new(pattern)?,
            now_value,
            validated,
        })
    }

    pub fn parser(&self) -> &DateParser {
        &self.parser
    }

    pub fn now_value(&self) -> Option<&str> {
        self.now_value.as_deref()
    }

    pub(crate) fn fields(&self, name: &str, columns: &Columns) -> LexResult<Vec<Field>> {
        let endpoints = [
            ("vt_from", &self.vt_from),
            ("vt_to", &self.vt_to),
            ("tt_from", &self.tt_from),
            ("tt_to", &self.tt_to),
        ];
        let mut values = Vec::with_capacity(4);
        let mut present = 0usize;
        for (suffix, column) in &endpoints {
            match columns.first(column) {
                None => values.push((*suffix, None)),
                Some(c) => {
                    present += 1;
                    values.push((*suffix, Some(self.endpoint(column, c.value())?)));
                }
            }
        }
        if present == 0 {
            return Ok(Vec::new());
        }
        if present < endpoints.len() {
            return Err(format_error(
                name,
                "bitemporal",
                "all four interval endpoints must be present or all absent",
            ));
        }
        if self.validated {
            self.check_interval(name, "valid time", values[0].1, values[1].1)?;
            self.check_interval(name, "transaction time", values[2].1, values[3].1)?;
        }
        Ok(values
            .into_iter()
            .filter_map(|(suffix, value)| {
                value.map(|v| {
                    Field::new(&format!("{}.{}", name, suffix), FieldValue::Long(v), true, true)
                })
            })
            .collect())
    }

    fn endpoint(&self, column: &str, value: &RawValue) -> LexResult<i64> {
        if let (Some(sentinel), RawValue::Text(s)) = (&self.now_value, value) {
            if s == sentinel {
                return Ok(i64::MAX);
            }
        }
        self.parser.parse(column, value)
    }

    fn check_interval(
        &self,
        name: &str,
        label: &str,
        from: Option<i64>,
        to: Option<i64>,
    ) -> LexResult<()> {
        if let (Some(from), Some(to)) = (from, to) {
            if to < from {
                return Err(LexError::new(
                    &format!(
                        "Field `{}`: {} interval ends ({}) before it starts ({})",
                        name, label, to, from
                    ),
                    ErrorKind::ValidationError,
                ));
            }
        }
        Ok(())
    }
}
