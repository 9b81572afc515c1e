use serde::{Deserialize, Serialize};

use crate::column::RawValue;
use crate::condition::{default_boost, is_default_boost, resolve_indexed};
use crate::errors::{ErrorKind, LexError, LexResult};
use crate::field::FieldValue;
use crate::mapper::{BitemporalMapper, Mapper};
use crate::schema::Schema;
use crate::search::NativeQuery;

/// Relation the queried interval pair must hold against indexed records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitemporalOperation {
    /// The record's intervals overlap the queried ones.
    Intersects,
    /// The record's intervals fully cover the queried ones.
    Contains,
}

fn default_bitemporal_operation() -> BitemporalOperation {
    BitemporalOperation::Intersects
}

/// Matches bitemporal records by valid-time and transaction-time intervals.
///
/// Missing endpoints open the queried interval on that side. Endpoint
/// values go through the mapper's date parser, and the mapper's `now_value`
/// sentinel is honored the same way it is at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitemporalCondition {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vt_from: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vt_to: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tt_from: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tt_to: Option<serde_json::Value>,
    #[serde(default = "default_bitemporal_operation")]
    pub operation: BitemporalOperation,
    #[serde(default = "default_boost", skip_serializing_if = "is_default_boost")]
    pub boost: f32,
}

impl BitemporalCondition {
    pub(crate) fn compile(&self, schema: &Schema) -> LexResult<NativeQuery> {
        let mapper = match resolve_indexed(schema, &self.field)? {
            Mapper::Bitemporal(m) => m,
            other => {
                return Err(LexError::new(
                    &format!(
                        "Field `{}`: bitemporal conditions need a bitemporal mapper, found {}",
                        self.field,
                        other.type_name()
                    ),
                    ErrorKind::UnsupportedOperation,
                ))
            }
        };
        let vt_from = self.endpoint(mapper, &self.vt_from, i64::MIN)?;
        let vt_to = self.endpoint(mapper, &self.vt_to, i64::MAX)?;
        let tt_from = self.endpoint(mapper, &self.tt_from, i64::MIN)?;
        let tt_to = self.endpoint(mapper, &self.tt_to, i64::MAX)?;

        let must = match self.operation {
            // record interval [f, t] overlaps query [q_from, q_to]:
            // f <= q_to and t >= q_from
            BitemporalOperation::Intersects => vec![
                upper_bound(&self.field, "vt_from", vt_to),
                lower_bound(&self.field, "vt_to", vt_from),
                upper_bound(&self.field, "tt_from", tt_to),
                lower_bound(&self.field, "tt_to", tt_from),
            ],
            // record interval covers the query: f <= q_from and t >= q_to
            BitemporalOperation::Contains => vec![
                upper_bound(&self.field, "vt_from", vt_from),
                lower_bound(&self.field, "vt_to", vt_to),
                upper_bound(&self.field, "tt_from", tt_from),
                lower_bound(&self.field, "tt_to", tt_to),
            ],
        };
        Ok(NativeQuery::Boolean {
            must,
            should: vec![],
            not: vec![],
        })
    }

    fn endpoint(
        &self,
        mapper: &BitemporalMapper,
        value: &Option<serde_json::Value>,
        open: i64,
    ) -> LexResult<i64> {
        let value = match value {
            None => return Ok(open),
            Some(v) => v,
        };
        if let (Some(sentinel), serde_json::Value::String(s)) = (mapper.now_value(), value) {
            if s == sentinel {
                return Ok(i64::MAX);
            }
        }
        let raw = RawValue::from_json(value)?;
        mapper.parser().parse(&self.field, &raw)
    }
}

fn lower_bound(field: &str, suffix: &str, value: i64) -> NativeQuery {
    NativeQuery::Range {
        field: format!("{}.{}", field, suffix),
        lower: Some(FieldValue::Long(value)),
        upper: None,
        include_lower: true,
        include_upper: false,
    }
}

fn upper_bound(field: &str, suffix: &str, value: i64) -> NativeQuery {
    NativeQuery::Range {
        field: format!("{}.{}", field, suffix),
        lower: None,
        upper: Some(FieldValue::Long(value)),
        include_lower: false,
        include_upper: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::from_json(
            r#"{"fields": {
                "rec": {"type": "bitemporal", "vt_from": "a", "vt_to": "b",
                        "tt_from": "c", "tt_to": "d", "now_value": "NOW"}
            }}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_intersects_compiles_to_four_ranges() {
        let condition = BitemporalCondition {
            field: "rec".into(),
            vt_from: Some(serde_json::json!(100)),
            vt_to: Some(serde_json::json!(200)),
            tt_from: Some(serde_json::json!(100)),
            tt_to: Some(serde_json::json!(200)),
            operation: BitemporalOperation::Intersects,
            boost: 1.0,
        };
        match condition.compile(&schema()).unwrap() {
            NativeQuery::Boolean { must, .. } => {
                assert_eq!(must.len(), 4);
                assert_eq!(must[0], upper_bound("rec", "vt_from", 200));
                assert_eq!(must[1], lower_bound("rec", "vt_to", 100));
            }
            other => panic!("unexpected plan {:?}", other),
        }
    }

    #[test]
    fn test_missing_endpoints_open_the_interval() {
        let condition = BitemporalCondition {
            field: "rec".into(),
            vt_from: None,
            vt_to: None,
            tt_from: None,
            tt_to: None,
            operation: BitemporalOperation::Intersects,
            boost: 1.0,
        };
        match condition.compile(&schema()).unwrap() {
            NativeQuery::Boolean { must, .. } => {
                assert_eq!(must[0], upper_bound("rec", "vt_from", i64::MAX));
                assert_eq!(must[1], lower_bound("rec", "vt_to", i64::MIN));
            }
            other => panic!("unexpected plan {:?}", other),
        }
    }

    #[test]
    fn test_now_sentinel() {
        let condition = BitemporalCondition {
            field: "rec".into(),
            vt_from: Some(serde_json::json!("NOW")),
            vt_to: Some(serde_json::json!("NOW")),
            tt_from: None,
            tt_to: None,
            operation: BitemporalOperation::Contains,
            boost: 1.0,
        };
        match condition.compile(&schema()).unwrap() {
            NativeQuery::Boolean { must, .. } => {
                assert_eq!(must[0], upper_bound("rec", "vt_from", i64::MAX));
            }
            other => panic!("unexpected plan {:?}", other),
        }
    }

    #[test]
    fn test_wrong_mapper_type() {
        let schema =
            Schema::from_json(r#"{"fields": {"rec": {"type": "string"}}}"#).unwrap();
        let condition = BitemporalCondition {
            field: "rec".into(),
            vt_from: None,
            vt_to: None,
            tt_from: None,
            tt_to: None,
            operation: BitemporalOperation::Intersects,
            boost: 1.0,
        };
        assert_eq!(
            condition.compile(&schema).unwrap_err().kind(),
            &ErrorKind::UnsupportedOperation
        );
    }
}
