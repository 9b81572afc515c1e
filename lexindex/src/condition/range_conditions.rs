use serde::{Deserialize, Serialize};

use crate::column::RawValue;
use crate::condition::{default_boost, is_default_boost, resolve_indexed};
use crate::errors::LexResult;
use crate::field::FieldValue;
use crate::schema::Schema;
use crate::search::NativeQuery;

/// Interval match over a field's base domain.
///
/// Bounds run through the field's mapper like indexed values do, so a
/// range over a big_decimal field compares fixed-width encoded strings and
/// still means what the caller wrote. Either bound may be absent; both
/// default to exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeCondition {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<serde_json::Value>,
    #[serde(default)]
    pub include_lower: bool,
    #[serde(default)]
    pub include_upper: bool,
    #[serde(default = "default_boost", skip_serializing_if = "is_default_boost")]
    pub boost: f32,
}

impl RangeCondition {
    pub(crate) fn compile(&self, schema: &Schema) -> LexResult<NativeQuery> {
        let mapper = resolve_indexed(schema, &self.field)?;
        let bound = |value: &Option<serde_json::Value>| -> LexResult<Option<FieldValue>> {
            match value {
                None => Ok(None),
                Some(v) => {
                    let raw = RawValue::from_json(v)?;
                    Ok(Some(mapper.base(&self.field, &raw)?))
                }
            }
        };
        Ok(NativeQuery::Range {
            field: self.field.clone(),
            lower: bound(&self.lower)?,
            upper: bound(&self.upper)?,
            include_lower: self.include_lower,
            include_upper: self.include_upper,
        })
    }
}
