use serde::{Deserialize, Serialize};

use crate::column::RawValue;
use crate::condition::{default_boost, is_default_boost, resolve_indexed};
use crate::errors::LexResult;
use crate::mapper::Mapper;
use crate::schema::Schema;
use crate::search::NativeQuery;

/// Matches every document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllCondition {
    #[serde(default = "default_boost", skip_serializing_if = "is_default_boost")]
    pub boost: f32,
}

impl AllCondition {
    pub(crate) fn compile(&self, _schema: &Schema) -> LexResult<NativeQuery> {
        Ok(NativeQuery::All)
    }
}

/// Matches no document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoneCondition {
    #[serde(default = "default_boost", skip_serializing_if = "is_default_boost")]
    pub boost: f32,
}

impl NoneCondition {
    pub(crate) fn compile(&self, _schema: &Schema) -> LexResult<NativeQuery> {
        Ok(NativeQuery::None)
    }
}

/// Exact match of one value against a field.
///
/// The queried value travels through the field's mapper, so it meets the
/// index in the same normalized form the indexed values did. On a text
/// field the value is analyzed instead and every token must occur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCondition {
    pub field: String,
    pub value: serde_json::Value,
    #[serde(default = "default_boost", skip_serializing_if = "is_default_boost")]
    pub boost: f32,
}

impl MatchCondition {
    pub(crate) fn compile(&self, schema: &Schema) -> LexResult<NativeQuery> {
        let mapper = resolve_indexed(schema, &self.field)?;
        if matches!(mapper, Mapper::Text(_)) {
            let analyzer = schema.analyzer_of(&self.field)?;
            let text = match &self.value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let mut terms = analyzer.analyze(&text);
            return Ok(match terms.len() {
                0 => NativeQuery::None,
                1 => NativeQuery::Term {
                    field: self.field.clone(),
                    value: crate::field::FieldValue::Str(terms.remove(0)),
                },
                _ => NativeQuery::AllTerms {
                    field: self.field.clone(),
                    values: terms,
                },
            });
        }
        let raw = RawValue::from_json(&self.value)?;
        let base = mapper.base(&self.field, &raw)?;
        Ok(NativeQuery::Term {
            field: self.field.clone(),
            value: base,
        })
    }
}

/// Engine-native query string, passed through uninterpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCondition {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_field: Option<String>,
    #[serde(default = "default_boost", skip_serializing_if = "is_default_boost")]
    pub boost: f32,
}

impl RawCondition {
    pub(crate) fn compile(&self, _schema: &Schema) -> LexResult<NativeQuery> {
        Ok(NativeQuery::Raw {
            query: self.query.clone(),
            default_field: self.default_field.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::field::FieldValue;

    fn schema() -> Schema {
        Schema::from_json(
            r#"{"fields": {
                "name": {"type": "string", "case_sensitive": false},
                "body": {"type": "text"},
                "hidden": {"type": "long", "indexed": false},
                "age": {"type": "integer"}
            }}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_match_normalizes_through_mapper() {
        let condition = MatchCondition {
            field: "name".into(),
            value: serde_json::json!("Alice"),
            boost: 1.0,
        };
        // case-insensitive string mapper lowercases the queried value too
        assert_eq!(
            condition.compile(&schema()).unwrap(),
            NativeQuery::Term {
                field: "name".into(),
                value: FieldValue::Str("alice".into())
            }
        );
    }

    #[test]
    fn test_match_analyzes_text_fields() {
        let condition = MatchCondition {
            field: "body".into(),
            value: serde_json::json!("Hello World"),
            boost: 1.0,
        };
        assert_eq!(
            condition.compile(&schema()).unwrap(),
            NativeQuery::AllTerms {
                field: "body".into(),
                values: vec!["hello".into(), "world".into()]
            }
        );
    }

    #[test]
    fn test_match_unknown_field() {
        let condition = MatchCondition {
            field: "missing".into(),
            value: serde_json::json!(1),
            boost: 1.0,
        };
        assert_eq!(
            condition.compile(&schema()).unwrap_err().kind(),
            &ErrorKind::ConfigError
        );
    }

    #[test]
    fn test_match_non_indexed_field() {
        let condition = MatchCondition {
            field: "hidden".into(),
            value: serde_json::json!(1),
            boost: 1.0,
        };
        assert_eq!(
            condition.compile(&schema()).unwrap_err().kind(),
            &ErrorKind::UnsupportedOperation
        );
    }

    #[test]
    fn test_raw_passes_through() {
        let condition = RawCondition {
            query: "age:[1 TO 3]".into(),
            default_field: Some("body".into()),
            boost: 1.0,
        };
        assert_eq!(
            condition.compile(&schema()).unwrap(),
            NativeQuery::Raw {
                query: "age:[1 TO 3]".into(),
                default_field: Some("body".into())
            }
        );
    }
}
