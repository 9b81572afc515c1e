use serde::{Deserialize, Serialize};

use crate::condition::{default_boost, is_default_boost, Condition};
use crate::errors::LexResult;
use crate::schema::Schema;
use crate::search::NativeQuery;

/// Boolean composition of child conditions.
///
/// `must` children all have to match, `should` children contribute
/// alternatives, `not` children exclude. A boolean with no children at all
/// matches nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanCondition {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not: Vec<Condition>,
    #[serde(default = "default_boost", skip_serializing_if = "is_default_boost")]
    pub boost: f32,
}

impl BooleanCondition {
    pub(crate) fn compile(&self, schema: &Schema) -> LexResult<NativeQuery> {
        let compile_all = |children: &[Condition]| -> LexResult<Vec<NativeQuery>> {
            children.iter().map(|c| c.compile(schema)).collect()
        };
        Ok(NativeQuery::Boolean {
            must: compile_all(&self.must)?,
            should: compile_all(&self.should)?,
            not: compile_all(&self.not)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::fluent::{all, boolean, match_condition};

    fn schema() -> Schema {
        Schema::from_json(r#"{"fields": {"age": {"type": "integer"}}}"#).unwrap()
    }

    #[test]
    fn test_empty_boolean_compiles_empty() {
        let plan = boolean().compile(&schema()).unwrap();
        assert_eq!(
            plan,
            NativeQuery::Boolean {
                must: vec![],
                should: vec![],
                not: vec![]
            }
        );
    }

    #[test]
    fn test_children_compile_recursively() {
        let condition = boolean()
            .must(match_condition("age", serde_json::json!(3)))
            .not(all());
        let plan = condition.compile(&schema()).unwrap();
        match plan {
            NativeQuery::Boolean { must, should, not } => {
                assert_eq!(must.len(), 1);
                assert!(should.is_empty());
                assert_eq!(not, vec![NativeQuery::All]);
            }
            other => panic!("unexpected plan {:?}", other),
        }
    }

    #[test]
    fn test_child_errors_propagate() {
        let condition = boolean().must(match_condition("missing", serde_json::json!(1)));
        assert!(Condition::from(condition).compile(&schema()).is_err());
    }
}
