use serde::{Deserialize, Serialize};

use crate::condition::basic_conditions::{
    AllCondition, MatchCondition, NoneCondition, RawCondition,
};
use crate::condition::bitemporal_conditions::BitemporalCondition;
use crate::condition::geo_conditions::{
    GeoBboxCondition, GeoDistanceCondition, GeoShapeCondition,
};
use crate::condition::logical_conditions::BooleanCondition;
use crate::condition::pattern_conditions::{
    FuzzyCondition, PhraseCondition, PrefixCondition, RegexpCondition, WildcardCondition,
};
use crate::condition::range_conditions::RangeCondition;
use crate::errors::{ErrorKind, LexError, LexResult};
use crate::schema::Schema;
use crate::search::NativeQuery;

/// A search condition, discriminated in JSON by the `type` key.
///
/// Conditions are declarative and schema-independent until [compiled]
/// (Condition::compile) against a schema, which resolves mappers,
/// normalizes values and validates parameters in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    All(AllCondition),
    None(NoneCondition),
    Match(MatchCondition),
    Range(RangeCondition),
    Prefix(PrefixCondition),
    Wildcard(WildcardCondition),
    Regexp(RegexpCondition),
    Fuzzy(FuzzyCondition),
    Phrase(PhraseCondition),
    Boolean(BooleanCondition),
    Raw(RawCondition),
    GeoDistance(GeoDistanceCondition),
    GeoBbox(GeoBboxCondition),
    GeoShape(GeoShapeCondition),
    Bitemporal(BitemporalCondition),
}

impl Condition {
    /// Parses a condition document.
    pub fn from_json(json: &str) -> LexResult<Condition> {
        serde_json::from_str(json).map_err(|e| {
            LexError::new_with_cause(
                "Invalid condition document",
                ErrorKind::ParseError,
                e.into(),
            )
        })
    }

    pub fn to_json(&self) -> LexResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The score multiplier attached to this condition.
    pub fn boost(&self) -> f32 {
        match self {
            Condition::All(c) => c.boost,
            Condition::None(c) => c.boost,
            Condition::Match(c) => c.boost,
            Condition::Range(c) => c.boost,
            Condition::Prefix(c) => c.boost,
            Condition::Wildcard(c) => c.boost,
            Condition::Regexp(c) => c.boost,
            Condition::Fuzzy(c) => c.boost,
            Condition::Phrase(c) => c.boost,
            Condition::Boolean(c) => c.boost,
            Condition::Raw(c) => c.boost,
            Condition::GeoDistance(c) => c.boost,
            Condition::GeoBbox(c) => c.boost,
            Condition::GeoShape(c) => c.boost,
            Condition::Bitemporal(c) => c.boost,
        }
    }

    /// Compiles into the engine-facing plan, wrapping in a boost node when
    /// the boost is not neutral.
    pub fn compile(&self, schema: &Schema) -> LexResult<NativeQuery> {
        let plan = match self {
            Condition::All(c) => c.compile(schema)?,
            Condition::None(c) => c.compile(schema)?,
            Condition::Match(c) => c.compile(schema)?,
            Condition::Range(c) => c.compile(schema)?,
            Condition::Prefix(c) => c.compile(schema)?,
            Condition::Wildcard(c) => c.compile(schema)?,
            Condition::Regexp(c) => c.compile(schema)?,
            Condition::Fuzzy(c) => c.compile(schema)?,
            Condition::Phrase(c) => c.compile(schema)?,
            Condition::Boolean(c) => c.compile(schema)?,
            Condition::Raw(c) => c.compile(schema)?,
            Condition::GeoDistance(c) => c.compile(schema)?,
            Condition::GeoBbox(c) => c.compile(schema)?,
            Condition::GeoShape(c) => c.compile(schema)?,
            Condition::Bitemporal(c) => c.compile(schema)?,
        };
        Ok(plan.boosted(self.boost()))
    }
}
