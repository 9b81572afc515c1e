//! Fluent construction of conditions.
//!
//! Every function returns the concrete condition struct, whose chainable
//! setters fill in the optional parameters; `Into<Condition>` closes it.
//!
//! ```
//! use lexindex::condition::{boolean, match_condition, range, Condition};
//!
//! let condition: Condition = boolean()
//!     .must(match_condition("name", serde_json::json!("alice")))
//!     .must(range("age").lower(serde_json::json!(18)).include_lower(true))
//!     .into();
//! ```

use crate::condition::basic_conditions::{
    AllCondition, MatchCondition, NoneCondition, RawCondition,
};
use crate::condition::bitemporal_conditions::{BitemporalCondition, BitemporalOperation};
use crate::condition::geo_conditions::{
    GeoBboxCondition, GeoDistanceCondition, GeoShapeCondition,
};
use crate::condition::logical_conditions::BooleanCondition;
use crate::condition::pattern_conditions::{
    FuzzyCondition, PhraseCondition, PrefixCondition, RegexpCondition, WildcardCondition,
    DEFAULT_MAX_EDITS, DEFAULT_MAX_EXPANSIONS,
};
use crate::condition::range_conditions::RangeCondition;
use crate::condition::{Condition, DEFAULT_BOOST};
use crate::search::ShapeOperation;
use crate::spatial::GeoTransformation;

/// Matches every document.
pub fn all() -> AllCondition {
    AllCondition {
        boost: DEFAULT_BOOST,
    }
}

/// Matches no document.
pub fn none() -> NoneCondition {
    NoneCondition {
        boost: DEFAULT_BOOST,
    }
}

/// Exact match of a value against a field.
pub fn match_condition(field: &str, value: serde_json::Value) -> MatchCondition {
    MatchCondition {
        field: field.to_string(),
        value,
        boost: DEFAULT_BOOST,
    }
}

/// Interval match; bounds default to open and exclusive.
pub fn range(field: &str) -> RangeCondition {
    RangeCondition {
        field: field.to_string(),
        lower: None,
        upper: None,
        include_lower: false,
        include_upper: false,
        boost: DEFAULT_BOOST,
    }
}

/// Boolean composition; starts with no children.
pub fn boolean() -> BooleanCondition {
    BooleanCondition {
        must: Vec::new(),
        should: Vec::new(),
        not: Vec::new(),
        boost: DEFAULT_BOOST,
    }
}

pub fn prefix(field: &str, value: &str) -> PrefixCondition {
    PrefixCondition {
        field: field.to_string(),
        value: value.to_string(),
        boost: DEFAULT_BOOST,
    }
}

pub fn wildcard(field: &str, value: &str) -> WildcardCondition {
    WildcardCondition {
        field: field.to_string(),
        value: value.to_string(),
        boost: DEFAULT_BOOST,
    }
}

pub fn regexp(field: &str, value: &str) -> RegexpCondition {
    RegexpCondition {
        field: field.to_string(),
        value: value.to_string(),
        boost: DEFAULT_BOOST,
    }
}

pub fn fuzzy(field: &str, value: &str) -> FuzzyCondition {
    FuzzyCondition {
        field: field.to_string(),
        value: value.to_string(),
        max_edits: DEFAULT_MAX_EDITS,
        prefix_length: 0,
        max_expansions: DEFAULT_MAX_EXPANSIONS,
        transpositions: true,
        boost: DEFAULT_BOOST,
    }
}

pub fn phrase(field: &str, values: &[&str]) -> PhraseCondition {
    PhraseCondition {
        field: field.to_string(),
        values: values.iter().map(|v| v.to_string()).collect(),
        slop: 0,
        boost: DEFAULT_BOOST,
    }
}

/// Engine-native query string pass-through.
pub fn raw(query: &str) -> RawCondition {
    RawCondition {
        query: query.to_string(),
        default_field: None,
        boost: DEFAULT_BOOST,
    }
}

pub fn geo_distance(field: &str, latitude: f64, longitude: f64, max_distance: &str) -> GeoDistanceCondition {
    GeoDistanceCondition {
        field: field.to_string(),
        latitude,
        longitude,
        max_distance: max_distance.to_string(),
        min_distance: None,
        boost: DEFAULT_BOOST,
    }
}

pub fn geo_bbox(
    field: &str,
    min_latitude: f64,
    max_latitude: f64,
    min_longitude: f64,
    max_longitude: f64,
) -> GeoBboxCondition {
    GeoBboxCondition {
        field: field.to_string(),
        min_latitude,
        max_latitude,
        min_longitude,
        max_longitude,
        boost: DEFAULT_BOOST,
    }
}

pub fn geo_shape(field: &str, shape: &str) -> GeoShapeCondition {
    GeoShapeCondition {
        field: field.to_string(),
        shape: shape.to_string(),
        operation: ShapeOperation::Intersects,
        transformations: Vec::new(),
        boost: DEFAULT_BOOST,
    }
}

pub fn bitemporal(field: &str) -> BitemporalCondition {
    BitemporalCondition {
        field: field.to_string(),
        vt_from: None,
        vt_to: None,
        tt_from: None,
        tt_to: None,
        operation: BitemporalOperation::Intersects,
        boost: DEFAULT_BOOST,
    }
}

impl MatchCondition {
    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

impl RangeCondition {
    pub fn lower(mut self, value: serde_json::Value) -> Self {
        self.lower = Some(value);
        self
    }

    pub fn upper(mut self, value: serde_json::Value) -> Self {
        self.upper = Some(value);
        self
    }

    pub fn include_lower(mut self, include: bool) -> Self {
        self.include_lower = include;
        self
    }

    pub fn include_upper(mut self, include: bool) -> Self {
        self.include_upper = include;
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

impl BooleanCondition {
    pub fn must<C: Into<Condition>>(mut self, condition: C) -> Self {
        self.must.push(condition.into());
        self
    }

    pub fn should<C: Into<Condition>>(mut self, condition: C) -> Self {
        self.should.push(condition.into());
        self
    }

    pub fn not<C: Into<Condition>>(mut self, condition: C) -> Self {
        self.not.push(condition.into());
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

impl FuzzyCondition {
    pub fn max_edits(mut self, max_edits: u8) -> Self {
        self.max_edits = max_edits;
        self
    }

    pub fn prefix_length(mut self, prefix_length: u32) -> Self {
        self.prefix_length = prefix_length;
        self
    }

    pub fn max_expansions(mut self, max_expansions: u32) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    pub fn transpositions(mut self, transpositions: bool) -> Self {
        self.transpositions = transpositions;
        self
    }
}

impl PhraseCondition {
    pub fn slop(mut self, slop: u32) -> Self {
        self.slop = slop;
        self
    }
}

impl RawCondition {
    pub fn default_field(mut self, field: &str) -> Self {
        self.default_field = Some(field.to_string());
        self
    }
}

impl GeoDistanceCondition {
    pub fn min_distance(mut self, distance: &str) -> Self {
        self.min_distance = Some(distance.to_string());
        self
    }
}

impl GeoShapeCondition {
    pub fn operation(mut self, operation: ShapeOperation) -> Self {
        self.operation = operation;
        self
    }

    pub fn transformation(mut self, transformation: GeoTransformation) -> Self {
        self.transformations.push(transformation);
        self
    }
}

impl BitemporalCondition {
    pub fn vt_from(mut self, value: serde_json::Value) -> Self {
        self.vt_from = Some(value);
        self
    }

    pub fn vt_to(mut self, value: serde_json::Value) -> Self {
        self.vt_to = Some(value);
        self
    }

    pub fn tt_from(mut self, value: serde_json::Value) -> Self {
        self.tt_from = Some(value);
        self
    }

    pub fn tt_to(mut self, value: serde_json::Value) -> Self {
        self.tt_to = Some(value);
        self
    }

    pub fn operation(mut self, operation: BitemporalOperation) -> Self {
        self.operation = operation;
        self
    }
}

macro_rules! into_condition {
    ($($struct_name:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$struct_name> for Condition {
                fn from(condition: $struct_name) -> Condition {
                    Condition::$variant(condition)
                }
            }
        )*
    };
}

into_condition!(
    AllCondition => All,
    NoneCondition => None,
    MatchCondition => Match,
    RangeCondition => Range,
    PrefixCondition => Prefix,
    WildcardCondition => Wildcard,
    RegexpCondition => Regexp,
    FuzzyCondition => Fuzzy,
    PhraseCondition => Phrase,
    BooleanCondition => Boolean,
    RawCondition => Raw,
    GeoDistanceCondition => GeoDistance,
    GeoBboxCondition => GeoBbox,
    GeoShapeCondition => GeoShape,
    BitemporalCondition => Bitemporal,
);
