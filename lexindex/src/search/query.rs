use serde::{Deserialize, Serialize};

use crate::field::FieldValue;
use crate::spatial::Geometry;

/// Relation a query shape must hold against indexed shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeOperation {
    /// Query and indexed shape share at least one point.
    Intersects,
    /// The indexed shape lies entirely inside the query shape.
    IsWithin,
    /// The indexed shape contains the whole query shape.
    Contains,
}

/// The engine-facing query plan a condition compiles to.
///
/// Values inside a plan are already normalized through the field's mapper,
/// so an engine executes plans with plain comparisons and never sees raw
/// column values.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeQuery {
    /// Matches every document.
    All,
    /// Matches no document.
    None,
    /// Exact match on a normalized term.
    Term { field: String, value: FieldValue },
    /// Every term must occur, in any position.
    AllTerms { field: String, values: Vec<String> },
    /// Half-open or closed interval over the field's base domain.
    Range {
        field: String,
        lower: Option<FieldValue>,
        upper: Option<FieldValue>,
        include_lower: bool,
        include_upper: bool,
    },
    Prefix {
        field: String,
        value: String,
    },
    /// `*` and `?` glob match.
    Wildcard {
        field: String,
        value: String,
    },
    /// Full regular-expression match, pre-validated at compile time.
    Regexp {
        field: String,
        value: String,
    },
    Fuzzy {
        field: String,
        value: String,
        max_edits: u8,
        prefix_length: u32,
        max_expansions: u32,
        transpositions: bool,
    },
    /// Ordered token sequence with up to `slop` positional moves.
    Phrase {
        field: String,
        terms: Vec<String>,
        slop: u32,
    },
    Boolean {
        must: Vec<NativeQuery>,
        should: Vec<NativeQuery>,
        not: Vec<NativeQuery>,
    },
    /// Engine-native query string, handed through unparsed.
    Raw {
        query: String,
        default_field: Option<String>,
    },
    /// Annulus around a geographic point, radii in meters.
    Distance {
        field: String,
        latitude: f64,
        longitude: f64,
        min_meters: Option<f64>,
        max_meters: f64,
    },
    /// Geometry predicate against an indexed shape field.
    Shape {
        field: String,
        geometry: Geometry,
        operation: ShapeOperation,
    },
    /// Score multiplier around a child plan.
    Boost {
        query: Box<NativeQuery>,
        factor: f32,
    },
}

impl NativeQuery {
    /// Wraps a plan in a boost node unless the factor is neutral.
    pub fn boosted(self, factor: f32) -> NativeQuery {
        if factor == 1.0 {
            self
        } else {
            NativeQuery::Boost {
                query: Box::new(self),
                factor,
            }
        }
    }
}
