//! Search conditions and their compilation to native queries.
//!
//! A [`Condition`] is the JSON-facing query model. [`Condition::compile`]
//! turns it into a [`crate::search::NativeQuery`] against a
//! [`crate::schema::Schema`], resolving each referenced field to its mapper.

mod basic_conditions;
mod bitemporal_conditions;
#[allow(clippy::module_inception)]
mod condition;
pub mod fluent;
mod geo_conditions;
mod logical_conditions;
mod pattern_conditions;
mod range_conditions;

pub use basic_conditions::{AllCondition, MatchCondition, NoneCondition, RawCondition};
pub use bitemporal_conditions::{BitemporalCondition, BitemporalOperation};
pub use condition::Condition;
pub use fluent::{
    all, bitemporal, boolean, fuzzy, geo_bbox, geo_distance, geo_shape, match_condition, none,
    phrase, prefix, range, raw, regexp, wildcard,
};
pub use geo_conditions::{GeoBboxCondition, GeoDistanceCondition, GeoShapeCondition};
pub use logical_conditions::BooleanCondition;
pub use pattern_conditions::{
    FuzzyCondition, PhraseCondition, PrefixCondition, RegexpCondition, WildcardCondition,
};
pub use range_conditions::RangeCondition;

use crate::errors::{ErrorKind, LexError, LexResult};
use crate::mapper::Mapper;
use crate::schema::Schema;

/// Boost applied when none is given.
pub const DEFAULT_BOOST: f32 = 1.0;

pub(crate) fn default_boost() -> f32 {
    DEFAULT_BOOST
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_default_boost(boost: &f32) -> bool {
    *boost == DEFAULT_BOOST
}

/// Looks up the mapper for `field` and checks that it is indexed.
pub(crate) fn resolve_indexed<'a>(schema: &'a Schema, field: &str) -> LexResult<&'a Mapper> {
    let mapper = schema.mapper(field).ok_or_else(|| {
        LexError::new(
            &format!("no mapper found for field `{}`", field),
            ErrorKind::ConfigError,
        )
    })?;
    if !mapper.indexed() {
        return Err(LexError::new(
            &format!("field `{}` is not indexed", field),
            ErrorKind::UnsupportedOperation,
        ));
    }
    Ok(mapper)
}
