//! Field mappers: one encoder per declared schema type.
//!
//! Every mapper turns raw column values into normalized base values whose
//! textual or numeric order matches the semantic order of the originals,
//! so that the engine can serve range queries and sorts over plain
//! lexicographic comparisons. Construction validates options eagerly; the
//! write path then only ever fails on bad data, never on bad config.

mod bignum;
mod bitemporal;
mod date;
mod geo;
mod keyword;
#[allow(clippy::module_inception)]
mod mapper;
mod numeric;
mod sortable;
mod text;
mod uuid;

pub use bignum::{
    BigDecimalMapper, BigIntegerMapper, DEFAULT_BIGDEC_DECIMAL_DIGITS,
    DEFAULT_BIGDEC_INTEGER_DIGITS, DEFAULT_BIGINT_DIGITS,
};
pub use bitemporal::BitemporalMapper;
pub use date::{DateMapper, DateParser, DEFAULT_DATE_PATTERN};
pub use geo::{GeoPointMapper, GeoShapeMapper};
pub use keyword::{BlobMapper, BooleanMapper, InetMapper, StringMapper};
pub use mapper::Mapper;
pub use numeric::{DoubleMapper, FloatMapper, IntegerMapper, LongMapper};
pub use sortable::{bigint_sortable, bigint_width, double_key, float_key, long_key};
pub use text::TextMapper;
pub use uuid::{serialize_uuid, UuidMapper};

use crate::column::RawValue;
use crate::errors::{ErrorKind, LexError};

/// Malformed input for a field, named after the offending mapper.
pub(crate) fn format_error(field: &str, mapper: &str, detail: &str) -> LexError {
    LexError::new(
        &format!("Field `{}` ({} mapper): {}", field, mapper, detail),
        ErrorKind::FormatError,
    )
}

/// A value kind outside the mapper's accepted set.
pub(crate) fn unsupported_kind(field: &str, mapper: &str, value: &RawValue) -> LexError {
    LexError::new(
        &format!(
            "Field `{}`: {} mapper does not accept {} value `{}`",
            field,
            mapper,
            value.kind_name(),
            value
        ),
        ErrorKind::UnsupportedType,
    )
}
