//! Schema declaration, parsing and the runtime mapper registry.

mod builder;
mod config;
#[allow(clippy::module_inception)]
mod schema;

pub use builder::{
    big_decimal_mapper, big_integer_mapper, bitemporal_mapper, blob_mapper, boolean_mapper,
    date_mapper, double_mapper, float_mapper, geo_point_mapper, geo_shape_mapper, inet_mapper,
    integer_mapper, long_mapper, string_mapper, text_mapper, uuid_mapper, SchemaBuilder,
};
pub use config::{
    BigDecimalOptions, BigIntegerOptions, BitemporalOptions, DateOptions, GeoPointOptions,
    GeoShapeOptions, MapperConfig, SimpleOptions, StringOptions, TextOptions,
};
pub use schema::{Schema, SchemaConfig};
