//! Fluent construction of schemas, mirroring the JSON document shape.
//!
//! ```
//! use lexindex::schema::{big_decimal_mapper, string_mapper, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new()
//!     .default_analyzer("standard")
//!     .field("name", string_mapper().case_sensitive(false))
//!     .field("price", big_decimal_mapper().integer_digits(8).decimal_digits(2))
//!     .build()
//!     .unwrap();
//! assert!(schema.mapper("price").is_some());
//! ```

use crate::errors::LexResult;
use crate::schema::config::{
    BigDecimalOptions, BigIntegerOptions, BitemporalOptions, DateOptions, GeoPointOptions,
    GeoShapeOptions, MapperConfig, SimpleOptions, StringOptions, TextOptions,
};
use crate::schema::schema::{Schema, SchemaConfig};
use crate::spatial::GeoTransformation;

/// Accumulates field declarations and builds the validated schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    config: SchemaConfig,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        SchemaBuilder::default()
    }

    pub fn default_analyzer(mut self, name: &str) -> Self {
        self.config.default_analyzer = Some(name.to_string());
        self
    }

    pub fn field<M: Into<MapperConfig>>(mut self, name: &str, mapper: M) -> Self {
        self.config.fields.insert(name.to_string(), mapper.into());
        self
    }

    /// The accumulated JSON-facing configuration.
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    pub fn build(&self) -> LexResult<Schema> {
        self.config.build()
    }
}

macro_rules! simple_mapper_builder {
    ($fn_name:ident, $builder:ident, $variant:ident) => {
        pub fn $fn_name() -> $builder {
            $builder(SimpleOptions::default())
        }

        #[derive(Debug, Clone)]
        pub struct $builder(SimpleOptions);

        impl $builder {
            pub fn indexed(mut self, indexed: bool) -> Self {
                self.0.indexed = indexed;
                self
            }

            pub fn sorted(mut self, sorted: bool) -> Self {
                self.0.sorted = sorted;
                self
            }
        }

        impl From<$builder> for MapperConfig {
            fn from(builder: $builder) -> MapperConfig {
                MapperConfig::$variant(builder.0)
            }
        }
    };
}

simple_mapper_builder!(boolean_mapper, BooleanMapperBuilder, Boolean);
simple_mapper_builder!(blob_mapper, BlobMapperBuilder, Blob);
simple_mapper_builder!(integer_mapper, IntegerMapperBuilder, Integer);
simple_mapper_builder!(long_mapper, LongMapperBuilder, Long);
simple_mapper_builder!(float_mapper, FloatMapperBuilder, Float);
simple_mapper_builder!(double_mapper, DoubleMapperBuilder, Double);
simple_mapper_builder!(uuid_mapper, UuidMapperBuilder, Uuid);
simple_mapper_builder!(inet_mapper, InetMapperBuilder, Inet);

pub fn string_mapper() -> StringMapperBuilder {
    StringMapperBuilder(StringOptions::default())
}

#[derive(Debug, Clone)]
pub struct StringMapperBuilder(StringOptions);

impl StringMapperBuilder {
    pub fn indexed(mut self, indexed: bool) -> Self {
        self.0.indexed = indexed;
        self
    }

    pub fn sorted(mut self, sorted: bool) -> Self {
        self.0.sorted = sorted;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.0.case_sensitive = case_sensitive;
        self
    }
}

impl From<StringMapperBuilder> for MapperConfig {
    fn from(builder: StringMapperBuilder) -> MapperConfig {
        MapperConfig::String(builder.0)
    }
}

pub fn text_mapper() -> TextMapperBuilder {
    TextMapperBuilder(TextOptions::default())
}

#[derive(Debug, Clone)]
pub struct TextMapperBuilder(TextOptions);

impl TextMapperBuilder {
    pub fn indexed(mut self, indexed: bool) -> Self {
        self.0.indexed = indexed;
        self
    }

    pub fn analyzer(mut self, analyzer: &str) -> Self {
        self.0.analyzer = Some(analyzer.to_string());
        self
    }
}

impl From<TextMapperBuilder> for MapperConfig {
    fn from(builder: TextMapperBuilder) -> MapperConfig {
        MapperConfig::Text(builder.0)
    }
}

pub fn big_integer_mapper() -> BigIntegerMapperBuilder {
    BigIntegerMapperBuilder(BigIntegerOptions::default())
}

#[derive(Debug, Clone)]
pub struct BigIntegerMapperBuilder(BigIntegerOptions);

impl BigIntegerMapperBuilder {
    pub fn indexed(mut self, indexed: bool) -> Self {
        self.0.indexed = indexed;
        self
    }

    pub fn sorted(mut self, sorted: bool) -> Self {
        self.0.sorted = sorted;
        self
    }

    pub fn digits(mut self, digits: u32) -> Self {
        self.0.digits = digits;
        self
    }
}

impl From<BigIntegerMapperBuilder> for MapperConfig {
    fn from(builder: BigIntegerMapperBuilder) -> MapperConfig {
        MapperConfig::BigInteger(builder.0)
    }
}

pub fn big_decimal_mapper() -> BigDecimalMapperBuilder {
    BigDecimalMapperBuilder(BigDecimalOptions::default())
}

#[derive(Debug, Clone)]
pub struct BigDecimalMapperBuilder(BigDecimalOptions);

impl BigDecimalMapperBuilder {
    pub fn indexed(mut self, indexed: bool) -> Self {
        self.0.indexed = indexed;
        self
    }

    pub fn sorted(mut self, sorted: bool) -> Self {
        self.0.sorted = sorted;
        self
    }

    pub fn integer_digits(mut self, digits: u32) -> Self {
        self.0.integer_digits = digits;
        self
    }

    pub fn decimal_digits(mut self, digits: u32) -> Self {
        self.0.decimal_digits = digits;
        self
    }
}

impl From<BigDecimalMapperBuilder> for MapperConfig {
    fn from(builder: BigDecimalMapperBuilder) -> MapperConfig {
        MapperConfig::BigDecimal(builder.0)
    }
}

pub fn date_mapper() -> DateMapperBuilder {
    DateMapperBuilder(DateOptions::default())
}

#[derive(Debug, Clone)]
pub struct DateMapperBuilder(DateOptions);

impl DateMapperBuilder {
    pub fn indexed(mut self, indexed: bool) -> Self {
        self.0.indexed = indexed;
        self
    }

    pub fn sorted(mut self, sorted: bool) -> Self {
        self.0.sorted = sorted;
        self
    }

    pub fn pattern(mut self, pattern: &str) -> Self {
        self.0.pattern = pattern.to_string();
        self
    }
}

impl From<DateMapperBuilder> for MapperConfig {
    fn from(builder: DateMapperBuilder) -> MapperConfig {
        MapperConfig::Date(builder.0)
    }
}

pub fn geo_point_mapper(latitude: &str, longitude: &str) -> GeoPointMapperBuilder {
    GeoPointMapperBuilder(GeoPointOptions {
        latitude: latitude.to_string(),
        longitude: longitude.to_string(),
    })
}

#[derive(Debug, Clone)]
pub struct GeoPointMapperBuilder(GeoPointOptions);

impl From<GeoPointMapperBuilder> for MapperConfig {
    fn from(builder: GeoPointMapperBuilder) -> MapperConfig {
        MapperConfig::GeoPoint(builder.0)
    }
}

pub fn geo_shape_mapper() -> GeoShapeMapperBuilder {
    GeoShapeMapperBuilder(GeoShapeOptions::default())
}

#[derive(Debug, Clone)]
pub struct GeoShapeMapperBuilder(GeoShapeOptions);

impl GeoShapeMapperBuilder {
    pub fn indexed(mut self, indexed: bool) -> Self {
        self.0.indexed = indexed;
        self
    }

    pub fn transformation(mut self, transformation: GeoTransformation) -> Self {
        self.0.transformations.push(transformation);
        self
    }
}

impl From<GeoShapeMapperBuilder> for MapperConfig {
    fn from(builder: GeoShapeMapperBuilder) -> MapperConfig {
        MapperConfig::GeoShape(builder.0)
    }
}

pub fn bitemporal_mapper(
    vt_from: &str,
    vt_to: &str,
    tt_from: &str,
    tt_to: &str,
) -> BitemporalMapperBuilder {
    BitemporalMapperBuilder(BitemporalOptions {
        vt_from: vt_from.to_string(),
        vt_to: vt_to.to_string(),
        tt_from: tt_from.to_string(),
        tt_to: tt_to.to_string(),
        pattern: crate::mapper::DEFAULT_DATE_PATTERN.to_string(),
        now_value: None,
        validated: false,
    })
}

#[derive(Debug, Clone)]
pub struct BitemporalMapperBuilder(BitemporalOptions);

impl BitemporalMapperBuilder {
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.0.pattern = pattern.to_string();
        self
    }

    pub fn now_value(mut self, now_value: &str) -> Self {
        self.0.now_value = Some(now_value.to_string());
        self
    }

    pub fn validated(mut self, validated: bool) -> Self {
        self.0.validated = validated;
        self
    }
}

impl From<BitemporalMapperBuilder> for MapperConfig {
    fn from(builder: BitemporalMapperBuilder) -> MapperConfig {
        MapperConfig::Bitemporal(builder.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::Mapper;

    #[test]
    fn test_builder_matches_json() {
        let built = SchemaBuilder::new()
            .default_analyzer("standard")
            .field("name", string_mapper().case_sensitive(false))
            .field("n", big_integer_mapper().digits(10))
            .config()
            .clone();
        let parsed = SchemaConfig::from_json(
            r#"{
                "default_analyzer": "standard",
                "fields": {
                    "name": {"type": "string", "case_sensitive": false},
                    "n": {"type": "big_integer", "digits": 10}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn test_builder_builds_schema() {
        let schema = SchemaBuilder::new()
            .field("at", date_mapper().pattern("%Y-%m-%d"))
            .field("rec", bitemporal_mapper("a", "b", "c", "d").now_value("NOW"))
            .build()
            .unwrap();
        match schema.mapper("at").unwrap() {
            Mapper::Date(m) => assert_eq!(m.pattern(), "%Y-%m-%d"),
            other => panic!("unexpected mapper {:?}", other),
        }
    }

    #[test]
    fn test_builder_surfaces_config_errors() {
        let result = SchemaBuilder::new()
            .field("n", big_integer_mapper().digits(0))
            .build();
        assert!(result.is_err());
    }
}
