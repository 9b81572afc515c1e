//! JSON-facing mapper configuration.
//!
//! One options struct per mapper type, tied together by an internally
//! tagged enum, so an unknown `type` and malformed options surface as two
//! distinct serde errors. `build` turns the parsed options into the
//! validated runtime mapper.

use serde::{Deserialize, Serialize};

use crate::errors::LexResult;
use crate::mapper::{
    BigDecimalMapper, BigIntegerMapper, BitemporalMapper, BlobMapper, BooleanMapper, DateMapper,
    DoubleMapper, FloatMapper, GeoPointMapper, GeoShapeMapper, InetMapper, IntegerMapper,
    LongMapper, Mapper, StringMapper, TextMapper, UuidMapper, DEFAULT_BIGDEC_DECIMAL_DIGITS,
    DEFAULT_BIGDEC_INTEGER_DIGITS, DEFAULT_BIGINT_DIGITS, DEFAULT_DATE_PATTERN,
};
use crate::spatial::GeoTransformation;

fn default_true() -> bool {
    true
}

fn default_bigint_digits() -> u32 {
    DEFAULT_BIGINT_DIGITS
}

fn default_integer_digits() -> u32 {
    DEFAULT_BIGDEC_INTEGER_DIGITS
}

fn default_decimal_digits() -> u32 {
    DEFAULT_BIGDEC_DECIMAL_DIGITS
}

fn default_pattern() -> String {
    DEFAULT_DATE_PATTERN.to_string()
}

/// Options shared by the plain single-value mappers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleOptions {
    #[serde(default = "default_true")]
    pub indexed: bool,
    #[serde(default = "default_true")]
    pub sorted: bool,
}

impl Default for SimpleOptions {
    fn default() -> Self {
        SimpleOptions {
            indexed: true,
            sorted: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringOptions {
    #[serde(default = "default_true")]
    pub indexed: bool,
    #[serde(default = "default_true")]
    pub sorted: bool,
    #[serde(default = "default_true")]
    pub case_sensitive: bool,
}

impl Default for StringOptions {
    fn default() -> Self {
        StringOptions {
            indexed: true,
            sorted: true,
            case_sensitive: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOptions {
    #[serde(default = "default_true")]
    pub indexed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<String>,
}

impl Default for TextOptions {
    fn default() -> Self {
        TextOptions {
            indexed: true,
            analyzer: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BigIntegerOptions {
    #[serde(default = "default_true")]
    pub indexed: bool,
    #[serde(default = "default_true")]
    pub sorted: bool,
    #[serde(default = "default_bigint_digits")]
    pub digits: u32,
}

impl Default for BigIntegerOptions {
    fn default() -> Self {
        BigIntegerOptions {
            indexed: true,
            sorted: true,
            digits: DEFAULT_BIGINT_DIGITS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BigDecimalOptions {
    #[serde(default = "default_true")]
    pub indexed: bool,
    #[serde(default = "default_true")]
    pub sorted: bool,
    #[serde(default = "default_integer_digits")]
    pub integer_digits: u32,
    #[serde(default = "default_decimal_digits")]
    pub decimal_digits: u32,
}

impl Default for BigDecimalOptions {
    fn default() -> Self {
        BigDecimalOptions {
            indexed: true,
            sorted: true,
            integer_digits: DEFAULT_BIGDEC_INTEGER_DIGITS,
            decimal_digits: DEFAULT_BIGDEC_DECIMAL_DIGITS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateOptions {
    #[serde(default = "default_true")]
    pub indexed: bool,
    #[serde(default = "default_true")]
    pub sorted: bool,
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

impl Default for DateOptions {
    fn default() -> Self {
        DateOptions {
            indexed: true,
            sorted: true,
            pattern: default_pattern(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPointOptions {
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoShapeOptions {
    #[serde(default = "default_true")]
    pub indexed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transformations: Vec<GeoTransformation>,
}

impl Default for GeoShapeOptions {
    fn default() -> Self {
        GeoShapeOptions {
            indexed: true,
            transformations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitemporalOptions {
    pub vt_from: String,
    pub vt_to: String,
    pub tt_from: String,
    pub tt_to: String,
    #[serde(default = "default_pattern")]
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now_value: Option<String>,
    #[serde(default)]
    pub validated: bool,
}

/// Per-field mapper declaration, discriminated by the `type` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapperConfig {
    Boolean(SimpleOptions),
    String(StringOptions),
    Text(TextOptions),
    Blob(SimpleOptions),
    Integer(SimpleOptions),
    Long(SimpleOptions),
    Float(SimpleOptions),
    Double(SimpleOptions),
    BigInteger(BigIntegerOptions),
    BigDecimal(BigDecimalOptions),
    Date(DateOptions),
    Uuid(SimpleOptions),
    Inet(SimpleOptions),
    GeoPoint(GeoPointOptions),
    GeoShape(GeoShapeOptions),
    Bitemporal(BitemporalOptions),
}

impl MapperConfig {
    /// Builds the runtime mapper, validating the options.
    pub fn build(&self) -> LexResult<Mapper> {
        let mapper = match self {
            MapperConfig::Boolean(o) => Mapper::Boolean(BooleanMapper::new(o.indexed, o.sorted)),
            MapperConfig::String(o) => {
                Mapper::String(StringMapper::new(o.indexed, o.sorted, o.case_sensitive))
            }
            MapperConfig::Text(o) => {
                Mapper::Text(TextMapper::new(o.indexed, o.analyzer.clone()))
            }
            MapperConfig::Blob(o) => Mapper::Blob(BlobMapper::new(o.indexed, o.sorted)),
            MapperConfig::Integer(o) => Mapper::Integer(IntegerMapper::new(o.indexed, o.sorted)),
            MapperConfig::Long(o) => Mapper::Long(LongMapper::new(o.indexed, o.sorted)),
            MapperConfig::Float(o) => Mapper::Float(FloatMapper::new(o.indexed, o.sorted)),
            MapperConfig::Double(o) => Mapper::Double(DoubleMapper::new(o.indexed, o.sorted)),
            MapperConfig::BigInteger(o) => {
                Mapper::BigInteger(BigIntegerMapper::new(o.indexed, o.sorted, o.digits)?)
            }
            MapperConfig::BigDecimal(o) => Mapper::BigDecimal(BigDecimalMapper::new(
                o.indexed,
                o.sorted,
                o.integer_digits,
                o.decimal_digits,
            )?),
            MapperConfig::Date(o) => {
                Mapper::Date(DateMapper::new(o.indexed, o.sorted, &o.pattern)?)
            }
            MapperConfig::Uuid(o) => Mapper::Uuid(UuidMapper::new(o.indexed, o.sorted)),
            MapperConfig::Inet(o) => Mapper::Inet(InetMapper::new(o.indexed, o.sorted)),
            MapperConfig::GeoPoint(o) => {
                Mapper::GeoPoint(GeoPointMapper::new(&o.latitude, &o.longitude)?)
            }
            MapperConfig::GeoShape(o) => {
                Mapper::GeoShape(GeoShapeMapper::new(o.indexed, o.transformations.clone()))
            }
            MapperConfig::Bitemporal(o) => Mapper::Bitemporal(BitemporalMapper::new(
                &o.vt_from,
                &o.vt_to,
                &o.tt_from,
                &o.tt_to,
                &o.pattern,
                o.now_value.clone(),
                o.validated,
            )?),
        };
        Ok(mapper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_in() {
        let config: MapperConfig = serde_json::from_str(r#"{"type": "boolean"}"#).unwrap();
        assert_eq!(config, MapperConfig::Boolean(SimpleOptions::default()));

        let config: MapperConfig = serde_json::from_str(r#"{"type": "big_decimal"}"#).unwrap();
        match &config {
            MapperConfig::BigDecimal(o) => {
                assert_eq!(o.integer_digits, 32);
                assert_eq!(o.decimal_digits, 32);
            }
            other => panic!("unexpected config {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result: Result<MapperConfig, _> = serde_json::from_str(r#"{"type": "quaternion"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_required_option_is_rejected() {
        // geo_point without its column names
        let result: Result<MapperConfig, _> = serde_json::from_str(r#"{"type": "geo_point"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trip_equality() {
        let config = MapperConfig::BigDecimal(BigDecimalOptions {
            indexed: true,
            sorted: false,
            integer_digits: 4,
            decimal_digits: 4,
        });
        let json = serde_json::to_string(&config).unwrap();
        let back: MapperConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_build_validates_options() {
        let config: MapperConfig =
            serde_json::from_str(r#"{"type": "big_integer", "digits": 0}"#).unwrap();
        assert!(config.build().is_err());

        let config: MapperConfig =
            serde_json::from_str(r#"{"type": "date", "pattern": "%Q nope"}"#).unwrap();
        assert!(config.build().is_err());
    }

    #[test]
    fn test_build_bitemporal() {
        let config: MapperConfig = serde_json::from_str(
            r#"{"type": "bitemporal", "vt_from": "a", "vt_to": "b",
                "tt_from": "c", "tt_to": "d", "now_value": "NOW"}"#,
        )
        .unwrap();
        match config.build().unwrap() {
            Mapper::Bitemporal(m) => assert_eq!(m.now_value(), Some("NOW")),
            other => panic!("unexpected mapper {:?}", other),
        }
    }
}
