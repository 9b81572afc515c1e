//! JSON round-trips of schema configurations and conditions, and
//! equivalence between the fluent builders and hand-written JSON.

use lexindex::condition::{boolean, geo_distance, match_condition, phrase, range, Condition};
use lexindex::schema::{
    bitemporal_mapper, date_mapper, geo_point_mapper, string_mapper, text_mapper, SchemaBuilder,
    SchemaConfig,
};
use serde_json::json;

#[ctor::ctor]
fn init() {
    colog::init();
}

const SCHEMA_JSON: &str = r#"{
    "default_analyzer": "lowercase",
    "fields": {
        "name":  {"type": "string", "case_sensitive": false},
        "bio":   {"type": "text", "analyzer": "standard"},
        "born":  {"type": "date", "pattern": "%Y/%m/%d"},
        "place": {"type": "geo_point", "latitude": "lat", "longitude": "lon"}
    }
}"#;

#[test]
fn test_schema_config_round_trip() {
    let config = SchemaConfig::from_json(SCHEMA_JSON).unwrap();
    let json = config.to_json().unwrap();
    let reparsed = SchemaConfig::from_json(&json).unwrap();
    assert_eq!(reparsed, config);
}

#[test]
fn test_builder_equals_json() {
    let built = SchemaBuilder::new()
        .default_analyzer("lowercase")
        .field("name", string_mapper().case_sensitive(false))
        .field("bio", text_mapper().analyzer("standard"))
        .field("born", date_mapper().pattern("%Y/%m/%d"))
        .field("place", geo_point_mapper("lat", "lon"));
    assert_eq!(built.config(), &SchemaConfig::from_json(SCHEMA_JSON).unwrap());
}

#[test]
fn test_schema_preserves_field_order() {
    let schema = SchemaConfig::from_json(SCHEMA_JSON).unwrap().build().unwrap();
    let names: Vec<&str> = schema.field_names().collect();
    assert_eq!(names, vec!["name", "bio", "born", "place"]);
}

#[test]
fn test_unknown_mapper_type_is_an_error() {
    let err = SchemaConfig::from_json(r#"{"fields": {"x": {"type": "quantum"}}}"#).unwrap_err();
    assert_eq!(err.kind(), &lexindex::errors::ErrorKind::ParseError);
    assert!(err.cause().is_some());
}

#[test]
fn test_invalid_analyzer_fails_at_build() {
    let config = SchemaConfig::from_json(
        r#"{"fields": {"bio": {"type": "text", "analyzer": "nope"}}}"#,
    )
    .unwrap();
    let err = config.build().unwrap_err();
    assert_eq!(err.kind(), &lexindex::errors::ErrorKind::ConfigError);
}

#[test]
fn test_bitemporal_builder_round_trip() {
    let built = SchemaBuilder::new()
        .field("rec", bitemporal_mapper("vtf", "vtt", "ttf", "ttt").now_value("NOW"))
        .config()
        .to_json()
        .unwrap();
    let reparsed = SchemaConfig::from_json(&built).unwrap();
    assert_eq!(reparsed.to_json().unwrap(), built);
}

#[test]
fn test_condition_round_trip() {
    let condition: Condition = boolean()
        .must(match_condition("name", json!("alice")).boost(2.0))
        .must(range("age").lower(json!(18)).include_lower(true))
        .should(phrase("bio", &["hello", "world"]).slop(1))
        .not(geo_distance("place", 40.0, -3.7, "10km"))
        .into();
    let json = condition.to_json().unwrap();
    assert_eq!(Condition::from_json(&json).unwrap(), condition);
}

#[test]
fn test_condition_defaults_are_omitted() {
    let condition: Condition = match_condition("name", json!("alice")).into();
    let json = condition.to_json().unwrap();
    assert!(!json.contains("boost"));
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["type"], "match");
}

#[test]
fn test_condition_unknown_type_is_parse_error() {
    let err = Condition::from_json(r#"{"type": "telepathy", "field": "x"}"#).unwrap_err();
    assert_eq!(err.kind(), &lexindex::errors::ErrorKind::ParseError);
}

#[test]
fn test_condition_json_with_explicit_boost() {
    let parsed = Condition::from_json(
        r#"{"type": "range", "field": "age", "lower": 18,
            "include_lower": true, "boost": 3.0}"#,
    )
    .unwrap();
    assert_eq!(parsed.boost(), 3.0);
    let expected: Condition = range("age")
        .lower(json!(18))
        .include_lower(true)
        .boost(3.0)
        .into();
    assert_eq!(parsed, expected);
}
