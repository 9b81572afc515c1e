//! Boolean composition and range queries against the in-memory engine.

use lexindex::column::{Columns, HostType};
use lexindex::condition::{all, boolean, match_condition, none, range, Condition};
use lexindex::search::NativeQuery;
use lexindex_int_test::engine::MemoryEngine;
use serde_json::json;

#[ctor::ctor]
fn init() {
    colog::init();
}

fn people_engine() -> MemoryEngine {
    let schema = lexindex::Schema::from_json(
        r#"{"fields": {
            "name":   {"type": "string"},
            "age":    {"type": "integer"},
            "active": {"type": "boolean"}
        }}"#,
    )
    .unwrap();
    let mut engine = MemoryEngine::new(schema);
    let rows = [
        (1u64, "alice", 30, true),
        (2, "bob", 41, false),
        (3, "carol", 25, true),
        (4, "dave", 58, true),
        (5, "erin", 30, false),
    ];
    for (id, name, age, active) in rows {
        let columns = Columns::new()
            .add("name", name, HostType::Text)
            .add("age", age, HostType::Int)
            .add("active", active, HostType::Boolean);
        engine.insert(id, &columns).unwrap();
    }
    engine
}

fn run(engine: &MemoryEngine, condition: impl Into<Condition>) -> Vec<u64> {
    let query = condition.into().compile(engine.schema()).unwrap();
    engine.search(&query).unwrap()
}

#[test]
fn test_all_and_none() {
    let engine = people_engine();
    assert_eq!(run(&engine, all()), vec![1, 2, 3, 4, 5]);
    assert_eq!(run(&engine, none()), Vec::<u64>::new());
}

#[test]
fn test_empty_boolean_matches_nothing() {
    let engine = people_engine();
    assert_eq!(run(&engine, boolean()), Vec::<u64>::new());
}

#[test]
fn test_not_alone_excludes_from_everything() {
    let engine = people_engine();
    let condition = boolean().not(match_condition("active", json!(true)));
    assert_eq!(run(&engine, condition), vec![2, 5]);
}

#[test]
fn test_must_and_not() {
    let engine = people_engine();
    let condition = boolean()
        .must(range("age").lower(json!(28)).include_lower(true))
        .not(match_condition("active", json!(false)));
    assert_eq!(run(&engine, condition), vec![1, 4]);
}

#[test]
fn test_should_alone_is_a_disjunction() {
    let engine = people_engine();
    let condition = boolean()
        .should(match_condition("name", json!("bob")))
        .should(match_condition("name", json!("carol")));
    assert_eq!(run(&engine, condition), vec![2, 3]);
}

#[test]
fn test_should_is_optional_next_to_must() {
    let engine = people_engine();
    let condition = boolean()
        .must(match_condition("active", json!(true)))
        .should(match_condition("name", json!("nobody")));
    assert_eq!(run(&engine, condition), vec![1, 3, 4]);
}

#[test]
fn test_exclusive_range_bounds() {
    let engine = people_engine();
    let condition = range("age").lower(json!(25)).upper(json!(41));
    assert_eq!(run(&engine, condition), vec![1, 5]);
}

#[test]
fn test_inclusive_range_bounds() {
    let engine = people_engine();
    let condition = range("age")
        .lower(json!(25))
        .upper(json!(41))
        .include_lower(true)
        .include_upper(true);
    assert_eq!(run(&engine, condition), vec![1, 2, 3, 5]);
}

#[test]
fn test_boost_does_not_change_matching() {
    let engine = people_engine();
    let boosted = match_condition("name", json!("alice")).boost(2.0);
    let query = Condition::from(boosted).compile(engine.schema()).unwrap();
    assert!(matches!(query, NativeQuery::Boost { .. }));
    assert_eq!(engine.search(&query).unwrap(), vec![1]);
}

#[test]
fn test_nested_boolean() {
    let engine = people_engine();
    let condition = boolean()
        .must(
            boolean()
                .should(match_condition("age", json!(30)))
                .should(match_condition("age", json!(58))),
        )
        .not(match_condition("name", json!("erin")));
    assert_eq!(run(&engine, condition), vec![1, 4]);
}

#[test]
fn test_delete_removes_document() {
    let mut engine = people_engine();
    assert!(engine.delete(2));
    assert!(!engine.delete(2));
    assert_eq!(run(&engine, all()), vec![1, 3, 4, 5]);
}

#[test]
fn test_unknown_field_is_rejected_at_compile() {
    let engine = people_engine();
    let err = Condition::from(match_condition("missing", json!(1)))
        .compile(engine.schema())
        .unwrap_err();
    assert_eq!(err.kind(), &lexindex::errors::ErrorKind::ConfigError);
}
