//! Bitemporal queries over valid-time/transaction-time windows.

use lexindex::column::{Columns, HostType};
use lexindex::condition::{bitemporal, BitemporalOperation, Condition};
use lexindex_int_test::engine::MemoryEngine;
use serde_json::json;

#[ctor::ctor]
fn init() {
    colog::init();
}

/// Five monthly versions of one record; the latest is still current in
/// both dimensions.
fn version_engine() -> MemoryEngine {
    let schema = lexindex::Schema::from_json(
        r#"{"fields": {
            "rec": {"type": "bitemporal",
                    "vt_from": "vtf", "vt_to": "vtt",
                    "tt_from": "ttf", "tt_to": "ttt",
                    "pattern": "%Y/%m/%d", "now_value": "NOW"}
        }}"#,
    )
    .unwrap();
    let mut engine = MemoryEngine::new(schema);
    let versions = [
        (1u64, "2015/01/01", "2015/01/31"),
        (2, "2015/02/01", "2015/02/28"),
        (3, "2015/03/01", "2015/03/31"),
        (4, "2015/04/01", "2015/04/30"),
        (5, "2015/05/01", "NOW"),
    ];
    for (id, from, to) in versions {
        let columns = Columns::new()
            .add("vtf", from, HostType::Text)
            .add("vtt", to, HostType::Text)
            .add("ttf", from, HostType::Text)
            .add("ttt", to, HostType::Text);
        engine.insert(id, &columns).unwrap();
    }
    engine
}

fn run(engine: &MemoryEngine, condition: impl Into<Condition>) -> Vec<u64> {
    let query = condition.into().compile(engine.schema()).unwrap();
    engine.search(&query).unwrap()
}

#[test]
fn test_intersects_spanning_two_versions() {
    let engine = version_engine();
    let condition = bitemporal("rec")
        .vt_from(json!("2015/02/15"))
        .vt_to(json!("2015/03/15"));
    assert_eq!(run(&engine, condition), vec![2, 3]);
}

#[test]
fn test_intersects_single_instant() {
    let engine = version_engine();
    let condition = bitemporal("rec")
        .vt_from(json!("2015/04/10"))
        .vt_to(json!("2015/04/10"));
    assert_eq!(run(&engine, condition), vec![4]);
}

#[test]
fn test_open_interval_catches_the_current_version() {
    let engine = version_engine();
    // far in the future: only the still-open version is valid there
    let condition = bitemporal("rec").vt_from(json!("2016/01/01"));
    assert_eq!(run(&engine, condition), vec![5]);
}

#[test]
fn test_now_sentinel_in_the_query() {
    let engine = version_engine();
    let condition = bitemporal("rec").vt_from(json!("NOW"));
    assert_eq!(run(&engine, condition), vec![5]);
}

#[test]
fn test_contains_requires_full_coverage() {
    let engine = version_engine();
    let inside = bitemporal("rec")
        .vt_from(json!("2015/03/10"))
        .vt_to(json!("2015/03/20"))
        .operation(BitemporalOperation::Contains);
    assert_eq!(run(&engine, inside), vec![3]);

    let spanning = bitemporal("rec")
        .vt_from(json!("2015/03/10"))
        .vt_to(json!("2015/04/20"))
        .operation(BitemporalOperation::Contains);
    assert_eq!(run(&engine, spanning), Vec::<u64>::new());
}

#[test]
fn test_transaction_time_filters_too() {
    let engine = version_engine();
    let condition = bitemporal("rec")
        .vt_from(json!("2015/01/01"))
        .vt_to(json!("2015/12/31"))
        .tt_from(json!("2015/02/10"))
        .tt_to(json!("2015/02/20"));
    assert_eq!(run(&engine, condition), vec![2]);
}

#[test]
fn test_unconstrained_condition_matches_everything() {
    let engine = version_engine();
    assert_eq!(run(&engine, bitemporal("rec")), vec![1, 2, 3, 4, 5]);
}
