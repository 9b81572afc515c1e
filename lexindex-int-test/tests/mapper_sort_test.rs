//! Order preservation of the sortable encodings, checked through the
//! engine's sort path instead of against raw encoder output.

use chrono::{TimeZone, Utc};
use lexindex::column::{Columns, HostType, RawValue};
use lexindex_int_test::engine::MemoryEngine;
use uuid::{Context, Timestamp, Uuid};

#[ctor::ctor]
fn init() {
    colog::init();
}

fn sort_engine() -> MemoryEngine {
    lexindex::Schema::from_json(
        r#"{"fields": {
            "score":   {"type": "double"},
            "balance": {"type": "big_decimal", "integer_digits": 6, "decimal_digits": 4},
            "serial":  {"type": "big_integer", "digits": 10},
            "born":    {"type": "date", "pattern": "%Y/%m/%d"},
            "id":      {"type": "uuid"}
        }}"#,
    )
    .map(MemoryEngine::new)
    .unwrap()
}

fn v1_at(seconds: u64) -> Uuid {
    let ts = Timestamp::from_unix(Context::new(0), seconds, 0);
    Uuid::new_v1(ts, &[1, 2, 3, 4, 5, 6])
}

#[test]
fn test_sort_doubles() {
    let mut engine = sort_engine();
    let values = [(1u64, 3.25), (2, -1e9), (3, 0.0), (4, -2.5), (5, 1e-3)];
    for (id, score) in values {
        let columns = Columns::new().add("score", score, HostType::Double);
        engine.insert(id, &columns).unwrap();
    }
    let sorted = engine.sort("score", &[1, 2, 3, 4, 5]).unwrap();
    assert_eq!(sorted, vec![2, 4, 3, 5, 1]);
}

#[test]
fn test_sort_big_decimals() {
    let mut engine = sort_engine();
    let values = [
        (1u64, "-123.45"),
        (2, "0"),
        (3, "250.5"),
        (4, "-0.01"),
        (5, "9999.9999"),
    ];
    for (id, balance) in values {
        let columns = Columns::new().add("balance", balance, HostType::Text);
        engine.insert(id, &columns).unwrap();
    }
    let sorted = engine.sort("balance", &[1, 2, 3, 4, 5]).unwrap();
    assert_eq!(sorted, vec![1, 4, 2, 3, 5]);
}

#[test]
fn test_sort_big_integers() {
    let mut engine = sort_engine();
    let values = [(1u64, "987654"), (2, "-12"), (3, "0"), (4, "45"), (5, "-99999")];
    for (id, serial) in values {
        let columns = Columns::new().add("serial", serial, HostType::Text);
        engine.insert(id, &columns).unwrap();
    }
    let sorted = engine.sort("serial", &[1, 2, 3, 4, 5]).unwrap();
    assert_eq!(sorted, vec![5, 2, 3, 4, 1]);
}

#[test]
fn test_sort_dates() {
    let mut engine = sort_engine();
    let values = [
        (1u64, "2021/06/15"),
        (2, "1969/12/31"),
        (3, "2021/01/01"),
        (4, "1994/11/05"),
    ];
    for (id, born) in values {
        let columns = Columns::new().add("born", born, HostType::Text);
        engine.insert(id, &columns).unwrap();
    }
    let sorted = engine.sort("born", &[1, 2, 3, 4]).unwrap();
    assert_eq!(sorted, vec![2, 4, 3, 1]);
}

#[test]
fn test_sort_timestamp_columns() {
    let mut engine = sort_engine();
    let stamps = [
        (1u64, Utc.with_ymd_and_hms(2021, 6, 15, 12, 0, 0).unwrap()),
        (2, Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 59).unwrap()),
        (3, Utc.with_ymd_and_hms(2021, 6, 15, 3, 30, 0).unwrap()),
    ];
    for (id, at) in stamps {
        let columns = Columns::new().add(
            "born",
            RawValue::Timestamp(at.timestamp_millis()),
            HostType::Timestamp,
        );
        engine.insert(id, &columns).unwrap();
    }
    let sorted = engine.sort("born", &[1, 2, 3]).unwrap();
    assert_eq!(sorted, vec![2, 3, 1]);
}

#[test]
fn test_sort_mixed_uuid_versions() {
    // time-based UUIDs sort chronologically and, because the serialized
    // form leads with the version digit, always before random UUIDs
    let early = v1_at(1_000_000);
    let late = v1_at(2_000_000);
    let low = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let high = Uuid::parse_str("ffffffff-eeee-4ddd-bccc-bbbbbbbbbbbb").unwrap();

    let mut engine = sort_engine();
    for (id, uuid) in [(1u64, high), (2, early), (3, low), (4, late)] {
        let columns = Columns::new().add("id", uuid, HostType::Uuid);
        engine.insert(id, &columns).unwrap();
    }
    let sorted = engine.sort("id", &[1, 2, 3, 4]).unwrap();
    assert_eq!(sorted, vec![2, 4, 3, 1]);
}

#[test]
fn test_missing_field_sorts_last() {
    let mut engine = sort_engine();
    engine
        .insert(1, &Columns::new().add("score", 5.0, HostType::Double))
        .unwrap();
    engine
        .insert(2, &Columns::new().add("born", "2000/01/01", HostType::Text))
        .unwrap();
    engine
        .insert(3, &Columns::new().add("score", -5.0, HostType::Double))
        .unwrap();
    let sorted = engine.sort("score", &[1, 2, 3]).unwrap();
    assert_eq!(sorted, vec![3, 1, 2]);
}
