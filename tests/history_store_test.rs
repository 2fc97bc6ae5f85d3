//! Tests for the JSON-file history store.

use strictly_darts::{HistoryStore, JsonFileStore, TurnRecord};

fn record(player: &str, throws: Vec<u32>) -> TurnRecord {
    TurnRecord::new(player.to_string(), throws)
}

#[test]
fn test_append_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("history.json"));

    let turns = vec![record("Alice", vec![60, 60]), record("Bob", vec![30, 25])];
    store.append_match("2026-08-06T12:00:00+00:00", &turns).unwrap();

    let log = store.load().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log.get("2026-08-06T12:00:00+00:00"), Some(&turns));
}

#[test]
fn test_append_merges_with_existing_matches() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("history.json"));

    store
        .append_match("2026-08-06T12:00:00+00:00", &[record("Alice", vec![101])])
        .unwrap();
    store
        .append_match("2026-08-06T13:00:00+00:00", &[record("Bob", vec![50, 51])])
        .unwrap();

    let log = store.load().unwrap();
    assert_eq!(log.len(), 2);
    assert!(log.contains_key("2026-08-06T12:00:00+00:00"));
    assert!(log.contains_key("2026-08-06T13:00:00+00:00"));
}

#[test]
fn test_missing_file_reads_as_empty_log() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nothing_here.json"));

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_unparseable_file_reads_as_empty_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(store.load().unwrap().is_empty());

    store
        .append_match("2026-08-06T12:00:00+00:00", &[record("Alice", vec![101])])
        .unwrap();
    assert_eq!(store.load().unwrap().len(), 1);
}
