use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use mr_bundle::*;
use serde_json::{json, Value};

fn feature(value: Value) -> FeatureRecord {
    FeatureRecord::from_value(value).unwrap()
}

fn parsed(lines: &[String]) -> Vec<Value> {
    lines
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

// === Scenario 1: shared key bundled, unique key passed through ===
#[test]
fn test_two_groups_in_first_appearance_order() {
    let records = vec![
        feature(json!({"properties": {"ext": "A"}})),
        feature(json!({"properties": {"ext": "B"}})),
        feature(json!({"properties": {"ext": "A"}})),
    ];
    let out = group_by_key(records, "ext").unwrap();
    assert_eq!(
        parsed(&out),
        vec![
            json!({"type": "FeatureCollection", "features": [
                {"properties": {"ext": "A"}},
                {"properties": {"ext": "A"}}
            ]}),
            json!({"properties": {"ext": "B"}}),
        ]
    );
}

// === Scenario 2: empty input ===
#[test]
fn test_empty_input() {
    assert_eq!(group_by_key(Vec::new(), "ext").unwrap(), Vec::<String>::new());
}

// === Scenario 3: one record serializes exactly as itself ===
#[test]
fn test_single_record_is_verbatim() {
    let text = r#"{"type":"Feature","id":"way/42","geometry":{"type":"Point","coordinates":[-1.5,52.25]},"properties":{"ext":"X","name":"café"}}"#;
    let record: FeatureRecord = serde_json::from_str(text).unwrap();
    assert_eq!(group_by_key(vec![record], "ext").unwrap(), vec![text.to_string()]);
}

// === Scenario 4: all records share a key ===
#[test]
fn test_all_shared_key_gives_one_collection() {
    let records: Vec<_> = (0..3)
        .map(|i| feature(json!({"properties": {"ext": "X", "i": i}})))
        .collect();
    let out = group_by_key(records, "ext").unwrap();
    assert_eq!(out.len(), 1);
    let group = &parsed(&out)[0];
    assert_eq!(group["type"], "FeatureCollection");
    let order: Vec<_> = group["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["properties"]["i"].clone())
        .collect();
    assert_eq!(order, vec![json!(0), json!(1), json!(2)]);
}

// === Scenario 5: extractor that never matches, even the anchor ===
#[test]
fn test_pathological_extractor_aborts_with_partial_output() {
    let calls = AtomicUsize::new(0);
    let diagnostics = Mutex::new(Vec::new());
    let engine = BundleEngine::new(KeyPath::name("ext"))
        .with_extractor(|r: &FeatureRecord| match r.properties().get("ext") {
            Some(v) if v == "good" => GroupKey::Value(v.clone()),
            _ => GroupKey::Value(json!(calls.fetch_add(1, Ordering::Relaxed))),
        })
        .with_sink(|d: &StallDiagnostic| diagnostics.lock().unwrap().push(d.clone()));

    let outcome = engine.run(vec![
        feature(json!({"properties": {"ext": "good"}})),
        feature(json!({"properties": {"ext": "good"}})),
        feature(json!({"properties": {"ext": "bad"}})),
        feature(json!({"properties": {"ext": "bad"}})),
    ]);

    assert!(!outcome.is_complete());
    assert_eq!(
        outcome.termination,
        Termination::Stalled {
            stalled_iterations: DEFAULT_STALL_THRESHOLD,
            remaining: 2
        }
    );
    assert!(outcome.iterations <= 4 + DEFAULT_STALL_THRESHOLD);
    let lines = outcome.serialize().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(parsed(&lines)[0]["features"].as_array().unwrap().len(), 2);

    let diagnostics = diagnostics.into_inner().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].remaining, 2);
}

// === Records missing the key group together; strict key equality ===
#[test]
fn test_absent_and_mistyped_keys() {
    let records = vec![
        feature(json!({"properties": {"ext": 1}})),
        feature(json!({"properties": {}})),
        feature(json!({"properties": {"ext": "1"}})),
        feature(json!({"properties": {"other": true}})),
    ];
    let outcome = BundleEngine::new(KeyPath::name("ext")).run(records);
    let stats = outcome.stats();
    assert_eq!(stats.groups, 3);
    assert_eq!(stats.collections, 1);
    assert_eq!(outcome.groups[1].len(), 2);
}

// === Nested key via JSON pointer config ===
#[test]
fn test_pointer_key_from_toml_config() {
    let config = BundleConfig::from_toml("key = \"/osm/way\"\npointer = true\n").unwrap();
    let engine = BundleEngine::from_config(&config).unwrap();
    let outcome = engine.run(vec![
        feature(json!({"properties": {"osm": {"way": 7}}})),
        feature(json!({"properties": {"osm": {"way": 8}}})),
        feature(json!({"properties": {"osm": {"way": 7}}})),
    ]);
    assert_eq!(outcome.groups.len(), 2);
    assert!(outcome.groups[0].is_collection());
}

// === File round trip: GeoJSON in, line-delimited bundles out, re-read ===
#[test]
fn test_file_roundtrip_is_stable() {
    let tmp = tempfile::tempdir().unwrap();
    let input = json!({
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"ext": "a", "i": 0}, "geometry": null},
            {"type": "Feature", "properties": {"ext": "b", "i": 1}, "geometry": null},
            {"type": "Feature", "properties": {"ext": "a", "i": 2}, "geometry": null},
            {"type": "Feature", "properties": {"ext": "c", "i": 3}, "geometry": null}
        ]
    });
    let in_path = tmp.path().join("in.geojson");
    std::fs::write(&in_path, input.to_string()).unwrap();

    let records = parse_document(&std::fs::read_to_string(&in_path).unwrap()).unwrap();
    let first = group_by_key(records, "ext").unwrap();

    let out_path = tmp.path().join("out.ldjson");
    write_lines(std::fs::File::create(&out_path).unwrap(), &first).unwrap();

    // Re-reading flattens the bundles back into features in emission order.
    let reread = parse_document(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(reread.len(), 4);
    let second = group_by_key(reread, "ext").unwrap();
    assert_eq!(first, second);
}

// === Independent runs on separate inputs can proceed in parallel ===
#[test]
fn test_parallel_runs_are_independent() {
    let engine = BundleEngine::new(KeyPath::name("ext"));
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let engine = &engine;
                s.spawn(move || {
                    let records = (0..20)
                        .map(|i| feature(json!({"properties": {"ext": i % (n + 1)}})))
                        .collect();
                    engine.run(records).stats()
                })
            })
            .collect();
        for (n, handle) in handles.into_iter().enumerate() {
            let stats = handle.join().unwrap();
            assert_eq!(stats.groups, n + 1);
            assert_eq!(stats.members, 20);
        }
    });
}

// === Numeric keys group by value: 1 with 1.0, 0 with -0 ===
#[test]
fn test_numeric_keys_group_by_value() {
    let records: Vec<FeatureRecord> = [
        r#"{"properties":{"ext":1}}"#,
        r#"{"properties":{"ext":1.0}}"#,
        r#"{"properties":{"ext":0}}"#,
        r#"{"properties":{"ext":-0}}"#,
        r#"{"properties":{"ext":"1"}}"#,
    ]
    .iter()
    .map(|t| serde_json::from_str(t).unwrap())
    .collect();

    let out = group_by_key(records, "ext").unwrap();
    assert_eq!(
        out,
        vec![
            r#"{"type":"FeatureCollection","features":[{"properties":{"ext":1}},{"properties":{"ext":1}}]}"#,
            r#"{"type":"FeatureCollection","features":[{"properties":{"ext":0}},{"properties":{"ext":0}}]}"#,
            r#"{"properties":{"ext":"1"}}"#,
        ]
    );
}
