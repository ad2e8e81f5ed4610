use std::fs;

use cooldown_core::{
    CooldownConfig, KeyValueStore, ManualClock, MemoryStorage, TimerDraft, TimerId, TimerRecord,
    TimerStore, READY_LABEL,
};
use serde_json::Value;

const LOADED_AT: i64 = 1_700_000_000_000;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn fixture_storage() -> MemoryStorage {
    let raw = fs::read_to_string(fixture_path("persisted_timers.json"))
        .expect("Không đọc được dữ liệu mẫu");
    MemoryStorage::new().with_entry("cooldownTimers", &raw)
}

#[test]
fn load_expires_timers_that_ran_out_while_away() {
    let store = TimerStore::load(
        fixture_storage(),
        ManualClock::new(LOADED_AT),
        CooldownConfig::default(),
    );

    let running: Vec<bool> = store.timers().iter().map(|t| t.is_running).collect();
    assert_eq!(running, vec![false, true, false]);

    let labels: Vec<String> = store.render().into_iter().map(|v| v.label).collect();
    assert_eq!(labels, vec![READY_LABEL, "60:00", READY_LABEL]);
}

#[test]
fn load_writes_back_normalized_list_in_persisted_shape() {
    let storage = fixture_storage();
    let _store = TimerStore::load(
        storage.clone(),
        ManualClock::new(LOADED_AT),
        CooldownConfig::default(),
    );

    let written: Value = serde_json::from_str(
        &storage
            .get("cooldownTimers")
            .unwrap()
            .expect("Danh sách phải được ghi lại"),
    )
    .unwrap();
    let mut expected: Value = serde_json::from_str(
        &fs::read_to_string(fixture_path("persisted_timers.json")).unwrap(),
    )
    .unwrap();
    expected[2]["isRunning"] = Value::Bool(false);

    assert_eq!(written, expected);
}

#[test]
fn reload_round_trips_every_persisted_field() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(LOADED_AT);
    let mut store = TimerStore::load(storage.clone(), clock.clone(), CooldownConfig::default());
    let a = store.create(&TimerDraft::new("A", 30)).unwrap();
    clock.advance_ms(3);
    let b = store.create(&TimerDraft::new("B", 4000)).unwrap();
    store.toggle(b).unwrap();
    let before: Vec<TimerRecord> = store.timers().to_vec();

    let reloaded = TimerStore::load(storage, clock, CooldownConfig::default());

    assert_eq!(reloaded.timers(), before.as_slice());
    assert_eq!(reloaded.timers()[0].id, a);
    assert_eq!(reloaded.timers()[1].id, TimerId(LOADED_AT + 3));
}

#[test]
fn corrupt_storage_starts_empty() {
    for raw in ["{not json", "{\"id\": 1}", "null", "[{\"id\": 1}]"] {
        let storage = MemoryStorage::new().with_entry("cooldownTimers", raw);
        let store = TimerStore::load(storage, ManualClock::new(0), CooldownConfig::default());
        assert!(store.timers().is_empty(), "input: {raw}");
    }
}

#[test]
fn records_with_non_positive_duration_are_dropped() {
    let raw = r#"[{"id":1,"name":"bad","duration":0,"isRunning":false,"endTime":0},
                  {"id":2,"name":"ok","duration":3,"isRunning":false,"endTime":0}]"#;
    let storage = MemoryStorage::new().with_entry("cooldownTimers", raw);
    let store = TimerStore::load(storage, ManualClock::new(0), CooldownConfig::default());
    assert_eq!(store.timers().len(), 1);
    assert_eq!(store.timers()[0].name, "ok");
}

#[test]
fn custom_keys_are_honoured() {
    let config = CooldownConfig {
        timers_key: "timers.v2".to_string(),
        theme_key: "ui.theme".to_string(),
        ..CooldownConfig::default()
    };
    let storage = MemoryStorage::new();
    let mut store = TimerStore::load(storage.clone(), ManualClock::new(0), config);
    store.create(&TimerDraft::new("A", 1)).unwrap();
    store.toggle_theme().unwrap();

    let keys: Vec<String> = storage.snapshot().into_keys().collect();
    assert_eq!(keys, vec!["timers.v2".to_string(), "ui.theme".to_string()]);
}

#[test]
fn extreme_persisted_values_load_without_panicking() {
    let raw = format!(
        r#"[{{"id":{max},"name":"far past","duration":5,"isRunning":true,"endTime":{min}}},
            {{"id":2,"name":"far future","duration":5,"isRunning":true,"endTime":{max}}}]"#,
        max = i64::MAX,
        min = i64::MIN,
    );
    let storage = MemoryStorage::new().with_entry("cooldownTimers", &raw);
    let clock = ManualClock::new(LOADED_AT);
    let mut store = TimerStore::load(storage, clock.clone(), CooldownConfig::default());

    let running: Vec<bool> = store.timers().iter().map(|t| t.is_running).collect();
    assert_eq!(running, vec![false, true]);

    clock.advance_secs(1);
    assert!(!store.tick().unwrap().changed());
    assert_eq!(store.render()[0].label, READY_LABEL);

    clock.set(i64::MAX);
    let id = store.create(&TimerDraft::new("C", 1)).unwrap();
    assert_eq!(id, TimerId(i64::MAX - 1));
    store.reset(id).unwrap();
    assert_eq!(store.get(id).unwrap().end_time, i64::MAX);
}
