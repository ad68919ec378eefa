mod common;

use std::{fs, sync::Arc};

use common::{date, open_ledger, storage_in, temp_base, UNIT_COST};
use ebill_tracker::{
    core::{time::FixedClock, DeviceRegistry, Ledger},
    core::utils::{DEVICES_FILE, HISTORY_FILE, INITIAL_READING_FILE},
    errors::TrackerError,
    storage::StorageBackend,
};
use serde_json::Value;

#[test]
fn history_file_uses_day_month_year_dates() {
    let base = temp_base();
    let mut ledger = open_ledger(&base, date(2024, 1, 20));
    ledger.set_initial_reading(1200.0).unwrap();
    ledger.record(date(2024, 1, 15), 1350.5).unwrap();

    let raw = fs::read_to_string(base.join(HISTORY_FILE)).unwrap();
    let json: Value = serde_json::from_str(&raw).unwrap();
    let entry = &json[0];
    assert_eq!(entry["date"], "15-01-2024");
    assert_eq!(entry["previous_reading"], 1200.0);
    assert_eq!(entry["new_reading"], 1350.5);
    assert_eq!(entry["units"], 150.5);
    assert_eq!(entry["unit_cost"], 12.0);
    assert_eq!(entry["total_cost"], 1806.0);

    let initial: Value =
        serde_json::from_str(&fs::read_to_string(base.join(INITIAL_READING_FILE)).unwrap())
            .unwrap();
    assert_eq!(initial["initial_reading"], 1200.0);
}

#[test]
fn reads_files_written_by_other_tools() {
    let base = temp_base();
    fs::write(
        base.join(HISTORY_FILE),
        r#"[{"date":"01-02-2024","previous_reading":10,"new_reading":25,"units":15,"unit_cost":12,"total_cost":180}]"#,
    )
    .unwrap();
    fs::write(
        base.join(DEVICES_FILE),
        r#"[{"name":"Fan","power_watts":60,"hours_per_day":10,"daily_kwh":0.6,"monthly_kwh":18}]"#,
    )
    .unwrap();

    let ledger = open_ledger(&base, date(2024, 2, 10));
    assert_eq!(ledger.current_reading(), 25.0);
    let devices = DeviceRegistry::open(Box::new(storage_in(&base))).unwrap();
    assert_eq!(devices.devices()[0].name, "Fan");
    assert_eq!(devices.estimated_monthly_total(), 18.0);
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let base = temp_base();
    let mut ledger = open_ledger(&base, date(2024, 3, 1));
    ledger.record(date(2024, 2, 1), 40.0).unwrap();
    let path = base.join(HISTORY_FILE);
    let original = fs::read_to_string(&path).unwrap();

    // A directory at the staging path makes the write fail before the rename.
    fs::create_dir_all(base.join(format!("{}.tmp", HISTORY_FILE))).unwrap();

    let err = ledger.record(date(2024, 2, 15), 55.0).unwrap_err();
    assert!(matches!(err, TrackerError::Persistence(_)));
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.current_reading(), 40.0);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn corrupt_history_fails_closed() {
    let base = temp_base();
    fs::write(base.join(HISTORY_FILE), "{ not json").unwrap();

    let result = Ledger::open(
        Box::new(storage_in(&base)),
        Arc::new(FixedClock::new(date(2024, 1, 1))),
        UNIT_COST,
    );
    assert!(matches!(result, Err(TrackerError::Persistence(_))));
    assert_eq!(
        fs::read_to_string(base.join(HISTORY_FILE)).unwrap(),
        "{ not json"
    );
}

#[test]
fn corrupt_devices_fail_closed() {
    let base = temp_base();
    fs::write(base.join(DEVICES_FILE), "[{\"name\": 3}]").unwrap();
    let result = DeviceRegistry::open(Box::new(storage_in(&base)));
    assert!(matches!(result, Err(TrackerError::Persistence(_))));
}

#[test]
fn corrupt_initial_reading_is_ignored() {
    let base = temp_base();
    fs::write(base.join(INITIAL_READING_FILE), "garbage").unwrap();
    let ledger = open_ledger(&base, date(2024, 1, 1));
    assert_eq!(ledger.initial_reading(), None);
    assert_eq!(ledger.current_reading(), 0.0);
}

#[test]
fn reset_removes_both_files() {
    let base = temp_base();
    let mut ledger = open_ledger(&base, date(2024, 1, 1));
    ledger.set_initial_reading(3.0).unwrap();
    ledger.record(date(2024, 1, 1), 4.0).unwrap();
    ledger.reset().unwrap();

    assert!(!base.join(HISTORY_FILE).exists());
    assert!(!base.join(INITIAL_READING_FILE).exists());
    assert!(storage_in(&base).load_history().unwrap().is_empty());
}

#[test]
fn reset_blocked_by_initial_reading_keeps_history_intact() {
    let base = temp_base();
    let mut ledger = open_ledger(&base, date(2024, 1, 10));
    ledger.record(date(2024, 1, 1), 4.0).unwrap();
    ledger.record(date(2024, 1, 5), 9.0).unwrap();
    fs::create_dir_all(base.join(INITIAL_READING_FILE)).unwrap();

    assert!(matches!(ledger.reset(), Err(TrackerError::Persistence(_))));
    assert_eq!(ledger.len(), 2);
    assert!(base.join(HISTORY_FILE).exists());
    assert_eq!(open_ledger(&base, date(2024, 1, 10)).len(), 2);
}

#[test]
fn overflowing_reading_never_reaches_the_history_file() {
    let base = temp_base();
    let mut ledger = open_ledger(&base, date(2024, 1, 10));
    ledger.record(date(2024, 1, 1), 100.0).unwrap();
    assert!(ledger.record(date(2024, 1, 2), 1e308).is_err());

    let raw = fs::read_to_string(base.join(HISTORY_FILE)).unwrap();
    assert!(!raw.contains("null"));
    assert_eq!(storage_in(&base).load_history().unwrap().len(), 1);
}
