#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use chrono::NaiveDate;
use ebill_tracker::{
    core::{time::FixedClock, DeviceRegistry, Ledger},
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const UNIT_COST: f64 = 12.0;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Returns a fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn storage_in(base: &Path) -> JsonStorage {
    JsonStorage::new(Some(base.to_path_buf())).expect("create json storage backend")
}

pub fn open_ledger(base: &Path, today: NaiveDate) -> Ledger {
    Ledger::open(
        Box::new(storage_in(base)),
        Arc::new(FixedClock::new(today)),
        UNIT_COST,
    )
    .expect("open ledger")
}

pub fn open_devices(base: &Path) -> DeviceRegistry {
    DeviceRegistry::open(Box::new(storage_in(base))).expect("open device registry")
}

/// Creates isolated ledger and device stores sharing one temporary directory.
pub fn setup_test_env(today: NaiveDate) -> (PathBuf, Ledger, DeviceRegistry) {
    let base = temp_base();
    let ledger = open_ledger(&base, today);
    let devices = open_devices(&base);
    (base, ledger, devices)
}
