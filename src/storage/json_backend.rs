use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    domain::{Device, InitialReading, ReadingEntry},
    errors::{Result, TrackerError},
};

use super::StorageBackend;

const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed JSON persistence for the tracker's three data files.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    history_file: PathBuf,
    initial_reading_file: PathBuf,
    devices_file: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let app_root = PathResolver::resolve_base(root);
        ensure_dir(&app_root)?;
        Ok(Self {
            history_file: PathResolver::history_file_in(&app_root),
            initial_reading_file: PathResolver::initial_reading_file_in(&app_root),
            devices_file: PathResolver::devices_file_in(&app_root),
            root: app_root,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn history_path(&self) -> &Path {
        &self.history_file
    }

    pub fn initial_reading_path(&self) -> &Path {
        &self.initial_reading_file
    }

    pub fn devices_path(&self) -> &Path {
        &self.devices_file
    }
}

impl StorageBackend for JsonStorage {
    fn load_history(&self) -> Result<Vec<ReadingEntry>> {
        Ok(read_json(&self.history_file)?.unwrap_or_default())
    }

    fn save_history(&self, entries: &[ReadingEntry]) -> Result<()> {
        write_json(&self.history_file, &entries)
    }

    fn clear_history(&self) -> Result<()> {
        remove_if_exists(&self.history_file)
    }

    fn load_initial_reading(&self) -> Result<Option<f64>> {
        let stored: Option<InitialReading> = read_json(&self.initial_reading_file)?;
        Ok(stored.map(|value| value.initial_reading))
    }

    fn save_initial_reading(&self, value: f64) -> Result<()> {
        write_json(
            &self.initial_reading_file,
            &InitialReading {
                initial_reading: value,
            },
        )
    }

    fn clear_initial_reading(&self) -> Result<()> {
        remove_if_exists(&self.initial_reading_file)
    }

    fn load_devices(&self) -> Result<Vec<Device>> {
        Ok(read_json(&self.devices_file)?.unwrap_or_default())
    }

    fn save_devices(&self, devices: &[Device]) -> Result<()> {
        write_json(&self.devices_file, &devices)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map(Some).map_err(|err| {
        TrackerError::persistence(format!(
            "`{}` could not be read, it may be corrupted: {}",
            path.display(),
            err
        ))
    })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), "saved data file");
    Ok(())
}

fn remove_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("json storage");
        (storage, temp)
    }

    fn sample_entry() -> ReadingEntry {
        ReadingEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            previous_reading: 100.0,
            new_reading: 150.0,
            units: 50.0,
            unit_cost: 12.0,
            total_cost: 600.0,
        }
    }

    #[test]
    fn missing_files_load_as_empty() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.load_history().unwrap().is_empty());
        assert!(storage.load_devices().unwrap().is_empty());
        assert_eq!(storage.load_initial_reading().unwrap(), None);
    }

    #[test]
    fn history_roundtrip_keeps_order() {
        let (storage, _guard) = storage_with_temp_dir();
        let mut later = sample_entry();
        later.date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let entries = vec![later, sample_entry()];
        storage.save_history(&entries).expect("save history");
        assert_eq!(storage.load_history().expect("load history"), entries);
        assert!(!tmp_path(storage.history_path()).exists());
    }

    #[test]
    fn initial_reading_file_uses_single_object() {
        let (storage, _guard) = storage_with_temp_dir();
        storage.save_initial_reading(1234.5).unwrap();
        let raw = fs::read_to_string(storage.initial_reading_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["initial_reading"], 1234.5);
        assert_eq!(storage.load_initial_reading().unwrap(), Some(1234.5));
        storage.clear_initial_reading().unwrap();
        assert_eq!(storage.load_initial_reading().unwrap(), None);
    }

    #[test]
    fn corrupt_history_is_reported() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(storage.history_path(), "[{\"date\": ").unwrap();
        let err = storage.load_history().expect_err("corrupt file must fail");
        assert!(matches!(err, TrackerError::Persistence(_)));
    }

    #[test]
    fn clearing_missing_files_is_not_an_error() {
        let (storage, _guard) = storage_with_temp_dir();
        storage.clear_history().expect("clear history");
        storage.clear_initial_reading().expect("clear initial");
    }
}
