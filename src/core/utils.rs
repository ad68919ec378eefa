use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::Result;

const APP_DIR_NAME: &str = "EBillTracker";
const HOME_ENV: &str = "EBILL_TRACKER_HOME";
pub const HISTORY_FILE: &str = "electricity_bill_history.json";
pub const INITIAL_READING_FILE: &str = "initial_reading.json";
pub const DEVICES_FILE: &str = "devices.json";
pub const CONFIG_FILE: &str = "config.json";

/// Resolves every file the tracker keeps under its application-data directory.
pub struct PathResolver;

impl PathResolver {
    /// Returns the application data directory, honouring `EBILL_TRACKER_HOME`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
    }

    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        custom.unwrap_or_else(Self::base_dir)
    }

    pub fn history_file_in(base: &Path) -> PathBuf {
        base.join(HISTORY_FILE)
    }

    pub fn initial_reading_file_in(base: &Path) -> PathBuf {
        base.join(INITIAL_READING_FILE)
    }

    pub fn devices_file_in(base: &Path) -> PathBuf {
        base.join(DEVICES_FILE)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

/// Creates the directory (and parents) when missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_match_existing_installs() {
        let base = PathBuf::from("/data");
        assert_eq!(
            PathResolver::history_file_in(&base),
            PathBuf::from("/data/electricity_bill_history.json")
        );
        assert_eq!(
            PathResolver::initial_reading_file_in(&base),
            PathBuf::from("/data/initial_reading.json")
        );
        assert_eq!(
            PathResolver::devices_file_in(&base),
            PathBuf::from("/data/devices.json")
        );
    }

    #[test]
    fn explicit_base_wins() {
        let custom = PathBuf::from("/tmp/ebill");
        assert_eq!(PathResolver::resolve_base(Some(custom.clone())), custom);
    }
}
