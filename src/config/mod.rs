use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::{Result, TrackerError},
    storage::json_backend::{tmp_path, write_atomic},
};

pub const DEFAULT_UNIT_COST: f64 = 12.0;
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub unit_cost: f64,
    pub currency_symbol: String,
    pub color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit_cost: DEFAULT_UNIT_COST,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.into(),
            color_enabled: true,
        }
    }
}

impl Config {
    /// Formats an amount with the configured currency symbol.
    pub fn money(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }

    pub fn set_unit_cost(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(TrackerError::invalid_reading(
                "unit cost must be a non-negative number",
            ));
        }
        self.unit_cost = value;
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config = serde_json::from_str(&data).map_err(|err| {
                TrackerError::persistence(format!(
                    "configuration `{}` could not be read: {}",
                    self.path.display(),
                    err
                ))
            })?;
            debug!(path = %self.path.display(), "loaded configuration");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.unit_cost, 12.0);
        assert_eq!(config.currency_symbol, "₹");
    }

    #[test]
    fn save_and_reload() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set_unit_cost(8.5).unwrap();
        config.currency_symbol = "$".into();
        config.color_enabled = false;
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert!(!manager.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"unit_cost": 7}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.unit_cost, 7.0);
        assert!(config.color_enabled);
    }

    #[test]
    fn rejects_negative_unit_cost() {
        let mut config = Config::default();
        assert!(config.set_unit_cost(-1.0).is_err());
        assert!(config.set_unit_cost(f64::INFINITY).is_err());
        assert_eq!(config.unit_cost, 12.0);
    }

    #[test]
    fn money_uses_symbol() {
        assert_eq!(Config::default().money(1806.0), "₹1806.00");
    }
}
