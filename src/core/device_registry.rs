use std::fmt;

use tracing::{info, warn};

use crate::{
    core::ledger::Ledger,
    domain::Device,
    errors::{Result, TrackerError},
    storage::StorageBackend,
};

/// Differences smaller than this many kWh count as matching the estimate.
const CLOSE_THRESHOLD_KWH: f64 = 1.0;

/// How this month's metered usage relates to the device estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonBand {
    Close,
    ActualHigher,
    ActualLower,
}

impl fmt::Display for ComparisonBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ComparisonBand::Close => "close",
            ComparisonBand::ActualHigher => "actualHigher",
            ComparisonBand::ActualLower => "actualLower",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub actual: f64,
    pub estimated: f64,
    pub difference: f64,
    pub band: ComparisonBand,
}

impl Comparison {
    pub fn new(actual: f64, estimated: f64) -> Self {
        let difference = actual - estimated;
        let band = if difference.abs() < CLOSE_THRESHOLD_KWH {
            ComparisonBand::Close
        } else if difference > 0.0 {
            ComparisonBand::ActualHigher
        } else {
            ComparisonBand::ActualLower
        };
        Self {
            actual,
            estimated,
            difference,
            band,
        }
    }
}

/// Owns the declared household devices and persists them on every change.
pub struct DeviceRegistry {
    devices: Vec<Device>,
    storage: Box<dyn StorageBackend>,
}

impl DeviceRegistry {
    pub fn open(storage: Box<dyn StorageBackend>) -> Result<Self> {
        let devices = storage.load_devices()?;
        Ok(Self { devices, storage })
    }

    pub fn empty(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            devices: Vec::new(),
            storage,
        }
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Adds a device. Names are trimmed and must be unique ignoring case.
    pub fn add(&mut self, name: &str, power_watts: f64, hours_per_day: f64) -> Result<Device> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::invalid_device("please enter a device name"));
        }
        if !power_watts.is_finite() || !hours_per_day.is_finite() {
            return Err(TrackerError::invalid_device(
                "power and hours must be finite numbers",
            ));
        }
        if power_watts <= 0.0 || hours_per_day <= 0.0 {
            return Err(TrackerError::invalid_device(
                "power and hours must be positive numbers",
            ));
        }
        if hours_per_day > 24.0 {
            return Err(TrackerError::invalid_device(
                "hours per day cannot exceed 24",
            ));
        }
        let key = name.to_lowercase();
        if self.devices.iter().any(|device| device.key() == key) {
            warn!(device = name, "duplicate device rejected");
            return Err(TrackerError::invalid_device(format!(
                "a device named `{}` already exists",
                name
            )));
        }

        let device = Device::new(name, power_watts, hours_per_day);
        if !device.daily_kwh.is_finite() || !device.monthly_kwh.is_finite() {
            return Err(TrackerError::invalid_device(
                "power and hours give an estimate too large to store",
            ));
        }
        let mut next = self.devices.clone();
        next.push(device.clone());
        self.storage.save_devices(&next)?;
        self.devices = next;
        info!(device = name, monthly_kwh = device.monthly_kwh, "device added");
        Ok(device)
    }

    /// Parses raw power and hours input before adding the device.
    pub fn add_raw(&mut self, name: &str, power_watts: &str, hours_per_day: &str) -> Result<Device> {
        let power = parse_number(power_watts, "power")?;
        let hours = parse_number(hours_per_day, "hours per day")?;
        self.add(name, power, hours)
    }

    /// Removes every device whose name matches `name` exactly, including case.
    pub fn remove(&mut self, name: &str) -> Result<usize> {
        let next: Vec<Device> = self
            .devices
            .iter()
            .filter(|device| device.name != name)
            .cloned()
            .collect();
        let removed = self.devices.len() - next.len();
        self.storage.save_devices(&next)?;
        self.devices = next;
        info!(device = name, removed, "device removal processed");
        Ok(removed)
    }

    pub fn estimated_monthly_total(&self) -> f64 {
        self.devices.iter().map(|device| device.monthly_kwh).sum()
    }

    pub fn estimated_monthly_cost(&self, unit_cost: f64) -> f64 {
        self.estimated_monthly_total() * unit_cost
    }

    /// Compares this month's metered units with the estimate; `None` until the
    /// ledger has an entry dated in the current month.
    pub fn compare_to_actual(&self, ledger: &Ledger) -> Option<Comparison> {
        if !ledger.has_entries_this_month() {
            return None;
        }
        Some(Comparison::new(
            ledger.this_month_units(),
            self.estimated_monthly_total(),
        ))
    }
}

fn parse_number(raw: &str, field: &str) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|_| {
        TrackerError::invalid_device(format!(
            "`{}` is not a valid number for {}",
            raw.trim(),
            field
        ))
    })
}
