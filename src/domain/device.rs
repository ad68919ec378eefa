use serde::{Deserialize, Serialize};

/// Number of days used when projecting a device's daily usage onto a month.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// A household appliance declared for usage estimation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Device {
    pub name: String,
    pub power_watts: f64,
    pub hours_per_day: f64,
    pub daily_kwh: f64,
    pub monthly_kwh: f64,
}

impl Device {
    /// Builds a device and derives its kWh figures. Validation lives in the registry.
    pub fn new(name: impl Into<String>, power_watts: f64, hours_per_day: f64) -> Self {
        let daily_kwh = power_watts * hours_per_day / 1000.0;
        Self {
            name: name.into(),
            power_watts,
            hours_per_day,
            daily_kwh,
            monthly_kwh: daily_kwh * DAYS_PER_MONTH,
        }
    }

    /// Lowercased name used for duplicate detection.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_daily_and_monthly_kwh() {
        let tv = Device::new("LED TV", 150.0, 8.0);
        assert!((tv.daily_kwh - 1.2).abs() < 1e-9);
        assert!((tv.monthly_kwh - 36.0).abs() < 1e-9);
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let fridge = Device::new("Fridge", 200.0, 5.0);
        let json = serde_json::to_value(&fridge).unwrap();
        for field in ["name", "power_watts", "hours_per_day", "daily_kwh", "monthly_kwh"] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
    }
}
