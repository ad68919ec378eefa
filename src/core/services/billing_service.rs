//! Consumption and cost arithmetic for a pair of meter readings.

use crate::errors::{Result, TrackerError};

/// Consumption and cost derived from two readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bill {
    pub units: f64,
    pub total_cost: f64,
}

pub struct BillingService;

impl BillingService {
    /// Computes `units = new - previous` and `total_cost = units * unit_cost`.
    ///
    /// Fails with [`TrackerError::InvalidReading`] when the new reading is below the
    /// previous one or when any input is not a finite number.
    pub fn compute(previous_reading: f64, new_reading: f64, unit_cost: f64) -> Result<Bill> {
        if !previous_reading.is_finite() || !new_reading.is_finite() {
            return Err(TrackerError::invalid_reading(
                "meter readings must be finite numbers",
            ));
        }
        if !unit_cost.is_finite() {
            return Err(TrackerError::invalid_reading("unit cost must be a finite number"));
        }
        if new_reading < previous_reading {
            return Err(TrackerError::invalid_reading(format!(
                "new reading {} must be higher than current reading {}",
                new_reading, previous_reading
            )));
        }
        let units = new_reading - previous_reading;
        let total_cost = units * unit_cost;
        if !units.is_finite() || !total_cost.is_finite() {
            return Err(TrackerError::invalid_reading(
                "consumption or cost is too large to store",
            ));
        }
        Ok(Bill { units, total_cost })
    }

    /// Parses raw input and computes the bill it would produce without saving anything.
    pub fn preview(previous_reading: f64, raw_new_reading: &str, unit_cost: f64) -> Result<Bill> {
        let new_reading = parse_reading(raw_new_reading)?;
        Self::compute(previous_reading, new_reading, unit_cost)
    }
}

/// Parses a user-entered meter reading, rejecting non-numeric and negative values.
pub fn parse_reading(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let value: f64 = trimmed.parse().map_err(|_| {
        TrackerError::invalid_reading(format!("`{}` is not a valid meter reading", trimmed))
    })?;
    if !value.is_finite() {
        return Err(TrackerError::invalid_reading(format!(
            "`{}` is not a valid meter reading",
            trimmed
        )));
    }
    if value < 0.0 {
        return Err(TrackerError::invalid_reading("reading cannot be negative"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_units_and_cost() {
        let bill = BillingService::compute(1200.0, 1350.5, 12.0).unwrap();
        assert_eq!(bill.units, 150.5);
        assert_eq!(bill.total_cost, 1806.0);
    }

    #[test]
    fn equal_readings_produce_zero_consumption() {
        let bill = BillingService::compute(500.0, 500.0, 12.0).unwrap();
        assert_eq!(bill.units, 0.0);
        assert_eq!(bill.total_cost, 0.0);
    }

    #[test]
    fn holds_for_a_spread_of_reading_pairs() {
        let pairs = [(-5.0, 3.0, 2.5), (0.0, 0.25, 12.0), (10.0, 1e6, 0.5), (3.0, 3.5, 0.0)];
        for (a, b, c) in pairs {
            let bill = BillingService::compute(a, b, c).unwrap();
            assert_eq!(bill.units, b - a);
            assert_eq!(bill.total_cost, (b - a) * c);
        }
    }

    #[test]
    fn rejects_lower_new_reading() {
        let err = BillingService::compute(100.0, 99.9, 12.0).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidReading(_)));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(BillingService::compute(f64::NAN, 1.0, 12.0).is_err());
        assert!(BillingService::compute(0.0, f64::INFINITY, 12.0).is_err());
        assert!(BillingService::compute(0.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn rejects_results_that_overflow() {
        let err = BillingService::compute(100.0, 1e308, 12.0).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidReading(_)));
        assert!(BillingService::compute(-1e308, 1e308, 1.0).is_err());
        assert!(BillingService::preview(0.0, "1e308", 12.0).is_err());
        assert!(BillingService::compute(0.0, 1e308, 1.0).is_ok());
    }

    #[test]
    fn preview_parses_raw_input() {
        let bill = BillingService::preview(10.0, " 25 ", 12.0).unwrap();
        assert_eq!(bill.units, 15.0);
        assert_eq!(bill.total_cost, 180.0);

        let err = BillingService::preview(10.0, "abc", 12.0).unwrap_err();
        assert!(err.to_string().contains("not a valid meter reading"));
    }

    #[test]
    fn parse_reading_rejects_negative_and_nan() {
        assert!(parse_reading("-1").is_err());
        assert!(parse_reading("NaN").is_err());
        assert!(parse_reading("inf").is_err());
        assert_eq!(parse_reading("0").unwrap(), 0.0);
    }
}
