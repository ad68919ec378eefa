use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single saved meter reading together with the consumption and cost it produced.
///
/// Entries are immutable once appended to the ledger; the JSON field names match the
/// history files written by earlier releases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadingEntry {
    #[serde(with = "crate::domain::date::dmy_date")]
    pub date: NaiveDate,
    pub previous_reading: f64,
    pub new_reading: f64,
    pub units: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
}

impl ReadingEntry {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// True when the entry falls in the same calendar month and year as `reference`.
    pub fn in_month_of(&self, reference: NaiveDate) -> bool {
        self.date.year() == reference.year() && self.date.month() == reference.month()
    }

    pub fn in_year(&self, year: i32) -> bool {
        self.date.year() == year
    }
}

/// Meter value recorded before any history exists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InitialReading {
    pub initial_reading: f64,
}
