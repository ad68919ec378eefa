//! Calendar date helpers shared by the persisted formats.

use chrono::NaiveDate;

/// Format used for every date written to the history store (`dd-MM-yyyy`).
pub const STORAGE_DATE_FORMAT: &str = "%d-%m-%Y";

/// Format used for chart and daily bucket labels.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_storage_date(date: NaiveDate) -> String {
    date.format(STORAGE_DATE_FORMAT).to_string()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parses a date in either the storage format or ISO `YYYY-MM-DD`.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, STORAGE_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT))
        .ok()
}

/// Serde adapter that keeps `NaiveDate` fields in the `dd-MM-yyyy` form.
pub mod dmy_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::STORAGE_DATE_FORMAT;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(STORAGE_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(raw.trim(), STORAGE_DATE_FORMAT)
            .map_err(|err| de::Error::custom(format!("invalid date `{}`: {}", raw, err)))
    }
}
