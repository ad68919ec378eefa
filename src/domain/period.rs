use std::fmt;

use chrono::NaiveDate;

/// Time bucket size used by analytics views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [
        Granularity::Monthly,
        Granularity::Weekly,
        Granularity::Daily,
        Granularity::Yearly,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Some(Granularity::Daily),
            "weekly" | "week" => Some(Granularity::Weekly),
            "monthly" | "month" => Some(Granularity::Monthly),
            "yearly" | "year" => Some(Granularity::Yearly),
            _ => None,
        }
    }

    /// Whether the view is restricted to a single selected year.
    pub fn uses_year(&self) -> bool {
        !matches!(self, Granularity::Yearly)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Granularity::Daily => "Daily",
            Granularity::Weekly => "Weekly",
            Granularity::Monthly => "Monthly",
            Granularity::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

/// Selection applied to the history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    All,
    ThisMonth,
    ThisYear,
    /// Inclusive on both ends.
    CustomRange { start: NaiveDate, end: NaiveDate },
}

impl FilterMode {
    pub fn matches(&self, date: NaiveDate, today: NaiveDate) -> bool {
        use chrono::Datelike;
        match self {
            FilterMode::All => true,
            FilterMode::ThisMonth => {
                date.year() == today.year() && date.month() == today.month()
            }
            FilterMode::ThisYear => date.year() == today.year(),
            FilterMode::CustomRange { start, end } => *start <= date && date <= *end,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::All => f.write_str("All"),
            FilterMode::ThisMonth => f.write_str("This Month"),
            FilterMode::ThisYear => f.write_str("This Year"),
            FilterMode::CustomRange { start, end } => write!(
                f,
                "{} to {}",
                super::format_storage_date(*start),
                super::format_storage_date(*end)
            ),
        }
    }
}
