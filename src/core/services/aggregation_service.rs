//! Time-bucketed totals over reading entries for the analytics views.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::{format_iso_date, Granularity, ReadingEntry};

/// Number of years, before the current one, offered by the analytics year picker.
const YEAR_HISTORY_SPAN: i32 = 5;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Totals for one period in an analytics view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub units: f64,
    pub cost: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    units: f64,
    cost: f64,
}

/// Groups entries into day, week-of-month, month, or year buckets.
///
/// Only periods that contain at least one entry are returned, in chronological order.
pub struct AggregationService;

impl AggregationService {
    /// Buckets `entries` at `granularity`. Daily, weekly and monthly views only include
    /// entries dated in `year`; the yearly view covers the whole history.
    pub fn aggregate<'a, I>(entries: I, granularity: Granularity, year: i32) -> Vec<Bucket>
    where
        I: IntoIterator<Item = &'a ReadingEntry>,
    {
        let entries = entries.into_iter();
        match granularity {
            Granularity::Daily => {
                let totals = accumulate(entries.filter(|e| e.in_year(year)), |e| e.date);
                into_buckets(totals, format_iso_date)
            }
            Granularity::Weekly => {
                let totals = accumulate(entries.filter(|e| e.in_year(year)), |e| {
                    (e.date.year(), e.date.month(), week_of_month(e.date))
                });
                into_buckets(totals, |(y, m, w)| {
                    format!("{} week {} {}", ordinal(w), month_name(m), y)
                })
            }
            Granularity::Monthly => {
                let totals = accumulate(entries.filter(|e| e.in_year(year)), |e| e.month());
                into_buckets(totals, |m| month_name(m).to_string())
            }
            Granularity::Yearly => {
                let totals = accumulate(entries, |e| e.year());
                into_buckets(totals, |y| y.to_string())
            }
        }
    }

    /// Years offered for selection: the five before `today`'s year plus the current one.
    pub fn year_options(today: NaiveDate) -> Vec<i32> {
        let current = today.year();
        ((current - YEAR_HISTORY_SPAN)..=current).collect()
    }
}

fn accumulate<'a, K, I, F>(entries: I, key: F) -> BTreeMap<K, Totals>
where
    K: Ord,
    I: Iterator<Item = &'a ReadingEntry>,
    F: Fn(&ReadingEntry) -> K,
{
    let mut totals: BTreeMap<K, Totals> = BTreeMap::new();
    for entry in entries {
        let bucket = totals.entry(key(entry)).or_default();
        bucket.units += entry.units;
        bucket.cost += entry.total_cost;
    }
    totals
}

fn into_buckets<K, F>(totals: BTreeMap<K, Totals>, label: F) -> Vec<Bucket>
where
    F: Fn(K) -> String,
{
    totals
        .into_iter()
        .map(|(key, totals)| Bucket {
            label: label(key),
            units: totals.units,
            cost: totals.cost,
        })
        .collect()
}

/// 1-based week index inside the month; days 29-31 fall in week 5.
pub fn week_of_month(date: NaiveDate) -> u32 {
    (date.day() - 1) / 7 + 1
}

/// English ordinal for `n` ("1st", "2nd", "3rd", "4th", "11th", "21st").
pub fn ordinal(n: u32) -> String {
    let suffix = if (11..=13).contains(&(n % 100)) {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{}{}", n, suffix)
}

/// Full English month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize))
        .copied()
        .unwrap_or("Unknown")
}
