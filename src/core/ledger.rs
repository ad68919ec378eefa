use std::{cmp::Reverse, sync::Arc};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::{
    core::{services::BillingService, time::Clock},
    domain::{FilterMode, ReadingEntry},
    errors::{Result, TrackerError},
    storage::StorageBackend,
};

/// Totals shown in the history summary line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerSummary {
    pub total_units: f64,
    pub total_cost: f64,
    pub this_month_units: f64,
    pub this_month_cost: f64,
    pub unit_cost: f64,
    pub entry_count: usize,
}

/// Owns the append-only list of meter readings and the initial reading.
///
/// Every mutation writes the full collection through the storage backend before the
/// in-memory state changes, so a failed write leaves the ledger as it was.
pub struct Ledger {
    entries: Vec<ReadingEntry>,
    initial_reading: Option<f64>,
    unit_cost: f64,
    storage: Box<dyn StorageBackend>,
    clock: Arc<dyn Clock>,
}

impl Ledger {
    /// Loads history and the initial reading from `storage`.
    ///
    /// A corrupt history file is an error. A corrupt initial-reading file is
    /// treated as absent.
    pub fn open(
        storage: Box<dyn StorageBackend>,
        clock: Arc<dyn Clock>,
        unit_cost: f64,
    ) -> Result<Self> {
        let entries = storage.load_history()?;
        let initial_reading = match storage.load_initial_reading() {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "ignoring unreadable initial reading");
                None
            }
        };
        debug!(entries = entries.len(), "loaded reading history");
        Ok(Self {
            entries,
            initial_reading,
            unit_cost,
            storage,
            clock,
        })
    }

    /// Starts from an empty in-memory ledger without reading any files.
    pub fn empty(storage: Box<dyn StorageBackend>, clock: Arc<dyn Clock>, unit_cost: f64) -> Self {
        Self {
            entries: Vec::new(),
            initial_reading: None,
            unit_cost,
            storage,
            clock,
        }
    }

    pub fn entries(&self) -> &[ReadingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn unit_cost(&self) -> f64 {
        self.unit_cost
    }

    pub fn set_unit_cost(&mut self, unit_cost: f64) {
        self.unit_cost = unit_cost;
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn initial_reading(&self) -> Option<f64> {
        self.initial_reading
    }

    /// Entry with the greatest date; the earliest appended one wins a tie.
    pub fn latest_entry(&self) -> Option<&ReadingEntry> {
        self.entries.iter().min_by_key(|entry| Reverse(entry.date))
    }

    /// Meter value new readings are measured against.
    pub fn current_reading(&self) -> f64 {
        match self.latest_entry() {
            Some(entry) => entry.new_reading,
            None => self.initial_reading.unwrap_or(0.0),
        }
    }

    /// Validates and appends `entry`, then persists the full history.
    ///
    /// Units and total cost are re-derived from the entry's readings and unit cost.
    pub fn append(&mut self, entry: ReadingEntry) -> Result<()> {
        if entry.previous_reading < 0.0 {
            return Err(TrackerError::invalid_reading(
                "previous reading cannot be negative",
            ));
        }
        let bill = BillingService::compute(entry.previous_reading, entry.new_reading, entry.unit_cost)
            .map_err(|err| {
                warn!(error = %err, "rejected reading entry");
                err
            })?;
        let entry = ReadingEntry {
            units: bill.units,
            total_cost: bill.total_cost,
            ..entry
        };

        let mut next = self.entries.clone();
        next.push(entry);
        self.storage.save_history(&next)?;
        self.entries = next;
        info!(
            units = bill.units,
            total_cost = bill.total_cost,
            "appended meter reading"
        );
        Ok(())
    }

    /// Records a new meter reading against the current reading at the configured unit cost.
    pub fn record(&mut self, date: NaiveDate, new_reading: f64) -> Result<ReadingEntry> {
        let previous_reading = self.current_reading();
        let bill = BillingService::compute(previous_reading, new_reading, self.unit_cost)?;
        let entry = ReadingEntry {
            date,
            previous_reading,
            new_reading,
            units: bill.units,
            unit_cost: self.unit_cost,
            total_cost: bill.total_cost,
        };
        self.append(entry.clone())?;
        Ok(entry)
    }

    /// Stores the meter value used before any history exists.
    ///
    /// The value is always written, but once entries exist the current reading is
    /// derived from history and this value is ignored.
    pub fn set_initial_reading(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(TrackerError::invalid_reading(
                "initial reading must be a non-negative number",
            ));
        }
        self.storage.save_initial_reading(value)?;
        self.initial_reading = Some(value);
        if !self.entries.is_empty() {
            debug!("initial reading stored but history already determines the current reading");
        }
        Ok(())
    }

    /// Deletes every reading and the stored initial reading.
    ///
    /// The initial reading goes first: while history exists it does not affect the
    /// current reading, so a failure at either step leaves memory matching the files.
    pub fn reset(&mut self) -> Result<()> {
        self.storage.clear_initial_reading()?;
        self.initial_reading = None;
        self.storage.clear_history()?;
        self.entries.clear();
        info!("reading history reset");
        Ok(())
    }

    /// Entries matching `mode`, newest first. Entries sharing a date keep insertion order.
    pub fn filter(&self, mode: FilterMode) -> Vec<&ReadingEntry> {
        let today = self.today();
        let mut matched: Vec<&ReadingEntry> = self
            .entries
            .iter()
            .filter(|entry| mode.matches(entry.date, today))
            .collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date));
        matched
    }

    pub fn has_entries_this_month(&self) -> bool {
        let today = self.today();
        self.entries.iter().any(|entry| entry.in_month_of(today))
    }

    pub fn this_month_units(&self) -> f64 {
        let today = self.today();
        self.entries
            .iter()
            .filter(|entry| entry.in_month_of(today))
            .map(|entry| entry.units)
            .sum()
    }

    pub fn summary(&self) -> LedgerSummary {
        let total_units = self.entries.iter().map(|entry| entry.units).sum();
        let total_cost = self.entries.iter().map(|entry| entry.total_cost).sum();
        let this_month_units = self.this_month_units();
        LedgerSummary {
            total_units,
            total_cost,
            this_month_units,
            this_month_cost: this_month_units * self.unit_cost,
            unit_cost: self.unit_cost,
            entry_count: self.entries.len(),
        }
    }
}
