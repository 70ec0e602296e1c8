//! Bounded, date-deduplicated price history.
//!
//! The history file is a JSON array of [`HistoryRecord`]s, newest reference
//! date first, `bahia` before `para` within a date. It holds at most one
//! record per `(reference_date, region)` and at most `retention_days`
//! distinct dates. Every update is a full read-merge-rewrite.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config;
use crate::error::{Result, ScraperError};
use crate::models::{HistoryRecord, PriceReading, Region};
use crate::output;

// ---------------------------------------------------------------------------
// HistoryStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryStore {
    retention_days: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self {
            retention_days: config::DEFAULT_RETENTION_DAYS,
        }
    }
}

impl HistoryStore {
    /// Create a store keeping the `retention_days` most recent distinct dates.
    pub fn new(retention_days: usize) -> Result<Self> {
        if retention_days == 0 {
            return Err(ScraperError::InvalidArgument(
                "history retention must keep at least one date".to_string(),
            ));
        }
        Ok(Self { retention_days })
    }

    pub fn retention_days(&self) -> usize {
        self.retention_days
    }

    /// Parse a persisted history blob.
    ///
    /// A blob that is not a JSON array of records yields an empty history;
    /// a corrupt file must never abort a run.
    pub fn load(&self, blob: &str) -> Vec<HistoryRecord> {
        match serde_json::from_str::<Vec<HistoryRecord>>(blob) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "history is not a valid record list, starting empty");
                Vec::new()
            }
        }
    }

    /// Read the history file at `path`; missing or unreadable means empty.
    pub fn load_file(&self, path: &Path) -> Vec<HistoryRecord> {
        match fs::read_to_string(path) {
            Ok(blob) => self.load(&blob),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no history file yet");
                Vec::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "history file unreadable, starting empty");
                Vec::new()
            }
        }
    }

    /// The two history records (Bahia, Pará) for one reading.
    pub fn records_for(&self, reading: &PriceReading) -> Vec<HistoryRecord> {
        Region::ALL
            .iter()
            .map(|&region| HistoryRecord {
                product: config::PRODUCT.to_string(),
                region,
                value: reading.region(region).arroba,
                unit: "arroba".to_string(),
                currency: config::CURRENCY.to_string(),
                reference_date: reading.reference_date,
                collected_at: reading.collected_at,
            })
            .collect()
    }

    /// Merge `new_records` into `existing`.
    ///
    /// Existing records sharing a `(reference_date, product)` with any new
    /// record are replaced, so re-running a day is idempotent. Leftover
    /// duplicates of a `(reference_date, region)` keep only their last entry.
    /// The result is sorted newest date first, then by region, and truncated
    /// to the `retention_days` most recent distinct dates.
    pub fn merge(
        &self,
        existing: Vec<HistoryRecord>,
        new_records: Vec<HistoryRecord>,
    ) -> Vec<HistoryRecord> {
        let mut merged: Vec<HistoryRecord> = {
            let replaced: BTreeSet<(NaiveDate, &str)> = new_records
                .iter()
                .map(|r| (r.reference_date, r.product.as_str()))
                .collect();
            existing
                .into_iter()
                .filter(|r| !replaced.contains(&(r.reference_date, r.product.as_str())))
                .collect()
        };
        merged.extend(new_records);

        // One record per (date, region): the last occurrence is the newest,
        // since incoming records follow the existing ones.
        let mut seen: BTreeSet<(NaiveDate, Region)> = BTreeSet::new();
        merged.reverse();
        merged.retain(|r| seen.insert((r.reference_date, r.region)));
        merged.reverse();

        merged.sort_by(|a, b| {
            b.reference_date
                .cmp(&a.reference_date)
                .then(a.region.cmp(&b.region))
        });

        let kept: BTreeSet<NaiveDate> = merged
            .iter()
            .map(|r| r.reference_date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .rev()
            .take(self.retention_days)
            .collect();

        merged.retain(|r| kept.contains(&r.reference_date));
        merged
    }

    /// Merge `reading` into the history file at `path` and rewrite it.
    ///
    /// Returns the history as written.
    pub fn update_file(&self, path: &Path, reading: &PriceReading) -> Result<Vec<HistoryRecord>> {
        let existing = self.load_file(path);
        let before = existing.len();
        let merged = self.merge(existing, self.records_for(reading));
        output::write_json(path, &merged)?;
        debug!(
            path = %path.display(),
            before,
            after = merged.len(),
            "history rewritten"
        );
        Ok(merged)
    }
}
