//! Cacau price collector.
//!
//! Fetches the Notícias Agrícolas cacau quotation widget, normalizes the
//! Bahia and Pará prices into arroba, kg and saca, writes a current-state
//! snapshot and merges the day into a bounded, date-deduplicated history.
//!
//! # Quick start
//!
//! ```no_run
//! use cacau_prices::CacauScraper;
//! use chrono::Local;
//!
//! let scraper = CacauScraper::builder().data_dir("data").build().unwrap();
//! let summary = scraper.run(Local::now().fixed_offset()).unwrap();
//! println!("{} history records", summary.history_len);
//! ```
//!
//! The clock is always passed in; nothing in the library reads system time.

pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod markup;
pub mod models;
pub mod output;
pub mod parser;
pub mod snapshot;

pub use client::WidgetClient;
pub use error::{Result, ScraperError};
pub use history::HistoryStore;
pub use markup::RawTable;
pub use models::{HistoryRecord, PriceReading, QuoteUnit, Region, RegionPrice, Snapshot};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use tracing::info;

// ---------------------------------------------------------------------------
// CacauScraperBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CacauScraper`].
///
/// Use [`CacauScraper::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CacauScraperBuilder::build).
pub struct CacauScraperBuilder {
    data_dir: Option<PathBuf>,
    retention_days: usize,
    timeout: Duration,
    source_url: String,
}

impl Default for CacauScraperBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            retention_days: config::DEFAULT_RETENTION_DAYS,
            timeout: config::DEFAULT_TIMEOUT,
            source_url: config::SOURCE_URL.to_string(),
        }
    }
}

impl CacauScraperBuilder {
    /// Directory holding the snapshot and history files.
    ///
    /// Defaults to the platform local data directory (e.g.
    /// `~/.local/share/cacau-prices` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Number of distinct reference dates kept in the history.
    ///
    /// Defaults to 10. Zero is rejected by [`build()`](Self::build).
    pub fn retention_days(mut self, days: usize) -> Self {
        self.retention_days = days;
        self
    }

    /// HTTP timeout for the widget request. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the widget URL.
    pub fn source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    pub fn build(self) -> Result<CacauScraper> {
        let history = HistoryStore::new(self.retention_days)?;
        let client = WidgetClient::new(self.source_url, self.timeout)?;
        Ok(CacauScraper {
            data_dir: self.data_dir.unwrap_or_else(config::default_data_dir),
            history,
            client,
        })
    }
}

// ---------------------------------------------------------------------------
// CacauScraper
// ---------------------------------------------------------------------------

/// Outcome of one successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub reading: PriceReading,
    pub snapshot_path: PathBuf,
    pub history_path: PathBuf,
    pub history_len: usize,
}

/// One fetch → parse → snapshot → history cycle per [`run`](Self::run).
pub struct CacauScraper {
    data_dir: PathBuf,
    history: HistoryStore,
    client: WidgetClient,
}

impl CacauScraper {
    pub fn builder() -> CacauScraperBuilder {
        CacauScraperBuilder::default()
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(config::SNAPSHOT_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(config::HISTORY_FILE)
    }

    /// Fetch the widget and process it.
    ///
    /// Fetch, markup and parse failures abort before any file is touched.
    pub fn run(&self, now: DateTime<FixedOffset>) -> Result<RunSummary> {
        let html = self.client.fetch_html()?;
        self.run_with_html(&html, now)
    }

    /// Process already-fetched widget HTML.
    pub fn run_with_html(&self, html: &str, now: DateTime<FixedOffset>) -> Result<RunSummary> {
        let table = markup::extract_table(html)?;
        self.run_with_table(&table, now)
    }

    /// Process already-extracted table cells.
    pub fn run_with_table(&self, table: &RawTable, now: DateTime<FixedOffset>) -> Result<RunSummary> {
        let reading = parser::parse_reading(table, now)?;

        let snapshot_path = self.snapshot_path();
        output::write_json(&snapshot_path, &snapshot::build_snapshot(&reading, now))?;

        let history_path = self.history_path();
        let written = self.history.update_file(&history_path, &reading)?;

        info!(
            reference_date = %reading.reference_date,
            bahia = ?reading.bahia.arroba,
            para = ?reading.para.arroba,
            history_len = written.len(),
            "cacau prices updated"
        );

        Ok(RunSummary {
            reading,
            snapshot_path,
            history_path,
            history_len: written.len(),
        })
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for CacauScraper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CacauScraper(source={}, data_dir={}, retention_days={})",
            self.client.url(),
            self.data_dir.display(),
            self.history.retention_days()
        )
    }
}
