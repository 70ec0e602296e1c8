use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::ReferenceDateSource;

// ---------------------------------------------------------------------------
// Snapshot — Current-state document, replaced on every run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub updated_at: DateTime<FixedOffset>,
    pub date_formatted: String,
    pub time_formatted: String,
    pub market_open: bool,
    pub source: String,
    pub reference_date: String,
    pub reference_date_source: ReferenceDateSource,
    pub cacau: SnapshotPrices,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotPrices {
    pub bahia: SnapshotPrice,
    pub para: SnapshotPrice,
}

// ---------------------------------------------------------------------------
// SnapshotPrice — One region, arroba as the headline unit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotPrice {
    pub price: Option<f64>,
    pub unit: String,
    pub weight_kg: u32,
    pub currency: String,
    pub kg: Option<f64>,
    pub saca: Option<f64>,
}
