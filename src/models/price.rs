use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::KG_PER_ARROBA;

// ---------------------------------------------------------------------------
// Region — Producing state a quote belongs to
// ---------------------------------------------------------------------------

/// Declaration order is the history tie-break order (`bahia` before `para`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Bahia,
    Para,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Bahia, Region::Para];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Bahia => "bahia",
            Region::Para => "para",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// QuoteUnit — Unit a source price is quoted in
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteUnit {
    Arroba,
    Kg,
}

impl QuoteUnit {
    /// Kilograms represented by one unit.
    pub fn kilograms(self) -> f64 {
        match self {
            QuoteUnit::Arroba => KG_PER_ARROBA,
            QuoteUnit::Kg => 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// RegionPrice — One region's price in all three units
// ---------------------------------------------------------------------------

/// Either all three projections are present and consistent, or none is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionPrice {
    pub arroba: Option<f64>,
    pub kg: Option<f64>,
    pub saca: Option<f64>,
}

impl RegionPrice {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn is_missing(&self) -> bool {
        self.arroba.is_none()
    }
}

// ---------------------------------------------------------------------------
// PriceReading — Result of one fetch cycle
// ---------------------------------------------------------------------------

/// Where [`PriceReading::reference_date`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceDateSource {
    /// Closing date printed in the table footer.
    Footer,
    /// No footer date was found; the fetch date stands in for it.
    FetchDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceReading {
    pub reference_date: NaiveDate,
    pub reference_date_source: ReferenceDateSource,
    pub collected_at: DateTime<FixedOffset>,
    pub bahia: RegionPrice,
    pub para: RegionPrice,
}

impl PriceReading {
    pub fn region(&self, region: Region) -> &RegionPrice {
        match region {
            Region::Bahia => &self.bahia,
            Region::Para => &self.para,
        }
    }
}
