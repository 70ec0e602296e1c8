use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Region;

// ---------------------------------------------------------------------------
// HistoryRecord — One region's arroba price for one reference date
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub product: String,
    pub region: Region,
    /// Price per arroba; `None` when the source cell could not be parsed.
    pub value: Option<f64>,
    pub unit: String,
    pub currency: String,
    #[serde(with = "br_date")]
    pub reference_date: NaiveDate,
    pub collected_at: DateTime<FixedOffset>,
}

/// `dd/mm/yyyy` on the wire; ISO dates are accepted when reading.
pub mod br_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d/%m/%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(&raw, "%Y-%m-%d"))
            .map_err(|e| serde::de::Error::custom(format!("invalid date {:?}: {}", raw, e)))
    }
}
