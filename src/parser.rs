//! Normalization of the quotation table into a [`PriceReading`].
//!
//! Prices come in Brazilian notation (`1.920,00`), Bahia per arroba and
//! Pará per arroba or per kilogram depending on the row label. Every region
//! ends up with arroba, kg and saca projections computed from the fixed
//! ratios in [`crate::config`].

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate};
use regex::Regex;
use tracing::{debug, warn};

use crate::config::{KG_PER_ARROBA, KG_PER_SACA};
use crate::error::{Result, ScraperError};
use crate::markup::RawTable;
use crate::models::{PriceReading, QuoteUnit, ReferenceDateSource, Region, RegionPrice};

static RE_BR_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2})/(\d{2})/(\d{4})").unwrap());

/// Parse a Brazilian-formatted number: `.` groups thousands, `,` is decimal.
///
/// Returns `None` for empty or unparseable text. A quoted zero is `Some(0.0)`.
pub fn parse_price(text: &str) -> Option<f64> {
    let normalized = text.trim().replace('.', "").replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Map a row label to its region and quoting unit.
///
/// Pará rows carry the unit in the label (`Pará / Kg`, `Pará /arroba`); a
/// label without a unit hint is taken as per arroba.
pub fn classify_region(label: &str) -> Option<(Region, QuoteUnit)> {
    let label = label.to_lowercase();
    if label.contains("bahia") {
        return Some((Region::Bahia, QuoteUnit::Arroba));
    }
    // "Paraná" is a different state that shares the prefix.
    if (label.contains("pará") || label.contains("para")) && !label.contains("paran") {
        let unit = if label.contains("/kg") || label.contains(" kg") {
            QuoteUnit::Kg
        } else if label.contains("/arroba") || label.contains("arroba") {
            QuoteUnit::Arroba
        } else {
            debug!(label = %label, "no unit hint in Pará label, assuming arroba");
            QuoteUnit::Arroba
        };
        return Some((Region::Para, unit));
    }
    None
}

/// Project a price quoted in `unit` onto arroba, kg and saca.
pub fn derive_units(value: Option<f64>, unit: QuoteUnit) -> RegionPrice {
    let Some(value) = value else {
        return RegionPrice::missing();
    };
    let kg = value / unit.kilograms();
    let arroba = match unit {
        QuoteUnit::Arroba => value,
        QuoteUnit::Kg => kg * KG_PER_ARROBA,
    };
    let saca = kg * KG_PER_SACA;
    RegionPrice {
        arroba: Some(arroba),
        kg: Some(kg),
        saca: Some(saca),
    }
}

/// First valid `dd/mm/yyyy` date in `text`.
pub fn extract_reference_date(text: &str) -> Option<NaiveDate> {
    RE_BR_DATE.captures_iter(text).find_map(|caps| {
        let day = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let year = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

/// Build a [`PriceReading`] from the extracted table.
///
/// Rows are classified one by one and, per region, the last row whose price
/// parses wins. A region without any parseable row is all-`None`. Fails only
/// when no row belongs to either region.
pub fn parse_reading(table: &RawTable, now: DateTime<FixedOffset>) -> Result<PriceReading> {
    let mut bahia: Option<RegionPrice> = None;
    let mut para: Option<RegionPrice> = None;
    let mut matched = false;

    for row in &table.rows {
        if row.len() < 2 {
            continue;
        }
        let Some((region, unit)) = classify_region(&row[0]) else {
            continue;
        };
        matched = true;

        let Some(value) = parse_price(&row[1]) else {
            warn!(region = %region, cell = %row[1], "unparseable price cell, skipping row");
            continue;
        };
        debug!(region = %region, ?unit, value, "matched quotation row");

        let price = derive_units(Some(value), unit);
        match region {
            Region::Bahia => bahia = Some(price),
            Region::Para => para = Some(price),
        }
    }

    if !matched {
        return Err(ScraperError::Parse(
            "no Bahia or Pará row in quotation table".to_string(),
        ));
    }

    let footer_date = table.footer.as_deref().and_then(extract_reference_date);
    let (reference_date, reference_date_source) = match footer_date {
        Some(date) => (date, ReferenceDateSource::Footer),
        None => {
            let fallback = now.date_naive();
            warn!(
                footer = ?table.footer,
                fallback = %fallback.format("%d/%m/%Y"),
                "no closing date in table footer, using fetch date as reference date"
            );
            (fallback, ReferenceDateSource::FetchDate)
        }
    };

    Ok(PriceReading {
        reference_date,
        reference_date_source,
        collected_at: now,
        bahia: bahia.unwrap_or_default(),
        para: para.unwrap_or_default(),
    })
}
