//! Current-state snapshot built from one [`PriceReading`].

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Weekday};

use crate::config;
use crate::models::{history::br_date, PriceReading, RegionPrice, Snapshot, SnapshotPrice, SnapshotPrices};

/// Whether the market is trading at `now`: Monday to Friday, from
/// `MARKET_OPEN_HOUR` inclusive to `MARKET_CLOSE_HOUR` exclusive, in the
/// timestamp's own offset.
pub fn is_market_open(now: DateTime<FixedOffset>) -> bool {
    let is_weekday = !matches!(now.weekday(), Weekday::Sat | Weekday::Sun);
    let hour = now.hour();
    is_weekday && (config::MARKET_OPEN_HOUR..config::MARKET_CLOSE_HOUR).contains(&hour)
}

pub fn build_snapshot(reading: &PriceReading, now: DateTime<FixedOffset>) -> Snapshot {
    Snapshot {
        updated_at: now,
        date_formatted: now.format(br_date::FORMAT).to_string(),
        time_formatted: now.format("%H:%M:%S").to_string(),
        market_open: is_market_open(now),
        source: config::SOURCE_LABEL.to_string(),
        reference_date: reading.reference_date.format(br_date::FORMAT).to_string(),
        reference_date_source: reading.reference_date_source,
        cacau: SnapshotPrices {
            bahia: snapshot_price(&reading.bahia),
            para: snapshot_price(&reading.para),
        },
    }
}

fn snapshot_price(price: &RegionPrice) -> SnapshotPrice {
    SnapshotPrice {
        price: price.arroba,
        unit: "arroba".to_string(),
        weight_kg: config::KG_PER_ARROBA as u32,
        currency: config::CURRENCY.to_string(),
        kg: price.kg,
        saca: price.saca,
    }
}
