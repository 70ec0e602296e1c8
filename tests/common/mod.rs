//! Shared fixtures for the cacau-prices integration tests.
//!
//! Provides a captured-shape widget page, clock helpers in Brasília time
//! (UTC-03:00) and history record builders.

#![allow(dead_code)]

use cacau_prices::{HistoryRecord, Region};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

/// Widget page as served by the quotation endpoint, trimmed to the table.
pub const WIDGET_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Cotações</title></head>
<body>
<div class="cotacao">
  <table class="cot-fisicas">
    <THEAD>
      <tr><th>Estado</th><th>Preço (R$)</th><th>Variação (%)</th></tr>
    </THEAD>
    <tbody>
      <tr class="odd">
        <td>Bahia /@</td>
        <td>1.920,00</td>
        <td><span class="alta">1,2</span></td>
      </tr>
      <tr class="even">
        <td>Par&aacute; / Kg</td>
        <td> 128,00 </td>
        <td>0,5</td>
      </tr>
    </tbody>
    <tfoot>
      <tr><td colspan="3">Fech.&nbsp;19/09/2025</td></tr>
    </tfoot>
  </table>
</div>
</body>
</html>
"#;

/// Brasília offset used by the widget's market.
pub fn brt() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).unwrap()
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<FixedOffset> {
    brt().with_ymd_and_hms(year, month, day, hour, min, 0).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn cells(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

pub fn record(region: Region, reference_date: NaiveDate, value: f64) -> HistoryRecord {
    HistoryRecord {
        product: "cacau".to_string(),
        region,
        value: Some(value),
        unit: "arroba".to_string(),
        currency: "BRL".to_string(),
        reference_date,
        collected_at: at(2025, 9, 19, 10, 0),
    }
}

/// Two records (Bahia, Pará) for each of `days` consecutive dates ending
/// at `last`, newest last.
pub fn history_span(last: NaiveDate, days: u64) -> Vec<HistoryRecord> {
    (0..days)
        .rev()
        .map(|back| last - chrono::Days::new(back))
        .flat_map(|d| [record(Region::Bahia, d, 1900.0), record(Region::Para, d, 1850.0)])
        .collect()
}

pub fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("expected a value");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
