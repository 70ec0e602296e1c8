//! Price parsing, region classification, unit derivation and reading assembly.

mod common;

use cacau_prices::models::ReferenceDateSource;
use cacau_prices::parser::{
    classify_region, derive_units, extract_reference_date, parse_price, parse_reading,
};
use cacau_prices::{QuoteUnit, RawTable, Region, ScraperError};
use common::{assert_close, at, cells, date};

// ---------------------------------------------------------------------------
// parse_price
// ---------------------------------------------------------------------------

#[test]
fn parse_price_handles_thousands_and_decimal_separators() {
    assert_eq!(parse_price("1.920,00"), Some(1920.0));
    assert_eq!(parse_price("128,00"), Some(128.0));
    assert_eq!(parse_price("1.234.567,89"), Some(1234567.89));
}

#[test]
fn parse_price_trims_whitespace() {
    assert_eq!(parse_price("  1.920,50 \n"), Some(1920.5));
}

#[test]
fn parse_price_empty_is_missing() {
    assert_eq!(parse_price(""), None);
    assert_eq!(parse_price("   "), None);
}

#[test]
fn parse_price_garbage_is_missing() {
    assert_eq!(parse_price("s/c"), None);
    assert_eq!(parse_price("R$ 1.920,00"), None);
    assert_eq!(parse_price("NaN"), None);
    assert_eq!(parse_price("inf"), None);
}

#[test]
fn parse_price_zero_is_not_missing() {
    assert_eq!(parse_price("0,00"), Some(0.0));
}

// ---------------------------------------------------------------------------
// classify_region
// ---------------------------------------------------------------------------

#[test]
fn classify_bahia_is_per_arroba() {
    assert_eq!(
        classify_region("Bahia /@"),
        Some((Region::Bahia, QuoteUnit::Arroba))
    );
    assert_eq!(
        classify_region("BAHIA"),
        Some((Region::Bahia, QuoteUnit::Arroba))
    );
}

#[test]
fn classify_para_with_kg_hint() {
    assert_eq!(
        classify_region("Pará / Kg"),
        Some((Region::Para, QuoteUnit::Kg))
    );
    assert_eq!(classify_region("Para/kg"), Some((Region::Para, QuoteUnit::Kg)));
}

#[test]
fn classify_para_with_arroba_hint() {
    assert_eq!(
        classify_region("Pará /arroba"),
        Some((Region::Para, QuoteUnit::Arroba))
    );
    assert_eq!(
        classify_region("PARÁ Arroba"),
        Some((Region::Para, QuoteUnit::Arroba))
    );
}

#[test]
fn classify_para_without_hint_defaults_to_arroba() {
    assert_eq!(classify_region("Pará"), Some((Region::Para, QuoteUnit::Arroba)));
}

#[test]
fn classify_unknown_label() {
    assert_eq!(classify_region("Espírito Santo /@"), None);
    assert_eq!(classify_region(""), None);
}

#[test]
fn classify_parana_is_not_para() {
    assert_eq!(classify_region("Paraná /@"), None);
    assert_eq!(classify_region("PARANA / Kg"), None);
}

#[test]
fn classify_para_is_a_plain_substring_match() {
    // Any other label containing "para" still counts as Pará.
    assert_eq!(
        classify_region("Comparativo / Kg"),
        Some((Region::Para, QuoteUnit::Kg))
    );
}

// ---------------------------------------------------------------------------
// derive_units
// ---------------------------------------------------------------------------

#[test]
fn derive_from_arroba() {
    for a in [1920.0, 15.0, 333.33, 0.0] {
        let p = derive_units(Some(a), QuoteUnit::Arroba);
        assert_close(p.arroba, a);
        assert_close(p.kg, a / 15.0);
        assert_close(p.saca, a * 4.0);
    }
}

#[test]
fn derive_from_kg() {
    let p = derive_units(Some(128.0), QuoteUnit::Kg);
    assert_close(p.kg, 128.0);
    assert_close(p.arroba, 1920.0);
    assert_close(p.saca, 7680.0);
}

#[test]
fn derive_missing_is_all_none() {
    let p = derive_units(None, QuoteUnit::Kg);
    assert_eq!(p.arroba, None);
    assert_eq!(p.kg, None);
    assert_eq!(p.saca, None);
    assert!(p.is_missing());
}

// ---------------------------------------------------------------------------
// extract_reference_date
// ---------------------------------------------------------------------------

#[test]
fn reference_date_from_footer_text() {
    assert_eq!(
        extract_reference_date("Fech. 19/09/2025"),
        Some(date(2025, 9, 19))
    );
}

#[test]
fn reference_date_skips_impossible_dates() {
    assert_eq!(
        extract_reference_date("31/02/2025 ou 01/03/2025"),
        Some(date(2025, 3, 1))
    );
    assert_eq!(extract_reference_date("Fechamento indisponível"), None);
}

// ---------------------------------------------------------------------------
// parse_reading
// ---------------------------------------------------------------------------

#[test]
fn parse_reading_end_to_end_rows() {
    let table = RawTable::new(
        cells(&[
            &["Bahia /@", "1.920,00", "1,2%"],
            &["Pará / Kg", "128,00", "0,5%"],
        ]),
        None,
    );
    let now = at(2025, 9, 19, 10, 30);
    let reading = parse_reading(&table, now).unwrap();

    assert_close(reading.bahia.arroba, 1920.0);
    assert_close(reading.bahia.kg, 128.0);
    assert_close(reading.bahia.saca, 7680.0);
    assert_close(reading.para.kg, 128.0);
    assert_close(reading.para.arroba, 1920.0);
    assert_close(reading.para.saca, 7680.0);

    assert_eq!(reading.reference_date, date(2025, 9, 19));
    assert_eq!(reading.reference_date_source, ReferenceDateSource::FetchDate);
    assert_eq!(reading.collected_at, now);
}

#[test]
fn parse_reading_prefers_footer_date() {
    let table = RawTable::new(
        cells(&[&["Bahia /@", "1.900,00", "0,0"]]),
        Some("Fech. 18/09/2025".to_string()),
    );
    let reading = parse_reading(&table, at(2025, 9, 19, 10, 30)).unwrap();
    assert_eq!(reading.reference_date, date(2025, 9, 18));
    assert_eq!(reading.reference_date_source, ReferenceDateSource::Footer);
}

#[test]
fn parse_reading_last_matching_row_wins() {
    let table = RawTable::new(
        cells(&[
            &["Bahia /@", "1.800,00", "0"],
            &["Pará / Kg", "120,00", "0"],
            &["Bahia /@", "1.920,00", "0"],
            &["Pará /arroba", "1.950,00", "0"],
        ]),
        None,
    );
    let reading = parse_reading(&table, at(2025, 9, 19, 10, 0)).unwrap();
    assert_close(reading.bahia.arroba, 1920.0);
    assert_close(reading.para.arroba, 1950.0);
    assert_close(reading.para.kg, 130.0);
}

#[test]
fn parse_reading_unparseable_cell_keeps_earlier_value() {
    let table = RawTable::new(
        cells(&[&["Bahia /@", "1.920,00", "0"], &["Bahia /@", "s/c", "0"]]),
        None,
    );
    let reading = parse_reading(&table, at(2025, 9, 19, 10, 0)).unwrap();
    assert_close(reading.bahia.arroba, 1920.0);
}

#[test]
fn parse_reading_unparseable_region_is_all_none() {
    let table = RawTable::new(
        cells(&[&["Bahia /@", "1.920,00", "0"], &["Pará / Kg", "", "0"]]),
        None,
    );
    let reading = parse_reading(&table, at(2025, 9, 19, 10, 0)).unwrap();
    assert_close(reading.bahia.arroba, 1920.0);
    assert!(reading.para.is_missing());
    assert_eq!(reading.para.kg, None);
    assert_eq!(reading.para.saca, None);
}

#[test]
fn parse_reading_skips_short_and_unknown_rows() {
    let table = RawTable::new(
        cells(&[
            &["Bahia /@"],
            &["Espírito Santo /@", "1.700,00", "0"],
            &["Pará / Kg", "128,00"],
        ]),
        None,
    );
    let reading = parse_reading(&table, at(2025, 9, 19, 10, 0)).unwrap();
    assert!(reading.bahia.is_missing());
    assert_close(reading.para.arroba, 1920.0);
}

#[test]
fn parse_reading_parana_row_does_not_overwrite_para() {
    let table = RawTable::new(
        cells(&[&["Pará / Kg", "128,00", "0"], &["Paraná /@", "1.500,00", "0"]]),
        None,
    );
    let reading = parse_reading(&table, at(2025, 9, 19, 10, 0)).unwrap();
    assert_close(reading.para.kg, 128.0);
    assert_close(reading.para.arroba, 1920.0);
}

#[test]
fn parse_reading_without_any_region_fails() {
    let table = RawTable::new(cells(&[&["Espírito Santo /@", "1.700,00", "0"]]), None);
    let err = parse_reading(&table, at(2025, 9, 19, 10, 0)).unwrap_err();
    assert!(matches!(err, ScraperError::Parse(_)));
}
