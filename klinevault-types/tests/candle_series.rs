use chrono::{DateTime, Utc};
use klinevault_types::{
    Attribution, CANONICAL_COLUMNS, Candle, CandleField, CandleSeries, RowSource, VaultError,
};

fn t(sec: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(sec, 0).unwrap()
}

fn full(sec: i64, px: f64) -> Candle {
    Candle {
        date_time: t(sec),
        open: Some(px),
        high: Some(px),
        low: Some(px),
        close: Some(px),
        volume: Some(1.0),
        close_date_time: Some(t(sec + 59)),
        quote_volume: Some(px),
        trades_count: Some(3),
        taker_buy_base_volume: Some(0.5),
        taker_buy_quote_volume: Some(px / 2.0),
    }
}

#[test]
fn series_rejects_duplicates_and_disorder() {
    assert!(CandleSeries::from_sorted(vec![full(0, 1.0), full(60, 1.0)]).is_ok());
    let dup = CandleSeries::from_sorted(vec![full(0, 1.0), full(0, 2.0)]);
    assert!(matches!(dup, Err(VaultError::InvalidArg(_))));
    let back = CandleSeries::from_sorted(vec![full(60, 1.0), full(0, 2.0)]);
    assert!(back.is_err());
}

#[test]
fn series_deserialization_enforces_ordering() {
    let ok = CandleSeries::from_sorted(vec![full(0, 1.0), full(60, 2.0)]).unwrap();
    let json = serde_json::to_string(&ok).unwrap();
    let de: CandleSeries = serde_json::from_str(&json).unwrap();
    assert_eq!(de, ok);

    let bad = serde_json::to_string(&vec![full(60, 1.0), full(0, 2.0)]).unwrap();
    assert!(serde_json::from_str::<CandleSeries>(&bad).is_err());
}

#[test]
fn null_counting() {
    assert_eq!(CANONICAL_COLUMNS.len(), 11);
    assert_eq!(Candle::NULLABLE_COLUMNS, 10);

    let missing = Candle::missing(t(120));
    assert!(missing.is_missing());
    assert_eq!(missing.null_count(), 10);

    let mut partial = full(60, 2.0);
    partial.volume = None;
    partial.trades_count = None;
    assert_eq!(partial.null_count(), 2);
    assert_eq!(partial.field(CandleField::TradesCount), None);
    assert_eq!(full(0, 1.0).field(CandleField::TradesCount), Some(3.0));

    let s = CandleSeries::from_sorted(vec![full(0, 1.0), partial, missing]).unwrap();
    assert_eq!(s.null_count(), 12);
    let counts = s.non_null_counts();
    assert_eq!(counts[0], 2);
    assert_eq!(counts[4], 1);
    assert_eq!(counts[5], 2);
    assert_eq!(counts[7], 1);
}

#[test]
fn attribution_extends_runs() {
    let mut a = Attribution::new();
    a.push_row(RowSource::Daily, t(0));
    a.push_row(RowSource::Daily, t(60));
    a.push_row(RowSource::Missing, t(120));
    a.push_row(RowSource::Monthly, t(180));
    a.push_row(RowSource::Monthly, t(240));
    a.push_row(RowSource::Daily, t(300));

    assert_eq!(a.spans.len(), 4);
    assert_eq!(a.spans[0].1.start, t(0));
    assert_eq!(a.spans[0].1.end, t(60));
    assert_eq!(a.rows_from(RowSource::Daily), 3);
    assert_eq!(a.rows_from(RowSource::Monthly), 2);
    assert_eq!(a.rows_from(RowSource::Missing), 1);
    assert_eq!(a.total_rows(), 6);
}

#[test]
fn push_after_only_advances() {
    let mut s = CandleSeries::new();
    assert!(s.push_after(full(60, 1.0)));
    assert!(!s.push_after(full(60, 2.0)));
    assert!(!s.push_after(full(0, 3.0)));
    assert!(s.push_after(full(120, 4.0)));
    assert_eq!(s.len(), 2);
    assert_eq!(s.last().unwrap().open, Some(4.0));
}
