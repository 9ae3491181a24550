mod helpers;

use helpers::*;
use klinevault::{CandleField, Granularity, RowSource, Vault, VaultConfig};
use klinevault_core::EpochUnit;
use klinevault_mock::fixtures::{minute_candles, write_archive};

const DAY: usize = 1440;

/// Lay out a spot BTCUSDT 1m archive tree around February 2020:
/// - daily 2020-01-30 and 2020-01-31, full
/// - monthly 2020-01 covering the same two days, three closes disagreeing
/// - monthly 2020-02, full except a 900-minute gap on 2020-02-10
/// - daily 2020-02-20, identical to the monthly rows for that day
/// - daily 2020-03-01 missing its last 27 minutes
/// - monthly 2020-03 absent
fn build_tree(root: &std::path::Path) {
    let id = spot_1m();
    let write = |at, g, candles: &[klinevault::Candle]| {
        write_archive(root, &locator(&id, at, g), candles, EpochUnit::Millis).unwrap();
    };

    write(day(2020, 1, 30), Granularity::Daily, &minute_candles(day(2020, 1, 30), DAY, 100.0));
    write(day(2020, 1, 31), Granularity::Daily, &minute_candles(day(2020, 1, 31), DAY, 1540.0));

    let mut jan = minute_candles(day(2020, 1, 30), 2 * DAY, 100.0);
    for i in [10, 500, 2000] {
        jan[i].close = jan[i].close.map(|c| c + 0.5);
    }
    write(day(2020, 1, 1), Granularity::Monthly, &jan);

    let feb = minute_candles(day(2020, 2, 1), 29 * DAY, 5000.0);
    let gap = 9 * DAY..9 * DAY + 900;
    let feb_with_gap: Vec<_> = feb
        .iter()
        .enumerate()
        .filter(|(i, _)| !gap.contains(i))
        .map(|(_, c)| *c)
        .collect();
    write(day(2020, 2, 1), Granularity::Monthly, &feb_with_gap);
    write(day(2020, 2, 20), Granularity::Daily, &feb[19 * DAY..20 * DAY]);

    write(day(2020, 3, 1), Granularity::Daily, &minute_candles(day(2020, 3, 1), DAY - 27, 90_000.0));
}

#[test]
fn february_2020_reference_counts() {
    let dir = tempfile::tempdir().unwrap();
    build_tree(dir.path());
    let vault = Vault::open(dir.path()).unwrap();

    let report = vault
        .load_ohlcv(&spot_1m(), day(2020, 1, 30), day(2020, 3, 2))
        .unwrap();

    assert_eq!(report.series.len(), 46_080);
    assert_eq!(report.series.null_count(), 9_270);
    assert_eq!(report.series.first().unwrap().date_time, day(2020, 1, 30));
    assert_eq!(report.series.last().unwrap().date_time, dt(2020, 3, 1, 23, 59));

    assert_eq!(report.attribution.rows_from(RowSource::Daily), 3 * DAY + DAY - 27);
    assert_eq!(report.attribution.rows_from(RowSource::Monthly), 29 * DAY - 900 - DAY);
    assert_eq!(report.attribution.rows_from(RowSource::Missing), 927);

    assert_eq!(report.ambiguous_rows(), 3);
    assert_eq!(report.conflicts.len(), 3);
    assert!(report.conflicts.iter().all(|c| c.field == CandleField::Close));
    let first = report.conflicts[0];
    assert_eq!(first.date_time, dt(2020, 1, 30, 0, 10));
    assert_eq!(first.daily, Some(111.0));
    assert_eq!(first.monthly, Some(111.5));
    // Daily value wins in the output row.
    assert_eq!(report.series.as_slice()[10].close, Some(111.0));
}

#[test]
fn gap_rows_are_null_and_neighbours_filled() {
    let dir = tempfile::tempdir().unwrap();
    build_tree(dir.path());
    let vault = Vault::open(dir.path()).unwrap();

    let report = vault
        .load_ohlcv(&spot_1m(), day(2020, 2, 10), day(2020, 2, 11))
        .unwrap();
    let rows = report.series.as_slice();
    assert_eq!(rows.len(), DAY);
    assert!(rows[..900].iter().all(klinevault::Candle::is_missing));
    assert!(rows[900..].iter().all(|c| c.null_count() == 0));
    assert_eq!(rows[900].date_time, dt(2020, 2, 10, 15, 0));
}

#[test]
fn parallel_matches_serial_over_fs_tree() {
    let dir = tempfile::tempdir().unwrap();
    build_tree(dir.path());
    let serial = Vault::open(dir.path()).unwrap();
    let parallel = Vault::builder()
        .store(std::sync::Arc::new(klinevault::FsArchiveStore::open(dir.path()).unwrap()))
        .config(VaultConfig {
            parallel_granularities: true,
            ..VaultConfig::default()
        })
        .build()
        .unwrap();

    let a = serial
        .load_ohlcv(&spot_1m(), day(2020, 1, 30), day(2020, 2, 2))
        .unwrap();
    let b = parallel
        .load_ohlcv(&spot_1m(), day(2020, 1, 30), day(2020, 2, 2))
        .unwrap();
    assert_eq!(a, b);
}
