use std::fs;

use chrono::{NaiveDate, TimeZone, Utc};
use klinevault_core::{
    ArchiveLocator, ArchiveStore, EpochUnit, Granularity, InstrumentType, Interval,
    RequestIdentity, VaultError, decode_klines,
};
use klinevault_fs::FsArchiveStore;
use klinevault_mock::fixtures::{minute_candles, write_archive, zip_member};

fn locator(granularity: Granularity) -> ArchiveLocator {
    let id = RequestIdentity::klines(InstrumentType::Spot, Interval::M1, "BTCUSDT");
    ArchiveLocator::new(
        &id,
        NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
        granularity,
    )
}

#[test]
fn open_rejects_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    match FsArchiveStore::open(&missing).unwrap_err() {
        VaultError::Configuration { reason, .. } => assert_eq!(reason, "not found"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn open_rejects_file_root() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("plain");
    fs::write(&file, b"x").unwrap();
    match FsArchiveStore::open(&file).unwrap_err() {
        VaultError::Configuration { reason, .. } => assert_eq!(reason, "not a directory"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn absent_archive_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsArchiveStore::open(dir.path()).unwrap();
    let loc = locator(Granularity::Daily);
    assert_eq!(store.open_member(&loc, &loc.member_name()).unwrap(), None);
}

#[test]
fn reads_member_written_by_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let loc = locator(Granularity::Monthly);
    let candles = minute_candles(Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap(), 5, 9000.0);
    let path = write_archive(dir.path(), &loc, &candles, EpochUnit::Millis).unwrap();

    let store = FsArchiveStore::open(dir.path()).unwrap();
    assert_eq!(store.archive_path(&loc), path);
    let bytes = store.open_member(&loc, &loc.member_name()).unwrap().unwrap();
    let decoded = decode_klines(&bytes, &loc, EpochUnit::Millis).unwrap();
    assert_eq!(decoded, candles);
}

#[test]
fn missing_member_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let loc = locator(Granularity::Daily);
    let path = dir.path().join(loc.relative_path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, zip_member("wrong-name.csv", b"").unwrap()).unwrap();

    let store = FsArchiveStore::open(dir.path()).unwrap();
    let err = store.open_member(&loc, &loc.member_name()).unwrap_err();
    match err {
        VaultError::CorruptArchive { locator, reason } => {
            assert_eq!(locator, loc.to_string());
            assert!(reason.contains("not found"), "{reason}");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn non_zip_file_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let loc = locator(Granularity::Daily);
    let path = dir.path().join(loc.relative_path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"this is not a zip archive").unwrap();

    let store = FsArchiveStore::open(dir.path()).unwrap();
    let err = store.open_member(&loc, &loc.member_name()).unwrap_err();
    assert!(matches!(err, VaultError::CorruptArchive { .. }), "{err:?}");
}
