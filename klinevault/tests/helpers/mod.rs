// Shared fixtures so tests can `use helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use klinevault::{
    ArchiveLocator, Candle, Granularity, InstrumentType, Interval, RequestIdentity, Vault,
    VaultConfig,
};
use klinevault_core::EpochUnit;
use klinevault_mock::{MockStore, RecordingProgress};

pub const BTCUSDT: &str = "BTCUSDT";

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(hh, mm, 0)
        .unwrap()
        .and_utc()
}

pub fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    dt(y, m, d, 0, 0)
}

pub fn spot_1m() -> RequestIdentity {
    RequestIdentity::klines(InstrumentType::Spot, Interval::M1, BTCUSDT)
}

pub fn locator(identity: &RequestIdentity, at: DateTime<Utc>, g: Granularity) -> ArchiveLocator {
    ArchiveLocator::new(identity, at.date_naive(), g)
}

/// Register `candles` as the archive of `identity` at `g` containing `at`.
pub fn put(
    store: &MockStore,
    identity: &RequestIdentity,
    at: DateTime<Utc>,
    g: Granularity,
    candles: &[Candle],
) {
    let unit = EpochUnit::for_chunk(identity.instrument_type, at.date_naive());
    store
        .put_candles(&locator(identity, at, g), candles, unit)
        .unwrap();
}

pub fn vault(store: &Arc<MockStore>, cfg: VaultConfig) -> Vault {
    Vault::builder()
        .store(store.clone())
        .config(cfg)
        .build()
        .unwrap()
}

pub fn vault_with_progress(
    store: &Arc<MockStore>,
    progress: &Arc<RecordingProgress>,
) -> Vault {
    Vault::builder()
        .store(store.clone())
        .progress(progress.clone())
        .build()
        .unwrap()
}
