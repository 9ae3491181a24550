mod helpers;

use std::sync::Arc;

use chrono::TimeDelta;
use helpers::*;
use klinevault::{
    Candle, Granularity, InstrumentType, Interval, RequestIdentity, RowSource, VaultConfig,
};
use klinevault_mock::MockStore;
use klinevault_mock::fixtures::candle_at;
use proptest::prelude::*;

fn hourly(start_day: u32, hours: usize, px: f64) -> Vec<Candle> {
    (0..hours)
        .map(|h| {
            let h = i64::try_from(h).unwrap();
            candle_at(day(2021, 3, start_day) + TimeDelta::hours(h), px + h as f64)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn parallel_equals_serial_and_rows_cover_timeline(
        daily_present in proptest::collection::vec(any::<bool>(), 6),
        monthly_present in any::<bool>(),
        monthly_px in 0.0f64..5.0,
        start_h in 0i64..24,
        span_h in 0i64..(5 * 24),
    ) {
        let id = RequestIdentity::klines(InstrumentType::Spot, Interval::H1, BTCUSDT);
        let store = Arc::new(MockStore::new());
        for (i, present) in daily_present.iter().enumerate() {
            if *present {
                let d = u32::try_from(i).unwrap() + 1;
                put(&store, &id, day(2021, 3, d), Granularity::Daily, &hourly(d, 24, 100.0));
            }
        }
        if monthly_present {
            put(&store, &id, day(2021, 3, 1), Granularity::Monthly, &hourly(1, 6 * 24, 100.0 + monthly_px));
        }

        let start = day(2021, 3, 1) + TimeDelta::hours(start_h);
        let end = start + TimeDelta::hours(span_h);
        let serial = vault(&store, VaultConfig::default())
            .load_ohlcv(&id, start, end)
            .unwrap();
        let parallel = vault(&store, VaultConfig { parallel_granularities: true, ..VaultConfig::default() })
            .load_ohlcv(&id, start, end)
            .unwrap();
        prop_assert_eq!(&serial, &parallel);

        let n = usize::try_from(span_h).unwrap();
        prop_assert_eq!(serial.series.len(), n);
        prop_assert_eq!(serial.attribution.total_rows(), n);
        let missing = serial.attribution.rows_from(RowSource::Missing);
        prop_assert_eq!(serial.series.null_count(), missing * Candle::NULLABLE_COLUMNS);
        if monthly_present {
            prop_assert_eq!(missing, 0);
        }
    }
}
