use chrono::{DateTime, TimeZone, Utc};
use klinevault_core::{Interval, VaultError, canonical_timeline};
use proptest::prelude::*;

fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

#[test]
fn minute_timeline_over_reference_window() {
    let ticks = canonical_timeline(utc(2020, 1, 30), utc(2020, 3, 2), Interval::M1).unwrap();
    assert_eq!(ticks.len(), 46_080);
    assert_eq!(ticks[0], utc(2020, 1, 30));
    assert_eq!(
        *ticks.last().unwrap(),
        Utc.with_ymd_and_hms(2020, 3, 1, 23, 59, 0).unwrap()
    );
}

#[test]
fn empty_and_inverted_windows() {
    let t = utc(2020, 1, 1);
    assert!(canonical_timeline(t, t, Interval::H1).unwrap().is_empty());
    let err = canonical_timeline(utc(2020, 1, 2), t, Interval::H1).unwrap_err();
    assert!(matches!(err, VaultError::InvalidInterval { .. }));
}

#[test]
fn partial_last_step_is_included() {
    let start = utc(2020, 1, 1);
    let end = start + chrono::TimeDelta::minutes(150);
    let ticks = canonical_timeline(start, end, Interval::H1).unwrap();
    assert_eq!(ticks.len(), 3);
}

#[test]
fn monthly_interval_follows_calendar() {
    let ticks = canonical_timeline(utc(2020, 1, 1), utc(2020, 6, 1), Interval::Mo1).unwrap();
    let expected: Vec<_> = (1..=5).map(|m| utc(2020, m, 1)).collect();
    assert_eq!(ticks, expected);

    let from_31st =
        canonical_timeline(utc(2021, 1, 31), utc(2021, 4, 1), Interval::Mo1).unwrap();
    assert_eq!(
        from_31st,
        vec![utc(2021, 1, 31), utc(2021, 2, 28), utc(2021, 3, 31)]
    );
}

fn arb_fixed_interval() -> impl Strategy<Value = Interval> {
    proptest::sample::select(
        Interval::ALL
            .into_iter()
            .filter(|i| i.seconds().is_some())
            .collect::<Vec<_>>(),
    )
}

proptest! {
    #[test]
    fn length_and_spacing(
        start_s in 1_500_000_000i64..1_700_000_000i64,
        span_s in 0i64..5_000_000i64,
        interval in arb_fixed_interval(),
    ) {
        let start = DateTime::from_timestamp(start_s, 0).unwrap();
        let end = DateTime::from_timestamp(start_s + span_s, 0).unwrap();
        let step = interval.seconds().unwrap();
        let ticks = canonical_timeline(start, end, interval).unwrap();

        let expected = usize::try_from((span_s + step - 1) / step).unwrap();
        prop_assert_eq!(ticks.len(), expected);
        for (k, t) in ticks.iter().enumerate() {
            prop_assert_eq!((*t - start).num_seconds(), i64::try_from(k).unwrap() * step);
            prop_assert!(*t < end);
        }
    }
}
