//! Chunk calendar: boundaries and archive date keys per granularity.
//!
//! The granularity set is closed, so every rule below is an exhaustive
//! `match`; adding a level forces every rule to be revisited at compile time.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeZone};

use crate::{Granularity, VaultError};

/// Calendar rules attached to each [`Granularity`].
pub trait GranularityCalendar {
    /// Start of the chunk following the one containing `instant`, in the
    /// same timezone as `instant`.
    ///
    /// Iterating this from any instant visits every boundary exactly once,
    /// strictly increasing.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the next boundary falls outside the
    /// representable calendar or does not exist as a local time.
    fn next_boundary<Tz: TimeZone>(
        self,
        instant: &DateTime<Tz>,
    ) -> Result<DateTime<Tz>, VaultError>;

    /// Date key used in a chunk's archive name: `YYYY-MM-DD` for daily
    /// chunks, `YYYY-MM` for monthly ones.
    fn file_date_key(self, date: NaiveDate) -> String;
}

impl GranularityCalendar for Granularity {
    fn next_boundary<Tz: TimeZone>(
        self,
        instant: &DateTime<Tz>,
    ) -> Result<DateTime<Tz>, VaultError> {
        let date = instant.date_naive();
        let next = match self {
            Self::Daily => date.checked_add_days(Days::new(1)),
            Self::Monthly => date
                .with_day(1)
                .and_then(|first| first.checked_add_months(Months::new(1))),
        }
        .ok_or_else(|| VaultError::InvalidArg(format!("no {self} boundary after {date}")))?;

        instant
            .timezone()
            .from_local_datetime(&next.and_time(chrono::NaiveTime::MIN))
            .earliest()
            .ok_or_else(|| {
                VaultError::InvalidArg(format!("{next} midnight does not exist in this timezone"))
            })
    }

    fn file_date_key(self, date: NaiveDate) -> String {
        match self {
            Self::Daily => format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day()),
            Self::Monthly => format!("{:04}-{:02}", date.year(), date.month()),
        }
    }
}

/// Free-function form of [`GranularityCalendar::next_boundary`].
///
/// # Errors
/// See [`GranularityCalendar::next_boundary`].
pub fn next_boundary<Tz: TimeZone>(
    granularity: Granularity,
    instant: &DateTime<Tz>,
) -> Result<DateTime<Tz>, VaultError> {
    granularity.next_boundary(instant)
}

/// Free-function form of [`GranularityCalendar::file_date_key`].
#[must_use]
pub fn file_date_key(granularity: Granularity, date: NaiveDate) -> String {
    granularity.file_date_key(date)
}

/// Parse a granularity name and return its date key for `date`.
///
/// # Errors
/// Returns `UnsupportedGranularity` when `granularity` is neither `daily`
/// nor `monthly`.
pub fn file_date_key_for(granularity: &str, date: NaiveDate) -> Result<String, VaultError> {
    let g: Granularity = granularity.parse()?;
    Ok(g.file_date_key(date))
}
