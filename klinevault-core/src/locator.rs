//! Archive locator: the vendor's path convention for one chunk.
//!
//! ```text
//! <instrument_type>/<granularity>/<data_type>/<symbol>/<interval>/<symbol>-<interval>-<key>.zip
//! ```
//!
//! The archive holds one member named `<symbol>-<interval>-<key>.csv`.

use core::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::calendar::GranularityCalendar;
use crate::{Granularity, RequestIdentity};

/// Location of one chunk archive, relative to a store root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveLocator {
    segments: [String; 5],
    stem: String,
}

impl ArchiveLocator {
    /// Locator for the chunk of `identity` containing `date` at `granularity`.
    #[must_use]
    pub fn new(identity: &RequestIdentity, date: NaiveDate, granularity: Granularity) -> Self {
        let key = granularity.file_date_key(date);
        Self {
            segments: [
                identity.instrument_type.as_str().to_string(),
                granularity.as_str().to_string(),
                identity.data_type.as_str().to_string(),
                identity.symbol.clone(),
                identity.interval.as_str().to_string(),
            ],
            stem: format!("{}-{}-{key}", identity.symbol, identity.interval),
        }
    }

    /// Archive file name, e.g. `BTCUSDT-1m-2020-02.zip`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.zip", self.stem)
    }

    /// Name of the row file inside the archive, e.g. `BTCUSDT-1m-2020-02.csv`.
    #[must_use]
    pub fn member_name(&self) -> String {
        format!("{}.csv", self.stem)
    }

    /// Path of the archive relative to the store root.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        let mut p: PathBuf = self.segments.iter().collect();
        p.push(self.file_name());
        p
    }
}

impl fmt::Display for ArchiveLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.segments {
            write!(f, "{s}/")?;
        }
        write!(f, "{}.zip", self.stem)
    }
}
