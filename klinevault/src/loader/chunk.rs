use chrono::{DateTime, Utc};
use klinevault_core::{
    ArchiveLocator, CandleSeries, EpochUnit, Granularity, RequestIdentity, VaultError,
    decode_klines, dedup_first_wins,
};

use crate::Vault;

/// Outcome of looking up one chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkLookup {
    /// The archive exists and decoded to this (possibly empty) series.
    Present(CandleSeries),
    /// No archive exists for this chunk. Not an error.
    Absent,
}

impl ChunkLookup {
    /// The decoded series, or an empty one when absent.
    #[must_use]
    pub fn into_series(self) -> CandleSeries {
        match self {
            Self::Present(s) => s,
            Self::Absent => CandleSeries::new(),
        }
    }

    /// True when the chunk's archive was not found.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl Vault {
    /// Fetch and decode the chunk of `identity` containing `at` at
    /// `granularity`.
    ///
    /// Epoch units are chosen per chunk from its nominal date. Rows are
    /// sorted by open time; a repeated open time keeps its first row.
    ///
    /// # Errors
    /// - `Unsupported` / `InvalidArg` if the identity is not loadable.
    /// - `CorruptArchive` if the archive exists but cannot be decoded.
    /// - `Store` for other store failures.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "klinevault::fetch_chunk",
            skip(self, identity),
            fields(
                symbol = %identity.symbol,
                interval = %identity.interval,
                granularity = %granularity,
                at = %at,
            ),
        )
    )]
    pub fn fetch_chunk(
        &self,
        identity: &RequestIdentity,
        at: DateTime<Utc>,
        granularity: Granularity,
    ) -> Result<ChunkLookup, VaultError> {
        super::validate_identity(identity)?;

        let date = at.date_naive();
        let locator = ArchiveLocator::new(identity, date, granularity);
        let Some(bytes) = self.store.open_member(&locator, &locator.member_name())? else {
            #[cfg(feature = "tracing")]
            tracing::debug!(locator = %locator, "chunk absent");
            return Ok(ChunkLookup::Absent);
        };

        let unit = EpochUnit::for_chunk(identity.instrument_type, date);
        let rows = decode_klines(&bytes, &locator, unit)?;
        let (series, dropped) = dedup_first_wins(rows);
        if dropped > 0 {
            #[cfg(feature = "tracing")]
            tracing::warn!(locator = %locator, dropped, "dropping duplicate rows within chunk");
        }
        Ok(ChunkLookup::Present(series))
    }
}
