use chrono::{DateTime, Utc};
use klinevault_core::{
    CandleSeries, Granularity, OhlcvReport, RequestIdentity, VaultError, canonical_timeline,
    reconcile,
};

use crate::Vault;

impl Vault {
    /// Load a gap-free OHLCV series over `[start, end)`.
    ///
    /// Behavior:
    /// - One output row per tick `start + k·interval` before `end`, in
    ///   canonical column order. Ticks with no data in either granularity
    ///   are all-null rows.
    /// - Each field takes the daily value when non-null, else the monthly
    ///   value.
    /// - Ticks where both granularities have a row but disagree are listed
    ///   in `conflicts`; the output keeps the daily value.
    /// - `start == end` returns an empty report without touching the store.
    ///
    /// # Errors
    /// - `Unsupported` if the data type is not `klines`.
    /// - `InvalidArg` if the symbol is empty.
    /// - `InvalidInterval` if `start > end`.
    /// - `CorruptArchive` / `Store` from any chunk read; no partial result
    ///   is returned.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "klinevault::load_ohlcv",
            skip(self, identity),
            fields(
                store = self.store_name(),
                symbol = %identity.symbol,
                interval = %identity.interval,
                start = %start,
                end = %end,
            ),
            err,
        )
    )]
    pub fn load_ohlcv(
        &self,
        identity: &RequestIdentity,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<OhlcvReport, VaultError> {
        super::validate_identity(identity)?;
        if start > end {
            return Err(VaultError::invalid_interval(start, end));
        }
        if start == end {
            return Ok(OhlcvReport::empty(identity.clone(), start, end));
        }

        let timeline = canonical_timeline(start, end, identity.interval)?;
        let (daily, monthly) = self.load_both(identity, start, end)?;
        let merged = reconcile(&timeline, &daily, &monthly, self.cfg.conflict_scope);

        let report = OhlcvReport {
            identity: identity.clone(),
            start,
            end,
            series: merged.series,
            conflicts: merged.conflicts,
            attribution: merged.attribution,
        };
        if !report.conflicts.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                symbol = %identity.symbol,
                interval = %identity.interval,
                ambiguous_rows = report.ambiguous_rows(),
                conflicts = report.conflicts.len(),
                "daily and monthly archives disagree; daily values kept"
            );
        }
        Ok(report)
    }

    fn load_both(
        &self,
        identity: &RequestIdentity,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(CandleSeries, CandleSeries), VaultError> {
        if !self.cfg.parallel_granularities {
            let daily = self.load_granularity(identity, start, end, Granularity::Daily)?;
            let monthly = self.load_granularity(identity, start, end, Granularity::Monthly)?;
            return Ok((daily, monthly));
        }

        std::thread::scope(|s| {
            let daily =
                s.spawn(|| self.load_granularity(identity, start, end, Granularity::Daily));
            let monthly = self.load_granularity(identity, start, end, Granularity::Monthly);
            let daily = daily
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
            // Daily errors win so both modes report the same failure.
            Ok((daily?, monthly?))
        })
    }
}
