use chrono::{DateTime, Utc};
use klinevault_core::{
    CandleSeries, Granularity, RequestIdentity, VaultError, dedup_first_wins, next_boundary,
};

use crate::Vault;
use crate::loader::ChunkLookup;

/// Progress task label for one granularity build.
fn task_label(granularity: Granularity, identity: &RequestIdentity) -> String {
    format!("{granularity} {} OHLCV", identity.label())
}

/// Elapsed fraction of `[start, end)` at `at`, clamped to `[0, 1]`.
#[allow(clippy::cast_precision_loss)]
fn fraction(start: DateTime<Utc>, end: DateTime<Utc>, at: DateTime<Utc>) -> f64 {
    let total = (end - start).num_milliseconds();
    if total <= 0 {
        return 1.0;
    }
    let done = (at - start).num_milliseconds();
    (done as f64 / total as f64).clamp(0.0, 1.0)
}

impl Vault {
    /// Build the series of one granularity over `[start, end)` by walking
    /// its chunks from the one containing `start`.
    ///
    /// Behavior:
    /// - Absent chunks contribute nothing.
    /// - Rows are merged by open time; on overlap the earlier chunk wins.
    ///   Rows outside the window are kept; the reconciler ignores them.
    /// - Progress is reported under `"<granularity> <SYMBOL-interval> OHLCV"`:
    ///   once with `0.0` before the first chunk, then after every chunk with
    ///   the elapsed fraction of the window, clamped to `[0, 1]`.
    ///
    /// # Errors
    /// - `InvalidInterval` if `start > end`.
    /// - Any error from [`fetch_chunk`](Self::fetch_chunk) aborts the build.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "klinevault::load_granularity",
            skip(self, identity),
            fields(
                symbol = %identity.symbol,
                interval = %identity.interval,
                granularity = %granularity,
                start = %start,
                end = %end,
            ),
        )
    )]
    pub fn load_granularity(
        &self,
        identity: &RequestIdentity,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        granularity: Granularity,
    ) -> Result<CandleSeries, VaultError> {
        super::validate_identity(identity)?;
        if start > end {
            return Err(VaultError::invalid_interval(start, end));
        }

        let task = task_label(granularity, identity);
        self.progress.report(&task, 0.0);

        let mut rows = Vec::new();
        let mut at = start;
        while at < end {
            if let ChunkLookup::Present(chunk) = self.fetch_chunk(identity, at, granularity)? {
                rows.extend(chunk);
            }
            at = next_boundary(granularity, &at)?;
            self.progress.report(&task, fraction(start, end, at));
        }

        let (series, dropped) = dedup_first_wins(rows);
        if dropped > 0 {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                symbol = %identity.symbol,
                granularity = %granularity,
                dropped,
                "dropping duplicate rows across chunks"
            );
        }
        Ok(series)
    }
}
