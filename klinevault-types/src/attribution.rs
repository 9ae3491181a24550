//! Attribution of reconciled rows to the granularity that supplied them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which source a reconciled timeline row was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowSource {
    /// A daily archive had a row at this tick.
    Daily,
    /// No daily row; a monthly archive had one.
    Monthly,
    /// Neither granularity had a row; the output row is all-null.
    Missing,
}

/// A continuous run of timeline rows `[start..=end]` sharing one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive first tick.
    pub start: DateTime<Utc>,
    /// Inclusive last tick.
    pub end: DateTime<Utc>,
    /// Number of timeline rows in the run.
    pub rows: usize,
}

/// Attribution of a reconciled series: which source supplied which spans.
///
/// Behavior:
/// - Built while walking the canonical timeline; a new span starts whenever
///   the source of the current row differs from the previous row's.
/// - Spans are in timeline order and together cover every output row once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    /// Collected spans annotated by source.
    pub spans: Vec<(RowSource, Span)>,
}

impl Attribution {
    /// Create an empty attribution.
    #[must_use]
    pub const fn new() -> Self {
        Self { spans: vec![] }
    }

    /// Record one timeline row, extending the last span when the source
    /// matches.
    pub fn push_row(&mut self, source: RowSource, ts: DateTime<Utc>) {
        if let Some((last_src, span)) = self.spans.last_mut() {
            if *last_src == source {
                span.end = ts;
                span.rows += 1;
                return;
            }
        }
        self.spans.push((
            source,
            Span {
                start: ts,
                end: ts,
                rows: 1,
            },
        ));
    }

    /// Total rows attributed to `source`.
    #[must_use]
    pub fn rows_from(&self, source: RowSource) -> usize {
        self.spans
            .iter()
            .filter(|(s, _)| *s == source)
            .map(|(_, span)| span.rows)
            .sum()
    }

    /// Total rows across all spans.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.spans.iter().map(|(_, span)| span.rows).sum()
    }
}
