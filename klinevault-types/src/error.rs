use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the klinevault workspace.
///
/// Every variant is fatal for the call that produced it. Conditions that are
/// expected during a load (an absent chunk, a Daily/Monthly disagreement) are
/// not errors and never appear here.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VaultError {
    /// The archive root is missing or is not a directory.
    #[error("configuration error: {path}: {reason}")]
    Configuration {
        /// Root path as given by the caller.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// The requested interval is inverted (`start > end`).
    #[error("invalid interval: start {start} is after end {end}")]
    InvalidInterval {
        /// Requested inclusive start.
        start: DateTime<Utc>,
        /// Requested exclusive end.
        end: DateTime<Utc>,
    },

    /// A granularity outside `{daily, monthly}` was named.
    #[error("unsupported data granularity: {value}")]
    UnsupportedGranularity {
        /// The unrecognised spelling.
        value: String,
    },

    /// An archive exists but cannot be read as an OHLCV chunk.
    #[error("corrupt archive {locator}: {reason}")]
    CorruptArchive {
        /// Archive locator relative to the store root.
        locator: String,
        /// What went wrong (missing member, wrong column count, bad field).
        reason: String,
    },

    /// The archive store failed for a reason other than "not found".
    #[error("{store} failed: {msg}")]
    Store {
        /// Store name that failed.
        store: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The requested capability is not implemented (e.g. trades archives).
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested.
        capability: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

impl VaultError {
    /// Helper: build a `Configuration` error for a root path.
    pub fn configuration(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build an `InvalidInterval` error.
    #[must_use]
    pub const fn invalid_interval(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::InvalidInterval { start, end }
    }

    /// Helper: build an `UnsupportedGranularity` error.
    pub fn unsupported_granularity(value: impl Into<String>) -> Self {
        Self::UnsupportedGranularity {
            value: value.into(),
        }
    }

    /// Helper: build a `CorruptArchive` error for a locator and reason.
    pub fn corrupt(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CorruptArchive {
            locator: locator.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build a `Store` error with the store name and message.
    pub fn store(store: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Store {
            store: store.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Returns true if the error was caused by the archive contents rather
    /// than by the request or the environment.
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(self, Self::CorruptArchive { .. })
    }
}
