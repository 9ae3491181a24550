//! Configuration types for the loader.

use serde::{Deserialize, Serialize};

use crate::candle::CandleField;

/// Which fields are compared when both granularities have a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ConflictScope {
    /// Compare the five OHLCV fields only.
    #[default]
    Core,
    /// Also compare quote volume, trade count, and taker volumes.
    Extended,
}

impl ConflictScope {
    /// Fields compared under this scope, in canonical order.
    #[must_use]
    pub const fn fields(self) -> &'static [CandleField] {
        match self {
            Self::Core => &CandleField::CORE,
            Self::Extended => &CandleField::ALL,
        }
    }
}

/// Global configuration for the `Vault` loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Build the Daily and Monthly series on two scoped threads.
    ///
    /// Results are identical either way; the builds share no mutable state.
    pub parallel_granularities: bool,
    /// Fields compared for Daily/Monthly disagreement.
    pub conflict_scope: ConflictScope,
}
