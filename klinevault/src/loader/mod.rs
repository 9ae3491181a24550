//! Loader operations on [`Vault`](crate::Vault): chunk fetch, per-granularity
//! series build, and the reconciled OHLCV load.

mod chunk;
mod ohlcv;
mod series;

pub use chunk::ChunkLookup;

use klinevault_core::{DataType, RequestIdentity, VaultError};

/// Reject identities the loader cannot serve.
pub(crate) fn validate_identity(identity: &RequestIdentity) -> Result<(), VaultError> {
    if identity.data_type != DataType::Klines {
        return Err(VaultError::unsupported(format!(
            "data type {}",
            identity.data_type
        )));
    }
    if identity.symbol.trim().is_empty() {
        return Err(VaultError::InvalidArg("symbol must not be empty".into()));
    }
    Ok(())
}
