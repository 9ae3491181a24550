use std::path::Path;
use std::sync::Arc;

use klinevault_core::{ArchiveStore, ConflictScope, ProgressSink, VaultConfig, VaultError};
use klinevault_fs::FsArchiveStore;

/// Loader that reads chunked kline archives and reconciles the daily and
/// monthly granularities into one gap-free series.
pub struct Vault {
    pub(crate) store: Arc<dyn ArchiveStore>,
    pub(crate) progress: Arc<dyn ProgressSink>,
    pub(crate) cfg: VaultConfig,
}

/// Builder for constructing a `Vault` with custom configuration.
pub struct VaultBuilder {
    store: Option<Arc<dyn ArchiveStore>>,
    progress: Arc<dyn ProgressSink>,
    cfg: VaultConfig,
}

impl Default for VaultBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn default_progress() -> Arc<dyn ProgressSink> {
    #[cfg(feature = "tracing")]
    {
        Arc::new(klinevault_core::TracingProgress)
    }
    #[cfg(not(feature = "tracing"))]
    {
        Arc::new(klinevault_core::NoProgress)
    }
}

impl VaultBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Starts with no store; register one via [`store`](Self::store).
    /// Progress is discarded unless the `tracing` feature is on, in which
    /// case it is emitted as `debug` events.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: None,
            progress: default_progress(),
            cfg: VaultConfig::default(),
        }
    }

    /// Set the archive store to read chunks from. Replaces any earlier one.
    #[must_use]
    pub fn store(mut self, store: Arc<dyn ArchiveStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the progress sink.
    #[must_use]
    pub fn progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: VaultConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the daily and monthly series on two scoped threads.
    ///
    /// Output is identical to the sequential build.
    #[must_use]
    pub const fn parallel_granularities(mut self, yes: bool) -> Self {
        self.cfg.parallel_granularities = yes;
        self
    }

    /// Choose which fields are compared for Daily/Monthly disagreement.
    #[must_use]
    pub const fn conflict_scope(mut self, scope: ConflictScope) -> Self {
        self.cfg.conflict_scope = scope;
        self
    }

    /// Build the `Vault`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no store has been registered via
    /// [`store`](Self::store).
    pub fn build(self) -> Result<Vault, VaultError> {
        let store = self.store.ok_or_else(|| {
            VaultError::InvalidArg("no archive store registered; add one via store(...)".into())
        })?;
        Ok(Vault {
            store,
            progress: self.progress,
            cfg: self.cfg,
        })
    }
}

impl Vault {
    /// Start building a new `Vault`.
    #[must_use]
    pub fn builder() -> VaultBuilder {
        VaultBuilder::new()
    }

    /// Convenience: a `Vault` over a local archive tree with default
    /// configuration.
    ///
    /// # Errors
    /// Returns `Configuration` if `root` is missing or not a directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, VaultError> {
        let store = FsArchiveStore::open(root)?;
        Self::builder().store(Arc::new(store)).build()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &VaultConfig {
        &self.cfg
    }

    /// Name of the underlying archive store.
    #[must_use]
    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }
}
