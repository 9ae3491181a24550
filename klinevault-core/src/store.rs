//! Collaborator traits consumed by the loader: the archive store and the
//! progress sink.

use crate::VaultError;
use crate::locator::ArchiveLocator;

/// Read-only access to a tree of chunk archives.
///
/// Contract:
/// - `Ok(None)` means no archive exists at `locator`. This is the normal
///   "absent chunk" signal and must not be reported as an error.
/// - When the archive exists but has no member named `member`, or cannot be
///   opened as an archive, return `Err(VaultError::CorruptArchive)`.
/// - Other I/O failures map to `Err(VaultError::Store)`.
pub trait ArchiveStore: Send + Sync {
    /// Short, stable name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Read the bytes of `member` inside the archive at `locator`.
    ///
    /// # Errors
    /// See the trait-level contract.
    fn open_member(
        &self,
        locator: &ArchiveLocator,
        member: &str,
    ) -> Result<Option<Vec<u8>>, VaultError>;
}

impl<S: ArchiveStore + ?Sized> ArchiveStore for std::sync::Arc<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn open_member(
        &self,
        locator: &ArchiveLocator,
        member: &str,
    ) -> Result<Option<Vec<u8>>, VaultError> {
        (**self).open_member(locator, member)
    }
}

/// Fire-and-forget progress reporting.
///
/// Implementations must tolerate repeated calls for the same task with
/// non-decreasing `completed` values in `[0, 1]`, and must not influence the
/// load result.
pub trait ProgressSink: Send + Sync {
    /// Report that `task` is `completed` (fraction in `[0, 1]`) done.
    fn report(&self, task: &str, completed: f64);
}

/// Progress sink that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _task: &str, _completed: f64) {}
}

/// Progress sink that emits a `debug` event per report.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

#[cfg(feature = "tracing")]
impl ProgressSink for TracingProgress {
    fn report(&self, task: &str, completed: f64) {
        tracing::debug!(task, percent = completed * 100.0, "load progress");
    }
}
