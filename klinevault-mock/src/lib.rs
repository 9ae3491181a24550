//! Test doubles for klinevault: an in-memory archive store that records
//! every lookup, a recording progress sink, and fixture writers.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use klinevault_core::{
    ArchiveLocator, ArchiveStore, Candle, EpochUnit, ProgressSink, VaultError,
};

pub mod fixtures;

/// Instruction for how a lookup should behave for a given archive.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// The archive exists and holds these members.
    Archive(HashMap<String, Vec<u8>>),
    /// Fail the lookup with the provided error.
    Fail(VaultError),
}

#[derive(Default)]
struct InternalState {
    archives: HashMap<PathBuf, MockBehavior>,
    calls: Vec<String>,
}

/// In-memory [`ArchiveStore`] keyed by archive path relative to the root.
///
/// Archives not registered are absent. Every `open_member` call is recorded
/// (as the locator's display form) before it is answered.
#[derive(Default)]
pub struct MockStore {
    state: Mutex<InternalState>,
}

impl MockStore {
    /// An empty store: every chunk is absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, InternalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `behavior` for the archive at `locator`.
    pub fn set(&self, locator: &ArchiveLocator, behavior: MockBehavior) {
        self.state()
            .archives
            .insert(locator.relative_path(), behavior);
    }

    /// Register an archive whose correctly named member holds `candles`
    /// encoded in `unit`.
    ///
    /// # Errors
    /// Returns an I/O error if the candles cannot be encoded.
    pub fn put_candles(
        &self,
        locator: &ArchiveLocator,
        candles: &[Candle],
        unit: EpochUnit,
    ) -> io::Result<()> {
        let bytes = fixtures::kline_csv(candles, unit)?;
        self.put_member(locator, &locator.member_name(), bytes);
        Ok(())
    }

    /// Register an archive with one member of arbitrary content.
    pub fn put_member(&self, locator: &ArchiveLocator, member: &str, bytes: Vec<u8>) {
        self.set(
            locator,
            MockBehavior::Archive(HashMap::from([(member.to_string(), bytes)])),
        );
    }

    /// Make lookups of `locator` fail with `err`.
    pub fn fail(&self, locator: &ArchiveLocator, err: VaultError) {
        self.set(locator, MockBehavior::Fail(err));
    }

    /// Display forms of every locator looked up so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Number of lookups so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }
}

impl ArchiveStore for MockStore {
    fn name(&self) -> &'static str {
        "klinevault-mock"
    }

    fn open_member(
        &self,
        locator: &ArchiveLocator,
        member: &str,
    ) -> Result<Option<Vec<u8>>, VaultError> {
        let mut st = self.state();
        st.calls.push(locator.to_string());
        match st.archives.get(&locator.relative_path()) {
            None => Ok(None),
            Some(MockBehavior::Fail(e)) => Err(e.clone()),
            Some(MockBehavior::Archive(members)) => members
                .get(member)
                .cloned()
                .map(Some)
                .ok_or_else(|| {
                    VaultError::corrupt(locator.to_string(), format!("member {member} not found"))
                }),
        }
    }
}

/// Progress sink that keeps every report for later inspection.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    reports: Mutex<Vec<(String, f64)>>,
}

impl RecordingProgress {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(task, completed)` pairs in arrival order.
    #[must_use]
    pub fn reports(&self) -> Vec<(String, f64)> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Completed fractions reported for `task`, in arrival order.
    #[must_use]
    pub fn values_for(&self, task: &str) -> Vec<f64> {
        self.reports()
            .into_iter()
            .filter(|(t, _)| t == task)
            .map(|(_, v)| v)
            .collect()
    }
}

impl ProgressSink for RecordingProgress {
    fn report(&self, task: &str, completed: f64) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((task.to_string(), completed));
    }
}
