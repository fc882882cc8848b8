//! Bookkeeping of local/remote divergence.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

use crate::LoadError;

/// Where a record stands with respect to the remote store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Changed locally, remote write not confirmed yet.
    Pending,
    /// Local and remote agree.
    Synced,
    /// The last remote write was rejected; local state diverges until the
    /// next successful sync or `initialize()`.
    Failed,
}

/// Progress of the initial load.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(LoadError),
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct SyncEntry {
    /// Local revision the status refers to.
    pub(crate) revision: u64,
    pub(crate) status: SyncStatus,
}

/// Counts one in-flight remote call for as long as it lives, so that a
/// dropped future still releases the busy flag.
pub(crate) struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    pub(crate) fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
