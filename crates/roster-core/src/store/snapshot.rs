// ── Generation-guarded collection snapshot ──
//
// The listing is replaced wholesale, never patched. Each refresh takes a
// ticket from a monotonically increasing generation counter; a result may
// only be applied while its ticket is still the latest one issued. The
// check and the write happen inside `send_if_modified`, so two results
// can never interleave between them.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::model::StudentRecord;

pub type Snapshot = Arc<Vec<Arc<StudentRecord>>>;

/// Proof that a refresh was issued; compared against the latest issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct RefreshTicket(u64);

pub(crate) struct SnapshotStore {
    issued: AtomicU64,
    snapshot: watch::Sender<Snapshot>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl SnapshotStore {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (last_refresh, _) = watch::channel(None);
        Self {
            issued: AtomicU64::new(0),
            snapshot,
            last_refresh,
        }
    }

    /// Issue a ticket for a new refresh, superseding every earlier one.
    pub(crate) fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Replace the snapshot if `ticket` is still the latest refresh.
    /// Returns `false` when the result was discarded as stale.
    pub(crate) fn apply(&self, ticket: RefreshTicket, records: Vec<StudentRecord>) -> bool {
        let mut applied = false;
        self.snapshot.send_if_modified(|snap| {
            if self.issued.load(Ordering::SeqCst) != ticket.0 {
                return false;
            }
            *snap = Arc::new(records.into_iter().map(Arc::new).collect());
            applied = true;
            true
        });
        if applied {
            self.last_refresh.send_replace(Some(Utc::now()));
        }
        applied
    }

    /// Apply the empty listing a failed refresh leaves behind, under the
    /// same staleness rule as [`apply`](Self::apply).
    pub(crate) fn apply_failure(&self, ticket: RefreshTicket) -> bool {
        let mut applied = false;
        self.snapshot.send_if_modified(|snap| {
            if self.issued.load(Ordering::SeqCst) != ticket.0 {
                return false;
            }
            applied = true;
            if snap.is_empty() {
                return false;
            }
            *snap = Arc::new(Vec::new());
            true
        });
        applied
    }

    /// Empty the snapshot locally. Issues no ticket, so a refresh already
    /// in flight still lands.
    pub(crate) fn clear(&self) {
        self.snapshot.send_modify(|snap| *snap = Arc::new(Vec::new()));
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    pub(crate) fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    pub(crate) fn subscribe_last_refresh(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.last_refresh.subscribe()
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}
