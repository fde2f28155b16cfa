// ── Single-record detail lookup ──
//
// Fetches one record per identifier change and holds its display state.
// Independent of the collection snapshot: it neither reads nor writes the
// roster listing. A response only lands if no newer request was made
// since it was issued, so switching ids quickly never shows the wrong
// record.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::directory::StudentDirectory;
use crate::model::{StudentId, StudentRecord};
use crate::roster::SyncOutcome;

/// Display state of the detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailState {
    /// Request outstanding (or nothing requested yet). Shows a loading
    /// indicator.
    #[default]
    Unloaded,
    Loaded(StudentRecord),
    /// The lookup failed. Shows no data; the failure was logged.
    Failed,
}

impl DetailState {
    pub fn record(&self) -> Option<&StudentRecord> {
        match self {
            Self::Loaded(record) => Some(record),
            Self::Unloaded | Self::Failed => None,
        }
    }
}

/// Current identifier plus its display state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailSlot {
    pub id: Option<StudentId>,
    pub state: DetailState,
    request: u64,
}

/// Detail lookup keyed by identifier. Cheaply cloneable.
#[derive(Clone)]
pub struct DetailLookup {
    inner: Arc<DetailInner>,
}

struct DetailInner {
    directory: StudentDirectory,
    slot: watch::Sender<DetailSlot>,
}

impl DetailLookup {
    pub fn new(directory: StudentDirectory) -> Self {
        let (slot, _) = watch::channel(DetailSlot::default());
        Self {
            inner: Arc::new(DetailInner { directory, slot }),
        }
    }

    /// Show `id`. Fetches once per identifier change; asking for the
    /// identifier already shown is a no-op.
    pub async fn load(&self, id: StudentId) -> SyncOutcome {
        let mut request = 0;
        let switched = self.inner.slot.send_if_modified(|slot| {
            if slot.id.as_ref() == Some(&id) {
                return false;
            }
            slot.request += 1;
            request = slot.request;
            slot.id = Some(id.clone());
            slot.state = DetailState::Unloaded;
            true
        });
        if !switched {
            debug!(%id, "detail already showing this id");
            return SyncOutcome::Skipped;
        }
        self.fetch(id, request).await
    }

    /// Fetch the current identifier again.
    pub async fn reload(&self) -> SyncOutcome {
        let mut target = None;
        self.inner.slot.send_if_modified(|slot| {
            let Some(id) = slot.id.clone() else {
                return false;
            };
            slot.request += 1;
            slot.state = DetailState::Unloaded;
            target = Some((id, slot.request));
            true
        });
        match target {
            Some((id, request)) => self.fetch(id, request).await,
            None => SyncOutcome::Skipped,
        }
    }

    /// Forget the current identifier, as when the view is left. The next
    /// `load` fetches even for the same id, and a response still in flight
    /// is discarded.
    pub fn reset(&self) {
        self.inner.slot.send_if_modified(|slot| {
            if slot.id.is_none() {
                return false;
            }
            slot.request += 1;
            slot.id = None;
            slot.state = DetailState::Unloaded;
            true
        });
    }

    pub fn current_id(&self) -> Option<StudentId> {
        self.inner.slot.borrow().id.clone()
    }

    pub fn state(&self) -> DetailState {
        self.inner.slot.borrow().state.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailSlot> {
        self.inner.slot.subscribe()
    }

    async fn fetch(&self, id: StudentId, request: u64) -> SyncOutcome {
        let (state, outcome) = match self.inner.directory.get_by_id(&id).await {
            Ok(record) => (DetailState::Loaded(record), SyncOutcome::Applied),
            Err(e) => {
                warn!(%id, error = %e, "failed to fetch student details");
                (DetailState::Failed, SyncOutcome::Failed)
            }
        };

        let landed = self.inner.slot.send_if_modified(|slot| {
            if slot.request != request {
                return false;
            }
            slot.state = state;
            true
        });
        if landed {
            outcome
        } else {
            debug!(%id, "discarding detail for a stale request");
            SyncOutcome::Superseded
        }
    }
}
