// ── Collection sync controller ──
//
// Owns the authoritative local view of the remote collection: the
// listing snapshot, the creation draft, and the row selection. Every
// mutation goes through the directory and, once it succeeds, triggers
// exactly one full re-fetch. Failures are logged here, once, and
// swallowed; callers only see a `SyncOutcome`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use strum::Display;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::RosterConfig;
use crate::detail::DetailLookup;
use crate::directory::StudentDirectory;
use crate::error::CoreError;
use crate::model::{NewStudentDraft, StudentId};
use crate::selection::SelectionTracker;
use crate::store::{Snapshot, SnapshotStore};
use crate::stream::SnapshotStream;

// ── SyncOutcome ──────────────────────────────────────────────────

/// What an operation did to local state. A status, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SyncOutcome {
    /// Local state was updated.
    Applied,
    /// Nothing was attempted (e.g. an incomplete draft).
    Skipped,
    /// A remote call failed; the failure has been logged.
    Failed,
    /// A newer refresh was issued while this one was in flight; its
    /// result was discarded.
    Superseded,
}

impl SyncOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

// ── Roster ───────────────────────────────────────────────────────

/// Local view of the remote student collection.
///
/// Cheaply cloneable via `Arc<RosterInner>`; clones share state. Build
/// one per mounted collection view and drop it on unmount.
#[derive(Clone)]
pub struct Roster {
    inner: Arc<RosterInner>,
}

struct RosterInner {
    directory: StudentDirectory,
    store: SnapshotStore,
    draft: watch::Sender<NewStudentDraft>,
    selection: watch::Sender<SelectionTracker>,
}

impl Roster {
    pub fn new(directory: StudentDirectory) -> Self {
        let (draft, _) = watch::channel(NewStudentDraft::default());
        let (selection, _) = watch::channel(SelectionTracker::default());
        Self {
            inner: Arc::new(RosterInner {
                directory,
                store: SnapshotStore::new(),
                draft,
                selection,
            }),
        }
    }

    /// Build a roster, and its HTTP client, from runtime configuration.
    pub fn from_config(config: &RosterConfig) -> Result<Self, CoreError> {
        Ok(Self::new(StudentDirectory::new(config)?))
    }

    pub fn directory(&self) -> &StudentDirectory {
        &self.inner.directory
    }

    // ── Remote-backed operations ─────────────────────────────────

    /// Populate the listing from the service.
    pub async fn initialize(&self) -> SyncOutcome {
        info!(base_url = %self.inner.directory.base_url(), "loading student collection");
        self.refresh().await
    }

    /// Full re-fetch. Success replaces the snapshot in received order;
    /// failure empties it. Either result is dropped if a newer refresh
    /// was issued meanwhile.
    pub async fn refresh(&self) -> SyncOutcome {
        let store = &self.inner.store;
        let ticket = store.begin_refresh();

        match self.inner.directory.list_all().await {
            Ok(records) => {
                let count = records.len();
                if store.apply(ticket, records) {
                    debug!(count, "snapshot replaced");
                    self.prune_selection();
                    SyncOutcome::Applied
                } else {
                    debug!(?ticket, "discarding superseded listing");
                    SyncOutcome::Superseded
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch students");
                if store.apply_failure(ticket) {
                    self.prune_selection();
                    SyncOutcome::Failed
                } else {
                    SyncOutcome::Superseded
                }
            }
        }
    }

    /// Create a record from the current draft.
    ///
    /// Skipped unless both name and code are present. On success the
    /// listing is re-fetched once and the draft resets; on failure the
    /// snapshot and draft are left as they were.
    pub async fn submit_draft(&self) -> SyncOutcome {
        let draft = self.draft();
        if !draft.is_submittable() {
            debug!("draft incomplete, not submitting");
            return SyncOutcome::Skipped;
        }

        if let Err(e) = self.inner.directory.create(&draft).await {
            warn!(error = %e, "failed to add student");
            return SyncOutcome::Failed;
        }

        self.refresh().await;
        self.inner.draft.send_replace(NewStudentDraft::default());
        SyncOutcome::Applied
    }

    /// Delete a record remotely, then re-fetch once.
    pub async fn remove_record(&self, id: &StudentId) -> SyncOutcome {
        if let Err(e) = self.inner.directory.delete_by_id(id).await {
            warn!(%id, error = %e, "failed to delete student");
            return SyncOutcome::Failed;
        }
        self.refresh().await;
        SyncOutcome::Applied
    }

    // ── Local-only operations ────────────────────────────────────

    /// Empty the listing and reset the selection. No remote call; the
    /// service still holds every record.
    pub fn clear_local(&self) -> SyncOutcome {
        self.inner.store.clear();
        self.inner.selection.send_modify(SelectionTracker::reset);
        debug!("local listing cleared");
        SyncOutcome::Applied
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.store.snapshot()
    }

    pub fn subscribe(&self) -> SnapshotStream {
        SnapshotStream::new(self.inner.store.subscribe())
    }

    /// When a listing was last applied successfully.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.inner.store.last_refresh()
    }

    pub fn subscribe_last_refresh(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.inner.store.subscribe_last_refresh()
    }

    // ── Draft ────────────────────────────────────────────────────

    pub fn draft(&self) -> NewStudentDraft {
        self.inner.draft.borrow().clone()
    }

    pub fn set_draft(&self, draft: NewStudentDraft) {
        self.inner.draft.send_replace(draft);
    }

    /// Edit the draft in place, notifying subscribers only on change.
    pub fn edit_draft(&self, edit: impl FnOnce(&mut NewStudentDraft)) {
        self.inner.draft.send_if_modified(|draft| {
            let before = draft.clone();
            edit(draft);
            *draft != before
        });
    }

    pub fn subscribe_draft(&self) -> watch::Receiver<NewStudentDraft> {
        self.inner.draft.subscribe()
    }

    // ── Selection ────────────────────────────────────────────────

    pub fn selection(&self) -> SelectionTracker {
        self.inner.selection.borrow().clone()
    }

    /// Raw checkbox event, not tied to a row.
    pub fn on_toggle(&self, checked: bool) {
        self.inner.selection.send_modify(|s| s.on_toggle(checked));
    }

    /// Flip selection of one row. Returns whether it is now selected.
    pub fn toggle_selection(&self, id: &StudentId) -> bool {
        let mut checked = false;
        self.inner.selection.send_modify(|s| checked = s.toggle(id));
        checked
    }

    pub fn subscribe_selection(&self) -> watch::Receiver<SelectionTracker> {
        self.inner.selection.subscribe()
    }

    // ── Detail ───────────────────────────────────────────────────

    /// A detail lookup sharing this roster's HTTP client.
    pub fn detail_lookup(&self) -> DetailLookup {
        DetailLookup::new(self.inner.directory.clone())
    }

    // ── Private helpers ──────────────────────────────────────────

    fn prune_selection(&self) {
        let snap = self.inner.store.snapshot();
        self.inner
            .selection
            .send_if_modified(|s| s.retain_listed(&snap) > 0);
    }
}
