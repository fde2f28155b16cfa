//! Data bridge: connects [`Roster`] watch channels to TUI actions.
//!
//! Runs as a background task: pushes the current state, runs the initial
//! load, then forwards every listing, selection, draft, refresh-time, and
//! detail change as an [`Action`] until cancelled.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use roster_core::{DetailLookup, Roster};

use crate::action::{Action, SyncOp};

pub async fn spawn_data_bridge(
    roster: Roster,
    detail: DetailLookup,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut students = roster.subscribe();
    let mut selection = roster.subscribe_selection();
    let mut draft = roster.subscribe_draft();
    let mut last_refresh = roster.subscribe_last_refresh();
    let mut detail_slot = detail.subscribe();

    // Push initial snapshots so screens have data immediately
    let _ = action_tx.send(Action::StudentsUpdated(students.latest()));
    let _ = action_tx.send(Action::SelectionUpdated(selection.borrow_and_update().clone()));
    let _ = action_tx.send(Action::DraftUpdated(draft.borrow_and_update().clone()));
    let _ = action_tx.send(Action::LastRefreshUpdated(*last_refresh.borrow_and_update()));
    let _ = action_tx.send(Action::DetailUpdated(detail_slot.borrow_and_update().clone()));

    // Initial load runs alongside the forwarding loop
    let init_tx = action_tx.clone();
    let init_roster = roster.clone();
    let init_cancel = cancel.clone();
    tokio::spawn(async move {
        let _ = init_tx.send(Action::SyncStarted(SyncOp::Refresh));
        tokio::select! {
            () = init_cancel.cancelled() => {}
            outcome = init_roster.initialize() => {
                let _ = init_tx.send(Action::SyncFinished(SyncOp::Refresh, outcome));
            }
        }
    });

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(snapshot) = students.changed() => {
                debug!(count = snapshot.len(), "dispatching StudentsUpdated");
                let _ = action_tx.send(Action::StudentsUpdated(snapshot));
            }
            Ok(()) = selection.changed() => {
                let s = selection.borrow_and_update().clone();
                let _ = action_tx.send(Action::SelectionUpdated(s));
            }
            Ok(()) = draft.changed() => {
                let d = draft.borrow_and_update().clone();
                let _ = action_tx.send(Action::DraftUpdated(d));
            }
            Ok(()) = last_refresh.changed() => {
                let at = *last_refresh.borrow_and_update();
                let _ = action_tx.send(Action::LastRefreshUpdated(at));
            }
            Ok(()) = detail_slot.changed() => {
                let slot = detail_slot.borrow_and_update().clone();
                let _ = action_tx.send(Action::DetailUpdated(slot));
            }
        }
    }

    debug!("data bridge shut down");
}
