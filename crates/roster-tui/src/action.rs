//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;

use chrono::{DateTime, Utc};

use roster_core::{DetailSlot, NewStudentDraft, SelectionTracker, Snapshot, StudentId, SyncOutcome};

use crate::screen::Route;

/// Which remote operation a sync task ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOp {
    Refresh,
    Add,
    Delete,
    Detail,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
}

/// A toast notification. Only used for local confirmations; remote
/// failures go to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
        }
    }
}

/// An action waiting on a y/n answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteStudent { id: StudentId, name: String },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteStudent { name, .. } => write!(f, "Delete {name}?"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ──
    Navigate(Route),
    GoBack,
    ToggleHelp,

    // ── Data updates (from the data bridge) ──
    StudentsUpdated(Snapshot),
    SelectionUpdated(SelectionTracker),
    DraftUpdated(NewStudentDraft),
    LastRefreshUpdated(Option<DateTime<Utc>>),
    DetailUpdated(DetailSlot),

    // ── Roster operations ──
    RequestRefresh,
    SetDraft(NewStudentDraft),
    SubmitDraft,
    ToggleSelection(StudentId),
    RequestDelete(StudentId),
    ClearLocal,
    ReloadDetail,
    SyncStarted(SyncOp),
    SyncFinished(SyncOp, SyncOutcome),

    // ── Overlays ──
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,
    Notify(Notification),
}
