//! Sync layer between `roster-api` and the presentation surfaces (CLI / TUI).
//!
//! - **[`Roster`]**: owns the local view of the remote student collection.
//!   [`initialize()`](Roster::initialize) loads it; every successful
//!   mutation ([`submit_draft`](Roster::submit_draft),
//!   [`remove_record`](Roster::remove_record)) is followed by exactly one
//!   full re-fetch. Overlapping refreshes are sequenced by a generation
//!   counter so only the latest one lands.
//!
//! - **[`StudentDirectory`]**: domain-typed create/read/delete over the
//!   HTTP client. One round-trip per call, every failure a
//!   [`CoreError::RemoteRequestFailure`].
//!
//! - **[`SelectionTracker`]**: unclamped selection count, plus an
//!   identity-aware set that is pruned when rows leave the listing.
//!
//! - **[`DetailLookup`]**: single-record view with
//!   `Unloaded | Loaded | Failed` state, fetched once per id change.
//!
//! Remote failures are logged once through `tracing` and swallowed; the
//! operations return a [`SyncOutcome`] instead.

pub mod config;
pub mod convert;
pub mod detail;
pub mod directory;
pub mod error;
pub mod model;
pub mod roster;
pub mod selection;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{RosterConfig, TlsVerification};
pub use detail::{DetailLookup, DetailSlot, DetailState};
pub use directory::StudentDirectory;
pub use error::{CoreError, FailureKind};
pub use model::{NewStudentDraft, StudentId, StudentRecord, StudentStatus};
pub use roster::{Roster, SyncOutcome};
pub use selection::SelectionTracker;
pub use store::Snapshot;
pub use stream::{SnapshotStream, SnapshotWatchStream};
