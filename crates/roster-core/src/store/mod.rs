// ── Reactive storage ──

mod snapshot;

pub(crate) use snapshot::SnapshotStore;
pub use snapshot::Snapshot;
