//! The vault: a bounded record of completed puzzle runs

/// History item snapshots
pub mod record;
/// Capped history log with synchronous persistence
pub mod recorder;
/// Keyed record storage backends
pub mod store;

pub use record::HistoryItem;
pub use recorder::RunRecorder;
pub use store::{FileRecordStore, MemoryRecordStore, RecordStore};
