//! Pool wiring: entries, live status, snapshot loading, capability indexes.
//!
//! This module wraps the working set the sieve layer filters over. Types
//! here mirror the snapshot schema under `schema/pool_snapshot.schema.json`;
//! callers use `Pool` for traversals and `pool::model` when only the raw
//! document is needed.

pub mod entry;
pub mod index;
pub mod model;
pub mod status;

pub use entry::{CapAndEntry, PoolEntry};
pub use index::Pool;
pub use model::{
    PoolSnapshot, RecordSpec, SnapshotReadError, StatusSpec, load_snapshot_from_path,
    read_record_stream,
};
pub use status::{Presence, ResStatus};
