//! Predicate-filter and traversal layer for resolvable package pools.
//!
//! The crate exposes the read-only identity model of package-like records
//! (kind, name, edition, architecture, source), a pool of entries carrying
//! live install/lock/transact status, and the sieve layer: small,
//! value-copyable predicates over records, entries, and capability pairs,
//! plus the logical combinators and early-stop traversal that tie them
//! together. Pools are filled programmatically or from JSON snapshots
//! validated against `schema/pool_snapshot.schema.json`.
//!
//! Dependency resolution, transaction planning, and repository metadata
//! loading live elsewhere; this crate only selects over what those
//! subsystems produce.

pub mod capability;
pub mod pool;
pub mod resolvable;
pub mod sieve;

pub use capability::{CapMatch, Capability, Rel};
pub use pool::{
    CapAndEntry, Pool, PoolEntry, PoolSnapshot, Presence, RecordSpec, ResStatus,
    SnapshotReadError, StatusSpec, load_snapshot_from_path, read_record_stream,
};
pub use resolvable::{
    Arch, ByteCount, DiskUsage, DuEntry, Edition, KindOf, Package, Patch, Pattern, Product,
    RecordData, ResKind, Resolvable, Source, SourceRegistry, SrcPackage, SrcPackageData,
};
pub use sieve::{
    Always, ByArch, ByCaiInstalled, ByCaiKind, ByCaiNotTransact, ByCaiTransact, ByCaiUninstalled,
    ByCapMatch, ByCapabilityIndex, ByEdition, ByInstalled, ByKind, ByLock, ByName, ByRef,
    BySource, ByTransact, ByUninstalled, Chain, CmpEq, CmpGe, CmpGt, CmpLe, CmpLt, CmpNe,
    Compare, Never, Not, Sieve, always_false, always_true, by_arch, by_arch_with, by_cai_kind,
    by_edition, by_edition_with, by_kind, by_ref, chain, for_each, for_each_all, not,
};
