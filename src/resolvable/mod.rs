//! Record identity model.
//!
//! This module holds the read-only view of a resolvable record: kind, name,
//! edition, architecture, and originating source, plus the `SrcPackage`
//! typed view for records that carry archive metadata. Predicates in
//! `crate::sieve` operate on these handles; construction belongs to whatever
//! feeds the pool.

pub mod identity;
pub mod record;
pub mod srcpackage;

pub use identity::{Arch, Edition, ResKind};
pub use record::{
    KindOf, Package, Patch, Pattern, Product, RecordData, Resolvable, Source, SourceRegistry,
};
pub use srcpackage::{ByteCount, DiskUsage, DuEntry, SrcPackage, SrcPackageData};
