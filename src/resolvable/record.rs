//! Shared read-only handles over pool-owned record state.
//!
//! A `Resolvable` is a cheap, reference-counted view of one record's identity
//! block; the block itself is created by whatever feeds the pool and is never
//! mutated afterwards. `Source` handles work the same way, with equality
//! meaning "the very same source object", which is what source predicates
//! need.

use crate::capability::Capability;
use crate::resolvable::identity::{Arch, Edition, ResKind};
use crate::resolvable::srcpackage::SrcPackageData;
use anyhow::{Result, bail};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

struct SourceInner {
    alias: String,
}

/// Handle to an originating repository/source.
///
/// Equality is handle identity: two `Source` values compare equal only when
/// they point at the same underlying source object. The alias is display
/// metadata and takes no part in comparisons; intern through
/// [`SourceRegistry`] when alias-level sharing is wanted.
#[derive(Clone)]
pub struct Source {
    inner: Arc<SourceInner>,
}

impl Source {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(SourceInner {
                alias: alias.into(),
            }),
        }
    }

    pub fn alias(&self) -> &str {
        &self.inner.alias
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Source {}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Source").field(&self.inner.alias).finish()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.alias)
    }
}

#[derive(Default, Debug)]
/// In-memory interner handing out one `Source` handle per alias.
///
/// Snapshot loading runs every record's source text through here so records
/// from the same source share a handle and identity equality holds across
/// them.
pub struct SourceRegistry {
    sources: BTreeMap<String, Source>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch or create the handle for an alias.
    pub fn intern(&mut self, alias: &str) -> Source {
        self.sources
            .entry(alias.to_string())
            .or_insert_with(|| Source::new(alias))
            .clone()
    }

    /// Fetch an already-registered handle, if present.
    pub fn get(&self, alias: &str) -> Option<&Source> {
        self.sources.get(alias)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Construction payload for one record, handed over by the pool-feeding side.
///
/// Everything in here freezes once the record is built; later status changes
/// live on the pool entry, not the record.
pub struct RecordData {
    pub kind: ResKind,
    pub name: String,
    pub edition: Edition,
    pub arch: Arch,
    pub source: Source,
    pub provides: Vec<Capability>,
    pub requires: Vec<Capability>,
    pub src_package: Option<SrcPackageData>,
}

pub(crate) struct RecordInner {
    pub(crate) kind: ResKind,
    pub(crate) name: String,
    pub(crate) edition: Edition,
    pub(crate) arch: Arch,
    pub(crate) source: Source,
    pub(crate) provides: Vec<Capability>,
    pub(crate) requires: Vec<Capability>,
    pub(crate) src_package: Option<Arc<SrcPackageData>>,
}

/// Read-only view handle of a resolvable record.
///
/// Handles are cheap to clone and may be retained past the traversal that
/// produced them; the backing block is shared and immutable. Identity
/// equality covers the kind/name/edition/arch quadruple; the source is
/// excluded, so the "same" record from two sources compares equal.
#[derive(Clone)]
pub struct Resolvable {
    pub(crate) inner: Arc<RecordInner>,
}

impl Resolvable {
    pub fn new(data: RecordData) -> Result<Self> {
        if data.kind.is_empty() {
            bail!("record '{}' has an empty kind", data.name);
        }
        if data.name.is_empty() {
            bail!("encountered record with no name");
        }
        if data.src_package.is_some() && data.kind != ResKind::SrcPackage {
            bail!(
                "record '{}' carries a source-package payload but has kind '{}'",
                data.name,
                data.kind
            );
        }
        Ok(Self {
            inner: Arc::new(RecordInner {
                kind: data.kind,
                name: data.name,
                edition: data.edition,
                arch: data.arch,
                source: data.source,
                provides: data.provides,
                requires: data.requires,
                src_package: data.src_package.map(Arc::new),
            }),
        })
    }

    pub fn kind(&self) -> &ResKind {
        &self.inner.kind
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn edition(&self) -> &Edition {
        &self.inner.edition
    }

    pub fn arch(&self) -> &Arch {
        &self.inner.arch
    }

    pub fn source(&self) -> &Source {
        &self.inner.source
    }

    /// Capabilities this record provides.
    pub fn provides(&self) -> &[Capability] {
        &self.inner.provides
    }

    /// Capabilities this record requires.
    pub fn requires(&self) -> &[Capability] {
        &self.inner.requires
    }
}

impl PartialEq for Resolvable {
    fn eq(&self, other: &Self) -> bool {
        self.inner.kind == other.inner.kind
            && self.inner.name == other.inner.name
            && self.inner.edition == other.inner.edition
            && self.inner.arch == other.inner.arch
    }
}

impl Eq for Resolvable {}

impl fmt::Display for Resolvable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]{}-{}.{}",
            self.inner.kind, self.inner.name, self.inner.edition, self.inner.arch
        )
    }
}

impl fmt::Debug for Resolvable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resolvable({self})")
    }
}

/// Kind constant of a record subtype, driving the generic predicate
/// factories (`by_kind::<Package>()`).
pub trait KindOf {
    fn kind() -> ResKind;
}

/// Marker for plain binary packages.
pub struct Package;

impl KindOf for Package {
    fn kind() -> ResKind {
        ResKind::Package
    }
}

/// Marker for installation patterns.
pub struct Pattern;

impl KindOf for Pattern {
    fn kind() -> ResKind {
        ResKind::Pattern
    }
}

/// Marker for products.
pub struct Product;

impl KindOf for Product {
    fn kind() -> ResKind {
        ResKind::Product
    }
}

/// Marker for patches.
pub struct Patch;

impl KindOf for Patch {
    fn kind() -> ResKind {
        ResKind::Patch
    }
}
