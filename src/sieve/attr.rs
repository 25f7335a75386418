//! Predicates over record identity attributes.
//!
//! Each predicate tests one attribute of a `Resolvable` and carries only the
//! comparison value, so copies are cheap and evaluation is side-effect free.
//! Every attribute predicate also accepts a `PoolEntry`, delegating to the
//! entry's record, so attribute and status predicates mix freely in one
//! chain.

use crate::pool::PoolEntry;
use crate::resolvable::{Arch, Edition, KindOf, ResKind, Resolvable, Source};
use crate::sieve::functional::Sieve;

/// Pluggable two-argument comparison strategy.
///
/// Attribute predicates evaluate `compare(record_attr, predicate_attr)`, so
/// `by_edition_with(e, CmpGt)` selects records whose edition is greater than
/// `e`. The built-in strategies are total over the crate's attribute types;
/// a closure strategy answers whatever the closure answers, incomparable
/// values included.
pub trait Compare<T: ?Sized> {
    fn compare(&self, lhs: &T, rhs: &T) -> bool;
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn compare(&self, lhs: &T, rhs: &T) -> bool {
        self(lhs, rhs)
    }
}

macro_rules! compare_strategy {
    ($(#[$doc:meta])* $name:ident: $bound:ident, $op:tt) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name;

        impl<T: $bound> Compare<T> for $name {
            fn compare(&self, lhs: &T, rhs: &T) -> bool {
                lhs $op rhs
            }
        }
    };
}

compare_strategy!(
    /// Equality, the default strategy.
    CmpEq: PartialEq, ==
);
compare_strategy!(
    /// Inequality.
    CmpNe: PartialEq, !=
);
compare_strategy!(
    /// Strictly less than.
    CmpLt: PartialOrd, <
);
compare_strategy!(
    /// Less than or equal.
    CmpLe: PartialOrd, <=
);
compare_strategy!(
    /// Strictly greater than.
    CmpGt: PartialOrd, >
);
compare_strategy!(
    /// Greater than or equal.
    CmpGe: PartialOrd, >=
);

/// Select records by kind.
#[derive(Clone, Debug)]
pub struct ByKind {
    kind: ResKind,
}

impl ByKind {
    pub fn new(kind: ResKind) -> Self {
        Self { kind }
    }
}

impl Sieve<Resolvable> for ByKind {
    fn accept(&mut self, record: &Resolvable) -> bool {
        *record.kind() == self.kind
    }
}

/// `ByKind` for a statically known record subtype.
pub fn by_kind<T: KindOf>() -> ByKind {
    ByKind::new(T::kind())
}

/// Select records by exact, case-sensitive name.
#[derive(Clone, Debug)]
pub struct ByName {
    name: String,
}

impl ByName {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Sieve<Resolvable> for ByName {
    fn accept(&mut self, record: &Resolvable) -> bool {
        record.name() == self.name
    }
}

/// Select records by originating source.
///
/// Source equality is handle identity, so this matches records loaded from
/// the very source handle given here, not merely one with the same alias.
#[derive(Clone, Debug)]
pub struct BySource {
    source: Source,
}

impl BySource {
    pub fn new(source: Source) -> Self {
        Self { source }
    }
}

impl Sieve<Resolvable> for BySource {
    fn accept(&mut self, record: &Resolvable) -> bool {
        *record.source() == self.source
    }
}

/// Select records by edition under a comparison strategy.
///
/// The strategy defaults to equality; `by_edition_with` swaps in any other
/// `Compare<Edition>` so one predicate type covers `=`, `<`, `>`, `!=` and
/// friends without new predicate types.
#[derive(Clone, Debug)]
pub struct ByEdition<C = CmpEq> {
    edition: Edition,
    cmp: C,
}

/// `ByEdition` with the default equality strategy.
pub fn by_edition(edition: Edition) -> ByEdition {
    ByEdition {
        edition,
        cmp: CmpEq,
    }
}

/// `ByEdition` under an explicit comparison strategy.
pub fn by_edition_with<C: Compare<Edition>>(edition: Edition, cmp: C) -> ByEdition<C> {
    ByEdition { edition, cmp }
}

impl<C: Compare<Edition>> Sieve<Resolvable> for ByEdition<C> {
    fn accept(&mut self, record: &Resolvable) -> bool {
        self.cmp.compare(record.edition(), &self.edition)
    }
}

/// Select records by architecture under a comparison strategy.
#[derive(Clone, Debug)]
pub struct ByArch<C = CmpEq> {
    arch: Arch,
    cmp: C,
}

/// `ByArch` with the default equality strategy.
pub fn by_arch(arch: Arch) -> ByArch {
    ByArch { arch, cmp: CmpEq }
}

/// `ByArch` under an explicit comparison strategy.
pub fn by_arch_with<C: Compare<Arch>>(arch: Arch, cmp: C) -> ByArch<C> {
    ByArch { arch, cmp }
}

impl<C: Compare<Arch>> Sieve<Resolvable> for ByArch<C> {
    fn accept(&mut self, record: &Resolvable) -> bool {
        self.cmp.compare(record.arch(), &self.arch)
    }
}

// Pool traversals hand out entries; attribute predicates read through to the
// entry's record, mirroring the record/entry conversion callers would
// otherwise spell out per chain.
macro_rules! entry_delegates {
    ($($name:ty),+ $(,)?) => {
        $(
            impl Sieve<PoolEntry> for $name {
                fn accept(&mut self, entry: &PoolEntry) -> bool {
                    self.accept(entry.resolvable())
                }
            }
        )+
    };
}

entry_delegates!(ByKind, ByName, BySource);

impl<C: Compare<Edition>> Sieve<PoolEntry> for ByEdition<C> {
    fn accept(&mut self, entry: &PoolEntry) -> bool {
        self.accept(entry.resolvable())
    }
}

impl<C: Compare<Arch>> Sieve<PoolEntry> for ByArch<C> {
    fn accept(&mut self, entry: &PoolEntry) -> bool {
        self.accept(entry.resolvable())
    }
}
