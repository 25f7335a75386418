//! Predicates over capability pairs.
//!
//! Capability index lookups yield `(capability, entry)` pairs, and callers
//! routinely need to narrow those by the record side without re-deriving the
//! record's own attribute predicates. This smaller family mirrors the status
//! predicates for exactly that, plus the capability-side match test.

use crate::capability::Capability;
use crate::pool::CapAndEntry;
use crate::resolvable::{KindOf, ResKind};
use crate::sieve::functional::Sieve;

/// Select pairs whose capability definitely matches the given one.
///
/// Only a `yes` answer from the three-valued match query passes; `maybe`
/// and `no` are both misses.
#[derive(Clone, Debug)]
pub struct ByCapMatch {
    cap: Capability,
}

impl ByCapMatch {
    pub fn new(cap: Capability) -> Self {
        Self { cap }
    }
}

impl<'a> Sieve<CapAndEntry<'a>> for ByCapMatch {
    fn accept(&mut self, pair: &CapAndEntry<'a>) -> bool {
        pair.cap.matches(&self.cap).is_yes()
    }
}

/// Select pairs by the record's kind.
#[derive(Clone, Debug)]
pub struct ByCaiKind {
    kind: ResKind,
}

impl ByCaiKind {
    pub fn new(kind: ResKind) -> Self {
        Self { kind }
    }
}

impl<'a> Sieve<CapAndEntry<'a>> for ByCaiKind {
    fn accept(&mut self, pair: &CapAndEntry<'a>) -> bool {
        *pair.entry.resolvable().kind() == self.kind
    }
}

/// `ByCaiKind` for a statically known record subtype.
pub fn by_cai_kind<T: KindOf>() -> ByCaiKind {
    ByCaiKind::new(T::kind())
}

/// Select pairs whose entry reports installed.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByCaiInstalled;

impl<'a> Sieve<CapAndEntry<'a>> for ByCaiInstalled {
    fn accept(&mut self, pair: &CapAndEntry<'a>) -> bool {
        pair.entry.status().is_installed()
    }
}

/// Select pairs whose entry reports uninstalled.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByCaiUninstalled;

impl<'a> Sieve<CapAndEntry<'a>> for ByCaiUninstalled {
    fn accept(&mut self, pair: &CapAndEntry<'a>) -> bool {
        pair.entry.status().is_uninstalled()
    }
}

/// Select pairs whose entry is marked to transact.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByCaiTransact;

impl<'a> Sieve<CapAndEntry<'a>> for ByCaiTransact {
    fn accept(&mut self, pair: &CapAndEntry<'a>) -> bool {
        pair.entry.status().transacts()
    }
}

/// Select pairs whose entry is not marked to transact.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByCaiNotTransact;

impl<'a> Sieve<CapAndEntry<'a>> for ByCaiNotTransact {
    fn accept(&mut self, pair: &CapAndEntry<'a>) -> bool {
        !pair.entry.status().transacts()
    }
}

/// Accepts every pair; the index that produced the pairs already did the
/// filtering.
///
/// This exists as a marker/compatibility shim for call sites that must pass
/// a pair predicate but want the index's own selection untouched. It
/// performs no test of its own; do not add one.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByCapabilityIndex;

impl<'a> Sieve<CapAndEntry<'a>> for ByCapabilityIndex {
    fn accept(&mut self, _pair: &CapAndEntry<'a>) -> bool {
        true
    }
}
