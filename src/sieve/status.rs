//! Predicates over the transient status of pool entries.
//!
//! Status predicates read the entry's live status cell on every evaluation
//! and never cache: the cell belongs to the pool owner and may change
//! between calls. There is no snapshot isolation at this layer; callers
//! needing a consistent view across several evaluations copy the status out
//! first.

use crate::pool::PoolEntry;
use crate::sieve::functional::Sieve;

/// Select entries whose status reports installed.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByInstalled;

impl Sieve<PoolEntry> for ByInstalled {
    fn accept(&mut self, entry: &PoolEntry) -> bool {
        entry.status().is_installed()
    }
}

/// Select entries whose status reports uninstalled.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByUninstalled;

impl Sieve<PoolEntry> for ByUninstalled {
    fn accept(&mut self, entry: &PoolEntry) -> bool {
        entry.status().is_uninstalled()
    }
}

/// Select entries marked for a pending transaction.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByTransact;

impl Sieve<PoolEntry> for ByTransact {
    fn accept(&mut self, entry: &PoolEntry) -> bool {
        entry.status().transacts()
    }
}

/// Select locked entries, i.e. those exempt from automatic transaction
/// planning.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByLock;

impl Sieve<PoolEntry> for ByLock {
    fn accept(&mut self, entry: &PoolEntry) -> bool {
        entry.status().is_locked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{PoolEntry, ResStatus};
    use crate::resolvable::{Arch, Edition, RecordData, ResKind, Resolvable, Source};
    use crate::sieve::functional::not;

    fn entry(status: ResStatus) -> PoolEntry {
        let record = Resolvable::new(RecordData {
            kind: ResKind::Package,
            name: "tool".to_string(),
            edition: Edition::parse("1.0").unwrap(),
            arch: Arch::noarch(),
            source: Source::new("fixture"),
            provides: Vec::new(),
            requires: Vec::new(),
            src_package: None,
        })
        .unwrap();
        PoolEntry::new(record, status)
    }

    #[test]
    fn predicates_mirror_the_status_block() {
        let installed = entry(ResStatus::installed());
        let uninstalled = entry(ResStatus::uninstalled().with_transact(true).with_lock(true));
        let unknown = entry(ResStatus::default());

        assert!(ByInstalled.accept(&installed));
        assert!(!ByInstalled.accept(&uninstalled));
        assert!(!ByInstalled.accept(&unknown));

        assert!(ByUninstalled.accept(&uninstalled));
        assert!(!ByUninstalled.accept(&unknown));

        assert!(ByTransact.accept(&uninstalled));
        assert!(ByLock.accept(&uninstalled));
        assert!(!ByTransact.accept(&installed));
    }

    #[test]
    fn negation_tracks_live_status() {
        let e = entry(ResStatus::installed());
        let mut pred = not(ByInstalled);
        assert_eq!(pred.accept(&e), !ByInstalled.accept(&e));

        e.set_status(ResStatus::uninstalled());
        assert!(pred.accept(&e));
    }
}
