use crate::capability::Capability;
use crate::pool::status::ResStatus;
use crate::resolvable::Resolvable;
use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

struct EntryInner {
    record: Resolvable,
    status: Cell<ResStatus>,
}

/// A resolvable record plus its live status within a working set.
///
/// Entries are owned by the pool; the handle is cheap to clone. The status
/// cell is externally mutable and reads are never cached, so two successive
/// `status()` calls may disagree if the owner changed the entry in between.
/// Callers needing a consistent view across several predicate evaluations
/// must take their own copy first.
#[derive(Clone)]
pub struct PoolEntry {
    inner: Arc<EntryInner>,
}

impl PoolEntry {
    pub fn new(record: Resolvable, status: ResStatus) -> Self {
        Self {
            inner: Arc::new(EntryInner {
                record,
                status: Cell::new(status),
            }),
        }
    }

    pub fn resolvable(&self) -> &Resolvable {
        &self.inner.record
    }

    /// Copy of the status block at this moment.
    pub fn status(&self) -> ResStatus {
        self.inner.status.get()
    }

    /// Replace the status block. Reserved for the pool owner; predicates
    /// never call this.
    pub fn set_status(&self, status: ResStatus) {
        self.inner.status.set(status);
    }

    /// Read-modify-write convenience over [`PoolEntry::set_status`].
    pub fn update_status(&self, update: impl FnOnce(&mut ResStatus)) {
        let mut status = self.inner.status.get();
        update(&mut status);
        self.inner.status.set(status);
    }
}

impl fmt::Debug for PoolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoolEntry({}, {:?})", self.inner.record, self.status())
    }
}

impl fmt::Display for PoolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.record.fmt(f)
    }
}

/// One capability/record association yielded by a capability index lookup.
///
/// Pairs borrow from the pool for the duration of the traversal that
/// produced them; clone `cap`/`entry` individually if anything must be kept.
pub struct CapAndEntry<'a> {
    pub cap: &'a Capability,
    pub entry: &'a PoolEntry,
}

impl fmt::Debug for CapAndEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapAndEntry({} -> {})", self.cap, self.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolvable::{Arch, Edition, RecordData, ResKind, Source};

    fn entry() -> PoolEntry {
        let record = Resolvable::new(RecordData {
            kind: ResKind::Package,
            name: "vim".to_string(),
            edition: Edition::parse("9.0").unwrap(),
            arch: Arch::new("x86_64"),
            source: Source::new("fixture"),
            provides: Vec::new(),
            requires: Vec::new(),
            src_package: None,
        })
        .unwrap();
        PoolEntry::new(record, ResStatus::uninstalled())
    }

    #[test]
    fn status_reads_are_live() {
        let entry = entry();
        let alias = entry.clone();
        assert!(entry.status().is_uninstalled());

        alias.set_status(ResStatus::installed().with_transact(true));
        assert!(entry.status().is_installed());
        assert!(entry.status().transacts());

        entry.update_status(|status| status.set_transact(false));
        assert!(!alias.status().transacts());
    }
}
