use serde::Deserialize;

/// Install presence of a pool entry.
///
/// Installed and uninstalled are mutually exclusive by construction;
/// `Unknown` is the "neither reported" state a freshly loaded entry may be
/// in.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Installed,
    Uninstalled,
    #[default]
    Unknown,
}

/// Transient status block of a pool entry.
///
/// This is the mutable side of an entry: presence, a lock flag exempting the
/// entry from automatic transaction planning, and a transact flag marking a
/// pending install/remove/update. The block is plain `Copy` data so readers
/// always see a complete snapshot of one moment.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ResStatus {
    presence: Presence,
    locked: bool,
    transact: bool,
}

impl ResStatus {
    pub fn new(presence: Presence) -> Self {
        Self {
            presence,
            locked: false,
            transact: false,
        }
    }

    pub fn installed() -> Self {
        Self::new(Presence::Installed)
    }

    pub fn uninstalled() -> Self {
        Self::new(Presence::Uninstalled)
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn is_installed(&self) -> bool {
        self.presence == Presence::Installed
    }

    pub fn is_uninstalled(&self) -> bool {
        self.presence == Presence::Uninstalled
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn transacts(&self) -> bool {
        self.transact
    }

    pub fn set_presence(&mut self, presence: Presence) {
        self.presence = presence;
    }

    pub fn set_lock(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn set_transact(&mut self, transact: bool) {
        self.transact = transact;
    }

    pub fn with_lock(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_transact(mut self, transact: bool) -> Self {
        self.transact = transact;
        self
    }
}
