//! Source-package view over a resolvable record.
//!
//! Source packages carry archive metadata on top of the plain identity:
//! archive size, a per-partition disk usage estimate, and the location of
//! the archive on disk or in the source. The accessors forward into the
//! shared record block; nothing here is recomputed per call.

use crate::resolvable::identity::ResKind;
use crate::resolvable::record::Resolvable;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Byte count with a humanized rendering.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Deserialize)]
#[serde(transparent)]
pub struct ByteCount(pub u64);

impl ByteCount {
    pub fn bytes(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ByteCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const UNITS: &[&str] = &["KiB", "MiB", "GiB", "TiB"];
        if self.0 < 1024 {
            return write!(f, "{} B", self.0);
        }
        let mut value = self.0 as f64;
        let mut unit = 0;
        while value >= 1024.0 && unit + 1 < UNITS.len() {
            value /= 1024.0;
            unit += 1;
        }
        write!(f, "{value:.1} {}", UNITS[unit])
    }
}

/// Usage estimate for one mount point touched by a package.
#[derive(Clone, Debug, Deserialize)]
pub struct DuEntry {
    pub path: PathBuf,
    pub size: ByteCount,
    #[serde(default)]
    pub files: u64,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
/// Per-partition disk usage estimate.
pub struct DiskUsage {
    entries: Vec<DuEntry>,
}

impl DiskUsage {
    pub fn new(entries: Vec<DuEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DuEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total size over all partitions.
    pub fn total(&self) -> ByteCount {
        ByteCount(self.entries.iter().map(|entry| entry.size.0).sum())
    }
}

/// Archive metadata block of a source package, frozen at record build time.
#[derive(Clone, Debug, Deserialize)]
pub struct SrcPackageData {
    pub archive_size: ByteCount,
    #[serde(default)]
    pub disk_usage: DiskUsage,
    pub location: PathBuf,
}

/// Typed view of a resolvable whose kind is `srcpackage`.
///
/// The view shares the record's backing block; [`SrcPackage::from_resolvable`]
/// is the only way in and fails on kind mismatch or when the record carries
/// no archive payload.
#[derive(Clone)]
pub struct SrcPackage {
    base: Resolvable,
    data: Arc<SrcPackageData>,
}

impl SrcPackage {
    pub fn from_resolvable(record: &Resolvable) -> Option<Self> {
        if *record.kind() != ResKind::SrcPackage {
            return None;
        }
        let data = record.inner.src_package.as_ref()?.clone();
        Some(Self {
            base: record.clone(),
            data,
        })
    }

    /// The plain record view of this source package.
    pub fn resolvable(&self) -> &Resolvable {
        &self.base
    }

    pub fn archive_size(&self) -> ByteCount {
        self.data.archive_size
    }

    pub fn disk_usage(&self) -> &DiskUsage {
        &self.data.disk_usage
    }

    pub fn location(&self) -> &Path {
        &self.data.location
    }
}

impl crate::resolvable::record::KindOf for SrcPackage {
    fn kind() -> ResKind {
        ResKind::SrcPackage
    }
}

impl fmt::Display for SrcPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.base.fmt(f)
    }
}
