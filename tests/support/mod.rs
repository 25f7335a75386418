use anyhow::{Context, Result};
use poolsieve::{Pool, PoolEntry, Sieve};
use serde_json::{Value, json};
use std::io::Write;
use tempfile::NamedTempFile;

/// Write a snapshot document to a temp file and load it as a pool.
pub fn load_pool(value: &Value) -> Result<Pool> {
    let mut file = NamedTempFile::new().context("failed to allocate snapshot file")?;
    file.write_all(value.to_string().as_bytes())
        .context("failed to write snapshot fixture")?;
    Pool::load(file.path())
}

/// Minimal snapshot record object; callers patch in what the scenario needs.
pub fn record(kind: &str, name: &str, edition: &str, arch: &str, state: &str) -> Value {
    json!({
        "kind": kind,
        "name": name,
        "edition": edition,
        "arch": arch,
        "source": "repo-oss",
        "status": {"state": state}
    })
}

/// Snapshot document with the default sources and the given records.
pub fn snapshot(records: Vec<Value>) -> Value {
    json!({
        "schema_version": "pool_snapshot_v1",
        "sources": ["repo-oss", "repo-update"],
        "records": records
    })
}

/// Action functor collecting record names.
///
/// With a limit set, the action answers false once the limit is reached,
/// asking the traversal to stop early.
pub struct NameCollector {
    pub names: Vec<String>,
    limit: Option<usize>,
}

impl NameCollector {
    pub fn unbounded() -> Self {
        Self {
            names: Vec::new(),
            limit: None,
        }
    }

    pub fn limited(limit: usize) -> Self {
        Self {
            names: Vec::new(),
            limit: Some(limit),
        }
    }
}

impl Sieve<PoolEntry> for NameCollector {
    fn accept(&mut self, entry: &PoolEntry) -> bool {
        self.names.push(entry.resolvable().name().to_string());
        match self.limit {
            None => true,
            Some(limit) => self.names.len() < limit,
        }
    }
}
