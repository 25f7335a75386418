//! Indexed pool of resolvable records.
//!
//! The pool owns the entries, keeps their iteration order stable, and
//! derives capability indexes for provider/requirer traversals. Loading is
//! intentionally strict about schema versions, undeclared sources, and
//! duplicate identities so callers cannot silently filter over a malformed
//! working set.

use crate::capability::Capability;
use crate::pool::entry::{CapAndEntry, PoolEntry};
use crate::pool::model::{PoolSnapshot, load_snapshot_from_path};
use crate::pool::status::ResStatus;
use crate::resolvable::{RecordData, Resolvable, SourceRegistry};
use crate::sieve::Sieve;
use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;

// The crate currently speaks a single snapshot dialect; reject unexpected
// versions rather than risk building a pool from mismatched documents.
const SNAPSHOT_SCHEMA_VERSION: &str = "pool_snapshot_v1";

const RAW_SNAPSHOT_SCHEMA: &str = include_str!("../../schema/pool_snapshot.schema.json");

static SCHEMA_VALUE: OnceLock<Value> = OnceLock::new();
static COMPILED_SCHEMA: OnceLock<JSONSchema> = OnceLock::new();

#[derive(Default, Debug)]
/// Entry collection plus derived capability indexes.
pub struct Pool {
    entries: Vec<PoolEntry>,
    sources: SourceRegistry,
    whatprovides: BTreeMap<String, Vec<usize>>,
    whatrequires: BTreeMap<String, Vec<usize>>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a pool snapshot from disk.
    ///
    /// Validates the document against the snapshot schema, checks the
    /// declared version, and builds the entry list plus capability indexes.
    pub fn load(path: &Path) -> Result<Self> {
        validate_against_schema(path)?;
        let snapshot =
            load_snapshot_from_path(path).with_context(|| format!("loading {}", path.display()))?;
        Self::from_snapshot(snapshot)
    }

    /// Build a pool from an already-parsed snapshot document.
    ///
    /// Enforces the cross-record rules the schema cannot express: a known
    /// schema version, declared and unique sources, unique record
    /// identities.
    pub fn from_snapshot(snapshot: PoolSnapshot) -> Result<Self> {
        validate_schema_version(&snapshot.schema_version)?;

        let mut pool = Self::new();
        let mut declared: BTreeSet<String> = BTreeSet::new();
        for alias in &snapshot.sources {
            validate_source_alias(alias)?;
            if !declared.insert(alias.clone()) {
                bail!("duplicate source alias '{alias}'");
            }
            pool.sources.intern(alias);
        }

        for spec in snapshot.records {
            let source = pool
                .sources
                .get(&spec.source)
                .ok_or_else(|| {
                    anyhow!(
                        "record '{}' references undeclared source '{}'",
                        spec.name,
                        spec.source
                    )
                })?
                .clone();
            let status = spec.status.to_status();
            let record = Resolvable::new(RecordData {
                kind: spec.kind,
                name: spec.name,
                edition: spec.edition,
                arch: spec.arch,
                source,
                provides: spec.provides,
                requires: spec.requires,
                src_package: spec.src_package,
            })?;
            if pool.entries.iter().any(|e| *e.resolvable() == record) {
                bail!("duplicate record {record}");
            }
            pool.insert(record, status);
        }

        Ok(pool)
    }

    /// Append a record with its initial status and index its capabilities.
    ///
    /// The pool does not deduplicate here; snapshot loading rejects
    /// duplicates before insertion and embedders get to define their own
    /// policy.
    pub fn insert(&mut self, record: Resolvable, status: ResStatus) -> PoolEntry {
        let entry = PoolEntry::new(record, status);
        let idx = self.entries.len();
        index_names(&mut self.whatprovides, entry.resolvable().provides(), idx);
        index_names(&mut self.whatrequires, entry.resolvable().requires(), idx);
        self.entries.push(entry.clone());
        entry
    }

    /// The source handle registered for an alias, if any.
    pub fn source(&self, alias: &str) -> Option<&crate::resolvable::Source> {
        self.sources.get(alias)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &PoolEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply `filter` and `action` to every entry, in insertion order.
    ///
    /// Returns true when the scan ran to completion, false when the action
    /// stopped it early.
    pub fn for_each<F, A>(&self, filter: F, action: A) -> bool
    where
        F: Sieve<PoolEntry>,
        A: Sieve<PoolEntry>,
    {
        crate::sieve::for_each(self.entries.iter(), filter, action)
    }

    /// [`Pool::for_each`] with the implicit always-true filter.
    pub fn for_each_all<A>(&self, action: A) -> bool
    where
        A: Sieve<PoolEntry>,
    {
        crate::sieve::for_each_all(self.entries.iter(), action)
    }

    /// Apply `filter` and `action` to each (provided capability, entry)
    /// pair whose capability name matches the query's name.
    ///
    /// The index narrows by name only; value-level tests (edition ranges,
    /// status) are the pair predicates' job. Pairs borrow from the pool and
    /// live for the duration of this call.
    pub fn for_each_provider<F, A>(&self, cap: &Capability, filter: F, action: A) -> bool
    where
        F: for<'a> Sieve<CapAndEntry<'a>>,
        A: for<'a> Sieve<CapAndEntry<'a>>,
    {
        self.for_each_pair(&self.whatprovides, Resolvable::provides, cap, filter, action)
    }

    /// Requirer-side twin of [`Pool::for_each_provider`], walking the
    /// required-capability index instead.
    pub fn for_each_requirer<F, A>(&self, cap: &Capability, filter: F, action: A) -> bool
    where
        F: for<'a> Sieve<CapAndEntry<'a>>,
        A: for<'a> Sieve<CapAndEntry<'a>>,
    {
        self.for_each_pair(&self.whatrequires, Resolvable::requires, cap, filter, action)
    }

    fn for_each_pair<F, A>(
        &self,
        index: &BTreeMap<String, Vec<usize>>,
        deps: fn(&Resolvable) -> &[Capability],
        cap: &Capability,
        mut filter: F,
        mut action: A,
    ) -> bool
    where
        F: for<'a> Sieve<CapAndEntry<'a>>,
        A: for<'a> Sieve<CapAndEntry<'a>>,
    {
        let Some(hits) = index.get(cap.name()) else {
            return true;
        };
        for &idx in hits {
            let entry = &self.entries[idx];
            for candidate in deps(entry.resolvable()) {
                if candidate.name() != cap.name() {
                    continue;
                }
                let pair = CapAndEntry {
                    cap: candidate,
                    entry,
                };
                if filter.accept(&pair) && !action.accept(&pair) {
                    return false;
                }
            }
        }
        true
    }
}

fn index_names(index: &mut BTreeMap<String, Vec<usize>>, caps: &[Capability], idx: usize) {
    for cap in caps {
        let slot = index.entry(cap.name().to_string()).or_default();
        if slot.last() != Some(&idx) {
            slot.push(idx);
        }
    }
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }

    if !schema_version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got {}",
            schema_version
        );
    }

    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }

    Ok(())
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([SNAPSHOT_SCHEMA_VERSION.to_string()])
}

fn validate_source_alias(alias: &str) -> Result<()> {
    if alias.is_empty() {
        bail!("source alias must not be empty");
    }
    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':' | '-'))
    {
        bail!("source alias must match ^[A-Za-z0-9_.:-]+$, got {alias}");
    }
    Ok(())
}

fn validate_against_schema(snapshot_path: &Path) -> Result<()> {
    let snapshot_file = File::open(snapshot_path)
        .with_context(|| format!("opening snapshot {}", snapshot_path.display()))?;
    let snapshot_value: Value = serde_json::from_reader(BufReader::new(snapshot_file))
        .with_context(|| format!("parsing snapshot {}", snapshot_path.display()))?;

    let schema = snapshot_schema()?;
    if let Err(errors) = schema.validate(&snapshot_value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "pool snapshot {} failed schema validation:\n{}",
            snapshot_path.display(),
            details
        );
    }
    Ok(())
}

fn snapshot_schema() -> Result<&'static JSONSchema> {
    if let Some(compiled) = COMPILED_SCHEMA.get() {
        return Ok(compiled);
    }
    let parsed: Value =
        serde_json::from_str(RAW_SNAPSHOT_SCHEMA).context("parsing embedded snapshot schema")?;
    let raw = SCHEMA_VALUE.get_or_init(|| parsed);
    let compiled = JSONSchema::compile(raw)
        .map_err(|err| anyhow!("compiling embedded snapshot schema: {err}"))?;
    Ok(COMPILED_SCHEMA.get_or_init(|| compiled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_snapshot(value: &Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("allocate snapshot file");
        file.write_all(value.to_string().as_bytes())
            .expect("write snapshot");
        file
    }

    fn sample_snapshot() -> Value {
        json!({
            "schema_version": "pool_snapshot_v1",
            "sources": ["repo-oss", "repo-update"],
            "records": [
                {
                    "kind": "package",
                    "name": "openssl",
                    "edition": "1.1.1-3",
                    "arch": "x86_64",
                    "source": "repo-oss",
                    "provides": ["openssl", "libssl = 1.1.1"],
                    "status": {"state": "installed"}
                },
                {
                    "kind": "package",
                    "name": "openssl",
                    "edition": "3.0.2-1",
                    "arch": "x86_64",
                    "source": "repo-update",
                    "provides": ["openssl", "libssl = 3.0.2"],
                    "status": {"state": "uninstalled"}
                }
            ]
        })
    }

    #[test]
    fn load_builds_entries_and_interns_sources() {
        let file = write_snapshot(&sample_snapshot());
        let pool = Pool::load(file.path()).expect("sample snapshot loads");
        assert_eq!(pool.len(), 2);

        let entries: Vec<_> = pool.entries().collect();
        assert!(entries[0].status().is_installed());
        assert!(entries[1].status().is_uninstalled());
        assert_eq!(
            entries[0].resolvable().source(),
            pool.source("repo-oss").expect("source registered")
        );
        assert_ne!(
            entries[0].resolvable().source(),
            entries[1].resolvable().source()
        );
    }

    #[test]
    fn unknown_schema_versions_are_rejected() {
        // The schema const catches this on disk; the version gate also has to
        // hold for snapshots handed over as parsed documents.
        let snapshot = PoolSnapshot {
            schema_version: "pool_snapshot_v9".to_string(),
            sources: Vec::new(),
            records: Vec::new(),
        };
        let err = Pool::from_snapshot(snapshot).expect_err("version gate should fire");
        assert!(err.to_string().contains("pool_snapshot_v9"));

        let mut value = sample_snapshot();
        value["schema_version"] = json!("pool_snapshot_v9");
        let file = write_snapshot(&value);
        let err = Pool::load(file.path()).expect_err("schema const should fire");
        assert!(err.to_string().contains("failed schema validation"));
    }

    #[test]
    fn load_rejects_schema_violations() {
        let mut value = sample_snapshot();
        value["records"][0].as_object_mut().unwrap().remove("arch");
        let file = write_snapshot(&value);
        let err = Pool::load(file.path()).expect_err("missing arch should fail");
        assert!(err.to_string().contains("failed schema validation"));
    }

    #[test]
    fn load_rejects_undeclared_sources_and_duplicates() {
        let mut value = sample_snapshot();
        value["records"][1]["source"] = json!("repo-ghost");
        let file = write_snapshot(&value);
        let err = Pool::load(file.path()).expect_err("undeclared source should fail");
        assert!(err.to_string().contains("repo-ghost"));

        let mut value = sample_snapshot();
        value["records"][1] = value["records"][0].clone();
        let file = write_snapshot(&value);
        let err = Pool::load(file.path()).expect_err("duplicate identity should fail");
        assert!(err.to_string().contains("duplicate record"));

        let mut value = sample_snapshot();
        value["sources"] = json!(["repo-oss", "repo-oss"]);
        let file = write_snapshot(&value);
        let err = Pool::load(file.path()).expect_err("duplicate alias should fail");
        assert!(err.to_string().contains("duplicate source alias"));
    }

    #[test]
    fn load_rejects_misplaced_src_package_payload() {
        let mut value = sample_snapshot();
        value["records"][0]["src_package"] = json!({
            "archive_size": 1024,
            "location": "src/openssl.src.rpm"
        });
        let file = write_snapshot(&value);
        let err = Pool::load(file.path()).expect_err("payload on package kind should fail");
        assert!(err.to_string().contains("source-package payload"));
    }

    #[test]
    fn provider_traversal_yields_name_matched_pairs() {
        let file = write_snapshot(&sample_snapshot());
        let pool = Pool::load(file.path()).expect("sample snapshot loads");

        struct CollectEditions(Vec<String>);

        impl<'a> Sieve<CapAndEntry<'a>> for CollectEditions {
            fn accept(&mut self, pair: &CapAndEntry<'a>) -> bool {
                self.0.push(pair.cap.to_string());
                true
            }
        }

        let query = Capability::parse("libssl").unwrap();
        let mut seen = CollectEditions(Vec::new());
        let completed = pool.for_each_provider(
            &query,
            crate::sieve::always_true(),
            crate::sieve::by_ref(&mut seen),
        );
        assert!(completed);
        assert_eq!(seen.0, vec!["libssl = 1.1.1", "libssl = 3.0.2"]);

        let none = Capability::parse("libcrypto").unwrap();
        let mut seen = CollectEditions(Vec::new());
        assert!(pool.for_each_provider(
            &none,
            crate::sieve::always_true(),
            crate::sieve::by_ref(&mut seen)
        ));
        assert!(seen.0.is_empty());
    }
}
