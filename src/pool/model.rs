//! Deserializable representation of pool snapshot documents.
//!
//! The types mirror `schema/pool_snapshot.schema.json` so embedders and
//! tests can reason about snapshot content without ad-hoc JSON handling.
//! Use `Pool::load` for validation and index building; use these structs
//! when only the raw document is needed.

use crate::capability::Capability;
use crate::pool::status::{Presence, ResStatus};
use crate::resolvable::{Arch, Edition, ResKind, SrcPackageData};
use anyhow::Result;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io::BufRead;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
/// Full pool snapshot as stored on disk.
pub struct PoolSnapshot {
    pub schema_version: String,
    #[serde(default)]
    pub sources: Vec<String>,
    pub records: Vec<RecordSpec>,
}

#[derive(Clone, Debug, Deserialize)]
/// One record entry of a snapshot.
///
/// The identity scalars parse during deserialization; cross-record rules
/// (duplicate identities, undeclared sources) are enforced when the pool is
/// built from the snapshot.
pub struct RecordSpec {
    pub kind: ResKind,
    pub name: String,
    pub edition: Edition,
    pub arch: Arch,
    pub source: String,
    #[serde(default)]
    pub provides: Vec<Capability>,
    #[serde(default)]
    pub requires: Vec<Capability>,
    #[serde(default)]
    pub status: StatusSpec,
    #[serde(default)]
    pub src_package: Option<SrcPackageData>,
}

#[derive(Clone, Debug, Default, Deserialize)]
/// Status block of a snapshot record; everything defaults to "not set".
pub struct StatusSpec {
    #[serde(default)]
    pub state: Presence,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub transact: bool,
}

impl StatusSpec {
    pub fn to_status(&self) -> ResStatus {
        ResStatus::new(self.state)
            .with_lock(self.locked)
            .with_transact(self.transact)
    }
}

/// Read and parse a pool snapshot from disk without additional validation.
pub fn load_snapshot_from_path(path: &Path) -> Result<PoolSnapshot> {
    let data = fs::read_to_string(path)?;
    let snapshot: PoolSnapshot = serde_json::from_str(&data)?;
    Ok(snapshot)
}

/// Errors that can occur while reading NDJSON record streams.
#[derive(Debug)]
pub enum SnapshotReadError {
    Io(std::io::Error),
    Parse {
        line: usize,
        error: serde_json::Error,
    },
}

impl fmt::Display for SnapshotReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotReadError::Io(err) => write!(f, "failed to read NDJSON stream: {err}"),
            SnapshotReadError::Parse { line, error } => {
                write!(f, "line {line}: unable to parse record ({error})")
            }
        }
    }
}

impl std::error::Error for SnapshotReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotReadError::Io(err) => Some(err),
            SnapshotReadError::Parse { error, .. } => Some(error),
        }
    }
}

/// Read record specs from an NDJSON stream, one record per line.
///
/// Lines containing only whitespace are skipped. Errors include the 1-based
/// line number where parsing failed to simplify diagnostics for callers.
pub fn read_record_stream<R: BufRead>(reader: R) -> Result<Vec<RecordSpec>, SnapshotReadError> {
    let mut records = Vec::new();
    let mut line_buf = String::new();
    let mut reader = reader;
    let mut line_number = 0usize;

    loop {
        line_buf.clear();
        let bytes = reader
            .read_line(&mut line_buf)
            .map_err(SnapshotReadError::Io)?;
        if bytes == 0 {
            break;
        }
        line_number += 1;
        let trimmed = line_buf.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record = serde_json::from_str::<RecordSpec>(trimmed).map_err(|error| {
            SnapshotReadError::Parse {
                line: line_number,
                error,
            }
        })?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{BufReader, Cursor};

    fn sample_record(name: &str, state: &str) -> String {
        json!({
            "kind": "package",
            "name": name,
            "edition": "1.0-1",
            "arch": "x86_64",
            "source": "repo-oss",
            "provides": [name, format!("{name} = 1.0-1")],
            "status": {"state": state}
        })
        .to_string()
    }

    #[test]
    fn parses_record_lines() {
        let first = sample_record("vim", "installed");
        let second = sample_record("emacs", "uninstalled");
        let ndjson = format!("{first}\n  \n{second}\n");
        let cursor = Cursor::new(ndjson.into_bytes());
        let records = read_record_stream(BufReader::new(cursor)).expect("parses with blanks");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "vim");
        assert!(records[0].status.to_status().is_installed());
        assert_eq!(records[1].name, "emacs");
        assert_eq!(records[1].provides.len(), 2);
    }

    #[test]
    fn reports_line_numbers_on_parse_error() {
        let good = sample_record("vim", "installed");
        let ndjson = format!("{good}\n{good}\n{{ invalid json }}\n");
        let cursor = Cursor::new(ndjson.into_bytes());
        let err = read_record_stream(BufReader::new(cursor)).expect_err("should fail");
        match err {
            SnapshotReadError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn bad_edition_text_fails_parse() {
        let line = json!({
            "kind": "package",
            "name": "vim",
            "edition": "x:1.0",
            "arch": "x86_64",
            "source": "repo-oss"
        })
        .to_string();
        let cursor = Cursor::new(line.into_bytes());
        let err = read_record_stream(BufReader::new(cursor)).expect_err("epoch must be numeric");
        assert!(matches!(err, SnapshotReadError::Parse { line: 1, .. }));
    }
}
