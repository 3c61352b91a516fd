//! Text encodings of hunk ownership.
//!
//! Two encodings exist, both one record per line:
//!
//! - `path:id-hash,id-hash` names hunks by identity and content hash. It is
//!   produced by [`files_to_ownership`] and by `SelectedOwnership`'s
//!   `Display` impl, and read back with [`parse_ownership`].
//! - `path:start-end,start-end` names hunks by new-side line range for diffs
//!   whose hunks have no stable identity. It is produced by
//!   [`files_to_simple_ownership`] and read back with [`parse_simple_ownership`].
//!
//! Paths may contain `:`; the record is split at the last one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OwnershipError;
use crate::types::{BranchFile, HunkId, RemoteFile};

/// Encodes every hunk of `files` as `path:id-hash,...` lines.
pub fn files_to_ownership(files: &[BranchFile]) -> String {
    files
        .iter()
        .map(|f| {
            let hunks: Vec<String> =
                f.hunks.iter().map(|h| format!("{}-{}", h.id(), h.hash())).collect();
            format!("{}:{}", f.path, hunks.join(","))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Encodes the new-side ranges of `files` as `path:start-end,...` lines.
pub fn files_to_simple_ownership(files: &[RemoteFile]) -> String {
    files
        .iter()
        .map(|f| {
            let ranges: Vec<String> = f.hunks.iter().map(|h| h.range()).collect();
            format!("{}:{}", f.path, ranges.join(","))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A hunk named by identity and content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunkRef {
    pub id: HunkId,
    pub hash: String,
}

/// One decoded `path:id-hash,...` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOwnership {
    pub path: String,
    pub hunks: Vec<HunkRef>,
}

impl fmt::Display for FileOwnership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.path)?;
        for (i, hunk) in self.hunks.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}-{}", hunk.id, hunk.hash)?;
        }
        Ok(())
    }
}

/// A half-open new-side line range, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

/// One decoded `path:start-end,...` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRanges {
    pub path: String,
    pub ranges: Vec<LineRange>,
}

/// Splits a record into its path and comma-separated entries.
///
/// Returns `None` for blank lines.
fn split_record(line_no: usize, line: &str) -> Result<Option<(String, Vec<&str>)>, OwnershipError> {
    let line = line.trim_end();
    if line.is_empty() {
        return Ok(None);
    }
    let (path, rest) = line
        .rsplit_once(':')
        .ok_or(OwnershipError::MissingPathSeparator { line: line_no })?;
    if path.is_empty() {
        return Err(OwnershipError::EmptyPath { line: line_no });
    }
    if rest.is_empty() {
        return Err(OwnershipError::NoHunks { line: line_no, path: path.to_owned() });
    }
    Ok(Some((path.to_owned(), rest.split(',').collect())))
}

/// Decodes `path:id-hash,...` lines.
///
/// Each entry is split at its last `-`, so ids may themselves contain `-`
/// (e.g. `12-19-3fa4` is id `12-19`, hash `3fa4`). The hash may be empty.
pub fn parse_ownership(text: &str) -> Result<Vec<FileOwnership>, OwnershipError> {
    let mut files = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let Some((path, entries)) = split_record(line_no, line)? else {
            continue;
        };
        let mut hunks = Vec::with_capacity(entries.len());
        for entry in entries {
            let malformed = || OwnershipError::MalformedHunk { line: line_no, entry: entry.to_owned() };
            let (id, hash) = entry.rsplit_once('-').ok_or_else(malformed)?;
            if id.is_empty() {
                return Err(malformed());
            }
            hunks.push(HunkRef { id: id.to_owned(), hash: hash.to_owned() });
        }
        files.push(FileOwnership { path, hunks });
    }
    Ok(files)
}

fn parse_line_number(line_no: usize, value: &str) -> Result<u32, OwnershipError> {
    value
        .parse()
        .map_err(|_| OwnershipError::InvalidLineNumber { line: line_no, value: value.to_owned() })
}

/// Decodes `path:start-end,...` lines.
pub fn parse_simple_ownership(text: &str) -> Result<Vec<FileRanges>, OwnershipError> {
    let mut files = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let Some((path, entries)) = split_record(line_no, line)? else {
            continue;
        };
        let mut ranges = Vec::with_capacity(entries.len());
        for entry in entries {
            let (start, end) = entry.split_once('-').ok_or_else(|| OwnershipError::MalformedHunk {
                line: line_no,
                entry: entry.to_owned(),
            })?;
            let start = parse_line_number(line_no, start)?;
            let end = parse_line_number(line_no, end)?;
            if end < start {
                return Err(OwnershipError::InvertedRange { line: line_no, start, end });
            }
            ranges.push(LineRange { start, end });
        }
        files.push(FileRanges { path, ranges });
    }
    Ok(files)
}
