use serde::{Deserialize, Serialize};

/// Identifier of a hunk within a file, e.g. `"12-19"` for a diff-derived range.
pub type HunkId = String;

/// Identifier of a file within a branch; conventionally its repository path.
pub type FileId = String;

/// A hunk loaded from the working tree or index.
///
/// `id` is stable across reloads while the hunk's line range is unchanged and
/// is reissued when the range shifts. `hash` fingerprints the hunk content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalHunk {
    pub id: HunkId,
    pub hash: String,
}

/// A hunk taken from a historical diff (commit range, branch comparison).
///
/// Only the new-side line range is meaningful; the range doubles as identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteHunk {
    pub new_start: u32,
    pub new_lines: u32,
    pub hash: String,
}

impl RemoteHunk {
    /// One past the last line of the new-side range.
    pub fn new_end(&self) -> u32 {
        self.new_start.saturating_add(self.new_lines)
    }

    /// Renders the range as `"<start>-<end>"`.
    pub fn range(&self) -> String {
        format!("{}-{}", self.new_start, self.new_end())
    }
}

/// Either shape of hunk a branch snapshot can carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Hunk {
    Local(LocalHunk),
    Remote(RemoteHunk),
}

impl Hunk {
    pub fn local(id: impl Into<HunkId>, hash: impl Into<String>) -> Self {
        Hunk::Local(LocalHunk { id: id.into(), hash: hash.into() })
    }

    pub fn remote(new_start: u32, new_lines: u32, hash: impl Into<String>) -> Self {
        Hunk::Remote(RemoteHunk { new_start, new_lines, hash: hash.into() })
    }

    /// The key this hunk is tracked under.
    pub fn id(&self) -> HunkId {
        match self {
            Hunk::Local(h) => h.id.clone(),
            Hunk::Remote(h) => h.range(),
        }
    }

    pub fn hash(&self) -> &str {
        match self {
            Hunk::Local(h) => &h.hash,
            Hunk::Remote(h) => &h.hash,
        }
    }
}

/// A file on a virtual branch and its ordered hunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchFile {
    pub id: FileId,
    pub path: String,
    pub hunks: Vec<Hunk>,
}

impl BranchFile {
    /// Builds a file whose id is its path.
    pub fn new(path: impl Into<String>, hunks: Vec<Hunk>) -> Self {
        let path = path.into();
        Self { id: path.clone(), path, hunks }
    }
}

/// A file from a historical diff, carrying only range-based hunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub path: String,
    pub hunks: Vec<RemoteHunk>,
}

impl From<&RemoteFile> for BranchFile {
    fn from(file: &RemoteFile) -> Self {
        BranchFile::new(
            file.path.clone(),
            file.hunks.iter().cloned().map(Hunk::Remote).collect(),
        )
    }
}

/// A snapshot of a virtual branch as supplied by the branch loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualBranch {
    pub id: String,
    pub name: String,
    pub files: Vec<BranchFile>,
}

impl VirtualBranch {
    pub fn new(name: impl Into<String>, files: Vec<BranchFile>) -> Self {
        let name = name.into();
        Self { id: name.clone(), name, files }
    }

    /// Total number of hunks across all files, duplicates included.
    pub fn hunk_count(&self) -> usize {
        self.files.iter().map(|f| f.hunks.len()).sum()
    }

    /// Collects the range-based hunks of every file that has any.
    pub fn remote_files(&self) -> Vec<RemoteFile> {
        self.files
            .iter()
            .filter_map(|file| {
                let hunks: Vec<RemoteHunk> = file
                    .hunks
                    .iter()
                    .filter_map(|h| match h {
                        Hunk::Remote(r) => Some(r.clone()),
                        Hunk::Local(_) => None,
                    })
                    .collect();
                (!hunks.is_empty()).then(|| RemoteFile { path: file.path.clone(), hunks })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_hunk_id_is_its_range() {
        let hunk = Hunk::remote(10, 4, "abc");
        assert_eq!(hunk.id(), "10-14");
        assert_eq!(hunk.hash(), "abc");
    }

    #[test]
    fn branch_file_id_defaults_to_path() {
        let file = BranchFile::new("src/lib.rs", vec![Hunk::local("1-2", "h")]);
        assert_eq!(file.id, "src/lib.rs");
        assert_eq!(file.path, "src/lib.rs");
    }

    #[test]
    fn remote_file_converts_to_branch_file() {
        let remote = RemoteFile {
            path: "a.txt".to_owned(),
            hunks: vec![RemoteHunk { new_start: 3, new_lines: 2, hash: "x".to_owned() }],
        };
        let file = BranchFile::from(&remote);
        assert_eq!(file.hunks, vec![Hunk::remote(3, 2, "x")]);

        let branch = VirtualBranch::new(
            "main",
            vec![file, BranchFile::new("b.txt", vec![Hunk::local("1-2", "y")])],
        );
        assert_eq!(branch.remote_files(), vec![remote]);
        assert_eq!(branch.hunk_count(), 2);
    }

    #[test]
    fn hunks_serialize_with_a_kind_tag() {
        let json = serde_json::to_value(Hunk::local("1-2", "h")).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "local", "id": "1-2", "hash": "h" }));

        let remote: Hunk =
            serde_json::from_str(r#"{"kind":"remote","new_start":3,"new_lines":2,"hash":"x"}"#).unwrap();
        assert_eq!(remote, Hunk::remote(3, 2, "x"));
        assert!(serde_json::from_str::<Hunk>(r#"{"id":"1-2","hash":"h"}"#).is_err());
    }

    #[test]
    fn branch_snapshot_survives_json() {
        let branch = VirtualBranch::new(
            "feature",
            vec![
                BranchFile::new("a.txt", vec![Hunk::local("1-2", "h"), Hunk::remote(7, 0, "")]),
                BranchFile::new("bin.dat", vec![]),
            ],
        );
        let text = serde_json::to_string(&branch).unwrap();
        let back: VirtualBranch = serde_json::from_str(&text).unwrap();
        assert_eq!(back, branch);
    }
}
