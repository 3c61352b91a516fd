//! Owned data types for the git background thread.
//!
//! All types in this module are fully owned (no borrowed lifetimes) and
//! implement `Send` so they can be transferred from the background thread
//! that owns the `git2::Repository` to the main UI thread.

use hunkpick_core::{FileId, HunkId, VirtualBranch};

/// A single line of diff output, fully owned and `Send`-safe.
///
/// Origin characters match `git2::DiffLine::origin()` conventions:
/// `'+'` added, `'-'` removed, `' '` context.
#[derive(Debug, Clone)]
pub struct OwnedDiffLine {
    pub origin: char,
    /// Full line content including trailing newline.
    pub content: String,
}

/// One `@@` hunk block from a diff, fully owned and `Send`-safe.
#[derive(Debug, Clone)]
pub struct OwnedDiffHunk {
    /// Index into the payload's file list.
    pub file_index: usize,
    /// The raw `@@ -old_start,old_lines +new_start,new_lines @@` header string.
    pub header: String,
    /// Starting line number in the new file.
    pub new_start: u32,
    /// Number of lines the hunk spans in the new file.
    pub new_lines: u32,
    /// All lines belonging to this hunk, in order.
    pub lines: Vec<OwnedDiffLine>,
}

impl OwnedDiffHunk {
    /// The hunk's identity: its new-side range, `"<start>-<start+lines>"`.
    ///
    /// Stays the same across reloads until an edit above or inside the hunk
    /// shifts its range.
    pub fn id(&self) -> HunkId {
        format!("{}-{}", self.new_start, self.new_start.saturating_add(self.new_lines))
    }
}

/// Per-file statistics for the file-list panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    /// Repository-relative path to the file; also its file id.
    pub path: String,
    /// Status character: `'M'` modified, `'A'` added, `'D'` deleted, `'R'` renamed.
    pub status: char,
    /// Number of lines added in this file.
    pub added: usize,
    /// Number of lines removed from this file.
    pub removed: usize,
}

/// The diff modes supported by hunkpick.
///
/// `Worktree` and `Staged` describe uncommitted work and yield identity-based
/// hunks; the other two describe history and yield range-based hunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffMode {
    /// HEAD tree vs working directory, index included.
    #[default]
    Worktree,
    /// HEAD tree vs index (`git diff --cached`).
    Staged,
    /// Base branch vs HEAD (`git diff main..HEAD`).
    BranchComparison,
    /// Arbitrary commit range (`git diff A..B`).
    CommitRange,
}

impl DiffMode {
    /// True for modes whose hunks come from history rather than uncommitted work.
    pub fn is_historical(self) -> bool {
        matches!(self, DiffMode::BranchComparison | DiffMode::CommitRange)
    }

    pub fn label(self) -> &'static str {
        match self {
            DiffMode::Worktree => "WORKTREE",
            DiffMode::Staged => "STAGED",
            DiffMode::BranchComparison => "BRANCH",
            DiffMode::CommitRange => "RANGE",
        }
    }

    /// The next mode in the `Tab` cycle. `CommitRange` is only reachable
    /// when a range was given on the command line.
    pub fn next(self, has_range: bool) -> Self {
        match self {
            DiffMode::Worktree => DiffMode::Staged,
            DiffMode::Staged => DiffMode::BranchComparison,
            DiffMode::BranchComparison if has_range => DiffMode::CommitRange,
            DiffMode::BranchComparison | DiffMode::CommitRange => DiffMode::Worktree,
        }
    }
}

/// Commands sent from the main thread to the git background worker thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitRequest {
    /// Load diff for a simple mode (Worktree, Staged, or BranchComparison).
    LoadDiff(DiffMode),
    /// Load diff for an explicit commit range with `from` and `to` refs.
    LoadDiffRange {
        /// The starting ref (older commit or branch tip).
        from: String,
        /// The ending ref (newer commit or branch tip).
        to: String,
    },
}

impl GitRequest {
    /// The diff mode the resulting payload will be tagged with.
    pub fn mode(&self) -> DiffMode {
        match self {
            GitRequest::LoadDiff(mode) => *mode,
            GitRequest::LoadDiffRange { .. } => DiffMode::CommitRange,
        }
    }
}

/// Result payload sent from the git background thread back to the main thread.
///
/// Carried inside `AppEvent::GitResult(Box<GitResultPayload>)`.
#[derive(Debug)]
pub struct GitResultPayload {
    /// The diff mode that was requested.
    pub mode: DiffMode,
    /// The diff as a branch snapshot, ready for ownership reconciliation.
    pub branch: VirtualBranch,
    /// Per-file statistics for the file-list panel, one per delta. Files
    /// without hunks (binary, mode-only) appear here but not in `branch`.
    pub files: Vec<FileSummary>,
    /// Pre-highlighted lines for the diff panel, computed in the background thread.
    pub highlighted_lines: Vec<ratatui::text::Line<'static>>,
    /// Indices into `highlighted_lines` where hunk header lines appear.
    pub hunk_offsets: Vec<usize>,
    /// `(file id, hunk id)` of each hunk, parallel to `hunk_offsets`.
    pub hunk_keys: Vec<(FileId, HunkId)>,
    /// Line index in `highlighted_lines` of each file's header line.
    pub file_line_offsets: Vec<usize>,
    /// Set when git failed; the payload is otherwise empty.
    pub error: Option<String>,
}

impl GitResultPayload {
    /// An empty payload carrying an error message, for graceful degradation.
    pub fn failed(mode: DiffMode, error: String) -> Self {
        Self {
            mode,
            branch: VirtualBranch::default(),
            files: Vec::new(),
            highlighted_lines: Vec::new(),
            hunk_offsets: Vec::new(),
            hunk_keys: Vec::new(),
            file_line_offsets: Vec::new(),
            error: Some(error),
        }
    }
}
